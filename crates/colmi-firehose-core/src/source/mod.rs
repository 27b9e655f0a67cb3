mod hex;
mod raw;

use std::path::Path;

pub use hex::HexCaptureSource;
pub use raw::RawCaptureSource;

use thiserror::Error;

/// One framed packet as delivered by a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacketEvent {
    /// Zero-based position of the packet in the capture.
    pub index: u64,
    pub data: Vec<u8>,
}

pub trait PacketSource {
    fn next_packet(&mut self) -> Result<Option<PacketEvent>, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid hex on line {line}: {message}")]
    Hex { line: usize, message: String },
}

/// Open a capture, picking the format from the file extension.
///
/// `.hex` and `.txt` files are read as one hex-encoded packet per line;
/// anything else is treated as raw concatenated 16-byte packets.
pub fn open_capture(path: &Path) -> Result<Box<dyn PacketSource>, SourceError> {
    if is_hex_capture(path) {
        Ok(Box::new(HexCaptureSource::open(path)?))
    } else {
        Ok(Box::new(RawCaptureSource::open(path)?))
    }
}

fn is_hex_capture(path: &Path) -> bool {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    ext == "hex" || ext == "txt"
}

impl<S: PacketSource + ?Sized> PacketSource for Box<S> {
    fn next_packet(&mut self) -> Result<Option<PacketEvent>, SourceError> {
        (**self).next_packet()
    }
}

#[cfg(test)]
mod tests {
    use super::is_hex_capture;
    use std::path::Path;

    #[test]
    fn hex_extension_detection() {
        assert!(is_hex_capture(Path::new("capture.hex")));
        assert!(is_hex_capture(Path::new("capture.TXT")));
        assert!(!is_hex_capture(Path::new("capture.bin")));
        assert!(!is_hex_capture(Path::new("capture")));
    }
}
