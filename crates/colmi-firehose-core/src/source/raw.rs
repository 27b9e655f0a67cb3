use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

use crate::protocols::firehose::layout::PACKET_LEN;

use super::{PacketEvent, PacketSource, SourceError};

/// Binary capture of back-to-back 16-byte packets.
///
/// A short trailing chunk is still emitted so that the decoder can report it.
pub struct RawCaptureSource<R = BufReader<File>> {
    reader: R,
    next_index: u64,
    done: bool,
}

impl RawCaptureSource {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: Read> RawCaptureSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            next_index: 0,
            done: false,
        }
    }

    fn fill_chunk(&mut self, buf: &mut [u8; PACKET_LEN]) -> Result<usize, SourceError> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            }
        }
        Ok(filled)
    }
}

impl<R: Read> PacketSource for RawCaptureSource<R> {
    fn next_packet(&mut self) -> Result<Option<PacketEvent>, SourceError> {
        if self.done {
            return Ok(None);
        }
        let mut buf = [0u8; PACKET_LEN];
        let filled = self.fill_chunk(&mut buf)?;
        if filled < PACKET_LEN {
            self.done = true;
        }
        if filled == 0 {
            return Ok(None);
        }
        let event = PacketEvent {
            index: self.next_index,
            data: buf[..filled].to_vec(),
        };
        self.next_index += 1;
        Ok(Some(event))
    }
}

#[cfg(test)]
mod tests {
    use super::RawCaptureSource;
    use crate::source::PacketSource;
    use std::io::Cursor;

    #[test]
    fn frames_full_packets() {
        let mut bytes = vec![0u8; 32];
        bytes[1] = 0x01;
        bytes[17] = 0x02;
        let mut source = RawCaptureSource::new(Cursor::new(bytes));

        let first = source.next_packet().unwrap().unwrap();
        assert_eq!(first.index, 0);
        assert_eq!(first.data.len(), 16);
        assert_eq!(first.data[1], 0x01);

        let second = source.next_packet().unwrap().unwrap();
        assert_eq!(second.index, 1);
        assert_eq!(second.data[1], 0x02);

        assert!(source.next_packet().unwrap().is_none());
    }

    #[test]
    fn emits_trailing_partial_packet() {
        let bytes = vec![0xa1u8; 20];
        let mut source = RawCaptureSource::new(Cursor::new(bytes));
        assert_eq!(source.next_packet().unwrap().unwrap().data.len(), 16);
        let tail = source.next_packet().unwrap().unwrap();
        assert_eq!(tail.index, 1);
        assert_eq!(tail.data.len(), 4);
        assert!(source.next_packet().unwrap().is_none());
    }

    #[test]
    fn empty_input_has_no_packets() {
        let mut source = RawCaptureSource::new(Cursor::new(Vec::<u8>::new()));
        assert!(source.next_packet().unwrap().is_none());
    }
}
