use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::{PacketEvent, PacketSource, SourceError};

/// Text capture with one hex-encoded packet per line.
///
/// Bytes may be written back to back (`a1011d09`) or separated by spaces,
/// commas or colons, with optional `0x` prefixes. Blank lines and lines
/// starting with `#` are skipped.
pub struct HexCaptureSource<R = BufReader<File>> {
    lines: std::io::Lines<R>,
    line_no: usize,
    next_index: u64,
}

impl HexCaptureSource {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> HexCaptureSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
            next_index: 0,
        }
    }
}

impl<R: BufRead> PacketSource for HexCaptureSource<R> {
    fn next_packet(&mut self) -> Result<Option<PacketEvent>, SourceError> {
        for line in self.lines.by_ref() {
            let line = line?;
            self.line_no += 1;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let data = parse_hex_line(trimmed).map_err(|message| SourceError::Hex {
                line: self.line_no,
                message,
            })?;
            let event = PacketEvent {
                index: self.next_index,
                data,
            };
            self.next_index += 1;
            return Ok(Some(event));
        }
        Ok(None)
    }
}

fn parse_hex_line(line: &str) -> Result<Vec<u8>, String> {
    let mut bytes = Vec::new();
    for token in line.split(|c: char| c.is_whitespace() || c == ',' || c == ':') {
        if token.is_empty() {
            continue;
        }
        let digits = token
            .strip_prefix("0x")
            .or_else(|| token.strip_prefix("0X"))
            .unwrap_or(token);
        if digits.is_empty() {
            return Err(format!("missing hex digits in '{token}'"));
        }
        let decoded = hex::decode(digits).map_err(|err| format!("'{token}': {err}"))?;
        bytes.extend_from_slice(&decoded);
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::{HexCaptureSource, parse_hex_line};
    use crate::source::{PacketSource, SourceError};
    use std::io::Cursor;

    #[test]
    fn parse_spaced_and_packed_hex() {
        assert_eq!(parse_hex_line("a1 01 1d").unwrap(), vec![0xa1, 0x01, 0x1d]);
        assert_eq!(parse_hex_line("a1011d").unwrap(), vec![0xa1, 0x01, 0x1d]);
        assert_eq!(
            parse_hex_line("0xA1,0x01:1D").unwrap(),
            vec![0xa1, 0x01, 0x1d]
        );
    }

    #[test]
    fn parse_rejects_odd_digits() {
        let err = parse_hex_line("a1 0").unwrap_err();
        assert!(err.starts_with("'0'"));
    }

    #[test]
    fn parse_rejects_non_hex() {
        assert!(parse_hex_line("zz").is_err());
        assert!(parse_hex_line("é1").is_err());
        assert!(parse_hex_line("0x").unwrap_err().contains("missing hex digits"));
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let text = "# capture\n\na1 01\n  \na1 02\n";
        let mut source = HexCaptureSource::new(Cursor::new(text));
        let first = source.next_packet().unwrap().unwrap();
        assert_eq!(first.index, 0);
        assert_eq!(first.data, vec![0xa1, 0x01]);
        let second = source.next_packet().unwrap().unwrap();
        assert_eq!(second.index, 1);
        assert_eq!(second.data, vec![0xa1, 0x02]);
        assert!(source.next_packet().unwrap().is_none());
    }

    #[test]
    fn reports_line_of_bad_hex() {
        let text = "a1 01\n# note\nxx\n";
        let mut source = HexCaptureSource::new(Cursor::new(text));
        source.next_packet().unwrap();
        match source.next_packet() {
            Err(SourceError::Hex { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected hex error, got {other:?}"),
        }
    }
}
