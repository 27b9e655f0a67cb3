use std::path::Path;

use thiserror::Error;

use crate::protocols::common::checksum::checksum;
use crate::protocols::firehose::{Kind, decode, layout};
use crate::source::{PacketEvent, PacketSource, SourceError, open_capture};
use crate::{DecodeSummary, ReadingRecord, Report, make_stub_report};

mod issues;

use issues::IssueLog;

pub use issues::{ISSUE_CHECKSUM_MISMATCH, ISSUE_OUT_OF_BOUNDS, ISSUE_UNRECOGNIZED_KIND};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
}

/// Switches for capture analysis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Compare each full packet's trailer against its checksum. Mismatches
    /// are reported as warnings; the packet is decoded regardless.
    pub verify_checksum: bool,
}

pub fn analyze_capture_file(path: &Path, options: &DecodeOptions) -> Result<Report, AnalysisError> {
    let source = open_capture(path)?;
    analyze_source(path, source, options)
}

pub fn analyze_source<S: PacketSource>(
    path: &Path,
    mut source: S,
    options: &DecodeOptions,
) -> Result<Report, AnalysisError> {
    let mut summary = DecodeSummary::default();
    let mut readings = Vec::new();
    let mut issues = IssueLog::new();

    while let Some(PacketEvent { index, data }) = source.next_packet()? {
        summary.packets_total += 1;
        if options.verify_checksum && data.len() == layout::PACKET_LEN {
            let expected = checksum(&data[..layout::TRAILER_OFFSET]);
            let actual = data[layout::TRAILER_OFFSET];
            if expected != actual {
                log::debug!(
                    "packet {index}: checksum mismatch (expected {expected:#04x}, got {actual:#04x})"
                );
                issues.record_checksum_mismatch(index, expected, actual);
            }
        }
        match decode(&data) {
            Ok(reading) => {
                log::trace!("packet {index}: {} reading", reading.kind().as_str());
                match reading.kind() {
                    Kind::SpO2 => summary.spo2 += 1,
                    Kind::Ppg => summary.ppg += 1,
                    Kind::Accelerometer => summary.accelerometer += 1,
                }
                readings.push(ReadingRecord { index, reading });
            }
            Err(err) => {
                log::debug!("dropping packet {index}: {err}");
                summary.rejected += 1;
                issues.record_decode_error(index, &err);
            }
        }
    }

    log::info!(
        "decoded {} of {} packets ({} rejected)",
        readings.len(),
        summary.packets_total,
        summary.rejected
    );

    let mut report = make_stub_report(&path.display().to_string(), path.metadata()?.len());
    report.summary = summary;
    report.readings = readings;
    report.issues = issues.into_issues();
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::{DecodeOptions, ISSUE_CHECKSUM_MISMATCH, ISSUE_UNRECOGNIZED_KIND, analyze_source};
    use crate::protocols::firehose::{Reading, SpO2Reading};
    use crate::source::{PacketEvent, PacketSource, SourceError};
    use std::collections::VecDeque;
    use std::path::PathBuf;

    struct VecSource(VecDeque<Vec<u8>>, u64);

    impl VecSource {
        fn new(packets: Vec<Vec<u8>>) -> Self {
            Self(packets.into(), 0)
        }
    }

    impl PacketSource for VecSource {
        fn next_packet(&mut self) -> Result<Option<PacketEvent>, SourceError> {
            let Some(data) = self.0.pop_front() else {
                return Ok(None);
            };
            let index = self.1;
            self.1 += 1;
            Ok(Some(PacketEvent { index, data }))
        }
    }

    fn spo2_packet() -> Vec<u8> {
        vec![
            0xa1, 0x01, 0x1d, 0x09, 0x00, 0x07, 0x00, 0x08, 0x00, 0xfa, 0, 0, 0, 0, 0, 0xd3,
        ]
    }

    // `analyze_source` reads the input size from disk.
    fn manifest_path() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml")
    }

    #[test]
    fn keeps_decoding_after_bad_packets() {
        let mut unknown = spo2_packet();
        unknown[1] = 99;
        let source = VecSource::new(vec![unknown, vec![0xa1, 0x02, 0x00], spo2_packet()]);

        let report =
            analyze_source(&manifest_path(), source, &DecodeOptions::default()).unwrap();

        assert_eq!(report.summary.packets_total, 3);
        assert_eq!(report.summary.spo2, 1);
        assert_eq!(report.summary.rejected, 2);
        assert_eq!(report.readings.len(), 1);
        assert_eq!(report.readings[0].index, 2);
        assert_eq!(
            report.readings[0].reading,
            Reading::SpO2(SpO2Reading {
                current: 7433,
                max: 7,
                min: 8,
                diff: 250,
            })
        );
        assert_eq!(report.issues.len(), 2);
        assert!(report.issues.iter().any(|i| i.id == ISSUE_UNRECOGNIZED_KIND));
    }

    #[test]
    fn checksum_verification_is_opt_in() {
        let source = VecSource::new(vec![spo2_packet()]);
        let report =
            analyze_source(&manifest_path(), source, &DecodeOptions::default()).unwrap();
        assert!(report.issues.is_empty());

        let source = VecSource::new(vec![spo2_packet()]);
        let options = DecodeOptions {
            verify_checksum: true,
        };
        let report = analyze_source(&manifest_path(), source, &options).unwrap();
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].id, ISSUE_CHECKSUM_MISMATCH);
        assert_eq!(report.issues[0].examples, vec!["packet 0: expected 0xd1, got 0xd3"]);
        assert_eq!(report.summary.spo2, 1);
    }

    #[test]
    fn matching_trailer_raises_no_checksum_issue() {
        let mut packet = spo2_packet();
        packet[15] = 0xd1;
        let short = vec![0xa1, 0x01, 0x1d, 0x09, 0x00, 0x07, 0x00, 0x08, 0x00, 0xfa];
        let source = VecSource::new(vec![packet, short]);
        let options = DecodeOptions {
            verify_checksum: true,
        };
        let report = analyze_source(&manifest_path(), source, &options).unwrap();
        assert!(report.issues.is_empty());
        assert_eq!(report.summary.spo2, 2);
    }
}
