//! Decoder for the Colmi ring "firehose" telemetry stream.
//!
//! Once started, the ring streams fixed 16-byte notifications carrying SpO2,
//! PPG or accelerometer samples. This crate decodes those packets into typed
//! readings, builds the command packets that start and stop the stream, and
//! analyses offline captures into a deterministic JSON report.
//!
//! Layers:
//! - `protocols`: pure byte-level decoders and builders (layout/reader/parser)
//! - `source`: capture files framed into packets (the only I/O)
//! - analysis: drives the decoder over a source and aggregates the report
//!
//! Invariants:
//! - `decode` is stateless and never reads past the buffer it is given.
//! - A rejected packet never stops the analysis of the packets after it.
//! - Report ordering follows the capture; issues are sorted by severity, id.
//!
//! # Examples
//! ```no_run
//! use std::path::Path;
//!
//! use colmi_firehose_core::{DecodeOptions, analyze_capture_file};
//!
//! let report = analyze_capture_file(Path::new("capture.hex"), &DecodeOptions::default())?;
//! println!("decoded {} readings", report.readings.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};

mod analysis;
pub mod protocols;
mod source;

pub use analysis::{
    AnalysisError, DecodeOptions, ISSUE_CHECKSUM_MISMATCH, ISSUE_OUT_OF_BOUNDS,
    ISSUE_UNRECOGNIZED_KIND, analyze_capture_file, analyze_source,
};
pub use protocols::firehose::{
    AccelerometerReading, FirehoseError, Kind, PpgReading, Reading, SpO2Reading, decode,
};
pub use source::{
    HexCaptureSource, PacketEvent, PacketSource, RawCaptureSource, SourceError, open_capture,
};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;

/// Decoded capture report.
///
/// # Examples
/// ```
/// use colmi_firehose_core::make_stub_report;
///
/// let report = make_stub_report("capture.hex", 64);
/// assert_eq!(report.report_version, colmi_firehose_core::REPORT_VERSION);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    /// Tool identification metadata.
    pub tool: ToolInfo,
    /// Input capture metadata.
    pub input: InputInfo,
    /// Per-kind packet counts.
    pub summary: DecodeSummary,
    /// Decoded readings in capture order.
    pub readings: Vec<ReadingRecord>,
    /// Aggregated decode issues, errors first.
    pub issues: Vec<Issue>,
}

/// Tool metadata embedded in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

/// Input capture metadata embedded in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided to the analyzer.
    pub path: String,
    /// Input size in bytes.
    pub bytes: u64,
}

/// Packet counts for a capture.
///
/// `packets_total` equals the sum of the per-kind counts plus `rejected`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeSummary {
    pub packets_total: u64,
    pub spo2: u64,
    pub ppg: u64,
    pub accelerometer: u64,
    /// Packets dropped because they could not be decoded.
    pub rejected: u64,
}

/// A decoded reading and its position in the capture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingRecord {
    /// Zero-based packet index within the capture.
    pub index: u64,
    pub reading: Reading,
}

/// Aggregated decode issue.
///
/// # Examples
/// ```
/// use colmi_firehose_core::Issue;
///
/// let issue = Issue {
///     id: "FH-UNRECOGNIZED-KIND".to_string(),
///     severity: "error".to_string(),
///     message: "Unrecognized firehose kind tag".to_string(),
///     count: 1,
///     examples: vec!["packet 4: tag 99".to_string()],
/// };
/// assert_eq!(issue.count, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Stable issue identifier (e.g., `FH-OUT-OF-BOUNDS`).
    pub id: String,
    /// Severity label (`error` or `warning`).
    pub severity: String,
    /// Human-readable description.
    pub message: String,
    /// Number of packets affected.
    pub count: u64,
    /// At most three examples, formatted as `packet <index>: <detail>`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
}

/// Build a report with base fields filled and empty aggregates.
pub fn make_stub_report(input_path: &str, input_bytes: u64) -> Report {
    Report {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "colmi-firehose".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
        },
        summary: DecodeSummary::default(),
        readings: vec![],
        issues: vec![],
    }
}
