use std::collections::BTreeMap;

use crate::Issue;
use crate::protocols::firehose::FirehoseError;

pub const ISSUE_UNRECOGNIZED_KIND: &str = "FH-UNRECOGNIZED-KIND";
pub const ISSUE_OUT_OF_BOUNDS: &str = "FH-OUT-OF-BOUNDS";
pub const ISSUE_CHECKSUM_MISMATCH: &str = "FH-CHECKSUM-MISMATCH";

const SEVERITY_ERROR: &str = "error";
const SEVERITY_WARNING: &str = "warning";
const MAX_EXAMPLES: usize = 3;

struct IssueStats {
    severity: &'static str,
    message: &'static str,
    count: u64,
    examples: Vec<String>,
}

#[derive(Default)]
pub struct IssueLog {
    entries: BTreeMap<&'static str, IssueStats>,
}

impl IssueLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_decode_error(&mut self, index: u64, err: &FirehoseError) {
        match *err {
            FirehoseError::UnrecognizedKind { tag } => self.record(
                ISSUE_UNRECOGNIZED_KIND,
                SEVERITY_ERROR,
                "Unrecognized firehose kind tag",
                format!("packet {index}: tag {tag}"),
            ),
            FirehoseError::OutOfBounds { needed, actual } => self.record(
                ISSUE_OUT_OF_BOUNDS,
                SEVERITY_ERROR,
                "Packet too short for its kind",
                format!("packet {index}: need {needed} bytes, got {actual}"),
            ),
        }
    }

    pub fn record_checksum_mismatch(&mut self, index: u64, expected: u8, actual: u8) {
        self.record(
            ISSUE_CHECKSUM_MISMATCH,
            SEVERITY_WARNING,
            "Packet trailer does not match checksum",
            format!("packet {index}: expected 0x{expected:02x}, got 0x{actual:02x}"),
        );
    }

    fn record(
        &mut self,
        id: &'static str,
        severity: &'static str,
        message: &'static str,
        example: String,
    ) {
        let entry = self.entries.entry(id).or_insert_with(|| IssueStats {
            severity,
            message,
            count: 0,
            examples: Vec::new(),
        });
        entry.count += 1;
        if entry.examples.len() < MAX_EXAMPLES {
            entry.examples.push(example);
        }
    }

    /// Issues ordered by severity (errors first), then by id.
    pub fn into_issues(self) -> Vec<Issue> {
        let mut issues: Vec<Issue> = self
            .entries
            .into_iter()
            .map(|(id, stats)| Issue {
                id: id.to_string(),
                severity: stats.severity.to_string(),
                message: stats.message.to_string(),
                count: stats.count,
                examples: stats.examples,
            })
            .collect();
        issues.sort_by(|a, b| {
            severity_rank(&a.severity)
                .cmp(&severity_rank(&b.severity))
                .then_with(|| a.id.cmp(&b.id))
        });
        issues
    }
}

fn severity_rank(severity: &str) -> u8 {
    match severity {
        SEVERITY_ERROR => 0,
        SEVERITY_WARNING => 1,
        _ => 2,
    }
}
