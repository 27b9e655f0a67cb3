use std::fs;
use std::path::Path;

use colmi_firehose_core::{DecodeOptions, Report, analyze_capture_file};

fn load_expected_report(dir: &str) -> Report {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..");
    let expected_path = root.join(dir).join("expected_report.json");

    let expected_json = fs::read_to_string(&expected_path).expect("read expected_report.json");
    serde_json::from_str(&expected_json).expect("parse expected report")
}

fn run_golden(dir: &str, input_name: &str, options: DecodeOptions) {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..");
    let input = root.join(dir).join(input_name);
    let expected = load_expected_report(dir);

    let mut actual = analyze_capture_file(&input, &options).expect("analyze capture");
    actual.input.path = expected.input.path.clone();

    let actual_value = serde_json::to_value(actual).expect("serialize actual");
    let expected_value = serde_json::to_value(expected).expect("serialize expected");

    assert_eq!(actual_value, expected_value, "golden mismatch in {dir}");
}

#[test]
fn golden_mixed_hex() {
    run_golden("tests/golden/mixed", "input.hex", DecodeOptions::default());
}

#[test]
fn golden_raw_checksum() {
    run_golden(
        "tests/golden/raw_checksum",
        "input.bin",
        DecodeOptions {
            verify_checksum: true,
        },
    );
}

#[test]
fn golden_mixed_counts_add_up() {
    let report = load_expected_report("tests/golden/mixed");
    let summary = &report.summary;
    assert_eq!(
        summary.packets_total,
        summary.spo2 + summary.ppg + summary.accelerometer + summary.rejected
    );
    assert_eq!(report.readings.len() as u64, summary.packets_total - summary.rejected);
}
