use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use colmi_firehose_core::{DecodeOptions, analyze_capture_file};

const INPUT_NAMES: [&str; 2] = ["input.hex", "input.bin"];

fn main() -> ExitCode {
    if let Err(err) = run() {
        eprintln!("error: {}", err);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run() -> Result<(), String> {
    let root = PathBuf::from("tests").join("golden");
    let entries =
        fs::read_dir(&root).map_err(|err| format!("failed to read {}: {}", root.display(), err))?;

    for entry in entries {
        let entry = entry.map_err(|err| format!("failed to read entry: {}", err))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let Some(input) = INPUT_NAMES
            .iter()
            .map(|name| path.join(name))
            .find(|candidate| candidate.exists())
        else {
            continue;
        };
        let output = path.join("expected_report.json");
        regenerate_one(&input, &output, &options_for(&path))?;
    }

    Ok(())
}

// Cases named `*_checksum` run with trailer verification enabled.
fn options_for(case_dir: &Path) -> DecodeOptions {
    let verify_checksum = case_dir
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with("_checksum"));
    DecodeOptions { verify_checksum }
}

fn regenerate_one(input: &Path, output: &Path, options: &DecodeOptions) -> Result<(), String> {
    let report = analyze_capture_file(input, options)
        .map_err(|err| format!("analysis failed for {}: {}", input.display(), err))?;
    let json = serde_json::to_string_pretty(&report)
        .map_err(|err| format!("JSON serialization failed: {}", err))?;
    fs::write(output, json)
        .map_err(|err| format!("failed to write {}: {}", output.display(), err))?;
    Ok(())
}
