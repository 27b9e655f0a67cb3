use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use colmi_firehose_core::protocols::command::{start_firehose_packet, stop_firehose_packet};
use colmi_firehose_core::DecodeOptions;
use glob::glob;

#[derive(Parser, Debug)]
#[command(name = "firehose")]
#[command(version)]
#[command(
    about = "Decoder for Colmi ring firehose telemetry (SpO2 / PPG / accelerometer).",
    long_about = None,
    after_help = "Examples:\n  firehose capture decode capture.hex -o report.json\n  firehose capture decode capture.bin --stdout --pretty\n  firehose command start"
)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Operations on recorded firehose captures.
    Capture {
        #[command(subcommand)]
        command: CaptureCommands,
    },
    /// Print a command packet to send to the ring.
    Command {
        #[command(subcommand)]
        command: CommandPackets,
    },
}

#[derive(Subcommand, Debug)]
enum CaptureCommands {
    /// Decode a capture file and generate a versioned JSON report.
    #[command(aliases = ["analyze", "analyse"])]
    #[command(
        after_help = "Examples:\n  firehose capture decode capture.hex -o report.json\n  firehose capture analyze capture.bin --stdout\n  firehose capture decode 'captures/*.hex' --report report.json"
    )]
    Decode {
        /// Capture file: .hex/.txt holds one packet per line, anything else is raw bytes
        input: PathBuf,

        /// Output report path (JSON)
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        report: Option<PathBuf>,

        /// Write JSON report to stdout
        #[arg(long, conflicts_with = "report")]
        stdout: bool,

        /// Pretty-print JSON output (compact by default)
        #[arg(long)]
        pretty: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,

        /// Exit with a non-zero code if any packet raised an issue
        #[arg(long)]
        strict: bool,

        /// List decode issues after analysis
        #[arg(long)]
        list_issues: bool,

        /// Check each packet trailer against its checksum
        #[arg(long)]
        verify_checksum: bool,
    },
}

#[derive(Subcommand, Debug)]
enum CommandPackets {
    /// Packet that starts the firehose stream
    Start,
    /// Packet that stops the firehose stream
    Stop,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let quiet = matches!(
        cli.command,
        Commands::Capture {
            command: CaptureCommands::Decode { quiet: true, .. }
        }
    );
    init_logging(cli.verbose, quiet);

    let result = match cli.command {
        Commands::Capture {
            command:
                CaptureCommands::Decode {
                    input,
                    report,
                    stdout,
                    pretty,
                    quiet,
                    strict,
                    list_issues,
                    verify_checksum,
                },
        } => cmd_capture_decode(
            &input,
            report.filter(|_| !stdout),
            DecodeFlags {
                pretty,
                quiet,
                strict,
                list_issues,
            },
            DecodeOptions { verify_checksum },
        ),
        Commands::Command { command } => {
            let packet = match command {
                CommandPackets::Start => start_firehose_packet(),
                CommandPackets::Stop => stop_firehose_packet(),
            };
            println!("{}", hex::encode(packet));
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let default_filter = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: &str) -> Self {
        Self {
            message: message.into(),
            hint: Some(hint.to_string()),
        }
    }
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        Self {
            message: format!("{:#}", err),
            hint: None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct DecodeFlags {
    pretty: bool,
    quiet: bool,
    strict: bool,
    list_issues: bool,
}

/// Decode `input` and write the report to `report`, or to stdout when `None`.
fn cmd_capture_decode(
    input: &Path,
    report: Option<PathBuf>,
    flags: DecodeFlags,
    options: DecodeOptions,
) -> Result<(), CliError> {
    let input = resolve_input_path(input)?;
    if !input.is_file() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            "pass an existing capture file (.hex/.txt text or raw bytes)",
        ));
    }
    if let Some(report) = &report {
        ensure_distinct_output(report, &input)?;
    }

    log::debug!("decoding {}", input.display());
    let rep = colmi_firehose_core::analyze_capture_file(&input, &options)
        .context("capture decoding failed")?;
    let json = if flags.pretty {
        serde_json::to_string_pretty(&rep)
    } else {
        serde_json::to_string(&rep)
    };
    let json = json.context("JSON serialization failed")?;

    match &report {
        None => print!("{}", json),
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create output directory: {}", parent.display())
                })?;
            }
            fs::write(path, json)
                .with_context(|| format!("Failed to write report: {}", path.display()))?;
            if !flags.quiet {
                eprintln!(
                    "OK: {} readings from {} packets -> {}",
                    rep.readings.len(),
                    rep.summary.packets_total,
                    path.display()
                );
            }
        }
    }

    if flags.list_issues && !flags.quiet {
        eprintln!("Decode issues:");
        for issue in &rep.issues {
            eprintln!("  {} {} ({})", issue.severity, issue.id, issue.count);
        }
    }
    if flags.strict && !rep.issues.is_empty() {
        return Err(CliError::new(
            "decode issues detected",
            "use --list-issues to inspect",
        ));
    }
    Ok(())
}

/// Refuse to overwrite the capture with its own report.
///
/// A report whose directory does not exist yet cannot be the input.
fn ensure_distinct_output(report: &Path, input: &Path) -> Result<(), CliError> {
    let dir = match report.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let Some(file_name) = report.file_name() else {
        return Err(CliError::new(
            format!("invalid report path: {}", report.display()),
            "the report path must name a file",
        ));
    };
    if !dir.is_dir() {
        return Ok(());
    }
    let target = fs::canonicalize(dir)
        .with_context(|| format!("Failed to resolve output path: {}", report.display()))?
        .join(file_name);
    let input = fs::canonicalize(input)
        .with_context(|| format!("Failed to resolve input path: {}", input.display()))?;
    if target == input {
        return Err(CliError::new(
            format!("report path must differ from input: {}", report.display()),
            "choose a different output path",
        ));
    }
    Ok(())
}

/// Expand a glob pattern that must match exactly one file.
fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !pattern.contains(['*', '?', '[']) {
        return Ok(input.to_path_buf());
    }

    let invalid = |detail: String| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            &format!("pattern error: {}", detail),
        )
    };
    let mut matches = Vec::new();
    for entry in glob(&pattern).map_err(|err| invalid(err.msg.to_string()))? {
        let path = entry.map_err(|err| invalid(err.to_string()))?;
        if path.is_file() {
            matches.push(path);
        }
    }

    match matches.len() {
        0 => Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            "check the path or quote the pattern",
        )),
        1 => Ok(matches.remove(0)),
        n => Err(CliError::new(
            format!("multiple files match pattern '{}' ({} matches)", pattern, n),
            "pass a single capture file, or run once per file",
        )),
    }
}
