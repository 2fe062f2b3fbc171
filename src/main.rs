use anyhow::{Context, Result};
use clap::{Arg, Command};
use std::fs;
use std::path::{Path, PathBuf};
use vtt_parser::{
    DecodeOutcome, MemoryBaselines, MemoryRegistry, PositionRecord, TransportContext, VttDecoder,
};

fn build_command() -> Command {
    Command::new("VTT Parser")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Replay captured tracker message logs through the decoder. Exports to CSV by default (optionally JSON).")
        .arg(
            Arg::new("files")
                .help("Message log files to replay, one framed message per line. Lines starting with '$' are taken as ASCII full records; anything else is hex-encoded frame bytes. Blank lines and '#' comments are skipped.")
                .required(false)
                .num_args(1..)
                .index(1),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug output and detailed decoding information")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .help("Directory for output files (default: same as input file)")
                .value_name("DIR"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Export decoded positions to JSON files (requires the json feature)")
                .action(clap::ArgAction::SetTrue),
        )
}

fn output_path(input: &Path, output_dir: Option<&str>, extension: &str) -> PathBuf {
    let mut path = match output_dir {
        Some(dir) => Path::new(dir).join(input.file_name().unwrap_or_default()),
        None => input.to_path_buf(),
    };
    path.set_extension(extension);
    path
}

/// Interpret one log line as message bytes.
///
/// Full records were captured as ASCII and start with `$`; delta frames
/// were captured as hex.
fn message_bytes(line: &str) -> Result<Vec<u8>> {
    if line.starts_with('$') {
        Ok(line.as_bytes().to_vec())
    } else {
        hex::decode(line).with_context(|| format!("invalid hex frame: {}", line))
    }
}

fn replay_file(path: &Path, debug: bool) -> Result<Vec<PositionRecord>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    // Each file is one connection: fresh session state, fresh decoder.
    let registry = MemoryRegistry::with_auto_register();
    let baselines = MemoryBaselines::new();
    let ctx = TransportContext::default();
    let mut decoder = VttDecoder::new();

    let mut records = Vec::new();

    for (number, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let message = match message_bytes(line) {
            Ok(message) => message,
            Err(e) => {
                eprintln!("{}:{}: {}", path.display(), number + 1, e);
                continue;
            }
        };

        match decoder.decode(&ctx, &message, &registry, &baselines, debug) {
            Ok(DecodeOutcome { position, reply }) => {
                if let Some(reply) = reply {
                    println!("reply: {}", reply.trim_end());
                }
                if let Some(position) = position {
                    println!(
                        "{} {} {:.6},{:.6} speed {:.1} course {:.1}",
                        position.device_id,
                        position
                            .fix_time
                            .map(|t| t.to_rfc3339())
                            .unwrap_or_default(),
                        position.latitude,
                        position.longitude,
                        position.speed,
                        position.course
                    );
                    baselines.store(&position);
                    records.push(position);
                }
            }
            Err(e) => {
                eprintln!("{}:{}: {}", path.display(), number + 1, e);
            }
        }
    }

    Ok(records)
}

fn main() -> Result<()> {
    let matches = build_command().get_matches();

    let debug = matches.get_flag("debug");
    let export_json = matches.get_flag("json");
    let output_dir = matches.get_one::<String>("output-dir").cloned();

    let files: Vec<&String> = match matches.get_many::<String>("files") {
        Some(files) => files.collect(),
        None => {
            build_command().print_help()?;
            println!();
            return Ok(());
        }
    };

    #[cfg(not(feature = "json"))]
    if export_json {
        anyhow::bail!("JSON export requires building with the json feature");
    }

    for file in files {
        let path = Path::new(file);
        let records = replay_file(path, debug)?;
        println!("{}: {} positions decoded", path.display(), records.len());

        if records.is_empty() {
            continue;
        }

        #[cfg(feature = "csv")]
        {
            let csv_path = output_path(path, output_dir.as_deref(), "csv");
            vtt_parser::export_to_csv(&records, &csv_path)?;
            println!("Exported to: {}", csv_path.display());
        }

        #[cfg(feature = "json")]
        if export_json {
            let json_path = output_path(path, output_dir.as_deref(), "json");
            vtt_parser::export_to_json(&records, &json_path)?;
            println!("Exported to: {}", json_path.display());
        }
    }

    Ok(())
}
