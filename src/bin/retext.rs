//! Run one text mutation command
//!
//! Reads a JSON command from a file (or stdin), runs it and prints the JSON result.
//!
//! Usage:
//!   retext command.json
//!   echo '{"command": "overlay_text", ...}' | retext
//!   retext --pretty command.json
//!
//! Set `RUST_LOG=debug` for progress logging on stderr.

use pdf_retext::document::MemoryDocument;
use pdf_retext::editor::{Command, OperationResult, TextMutator};
use pdf_retext::EditorConfig;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

struct CliConfig {
    command_file: Option<PathBuf>,
    pretty: bool,
}

impl CliConfig {
    fn from_args() -> Self {
        let mut command_file = None;
        let mut pretty = false;

        for arg in std::env::args().skip(1) {
            match arg.as_str() {
                "--pretty" | "-p" => {
                    pretty = true;
                },
                "-" => {
                    command_file = None;
                },
                _ => {
                    command_file = Some(PathBuf::from(arg));
                },
            }
        }

        Self {
            command_file,
            pretty,
        }
    }
}

fn read_command(config: &CliConfig) -> pdf_retext::Result<Command> {
    let raw = match &config.command_file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        },
    };
    serde_json::from_str(&raw).map_err(|e| pdf_retext::Error::InvalidCommand(e.to_string()))
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = CliConfig::from_args();

    let result = match read_command(&cli) {
        Ok(command) => {
            log::debug!("Running {}", command.name());
            TextMutator::<MemoryDocument>::new(EditorConfig::default()).execute(command)
        },
        Err(e) => OperationResult::error(e.to_string()),
    };

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&result)
    } else {
        serde_json::to_string(&result)
    };
    match rendered {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: could not serialize result: {}", e);
            return ExitCode::FAILURE;
        },
    }

    if result.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
