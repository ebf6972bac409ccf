use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};

/// Huffman file compressor with a self-describing container format.
#[derive(Debug, Parser)]
#[command(name = "huffpress", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compress a file into a huffpress container.
    Encode {
        /// File to compress.
        input: PathBuf,
        /// Where to write the container.
        output: PathBuf,
    },
    /// Restore the original bytes from a huffpress container.
    Decode {
        /// Container to read.
        input: PathBuf,
        /// Where to write the decoded bytes.
        output: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Encode { input, output } => huffpress::encode_file(&input, &output)
            .with_context(|| format!("encoding {}", input.display())),
        Command::Decode { input, output } => huffpress::decode_file(&input, &output)
            .with_context(|| format!("decoding {}", input.display())),
    }
}
