//! Convert subcommand - normalize audio for the transcription service.

use eyre::{Context, Result};
use riva_audio::Normalizer;
use std::path::PathBuf;

/// CLI arguments for conversion.
#[derive(clap::Args, Debug)]
pub struct Args {
    /// Path to the input audio file
    pub path: PathBuf,

    /// Output WAV path (default: unique name in the temp directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Resolved configuration for conversion.
#[derive(Debug)]
pub struct Config {
    pub path: PathBuf,
    pub output: Option<PathBuf>,
}

impl TryFrom<Args> for Config {
    type Error = eyre::Error;

    fn try_from(args: Args) -> Result<Self> {
        Ok(Self {
            path: args.path,
            output: args.output,
        })
    }
}

pub fn execute(config: Config) -> Result<()> {
    let normalizer = Normalizer::new();

    let output = normalizer
        .convert_to_canonical(&config.path, config.output.as_deref())
        .wrap_err_with(|| format!("failed to convert: {:?}", config.path.display()))?;

    // Print the output path so scripts can pick it up
    println!("{}", output.display());

    Ok(())
}
