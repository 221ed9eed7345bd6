//! Validate subcommand - check a file against the service requirements.

use color_eyre::Section;
use eyre::{Result, eyre};
use riva_audio::Normalizer;
use std::path::PathBuf;

/// CLI arguments for validation.
#[derive(clap::Args, Debug)]
pub struct Args {
    /// Path to the audio file
    pub path: PathBuf,
}

/// Resolved configuration for validation.
#[derive(Debug)]
pub struct Config {
    pub path: PathBuf,
}

impl TryFrom<Args> for Config {
    type Error = eyre::Error;

    fn try_from(args: Args) -> Result<Self> {
        Ok(Self { path: args.path })
    }
}

pub fn execute(config: Config) -> Result<()> {
    let normalizer = Normalizer::new();

    let (compatible, message) = normalizer.validate_for_target(&config.path);

    if compatible {
        println!("{message}");
        Ok(())
    } else {
        Err(eyre!(message))
            .with_suggestion(|| format!("riva convert {:?}", config.path.display()))
    }
}
