//! Inspect subcommand - show audio properties of a file.

use eyre::Result;
use riva_audio::{Error, Normalizer};
use std::path::PathBuf;

/// CLI arguments for inspection.
#[derive(clap::Args, Debug)]
pub struct Args {
    /// Path to the audio file
    pub path: PathBuf,
}

/// Resolved configuration for inspection.
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

    let info = normalizer
        .inspect(&config.path)?
        .ok_or_else(|| Error::Unreadable(config.path.clone()))?;

    println!("format:      {}", info.format);
    println!("sample rate: {}Hz", info.sample_rate);
    println!("channels:    {}", info.channels);
    println!("frames:      {}", info.frames);
    println!("duration:    {:.2}s", info.duration_secs());
    if let Some(bits) = info.bits_per_sample {
        println!("bit depth:   {bits}");
    }

    Ok(())
}
