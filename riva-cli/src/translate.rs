//! Translate subcommand - prepare an audio file and send it to the
//! translation endpoint.

use crate::config::AppConfig;
use crate::transcribe::{Task, send_audio};
use eyre::Result;
use std::path::PathBuf;

/// CLI arguments for translation.
#[derive(clap::Args, Debug)]
pub struct Args {
    /// Path to the audio file
    pub path: PathBuf,

    /// Target language code
    #[arg(short, long, default_value = "en")]
    pub language: String,

    /// Keep the converted temporary file instead of deleting it
    #[arg(long)]
    pub keep: bool,

    /// Path to a deployment config JSON file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Resolved configuration for translation.
#[derive(Debug)]
pub struct Config {
    pub path: PathBuf,
    pub language: String,
    pub keep: bool,
    pub app: AppConfig,
}

impl TryFrom<Args> for Config {
    type Error = eyre::Error;

    fn try_from(args: Args) -> Result<Self> {
        Ok(Self {
            app: AppConfig::load(args.config.as_deref()),
            path: args.path,
            language: args.language,
            keep: args.keep,
        })
    }
}

pub fn execute(config: Config) -> Result<()> {
    let text = send_audio(
        &config.path,
        &config.language,
        config.keep,
        &config.app,
        Task::Translate,
    )?;

    println!("{text}");

    Ok(())
}
