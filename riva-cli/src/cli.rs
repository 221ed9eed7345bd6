//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use eyre::Result;

#[derive(Debug, Parser)]
#[command(name = "riva")]
#[command(about = "Audio preparation and transcription tools for Riva speech services")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show audio properties of a file
    Inspect(crate::inspect::Args),

    /// Convert audio to mono 16kHz 16-bit PCM WAV
    Convert(crate::convert::Args),

    /// Check whether a file is ready for the transcription service
    Validate(crate::validate::Args),

    /// Transcribe an audio file to text
    Transcribe(crate::transcribe::Args),

    /// Translate an audio file to text in another language
    Translate(crate::translate::Args),

    /// Check environment, audio pipeline, and service connectivity
    Doctor(crate::doctor::Args),
}

/// Execute CLI command - separated for testing.
pub fn run_cli(cli: Cli) -> Result<()> {
    tracing::debug!(?cli, "parsed arguments");

    match cli.command {
        Commands::Inspect(args) => crate::inspect::execute(args.try_into()?),
        Commands::Convert(args) => crate::convert::execute(args.try_into()?),
        Commands::Validate(args) => crate::validate::execute(args.try_into()?),
        Commands::Transcribe(args) => crate::transcribe::execute(args.try_into()?),
        Commands::Translate(args) => crate::translate::execute(args.try_into()?),
        Commands::Doctor(args) => crate::doctor::execute(args.try_into()?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_inspect_command() {
        let cli = Cli::parse_from(["riva", "inspect", "clip.wav"]);

        match &cli.command {
            Commands::Inspect(crate::inspect::Args { path })
                if path.to_str() == Some("clip.wav") => {}
            _ => panic!("unexpected command: {:?}", cli.command),
        }
    }

    #[test]
    fn parses_convert_with_output() {
        let cli = Cli::parse_from(["riva", "convert", "clip.mp3", "-o", "out.wav"]);

        match &cli.command {
            Commands::Convert(crate::convert::Args {
                path,
                output: Some(output),
            }) if path.to_str() == Some("clip.mp3") && output.to_str() == Some("out.wav") => {}
            _ => panic!("unexpected command: {:?}", cli.command),
        }
    }

    #[test]
    fn parses_transcribe_with_language() {
        let cli = Cli::parse_from(["riva", "transcribe", "clip.wav", "-l", "de-DE"]);

        match &cli.command {
            Commands::Transcribe(crate::transcribe::Args {
                path,
                language: Some(language),
                keep: false,
                config: None,
            }) if path.to_str() == Some("clip.wav") && language == "de-DE" => {}
            _ => panic!("unexpected command: {:?}", cli.command),
        }
    }

    #[test]
    fn parses_translate_with_default_language() {
        let cli = Cli::parse_from(["riva", "translate", "clip.wav"]);

        match &cli.command {
            Commands::Translate(crate::translate::Args { path, language, .. })
                if path.to_str() == Some("clip.wav") && language == "en" => {}
            _ => panic!("unexpected command: {:?}", cli.command),
        }
    }

    #[test]
    fn parses_doctor_flags() {
        let cli = Cli::parse_from(["riva", "doctor", "--skip-network"]);

        match &cli.command {
            Commands::Doctor(crate::doctor::Args {
                skip_network: true,
                token_file: None,
            }) => {}
            _ => panic!("unexpected command: {:?}", cli.command),
        }
    }
}
