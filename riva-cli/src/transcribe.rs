//! Transcribe subcommand - prepare an audio file and send it to the
//! transcription endpoint.

use crate::config::AppConfig;
use color_eyre::Section;
use eyre::{Context, Result, eyre};
use riva_audio::{Normalizer, cleanup, is_supported, supported_extensions};
use riva_client::RivaClient;
use std::path::{Path, PathBuf};

/// CLI arguments for transcription.
#[derive(clap::Args, Debug)]
pub struct Args {
    /// Path to the audio file
    pub path: PathBuf,

    /// Language code (default: taken from the deployment config)
    #[arg(short, long)]
    pub language: Option<String>,

    /// Keep the converted temporary file instead of deleting it
    #[arg(long)]
    pub keep: bool,

    /// Path to a deployment config JSON file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Resolved configuration for transcription.
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
        let app = AppConfig::load(args.config.as_deref());
        let language = args
            .language
            .unwrap_or_else(|| app.default_language.clone());

        if !app.supported_languages.contains(&language) {
            tracing::warn!(language, "language not in the deployment's advertised set");
        }

        Ok(Self {
            path: args.path,
            language,
            keep: args.keep,
            app,
        })
    }
}

pub fn execute(config: Config) -> Result<()> {
    let text = send_audio(
        &config.path,
        &config.language,
        config.keep,
        &config.app,
        Task::Transcribe,
    )?;

    println!("{text}");

    Ok(())
}

/// Which endpoint the prepared audio goes to.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Task {
    Transcribe,
    Translate,
}

/// Shared upload pipeline: gate on size and format, convert when the file
/// is not already canonical, send, and clean up temporaries whether or
/// not the request succeeded.
pub(crate) fn send_audio(
    path: &Path,
    language: &str,
    keep: bool,
    app: &AppConfig,
    task: Task,
) -> Result<String> {
    let metadata = std::fs::metadata(path)
        .wrap_err_with(|| format!("cannot read file: {:?}", path.display()))?;
    let size_mb = metadata.len() as f64 / (1024.0 * 1024.0);
    if size_mb > app.max_file_size_mb as f64 {
        return Err(eyre!(
            "file too large ({size_mb:.1} MB), maximum size is {} MB",
            app.max_file_size_mb
        ));
    }

    if !is_supported(path) {
        return Err(eyre!("unsupported file format: {:?}", path.display()))
            .with_suggestion(|| {
                format!("supported formats: {}", supported_extensions().join(", "))
            });
    }

    // Fail on missing endpoint or token before doing any conversion work
    let client = RivaClient::from_env()?;

    let normalizer = Normalizer::new();
    let mut temp_files: Vec<PathBuf> = Vec::new();

    let (compatible, validation_message) = normalizer.validate_for_target(path);
    let upload_path = if compatible {
        tracing::info!(path = ?path.display(), "file is already compatible");
        path.to_path_buf()
    } else {
        tracing::info!(reason = validation_message, "converting file");
        let converted = normalizer.convert_to_canonical(path, None)?;
        temp_files.push(converted.clone());
        converted
    };

    if let Ok(Some(info)) = normalizer.inspect(&upload_path) {
        tracing::info!(
            duration_secs = format!("{:.1}", info.duration_secs()),
            language,
            "sending audio"
        );
    }

    let result = match task {
        Task::Transcribe => client.transcribe(&upload_path, language),
        Task::Translate => client.translate(&upload_path, language),
    };

    // Temporaries go away on success and on failure alike
    if keep {
        for temp in &temp_files {
            tracing::info!(path = ?temp.display(), "keeping temporary file");
        }
    } else {
        cleanup(&temp_files);
    }

    Ok(result?)
}
