//! Doctor subcommand - environment and pipeline health checks.

use eyre::{Result, eyre};
use riva_audio::{Normalizer, cleanup};
use riva_client::{BASE_URL_ENV, DEFAULT_TOKEN_PATH, RivaClient, read_access_token};
use std::fmt;
use std::path::{Path, PathBuf};

/// CLI arguments for the doctor checks.
#[derive(clap::Args, Debug)]
pub struct Args {
    /// Skip the service reachability probe
    #[arg(long)]
    pub skip_network: bool,

    /// Bearer token file (default: /tmp/jwt)
    #[arg(long)]
    pub token_file: Option<PathBuf>,
}

/// Resolved configuration for the doctor checks.
#[derive(Debug)]
pub struct Config {
    pub skip_network: bool,
    pub token_file: PathBuf,
}

impl TryFrom<Args> for Config {
    type Error = eyre::Error;

    fn try_from(args: Args) -> Result<Self> {
        Ok(Self {
            skip_network: args.skip_network,
            token_file: args
                .token_file
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TOKEN_PATH)),
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Outcome {
    Pass,
    Warn,
    Fail,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Outcome::Pass => "PASS",
            Outcome::Warn => "WARN",
            Outcome::Fail => "FAIL",
        })
    }
}

struct Check {
    name: &'static str,
    outcome: Outcome,
    detail: String,
}

impl Check {
    fn pass(name: &'static str, detail: impl Into<String>) -> Self {
        Self { name, outcome: Outcome::Pass, detail: detail.into() }
    }

    fn warn(name: &'static str, detail: impl Into<String>) -> Self {
        Self { name, outcome: Outcome::Warn, detail: detail.into() }
    }

    fn fail(name: &'static str, detail: impl Into<String>) -> Self {
        Self { name, outcome: Outcome::Fail, detail: detail.into() }
    }
}

pub fn execute(config: Config) -> Result<()> {
    let mut checks = vec![
        check_endpoint(),
        check_token(&config.token_file),
        check_audio_pipeline(),
    ];

    if config.skip_network {
        tracing::info!("skipping service reachability probe");
    } else {
        checks.push(check_connectivity());
    }

    println!("Riva environment check\n");
    for check in &checks {
        println!("{:<18} {:<4} {}", check.name, check.outcome, check.detail);
    }

    let count = |outcome| checks.iter().filter(|c| c.outcome == outcome).count();
    let passed = count(Outcome::Pass);
    let warned = count(Outcome::Warn);
    let failed = count(Outcome::Fail);

    println!("\n{passed} passed, {warned} warnings, {failed} failed");

    if failed > 0 {
        Err(eyre!("{failed} of {} checks failed", checks.len()))
    } else {
        Ok(())
    }
}

/// Warnings only here: a missing endpoint is normal on a developer
/// machine, and local conversion still works without one.
fn check_endpoint() -> Check {
    match std::env::var(BASE_URL_ENV) {
        Ok(url) if !url.is_empty() => {
            Check::pass("service endpoint", format!("{BASE_URL_ENV}={url}"))
        }
        _ => Check::warn(
            "service endpoint",
            format!("{BASE_URL_ENV} is not set (required to reach the service)"),
        ),
    }
}

/// An absent token file is expected outside a workbench session, but a
/// present-and-malformed one means the session is broken.
fn check_token(path: &Path) -> Check {
    if !path.exists() {
        return Check::warn(
            "token file",
            format!("{} not found (expected outside a workbench session)", path.display()),
        );
    }

    match read_access_token(path) {
        Ok(_) => Check::pass("token file", format!("{} holds a usable token", path.display())),
        Err(err) => Check::fail("token file", err.to_string()),
    }
}

fn check_audio_pipeline() -> Check {
    match smoke_test() {
        Ok(detail) => Check::pass("audio pipeline", detail),
        Err(err) => Check::fail("audio pipeline", format!("{err:#}")),
    }
}

/// Generate a one-second 440Hz tone at 44.1kHz, the shape a browser
/// microphone capture typically arrives in, then convert and validate it.
fn smoke_test() -> Result<String> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("doctor_tone.wav");
    write_test_tone(&input, 44_100, 1.0, 440.0)?;

    let normalizer = Normalizer::new();
    let converted = normalizer.convert_to_canonical(&input, None)?;
    let (compatible, message) = normalizer.validate_for_target(&converted);
    cleanup([&converted]);

    if compatible {
        Ok("test tone converted and validated".to_string())
    } else {
        Err(eyre!("converted test tone failed validation: {message}"))
    }
}

fn write_test_tone(path: &Path, sample_rate: u32, secs: f32, freq: f32) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec)?;

    let frames = (sample_rate as f32 * secs) as usize;
    for i in 0..frames {
        let t = i as f32 / sample_rate as f32;
        let sample = 0.3 * (2.0 * std::f32::consts::PI * freq * t).sin();
        writer.write_sample((sample * 32767.0) as i16)?;
    }
    writer.finalize()?;

    Ok(())
}

fn check_connectivity() -> Check {
    let client = match RivaClient::from_env() {
        Ok(client) => client,
        Err(err) => return Check::warn("connectivity", format!("client not configured: {err}")),
    };

    if client.health_check() {
        Check::pass("connectivity", format!("service answered at {}", client.base_url()))
    } else {
        Check::warn(
            "connectivity",
            "service did not answer (check RIVA_BASE_URL and that the deployment is running)",
        )
    }
}
