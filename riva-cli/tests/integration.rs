//! Integration tests for the riva CLI.

use clap::Parser;
use riva_cli::cli::{Cli, run_cli};
use std::path::Path;

fn write_stereo_wav(path: &Path, sample_rate: u32, secs: f32) {
    let spec = hound::WavSpec {
        channels: 2,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    let frames = (sample_rate as f32 * secs) as usize;
    for i in 0..frames {
        let t = i as f32 / sample_rate as f32;
        let sample = 0.4 * (2.0 * std::f32::consts::PI * 330.0 * t).sin();
        writer.write_sample((sample * 32767.0) as i16).unwrap();
        writer.write_sample((sample * 0.5 * 32767.0) as i16).unwrap();
    }
    writer.finalize().unwrap();
}

#[test]
fn convert_then_validate_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("recording.wav");
    let output = dir.path().join("canonical.wav");
    write_stereo_wav(&input, 44_100, 1.5);

    let cli = Cli::parse_from([
        "riva",
        "convert",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ]);
    run_cli(cli).expect("conversion failed");
    assert!(output.exists());

    let cli = Cli::parse_from(["riva", "validate", output.to_str().unwrap()]);
    run_cli(cli).expect("converted file should be compatible");
}

#[test]
fn validate_rejects_raw_recording() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("raw.wav");
    write_stereo_wav(&input, 44_100, 1.0);

    let cli = Cli::parse_from(["riva", "validate", input.to_str().unwrap()]);
    let result = run_cli(cli);

    let err = result.expect_err("44.1kHz stereo must not validate");
    assert!(err.to_string().contains("Issues found"), "{err}");
}

#[test]
fn inspect_reports_unreadable_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.wav");
    std::fs::write(&input, "not audio").unwrap();

    let cli = Cli::parse_from(["riva", "inspect", input.to_str().unwrap()]);

    assert!(run_cli(cli).is_err());
}

#[test]
fn transcribe_rejects_unsupported_format_before_any_network_use() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("notes.txt");
    std::fs::write(&input, "meeting notes").unwrap();

    let cli = Cli::parse_from(["riva", "transcribe", input.to_str().unwrap()]);
    let result = run_cli(cli);

    let err = result.expect_err("txt upload must be rejected locally");
    assert!(err.to_string().contains("unsupported file format"), "{err}");
}

#[test]
fn doctor_passes_offline() {
    let dir = tempfile::tempdir().unwrap();
    let token = dir.path().join("jwt");
    std::fs::write(&token, r#"{"access_token": "test-token"}"#).unwrap();

    let cli = Cli::parse_from([
        "riva",
        "doctor",
        "--skip-network",
        "--token-file",
        token.to_str().unwrap(),
    ]);

    run_cli(cli).expect("offline doctor run should not fail");
}
