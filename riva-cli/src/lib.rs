//! riva-cli: command-line front end for the Riva transcription pipeline.
//!
//! Subcommand modules own their argument structs and execution; `cli`
//! wires them together. Exposed as a library so integration tests can
//! drive the full command path without spawning a binary.

pub mod cli;
pub mod config;

pub mod convert;
pub mod doctor;
pub mod inspect;
pub mod transcribe;
pub mod translate;
pub mod validate;
