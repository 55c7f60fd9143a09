//! # langmon - Translate-as-you-type file monitor
//!
//! `langmon` watches one text file. Whatever is written between the two
//! marker lines is sent to an OpenAI-compatible completion endpoint, the
//! translation is written back below the markers, and (optionally) spoken
//! aloud through a speech endpoint.
//!
//! ## Quick Start
//!
//! ```bash
//! export OPENAI_API_KEY=...
//! langmon                # resets and watches ./write_here.txt
//! langmon --no-audio     # text only
//! ```
//!
//! Then edit the file:
//!
//! ```text
//! LANGUAGE: german
//!
//! <WRITE IN BETWEEN THESE TAGS>
//! Good morning
//! <WRITE IN BETWEEN THESE TAGS>
//!
//! TRANSLATION: Guten Morgen
//! ```
//!
//! Changing the `LANGUAGE:` line retranslates the current text.
//!
//! ## Configuration
//!
//! Optional settings live in `~/.config/langmon/config.toml`:
//!
//! ```toml
//! [monitor]
//! file = "write_here.txt"
//! language = "german"
//! audio = true
//!
//! [provider]
//! endpoint = "https://api.openai.com"
//! api_key_env = "OPENAI_API_KEY"
//! model = "gpt-4o-mini"
//!
//! [speech]
//! model = "tts-1"
//! voice = "alloy"
//! ```

/// Speech synthesis into files and single-track playback.
pub mod audio;

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management.
pub mod config;

/// Parsing and rewriting the monitored file.
pub mod document;

/// Typed errors for each component.
pub mod error;

/// File system utilities.
pub mod fs;

/// Translation cycles driven by file changes.
pub mod monitor;

/// Global output configuration (quiet mode, colors).
pub mod output;

/// XDG-style path utilities for configuration and scratch audio.
pub mod paths;

/// Text-to-speech client.
pub mod speech;

/// Diagnostic logging setup.
pub mod telemetry;

/// Translation client for OpenAI-compatible APIs.
pub mod translation;

/// Terminal UI components (spinner, colors).
pub mod ui;

/// Change notifications for the monitored file.
pub mod watcher;
