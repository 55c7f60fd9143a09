//! Typed errors returned at each component boundary.
//!
//! Application setup uses `anyhow`; everything that can fail inside a
//! single watch cycle or the audio worker returns one of these instead so
//! the caller can decide what to do per kind.

use std::io;
use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Failure talking to the chat completion endpoint.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("failed to reach completion endpoint {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("completion request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("malformed completion response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("completion response contained no choices")]
    EmptyChoices,

    #[error("completion response was empty")]
    EmptyContent,
}

/// Failure synthesizing speech into a file.
#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("failed to reach speech endpoint {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("speech request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to write audio to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failure loading or playing an audio file.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output device: {0}")]
    Device(#[from] rodio::StreamError),

    #[error("failed to start audio output thread: {0}")]
    Spawn(#[source] io::Error),

    #[error("audio output thread exited before reporting a device")]
    WorkerGone,

    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },

    #[error("failed to start playback: {0}")]
    Play(#[from] rodio::PlayError),
}

/// Failure reinserting a translation into the monitored file.
#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("could not find the closing marker")]
    MissingMarker,

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Why a single watch cycle was abandoned. Every variant is recoverable:
/// the watcher keeps running and the next edit starts a fresh cycle.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Translate(#[from] TranslateError),

    #[error(transparent)]
    Rewrite(#[from] RewriteError),
}
