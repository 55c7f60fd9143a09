use anyhow::{Context, Result};
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::audio::{self, AudioPlayer, AudioQueue, AudioSettings, scratch};
use crate::config::{ConfigManager, ResolveOptions, ResolvedConfig, resolve_config};
use crate::document::{detect_language, initial_contents};
use crate::error::{CycleError, RewriteError};
use crate::fs::atomic_write;
use crate::monitor::{Cycle, Monitor};
use crate::speech::SpeechClient;
use crate::translation::{TranslationClient, Translator};
use crate::ui::Style;
use crate::watcher::FileWatcher;

pub struct MonitorOptions {
    pub file: Option<String>,
    pub language: Option<String>,
    pub model: Option<String>,
    pub voice: Option<String>,
    pub no_audio: bool,
}

/// Resets the file, reads its language and watches it until Ctrl+C.
///
/// Startup problems (no credential, no language, no watch) are printed and
/// end the run without an error status.
pub async fn run_monitor(options: MonitorOptions) -> Result<()> {
    crate::status!("{}", Style::header("Starting Language Monitor..."));

    let config = match prepare(&options) {
        Ok(config) => config,
        Err(e) => {
            crate::warn!("{} {:#}", Style::error("Error:"), e);
            return Ok(());
        }
    };

    let (path, language) = match reset_file(&config) {
        Ok(prepared) => prepared,
        Err(e) => {
            crate::warn!("{} {:#}", Style::error("Error:"), e);
            return Ok(());
        }
    };

    crate::status!(
        "{} {}",
        Style::label("Target language for translation:"),
        Style::value(&language)
    );
    scratch::cleanup(&config.scratch_dir);

    let translator = TranslationClient::new(
        config.endpoint.clone(),
        Some(config.api_key.clone()),
        config.model.clone(),
    );
    let (audio_queue, audio_worker) = if config.audio {
        let (queue, worker) = start_audio(&config);
        (Some(queue), Some(worker))
    } else {
        (None, None)
    };

    let mut monitor = Monitor::new(path, language, translator, audio_queue);

    let (watcher, mut events) = match FileWatcher::new(monitor.path()) {
        Ok(watching) => watching,
        Err(e) => {
            crate::warn!("{} failed to watch file: {}", Style::error("Error:"), e);
            return Ok(());
        }
    };

    crate::status!(
        "{} {} {}",
        Style::success("Monitoring"),
        Style::value(watcher.path().display()),
        Style::hint("(Press Ctrl+C to stop)")
    );

    let debounce = Duration::from_millis(config.debounce_ms);
    watch_loop(&mut monitor, &mut events, debounce, tokio::signal::ctrl_c()).await;

    drop(watcher);
    drop(monitor);
    crate::status!("\n{}", Style::warning("Stopping Language Monitor..."));

    if let Some(worker) = audio_worker {
        worker.abort();
        let _ = worker.await;
    }
    scratch::cleanup(&config.scratch_dir);

    Ok(())
}

fn prepare(options: &MonitorOptions) -> Result<ResolvedConfig> {
    let manager = ConfigManager::new()?;
    let file_config = manager.load_or_default();

    resolve_config(
        &ResolveOptions {
            file: options.file.clone(),
            language: options.language.clone(),
            model: options.model.clone(),
            voice: options.voice.clone(),
            no_audio: options.no_audio,
        },
        &file_config,
    )
}

/// Writes the initial contents and reads the language back from disk.
/// Returns the canonical path of the file alongside it.
fn reset_file(config: &ResolvedConfig) -> Result<(PathBuf, String)> {
    atomic_write(&config.file, &initial_contents(&config.language))
        .with_context(|| format!("Failed to reset {}", config.file.display()))?;
    crate::status!("{}", Style::success("File reset to original state"));

    let path = config
        .file
        .canonicalize()
        .with_context(|| format!("Failed to resolve {}", config.file.display()))?;
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let language =
        detect_language(&contents).context("Could not detect target language from file")?;

    Ok((path, language))
}

fn start_audio(config: &ResolvedConfig) -> (AudioQueue, tokio::task::JoinHandle<()>) {
    let player = match AudioPlayer::open() {
        Ok(player) => Some(player),
        Err(e) => {
            crate::warn!(
                "{} {}; translations will be saved but not played",
                Style::warning("Warning:"),
                e
            );
            None
        }
    };

    let speech = SpeechClient::new(
        config.endpoint.clone(),
        Some(config.api_key.clone()),
        config.speech_model.clone(),
        config.voice.clone(),
    );

    audio::pipeline::spawn(
        speech,
        player,
        AudioSettings {
            scratch_dir: config.scratch_dir.clone(),
            saved_path: config.saved_audio.clone(),
        },
    )
}

/// Handles change events one at a time until `shutdown` resolves or the
/// event channel closes. A failed cycle is reported and the loop goes on.
pub async fn watch_loop<T, F, E>(
    monitor: &mut Monitor<T>,
    events: &mut mpsc::UnboundedReceiver<()>,
    debounce: Duration,
    shutdown: F,
) where
    T: Translator,
    F: Future<Output = Result<(), E>>,
    E: std::fmt::Display,
{
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = &mut shutdown => {
                if let Err(e) = result {
                    crate::warn!("{} failed to listen for Ctrl+C: {}", Style::error("Error:"), e);
                }
                break;
            }
            event = events.recv() => {
                if event.is_none() {
                    break;
                }

                // Give the writer a moment to finish flushing.
                tokio::time::sleep(debounce).await;

                match monitor.handle_change().await {
                    Ok(Cycle::Translated { language, .. }) => {
                        tracing::debug!(%language, "cycle translated");
                    }
                    Ok(Cycle::Skipped(reason)) => tracing::debug!(?reason, "cycle skipped"),
                    Err(e) => report_cycle_error(&e),
                }
            }
        }
    }
}

fn report_cycle_error(error: &CycleError) {
    let label = match error {
        CycleError::Read { .. } => "Error handling file change:",
        CycleError::Translate(_) => "Error getting translation:",
        CycleError::Rewrite(RewriteError::MissingMarker) => "Error: translation not written:",
        CycleError::Rewrite(RewriteError::Write { .. }) => "Error updating file with translation:",
    };

    crate::warn!("{} {}", Style::error(label), error);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_for(file: PathBuf, language: &str) -> ResolvedConfig {
        ResolvedConfig {
            file,
            language: language.to_string(),
            audio: false,
            saved_audio: PathBuf::from("latest_translation.mp3"),
            scratch_dir: PathBuf::from("scratch"),
            debounce_ms: 0,
            endpoint: "http://127.0.0.1:1".to_string(),
            api_key: "test-key".to_string(),
            model: "gpt-4o-mini".to_string(),
            speech_model: "tts-1".to_string(),
            voice: "alloy".to_string(),
        }
    }

    #[test]
    fn test_reset_file_overwrites_and_detects_language() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("write_here.txt");
        std::fs::write(&file, "LANGUAGE: spanish\n\nold notes\nTRANSLATION: viejo").unwrap();

        let (path, language) = reset_file(&config_for(file.clone(), "french")).unwrap();

        assert_eq!(language, "french");
        assert_eq!(path, file.canonicalize().unwrap());
        assert_eq!(
            std::fs::read_to_string(&file).unwrap(),
            initial_contents("french")
        );
    }

    #[test]
    fn test_reset_file_creates_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("write_here.txt");

        let (_, language) = reset_file(&config_for(file.clone(), "german")).unwrap();

        assert_eq!(language, "german");
        assert!(std::fs::read_to_string(&file).unwrap().starts_with("LANGUAGE: german\n"));
    }

    #[test]
    fn test_reset_file_missing_directory_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("missing").join("write_here.txt");

        let error = reset_file(&config_for(file, "german")).unwrap_err();

        assert!(error.to_string().contains("Failed to reset"));
    }
}
