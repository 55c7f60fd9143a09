use anyhow::{Context, Result};
use std::path::PathBuf;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::AudioPlayer;
use super::scratch;
use crate::speech::SpeechClient;
use crate::ui::Style;

/// Where generated audio goes.
#[derive(Debug, Clone)]
pub struct AudioSettings {
    /// Directory holding the temporary per-translation copies.
    pub scratch_dir: PathBuf,
    /// Fixed path overwritten with the latest translation.
    pub saved_path: PathBuf,
}

/// Handle for submitting translations to the audio worker.
///
/// Submitting never blocks; the worker synthesizes and plays in the
/// background.
#[derive(Debug, Clone)]
pub struct AudioQueue {
    tx: mpsc::UnboundedSender<String>,
}

impl AudioQueue {
    pub const fn new(tx: mpsc::UnboundedSender<String>) -> Self {
        Self { tx }
    }

    pub fn submit(&self, translation: &str) {
        if self.tx.send(translation.to_string()).is_err() {
            tracing::debug!("audio worker has stopped; dropping translation");
        }
    }
}

/// Starts the single audio worker. It runs until every [`AudioQueue`]
/// clone is dropped.
pub fn spawn(
    speech: SpeechClient,
    player: Option<AudioPlayer>,
    settings: AudioSettings,
) -> (AudioQueue, JoinHandle<()>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let worker = tokio::spawn(run(rx, speech, player, settings));
    (AudioQueue::new(tx), worker)
}

async fn run(
    mut rx: mpsc::UnboundedReceiver<String>,
    speech: SpeechClient,
    player: Option<AudioPlayer>,
    settings: AudioSettings,
) {
    while let Some(mut text) = rx.recv().await {
        // Only the newest translation is worth speaking.
        while let Ok(newer) = rx.try_recv() {
            text = newer;
        }

        if let Err(e) = speak(&speech, player.as_ref(), &settings, &text).await {
            crate::warn!("{} {:#}", Style::error("Error generating audio:"), e);
        }
    }

    if let Some(player) = player {
        player.stop();
    }
}

async fn speak(
    speech: &SpeechClient,
    player: Option<&AudioPlayer>,
    settings: &AudioSettings,
    text: &str,
) -> Result<()> {
    crate::status!("{}", Style::warning("Generating audio..."));

    scratch::cleanup(&settings.scratch_dir);

    let temp_path = scratch::new_temp_path(&settings.scratch_dir).with_context(|| {
        format!(
            "Failed to create audio file in {}",
            settings.scratch_dir.display()
        )
    })?;

    speech.synthesize(text, &temp_path).await?;

    match player {
        Some(player) => {
            player.play(&temp_path)?;
            crate::status!("{}", Style::success("Playing audio translation..."));
        }
        None => tracing::debug!("no audio device; skipping playback"),
    }

    speech.synthesize(text, &settings.saved_path).await?;

    Ok(())
}
