//! One translation cycle per file change.
//!
//! Each cycle reads the file and checks the language directive first. A
//! changed language retranslates the current payload even if the text is
//! the same; otherwise the payload is translated only when it differs from
//! the last one seen. A successful translation is written back into the
//! file and handed to the audio queue.

use std::path::{Path, PathBuf};

use crate::audio::AudioQueue;
use crate::document::{detect_language, extract_payload, write_translation};
use crate::error::CycleError;
use crate::translation::Translator;
use crate::ui::{Spinner, Style};

/// What the watcher has already seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationState {
    /// Payload of the last translated (or attempted) cycle.
    pub last_payload: String,
    /// Target language in effect.
    pub last_language: Option<String>,
}

/// Why a cycle ended without translating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skip {
    /// The first line is not a `LANGUAGE:` directive.
    NoLanguage,
    /// Nothing between the markers.
    EmptyPayload,
    /// Same payload and language as last time.
    Unchanged,
}

/// Outcome of a cycle that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cycle {
    Translated {
        language: String,
        translation: String,
    },
    Skipped(Skip),
}

/// Drives cycles for one file. Owns the state threaded between them.
pub struct Monitor<T> {
    path: PathBuf,
    state: TranslationState,
    translator: T,
    audio: Option<AudioQueue>,
}

impl<T: Translator> Monitor<T> {
    pub fn new(path: PathBuf, language: String, translator: T, audio: Option<AudioQueue>) -> Self {
        Self {
            path,
            state: TranslationState {
                last_payload: String::new(),
                last_language: Some(language),
            },
            translator,
            audio,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub const fn state(&self) -> &TranslationState {
        &self.state
    }

    pub const fn translator(&self) -> &T {
        &self.translator
    }

    /// Runs one cycle against the file as it is on disk now.
    ///
    /// The file is rewritten only after a translation has been obtained, so
    /// an error leaves it untouched.
    pub async fn handle_change(&mut self) -> Result<Cycle, CycleError> {
        let contents =
            tokio::fs::read_to_string(&self.path)
                .await
                .map_err(|source| CycleError::Read {
                    path: self.path.clone(),
                    source,
                })?;

        let Some(language) = detect_language(&contents) else {
            tracing::debug!("no language directive on the first line");
            return Ok(Cycle::Skipped(Skip::NoLanguage));
        };

        let payload = extract_payload(&contents);

        if self.state.last_language.as_deref() != Some(language.as_str()) {
            crate::status!(
                "{} {}",
                Style::label("Target language changed to:"),
                Style::value(&language)
            );
            self.state.last_language = Some(language.clone());
            self.state.last_payload = payload.to_string();

            if payload.is_empty() {
                return Ok(Cycle::Skipped(Skip::EmptyPayload));
            }
            return self.translate(&contents, payload, language).await;
        }

        if payload.is_empty() {
            return Ok(Cycle::Skipped(Skip::EmptyPayload));
        }
        if payload == self.state.last_payload {
            return Ok(Cycle::Skipped(Skip::Unchanged));
        }

        self.state.last_payload = payload.to_string();
        crate::status!("{}", Style::warning("Detecting changes and translating..."));
        self.translate(&contents, payload, language).await
    }

    async fn translate(
        &self,
        contents: &str,
        payload: &str,
        language: String,
    ) -> Result<Cycle, CycleError> {
        let spinner = Spinner::new(&format!("Translating to {language}..."));
        let result = self.translator.translate(payload, &language).await;
        spinner.stop();

        let translation = result?;
        write_translation(&self.path, contents, &translation)?;
        crate::status!("{}", Style::success("Translation updated successfully!"));

        if let Some(audio) = &self.audio {
            audio.submit(&translation);
        }

        Ok(Cycle::Translated {
            language,
            translation,
        })
    }
}
