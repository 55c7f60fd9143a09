//! Text-to-speech over an OpenAI-compatible `/v1/audio/speech` endpoint.

use futures_util::StreamExt;
use reqwest::Client;
use serde::Serialize;
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::error::SpeechError;

#[cfg(test)]
pub(crate) mod stub;

#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    voice: &'a str,
    input: &'a str,
    response_format: &'static str,
}

pub struct SpeechClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
    voice: String,
}

impl SpeechClient {
    pub fn new(endpoint: String, api_key: Option<String>, model: String, voice: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            api_key,
            model,
            voice,
        }
    }

    /// Synthesizes `text` and streams the mp3 body into `destination`,
    /// replacing whatever was there.
    ///
    /// The body is streamed into a hidden `.part` file next to the target and
    /// renamed over it once complete. If the request fails or the future is
    /// dropped midway, `destination` keeps its previous contents.
    pub async fn synthesize(&self, text: &str, destination: &Path) -> Result<(), SpeechError> {
        let url = format!("{}/v1/audio/speech", self.endpoint.trim_end_matches('/'));

        let request = SpeechRequest {
            model: &self.model,
            voice: &self.voice,
            input: text,
            response_format: "mp3",
        };

        let mut http_request = self.client.post(&url).json(&request);

        if let Some(api_key) = &self.api_key {
            http_request = http_request.header("Authorization", format!("Bearer {api_key}"));
        }

        let response = http_request
            .send()
            .await
            .map_err(|source| SpeechError::Transport {
                url: url.clone(),
                source,
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SpeechError::Status { status, body });
        }

        let io_error = |source: std::io::Error| SpeechError::Io {
            path: destination.to_path_buf(),
            source,
        };

        let parent = destination
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let (part_file, part_path) = tempfile::Builder::new()
            .prefix(".speech_")
            .suffix(".part")
            .tempfile_in(parent)
            .map_err(io_error)?
            .into_parts();

        let mut file = File::from_std(part_file);
        let mut stream = response.bytes_stream();
        let mut written = 0usize;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|source| SpeechError::Transport {
                url: url.clone(),
                source,
            })?;
            file.write_all(&chunk).await.map_err(io_error)?;
            written += chunk.len();
        }

        file.flush().await.map_err(io_error)?;
        drop(file);

        // Dropping `part_path` on any earlier return removes the partial file.
        part_path
            .persist(destination)
            .map_err(|e| io_error(e.error))?;

        tracing::debug!(path = %destination.display(), bytes = written, "speech written");

        Ok(())
    }
}
