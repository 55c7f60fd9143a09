use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::mpsc;
use std::sync::{Mutex, PoisonError};

use crate::error::AudioError;

/// Plays one audio file at a time on the default output device.
///
/// Playback runs on rodio's mixer thread, so [`AudioPlayer::play`] returns
/// as soon as the new file is queued. Starting a new file always stops the
/// previous one.
pub struct AudioPlayer {
    handle: OutputStreamHandle,
    current: Mutex<Option<Sink>>,
    // Dropping this ends the thread that keeps the output stream alive.
    _shutdown: mpsc::Sender<()>,
}

impl AudioPlayer {
    /// Opens the default output device.
    ///
    /// The device stream is not `Send`, so it is opened on a dedicated thread
    /// that holds it until the player is dropped.
    pub fn open() -> Result<Self, AudioError> {
        let (ready_tx, ready_rx) = mpsc::channel();
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

        std::thread::Builder::new()
            .name("audio-output".to_string())
            .spawn(move || match OutputStream::try_default() {
                Ok((_stream, handle)) => {
                    if ready_tx.send(Ok(handle)).is_ok() {
                        // Blocks until the sender is dropped.
                        let _ = shutdown_rx.recv();
                    }
                }
                Err(e) => {
                    let _ = ready_tx.send(Err(e));
                }
            })
            .map_err(AudioError::Spawn)?;

        let handle = ready_rx.recv().map_err(|_| AudioError::WorkerGone)??;

        Ok(Self {
            handle,
            current: Mutex::new(None),
            _shutdown: shutdown_tx,
        })
    }

    /// Stops whatever is playing and starts `path`.
    pub fn play(&self, path: &Path) -> Result<(), AudioError> {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(previous) = current.take() {
            previous.stop();
        }

        let file = File::open(path).map_err(|source| AudioError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let source = Decoder::new(BufReader::new(file)).map_err(|source| AudioError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        let sink = Sink::try_new(&self.handle)?;
        sink.append(source);
        *current = Some(sink);

        Ok(())
    }

    /// Stops playback if anything is playing.
    pub fn stop(&self) {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(sink) = current.take() {
            sink.stop();
        }
    }
}
