//! Spoken playback of translations.
//!
//! Translations are handed to a single background worker ([`pipeline`]),
//! which synthesizes speech into a scratch file, starts playback, and
//! refreshes the persistent "latest translation" copy.

pub mod pipeline;
mod player;
pub mod scratch;

pub use pipeline::{AudioQueue, AudioSettings};
pub use player::AudioPlayer;
