mod client;
mod prompt;

pub use client::TranslationClient;

use std::future::Future;

use crate::error::TranslateError;

/// Something that can turn text into another language.
///
/// The watch loop only depends on this, so cycles can be driven without a
/// network in tests.
pub trait Translator {
    /// Translates `text` into `target_language`, returning the trimmed result.
    fn translate(
        &self,
        text: &str,
        target_language: &str,
    ) -> impl Future<Output = Result<String, TranslateError>>;
}
