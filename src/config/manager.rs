use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

use crate::paths;
use crate::ui::Style;

pub const DEFAULT_FILE: &str = "write_here.txt";
pub const DEFAULT_LANGUAGE: &str = "german";
pub const DEFAULT_SAVED_AUDIO: &str = "latest_translation.mp3";
pub const DEFAULT_DEBOUNCE_MS: u64 = 100;
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com";
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_SPEECH_MODEL: &str = "tts-1";
pub const DEFAULT_VOICE: &str = "alloy";

/// Settings in the `[monitor]` section of config.toml.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MonitorConfig {
    /// Path of the file to watch.
    pub file: Option<String>,
    /// Language written into the file on startup.
    pub language: Option<String>,
    /// Whether to synthesize and play translations.
    pub audio: Option<bool>,
    /// Where the latest spoken translation is kept.
    pub saved_audio: Option<String>,
    /// Delay between a change notification and reading the file.
    pub debounce_ms: Option<u64>,
}

/// The `[provider]` section: the OpenAI-compatible endpoint used for both
/// completions and speech.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderConfig {
    /// The API endpoint URL.
    pub endpoint: Option<String>,
    /// API key stored directly in config (not recommended).
    #[serde(default)]
    pub api_key: Option<String>,
    /// Environment variable name containing the API key.
    #[serde(default)]
    pub api_key_env: Option<String>,
    /// Completion model used for translation.
    pub model: Option<String>,
}

impl ProviderConfig {
    /// Name of the environment variable holding the credential.
    pub fn api_key_env(&self) -> &str {
        self.api_key_env.as_deref().unwrap_or(DEFAULT_API_KEY_ENV)
    }

    /// Gets the API key, preferring environment variable over config file.
    pub fn get_api_key(&self) -> Option<String> {
        if let Ok(key) = std::env::var(self.api_key_env())
            && !key.is_empty()
        {
            return Some(key);
        }
        self.api_key.clone().filter(|key| !key.is_empty())
    }
}

/// The `[speech]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpeechConfig {
    /// Speech synthesis model.
    pub model: Option<String>,
    /// Voice name.
    pub voice: Option<String>,
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/langmon/config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub monitor: MonitorConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub speech: SpeechConfig,
}

/// Resolved configuration after merging CLI arguments, the config file and
/// built-in defaults.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// The monitored file.
    pub file: PathBuf,
    /// Language the file is reset to.
    pub language: String,
    /// Whether the audio pipeline runs.
    pub audio: bool,
    /// Persistent copy of the latest spoken translation.
    pub saved_audio: PathBuf,
    /// Scratch directory for temporary audio.
    pub scratch_dir: PathBuf,
    /// Debounce delay in milliseconds.
    pub debounce_ms: u64,
    /// The API endpoint URL.
    pub endpoint: String,
    /// The API key.
    pub api_key: String,
    /// The completion model.
    pub model: String,
    /// The speech model.
    pub speech_model: String,
    /// The speech voice.
    pub voice: String,
}

/// Options for resolving configuration.
///
/// Contains CLI overrides that take precedence over config file values.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Monitored file override.
    pub file: Option<String>,
    /// Initial language override.
    pub language: Option<String>,
    /// Completion model override.
    pub model: Option<String>,
    /// Voice override.
    pub voice: Option<String>,
    /// Disable the audio pipeline.
    pub no_audio: bool,
}

/// Resolves configuration by merging CLI options with config file settings.
///
/// CLI options take precedence over config file values, which take
/// precedence over the built-in defaults.
///
/// # Errors
///
/// Returns an error if no API key can be found, or if the language is
/// blank or spans more than one line.
pub fn resolve_config(
    options: &ResolveOptions,
    config_file: &ConfigFile,
) -> Result<ResolvedConfig> {
    let monitor = &config_file.monitor;
    let provider = &config_file.provider;
    let speech = &config_file.speech;

    let Some(api_key) = provider.get_api_key() else {
        let env_var = provider.api_key_env();
        bail!(
            "API key not found\n\n\
             Set the {env_var} environment variable:\n  \
             export {env_var}=\"your-api-key\"\n\n\
             Or set api_key in ~/.config/langmon/config.toml"
        );
    };

    let file = pick(options.file.as_ref(), monitor.file.as_ref(), DEFAULT_FILE);
    let language = pick(
        options.language.as_ref(),
        monitor.language.as_ref(),
        DEFAULT_LANGUAGE,
    )
    .trim()
    .to_lowercase();
    if language.is_empty() {
        bail!("Language must not be empty");
    }
    if language.contains(['\n', '\r']) {
        bail!("Language must be a single line");
    }

    Ok(ResolvedConfig {
        file: PathBuf::from(file),
        language,
        audio: !options.no_audio && monitor.audio.unwrap_or(true),
        saved_audio: PathBuf::from(pick(
            None,
            monitor.saved_audio.as_ref(),
            DEFAULT_SAVED_AUDIO,
        )),
        scratch_dir: paths::scratch_dir(),
        debounce_ms: monitor.debounce_ms.unwrap_or(DEFAULT_DEBOUNCE_MS),
        endpoint: pick(None, provider.endpoint.as_ref(), DEFAULT_ENDPOINT),
        api_key,
        model: pick(options.model.as_ref(), provider.model.as_ref(), DEFAULT_MODEL),
        speech_model: pick(None, speech.model.as_ref(), DEFAULT_SPEECH_MODEL),
        voice: pick(options.voice.as_ref(), speech.voice.as_ref(), DEFAULT_VOICE),
    })
}

fn pick(cli: Option<&String>, file: Option<&String>, default: &str) -> String {
    cli.or(file).cloned().unwrap_or_else(|| default.to_string())
}

/// Loads the configuration file.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is stored at `$XDG_CONFIG_HOME/langmon/config.toml`
    /// or `~/.config/langmon/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        let config_file: ConfigFile =
            toml::from_str(&contents).with_context(|| "Failed to parse config file")?;

        Ok(config_file)
    }

    /// Loads the config file, falling back to defaults when it is missing.
    /// A file that exists but cannot be parsed is reported, then ignored.
    pub fn load_or_default(&self) -> ConfigFile {
        if !self.config_path.exists() {
            return ConfigFile::default();
        }

        self.load().unwrap_or_else(|e| {
            crate::warn!(
                "{} ignoring {}: {e:#}",
                Style::warning("Warning:"),
                self.config_path.display()
            );
            ConfigFile::default()
        })
    }
}
