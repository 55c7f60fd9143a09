//! Configuration file management and setting resolution.

mod manager;

pub use manager::{
    ConfigFile, ConfigManager, MonitorConfig, ProviderConfig, ResolveOptions, ResolvedConfig,
    SpeechConfig, resolve_config,
};
