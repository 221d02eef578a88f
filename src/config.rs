use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::MatchOptions;
use crate::models::responses::{ArgumentsFormat, NoMatchPolicy};
use crate::services::OutputStyle;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub dispatch: DispatchSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8000 }

/// Query matching and response shaping policy
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct DispatchSettings {
    #[serde(flatten)]
    pub matching: MatchOptions,
    #[serde(default)]
    pub no_match_status: NoMatchPolicy,
    #[serde(default)]
    pub arguments_format: ArgumentsFormat,
    #[serde(default)]
    pub function_output: OutputStyle,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }

/// Output layout of the tracing subscriber
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per event
    #[default]
    Json,
    /// Multi-line human-readable output
    Pretty,
    /// Single-line plain text
    Compact,
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with INTENT_)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., INTENT__DISPATCH__STRICT_ANCHOR -> dispatch.strict_anchor
            .add_source(environment())
            .build()?;

        apply_platform_binding(settings, |key| std::env::var(key).ok())?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        settings.try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("INTENT")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Honor the bare HOST / PORT variables set by most hosting platforms
///
/// A `PORT` that is not a valid `u16` is ignored.
fn apply_platform_binding(
    settings: Config,
    var: impl Fn(&str) -> Option<String>,
) -> Result<Config, ConfigError> {
    let mut builder = Config::builder().add_source(settings);

    if let Some(host) = var("HOST") {
        builder = builder.set_override("server.host", host)?;
    }
    if let Some(port) = var("PORT").and_then(|p| p.parse::<u16>().ok()) {
        builder = builder.set_override("server.port", i64::from(port))?;
    }

    builder.build()
}
