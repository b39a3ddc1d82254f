//! TOML configuration and `tracing` setup.
//!
//! ```toml
//! [policy]
//! show_qualified_names = true
//! show_details = "inline_formatters"
//!
//! [detail]
//! timeout_ms = 2000
//!
//! [logging]
//! level = "nova.debug.presentation=debug"
//! json = true
//! ```

use std::path::Path;
use std::sync::Once;
use std::time::Duration;

use serde::Deserialize;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::attributes::RenderPolicy;
use crate::detail::DEFAULT_DETAIL_TIMEOUT;
use crate::error::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PresentationConfig {
    pub policy: RenderPolicy,
    pub detail: DetailConfig,
    pub logging: LoggingConfig,
}

impl PresentationConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DetailConfig {
    /// Upper bound for a blocking detail wait, in milliseconds.
    pub timeout_ms: u64,
}

impl DetailConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for DetailConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_DETAIL_TIMEOUT.as_millis() as u64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// A level (`info`, `debug`, ...) or a full `EnvFilter` directive string.
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
            json: false,
        }
    }
}

/// Targets a bare level in [`LoggingConfig::level`] applies to.
const LOG_TARGETS: [&str; 2] = ["nova.debug.presentation", "nova.debug.model"];

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_owned()
    }

    /// `EnvFilter` directives for the configured level. A bare level is
    /// scoped to this library's targets; anything else is used verbatim.
    pub fn directives(&self) -> String {
        let level = self.level.trim();
        let level = if level.is_empty() { "info" } else { level };
        match level.parse::<LevelFilter>() {
            Ok(level) => {
                let level = level.to_string().to_ascii_lowercase();
                LOG_TARGETS
                    .iter()
                    .map(|target| format!("{target}={level}"))
                    .collect::<Vec<_>>()
                    .join(",")
            }
            Err(_) => level.to_owned(),
        }
    }

    /// Effective filter. A valid `RUST_LOG` replaces the configured level.
    pub fn env_filter(&self) -> EnvFilter {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return filter;
        }
        EnvFilter::try_new(self.directives())
            .unwrap_or_else(|_| EnvFilter::default().add_directive(LevelFilter::INFO.into()))
    }
}

static TRACING_INIT: Once = Once::new();

/// Installs a global stderr `tracing` subscriber.
///
/// Only the first call in a process has an effect; a subscriber installed
/// elsewhere beforehand is left in place.
pub fn init_tracing(config: &LoggingConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::Layer;

    TRACING_INIT.call_once(|| {
        let filter = config.env_filter();
        let layer: Box<dyn Layer<_> + Send + Sync> = if config.json {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .boxed()
        } else {
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .boxed()
        };

        let subscriber = tracing_subscriber::registry().with(filter).with(layer);
        if tracing::subscriber::set_global_default(subscriber).is_ok() {
            tracing::debug!(
                target: "nova.debug.presentation",
                json = config.json,
                "tracing initialized"
            );
        }
    });
}
