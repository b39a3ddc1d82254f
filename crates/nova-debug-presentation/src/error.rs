use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read presentation config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse presentation config: {0}")]
    Toml(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        // `Display` embeds a snippet of the input; keep the message and position only.
        let message = err.message().trim_end();
        match err.span() {
            Some(span) => ConfigError::Toml(format!("{message} (at byte {})", span.start)),
            None => ConfigError::Toml(message.to_string()),
        }
    }
}
