use thiserror::Error;

/// Errors that can occur while loading curated configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error reading the config file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// An expected table is absent from the config file
    #[error("Missing config section [{0}]")]
    MissingSection(String),

    /// A config value is not a string
    #[error("Value for '{0}' is not a string")]
    NotAString(String),

    /// A curated-list flag is neither "true" nor "false"
    #[error("Invalid flag for '{machine}': expected true or false, got '{value}'")]
    InvalidFlag { machine: String, value: String },
}
