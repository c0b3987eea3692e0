use std::num::ParseIntError;

/// Errors raised while resolving a configuration, before any pixel work
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("need valid width/height or factor")]
    InvalidDimensions,

    #[error("specified scaling mode not supported: {0}")]
    InvalidScalingMethod(String),
}

/// Errors raised when parsing a colour from its hex notation
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ColourError {
    #[error("empty colour value")]
    Empty,

    #[error("invalid hex colour '{0}': only hex digits may follow the prefix")]
    InvalidDigits(String),

    #[error("invalid hex colour '{input}': {source}")]
    InvalidHex {
        input: String,
        #[source]
        source: ParseIntError,
    },
}
