use asciify::ConfigError;
use std::io;
use std::path::PathBuf;

/// Errors surfaced to the user by the front end
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("input file not specified or missing")]
    MissingInputFile,

    #[error("unsupported input type: {0}")]
    UnsupportedInputFormat(String),

    #[error("output file already exists: {}", .0.display())]
    OutputFileExists(PathBuf),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to install Ctrl+C handler: {0}")]
    Signal(#[from] ctrlc::Error),
}
