use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BundleError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Non-zero exit status ({status}) for command '{command}': {output}")]
    CommandFailed {
        status: ExitStatus,
        command: String,
        output: String,
    },

    #[error("Failed to start command '{command}': {source}")]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Scratch directory setup failed at {path}: {reason}")]
    ScratchDirectory { path: PathBuf, reason: String },

    #[error("Bootstrap script not found at {path}: {reason}")]
    BootstrapScript { path: PathBuf, reason: String },

    #[error("Failed to create archive {path}: {reason}")]
    Archive { path: PathBuf, reason: String },

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Manifest validation failed: {details}")]
    ManifestValidation { details: String },

    #[error("Invalid command-line arguments: {details}")]
    CliArgumentValidation { details: String },

    #[error("Background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("Unexpected error: {0}")]
    Unexpected(#[from] eyre::Report),
}
