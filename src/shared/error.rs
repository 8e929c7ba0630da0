use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpoolqError {
    #[error("Configuration failed: {0}")]
    Config(#[from] ConfigError),

    #[error("Spool failed: {0}")]
    Spool(#[from] SpoolError),
}

/// Filesystem and console faults. These abort the current iteration.
#[derive(Error, Debug)]
pub enum SpoolError {
    #[error("Failed to list directory {}: {source}", .path.display())]
    List {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to move {} to {}: {source}", .from.display(), .to.display())]
    Move {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write report: {0}")]
    Report(#[from] io::Error),
}

impl SpoolError {
    pub fn io_kind(&self) -> io::ErrorKind {
        match self {
            SpoolError::List { source, .. }
            | SpoolError::Read { source, .. }
            | SpoolError::CreateDir { source, .. }
            | SpoolError::Move { source, .. }
            | SpoolError::Report(source) => source.kind(),
        }
    }
}

/// Messaging faults. They never leave the publisher.
#[derive(Error, Debug)]
pub enum BrokerError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Channel operation failed: {0}")]
    Channel(String),

    #[error("Transaction failed: {0}")]
    Transaction(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
