use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum PanresError {
    #[error("failed to read config file at {0}")]
    ConfigRead(PathBuf),

    #[error("failed to parse JSON config: {0}")]
    ConfigParse(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("ontology download failed: {0}")]
    DownloadHttp(String),

    #[error("ontology server returned status {status}: {message}")]
    DownloadStatus { status: u16, message: String },

    #[error("failed to read ontology file: {0}")]
    OntologyRead(String),

    #[error("failed to parse ontology: {0}")]
    OntologyParse(String),

    #[error("failed to read FASTA file: {0}")]
    FastaRead(String),

    #[error("failed to serialize document: {0}")]
    Serialize(String),

    #[error("filesystem error: {0}")]
    Filesystem(String),
}

impl PanresError {
    /// Process exit status: 2 when the configuration is unusable, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        match self {
            PanresError::ConfigRead(_)
            | PanresError::ConfigParse(_)
            | PanresError::InvalidConfig(_) => 2,
            _ => 1,
        }
    }
}
