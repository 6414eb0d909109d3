use thiserror::Error;

use super::config::ConfigError;
use crate::core::io::tsv::InteractionFileError;
use std::path::PathBuf;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Seed interaction file not found: {}", path.display())]
    MissingSeedFile { path: PathBuf },

    #[error("Failed to read interaction file '{}': {source}", path.display())]
    InteractionFile {
        path: PathBuf,
        #[source]
        source: InteractionFileError,
    },

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}
