use std::{io, path::PathBuf};

use thiserror::Error;

use crate::recipe::RecipeErrors;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Failed to read profile {}: {source}", .path.display())]
    ReadProfile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid profile JSON {}: {source}", .path.display())]
    ParseProfile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to save profile {}: {source}", .path.display())]
    WriteProfile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{flag} needs {needs}")]
    MissingInclusion {
        flag: &'static str,
        needs: &'static str,
    },

    #[error(transparent)]
    Recipe(#[from] RecipeErrors),
}
