//! Error types

use std::path::PathBuf;

use crate::api::QueryError;

/// Fatal errors of a run
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid arguments: {0}")]
    Argument(String),

    #[error("Failed on parse `{}`: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("Overpass API query for batch {batch} failed after {attempts} tries: {source}")]
    Query {
        batch: usize,
        attempts: u32,
        #[source]
        source: QueryError,
    },

    #[error("Failed on write `{}`: {reason}", path.display())]
    Write { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
