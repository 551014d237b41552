//! Top-level errors.

use std::path::PathBuf;

use thiserror::Error;

use crate::vschema;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    VSchema(#[from] vschema::Error),

    #[error("\"{}\": {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}
