// keyval/src/error.rs

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that turns a run into a hard failure.
///
/// A document that parses but does not satisfy its schema is NOT an error;
/// that is reported through the boolean group outcome instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed token '{token}': expected 'key:path'")]
    MalformedToken { token: String },

    #[error("could not read '{}' for key '{key}': {source}", path.display())]
    Read { key: String, path: PathBuf, #[source] source: std::io::Error },

    #[error("failed to parse JSON in '{}' for key '{key}': {source}", path.display())]
    Parse { key: String, path: PathBuf, #[source] source: serde_json::Error },

    #[error("invalid schema '{}' for key '{key}': {reason}", path.display())]
    SchemaCompile { key: String, path: PathBuf, reason: String },

    #[error(transparent)]
    ConfigShape(#[from] ShapeError),

    #[error("validation task for key '{key}' did not complete: {source}")]
    Task { key: String, #[source] source: tokio::task::JoinError },
}

/// The two input lists, or a group built from them, do not have a shape we can validate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("the {list} list is empty")]
    EmptyList { list: &'static str },

    #[error("your file list ({files}) should be equal to or longer than your schema list ({schemas})")]
    LengthMismatch { files: usize, schemas: usize },

    #[error("no schema given for key '{key}'")]
    MissingSchema { key: String },

    #[error("no files to validate for key '{key}'")]
    NoFiles { key: String },
}

impl Error {
    /// The group key the error belongs to, when it is tied to one.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Read { key, .. }
            | Self::Parse { key, .. }
            | Self::SchemaCompile { key, .. }
            | Self::Task { key, .. } => Some(key),
            Self::ConfigShape(ShapeError::MissingSchema { key } | ShapeError::NoFiles { key }) => Some(key),
            Self::MalformedToken { .. } | Self::ConfigShape(_) => None,
        }
    }

    /// The file or schema path the error names, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } | Self::SchemaCompile { path, .. } => Some(path),
            _ => None,
        }
    }
}
