//! Error definitions.
use std::io;
use std::path::PathBuf;
use std::result;

/// A specialized Result type for this library.
pub type Result<T, E = DedupError> = result::Result<T, E>;

/// Errors in this library.
#[derive(Debug, thiserror::Error)]
pub enum DedupError {
    /// The configuration is invalid. Raised before any file is touched.
    #[error("ConfigError: {0}")]
    Config(String),

    /// Reading an input or writing an output failed.
    #[error("IoError: {}: {source}", .path.display())]
    Io {
        /// Path of the file or directory being accessed.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },

    /// Two inputs would be written to the same output file.
    #[error(
        "CollisionError: {} and {} share the output name {name:?}",
        .first.display(),
        .second.display()
    )]
    Collision {
        /// Shared base name.
        name: String,
        /// Earlier input path.
        first: PathBuf,
        /// Later input path.
        second: PathBuf,
    },

    /// The input path has no base name to write the output under.
    #[error("InputError: {} has no file name", .0.display())]
    InvalidPath(PathBuf),

    /// Signatures and the bucket table disagree.
    #[error("IndexError: {0}")]
    Index(#[from] anyhow::Error),
}

impl DedupError {
    pub(crate) fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn io<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
