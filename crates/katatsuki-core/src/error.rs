//! Errors from opening and parsing files.
//!
//! The core components never fail. Only the `probe` backend, which touches
//! the filesystem, produces these.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("file {0:?} not found")]
    NotFound(PathBuf),

    #[error("file {0:?} is not a recognized audio container")]
    Unsupported(PathBuf),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "probe")]
    #[error("parse error: {0}")]
    Parse(#[from] lofty::error::LoftyError),
}

pub type Result<T> = std::result::Result<T, Error>;
