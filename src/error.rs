//! Global error handling for paper-export
//!
//! Errors fall into two classes. Fatal errors abort the whole run; the rest
//! belong to a single document and are logged before moving on.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::dropbox::ApiError;

/// Global error type for paper-export operations
#[derive(Error, Debug)]
pub enum Error {
    /// Access token not present in the environment
    #[error("{0} is not set")]
    MissingCredential(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP client could not be set up
    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] ApiError),

    /// Initial folder listing failed
    #[error("Failed to list folder {path:?}: {source}")]
    Listing {
        path: String,
        #[source]
        source: ApiError,
    },

    /// Continuation of a folder listing failed
    #[error("Failed to get next page of files (cursor {cursor}): {source}")]
    ListingContinue {
        cursor: String,
        #[source]
        source: ApiError,
    },

    /// Output root could not be created
    #[error("Failed to create output directory {}: {source}", .path.display())]
    OutputRoot {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Export call for a single document failed
    #[error("Failed to export file {path}: {source}")]
    Export {
        path: String,
        #[source]
        source: ApiError,
    },

    /// Parent directory of an output file could not be created
    #[error("Failed to create directory for {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Output file could not be written
    #[error("Failed to write file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Whether this error must abort the run
    pub fn is_fatal(&self) -> bool {
        match self {
            Error::MissingCredential(_)
            | Error::Config(_)
            | Error::Client(_)
            | Error::Listing { .. }
            | Error::ListingContinue { .. }
            | Error::OutputRoot { .. } => true,
            Error::Export { .. } | Error::CreateDir { .. } | Error::Write { .. } => false,
        }
    }
}

/// Specialized Result type for paper-export operations
pub type Result<T> = std::result::Result<T, Error>;

/// Creates an Error with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::Error::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}
