//! Error types shared across the crate

use std::path::PathBuf;

use serde_json::Value;
use thiserror::Error;

/// Result type used by all fallible operations in this crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading annotation files or transforming records
#[derive(Error, Debug)]
pub enum Error {
    /// A file could not be read from disk
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line of an annotation file did not match its format's schema
    #[error("{path:?} line {line}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// A record is missing a key an operation requires
    #[error("missing required key \"{0}\"")]
    MissingKey(&'static str),

    /// Strict label mapping hit a label with no mapping entry
    #[error("no mapping found for label \"{0}\"; set keep_missing to keep labels without a mapping")]
    UnmappedLabel(String),

    /// Strict merge refused to replace an existing value
    #[error("refusing to overwrite key \"{key}\" (current value {existing}) with {replacement}")]
    OverwriteConflict {
        key: String,
        existing: Value,
        replacement: Value,
    },

    /// A loader found an interval with zero or negative duration
    #[error("found empty segment in {path:?} for file {uri} around t={time:.3}s")]
    EmptySegment {
        path: PathBuf,
        uri: String,
        time: f64,
    },

    /// A per-uri lookup file has no entry for the requested uri
    #[error("no value found for {uri} in {path:?}")]
    UnknownUri { uri: String, path: PathBuf },
}
