//! Application-wide error types.
//!
//! Library modules return [`Error`] via `thiserror`, while the CLI layer
//! and `main` use `anyhow` for convenient error propagation.
//!
//! Every variant is fatal for a run: there is no per-track skip mode, so a
//! run either produces the full filtered playlist or writes nothing.
//!
//! # Example
//!
//! ```ignore
//! use playlist_dedup::error::{Error, Result};
//!
//! fn load(path: &Path) -> Result<Document> {
//!     let raw = playlist::read_source(path)?; // IO errors carry the path
//!     playlist::parse(&raw)                   // XML errors auto-convert
//! }
//! ```

use std::path::PathBuf;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The source document has no root element
    #[error("Playlist has no root element")]
    MissingRoot,

    /// XML that tokenizes but does not form a single-rooted document
    #[error("Malformed playlist: {0}")]
    MalformedDocument(String),

    /// A track lacks a field the filter must read
    #[error("Track {track} has no <{field}> element")]
    MissingRequiredField { track: usize, field: &'static str },

    /// A track location has no folder separator to split on
    #[error("Track {track} has a location without a folder separator: {location:?}")]
    MalformedLocation { track: usize, location: String },

    /// File I/O error on a known path
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// XML reading/writing error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Raw writer error (quick-xml reports sink failures as plain IO)
    #[error("Write error: {0}")]
    Write(#[from] std::io::Error),

    /// Tag or attribute name that is not valid UTF-8
    #[error("Invalid UTF-8 in playlist: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create an IO error bound to the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a missing field error for a 1-based track position.
    pub fn missing_field(track: usize, field: &'static str) -> Self {
        Self::MissingRequiredField { track, field }
    }

    /// Create a malformed document error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedDocument(message.into())
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

/// Extension trait for attaching a path to IO results.
pub trait IoResultExt<T> {
    /// Convert an IO error into [`Error::Io`] for `path`.
    fn at_path(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::result::Result<T, std::io::Error> {
    fn at_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|e| Error::io(path, e))
    }
}
