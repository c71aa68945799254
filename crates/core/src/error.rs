//! Error types for safelog
//!
//! Two families live here:
//! - [`Fault`]: raised while rendering a value. Faults never leave the
//!   serializer or the logger adapters; they select the next fallback tier.
//! - [`Error`]: raised while loading configuration. These surface normally.
//!
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for configuration operations
pub type Result<T> = std::result::Result<T, Error>;

/// A fault raised while rendering a value
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Fault {
    /// A float that has no structural representation (NaN, +/-Infinity)
    #[error("non-finite number {0} cannot be represented")]
    NonFinite(f64),

    /// Nesting went past the configured depth limit
    #[error("nesting depth exceeded limit of {limit}")]
    DepthExceeded {
        /// Configured limit
        limit: usize,
    },

    /// A property accessor failed while it was being read
    #[error("accessor for `{property}` failed: {reason}")]
    Accessor {
        /// Property that was being read
        property: String,
        /// Failure reported by the accessor
        reason: String,
    },

    /// The value has no representation in the requested form
    #[error("unrepresentable value: {0}")]
    Unrepresentable(String),

    /// A caller-supplied accessor panicked
    #[error("panicked while rendering: {0}")]
    Panicked(String),

    /// The encoder rejected the output
    #[error("encoding error: {0}")]
    Encoding(String),
}

impl Fault {
    /// Build an accessor fault
    pub fn accessor(property: impl Into<String>, reason: impl Into<String>) -> Self {
        Fault::Accessor {
            property: property.into(),
            reason: reason.into(),
        }
    }

    /// Build a fault from a payload caught by `catch_unwind`
    pub fn from_panic(payload: &(dyn std::any::Any + Send)) -> Self {
        let msg = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "(non-string panic)".to_string());
        Fault::Panicked(msg)
    }
}

impl From<serde_json::Error> for Fault {
    fn from(e: serde_json::Error) -> Self {
        Fault::Encoding(e.to_string())
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error reading or writing a config file
    #[error("I/O error on '{path}': {source}")]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// TOML parse error
    #[error("failed to parse config: {0}")]
    Parse(String),

    /// Config parsed but holds an unsupported value
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Parse(e.to_string())
    }
}
