//! Logger configuration via `safelog.toml`
//!
//! A missing key falls back to its default, so an empty file is a valid
//! config. Unknown sink names are rejected when the file is loaded.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};
use crate::options::{StringifyOptions, UNKNOWN_ERROR_SENTINEL, UNKNOWN_OBJECT_SENTINEL};

/// Config file name looked up by callers that keep one next to their binary
pub const CONFIG_FILE_NAME: &str = "safelog.toml";

/// Where log records go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkKind {
    /// Standard output / standard error
    Console,
    /// `tracing` events (info / error)
    Tracing,
}

/// Logger configuration loaded from `safelog.toml`.
///
/// # Example
///
/// ```toml
/// sink = "console"
///
/// [stringify]
/// indent = 2
/// max_depth = 10000
/// cycle_policy = "any_repeat"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafeLogConfig {
    /// Sink name: `"console"` (default) or `"tracing"`.
    #[serde(default = "default_sink_str")]
    pub sink: String,
    /// Serializer options.
    #[serde(default)]
    pub stringify: StringifyOptions,
    /// Fallback text for `safe_log`.
    #[serde(default = "default_unknown_object")]
    pub unknown_object_sentinel: String,
    /// Fallback text for `safe_error_log`.
    #[serde(default = "default_unknown_error")]
    pub unknown_error_sentinel: String,
}

fn default_sink_str() -> String {
    "console".to_string()
}

fn default_unknown_object() -> String {
    UNKNOWN_OBJECT_SENTINEL.to_string()
}

fn default_unknown_error() -> String {
    UNKNOWN_ERROR_SENTINEL.to_string()
}

impl Default for SafeLogConfig {
    fn default() -> Self {
        Self {
            sink: default_sink_str(),
            stringify: StringifyOptions::default(),
            unknown_object_sentinel: default_unknown_object(),
            unknown_error_sentinel: default_unknown_error(),
        }
    }
}

impl SafeLogConfig {
    /// Parse the sink string into a [`SinkKind`].
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not `"console"` or `"tracing"`.
    pub fn sink_kind(&self) -> Result<SinkKind> {
        match self.sink.as_str() {
            "console" => Ok(SinkKind::Console),
            "tracing" => Ok(SinkKind::Tracing),
            other => Err(Error::InvalidConfig(format!(
                "unknown sink '{}', expected \"console\" or \"tracing\"",
                other
            ))),
        }
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# safelog configuration
#
# Sink: "console" (default) or "tracing"
#   "console" = safe_log -> stdout, safe_error_log -> stderr
#   "tracing" = safe_log -> info!, safe_error_log -> error!
sink = "console"

# Fallback text when a value cannot be described at all
unknown_object_sentinel = "[Unknown Object]"
unknown_error_sentinel = "[Unknown Error]"

[stringify]
# Spaces per nesting level (0 = compact, clamped to 10)
indent = 2
# Deeper values fall back to textual coercion
max_depth = 10000
# "any_repeat" (default): every repeated object collapses to the sentinel
# "ancestors": only true back-edges collapse
cycle_policy = "any_repeat"
# Render NaN / Infinity as null instead of falling back
non_finite_as_null = false
circular_sentinel = "[Circular Reference]"
unserializable_sentinel = "[Unserializable Object]"
"#
    }

    /// Parse config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or names an unknown sink.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SafeLogConfig = toml::from_str(content)?;
        // Validate the sink value eagerly
        config.sink_kind()?;
        Ok(config)
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&content)
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| Error::Io {
                path: path.to_path_buf(),
                source: e,
            })?;
        }
        Ok(())
    }
}
