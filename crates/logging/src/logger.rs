//! Logger adapters
//!
//! [`SafeLogger::log`] and [`SafeLogger::error_log`] write `"{prefix} {text}"`
//! as one record. If rendering faults or panics, `text` falls back in order
//! to the value's message field, its textual coercion, and finally a fixed
//! sentinel. Nothing is returned and nothing propagates, and caught panics
//! print nothing.

use safelog_core::{
    Fault, Result, SafeLogConfig, SinkKind, StringifyOptions, Value, DEFAULT_MAX_DEPTH,
    UNKNOWN_ERROR_SENTINEL, UNKNOWN_OBJECT_SENTINEL,
};
use safelog_stringify::{catch_fault, coerce, Stringifier};
use tracing::warn;

use crate::sink::{Channel, ConsoleSink, Sink, TracingSink};

/// Turns a value into log text; may fault
pub trait Render: Send + Sync {
    /// Render `value`
    fn render_text(&self, value: &Value) -> std::result::Result<String, Fault>;
}

impl Render for Stringifier {
    fn render_text(&self, value: &Value) -> std::result::Result<String, Fault> {
        Ok(self.stringify(value))
    }
}

impl<F> Render for F
where
    F: Fn(&Value) -> std::result::Result<String, Fault> + Send + Sync,
{
    fn render_text(&self, value: &Value) -> std::result::Result<String, Fault> {
        self(value)
    }
}

/// Prefix-plus-value logger over an injected sink
pub struct SafeLogger<S = ConsoleSink, R = Stringifier> {
    sink: S,
    renderer: R,
    unknown_object: String,
    unknown_error: String,
    fallback_depth: usize,
}

impl SafeLogger {
    /// Console logger with default options
    pub fn console() -> Self {
        SafeLogger::new(ConsoleSink)
    }
}

impl<S: Sink> SafeLogger<S, Stringifier> {
    /// Logger over `sink` with default options
    pub fn new(sink: S) -> Self {
        Self::with_options(sink, StringifyOptions::default())
    }

    /// Logger over `sink` with custom serializer options
    pub fn with_options(sink: S, options: StringifyOptions) -> Self {
        let fallback_depth = options.max_depth;
        let mut logger = Self::with_renderer(sink, Stringifier::new(options));
        logger.fallback_depth = fallback_depth;
        logger
    }
}

impl SafeLogger<Box<dyn Sink>, Stringifier> {
    /// Build the logger described by `config`
    ///
    /// # Errors
    ///
    /// Returns an error if the config names an unknown sink.
    pub fn from_config(config: &SafeLogConfig) -> Result<Self> {
        let sink: Box<dyn Sink> = match config.sink_kind()? {
            SinkKind::Console => Box::new(ConsoleSink),
            SinkKind::Tracing => Box::new(TracingSink),
        };
        Ok(SafeLogger::with_options(sink, config.stringify.clone()).sentinels(
            config.unknown_object_sentinel.clone(),
            config.unknown_error_sentinel.clone(),
        ))
    }
}

impl<S: Sink, R: Render> SafeLogger<S, R> {
    /// Logger over `sink` using `renderer` as the first choice
    pub fn with_renderer(sink: S, renderer: R) -> Self {
        Self {
            sink,
            renderer,
            unknown_object: UNKNOWN_OBJECT_SENTINEL.to_string(),
            unknown_error: UNKNOWN_ERROR_SENTINEL.to_string(),
            fallback_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Replace the last-resort texts for `log` and `error_log`
    pub fn sentinels(
        mut self,
        unknown_object: impl Into<String>,
        unknown_error: impl Into<String>,
    ) -> Self {
        self.unknown_object = unknown_object.into();
        self.unknown_error = unknown_error.into();
        self
    }

    /// The sink records go to
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Write `prefix` and `value` to the standard channel
    pub fn log(&self, prefix: &str, value: &Value) {
        self.write(Channel::Standard, prefix, value, &self.unknown_object);
    }

    /// Write `prefix` and `value` to the error channel
    pub fn error_log(&self, prefix: &str, value: &Value) {
        self.write(Channel::Error, prefix, value, &self.unknown_error);
    }

    fn write(&self, channel: Channel, prefix: &str, value: &Value, unknown: &str) {
        let rendered = catch_fault(|| self.renderer.render_text(value)).and_then(|r| r);
        let text = match rendered {
            Ok(text) => text,
            Err(fault) => {
                warn!(fault = %fault, "renderer failed, describing value instead");
                self.describe(value, unknown)
            }
        };

        let line = format!("{} {}", prefix, text);
        if catch_fault(|| self.sink.emit(channel, &line)).is_err() {
            warn!(?channel, "sink panicked, record dropped");
        }
    }

    /// Message field, else coercion, else `unknown`
    fn describe(&self, value: &Value, unknown: &str) -> String {
        let message = catch_fault(|| value.message()).ok().flatten();
        if let Some(message) = message {
            return message;
        }
        match catch_fault(|| coerce(value, self.fallback_depth)) {
            Ok(Ok(text)) => text,
            _ => unknown.to_string(),
        }
    }
}
