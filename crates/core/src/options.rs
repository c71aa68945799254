//! Serializer options and sentinel literals
//!
//! ## Defaults
//!
//! | Option | Default | Constant |
//! |--------|---------|----------|
//! | indent | 2 spaces | [`DEFAULT_INDENT`] |
//! | max depth | 10,000 levels | [`DEFAULT_MAX_DEPTH`] |
//! | cycle policy | any repeat | [`CyclePolicy::AnyRepeat`] |
//! | circular sentinel | `[Circular Reference]` | [`CIRCULAR_SENTINEL`] |
//! | unserializable sentinel | `[Unserializable Object]` | [`UNSERIALIZABLE_SENTINEL`] |

use serde::{Deserialize, Serialize};

/// Default indentation width
pub const DEFAULT_INDENT: usize = 2;

/// Widest indentation accepted; wider requests are clamped
pub const MAX_INDENT: usize = 10;

/// Default nesting limit (levels)
///
/// Walks grow their stack on demand up to this depth; deeper values fault in
/// the structural tier.
pub const DEFAULT_MAX_DEPTH: usize = 10_000;

/// Emitted in place of an already-visited composite
pub const CIRCULAR_SENTINEL: &str = "[Circular Reference]";

/// Returned when both structural rendering and coercion fault
pub const UNSERIALIZABLE_SENTINEL: &str = "[Unserializable Object]";

/// Logged by `safe_log` when nothing else can describe the value
pub const UNKNOWN_OBJECT_SENTINEL: &str = "[Unknown Object]";

/// Logged by `safe_error_log` when nothing else can describe the value
pub const UNKNOWN_ERROR_SENTINEL: &str = "[Unknown Error]";

/// Which repeat encounters count as circular
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CyclePolicy {
    /// Every identity stays visited for the whole call. Shared but acyclic
    /// sub-objects collapse to the sentinel on their second occurrence.
    #[default]
    AnyRepeat,
    /// Only identities on the current path count. Shared siblings render in
    /// full; true back-edges still collapse.
    ///
    /// A shared node is walked once per path that reaches it, so output grows
    /// with the number of paths, not the number of nodes. A chain where each
    /// node holds the next one twice renders 2^n leaves.
    Ancestors,
}

/// Options for a serialization pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StringifyOptions {
    /// Spaces per nesting level (0 = compact; clamped to [`MAX_INDENT`])
    pub indent: usize,
    /// Maximum nesting depth before the structural tier faults
    pub max_depth: usize,
    /// Repeat-identity handling
    pub cycle_policy: CyclePolicy,
    /// Render NaN and infinities as `null` instead of faulting
    pub non_finite_as_null: bool,
    /// Text substituted for a repeated identity
    pub circular_sentinel: String,
    /// Text returned when every tier faults
    pub unserializable_sentinel: String,
}

impl Default for StringifyOptions {
    fn default() -> Self {
        StringifyOptions {
            indent: DEFAULT_INDENT,
            max_depth: DEFAULT_MAX_DEPTH,
            cycle_policy: CyclePolicy::AnyRepeat,
            non_finite_as_null: false,
            circular_sentinel: CIRCULAR_SENTINEL.to_string(),
            unserializable_sentinel: UNSERIALIZABLE_SENTINEL.to_string(),
        }
    }
}

impl StringifyOptions {
    /// Options with the given indentation and defaults elsewhere
    pub fn with_indent(indent: usize) -> Self {
        StringifyOptions {
            indent,
            ..Default::default()
        }
    }

    /// Indentation after clamping to [`MAX_INDENT`]
    pub fn effective_indent(&self) -> usize {
        self.indent.min(MAX_INDENT)
    }

    /// Set the cycle policy
    pub fn cycle_policy(mut self, policy: CyclePolicy) -> Self {
        self.cycle_policy = policy;
        self
    }

    /// Set the nesting limit
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = StringifyOptions::default();
        assert_eq!(opts.indent, 2);
        assert_eq!(opts.max_depth, 10_000);
        assert_eq!(opts.cycle_policy, CyclePolicy::AnyRepeat);
        assert!(!opts.non_finite_as_null);
        assert_eq!(opts.circular_sentinel, "[Circular Reference]");
        assert_eq!(opts.unserializable_sentinel, "[Unserializable Object]");
    }

    #[test]
    fn test_indent_clamped() {
        assert_eq!(StringifyOptions::with_indent(4).effective_indent(), 4);
        assert_eq!(StringifyOptions::with_indent(40).effective_indent(), 10);
        assert_eq!(StringifyOptions::with_indent(0).effective_indent(), 0);
    }

    #[test]
    fn test_builder_methods() {
        let opts = StringifyOptions::default()
            .cycle_policy(CyclePolicy::Ancestors)
            .max_depth(8);
        assert_eq!(opts.cycle_policy, CyclePolicy::Ancestors);
        assert_eq!(opts.max_depth, 8);
    }

    #[test]
    fn test_partial_deserialize_fills_defaults() {
        let opts: StringifyOptions = serde_json::from_str(r#"{"indent": 4}"#).unwrap();
        assert_eq!(opts.indent, 4);
        assert_eq!(opts.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_cycle_policy_snake_case() {
        let p: CyclePolicy = serde_json::from_str(r#""ancestors""#).unwrap();
        assert_eq!(p, CyclePolicy::Ancestors);
        assert_eq!(
            serde_json::to_string(&CyclePolicy::AnyRepeat).unwrap(),
            r#""any_repeat""#
        );
    }
}
