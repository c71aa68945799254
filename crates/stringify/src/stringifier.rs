//! Three-tier serializer
//!
//! 1. Structural JSON rendering with cycle substitution.
//! 2. Generic textual coercion if tier 1 faults.
//! 3. The unserializable sentinel if tier 2 faults as well.
//!
//! Panics raised by host accessors are caught and treated as faults, so
//! [`Stringifier::stringify`] always returns a string. A caught panic prints
//! nothing: the panic hook stays silent on threads inside [`catch_fault`].

use std::cell::Cell;
use std::panic::{self, catch_unwind, AssertUnwindSafe};
use std::sync::Once;

use safelog_core::{Fault, StringifyOptions, Value};
use tracing::debug;

use crate::{coerce, structural};

/// Which tier produced a rendering
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Tier 1 succeeded
    Structural,
    /// Tier 1 faulted; the text is the coerced form
    Coerced {
        /// Fault raised by tier 1
        fault: Fault,
    },
    /// Both tiers faulted; the text is the sentinel
    Sentinel {
        /// Fault raised by tier 1
        structural: Fault,
        /// Fault raised by tier 2
        coercion: Fault,
    },
}

/// Text plus the tier that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct Rendering {
    /// Rendered text
    pub text: String,
    /// Tier that produced `text`
    pub outcome: Outcome,
}

/// Fault-proof serializer
#[derive(Debug, Clone, Default)]
pub struct Stringifier {
    options: StringifyOptions,
}

impl Stringifier {
    /// Create a serializer with the given options
    pub fn new(options: StringifyOptions) -> Self {
        Self { options }
    }

    /// Default options with a specific indentation
    pub fn with_indent(indent: usize) -> Self {
        Self::new(StringifyOptions::with_indent(indent))
    }

    /// Options in use
    pub fn options(&self) -> &StringifyOptions {
        &self.options
    }

    /// Render `value`, never failing
    pub fn stringify(&self, value: &Value) -> String {
        self.render(value).text
    }

    /// Render `value` and report which tier produced the text
    pub fn render(&self, value: &Value) -> Rendering {
        let structural = match self.try_structural(value) {
            Ok(text) => {
                return Rendering {
                    text,
                    outcome: Outcome::Structural,
                }
            }
            Err(fault) => fault,
        };
        debug!(fault = %structural, "structural rendering failed, coercing");

        match self.try_coerce(value) {
            Ok(text) => Rendering {
                text,
                outcome: Outcome::Coerced { fault: structural },
            },
            Err(coercion) => {
                debug!(fault = %coercion, "coercion failed, using sentinel");
                Rendering {
                    text: self.options.unserializable_sentinel.clone(),
                    outcome: Outcome::Sentinel {
                        structural,
                        coercion,
                    },
                }
            }
        }
    }

    /// Tier 1 alone
    ///
    /// # Errors
    ///
    /// Returns the fault (or caught panic) that stopped the walk.
    pub fn try_structural(&self, value: &Value) -> Result<String, Fault> {
        guarded(|| structural::render(value, &self.options))
    }

    /// Tier 2 alone
    ///
    /// # Errors
    ///
    /// Returns the fault (or caught panic) that stopped the coercion.
    pub fn try_coerce(&self, value: &Value) -> Result<String, Fault> {
        guarded(|| coerce::coerce(value, self.options.max_depth))
    }
}

thread_local! {
    /// Nesting count of `catch_fault` calls on this thread
    static QUIET: Cell<usize> = const { Cell::new(0) };
}

/// Run `f`, turning a panic into [`Fault::Panicked`].
///
/// While `f` runs, panics on this thread skip the process panic hook, so
/// nothing is printed. Other threads keep the hook that was installed.
///
/// # Errors
///
/// Returns the panic payload's message as [`Fault::Panicked`].
pub fn catch_fault<T, F>(f: F) -> Result<T, Fault>
where
    F: FnOnce() -> T,
{
    install_quiet_hook();
    QUIET.with(|quiet| quiet.set(quiet.get() + 1));
    let result = catch_unwind(AssertUnwindSafe(f));
    QUIET.with(|quiet| quiet.set(quiet.get() - 1));
    result.map_err(|payload| Fault::from_panic(&*payload))
}

/// True while a [`catch_fault`] call is running on this thread
pub fn is_quiet() -> bool {
    QUIET.try_with(|quiet| quiet.get() > 0).unwrap_or(false)
}

/// Wrap the current hook once; it is skipped while [`is_quiet`] holds
fn install_quiet_hook() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !is_quiet() {
                previous(info);
            }
        }));
    });
}

/// Run a fallible renderer under [`catch_fault`]
pub(crate) fn guarded<F>(f: F) -> Result<String, Fault>
where
    F: FnOnce() -> Result<String, Fault>,
{
    catch_fault(f).and_then(|result| result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use safelog_core::{HostRef, HostValue, Object};

    struct Panicky;

    impl HostValue for Panicky {
        fn to_value(&self) -> Result<Value, Fault> {
            panic!("accessor exploded")
        }

        fn coerce(&self) -> Result<String, Fault> {
            panic!("toString exploded")
        }
    }

    struct CoercibleOnly;

    impl HostValue for CoercibleOnly {
        fn type_name(&self) -> &str {
            "Socket"
        }

        fn to_value(&self) -> Result<Value, Fault> {
            Err(Fault::Unrepresentable("native handle".into()))
        }
    }

    #[test]
    fn test_structural_outcome() {
        let r = Stringifier::with_indent(0).render(&Value::Int(5));
        assert_eq!(r.text, "5");
        assert_eq!(r.outcome, Outcome::Structural);
    }

    #[test]
    fn test_non_finite_coerced() {
        let r = Stringifier::default().render(&Value::Float(f64::INFINITY));
        assert_eq!(r.text, "Infinity");
        assert!(matches!(
            r.outcome,
            Outcome::Coerced {
                fault: Fault::NonFinite(_)
            }
        ));
    }

    #[test]
    fn test_host_falls_back_to_its_coercion() {
        let v = Value::Host(HostRef::new(CoercibleOnly));
        assert_eq!(Stringifier::default().stringify(&v), "[object Socket]");
    }

    #[test]
    fn test_panics_become_sentinel() {
        let v = Value::Host(HostRef::new(Panicky));
        let r = Stringifier::default().render(&v);
        assert_eq!(r.text, "[Unserializable Object]");
        match r.outcome {
            Outcome::Sentinel {
                structural,
                coercion,
            } => {
                assert_eq!(structural, Fault::Panicked("accessor exploded".into()));
                assert_eq!(coercion, Fault::Panicked("toString exploded".into()));
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_custom_sentinels() {
        let options = StringifyOptions {
            indent: 0,
            circular_sentinel: "<cycle>".into(),
            unserializable_sentinel: "<broken>".into(),
            ..Default::default()
        };
        let s = Stringifier::new(options);

        let obj = Object::new();
        obj.set("me", obj.clone());
        assert_eq!(s.stringify(&Value::Object(obj.clone())), r#"{"me":"<cycle>"}"#);
        obj.clear();

        let v = Value::Host(HostRef::new(Panicky));
        assert_eq!(s.stringify(&v), "<broken>");
    }

    #[test]
    fn test_guarded_passes_errors_through() {
        let r = guarded(|| Err(Fault::Encoding("x".into())));
        assert_eq!(r, Err(Fault::Encoding("x".into())));
    }

    #[test]
    fn test_catch_fault_is_quiet_only_inside() {
        assert!(!is_quiet());
        let inner = catch_fault(|| {
            let nested = catch_fault(is_quiet);
            (is_quiet(), nested)
        });
        assert_eq!(inner, Ok((true, Ok(true))));
        assert!(!is_quiet());
    }

    #[test]
    fn test_catch_fault_resets_after_panic() {
        let r: Result<(), Fault> = catch_fault(|| panic!("boom"));
        assert_eq!(r, Err(Fault::Panicked("boom".into())));
        assert!(!is_quiet());
    }

    #[test]
    fn test_quiet_is_per_thread() {
        let other = catch_fault(|| std::thread::spawn(is_quiet).join().unwrap_or(true));
        assert_eq!(other, Ok(false));
    }
}
