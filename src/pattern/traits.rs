//! Core traits for caller-supplied tests

use crate::error::Result;
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// Trait for value predicates
///
/// Implemented by type tags and by closures wrapped in [`Predicate`]; callers
/// can implement it for reusable matchers of their own.
pub trait ValuePredicate: Send + Sync {
    /// Test a value; errors propagate out of `dispatch` unchanged
    fn test(&self, value: &Value) -> Result<bool>;

    /// Get a human-readable description of the predicate
    fn describe(&self) -> String {
        "predicate".to_string()
    }
}

/// Shared, cloneable predicate
#[derive(Clone)]
pub struct Predicate(Arc<dyn ValuePredicate>);

struct FnPredicate<F>(F);

impl<F> ValuePredicate for FnPredicate<F>
where
    F: Fn(&Value) -> Result<bool> + Send + Sync,
{
    fn test(&self, value: &Value) -> Result<bool> {
        (self.0)(value)
    }
}

struct Always;

impl ValuePredicate for Always {
    fn test(&self, _value: &Value) -> Result<bool> {
        Ok(true)
    }

    fn describe(&self) -> String {
        "otherwise".to_string()
    }
}

impl Predicate {
    /// Wrap an infallible closure
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self::try_new(move |value| Ok(f(value)))
    }

    /// Wrap a fallible closure
    pub fn try_new<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Result<bool> + Send + Sync + 'static,
    {
        Predicate(Arc::new(FnPredicate(f)))
    }

    /// Wrap any predicate implementation
    pub fn from_impl<P: ValuePredicate + 'static>(predicate: P) -> Self {
        Predicate(Arc::new(predicate))
    }

    /// Predicate that accepts every value
    pub fn always() -> Self {
        Predicate(Arc::new(Always))
    }

    /// Evaluate the predicate
    pub fn test(&self, value: &Value) -> Result<bool> {
        self.0.test(value)
    }

    /// Description of the wrapped predicate
    pub fn describe(&self) -> String {
        self.0.describe()
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Predicate({})", self.0.describe())
    }
}
