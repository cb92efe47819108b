//! Callbacks invoked with the arguments of a successful match

use crate::error::Result;
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

type CallbackFn = dyn Fn(Vec<Value>) -> Result<Value> + Send + Sync;

/// What a matching declaration produces
///
/// Plain values are resolved to `Callback::Value` when the declaration is
/// built, so the dispatcher never has to inspect what it was given.
#[derive(Clone, Default)]
pub enum Callback {
    /// Return the first argument unchanged
    #[default]
    Identity,
    /// Return a constant
    Value(Value),
    /// Call a function with the capture arguments
    Function(Arc<CallbackFn>),
}

impl Callback {
    /// Wrap an infallible function
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Vec<Value>) -> Value + Send + Sync + 'static,
    {
        Callback::Function(Arc::new(move |args| Ok(f(args))))
    }

    /// Wrap a fallible function; its errors propagate out of `dispatch`
    pub fn try_new<F>(f: F) -> Self
    where
        F: Fn(Vec<Value>) -> Result<Value> + Send + Sync + 'static,
    {
        Callback::Function(Arc::new(f))
    }

    /// Constant-returning callback
    pub fn constant(value: impl Into<Value>) -> Self {
        Callback::Value(value.into())
    }

    /// Invoke with the marshalled capture arguments
    pub fn invoke(&self, args: Vec<Value>) -> Result<Value> {
        match self {
            Callback::Identity => Ok(identity(args)),
            Callback::Value(value) => Ok(value.clone()),
            Callback::Function(f) => f(args),
        }
    }
}

/// The default callback: returns its first argument unchanged
pub fn identity(args: Vec<Value>) -> Value {
    args.into_iter().next().unwrap_or_default()
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callback::Identity => write!(f, "Identity"),
            Callback::Value(value) => write!(f, "Value({})", value),
            Callback::Function(_) => write!(f, "Function"),
        }
    }
}

impl From<Value> for Callback {
    fn from(value: Value) -> Self {
        Callback::Value(value)
    }
}

impl From<&str> for Callback {
    fn from(s: &str) -> Self {
        Callback::constant(s)
    }
}

impl From<String> for Callback {
    fn from(s: String) -> Self {
        Callback::constant(s)
    }
}

impl From<bool> for Callback {
    fn from(b: bool) -> Self {
        Callback::constant(b)
    }
}

impl From<f64> for Callback {
    fn from(n: f64) -> Self {
        Callback::constant(n)
    }
}

impl From<i32> for Callback {
    fn from(n: i32) -> Self {
        Callback::constant(n)
    }
}
