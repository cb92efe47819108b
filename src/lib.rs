//! Structural value matching for Rust
//!
//! This library selects the first of an ordered list of declarative patterns
//! that structurally matches a runtime value, extracts captured sub-values and
//! invokes the associated callback with them: a runtime `match` over
//! dynamically-typed data.
//!
//! # Example
//!
//! ```
//! use valmatch::{capture, declare, otherwise, Matcher, Template, Value};
//! use serde_json::json;
//!
//! # fn example() -> valmatch::Result<()> {
//! let matcher = Matcher::new()
//!     .case(declare(json!({"kind": "point"})).then_value("a point"))
//!     .case(declare(Template::mapping([("x", capture()), ("y", capture())]))
//!         .then(|args| Value::from(args.len())))
//!     .case(otherwise().then_value("something else"));
//!
//! let value = Value::from(json!({"x": 1, "y": 2}));
//! assert_eq!(matcher.dispatch(&value)?, Some(Value::from(2)));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! # Guards
//!
//! ```
//! use valmatch::{declare_type, dispatch, TypeTag, Value};
//!
//! let sign = [declare_type(TypeTag::Number)
//!     .guard(|v| v.as_f64().unwrap_or(0.0) < 0.0)
//!     .then_value("neg")
//!     .otherwise()
//!     .then_value("pos")
//!     .build()];
//!
//! assert_eq!(dispatch(&Value::from(-1), &sign).unwrap(), Some(Value::from("neg")));
//! assert_eq!(dispatch(&Value::from(42), &sign).unwrap(), Some(Value::from("pos")));
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]

// Re-export commonly used items
pub use captures::Captures;
pub use config::{MatchConfig, MatchConfigBuilder, RegexLimits};
pub use declaration::{
    declare, declare_type, declare_typed, identity, otherwise, Callback, Declaration,
    DeclarationBuilder, GuardBuilder, GuardChain, Part,
};
pub use dispatch::{dispatch, Matcher};
pub use error::{ErrorContext, MatchError, Result};
pub use pattern::{
    any, capture, capture_named, is, rest, CaptureMarker, Predicate, RegexTemplate, Template,
    TypeTag, ValuePredicate,
};
pub use value::{Class, Object, ObjectBuilder, RegexValue, Selector, Value};

/// Runtime value model
pub mod value;

/// Pattern value model
pub mod pattern;

/// Structural matching of values against templates
pub mod matcher;

/// Capture collection
pub mod captures;

/// Declarations, callbacks and guard chains
pub mod declaration;

/// First-match dispatch
pub mod dispatch;

/// Configuration
pub mod config;

/// Error types
pub mod error;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the tracing subscriber with default settings
///
/// Filtering follows `RUST_LOG`; dispatch decisions are logged at `debug`
/// and per-template evaluation at `trace`.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();
}
