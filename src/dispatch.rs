//! Declaration dispatcher
//!
//! Evaluates declarations in order against one value and invokes the callback
//! of the first one that matches. Every declaration attempt gets a fresh
//! capture collector, so neither failed attempts nor nested matches can leak
//! captures into the arguments of the winning callback.

use crate::captures::Captures;
use crate::config::MatchConfig;
use crate::declaration::Declaration;
use crate::error::Result;
use crate::matcher::StructuralMatcher;
use crate::value::Value;
use tracing::{debug, trace};

/// Dispatch `value` against `declarations` under the default configuration
///
/// Returns `Ok(None)` when no declaration matches. Errors raised by callbacks,
/// filters or guards propagate unchanged.
pub fn dispatch(value: &Value, declarations: &[Declaration]) -> Result<Option<Value>> {
    dispatch_at(declarations, value, &MatchConfig::default())
}

pub(crate) fn dispatch_at(
    declarations: &[Declaration],
    value: &Value,
    config: &MatchConfig,
) -> Result<Option<Value>> {
    let structural = StructuralMatcher::new(config);

    for (index, declaration) in declarations.iter().enumerate() {
        if let Some(reason) = declaration.malformed() {
            trace!(index, reason, "skipping malformed declaration");
            continue;
        }

        if !declaration.tag().accepts(value) {
            trace!(index, tag = %declaration.tag(), value_type = value.type_name(), "type tag rejected value");
            continue;
        }

        let mut captures = Captures::new();
        if let Some(template) = declaration.template() {
            if !structural.matches(value, template, &mut captures, 0)? {
                trace!(index, "template rejected value");
                continue;
            }
        }

        if let Some(filter) = declaration.filter() {
            if !filter.test(value)? {
                trace!(index, "filter rejected value");
                continue;
            }
        }

        let callback = if declaration.guards().is_empty() {
            declaration.callback()
        } else {
            match declaration.guards().select(value)? {
                Some(callback) => callback,
                None => {
                    trace!(index, "no guard fired");
                    continue;
                }
            }
        };

        debug!(index, "declaration matched");
        let args = captures.into_arguments(value);
        return callback.invoke(args).map(Some);
    }

    debug!(candidates = declarations.len(), "no declaration matched");
    Ok(None)
}

/// Ordered list of declarations with its configuration
///
/// A `Matcher` is immutable once built and can be shared as a nested
/// sub-matcher through [`crate::pattern::Template::Nested`]. Regex templates
/// in added declarations are compiled under the matcher's regex limits; a
/// nested sub-matcher is evaluated under its own configuration.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    declarations: Vec<Declaration>,
    config: MatchConfig,
}

impl Matcher {
    /// Create an empty matcher with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty matcher with `config`
    pub fn with_config(config: MatchConfig) -> Self {
        Self {
            declarations: Vec::new(),
            config,
        }
    }

    /// Append a declaration
    pub fn case(mut self, declaration: impl Into<Declaration>) -> Self {
        self.push(declaration);
        self
    }

    /// Append a declaration in place
    pub fn push(&mut self, declaration: impl Into<Declaration>) {
        let mut declaration = declaration.into();
        declaration.relimit(&self.config.regex);
        self.declarations.push(declaration);
    }

    /// Declarations in evaluation order
    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    /// Active configuration
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Number of declarations
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Whether there are no declarations
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Run the first matching declaration's callback
    pub fn dispatch(&self, value: &Value) -> Result<Option<Value>> {
        dispatch_at(&self.declarations, value, &self.config)
    }
}

impl FromIterator<Declaration> for Matcher {
    fn from_iter<I: IntoIterator<Item = Declaration>>(iter: I) -> Self {
        let mut matcher = Self::new();
        iter.into_iter().for_each(|declaration| matcher.push(declaration));
        matcher
    }
}
