//! Pattern declarations
//!
//! A [`Declaration`] is one candidate arm of a match: a type tag, an optional
//! template, an optional filter predicate, a default callback and an optional
//! guard chain. Declarations are built with [`declare`] and friends, or
//! normalized from the positional literal form via [`Declaration::literal`].

pub mod callback;
pub mod guard;
pub mod literal;

pub use callback::{identity, Callback};
pub use guard::{GuardArm, GuardChain};
pub use literal::Part;

use crate::config::RegexLimits;
use crate::error::Result;
use crate::pattern::{Predicate, Template, TypeTag};
use crate::value::Value;

/// One candidate arm evaluated by the dispatcher
#[derive(Debug, Clone, Default)]
pub struct Declaration {
    tag: TypeTag,
    template: Option<Template>,
    filter: Option<Predicate>,
    callback: Callback,
    guards: GuardChain,
    malformed: Option<String>,
}

impl Declaration {
    /// Required runtime kind
    pub fn tag(&self) -> &TypeTag {
        &self.tag
    }

    /// Structural template, if any
    pub fn template(&self) -> Option<&Template> {
        self.template.as_ref()
    }

    /// Extra predicate evaluated after structural success
    pub fn filter(&self) -> Option<&Predicate> {
        self.filter.as_ref()
    }

    /// Default callback, used when there is no guard chain
    pub fn callback(&self) -> &Callback {
        &self.callback
    }

    /// Guard chain
    pub fn guards(&self) -> &GuardChain {
        &self.guards
    }

    /// Why this declaration can never match, if it was built from a bad literal
    pub fn malformed(&self) -> Option<&str> {
        self.malformed.as_deref()
    }

    pub(crate) fn relimit(&mut self, limits: &RegexLimits) {
        if let Some(template) = &mut self.template {
            template.relimit(limits);
        }
    }

    pub(crate) fn never(reason: impl Into<String>) -> Self {
        Self {
            malformed: Some(reason.into()),
            ..Self::default()
        }
    }
}

/// Declaration with its type tag inferred from `template`
pub fn declare(template: impl Into<Template>) -> DeclarationBuilder {
    let template = template.into();
    DeclarationBuilder::new(template.infer_tag(), Some(template))
}

/// Declaration matching on type tag alone
pub fn declare_type(tag: impl Into<TypeTag>) -> DeclarationBuilder {
    DeclarationBuilder::new(tag.into(), None)
}

/// Declaration with an explicit type tag and a template
pub fn declare_typed(tag: impl Into<TypeTag>, template: impl Into<Template>) -> DeclarationBuilder {
    DeclarationBuilder::new(tag.into(), Some(template.into()))
}

/// Match-anything declaration
pub fn otherwise() -> DeclarationBuilder {
    DeclarationBuilder::new(TypeTag::Any, None)
}

/// Builder for declarations
#[derive(Debug, Clone)]
pub struct DeclarationBuilder {
    declaration: Declaration,
}

impl DeclarationBuilder {
    fn new(tag: TypeTag, template: Option<Template>) -> Self {
        Self {
            declaration: Declaration {
                tag,
                template,
                ..Declaration::default()
            },
        }
    }

    /// Require an extra predicate after the template matches
    pub fn filter<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.declaration.filter = Some(Predicate::new(f));
        self
    }

    /// Require an extra predicate object after the template matches
    pub fn filter_with(mut self, predicate: Predicate) -> Self {
        self.declaration.filter = Some(predicate);
        self
    }

    /// Set the default callback
    pub fn then<F>(self, f: F) -> Self
    where
        F: Fn(Vec<Value>) -> Value + Send + Sync + 'static,
    {
        self.then_callback(Callback::new(f))
    }

    /// Set a fallible default callback
    pub fn then_try<F>(self, f: F) -> Self
    where
        F: Fn(Vec<Value>) -> Result<Value> + Send + Sync + 'static,
    {
        self.then_callback(Callback::try_new(f))
    }

    /// Set a constant result
    pub fn then_value(self, value: impl Into<Value>) -> Self {
        self.then_callback(Callback::constant(value))
    }

    /// Set the default callback from a prepared [`Callback`]
    pub fn then_callback(mut self, callback: Callback) -> Self {
        self.declaration.callback = callback;
        self
    }

    /// Start a guard arm
    pub fn guard<F>(self, f: F) -> GuardBuilder
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.guard_with(Predicate::new(f))
    }

    /// Start a guard arm from a prepared [`Predicate`]
    pub fn guard_with(self, predicate: Predicate) -> GuardBuilder {
        GuardBuilder {
            parent: self,
            predicate,
        }
    }

    /// Append a match-anything guard arm; place it last
    pub fn otherwise(self) -> GuardBuilder {
        self.guard_with(Predicate::always())
    }

    /// Finish the declaration
    pub fn build(self) -> Declaration {
        self.declaration
    }
}

impl From<DeclarationBuilder> for Declaration {
    fn from(builder: DeclarationBuilder) -> Self {
        builder.build()
    }
}

/// Pending guard arm waiting for its callback
#[derive(Debug, Clone)]
pub struct GuardBuilder {
    parent: DeclarationBuilder,
    predicate: Predicate,
}

impl GuardBuilder {
    /// Complete the arm with a function
    pub fn then<F>(self, f: F) -> DeclarationBuilder
    where
        F: Fn(Vec<Value>) -> Value + Send + Sync + 'static,
    {
        self.then_callback(Callback::new(f))
    }

    /// Complete the arm with a fallible function
    pub fn then_try<F>(self, f: F) -> DeclarationBuilder
    where
        F: Fn(Vec<Value>) -> Result<Value> + Send + Sync + 'static,
    {
        self.then_callback(Callback::try_new(f))
    }

    /// Complete the arm with a constant
    pub fn then_value(self, value: impl Into<Value>) -> DeclarationBuilder {
        self.then_callback(Callback::constant(value))
    }

    /// Complete the arm with a prepared [`Callback`]
    pub fn then_callback(self, callback: Callback) -> DeclarationBuilder {
        let mut parent = self.parent;
        parent.declaration.guards.push(self.predicate, callback);
        parent
    }
}
