//! Structural templates
//!
//! A [`Template`] describes what a value must look like. Raw values convert
//! into templates by kind: scalars become literals, regex values become regex
//! templates, arrays become sequence templates and objects become open
//! keyed-mapping templates. Construction never fails; a template of the wrong
//! shape for its position simply never matches.

use super::{CaptureMarker, Predicate, RegexTemplate, Slot, TypeTag};
use crate::config::RegexLimits;
use crate::dispatch::Matcher;
use crate::value::Value;
use std::sync::Arc;

/// Structural pattern node
#[derive(Debug, Clone, Default)]
pub enum Template {
    /// Matches every value
    #[default]
    Any,
    /// Scalar compared by strict equality (NaN equals NaN)
    Literal(Value),
    /// Searches strings, compares regex values by source and flags
    Regex(RegexTemplate),
    /// Element-wise sequence; a trailing `Rest` absorbs the remainder
    Sequence(Vec<Template>),
    /// Declared keys must exist and match; other keys are ignored
    Mapping(Vec<(String, Template)>),
    /// Captures the value matched by its inner template
    Capture(CaptureMarker),
    /// Absorbs remaining sequence elements, optionally capturing them;
    /// only valid as the last element of a `Sequence`
    Rest(Option<Slot>),
    /// Runtime kind test
    Type(TypeTag),
    /// Caller-supplied test
    Predicate(Predicate),
    /// Nested declaration list; its result is the captured value
    Nested(Arc<Matcher>),
}

impl Template {
    /// Literal template
    pub fn literal(value: impl Into<Value>) -> Self {
        Template::Literal(value.into())
    }

    /// Regex template under default limits
    pub fn regex(source: &str, flags: &str) -> Self {
        Template::Regex(RegexTemplate::new(source, flags))
    }

    /// Sequence template
    pub fn sequence<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Template>,
    {
        Template::Sequence(items.into_iter().map(Into::into).collect())
    }

    /// Keyed-mapping template; keys are matched (and captured) in the given order
    pub fn mapping<I, K, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
        T: Into<Template>,
    {
        Template::Mapping(
            entries
                .into_iter()
                .map(|(k, t)| (k.into(), t.into()))
                .collect(),
        )
    }

    /// Template backed by an infallible closure
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Template::Predicate(Predicate::new(f))
    }

    /// Nested sub-matcher
    pub fn nested(matcher: impl Into<Arc<Matcher>>) -> Self {
        Template::Nested(matcher.into())
    }

    /// Type tag implied by this template when a declaration omits one
    ///
    /// Regex, predicate, nested and `Any` templates discriminate on their own
    /// and impose no tag.
    pub fn infer_tag(&self) -> TypeTag {
        match self {
            Template::Literal(value) => TypeTag::of_value(value),
            Template::Sequence(_) | Template::Mapping(_) | Template::Rest(_) => TypeTag::Object,
            Template::Capture(marker) => marker.inner().infer_tag(),
            Template::Type(tag) => tag.clone(),
            Template::Any
            | Template::Regex(_)
            | Template::Predicate(_)
            | Template::Nested(_) => TypeTag::Any,
        }
    }

    /// Recompile every regex in this template under `limits`
    ///
    /// Nested matchers keep their own configuration and are left alone.
    pub(crate) fn relimit(&mut self, limits: &RegexLimits) {
        match self {
            Template::Regex(re) => re.relimit(limits),
            Template::Capture(marker) => marker.inner_mut().relimit(limits),
            Template::Sequence(items) => items.iter_mut().for_each(|item| item.relimit(limits)),
            Template::Mapping(entries) => entries
                .iter_mut()
                .for_each(|(_, template)| template.relimit(limits)),
            Template::Any
            | Template::Literal(_)
            | Template::Rest(_)
            | Template::Type(_)
            | Template::Predicate(_)
            | Template::Nested(_) => {}
        }
    }
}

impl From<Value> for Template {
    fn from(value: Value) -> Self {
        match value {
            Value::Regex(re) => Template::Regex(RegexTemplate::from(&re)),
            Value::Array(items) => Template::Sequence(items.into_iter().map(Template::from).collect()),
            Value::Object(obj) => Template::Mapping(
                obj.fields()
                    .iter()
                    .map(|(k, v)| (k.clone(), Template::from(v.clone())))
                    .collect(),
            ),
            scalar => Template::Literal(scalar),
        }
    }
}

impl From<serde_json::Value> for Template {
    fn from(json: serde_json::Value) -> Self {
        Template::from(Value::from(json))
    }
}

impl From<bool> for Template {
    fn from(b: bool) -> Self {
        Template::Literal(Value::from(b))
    }
}

impl From<f64> for Template {
    fn from(n: f64) -> Self {
        Template::Literal(Value::from(n))
    }
}

impl From<i32> for Template {
    fn from(n: i32) -> Self {
        Template::Literal(Value::from(n))
    }
}

impl From<i64> for Template {
    fn from(n: i64) -> Self {
        Template::Literal(Value::from(n))
    }
}

impl From<&str> for Template {
    fn from(s: &str) -> Self {
        Template::Literal(Value::from(s))
    }
}

impl From<String> for Template {
    fn from(s: String) -> Self {
        Template::Literal(Value::from(s))
    }
}

impl From<TypeTag> for Template {
    fn from(tag: TypeTag) -> Self {
        Template::Type(tag)
    }
}

impl From<RegexTemplate> for Template {
    fn from(re: RegexTemplate) -> Self {
        Template::Regex(re)
    }
}

impl From<Predicate> for Template {
    fn from(predicate: Predicate) -> Self {
        Template::Predicate(predicate)
    }
}

impl From<Matcher> for Template {
    fn from(matcher: Matcher) -> Self {
        Template::Nested(Arc::new(matcher))
    }
}

impl From<Arc<Matcher>> for Template {
    fn from(matcher: Arc<Matcher>) -> Self {
        Template::Nested(matcher)
    }
}

impl From<Vec<Template>> for Template {
    fn from(items: Vec<Template>) -> Self {
        Template::Sequence(items)
    }
}
