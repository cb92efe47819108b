//! Positional literal declarations
//!
//! Front-ends that describe declarations as plain lists use the shapes
//!
//! ```text
//! [tag?, pattern?, predicate?, callback?]
//! ```
//!
//! with at least a tag or a pattern. For example `[pattern]`,
//! `[pattern, callback]`, `[tag, callback]`, `[pattern, predicate, callback]`,
//! `[tag, pattern, callback]` and `[tag, pattern, predicate, callback]`.
//! A pattern is a template, a predicate (tested against the whole value) or,
//! after a tag, another tag. Without a tag, the tag is inferred from the
//! pattern. A trailing scalar literal is a constant result. Any other shape
//! normalizes to a declaration that never matches.

use super::{Callback, Declaration};
use crate::pattern::{Predicate, Template, TypeTag};
use crate::value::Value;
use tracing::warn;

/// One element of a literal declaration
#[derive(Debug, Clone)]
pub enum Part {
    /// Type tag
    Tag(TypeTag),
    /// Structural template
    Template(Template),
    /// Filter predicate
    Predicate(Predicate),
    /// Callback
    Callback(Callback),
}

impl Part {
    fn kind(&self) -> &'static str {
        match self {
            Part::Tag(_) => "tag",
            Part::Template(_) => "template",
            Part::Predicate(_) => "predicate",
            Part::Callback(_) => "callback",
        }
    }
}

impl From<TypeTag> for Part {
    fn from(tag: TypeTag) -> Self {
        Part::Tag(tag)
    }
}

impl From<Template> for Part {
    fn from(template: Template) -> Self {
        Part::Template(template)
    }
}

impl From<Value> for Part {
    fn from(value: Value) -> Self {
        Part::Template(Template::from(value))
    }
}

impl From<&str> for Part {
    fn from(s: &str) -> Self {
        Part::Template(Template::from(s))
    }
}

impl From<i32> for Part {
    fn from(n: i32) -> Self {
        Part::Template(Template::from(n))
    }
}

impl From<f64> for Part {
    fn from(n: f64) -> Self {
        Part::Template(Template::from(n))
    }
}

impl From<bool> for Part {
    fn from(b: bool) -> Self {
        Part::Template(Template::from(b))
    }
}

impl From<serde_json::Value> for Part {
    fn from(json: serde_json::Value) -> Self {
        Part::Template(Template::from(json))
    }
}

impl From<Predicate> for Part {
    fn from(predicate: Predicate) -> Self {
        Part::Predicate(predicate)
    }
}

impl From<Callback> for Part {
    fn from(callback: Callback) -> Self {
        Part::Callback(callback)
    }
}

impl Declaration {
    /// Normalize a positional literal into a declaration
    pub fn literal<I, P>(parts: I) -> Declaration
    where
        I: IntoIterator<Item = P>,
        P: Into<Part>,
    {
        let parts: Vec<Part> = parts.into_iter().map(Into::into).collect();
        match normalize(parts) {
            Ok(declaration) => declaration,
            Err(reason) => {
                warn!(%reason, "malformed literal declaration never matches");
                Declaration::never(reason)
            }
        }
    }
}

fn normalize(mut parts: Vec<Part>) -> std::result::Result<Declaration, String> {
    if parts.is_empty() {
        return Err("empty declaration".to_string());
    }
    if parts.len() > 4 {
        return Err(format!("declarations take at most 4 parts, got {}", parts.len()));
    }

    let shape: Vec<&'static str> = parts.iter().map(Part::kind).collect();

    // A trailing callback or scalar literal is the result, unless it is the only part
    let callback = match parts.last() {
        Some(Part::Callback(_)) | Some(Part::Template(Template::Literal(_))) if parts.len() > 1 => {
            parts.pop().map(callback_part).transpose()?
        }
        _ => None,
    };

    let mut parts = parts.into_iter().peekable();

    let tag = match parts.next_if(|part| matches!(part, Part::Tag(_))) {
        Some(Part::Tag(tag)) => Some(tag),
        _ => None,
    };

    let template = match parts.next() {
        Some(Part::Template(template)) => Some(template),
        Some(Part::Predicate(predicate)) => Some(Template::Predicate(predicate)),
        Some(Part::Tag(inner)) if tag.is_some() => Some(Template::Type(inner)),
        Some(other) => {
            return Err(format!("unexpected {} in pattern position, got {:?}", other.kind(), shape));
        }
        None => None,
    };

    let filter = match parts.next() {
        Some(Part::Predicate(predicate)) => Some(predicate),
        Some(other) => {
            return Err(format!("unexpected {} in predicate position, got {:?}", other.kind(), shape));
        }
        None => None,
    };

    if let Some(extra) = parts.next() {
        return Err(format!("unexpected trailing {}, got {:?}", extra.kind(), shape));
    }

    let mut builder = match (tag, template) {
        (Some(tag), Some(template)) => super::declare_typed(tag, template),
        (Some(tag), None) => super::declare_type(tag),
        (None, Some(template)) => super::declare(template),
        (None, None) => return Err(format!("declaration has no pattern, got {:?}", shape)),
    };
    if let Some(predicate) = filter {
        builder = builder.filter_with(predicate);
    }
    if let Some(callback) = callback {
        builder = builder.then_callback(callback);
    }

    Ok(builder.build())
}

fn callback_part(part: Part) -> std::result::Result<Callback, String> {
    match part {
        Part::Callback(callback) => Ok(callback),
        Part::Template(Template::Literal(value)) => Ok(Callback::Value(value)),
        other => Err(format!("expected a callback last, got a {}", other.kind())),
    }
}
