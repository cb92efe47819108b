//! Runtime values classified by the matching engine
//!
//! `Value` is a closed, dynamically-typed tree: the absent value, `null`,
//! booleans, a single IEEE-754 number kind, strings, regular-expression
//! values, ordered sequences and keyed objects. Objects may carry a nominal
//! [`Class`] so that templates can test instance-of relationships without
//! language-level reflection.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Fluent construction of object values
pub mod builder;

pub use builder::ObjectBuilder;

/// Keyed access to a value
///
/// The structural matcher only needs to know whether a key exists and what
/// is stored under it; it never enumerates properties.
pub trait Selector {
    /// Select a value by key
    fn select(&self, key: &str) -> Option<Cow<'_, Value>>;

    /// Whether the key exists
    fn has_key(&self, key: &str) -> bool {
        self.select(key).is_some()
    }
}

/// Dynamically-typed runtime value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// The absent value
    #[default]
    Undefined,
    /// Explicit null
    Null,
    /// Boolean value
    Bool(bool),
    /// Number value (NaN and infinities included)
    Number(f64),
    /// String value - using Arc for cheap cloning
    String(Arc<str>),
    /// Regular-expression value
    Regex(RegexValue),
    /// Ordered sequence
    Array(Vec<Value>),
    /// Keyed object, optionally an instance of a nominal class
    Object(Object),
}

impl Value {
    /// Not-a-number
    pub fn nan() -> Self {
        Value::Number(f64::NAN)
    }

    /// Regular-expression value from source and flags
    pub fn regex(source: impl Into<Arc<str>>, flags: &str) -> Self {
        Value::Regex(RegexValue::new(source, flags))
    }

    /// Array value from anything convertible to values
    pub fn array<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::Array(items.into_iter().map(Into::into).collect())
    }

    /// Name of the runtime kind, used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Regex(_) => "regexp",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    /// True for `Undefined`
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// True for `Null`
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// True for values that are objects at runtime: null, arrays, regex values and objects
    pub fn is_object_like(&self) -> bool {
        matches!(
            self,
            Value::Null | Value::Regex(_) | Value::Array(_) | Value::Object(_)
        )
    }

    /// True for the scalar kinds compared by equality
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Value::Undefined | Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_)
        )
    }

    /// Boolean payload
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Number payload
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// String payload
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Sequence payload
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Object payload
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Strict scalar equality where NaN equals NaN
    ///
    /// Composite values have no identity here and never compare equal.
    pub fn strict_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => (a.is_nan() && b.is_nan()) || a == b,
            (Value::String(a), Value::String(b)) => a == b,
            _ => false,
        }
    }

    /// Convert to a JSON value; non-finite numbers and undefined become null
    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::Undefined | Value::Null => JsonValue::Null,
            Value::Bool(b) => JsonValue::Bool(*b),
            Value::Number(n) => number_to_json(*n),
            Value::String(s) => JsonValue::String(s.to_string()),
            Value::Regex(re) => JsonValue::String(re.to_string()),
            Value::Array(items) => JsonValue::Array(items.iter().map(Value::to_json).collect()),
            Value::Object(obj) => JsonValue::Object(
                obj.fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

fn number_to_json(n: f64) -> JsonValue {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        JsonValue::from(n as i64)
    } else {
        serde_json::Number::from_f64(n)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null)
    }
}

impl Selector for Value {
    fn select(&self, key: &str) -> Option<Cow<'_, Value>> {
        match self {
            Value::Object(obj) => obj.select(key),
            Value::Array(items) => {
                if key == "length" {
                    return Some(Cow::Owned(Value::Number(items.len() as f64)));
                }
                array_index(key).and_then(|i| items.get(i)).map(Cow::Borrowed)
            }
            Value::Regex(re) => match key {
                "source" => Some(Cow::Owned(Value::String(re.source.clone()))),
                "flags" => Some(Cow::Owned(Value::String(re.flags.clone()))),
                _ => None,
            },
            _ => None,
        }
    }
}

// Only canonical decimal indices address array slots ("01" does not).
fn array_index(key: &str) -> Option<usize> {
    if key.is_empty() || (key.len() > 1 && key.starts_with('0')) {
        return None;
    }
    if !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    key.parse().ok()
}

/// Regular-expression value: source plus canonical flags
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegexValue {
    /// Pattern source without delimiters
    pub source: Arc<str>,
    /// Flags, sorted and deduplicated
    pub flags: Arc<str>,
}

impl RegexValue {
    /// Create a regex value; flags are canonicalized so `"gi"` equals `"ig"`
    pub fn new(source: impl Into<Arc<str>>, flags: &str) -> Self {
        Self {
            source: source.into(),
            flags: canonical_flags(flags).into(),
        }
    }
}

impl fmt::Display for RegexValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.source, self.flags)
    }
}

/// Sort and deduplicate regex flags
pub fn canonical_flags(flags: &str) -> String {
    let mut chars: Vec<char> = flags.chars().collect();
    chars.sort_unstable();
    chars.dedup();
    chars.into_iter().collect()
}

/// Nominal type descriptor
///
/// Identity is the descriptor itself, not its name: two classes both named
/// `"Foo"` are distinct. Cloning shares the descriptor.
#[derive(Clone)]
pub struct Class(Arc<ClassInner>);

struct ClassInner {
    name: String,
    parent: Option<Class>,
}

impl Class {
    /// Register a new root class
    pub fn new(name: impl Into<String>) -> Self {
        Class(Arc::new(ClassInner {
            name: name.into(),
            parent: None,
        }))
    }

    /// Register a subclass of `parent`
    pub fn extends(name: impl Into<String>, parent: &Class) -> Self {
        Class(Arc::new(ClassInner {
            name: name.into(),
            parent: Some(parent.clone()),
        }))
    }

    /// Class name
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Direct parent class
    pub fn parent(&self) -> Option<&Class> {
        self.0.parent.as_ref()
    }

    /// Whether `self` is `other` or inherits from it
    pub fn is_subclass_of(&self, other: &Class) -> bool {
        let mut current = Some(self);
        while let Some(class) = current {
            if class == other {
                return true;
            }
            current = class.parent();
        }
        false
    }
}

impl PartialEq for Class {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Class {}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Class({})", self.0.name)
    }
}

/// Keyed object with an optional nominal class
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Object {
    class: Option<Class>,
    fields: BTreeMap<String, Value>,
}

impl Object {
    /// Create a plain object
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an instance of `class`
    pub fn with_class(class: &Class) -> Self {
        Self {
            class: Some(class.clone()),
            fields: BTreeMap::new(),
        }
    }

    /// Nominal class, if any
    pub fn class(&self) -> Option<&Class> {
        self.class.as_ref()
    }

    /// Whether this object is an instance of `class` or one of its subclasses
    pub fn is_instance_of(&self, class: &Class) -> bool {
        self.class
            .as_ref()
            .map(|own| own.is_subclass_of(class))
            .unwrap_or(false)
    }

    /// Insert a field; returns the previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(key.into(), value.into())
    }

    /// Field by key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// All fields in key order
    pub fn fields(&self) -> &BTreeMap<String, Value> {
        &self.fields
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the object has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Selector for Object {
    fn select(&self, key: &str) -> Option<Cow<'_, Value>> {
        self.fields.get(key).map(Cow::Borrowed)
    }
}

impl From<BTreeMap<String, Value>> for Object {
    fn from(fields: BTreeMap<String, Value>) -> Self {
        Self {
            class: None,
            fields,
        }
    }
}

impl FromIterator<(String, Value)> for Object {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Object::from(iter.into_iter().collect::<BTreeMap<_, _>>())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) if n.is_nan() => write!(f, "NaN"),
            Value::Number(n) if n.is_infinite() => {
                write!(f, "{}Infinity", if *n < 0.0 { "-" } else { "" })
            }
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Regex(re) => write!(f, "{}", re),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Object(obj) => {
                if let Some(class) = obj.class() {
                    write!(f, "{} ", class.name())?;
                }
                write!(f, "{{")?;
                for (i, (k, v)) in obj.fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, " {}: {}", k, v)?;
                }
                write!(f, " }}")
            }
        }
    }
}

impl From<JsonValue> for Value {
    fn from(json: JsonValue) -> Self {
        match json {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(b),
            JsonValue::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            JsonValue::String(s) => Value::String(Arc::from(s)),
            JsonValue::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            JsonValue::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(Arc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(Arc::from(s))
    }
}

impl From<Arc<str>> for Value {
    fn from(s: Arc<str>) -> Self {
        Value::String(s)
    }
}

impl From<RegexValue> for Value {
    fn from(re: RegexValue) -> Self {
        Value::Regex(re)
    }
}

impl From<Object> for Value {
    fn from(obj: Object) -> Self {
        Value::Object(obj)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Null)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Undefined
    }
}

// Custom Serialize/Deserialize to keep Arc<str> and regex values transparent
impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Value::Undefined | Value::Null => serializer.serialize_none(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => number_to_json(*n).serialize(serializer),
            Value::String(s) => serializer.serialize_str(s),
            Value::Regex(re) => serializer.collect_str(re),
            Value::Array(items) => items.serialize(serializer),
            Value::Object(obj) => obj.fields.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        JsonValue::deserialize(deserializer).map(Value::from)
    }
}
