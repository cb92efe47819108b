//! Type tags: the coarse runtime-kind test every declaration starts with

use crate::error::Result;
use crate::pattern::traits::ValuePredicate;
use crate::value::{Class, Value};
use std::fmt;

/// Runtime kind a declaration (or template node) requires
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TypeTag {
    /// Every value
    #[default]
    Any,
    /// The absent value
    Absent,
    /// Booleans
    Boolean,
    /// Numbers, NaN included
    Number,
    /// Strings
    String,
    /// Object-like values: null, arrays, regex values and objects
    Object,
    /// Ordered sequences
    Array,
    /// Regular-expression values
    RegExp,
    /// Instances of a nominal class or its subclasses
    Nominal(Class),
}

impl TypeTag {
    /// Whether `value` has the runtime kind this tag requires
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            TypeTag::Any => true,
            TypeTag::Absent => value.is_undefined(),
            TypeTag::Boolean => matches!(value, Value::Bool(_)),
            TypeTag::Number => matches!(value, Value::Number(_)),
            TypeTag::String => matches!(value, Value::String(_)),
            TypeTag::Object => value.is_object_like(),
            TypeTag::Array => matches!(value, Value::Array(_)),
            TypeTag::RegExp => matches!(value, Value::Regex(_)),
            TypeTag::Nominal(class) => value
                .as_object()
                .map(|obj| obj.is_instance_of(class))
                .unwrap_or(false),
        }
    }

    /// Tag inferred from a value's own kind: scalars map to their kind,
    /// everything else (null included) is `Object`
    pub fn of_value(value: &Value) -> TypeTag {
        match value {
            Value::Undefined => TypeTag::Absent,
            Value::Bool(_) => TypeTag::Boolean,
            Value::Number(_) => TypeTag::Number,
            Value::String(_) => TypeTag::String,
            Value::Null | Value::Regex(_) | Value::Array(_) | Value::Object(_) => TypeTag::Object,
        }
    }
}

impl ValuePredicate for TypeTag {
    fn test(&self, value: &Value) -> Result<bool> {
        Ok(self.accepts(value))
    }

    fn describe(&self) -> String {
        format!("is {}", self)
    }
}

impl From<Class> for TypeTag {
    fn from(class: Class) -> Self {
        TypeTag::Nominal(class)
    }
}

impl From<&Class> for TypeTag {
    fn from(class: &Class) -> Self {
        TypeTag::Nominal(class.clone())
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Any => write!(f, "any"),
            TypeTag::Absent => write!(f, "undefined"),
            TypeTag::Boolean => write!(f, "boolean"),
            TypeTag::Number => write!(f, "number"),
            TypeTag::String => write!(f, "string"),
            TypeTag::Object => write!(f, "object"),
            TypeTag::Array => write!(f, "Array"),
            TypeTag::RegExp => write!(f, "RegExp"),
            TypeTag::Nominal(class) => write!(f, "{}", class.name()),
        }
    }
}
