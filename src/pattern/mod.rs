//! Pattern value model: type tags, templates, capture markers and predicates

pub mod capture;
pub mod regex_template;
pub mod template;
pub mod traits;
pub mod type_tag;

pub use capture::{capture, capture_named, rest, CaptureMarker, Slot};
pub use regex_template::{safe_regex_compile, RegexTemplate};
pub use template::Template;
pub use traits::{Predicate, ValuePredicate};
pub use type_tag::TypeTag;

/// Template that matches every value
pub fn any() -> Template {
    Template::Any
}

/// Type test usable as a filter or guard, with the value passed explicitly
pub fn is(tag: impl Into<TypeTag>) -> Predicate {
    Predicate::from_impl(tag.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Class, Value};

    #[test]
    fn test_is_helper() {
        assert!(is(TypeTag::Number).test(&Value::from(1)).unwrap());
        assert!(!is(TypeTag::Number).test(&Value::from("1")).unwrap());

        let foo = Class::new("Foo");
        assert!(!is(&foo).test(&Value::Null).unwrap());
    }
}
