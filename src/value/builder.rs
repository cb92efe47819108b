//! Fluent construction of object values

use super::{Class, Object, Value};

/// Builder for object values
#[derive(Debug, Default)]
pub struct ObjectBuilder {
    object: Object,
}

impl ObjectBuilder {
    /// Create a builder for a plain object
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for an instance of `class`
    pub fn instance_of(class: &Class) -> Self {
        Self {
            object: Object::with_class(class),
        }
    }

    /// Add a field to the object
    pub fn field<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.object.insert(key, value);
        self
    }

    /// Build the object value
    pub fn build(self) -> Value {
        Value::Object(self.object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_fields_and_class() {
        let foo = Class::new("Foo");
        let value = ObjectBuilder::instance_of(&foo)
            .field("foo", "bar")
            .field("n", 1)
            .build();

        let obj = value.as_object().unwrap();
        assert!(obj.is_instance_of(&foo));
        assert_eq!(obj.get("foo"), Some(&Value::from("bar")));
        assert_eq!(obj.len(), 2);
    }
}
