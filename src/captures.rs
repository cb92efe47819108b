//! Capture collection and callback argument marshalling

use crate::pattern::Slot;
use crate::value::{Object, Value};
use std::collections::BTreeMap;

/// Values captured while matching one declaration
///
/// Anonymous captures keep encounter order; named captures are keyed by name
/// with the last write winning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Captures {
    positional: Vec<Value>,
    named: BTreeMap<String, Value>,
}

impl Captures {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a value, anonymously or under `name`
    pub fn push(&mut self, value: Value, name: Option<&str>) {
        match name {
            Some(name) => {
                self.named.insert(name.to_string(), value);
            }
            None => self.positional.push(value),
        }
    }

    /// Push a value into a capture slot
    pub fn push_slot(&mut self, value: Value, slot: &Slot) {
        match slot {
            Slot::Anonymous => self.positional.push(value),
            Slot::Named(name) => {
                self.named.insert(name.to_string(), value);
            }
        }
    }

    /// Reserve the next positional slot before its value is known
    ///
    /// A capture marker reserves its position before matching its inner
    /// template so that it precedes any captures nested inside it.
    pub(crate) fn reserve(&mut self) -> usize {
        self.positional.push(Value::Undefined);
        self.positional.len() - 1
    }

    /// Fill a slot returned by [`Captures::reserve`]
    pub(crate) fn fill(&mut self, index: usize, value: Value) {
        if let Some(slot) = self.positional.get_mut(index) {
            *slot = value;
        }
    }

    /// Whether nothing was captured
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }

    /// Anonymous captures in encounter order
    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    /// Named captures
    pub fn named(&self) -> &BTreeMap<String, Value> {
        &self.named
    }

    /// Convert into the callback's argument list
    ///
    /// - nothing captured: the matched value alone
    /// - any named capture: one object holding the named captures
    /// - otherwise: the anonymous captures in order
    pub fn into_arguments(self, matched: &Value) -> Vec<Value> {
        if !self.named.is_empty() {
            vec![Value::Object(Object::from(self.named))]
        } else if !self.positional.is_empty() {
            self.positional
        } else {
            vec![matched.clone()]
        }
    }
}
