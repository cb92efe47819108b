//! Structural matcher
//!
//! Recursively compares a runtime value against a [`Template`], pushing
//! captured sub-values into a [`Captures`] collector as it goes. A failed match
//! may leave partial captures behind; the dispatcher discards the collector of
//! any declaration that does not match as a whole.

use crate::captures::Captures;
use crate::config::MatchConfig;
use crate::dispatch::dispatch_at;
use crate::error::Result;
use crate::pattern::{Slot, Template};
use crate::value::{Selector, Value};
use std::borrow::Cow;
use tracing::{trace, warn};

/// Match `value` against `template` under the default configuration
pub fn matches(value: &Value, template: &Template, captures: &mut Captures) -> Result<bool> {
    StructuralMatcher::new(&MatchConfig::default()).matches(value, template, captures, 0)
}

/// Template evaluator bound to a configuration
#[derive(Debug, Clone, Copy)]
pub(crate) struct StructuralMatcher<'c> {
    config: &'c MatchConfig,
}

impl<'c> StructuralMatcher<'c> {
    pub(crate) fn new(config: &'c MatchConfig) -> Self {
        Self { config }
    }

    pub(crate) fn matches(
        &self,
        value: &Value,
        template: &Template,
        captures: &mut Captures,
        depth: usize,
    ) -> Result<bool> {
        Ok(self.eval(value, template, captures, depth)?.is_some())
    }

    /// Returns the value a surrounding capture should record on success:
    /// the value itself, or a nested matcher's result.
    fn eval<'v>(
        &self,
        value: &'v Value,
        template: &Template,
        captures: &mut Captures,
        depth: usize,
    ) -> Result<Option<Cow<'v, Value>>> {
        if depth > self.config.max_depth {
            warn!(max_depth = self.config.max_depth, "template nesting too deep, treating as mismatch");
            return Ok(None);
        }

        let matched = match template {
            Template::Any => true,
            Template::Capture(marker) => {
                return self.eval_capture(value, marker.slot(), marker.inner(), captures, depth);
            }
            Template::Nested(matcher) => {
                let Some(config) = self.nested_config(matcher.config(), depth) else {
                    warn!(max_depth = self.config.max_depth, "nested matchers too deep, treating as mismatch");
                    return Ok(None);
                };
                let result = dispatch_at(matcher.declarations(), value, &config)?;
                return Ok(result.map(Cow::Owned));
            }
            Template::Literal(literal) => {
                if !literal.is_scalar() {
                    warn!(template = %literal, "composite literal template never matches");
                }
                literal.strict_eq(value)
            }
            Template::Regex(re) => re.matches(value),
            Template::Type(tag) => tag.accepts(value),
            Template::Predicate(predicate) => predicate.test(value)?,
            Template::Sequence(items) => self.eval_sequence(value, items, captures, depth)?,
            Template::Mapping(entries) => self.eval_mapping(value, entries, captures, depth)?,
            Template::Rest(_) => {
                warn!("rest marker outside the last sequence position never matches");
                false
            }
        };

        trace!(value = %value, matched, "template evaluated");
        Ok(matched.then_some(Cow::Borrowed(value)))
    }

    /// Configuration for a nested matcher entered below `depth`: its own
    /// settings, with the depth limit capped by what is left of ours
    fn nested_config(&self, inner: &MatchConfig, depth: usize) -> Option<MatchConfig> {
        let remaining = self.config.max_depth.checked_sub(depth + 1)?;
        Some(MatchConfig {
            max_depth: inner.max_depth.min(remaining),
            ..inner.clone()
        })
    }

    fn eval_capture<'v>(
        &self,
        value: &'v Value,
        slot: &Slot,
        inner: &Template,
        captures: &mut Captures,
        depth: usize,
    ) -> Result<Option<Cow<'v, Value>>> {
        match slot {
            Slot::Anonymous => {
                let index = captures.reserve();
                let result = self.eval(value, inner, captures, depth + 1)?;
                if let Some(captured) = &result {
                    captures.fill(index, captured.clone().into_owned());
                }
                Ok(result)
            }
            Slot::Named(_) => {
                let result = self.eval(value, inner, captures, depth + 1)?;
                if let Some(captured) = &result {
                    captures.push_slot(captured.clone().into_owned(), slot);
                }
                Ok(result)
            }
        }
    }

    fn eval_sequence(
        &self,
        value: &Value,
        items: &[Template],
        captures: &mut Captures,
        depth: usize,
    ) -> Result<bool> {
        let Value::Array(elements) = value else {
            return Ok(false);
        };

        let (fixed, rest) = match items.split_last() {
            Some((Template::Rest(slot), fixed)) => (fixed, Some(slot)),
            _ => (items, None),
        };
        if fixed.iter().any(|item| matches!(item, Template::Rest(_))) {
            warn!("rest marker before the end of a sequence template never matches");
            return Ok(false);
        }

        let length_ok = match rest {
            Some(_) => elements.len() >= fixed.len(),
            None => elements.len() == fixed.len(),
        };
        if !length_ok {
            return Ok(false);
        }

        for (element, item) in elements.iter().zip(fixed) {
            if self.eval(element, item, captures, depth + 1)?.is_none() {
                return Ok(false);
            }
        }

        if let Some(Some(slot)) = rest {
            let remainder = Value::Array(elements[fixed.len()..].to_vec());
            captures.push_slot(remainder, slot);
        }
        Ok(true)
    }

    fn eval_mapping(
        &self,
        value: &Value,
        entries: &[(String, Template)],
        captures: &mut Captures,
        depth: usize,
    ) -> Result<bool> {
        if !value.is_object_like() || value.is_null() {
            return Ok(false);
        }

        for (key, template) in entries {
            let Some(field) = value.select(key) else {
                return Ok(false);
            };
            if self.eval(&field, template, captures, depth + 1)?.is_none() {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::declare;
    use crate::dispatch::Matcher;
    use crate::pattern::{capture, capture_named, rest, TypeTag};
    use crate::value::Class;
    use crate::value::ObjectBuilder;
    use std::sync::Arc;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn check(value: &Value, template: impl Into<Template>) -> Option<Vec<Value>> {
        let mut captures = Captures::new();
        matches(value, &template.into(), &mut captures)
            .unwrap()
            .then(|| captures.into_arguments(value))
    }

    #[test]
    fn test_any_matches_everything() {
        for value in [Value::Undefined, Value::Null, Value::nan(), Value::from(json!({}))] {
            assert!(check(&value, Template::Any).is_some());
        }
    }

    #[test]
    fn test_literals() {
        assert!(check(&Value::nan(), Value::nan()).is_some());
        assert!(check(&Value::from(f64::INFINITY), f64::INFINITY).is_some());
        assert!(check(&Value::Null, Value::Undefined).is_none());
        assert!(check(&Value::Undefined, Value::Null).is_none());
        assert!(check(&Value::from(false), Value::Null).is_none());
        assert!(check(&Value::from("42"), 42).is_none());
    }

    #[test]
    fn test_composite_literal_never_matches() {
        let value = Value::array(vec![1]);
        assert!(check(&value, Template::Literal(value.clone())).is_none());
    }

    #[test]
    fn test_open_mapping() {
        let value = Value::from(json!({"a": 1, "b": 2}));
        assert!(check(&value, json!({"a": 1})).is_some());
        assert!(check(&value, json!({"a": 2})).is_none());
        assert!(check(&value, json!({"c": 1})).is_none());
    }

    #[test]
    fn test_mapping_checks_presence() {
        let any_foo = Template::mapping([("foo", Template::Any)]);
        assert!(check(&Value::from(json!({})), any_foo.clone()).is_none());
        assert!(check(&Value::from(json!({"foo": null})), any_foo).is_some());
    }

    #[test]
    fn test_mapping_against_null_and_scalars() {
        assert!(check(&Value::Null, json!({})).is_none());
        assert!(check(&Value::from("abc"), json!({})).is_none());
        assert!(check(&Value::from(json!([])), json!({})).is_some());
    }

    #[test]
    fn test_sequence_length_strict() {
        let value = Value::array(vec![1, 2]);
        assert!(check(&value, json!([1])).is_none());
        assert!(check(&value, json!([1, 2])).is_some());
        assert!(check(&value, json!([1, 2, 3])).is_none());
        assert!(check(&Value::Null, json!([])).is_none());
    }

    #[test]
    fn test_rest_absorbs_remainder() {
        let value = Value::from(json!(["foo", 42, 43]));
        let non_capturing = Template::sequence([Template::from("foo"), rest()]);
        assert_eq!(check(&value, non_capturing), Some(vec![value.clone()]));

        let capturing = Template::sequence([Template::from("foo"), capture().rest()]);
        assert_eq!(check(&value, capturing), Some(vec![Value::array(vec![42, 43])]));

        let empty_rest = Template::sequence([Template::from("foo"), capture().rest()]);
        assert_eq!(
            check(&Value::array(vec!["foo"]), empty_rest),
            Some(vec![Value::Array(vec![])])
        );
    }

    #[test]
    fn test_misplaced_rest_never_matches() {
        let template = Template::sequence([rest(), Template::from(1)]);
        assert!(check(&Value::array(vec![1]), template).is_none());
        assert!(check(&Value::array(vec![1]), rest()).is_none());
    }

    #[test]
    fn test_capture_order_is_preorder() {
        let value = Value::from(json!({"outer": {"inner": "x"}, "next": "y"}));
        let template = Template::mapping([
            (
                "outer",
                Template::from(capture().of(Template::mapping([("inner", capture())]))),
            ),
            ("next", Template::from(capture())),
        ]);
        assert_eq!(
            check(&value, template),
            Some(vec![
                Value::from(json!({"inner": "x"})),
                Value::from("x"),
                Value::from("y"),
            ])
        );
    }

    #[test]
    fn test_named_captures() {
        let value = Value::from(json!({"foo": "a", "bar": "b"}));
        let template = Template::mapping([("foo", capture_named("x")), ("bar", capture_named("y"))]);
        let args = check(&value, template).unwrap();
        assert_eq!(args, vec![Value::from(json!({"x": "a", "y": "b"}))]);
    }

    #[test]
    fn test_capture_inner_failure() {
        let value = Value::from(json!({"foo": "a"}));
        let template = Template::mapping([("foo", capture().of(TypeTag::Number))]);
        assert!(check(&value, template).is_none());
    }

    #[test]
    fn test_nominal_type_in_template() {
        let foo = Class::new("Foo");
        let value = ObjectBuilder::new()
            .field("item", ObjectBuilder::instance_of(&foo).build())
            .build();
        assert!(check(&value, Template::mapping([("item", TypeTag::from(&foo))])).is_some());
        assert!(check(&value, Template::mapping([("item", TypeTag::Array)])).is_none());
    }

    #[test]
    fn test_regex_only_matches_strings_and_regexes() {
        let template = Template::regex(r"f\w+", "");
        assert!(check(&Value::from("foo"), template.clone()).is_some());
        assert!(check(&Value::from(json!({"toString": "foo"})), template.clone()).is_none());
        assert!(check(&Value::regex(r"f\w+", ""), template).is_some());
    }

    #[test]
    fn test_depth_limit() {
        let config = MatchConfig::builder().max_depth(2).build().unwrap();
        let matcher = StructuralMatcher::new(&config);
        let value = Value::from(json!({"a": {"b": {"c": 1}}}));
        let template = Template::from(json!({"a": {"b": {"c": 1}}}));
        let mut captures = Captures::new();
        assert!(!matcher.matches(&value, &template, &mut captures, 0).unwrap());

        let shallow = Template::from(json!({"a": {}}));
        assert!(matcher.matches(&value, &shallow, &mut captures, 0).unwrap());
    }

    #[test]
    fn test_nested_matcher_keeps_its_own_depth_limit() {
        let value = Value::from(json!({"a": {"b": {"c": 1}}}));
        let inner = Matcher::with_config(MatchConfig::builder().max_depth(1).build().unwrap())
            .case(declare(json!({"a": {"b": {"c": 1}}})).then_value("deep"));
        assert_eq!(inner.dispatch(&value).unwrap(), None);
        assert!(check(&value, Template::nested(inner)).is_none());
    }

    #[test]
    fn test_nested_matcher_shares_the_outer_depth_budget() {
        let value = Value::from(json!({"a": {"b": {"c": 1}}}));
        let inner = Arc::new(
            Matcher::new().case(declare(json!({"a": {"b": {"c": 1}}})).then_value("deep")),
        );
        let template = Template::nested(Arc::clone(&inner));

        let tight = MatchConfig::builder().max_depth(3).build().unwrap();
        let mut captures = Captures::new();
        assert!(!StructuralMatcher::new(&tight)
            .matches(&value, &template, &mut captures, 0)
            .unwrap());

        let roomy = MatchConfig::builder().max_depth(4).build().unwrap();
        assert!(StructuralMatcher::new(&roomy)
            .matches(&value, &template, &mut captures, 0)
            .unwrap());
    }
}
