//! Tests for positional literal declarations

use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;
use valmatch::*;

fn run(value: impl Into<Value>, declarations: &[Declaration]) -> Option<Value> {
    dispatch(&value.into(), declarations).unwrap()
}

#[rstest]
#[case(json!(42), Some("answer"))]
#[case(json!(9), None)]
#[case(json!("42"), None)]
fn test_pattern_with_constant(#[case] input: serde_json::Value, #[case] expected: Option<&str>) {
    let declarations = [Declaration::literal([Part::from(42), Part::from("answer")])];
    assert_eq!(run(input, &declarations), expected.map(Value::from));
}

#[rstest]
#[case(Value::from("s"), "string")]
#[case(Value::from(1.5), "number")]
#[case(Value::from(true), "boolean")]
#[case(Value::Undefined, "absent")]
#[case(Value::regex("x", ""), "regexp")]
#[case(Value::array(vec![1]), "array")]
#[case(Value::Null, "object")]
fn test_tag_dispatch(#[case] input: Value, #[case] expected: &str) {
    let declarations = [
        Declaration::literal([Part::from(TypeTag::String), Part::from("string")]),
        Declaration::literal([Part::from(TypeTag::Number), Part::from("number")]),
        Declaration::literal([Part::from(TypeTag::Boolean), Part::from("boolean")]),
        Declaration::literal([Part::from(TypeTag::Absent), Part::from("absent")]),
        Declaration::literal([Part::from(TypeTag::RegExp), Part::from("regexp")]),
        Declaration::literal([Part::from(TypeTag::Array), Part::from("array")]),
        Declaration::literal([Part::from(TypeTag::Object), Part::from("object")]),
    ];
    assert_eq!(run(input, &declarations), Some(Value::from(expected)));
}

#[test]
fn test_tag_pattern_callback() {
    let point = Class::new("Point");
    let declarations = [
        Declaration::literal([
            Part::from(TypeTag::from(&point)),
            Part::from(Template::mapping([("x", capture()), ("y", capture())])),
            Part::from(Callback::new(|args| Value::array(args))),
        ]),
        Declaration::literal([Part::from(TypeTag::Any), Part::from(TypeTag::Any), Part::from("other")]),
    ];

    let p = ObjectBuilder::instance_of(&point).field("x", 1).field("y", 2).build();
    assert_eq!(run(p, &declarations), Some(Value::from(json!([1, 2]))));
    assert_eq!(run(json!({"x": 1, "y": 2}), &declarations), Some(Value::from("other")));
}

#[test]
fn test_four_part_literal_applies_predicate() {
    let declarations = [
        Declaration::literal([
            Part::from(TypeTag::Object),
            Part::from(json!({"role": "admin"})),
            Part::from(Predicate::new(|v| v.select("active").and_then(|a| a.as_bool()) == Some(true))),
            Part::from("active admin"),
        ]),
        Declaration::literal([Part::from(TypeTag::Object), Part::from(json!({})), Part::from("someone")]),
    ];

    assert_eq!(
        run(json!({"role": "admin", "active": true}), &declarations),
        Some(Value::from("active admin"))
    );
    assert_eq!(
        run(json!({"role": "admin", "active": false}), &declarations),
        Some(Value::from("someone"))
    );
}

#[test]
fn test_single_pattern_is_identity() {
    let declarations = [Declaration::literal([Part::from(json!({"a": 1}))])];
    assert_eq!(run(json!({"a": 1, "b": 2}), &declarations), Some(Value::from(json!({"a": 1, "b": 2}))));
}

#[rstest]
#[case::tag_then_predicate(
    vec![
        Part::from(TypeTag::Array),
        Part::from(Predicate::new(|v| v.as_array().is_some_and(|a| a.len() > 1))),
        Part::from("many"),
    ],
    json!([1, 2, 3]),
    Some("many")
)]
#[case::tag_then_predicate_rejects(
    vec![
        Part::from(TypeTag::Array),
        Part::from(Predicate::new(|v| v.as_array().is_some_and(|a| a.len() > 1))),
        Part::from("many"),
    ],
    json!([1]),
    None
)]
#[case::pattern_then_predicate(
    vec![
        Part::from(json!({"role": "admin"})),
        Part::from(Predicate::always()),
        Part::from("admin"),
    ],
    json!({"role": "admin", "name": "root"}),
    Some("admin")
)]
#[case::pattern_then_predicate_rejects(
    vec![
        Part::from(json!({"role": "admin"})),
        Part::from(Predicate::new(|v| v.select("name").is_some())),
        Part::from("admin"),
    ],
    json!({"role": "admin"}),
    None
)]
#[case::pattern_then_predicate_identity(
    vec![Part::from("x"), Part::from(Predicate::always())],
    json!("x"),
    Some("x")
)]
#[case::predicate_pattern_without_tag(
    vec![
        Part::from(Predicate::new(|v| v.as_f64().is_some_and(|n| n > 10.0))),
        Part::from(Callback::from("big")),
    ],
    json!(11),
    Some("big")
)]
fn test_optional_slots(
    #[case] parts: Vec<Part>,
    #[case] input: serde_json::Value,
    #[case] expected: Option<&str>,
) {
    let declaration = Declaration::literal(parts);
    assert!(declaration.malformed().is_none());
    assert_eq!(run(input, &[declaration]), expected.map(Value::from));
}

#[rstest]
#[case::empty(vec![])]
#[case::callback_first(vec![Part::from(Callback::Identity)])]
#[case::template_in_callback_slot(vec![Part::from(1), Part::from(json!([1]))])]
#[case::pattern_without_tag(vec![Part::from(1), Part::from(2), Part::from("x")])]
#[case::too_many_parts(vec![Part::from(1), Part::from(2), Part::from(3), Part::from(4), Part::from(5)])]
#[case::missing_predicate(vec![
    Part::from(TypeTag::Any),
    Part::from(1),
    Part::from(2),
    Part::from(Callback::Identity),
])]
fn test_malformed_literal_never_matches(#[case] parts: Vec<Part>) {
    let declarations = [
        Declaration::literal(parts),
        Declaration::literal([Part::from(TypeTag::Any), Part::from(TypeTag::Any), Part::from("fallback")]),
    ];
    assert!(declarations[0].malformed().is_some());
    assert_eq!(run(1, &declarations), Some(Value::from("fallback")));
}
