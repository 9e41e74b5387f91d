//! Core partial-construction properties: recovery, fallbacks, idempotence,
//! structural failures.

use salvage::{
    ErrorKind, Fallback, MissingOptional, Options, Schema, StructuralErrorKind,
};
use serde_json::json;

fn user_schema() -> Schema {
    Schema::builder("user")
        .string("name")
        .integer("age")
        .build()
        .unwrap()
}

#[test]
fn test_fully_valid_input_has_empty_report() {
    let schema = user_schema();
    let input = json!({"name": "ok", "age": 30});
    let bundle = schema.construct_partial(&input).unwrap();

    assert!(bundle.is_fully_valid());
    assert_eq!(bundle.report().len(), 0);
    // The instance equals what ordinary all-or-nothing construction
    // would have produced.
    assert_eq!(bundle.instance().to_value(), json!({"name": "ok", "age": 30}));
}

#[test]
fn test_missing_required_field_without_default() {
    let schema = user_schema();
    let bundle = schema.construct_partial(&json!({"name": "ok"})).unwrap();

    let details = bundle.report().get("age").unwrap();
    assert_eq!(details[0].kind(), &ErrorKind::Missing);
    assert_eq!(details[0].message(), "Field required");
    assert_eq!(bundle.instance()["age"], json!(null));

    // `name` validated normally: present, no error entry.
    assert_eq!(bundle.instance()["name"], json!("ok"));
    assert!(!bundle.report().contains("name"));
}

#[test]
fn test_wrong_type_field_keeps_raw_value() {
    let schema = user_schema();
    let bundle = schema
        .construct_partial(&json!({"name": "ok", "age": "not-a-number"}))
        .unwrap();

    let details = bundle.report().get("age").unwrap();
    assert_eq!(details[0].kind().tag(), "int_parsing");
    assert_eq!(bundle.instance()["age"], json!("not-a-number"));
}

#[test]
fn test_never_raises_for_field_content() {
    let schema = user_schema();
    // Everything wrong at once: wrong types, extra keys.
    let input = json!({"name": [1, 2], "age": {"x": true}, "extra": "ignored"});
    let bundle = schema.construct_partial(&input).unwrap();

    assert_eq!(bundle.report().len(), 2);
    // Unknown keys don't appear in the instance but survive in the raw copy.
    assert_eq!(bundle.instance().len(), 2);
    assert_eq!(bundle.raw()["extra"], json!("ignored"));
}

#[test]
fn test_instance_display_is_its_json_form() {
    let schema = user_schema();
    let bundle = schema
        .construct_partial(&json!({"name": "ok", "age": 30}))
        .unwrap();

    assert_eq!(
        bundle.instance().to_string(),
        serde_json::to_string(&bundle.instance().to_value()).unwrap()
    );
    assert_eq!(bundle.instance().to_string(), r#"{"name":"ok","age":30}"#);
}

#[test]
fn test_idempotence() {
    let schema = user_schema();
    let input = json!({"name": 7, "age": "x"});

    let first = schema.construct_partial(&input).unwrap();
    let second = schema.construct_partial(&input).unwrap();

    assert_eq!(first.instance(), second.instance());
    assert_eq!(first.report(), second.report());
}

#[test]
fn test_raw_input_is_preserved() {
    let schema = user_schema();
    let input = json!({"name": 7, "age": "x", "unknown": {"deep": [null]}});
    let bundle = schema.construct_partial(&input).unwrap();

    assert_eq!(bundle.raw(), &input);
}

#[test]
fn test_non_mapping_input_is_a_structural_error() {
    let schema = user_schema();

    for input in [json!([1, 2]), json!("scalar"), json!(42), json!(null)] {
        let err = schema.construct_partial(&input).unwrap_err();
        assert!(matches!(
            err.kind(),
            StructuralErrorKind::NotAMapping { .. }
        ));
    }

    let err = schema.construct_partial(&json!([])).unwrap_err();
    assert_eq!(err.to_string(), "input must be a mapping, got array");
}

#[test]
fn test_duplicate_field_is_a_structural_error() {
    let err = Schema::builder("bad")
        .string("name")
        .integer("name")
        .build()
        .unwrap_err();

    assert!(matches!(
        err.kind(),
        StructuralErrorKind::DuplicateField { name } if name == "name"
    ));
}

#[test]
fn test_fallback_null_policy() {
    let schema = user_schema();
    let options = Options {
        fallback: Fallback::Null,
        ..Options::default()
    };
    let bundle = schema
        .construct_partial_with(&json!({"name": "ok", "age": "x"}), &options)
        .unwrap();

    assert_eq!(bundle.instance()["age"], json!(null));
    assert!(bundle.report().contains("age"));
}

#[test]
fn test_fallback_default_policy() {
    use salvage::{FieldKind, FieldSpec, validate};

    let schema = Schema::builder("user")
        .field(
            FieldSpec::new("age", FieldKind::Leaf(validate::integer()))
                .with_default(json!(0)),
        )
        .build()
        .unwrap();
    let options = Options {
        fallback: Fallback::Default,
        ..Options::default()
    };

    let bundle = schema
        .construct_partial_with(&json!({"age": "x"}), &options)
        .unwrap();
    assert_eq!(bundle.instance()["age"], json!(0));
    assert!(bundle.report().contains("age"));
}

#[test]
fn test_declared_default_fills_missing_field_silently() {
    use salvage::{FieldKind, FieldSpec, validate};

    let schema = Schema::builder("user")
        .field(
            FieldSpec::new("age", FieldKind::Leaf(validate::integer()))
                .with_default(json!(21)),
        )
        .build()
        .unwrap();

    let bundle = schema.construct_partial(&json!({})).unwrap();
    assert!(bundle.is_fully_valid());
    assert_eq!(bundle.instance()["age"], json!(21));
}

#[test]
fn test_missing_optional_field_policies() {
    use salvage::{FieldKind, FieldSpec, validate};

    let schema = Schema::builder("user")
        .field(FieldSpec::new("nickname", FieldKind::Leaf(validate::string())).optional())
        .build()
        .unwrap();

    // Default policy: silently valid with null.
    let bundle = schema.construct_partial(&json!({})).unwrap();
    assert!(bundle.is_fully_valid());
    assert_eq!(bundle.instance()["nickname"], json!(null));

    // Opt-in policy: recorded like a missing required field.
    let options = Options {
        missing_optional: MissingOptional::Report,
        ..Options::default()
    };
    let bundle = schema.construct_partial_with(&json!({}), &options).unwrap();
    assert!(bundle.report().contains("nickname"));

    // A supplied optional value still validates normally.
    let bundle = schema
        .construct_partial(&json!({"nickname": 9}))
        .unwrap();
    assert!(bundle.report().contains("nickname"));
    assert_eq!(bundle.instance()["nickname"], json!(9));
}
