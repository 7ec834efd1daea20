//! End-to-end scenarios over the port / country / airport shapes.

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use shapeguard_validator::object;
use shapeguard_validator::prelude::*;

const SOURCES: [&str; 2] = ["imos", "predictive"];

// ============================================================================
// SCHEMAS
// ============================================================================

fn port() -> Schema {
    object! {
        name: string(),
        locode: string().optional(),
    }
}

fn port_with_source() -> Schema {
    assign(port(), object! { source: enums(SOURCES) })
}

fn port_with_source_transform() -> Schema {
    object! {
        name: string(),
        locode: string().optional(),
        source: enums(SOURCES).with_coercion(CoercionRule::FirstAllowed),
    }
}

fn country() -> Schema {
    object! {
        name: string(),
        ports: array(port_with_source()),
    }
}

fn country_with_meta() -> Schema {
    assign(
        country(),
        object! { meta: object! { count: number() }.optional() },
    )
}

fn airport() -> Schema {
    object! {
        name: string(),
        code: string(),
        nullableCode: string().nullable(),
        optionalCode: string().optional(),
        optionalNullableCode: string().nullable().optional(),
    }
}

fn airport_clean() -> Schema {
    object! {
        name: string(),
        code: string(),
    }
}

fn kinds(errors: &ValidationErrors) -> Vec<ErrorKind> {
    errors.iter().map(|e| e.kind).collect()
}

// ============================================================================
// PORTS
// ============================================================================

#[test]
fn port_with_only_required_name_is_accepted() {
    assert_eq!(
        port().validate(&json!({"name": "SGSIN"})),
        Ok(json!({"name": "SGSIN"}))
    );
}

#[test]
fn port_missing_source_reports_one_missing_required() {
    let errors = port_with_source()
        .validate(&json!({"name": "SGSIN"}))
        .unwrap_err();

    assert_eq!(errors.len(), 1);
    let error = &errors.errors()[0];
    assert_eq!(error.kind, ErrorKind::MissingRequired);
    assert_eq!(
        error.path,
        FieldPath::from_iter([PathSegment::from("source")])
    );
}

#[test]
fn port_with_valid_source_is_accepted() {
    let value = json!({"name": "SGSIN", "source": "imos"});
    assert_eq!(port_with_source().validate(&value), Ok(value));
}

#[test]
fn locode_null_is_rejected_because_optional_is_not_nullable() {
    let errors = port()
        .validate(&json!({"name": "SGSIN", "locode": null}))
        .unwrap_err();
    assert_eq!(kinds(&errors), [ErrorKind::NullNotAllowed]);
}

// ============================================================================
// COUNTRIES
// ============================================================================

#[test]
fn country_without_ports_is_accepted() {
    let value = json!({"name": "Singapore", "ports": []});
    assert_eq!(country().validate(&value), Ok(value));
}

#[test]
fn country_with_ports_is_accepted() {
    let value = json!({
        "name": "Singapore",
        "ports": [{"name": "Singapore", "source": "imos", "locode": "SGSIN"}]
    });
    assert_eq!(country().validate(&value), Ok(value));
}

#[test]
fn nested_enum_violation_is_located_by_path() {
    let errors = country()
        .validate(&json!({
            "name": "Singapore",
            "ports": [{"name": "Singapore", "source": "bogus"}]
        }))
        .unwrap_err();

    assert_eq!(errors.len(), 1);
    let error = &errors.errors()[0];
    assert_eq!(error.kind, ErrorKind::NotInEnum);
    assert_eq!(
        serde_json::to_value(&error.path).unwrap(),
        json!(["ports", 0, "source"])
    );
    assert_eq!(error.path.to_string(), "ports[0].source");
}

#[test]
fn every_failing_port_is_reported_in_one_call() {
    let errors = country()
        .validate(&json!({
            "ports": [
                {"name": "A", "source": "imos"},
                {"source": "x"},
                {"name": 3, "source": "predictive", "locode": 4}
            ]
        }))
        .unwrap_err();

    let paths: Vec<String> = errors.iter().map(|e| e.path.to_string()).collect();
    assert_eq!(
        paths,
        [
            "name",
            "ports[1].name",
            "ports[1].source",
            "ports[2].name",
            "ports[2].locode"
        ]
    );
}

#[test]
fn optional_meta_may_be_absent_or_present() {
    let schema = country_with_meta();
    assert!(schema.is_valid(&json!({"name": "Singapore", "ports": []})));
    assert!(schema.is_valid(&json!({
        "name": "Singapore",
        "ports": [{"name": "Singapore", "source": "imos", "locode": "SGSIN"}],
        "meta": {"count": 1}
    })));

    let errors = schema
        .validate(&json!({"name": "Singapore", "ports": [], "meta": {}}))
        .unwrap_err();
    assert_eq!(errors.errors()[0].path.to_string(), "meta.count");
}

// ============================================================================
// AIRPORTS: empty strings, nullable, optional
// ============================================================================

#[test]
fn airport_accepts_empty_string_null_and_absent() {
    let value = json!({"name": "Singapore", "code": "", "nullableCode": null});
    assert_eq!(airport().validate(&value), Ok(value));
}

#[test]
fn airport_requires_nullable_code_to_be_present() {
    let errors = airport()
        .validate(&json!({"name": "Singapore", "code": ""}))
        .unwrap_err();
    assert_eq!(kinds(&errors), [ErrorKind::MissingRequired]);
    assert!(errors.errors()[0].path.ends_with_key("nullableCode"));
}

#[test]
fn masking_then_validating_a_clean_airport() {
    let raw = json!({"name": "Singapore", "code": "", "nullableCode": null});
    let schema = airport_clean();

    let masked = schema.mask(&raw);
    assert_eq!(masked, json!({"name": "Singapore", "code": ""}));
    assert_eq!(schema.validate(&masked), Ok(masked.clone()));
}

#[test]
fn strip_unknown_option_matches_masking_on_valid_input() {
    let raw = json!({"name": "Singapore", "code": "", "nullableCode": null});
    let schema = airport_clean();
    assert_eq!(
        schema.validate_with(&raw, &ValidateOptions::strip_unknown()),
        Ok(schema.mask(&raw))
    );
}

#[test]
fn strict_airport_rejects_extra_fields() {
    let errors = airport_clean()
        .strict()
        .validate(&json!({"name": "Singapore", "code": "", "nullableCode": null}))
        .unwrap_err();
    assert_eq!(kinds(&errors), [ErrorKind::UnknownField]);
    assert!(errors.errors()[0].path.ends_with_key("nullableCode"));
}

#[test]
fn masked_value_can_still_fail_validation() {
    let masked = airport_clean().mask(&json!({"code": "X", "extra": true}));
    let errors = airport_clean().validate(&masked).unwrap_err();
    assert_eq!(kinds(&errors), [ErrorKind::MissingRequired]);
}

// ============================================================================
// TRANSFORMS
// ============================================================================

#[test]
fn invalid_source_is_coerced_to_first_allowed() {
    let schema = port_with_source_transform();
    let raw = json!({"name": "Singapore", "locode": "SGSIN", "source": "sgsin"});

    assert!(!schema.is_valid(&raw));
    assert_eq!(
        schema.create(&raw),
        Ok(json!({"name": "Singapore", "locode": "SGSIN", "source": "imos"}))
    );
}

#[test]
fn absent_source_is_filled_by_coercion() {
    let created = port_with_source_transform()
        .create(&json!({"name": "Singapore", "locode": "SGSIN"}))
        .unwrap();
    assert_eq!(created["source"], json!("imos"));
}

#[test]
fn valid_source_survives_coercion() {
    let raw = json!({"name": "Singapore", "source": "predictive"});
    assert_eq!(port_with_source_transform().create(&raw), Ok(raw));
}

#[test]
fn coercion_does_not_hide_unrelated_errors() {
    let errors = port_with_source_transform()
        .create(&json!({"source": "sgsin"}))
        .unwrap_err();
    assert_eq!(kinds(&errors), [ErrorKind::MissingRequired]);
    assert!(errors.errors()[0].path.ends_with_key("name"));
}

#[test]
fn parse_into_typed_port() {
    #[derive(Debug, PartialEq, serde::Deserialize)]
    struct Port {
        name: String,
        locode: Option<String>,
        source: String,
    }

    let schema = port_with_source_transform();
    let coerced = schema.coerce(&json!({"name": "Singapore", "source": 1}));
    let port: Port = schema.parse(&coerced).unwrap();
    assert_eq!(
        port,
        Port {
            name: "Singapore".into(),
            locode: None,
            source: "imos".into()
        }
    );
}

// ============================================================================
// SCHEMA DOCUMENTS
// ============================================================================

#[test]
fn port_document_behaves_like_built_schema() {
    let document: Value = json!({
        "type": "object",
        "fields": {
            "name": {"type": "string"},
            "locode": {"type": "string", "optional": true},
            "source": {
                "type": "enum",
                "values": ["imos", "predictive"],
                "coerce": "first_allowed"
            }
        }
    });
    let loaded = Schema::from_json_str(&document.to_string()).unwrap();
    assert_eq!(loaded, port_with_source_transform());

    let raw = json!({"name": "Singapore", "source": "sgsin"});
    assert_eq!(loaded.create(&raw), port_with_source_transform().create(&raw));
}

#[test]
fn all_scenario_schemas_pass_their_own_check() {
    for schema in [
        port(),
        port_with_source(),
        port_with_source_transform(),
        country(),
        country_with_meta(),
        airport(),
        airport_clean(),
    ] {
        assert!(schema.check().is_ok(), "{schema:?}");
    }
}

#[test]
fn schemas_are_shared_across_threads() {
    let schema = std::sync::Arc::new(country());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let schema = std::sync::Arc::clone(&schema);
            std::thread::spawn(move || {
                schema.is_valid(&json!({"name": format!("c{i}"), "ports": []}))
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

#[test]
fn numeric_enum_from_document_accepts_integer_input() {
    let rating = Schema::from_json_str(
        r#"{"type": "enum", "values": [1.0, 2.0], "coerce": "first_allowed"}"#,
    )
    .unwrap();

    assert_eq!(rating.validate(&json!(1)), Ok(json!(1)));
    assert_eq!(rating.coerce(&json!(2)), json!(2));
    assert_eq!(rating.coerce(&json!(3)), json!(1.0));
}
