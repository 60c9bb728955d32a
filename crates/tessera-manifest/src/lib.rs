//! YAML manifest codec for tessera module definitions.
//!
//! Module manifests are authored in YAML for readability, but the embedded
//! schema document defines its decoding rules for the canonical JSON wire
//! form only. `decode` therefore runs a two-phase decode: the source is
//! parsed into a generic YAML tree, re-encoded as canonical JSON, and only
//! then decoded into the strongly-typed [`ModuleDefinition`]. The typed
//! phase is the same serde path a plain-JSON document would take, so enums,
//! numeric bounds, `required` lists and nested `properties` behave
//! identically in both notations.
//!
//! Pure and synchronous; no filesystem or database dependencies.

pub mod error;
mod normalize;

pub use error::{DecodeError, Result};
use tessera_core::module::ModuleDefinition;

/// Decode one module manifest from YAML source text.
pub fn decode(input: &str) -> Result<ModuleDefinition> {
  let tree: serde_yaml::Value = serde_yaml::from_str(input)?;
  let canonical = normalize::to_json(tree)?;
  serde_json::from_value(canonical).map_err(DecodeError::Typed)
}

/// Decode one module manifest from raw bytes.
pub fn decode_bytes(input: &[u8]) -> Result<ModuleDefinition> {
  let tree: serde_yaml::Value = serde_yaml::from_slice(input)?;
  let canonical = normalize::to_json(tree)?;
  serde_json::from_value(canonical).map_err(DecodeError::Typed)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use serde_json::json;
  use tessera_core::schema::AdditionalProperties;

  use super::*;

  #[test]
  fn basic_fields() {
    let module = decode(
      "
id: test-module
namespace: test-namespace
description: A test module description
schema:
  type: object
  properties:
    name:
      type: string
",
    )
    .unwrap();

    assert_eq!(module.id, "test-module");
    assert_eq!(module.namespace, "test-namespace");
    assert_eq!(module.description, "A test module description");
    assert_eq!(module.schema.schema_type.as_deref(), Some("object"));
    assert_eq!(
      module.schema.properties["name"].schema_type.as_deref(),
      Some("string")
    );
  }

  #[test]
  fn required_fields() {
    let module = decode(
      "
id: required-test
namespace: test
description: Test required fields
schema:
  type: object
  required:
    - field1
    - field2
  properties:
    field1:
      type: string
    field2:
      type: integer
    field3:
      type: boolean
",
    )
    .unwrap();

    assert_eq!(module.schema.required, vec!["field1", "field2"]);
    assert_eq!(module.schema.properties.len(), 3);
  }

  #[test]
  fn nested_objects() {
    let module = decode(
      "
id: nested-test
namespace: test
description: Test nested objects
schema:
  type: object
  properties:
    parent:
      type: object
      additionalProperties: false
      required:
        - child
      properties:
        child:
          type: string
          description: Inner field
        optional:
          type: integer
",
    )
    .unwrap();

    let parent = &module.schema.properties["parent"];
    assert_eq!(parent.schema_type.as_deref(), Some("object"));
    assert_eq!(parent.required, vec!["child"]);
    assert_eq!(
      parent.additional_properties,
      Some(AdditionalProperties::Allowed(false))
    );
    assert_eq!(parent.properties.len(), 2);
    assert_eq!(
      parent.properties["child"].description.as_deref(),
      Some("Inner field")
    );
    assert_eq!(
      parent.properties["optional"].schema_type.as_deref(),
      Some("integer")
    );
  }

  #[test]
  fn arrays_with_object_items() {
    let module = decode(
      "
id: array-test
namespace: test
description: Test array types
schema:
  type: object
  properties:
    tags:
      type: array
      items:
        type: string
    users:
      type: array
      items:
        type: object
        required:
          - name
        properties:
          name:
            type: string
          age:
            type: integer
",
    )
    .unwrap();

    let tags = &module.schema.properties["tags"];
    assert_eq!(tags.schema_type.as_deref(), Some("array"));
    assert_eq!(
      tags.items.as_ref().unwrap().schema_type.as_deref(),
      Some("string")
    );

    let users = module.schema.properties["users"].items.as_ref().unwrap();
    assert_eq!(users.schema_type.as_deref(), Some("object"));
    assert_eq!(users.required, vec!["name"]);
    assert_eq!(users.properties.len(), 2);
  }

  #[test]
  fn enum_values_keep_their_order() {
    let module = decode(
      "
id: enum-test
namespace: test
description: Test enum values
schema:
  type: object
  properties:
    status:
      type: string
      enum:
        - PENDING
        - ACTIVE
        - COMPLETED
        - CANCELLED
",
    )
    .unwrap();

    let status = &module.schema.properties["status"];
    assert_eq!(
      status.enum_values,
      vec![
        json!("PENDING"),
        json!("ACTIVE"),
        json!("COMPLETED"),
        json!("CANCELLED"),
      ]
    );
  }

  #[test]
  fn numeric_constraints_decode_without_rounding() {
    let module = decode(
      "
id: constraint-test
namespace: test
description: Test schema constraints
schema:
  type: object
  properties:
    percentage:
      type: integer
      minimum: 0
      maximum: 100
    rating:
      type: number
      minimum: 0.5
      maximum: 4.75
",
    )
    .unwrap();

    let percentage = &module.schema.properties["percentage"];
    assert_eq!(percentage.minimum, Some(0.0));
    assert_eq!(percentage.maximum, Some(100.0));

    let rating = &module.schema.properties["rating"];
    assert_eq!(rating.minimum, Some(0.5));
    assert_eq!(rating.maximum, Some(4.75));
  }

  #[test]
  fn string_constraints() {
    let module = decode(
      "
id: string-test
namespace: test
description: Test string constraints
schema:
  type: object
  properties:
    username:
      type: string
      minLength: 3
      maxLength: 50
      pattern: \"^[a-zA-Z0-9_]+$\"
",
    )
    .unwrap();

    let username = &module.schema.properties["username"];
    assert_eq!(username.min_length, Some(3));
    assert_eq!(username.max_length, Some(50));
    assert_eq!(username.pattern.as_deref(), Some("^[a-zA-Z0-9_]+$"));
  }

  #[test]
  fn ui_block() {
    let module = decode(
      "
id: ui-test
namespace: test
description: Test UI component
schema:
  type: object
  properties:
    content:
      type: string
ui:
  component: text-editor
  target: content
  params:
    maxLength: 1000
    placeholder: Enter text here
",
    )
    .unwrap();

    assert_eq!(module.ui.component, "text-editor");
    assert_eq!(module.ui.target, "content");
    assert_eq!(module.ui.params["maxLength"], json!(1000));
    assert_eq!(module.ui.params["placeholder"], json!("Enter text here"));
  }

  #[test]
  fn empty_ui_block_is_the_zero_descriptor() {
    let module = decode(
      "
id: empty-ui
namespace: test
description: Test empty UI
schema:
  type: object
  properties:
    field:
      type: string
ui:
",
    )
    .unwrap();

    assert_eq!(module.ui.component, "");
    assert_eq!(module.ui.target, "");
    assert!(module.ui.params.is_empty());
  }

  #[test]
  fn missing_ui_block_is_the_zero_descriptor() {
    let module = decode(
      "
id: no-ui
namespace: test
description: No UI at all
schema:
  type: object
",
    )
    .unwrap();

    assert_eq!(module.ui, Default::default());
  }

  #[test]
  fn decode_bytes_matches_decode() {
    let source = "
id: bytes-test
namespace: test
description: Same result from raw bytes
schema:
  type: object
";
    assert_eq!(
      decode_bytes(source.as_bytes()).unwrap(),
      decode(source).unwrap()
    );
  }

  #[test]
  fn multiline_description_preserves_newlines() {
    let module = decode(
      "
id: multiline-desc
namespace: test
description: |
  This is a multiline description.
  It spans multiple lines.
  And has proper formatting.
schema:
  type: object
",
    )
    .unwrap();

    assert_eq!(
      module.description,
      "This is a multiline description.\nIt spans multiple lines.\nAnd has proper formatting.\n"
    );
  }

  #[test]
  fn round_trip_fidelity() {
    // Decode a manifest with nested objects, arrays of objects, enums and
    // numeric bounds, then re-serialize the typed schema and check every
    // field survives in canonical form.
    let module = decode(
      "
id: fidelity
namespace: test
description: Full fidelity check
schema:
  type: object
  required:
    - beats
  properties:
    beats:
      type: array
      items:
        type: object
        required:
          - title
        properties:
          title:
            type: string
            minLength: 1
          weight:
            type: number
            minimum: 0
            maximum: 1
          kind:
            type: string
            enum:
              - setup
              - payoff
",
    )
    .unwrap();

    let wire = serde_json::to_value(&module.schema).unwrap();
    assert_eq!(
      wire,
      json!({
        "type": "object",
        "required": ["beats"],
        "properties": {
          "beats": {
            "type": "array",
            "items": {
              "type": "object",
              "required": ["title"],
              "properties": {
                "title": { "type": "string", "minLength": 1 },
                "weight": { "type": "number", "minimum": 0.0, "maximum": 1.0 },
                "kind": { "type": "string", "enum": ["setup", "payoff"] },
              },
            },
          },
        },
      })
    );
  }

  // ── Failure stages ──────────────────────────────────────────────────────

  #[test]
  fn invalid_yaml_fails_at_the_parse_stage() {
    let err = decode("id: [unclosed").unwrap_err();
    assert!(matches!(err, DecodeError::Parse(_)));
  }

  #[test]
  fn tagged_values_fail_at_the_normalize_stage() {
    let err = decode(
      "
id: tagged
namespace: test
description: !secret vault-ref
schema:
  type: object
",
    )
    .unwrap_err();
    assert!(matches!(err, DecodeError::Normalize(_)));
  }

  #[test]
  fn sequence_keyed_mappings_fail_at_the_normalize_stage() {
    let err = decode(
      "
id: bad-key
namespace: test
schema:
  ? [a, b]
  : value
",
    )
    .unwrap_err();
    assert!(matches!(err, DecodeError::Normalize(_)));
  }

  #[test]
  fn mistyped_fields_fail_at_the_typed_stage() {
    let err = decode(
      "
id: bad-minimum
namespace: test
description: minimum must be numeric
schema:
  type: object
  properties:
    score:
      type: number
      minimum: lots
",
    )
    .unwrap_err();
    assert!(matches!(err, DecodeError::Typed(_)));
  }

  #[test]
  fn top_level_scalar_fails_at_the_typed_stage() {
    let err = decode("just a string").unwrap_err();
    assert!(matches!(err, DecodeError::Typed(_)));
  }
}
