//! Schema Tests
//!
//! Tests verify:
//! - Valid construction for every field count up to the limit
//! - Rejection of malformed field lists
//! - Offset/name/type lookups and their failures
//! - Capacity arithmetic
//! - Structural equality and descriptor encoding

use blockstore::{Config, FieldType, Schema, StoreError};

fn names(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("f{}", i)).collect()
}

fn alternating_types(n: usize) -> Vec<FieldType> {
    (0..n)
        .map(|i| if i % 2 == 0 { FieldType::Int } else { FieldType::Str20 })
        .collect()
}

fn id_name_schema() -> Schema {
    Schema::from_fields(
        &Config::default(),
        &[("id", FieldType::Int), ("name", FieldType::Str20)],
    )
    .unwrap()
}

// =============================================================================
// Construction Tests
// =============================================================================

#[test]
fn test_every_field_count_up_to_limit() {
    let config = Config::default();
    for n in 1..=8 {
        let schema = Schema::new(&config, names(n), alternating_types(n)).unwrap();
        assert_eq!(schema.num_fields(), n);
        assert_eq!(schema.tuples_per_block(), config.fields_per_block / n);
    }
}

#[test]
fn test_id_name_holds_four_per_block() {
    let schema = id_name_schema();
    assert_eq!(schema.tuples_per_block(), 4);
    assert_eq!(schema.field_names(), &["id".to_string(), "name".to_string()]);
    assert_eq!(schema.field_types(), &[FieldType::Int, FieldType::Str20]);
}

#[test]
fn test_uneven_width_wastes_remainder() {
    let schema = Schema::new(&Config::default(), names(3), alternating_types(3)).unwrap();
    assert_eq!(schema.tuples_per_block(), 2);
}

#[test]
fn test_capacity_follows_config() {
    let config = Config::builder().fields_per_block(12).build();
    let schema = Schema::new(&config, names(3), alternating_types(3)).unwrap();
    assert_eq!(schema.tuples_per_block(), 4);
}

#[test]
fn test_length_mismatch_rejected() {
    let result = Schema::new(&Config::default(), names(2), alternating_types(3));
    assert_eq!(
        result.unwrap_err(),
        StoreError::FieldCountMismatch { names: 2, types: 3 }
    );
}

#[test]
fn test_no_fields_rejected() {
    let result = Schema::new(&Config::default(), vec![], vec![]);
    assert_eq!(result.unwrap_err(), StoreError::NoFields);
}

#[test]
fn test_too_many_fields_rejected() {
    let result = Schema::new(&Config::default(), names(9), alternating_types(9));
    assert_eq!(
        result.unwrap_err(),
        StoreError::TooManyFields { count: 9, max: 8 }
    );
}

#[test]
fn test_empty_name_rejected() {
    let result = Schema::from_fields(
        &Config::default(),
        &[("id", FieldType::Int), ("", FieldType::Str20)],
    );
    assert_eq!(result.unwrap_err(), StoreError::EmptyFieldName { offset: 1 });
}

#[test]
fn test_first_duplicate_pair_reported() {
    let result = Schema::from_fields(
        &Config::default(),
        &[
            ("a", FieldType::Int),
            ("b", FieldType::Int),
            ("b", FieldType::Str20),
            ("a", FieldType::Str20),
        ],
    );
    assert_eq!(
        result.unwrap_err(),
        StoreError::DuplicateFieldName {
            name: "a".to_string(),
            first: 0,
            second: 3,
        }
    );
}

#[test]
fn test_unsupported_type_tag_rejected() {
    let result = Schema::from_definitions(&Config::default(), &[("id", "INT"), ("score", "FLOAT")]);
    assert!(matches!(result, Err(StoreError::UnsupportedFieldType(_))));
}

#[test]
fn test_name_checks_run_before_type_tags() {
    let result = Schema::from_definitions(
        &Config::default(),
        &[("id", "INT"), ("id", "FLOAT")],
    );
    assert_eq!(
        result.unwrap_err(),
        StoreError::DuplicateFieldName {
            name: "id".to_string(),
            first: 0,
            second: 1,
        }
    );

    let result = Schema::from_definitions(&Config::default(), &[("", "BLOB")]);
    assert_eq!(result.unwrap_err(), StoreError::EmptyFieldName { offset: 0 });
}

#[test]
fn test_fingerprint_tracks_names_and_types() {
    let a = id_name_schema();
    assert_eq!(a.fingerprint().unwrap(), id_name_schema().fingerprint().unwrap());

    let renamed = Schema::from_fields(
        &Config::default(),
        &[("id", FieldType::Int), ("label", FieldType::Str20)],
    )
    .unwrap();
    assert_ne!(a.fingerprint().unwrap(), renamed.fingerprint().unwrap());
}

#[test]
fn test_from_definitions_accepts_both_spellings() {
    let schema = Schema::from_definitions(
        &Config::default(),
        &[("id", "INTEGER"), ("name", "fixed_string20")],
    )
    .unwrap();
    assert_eq!(schema, id_name_schema());
}

// =============================================================================
// Lookup Tests
// =============================================================================

#[test]
fn test_lookups() {
    let schema = id_name_schema();
    assert_eq!(schema.field_name(1).unwrap(), "name");
    assert_eq!(schema.field_type(0).unwrap(), FieldType::Int);
    assert_eq!(schema.field_type_by_name("name").unwrap(), FieldType::Str20);
    assert_eq!(schema.field_offset("name").unwrap(), 1);
    assert!(schema.field_exists("id"));
    assert!(!schema.field_exists("missing"));
}

#[test]
fn test_lookup_failures() {
    let schema = id_name_schema();
    assert_eq!(
        schema.field_name(2).unwrap_err(),
        StoreError::FieldOffsetOutOfBound { offset: 2, count: 2 }
    );
    assert!(schema.field_type(5).is_err());
    assert_eq!(
        schema.field_offset("missing").unwrap_err(),
        StoreError::FieldNotFound("missing".to_string())
    );
    assert!(schema.field_type_by_name("missing").is_err());
}

#[test]
fn test_tuple_width() {
    assert_eq!(id_name_schema().tuple_width(), 24);
}

// =============================================================================
// Equality / Rendering Tests
// =============================================================================

#[test]
fn test_structural_equality() {
    let a = id_name_schema();
    let b = id_name_schema();
    assert_eq!(a, b);

    let reordered = Schema::from_fields(
        &Config::default(),
        &[("name", FieldType::Str20), ("id", FieldType::Int)],
    )
    .unwrap();
    assert_ne!(a, reordered);

    let retyped = Schema::from_fields(
        &Config::default(),
        &[("id", FieldType::Int), ("name", FieldType::Int)],
    )
    .unwrap();
    assert_ne!(a, retyped);
}

#[test]
fn test_clone_is_independent_and_equal() {
    let a = id_name_schema();
    let b = a.clone();
    drop(a);
    assert_eq!(b.field_offset("id").unwrap(), 0);
}

#[test]
fn test_display() {
    let schema = id_name_schema();
    assert_eq!(schema.to_string(), "id INT;\nname STR20;");
    assert_eq!(schema.field_names_line(), "id\tname\t");
}

// =============================================================================
// Descriptor Encoding Tests
// =============================================================================

#[test]
fn test_encode_decode_descriptor() {
    let schema = id_name_schema();
    let bytes = schema.encode().unwrap();
    let decoded = Schema::decode(&Config::default(), &bytes).unwrap();
    assert_eq!(decoded, schema);
}

#[test]
fn test_decode_revalidates_against_config() {
    let wide = Schema::new(&Config::default(), names(6), alternating_types(6)).unwrap();
    let bytes = wide.encode().unwrap();

    let narrow = Config::builder().max_fields_per_relation(4).build();
    assert_eq!(
        Schema::decode(&narrow, &bytes).unwrap_err(),
        StoreError::TooManyFields { count: 6, max: 4 }
    );
}

#[test]
fn test_decode_garbage_fails() {
    let result = Schema::decode(&Config::default(), &[0xff, 0x01]);
    assert!(matches!(result, Err(StoreError::Serialization(_))));
}
