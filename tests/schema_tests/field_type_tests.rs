//! FieldType Tests

use blockstore::schema::{FieldType, INT_LEN, STR20_LEN};
use blockstore::StoreError;

#[test]
fn test_widths() {
    assert_eq!(FieldType::Int.width(), INT_LEN);
    assert_eq!(FieldType::Str20.width(), STR20_LEN);
    assert_eq!(STR20_LEN, 20);
}

#[test]
fn test_parse_tags() {
    assert_eq!("INT".parse::<FieldType>().unwrap(), FieldType::Int);
    assert_eq!("str20".parse::<FieldType>().unwrap(), FieldType::Str20);
    assert_eq!(
        "BLOB".parse::<FieldType>().unwrap_err(),
        StoreError::UnsupportedFieldType("BLOB".to_string())
    );
}

#[test]
fn test_numeric_tags() {
    assert_eq!(FieldType::try_from(1u8).unwrap(), FieldType::Int);
    assert_eq!(FieldType::try_from(2u8).unwrap(), FieldType::Str20);
    assert!(FieldType::try_from(0u8).is_err());
    assert!(FieldType::try_from(3u8).is_err());
}

#[test]
fn test_display_round_trips_through_parse() {
    for field_type in [FieldType::Int, FieldType::Str20] {
        assert_eq!(field_type.to_string().parse::<FieldType>().unwrap(), field_type);
    }
}
