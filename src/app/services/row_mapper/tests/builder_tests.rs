//! Tests for mapping closure evaluation

use crate::app::services::row_mapper::{FieldBinding, Locator, MappingBuilder, Transform};
use crate::constants::DEFAULT_DELIMITER;
use crate::error::MapperError;

#[test]
fn test_defaults() {
    let row_map = MappingBuilder::build(|_| {}).unwrap();

    assert_eq!(row_map.start_row(), 0);
    assert_eq!(row_map.stop_row(), None);
    assert_eq!(row_map.delimiter(), DEFAULT_DELIMITER);
    assert!(!row_map.named_columns_enabled());
    assert!(row_map.bindings().is_empty());
    assert!(!row_map.requires_header());
}

#[test]
fn test_row_bounds_and_delimiter() {
    let row_map = MappingBuilder::build(|m| {
        m.start_at_row(2).stop_at_row(9).delimited_by('|');
    })
    .unwrap();

    assert_eq!(row_map.start_row(), 2);
    assert_eq!(row_map.stop_row(), Some(9));
    assert_eq!(row_map.delimiter(), '|');
}

#[test]
fn test_bounds_checked_after_closure() {
    // stop before start in call order is fine as long as the result is valid
    let row_map = MappingBuilder::build(|m| {
        m.stop_at_row(5);
        m.start_at_row(5);
    })
    .unwrap();
    assert_eq!(row_map.stop_row(), Some(5));

    let err = MappingBuilder::build(|m| {
        m.start_at_row(4);
        m.stop_at_row(3);
    })
    .unwrap_err();
    assert!(matches!(err, MapperError::Configuration { .. }));
}

#[test]
fn test_unsupported_delimiter() {
    let err = MappingBuilder::build(|m| {
        m.delimited_by('"');
    })
    .unwrap_err();
    assert!(matches!(err, MapperError::Configuration { .. }));

    let err = MappingBuilder::build(|m| {
        m.delimited_by('→');
    })
    .unwrap_err();
    assert!(matches!(err, MapperError::Configuration { .. }));
}

#[test]
fn test_positional_fields_are_sequential() {
    let row_map = MappingBuilder::build(|m| {
        m.field("first");
        m.fields(["second", "third"]);
    })
    .unwrap();

    let locators: Vec<&Locator> = row_map.bindings().iter().map(FieldBinding::locator).collect();
    assert_eq!(
        locators,
        vec![
            &Locator::Position(0),
            &Locator::Position(1),
            &Locator::Position(2)
        ]
    );
}

#[test]
fn test_redeclaring_returns_existing_binding() {
    let row_map = MappingBuilder::build(|m| {
        m.fields(["first_name", "last_name"]);
        m.field("first_name").map_named("upcase_name");
        m.field("age");
    })
    .unwrap();

    assert_eq!(row_map.bindings().len(), 3);
    let first_name = row_map.binding("first_name").unwrap();
    assert_eq!(first_name.locator(), &Locator::Position(0));
    assert!(matches!(first_name.transform(), Some(Transform::Named(name)) if name == "upcase_name"));

    // The re-reference did not consume a position.
    assert_eq!(
        row_map.binding("age").unwrap().locator(),
        &Locator::Position(2)
    );
}

#[test]
fn test_named_mode_fields_use_headers() {
    let row_map = MappingBuilder::build(|m| {
        m.named_columns();
        m.field_as("surname", "Last Name");
        m.field("age").map(|row, index| Ok(row[index].parse::<i64>()?.into()));
    })
    .unwrap();

    assert!(row_map.named_columns_enabled());
    assert!(row_map.requires_header());
    assert_eq!(
        row_map.binding("surname").unwrap().locator(),
        &Locator::Header("Last Name".to_string())
    );
    assert_eq!(
        row_map.binding("age").unwrap().locator(),
        &Locator::Header("age".to_string())
    );
    assert!(row_map.binding("age").unwrap().has_transform());
}

#[test]
fn test_header_declarations_enable_named_columns() {
    let row_map = MappingBuilder::build(|m| {
        m.read_attributes_from_file();
    })
    .unwrap();
    assert!(row_map.named_columns_enabled());
    assert!(row_map.requires_header());

    let row_map = MappingBuilder::build(|m| {
        m.add_attributes_by_name(["Age"]);
    })
    .unwrap();
    assert!(row_map.named_columns_enabled());
}

#[test]
fn test_builder_view_during_closure() {
    let row_map = MappingBuilder::build(|m| {
        m.start_at_row(3);
        assert_eq!(m.row_map().start_row(), 3);
        m.field("only");
        assert_eq!(m.row_map().bindings().len(), 1);
    })
    .unwrap();
    assert_eq!(row_map.bindings()[0].name(), "only");
}

#[test]
fn test_map_csv_entry_points() {
    let row_map = crate::map_csv(|m| {
        m.start_at_row(2);
    })
    .unwrap();
    assert_eq!(row_map.start_row(), 2);

    let row_map = crate::ImportEngine::new()
        .map_csv(|m| {
            m.start_at_row(2);
        })
        .unwrap();
    assert_eq!(row_map.start_row(), 2);
}
