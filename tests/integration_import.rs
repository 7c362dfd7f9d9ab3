//! Integration tests for importing delimited files through the public API
//!
//! Each test writes a fixture to a temporary file and imports it the way a
//! caller would: either through a caller-owned `ImportEngine` that carries
//! its own function table, or through the crate-level `import` function.

use csv::StringRecord;
use csv_mapper::{
    FunctionTable, ImportEngine, ImportOptions, MapperError, Record, Value, transform,
};
use std::io::Write;
use tempfile::NamedTempFile;

const PEOPLE: &str = "First Name,Last Name,Age
John,Doe,27
Jane,Doe,26
Bob,Smith,45
";

const PEOPLE_WITH_BLANK_HEADER: &str = ",First Name,Last Name,Age
unnamed_value,John,Doe,27
unnamed_value,Jane,Doe,26
unnamed_value,Bob,Smith,45
";

/// Helper to write fixture content to a temporary file
fn fixture(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn path_of(file: &NamedTempFile) -> &str {
    file.path().to_str().unwrap()
}

/// Engine a caller would own, exposing one of its functions by name
fn caller_engine() -> ImportEngine {
    let functions = FunctionTable::new().with("upcase_name", |row: &StringRecord, index| {
        Ok(Value::Text(row[index].to_uppercase()))
    });
    ImportEngine::with_functions(functions)
}

fn text(record: &Record, name: &str) -> String {
    record.get_str(name).unwrap().unwrap().to_string()
}

/// Positional bindings on a single line of literal text
#[test]
fn test_positional_bindings_on_literal_text() {
    for records in [
        caller_engine()
            .import("foo,bar,00,01", &ImportOptions::io(), |m| {
                m.field("first");
                m.field("second");
            })
            .unwrap(),
        csv_mapper::import("foo,bar,00,01", &ImportOptions::io(), |m| {
            m.field("first");
            m.field("second");
        })
        .unwrap(),
    ] {
        assert_eq!(records.len(), 1);
        assert_eq!(text(&records[0], "first"), "foo");
        assert_eq!(text(&records[0], "second"), "bar");
    }
}

/// A pipe-delimited line gives the same result as the comma one
#[test]
fn test_pipe_delimiter_matches_comma_result() {
    let options = ImportOptions::from_pairs([("type", "io")]).unwrap();

    let comma = csv_mapper::import("foo,bar,00,01", &options, |m| {
        m.fields(["first", "second"]);
    })
    .unwrap();
    let piped = csv_mapper::import("foo|bar|00|01", &options, |m| {
        m.delimited_by('|');
        m.fields(["first", "second"]);
    })
    .unwrap();

    assert_eq!(comma, piped);
}

#[test]
fn test_file_import_skipping_header() {
    let file = fixture(PEOPLE);

    let records = csv_mapper::import(path_of(&file), &ImportOptions::default(), |m| {
        m.start_at_row(1);
        m.fields(["first_name", "last_name", "age"]);
    })
    .unwrap();

    assert_eq!(records.len(), 3);
}

#[test]
fn test_file_import_stops_at_row() {
    let file = fixture(PEOPLE);

    let records = caller_engine()
        .import(path_of(&file), &ImportOptions::file(), |m| {
            m.start_at_row(1);
            m.stop_at_row(2);
            m.fields(["first_name", "last_name", "age"]);
        })
        .unwrap();

    assert_eq!(records.len(), 2);
}

#[test]
fn test_read_attributes_from_file_with_alias() {
    let file = fixture(PEOPLE);

    let records = csv_mapper::import(path_of(&file), &ImportOptions::file(), |m| {
        m.read_attributes_from_file_with_aliases([("Age", "number_of_years_old")]);
    })
    .unwrap();

    assert_eq!(text(&records[1], "first_name"), "Jane");
    assert_eq!(text(&records[1], "last_name"), "Doe");
    // No coercion without a transform
    assert_eq!(text(&records[1], "number_of_years_old"), "26");
}

#[test]
fn test_integer_transform_leaves_siblings_as_text() {
    let file = fixture(PEOPLE);

    let records = csv_mapper::import(path_of(&file), &ImportOptions::file(), |m| {
        m.read_attributes_from_file_with_aliases([("Age", "number_of_years_old")]);
        m.field("number_of_years_old")
            .map(|row, index| Ok(Value::Integer(row[index].trim().parse()?)));
    })
    .unwrap();

    assert_eq!(records[1].get("number_of_years_old").unwrap(), &Value::Integer(26));
    assert_eq!(records[1].get("first_name").unwrap(), &Value::from("Jane"));
}

#[test]
fn test_named_columns_with_blank_header() {
    let file = fixture(PEOPLE_WITH_BLANK_HEADER);

    let records = csv_mapper::import(path_of(&file), &ImportOptions::file(), |m| {
        m.named_columns();
        m.field_as("surname", "Last Name");
        m.field("age").map_with(transform::integer());
    })
    .unwrap();

    assert_eq!(text(&records[1], "surname"), "Doe");
    assert_eq!(records[1].get("age").unwrap().as_integer(), Some(26));
    assert!(matches!(
        records[1].get("first_name"),
        Err(MapperError::AttributeAccess { .. })
    ));
}

#[test]
fn test_default_names_for_blank_headers() {
    let file = fixture(PEOPLE_WITH_BLANK_HEADER);

    let records = csv_mapper::import(path_of(&file), &ImportOptions::file(), |m| {
        m.read_attributes_from_file();
    })
    .unwrap();

    assert_eq!(text(&records[1], "_field_1"), "unnamed_value");
    assert_eq!(
        records[0].names(),
        &["_field_1", "first_name", "last_name", "age"]
    );
}

#[test]
fn test_unknown_names_fail_before_any_record() {
    let file = fixture(PEOPLE_WITH_BLANK_HEADER);

    let err = csv_mapper::import(path_of(&file), &ImportOptions::file(), |m| {
        m.add_attributes_by_name(["doesnt_exist"]);
    })
    .unwrap_err();
    assert!(matches!(err, MapperError::Resolution { .. }));

    let err = csv_mapper::import(path_of(&file), &ImportOptions::file(), |m| {
        m.named_columns();
        m.field_as("my_new_field", "doesnt_exist");
    })
    .unwrap_err();
    assert!(matches!(err, MapperError::Resolution { .. }));
}

#[test]
fn test_pushed_down_header() {
    let content = format!("report\nexported,today\n,\nby,nobody\nignore,me\n{}", PEOPLE);
    let file = fixture(&content);

    let records = csv_mapper::import(path_of(&file), &ImportOptions::file(), |m| {
        m.start_at_row(5);
        m.named_columns();
        m.field_as("surname", "Last Name");
        m.field("age").map_with(transform::integer());
    })
    .unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[1].get("age").unwrap(), &Value::Integer(26));
}

#[test]
fn test_named_transform_from_caller() {
    let file = fixture(PEOPLE);

    let records = caller_engine()
        .import(path_of(&file), &ImportOptions::file(), |m| {
            m.start_at_row(1);
            m.field("first_name").map_named("upcase_name");
        })
        .unwrap();

    assert_eq!(text(&records[0], "first_name"), "JOHN");
}

#[test]
fn test_named_transform_without_caller_functions() {
    let file = fixture(PEOPLE);

    let err = csv_mapper::import(path_of(&file), &ImportOptions::file(), |m| {
        m.start_at_row(1);
        m.field("first_name").map_named("upcase_name");
    })
    .unwrap_err();

    assert!(matches!(err, MapperError::TransformInvocation { .. }));
}

#[test]
fn test_map_csv_returns_row_map() {
    let row_map = csv_mapper::map_csv(|m| {
        m.start_at_row(2);
    })
    .unwrap();
    assert_eq!(row_map.start_row(), 2);
}

#[test]
fn test_import_from_stream() {
    let reader = std::io::Cursor::new(PEOPLE.as_bytes().to_vec());

    let result = ImportEngine::new()
        .import_with_stats(csv_mapper::DelimitedSource::from_reader(reader), |m| {
            m.named_columns();
            m.fields(["first_name", "age"]);
        })
        .unwrap();

    assert_eq!(result.records.len(), 3);
    assert_eq!(result.stats.header_row, Some(0));
    assert_eq!(text(&result.records[2], "age"), "45");
}
