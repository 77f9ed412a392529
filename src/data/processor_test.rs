use super::*;
use crate::data::frame_from_rows;
use crate::test_support::{sample_frame, sample_rows};

#[test]
fn groups_follow_first_appearance() {
    let df = sample_frame();
    assert_eq!(DataProcessor::groups(&df, "Sex").unwrap(), vec!["F", "M"]);
    assert_eq!(
        DataProcessor::groups(&df, "Grade").unwrap(),
        vec!["B+", "B-", "C+", "B", "C-"]
    );
}

#[test]
fn labels_format_whole_numbers() {
    let df = sample_frame();
    let labels = DataProcessor::labels(&df, "Position").unwrap();
    assert_eq!(labels[0].as_deref(), Some("1"));
    assert_eq!(labels[4].as_deref(), Some("5"));
}

#[test]
fn split_by_keeps_row_order_within_groups() {
    let df = sample_frame();
    let split = DataProcessor::split_by(&df, "Points", "Sex").unwrap();
    assert_eq!(split.len(), 2);
    assert_eq!(split[0].0, "F");
    assert_eq!(
        split[0].1,
        vec![CellValue::Number(64.0), CellValue::Number(49.0), CellValue::Number(38.0)]
    );
    assert_eq!(split[1].0, "M");
    assert_eq!(split[1].1, vec![CellValue::Number(52.0), CellValue::Number(60.0)]);
}

#[test]
fn split_by_skips_missing_groups() {
    let mut rows = sample_rows();
    rows[4][1] = CellValue::Missing;
    let df = frame_from_rows(rows).unwrap();
    let split = DataProcessor::split_by(&df, "Points", "Sex").unwrap();
    let total: usize = split.iter().map(|(_, v)| v.len()).sum();
    assert_eq!(total, 4);
}

#[test]
fn numeric_by_group_drops_unparseable_text() {
    let mut rows = sample_rows();
    rows[4][4] = CellValue::Text("X".to_string());
    let df = frame_from_rows(rows).unwrap();
    let split = DataProcessor::numeric_by_group(&df, "Mathematics", "Sex").unwrap();
    assert_eq!(split[0], ("F".to_string(), vec![40.0, 35.0]));
    assert_eq!(split[1], ("M".to_string(), vec![72.0, 81.0]));
}

#[test]
fn unknown_column_is_an_error() {
    let df = sample_frame();
    assert!(DataProcessor::values(&df, "Music").is_err());
}
