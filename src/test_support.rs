//! Shared fixtures for unit tests.

use crate::data::schema::{CellValue, COLUMNS};
use crate::data::frame_from_rows;
use polars::prelude::DataFrame;

pub fn num(v: f64) -> CellValue {
    CellValue::Number(v)
}

pub fn text(s: &str) -> CellValue {
    CellValue::Text(s.to_string())
}

pub fn blank_row() -> Vec<CellValue> {
    vec![CellValue::Missing; COLUMNS.len()]
}

/// One student row: 13 subject scores in dropdown order.
pub fn student(name: &str, sex: &str, scores: [f64; 13], points: f64, grade: &str, pos: f64) -> Vec<CellValue> {
    let mut row = vec![text(name), text(sex)];
    row.extend(scores.iter().map(|s| num(*s)));
    row.push(num(points));
    row.push(text(grade));
    row.push(num(pos));
    row
}

/// Title rows, a source header, five students and two blank rows.
pub fn sample_rows() -> Vec<Vec<CellValue>> {
    let mut title = blank_row();
    title[0] = text("CAMP BRETHREN CHRISTIAN SCHOOL");
    let mut subtitle = blank_row();
    subtitle[0] = text("KCSE 2024 ANALYSIS");
    let header: Vec<CellValue> = COLUMNS.iter().map(|c| text(&c.to_uppercase())).collect();

    vec![
        title,
        subtitle,
        blank_row(),
        header,
        student("Achieng Otieno", "F", [70.0, 65.0, 58.0, 62.0, 55.0, 60.0, 71.0, 68.0, 74.0, 66.0, 59.0, 63.0, 80.0], 64.0, "B+", 1.0),
        student("Brian Kiprop", "M", [55.0, 60.0, 72.0, 50.0, 48.0, 61.0, 52.0, 57.0, 60.0, 58.0, 62.0, 45.0, 70.0], 52.0, "B-", 3.0),
        blank_row(),
        student("Chebet Wanjiru", "F", [62.0, 70.0, 40.0, 45.0, 42.0, 38.0, 60.0, 64.0, 66.0, 61.0, 57.0, 69.0, 55.0], 49.0, "C+", 4.0),
        student("David Mwangi", "M", [68.0, 58.0, 81.0, 66.0, 70.0, 75.0, 59.0, 61.0, 55.0, 64.0, 73.0, 50.0, 77.0], 60.0, "B", 2.0),
        student("Esther Njeri", "F", [48.0, 52.0, 35.0, 40.0, 37.0, 33.0, 45.0, 50.0, 47.0, 44.0, 41.0, 53.0, 49.0], 38.0, "C-", 5.0),
        blank_row(),
    ]
}

pub fn sample_frame() -> DataFrame {
    frame_from_rows(sample_rows()).expect("sample rows build a frame")
}
