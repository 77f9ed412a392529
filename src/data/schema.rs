//! Results Sheet Layout
//! Fixed column layout of the KCSE analysis workbook.

use serde::Serialize;

/// Workbook expected in the working directory.
pub const RESULTS_FILE_NAME: &str = "CAMP BRETHREN CHRISTIAN SCHOOL KCSE 2024 ANALYSIS.xlsx";

/// Sheet holding the results table.
pub const RESULTS_SHEET: &str = "Sheet1";

/// Title rows above the source header row.
pub const SKIP_ROWS: usize = 3;

/// Column names, assigned positionally over the source header.
pub const COLUMNS: [&str; 18] = [
    "Name",
    "Sex",
    "English",
    "Kiswahili",
    "Mathematics",
    "Biology",
    "Chemistry",
    "Physics",
    "Geography",
    "History",
    "CRE",
    "Agriculture",
    "Business Studies",
    "Home Science",
    "Computer",
    "Points",
    "Grade",
    "Position",
];

/// Subjects offered in the dropdown, in display order.
pub const SUBJECTS: [&str; 13] = [
    "English",
    "Kiswahili",
    "Mathematics",
    "Biology",
    "Chemistry",
    "Physics",
    "Geography",
    "History",
    "CRE",
    "Agriculture",
    "Business Studies",
    "Home Science",
    "Computer",
];

pub const DEFAULT_SUBJECT: &str = "English";
pub const SEX_COLUMN: &str = "Sex";
pub const GRADE_COLUMN: &str = "Grade";
pub const POINTS_COLUMN: &str = "Points";

/// Resolve a subject name to its canonical spelling.
pub fn lookup_subject(name: &str) -> Option<&'static str> {
    SUBJECTS
        .iter()
        .copied()
        .find(|subject| subject.eq_ignore_ascii_case(name.trim()))
}

/// A single spreadsheet cell after load.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Missing,
}

impl CellValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Display label; whole numbers drop the trailing `.0`.
    pub fn label(&self) -> Option<String> {
        match self {
            CellValue::Number(n) => Some(format_number(*n)),
            CellValue::Text(s) => Some(s.clone()),
            CellValue::Missing => None,
        }
    }
}

pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}
