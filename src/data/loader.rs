//! Results Workbook Loader Module
//! Reads the KCSE results sheet with calamine and builds a Polars table.

use super::schema::{CellValue, COLUMNS, RESULTS_FILE_NAME, RESULTS_SHEET, SKIP_ROWS};
use calamine::{open_workbook, Data, Range, Reader, Xlsx, XlsxError};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Text values read as missing, matching common spreadsheet NA markers.
const NA_MARKERS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("The file '{file_name}' was not found in the current directory: {}", dir.display())]
    FileNotFound { file_name: String, dir: PathBuf },
    #[error("Failed to read workbook: {0}")]
    Workbook(#[from] XlsxError),
    #[error("Sheet has no header row after skipping {0} rows")]
    EmptySheet(usize),
    #[error("Length mismatch: sheet has {found} columns, expected {expected}")]
    ColumnCount { expected: usize, found: usize },
    #[error("Failed to build results table: {0}")]
    Frame(#[from] PolarsError),
}

/// Loads the results workbook into a `DataFrame`.
pub struct ResultsLoader;

impl ResultsLoader {
    /// Load the fixed results file from `dir`.
    pub fn load(dir: &Path) -> Result<DataFrame, LoaderError> {
        let path = dir.join(RESULTS_FILE_NAME);
        if !path.exists() {
            return Err(LoaderError::FileNotFound {
                file_name: RESULTS_FILE_NAME.to_string(),
                dir: dir.to_path_buf(),
            });
        }

        Self::load_path(&path, RESULTS_SHEET)
    }

    /// Load `sheet` from the workbook at `path`.
    pub fn load_path(path: &Path, sheet: &str) -> Result<DataFrame, LoaderError> {
        let mut workbook: Xlsx<_> = open_workbook(path)?;
        let range = workbook.worksheet_range(sheet)?;
        frame_from_rows(grid_from_range(&range))
    }
}

/// Lay the used range out on absolute sheet positions, starting at `A1`.
///
/// Rows past the last one holding a value are left out, so a used range
/// stretched by formatting alone does not grow the grid.
fn grid_from_range(range: &Range<Data>) -> Vec<Vec<CellValue>> {
    let (Some(start), Some(end)) = (range.start(), range.end()) else {
        return Vec::new();
    };

    let Some(last) = range
        .rows()
        .enumerate()
        .filter(|(_, row)| row.iter().any(|cell| !matches!(cell, Data::Empty)))
        .map(|(idx, _)| idx)
        .last()
    else {
        return Vec::new();
    };

    let width = end.1 as usize + 1;
    let (top, left) = (start.0 as usize, start.1 as usize);

    let mut grid = vec![vec![CellValue::Missing; width]; top];
    grid.extend(range.rows().take(last + 1).map(|row| {
        let mut cells = vec![CellValue::Missing; left];
        cells.extend(row.iter().map(cell_value));
        cells
    }));

    grid
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
            if NA_MARKERS.contains(&s.as_str()) {
                CellValue::Missing
            } else {
                CellValue::Text(s.clone())
            }
        }
        Data::Bool(b) => CellValue::Text(if *b { "True" } else { "False" }.to_string()),
        Data::Error(_) | Data::Empty => CellValue::Missing,
    }
}

/// Build the results table from a sheet grid.
///
/// Skips the title rows and the source header, renames columns positionally,
/// and drops rows that are missing in every column.
pub fn frame_from_rows(rows: Vec<Vec<CellValue>>) -> Result<DataFrame, LoaderError> {
    let mut rows = rows.into_iter().skip(SKIP_ROWS);
    let header = rows.next().ok_or(LoaderError::EmptySheet(SKIP_ROWS))?;

    if header.len() != COLUMNS.len() {
        return Err(LoaderError::ColumnCount {
            expected: COLUMNS.len(),
            found: header.len(),
        });
    }

    let records: Vec<Vec<CellValue>> = rows
        .filter(|row| !row.iter().all(CellValue::is_missing))
        .collect();

    let columns = COLUMNS
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let cells: Vec<&CellValue> = records
                .iter()
                .map(|row| row.get(idx).unwrap_or(&CellValue::Missing))
                .collect();
            build_column(name, &cells)
        })
        .collect();

    Ok(DataFrame::new(columns)?)
}

/// Numeric when every present cell is a number, text otherwise.
fn build_column(name: &str, cells: &[&CellValue]) -> Column {
    let numeric = cells
        .iter()
        .all(|cell| matches!(cell, CellValue::Number(_) | CellValue::Missing));

    if numeric {
        let values: Vec<Option<f64>> = cells.iter().map(|cell| cell.as_number()).collect();
        Column::new(name.into(), values)
    } else {
        let values: Vec<Option<String>> = cells.iter().map(|cell| cell.label()).collect();
        Column::new(name.into(), values)
    }
}

#[cfg(test)]
#[path = "loader_test.rs"]
mod tests;
