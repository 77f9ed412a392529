//! Data Processor Module
//! Column access and grouping over the loaded results table.

use super::schema::CellValue;
use polars::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Read helpers over the results `DataFrame`.
pub struct DataProcessor;

impl DataProcessor {
    /// Every row's value for `column`, in row order.
    pub fn values(df: &DataFrame, column: &str) -> Result<Vec<CellValue>, ProcessorError> {
        let col = df.column(column)?;

        let values = match col.dtype() {
            DataType::Float64 => col
                .f64()?
                .into_iter()
                .map(|v| v.map_or(CellValue::Missing, CellValue::Number))
                .collect(),
            DataType::String => col
                .as_materialized_series()
                .str()?
                .into_iter()
                .map(|v| v.map_or(CellValue::Missing, |s| CellValue::Text(s.to_string())))
                .collect(),
            _ => {
                let as_text = col.cast(&DataType::String)?;
                as_text
                    .as_materialized_series()
                    .str()?
                    .into_iter()
                    .map(|v| v.map_or(CellValue::Missing, |s| CellValue::Text(s.to_string())))
                    .collect()
            }
        };

        Ok(values)
    }

    /// Text label per row; `None` where the cell is missing.
    pub fn labels(df: &DataFrame, column: &str) -> Result<Vec<Option<String>>, ProcessorError> {
        Ok(Self::values(df, column)?
            .iter()
            .map(CellValue::label)
            .collect())
    }

    /// Distinct labels of `group_col` in order of first appearance.
    pub fn groups(df: &DataFrame, group_col: &str) -> Result<Vec<String>, ProcessorError> {
        let mut groups: Vec<String> = Vec::new();
        for label in Self::labels(df, group_col)?.into_iter().flatten() {
            if !groups.contains(&label) {
                groups.push(label);
            }
        }
        Ok(groups)
    }

    /// Values of `value_col` split by `group_col`.
    ///
    /// Rows with a missing group are skipped.
    pub fn split_by(
        df: &DataFrame,
        value_col: &str,
        group_col: &str,
    ) -> Result<Vec<(String, Vec<CellValue>)>, ProcessorError> {
        let labels = Self::labels(df, group_col)?;
        let values = Self::values(df, value_col)?;

        let mut split: Vec<(String, Vec<CellValue>)> = Vec::new();
        for (label, value) in labels.into_iter().zip(values) {
            let Some(label) = label else {
                continue;
            };
            match split.iter_mut().find(|(group, _)| *group == label) {
                Some((_, bucket)) => bucket.push(value),
                None => split.push((label, vec![value])),
            }
        }

        Ok(split)
    }

    /// Numeric values of `value_col` split by `group_col`.
    ///
    /// Text that does not parse as a number is dropped, as are NaNs.
    pub fn numeric_by_group(
        df: &DataFrame,
        value_col: &str,
        group_col: &str,
    ) -> Result<Vec<(String, Vec<f64>)>, ProcessorError> {
        let labels = Self::labels(df, group_col)?;
        let value_f64 = df.column(value_col)?.cast(&DataType::Float64)?;
        let value_ca = value_f64.f64()?;

        let mut split: Vec<(String, Vec<f64>)> = Self::groups(df, group_col)?
            .into_iter()
            .map(|group| (group, Vec::new()))
            .collect();

        for (label, value) in labels.iter().zip(value_ca.into_iter()) {
            if let (Some(label), Some(v)) = (label, value) {
                if v.is_nan() {
                    continue;
                }
                if let Some((_, bucket)) = split.iter_mut().find(|(group, _)| group == label) {
                    bucket.push(v);
                }
            }
        }

        Ok(split)
    }
}

#[cfg(test)]
#[path = "processor_test.rs"]
mod tests;
