//! Statistics Calculator Module
//! Descriptive statistics per gender group and Welch's t-test between them.

use crate::data::schema::{POINTS_COLUMN, SEX_COLUMN, SUBJECTS};
use crate::data::{DataProcessor, ProcessorError};
use polars::prelude::*;
use rayon::prelude::*;
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Significance threshold for t-test
pub const SIGNIFICANCE_THRESHOLD: f64 = 0.05;

/// Whisker reach in multiples of the interquartile range.
const WHISKER_IQR: f64 = 1.5;

/// Statistics for a single group.
#[derive(Debug, Clone, Serialize)]
pub struct GroupStats {
    pub group_name: String,
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub variance: f64,
    pub min: f64,
    pub max: f64,
    pub q1: f64,
    pub q3: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
}

impl Default for GroupStats {
    fn default() -> Self {
        Self {
            group_name: String::new(),
            count: 0,
            mean: f64::NAN,
            median: f64::NAN,
            std: f64::NAN,
            variance: f64::NAN,
            min: f64::NAN,
            max: f64::NAN,
            q1: f64::NAN,
            q3: f64::NAN,
            whisker_low: f64::NAN,
            whisker_high: f64::NAN,
        }
    }
}

/// Comparison of one column across the gender groups.
#[derive(Debug, Clone, Serialize)]
pub struct GroupComparison {
    pub column: String,
    pub groups: Vec<GroupStats>,
    /// Welch's t-test between the first two groups.
    pub p_value: Option<f64>,
    pub is_significant: bool,
}

/// Sample size, mean and unbiased variance (0 for a single value).
fn moments(values: &[f64]) -> (f64, f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let squares = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>();
    let variance = if values.len() > 1 { squares / (n - 1.0) } else { 0.0 };
    (n, mean, variance)
}

/// Handles statistical calculations with multi-threading support.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute descriptive statistics for an array of values.
    pub fn compute_descriptive_stats(values: &[f64]) -> GroupStats {
        let n = values.len();
        if n == 0 {
            return GroupStats::default();
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let (_, mean, variance) = moments(values);
        let q1 = Self::percentile(&sorted, 25.0);
        let q3 = Self::percentile(&sorted, 75.0);
        let reach = WHISKER_IQR * (q3 - q1);

        GroupStats {
            group_name: String::new(),
            count: n,
            mean,
            median: Self::percentile(&sorted, 50.0),
            std: variance.sqrt(),
            variance,
            min: sorted[0],
            max: sorted[n - 1],
            q1,
            q3,
            whisker_low: sorted
                .iter()
                .copied()
                .find(|&v| v >= q1 - reach)
                .unwrap_or(q1),
            whisker_high: sorted
                .iter()
                .rev()
                .copied()
                .find(|&v| v <= q3 + reach)
                .unwrap_or(q3),
        }
    }

    /// Linear-interpolated percentile of already sorted values, as NumPy's
    /// default method. `p` is clamped to 0..=100.
    pub fn percentile(sorted: &[f64], p: f64) -> f64 {
        let Some(&last) = sorted.last() else {
            return f64::NAN;
        };

        let pos = p.clamp(0.0, 100.0) / 100.0 * (sorted.len() - 1) as f64;
        let below = pos.floor() as usize;
        match sorted.get(below + 1) {
            Some(&above) => {
                let base = sorted[below];
                base + (above - base) * (pos - below as f64)
            }
            None => last,
        }
    }

    /// Welch's t-test. Returns the two-sided p-value and whether it clears
    /// [`SIGNIFICANCE_THRESHOLD`]; NaN when a side has fewer than 2 values.
    pub fn perform_ttest(a: &[f64], b: &[f64]) -> (f64, bool) {
        if a.len() < 2 || b.len() < 2 {
            return (f64::NAN, false);
        }

        let (n_a, mean_a, var_a) = moments(a);
        let (n_b, mean_b, var_b) = moments(b);
        let (sq_a, sq_b) = (var_a / n_a, var_b / n_b);

        // Zero variance on both sides
        if sq_a + sq_b == 0.0 {
            return (1.0, false);
        }

        let t = (mean_a - mean_b) / (sq_a + sq_b).sqrt();
        let dof = (sq_a + sq_b).powi(2) / (sq_a.powi(2) / (n_a - 1.0) + sq_b.powi(2) / (n_b - 1.0));

        match StudentsT::new(0.0, 1.0, dof) {
            Ok(dist) => {
                let p_value = 2.0 * dist.sf(t.abs());
                (p_value, p_value <= SIGNIFICANCE_THRESHOLD)
            }
            Err(_) => (f64::NAN, false),
        }
    }

    /// Compare `column` across the groups of `group_col`.
    pub fn compare_by_group(
        df: &DataFrame,
        column: &str,
        group_col: &str,
    ) -> Result<GroupComparison, ProcessorError> {
        let split = DataProcessor::numeric_by_group(df, column, group_col)?;

        let groups: Vec<GroupStats> = split
            .iter()
            .map(|(name, values)| {
                let mut gs = Self::compute_descriptive_stats(values);
                gs.group_name = name.clone();
                gs
            })
            .collect();

        let (p_value, is_significant) = match split.as_slice() {
            [(_, first), (_, second), ..] => {
                let (p, significant) = Self::perform_ttest(first, second);
                (Some(p).filter(|p| !p.is_nan()), significant)
            }
            _ => (None, false),
        };

        Ok(GroupComparison {
            column: column.to_string(),
            groups,
            p_value,
            is_significant,
        })
    }

    /// Gender comparison for every subject plus Points, computed in parallel.
    pub fn compare_all(df: &DataFrame) -> Result<Vec<GroupComparison>, ProcessorError> {
        SUBJECTS
            .iter()
            .chain(std::iter::once(&POINTS_COLUMN))
            .collect::<Vec<_>>()
            .par_iter()
            .map(|column| Self::compare_by_group(df, column, SEX_COLUMN))
            .collect()
    }
}

#[cfg(test)]
#[path = "calculator_test.rs"]
mod tests;
