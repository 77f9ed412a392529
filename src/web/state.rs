//! Shared application state.
//!
//! The results table is loaded once at startup and shared read-only with
//! every handler. The static figures are built up front, since they never
//! depend on user input.

use std::sync::Arc;

use polars::prelude::DataFrame;
use serde::Serialize;

use crate::charts::{ChartError, ChartKind, ChartPlotter, Figure};
use crate::data::schema::{POINTS_COLUMN, SEX_COLUMN};
use crate::stats::{GroupComparison, StatsCalculator};

/// Figures and statistics that never change after load.
#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    pub grade_distribution: Figure,
    pub points_distribution: Figure,
    pub gender_points: Figure,
    pub gender_comparison: GroupComparison,
}

impl Overview {
    pub fn build(df: &DataFrame) -> Result<Self, ChartError> {
        Ok(Self {
            grade_distribution: ChartPlotter::figure(df, ChartKind::GradeDistribution)?,
            points_distribution: ChartPlotter::figure(df, ChartKind::PointsDistribution)?,
            gender_points: ChartPlotter::figure(df, ChartKind::GenderPoints)?,
            gender_comparison: StatsCalculator::compare_by_group(df, POINTS_COLUMN, SEX_COLUMN)?,
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub results: Arc<DataFrame>,
    pub overview: Arc<Overview>,
}

impl AppState {
    pub fn new(results: DataFrame) -> Result<Self, ChartError> {
        let overview = Overview::build(&results)?;
        Ok(Self {
            results: Arc::new(results),
            overview: Arc::new(overview),
        })
    }

    pub fn row_count(&self) -> usize {
        self.results.height()
    }
}
