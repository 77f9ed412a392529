//! Chart Plotter Module
//! Builds the dashboard's interactive plotly figures from the results table.

use super::figure::{
    Axis, BarMode, BoxTrace, Figure, HistogramTrace, Layout, Legend, Marker, Title, Trace,
};
use crate::data::schema::{GRADE_COLUMN, POINTS_COLUMN, SEX_COLUMN, SUBJECTS};
use crate::data::{DataProcessor, ProcessorError};
use polars::prelude::DataFrame;
use thiserror::Error;

/// Color palette for groups, in group order.
pub const PALETTE: [&str; 10] = [
    "#3498db", // Blue
    "#e74c3c", // Red
    "#2ecc71", // Green
    "#9b59b6", // Purple
    "#f39c12", // Orange
    "#1abc9c", // Teal
    "#e91e63", // Pink
    "#00bcd4", // Cyan
    "#ff5722", // Deep Orange
    "#795548", // Brown
];

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Failed to read chart data: {0}")]
    Data(#[from] ProcessorError),
}

fn subject_title(subject: &str) -> String {
    format!("{subject} Performance by Gender")
}

/// The charts the dashboard can draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    GradeDistribution,
    PointsDistribution,
    GenderPoints,
    Subject(&'static str),
}

impl ChartKind {
    /// Every chart, static views first.
    pub fn all() -> Vec<ChartKind> {
        let mut kinds = vec![
            ChartKind::GradeDistribution,
            ChartKind::PointsDistribution,
            ChartKind::GenderPoints,
        ];
        kinds.extend(SUBJECTS.iter().copied().map(ChartKind::Subject));
        kinds
    }

    pub fn title(&self) -> String {
        match self {
            ChartKind::GradeDistribution => "Grade Distribution by Gender".to_string(),
            ChartKind::PointsDistribution => "Distribution of Total Points".to_string(),
            ChartKind::GenderPoints => "Total Points Distribution by Gender".to_string(),
            ChartKind::Subject(subject) => subject_title(subject),
        }
    }

    /// URL-safe name, e.g. `subject-business-studies`.
    pub fn slug(&self) -> String {
        match self {
            ChartKind::GradeDistribution => "grade-distribution".to_string(),
            ChartKind::PointsDistribution => "points-distribution".to_string(),
            ChartKind::GenderPoints => "gender-points".to_string(),
            ChartKind::Subject(subject) => {
                format!("subject-{}", subject.to_lowercase().replace(' ', "-"))
            }
        }
    }

    pub fn from_slug(slug: &str) -> Option<ChartKind> {
        Self::all().into_iter().find(|kind| kind.slug() == slug)
    }
}

/// Creates plotly figure descriptions for each dashboard view.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Get color for the group at `group_index`.
    pub fn group_color(group_index: usize) -> &'static str {
        PALETTE[group_index % PALETTE.len()]
    }

    pub fn figure(df: &DataFrame, kind: ChartKind) -> Result<Figure, ChartError> {
        match kind {
            ChartKind::GradeDistribution => Self::grade_distribution(df),
            ChartKind::PointsDistribution => Self::points_distribution(df),
            ChartKind::GenderPoints => Self::gender_points(df),
            ChartKind::Subject(subject) => Self::subject_performance(df, subject),
        }
    }

    /// Grouped histogram of Grade by Sex.
    pub fn grade_distribution(df: &DataFrame) -> Result<Figure, ChartError> {
        Self::grouped_histogram(df, GRADE_COLUMN, ChartKind::GradeDistribution.title())
    }

    /// Histogram of total Points.
    pub fn points_distribution(df: &DataFrame) -> Result<Figure, ChartError> {
        let trace = HistogramTrace {
            name: None,
            x: DataProcessor::values(df, POINTS_COLUMN)?,
            bingroup: None,
            offset_group: None,
            marker: Marker {
                color: Self::group_color(0),
            },
            show_legend: false,
        };

        Ok(Figure {
            data: vec![Trace::Histogram(trace)],
            layout: Layout {
                title: Title {
                    text: ChartKind::PointsDistribution.title(),
                },
                barmode: None,
                xaxis: Axis {
                    title: POINTS_COLUMN.into(),
                },
                yaxis: Axis {
                    title: "count".into(),
                },
                legend: None,
            },
        })
    }

    /// Grouped histogram of one subject's score by Sex.
    pub fn subject_performance(df: &DataFrame, subject: &str) -> Result<Figure, ChartError> {
        Self::grouped_histogram(df, subject, subject_title(subject))
    }

    /// Box plot of Points by Sex.
    pub fn gender_points(df: &DataFrame) -> Result<Figure, ChartError> {
        let trace = BoxTrace {
            x: DataProcessor::values(df, SEX_COLUMN)?,
            y: DataProcessor::values(df, POINTS_COLUMN)?,
            marker: Marker {
                color: Self::group_color(0),
            },
            box_points: "outliers",
        };

        Ok(Figure {
            data: vec![Trace::Box(trace)],
            layout: Layout {
                title: Title {
                    text: ChartKind::GenderPoints.title(),
                },
                barmode: None,
                xaxis: Axis {
                    title: SEX_COLUMN.into(),
                },
                yaxis: Axis {
                    title: POINTS_COLUMN.into(),
                },
                legend: None,
            },
        })
    }

    /// One histogram trace per Sex, bars side by side.
    fn grouped_histogram(df: &DataFrame, x: &str, title: String) -> Result<Figure, ChartError> {
        let traces = DataProcessor::split_by(df, x, SEX_COLUMN)?
            .into_iter()
            .enumerate()
            .map(|(idx, (group, values))| {
                Trace::Histogram(HistogramTrace {
                    offset_group: Some(group.clone()),
                    name: Some(group),
                    x: values,
                    bingroup: Some("x".to_string()),
                    marker: Marker {
                        color: Self::group_color(idx),
                    },
                    show_legend: true,
                })
            })
            .collect();

        Ok(Figure {
            data: traces,
            layout: Layout {
                title: Title { text: title },
                barmode: Some(BarMode::Group),
                xaxis: Axis { title: x.into() },
                yaxis: Axis {
                    title: "count".into(),
                },
                legend: Some(Legend {
                    title: SEX_COLUMN.into(),
                }),
            },
        })
    }
}

#[cfg(test)]
#[path = "plotter_test.rs"]
mod tests;
