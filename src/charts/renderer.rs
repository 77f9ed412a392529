//! Static Chart Renderer
//! Draws dashboard charts to SVG with plotters for download.
//!
//! Histograms become grouped bar charts of counts:
//! - text values are counted per label, in order of first appearance
//! - numeric values are binned on a "nice" step
//!
//! The gender box plot is drawn from the same quartiles and whiskers the
//! statistics table reports.

use super::plotter::{ChartKind, ChartPlotter};
use crate::data::schema::{format_number, CellValue, GRADE_COLUMN, POINTS_COLUMN, SEX_COLUMN};
use crate::data::{DataProcessor, ProcessorError};
use crate::stats::StatsCalculator;
use plotters::prelude::*;
use polars::prelude::DataFrame;
use thiserror::Error;

const WIDTH: u32 = 900;
const HEIGHT: u32 = 520;
/// Target number of bins for numeric histograms.
const TARGET_BINS: usize = 10;
/// Share of each category slot covered by bars.
const BAR_SPAN: f64 = 0.8;
const BOX_WIDTH: f64 = 0.4;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to read chart data: {0}")]
    Data(#[from] ProcessorError),
    #[error("Failed to draw chart: {0}")]
    Draw(String),
}

fn draw_error<E: std::fmt::Display>(err: E) -> RenderError {
    RenderError::Draw(err.to_string())
}

/// Counts for one group across all bins.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    pub name: String,
    pub counts: Vec<usize>,
}

/// Bin labels with per-group counts.
#[derive(Debug, Clone, PartialEq)]
pub struct BinnedCounts {
    pub labels: Vec<String>,
    pub series: Vec<BarSeries>,
}

impl BinnedCounts {
    pub fn max_count(&self) -> usize {
        self.series
            .iter()
            .flat_map(|s| s.counts.iter().copied())
            .max()
            .unwrap_or(0)
    }
}

/// Count grouped values into shared bins.
pub fn bin_counts(groups: &[(String, Vec<CellValue>)]) -> BinnedCounts {
    let present = || {
        groups
            .iter()
            .flat_map(|(_, values)| values.iter())
            .filter(|v| !v.is_missing())
    };

    let all_numeric = present().all(|v| v.as_number().is_some());
    let numbers: Vec<f64> = present().filter_map(CellValue::as_number).collect();

    if all_numeric && !numbers.is_empty() {
        numeric_bins(groups, &numbers)
    } else {
        categorical_bins(groups)
    }
}

fn numeric_bins(groups: &[(String, Vec<CellValue>)], numbers: &[f64]) -> BinnedCounts {
    let min = numbers.iter().copied().fold(f64::INFINITY, f64::min);
    let max = numbers.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let (start, step, n_bins) = if max > min {
        let step = nice_step(max - min, TARGET_BINS);
        let start = (min / step).floor() * step;
        let n_bins = ((max - start) / step).floor() as usize + 1;
        (start, step, n_bins)
    } else {
        (min, 1.0, 1)
    };

    let labels = (0..n_bins)
        .map(|i| {
            if n_bins == 1 && max <= min {
                format_number(min)
            } else {
                let lo = round_label(start + i as f64 * step);
                let hi = round_label(start + (i + 1) as f64 * step);
                format!("{}-{}", format_number(lo), format_number(hi))
            }
        })
        .collect();

    let series = groups
        .iter()
        .map(|(name, values)| {
            let mut counts = vec![0usize; n_bins];
            for v in values.iter().filter_map(CellValue::as_number) {
                let idx = (((v - start) / step).floor().max(0.0) as usize).min(n_bins - 1);
                counts[idx] += 1;
            }
            BarSeries {
                name: name.clone(),
                counts,
            }
        })
        .collect();

    BinnedCounts { labels, series }
}

fn categorical_bins(groups: &[(String, Vec<CellValue>)]) -> BinnedCounts {
    let mut labels: Vec<String> = Vec::new();
    for label in groups
        .iter()
        .flat_map(|(_, values)| values.iter())
        .filter_map(CellValue::label)
    {
        if !labels.contains(&label) {
            labels.push(label);
        }
    }

    let series = groups
        .iter()
        .map(|(name, values)| {
            let mut counts = vec![0usize; labels.len()];
            for label in values.iter().filter_map(CellValue::label) {
                if let Some(idx) = labels.iter().position(|l| *l == label) {
                    counts[idx] += 1;
                }
            }
            BarSeries {
                name: name.clone(),
                counts,
            }
        })
        .collect();

    BinnedCounts { labels, series }
}

fn nice_step(range: f64, target_steps: usize) -> f64 {
    let raw_step = range / target_steps as f64;
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let normalized = raw_step / magnitude;

    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };

    nice * magnitude
}

fn round_label(v: f64) -> f64 {
    (v * 1e6).round() / 1e6
}

fn palette_color(idx: usize) -> RGBColor {
    let hex = ChartPlotter::group_color(idx).trim_start_matches('#');
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
    RGBColor(channel(0), channel(2), channel(4))
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render `kind` as an SVG document.
    pub fn render_svg(df: &DataFrame, kind: ChartKind) -> Result<String, RenderError> {
        let title = kind.title();
        let mut svg = String::new();

        match kind {
            ChartKind::GradeDistribution => {
                let bins = bin_counts(&DataProcessor::split_by(df, GRADE_COLUMN, SEX_COLUMN)?);
                Self::draw_bars(&mut svg, &title, GRADE_COLUMN, &bins)?;
            }
            ChartKind::Subject(subject) => {
                let bins = bin_counts(&DataProcessor::split_by(df, subject, SEX_COLUMN)?);
                Self::draw_bars(&mut svg, &title, subject, &bins)?;
            }
            ChartKind::PointsDistribution => {
                let points = DataProcessor::values(df, POINTS_COLUMN)?;
                let bins = bin_counts(&[(POINTS_COLUMN.to_string(), points)]);
                Self::draw_bars(&mut svg, &title, POINTS_COLUMN, &bins)?;
            }
            ChartKind::GenderPoints => {
                let groups = DataProcessor::numeric_by_group(df, POINTS_COLUMN, SEX_COLUMN)?;
                Self::draw_boxes(&mut svg, &title, &groups)?;
            }
        }

        Ok(svg)
    }

    fn draw_bars(
        svg: &mut String,
        title: &str,
        x_desc: &str,
        bins: &BinnedCounts,
    ) -> Result<(), RenderError> {
        let root = SVGBackend::with_string(svg, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_error)?;

        let n = bins.labels.len().max(1);
        let y_max = bins.max_count().max(1) as f64 * 1.1;
        let centers: Vec<f64> = (0..n).map(|i| i as f64 + 0.5).collect();

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 22))
            .margin(16)
            .x_label_area_size(48)
            .y_label_area_size(56)
            .build_cartesian_2d((0f64..n as f64).with_key_points(centers), 0f64..y_max)
            .map_err(draw_error)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(x_desc)
            .y_desc("count")
            .x_label_formatter(&|x: &f64| {
                bins.labels
                    .get(x.floor() as usize)
                    .cloned()
                    .unwrap_or_default()
            })
            .draw()
            .map_err(draw_error)?;

        let slot = BAR_SPAN / bins.series.len().max(1) as f64;
        for (g, series) in bins.series.iter().enumerate() {
            let color = palette_color(g);
            chart
                .draw_series(series.counts.iter().enumerate().map(|(i, &count)| {
                    let x0 = i as f64 + (1.0 - BAR_SPAN) / 2.0 + g as f64 * slot;
                    Rectangle::new([(x0, 0.0), (x0 + slot, count as f64)], color.filled())
                }))
                .map_err(draw_error)?
                .label(series.name.as_str())
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
        }

        if bins.series.len() > 1 {
            chart
                .configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()
                .map_err(draw_error)?;
        }

        root.present().map_err(draw_error)?;
        Ok(())
    }

    fn draw_boxes(
        svg: &mut String,
        title: &str,
        groups: &[(String, Vec<f64>)],
    ) -> Result<(), RenderError> {
        let root = SVGBackend::with_string(svg, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_error)?;

        let all: Vec<f64> = groups.iter().flat_map(|(_, v)| v.iter().copied()).collect();
        let (y_min, y_max) = if all.is_empty() {
            (0.0, 1.0)
        } else {
            let min = all.iter().copied().fold(f64::INFINITY, f64::min);
            let max = all.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let pad = ((max - min) * 0.1).max(1.0);
            (min - pad, max + pad)
        };

        let n = groups.len().max(1);
        let centers: Vec<f64> = (0..n).map(|i| i as f64 + 0.5).collect();

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 22))
            .margin(16)
            .x_label_area_size(48)
            .y_label_area_size(56)
            .build_cartesian_2d((0f64..n as f64).with_key_points(centers), y_min..y_max)
            .map_err(draw_error)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(SEX_COLUMN)
            .y_desc(POINTS_COLUMN)
            .x_label_formatter(&|x: &f64| {
                groups
                    .get(x.floor() as usize)
                    .map(|(name, _)| name.clone())
                    .unwrap_or_default()
            })
            .draw()
            .map_err(draw_error)?;

        for (i, (_, values)) in groups.iter().enumerate() {
            if values.is_empty() {
                continue;
            }
            let stats = StatsCalculator::compute_descriptive_stats(values);
            let color = palette_color(i);
            let center = i as f64 + 0.5;
            let (left, right) = (center - BOX_WIDTH / 2.0, center + BOX_WIDTH / 2.0);
            let stroke = color.stroke_width(2);

            chart
                .draw_series(std::iter::once(Rectangle::new(
                    [(left, stats.q1), (right, stats.q3)],
                    color.mix(0.3).filled(),
                )))
                .map_err(draw_error)?;

            chart
                .draw_series(
                    [
                        vec![(left, stats.q1), (right, stats.q1), (right, stats.q3), (left, stats.q3), (left, stats.q1)],
                        vec![(left, stats.median), (right, stats.median)],
                        vec![(center, stats.q1), (center, stats.whisker_low)],
                        vec![(center, stats.q3), (center, stats.whisker_high)],
                        vec![(center - 0.08, stats.whisker_low), (center + 0.08, stats.whisker_low)],
                        vec![(center - 0.08, stats.whisker_high), (center + 0.08, stats.whisker_high)],
                    ]
                    .into_iter()
                    .map(|path| PathElement::new(path, stroke)),
                )
                .map_err(draw_error)?;

            chart
                .draw_series(
                    values
                        .iter()
                        .filter(|&&v| v < stats.whisker_low || v > stats.whisker_high)
                        .map(|&v| Circle::new((center, v), 3, color.filled())),
                )
                .map_err(draw_error)?;
        }

        root.present().map_err(draw_error)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "renderer_test.rs"]
mod tests;
