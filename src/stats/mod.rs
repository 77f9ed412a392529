//! Stats module - per-group summaries for the gender comparison

mod calculator;

pub use calculator::{GroupComparison, GroupStats, StatsCalculator};
