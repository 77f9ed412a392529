use super::*;
use crate::test_support::sample_frame;

#[test]
fn descriptive_stats_on_known_values() {
    let stats = StatsCalculator::compute_descriptive_stats(&[1.0, 2.0, 3.0, 4.0]);
    assert_eq!(stats.count, 4);
    assert!((stats.mean - 2.5).abs() < 1e-12);
    assert!((stats.median - 2.5).abs() < 1e-12);
    assert!((stats.variance - 5.0 / 3.0).abs() < 1e-12);
    assert!((stats.q1 - 1.75).abs() < 1e-12);
    assert!((stats.q3 - 3.25).abs() < 1e-12);
    assert_eq!(stats.min, 1.0);
    assert_eq!(stats.max, 4.0);
}

#[test]
fn whiskers_stop_at_outliers() {
    let stats = StatsCalculator::compute_descriptive_stats(&[10.0, 11.0, 12.0, 13.0, 100.0]);
    assert_eq!(stats.whisker_low, 10.0);
    assert_eq!(stats.whisker_high, 13.0);
    assert_eq!(stats.max, 100.0);
}

#[test]
fn empty_group_is_nan() {
    let stats = StatsCalculator::compute_descriptive_stats(&[]);
    assert_eq!(stats.count, 0);
    assert!(stats.mean.is_nan());
}

#[test]
fn ttest_separates_distinct_groups() {
    let low = [10.0, 11.0, 9.0, 10.5, 9.5, 10.2];
    let high = [20.0, 21.0, 19.0, 20.5, 19.5, 20.2];
    let (p, significant) = StatsCalculator::perform_ttest(&low, &high);
    assert!(p < 0.001);
    assert!(significant);
}

#[test]
fn ttest_needs_two_values_per_group() {
    let (p, significant) = StatsCalculator::perform_ttest(&[1.0], &[2.0, 3.0]);
    assert!(p.is_nan());
    assert!(!significant);
}

#[test]
fn compare_points_by_sex() {
    let df = sample_frame();
    let cmp = StatsCalculator::compare_by_group(&df, "Points", "Sex").unwrap();
    assert_eq!(cmp.column, "Points");
    assert_eq!(cmp.groups.len(), 2);
    assert_eq!(cmp.groups[0].group_name, "F");
    assert_eq!(cmp.groups[0].count, 3);
    assert!((cmp.groups[0].mean - 151.0 / 3.0).abs() < 1e-9);
    assert_eq!(cmp.groups[1].group_name, "M");
    assert!((cmp.groups[1].mean - 56.0).abs() < 1e-9);
    assert!(cmp.p_value.is_some());
}

#[test]
fn compare_all_covers_subjects_and_points() {
    let df = sample_frame();
    let all = StatsCalculator::compare_all(&df).unwrap();
    assert_eq!(all.len(), SUBJECTS.len() + 1);
    assert_eq!(all[0].column, "English");
    assert_eq!(all.last().unwrap().column, "Points");
}

#[test]
fn nan_statistics_serialize_as_null() {
    let json = serde_json::to_value(GroupStats::default()).unwrap();
    assert!(json["mean"].is_null());
}

#[test]
fn percentile_matches_numpy_linear() {
    let sorted = [15.0, 20.0, 35.0, 40.0, 50.0];
    assert_eq!(StatsCalculator::percentile(&sorted, 0.0), 15.0);
    assert_eq!(StatsCalculator::percentile(&sorted, 100.0), 50.0);
    assert!((StatsCalculator::percentile(&sorted, 40.0) - 29.0).abs() < 1e-12);
    assert_eq!(StatsCalculator::percentile(&[7.0], 90.0), 7.0);
    assert!(StatsCalculator::percentile(&[], 50.0).is_nan());
}

#[test]
fn ttest_on_identical_constant_groups_is_not_significant() {
    let (p, significant) = StatsCalculator::perform_ttest(&[5.0, 5.0, 5.0], &[5.0, 5.0]);
    assert_eq!(p, 1.0);
    assert!(!significant);
}
