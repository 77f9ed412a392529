use super::*;

fn nums(values: &[f64]) -> Vec<CellValue> {
    values.iter().map(|v| CellValue::Number(*v)).collect()
}

fn texts(values: &[&str]) -> Vec<CellValue> {
    values.iter().map(|v| CellValue::Text(v.to_string())).collect()
}

#[test]
fn text_values_count_per_label() {
    let groups = vec![
        ("F".to_string(), texts(&["B+", "C+", "B+"])),
        ("M".to_string(), texts(&["B", "B+"])),
    ];
    let bins = bin_counts(&groups);
    assert_eq!(bins.labels, vec!["B+", "C+", "B"]);
    assert_eq!(bins.series[0].counts, vec![2, 1, 0]);
    assert_eq!(bins.series[1].counts, vec![1, 0, 1]);
    assert_eq!(bins.max_count(), 2);
}

#[test]
fn numeric_values_share_nice_bins() {
    let groups = vec![
        ("F".to_string(), nums(&[64.0, 49.0, 38.0])),
        ("M".to_string(), nums(&[52.0, 60.0])),
    ];
    let bins = bin_counts(&groups);
    assert_eq!(bins.labels.first().map(String::as_str), Some("35-40"));
    assert_eq!(bins.labels.last().map(String::as_str), Some("60-65"));
    assert_eq!(bins.series[0].counts.iter().sum::<usize>(), 3);
    assert_eq!(bins.series[1].counts.iter().sum::<usize>(), 2);
}

#[test]
fn missing_values_are_not_counted() {
    let mut values = nums(&[10.0, 20.0]);
    values.push(CellValue::Missing);
    let bins = bin_counts(&[("Points".to_string(), values)]);
    assert_eq!(bins.series[0].counts.iter().sum::<usize>(), 2);
}

#[test]
fn constant_column_is_one_bin() {
    let bins = bin_counts(&[("Points".to_string(), nums(&[7.0, 7.0]))]);
    assert_eq!(bins.labels, vec!["7"]);
    assert_eq!(bins.series[0].counts, vec![2]);
}

#[test]
fn mixed_values_fall_back_to_labels() {
    let mut values = nums(&[1.0]);
    values.extend(texts(&["A"]));
    let bins = bin_counts(&[("x".to_string(), values)]);
    assert_eq!(bins.labels, vec!["1", "A"]);
}

#[test]
fn nice_step_rounds_up_to_1_2_5() {
    assert_eq!(nice_step(26.0, 10), 5.0);
    assert_eq!(nice_step(100.0, 10), 10.0);
    assert_eq!(nice_step(15.0, 10), 2.0);
}

#[test]
fn palette_colors_parse_from_hex() {
    assert_eq!(palette_color(0), RGBColor(0x34, 0x98, 0xdb));
    assert_eq!(palette_color(1), RGBColor(0xe7, 0x4c, 0x3c));
}
