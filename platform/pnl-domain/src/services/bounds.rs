//! Axis ranges for the performance chart.

use crate::value_objects::series::Series;

/// Range of the shared time axis: smallest to largest x, never empty.
///
/// Rows are kept in file order, so the first and last x are not
/// necessarily the extremes.
pub fn time_bounds(xs: impl IntoIterator<Item = f64>) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for x in xs.into_iter().filter(|x| x.is_finite()) {
        min = min.min(x);
        max = max.max(x);
    }
    if !min.is_finite() {
        return (0.0, 1.0);
    }
    if max <= min {
        return (min, min + 1.0);
    }
    (min, max)
}

/// Range of the value axis across every series, padded by 5% of the span.
pub fn value_bounds(series: &[Series]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for (_, y) in series.iter().flat_map(|s| s.points.iter()) {
        if !y.is_finite() {
            continue;
        }
        min = min.min(*y);
        max = max.max(*y);
    }
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    if max <= min {
        let delta = (min.abs() * 0.05).max(1.0);
        return ((min - delta).max(f64::MIN), (max + delta).min(f64::MAX));
    }
    // Scale before subtracting so extreme spans stay finite.
    let pad = max * 0.05 - min * 0.05;
    ((min - pad).max(f64::MIN), (max + pad).min(f64::MAX))
}
