use crate::core::models::docking::SortOrientation;
use crate::engine::config::Normalization;

/// Maps raw metric values onto a comparable scale across the candidate set.
/// A set with no spread (all values equal) maps every value to 0.
pub fn normalize(values: &[f64], method: Normalization) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }
    match method {
        Normalization::MinMax => {
            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let range = max - min;
            if range == 0.0 {
                return vec![0.0; values.len()];
            }
            values.iter().map(|v| (v - min) / range).collect()
        }
        Normalization::ZScore => {
            let n = values.len() as f64;
            let mean = values.iter().sum::<f64>() / n;
            let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
            let std_dev = variance.sqrt();
            if std_dev == 0.0 {
                return vec![0.0; values.len()];
            }
            values.iter().map(|v| (v - mean) / std_dev).collect()
        }
    }
}

/// Flips a normalized value when the metric improves in the opposite direction
/// to the composite score, so that every weighted term pulls the same way.
pub fn align(
    value: f64,
    method: Normalization,
    metric_orientation: SortOrientation,
    target: SortOrientation,
) -> f64 {
    if metric_orientation == target {
        return value;
    }
    match method {
        Normalization::MinMax => 1.0 - value,
        Normalization::ZScore => -value,
    }
}
