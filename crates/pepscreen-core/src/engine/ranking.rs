use crate::core::models::docking::{DockingResult, Metric};
use crate::core::models::variant::Variant;
use crate::engine::config::{RankAssignment, RankingConfig, RankingMode};
use crate::engine::error::EngineError;
use crate::engine::normalization::{align, normalize};
use std::cmp::Ordering;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq)]
pub struct RankedCandidate {
    pub rank: usize,
    pub composite_score: f64,
    pub variant: Variant,
    pub docking: DockingResult,
}

/// Orders docked variants by composite score under the configured orientation.
///
/// The order is total: equal composite scores fall through the tie-break chain
/// and finally to the variant sequence, so the output never depends on input
/// order.
///
/// # Errors
///
/// * [`EngineError::EmptyInput`] when `candidates` is empty.
/// * [`EngineError::DuplicateCandidate`] when a sequence appears twice.
/// * [`EngineError::MissingMetric`] when a result lacks a metric required by the
///   mode or the tie-break chain.
/// * [`EngineError::InvalidMetric`] when a required metric is NaN or infinite.
pub fn rank(
    candidates: Vec<(Variant, DockingResult)>,
    config: &RankingConfig,
) -> Result<Vec<RankedCandidate>, EngineError> {
    if candidates.is_empty() {
        return Err(EngineError::EmptyInput);
    }
    check_candidates(&candidates, config)?;

    let scores = composite_scores(&candidates, config);

    let mut order: Vec<usize> = (0..candidates.len()).collect();
    order.sort_by(|&a, &b| compare(&candidates[a], scores[a], &candidates[b], scores[b], config));

    let mut slots: Vec<Option<(Variant, DockingResult)>> =
        candidates.into_iter().map(Some).collect();
    let mut ranked: Vec<RankedCandidate> = Vec::with_capacity(order.len());
    for (position, idx) in order.into_iter().enumerate() {
        let Some((variant, docking)) = slots[idx].take() else {
            continue;
        };
        let rank = match (config.rank_assignment, ranked.last()) {
            (RankAssignment::Shared, Some(prev))
                if is_full_tie(prev, &docking, scores[idx], config) =>
            {
                prev.rank
            }
            _ => position + 1,
        };
        ranked.push(RankedCandidate {
            rank,
            composite_score: scores[idx],
            variant,
            docking,
        });
    }
    Ok(ranked)
}

fn check_candidates(
    candidates: &[(Variant, DockingResult)],
    config: &RankingConfig,
) -> Result<(), EngineError> {
    let required = config.required_metrics();
    let mut seen = HashSet::with_capacity(candidates.len());
    for (variant, docking) in candidates {
        if !seen.insert(variant.sequence()) {
            return Err(EngineError::DuplicateCandidate {
                sequence: variant.sequence().to_string(),
            });
        }
        for &metric in &required {
            let value = docking
                .get(metric)
                .ok_or_else(|| EngineError::MissingMetric {
                    sequence: variant.sequence().to_string(),
                    metric: metric.to_string(),
                })?;
            if !value.is_finite() {
                return Err(EngineError::InvalidMetric {
                    sequence: variant.sequence().to_string(),
                    metric: metric.to_string(),
                    value,
                });
            }
        }
    }
    Ok(())
}

// Metrics are known to be present and finite once `check_candidates` passed.
fn metric_value(docking: &DockingResult, metric: &Metric) -> f64 {
    docking.get(metric).unwrap_or(f64::NAN)
}

fn composite_scores(candidates: &[(Variant, DockingResult)], config: &RankingConfig) -> Vec<f64> {
    match &config.mode {
        RankingMode::Single { metric } => candidates
            .iter()
            .map(|(_, d)| metric_value(d, metric))
            .collect(),
        RankingMode::Weighted {
            weights,
            normalization,
        } => {
            let total_weight: f64 = weights.iter().map(|w| w.weight).sum();
            let mut scores = vec![0.0; candidates.len()];
            for w in weights {
                let raw: Vec<f64> = candidates
                    .iter()
                    .map(|(_, d)| metric_value(d, &w.metric))
                    .collect();
                for (score, value) in scores.iter_mut().zip(normalize(&raw, *normalization)) {
                    let aligned = align(value, *normalization, w.orientation, config.sort_orientation);
                    *score += w.weight * aligned;
                }
            }
            scores.into_iter().map(|s| s / total_weight).collect()
        }
    }
}

fn compare(
    a: &(Variant, DockingResult),
    score_a: f64,
    b: &(Variant, DockingResult),
    score_b: f64,
    config: &RankingConfig,
) -> Ordering {
    config
        .sort_orientation
        .compare(score_a, score_b)
        .then_with(|| {
            config
                .tie_break
                .iter()
                .map(|key| {
                    key.orientation
                        .compare(metric_value(&a.1, &key.metric), metric_value(&b.1, &key.metric))
                })
                .find(|o| o.is_ne())
                .unwrap_or(Ordering::Equal)
        })
        .then_with(|| a.0.sequence().cmp(b.0.sequence()))
}

fn is_full_tie(
    prev: &RankedCandidate,
    docking: &DockingResult,
    score: f64,
    config: &RankingConfig,
) -> bool {
    prev.composite_score.total_cmp(&score).is_eq()
        && config.tie_break.iter().all(|key| {
            metric_value(&prev.docking, &key.metric)
                .total_cmp(&metric_value(docking, &key.metric))
                .is_eq()
        })
}
