use crate::core::models::docking::DockingResult;
use crate::core::models::variant::Variant;
use crate::engine::config::{RankingConfig, RankingMode};
use crate::engine::error::EngineError;
use crate::engine::progress::ProgressReporter;
use crate::engine::ranking::{self, RankedCandidate};
use crate::engine::selection::{self, SelectionOutcome};
use tracing::{info, instrument};

#[derive(Debug, Clone, PartialEq)]
pub struct RankingResult {
    pub ranked: Vec<RankedCandidate>,
    /// Present when the configuration carries a selection cutoff.
    pub selection: Option<SelectionOutcome>,
}

#[instrument(skip_all, name = "ranking_workflow")]
pub fn run(
    candidates: Vec<(Variant, DockingResult)>,
    config: &RankingConfig,
    reporter: &ProgressReporter,
) -> Result<RankingResult, EngineError> {
    let mode = match &config.mode {
        RankingMode::Single { .. } => "single",
        RankingMode::Weighted { .. } => "weighted",
    };
    info!(
        candidates = candidates.len(),
        mode,
        orientation = %config.sort_orientation,
        tie_breaks = config.tie_break.len(),
        "Ranking docked variants."
    );

    let ranked = reporter.phase("Ranking", || ranking::rank(candidates, config))?;
    reporter.tally("ranked", ranked.len());

    let selection = config.selection.map(|cutoff| {
        reporter.phase("Selection", || {
            selection::select(&ranked, cutoff, config.sort_orientation)
        })
    });
    if let Some(outcome) = &selection {
        reporter.tally("selected", outcome.selected.len());
        info!(selected = outcome.selected.len(), "Selection applied.");
    }

    if let Some(best) = ranked.first() {
        info!(
            sequence = best.variant.sequence(),
            composite = best.composite_score,
            "Ranking complete."
        );
    }
    Ok(RankingResult { ranked, selection })
}
