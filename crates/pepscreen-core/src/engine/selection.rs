use crate::core::models::docking::SortOrientation;
use crate::engine::config::Selection;
use crate::engine::ranking::RankedCandidate;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortfall {
    pub requested: usize,
    pub available: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectionOutcome {
    pub selected: Vec<RankedCandidate>,
    /// Set when a top-N request asked for more candidates than were ranked.
    pub shortfall: Option<Shortfall>,
}

/// Picks a prefix of an already ranked list.
///
/// `orientation` must be the orientation the list was ranked under; a threshold
/// keeps every candidate whose composite score is at least as good as it.
pub fn select(
    ranked: &[RankedCandidate],
    selection: Selection,
    orientation: SortOrientation,
) -> SelectionOutcome {
    match selection {
        Selection::TopN(n) => {
            let shortfall = (n > ranked.len()).then(|| {
                warn!(
                    requested = n,
                    available = ranked.len(),
                    "Fewer ranked candidates than requested; selecting all of them."
                );
                Shortfall {
                    requested: n,
                    available: ranked.len(),
                }
            });
            SelectionOutcome {
                selected: ranked.iter().take(n).cloned().collect(),
                shortfall,
            }
        }
        Selection::Threshold(threshold) => SelectionOutcome {
            selected: ranked
                .iter()
                .take_while(|c| orientation.is_at_least_as_good(c.composite_score, threshold))
                .cloned()
                .collect(),
            shortfall: None,
        },
    }
}
