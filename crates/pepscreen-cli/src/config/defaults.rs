use pepscreen::core::models::docking::{Metric, SortOrientation};
use pepscreen::engine::config::{Normalization, RankAssignment, RankingModeKind, WildTypePolicy};

pub struct DefaultsConfig {
    pub max_enumeration_size: u64,
    pub wild_type: WildTypePolicy,
    pub variant_prefix: String,
    pub length_tolerance: usize,
    pub mode: RankingModeKind,
    pub metric: Metric,
    pub sort_orientation: SortOrientation,
    pub normalization: Normalization,
    pub rank_assignment: RankAssignment,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            max_enumeration_size: 100_000,
            wild_type: WildTypePolicy::AsDeclared,
            variant_prefix: "PEP".to_string(),
            length_tolerance: 0,
            mode: RankingModeKind::Single,
            metric: Metric::BindingScore,
            sort_orientation: SortOrientation::LowerIsBetter,
            normalization: Normalization::MinMax,
            rank_assignment: RankAssignment::Strict,
        }
    }
}
