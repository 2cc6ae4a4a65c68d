use crate::core::models::docking::{Metric, SortOrientation};
use crate::core::models::residue::Substitution;
use crate::core::models::sequence::ParentSequence;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Mutation rule position must be 1-based, got {position}")]
    InvalidPosition { position: usize },

    #[error("Mutation rule position {position} is outside the parent sequence (length {length})")]
    PositionOutOfRange { position: usize, length: usize },

    #[error("Position {0} has more than one mutation rule")]
    DuplicatePosition(usize),

    #[error("Mutation rule at position {position} has no allowed residues")]
    EmptyAllowedSet { position: usize },

    #[error("Residue '{residue}' is listed more than once at position {position}")]
    DuplicateAllowedResidue {
        position: usize,
        residue: Substitution,
    },

    #[error("Invalid residue '{code}' in mutation rule at position {position}")]
    InvalidResidue { position: usize, code: String },

    #[error("Invalid {name} bounds: min {min} must be finite and not exceed max {max}")]
    InvalidBounds {
        name: &'static str,
        min: f64,
        max: f64,
    },

    #[error("Maximum enumeration size must be at least 1")]
    InvalidEnumerationCap,

    #[error("Weight for metric '{metric}' must be finite and non-negative, got {weight}")]
    InvalidWeight { metric: String, weight: f64 },

    #[error("Weighted ranking needs at least one metric with a positive weight")]
    NoPositiveWeight,

    #[error("Metric '{metric}' has no natural orientation; declare one explicitly")]
    MissingOrientation { metric: String },

    #[error("Metric '{0}' is weighted more than once")]
    DuplicateWeight(Metric),

    #[error("Metric '{metric}' appears more than once in the tie-break chain")]
    DuplicateTieBreak { metric: String },

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),
}

/// How the wild-type residue is treated at ruled positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WildTypePolicy {
    /// Allowed lists are used exactly as written.
    #[default]
    AsDeclared,
    /// The wild-type residue is prepended to any list that lacks it.
    Include,
    /// The wild-type residue is removed from every list.
    Exclude,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRule {
    pub position: usize,
    pub allowed: Vec<Substitution>,
}

impl MutationRule {
    pub fn new(position: usize, allowed: Vec<Substitution>) -> Self {
        Self { position, allowed }
    }

    /// Parses allowed entries given as one-letter codes (`"-"` for a deletion).
    pub fn parse<S: AsRef<str>>(position: usize, allowed: &[S]) -> Result<Self, ConfigError> {
        let allowed = allowed
            .iter()
            .map(|code| {
                code.as_ref()
                    .parse::<Substitution>()
                    .map_err(|_| ConfigError::InvalidResidue {
                        position,
                        code: code.as_ref().to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(position, allowed))
    }
}

/// Validated set of mutation rules keyed by ascending 1-based position.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MutationRules {
    rules: BTreeMap<usize, Vec<Substitution>>,
}

impl MutationRules {
    pub fn new(rules: impl IntoIterator<Item = MutationRule>) -> Result<Self, ConfigError> {
        let mut map = BTreeMap::new();
        for rule in rules {
            if rule.position == 0 {
                return Err(ConfigError::InvalidPosition { position: 0 });
            }
            if rule.allowed.is_empty() {
                return Err(ConfigError::EmptyAllowedSet {
                    position: rule.position,
                });
            }
            let mut seen = HashSet::new();
            for &sub in &rule.allowed {
                if !seen.insert(sub) {
                    return Err(ConfigError::DuplicateAllowedResidue {
                        position: rule.position,
                        residue: sub,
                    });
                }
            }
            if map.insert(rule.position, rule.allowed).is_some() {
                return Err(ConfigError::DuplicatePosition(rule.position));
            }
        }
        Ok(Self { rules: map })
    }

    pub fn get(&self, position: usize) -> Option<&[Substitution]> {
        self.rules.get(&position).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &[Substitution])> {
        self.rules.iter().map(|(&p, a)| (p, a.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn has_deletions(&self) -> bool {
        self.rules
            .values()
            .any(|allowed| allowed.iter().any(|s| s.is_deletion()))
    }

    pub fn validate_against(&self, parent: &ParentSequence) -> Result<(), ConfigError> {
        match self.rules.keys().next_back() {
            Some(&position) if position > parent.len() => Err(ConfigError::PositionOutOfRange {
                position,
                length: parent.len(),
            }),
            _ => Ok(()),
        }
    }
}

/// Inclusive `[min, max]` interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy> Bounds<T> {
    pub fn contains(&self, value: T) -> bool {
        value >= self.min && value <= self.max
    }
}

impl Bounds<f64> {
    pub fn new(name: &'static str, min: f64, max: f64) -> Result<Self, ConfigError> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(ConfigError::InvalidBounds { name, min, max });
        }
        Ok(Self { min, max })
    }
}

impl Bounds<usize> {
    pub fn new(name: &'static str, min: usize, max: usize) -> Result<Self, ConfigError> {
        if min > max {
            return Err(ConfigError::InvalidBounds {
                name,
                min: min as f64,
                max: max as f64,
            });
        }
        Ok(Self { min, max })
    }
}

/// Acceptance bounds for generated variants. `None` leaves a descriptor unbounded.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterCriteria {
    pub charge: Option<Bounds<f64>>,
    pub hydrophobicity: Option<Bounds<f64>>,
    pub length: Option<Bounds<usize>>,
    pub length_tolerance: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    pub max_enumeration_size: u64,
    pub mutation_rules: MutationRules,
    pub wild_type: WildTypePolicy,
    pub filters: FilterCriteria,
}

impl GenerationConfig {
    pub fn validate_against(&self, parent: &ParentSequence) -> Result<(), ConfigError> {
        self.mutation_rules.validate_against(parent)
    }
}

#[derive(Default)]
pub struct GenerationConfigBuilder {
    max_enumeration_size: Option<u64>,
    mutation_rules: Option<Vec<MutationRule>>,
    wild_type: Option<WildTypePolicy>,
    filters: Option<FilterCriteria>,
}

impl GenerationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_enumeration_size(mut self, cap: u64) -> Self {
        self.max_enumeration_size = Some(cap);
        self
    }
    pub fn mutation_rules(mut self, rules: Vec<MutationRule>) -> Self {
        self.mutation_rules = Some(rules);
        self
    }
    pub fn wild_type(mut self, policy: WildTypePolicy) -> Self {
        self.wild_type = Some(policy);
        self
    }
    pub fn filters(mut self, criteria: FilterCriteria) -> Self {
        self.filters = Some(criteria);
        self
    }

    pub fn build(self) -> Result<GenerationConfig, ConfigError> {
        let max_enumeration_size = self
            .max_enumeration_size
            .ok_or(ConfigError::MissingParameter("max_enumeration_size"))?;
        if max_enumeration_size == 0 {
            return Err(ConfigError::InvalidEnumerationCap);
        }
        let mutation_rules = MutationRules::new(
            self.mutation_rules
                .ok_or(ConfigError::MissingParameter("mutation_rules"))?,
        )?;
        Ok(GenerationConfig {
            max_enumeration_size,
            mutation_rules,
            wild_type: self
                .wild_type
                .ok_or(ConfigError::MissingParameter("wild_type"))?,
            filters: self.filters.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Normalization {
    #[default]
    MinMax,
    ZScore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RankAssignment {
    /// Contiguous ranks `1..=N` following the strict order.
    #[default]
    Strict,
    /// Competition ranking: full ties on score and tie-break keys share a rank.
    Shared,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricWeight {
    pub metric: Metric,
    pub weight: f64,
    pub orientation: SortOrientation,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RankingMode {
    Single {
        metric: Metric,
    },
    Weighted {
        weights: Vec<MetricWeight>,
        normalization: Normalization,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TieBreakKey {
    pub metric: Metric,
    pub orientation: SortOrientation,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Selection {
    TopN(usize),
    Threshold(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankingConfig {
    pub mode: RankingMode,
    pub sort_orientation: SortOrientation,
    pub tie_break: Vec<TieBreakKey>,
    pub rank_assignment: RankAssignment,
    pub selection: Option<Selection>,
}

impl RankingConfig {
    /// Every metric a docking result must carry for this configuration.
    pub fn required_metrics(&self) -> Vec<&Metric> {
        let mut metrics: Vec<&Metric> = match &self.mode {
            RankingMode::Single { metric } => vec![metric],
            RankingMode::Weighted { weights, .. } => weights.iter().map(|w| &w.metric).collect(),
        };
        for key in &self.tie_break {
            if !metrics.contains(&&key.metric) {
                metrics.push(&key.metric);
            }
        }
        metrics
    }
}

/// Selects which ranking mode the builder assembles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RankingModeKind {
    Single,
    Weighted,
}

#[derive(Default)]
pub struct RankingConfigBuilder {
    mode: Option<RankingModeKind>,
    metric: Option<Metric>,
    weights: Vec<(Metric, f64)>,
    normalization: Option<Normalization>,
    sort_orientation: Option<SortOrientation>,
    orientations: HashMap<Metric, SortOrientation>,
    tie_break: Vec<Metric>,
    rank_assignment: Option<RankAssignment>,
    selection: Option<Selection>,
}

impl RankingConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(mut self, mode: RankingModeKind) -> Self {
        self.mode = Some(mode);
        self
    }
    pub fn metric(mut self, metric: Metric) -> Self {
        self.metric = Some(metric);
        self
    }
    pub fn weight(mut self, metric: Metric, weight: f64) -> Self {
        self.weights.push((metric, weight));
        self
    }
    pub fn weights(mut self, weights: Vec<(Metric, f64)>) -> Self {
        self.weights = weights;
        self
    }
    pub fn normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = Some(normalization);
        self
    }
    pub fn sort_orientation(mut self, orientation: SortOrientation) -> Self {
        self.sort_orientation = Some(orientation);
        self
    }
    pub fn metric_orientation(mut self, metric: Metric, orientation: SortOrientation) -> Self {
        self.orientations.insert(metric, orientation);
        self
    }
    pub fn tie_break_keys(mut self, keys: Vec<Metric>) -> Self {
        self.tie_break = keys;
        self
    }
    pub fn rank_assignment(mut self, assignment: RankAssignment) -> Self {
        self.rank_assignment = Some(assignment);
        self
    }
    pub fn selection(mut self, selection: Option<Selection>) -> Self {
        self.selection = selection;
        self
    }

    fn resolve_orientation(&self, metric: &Metric) -> Result<SortOrientation, ConfigError> {
        self.orientations
            .get(metric)
            .copied()
            .or_else(|| metric.natural_orientation())
            .ok_or_else(|| ConfigError::MissingOrientation {
                metric: metric.to_string(),
            })
    }

    pub fn build(self) -> Result<RankingConfig, ConfigError> {
        let sort_orientation = self
            .sort_orientation
            .ok_or(ConfigError::MissingParameter("sort_orientation"))?;

        let mode = match self.mode.ok_or(ConfigError::MissingParameter("mode"))? {
            RankingModeKind::Single => RankingMode::Single {
                metric: self
                    .metric
                    .clone()
                    .ok_or(ConfigError::MissingParameter("metric"))?,
            },
            RankingModeKind::Weighted => {
                if self.weights.is_empty() {
                    return Err(ConfigError::MissingParameter("weights"));
                }
                let mut weights = Vec::with_capacity(self.weights.len());
                for (metric, weight) in &self.weights {
                    if weights.iter().any(|w: &MetricWeight| &w.metric == metric) {
                        return Err(ConfigError::DuplicateWeight(metric.clone()));
                    }
                    if !weight.is_finite() || *weight < 0.0 {
                        return Err(ConfigError::InvalidWeight {
                            metric: metric.to_string(),
                            weight: *weight,
                        });
                    }
                    weights.push(MetricWeight {
                        metric: metric.clone(),
                        weight: *weight,
                        orientation: self.resolve_orientation(metric)?,
                    });
                }
                if !weights.iter().any(|w| w.weight > 0.0) {
                    return Err(ConfigError::NoPositiveWeight);
                }
                RankingMode::Weighted {
                    weights,
                    normalization: self.normalization.unwrap_or_default(),
                }
            }
        };

        let mut tie_break = Vec::with_capacity(self.tie_break.len());
        for metric in &self.tie_break {
            if tie_break.iter().any(|k: &TieBreakKey| &k.metric == metric) {
                return Err(ConfigError::DuplicateTieBreak {
                    metric: metric.to_string(),
                });
            }
            tie_break.push(TieBreakKey {
                metric: metric.clone(),
                orientation: self.resolve_orientation(metric)?,
            });
        }

        match self.selection {
            Some(Selection::TopN(0)) => {
                return Err(ConfigError::InvalidSelection(
                    "top-n must be at least 1".to_string(),
                ));
            }
            Some(Selection::Threshold(t)) if !t.is_finite() => {
                return Err(ConfigError::InvalidSelection(format!(
                    "threshold must be finite, got {}",
                    t
                )));
            }
            _ => {}
        }

        Ok(RankingConfig {
            mode,
            sort_orientation,
            tie_break,
            rank_assignment: self.rank_assignment.unwrap_or_default(),
            selection: self.selection,
        })
    }
}
