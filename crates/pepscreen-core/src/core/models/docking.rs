use serde::Deserialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrientation {
    #[default]
    #[serde(alias = "lower_is_better")]
    LowerIsBetter,
    #[serde(alias = "higher_is_better")]
    HigherIsBetter,
}

impl SortOrientation {
    /// Orders two values so that the better one comes first.
    pub fn compare(self, a: f64, b: f64) -> Ordering {
        match self {
            Self::LowerIsBetter => a.total_cmp(&b),
            Self::HigherIsBetter => b.total_cmp(&a),
        }
    }

    pub fn is_at_least_as_good(self, value: f64, threshold: f64) -> bool {
        self.compare(value, threshold) != Ordering::Greater
    }
}

impl fmt::Display for SortOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LowerIsBetter => f.write_str("lower-is-better"),
            Self::HigherIsBetter => f.write_str("higher-is-better"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ParseMetricError {
    #[error("Metric name cannot be empty")]
    EmptyName,
    #[error("Unknown sort orientation '{0}'. Expected 'lower-is-better' or 'higher-is-better'.")]
    UnknownOrientation(String),
}

impl FromStr for SortOrientation {
    type Err = ParseMetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "lower-is-better" | "lower" => Ok(Self::LowerIsBetter),
            "higher-is-better" | "higher" => Ok(Self::HigherIsBetter),
            _ => Err(ParseMetricError::UnknownOrientation(s.to_string())),
        }
    }
}

/// A scalar metric reported by the docking collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Metric {
    BindingScore,  // kcal/mol, more negative binds tighter
    Rmsd,          // Angstrom
    HydrogenBonds, // count
    Contacts,      // count
    Custom(String),
}

impl Metric {
    pub fn name(&self) -> &str {
        match self {
            Self::BindingScore => "binding_score",
            Self::Rmsd => "rmsd",
            Self::HydrogenBonds => "hbonds",
            Self::Contacts => "contacts",
            Self::Custom(name) => name,
        }
    }

    /// Direction in which the metric improves, if it is a well-known one.
    pub fn natural_orientation(&self) -> Option<SortOrientation> {
        match self {
            Self::BindingScore | Self::Rmsd => Some(SortOrientation::LowerIsBetter),
            Self::HydrogenBonds | Self::Contacts => Some(SortOrientation::HigherIsBetter),
            Self::Custom(_) => None,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = ParseMetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if name.is_empty() {
            return Err(ParseMetricError::EmptyName);
        }
        Ok(match name.to_ascii_lowercase().replace('-', "_").as_str() {
            "binding_score" | "docking_score" | "score" => Self::BindingScore,
            "rmsd" => Self::Rmsd,
            "hbonds" | "hydrogen_bonds" => Self::HydrogenBonds,
            "contacts" => Self::Contacts,
            _ => Self::Custom(name.to_string()),
        })
    }
}

/// Parsed docking metrics for one variant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DockingResult {
    metrics: BTreeMap<Metric, f64>,
}

impl DockingResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_binding_score(score: f64) -> Self {
        Self::new().with_metric(Metric::BindingScore, score)
    }

    pub fn with_metric(mut self, metric: Metric, value: f64) -> Self {
        self.metrics.insert(metric, value);
        self
    }

    pub fn insert(&mut self, metric: Metric, value: f64) -> Option<f64> {
        self.metrics.insert(metric, value)
    }

    pub fn get(&self, metric: &Metric) -> Option<f64> {
        self.metrics.get(metric).copied()
    }

    pub fn binding_score(&self) -> Option<f64> {
        self.get(&Metric::BindingScore)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Metric, f64)> {
        self.metrics.iter().map(|(m, v)| (m, *v))
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}
