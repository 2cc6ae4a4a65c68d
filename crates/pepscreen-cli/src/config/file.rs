use crate::error::{CliError, Result};
use pepscreen::core::models::docking::SortOrientation;
use pepscreen::engine::config::{Normalization, RankAssignment, RankingModeKind, WildTypePolicy};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileFilterConfig {
    pub charge: Option<[f64; 2]>,
    pub hydrophobicity: Option<[f64; 2]>,
    pub length: Option<[usize; 2]>,
    pub length_tolerance: Option<usize>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileGenerationConfig {
    pub max_enumeration_size: Option<u64>,
    pub wild_type: Option<WildTypePolicy>,
    pub variant_prefix: Option<String>,
    /// Keyed by 1-based position; TOML table keys are always strings.
    pub mutation_rules: Option<BTreeMap<String, Vec<String>>>,
    pub filters: Option<FileFilterConfig>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileSelectionConfig {
    pub top_n: Option<usize>,
    pub threshold: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileRankingConfig {
    pub mode: Option<RankingModeKind>,
    pub metric: Option<String>,
    pub sort_orientation: Option<SortOrientation>,
    pub normalization: Option<Normalization>,
    pub tie_break: Option<Vec<String>>,
    pub rank_assignment: Option<RankAssignment>,
    pub weights: Option<BTreeMap<String, f64>>,
    pub orientations: Option<BTreeMap<String, SortOrientation>>,
    pub selection: Option<FileSelectionConfig>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    pub generation: Option<FileGenerationConfig>,
    pub ranking: Option<FileRankingConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
