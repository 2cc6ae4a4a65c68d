use pepscreen::engine::config as core_config;
use std::path::PathBuf;

#[derive(Debug)]
pub enum ParentInput {
    Fasta(PathBuf),
    Inline(String),
}

#[derive(Debug)]
pub struct GenerateAppConfig {
    pub parent: ParentInput,
    pub library_output: PathBuf,
    pub rejected_output: Option<PathBuf>,
    pub variant_prefix: String,
    pub core_config: core_config::GenerationConfig,
}

#[derive(Debug)]
pub struct RankAppConfig {
    pub library_path: PathBuf,
    pub docking_path: PathBuf,
    pub ranked_output: PathBuf,
    pub selected_csv: Option<PathBuf>,
    pub selected_fasta: Option<PathBuf>,
    pub core_config: core_config::RankingConfig,
}
