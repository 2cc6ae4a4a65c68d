mod builder;
mod defaults;
mod file;
mod models;

pub use builder::{build_generate_config, build_rank_config};
pub use models::ParentInput;
