use crate::cli::RankArgs;
use crate::config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use pepscreen::{
    core::io::{docking, fasta, report, report::VariantIds},
    core::models::{docking::DockingResult, variant::Variant},
    engine::progress::ProgressReporter,
    workflows,
};
use std::collections::HashMap;
use tracing::{debug, info, warn};

pub fn run(args: RankArgs) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let app_config = config::build_rank_config(&args)?;

    info!("Loading variant library from {:?}", &app_config.library_path);
    let library = fasta::read_library(&app_config.library_path)?;
    info!("Loading docking metrics from {:?}", &app_config.docking_path);
    let docking_rows = docking::read_docking_csv(&app_config.docking_path)?;

    let (candidates, ids) = join_by_id(library, docking_rows);
    println!("Ranking {} docked variant(s)...", candidates.len());

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Invoking the core ranking workflow...");
    let result = workflows::rank::run(candidates, &app_config.core_config, &reporter)?;

    report::write_ranked_csv(&app_config.ranked_output, &result.ranked, &ids)?;
    if let Some(best) = result.ranked.first() {
        println!(
            "✓ Best candidate: {} (composite score {:.4})",
            ids.get(best.variant.sequence())
                .map(String::as_str)
                .unwrap_or(best.variant.sequence()),
            best.composite_score
        );
    }
    println!(
        "  Ranked table ({} rows) written to: {}",
        result.ranked.len(),
        app_config.ranked_output.display()
    );

    match &result.selection {
        Some(outcome) => {
            if let Some(shortfall) = outcome.shortfall {
                println!(
                    "Warning: requested {} candidate(s) but only {} were ranked.",
                    shortfall.requested, shortfall.available
                );
            }
            println!("  Selected {} candidate(s).", outcome.selected.len());
            if let Some(path) = &app_config.selected_csv {
                report::write_ranked_csv(path, &outcome.selected, &ids)?;
                println!("  Selection table written to: {}", path.display());
            }
            if let Some(path) = &app_config.selected_fasta {
                report::write_selected_fasta(path, &outcome.selected, &ids)?;
                println!("  Selection FASTA written to: {}", path.display());
            }
        }
        None => {
            if app_config.selected_csv.is_some() || app_config.selected_fasta.is_some() {
                warn!("Selection outputs were requested but no selection cutoff is configured.");
            }
        }
    }

    Ok(())
}

/// Pairs each docking row with the library variant of the same id, in docking
/// file order. Rows without a library entry are skipped.
fn join_by_id(
    library: Vec<(String, Variant)>,
    docking_rows: Vec<(String, DockingResult)>,
) -> (Vec<(Variant, DockingResult)>, VariantIds) {
    let mut by_id: HashMap<String, Variant> = library.into_iter().collect();
    let mut candidates = Vec::with_capacity(docking_rows.len());
    let mut ids = VariantIds::new();

    for (id, result) in docking_rows {
        match by_id.remove(&id) {
            Some(variant) => {
                ids.insert(variant.sequence().to_string(), id);
                candidates.push((variant, result));
            }
            None => warn!(variant = %id, "Docking row has no matching library entry; skipping."),
        }
    }
    if !by_id.is_empty() {
        debug!("{} library variant(s) have no docking result.", by_id.len());
    }
    (candidates, ids)
}
