use crate::cli::GenerateArgs;
use crate::config::{self, ParentInput};
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use pepscreen::{
    core::io::{fasta, report},
    core::models::sequence::ParentSequence,
    engine::{error::EngineError, progress::ProgressReporter},
    workflows,
};
use tracing::{info, warn};

pub fn run(args: GenerateArgs) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let app_config = config::build_generate_config(&args)?;

    let parent = match &app_config.parent {
        ParentInput::Fasta(path) => {
            info!("Loading parent sequence from {:?}", path);
            fasta::read_parent(path)?
        }
        ParentInput::Inline(raw) => ParentSequence::parse(raw).map_err(EngineError::from)?,
    };
    println!("Parent sequence: {} ({} residues)", parent, parent.len());

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Invoking the core generation workflow...");
    let result = workflows::generate::run(&parent, &app_config.core_config, &reporter)?;

    println!(
        "Enumerated {} combination(s): {} accepted, {} rejected, {} duplicate(s).",
        result.enumerated,
        result.accepted.len(),
        result.rejected.len(),
        result.duplicates
    );

    if result.accepted.is_empty() {
        warn!("No variant passed the filters; the library will be empty.");
    }

    let records = fasta::library_records(&app_config.variant_prefix, &result.accepted);
    fasta::write_records_to_path(&app_config.library_output, &records)?;
    println!(
        "✓ Library of {} variant(s) written to: {}",
        records.len(),
        app_config.library_output.display()
    );

    if let Some(path) = &app_config.rejected_output {
        report::write_rejected_csv(path, &result.rejected)?;
        println!(
            "  Rejected variants ({}) written to: {}",
            result.rejected.len(),
            path.display()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use std::fs;
    use tempfile::tempdir;

    fn args(argv: &[&str]) -> GenerateArgs {
        match Cli::parse_from(argv).command {
            Commands::Generate(args) => args,
            _ => panic!("Expected 'generate' subcommand"),
        }
    }

    #[test]
    fn writes_library_and_rejected_audit() {
        let dir = tempdir().unwrap();
        let parent = dir.path().join("parent.fasta");
        fs::write(&parent, ">GLP1 fragment\nKAAGE\n").unwrap();
        let library = dir.path().join("library.fasta");
        let rejected = dir.path().join("rejected.csv");

        run(args(&[
            "pepscreen",
            "generate",
            "-i",
            parent.to_str().unwrap(),
            "-o",
            library.to_str().unwrap(),
            "--rejected",
            rejected.to_str().unwrap(),
            "--prefix",
            "KA",
            "-m",
            "1=K,D",
            "-S",
            "generation.filters.charge=0,2",
        ]))
        .unwrap();

        // KAAGE carries net charge 0, DAAGE carries -2.
        let library = fs::read_to_string(&library).unwrap();
        assert!(library.starts_with(">KA_variant_0001|WT|"));
        assert!(library.contains("\nKAAGE\n"));
        assert!(!library.contains("DAAGE"));

        let rejected = fs::read_to_string(&rejected).unwrap();
        assert!(rejected.starts_with("sequence,mutations,"));
        assert!(rejected.contains("DAAGE"));
    }

    #[test]
    fn invalid_inline_parent_is_an_engine_error() {
        let dir = tempdir().unwrap();
        let library = dir.path().join("library.fasta");
        let err = run(args(&[
            "pepscreen",
            "generate",
            "--sequence",
            "KAXGE",
            "-o",
            library.to_str().unwrap(),
            "-m",
            "1=A",
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("Invalid parent sequence"));
        assert!(!library.exists());
    }
}
