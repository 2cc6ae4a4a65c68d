use crate::cli::CollectArgs;
use crate::error::Result;
use pepscreen::core::io::docking;
use tracing::{info, warn};

pub fn run(args: CollectArgs) -> Result<()> {
    info!("Scanning docking logs under {:?}", &args.root);
    let scores = docking::collect_vina_scores(&args.root)?;

    if scores.is_empty() {
        warn!("No parsable docking logs found under {:?}.", &args.root);
        println!("Warning: no docking scores were found.");
    }

    docking::write_scores_csv(&args.output, &scores)?;
    println!(
        "✓ Collected {} docking score(s) into: {}",
        scores.len(),
        args.output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn collects_scores_from_variant_directories() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("docking");
        for (id, score) in [("PEP_variant_0002", "-7.5"), ("PEP_variant_0001", "-9.1")] {
            let variant_dir = root.join(id);
            fs::create_dir_all(&variant_dir).unwrap();
            fs::write(
                variant_dir.join("log.txt"),
                format!("REMARK VINA RESULT:    {}      0.000      0.000\n", score),
            )
            .unwrap();
        }
        fs::create_dir_all(root.join("PEP_variant_0003")).unwrap();
        let output = dir.path().join("scores.csv");

        run(CollectArgs {
            root: root.clone(),
            output: output.clone(),
        })
        .unwrap();

        let content = fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines,
            vec![
                "variant_id,docking_score",
                "PEP_variant_0001,-9.1",
                "PEP_variant_0002,-7.5"
            ]
        );
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempdir().unwrap();
        let result = run(CollectArgs {
            root: dir.path().join("absent"),
            output: dir.path().join("scores.csv"),
        });
        assert!(result.is_err());
    }
}
