use super::defaults::DefaultsConfig;
use super::file::{FileConfig, FileFilterConfig, FileSelectionConfig};
use super::models::{GenerateAppConfig, ParentInput, RankAppConfig};
use crate::cli::{
    GenerateArgs, ModeArg, NormalizationArg, RankArgs, RankAssignmentArg, WildTypeArg,
};
use crate::error::{CliError, Result};
use crate::utils::parser;
use clap::ValueEnum;
use pepscreen::core::models::docking::{Metric, SortOrientation};
use pepscreen::engine::config as core_config;
use std::path::Path;
use tracing::debug;

pub fn build_generate_config(args: &GenerateArgs) -> Result<GenerateAppConfig> {
    let defaults = DefaultsConfig::default();
    let file_config = load_file_config(args.config.as_deref())?;
    let mut file_config = apply_set_values(file_config, &args.set_values)?;
    let gen_file = file_config.generation.take().unwrap_or_default();

    let max_enumeration_size = args
        .max_enumeration_size
        .or(gen_file.max_enumeration_size)
        .unwrap_or(defaults.max_enumeration_size);
    let wild_type = args
        .wild_type
        .map(Into::into)
        .or(gen_file.wild_type)
        .unwrap_or(defaults.wild_type);
    let variant_prefix = args
        .prefix
        .clone()
        .or(gen_file.variant_prefix)
        .unwrap_or_else(|| defaults.variant_prefix.clone());

    let mutation_rules = if args.mutations.is_empty() {
        gen_file
            .mutation_rules
            .unwrap_or_default()
            .iter()
            .map(|(position, codes)| {
                let position = parser::parse_position(position)
                    .map_err(|e| CliError::Config(e.to_string()))?;
                mutation_rule(position, codes)
            })
            .collect::<Result<Vec<_>>>()?
    } else {
        args.mutations
            .iter()
            .map(|spec| {
                let (position, codes) = parser::parse_mutation_rule(spec)
                    .map_err(|e| CliError::Argument(e.to_string()))?;
                mutation_rule(position, &codes)
            })
            .collect::<Result<Vec<_>>>()?
    };
    debug!("Resolved {} mutation rule(s).", mutation_rules.len());

    let filters = merge_filters(gen_file.filters.unwrap_or_default(), &defaults)?;

    let core_config = core_config::GenerationConfigBuilder::new()
        .max_enumeration_size(max_enumeration_size)
        .mutation_rules(mutation_rules)
        .wild_type(wild_type)
        .filters(filters)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let parent = match (&args.parent.input, &args.parent.sequence) {
        (Some(path), _) => ParentInput::Fasta(path.clone()),
        (None, Some(sequence)) => ParentInput::Inline(sequence.clone()),
        (None, None) => {
            return Err(CliError::Argument(
                "Either --input or --sequence is required.".to_string(),
            ));
        }
    };

    Ok(GenerateAppConfig {
        parent,
        library_output: args.output.clone(),
        rejected_output: args.rejected.clone(),
        variant_prefix,
        core_config,
    })
}

pub fn build_rank_config(args: &RankArgs) -> Result<RankAppConfig> {
    let defaults = DefaultsConfig::default();
    let file_config = load_file_config(args.config.as_deref())?;
    let mut file_config = apply_set_values(file_config, &args.set_values)?;
    let rank_file = file_config.ranking.take().unwrap_or_default();

    let mode = args
        .mode
        .map(Into::into)
        .or(rank_file.mode)
        .unwrap_or(defaults.mode);
    let metric = match args.metric.as_deref().or(rank_file.metric.as_deref()) {
        Some(name) => parse_metric(name)?,
        None => defaults.metric,
    };
    let sort_orientation = args
        .sort_orientation
        .map(Into::into)
        .or(rank_file.sort_orientation)
        .unwrap_or(defaults.sort_orientation);
    let normalization = args
        .normalization
        .map(Into::into)
        .or(rank_file.normalization)
        .unwrap_or(defaults.normalization);
    let rank_assignment = args
        .rank_assignment
        .map(Into::into)
        .or(rank_file.rank_assignment)
        .unwrap_or(defaults.rank_assignment);

    let tie_break_names = if args.tie_break.is_empty() {
        rank_file.tie_break.unwrap_or_default()
    } else {
        args.tie_break.clone()
    };
    let tie_break = tie_break_names
        .iter()
        .map(|name| parse_metric(name))
        .collect::<Result<Vec<_>>>()?;

    let weights = rank_file
        .weights
        .unwrap_or_default()
        .into_iter()
        .map(|(name, weight)| Ok((parse_metric(&name)?, weight)))
        .collect::<Result<Vec<_>>>()?;

    let selection = match (args.top_n, args.threshold) {
        (Some(n), _) => Some(core_config::Selection::TopN(n)),
        (None, Some(t)) => Some(core_config::Selection::Threshold(t)),
        (None, None) => merge_selection(rank_file.selection)?,
    };

    let mut builder = core_config::RankingConfigBuilder::new()
        .mode(mode)
        .metric(metric)
        .weights(weights)
        .normalization(normalization)
        .sort_orientation(sort_orientation)
        .tie_break_keys(tie_break)
        .rank_assignment(rank_assignment)
        .selection(selection);
    for (name, orientation) in rank_file.orientations.unwrap_or_default() {
        builder = builder.metric_orientation(parse_metric(&name)?, orientation);
    }
    let core_config = builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(RankAppConfig {
        library_path: args.library.clone(),
        docking_path: args.docking.clone(),
        ranked_output: args.output.clone(),
        selected_csv: args.selected_csv.clone(),
        selected_fasta: args.selected_fasta.clone(),
        core_config,
    })
}

fn load_file_config(path: Option<&Path>) -> Result<FileConfig> {
    match path {
        Some(path) => FileConfig::from_file(path),
        None => Ok(FileConfig::default()),
    }
}

fn mutation_rule(position: usize, codes: &[String]) -> Result<core_config::MutationRule> {
    core_config::MutationRule::parse(position, codes).map_err(|e| CliError::Config(e.to_string()))
}

fn parse_metric(name: &str) -> Result<Metric> {
    name.parse::<Metric>()
        .map_err(|e| CliError::Config(format!("Invalid metric '{}': {}", name, e)))
}

fn merge_filters(
    file: FileFilterConfig,
    defaults: &DefaultsConfig,
) -> Result<core_config::FilterCriteria> {
    let to_config = |e: core_config::ConfigError| CliError::Config(e.to_string());
    Ok(core_config::FilterCriteria {
        charge: file
            .charge
            .map(|[min, max]| core_config::Bounds::<f64>::new("charge", min, max))
            .transpose()
            .map_err(to_config)?,
        hydrophobicity: file
            .hydrophobicity
            .map(|[min, max]| core_config::Bounds::<f64>::new("hydrophobicity", min, max))
            .transpose()
            .map_err(to_config)?,
        length: file
            .length
            .map(|[min, max]| core_config::Bounds::<usize>::new("length", min, max))
            .transpose()
            .map_err(to_config)?,
        length_tolerance: file.length_tolerance.unwrap_or(defaults.length_tolerance),
    })
}

fn merge_selection(file: Option<FileSelectionConfig>) -> Result<Option<core_config::Selection>> {
    match file {
        None => Ok(None),
        Some(FileSelectionConfig {
            top_n: Some(_),
            threshold: Some(_),
        }) => Err(CliError::Config(
            "`ranking.selection` accepts either `top-n` or `threshold`, not both.".to_string(),
        )),
        Some(FileSelectionConfig {
            top_n: Some(n),
            threshold: None,
        }) => Ok(Some(core_config::Selection::TopN(n))),
        Some(FileSelectionConfig {
            top_n: None,
            threshold: Some(t),
        }) => Ok(Some(core_config::Selection::Threshold(t))),
        Some(_) => Ok(None),
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value)))
}

fn parse_enum<T: ValueEnum>(key: &str, value: &str) -> Result<T> {
    T::from_str(value, true)
        .map_err(|_| CliError::Config(format!("Invalid value for {}: {}", key, value)))
}

fn parse_range<T: std::str::FromStr>(key: &str, value: &str) -> Result<[T; 2]> {
    parser::parse_range(value).map_err(|e| CliError::Config(format!("{}: {}", key, e)))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let (key, value) = parser::parse_key_value(kv_pair).map_err(|_| {
            CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            ))
        })?;

        if let Some(position) = key.strip_prefix("generation.mutation-rules.") {
            parser::parse_position(position).map_err(|e| CliError::Config(e.to_string()))?;
            config
                .generation
                .get_or_insert_with(Default::default)
                .mutation_rules
                .get_or_insert_with(Default::default)
                .insert(position.to_string(), parser::parse_list(value));
            continue;
        }
        if let Some(metric) = key.strip_prefix("ranking.weights.") {
            config
                .ranking
                .get_or_insert_with(Default::default)
                .weights
                .get_or_insert_with(Default::default)
                .insert(metric.to_string(), parse_value(key, value, "float")?);
            continue;
        }
        if let Some(metric) = key.strip_prefix("ranking.orientations.") {
            let orientation = value
                .parse::<SortOrientation>()
                .map_err(|e| CliError::Config(format!("{}: {}", key, e)))?;
            config
                .ranking
                .get_or_insert_with(Default::default)
                .orientations
                .get_or_insert_with(Default::default)
                .insert(metric.to_string(), orientation);
            continue;
        }

        match key {
            "generation.max-enumeration-size" => {
                config
                    .generation
                    .get_or_insert_with(Default::default)
                    .max_enumeration_size = Some(parse_value(key, value, "integer")?);
            }
            "generation.wild-type" => {
                config.generation.get_or_insert_with(Default::default).wild_type =
                    Some(parse_enum::<WildTypeArg>(key, value)?.into());
            }
            "generation.variant-prefix" => {
                config
                    .generation
                    .get_or_insert_with(Default::default)
                    .variant_prefix = Some(value.to_string());
            }
            "generation.filters.charge" => {
                filters(&mut config).charge = Some(parse_range(key, value)?);
            }
            "generation.filters.hydrophobicity" => {
                filters(&mut config).hydrophobicity = Some(parse_range(key, value)?);
            }
            "generation.filters.length" => {
                filters(&mut config).length = Some(parse_range(key, value)?);
            }
            "generation.filters.length-tolerance" => {
                filters(&mut config).length_tolerance = Some(parse_value(key, value, "integer")?);
            }
            "ranking.mode" => {
                config.ranking.get_or_insert_with(Default::default).mode =
                    Some(parse_enum::<ModeArg>(key, value)?.into());
            }
            "ranking.metric" => {
                config.ranking.get_or_insert_with(Default::default).metric =
                    Some(value.to_string());
            }
            "ranking.sort-orientation" => {
                config
                    .ranking
                    .get_or_insert_with(Default::default)
                    .sort_orientation = Some(
                    value
                        .parse::<SortOrientation>()
                        .map_err(|e| CliError::Config(format!("{}: {}", key, e)))?,
                );
            }
            "ranking.normalization" => {
                config
                    .ranking
                    .get_or_insert_with(Default::default)
                    .normalization = Some(parse_enum::<NormalizationArg>(key, value)?.into());
            }
            "ranking.rank-assignment" => {
                config
                    .ranking
                    .get_or_insert_with(Default::default)
                    .rank_assignment = Some(parse_enum::<RankAssignmentArg>(key, value)?.into());
            }
            "ranking.tie-break" => {
                config.ranking.get_or_insert_with(Default::default).tie_break =
                    Some(parser::parse_list(value));
            }
            "ranking.selection.top-n" => {
                config
                    .ranking
                    .get_or_insert_with(Default::default)
                    .selection = Some(FileSelectionConfig {
                    top_n: Some(parse_value(key, value, "integer")?),
                    threshold: None,
                });
            }
            "ranking.selection.threshold" => {
                config
                    .ranking
                    .get_or_insert_with(Default::default)
                    .selection = Some(FileSelectionConfig {
                    top_n: None,
                    threshold: Some(parse_value(key, value, "float")?),
                });
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

fn filters(config: &mut FileConfig) -> &mut FileFilterConfig {
    config
        .generation
        .get_or_insert_with(Default::default)
        .filters
        .get_or_insert_with(Default::default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use pepscreen::core::models::residue::{AminoAcid, Substitution};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::{TempDir, tempdir};

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("pepscreen.toml");
        fs::write(&path, content).unwrap();
        path
    }

    fn generate_args(extra: &[&str]) -> GenerateArgs {
        let mut argv = vec!["pepscreen", "generate", "--sequence", "HAEGTFTSDVSSYLEG", "-o", "lib.fasta"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Generate(args) => args,
            _ => panic!("Expected 'generate' subcommand"),
        }
    }

    fn rank_args(extra: &[&str]) -> RankArgs {
        let mut argv = vec!["pepscreen", "rank", "-l", "lib.fasta", "-d", "dock.csv", "-o", "ranked.csv"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Rank(args) => args,
            _ => panic!("Expected 'rank' subcommand"),
        }
    }

    #[test]
    fn generate_defaults_apply_without_a_config_file() {
        let app = build_generate_config(&generate_args(&["-m", "2=A,G,S"])).unwrap();
        assert_eq!(app.variant_prefix, "PEP");
        assert!(matches!(app.parent, ParentInput::Inline(ref s) if s == "HAEGTFTSDVSSYLEG"));

        let core = app.core_config;
        assert_eq!(core.max_enumeration_size, 100_000);
        assert_eq!(core.wild_type, core_config::WildTypePolicy::AsDeclared);
        assert_eq!(core.mutation_rules.len(), 1);
        assert_eq!(
            core.mutation_rules.get(2).unwrap(),
            &[
                Substitution::Residue(AminoAcid::Alanine),
                Substitution::Residue(AminoAcid::Glycine),
                Substitution::Residue(AminoAcid::Serine)
            ]
        );
        assert_eq!(core.filters, core_config::FilterCriteria::default());
    }

    #[test]
    fn generate_reads_file_and_cli_overrides_win() {
        let dir = tempdir().unwrap();
        let path = write_config(
            &dir,
            r#"
            [generation]
            max-enumeration-size = 50
            wild-type = "exclude"
            variant-prefix = "GLP1"

            [generation.mutation-rules]
            2 = ["A", "G", "S"]
            12 = ["S", "-"]

            [generation.filters]
            charge = [-5.0, 5.0]
            length-tolerance = 1
            "#,
        );
        let args = generate_args(&[
            "-c",
            path.to_str().unwrap(),
            "--max-enumeration-size",
            "500",
            "--prefix",
            "LIB",
        ]);
        let app = build_generate_config(&args).unwrap();

        assert_eq!(app.variant_prefix, "LIB");
        let core = app.core_config;
        assert_eq!(core.max_enumeration_size, 500);
        assert_eq!(core.wild_type, core_config::WildTypePolicy::Exclude);
        assert_eq!(core.mutation_rules.len(), 2);
        assert!(core.mutation_rules.has_deletions());
        assert_eq!(core.filters.charge.unwrap().max, 5.0);
        assert_eq!(core.filters.length_tolerance, 1);
    }

    #[test]
    fn set_values_override_file_values() {
        let dir = tempdir().unwrap();
        let path = write_config(
            &dir,
            "[generation]\nmax-enumeration-size = 50\n[generation.mutation-rules]\n2 = [\"A\"]\n",
        );
        let args = generate_args(&[
            "-c",
            path.to_str().unwrap(),
            "-S",
            "generation.max-enumeration-size=75",
            "-S",
            "generation.mutation-rules.3=K,R",
            "-S",
            "generation.filters.hydrophobicity=-2,2",
        ]);
        let core = build_generate_config(&args).unwrap().core_config;
        assert_eq!(core.max_enumeration_size, 75);
        assert_eq!(core.mutation_rules.len(), 2);
        assert_eq!(core.filters.hydrophobicity.unwrap().min, -2.0);
    }

    #[test]
    fn invalid_rules_and_keys_are_configuration_errors() {
        let err = build_generate_config(&generate_args(&["-m", "2=A,X"])).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));

        let err = build_generate_config(&generate_args(&["-m", "two=A"])).unwrap_err();
        assert!(matches!(err, CliError::Argument(_)));

        let err = build_generate_config(&generate_args(&["-S", "generation.unknown=1"])).unwrap_err();
        assert!(matches!(err, CliError::Config(msg) if msg.contains("generation.unknown")));

        let err = build_generate_config(&generate_args(&[
            "-S",
            "generation.filters.charge=5,-5",
        ]))
        .unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn rank_defaults_to_single_binding_score() {
        let app = build_rank_config(&rank_args(&[])).unwrap();
        let core = app.core_config;
        assert_eq!(
            core.mode,
            core_config::RankingMode::Single {
                metric: Metric::BindingScore
            }
        );
        assert_eq!(core.sort_orientation, SortOrientation::LowerIsBetter);
        assert_eq!(core.rank_assignment, core_config::RankAssignment::Strict);
        assert!(core.tie_break.is_empty());
        assert_eq!(core.selection, None);
    }

    #[test]
    fn rank_reads_weighted_mode_from_file() {
        let dir = tempdir().unwrap();
        let path = write_config(
            &dir,
            r#"
            [ranking]
            mode = "weighted"
            normalization = "z-score"
            tie-break = ["rmsd"]

            [ranking.weights]
            binding_score = 0.8
            buried_area = 0.2

            [ranking.orientations]
            buried_area = "higher-is-better"

            [ranking.selection]
            threshold = -8.0
            "#,
        );
        let core = build_rank_config(&rank_args(&["-c", path.to_str().unwrap()]))
            .unwrap()
            .core_config;

        let core_config::RankingMode::Weighted {
            weights,
            normalization,
        } = &core.mode
        else {
            panic!("Expected weighted mode");
        };
        assert_eq!(*normalization, core_config::Normalization::ZScore);
        let buried = weights
            .iter()
            .find(|w| w.metric == Metric::Custom("buried_area".to_string()))
            .unwrap();
        assert_eq!(buried.orientation, SortOrientation::HigherIsBetter);
        assert_eq!(core.tie_break[0].metric, Metric::Rmsd);
        assert_eq!(core.selection, Some(core_config::Selection::Threshold(-8.0)));
    }

    #[test]
    fn rank_cli_selection_replaces_file_selection() {
        let dir = tempdir().unwrap();
        let path = write_config(&dir, "[ranking.selection]\nthreshold = -8.0\n");
        let core = build_rank_config(&rank_args(&["-c", path.to_str().unwrap(), "-n", "3"]))
            .unwrap()
            .core_config;
        assert_eq!(core.selection, Some(core_config::Selection::TopN(3)));
    }

    #[test]
    fn rank_configuration_errors_surface() {
        let dir = tempdir().unwrap();
        let path = write_config(&dir, "[ranking.selection]\ntop-n = 3\nthreshold = -8.0\n");
        let err = build_rank_config(&rank_args(&["-c", path.to_str().unwrap()])).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));

        // Custom metric without an orientation cannot be weighted.
        let err = build_rank_config(&rank_args(&[
            "--mode",
            "weighted",
            "-S",
            "ranking.weights.buried_area=1.0",
        ]))
        .unwrap_err();
        assert!(matches!(err, CliError::Config(msg) if msg.contains("buried_area")));
    }
}
