use crate::core::models::sequence::ParentSequence;
use crate::core::models::variant::Variant;
use crate::engine::config::GenerationConfig;
use crate::engine::enumeration::{Candidate, EnumerationPlan};
use crate::engine::error::EngineError;
use crate::engine::filters::{FilterSet, RejectedVariant};
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{debug, info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationResult {
    /// Accepted variants in enumeration order.
    pub accepted: Vec<Variant>,
    pub rejected: Vec<RejectedVariant>,
    /// Size of the combination space before deduplication.
    pub enumerated: u128,
    /// Combinations dropped because an earlier one produced the same sequence.
    pub duplicates: usize,
}

/// Enumerates, describes and filters variants of `parent` using the filters
/// derived from `config.filters`.
#[instrument(skip_all, name = "generation_workflow")]
pub fn run(
    parent: &ParentSequence,
    config: &GenerationConfig,
    reporter: &ProgressReporter,
) -> Result<GenerationResult, EngineError> {
    let filters = FilterSet::from_criteria(&config.filters, parent.len());
    run_with_filters(parent, config, &filters, reporter)
}

/// Same as [`run`] with a caller-assembled filter list, e.g. the default
/// filters plus custom predicates.
pub fn run_with_filters(
    parent: &ParentSequence,
    config: &GenerationConfig,
    filters: &FilterSet,
    reporter: &ProgressReporter,
) -> Result<GenerationResult, EngineError> {
    info!(
        parent_length = parent.len(),
        rules = config.mutation_rules.len(),
        deletions = config.mutation_rules.has_deletions(),
        cap = config.max_enumeration_size,
        "Starting variant generation."
    );

    // === Phase 1: Size check and enumeration ===
    let (candidates, enumerated, duplicates) = reporter.phase("Enumeration", || {
        config.validate_against(parent)?;
        let plan = EnumerationPlan::new(parent, &config.mutation_rules, config.wild_type)?;
        let enumerated = plan.ensure_within(config.max_enumeration_size)?;
        let (candidates, duplicates) = plan.distinct_candidates();
        Ok::<_, EngineError>((candidates, enumerated, duplicates))
    })?;
    info!(
        enumerated = %enumerated,
        distinct = candidates.len(),
        duplicates,
        "Enumeration finished."
    );
    reporter.tally("distinct", candidates.len());
    reporter.tally("duplicates", duplicates);
    if duplicates > 0 {
        reporter.report(Progress::Message(format!(
            "{} combination(s) collapsed onto an earlier identical sequence",
            duplicates
        )));
    }

    // === Phase 2: Descriptors ===
    let variants = reporter.phase("Descriptors", || describe(&candidates));

    // === Phase 3: Filtering ===
    let (accepted, rejected) = reporter.phase("Filtering", || partition(variants, filters, reporter));
    reporter.tally("accepted", accepted.len());
    reporter.tally("rejected", rejected.len());

    info!(
        accepted = accepted.len(),
        rejected = rejected.len(),
        "Variant generation complete."
    );
    Ok(GenerationResult {
        accepted,
        rejected,
        enumerated,
        duplicates,
    })
}

fn describe(candidates: &[Candidate]) -> Vec<Variant> {
    #[cfg(not(feature = "parallel"))]
    let iterator = candidates.iter();

    #[cfg(feature = "parallel")]
    let iterator = candidates.par_iter();

    iterator
        .map(|c| Variant::new(&c.residues, c.mutations.clone()))
        .collect()
}

fn partition(
    variants: Vec<Variant>,
    filters: &FilterSet,
    reporter: &ProgressReporter,
) -> (Vec<Variant>, Vec<RejectedVariant>) {
    reporter.report(Progress::TaskStart {
        total_steps: variants.len() as u64,
    });

    let mut accepted = Vec::new();
    let mut rejected = Vec::new();
    for variant in variants {
        let reasons = filters.evaluate(&variant);
        if reasons.is_empty() {
            accepted.push(variant);
        } else {
            debug!(sequence = variant.sequence(), reasons = reasons.len(), "Variant rejected.");
            rejected.push(RejectedVariant { variant, reasons });
        }
        reporter.report(Progress::TaskAdvance { steps: 1 });
    }

    reporter.report(Progress::TaskFinish);
    (accepted, rejected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::{
        Bounds, FilterCriteria, GenerationConfigBuilder, MutationRule, WildTypePolicy,
    };
    use crate::engine::filters::{RejectionReason, VariantFilter};
    use std::collections::HashSet;
    use std::sync::Mutex;

    const GLP1: &str = "HAEGTFTSDVSSYLEGQAAKEFIAWLVKGR";

    fn config(rules: Vec<MutationRule>, filters: FilterCriteria, cap: u64) -> GenerationConfig {
        GenerationConfigBuilder::new()
            .max_enumeration_size(cap)
            .mutation_rules(rules)
            .wild_type(WildTypePolicy::AsDeclared)
            .filters(filters)
            .build()
            .unwrap()
    }

    fn rule(position: usize, allowed: &[&str]) -> MutationRule {
        MutationRule::parse(position, allowed).unwrap()
    }

    fn glp1_filters() -> FilterCriteria {
        FilterCriteria {
            charge: Some(Bounds::<f64>::new("charge", -5.0, 5.0).unwrap()),
            hydrophobicity: Some(Bounds::<f64>::new("hydrophobicity", -2.0, 2.0).unwrap()),
            length: None,
            length_tolerance: 0,
        }
    }

    #[test]
    fn glp1_position_two_scan_accepts_all_three_variants() {
        let parent = ParentSequence::parse(GLP1).unwrap();
        let cfg = config(vec![rule(2, &["A", "G", "S"])], glp1_filters(), 1000);

        let result = run(&parent, &cfg, &ProgressReporter::new()).unwrap();

        assert_eq!(result.enumerated, 3);
        assert_eq!(result.duplicates, 0);
        assert!(result.rejected.is_empty());
        assert_eq!(result.accepted.len(), 3);

        let second: Vec<char> = result
            .accepted
            .iter()
            .map(|v| v.sequence().chars().nth(1).unwrap())
            .collect();
        assert_eq!(second, vec!['A', 'G', 'S']);
        for v in &result.accepted {
            assert_eq!(v.len(), parent.len());
            assert_eq!(&v.sequence()[2..], &GLP1[2..]);
            assert_eq!(&v.sequence()[..1], &GLP1[..1]);
        }
        assert!(result.accepted[0].is_wild_type());
        assert_eq!(result.accepted[1].mutation_label(), "A2G");
    }

    #[test]
    fn oversized_space_fails_before_descriptors() {
        let parent = ParentSequence::parse("ACDEFGHIKL").unwrap();
        let ten = ["A", "C", "D", "E", "F", "G", "H", "I", "K", "L"];
        let cfg = config(
            (1..=4).map(|p| rule(p, &ten)).collect(),
            FilterCriteria::default(),
            1000,
        );

        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|e| {
            events.lock().unwrap().push(e);
        }));
        let err = run(&parent, &cfg, &reporter).unwrap_err();
        drop(reporter);

        assert_eq!(
            err,
            EngineError::EnumerationTooLarge {
                size: 10_000,
                cap: 1000
            }
        );
        let events = events.into_inner().unwrap();
        assert!(
            !events
                .iter()
                .any(|e| matches!(e, Progress::PhaseStart { name: "Descriptors" }))
        );
    }

    #[test]
    fn partition_covers_every_distinct_sequence_once() {
        let parent = ParentSequence::parse("KAAGE").unwrap();
        let filters = FilterCriteria {
            charge: Some(Bounds::<f64>::new("charge", -0.5, 0.5).unwrap()),
            ..FilterCriteria::default()
        };
        let cfg = config(
            vec![rule(1, &["K", "E", "-"]), rule(2, &["A", "-"]), rule(3, &["A", "-"])],
            FilterCriteria {
                length_tolerance: 2,
                ..filters
            },
            1000,
        );

        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|e| {
            events.lock().unwrap().push(e);
        }));
        let result = run(&parent, &cfg, &reporter).unwrap();
        drop(reporter);
        assert_eq!(result.enumerated, 12);

        let distinct = result.accepted.len() + result.rejected.len();
        assert_eq!(distinct as u128 + result.duplicates as u128, result.enumerated);

        let mut seen = HashSet::new();
        for seq in result
            .accepted
            .iter()
            .chain(result.rejected.iter().map(|r| &r.variant))
            .map(Variant::sequence)
        {
            assert!(seen.insert(seq.to_string()), "{} appears twice", seq);
        }
        assert!(result.duplicates > 0);
        let events = events.into_inner().unwrap();
        assert!(events.iter().any(|e| matches!(
            e,
            Progress::Message(msg) if msg.starts_with(&result.duplicates.to_string())
        )));
    }

    #[test]
    fn repeated_runs_are_identical() {
        let parent = ParentSequence::parse(GLP1).unwrap();
        let cfg = config(
            vec![rule(2, &["A", "G", "S"]), rule(12, &["S", "-"])],
            FilterCriteria {
                length_tolerance: 1,
                ..glp1_filters()
            },
            1000,
        );
        let a = run(&parent, &cfg, &ProgressReporter::new()).unwrap();
        let b = run(&parent, &cfg, &ProgressReporter::new()).unwrap();
        assert_eq!(a, b);
        let seqs_a: Vec<_> = a.accepted.iter().map(Variant::sequence).collect();
        let seqs_b: Vec<_> = b.accepted.iter().map(Variant::sequence).collect();
        assert_eq!(seqs_a, seqs_b);
    }

    #[test]
    fn out_of_range_rule_is_a_configuration_error() {
        let parent = ParentSequence::parse("ACD").unwrap();
        let cfg = config(vec![rule(7, &["G"])], FilterCriteria::default(), 10);
        let err = run(&parent, &cfg, &ProgressReporter::new()).unwrap_err();
        assert!(matches!(err, EngineError::Configuration { .. }));
    }

    struct NoProline;

    impl VariantFilter for NoProline {
        fn name(&self) -> &'static str {
            "no-proline"
        }

        fn check(&self, variant: &Variant) -> Result<(), RejectionReason> {
            if variant.sequence().contains('P') {
                return Err(RejectionReason::Custom {
                    filter: self.name(),
                    message: "proline present".to_string(),
                });
            }
            Ok(())
        }
    }

    #[test]
    fn custom_filters_extend_the_default_set() {
        let parent = ParentSequence::parse("GAG").unwrap();
        let cfg = config(vec![rule(2, &["A", "P"])], FilterCriteria::default(), 10);
        let filters = FilterSet::from_criteria(&cfg.filters, parent.len()).with_filter(NoProline);

        let result = run_with_filters(&parent, &cfg, &filters, &ProgressReporter::new()).unwrap();
        assert_eq!(result.accepted.len(), 1);
        assert_eq!(result.rejected.len(), 1);
        assert_eq!(result.rejected[0].variant.sequence(), "GPG");
    }
}
