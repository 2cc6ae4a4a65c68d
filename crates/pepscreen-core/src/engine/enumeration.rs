use crate::core::models::residue::{AminoAcid, Substitution};
use crate::core::models::sequence::ParentSequence;
use crate::core::models::variant::Mutation;
use crate::engine::config::{ConfigError, MutationRules, WildTypePolicy};
use crate::engine::error::EngineError;
use itertools::{Either, Itertools};
use std::collections::HashSet;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
struct PositionChoices {
    position: usize,
    wild_type: AminoAcid,
    options: Vec<Substitution>,
}

/// A materialized combination, before descriptors are attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub residues: Vec<AminoAcid>,
    pub mutations: Vec<Mutation>,
}

impl Candidate {
    pub fn sequence(&self) -> String {
        self.residues.iter().map(|aa| aa.to_one_letter()).collect()
    }
}

/// The resolved per-position choice lists for one parent.
///
/// Iteration order is lexicographic over positions in ascending order, each
/// position walking its options in declared order, the last ruled position
/// varying fastest.
#[derive(Debug, Clone)]
pub struct EnumerationPlan<'p> {
    parent: &'p ParentSequence,
    choices: Vec<PositionChoices>,
}

impl<'p> EnumerationPlan<'p> {
    pub fn new(
        parent: &'p ParentSequence,
        rules: &MutationRules,
        policy: WildTypePolicy,
    ) -> Result<Self, ConfigError> {
        rules.validate_against(parent)?;

        let mut choices = Vec::with_capacity(rules.len());
        for (position, allowed) in rules.iter() {
            let wild_type = parent
                .residue_at(position)
                .ok_or(ConfigError::PositionOutOfRange {
                    position,
                    length: parent.len(),
                })?;
            let wt = Substitution::Residue(wild_type);

            let options = match policy {
                WildTypePolicy::AsDeclared => allowed.to_vec(),
                WildTypePolicy::Include if allowed.contains(&wt) => allowed.to_vec(),
                WildTypePolicy::Include => std::iter::once(wt)
                    .chain(allowed.iter().copied())
                    .collect(),
                WildTypePolicy::Exclude => {
                    let kept: Vec<_> = allowed.iter().copied().filter(|&s| s != wt).collect();
                    if kept.is_empty() {
                        return Err(ConfigError::EmptyAllowedSet { position });
                    }
                    kept
                }
            };

            choices.push(PositionChoices {
                position,
                wild_type,
                options,
            });
        }

        Ok(Self { parent, choices })
    }

    /// Number of combinations, saturating instead of overflowing.
    pub fn size(&self) -> u128 {
        self.choices
            .iter()
            .fold(1u128, |acc, c| acc.saturating_mul(c.options.len() as u128))
    }

    pub fn ensure_within(&self, cap: u64) -> Result<u128, EngineError> {
        let size = self.size();
        if size > cap as u128 {
            return Err(EngineError::EnumerationTooLarge { size, cap });
        }
        Ok(size)
    }

    /// Lazily walks every combination in deterministic order.
    pub fn candidates(&self) -> impl Iterator<Item = Candidate> + '_ {
        if self.choices.is_empty() {
            return Either::Left(std::iter::once(self.build(&[])));
        }
        Either::Right(
            self.choices
                .iter()
                .map(|c| 0..c.options.len())
                .multi_cartesian_product()
                .map(move |indices| self.build(&indices)),
        )
    }

    /// Collapses combinations that yield the same sequence, keeping the first seen.
    /// Returns the distinct candidates and the number of collapsed duplicates.
    pub fn distinct_candidates(&self) -> (Vec<Candidate>, usize) {
        let mut seen = HashSet::new();
        let mut duplicates = 0;
        let mut distinct = Vec::new();
        for candidate in self.candidates() {
            if seen.insert(candidate.sequence()) {
                distinct.push(candidate);
            } else {
                duplicates += 1;
            }
        }
        debug!(
            distinct = distinct.len(),
            duplicates, "Enumeration collapsed to distinct sequences."
        );
        (distinct, duplicates)
    }

    fn build(&self, indices: &[usize]) -> Candidate {
        let mut slots: Vec<Option<AminoAcid>> =
            self.parent.residues().iter().copied().map(Some).collect();
        let mut mutations = Vec::new();

        for (choice, &idx) in self.choices.iter().zip(indices) {
            let option = choice.options[idx];
            slots[choice.position - 1] = option.residue();
            if option != Substitution::Residue(choice.wild_type) {
                mutations.push(Mutation {
                    position: choice.position,
                    wild_type: choice.wild_type,
                    replacement: option,
                });
            }
        }

        Candidate {
            residues: slots.into_iter().flatten().collect(),
            mutations,
        }
    }
}
