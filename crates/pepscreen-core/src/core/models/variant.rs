use super::residue::{AminoAcid, Substitution};
use crate::core::descriptors::Descriptors;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A single position-wise change relative to the parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mutation {
    pub position: usize, // 1-based position in the parent
    pub wild_type: AminoAcid,
    pub replacement: Substitution,
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.replacement {
            Substitution::Residue(aa) => write!(f, "{}{}{}", self.wild_type, self.position, aa),
            Substitution::Deletion => write!(f, "{}{}del", self.wild_type, self.position),
        }
    }
}

/// A generated peptide. Identity is the sequence string alone.
#[derive(Debug, Clone)]
pub struct Variant {
    sequence: String,
    mutations: Vec<Mutation>,
    descriptors: Descriptors,
}

impl Variant {
    pub fn new(residues: &[AminoAcid], mutations: Vec<Mutation>) -> Self {
        let sequence = residues.iter().map(|aa| aa.to_one_letter()).collect();
        Self {
            sequence,
            mutations,
            descriptors: Descriptors::compute(residues),
        }
    }

    /// Builds a variant from a bare sequence, e.g. one read back from a library file.
    /// Mutation history is not recoverable from the sequence, so it is left empty.
    pub fn from_sequence(residues: &[AminoAcid]) -> Self {
        Self::new(residues, Vec::new())
    }

    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }

    pub fn descriptors(&self) -> &Descriptors {
        &self.descriptors
    }

    pub fn len(&self) -> usize {
        self.descriptors.length
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.length == 0
    }

    pub fn is_wild_type(&self) -> bool {
        self.mutations.is_empty()
    }

    /// Compact mutation label such as `A2G/S12del`, or `WT` for the parent itself.
    pub fn mutation_label(&self) -> String {
        if self.is_wild_type() {
            return "WT".to_string();
        }
        self.mutations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl PartialEq for Variant {
    fn eq(&self, other: &Self) -> bool {
        self.sequence == other.sequence
    }
}
impl Eq for Variant {}

impl Hash for Variant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sequence.hash(state);
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sequence)
    }
}
