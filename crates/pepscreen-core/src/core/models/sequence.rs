use super::residue::AminoAcid;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum SequenceError {
    #[error("Parent sequence is empty")]
    Empty,
    #[error("Invalid residue '{code}' at position {position}")]
    InvalidResidue { position: usize, code: char },
}

/// The immutable template every variant is derived from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParentSequence {
    residues: Vec<AminoAcid>,
}

impl ParentSequence {
    pub fn new(residues: Vec<AminoAcid>) -> Result<Self, SequenceError> {
        if residues.is_empty() {
            return Err(SequenceError::Empty);
        }
        Ok(Self { residues })
    }

    /// Parses a plain residue string. Whitespace (e.g. FASTA line breaks) is ignored.
    pub fn parse(raw: &str) -> Result<Self, SequenceError> {
        let residues = raw
            .chars()
            .filter(|c| !c.is_whitespace())
            .enumerate()
            .map(|(i, code)| {
                AminoAcid::from_one_letter(code).ok_or(SequenceError::InvalidResidue {
                    position: i + 1,
                    code,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(residues)
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    pub fn residues(&self) -> &[AminoAcid] {
        &self.residues
    }

    /// Residue at a 1-based position.
    pub fn residue_at(&self, position: usize) -> Option<AminoAcid> {
        position
            .checked_sub(1)
            .and_then(|i| self.residues.get(i))
            .copied()
    }
}

impl fmt::Display for ParentSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for aa in &self.residues {
            write!(f, "{}", aa.to_one_letter())?;
        }
        Ok(())
    }
}

impl FromStr for ParentSequence {
    type Err = SequenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
