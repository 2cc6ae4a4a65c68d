use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AminoAcid {
    // --- Aliphatic, Nonpolar ---
    Alanine,    // A
    Glycine,    // G
    Isoleucine, // I
    Leucine,    // L
    Proline,    // P
    Valine,     // V

    // --- Aromatic ---
    Phenylalanine, // F
    Tryptophan,    // W
    Tyrosine,      // Y

    // --- Polar, Uncharged ---
    Asparagine, // N
    Cysteine,   // C
    Glutamine,  // Q
    Serine,     // S
    Threonine,  // T
    Methionine, // M

    // --- Positively Charged (Basic) ---
    Arginine,  // R
    Lysine,    // K
    Histidine, // H

    // --- Negatively Charged (Acidic) ---
    AsparticAcid, // D
    GlutamicAcid, // E
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ParseResidueError {
    #[error("Unknown one-letter amino acid code '{0}'")]
    UnknownCode(char),
    #[error("Expected a single one-letter code, got '{0}'")]
    NotSingleCharacter(String),
}

impl AminoAcid {
    pub const ALL: [AminoAcid; 20] = [
        AminoAcid::Alanine,
        AminoAcid::Cysteine,
        AminoAcid::AsparticAcid,
        AminoAcid::GlutamicAcid,
        AminoAcid::Phenylalanine,
        AminoAcid::Glycine,
        AminoAcid::Histidine,
        AminoAcid::Isoleucine,
        AminoAcid::Lysine,
        AminoAcid::Leucine,
        AminoAcid::Methionine,
        AminoAcid::Asparagine,
        AminoAcid::Proline,
        AminoAcid::Glutamine,
        AminoAcid::Arginine,
        AminoAcid::Serine,
        AminoAcid::Threonine,
        AminoAcid::Valine,
        AminoAcid::Tryptophan,
        AminoAcid::Tyrosine,
    ];

    pub fn from_one_letter(code: char) -> Option<Self> {
        match code.to_ascii_uppercase() {
            'A' => Some(Self::Alanine),
            'C' => Some(Self::Cysteine),
            'D' => Some(Self::AsparticAcid),
            'E' => Some(Self::GlutamicAcid),
            'F' => Some(Self::Phenylalanine),
            'G' => Some(Self::Glycine),
            'H' => Some(Self::Histidine),
            'I' => Some(Self::Isoleucine),
            'K' => Some(Self::Lysine),
            'L' => Some(Self::Leucine),
            'M' => Some(Self::Methionine),
            'N' => Some(Self::Asparagine),
            'P' => Some(Self::Proline),
            'Q' => Some(Self::Glutamine),
            'R' => Some(Self::Arginine),
            'S' => Some(Self::Serine),
            'T' => Some(Self::Threonine),
            'V' => Some(Self::Valine),
            'W' => Some(Self::Tryptophan),
            'Y' => Some(Self::Tyrosine),
            _ => None,
        }
    }

    pub fn to_one_letter(self) -> char {
        match self {
            Self::Alanine => 'A',
            Self::Cysteine => 'C',
            Self::AsparticAcid => 'D',
            Self::GlutamicAcid => 'E',
            Self::Phenylalanine => 'F',
            Self::Glycine => 'G',
            Self::Histidine => 'H',
            Self::Isoleucine => 'I',
            Self::Lysine => 'K',
            Self::Leucine => 'L',
            Self::Methionine => 'M',
            Self::Asparagine => 'N',
            Self::Proline => 'P',
            Self::Glutamine => 'Q',
            Self::Arginine => 'R',
            Self::Serine => 'S',
            Self::Threonine => 'T',
            Self::Valine => 'V',
            Self::Tryptophan => 'W',
            Self::Tyrosine => 'Y',
        }
    }
}

impl fmt::Display for AminoAcid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_one_letter())
    }
}

impl FromStr for AminoAcid {
    type Err = ParseResidueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_one_letter(c).ok_or(ParseResidueError::UnknownCode(c)),
            _ => Err(ParseResidueError::NotSingleCharacter(s.to_string())),
        }
    }
}

/// What a mutation rule may place at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Substitution {
    Residue(AminoAcid),
    Deletion,
}

impl Substitution {
    pub const DELETION_SYMBOL: char = '-';

    pub fn residue(self) -> Option<AminoAcid> {
        match self {
            Self::Residue(aa) => Some(aa),
            Self::Deletion => None,
        }
    }

    pub fn is_deletion(self) -> bool {
        matches!(self, Self::Deletion)
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Residue(aa) => write!(f, "{}", aa),
            Self::Deletion => write!(f, "{}", Self::DELETION_SYMBOL),
        }
    }
}

impl FromStr for Substitution {
    type Err = ParseResidueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim() == "-" {
            return Ok(Self::Deletion);
        }
        s.parse().map(Self::Residue)
    }
}

impl From<AminoAcid> for Substitution {
    fn from(aa: AminoAcid) -> Self {
        Self::Residue(aa)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn one_letter_codes_round_trip_for_all_standard_residues() {
        for aa in AminoAcid::ALL {
            assert_eq!(AminoAcid::from_one_letter(aa.to_one_letter()), Some(aa));
        }
        let distinct: HashSet<_> = AminoAcid::ALL.iter().map(|a| a.to_one_letter()).collect();
        assert_eq!(distinct.len(), 20);
    }

    #[test]
    fn from_one_letter_accepts_lowercase() {
        assert_eq!(AminoAcid::from_one_letter('k'), Some(AminoAcid::Lysine));
    }

    #[test]
    fn from_one_letter_rejects_non_standard_codes() {
        assert_eq!(AminoAcid::from_one_letter('X'), None);
        assert_eq!(AminoAcid::from_one_letter('B'), None);
        assert_eq!(AminoAcid::from_one_letter('*'), None);
    }

    #[test]
    fn from_str_requires_exactly_one_character() {
        assert_eq!("W".parse::<AminoAcid>(), Ok(AminoAcid::Tryptophan));
        assert_eq!(" g ".parse::<AminoAcid>(), Ok(AminoAcid::Glycine));
        assert_eq!(
            "AG".parse::<AminoAcid>(),
            Err(ParseResidueError::NotSingleCharacter("AG".to_string()))
        );
        assert_eq!(
            "Z".parse::<AminoAcid>(),
            Err(ParseResidueError::UnknownCode('Z'))
        );
    }

    #[test]
    fn substitution_parses_deletion_symbol() {
        assert_eq!("-".parse::<Substitution>(), Ok(Substitution::Deletion));
        assert_eq!(
            "S".parse::<Substitution>(),
            Ok(Substitution::Residue(AminoAcid::Serine))
        );
        assert!(Substitution::Deletion.is_deletion());
        assert_eq!(Substitution::Deletion.residue(), None);
    }
}
