use phf::{Map, phf_map};

// Kyte & Doolittle (1982) hydropathy index.
static KYTE_DOOLITTLE: Map<char, f64> = phf_map! {
    'A' => 1.8, 'C' => 2.5, 'D' => -3.5, 'E' => -3.5, 'F' => 2.8,
    'G' => -0.4, 'H' => -3.2, 'I' => 4.5, 'K' => -3.9, 'L' => 3.8,
    'M' => 1.9, 'N' => -3.5, 'P' => -1.6, 'Q' => -3.5, 'R' => -4.5,
    'S' => -0.8, 'T' => -0.7, 'V' => 4.2, 'W' => -0.9, 'Y' => -1.3,
};

// Side-chain charge at pH 7.4. His carries a small fractional charge (pKa ~6.0).
static SIDE_CHAIN_CHARGE: Map<char, f64> = phf_map! {
    'K' => 1.0, 'R' => 1.0, 'H' => 0.1,
    'D' => -1.0, 'E' => -1.0,
};

pub fn hydropathy(code: char) -> Option<f64> {
    KYTE_DOOLITTLE.get(&code.to_ascii_uppercase()).copied()
}

/// Residues absent from the charge table are neutral.
pub fn side_chain_charge(code: char) -> f64 {
    SIDE_CHAIN_CHARGE
        .get(&code.to_ascii_uppercase())
        .copied()
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::residue::AminoAcid;

    #[test]
    fn hydropathy_covers_every_standard_residue() {
        for aa in AminoAcid::ALL {
            assert!(hydropathy(aa.to_one_letter()).is_some(), "missing {}", aa);
        }
    }

    #[test]
    fn hydropathy_returns_kyte_doolittle_values() {
        assert_eq!(hydropathy('I'), Some(4.5));
        assert_eq!(hydropathy('R'), Some(-4.5));
        assert_eq!(hydropathy('g'), Some(-0.4));
        assert_eq!(hydropathy('X'), None);
    }

    #[test]
    fn side_chain_charge_signs_are_correct() {
        assert_eq!(side_chain_charge('K'), 1.0);
        assert_eq!(side_chain_charge('R'), 1.0);
        assert_eq!(side_chain_charge('D'), -1.0);
        assert_eq!(side_chain_charge('e'), -1.0);
        assert_eq!(side_chain_charge('H'), 0.1);
        assert_eq!(side_chain_charge('A'), 0.0);
        assert_eq!(side_chain_charge('X'), 0.0);
    }
}
