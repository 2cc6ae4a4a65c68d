//! # Descriptors Module
//!
//! Sequence-derived biophysical descriptors used to judge whether a peptide
//! variant is worth docking.
//!
//! All descriptors are computed from process-wide immutable scale tables
//! ([`scales`]), so computation is pure and total: every sequence made of
//! standard residues yields a value for each descriptor.

pub mod scales;

use crate::core::models::residue::AminoAcid;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Descriptors {
    pub net_charge: f64,
    pub avg_hydrophobicity: f64,
    pub length: usize,
}

impl Descriptors {
    pub fn compute(residues: &[AminoAcid]) -> Self {
        let mut net_charge = 0.0;
        let mut hydropathy_sum = 0.0;
        for aa in residues {
            let code = aa.to_one_letter();
            net_charge += scales::side_chain_charge(code);
            hydropathy_sum += scales::hydropathy(code).unwrap_or(0.0);
        }

        let length = residues.len();
        let avg_hydrophobicity = if length == 0 {
            0.0
        } else {
            hydropathy_sum / length as f64
        };

        Self {
            net_charge,
            avg_hydrophobicity,
            length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::sequence::ParentSequence;

    fn residues(s: &str) -> Vec<AminoAcid> {
        ParentSequence::parse(s).unwrap().residues().to_vec()
    }

    #[test]
    fn compute_sums_charges_and_averages_hydropathy() {
        let d = Descriptors::compute(&residues("KDIA"));
        assert!((d.net_charge - 0.0).abs() < 1e-12);
        assert!((d.avg_hydrophobicity - (-3.9 - 3.5 + 4.5 + 1.8) / 4.0).abs() < 1e-12);
        assert_eq!(d.length, 4);
    }

    #[test]
    fn compute_for_glp1_parent_matches_hand_calculation() {
        let d = Descriptors::compute(&residues("HAEGTFTSDVSSYLEGQAAKEFIAWLVKGR"));
        // 3 basic (K, K, R) + His at 0.1, 4 acidic (E, D, E, E).
        assert!((d.net_charge - (-0.9)).abs() < 1e-9);
        assert!((d.avg_hydrophobicity - (-6.9 / 30.0)).abs() < 1e-9);
        assert_eq!(d.length, 30);
    }

    #[test]
    fn compute_on_empty_sequence_is_defined() {
        let d = Descriptors::compute(&[]);
        assert_eq!(d.net_charge, 0.0);
        assert_eq!(d.avg_hydrophobicity, 0.0);
        assert_eq!(d.length, 0);
    }
}
