use super::docking::{ID_COLUMN, column_name};
use super::error::IoError;
use super::fasta::{FastaRecord, write_records_to_path};
use crate::core::models::docking::Metric;
use crate::engine::filters::RejectedVariant;
use crate::engine::ranking::RankedCandidate;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

/// Maps variant sequences to the identifiers they were published under.
/// Sequences without an entry are reported by their sequence.
pub type VariantIds = HashMap<String, String>;

fn lookup_id<'a>(ids: &'a VariantIds, sequence: &'a str) -> &'a str {
    ids.get(sequence).map(String::as_str).unwrap_or(sequence)
}

/// Audit trail of everything the filters turned away, one row per variant.
pub fn write_rejected_csv(path: &Path, rejected: &[RejectedVariant]) -> Result<(), IoError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| IoError::csv(path, e))?;
    writer
        .write_record([
            "sequence",
            "mutations",
            "net_charge",
            "avg_hydrophobicity",
            "length",
            "reasons",
        ])
        .map_err(|e| IoError::csv(path, e))?;

    for entry in rejected {
        let d = entry.variant.descriptors();
        let reasons = entry
            .reasons
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        writer
            .write_record([
                entry.variant.sequence().to_string(),
                entry.variant.mutation_label(),
                format!("{:.3}", d.net_charge),
                format!("{:.3}", d.avg_hydrophobicity),
                d.length.to_string(),
                reasons,
            ])
            .map_err(|e| IoError::csv(path, e))?;
    }
    writer.flush().map_err(|e| IoError::io(path, e))
}

/// Writes `rank,variant_id,sequence,composite_score,<metrics>,net_charge,avg_hydrophobicity,length`.
///
/// The metric columns are the union of metrics present in `ranked`; a
/// candidate missing one leaves the cell empty.
pub fn write_ranked_csv(
    path: &Path,
    ranked: &[RankedCandidate],
    ids: &VariantIds,
) -> Result<(), IoError> {
    let metrics: BTreeSet<&Metric> = ranked
        .iter()
        .flat_map(|c| c.docking.iter().map(|(m, _)| m))
        .collect();

    let mut writer = csv::Writer::from_path(path).map_err(|e| IoError::csv(path, e))?;
    let mut header = vec!["rank", ID_COLUMN, "sequence", "composite_score"];
    header.extend(metrics.iter().map(|m| column_name(m)));
    header.extend(["net_charge", "avg_hydrophobicity", "length"]);
    writer
        .write_record(&header)
        .map_err(|e| IoError::csv(path, e))?;

    for candidate in ranked {
        let sequence = candidate.variant.sequence();
        let d = candidate.variant.descriptors();
        let mut row = vec![
            candidate.rank.to_string(),
            lookup_id(ids, sequence).to_string(),
            sequence.to_string(),
            format!("{:.4}", candidate.composite_score),
        ];
        row.extend(metrics.iter().map(|m| {
            candidate
                .docking
                .get(m)
                .map(|v| v.to_string())
                .unwrap_or_default()
        }));
        row.extend([
            format!("{:.3}", d.net_charge),
            format!("{:.3}", d.avg_hydrophobicity),
            d.length.to_string(),
        ]);
        writer.write_record(&row).map_err(|e| IoError::csv(path, e))?;
    }
    writer.flush().map_err(|e| IoError::io(path, e))
}

/// FASTA of the selected candidates for synthesis ordering.
pub fn write_selected_fasta(
    path: &Path,
    selected: &[RankedCandidate],
    ids: &VariantIds,
) -> Result<(), IoError> {
    let records: Vec<FastaRecord> = selected
        .iter()
        .map(|c| {
            let sequence = c.variant.sequence();
            let mut header = format!(
                "{}|composite={:.3}",
                lookup_id(ids, sequence),
                c.composite_score
            );
            if let Some(score) = c.docking.binding_score() {
                header.push_str(&format!("|dock={:.3}", score));
            }
            FastaRecord::new(header, sequence)
        })
        .collect();
    write_records_to_path(path, &records)
}
