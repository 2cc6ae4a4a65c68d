use super::error::IoError;
use crate::core::models::residue::AminoAcid;
use crate::core::models::sequence::ParentSequence;
use crate::core::models::variant::Variant;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

const HEADER_SEPARATOR: char = '|';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    pub header: String,
    pub sequence: String,
}

impl FastaRecord {
    pub fn new(header: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            sequence: sequence.into(),
        }
    }

    /// The canonical identifier: the first whitespace-delimited token of the
    /// header, up to its first `|`.
    pub fn id(&self) -> &str {
        self.header
            .split_whitespace()
            .next()
            .and_then(|token| token.split(HEADER_SEPARATOR).next())
            .unwrap_or_default()
    }
}

/// Reads every record from a multi-FASTA stream.
///
/// Sequence lines are concatenated with whitespace removed. Blank lines are
/// ignored. Lines before the first header are a parse error.
///
/// # Errors
///
/// Returns [`IoError::Io`] on read failure and [`IoError::Parse`] when sequence
/// data appears before any header.
pub fn read_records(reader: impl BufRead, path: &Path) -> Result<Vec<FastaRecord>, IoError> {
    let mut records: Vec<FastaRecord> = Vec::new();
    for (line_num, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| IoError::io(path, e))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(header) = line.strip_prefix('>') {
            records.push(FastaRecord::new(header.trim(), String::new()));
        } else if let Some(current) = records.last_mut() {
            current
                .sequence
                .extend(line.chars().filter(|c| !c.is_whitespace()));
        } else {
            return Err(IoError::parse(
                path,
                format!("line {}: sequence data before the first header", line_num + 1),
            ));
        }
    }
    Ok(records)
}

pub fn read_records_from_path(path: &Path) -> Result<Vec<FastaRecord>, IoError> {
    let file = File::open(path).map_err(|e| IoError::io(path, e))?;
    read_records(BufReader::new(file), path)
}

pub fn write_records(
    writer: &mut impl Write,
    records: &[FastaRecord],
    path: &Path,
) -> Result<(), IoError> {
    for record in records {
        writeln!(writer, ">{}", record.header).map_err(|e| IoError::io(path, e))?;
        writeln!(writer, "{}", record.sequence).map_err(|e| IoError::io(path, e))?;
    }
    writer.flush().map_err(|e| IoError::io(path, e))
}

pub fn write_records_to_path(path: &Path, records: &[FastaRecord]) -> Result<(), IoError> {
    let file = File::create(path).map_err(|e| IoError::io(path, e))?;
    write_records(&mut BufWriter::new(file), records, path)
}

/// Loads the parent template from the first record of a FASTA file.
pub fn read_parent(path: &Path) -> Result<ParentSequence, IoError> {
    let records = read_records_from_path(path)?;
    let first = records
        .first()
        .ok_or_else(|| IoError::parse(path, "no FASTA records found"))?;
    ParentSequence::parse(&first.sequence)
        .map_err(|e| IoError::parse(path, format!("record '{}': {}", first.id(), e)))
}

/// Identifier assigned to the `index`-th accepted variant (1-based).
pub fn library_id(prefix: &str, index: usize) -> String {
    format!("{}_variant_{:04}", prefix, index)
}

/// Builds the library records for accepted variants, numbering them from 0001
/// in the order given.
pub fn library_records(prefix: &str, variants: &[Variant]) -> Vec<FastaRecord> {
    variants
        .iter()
        .enumerate()
        .map(|(i, variant)| {
            let d = variant.descriptors();
            let header = format!(
                "{}{sep}{}{sep}charge={:.3}{sep}hydrophobicity={:.3}",
                library_id(prefix, i + 1),
                variant.mutation_label(),
                d.net_charge,
                d.avg_hydrophobicity,
                sep = HEADER_SEPARATOR,
            );
            FastaRecord::new(header, variant.sequence())
        })
        .collect()
}

/// Reads a variant library back as `(id, variant)` pairs in file order.
///
/// Mutation history is not stored in the sequence, so the returned variants
/// carry descriptors but no mutations.
pub fn read_library(path: &Path) -> Result<Vec<(String, Variant)>, IoError> {
    read_records_from_path(path)?
        .into_iter()
        .map(|record| {
            let residues = record
                .sequence
                .chars()
                .map(|c| {
                    AminoAcid::from_one_letter(c).ok_or_else(|| {
                        IoError::parse(
                            path,
                            format!("record '{}': invalid residue '{}'", record.id(), c),
                        )
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok((record.id().to_string(), Variant::from_sequence(&residues)))
        })
        .collect()
}
