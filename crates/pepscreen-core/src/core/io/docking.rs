use super::error::IoError;
use crate::core::models::docking::{DockingResult, Metric};
use std::collections::HashSet;
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, warn};

pub const ID_COLUMN: &str = "variant_id";
pub const LOG_FILE_NAME: &str = "log.txt";
const VINA_RESULT_MARKER: &str = "REMARK VINA RESULT:";

/// Column header used for a metric in every CSV this crate writes.
pub fn column_name(metric: &Metric) -> &str {
    match metric {
        Metric::BindingScore => "docking_score",
        other => other.name(),
    }
}

/// Reads a docking metrics table keyed by `variant_id`.
///
/// Every other column is a metric (`docking_score`, `rmsd`, `hbonds`,
/// `contacts`, or any custom name). Empty cells mean the metric is absent for
/// that row.
///
/// # Errors
///
/// * [`IoError::Csv`] if the file cannot be read as CSV.
/// * [`IoError::Parse`] if the id column is missing, two columns name the same
///   metric (aliases included), an id repeats, or a non-empty cell is not a
///   number.
pub fn read_docking_csv(path: &Path) -> Result<Vec<(String, DockingResult)>, IoError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| IoError::csv(path, e))?;
    let headers = reader.headers().map_err(|e| IoError::csv(path, e))?.clone();

    let id_idx = headers
        .iter()
        .position(|h| h.trim() == ID_COLUMN)
        .ok_or_else(|| IoError::parse(path, format!("missing '{}' column", ID_COLUMN)))?;

    let mut columns: Vec<(usize, Metric)> = Vec::new();
    for (idx, header) in headers.iter().enumerate() {
        if idx == id_idx {
            continue;
        }
        let metric: Metric = header
            .parse()
            .map_err(|e| IoError::parse(path, format!("column {}: {}", idx + 1, e)))?;
        if columns.iter().any(|(_, m)| *m == metric) {
            return Err(IoError::parse(
                path,
                format!("column {} ('{}') repeats metric '{}'", idx + 1, header, metric),
            ));
        }
        columns.push((idx, metric));
    }

    let mut seen = HashSet::new();
    let mut rows = Vec::new();
    for (row_idx, record) in reader.records().enumerate() {
        let record = record.map_err(|e| IoError::csv(path, e))?;
        let id = record.get(id_idx).unwrap_or_default().trim().to_string();
        if id.is_empty() {
            return Err(IoError::parse(
                path,
                format!("row {}: empty {}", row_idx + 1, ID_COLUMN),
            ));
        }
        if !seen.insert(id.clone()) {
            return Err(IoError::parse(path, format!("duplicate variant id '{}'", id)));
        }

        let mut result = DockingResult::new();
        for (idx, metric) in &columns {
            let cell = record.get(*idx).unwrap_or_default().trim();
            if cell.is_empty() {
                continue;
            }
            let value: f64 = cell.parse().map_err(|_| {
                IoError::parse(
                    path,
                    format!("row {} ('{}'): '{}' is not a number for {}", row_idx + 1, id, cell, metric),
                )
            })?;
            result.insert(metric.clone(), value);
        }
        rows.push((id, result));
    }

    debug!(path = %path.display(), rows = rows.len(), "Loaded docking metrics.");
    Ok(rows)
}

/// Writes `variant_id,docking_score` pairs.
pub fn write_scores_csv(path: &Path, scores: &[(String, f64)]) -> Result<(), IoError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| IoError::csv(path, e))?;
    writer
        .write_record([ID_COLUMN, column_name(&Metric::BindingScore)])
        .map_err(|e| IoError::csv(path, e))?;
    for (id, score) in scores {
        writer
            .write_record([id.as_str(), score.to_string().as_str()])
            .map_err(|e| IoError::csv(path, e))?;
    }
    writer.flush().map_err(|e| IoError::io(path, e))
}

/// Extracts the best score from an AutoDock Vina log: the first numeric token on
/// the first `REMARK VINA RESULT:` line. Returns `None` when no such line has a
/// number.
pub fn parse_vina_log(reader: impl BufRead) -> std::io::Result<Option<f64>> {
    for line in reader.lines() {
        let line = line?;
        if let Some(idx) = line.find(VINA_RESULT_MARKER) {
            let rest = &line[idx + VINA_RESULT_MARKER.len()..];
            return Ok(rest.split_whitespace().find_map(|t| t.parse::<f64>().ok()));
        }
    }
    Ok(None)
}

pub fn read_vina_log(path: &Path) -> Result<Option<f64>, IoError> {
    let file = fs::File::open(path).map_err(|e| IoError::io(path, e))?;
    parse_vina_log(BufReader::new(file)).map_err(|e| IoError::io(path, e))
}

/// Walks `<root>/<variant_id>/log.txt` in directory-name order and collects
/// the best score of every parsable log.
///
/// Variants without a log, or whose log has no result line, are skipped with a
/// warning rather than given a placeholder score.
pub fn collect_vina_scores(root: &Path) -> Result<Vec<(String, f64)>, IoError> {
    let entries = fs::read_dir(root).map_err(|e| IoError::io(root, e))?;
    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| IoError::io(root, e))?;
        if entry.path().is_dir() {
            dirs.push(entry.path());
        }
    }
    dirs.sort();

    let mut scores = Vec::with_capacity(dirs.len());
    for dir in dirs {
        let Some(id) = dir.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            continue;
        };
        let log = dir.join(LOG_FILE_NAME);
        if !log.is_file() {
            warn!(variant = %id, "No docking log found; skipping.");
            continue;
        }
        match read_vina_log(&log)? {
            Some(score) => scores.push((id, score)),
            None => warn!(variant = %id, log = %log.display(), "Docking log has no result line; skipping."),
        }
    }
    Ok(scores)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::tempdir;

    const VINA_LOG: &str = "\
Detected 8 CPUs
REMARK VINA RESULT:    -9.4      0.000      0.000
REMARK VINA RESULT:    -8.1      1.920      2.776
";

    #[test]
    fn parses_first_vina_result_line() {
        assert_eq!(parse_vina_log(Cursor::new(VINA_LOG)).unwrap(), Some(-9.4));
        assert_eq!(parse_vina_log(Cursor::new("no results\n")).unwrap(), None);
        assert_eq!(
            parse_vina_log(Cursor::new("REMARK VINA RESULT: n/a\n")).unwrap(),
            None
        );
    }

    #[test]
    fn collect_walks_sorted_dirs_and_skips_missing_logs() {
        let root = tempdir().unwrap();
        for (id, log) in [
            ("X_variant_0002", Some("REMARK VINA RESULT: -7.5 0 0\n")),
            ("X_variant_0001", Some(VINA_LOG)),
            ("X_variant_0003", None),
            ("X_variant_0004", Some("crashed\n")),
        ] {
            let dir = root.path().join(id);
            fs::create_dir(&dir).unwrap();
            if let Some(content) = log {
                fs::write(dir.join(LOG_FILE_NAME), content).unwrap();
            }
        }
        fs::write(root.path().join("stray.txt"), "ignored").unwrap();

        let scores = collect_vina_scores(root.path()).unwrap();
        assert_eq!(
            scores,
            vec![
                ("X_variant_0001".to_string(), -9.4),
                ("X_variant_0002".to_string(), -7.5)
            ]
        );
    }

    #[test]
    fn collect_fails_for_missing_root() {
        let root = tempdir().unwrap();
        let err = collect_vina_scores(&root.path().join("nope")).unwrap_err();
        assert!(matches!(err, IoError::Io { .. }));
    }

    #[test]
    fn scores_csv_reads_back_as_binding_scores() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("docking.csv");
        write_scores_csv(&path, &[("a".to_string(), -9.4), ("b".to_string(), -7.0)]).unwrap();

        let rows = read_docking_csv(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].0, "a");
        assert_eq!(rows[0].1.binding_score(), Some(-9.4));
    }

    #[test]
    fn extra_metric_columns_and_empty_cells() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("docking.csv");
        fs::write(
            &path,
            "variant_id,docking_score,rmsd,buried_area\na,-9.2,1.1,\nb,-8.5,,410.5\n",
        )
        .unwrap();

        let rows = read_docking_csv(&path).unwrap();
        assert_eq!(rows[0].1.get(&Metric::Rmsd), Some(1.1));
        assert_eq!(rows[0].1.len(), 2);
        assert_eq!(rows[1].1.get(&Metric::Rmsd), None);
        assert_eq!(
            rows[1].1.get(&Metric::Custom("buried_area".to_string())),
            Some(410.5)
        );
    }

    #[test]
    fn malformed_tables_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("docking.csv");

        fs::write(&path, "id,docking_score\na,-9.0\n").unwrap();
        assert!(matches!(read_docking_csv(&path), Err(IoError::Parse { .. })));

        fs::write(&path, "variant_id,docking_score\na,strong\n").unwrap();
        assert!(matches!(read_docking_csv(&path), Err(IoError::Parse { .. })));

        fs::write(&path, "variant_id,docking_score\na,-9.0\na,-8.0\n").unwrap();
        assert!(matches!(read_docking_csv(&path), Err(IoError::Parse { .. })));
    }

    #[test]
    fn aliased_metric_columns_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("docking.csv");
        fs::write(&path, "variant_id,binding_score,docking_score\na,-9.0,-7.0\n").unwrap();

        let err = read_docking_csv(&path).unwrap_err();
        assert!(matches!(err, IoError::Parse { .. }));
        assert!(err.to_string().contains("binding_score"));
    }
}
