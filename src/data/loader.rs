use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::model::{Dataset, StudentRecord, Term};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Data-layer failures. Load failures are fatal to the process; export
/// failures are surfaced as a status message.
#[derive(Debug, Error)]
pub enum DataError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },
}

// ---------------------------------------------------------------------------
// CSV schema
// ---------------------------------------------------------------------------

/// Required input columns, in schema order. The export writes the same
/// headers so a filtered view round-trips through `load_csv`.
pub const REQUIRED_COLUMNS: [&str; 11] = [
    "Year",
    "Term",
    "Applications",
    "Admitted",
    "Enrolled",
    "Retention Rate (%)",
    "Student Satisfaction (%)",
    "Engineering Enrolled",
    "Business Enrolled",
    "Arts Enrolled",
    "Science Enrolled",
];

/// One row in the exact CSV schema; the serde renames carry the header names.
#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "Term")]
    term: Term,
    #[serde(rename = "Applications")]
    applications: u64,
    #[serde(rename = "Admitted")]
    admitted: u64,
    #[serde(rename = "Enrolled")]
    enrolled: u64,
    #[serde(rename = "Retention Rate (%)")]
    retention_rate: f64,
    #[serde(rename = "Student Satisfaction (%)")]
    satisfaction: f64,
    #[serde(rename = "Engineering Enrolled")]
    engineering_enrolled: u64,
    #[serde(rename = "Business Enrolled")]
    business_enrolled: u64,
    #[serde(rename = "Arts Enrolled")]
    arts_enrolled: u64,
    #[serde(rename = "Science Enrolled")]
    science_enrolled: u64,
}

impl From<CsvRow> for StudentRecord {
    fn from(row: CsvRow) -> Self {
        StudentRecord {
            year: row.year,
            term: row.term,
            applications: row.applications,
            admitted: row.admitted,
            enrolled: row.enrolled,
            retention_rate: row.retention_rate,
            satisfaction: row.satisfaction,
            department_enrolled: [
                row.engineering_enrolled,
                row.business_enrolled,
                row.arts_enrolled,
                row.science_enrolled,
            ],
        }
    }
}

impl From<&StudentRecord> for CsvRow {
    fn from(record: &StudentRecord) -> Self {
        CsvRow {
            year: record.year,
            term: record.term,
            applications: record.applications,
            admitted: record.admitted,
            enrolled: record.enrolled,
            retention_rate: record.retention_rate,
            satisfaction: record.satisfaction,
            engineering_enrolled: record.department_enrolled[0],
            business_enrolled: record.department_enrolled[1],
            arts_enrolled: record.department_enrolled[2],
            science_enrolled: record.department_enrolled[3],
        }
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load the dataset from a CSV file. Performed once at process start; the
/// returned handle is read-only for the process lifetime.
///
/// Header presence is checked up front so a truncated schema reports the
/// missing column by name instead of a per-row deserialization error. Rows
/// violating the data-model bounds (funnel ordering, percentage ranges,
/// department sums) fail the load with their row number.
pub fn load_csv(path: &Path) -> Result<Dataset, DataError> {
    let mut reader = csv::Reader::from_path(path)?;

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(DataError::MissingColumn(column));
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<CsvRow>().enumerate() {
        let record = StudentRecord::from(result?);
        record
            .validate()
            .map_err(|reason| DataError::InvalidRow { row: row_no, reason })?;
        records.push(record);
    }

    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// Write the rows of a filtered view to `path` in the input schema, UTF-8
/// encoded. Re-loading the export and re-applying the same filters yields
/// the same row set.
pub fn export_csv(dataset: &Dataset, rows: &[usize], path: &Path) -> Result<(), DataError> {
    let mut writer = csv::Writer::from_path(path)?;
    for &i in rows {
        writer.serialize(CsvRow::from(&dataset.records[i]))?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{filtered_indices, FilterSpec, YearFilter};
    use std::path::PathBuf;

    const SAMPLE: &str = "\
Year,Term,Applications,Admitted,Enrolled,Retention Rate (%),Student Satisfaction (%),Engineering Enrolled,Business Enrolled,Arts Enrolled,Science Enrolled
2020,Spring,100,50,40,90,85,20,10,5,5
2021,Fall,200,100,90,92,88,40,20,15,15
";

    fn temp_path(name: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("campus-insights-{}-{name}", std::process::id()));
        path
    }

    #[test]
    fn loads_a_well_formed_csv() {
        let path = temp_path("load.csv");
        std::fs::write(&path, SAMPLE).unwrap();

        let ds = load_csv(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.years, vec![2020, 2021]);
        assert_eq!(ds.records[0].term, Term::Spring);
        assert_eq!(ds.records[0].applications, 100);
        assert_eq!(ds.records[1].department_enrolled, [40, 20, 15, 15]);
        assert_eq!(ds.records[1].retention_rate, 92.0);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let path = temp_path("missing-column.csv");
        let truncated = "\
Year,Term,Applications,Admitted,Enrolled,Retention Rate (%),Student Satisfaction (%),Engineering Enrolled,Business Enrolled,Arts Enrolled
2020,Spring,100,50,40,90,85,20,10,5
";
        std::fs::write(&path, truncated).unwrap();

        match load_csv(&path) {
            Err(DataError::MissingColumn(col)) => assert_eq!(col, "Science Enrolled"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn invalid_row_carries_its_row_number() {
        let path = temp_path("invalid-row.csv");
        // Second data row: Enrolled exceeds Admitted.
        let bad = SAMPLE.replace("200,100,90", "200,100,150");
        std::fs::write(&path, bad).unwrap();

        match load_csv(&path) {
            Err(DataError::InvalidRow { row, .. }) => assert_eq!(row, 1),
            other => panic!("expected InvalidRow, got {other:?}"),
        }

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn export_round_trips_to_the_same_row_set() {
        let src = temp_path("roundtrip-src.csv");
        let out = temp_path("roundtrip-out.csv");
        std::fs::write(&src, SAMPLE).unwrap();

        let ds = load_csv(&src).unwrap();
        let spec = FilterSpec {
            years: YearFilter::Range { from: 2020, to: 2021 },
            ..FilterSpec::allow_all(&ds)
        };
        let rows = filtered_indices(&ds, &spec);
        export_csv(&ds, &rows, &out).unwrap();

        let reloaded = load_csv(&out).unwrap();
        let rows_again = filtered_indices(&reloaded, &spec);
        let original: Vec<_> = rows.iter().map(|&i| ds.records[i].clone()).collect();
        let round_tripped: Vec<_> = rows_again.iter().map(|&i| reloaded.records[i].clone()).collect();
        assert_eq!(original, round_tripped);

        std::fs::remove_file(&src).ok();
        std::fs::remove_file(&out).ok();
    }
}
