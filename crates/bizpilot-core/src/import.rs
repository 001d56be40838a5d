//! CSV import and export for financial datasets
//!
//! Expected header: `date,revenue,expenses` with ISO dates (YYYY-MM-DD).
//! Extra columns (e.g. `profit`, `month` from a previous export) are ignored
//! on import; derived columns are recomputed by the feature deriver.

use std::io::{Read, Write};

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{Dataset, RawRecord};

/// Parse a dataset from CSV
pub fn read_csv<R: Read>(reader: R) -> Result<Dataset> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    for required in ["date", "revenue", "expenses"] {
        if !headers.iter().any(|h| h == required) {
            return Err(Error::Schema(format!("missing column '{}'", required)));
        }
    }

    let mut rows = Vec::new();
    for (i, result) in rdr.deserialize::<RawRecord>().enumerate() {
        let row = result.map_err(|e| Error::Schema(format!("row {}: {}", i + 1, e)))?;
        rows.push(row);
    }

    debug!(rows = rows.len(), "Parsed dataset CSV");
    Dataset::from_raw(rows)
}

#[derive(Serialize)]
struct CsvRow {
    date: String,
    revenue: f64,
    expenses: f64,
    profit: Option<f64>,
    month: Option<u32>,
}

/// Write a dataset as CSV, including derived columns when present
pub fn write_csv<W: Write>(dataset: &Dataset, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for record in dataset {
        wtr.serialize(CsvRow {
            date: record.date.format("%Y-%m-%d").to_string(),
            revenue: record.revenue,
            expenses: record.expenses,
            profit: record.profit,
            month: record.month,
        })?;
    }
    wtr.flush()?;
    Ok(())
}
