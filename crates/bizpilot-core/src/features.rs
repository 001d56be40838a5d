//! Feature derivation
//!
//! Adds the `profit` and `month` columns the scenario model trains on.
//! Recomputing always overwrites, so applying `derive` twice is a no-op.

use chrono::Datelike;

use crate::error::{Error, Result};
use crate::models::{Dataset, FinancialRecord, ScenarioInput};

/// Number of model features: revenue, expenses, month
pub const FEATURE_COUNT: usize = 3;

/// Return a copy of `dataset` with profit and month filled in
pub fn derive(dataset: &Dataset) -> Result<Dataset> {
    dataset
        .iter()
        .enumerate()
        .map(|(i, record)| derive_record(record, i + 1))
        .collect::<Result<Vec<_>>>()
        .map(Dataset::new)
}

fn derive_record(record: &FinancialRecord, row: usize) -> Result<FinancialRecord> {
    check_amount(record.revenue, "revenue", row)?;
    check_amount(record.expenses, "expenses", row)?;

    Ok(FinancialRecord {
        profit: Some(record.revenue - record.expenses),
        month: Some(record.date.month()),
        ..record.clone()
    })
}

fn check_amount(value: f64, field: &str, row: usize) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::Schema(format!(
            "row {}: '{}' is not a number",
            row, field
        )));
    }
    if value < 0.0 {
        return Err(Error::Schema(format!(
            "row {}: '{}' must be non-negative, got {}",
            row, field, value
        )));
    }
    Ok(())
}

/// Build the feature matrix and profit target from a derived dataset
pub fn feature_matrix(dataset: &Dataset) -> Result<(Vec<Vec<f64>>, Vec<f64>)> {
    let mut x = Vec::with_capacity(dataset.len());
    let mut y = Vec::with_capacity(dataset.len());

    for (i, record) in dataset.iter().enumerate() {
        let (Some(profit), Some(month)) = (record.profit, record.month) else {
            return Err(Error::Schema(format!(
                "row {}: derived columns missing, run feature derivation first",
                i + 1
            )));
        };
        x.push(ScenarioInput::new(record.revenue, record.expenses, i64::from(month)).features());
        y.push(profit);
    }

    Ok((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::generate;
    use chrono::NaiveDate;

    fn record(m: u32, revenue: f64, expenses: f64) -> FinancialRecord {
        FinancialRecord::new(NaiveDate::from_ymd_opt(2022, m, 15).unwrap(), revenue, expenses)
    }

    #[test]
    fn test_derive_adds_profit_and_month() {
        let dataset = Dataset::new(vec![record(3, 20000.0, 8000.0), record(4, 5000.0, 9000.0)]);
        let derived = derive(&dataset).unwrap();

        assert_eq!(derived.records()[0].profit, Some(12000.0));
        assert_eq!(derived.records()[0].month, Some(3));
        // Losses are allowed
        assert_eq!(derived.records()[1].profit, Some(-4000.0));
        assert!(derived.is_derived());
        // Input is untouched
        assert!(!dataset.is_derived());
    }

    #[test]
    fn test_derive_idempotent() {
        let once = derive(&generate()).unwrap();
        let twice = derive(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_derive_overwrites_stale_columns() {
        let mut stale = record(5, 100.0, 40.0);
        stale.profit = Some(1.0);
        stale.month = Some(12);
        let derived = derive(&Dataset::new(vec![stale])).unwrap();
        assert_eq!(derived.records()[0].profit, Some(60.0));
        assert_eq!(derived.records()[0].month, Some(5));
    }

    #[test]
    fn test_derive_rejects_nan() {
        let dataset = Dataset::new(vec![record(1, f64::NAN, 10.0)]);
        let err = derive(&dataset).unwrap_err();
        assert!(matches!(err, Error::Schema(_)));
        assert!(err.to_string().contains("revenue"));
    }

    #[test]
    fn test_derive_rejects_negative_expenses() {
        let dataset = Dataset::new(vec![record(1, 10.0, 1.0), record(2, 10.0, -1.0)]);
        let err = derive(&dataset).unwrap_err();
        assert!(err.to_string().contains("row 2"));
    }

    #[test]
    fn test_derive_empty() {
        assert!(derive(&Dataset::default()).unwrap().is_empty());
    }

    #[test]
    fn test_feature_matrix() {
        let derived = derive(&Dataset::new(vec![record(7, 300.0, 100.0)])).unwrap();
        let (x, y) = feature_matrix(&derived).unwrap();
        assert_eq!(x, vec![vec![300.0, 100.0, 7.0]]);
        assert_eq!(y, vec![200.0]);
    }

    #[test]
    fn test_feature_matrix_requires_derived() {
        let dataset = Dataset::new(vec![record(7, 300.0, 100.0)]);
        assert!(matches!(feature_matrix(&dataset), Err(Error::Schema(_))));
    }
}
