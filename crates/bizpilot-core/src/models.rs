//! Domain models for Bizpilot

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::features::FEATURE_COUNT;

/// One period of business financials
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialRecord {
    pub date: NaiveDate,
    pub revenue: f64,
    pub expenses: f64,
    /// revenue - expenses, set by the feature deriver
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profit: Option<f64>,
    /// Calendar month 1-12, set by the feature deriver
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
}

impl FinancialRecord {
    pub fn new(date: NaiveDate, revenue: f64, expenses: f64) -> Self {
        Self {
            date,
            revenue,
            expenses,
            profit: None,
            month: None,
        }
    }

    /// Whether both derived columns are present
    pub fn is_derived(&self) -> bool {
        self.profit.is_some() && self.month.is_some()
    }
}

/// A record as it arrives from CSV or JSON, before schema validation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub revenue: Option<f64>,
    #[serde(default)]
    pub expenses: Option<f64>,
}

impl RawRecord {
    /// Validate required fields, `row` is used for error messages only
    pub fn into_record(self, row: usize) -> Result<FinancialRecord> {
        let date = self
            .date
            .ok_or_else(|| Error::Schema(format!("row {}: missing field 'date'", row)))?;
        let revenue = self
            .revenue
            .ok_or_else(|| Error::Schema(format!("row {}: missing field 'revenue'", row)))?;
        let expenses = self
            .expenses
            .ok_or_else(|| Error::Schema(format!("row {}: missing field 'expenses'", row)))?;

        Ok(FinancialRecord::new(date, revenue, expenses))
    }
}

/// Ordered sequence of financial records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    records: Vec<FinancialRecord>,
}

impl Dataset {
    pub fn new(records: Vec<FinancialRecord>) -> Self {
        Self { records }
    }

    /// Build a dataset from unvalidated rows
    ///
    /// Fails on the first row that is missing a required field.
    pub fn from_raw(rows: Vec<RawRecord>) -> Result<Self> {
        let records = rows
            .into_iter()
            .enumerate()
            .map(|(i, row)| row.into_record(i + 1))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { records })
    }

    pub fn records(&self) -> &[FinancialRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FinancialRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether every record carries the derived columns
    pub fn is_derived(&self) -> bool {
        self.records.iter().all(FinancialRecord::is_derived)
    }

    pub fn into_records(self) -> Vec<FinancialRecord> {
        self.records
    }
}

impl From<Vec<FinancialRecord>> for Dataset {
    fn from(records: Vec<FinancialRecord>) -> Self {
        Self::new(records)
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a FinancialRecord;
    type IntoIter = std::slice::Iter<'a, FinancialRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Inputs for a single profit prediction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioInput {
    pub revenue: f64,
    pub expenses: f64,
    /// Calendar month; values outside 1-12 are passed to the model unchanged
    pub month: i64,
}

impl ScenarioInput {
    pub fn new(revenue: f64, expenses: f64, month: i64) -> Self {
        Self {
            revenue,
            expenses,
            month,
        }
    }

    /// Feature vector in model column order: revenue, expenses, month
    pub fn features(&self) -> Vec<f64> {
        let row: [f64; FEATURE_COUNT] = [self.revenue, self.expenses, self.month as f64];
        row.to_vec()
    }
}
