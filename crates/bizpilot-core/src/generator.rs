//! Synthetic financial data
//!
//! Bootstraps the scenario model with a reproducible monthly series: one
//! record per calendar month-end in `[start, end]`, revenue and expenses drawn
//! uniformly from fixed ranges with a seeded RNG. All revenues are drawn
//! before any expenses so each column is stable if the other range changes.

use chrono::{Datelike, Months, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::{Dataset, FinancialRecord};

pub const DEFAULT_SEED: u64 = 42;

/// Parameters for the synthetic series
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub seed: u64,
    /// Half-open `[low, high)` revenue range
    pub revenue_range: (f64, f64),
    /// Half-open `[low, high)` expense range
    pub expense_range: (f64, f64),
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2022, 1, 1).expect("valid date"),
            end: NaiveDate::from_ymd_opt(2023, 1, 1).expect("valid date"),
            seed: DEFAULT_SEED,
            revenue_range: (10_000.0, 50_000.0),
            expense_range: (5_000.0, 25_000.0),
        }
    }
}

/// Generate the default dataset (2022 month-ends, seed 42)
pub fn generate() -> Dataset {
    generate_with(&GeneratorConfig::default())
}

/// Generate a dataset from explicit parameters
pub fn generate_with(config: &GeneratorConfig) -> Dataset {
    let dates = month_ends(config.start, config.end);
    let mut rng = StdRng::seed_from_u64(config.seed);

    let revenues: Vec<f64> = dates
        .iter()
        .map(|_| draw(&mut rng, config.revenue_range))
        .collect();
    let expenses: Vec<f64> = dates
        .iter()
        .map(|_| draw(&mut rng, config.expense_range))
        .collect();

    dates
        .into_iter()
        .zip(revenues)
        .zip(expenses)
        .map(|((date, revenue), expenses)| FinancialRecord::new(date, revenue, expenses))
        .collect::<Vec<_>>()
        .into()
}

fn draw(rng: &mut StdRng, (low, high): (f64, f64)) -> f64 {
    // Degenerate ranges yield the lower bound
    if high <= low {
        return low;
    }
    rng.random_range(low..high)
}

/// Last day of every month whose month-end falls within `[start, end]`
pub fn month_ends(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let Some(mut first) = NaiveDate::from_ymd_opt(start.year(), start.month(), 1) else {
        return dates;
    };

    loop {
        let Some(next_first) = first.checked_add_months(Months::new(1)) else {
            break;
        };
        let Some(month_end) = next_first.pred_opt() else {
            break;
        };
        if month_end > end {
            break;
        }
        if month_end >= start {
            dates.push(month_end);
        }
        first = next_first;
    }

    dates
}
