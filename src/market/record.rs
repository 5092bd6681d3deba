//! Raw stock records as served by the radar data endpoint
//!
//! `RawStockRecord` mirrors the JSON objects of the `/api/stocks` family
//! field-for-field, so a payload deserializes straight into it. Records are
//! never mutated once they enter the simulation.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// One stock's raw metrics
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RawStockRecord {
    pub ticker: String,        // unique id within a batch
    pub price: f64,            // last price
    pub change_pct: f64,       // day change, %
    pub week_change: f64,      // week change, %
    pub month_change: f64,     // month change, % (momentum)
    pub volume: f64,           // shares traded
    pub market_cap: f64,       // market capitalization
    pub operating_margin: f64, // %
    pub revenue_growth: f64,   // %
    pub rule_of_40: f64,       // operating_margin + revenue_growth
    pub pe_ratio: f64,
    pub beta: f64,
    pub volatility: f64,       // annualized, %
    pub debt_to_equity: f64,   // %
    pub sector: String,
}

impl RawStockRecord {
    /// Numeric fields paired with their JSON names
    fn metrics(&self) -> [(&'static str, f64); 13] {
        [
            ("price", self.price),
            ("change_pct", self.change_pct),
            ("week_change", self.week_change),
            ("month_change", self.month_change),
            ("volume", self.volume),
            ("market_cap", self.market_cap),
            ("operating_margin", self.operating_margin),
            ("revenue_growth", self.revenue_growth),
            ("rule_of_40", self.rule_of_40),
            ("pe_ratio", self.pe_ratio),
            ("beta", self.beta),
            ("volatility", self.volatility),
            ("debt_to_equity", self.debt_to_equity),
        ]
    }

    /// Reject records whose metrics would poison the visual mapping
    pub fn validate(&self) -> Result<(), DataError> {
        for (field, value) in self.metrics() {
            if !value.is_finite() {
                return Err(DataError::NonFinite {
                    ticker: self.ticker.clone(),
                    field,
                });
            }
        }
        for (field, value) in [("market_cap", self.market_cap), ("volume", self.volume)] {
            if value < 0.0 {
                return Err(DataError::Negative {
                    ticker: self.ticker.clone(),
                    field,
                    value,
                });
            }
        }
        Ok(())
    }
}

/// Check a whole batch: non-empty, every record valid, tickers unique
pub fn validate_batch(records: &[RawStockRecord]) -> Result<(), DataError> {
    if records.is_empty() {
        return Err(DataError::Empty);
    }

    let mut seen = HashSet::with_capacity(records.len());
    for r in records {
        r.validate()?;
        if !seen.insert(r.ticker.as_str()) {
            return Err(DataError::DuplicateTicker {
                ticker: r.ticker.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
pub(crate) fn sample_record(ticker: &str) -> RawStockRecord {
    RawStockRecord {
        ticker: ticker.to_string(),
        price: 100.0,
        change_pct: 0.5,
        week_change: 1.0,
        month_change: 2.0,
        volume: 10_000_000.0,
        market_cap: 50_000_000_000.0,
        operating_margin: 20.0,
        revenue_growth: 10.0,
        rule_of_40: 30.0,
        pe_ratio: 25.0,
        beta: 1.1,
        volatility: 30.0,
        debt_to_equity: 40.0,
        sector: "Technology".to_string(),
    }
}
