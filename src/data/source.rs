//! Data source contract
//!
//! A source hands back a non-empty list of records or an explicit error.
//! An empty result is `DataError::Empty`, never an empty `Vec`.

use std::cmp::Ordering;

use crate::error::DataError;
use crate::market::record::RawStockRecord;

pub const DEFAULT_LIMIT: usize = 20;
pub const DEFAULT_MIN_RULE_OF_40: f64 = 30.0;

/// Which slice of the universe to request
#[derive(Debug, Clone, PartialEq, Default)]
pub enum StockFilter {
    #[default]
    All,
    Gainers { limit: usize },                       // highest day change first
    MostTraded { limit: usize },                    // highest volume first
    BestValue { limit: usize, min_rule_of_40: f64 }, // highest Rule of 40 first
}

impl StockFilter {
    pub fn gainers() -> Self {
        StockFilter::Gainers { limit: DEFAULT_LIMIT }
    }

    pub fn most_traded() -> Self {
        StockFilter::MostTraded { limit: DEFAULT_LIMIT }
    }

    pub fn best_value() -> Self {
        StockFilter::BestValue {
            limit: DEFAULT_LIMIT,
            min_rule_of_40: DEFAULT_MIN_RULE_OF_40,
        }
    }

    /// Next filter in the viewer's rotation: all, gainers, most traded, best value
    pub fn next(&self) -> Self {
        match *self {
            StockFilter::All => StockFilter::gainers(),
            StockFilter::Gainers { limit } => StockFilter::MostTraded { limit },
            StockFilter::MostTraded { limit } => StockFilter::BestValue {
                limit,
                min_rule_of_40: DEFAULT_MIN_RULE_OF_40,
            },
            StockFilter::BestValue { .. } => StockFilter::All,
        }
    }

    /// Filter, sort and truncate a copy of the universe
    pub fn apply(&self, mut records: Vec<RawStockRecord>) -> Vec<RawStockRecord> {
        match *self {
            StockFilter::All => records,
            StockFilter::Gainers { limit } => {
                records.sort_by(|a, b| descending(a.change_pct, b.change_pct));
                records.truncate(limit);
                records
            }
            StockFilter::MostTraded { limit } => {
                records.sort_by(|a, b| descending(a.volume, b.volume));
                records.truncate(limit);
                records
            }
            StockFilter::BestValue { limit, min_rule_of_40 } => {
                records.retain(|r| r.rule_of_40 >= min_rule_of_40);
                records.sort_by(|a, b| descending(a.rule_of_40, b.rule_of_40));
                records.truncate(limit);
                records
            }
        }
    }
}

fn descending(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

/// Anything that can supply a batch of stock records
pub trait DataSource {
    /// Short name for logs
    fn name(&self) -> &str;

    fn fetch(&mut self, filter: &StockFilter) -> Result<Vec<RawStockRecord>, DataError>;
}

/// Turn an empty filtered result into an error
pub(crate) fn non_empty(records: Vec<RawStockRecord>) -> Result<Vec<RawStockRecord>, DataError> {
    if records.is_empty() {
        return Err(DataError::Empty);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::record::sample_record;

    fn universe() -> Vec<RawStockRecord> {
        (0..30)
            .map(|i| {
                let mut r = sample_record(&format!("S{i:02}"));
                r.change_pct = i as f64 * 0.3 - 4.0;
                r.volume = ((i * 7) % 30) as f64 * 1e6;
                r.rule_of_40 = i as f64 * 2.0;
                r
            })
            .collect()
    }

    #[test]
    fn gainers_sorted_and_limited() {
        let out = StockFilter::gainers().apply(universe());
        assert_eq!(out.len(), 20);
        assert_eq!(out[0].ticker, "S29");
        assert!(out.windows(2).all(|w| w[0].change_pct >= w[1].change_pct));
    }

    #[test]
    fn most_traded_sorted_by_volume() {
        let out = StockFilter::MostTraded { limit: 5 }.apply(universe());
        assert_eq!(out.len(), 5);
        assert!(out.windows(2).all(|w| w[0].volume >= w[1].volume));
    }

    #[test]
    fn best_value_respects_threshold() {
        let out = StockFilter::best_value().apply(universe());
        // rule_of_40 = 2i, so i in 15..30 qualifies
        assert_eq!(out.len(), 15);
        assert!(out.iter().all(|r| r.rule_of_40 >= 30.0));
        assert_eq!(out[0].ticker, "S29");
    }

    #[test]
    fn rotation_visits_every_filter_and_keeps_the_limit() {
        let start = StockFilter::All;
        let gainers = start.next();
        assert_eq!(gainers, StockFilter::gainers());

        let traded = StockFilter::Gainers { limit: 7 }.next();
        assert_eq!(traded, StockFilter::MostTraded { limit: 7 });
        assert_eq!(
            traded.next(),
            StockFilter::BestValue {
                limit: 7,
                min_rule_of_40: DEFAULT_MIN_RULE_OF_40
            }
        );
        assert_eq!(traded.next().next(), StockFilter::All);
    }

    #[test]
    fn all_keeps_everything() {
        assert_eq!(StockFilter::All.apply(universe()).len(), 30);
    }
}
