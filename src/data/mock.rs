//! In-process mock of the stock data server
//!
//! Generates a synthetic universe of ~80 tickers, caches it for five minutes, and
//! prefers externally injected data while that is younger than ten minutes.
//! Time-dependent calls have an `_at` variant taking the current instant so
//! the cache rules can be exercised without sleeping.

use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::data::source::{non_empty, DataSource, StockFilter};
use crate::error::DataError;
use crate::market::record::{validate_batch, RawStockRecord};

pub const CACHE_TTL: Duration = Duration::from_secs(5 * 60);
pub const INJECTED_TTL: Duration = Duration::from_secs(10 * 60);

pub const STOCK_TICKERS: &[&str] = &[
    // tech giants
    "AAPL", "MSFT", "GOOGL", "AMZN", "META", "NVDA", "TSLA", "AVGO",
    // cloud & software
    "CRM", "ADBE", "NOW", "INTU", "TEAM", "PLTR", "SNOW", "DDOG",
    // semiconductors
    "AMD", "INTC", "QCOM", "MU", "AMAT", "LRCX", "KLAC", "TSM",
    // finance
    "JPM", "BAC", "GS", "MS", "V", "MA", "PYPL", "SQ",
    // consumer
    "WMT", "TGT", "COST", "NKE", "SBUX", "MCD", "DIS", "NFLX",
    // healthcare
    "JNJ", "UNH", "PFE", "ABBV", "TMO", "DHR", "LLY", "MRNA",
    // energy
    "XOM", "CVX", "COP", "SLB", "EOG",
    // automotive
    "F", "GM", "RIVN", "LCID",
    // e-commerce & retail
    "SHOP", "ETSY", "MELI", "SPOT",
    // aerospace & defense
    "BA", "LMT", "RTX", "NOC",
    // growth
    "ROKU", "COIN", "RBLX", "U", "DASH", "ABNB",
    // cloud infrastructure
    "NET", "FSLY", "DOCN",
    // cybersecurity
    "CRWD", "ZS", "PANW", "FTNT",
    // AI/ML
    "AI", "SMCI", "DELL",
];

pub const SECTORS: [&str; 8] = [
    "Technology",
    "Financial Services",
    "Consumer Cyclical",
    "Healthcare",
    "Energy",
    "Industrials",
    "Consumer Defensive",
    "Communication Services",
];

#[derive(Debug, Clone)]
struct Stamped {
    records: Vec<RawStockRecord>,
    at: Instant,
}

impl Stamped {
    fn fresh(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.at) < ttl
    }
}

pub struct MockStockServer {
    rng: ChaCha8Rng,
    cache: Option<Stamped>,    // generated data
    injected: Option<Stamped>, // pushed by an external feed
}

impl MockStockServer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            cache: None,
            injected: None,
        }
    }

    /// Current universe: fresh injected data, else fresh cache, else a new batch
    pub fn stocks_at(&mut self, now: Instant) -> Vec<RawStockRecord> {
        if let Some(injected) = self.injected.as_ref().filter(|s| s.fresh(now, INJECTED_TTL)) {
            debug!("serving injected stock data");
            return injected.records.clone();
        }

        if let Some(cache) = self.cache.as_ref().filter(|s| s.fresh(now, CACHE_TTL)) {
            debug!("serving cached stock data");
            return cache.records.clone();
        }

        info!("generating new stock data");
        let records = generate_mock_stocks(&mut self.rng);
        self.cache = Some(Stamped {
            records: records.clone(),
            at: now,
        });
        records
    }

    pub fn fetch_at(&mut self, filter: &StockFilter, now: Instant) -> Result<Vec<RawStockRecord>, DataError> {
        non_empty(filter.apply(self.stocks_at(now)))
    }

    /// Accept a pushed batch; it takes priority over generated data
    pub fn update_stocks_at(&mut self, records: Vec<RawStockRecord>, now: Instant) -> Result<usize, DataError> {
        validate_batch(&records)?;
        let count = records.len();
        info!(count, "received external stock update");
        self.injected = Some(Stamped { records, at: now });
        self.cache = None;
        Ok(count)
    }

    pub fn update_stocks(&mut self, records: Vec<RawStockRecord>) -> Result<usize, DataError> {
        self.update_stocks_at(records, Instant::now())
    }

    /// Drop the generated cache; injected data is untouched
    pub fn clear_cache(&mut self) {
        self.cache = None;
    }
}

impl DataSource for MockStockServer {
    fn name(&self) -> &str {
        "mock"
    }

    fn fetch(&mut self, filter: &StockFilter) -> Result<Vec<RawStockRecord>, DataError> {
        self.fetch_at(filter, Instant::now())
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Sum of the unrounded components, rounded once
fn rule_of_40(operating_margin: f64, revenue_growth: f64) -> f64 {
    round2(operating_margin + revenue_growth)
}

/// One synthetic record per ticker with plausible value ranges
pub fn generate_mock_stocks<R: Rng + ?Sized>(rng: &mut R) -> Vec<RawStockRecord> {
    STOCK_TICKERS
        .iter()
        .map(|ticker| {
            let price = 20.0 + rng.gen::<f64>() * 500.0;
            let change_pct = (rng.gen::<f64>() - 0.5) * 10.0;
            let week_change = (rng.gen::<f64>() - 0.5) * 15.0;
            let month_change = (rng.gen::<f64>() - 0.5) * 25.0;

            let volume = (rng.gen::<f64>() * 100_000_000.0).floor() + 1_000_000.0;
            let market_cap = (rng.gen::<f64>() * 3_000_000_000_000.0).floor() + 1_000_000_000.0;

            let operating_margin = (rng.gen::<f64>() - 0.2) * 60.0;
            let revenue_growth = (rng.gen::<f64>() - 0.3) * 100.0;

            let pe_ratio = 5.0 + rng.gen::<f64>() * 100.0;
            let beta = 0.5 + rng.gen::<f64>() * 2.0;
            let volatility = 10.0 + rng.gen::<f64>() * 80.0;
            let debt_to_equity = rng.gen::<f64>() * 200.0;

            let sector = SECTORS[rng.gen_range(0..SECTORS.len())];

            RawStockRecord {
                ticker: ticker.to_string(),
                price: round2(price),
                change_pct: round2(change_pct),
                week_change: round2(week_change),
                month_change: round2(month_change),
                volume,
                market_cap,
                operating_margin: round2(operating_margin),
                revenue_growth: round2(revenue_growth),
                rule_of_40: rule_of_40(operating_margin, revenue_growth),
                pe_ratio: round2(pe_ratio),
                beta: round2(beta),
                volatility: round2(volatility),
                debt_to_equity: round2(debt_to_equity),
                sector: sector.to_string(),
            }
        })
        .collect()
}
