//! Windowless run: step the scenario for a fixed number of frames and log where
//! every stock ended up. Frame time is a nominal 60 fps so the refresh timer
//! behaves as it would in the viewer.

use std::time::Duration;

use tracing::info;

use crate::market::format::{format_currency, format_number, format_percentage};
use crate::market::record::RawStockRecord;
use crate::simulation::scenario::RadarScenario;

const FRAME: Duration = Duration::from_micros(16_667);

/// Totals gathered over a headless run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeadlessSummary {
    pub frames: u64,    // frames requested
    pub stepped: u64,   // frames where physics ran
    pub refreshes: u64, // scheduled refreshes that replaced the body set
}

pub fn run_headless(scenario: &mut RadarScenario, frames: u64) -> HeadlessSummary {
    info!(frames, bodies = scenario.state.bodies().len(), "headless run starting");

    let mut summary = HeadlessSummary {
        frames,
        ..Default::default()
    };
    let mut elapsed = Duration::ZERO;

    for _ in 0..frames {
        elapsed += FRAME;
        let report = scenario.tick(FRAME, elapsed.as_secs_f64());
        summary.stepped += u64::from(report.stepped);
        summary.refreshes += u64::from(report.refreshed);
    }

    log_table(scenario);
    info!(
        stepped = summary.stepped,
        refreshes = summary.refreshes,
        mode = ?scenario.state.params.mode(),
        "headless run finished"
    );
    summary
}

fn log_table(scenario: &RadarScenario) {
    let state = &scenario.state;
    info!(
        "{:<6} {:>24} {:>8} {:>10} {:>9} {:>8}",
        "ticker", "position", "speed", "cap", "volume", "change"
    );
    for b in state.bodies() {
        let row = state.record(&b.ticker).map(summary_columns).unwrap_or_default();
        info!(
            "{:<6} ({:>6.2}, {:>6.2}, {:>6.2}) {:>8.3} {:>10} {:>9} {:>8}",
            b.ticker,
            b.x.x,
            b.x.y,
            b.x.z,
            b.v.norm(),
            row.0,
            row.1,
            row.2
        );
    }
}

/// Market cap, volume and day change as printed in the table
fn summary_columns(r: &RawStockRecord) -> (String, String, String) {
    (
        format_currency(r.market_cap),
        format_number(r.volume),
        format_percentage(r.change_pct),
    )
}
