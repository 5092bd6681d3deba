//! Metric → visual/physical property mapping
//!
//! Pure functions turning one stock's raw metrics into the continuous
//! parameters a bubble is drawn and simulated with:
//! - hue/saturation from day change and Rule of 40,
//! - glow intensity and glow color from Rule of 40,
//! - size from log market cap, pulse speed from volume (batch-relative),
//! - opacity from debt-to-equity, elasticity from volatility,
//! - initial velocity from revenue growth and monthly momentum
//!
//! Batch-relative mappings take a [`MetricRange`] computed once per batch.
//! Every function returns a finite value for finite input; degenerate ranges
//! fall back to a fixed value instead of dividing by zero.

use crate::mapping::visual::{GlowColor, Hsl};
use crate::simulation::states::NVec3;

pub const MIN_BUBBLE_SIZE: f64 = 0.5; // smallest bubble radius
pub const MAX_BUBBLE_SIZE: f64 = 3.0; // largest bubble radius
pub const MIN_PULSE_SPEED: f64 = 0.5;
pub const MAX_PULSE_SPEED: f64 = 3.0;
pub const DEFAULT_PULSE_SPEED: f64 = 1.0; // degenerate volume range / no volume
pub const COLOR_LIGHTNESS: f64 = 60.0; // fixed so bubbles read on a dark background

/// Min/max of one metric across a batch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricRange {
    pub min: f64,
    pub max: f64,
}

impl MetricRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Range over an iterator of values, `None` when empty
    pub fn from_values<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        values.into_iter().fold(None, |acc, v| match acc {
            None => Some(Self::new(v, v)),
            Some(r) => Some(Self::new(r.min.min(v), r.max.max(v))),
        })
    }

    /// All values equal: nothing to normalize against
    pub fn is_degenerate(&self) -> bool {
        self.max == self.min
    }
}

/// Linearly map `value` from `[min_val, max_val]` to `[target_min, target_max]`.
/// A zero-width source range maps everything to `target_min`.
pub fn normalize(value: f64, min_val: f64, max_val: f64, target_min: f64, target_max: f64) -> f64 {
    if max_val == min_val {
        return target_min;
    }
    let t = (value - min_val) / (max_val - min_val);
    target_min + t * (target_max - target_min)
}

/// Base color: hue bucketed by day change, saturation from |Rule of 40|
pub fn stock_color(change_pct: f64, rule_of_40: f64) -> Hsl {
    let hue = if change_pct >= 3.0 {
        0.0 // red, strong gain
    } else if change_pct >= 1.0 {
        30.0 // orange
    } else if change_pct >= 0.0 {
        50.0 // yellow
    } else if change_pct >= -1.0 {
        180.0 // cyan
    } else if change_pct >= -3.0 {
        200.0 // light blue
    } else {
        220.0 // deep blue, strong loss
    };

    let saturation = (50.0 + rule_of_40.abs() / 2.0).clamp(40.0, 100.0);

    Hsl::new(hue, saturation, COLOR_LIGHTNESS)
}

/// Glow brightness in [0.1, 1.0], piecewise linear in Rule of 40
pub fn glow_intensity(rule_of_40: f64) -> f64 {
    if rule_of_40 >= 80.0 {
        1.0
    } else if rule_of_40 >= 40.0 {
        0.5 + (rule_of_40 - 40.0) / 80.0
    } else if rule_of_40 >= 0.0 {
        0.2 + (rule_of_40 / 40.0) * 0.3
    } else {
        0.1
    }
}

/// Gold for Rule of 40 ≥ 60, white for [40, 60), otherwise the base color
pub fn glow_color(rule_of_40: f64, base: Hsl) -> GlowColor {
    if rule_of_40 >= 60.0 {
        GlowColor::Gold
    } else if rule_of_40 >= 40.0 {
        GlowColor::White
    } else {
        GlowColor::Base(base)
    }
}

/// Bubble radius from market cap on a log10 scale across the batch
pub fn bubble_size(market_cap: f64, caps: MetricRange) -> f64 {
    if market_cap <= 0.0 {
        return MIN_BUBBLE_SIZE;
    }

    let log_cap = (market_cap + 1.0).log10();
    let min_log = (caps.min + 1.0).log10();
    let max_log = (caps.max + 1.0).log10();

    normalize(log_cap, min_log, max_log, MIN_BUBBLE_SIZE, MAX_BUBBLE_SIZE)
}

/// Pulse animation speed from volume, linear across the batch
pub fn pulse_speed(volume: f64, volumes: MetricRange) -> f64 {
    if volume <= 0.0 || volumes.is_degenerate() {
        return DEFAULT_PULSE_SPEED;
    }
    normalize(volume, volumes.min, volumes.max, MIN_PULSE_SPEED, MAX_PULSE_SPEED)
}

/// More debt → more transparent; floor at 0.4
pub fn opacity(debt_to_equity: f64) -> f64 {
    if debt_to_equity <= 50.0 {
        1.0
    } else if debt_to_equity <= 150.0 {
        0.9 - ((debt_to_equity - 50.0) / 100.0) * 0.3
    } else {
        (0.6 - ((debt_to_equity - 150.0) / 200.0) * 0.2).max(0.4)
    }
}

/// Bounce coefficient from volatility, capped at 1.0
pub fn elasticity(volatility: f64) -> f64 {
    if volatility <= 0.0 {
        return 0.5;
    }
    (0.3 + volatility / 100.0).min(1.0)
}

/// Initial velocity in the XY plane.
/// Speed is |growth| / 20 heading 45° (growing) or -135° (shrinking);
/// monthly momentum nudges vy by momentum / 100.
pub fn velocity_vector(revenue_growth: f64, momentum: f64) -> NVec3 {
    let speed = revenue_growth.abs() / 20.0;
    let angle: f64 = if revenue_growth >= 0.0 { 45.0 } else { -135.0 };
    let angle_rad = angle.to_radians();

    let vx = speed * angle_rad.cos();
    let vy = speed * angle_rad.sin() + momentum / 100.0;

    NVec3::new(vx, vy, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn hue_bands_follow_day_change() {
        assert_eq!(stock_color(3.0, 0.0).hue, 0.0);
        assert_eq!(stock_color(2.9, 0.0).hue, 30.0);
        assert_eq!(stock_color(1.0, 0.0).hue, 30.0);
        assert_eq!(stock_color(0.0, 0.0).hue, 50.0);
        assert_eq!(stock_color(-0.5, 0.0).hue, 180.0);
        assert_eq!(stock_color(-1.0, 0.0).hue, 180.0);
        assert_eq!(stock_color(-2.0, 0.0).hue, 200.0);
        assert_eq!(stock_color(-3.01, 0.0).hue, 220.0);
    }

    #[test]
    fn saturation_is_clamped() {
        assert_eq!(stock_color(0.0, 0.0).saturation, 50.0);
        assert_eq!(stock_color(0.0, -40.0).saturation, 70.0);
        assert_eq!(stock_color(0.0, 500.0).saturation, 100.0);
        assert_eq!(stock_color(0.0, 0.0).lightness, COLOR_LIGHTNESS);
    }

    #[test]
    fn glow_intensity_anchor_points() {
        assert_eq!(glow_intensity(80.0), 1.0);
        assert_eq!(glow_intensity(40.0), 0.5);
        assert_eq!(glow_intensity(0.0), 0.2);
        assert_eq!(glow_intensity(-5.0), 0.1);
        assert!((glow_intensity(60.0) - 0.75).abs() < EPS);
    }

    #[test]
    fn glow_intensity_is_monotonic() {
        let mut prev = glow_intensity(-50.0);
        let mut r = -50.0;
        while r <= 150.0 {
            let g = glow_intensity(r);
            assert!(g + EPS >= prev, "glow dropped at rule_of_40 = {r}");
            prev = g;
            r += 0.25;
        }
    }

    #[test]
    fn glow_color_thresholds() {
        let base = stock_color(1.5, 10.0);
        assert_eq!(glow_color(39.99, base), GlowColor::Base(base));
        assert_eq!(glow_color(40.0, base), GlowColor::White);
        assert_eq!(glow_color(59.99, base), GlowColor::White);
        assert_eq!(glow_color(60.0, base), GlowColor::Gold);
    }

    #[test]
    fn bubble_size_spans_log_range() {
        let caps = MetricRange::new(1e9, 1e12);
        assert!((bubble_size(1e9, caps) - MIN_BUBBLE_SIZE).abs() < EPS);
        assert!((bubble_size(1e12, caps) - MAX_BUBBLE_SIZE).abs() < EPS);
        let mid = bubble_size(3e10, caps);
        assert!(mid > MIN_BUBBLE_SIZE && mid < MAX_BUBBLE_SIZE);
    }

    #[test]
    fn bubble_size_degenerate_range_is_fixed() {
        let caps = MetricRange::new(5e10, 5e10);
        let s = bubble_size(5e10, caps);
        assert!(s.is_finite());
        assert_eq!(s, MIN_BUBBLE_SIZE);
        assert_eq!(bubble_size(0.0, caps), MIN_BUBBLE_SIZE);
    }

    #[test]
    fn pulse_speed_fallbacks() {
        let vols = MetricRange::new(1e6, 1e8);
        assert_eq!(pulse_speed(0.0, vols), DEFAULT_PULSE_SPEED);
        assert_eq!(pulse_speed(5e7, MetricRange::new(5e7, 5e7)), DEFAULT_PULSE_SPEED);
        assert!((pulse_speed(1e6, vols) - MIN_PULSE_SPEED).abs() < EPS);
        assert!((pulse_speed(1e8, vols) - MAX_PULSE_SPEED).abs() < EPS);
    }

    #[test]
    fn opacity_anchor_points() {
        assert_eq!(opacity(0.0), 1.0);
        assert_eq!(opacity(-10.0), 1.0);
        assert_eq!(opacity(50.0), 1.0);
        assert!((opacity(150.0) - 0.6).abs() < EPS);
        assert!((opacity(100.0) - 0.75).abs() < EPS);
        assert_eq!(opacity(350.0), 0.4);
        assert_eq!(opacity(10_000.0), 0.4);
    }

    #[test]
    fn elasticity_from_volatility() {
        assert_eq!(elasticity(0.0), 0.5);
        assert_eq!(elasticity(-3.0), 0.5);
        assert!((elasticity(20.0) - 0.5).abs() < EPS);
        assert_eq!(elasticity(90.0), 1.0);
    }

    #[test]
    fn velocity_heads_up_right_for_growth() {
        let v = velocity_vector(20.0, 0.0);
        let h = std::f64::consts::FRAC_1_SQRT_2;
        assert!((v.x - h).abs() < 1e-9);
        assert!((v.y - h).abs() < 1e-9);
        assert_eq!(v.z, 0.0);

        let v = velocity_vector(-20.0, 10.0);
        assert!((v.x + h).abs() < 1e-9);
        assert!((v.y - (-h + 0.1)).abs() < 1e-9);
        assert_eq!(v.z, 0.0);
    }

    #[test]
    fn metric_range_from_values() {
        assert_eq!(MetricRange::from_values(Vec::<f64>::new()), None);
        let r = MetricRange::from_values(vec![3.0, -1.0, 7.5]).unwrap();
        assert_eq!(r, MetricRange::new(-1.0, 7.5));
        assert!(!r.is_degenerate());
    }
}
