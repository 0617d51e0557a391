//! Display formatting shared with the presentation layer. Numbers render
//! the way an en-US browser locale prints them.

use serde::Serialize;

use crate::domain::market_data::{IndicatorSnapshot, MarketSummary};

/// Volume ratio above which the volume reading is highlighted.
pub const HIGH_VOLUME_RATIO: f64 = 1.5;

/// Insert `,` thousands separators into a run of ASCII digits.
fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Grouped, non-negative fixed-point rendering of `value`.
fn grouped_fixed(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value);
    match fixed.split_once('.') {
        Some((int_part, frac)) => format!("{}.{}", group_digits(int_part), frac),
        None => group_digits(&fixed),
    }
}

/// USD currency string: 2 decimals, 6 below one dollar.
pub fn format_price(value: f64) -> String {
    if !value.is_finite() {
        return format!("${}", value);
    }
    let decimals = if value < 1.0 { 6 } else { 2 };
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}${}", sign, grouped_fixed(value.abs(), decimals))
}

/// Grouped number with at most three fraction digits, trailing zeros
/// trimmed (`1234.5` -> `1,234.5`).
pub fn format_grouped(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let mut body = grouped_fixed(value.abs(), 3);
    if body.contains('.') {
        let trimmed = body.trim_end_matches('0').trim_end_matches('.').len();
        body.truncate(trimmed);
    }
    if value < 0.0 && body != "0" { format!("-{}", body) } else { body }
}

/// Abbreviated dollar amount using T/B/M suffixes.
pub fn format_market_cap(value: f64) -> String {
    const SCALES: [(f64, &str); 3] = [(1e12, "T"), (1e9, "B"), (1e6, "M")];

    for (scale, suffix) in SCALES {
        if value >= scale {
            return format!("${:.2}{}", value / scale, suffix);
        }
    }
    format!("${}", format_grouped(value))
}

/// Direction of a 24h move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PercentChange {
    pub text: String,
    pub direction: ChangeDirection,
}

/// Absolute percentage with 2 decimals plus its direction.
pub fn format_percent_change(value: f64) -> PercentChange {
    PercentChange {
        text: format!("{:.2}%", value.abs()),
        direction: if value >= 0.0 { ChangeDirection::Up } else { ChangeDirection::Down },
    }
}

/// Supply figure, or `fallback` when the feed has none.
pub fn format_supply(value: Option<f64>, fallback: &str) -> String {
    value.map(format_grouped).unwrap_or_else(|| fallback.to_string())
}

/// Price axis tick (`$25,000`).
pub fn format_axis_price(value: f64) -> String {
    format!("${}", format_grouped(value))
}

/// Volume axis tick in billions (`$1.5B`).
pub fn format_axis_volume(value: f64) -> String {
    format!("${:.1}B", value / 1e9)
}

/// Display-ready technical indicators
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorDisplay {
    pub sma20: String,
    pub sma50: String,
    pub rsi: String,
    pub volume_ratio: String,
    pub trend: String,
    pub strength: String,
    pub is_high_volume: bool,
}

impl From<&IndicatorSnapshot> for IndicatorDisplay {
    fn from(snapshot: &IndicatorSnapshot) -> Self {
        Self {
            sma20: format!("{:.2}", snapshot.sma20),
            sma50: format!("{:.2}", snapshot.sma50),
            rsi: format!("{:.2}", snapshot.rsi),
            volume_ratio: format!("{:.2}", snapshot.volume_ratio),
            trend: snapshot.trend.as_ref().to_uppercase(),
            strength: snapshot.strength.as_ref().to_uppercase(),
            is_high_volume: snapshot.volume_ratio > HIGH_VOLUME_RATIO,
        }
    }
}

impl IndicatorSnapshot {
    pub fn display(&self) -> IndicatorDisplay {
        IndicatorDisplay::from(self)
    }
}

/// Display-ready market summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSummaryDisplay {
    pub total_market_cap: String,
    pub total_24h_volume: String,
    pub btc_dominance: String,
    pub active_cryptocurrencies: String,
}

impl MarketSummary {
    /// One decimal plus `%`.
    pub fn dominance_display(&self) -> String {
        format!("{:.1}%", self.btc_dominance)
    }

    pub fn active_display(&self) -> String {
        format_grouped(self.active_cryptocurrencies as f64)
    }

    pub fn display(&self) -> MarketSummaryDisplay {
        MarketSummaryDisplay {
            total_market_cap: format_market_cap(self.total_market_cap),
            total_24h_volume: format_market_cap(self.total_24h_volume),
            btc_dominance: self.dominance_display(),
            active_cryptocurrencies: self.active_display(),
        }
    }
}
