use serde::{Deserialize, Serialize};

use super::value_objects::{AssetId, MarketCap, Price, SortKey, Strength, Timestamp, Trend, Volume};

/// Domain entity - one tracked instrument in the market snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: AssetId,
    pub symbol: String,
    pub name: String,
    /// Icon glyph shown next to the name
    pub image: String,
    pub current_price: Price,
    pub price_change_percentage_24h: f64,
    pub market_cap: MarketCap,
    pub volume_24h: Volume,
    pub circulating_supply: f64,
    #[serde(default)]
    pub total_supply: Option<f64>,
    #[serde(default)]
    pub max_supply: Option<f64>,
    pub market_cap_rank: u32,
    #[serde(default, rename = "sparkline_in_7d")]
    pub sparkline_7d: Vec<f64>,
}

impl Asset {
    /// Value of the numeric field named by `key`
    pub fn sort_value(&self, key: SortKey) -> f64 {
        match key {
            SortKey::MarketCap => self.market_cap.value(),
            SortKey::CurrentPrice => self.current_price.value(),
            SortKey::PriceChangePercentage24h => self.price_change_percentage_24h,
            SortKey::Volume24h => self.volume_24h.value(),
        }
    }

    /// Case-insensitive substring match on name or symbol.
    /// `needle` must already be lowercased.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.name.to_lowercase().contains(needle)
            || self.symbol.to_lowercase().contains(needle)
    }
}

/// Domain entity - one hourly point of price history
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp: Timestamp,
    pub price: Price,
    pub volume: Volume,
    pub market_cap: MarketCap,
}

impl Sample {
    pub fn new(timestamp: Timestamp, price: Price, volume: Volume, market_cap: MarketCap) -> Self {
        Self { timestamp, price, volume, market_cap }
    }
}

/// Global statistics over the whole, unfiltered roster
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSummary {
    pub total_market_cap: f64,
    pub total_24h_volume: f64,
    /// Reference asset's share of total market cap, in percent
    pub btc_dominance: f64,
    pub active_cryptocurrencies: usize,
}

/// Technical indicators derived from a sample window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSnapshot {
    pub sma20: f64,
    pub sma50: f64,
    pub rsi: f64,
    pub volume_ratio: f64,
    pub trend: Trend,
    pub strength: Strength,
}
