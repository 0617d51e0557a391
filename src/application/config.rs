use serde::{Deserialize, Serialize};

use crate::domain::errors::DashboardResult;
use crate::domain::logging::LogLevel;
use crate::domain::market_data::{AssetId, SortKey, SortOrder, TimeRange};

/// Period of the roster refresh timer.
pub const DEFAULT_REFRESH_INTERVAL_MS: u32 = 30_000;

/// Host-supplied settings. Every field has a default, so a JS host may pass
/// `{}` or any subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub refresh_interval_ms: u32,
    pub default_time_range: TimeRange,
    pub default_sort_key: SortKey,
    pub default_sort_order: SortOrder,
    pub initial_watchlist: Vec<AssetId>,
    /// Seed for the fixture source; `None` draws from OS entropy.
    pub seed: Option<u64>,
    pub log_level: LogLevel,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
            default_time_range: TimeRange::SevenDays,
            default_sort_key: SortKey::MarketCap,
            default_sort_order: SortOrder::Desc,
            initial_watchlist: ["bitcoin", "ethereum", "cardano"].into_iter().map(AssetId::from).collect(),
            seed: None,
            log_level: LogLevel::Info,
        }
    }
}

impl DashboardConfig {
    /// Parse a JSON object; an empty or blank string yields the defaults.
    pub fn from_json(json: &str) -> DashboardResult<Self> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_dashboard_start_state() {
        let config = DashboardConfig::default();
        assert_eq!(config.refresh_interval_ms, 30_000);
        assert_eq!(config.default_time_range.days(), 7);
        assert_eq!(config.initial_watchlist.len(), 3);
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config = DashboardConfig::from_json(r#"{"seed": 42, "default_time_range": "30"}"#).unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.default_time_range, TimeRange::ThirtyDays);
        assert_eq!(config.default_sort_order, SortOrder::Desc);
        assert_eq!(DashboardConfig::from_json("  ").unwrap(), DashboardConfig::default());
    }

    #[test]
    fn bad_time_range_is_rejected() {
        assert!(DashboardConfig::from_json(r#"{"default_time_range": "14"}"#).is_err());
    }
}
