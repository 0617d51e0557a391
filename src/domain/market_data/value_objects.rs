use derive_more::{Constructor, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use strum::{AsRefStr, Display as StrumDisplay, EnumIter, EnumString};

use crate::domain::errors::{DashboardError, DashboardResult};

/// Hourly samples per day of history.
pub const SAMPLES_PER_DAY: usize = 24;

/// Spacing between two history samples.
pub const SAMPLE_INTERVAL_MS: u64 = 3_600_000;

/// Value Object - USD price
#[derive(Debug, Clone, Copy, PartialEq, From, Into, Deref, Constructor, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(f64);

impl Price {
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl PartialOrd for Price {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

/// Value Object - traded volume in USD
#[derive(Debug, Clone, Copy, PartialEq, From, Into, Deref, Constructor, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Volume(f64);

impl Volume {
    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Value Object - market capitalization in USD
#[derive(Debug, Clone, Copy, PartialEq, From, Into, Deref, Constructor, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarketCap(f64);

impl MarketCap {
    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Value Object - milliseconds since the Unix epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, From, Into, Deref, Constructor, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn from_millis(value: u64) -> Self {
        Self(value)
    }
}

/// Value Object - stable asset key (`bitcoin`, `ethereum`, ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deref, Display, Serialize, Deserialize)]
#[serde(transparent)]
#[display(fmt = "{}", _0)]
pub struct AssetId(String);

impl AssetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AssetId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Numeric asset field the list can be ordered by
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, StrumDisplay, EnumIter, EnumString, AsRefStr, Serialize, Deserialize,
)]
pub enum SortKey {
    #[default]
    #[strum(serialize = "market_cap")]
    #[serde(rename = "market_cap")]
    MarketCap,

    #[strum(serialize = "current_price")]
    #[serde(rename = "current_price")]
    CurrentPrice,

    #[strum(serialize = "price_change_percentage_24h")]
    #[serde(rename = "price_change_percentage_24h")]
    PriceChangePercentage24h,

    #[strum(serialize = "volume_24h")]
    #[serde(rename = "volume_24h")]
    Volume24h,
}

impl SortKey {
    pub fn parse(value: &str) -> DashboardResult<Self> {
        value.parse().map_err(|_| DashboardError::UnsupportedSortKey(value.to_string()))
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, StrumDisplay, EnumIter, EnumString, AsRefStr, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn parse(value: &str) -> DashboardResult<Self> {
        value.parse().map_err(|_| DashboardError::UnsupportedSortOrder(value.to_string()))
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// History window offered by the price chart
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, StrumDisplay, EnumIter, EnumString, AsRefStr, Serialize, Deserialize,
)]
pub enum TimeRange {
    #[strum(serialize = "1")]
    #[serde(rename = "1")]
    OneDay,

    #[default]
    #[strum(serialize = "7")]
    #[serde(rename = "7")]
    SevenDays,

    #[strum(serialize = "30")]
    #[serde(rename = "30")]
    ThirtyDays,

    #[strum(serialize = "90")]
    #[serde(rename = "90")]
    NinetyDays,
}

impl TimeRange {
    pub fn parse(value: &str) -> DashboardResult<Self> {
        value.trim().parse().map_err(|_| DashboardError::UnsupportedTimeRange(value.to_string()))
    }

    pub fn from_days(days: u32) -> DashboardResult<Self> {
        match days {
            1 => Ok(Self::OneDay),
            7 => Ok(Self::SevenDays),
            30 => Ok(Self::ThirtyDays),
            90 => Ok(Self::NinetyDays),
            other => Err(DashboardError::UnsupportedTimeRange(other.to_string())),
        }
    }

    pub fn days(&self) -> u32 {
        match self {
            Self::OneDay => 1,
            Self::SevenDays => 7,
            Self::ThirtyDays => 30,
            Self::NinetyDays => 90,
        }
    }

    /// Number of hourly samples covering the window
    pub fn sample_count(&self) -> usize {
        self.days() as usize * SAMPLES_PER_DAY
    }
}

/// Detail panel tab
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, StrumDisplay, EnumIter, EnumString, AsRefStr, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DashboardTab {
    #[default]
    Overview,
    Technical,
    Volume,
}

impl DashboardTab {
    pub fn parse(value: &str) -> DashboardResult<Self> {
        value.parse().map_err(|_| DashboardError::UnsupportedTab(value.to_string()))
    }
}

/// Moving-average crossover classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, AsRefStr, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Bullish,
    Bearish,
}

/// RSI band classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, AsRefStr, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    Overbought,
    Oversold,
    Neutral,
}
