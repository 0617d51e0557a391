use crate::domain::errors::{DashboardError, DashboardResult};
use crate::domain::market_data::{Asset, MarketSummary, Sample};

/// Scale-up from tracked assets to the advertised market breadth.
pub const ACTIVE_ASSET_MULTIPLIER: usize = 125;

/// Domain service computing global market statistics
#[derive(Debug, Clone, Copy, Default)]
pub struct MarketSummaryService;

impl MarketSummaryService {
    pub fn new() -> Self {
        Self
    }

    /// Summary over the full roster in generator order.
    ///
    /// The first asset is the dominance reference, so this must be fed the
    /// unfiltered roster, never the sorted or filtered list view.
    pub fn compute(&self, assets: &[Asset]) -> DashboardResult<MarketSummary> {
        let reference = assets.first().ok_or(DashboardError::EmptyMarket)?;

        let total_market_cap: f64 = assets.iter().map(|a| a.market_cap.value()).sum();
        let total_24h_volume: f64 = assets.iter().map(|a| a.volume_24h.value()).sum();

        // every cap being zero would divide by zero just like an empty roster
        if total_market_cap == 0.0 {
            return Err(DashboardError::EmptyMarket);
        }

        Ok(MarketSummary {
            total_market_cap,
            total_24h_volume,
            btc_dominance: reference.market_cap.value() / total_market_cap * 100.0,
            active_cryptocurrencies: assets.len() * ACTIVE_ASSET_MULTIPLIER,
        })
    }
}

pub fn compute_market_summary(assets: &[Asset]) -> DashboardResult<MarketSummary> {
    MarketSummaryService::new().compute(assets)
}

/// Checks for sample windows arriving from outside the core
#[derive(Debug, Clone, Copy, Default)]
pub struct DataValidationService;

impl DataValidationService {
    pub fn new() -> Self {
        Self
    }

    pub fn validate_sample(&self, sample: &Sample) -> DashboardResult<()> {
        Self::check_fields(sample).map_err(DashboardError::InvalidSequence)
    }

    fn check_fields(sample: &Sample) -> Result<(), String> {
        let fields = [
            ("price", sample.price.value()),
            ("volume", sample.volume.value()),
            ("market_cap", sample.market_cap.value()),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(format!("{} is not finite", name));
            }
            if value < 0.0 {
                return Err(format!("{} is negative", name));
            }
        }
        Ok(())
    }

    /// Every sample valid and timestamps strictly increasing
    pub fn validate_sample_sequence(&self, samples: &[Sample]) -> DashboardResult<()> {
        for (i, sample) in samples.iter().enumerate() {
            Self::check_fields(sample)
                .map_err(|e| DashboardError::InvalidSequence(format!("sample {}: {}", i, e)))?;
        }

        for (i, pair) in samples.windows(2).enumerate() {
            if pair[1].timestamp <= pair[0].timestamp {
                return Err(DashboardError::InvalidSequence(format!(
                    "samples are not in chronological order at index {}",
                    i + 1
                )));
            }
        }

        Ok(())
    }
}
