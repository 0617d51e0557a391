use std::sync::Arc;

use crate::domain::market_data::{
    Asset, AssetId, IndicatorSnapshot, MarketSummary, Sample, TimeRange, Timestamp,
};

/// Immutable roster snapshot. Refreshes replace it wholesale.
#[derive(Clone, Debug)]
pub struct MarketSnapshot {
    pub assets: Arc<Vec<Asset>>,
    pub summary: MarketSummary,
    pub generated_at: Timestamp,
}

impl MarketSnapshot {
    pub fn new(assets: Vec<Asset>, summary: MarketSummary, generated_at: Timestamp) -> Self {
        Self { assets: Arc::new(assets), summary, generated_at }
    }

    pub fn find(&self, id: &AssetId) -> Option<&Asset> {
        self.assets.iter().find(|asset| &asset.id == id)
    }

    pub fn contains(&self, id: &AssetId) -> bool {
        self.find(id).is_some()
    }
}

/// Ticket for one history load. Only the most recently issued ticket may
/// install its result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryRequest {
    pub id: u64,
    pub asset_id: AssetId,
    pub range: TimeRange,
}

/// Samples and indicators for one (asset, range) pair.
#[derive(Clone, Debug)]
pub struct HistorySnapshot {
    pub request: HistoryRequest,
    pub samples: Arc<Vec<Sample>>,
    pub indicators: Option<IndicatorSnapshot>,
}

impl HistorySnapshot {
    pub fn new(request: HistoryRequest, samples: Vec<Sample>, indicators: Option<IndicatorSnapshot>) -> Self {
        Self { request, samples: Arc::new(samples), indicators }
    }
}
