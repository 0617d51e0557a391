use crate::domain::errors::DashboardResult;
use crate::domain::market_data::{Asset, AssetId, Sample, TimeRange};

/// Source of market data. The random fixture is one implementation; a live
/// feed client would be another. Indicator and summary code only ever sees
/// the returned values.
pub trait MarketDataRepository {
    /// Full roster snapshot, reference asset first.
    fn fetch_assets(&mut self) -> DashboardResult<Vec<Asset>>;

    /// Hourly history for `asset_id` covering `range`, oldest first.
    fn fetch_history(&mut self, asset_id: &AssetId, range: TimeRange) -> DashboardResult<Vec<Sample>>;
}

impl<R: MarketDataRepository + ?Sized> MarketDataRepository for Box<R> {
    fn fetch_assets(&mut self) -> DashboardResult<Vec<Asset>> {
        (**self).fetch_assets()
    }

    fn fetch_history(&mut self, asset_id: &AssetId, range: TimeRange) -> DashboardResult<Vec<Sample>> {
        (**self).fetch_history(asset_id, range)
    }
}
