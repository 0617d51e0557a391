use crate::domain::errors::DashboardResult;
use crate::domain::market_data::{Asset, AssetId, SortKey, SortOrder};

/// Search and ordering applied to the roster before display
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AssetQuery {
    pub search_term: String,
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
}

impl AssetQuery {
    pub fn new(search_term: impl Into<String>, sort_key: SortKey, sort_order: SortOrder) -> Self {
        Self { search_term: search_term.into(), sort_key, sort_order }
    }

    /// Build from raw UI strings, rejecting unknown keys and orders.
    pub fn parse(search_term: &str, sort_key: &str, sort_order: &str) -> DashboardResult<Self> {
        Ok(Self::new(search_term, SortKey::parse(sort_key)?, SortOrder::parse(sort_order)?))
    }

    pub fn apply(&self, assets: &[Asset]) -> Vec<Asset> {
        select_and_sort(assets, &self.search_term, self.sort_key, self.sort_order)
    }
}

/// Filtered and ordered copy of `assets`; the input is left untouched.
///
/// The sort is stable, so assets with equal keys keep their roster order in
/// either direction.
pub fn select_and_sort(assets: &[Asset], search_term: &str, sort_key: SortKey, sort_order: SortOrder) -> Vec<Asset> {
    let needle = search_term.to_lowercase();
    let mut selected: Vec<Asset> = assets.iter().filter(|a| a.matches_lowercase(&needle)).cloned().collect();

    selected.sort_by(|a, b| {
        let ordering = a.sort_value(sort_key).total_cmp(&b.sort_value(sort_key));
        match sort_order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
    selected
}

/// Watched assets in roster order
pub fn watchlist_assets(assets: &[Asset], watchlist: &[AssetId]) -> Vec<Asset> {
    assets.iter().filter(|a| watchlist.contains(&a.id)).cloned().collect()
}
