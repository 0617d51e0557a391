use serde::{Deserialize, Serialize};

use crate::application::asset_list::AssetQuery;
use crate::application::config::DashboardConfig;
use crate::domain::market_data::{AssetId, DashboardTab, SortKey, SortOrder, TimeRange};

/// Presentation-owned inputs to the core: selection, list controls, tab,
/// history window and watchlist.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DashboardViewState {
    pub selected_asset: Option<AssetId>,
    pub search_term: String,
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
    pub active_tab: DashboardTab,
    pub time_range: TimeRange,
    /// Insertion-ordered, no duplicates
    pub watchlist: Vec<AssetId>,
}

impl Default for DashboardViewState {
    fn default() -> Self {
        Self::from_config(&DashboardConfig::default())
    }
}

impl DashboardViewState {
    pub fn from_config(config: &DashboardConfig) -> Self {
        let mut watchlist = Vec::with_capacity(config.initial_watchlist.len());
        for id in &config.initial_watchlist {
            if !watchlist.contains(id) {
                watchlist.push(id.clone());
            }
        }

        Self {
            selected_asset: None,
            search_term: String::new(),
            sort_key: config.default_sort_key,
            sort_order: config.default_sort_order,
            active_tab: DashboardTab::default(),
            time_range: config.default_time_range,
            watchlist,
        }
    }

    pub fn query(&self) -> AssetQuery {
        AssetQuery::new(self.search_term.clone(), self.sort_key, self.sort_order)
    }

    pub fn is_watched(&self, id: &AssetId) -> bool {
        self.watchlist.contains(id)
    }

    /// Add `id` if absent, remove it otherwise. Returns whether it is now watched.
    pub fn toggle_watchlist(&mut self, id: &AssetId) -> bool {
        match self.watchlist.iter().position(|watched| watched == id) {
            Some(index) => {
                self.watchlist.remove(index);
                false
            }
            None => {
                self.watchlist.push(id.clone());
                true
            }
        }
    }

    pub fn toggle_sort_order(&mut self) -> SortOrder {
        self.sort_order = self.sort_order.toggled();
        self.sort_order
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn set_sort_key(&mut self, key: SortKey) {
        self.sort_key = key;
    }

    pub fn set_active_tab(&mut self, tab: DashboardTab) {
        self.active_tab = tab;
    }
}
