use crate::application::asset_list::watchlist_assets;
use crate::application::config::DashboardConfig;
use crate::domain::{
    errors::{DashboardError, DashboardResult},
    logging::{LogComponent, LogEntry, LogLevel, get_logger},
    market_data::{
        Asset, AssetId, DashboardTab, DataValidationService, IndicatorEngine, IndicatorSnapshot, MarketDataRepository,
        MarketSummaryService, Sample, SortKey, TimeRange, Timestamp,
    },
    state::{HistoryRequest, HistorySnapshot, MarketSnapshot},
};
use crate::time_utils::current_time_ms;
use crate::view_state::DashboardViewState;

/// Owns the dashboard state and recomputes derived values from it.
///
/// Snapshots are never edited in place: a refresh or history load builds a
/// new snapshot and swaps it in. History loads are ticketed, and only the
/// latest ticket may install its result.
pub struct DashboardCoordinator<R: MarketDataRepository> {
    repository: R,
    config: DashboardConfig,
    view: DashboardViewState,
    market: Option<MarketSnapshot>,
    history: Option<HistorySnapshot>,
    summary_service: MarketSummaryService,
    indicator_engine: IndicatorEngine,
    validator: DataValidationService,
    next_request_id: u64,
    latest_request: Option<HistoryRequest>,
}

impl<R: MarketDataRepository> DashboardCoordinator<R> {
    pub fn new(repository: R, config: DashboardConfig) -> Self {
        get_logger().info(LogComponent::Application("Dashboard"), "Creating dashboard coordinator");

        Self {
            repository,
            view: DashboardViewState::from_config(&config),
            config,
            market: None,
            history: None,
            summary_service: MarketSummaryService::new(),
            indicator_engine: IndicatorEngine::new(),
            validator: DataValidationService::new(),
            next_request_id: 1,
            latest_request: None,
        }
    }

    /// Pull a new roster and replace the market snapshot.
    ///
    /// On the first refresh the first roster entry becomes the selection and
    /// its history is loaded. Nothing is replaced unless the roster, the
    /// summary and any required history load all succeed.
    pub fn refresh(&mut self) -> DashboardResult<&MarketSnapshot> {
        let assets = self.repository.fetch_assets()?;
        let summary = self.summary_service.compute(&assets)?;
        let snapshot = MarketSnapshot::new(assets, summary, Timestamp::from_millis(current_time_ms()));

        let needs_selection = match &self.view.selected_asset {
            Some(id) => !snapshot.contains(id),
            None => true,
        };
        let pending = match snapshot.assets.first() {
            Some(first) if needs_selection => Some(self.load_history(first.id.clone(), self.view.time_range)?),
            _ => None,
        };

        get_logger().log(LogEntry::new_with_metadata(
            LogLevel::Info,
            LogComponent::Application("Dashboard"),
            "Market refreshed",
            &format!(
                "assets={} total_cap={:.0} dominance={:.1}%",
                snapshot.assets.len(),
                summary.total_market_cap,
                summary.btc_dominance
            ),
        ));
        self.market = Some(snapshot);
        if let Some((request, samples)) = pending {
            self.commit_history(request, samples);
        }

        self.market.as_ref().ok_or(DashboardError::EmptyMarket)
    }

    /// Fetch history for a ticket that is not yet registered as the latest.
    fn load_history(&mut self, asset_id: AssetId, range: TimeRange) -> DashboardResult<(HistoryRequest, Vec<Sample>)> {
        let request = HistoryRequest { id: self.next_request_id, asset_id, range };
        self.next_request_id += 1;
        let samples = self.generate_history(&request)?;
        Ok((request, samples))
    }

    /// Make `request` the current selection and latest ticket, then install it.
    fn commit_history(&mut self, request: HistoryRequest, samples: Vec<Sample>) -> bool {
        self.view.selected_asset = Some(request.asset_id.clone());
        self.view.time_range = request.range;
        self.latest_request = Some(request.clone());
        self.apply_history(request, samples)
    }

    /// Issue a ticket for the current (selected asset, time range) pair.
    /// Any earlier ticket becomes stale.
    pub fn request_history(&mut self) -> DashboardResult<HistoryRequest> {
        let asset_id = self.view.selected_asset.clone().ok_or(DashboardError::NoAssetSelected)?;
        let request = HistoryRequest { id: self.next_request_id, asset_id, range: self.view.time_range };
        self.next_request_id += 1;
        self.latest_request = Some(request.clone());
        Ok(request)
    }

    /// Fetch the samples a ticket asks for.
    pub fn generate_history(&mut self, request: &HistoryRequest) -> DashboardResult<Vec<Sample>> {
        self.repository.fetch_history(&request.asset_id, request.range)
    }

    /// Install `samples` for `request` if it is still the latest ticket.
    /// Returns `false` when the result was stale and dropped.
    pub fn apply_history(&mut self, request: HistoryRequest, samples: Vec<Sample>) -> bool {
        if self.latest_request.as_ref() != Some(&request) {
            get_logger().debug(
                LogComponent::Application("Dashboard"),
                &format!("Discarding stale history #{} for {}", request.id, request.asset_id),
            );
            return false;
        }

        if let Err(err) = self.validator.validate_sample_sequence(&samples) {
            get_logger().warn(
                LogComponent::Application("Dashboard"),
                &format!("History #{} for {} looks malformed: {}", request.id, request.asset_id, err),
            );
        }

        let indicators = self.indicator_engine.compute(&samples);
        get_logger().info(
            LogComponent::Application("Dashboard"),
            &format!(
                "History #{} installed: {} samples for {} ({}d), indicators {}",
                request.id,
                samples.len(),
                request.asset_id,
                request.range.days(),
                if indicators.is_some() { "ready" } else { "pending" }
            ),
        );
        self.history = Some(HistorySnapshot::new(request, samples, indicators));
        true
    }

    pub fn select_asset(&mut self, id: &AssetId) -> DashboardResult<()> {
        let known = self.market.as_ref().is_some_and(|market| market.contains(id));
        if !known {
            return Err(DashboardError::UnknownAsset(id.to_string()));
        }
        let (request, samples) = self.load_history(id.clone(), self.view.time_range)?;
        self.commit_history(request, samples);
        Ok(())
    }

    /// A failed history load leaves the previous range and history in place.
    pub fn set_time_range(&mut self, range: TimeRange) -> DashboardResult<()> {
        match self.view.selected_asset.clone() {
            Some(id) => {
                let (request, samples) = self.load_history(id, range)?;
                self.commit_history(request, samples);
            }
            None => self.view.time_range = range,
        }
        Ok(())
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.view.set_search_term(term);
    }

    pub fn set_sort_key(&mut self, key: SortKey) {
        self.view.set_sort_key(key);
    }

    pub fn toggle_sort_order(&mut self) {
        self.view.toggle_sort_order();
    }

    pub fn set_active_tab(&mut self, tab: DashboardTab) {
        self.view.set_active_tab(tab);
    }

    pub fn toggle_watchlist(&mut self, id: &AssetId) -> bool {
        self.view.toggle_watchlist(id)
    }

    pub fn view_state(&self) -> &DashboardViewState {
        &self.view
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn market(&self) -> Option<&MarketSnapshot> {
        self.market.as_ref()
    }

    pub fn history(&self) -> Option<&HistorySnapshot> {
        self.history.as_ref()
    }

    pub fn indicators(&self) -> Option<&IndicatorSnapshot> {
        self.history.as_ref().and_then(|history| history.indicators.as_ref())
    }

    pub fn selected_asset(&self) -> Option<&Asset> {
        let id = self.view.selected_asset.as_ref()?;
        self.market.as_ref()?.find(id)
    }

    /// Roster filtered and sorted by the current list controls.
    pub fn visible_assets(&self) -> Vec<Asset> {
        match &self.market {
            Some(market) => self.view.query().apply(&market.assets),
            None => Vec::new(),
        }
    }

    pub fn watched_assets(&self) -> Vec<Asset> {
        match &self.market {
            Some(market) => watchlist_assets(&market.assets, &self.view.watchlist),
            None => Vec::new(),
        }
    }
}
