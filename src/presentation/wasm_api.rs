use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::application::{
    asset_list::AssetQuery, config::DashboardConfig, dashboard::DashboardCoordinator, refresh::RefreshTask,
};
use crate::domain::{
    errors::DashboardError,
    logging::{LogComponent, init_logger},
    market_data::{
        Asset, AssetId, DashboardTab, IndicatorSnapshot, MarketSummary, Sample, SortKey,
        TimeRange, compute_indicators as indicators_for, compute_market_summary as summary_for,
    },
};
use crate::format_utils::{self, IndicatorDisplay, MarketSummaryDisplay};
use crate::infrastructure::{ConsoleLogger, RandomMarketData};
use crate::time_utils;
use crate::{log_debug, log_error, log_warn};

type SharedCoordinator = Rc<RefCell<DashboardCoordinator<RandomMarketData>>>;

fn js_error(err: DashboardError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| js_error(e.into()))
}

fn from_json<T: serde::de::DeserializeOwned>(json: &str) -> Result<T, JsValue> {
    serde_json::from_str(json).map_err(|e| js_error(e.into()))
}

#[derive(Serialize)]
struct IndicatorPayload<'a> {
    #[serde(flatten)]
    values: &'a IndicatorSnapshot,
    display: IndicatorDisplay,
}

impl<'a> From<&'a IndicatorSnapshot> for IndicatorPayload<'a> {
    fn from(values: &'a IndicatorSnapshot) -> Self {
        Self { values, display: values.display() }
    }
}

#[derive(Serialize)]
struct SummaryPayload<'a> {
    #[serde(flatten)]
    values: &'a MarketSummary,
    display: MarketSummaryDisplay,
}

impl<'a> From<&'a MarketSummary> for SummaryPayload<'a> {
    fn from(values: &'a MarketSummary) -> Self {
        Self { values, display: values.display() }
    }
}

/// Dashboard state handle for the JS presentation layer. Every getter
/// returns a JSON string; `null` means "not available yet".
#[wasm_bindgen]
pub struct DashboardApi {
    coordinator: SharedCoordinator,
    auto_refresh: Option<RefreshTask>,
}

#[wasm_bindgen]
impl DashboardApi {
    /// `config_json` may be omitted or any subset of the config object. The
    /// first dashboard created installs the console logger at its
    /// `log_level`.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<DashboardApi, JsValue> {
        let config = DashboardConfig::from_json(config_json.as_deref().unwrap_or_default()).map_err(js_error)?;
        if !init_logger(Box::new(ConsoleLogger::new(config.log_level))) {
            log_debug!(LogComponent::Presentation("DashboardApi"), "Logger already installed, keeping it");
        }
        let repository = RandomMarketData::from_seed_option(config.seed);
        Ok(Self { coordinator: Rc::new(RefCell::new(DashboardCoordinator::new(repository, config))), auto_refresh: None })
    }

    /// Regenerate the roster; returns the new market summary.
    pub fn refresh(&mut self) -> Result<String, JsValue> {
        let mut coordinator = self.coordinator.borrow_mut();
        let snapshot = coordinator.refresh().map_err(js_error)?;
        to_json(&SummaryPayload::from(&snapshot.summary))
    }

    #[wasm_bindgen(js_name = marketSummary)]
    pub fn market_summary(&self) -> Result<String, JsValue> {
        let coordinator = self.coordinator.borrow();
        to_json(&coordinator.market().map(|market| SummaryPayload::from(&market.summary)))
    }

    /// Unfiltered roster in generator order.
    pub fn assets(&self) -> Result<String, JsValue> {
        let coordinator = self.coordinator.borrow();
        let assets: &[Asset] = coordinator.market().map(|market| market.assets.as_slice()).unwrap_or_default();
        to_json(assets)
    }

    #[wasm_bindgen(js_name = visibleAssets)]
    pub fn visible_assets(&self) -> Result<String, JsValue> {
        to_json(&self.coordinator.borrow().visible_assets())
    }

    #[wasm_bindgen(js_name = watchedAssets)]
    pub fn watched_assets(&self) -> Result<String, JsValue> {
        to_json(&self.coordinator.borrow().watched_assets())
    }

    #[wasm_bindgen(js_name = selectedAsset)]
    pub fn selected_asset(&self) -> Result<String, JsValue> {
        to_json(&self.coordinator.borrow().selected_asset())
    }

    #[wasm_bindgen(js_name = selectAsset)]
    pub fn select_asset(&mut self, id: String) -> Result<(), JsValue> {
        self.coordinator.borrow_mut().select_asset(&AssetId::new(id)).map_err(js_error)
    }

    #[wasm_bindgen(js_name = setTimeRange)]
    pub fn set_time_range(&mut self, days: u32) -> Result<(), JsValue> {
        let range = TimeRange::from_days(days).map_err(js_error)?;
        self.coordinator.borrow_mut().set_time_range(range).map_err(js_error)
    }

    #[wasm_bindgen(js_name = setSearchTerm)]
    pub fn set_search_term(&mut self, term: String) {
        self.coordinator.borrow_mut().set_search_term(term);
    }

    #[wasm_bindgen(js_name = setSortKey)]
    pub fn set_sort_key(&mut self, key: String) -> Result<(), JsValue> {
        let key = SortKey::parse(&key).map_err(js_error)?;
        self.coordinator.borrow_mut().set_sort_key(key);
        Ok(())
    }

    #[wasm_bindgen(js_name = toggleSortOrder)]
    pub fn toggle_sort_order(&mut self) {
        self.coordinator.borrow_mut().toggle_sort_order();
    }

    #[wasm_bindgen(js_name = setActiveTab)]
    pub fn set_active_tab(&mut self, tab: String) -> Result<(), JsValue> {
        let tab = DashboardTab::parse(&tab).map_err(js_error)?;
        self.coordinator.borrow_mut().set_active_tab(tab);
        Ok(())
    }

    /// Returns whether the asset is watched after the toggle.
    #[wasm_bindgen(js_name = toggleWatchlist)]
    pub fn toggle_watchlist(&mut self, id: String) -> bool {
        self.coordinator.borrow_mut().toggle_watchlist(&AssetId::new(id))
    }

    #[wasm_bindgen(js_name = viewState)]
    pub fn view_state(&self) -> Result<String, JsValue> {
        to_json(self.coordinator.borrow().view_state())
    }

    /// Samples for the selected asset and time range.
    pub fn history(&self) -> Result<String, JsValue> {
        let coordinator = self.coordinator.borrow();
        let samples: &[Sample] = coordinator.history().map(|history| history.samples.as_slice()).unwrap_or_default();
        to_json(samples)
    }

    pub fn indicators(&self) -> Result<String, JsValue> {
        to_json(&self.coordinator.borrow().indicators().map(IndicatorPayload::from))
    }

    /// Start the periodic roster refresh. `on_refresh` is invoked after each
    /// successful tick so the host can re-render. Restarting replaces the
    /// previous timer.
    #[wasm_bindgen(js_name = startAutoRefresh)]
    pub fn start_auto_refresh(&mut self, on_refresh: Option<js_sys::Function>) {
        self.stop_auto_refresh();

        let coordinator = Rc::clone(&self.coordinator);
        let interval_ms = coordinator.borrow().config().refresh_interval_ms;
        let task = RefreshTask::spawn(interval_ms, move || {
            let refreshed = match coordinator.try_borrow_mut() {
                Ok(mut coordinator) => match coordinator.refresh() {
                    Ok(_) => true,
                    Err(err) => {
                        log_error!(LogComponent::Presentation("DashboardApi"), "Auto refresh failed: {}", err);
                        false
                    }
                },
                Err(_) => {
                    log_warn!(LogComponent::Presentation("DashboardApi"), "Dashboard busy, skipping refresh tick");
                    false
                }
            };

            if refreshed
                && let Some(callback) = &on_refresh
                && let Err(err) = callback.call0(&JsValue::NULL)
            {
                log_error!(LogComponent::Presentation("DashboardApi"), "Refresh callback threw: {:?}", err);
            }
        });
        self.auto_refresh = Some(task);
    }

    #[wasm_bindgen(js_name = stopAutoRefresh)]
    pub fn stop_auto_refresh(&mut self) {
        if let Some(task) = self.auto_refresh.take() {
            task.cancel();
        }
    }

    #[wasm_bindgen(js_name = isAutoRefreshing)]
    pub fn is_auto_refreshing(&self) -> bool {
        self.auto_refresh.as_ref().is_some_and(|task| !task.is_cancelled())
    }
}

#[wasm_bindgen(js_name = formatPrice)]
pub fn format_price(value: f64) -> String {
    format_utils::format_price(value)
}

#[wasm_bindgen(js_name = formatMarketCap)]
pub fn format_market_cap(value: f64) -> String {
    format_utils::format_market_cap(value)
}

/// `{"text": "2.50%", "direction": "up"}`
#[wasm_bindgen(js_name = formatPercentChange)]
pub fn format_percent_change(value: f64) -> Result<String, JsValue> {
    to_json(&format_utils::format_percent_change(value))
}

#[wasm_bindgen(js_name = formatSupply)]
pub fn format_supply(value: Option<f64>, fallback: &str) -> String {
    format_utils::format_supply(value, fallback)
}

#[wasm_bindgen(js_name = formatAxisPrice)]
pub fn format_axis_price(value: f64) -> String {
    format_utils::format_axis_price(value)
}

#[wasm_bindgen(js_name = formatAxisVolume)]
pub fn format_axis_volume(value: f64) -> String {
    format_utils::format_axis_volume(value)
}

/// Timestamps arrive as JS numbers (ms since the epoch).
#[wasm_bindgen(js_name = formatDateLabel)]
pub fn format_date_label(timestamp_ms: f64) -> String {
    time_utils::format_date_label(timestamp_ms as u64)
}

#[wasm_bindgen(js_name = formatDatetimeLabel)]
pub fn format_datetime_label(timestamp_ms: f64) -> String {
    time_utils::format_datetime_label(timestamp_ms as u64)
}

/// `samples_json` is an array of samples, oldest first. Returns `null` below
/// twenty samples; only JSON that does not parse as samples is an error.
#[wasm_bindgen(js_name = computeIndicators)]
pub fn compute_indicators(samples_json: &str) -> Result<String, JsValue> {
    let samples: Vec<Sample> = from_json(samples_json)?;
    to_json(&indicators_for(&samples).as_ref().map(IndicatorPayload::from))
}

#[wasm_bindgen(js_name = computeMarketSummary)]
pub fn compute_market_summary(assets_json: &str) -> Result<String, JsValue> {
    let assets: Vec<Asset> = from_json(assets_json)?;
    let summary = summary_for(&assets).map_err(js_error)?;
    to_json(&SummaryPayload::from(&summary))
}

#[wasm_bindgen(js_name = selectAndSort)]
pub fn select_and_sort(assets_json: &str, search_term: &str, sort_key: &str, sort_order: &str) -> Result<String, JsValue> {
    let assets: Vec<Asset> = from_json(assets_json)?;
    let query = AssetQuery::parse(search_term, sort_key, sort_order).map_err(js_error)?;
    to_json(&query.apply(&assets))
}
