use std::collections::VecDeque;

use market_dashboard_wasm::application::{DashboardConfig, DashboardCoordinator};
use market_dashboard_wasm::domain::errors::{DashboardError, DashboardResult};
use market_dashboard_wasm::domain::logging::{LogLevel, init_logger};
use market_dashboard_wasm::domain::market_data::{
    Asset, AssetId, DashboardTab, MarketCap, MarketDataRepository, Price, Sample, SortKey, SortOrder, TimeRange,
    Timestamp, Volume,
};
use market_dashboard_wasm::infrastructure::{MemoryLogger, RandomMarketData};

fn asset(id: &str, market_cap: f64) -> Asset {
    Asset {
        id: AssetId::from(id),
        symbol: id[..3].to_uppercase(),
        name: id.to_string(),
        image: String::new(),
        current_price: Price::from(market_cap / 10.0),
        price_change_percentage_24h: 1.0,
        market_cap: MarketCap::from(market_cap),
        volume_24h: Volume::from(10.0),
        circulating_supply: 0.0,
        total_supply: None,
        max_supply: None,
        market_cap_rank: 1,
        sparkline_7d: Vec::new(),
    }
}

/// Serves queued rosters in order and a rising price series for history.
/// History fetches past `history_budget` fail.
struct ScriptedMarket {
    rosters: VecDeque<Vec<Asset>>,
    history_calls: usize,
    history_budget: usize,
}

impl ScriptedMarket {
    fn new(rosters: Vec<Vec<Asset>>) -> Self {
        Self { rosters: rosters.into(), history_calls: 0, history_budget: usize::MAX }
    }

    fn with_history_budget(mut self, budget: usize) -> Self {
        self.history_budget = budget;
        self
    }
}

impl MarketDataRepository for ScriptedMarket {
    fn fetch_assets(&mut self) -> DashboardResult<Vec<Asset>> {
        Ok(self.rosters.pop_front().unwrap_or_default())
    }

    fn fetch_history(&mut self, _asset_id: &AssetId, range: TimeRange) -> DashboardResult<Vec<Sample>> {
        if self.history_calls >= self.history_budget {
            return Err(DashboardError::InvalidSequence("feed down".to_string()));
        }
        self.history_calls += 1;
        Ok((0..range.sample_count())
            .map(|i| {
                Sample::new(
                    Timestamp::from_millis(i as u64 * 3_600_000),
                    Price::from(i as f64 + 1.0),
                    Volume::from(1.0),
                    MarketCap::from(1.0),
                )
            })
            .collect())
    }
}

fn default_roster() -> Vec<Asset> {
    vec![asset("bitcoin", 100.0), asset("ethereum", 300.0), asset("cardano", 600.0)]
}

#[test]
fn first_refresh_selects_first_asset() {
    let mut dashboard = DashboardCoordinator::new(ScriptedMarket::new(vec![default_roster()]), DashboardConfig::default());
    assert!(dashboard.market().is_none());

    dashboard.refresh().unwrap();

    assert_eq!(dashboard.selected_asset().map(|a| a.id.value()), Some("bitcoin"));
    let history = dashboard.history().unwrap();
    assert_eq!(history.samples.len(), 7 * 24);
    assert_eq!(history.request.range, TimeRange::SevenDays);
    assert!(dashboard.indicators().is_some());
}

#[test]
fn refresh_keeps_a_surviving_selection() {
    let rosters = vec![default_roster(), default_roster()];
    let mut dashboard = DashboardCoordinator::new(ScriptedMarket::new(rosters), DashboardConfig::default());
    dashboard.refresh().unwrap();
    dashboard.select_asset(&AssetId::from("cardano")).unwrap();
    let loaded = dashboard.history().map(|h| h.request.id);

    dashboard.refresh().unwrap();

    assert_eq!(dashboard.view_state().selected_asset, Some(AssetId::from("cardano")));
    assert_eq!(dashboard.history().map(|h| h.request.id), loaded);
}

#[test]
fn refresh_reselects_when_selection_vanishes() {
    let rosters = vec![default_roster(), vec![asset("solana", 50.0), asset("bitcoin", 50.0)]];
    let mut dashboard = DashboardCoordinator::new(ScriptedMarket::new(rosters), DashboardConfig::default());
    dashboard.refresh().unwrap();
    dashboard.select_asset(&AssetId::from("ethereum")).unwrap();

    dashboard.refresh().unwrap();

    assert_eq!(dashboard.view_state().selected_asset, Some(AssetId::from("solana")));
}

#[test]
fn summary_ignores_list_controls() {
    let mut dashboard = DashboardCoordinator::new(ScriptedMarket::new(vec![default_roster()]), DashboardConfig::default());
    dashboard.set_search_term("card");
    dashboard.set_sort_key(SortKey::MarketCap);
    dashboard.toggle_sort_order();
    dashboard.refresh().unwrap();

    let visible: Vec<String> = dashboard.visible_assets().iter().map(|a| a.id.to_string()).collect();
    assert_eq!(visible, ["cardano"]);

    let summary = dashboard.market().unwrap().summary;
    assert_eq!(summary.total_market_cap, 1000.0);
    assert_eq!(summary.btc_dominance, 10.0);
    assert_eq!(dashboard.view_state().sort_order, SortOrder::Asc);
}

#[test]
fn latest_history_request_wins() {
    let logger = MemoryLogger::new(LogLevel::Debug);
    init_logger(Box::new(logger.clone()));

    let mut dashboard = DashboardCoordinator::new(ScriptedMarket::new(vec![default_roster()]), DashboardConfig::default());
    dashboard.refresh().unwrap();

    let older = dashboard.request_history().unwrap();
    let older_samples = dashboard.generate_history(&older).unwrap();
    dashboard.set_time_range(TimeRange::OneDay).unwrap();
    let newest = dashboard.history().unwrap().request.clone();

    assert!(!dashboard.apply_history(older.clone(), older_samples));
    let history = dashboard.history().unwrap();
    assert_eq!(history.request, newest);
    assert_eq!(history.samples.len(), 24);

    let messages = logger.messages();
    assert!(messages.iter().any(|m| m.contains(&format!("Discarding stale history #{}", older.id))));
}

#[test]
fn out_of_order_completion_keeps_newest() {
    let mut dashboard = DashboardCoordinator::new(ScriptedMarket::new(vec![default_roster()]), DashboardConfig::default());
    dashboard.refresh().unwrap();

    let first = dashboard.request_history().unwrap();
    let second = dashboard.request_history().unwrap();
    let second_samples = dashboard.generate_history(&second).unwrap();
    let first_samples = dashboard.generate_history(&first).unwrap();

    assert!(dashboard.apply_history(second.clone(), second_samples));
    assert!(!dashboard.apply_history(first, first_samples));
    assert_eq!(dashboard.history().unwrap().request, second);
}

#[test]
fn unknown_asset_is_rejected() {
    let mut dashboard = DashboardCoordinator::new(ScriptedMarket::new(vec![default_roster()]), DashboardConfig::default());
    dashboard.refresh().unwrap();
    let err = dashboard.select_asset(&AssetId::from("dogecoin")).unwrap_err();
    assert_eq!(err, DashboardError::UnknownAsset("dogecoin".to_string()));
    assert_eq!(dashboard.view_state().selected_asset, Some(AssetId::from("bitcoin")));
}

#[test]
fn history_needs_a_selection() {
    let mut dashboard = DashboardCoordinator::new(ScriptedMarket::new(Vec::new()), DashboardConfig::default());
    assert_eq!(dashboard.request_history(), Err(DashboardError::NoAssetSelected));
}

#[test]
fn empty_roster_leaves_state_untouched() {
    let mut dashboard = DashboardCoordinator::new(ScriptedMarket::new(vec![Vec::new()]), DashboardConfig::default());
    assert_eq!(dashboard.refresh().err(), Some(DashboardError::EmptyMarket));
    assert!(dashboard.market().is_none());
    assert!(dashboard.selected_asset().is_none());
}

#[test]
fn watchlist_follows_roster_order() {
    let mut dashboard = DashboardCoordinator::new(ScriptedMarket::new(vec![default_roster()]), DashboardConfig::default());
    dashboard.refresh().unwrap();
    dashboard.set_active_tab(DashboardTab::Technical);

    assert!(!dashboard.toggle_watchlist(&AssetId::from("ethereum")));
    let watched: Vec<String> = dashboard.watched_assets().iter().map(|a| a.id.to_string()).collect();
    assert_eq!(watched, ["bitcoin", "cardano"]);
    assert_eq!(dashboard.view_state().active_tab, DashboardTab::Technical);
}

#[test]
fn seeded_fixture_drives_the_dashboard() {
    let config = DashboardConfig::from_json(r#"{"seed": 3, "default_time_range": "1"}"#).unwrap();
    let repository = RandomMarketData::from_seed_option(config.seed);
    let mut dashboard = DashboardCoordinator::new(repository, config);

    let snapshot = dashboard.refresh().unwrap();
    assert_eq!(snapshot.assets.len(), 8);
    assert_eq!(snapshot.summary.active_cryptocurrencies, 1000);

    assert_eq!(dashboard.history().unwrap().samples.len(), 24);
    assert_eq!(dashboard.visible_assets().len(), 8);
}

#[test]
fn failed_first_history_load_installs_nothing() {
    let market = ScriptedMarket::new(vec![default_roster()]).with_history_budget(0);
    let mut dashboard = DashboardCoordinator::new(market, DashboardConfig::default());

    let err = dashboard.refresh().err();
    assert_eq!(err, Some(DashboardError::InvalidSequence("feed down".to_string())));
    assert!(dashboard.market().is_none());
    assert!(dashboard.view_state().selected_asset.is_none());
    assert!(dashboard.history().is_none());
}

#[test]
fn failed_refresh_keeps_previous_snapshot() {
    let rosters = vec![default_roster(), vec![asset("solana", 50.0)]];
    let market = ScriptedMarket::new(rosters).with_history_budget(1);
    let mut dashboard = DashboardCoordinator::new(market, DashboardConfig::default());
    dashboard.refresh().unwrap();

    assert!(dashboard.refresh().is_err());
    assert_eq!(dashboard.market().unwrap().assets.len(), 3);
    assert_eq!(dashboard.view_state().selected_asset, Some(AssetId::from("bitcoin")));
}

#[test]
fn failed_selection_keeps_previous_selection() {
    let market = ScriptedMarket::new(vec![default_roster()]).with_history_budget(1);
    let mut dashboard = DashboardCoordinator::new(market, DashboardConfig::default());
    dashboard.refresh().unwrap();

    assert!(dashboard.select_asset(&AssetId::from("ethereum")).is_err());
    assert_eq!(dashboard.view_state().selected_asset, Some(AssetId::from("bitcoin")));
    assert_eq!(dashboard.history().unwrap().request.asset_id, AssetId::from("bitcoin"));
}

#[test]
fn failed_range_change_keeps_previous_range() {
    let market = ScriptedMarket::new(vec![default_roster()]).with_history_budget(1);
    let mut dashboard = DashboardCoordinator::new(market, DashboardConfig::default());
    dashboard.refresh().unwrap();

    assert!(dashboard.set_time_range(TimeRange::OneDay).is_err());
    assert_eq!(dashboard.view_state().time_range, TimeRange::SevenDays);
    assert_eq!(dashboard.history().unwrap().samples.len(), 7 * 24);
}

#[test]
fn range_without_selection_is_just_stored() {
    let mut dashboard = DashboardCoordinator::new(ScriptedMarket::new(Vec::new()), DashboardConfig::default());
    dashboard.set_time_range(TimeRange::NinetyDays).unwrap();
    assert_eq!(dashboard.view_state().time_range, TimeRange::NinetyDays);
    assert!(dashboard.history().is_none());
}
