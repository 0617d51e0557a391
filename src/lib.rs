use wasm_bindgen::prelude::*;

use crate::domain::logging::{LogComponent, get_logger};

pub mod application;
pub mod domain;
pub mod format_utils;
pub mod infrastructure;
pub mod presentation;
pub mod time_utils;
pub mod view_state;

pub use application::asset_list::select_and_sort;
pub use domain::market_data::{compute_indicators, compute_market_summary};
pub use format_utils::{format_market_cap, format_price};

/// Module start hook: panic messages and the wall clock. The console logger
/// is installed by the first `DashboardApi`, which knows the wanted level.
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();
    domain::logging::init_time_provider(Box::new(infrastructure::SystemTimeProvider));

    get_logger().info(LogComponent::Presentation("Initialize"), "Dashboard core loaded");
}
