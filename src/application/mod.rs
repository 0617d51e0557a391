pub mod asset_list;
pub mod config;
pub mod dashboard;
pub mod refresh;

pub use asset_list::*;
pub use config::*;
pub use dashboard::*;
pub use refresh::*;
