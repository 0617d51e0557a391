use derive_more::Display;

/// Errors raised by the dashboard core. Everything here is a caller mistake;
/// the core itself performs no I/O.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum DashboardError {
    #[display(fmt = "cannot summarize empty market")]
    EmptyMarket,
    #[display(fmt = "unsupported sort key: {}", _0)]
    UnsupportedSortKey(String),
    #[display(fmt = "unsupported sort order: {}", _0)]
    UnsupportedSortOrder(String),
    #[display(fmt = "unsupported time range: {}", _0)]
    UnsupportedTimeRange(String),
    #[display(fmt = "unsupported tab: {}", _0)]
    UnsupportedTab(String),
    #[display(fmt = "unknown asset: {}", _0)]
    UnknownAsset(String),
    #[display(fmt = "no asset selected")]
    NoAssetSelected,
    #[display(fmt = "invalid sample sequence: {}", _0)]
    InvalidSequence(String),
    #[display(fmt = "serialization failed: {}", _0)]
    Serialization(String),
}

impl std::error::Error for DashboardError {}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        DashboardError::Serialization(err.to_string())
    }
}

pub type DashboardResult<T> = Result<T, DashboardError>;
