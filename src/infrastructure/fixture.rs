use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::errors::DashboardResult;
use crate::domain::logging::LogComponent;
use crate::domain::market_data::{
    Asset, AssetId, MarketCap, MarketDataRepository, Price, SAMPLE_INTERVAL_MS, SAMPLES_PER_DAY, Sample, TimeRange,
    Timestamp, Volume,
};
use crate::log_debug;
use crate::time_utils::current_time_ms;

/// Points in each asset's 7-day sparkline.
pub const SPARKLINE_POINTS: usize = 168;

/// Fixed identity of one roster entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RosterEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub symbol: &'static str,
    pub glyph: &'static str,
}

/// Tracked roster, dominance reference first.
pub const ROSTER: [RosterEntry; 8] = [
    RosterEntry { id: "bitcoin", name: "Bitcoin", symbol: "BTC", glyph: "₿" },
    RosterEntry { id: "ethereum", name: "Ethereum", symbol: "ETH", glyph: "Ξ" },
    RosterEntry { id: "cardano", name: "Cardano", symbol: "ADA", glyph: "₳" },
    RosterEntry { id: "solana", name: "Solana", symbol: "SOL", glyph: "◎" },
    RosterEntry { id: "chainlink", name: "Chainlink", symbol: "LINK", glyph: "⬡" },
    RosterEntry { id: "polkadot", name: "Polkadot", symbol: "DOT", glyph: "●" },
    RosterEntry { id: "avalanche", name: "Avalanche", symbol: "AVAX", glyph: "▲" },
    RosterEntry { id: "polygon", name: "Polygon", symbol: "MATIC", glyph: "⬟" },
];

impl RosterEntry {
    fn populate<R: Rng>(&self, rng: &mut R) -> Asset {
        Asset {
            id: AssetId::from(self.id),
            symbol: self.symbol.to_string(),
            name: self.name.to_string(),
            image: self.glyph.to_string(),
            current_price: Price::from(rng.gen_range(100.0..50_100.0)),
            price_change_percentage_24h: rng.gen_range(-10.0..10.0),
            market_cap: MarketCap::from(rng.gen_range(0.0..5e11)),
            volume_24h: Volume::from(rng.gen_range(0.0..1e10)),
            circulating_supply: rng.gen_range(0.0..1e8),
            total_supply: Some(rng.gen_range(0.0..2e8)),
            max_supply: Some(rng.gen_range(0.0..3e8)),
            market_cap_rank: rng.gen_range(1..=100),
            sparkline_7d: (0..SPARKLINE_POINTS).map(|_| rng.gen_range(100.0..1_100.0)).collect(),
        }
    }
}

/// One asset per roster entry, market fields drawn independently.
pub fn generate_assets<R: Rng>(rng: &mut R) -> Vec<Asset> {
    ROSTER.iter().map(|entry| entry.populate(rng)).collect()
}

/// `days * 24` hourly samples ending one hour before `now_ms`. A clock
/// earlier than the window length is clamped so the window starts at the
/// epoch and timestamps stay distinct.
///
/// Every sample is drawn independently; there is no continuity between
/// neighbouring prices.
pub fn generate_history<R: Rng>(rng: &mut R, days: u32, now_ms: u64) -> Vec<Sample> {
    let count = days as usize * SAMPLES_PER_DAY;
    let end = now_ms.max(count as u64 * SAMPLE_INTERVAL_MS);
    (0..count)
        .map(|i| {
            let hours_back = (count - i) as u64;
            let timestamp = end - hours_back * SAMPLE_INTERVAL_MS;
            Sample::new(
                Timestamp::from_millis(timestamp),
                Price::from(rng.gen_range(20_000.0..30_000.0)),
                Volume::from(rng.gen_range(0.0..1e9)),
                MarketCap::from(rng.gen_range(0.0..5e11)),
            )
        })
        .collect()
}

/// Random stand-in for a live market feed
pub struct RandomMarketData<R: Rng = StdRng> {
    rng: R,
    clock: fn() -> u64,
}

impl RandomMarketData<StdRng> {
    /// Seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Reproducible source for demos and tests.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl<R: Rng> RandomMarketData<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng, clock: current_time_ms }
    }

    /// Replace the wall clock used to anchor history windows.
    pub fn with_clock(mut self, clock: fn() -> u64) -> Self {
        self.clock = clock;
        self
    }
}

impl<R: Rng> MarketDataRepository for RandomMarketData<R> {
    fn fetch_assets(&mut self) -> DashboardResult<Vec<Asset>> {
        let assets = generate_assets(&mut self.rng);
        log_debug!(LogComponent::Infrastructure("Fixture"), "generated {} assets", assets.len());
        Ok(assets)
    }

    fn fetch_history(&mut self, asset_id: &AssetId, range: TimeRange) -> DashboardResult<Vec<Sample>> {
        let samples = generate_history(&mut self.rng, range.days(), (self.clock)());
        log_debug!(
            LogComponent::Infrastructure("Fixture"),
            "generated {} samples for {} over {}d",
            samples.len(),
            asset_id,
            range.days()
        );
        Ok(samples)
    }
}
