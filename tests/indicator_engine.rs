use market_dashboard_wasm::domain::market_data::{
    IndicatorEngine, MarketCap, Price, Sample, Strength, Timestamp, Trend, Volume, compute_indicators,
};
use quickcheck_macros::quickcheck;

fn sample(hour: u64, price: f64, volume: f64) -> Sample {
    Sample::new(Timestamp::from(hour * 3_600_000), Price::from(price), Volume::from(volume), MarketCap::from(price * 1e6))
}

fn series(prices: impl IntoIterator<Item = f64>) -> Vec<Sample> {
    prices.into_iter().enumerate().map(|(i, p)| sample(i as u64, p, 1.0)).collect()
}

#[test]
fn nineteen_samples_yield_nothing() {
    let samples = series((1..=19).map(f64::from));
    assert!(compute_indicators(&samples).is_none());
}

#[test]
fn twenty_samples_yield_a_snapshot() {
    let samples = series((1..=20).map(f64::from));
    assert!(compute_indicators(&samples).is_some());
}

#[test]
fn sma20_averages_the_tail() {
    let samples = series((1..=25).map(f64::from));
    let snapshot = compute_indicators(&samples).unwrap();
    assert_eq!(snapshot.sma20, 15.5);
}

#[test]
fn sma50_shrinks_to_available_history() {
    let samples = series((1..=30).map(f64::from));
    let snapshot = compute_indicators(&samples).unwrap();
    assert_eq!(snapshot.sma50, 15.5);
    assert_eq!(snapshot.sma20, 20.5);
    assert_eq!(snapshot.trend, Trend::Bullish);
}

#[test]
fn sma50_uses_only_the_last_fifty() {
    let samples = series((1..=60).map(f64::from));
    let snapshot = compute_indicators(&samples).unwrap();
    assert_eq!(snapshot.sma50, 35.5);
    assert_eq!(snapshot.sma20, 50.5);
    assert_eq!(snapshot.trend, Trend::Bullish);
}

#[test]
fn rising_series_does_not_saturate_rsi() {
    // every delta is +2, so avg gain 2 over a substituted loss of 1
    let samples = series((1..=25).map(|i| f64::from(i) * 2.0));
    let snapshot = compute_indicators(&samples).unwrap();
    let expected = 100.0 - 100.0 / 3.0;
    assert!((snapshot.rsi - expected).abs() < 1e-9);
    assert!(snapshot.rsi < 100.0);
    assert_eq!(snapshot.strength, Strength::Neutral);
}

#[test]
fn flat_series_is_bearish_and_oversold() {
    let samples = series(std::iter::repeat_n(10.0, 40));
    let snapshot = compute_indicators(&samples).unwrap();
    assert_eq!(snapshot.sma20, snapshot.sma50);
    assert_eq!(snapshot.trend, Trend::Bearish);
    assert_eq!(snapshot.rsi, 0.0);
    assert_eq!(snapshot.strength, Strength::Oversold);
}

#[test]
fn falling_series_is_oversold() {
    let samples = series((1..=30).rev().map(f64::from));
    let snapshot = compute_indicators(&samples).unwrap();
    assert!(snapshot.rsi < 30.0);
    assert_eq!(snapshot.strength, Strength::Oversold);
    assert_eq!(snapshot.trend, Trend::Bearish);
}

#[test]
fn volume_ratio_compares_last_to_mean() {
    let mut samples: Vec<Sample> = (0..20).map(|i| sample(i, 1.0, 1.0)).collect();
    samples[19].volume = Volume::from(3.0);
    let snapshot = compute_indicators(&samples).unwrap();
    assert!((snapshot.volume_ratio - 3.0 / 1.1).abs() < 1e-12);
}

#[test]
fn zero_volume_gives_zero_ratio() {
    assert_eq!(IndicatorEngine::volume_ratio(&[0.0; 20]), 0.0);
}

#[quickcheck]
fn rsi_stays_in_range(prices: Vec<u16>) -> bool {
    let prices: Vec<f64> = prices.into_iter().map(f64::from).collect();
    let rsi = IndicatorEngine::relative_strength_index(&prices);
    (0.0..100.0).contains(&rsi)
}

#[quickcheck]
fn presence_follows_length(len: u8) -> bool {
    let samples = series((0..len).map(f64::from));
    compute_indicators(&samples).is_some() == (len as usize >= 20)
}
