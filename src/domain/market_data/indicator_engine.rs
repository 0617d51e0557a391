use super::{IndicatorSnapshot, Sample, Strength, Trend};

/// Fewer samples than this yield no indicators at all.
pub const INDICATOR_MIN_SAMPLES: usize = 20;
pub const SMA_SHORT_PERIOD: usize = 20;
pub const SMA_LONG_PERIOD: usize = 50;
pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const RSI_OVERSOLD: f64 = 30.0;

/// Stateless technical-indicator calculator over a sample window
#[derive(Debug, Clone, Copy, Default)]
pub struct IndicatorEngine;

impl IndicatorEngine {
    pub fn new() -> Self {
        Self
    }

    /// Indicator snapshot for `samples`, or `None` below [`INDICATOR_MIN_SAMPLES`].
    pub fn compute(&self, samples: &[Sample]) -> Option<IndicatorSnapshot> {
        if samples.len() < INDICATOR_MIN_SAMPLES {
            return None;
        }

        let prices: Vec<f64> = samples.iter().map(|s| s.price.value()).collect();
        let volumes: Vec<f64> = samples.iter().map(|s| s.volume.value()).collect();

        let sma20 = Self::tail_mean(&prices, SMA_SHORT_PERIOD);
        // The long average shrinks its window to whatever history exists.
        let sma50 = Self::tail_mean(&prices, SMA_LONG_PERIOD);
        let rsi = Self::relative_strength_index(&prices);
        let volume_ratio = Self::volume_ratio(&volumes);

        Some(IndicatorSnapshot {
            sma20,
            sma50,
            rsi,
            volume_ratio,
            trend: Self::classify_trend(sma20, sma50),
            strength: Self::classify_strength(rsi),
        })
    }

    /// Mean of the last `min(period, len)` values; 0 for an empty slice.
    pub fn tail_mean(values: &[f64], period: usize) -> f64 {
        let window = period.min(values.len());
        if window == 0 {
            return 0.0;
        }
        values[values.len() - window..].iter().sum::<f64>() / window as f64
    }

    /// RSI over every successive delta of `prices`.
    ///
    /// Gains and losses are averaged separately over their own counts. A
    /// zero average loss is replaced by 1 in the denominator, so a
    /// strictly rising series gives `100 - 100 / (1 + avg_gain)` rather
    /// than 100.
    pub fn relative_strength_index(prices: &[f64]) -> f64 {
        let (mut gain_sum, mut gain_count) = (0.0, 0usize);
        let (mut loss_sum, mut loss_count) = (0.0, 0usize);

        for pair in prices.windows(2) {
            let delta = pair[1] - pair[0];
            if delta > 0.0 {
                gain_sum += delta;
                gain_count += 1;
            } else if delta < 0.0 {
                loss_sum += -delta;
                loss_count += 1;
            }
        }

        let avg_gain = if gain_count == 0 { 0.0 } else { gain_sum / gain_count as f64 };
        let avg_loss = if loss_count == 0 { 0.0 } else { loss_sum / loss_count as f64 };
        let rs = avg_gain / if avg_loss == 0.0 { 1.0 } else { avg_loss };

        100.0 - 100.0 / (1.0 + rs)
    }

    /// Last volume over mean volume; 0 when the mean is 0.
    pub fn volume_ratio(volumes: &[f64]) -> f64 {
        let Some(&current) = volumes.last() else {
            return 0.0;
        };
        let average = volumes.iter().sum::<f64>() / volumes.len() as f64;
        if average == 0.0 { 0.0 } else { current / average }
    }

    pub fn classify_trend(sma_short: f64, sma_long: f64) -> Trend {
        if sma_short > sma_long { Trend::Bullish } else { Trend::Bearish }
    }

    pub fn classify_strength(rsi: f64) -> Strength {
        if rsi > RSI_OVERBOUGHT {
            Strength::Overbought
        } else if rsi < RSI_OVERSOLD {
            Strength::Oversold
        } else {
            Strength::Neutral
        }
    }
}

/// Convenience wrapper around [`IndicatorEngine::compute`].
pub fn compute_indicators(samples: &[Sample]) -> Option<IndicatorSnapshot> {
    IndicatorEngine::new().compute(samples)
}
