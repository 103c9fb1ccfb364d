//! Technical indicators computed over closing-price series.
//!
//! All functions are pure and stateless: they take an ordered slice of
//! closes (oldest first) and return plain numbers. Undersized input never
//! errors; every function degrades to a documented fallback so panels with
//! short history still render something sensible.
//!
//! The RSI here is the single-window variant: average gain and loss are
//! taken over the first `period` deltas only, with no Wilder smoothing
//! across the rest of the series. Downstream displays depend on these exact
//! values, so the variant is kept as-is rather than replaced with the
//! textbook formula.

/// Bollinger band triple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// MACD line, signal line, and their difference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Macd {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// The full indicator readout shown on the chart panel.
///
/// Derived values only: recomputed from scratch on every new candle series,
/// never updated incrementally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorSet {
    pub rsi14: f64,
    pub ma20: f64,
    pub bollinger: BollingerBands,
    pub macd: Macd,
}

impl IndicatorSet {
    /// Computes the standard panel indicators from a close series.
    #[must_use]
    pub fn compute(closes: &[f64]) -> Self {
        Self {
            rsi14: rsi(closes, 14),
            ma20: moving_average(closes, 20),
            bollinger: bollinger_bands(closes, 20, 2.0),
            macd: macd(closes, 12, 26, 9),
        }
    }
}

/// Relative Strength Index over the first `period` deltas.
///
/// Returns the neutral value `50.0` when fewer than `period + 1` closes are
/// available, and `100.0` when the window contains gains but no losses.
#[must_use]
pub fn rsi(closes: &[f64], period: usize) -> f64 {
    if period == 0 || closes.len() < period + 1 {
        return 50.0;
    }

    let mut gain_sum = 0.0;
    let mut loss_sum = 0.0;
    for pair in closes.windows(2).take(period) {
        let delta = pair[1] - pair[0];
        if delta >= 0.0 {
            gain_sum += delta;
        } else {
            loss_sum -= delta;
        }
    }

    let avg_gain = gain_sum / period as f64;
    let avg_loss = loss_sum / period as f64;

    if avg_loss == 0.0 {
        return if avg_gain > 0.0 { 100.0 } else { 50.0 };
    }

    100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
}

/// Simple arithmetic mean of the last `period` closes.
///
/// With fewer than `period` values the whole series is averaged instead.
#[must_use]
pub fn moving_average(closes: &[f64], period: usize) -> f64 {
    if closes.is_empty() {
        return 0.0;
    }
    let window = tail(closes, period);
    window.iter().sum::<f64>() / window.len() as f64
}

/// Bollinger bands as `(upper, middle, lower)`.
///
/// The middle band is the mean of the last `period` closes (or all of them
/// when the series is shorter); the outer bands sit `num_std` population
/// standard deviations away. A window of one value has zero deviation.
#[must_use]
pub fn bollinger_bands(closes: &[f64], period: usize, num_std: f64) -> BollingerBands {
    if closes.is_empty() {
        return BollingerBands {
            upper: 0.0,
            middle: 0.0,
            lower: 0.0,
        };
    }

    let window = tail(closes, period);
    let middle = window.iter().sum::<f64>() / window.len() as f64;
    let std_dev = if window.len() <= 1 {
        0.0
    } else {
        let variance = window
            .iter()
            .map(|close| {
                let diff = close - middle;
                diff * diff
            })
            .sum::<f64>()
            / window.len() as f64;
        variance.sqrt()
    };

    BollingerBands {
        upper: middle + num_std * std_dev,
        middle,
        lower: middle - num_std * std_dev,
    }
}

/// MACD over the whole series.
///
/// Returns all zeros when fewer than `slow` closes exist. When the series
/// is shorter than `slow + signal` the signal line equals the MACD line;
/// this degenerate case is intentional so callers with short history see a
/// zero histogram rather than a spurious crossover.
#[must_use]
pub fn macd(closes: &[f64], fast: usize, slow: usize, signal: usize) -> Macd {
    if closes.len() < slow {
        return Macd {
            macd: 0.0,
            signal: 0.0,
            histogram: 0.0,
        };
    }

    let macd_line = ema(closes, fast) - ema(closes, slow);
    let signal_line = if closes.len() < slow + signal {
        macd_line
    } else {
        ema(closes, signal)
    };

    Macd {
        macd: macd_line,
        signal: signal_line,
        histogram: macd_line - signal_line,
    }
}

/// Exponential moving average seeded with the first element.
///
/// With fewer than `period` values this falls back to the plain mean.
/// Otherwise the multiplier `2 / (period + 1)` is applied iteratively
/// across every remaining element in order.
#[must_use]
pub fn ema(closes: &[f64], period: usize) -> f64 {
    if closes.is_empty() {
        return 0.0;
    }
    if closes.len() < period {
        return closes.iter().sum::<f64>() / closes.len() as f64;
    }

    let multiplier = 2.0 / (period as f64 + 1.0);
    let mut value = closes[0];
    for close in &closes[1..] {
        value = close * multiplier + value * (1.0 - multiplier);
    }
    value
}

/// Last `period` elements of `closes`, or all of them when shorter.
fn tail(closes: &[f64], period: usize) -> &[f64] {
    let start = closes.len().saturating_sub(period.max(1));
    &closes[start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn rsi_returns_neutral_on_short_series() {
        for len in 0..15 {
            let closes: Vec<f64> = (0..len).map(|i| 100.0 + i as f64).collect();
            assert_close(rsi(&closes, 14), 50.0);
        }
    }

    #[test]
    fn rsi_returns_hundred_when_first_window_only_gains() {
        let closes: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        assert_close(rsi(&closes, 14), 100.0);
    }

    #[test]
    fn rsi_returns_neutral_when_first_window_is_flat() {
        let closes = vec![100.0; 20];
        assert_close(rsi(&closes, 14), 50.0);
    }

    #[test]
    fn rsi_mixed_window_matches_formula() {
        // First 14 deltas: +2 seven times, -1 seven times.
        let mut closes = vec![100.0];
        for i in 0..14 {
            let delta = if i % 2 == 0 { 2.0 } else { -1.0 };
            closes.push(closes[closes.len() - 1] + delta);
        }
        let avg_gain = 14.0 / 14.0;
        let avg_loss = 7.0 / 14.0;
        let expected = 100.0 - 100.0 / (1.0 + avg_gain / avg_loss);
        assert_close(rsi(&closes, 14), expected);
    }

    #[test]
    fn rsi_ignores_deltas_beyond_first_window() {
        // Identical first 15 closes; wildly different tails.
        let mut steady = vec![100.0];
        for i in 0..14 {
            steady.push(100.0 + (i % 3) as f64);
        }
        let mut crashed = steady.clone();
        steady.extend([200.0, 300.0]);
        crashed.extend([1.0, 0.5]);
        assert_close(rsi(&steady, 14), rsi(&crashed, 14));
    }

    #[test]
    fn moving_average_short_series_averages_everything() {
        let closes = vec![10.0, 20.0, 30.0];
        assert_close(moving_average(&closes, 20), 20.0);
    }

    #[test]
    fn moving_average_uses_last_period_values() {
        let closes = vec![1000.0, 10.0, 20.0, 30.0];
        assert_close(moving_average(&closes, 3), 20.0);
    }

    #[test]
    fn bollinger_bands_are_ordered() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + (i % 7) as f64 * 3.0).collect();
        let bands = bollinger_bands(&closes, 20, 2.0);
        assert!(bands.lower <= bands.middle);
        assert!(bands.middle <= bands.upper);
    }

    #[test]
    fn bollinger_middle_equals_moving_average() {
        let closes: Vec<f64> = (0..25)
            .map(|i| if i % 2 == 0 { 10.0 } else { 20.0 })
            .collect();
        let bands = bollinger_bands(&closes, 20, 2.0);
        assert_close(bands.middle, moving_average(&closes, 20));
    }

    #[test]
    fn bollinger_single_value_has_zero_width() {
        let bands = bollinger_bands(&[42.0], 20, 2.0);
        assert_close(bands.upper, 42.0);
        assert_close(bands.middle, 42.0);
        assert_close(bands.lower, 42.0);
    }

    #[test]
    fn ema_short_series_is_plain_mean() {
        let closes = vec![10.0, 20.0];
        assert_close(ema(&closes, 5), 15.0);
    }

    #[test]
    fn ema_stays_within_series_bounds() {
        let closes = vec![10.0, 30.0, 20.0, 25.0, 15.0];
        let value = ema(&closes, 5);
        assert!(value >= 10.0 && value <= 30.0, "ema out of bounds: {value}");
    }

    #[test]
    fn ema_seeds_with_first_element() {
        // period == len: seed 10, one step toward 20 with k = 2/3.
        let value = ema(&[10.0, 20.0], 2);
        assert_close(value, 10.0 + (20.0 - 10.0) * (2.0 / 3.0));
    }

    #[test]
    fn macd_zero_below_slow_period() {
        let closes: Vec<f64> = (0..25).map(|i| 100.0 + i as f64).collect();
        let result = macd(&closes, 12, 26, 9);
        assert_close(result.macd, 0.0);
        assert_close(result.signal, 0.0);
        assert_close(result.histogram, 0.0);
    }

    #[test]
    fn macd_degenerate_signal_equals_macd_line() {
        // len in [slow, slow + signal): signal mirrors the macd line.
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + (i as f64).sin()).collect();
        let result = macd(&closes, 12, 26, 9);
        assert_close(result.signal, result.macd);
        assert_close(result.histogram, 0.0);
    }

    #[test]
    fn macd_full_series_uses_signal_ema() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + (i % 5) as f64).collect();
        let result = macd(&closes, 12, 26, 9);
        let expected_macd = ema(&closes, 12) - ema(&closes, 26);
        let expected_signal = ema(&closes, 9);
        assert_close(result.macd, expected_macd);
        assert_close(result.signal, expected_signal);
        assert_close(result.histogram, expected_macd - expected_signal);
    }

    #[test]
    fn indicator_set_matches_component_functions() {
        let closes: Vec<f64> = (0..50)
            .map(|i| if i % 2 == 0 { 10.0 } else { 20.0 })
            .collect();
        let set = IndicatorSet::compute(&closes);
        assert_close(set.rsi14, rsi(&closes, 14));
        assert_close(set.ma20, moving_average(&closes, 20));
        assert_close(set.bollinger.middle, set.ma20);
        assert_close(set.macd.macd, macd(&closes, 12, 26, 9).macd);
    }
}
