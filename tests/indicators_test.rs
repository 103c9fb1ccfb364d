//! End-to-end indicator properties over realistic candle series.

use marketdeck::indicators::{IndicatorSet, bollinger_bands, ema, moving_average, rsi};

/// An oscillating series like the one the chart panel feeds the library.
fn oscillating(len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| match i % 3 {
            0 => 10.0,
            1 => 20.0,
            _ => 15.0,
        })
        .collect()
}

#[test]
fn bollinger_middle_equals_moving_average_over_same_window() {
    let closes = oscillating(60);
    let bands = bollinger_bands(&closes, 20, 2.0);
    let ma = moving_average(&closes, 20);
    // Both are the same 20-point mean, computed the same way: exact equality.
    assert_eq!(bands.middle, ma);
}

#[test]
fn rsi_neutral_below_fifteen_points() {
    for len in 0..15 {
        assert_eq!(rsi(&oscillating(len), 14), 50.0);
    }
}

#[test]
fn rsi_is_bounded() {
    for len in [15, 20, 50, 100] {
        let value = rsi(&oscillating(len), 14);
        assert!((0.0..=100.0).contains(&value), "rsi out of range: {value}");
    }
}

#[test]
fn ema_with_exact_period_length_is_bounded_by_series() {
    let closes = vec![10.0, 20.0, 15.0, 18.0, 12.0];
    let value = ema(&closes, 5);
    assert!(value >= 10.0);
    assert!(value <= 20.0);
}

#[test]
fn indicator_set_over_full_candle_window() {
    // 100 points, the chart panel's default request size.
    let closes = oscillating(100);
    let set = IndicatorSet::compute(&closes);

    assert!(set.bollinger.lower <= set.bollinger.middle);
    assert!(set.bollinger.middle <= set.bollinger.upper);
    assert_eq!(set.bollinger.middle, set.ma20);
    assert!((0.0..=100.0).contains(&set.rsi14));
    // Full history: the signal line comes from its own EMA.
    assert_eq!(set.macd.histogram, set.macd.macd - set.macd.signal);
}

#[test]
fn short_history_degrades_without_failing() {
    for len in 0..30 {
        let closes = oscillating(len);
        let set = IndicatorSet::compute(&closes);
        assert!(set.rsi14.is_finite());
        assert!(set.ma20.is_finite());
        assert!(set.bollinger.upper.is_finite());
        assert!(set.macd.macd.is_finite());
    }
}
