//! Range, clamping, and precision arithmetic shared by the state engines.
//!
//! ## Usage
//!
//! These helpers define the single source of truth for bound handling:
//! clamping, closed-interval membership, percent mapping, and decimal
//! rounding all behave the same across every widget state.

/// Constrains `value` into the closed interval `[min, max]`.
///
/// Implemented as `value.max(min).min(max)`, so when the bounds are
/// inverted (`min > max`) the max bound wins: `clamp(-8.0, -5.0, -10.0)`
/// returns `-10.0`. Callers that need a total-order-safe check should use
/// [`is_in_range`], which fails closed on inverted bounds.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if min > max {
        tracing::warn!(min, max, "clamp called with inverted bounds");
    }
    value.max(min).min(max)
}

/// Clamps an optional value, coercing a missing value to zero.
///
/// A `None` input short-circuits: it becomes `0.0` and is returned without
/// clamping into range, even when `0.0` lies outside `[min, max]`.
pub fn clamp_or_zero(value: Option<f64>, min: f64, max: f64) -> f64 {
    match value {
        Some(value) => clamp(value, min, max),
        None => 0.0,
    }
}

/// Returns whether `min <= value <= max`.
///
/// Inverted bounds (`min > max`) always report out-of-range.
pub fn is_in_range(value: f64, min: f64, max: f64) -> bool {
    min <= value && value <= max
}

/// Maps `value` within `[min, max]` onto a percentage in `[0, 100]`.
///
/// A degenerate interval (`max <= min`) maps everything to `0.0`.
pub fn value_to_percent(value: f64, min: f64, max: f64) -> f64 {
    if max <= min {
        return 0.0;
    }
    clamp(((value - min) * 100.0) / (max - min), 0.0, 100.0)
}

/// Maps a percentage in `[0, 100]` back onto a value within `[min, max]`.
pub fn percent_to_value(percent: f64, min: f64, max: f64) -> f64 {
    if max <= min {
        return min;
    }
    clamp(min + (percent / 100.0) * (max - min), min, max)
}

/// Rounds `value` to `digits` decimal places, half away from zero.
pub fn round_to_precision(value: f64, digits: u32) -> f64 {
    let factor = 10_f64.powi(digits as i32);
    (value * factor).round() / factor
}

/// Counts the decimal places of `step` as rendered by its shortest
/// decimal representation.
///
/// Used to derive a display precision when none is configured. Steps small
/// enough to render in scientific notation are not expected here.
pub fn count_decimal_places(step: f64) -> u32 {
    let text = format!("{step}");
    text.split_once('.')
        .map(|(_, fraction)| fraction.len() as u32)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_in_range_rejects_values_past_either_bound() {
        assert!(!is_in_range(100.0, 0.0, 50.0));
        assert!(is_in_range(50.0, 0.0, 50.0));
        assert!(!is_in_range(50.0, 0.0, 40.0));
    }

    #[test]
    fn is_in_range_fails_closed_on_inverted_bounds() {
        assert!(!is_in_range(50.0, 40.0, 0.0));
        assert!(!is_in_range(50.0, 100.0, 0.0));
    }

    #[test]
    fn clamp_constrains_into_the_interval() {
        assert_eq!(clamp(5.0, 0.0, 2.0), 2.0);
        assert_eq!(clamp(-5.0, 0.0, 2.0), 0.0);
        assert_eq!(clamp(2.0, 5.0, 8.0), 5.0);
        assert_eq!(clamp(6.0, 5.0, 8.0), 6.0);
        assert_eq!(clamp(6.0, -5.0, -2.0), -2.0);
    }

    #[test]
    fn clamp_is_idempotent() {
        let once = clamp(17.3, -2.0, 9.5);
        assert_eq!(clamp(once, -2.0, 9.5), once);
    }

    // Observed precedence, kept deliberately: with inverted bounds the max
    // bound is applied last and wins.
    #[test]
    fn clamp_lets_the_max_bound_win_when_bounds_are_inverted() {
        assert_eq!(clamp(-8.0, -5.0, -10.0), -10.0);
    }

    // A missing value coerces to zero and skips clamping entirely, so the
    // result may sit below min. Looks suspect but is load-bearing.
    #[test]
    fn clamp_or_zero_short_circuits_missing_values() {
        assert_eq!(clamp_or_zero(None, 1.0, 2.0), 0.0);
        assert_eq!(clamp_or_zero(Some(5.0), 0.0, 2.0), 2.0);
    }

    #[test]
    fn percent_mapping_round_trips_inside_the_range() {
        assert_eq!(value_to_percent(25.0, 0.0, 50.0), 50.0);
        assert_eq!(percent_to_value(50.0, 0.0, 50.0), 25.0);
        assert_eq!(value_to_percent(10.0, 10.0, 10.0), 0.0);
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        assert_eq!(round_to_precision(0.125, 2), 0.13);
        assert_eq!(round_to_precision(-0.125, 2), -0.13);
        assert_eq!(round_to_precision(1.954999, 2), 1.95);
    }

    #[test]
    fn decimal_places_follow_the_shortest_representation() {
        assert_eq!(count_decimal_places(1.0), 0);
        assert_eq!(count_decimal_places(0.65), 2);
        assert_eq!(count_decimal_places(0.5), 1);
    }
}
