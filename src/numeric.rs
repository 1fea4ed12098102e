/// Rounds a value to two decimal places, rejecting NaN and infinities.
pub fn round2(value: f64) -> Option<f64> {
    if !value.is_finite() {
        return None;
    }
    Some((value * 100.0).round() / 100.0)
}

/// Percent change from `prev` to `curr`, rounded to two decimals.
///
/// Returns 0.0 when there is no usable baseline (absent, zero or non-finite
/// previous value), so a missing baseline never surfaces as an error.
pub fn percent_change(curr: f64, prev: Option<f64>) -> f64 {
    let Some(prev) = prev else {
        return 0.0;
    };
    if prev == 0.0 || !prev.is_finite() || !curr.is_finite() {
        return 0.0;
    }
    round2(100.0 * (curr - prev) / prev).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::{percent_change, round2};

    #[test]
    fn round2_truncates_to_two_decimals() {
        assert_eq!(round2(83.119_9), Some(83.12));
        assert_eq!(round2(-1.005), Some(-1.0));
        assert_eq!(round2(0.0), Some(0.0));
    }

    #[test]
    fn round2_rejects_non_finite_values() {
        assert_eq!(round2(f64::NAN), None);
        assert_eq!(round2(f64::INFINITY), None);
        assert_eq!(round2(f64::NEG_INFINITY), None);
    }

    #[test]
    fn round2_is_idempotent() {
        for value in [83.119, -0.004_9, 1234.567, 0.125] {
            let once = round2(value).unwrap();
            assert_eq!(round2(once), Some(once));
        }
    }

    #[test]
    fn percent_change_guards_missing_or_zero_baseline() {
        assert_eq!(percent_change(50.0, None), 0.0);
        assert_eq!(percent_change(50.0, Some(0.0)), 0.0);
        assert_eq!(percent_change(50.0, Some(f64::NAN)), 0.0);
        assert_eq!(percent_change(f64::NAN, Some(10.0)), 0.0);
    }

    #[test]
    fn percent_change_rounds_day_over_day_moves() {
        assert_eq!(percent_change(100.0, Some(90.0)), 11.11);
        assert_eq!(percent_change(84.0, Some(80.0)), 5.0);
        assert_eq!(percent_change(80.0, Some(100.0)), -20.0);
    }
}
