//! Reductions over duration and interval columns
//!
//! All reductions skip NaN values, matching how the host's table library
//! treats missing cells.

/// Seconds in one hour
pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Decimal places kept in every result column
pub const ROUND_DECIMALS: i32 = 3;

fn present(values: &[f64]) -> impl Iterator<Item = f64> + '_ {
    values.iter().copied().filter(|v| !v.is_nan())
}

/// Sum of the non-NaN values; 0 when there are none
pub fn sum(values: &[f64]) -> f64 {
    present(values).sum()
}

/// Arithmetic mean of the non-NaN values; NaN when there are none
pub fn mean(values: &[f64]) -> f64 {
    let n = present(values).count();
    if n == 0 {
        return f64::NAN;
    }
    sum(values) / n as f64
}

/// Sample standard deviation (n - 1 denominator) of the non-NaN values.
///
/// NaN when fewer than two values are present.
pub fn sample_std_dev(values: &[f64]) -> f64 {
    let n = present(values).count();
    if n < 2 {
        return f64::NAN;
    }
    let avg = mean(values);
    let variance = present(values).map(|x| (x - avg).powi(2)).sum::<f64>() / (n - 1) as f64;
    variance.sqrt()
}

/// Convert seconds to hours
pub fn to_hours(seconds: f64) -> f64 {
    seconds / SECONDS_PER_HOUR
}

/// Round to [`ROUND_DECIMALS`] places, ties to even. NaN stays NaN.
pub fn round(value: f64) -> f64 {
    let scale = 10f64.powi(ROUND_DECIMALS);
    (value * scale).round_ties_even() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_skips_nan() {
        assert_eq!(sum(&[1.0, f64::NAN, 2.5]), 3.5);
        assert_eq!(sum(&[]), 0.0);
        assert_eq!(sum(&[f64::NAN]), 0.0);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[10.0, 20.0]), 15.0);
        assert_eq!(mean(&[10.0, f64::NAN, 20.0]), 15.0);
        assert!(mean(&[]).is_nan());
        assert!(mean(&[f64::NAN, f64::NAN]).is_nan());
    }

    #[test]
    fn test_sample_std_dev() {
        // sqrt(((10-15)^2 + (20-15)^2) / 1)
        let sd = sample_std_dev(&[10.0, 20.0]);
        assert!((sd - 50f64.sqrt()).abs() < 1e-12);

        let sd = sample_std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((sd - 2.138_089_935).abs() < 1e-6);

        assert_eq!(sample_std_dev(&[3.0, 3.0, 3.0]), 0.0);
    }

    #[test]
    fn test_sample_std_dev_needs_two_values() {
        assert!(sample_std_dev(&[]).is_nan());
        assert!(sample_std_dev(&[42.0]).is_nan());
        assert!(sample_std_dev(&[42.0, f64::NAN]).is_nan());
    }

    #[test]
    fn test_round() {
        assert_eq!(round(30.0 / 3600.0), 0.008);
        assert_eq!(round(15.0 / 3600.0), 0.004);
        assert_eq!(round(66.666_666), 66.667);
        assert_eq!(round(0.0), 0.0);
        assert!(round(f64::NAN).is_nan());
    }

    #[test]
    fn test_round_ties_to_even() {
        assert_eq!(round(1.0625), 1.062);
        assert_eq!(round(1.1875), 1.188);
    }

    #[test]
    fn test_to_hours() {
        assert_eq!(to_hours(7200.0), 2.0);
        assert_eq!(to_hours(0.0), 0.0);
    }
}
