//! Numeric helpers shared by the summary, correlation and outlier passes

/// Compensated (Neumaier) sum, so the mean does not drift with input order
pub fn sum(values: &[f64]) -> f64 {
    let mut total = 0.0_f64;
    let mut compensation = 0.0_f64;
    for &v in values {
        let t = total + v;
        if total.abs() >= v.abs() {
            compensation += (total - t) + v;
        } else {
            compensation += (v - t) + total;
        }
        total = t;
    }
    total + compensation
}

/// Arithmetic mean, `None` for an empty slice
///
/// Finite inputs whose sum overflows are averaged from pre-scaled terms,
/// so the mean stays finite.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let total = sum(values);
    if total.is_finite() {
        return Some(total / n);
    }
    let scaled: Vec<f64> = values.iter().map(|v| v / n).collect();
    Some(sum(&scaled))
}

/// True when every value equals the first one (zero variance)
pub fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}

/// Sample standard deviation (n - 1 denominator)
///
/// Returns `None` with fewer than two values or when the column is constant.
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 || is_constant(values) {
        return None;
    }
    let m = mean(values)?;
    let squares: Vec<f64> = values.iter().map(|v| (v - m) * (v - m)).collect();
    let sd = (sum(&squares) / (values.len() - 1) as f64).sqrt();
    (sd > 0.0 && sd.is_finite()).then_some(sd)
}

/// Pearson product-moment correlation
///
/// `None` when the slices differ in length, hold fewer than two points,
/// or either side has zero variance.
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 || is_constant(x) || is_constant(y) {
        return None;
    }

    let mx = mean(x)?;
    let my = mean(y)?;

    let cross: Vec<f64> = x.iter().zip(y).map(|(a, b)| (a - mx) * (b - my)).collect();
    let dx: Vec<f64> = x.iter().map(|a| (a - mx) * (a - mx)).collect();
    let dy: Vec<f64> = y.iter().map(|b| (b - my) * (b - my)).collect();

    let denom = (sum(&dx) * sum(&dy)).sqrt();
    if denom <= 0.0 || !denom.is_finite() {
        return None;
    }

    let r = sum(&cross) / denom;
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[2.0, 4.0, 6.0]), Some(4.0));
    }

    #[test]
    fn test_mean_of_huge_values_stays_finite() {
        assert_eq!(mean(&[1e308, 1e308]), Some(1e308));
        let neg = mean(&[-1e308, -1e308, -1e308]).unwrap();
        assert!(((neg + 1e308) / 1e308).abs() < 1e-15);
        let m = mean(&[f64::MAX, f64::MAX, 0.0]).unwrap();
        assert!(m.is_finite());
    }

    #[test]
    fn test_compensated_sum_is_order_stable() {
        let a = [1e16, 1.0, -1e16, 1.0];
        let b = [1.0, 1.0, 1e16, -1e16];
        assert_eq!(sum(&a), 2.0);
        assert_eq!(sum(&b), 2.0);
    }

    #[test]
    fn test_sample_std_dev() {
        // Sample variance of 2,4,4,4,5,5,7,9 is 32/7
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let sd = sample_std_dev(&v).unwrap();
        assert!((sd - (32.0_f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_std_dev_degenerate() {
        assert_eq!(sample_std_dev(&[5.0]), None);
        assert_eq!(sample_std_dev(&[0.1, 0.1, 0.1]), None);
    }

    #[test]
    fn test_pearson_linear() {
        let t = [80.0, 120.0, 200.0, 310.0];
        let p: Vec<f64> = t.iter().map(|v| 2.5 * v).collect();
        let r = pearson(&t, &p).unwrap();
        assert!((r - 1.0).abs() < 1e-12);

        let n: Vec<f64> = t.iter().map(|v| -v).collect();
        assert!((pearson(&t, &n).unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_undefined() {
        assert_eq!(pearson(&[1.0, 2.0], &[3.0, 3.0]), None);
        assert_eq!(pearson(&[1.0], &[3.0]), None);
        assert_eq!(pearson(&[1.0, 2.0], &[3.0]), None);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(3.14159, 2), 3.14);
        assert_eq!(round_to(-0.875, 1), -0.9);
    }
}
