//! Sample statistics over daily series
//!
//! Variances use the n-1 denominator throughout.

/// Calculate mean
#[inline]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample variance; needs at least two values
pub fn sample_variance(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = mean(values)?;
    let sum_sq_diff: f64 = values.iter().map(|x| (x - mean).powi(2)).sum();
    Some(sum_sq_diff / (values.len() - 1) as f64)
}

/// Sample standard deviation
pub fn std_dev(values: &[f64]) -> Option<f64> {
    sample_variance(values).map(f64::sqrt)
}

/// Trailing-window sample variance, aligned with the input
///
/// Position `i` holds the variance of `values[i + 1 - window..=i]`; the first
/// `window - 1` positions have no full window and are `None`.
pub fn rolling_variance(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let window = window.max(1);
    (0..values.len())
        .map(|i| {
            if i + 1 < window {
                None
            } else {
                sample_variance(&values[i + 1 - window..=i])
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0, 5.0]), Some(3.0));
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_sample_variance() {
        // Sample variance of [1,2,3,4,5] = 2.5
        assert_relative_eq!(sample_variance(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap(), 2.5);
        assert_eq!(sample_variance(&[7.0]), None);
        assert_eq!(sample_variance(&[3.0, 3.0, 3.0]), Some(0.0));
    }

    #[test]
    fn test_std_dev() {
        assert_relative_eq!(std_dev(&[2.0, 4.0]).unwrap(), 2.0_f64.sqrt());
    }

    #[test]
    fn test_rolling_variance_alignment() {
        let rolling = rolling_variance(&[1.0, 2.0, 3.0, 10.0], 3);
        assert_eq!(rolling.len(), 4);
        assert_eq!(rolling[0], None);
        assert_eq!(rolling[1], None);
        assert_relative_eq!(rolling[2].unwrap(), 1.0);
        // [2, 3, 10]: mean 5, squared deviations 9 + 4 + 25 = 38, / 2
        assert_relative_eq!(rolling[3].unwrap(), 19.0);
    }

    #[test]
    fn test_rolling_variance_short_series() {
        assert!(rolling_variance(&[1.0, 2.0], 14).iter().all(Option::is_none));
    }
}
