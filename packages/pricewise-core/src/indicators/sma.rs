//! Simple Moving Average (SMA) indicator.

/// Window used when no SMA window is configured.
pub const DEFAULT_SMA_WINDOW: usize = 20;

/// Calculate Simple Moving Average.
///
/// # Arguments
///
/// * `data` - Closing prices, oldest first. Non-finite values are treated as missing.
/// * `window` - Lookback window
///
/// # Returns
///
/// Vector of the same length as `data`. Element `i` is the mean of
/// `data[i + 1 - window..=i]`, or `None` when fewer than `window` closes exist
/// up to `i` or any close in that window is missing.
///
/// # Example
///
/// ```rust
/// use pricewise_core::indicators::sma;
///
/// let prices = vec![10.0, 11.0, 12.0, 11.0, 10.0];
/// let sma_values = sma(&prices, 3);
///
/// assert_eq!(sma_values[1], None);
/// // SMA at index 2 = (10 + 11 + 12) / 3 = 11.0
/// assert!((sma_values[2].unwrap() - 11.0).abs() < 0.001);
/// ```
pub fn sma(data: &[f64], window: usize) -> Vec<Option<f64>> {
    let n = data.len();
    let mut result = vec![None; n];

    if window == 0 || window > n {
        return result;
    }

    // Count of missing values in the window, plus the length of the run of
    // identical closes ending at `i`
    let mut missing = 0usize;
    let mut run = 0usize;

    for i in 0..n {
        if !data[i].is_finite() {
            missing += 1;
            run = 0;
        } else if i > 0 && data[i] == data[i - 1] {
            run += 1;
        } else {
            run = 1;
        }

        if i >= window && !data[i - window].is_finite() {
            missing -= 1;
        }

        if i + 1 < window || missing > 0 {
            continue;
        }

        // A window of identical closes averages to that close exactly
        result[i] = if run >= window {
            Some(data[i])
        } else {
            Some(compensated_sum(&data[i + 1 - window..=i]) / window as f64)
        };
    }

    result
}

/// Neumaier (compensated) summation.
fn compensated_sum(values: &[f64]) -> f64 {
    let mut sum = 0.0;
    let mut compensation = 0.0;

    for &v in values {
        let t = sum + v;
        if f64::abs(sum) >= f64::abs(v) {
            compensation += (sum - t) + v;
        } else {
            compensation += (v - t) + sum;
        }
        sum = t;
    }

    sum + compensation
}

/// Most recent SMA value, or `None` when the latest window is not full.
pub fn latest_sma(data: &[f64], window: usize) -> Option<f64> {
    sma(data, window).last().copied().flatten()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sma_basic() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = sma(&data, 3);

        assert_eq!(result.len(), 5);
        assert!(result[0].is_none());
        assert!(result[1].is_none());

        // SMA[2] = (1 + 2 + 3) / 3 = 2.0
        assert_relative_eq!(result[2].unwrap(), 2.0);
        // SMA[3] = (2 + 3 + 4) / 3 = 3.0
        assert_relative_eq!(result[3].unwrap(), 3.0);
        // SMA[4] = (3 + 4 + 5) / 3 = 4.0
        assert_relative_eq!(result[4].unwrap(), 4.0);
    }

    #[test]
    fn test_sma_window_1() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = sma(&data, 1);

        // Window 1 SMA should equal the data
        for i in 0..data.len() {
            assert_relative_eq!(result[i].unwrap(), data[i]);
        }
    }

    #[test]
    fn test_sma_shorter_than_window_is_all_missing() {
        for window in 4..30 {
            let data = vec![1.0, 2.0, 3.0];
            let result = sma(&data, window);
            assert_eq!(result.len(), 3);
            assert!(result.iter().all(|v| v.is_none()));
        }
    }

    #[test]
    fn test_sma_zero_window() {
        let result = sma(&[1.0, 2.0], 0);
        assert_eq!(result, vec![None, None]);
    }

    #[test]
    fn test_sma_constant_series() {
        for c in [37.31, 0.08, 0.1, 12.34, 49.99] {
            let data = vec![c; 60];

            for window in [1, 5, 20, 50, 60] {
                let result = sma(&data, window);
                for (i, value) in result.iter().enumerate() {
                    if i + 1 >= window {
                        assert_eq!(*value, Some(c), "c = {}, window = {}, i = {}", c, window, i);
                    } else {
                        assert!(value.is_none());
                    }
                }
            }
        }
    }

    #[test]
    fn test_sma_constant_tail_after_change() {
        let mut data = vec![5.0; 10];
        data.extend(vec![0.07; 25]);
        let result = sma(&data, 20);

        assert_eq!(result[34], Some(0.07));
        assert!(result[28].unwrap() > 0.07);
    }

    #[test]
    fn test_sma_large_value_leaves_no_residue() {
        let data = vec![1e16, 1.0, 1.0, 2.0];
        let result = sma(&data, 2);

        assert_eq!(result[2], Some(1.0));
        assert_eq!(result[3], Some(1.5));
    }

    #[test]
    fn test_sma_missing_close_poisons_its_windows() {
        let data = vec![1.0, 2.0, f64::NAN, 4.0, 5.0, 6.0];
        let result = sma(&data, 2);

        assert_relative_eq!(result[1].unwrap(), 1.5);
        assert!(result[2].is_none());
        assert!(result[3].is_none());
        // Window no longer holds the NaN
        assert_relative_eq!(result[4].unwrap(), 4.5);
        assert_relative_eq!(result[5].unwrap(), 5.5);
    }

    #[test]
    fn test_latest_sma() {
        let data: Vec<f64> = (1..=50).map(|i| i as f64).collect();

        // Mean of 31..=50
        assert_relative_eq!(latest_sma(&data, 20).unwrap(), 40.5);
        assert_relative_eq!(latest_sma(&data, 50).unwrap(), 25.5);
        assert!(latest_sma(&data, 51).is_none());
    }

    #[test]
    fn test_empty_data() {
        let data: Vec<f64> = vec![];
        assert!(sma(&data, 3).is_empty());
        assert!(latest_sma(&data, 3).is_none());
    }
}
