//! Aggregation of daily bars into weekly or monthly bars.

use crate::types::{Interval, PriceBar};
use chrono::{Datelike, NaiveDate};

/// Bucket identity for a date: ISO week for weekly bars, calendar month for monthly.
fn bucket_key(date: NaiveDate, interval: Interval) -> (i32, u32) {
    match interval {
        Interval::Daily => (date.year(), date.ordinal()),
        Interval::Weekly => {
            let week = date.iso_week();
            (week.year(), week.week())
        }
        Interval::Monthly => (date.year(), date.month()),
    }
}

/// Aggregate date-ordered daily bars into `interval` bars.
///
/// Each output bar takes the first open, highest high, lowest low, last close
/// and summed volume of its bucket, stamped with the bucket's first date.
pub fn resample(bars: &[PriceBar], interval: Interval) -> Vec<PriceBar> {
    if interval == Interval::Daily {
        return bars.to_vec();
    }

    let mut result: Vec<PriceBar> = Vec::new();
    let mut current_key = None;

    for bar in bars {
        let key = bucket_key(bar.timestamp, interval);

        match result.last_mut() {
            Some(agg) if current_key == Some(key) => {
                agg.high = agg.high.max(bar.high);
                agg.low = agg.low.min(bar.low);
                agg.close = bar.close;
                agg.volume += bar.volume;
            }
            _ => {
                result.push(*bar);
                current_key = Some(key);
            }
        }
    }

    tracing::debug!(
        "resampled {} daily bars into {} {} bars",
        bars.len(),
        result.len(),
        interval
    );

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(y: i32, m: u32, d: u32, open: f64, high: f64, low: f64, close: f64) -> PriceBar {
        PriceBar::new(
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            open,
            high,
            low,
            close,
            100.0,
        )
    }

    #[test]
    fn test_daily_is_identity() {
        let bars = vec![bar(2024, 1, 2, 1.0, 2.0, 0.5, 1.5)];
        assert_eq!(resample(&bars, Interval::Daily), bars);
    }

    #[test]
    fn test_weekly_aggregation() {
        // 2024-01-01 is a Monday
        let bars = vec![
            bar(2024, 1, 1, 10.0, 11.0, 9.5, 10.5),
            bar(2024, 1, 3, 10.5, 12.0, 10.0, 11.5),
            bar(2024, 1, 5, 11.5, 11.8, 9.0, 9.8),
            bar(2024, 1, 8, 9.8, 10.2, 9.6, 10.0),
            bar(2024, 1, 9, 10.0, 10.4, 9.9, 10.3),
        ];

        let weekly = resample(&bars, Interval::Weekly);
        assert_eq!(weekly.len(), 2);

        let first = weekly[0];
        assert_eq!(first.timestamp, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(first.open, 10.0);
        assert_eq!(first.high, 12.0);
        assert_eq!(first.low, 9.0);
        assert_eq!(first.close, 9.8);
        assert_eq!(first.volume, 300.0);

        let second = weekly[1];
        assert_eq!(second.timestamp, NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());
        assert_eq!(second.close, 10.3);
        assert_eq!(second.volume, 200.0);
    }

    #[test]
    fn test_weekly_across_year_boundary() {
        // 2024-12-30 and 2025-01-02 fall in the same ISO week
        let bars = vec![
            bar(2024, 12, 30, 1.0, 1.0, 1.0, 1.0),
            bar(2025, 1, 2, 2.0, 2.0, 2.0, 2.0),
        ];
        assert_eq!(resample(&bars, Interval::Weekly).len(), 1);
        assert_eq!(resample(&bars, Interval::Monthly).len(), 2);
    }

    #[test]
    fn test_monthly_aggregation() {
        let bars = vec![
            bar(2024, 1, 30, 5.0, 6.0, 4.0, 5.5),
            bar(2024, 1, 31, 5.5, 7.0, 5.0, 6.5),
            bar(2024, 2, 1, 6.5, 6.6, 6.0, 6.1),
        ];

        let monthly = resample(&bars, Interval::Monthly);
        assert_eq!(monthly.len(), 2);
        assert_eq!(monthly[0].high, 7.0);
        assert_eq!(monthly[0].close, 6.5);
        assert_eq!(monthly[1].open, 6.5);
    }

    #[test]
    fn test_empty_input() {
        assert!(resample(&[], Interval::Monthly).is_empty());
    }
}
