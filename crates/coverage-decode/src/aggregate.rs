//! Daily aggregation of decoded time series.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::series::TimeSeriesPoint;

/// Reduction of one UTC calendar day of samples.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyAggregate {
    /// The UTC calendar date of the bucket.
    pub date: NaiveDate,

    /// Minimum over the day's non-null samples.
    pub min: f64,

    /// Maximum over the day's non-null samples.
    pub max: f64,

    /// Mean over the day's non-null samples.
    pub mean: f64,

    /// Most frequent non-null categorical value for the day, when a
    /// categorical parameter was requested. Ties go to the value seen
    /// first chronologically.
    pub modal_category: Option<f64>,
}

#[derive(Default)]
struct DayBucket {
    min: f64,
    max: f64,
    sum: f64,
    count: usize,
    /// (value, occurrences), in first-seen order.
    categories: Vec<(f64, usize)>,
}

/// Group a series by UTC calendar day and reduce each day to
/// min/max/mean of `parameter`, plus optionally the modal value of
/// `categorical` (e.g., a weather-condition code).
///
/// Bucketing uses the UTC date of each timestamp, never local time -
/// shifting the boundary would move hours near midnight into the wrong
/// day. Output is ordered by ascending date, each date once. Days where
/// every sample of `parameter` is null are omitted; days with at least one
/// numeric sample aggregate over the non-null subset only. Truncation to
/// the first N days is the caller's concern.
pub fn aggregate_by_day(
    points: &[TimeSeriesPoint],
    parameter: &str,
    categorical: Option<&str>,
) -> Vec<DailyAggregate> {
    let mut buckets: BTreeMap<NaiveDate, DayBucket> = BTreeMap::new();

    for point in points {
        let Some(date) = utc_date(&point.time) else {
            warn!(time = %point.time, "skipping sample with unparseable timestamp");
            continue;
        };
        let bucket = buckets.entry(date).or_default();

        if let Some(value) = point.value(parameter) {
            if bucket.count == 0 {
                bucket.min = value;
                bucket.max = value;
            } else {
                bucket.min = bucket.min.min(value);
                bucket.max = bucket.max.max(value);
            }
            bucket.sum += value;
            bucket.count += 1;
        }

        if let Some(code) = categorical.and_then(|name| point.value(name)) {
            match bucket.categories.iter_mut().find(|(v, _)| *v == code) {
                Some((_, count)) => *count += 1,
                None => bucket.categories.push((code, 1)),
            }
        }
    }

    buckets
        .into_iter()
        .filter(|(_, bucket)| bucket.count > 0)
        .map(|(date, bucket)| DailyAggregate {
            date,
            min: bucket.min,
            max: bucket.max,
            mean: bucket.sum / bucket.count as f64,
            modal_category: modal(&bucket.categories),
        })
        .collect()
}

/// The most frequent category; first-seen order breaks ties because the
/// list is in insertion order and the comparison is strictly-greater.
fn modal(categories: &[(f64, usize)]) -> Option<f64> {
    let mut best: Option<(f64, usize)> = None;
    for &(value, count) in categories {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}

fn utc_date(time: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(time)
        .ok()
        .map(|dt| dt.with_timezone(&Utc).date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap as Map;
    use test_utils::assert_approx_eq;

    fn point(time: &str, temperature: Option<f64>, code: Option<f64>) -> TimeSeriesPoint {
        let mut values: Map<String, Option<f64>> = Map::new();
        values.insert("temperature".to_string(), temperature);
        values.insert("weathersymbol3".to_string(), code);
        TimeSeriesPoint {
            time: time.to_string(),
            timestamp_millis: DateTime::parse_from_rfc3339(time)
                .ok()
                .map(|dt| dt.timestamp_millis()),
            values,
        }
    }

    #[test]
    fn test_bucketing_uses_utc_midnight() {
        // One hour apart but on different UTC dates.
        let points = vec![
            point("2025-01-01T23:30:00Z", Some(1.0), None),
            point("2025-01-02T00:30:00Z", Some(2.0), None),
        ];

        let days = aggregate_by_day(&points, "temperature", None);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(days[1].date, NaiveDate::from_ymd_opt(2025, 1, 2).unwrap());
    }

    #[test]
    fn test_offset_timestamps_bucket_by_utc() {
        // 01:30+02:00 is 23:30Z the previous day.
        let points = vec![point("2025-01-02T01:30:00+02:00", Some(5.0), None)];
        let days = aggregate_by_day(&points, "temperature", None);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    }

    #[test]
    fn test_min_max_mean_over_non_null_subset() {
        let points = vec![
            point("2025-01-01T00:00:00Z", Some(-2.0), None),
            point("2025-01-01T06:00:00Z", None, None),
            point("2025-01-01T12:00:00Z", Some(4.0), None),
            point("2025-01-01T18:00:00Z", Some(1.0), None),
        ];

        let days = aggregate_by_day(&points, "temperature", None);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].min, -2.0);
        assert_eq!(days[0].max, 4.0);
        assert_approx_eq!(days[0].mean, 1.0, 1e-9);
    }

    #[test]
    fn test_all_null_day_is_omitted() {
        let points = vec![
            point("2025-01-01T00:00:00Z", None, None),
            point("2025-01-01T12:00:00Z", None, None),
            point("2025-01-02T00:00:00Z", Some(3.0), None),
        ];

        let days = aggregate_by_day(&points, "temperature", None);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2025, 1, 2).unwrap());
    }

    #[test]
    fn test_modal_category() {
        let points = vec![
            point("2025-01-01T00:00:00Z", Some(1.0), Some(3.0)),
            point("2025-01-01T06:00:00Z", Some(1.0), Some(2.0)),
            point("2025-01-01T12:00:00Z", Some(1.0), Some(2.0)),
            point("2025-01-01T18:00:00Z", Some(1.0), None),
        ];

        let days = aggregate_by_day(&points, "temperature", Some("weathersymbol3"));
        assert_eq!(days[0].modal_category, Some(2.0));
    }

    #[test]
    fn test_modal_tie_breaks_to_first_seen() {
        let points = vec![
            point("2025-01-01T00:00:00Z", Some(1.0), Some(7.0)),
            point("2025-01-01T06:00:00Z", Some(1.0), Some(2.0)),
            point("2025-01-01T12:00:00Z", Some(1.0), Some(2.0)),
            point("2025-01-01T18:00:00Z", Some(1.0), Some(7.0)),
        ];

        let days = aggregate_by_day(&points, "temperature", Some("weathersymbol3"));
        assert_eq!(days[0].modal_category, Some(7.0));
    }

    #[test]
    fn test_dates_ascend_and_appear_once() {
        // Deliberately unordered input.
        let points = vec![
            point("2025-01-03T12:00:00Z", Some(3.0), None),
            point("2025-01-01T12:00:00Z", Some(1.0), None),
            point("2025-01-03T00:00:00Z", Some(5.0), None),
            point("2025-01-02T12:00:00Z", Some(2.0), None),
        ];

        let days = aggregate_by_day(&points, "temperature", None);
        let dates: Vec<_> = days.iter().map(|d| d.date).collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
                NaiveDate::from_ymd_opt(2025, 1, 3).unwrap(),
            ]
        );
        assert_eq!(days[2].min, 3.0);
        assert_eq!(days[2].max, 5.0);
    }

    #[test]
    fn test_unparseable_timestamp_is_skipped() {
        let points = vec![
            point("garbage", Some(99.0), None),
            point("2025-01-01T00:00:00Z", Some(1.0), None),
        ];

        let days = aggregate_by_day(&points, "temperature", None);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].max, 1.0);
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate_by_day(&[], "temperature", None).is_empty());
    }
}
