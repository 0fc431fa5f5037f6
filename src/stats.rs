//! Aggregate figures derived from the dive collection.
//!
//! Everything here is recomputed from scratch on each call; nothing is cached.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::{round1, DiveRecord};

/// Number of calendar months covered by [`monthly_histogram`].
pub const HISTOGRAM_MONTHS: u32 = 6;

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Headline statistics. Depths are in meters, time in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiveSummary {
    pub total_dives: usize,
    pub max_depth: f64,
    pub total_time: u64,
    pub avg_depth: f64,
}

/// Dive count for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthBucket {
    /// Short English month name, e.g. `Mar`
    #[serde(rename = "monthLabel")]
    pub label: String,
    /// `YYYY-MM`
    pub year_month: String,
    pub count: usize,
}

/// Computes totals and extrema. An empty collection yields all zeros.
pub fn summary(records: &[DiveRecord]) -> DiveSummary {
    let total_dives = records.len();
    if total_dives == 0 {
        return DiveSummary {
            total_dives: 0,
            max_depth: 0.0,
            total_time: 0,
            avg_depth: 0.0,
        };
    }

    let max_depth = records
        .iter()
        .map(|d| d.max_depth)
        .fold(0.0_f64, f64::max);
    let total_time = records.iter().map(|d| u64::from(d.duration)).sum();
    let depth_sum: f64 = records.iter().map(|d| d.max_depth).sum();

    DiveSummary {
        total_dives,
        max_depth,
        total_time,
        avg_depth: round1(depth_sum / total_dives as f64),
    }
}

/// Counts dives per month for the month containing `today` and the five
/// before it, oldest first. Empty months are included with a zero count.
pub fn monthly_histogram(records: &[DiveRecord], today: NaiveDate) -> Vec<MonthBucket> {
    let anchor = today.year() * 12 + today.month0() as i32;

    (0..HISTOGRAM_MONTHS as i32)
        .rev()
        .map(|back| {
            let index = anchor - back;
            let year = index.div_euclid(12);
            let month0 = index.rem_euclid(12) as u32;

            let count = records
                .iter()
                .filter(|d| d.date.year() == year && d.date.month0() == month0)
                .count();

            MonthBucket {
                label: MONTH_LABELS[month0 as usize].to_string(),
                year_month: format!("{:04}-{:02}", year, month0 + 1),
                count,
            }
        })
        .collect()
}

/// Bar heights as a percentage of the busiest month (at least one dive).
pub fn bar_heights(buckets: &[MonthBucket]) -> Vec<f64> {
    let max = buckets.iter().map(|b| b.count).max().unwrap_or(0).max(1) as f64;
    buckets
        .iter()
        .map(|b| b.count as f64 / max * 100.0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DiveDraft, DiveType};

    fn dive(id: &str, date: (i32, u32, u32), depth: f64, duration: u32) -> DiveRecord {
        DiveRecord::from_draft(
            id.to_string(),
            DiveDraft {
                date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
                time: None,
                location: "Loc".to_string(),
                dive_site: "Site".to_string(),
                max_depth: depth,
                duration,
                water_temp: None,
                visibility: None,
                buddy: None,
                dive_type: DiveType::Recreational,
                notes: None,
                photos: Vec::new(),
            },
        )
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_summary_is_all_zero() {
        let s = summary(&[]);
        assert_eq!(s.total_dives, 0);
        assert_eq!(s.max_depth, 0.0);
        assert_eq!(s.total_time, 0);
        assert_eq!(s.avg_depth, 0.0);
        assert!(!s.avg_depth.is_nan());
    }

    #[test]
    fn summary_aggregates() {
        let dives = vec![
            dive("1", (2024, 1, 15), 18.0, 50),
            dive("2", (2024, 3, 10), 40.0, 35),
            dive("3", (2024, 3, 12), 12.3, 61),
        ];
        let s = summary(&dives);
        assert_eq!(s.total_dives, 3);
        assert_eq!(s.max_depth, 40.0);
        assert_eq!(s.total_time, 146);
        assert_eq!(s.avg_depth, 23.4);
    }

    #[test]
    fn summary_is_idempotent() {
        let dives = vec![dive("1", (2024, 1, 15), 18.0, 50)];
        assert_eq!(summary(&dives), summary(&dives));
    }

    #[test]
    fn empty_histogram_has_six_zero_months() {
        let months = monthly_histogram(&[], ymd(2024, 3, 20));
        assert_eq!(months.len(), 6);
        assert!(months.iter().all(|m| m.count == 0));
        let labels: Vec<_> = months.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, ["Oct", "Nov", "Dec", "Jan", "Feb", "Mar"]);
        assert_eq!(months[0].year_month, "2023-10");
        assert_eq!(months[5].year_month, "2024-03");
    }

    #[test]
    fn histogram_counts_by_calendar_month() {
        let dives = vec![
            dive("1", (2024, 1, 15), 18.0, 50),
            dive("2", (2024, 3, 10), 40.0, 35),
            dive("3", (2024, 3, 31), 12.0, 20),
            dive("4", (2023, 3, 10), 12.0, 20),
            dive("5", (2024, 4, 1), 12.0, 20),
        ];
        let months = monthly_histogram(&dives, ymd(2024, 3, 1));
        let counts: Vec<_> = months.iter().map(|m| m.count).collect();
        assert_eq!(counts, [0, 0, 0, 1, 0, 2]);
        assert_eq!(monthly_histogram(&dives, ymd(2024, 3, 1)), months);
    }

    #[test]
    fn month_buckets_serialize_with_month_label() {
        let months = monthly_histogram(&[], NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        let json = serde_json::to_value(&months[5]).unwrap();
        assert_eq!(json["monthLabel"], "Mar");
        assert_eq!(json["yearMonth"], "2024-03");
        assert_eq!(json["count"], 0);
    }

    #[test]
    fn bar_heights_scale_to_busiest_month() {
        let months = monthly_histogram(
            &[
                dive("1", (2024, 2, 1), 10.0, 30),
                dive("2", (2024, 3, 1), 10.0, 30),
                dive("3", (2024, 3, 2), 10.0, 30),
            ],
            ymd(2024, 3, 15),
        );
        assert_eq!(bar_heights(&months), [0.0, 0.0, 0.0, 0.0, 50.0, 100.0]);
        assert_eq!(bar_heights(&monthly_histogram(&[], ymd(2024, 3, 15))), [0.0; 6]);
    }
}
