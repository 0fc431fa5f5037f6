//! Read-only views over the dive collection: search, sort and numbering.
//!
//! None of these functions mutate their input; they hand back new vectors of
//! references into it.

use std::{collections::HashMap, fmt, str::FromStr};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::{DiveRecord, DiveType, LogbookError, DATE_FORMAT};

/// Ordering for dive listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    DateAsc,
    #[default]
    DateDesc,
    DepthAsc,
    DepthDesc,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortKey::DateAsc => "date-asc",
            SortKey::DateDesc => "date-desc",
            SortKey::DepthAsc => "depth-asc",
            SortKey::DepthDesc => "depth-desc",
        };
        f.write_str(name)
    }
}

impl FromStr for SortKey {
    type Err = LogbookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "date-asc" => Ok(SortKey::DateAsc),
            "date-desc" => Ok(SortKey::DateDesc),
            "depth-asc" => Ok(SortKey::DepthAsc),
            "depth-desc" => Ok(SortKey::DepthDesc),
            _ => Err(LogbookError::invalid(
                "sort",
                s,
                "expected date-asc, date-desc, depth-asc or depth-desc",
            )),
        }
    }
}

/// Case-insensitive substring search over date, site, location and notes.
///
/// A blank term matches everything.
pub fn search<'a>(records: &'a [DiveRecord], term: &str) -> Vec<&'a DiveRecord> {
    let needle = term.trim().to_lowercase();
    records
        .iter()
        .filter(|d| needle.is_empty() || haystack(d).contains(&needle))
        .collect()
}

fn haystack(dive: &DiveRecord) -> String {
    let mut text = String::with_capacity(
        dive.dive_site.len() + dive.location.len() + dive.notes.as_ref().map_or(0, String::len) + 13,
    );
    text.push_str(&dive.date.format(DATE_FORMAT).to_string());
    text.push('\n');
    text.push_str(&dive.dive_site);
    text.push('\n');
    text.push_str(&dive.location);
    if let Some(notes) = &dive.notes {
        text.push('\n');
        text.push_str(notes);
    }
    text.to_lowercase()
}

/// Keeps only dives of the given type.
pub fn filter_by_type<'a, I>(records: I, dive_type: DiveType) -> Vec<&'a DiveRecord>
where
    I: IntoIterator<Item = &'a DiveRecord>,
{
    records
        .into_iter()
        .filter(|d| d.dive_type == dive_type)
        .collect()
}

/// Returns the records in `key` order. The sort is stable.
pub fn sort<'a, I>(records: I, key: SortKey) -> Vec<&'a DiveRecord>
where
    I: IntoIterator<Item = &'a DiveRecord>,
{
    let mut sorted: Vec<&DiveRecord> = records.into_iter().collect();
    match key {
        SortKey::DateAsc => sorted.sort_by(|a, b| a.date.cmp(&b.date)),
        SortKey::DateDesc => sorted.sort_by(|a, b| b.date.cmp(&a.date)),
        SortKey::DepthAsc => sorted.sort_by(|a, b| a.max_depth.total_cmp(&b.max_depth)),
        SortKey::DepthDesc => sorted.sort_by(|a, b| b.max_depth.total_cmp(&a.max_depth)),
    }
    sorted
}

/// Logbook numbers by chronological order: the oldest dive is #1.
///
/// Dives on the same date keep their insertion order.
pub fn dive_numbers(records: &[DiveRecord]) -> HashMap<&str, usize> {
    sort(records, SortKey::DateAsc)
        .into_iter()
        .enumerate()
        .map(|(i, d)| (d.id.as_str(), i + 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::DiveDraft;

    fn dive(id: &str, date: (i32, u32, u32), depth: f64) -> DiveRecord {
        DiveRecord::from_draft(
            id.to_string(),
            DiveDraft {
                date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
                time: None,
                location: "Malta".to_string(),
                dive_site: format!("Site {}", id),
                max_depth: depth,
                duration: 45,
                water_temp: None,
                visibility: None,
                buddy: None,
                dive_type: DiveType::Recreational,
                notes: None,
                photos: Vec::new(),
            },
        )
    }

    fn ids(records: &[&DiveRecord]) -> Vec<String> {
        records.iter().map(|d| d.id.clone()).collect()
    }

    #[test]
    fn depth_desc_puts_deepest_first() {
        let dives = vec![dive("shallow", (2024, 1, 15), 18.0), dive("deep", (2024, 3, 10), 40.0)];
        let sorted = sort(&dives, SortKey::DepthDesc);
        assert_eq!(ids(&sorted), ["deep", "shallow"]);
        assert_eq!(dives[0].id, "shallow");
    }

    #[test]
    fn date_orders() {
        let dives = vec![
            dive("b", (2024, 3, 10), 10.0),
            dive("a", (2024, 1, 15), 10.0),
            dive("c", (2024, 7, 1), 10.0),
        ];
        assert_eq!(ids(&sort(&dives, SortKey::DateAsc)), ["a", "b", "c"]);
        assert_eq!(ids(&sort(&dives, SortKey::DateDesc)), ["c", "b", "a"]);
        assert_eq!(ids(&sort(&dives, SortKey::DepthAsc)), ["b", "a", "c"]);
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let dives = vec![
            dive("first", (2024, 1, 1), 20.0),
            dive("second", (2024, 1, 1), 20.0),
            dive("third", (2024, 1, 1), 20.0),
        ];
        for key in [SortKey::DateAsc, SortKey::DateDesc, SortKey::DepthAsc, SortKey::DepthDesc] {
            assert_eq!(ids(&sort(&dives, key)), ["first", "second", "third"]);
        }
    }

    #[test]
    fn search_matches_site_location_and_notes_case_insensitively() {
        let mut by_site = dive("site", (2024, 1, 1), 10.0);
        by_site.dive_site = "Zenobia WRECK".to_string();
        let mut by_location = dive("location", (2024, 1, 2), 10.0);
        by_location.location = "Wreck Alley, San Diego".to_string();
        let mut by_notes = dive("notes", (2024, 1, 3), 10.0);
        by_notes.notes = Some("Swam past an old wreck".to_string());
        let mut by_type_only = dive("type", (2024, 1, 4), 10.0);
        by_type_only.dive_type = DiveType::Wreck;
        let plain = dive("plain", (2024, 1, 5), 10.0);

        let dives = vec![by_site, by_location, by_notes, by_type_only, plain];
        let found = search(&dives, "wreck");
        assert_eq!(ids(&found), ["site", "location", "notes"]);
        assert_eq!(dives.len(), 5);
    }

    #[test]
    fn search_matches_the_dive_date() {
        let dives = vec![
            dive("jan", (2024, 1, 15), 10.0),
            dive("mar", (2024, 3, 10), 10.0),
            dive("mar-late", (2024, 3, 28), 10.0),
        ];
        assert_eq!(ids(&search(&dives, "2024-03")), ["mar", "mar-late"]);
        assert_eq!(ids(&search(&dives, "2024-01-15")), ["jan"]);
    }

    #[test]
    fn blank_search_returns_everything() {
        let dives = vec![dive("a", (2024, 1, 1), 10.0), dive("b", (2024, 1, 2), 10.0)];
        assert_eq!(search(&dives, "  ").len(), 2);
    }

    #[test]
    fn search_then_sort_composes() {
        let mut a = dive("a", (2024, 1, 1), 12.0);
        a.notes = Some("turtle".to_string());
        let mut b = dive("b", (2024, 2, 1), 30.0);
        b.notes = Some("Turtle and shark".to_string());
        let c = dive("c", (2024, 3, 1), 50.0);
        let dives = vec![a, b, c];

        let result = sort(search(&dives, "turtle"), SortKey::DepthDesc);
        assert_eq!(ids(&result), ["b", "a"]);
    }

    #[test]
    fn type_filter() {
        let mut night = dive("n", (2024, 1, 1), 10.0);
        night.dive_type = DiveType::Night;
        let dives = vec![night, dive("r", (2024, 1, 2), 10.0)];
        assert_eq!(ids(&filter_by_type(&dives, DiveType::Night)), ["n"]);
    }

    #[test]
    fn numbers_follow_chronology() {
        let dives = vec![
            dive("late", (2024, 5, 1), 10.0),
            dive("early", (2023, 5, 1), 10.0),
            dive("middle", (2024, 1, 1), 10.0),
        ];
        let numbers = dive_numbers(&dives);
        assert_eq!(numbers["early"], 1);
        assert_eq!(numbers["middle"], 2);
        assert_eq!(numbers["late"], 3);
    }

    #[test]
    fn sort_keys_parse_and_display() {
        assert_eq!("depth-desc".parse::<SortKey>().unwrap(), SortKey::DepthDesc);
        assert_eq!(SortKey::DateAsc.to_string(), "date-asc");
        assert!("sideways".parse::<SortKey>().is_err());
    }
}
