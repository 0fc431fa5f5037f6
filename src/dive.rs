//! Dive records and the boundary that turns raw form values into them.
//!
//! A [`DiveInput`] carries the strings a user typed, in display units.
//! [`DiveInput::canonicalize`] validates them and produces a [`DiveDraft`]
//! whose depth, visibility and temperature are in meters and Celsius. Only
//! drafts ever reach the store.
use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use clap::ValueEnum;
use log::trace;
use serde::{Deserialize, Serialize};

use crate::{
    format_number, to_display_distance, to_display_temp, to_metric_distance, to_metric_temp,
    LogbookError, Result, Settings,
};

/// Date format used in storage and on input.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Clock time format used in storage and on input.
pub const TIME_FORMAT: &str = "%H:%M";

/// Number of note characters shown in listings.
pub const NOTES_PREVIEW_LEN: usize = 100;

/// Largest accepted depth or visibility, in meters.
pub const MAX_DISTANCE_METERS: f64 = 12_000.0;

/// Kind of dive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum DiveType {
    #[default]
    Recreational,
    Training,
    Deep,
    Wreck,
    Night,
    Drift,
}

impl fmt::Display for DiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiveType::Recreational => "Recreational",
            DiveType::Training => "Training",
            DiveType::Deep => "Deep",
            DiveType::Wreck => "Wreck",
            DiveType::Night => "Night",
            DiveType::Drift => "Drift",
        };
        f.write_str(name)
    }
}

/// One logged dive, with all measurements in metric units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiveRecord {
    /// Unique identifier, assigned at creation and never changed
    pub id: String,
    pub date: NaiveDate,
    #[serde(
        default,
        with = "clock_time",
        skip_serializing_if = "Option::is_none"
    )]
    pub time: Option<NaiveTime>,
    pub location: String,
    pub dive_site: String,
    /// Meters
    #[serde(deserialize_with = "lenient::distance")]
    pub max_depth: f64,
    /// Minutes
    #[serde(deserialize_with = "lenient::minutes")]
    pub duration: u32,
    /// Celsius
    #[serde(
        default,
        deserialize_with = "lenient::optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub water_temp: Option<f64>,
    /// Meters
    #[serde(
        default,
        deserialize_with = "lenient::optional_distance",
        skip_serializing_if = "Option::is_none"
    )]
    pub visibility: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub buddy: Option<String>,
    #[serde(default)]
    pub dive_type: DiveType,
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<String>,
    /// Embedded images as data URLs, oldest first
    #[serde(default, deserialize_with = "lenient::photos")]
    pub photos: Vec<String>,
}

/// Canonical field values for a create or update, everything but the id.
///
/// `photos` holds only the photos newly supplied with this submission.
#[derive(Debug, Clone, PartialEq)]
pub struct DiveDraft {
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub location: String,
    pub dive_site: String,
    pub max_depth: f64,
    pub duration: u32,
    pub water_temp: Option<f64>,
    pub visibility: Option<f64>,
    pub buddy: Option<String>,
    pub dive_type: DiveType,
    pub notes: Option<String>,
    pub photos: Vec<String>,
}

impl DiveRecord {
    /// Builds a new record from a draft.
    pub fn from_draft(id: String, draft: DiveDraft) -> Self {
        DiveRecord {
            id,
            date: draft.date,
            time: draft.time,
            location: draft.location,
            dive_site: draft.dive_site,
            max_depth: draft.max_depth,
            duration: draft.duration,
            water_temp: draft.water_temp,
            visibility: draft.visibility,
            buddy: draft.buddy,
            dive_type: draft.dive_type,
            notes: draft.notes,
            photos: draft.photos,
        }
    }

    /// Overwrites every field except the id; new photos are appended to the
    /// existing ones.
    pub fn apply(&mut self, draft: DiveDraft) {
        let DiveDraft {
            date,
            time,
            location,
            dive_site,
            max_depth,
            duration,
            water_temp,
            visibility,
            buddy,
            dive_type,
            notes,
            photos,
        } = draft;

        self.date = date;
        self.time = time;
        self.location = location;
        self.dive_site = dive_site;
        self.max_depth = max_depth;
        self.duration = duration;
        self.water_temp = water_temp;
        self.visibility = visibility;
        self.buddy = buddy;
        self.dive_type = dive_type;
        self.notes = notes;
        self.photos.extend(photos);
    }

    /// Notes truncated for listings. Storage always keeps the full text.
    pub fn notes_preview(&self, max_chars: usize) -> Option<String> {
        let notes = self.notes.as_deref()?;
        if notes.chars().count() <= max_chars {
            return Some(notes.to_string());
        }
        let head: String = notes.chars().take(max_chars).collect();
        Some(format!("{}...", head))
    }
}

/// Raw form values, in the user's display units.
///
/// Empty strings mean "not filled in".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiveInput {
    pub date: String,
    pub time: String,
    pub location: String,
    pub dive_site: String,
    pub max_depth: String,
    pub duration: String,
    pub water_temp: String,
    pub visibility: String,
    pub buddy: String,
    pub dive_type: Option<DiveType>,
    pub notes: String,
    /// Newly attached photos as data URLs
    pub photos: Vec<String>,
}

impl DiveInput {
    /// Pre-fills a form from an existing record, converting to display units.
    ///
    /// Photos are left empty: existing photos stay on the record and only
    /// new ones are submitted.
    pub fn from_record(record: &DiveRecord, settings: &Settings) -> Self {
        DiveInput {
            date: record.date.format(DATE_FORMAT).to_string(),
            time: record
                .time
                .map(|t| t.format(TIME_FORMAT).to_string())
                .unwrap_or_default(),
            location: record.location.clone(),
            dive_site: record.dive_site.clone(),
            max_depth: format_number(to_display_distance(
                record.max_depth,
                settings.distance_unit,
            )),
            duration: record.duration.to_string(),
            water_temp: record
                .water_temp
                .map(|t| format_number(to_display_temp(t, settings.temp_unit)))
                .unwrap_or_default(),
            visibility: record
                .visibility
                .map(|v| format_number(to_display_distance(v, settings.distance_unit)))
                .unwrap_or_default(),
            buddy: record.buddy.clone().unwrap_or_default(),
            dive_type: Some(record.dive_type),
            notes: record.notes.clone().unwrap_or_default(),
            photos: Vec::new(),
        }
    }

    /// Parses and validates every field and converts measurements to metric.
    pub fn canonicalize(&self, settings: &Settings) -> Result<DiveDraft> {
        let date = NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT).map_err(|_| {
            LogbookError::invalid("date", &self.date, "expected a date as YYYY-MM-DD")
        })?;

        let time = match self.time.trim() {
            "" => None,
            raw => Some(parse_clock_time(raw).ok_or_else(|| {
                LogbookError::invalid("time", &self.time, "expected a time as HH:MM")
            })?),
        };

        let location = required_text("location", &self.location)?;
        let dive_site = required_text("diveSite", &self.dive_site)?;

        let depth = parse_number("maxDepth", &self.max_depth)?
            .ok_or_else(|| LogbookError::invalid("maxDepth", &self.max_depth, "required"))?;
        if depth < 0.0 {
            return Err(LogbookError::invalid(
                "maxDepth",
                &self.max_depth,
                "must not be negative",
            ));
        }

        let duration = match self.duration.trim() {
            "" => return Err(LogbookError::invalid("duration", &self.duration, "required")),
            raw => raw.parse::<u32>().map_err(|_| {
                LogbookError::invalid(
                    "duration",
                    &self.duration,
                    "expected whole, non-negative minutes",
                )
            })?,
        };

        let water_temp = parse_number("waterTemp", &self.water_temp)?;

        let visibility = parse_number("visibility", &self.visibility)?;
        if visibility.is_some_and(|v| v < 0.0) {
            return Err(LogbookError::invalid(
                "visibility",
                &self.visibility,
                "must not be negative",
            ));
        }

        let max_depth = metric_distance(
            "maxDepth",
            &self.max_depth,
            to_metric_distance(depth, settings.distance_unit),
        )?;
        let visibility = visibility
            .map(|v| {
                metric_distance(
                    "visibility",
                    &self.visibility,
                    to_metric_distance(v, settings.distance_unit),
                )
            })
            .transpose()?;
        let water_temp = match water_temp.map(|t| to_metric_temp(t, settings.temp_unit)) {
            Some(t) if !t.is_finite() => {
                return Err(LogbookError::invalid(
                    "waterTemp",
                    &self.water_temp,
                    "out of range",
                ))
            }
            converted => converted,
        };

        let draft = DiveDraft {
            date,
            time,
            location,
            dive_site,
            max_depth,
            duration,
            water_temp,
            visibility,
            buddy: optional_text(&self.buddy),
            dive_type: self.dive_type.unwrap_or_default(),
            notes: optional_text(&self.notes),
            photos: self.photos.clone(),
        };
        trace!("Canonicalized dive input: {:?}", draft);
        Ok(draft)
    }
}

fn metric_distance(field: &'static str, raw: &str, meters: f64) -> Result<f64> {
    if meters.is_finite() && meters <= MAX_DISTANCE_METERS {
        Ok(meters)
    } else {
        Err(LogbookError::invalid(
            field,
            raw,
            format!("must be at most {} m", MAX_DISTANCE_METERS),
        ))
    }
}

fn parse_clock_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .ok()
}

fn required_text(field: &'static str, raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(LogbookError::invalid(field, raw, "required"));
    }
    Ok(trimmed.to_string())
}

fn optional_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Blank → `Ok(None)`; anything that isn't a finite number is rejected.
fn parse_number(field: &'static str, raw: &str) -> Result<Option<f64>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(LogbookError::invalid(field, raw, "not a number")),
    }
}

/// `HH:MM` serialization for optional clock times.
mod clock_time {
    use chrono::NaiveTime;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    use super::{parse_clock_time, TIME_FORMAT};

    pub fn serialize<S: Serializer>(
        time: &Option<NaiveTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match time {
            Some(t) => serializer.serialize_str(&t.format(TIME_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveTime>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => parse_clock_time(raw.trim())
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid time '{}'", raw))),
        }
    }
}

/// Readers tolerant of the browser app's storage format, which kept numbers
/// as strings and used `""` for unset optional fields.
mod lenient {
    use serde::{de::Error, Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(f64),
        Text(String),
    }

    fn finite<E: Error>(raw: &str) -> Result<f64, E> {
        match raw.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(E::custom(format!("'{}' is not a number", raw))),
        }
    }

    pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match NumberOrText::deserialize(deserializer)? {
            NumberOrText::Number(n) => Ok(n),
            NumberOrText::Text(s) => finite(&s),
        }
    }

    fn not_negative<E: Error>(value: f64) -> Result<f64, E> {
        if value < 0.0 {
            return Err(E::custom(format!("'{}' must not be negative", value)));
        }
        Ok(value)
    }

    pub fn distance<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        number(deserializer).and_then(not_negative)
    }

    pub fn optional_distance<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<f64>, D::Error> {
        optional_number(deserializer)?.map(not_negative).transpose()
    }

    pub fn optional_number<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<f64>, D::Error> {
        match Option::<NumberOrText>::deserialize(deserializer)? {
            None => Ok(None),
            Some(NumberOrText::Number(n)) => Ok(Some(n)),
            Some(NumberOrText::Text(s)) if s.trim().is_empty() => Ok(None),
            Some(NumberOrText::Text(s)) => finite(&s).map(Some),
        }
    }

    pub fn minutes<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        let value = number(deserializer)?;
        if value < 0.0 || value.fract() != 0.0 || value > u32::MAX as f64 {
            return Err(D::Error::custom(format!(
                "'{}' is not a whole number of minutes",
                value
            )));
        }
        Ok(value as u32)
    }

    pub fn optional_text<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        Ok(Option::<String>::deserialize(deserializer)?.filter(|s| !s.is_empty()))
    }

    pub fn photos<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
        Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DistanceUnit, TempUnit};

    fn input() -> DiveInput {
        DiveInput {
            date: "2024-03-10".to_string(),
            time: "09:15".to_string(),
            location: "Red Sea".to_string(),
            dive_site: "SS Thistlegorm".to_string(),
            max_depth: "30".to_string(),
            duration: "45".to_string(),
            water_temp: "24".to_string(),
            visibility: "20".to_string(),
            buddy: "Sam".to_string(),
            dive_type: Some(DiveType::Wreck),
            notes: "Motorbikes in hold 2".to_string(),
            photos: vec!["data:image/png;base64,AAAA".to_string()],
        }
    }

    fn imperial() -> Settings {
        Settings {
            temp_unit: TempUnit::Fahrenheit,
            distance_unit: DistanceUnit::Feet,
        }
    }

    #[test]
    fn metric_input_is_stored_verbatim() {
        let draft = input().canonicalize(&Settings::default()).unwrap();
        assert_eq!(draft.date, NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
        assert_eq!(draft.time, NaiveTime::from_hms_opt(9, 15, 0));
        assert_eq!(draft.max_depth, 30.0);
        assert_eq!(draft.duration, 45);
        assert_eq!(draft.water_temp, Some(24.0));
        assert_eq!(draft.visibility, Some(20.0));
        assert_eq!(draft.dive_type, DiveType::Wreck);
        assert_eq!(draft.photos.len(), 1);
    }

    #[test]
    fn feet_depth_is_canonicalized_to_meters() {
        let mut raw = input();
        raw.max_depth = "98".to_string();
        raw.water_temp = "75".to_string();
        raw.visibility = "66".to_string();
        let draft = raw.canonicalize(&imperial()).unwrap();
        assert_eq!(draft.max_depth, 29.9);
        assert_eq!(draft.water_temp, Some(23.9));
        assert_eq!(draft.visibility, Some(20.1));
    }

    #[test]
    fn blank_optionals_become_none_and_type_defaults() {
        let raw = DiveInput {
            time: String::new(),
            water_temp: "  ".to_string(),
            visibility: String::new(),
            buddy: String::new(),
            dive_type: None,
            notes: String::new(),
            ..input()
        };
        let draft = raw.canonicalize(&Settings::default()).unwrap();
        assert_eq!(draft.time, None);
        assert_eq!(draft.water_temp, None);
        assert_eq!(draft.visibility, None);
        assert_eq!(draft.buddy, None);
        assert_eq!(draft.notes, None);
        assert_eq!(draft.dive_type, DiveType::Recreational);
    }

    #[test]
    fn non_numeric_depth_is_rejected() {
        let raw = DiveInput {
            max_depth: "deep".to_string(),
            ..input()
        };
        let err = raw.canonicalize(&Settings::default()).unwrap_err();
        assert!(matches!(
            err,
            LogbookError::InvalidInput { field: "maxDepth", .. }
        ));
    }

    #[test]
    fn nan_strings_are_rejected() {
        let raw = DiveInput {
            water_temp: "NaN".to_string(),
            ..input()
        };
        assert!(matches!(
            raw.canonicalize(&Settings::default()),
            Err(LogbookError::InvalidInput { field: "waterTemp", .. })
        ));
    }

    #[test]
    fn required_fields_are_enforced() {
        for (field, raw) in [
            ("date", DiveInput { date: String::new(), ..input() }),
            ("date", DiveInput { date: "10/03/2024".to_string(), ..input() }),
            ("location", DiveInput { location: " ".to_string(), ..input() }),
            ("diveSite", DiveInput { dive_site: String::new(), ..input() }),
            ("maxDepth", DiveInput { max_depth: String::new(), ..input() }),
            ("maxDepth", DiveInput { max_depth: "-3".to_string(), ..input() }),
            ("duration", DiveInput { duration: String::new(), ..input() }),
            ("duration", DiveInput { duration: "45.5".to_string(), ..input() }),
            ("time", DiveInput { time: "noon".to_string(), ..input() }),
        ] {
            match raw.canonicalize(&Settings::default()) {
                Err(LogbookError::InvalidInput { field: got, .. }) => assert_eq!(got, field),
                other => panic!("expected {} to be rejected, got {:?}", field, other),
            }
        }
    }

    #[test]
    fn prefill_uses_display_units() {
        let draft = input().canonicalize(&Settings::default()).unwrap();
        let record = DiveRecord::from_draft("1".to_string(), draft);
        let form = DiveInput::from_record(&record, &imperial());
        assert_eq!(form.max_depth, "98.4");
        assert_eq!(form.water_temp, "75.2");
        assert_eq!(form.visibility, "65.6");
        assert_eq!(form.time, "09:15");
        assert!(form.photos.is_empty());

        let again = form.canonicalize(&imperial()).unwrap();
        assert_eq!(again.max_depth, 30.0);
        assert_eq!(again.water_temp, Some(24.0));
    }

    #[test]
    fn apply_keeps_id_and_appends_photos() {
        let mut record =
            DiveRecord::from_draft("7".to_string(), input().canonicalize(&Settings::default()).unwrap());
        let update = DiveInput {
            location: "Egypt".to_string(),
            photos: vec!["data:image/png;base64,BBBB".to_string()],
            ..input()
        }
        .canonicalize(&Settings::default())
        .unwrap();

        record.apply(update);
        assert_eq!(record.id, "7");
        assert_eq!(record.location, "Egypt");
        assert_eq!(
            record.photos,
            vec![
                "data:image/png;base64,AAAA".to_string(),
                "data:image/png;base64,BBBB".to_string()
            ]
        );
    }

    #[test]
    fn notes_preview_truncates_on_char_boundaries() {
        let mut record =
            DiveRecord::from_draft("1".to_string(), input().canonicalize(&Settings::default()).unwrap());
        record.notes = Some("é".repeat(150));
        let preview = record.notes_preview(NOTES_PREVIEW_LEN).unwrap();
        assert_eq!(preview.chars().count(), 103);
        assert!(preview.ends_with("..."));
        assert_eq!(record.notes.as_ref().unwrap().chars().count(), 150);

        record.notes = Some("short".to_string());
        assert_eq!(record.notes_preview(NOTES_PREVIEW_LEN).as_deref(), Some("short"));
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let record =
            DiveRecord::from_draft("42".to_string(), input().canonicalize(&Settings::default()).unwrap());
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["diveSite"], "SS Thistlegorm");
        assert_eq!(value["maxDepth"], 30.0);
        assert_eq!(value["date"], "2024-03-10");
        assert_eq!(value["time"], "09:15");
        assert_eq!(value["diveType"], "Wreck");

        let back: DiveRecord = serde_json::from_value(value).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn reads_records_written_by_the_browser_app() {
        let raw = r#"{
            "date": "2024-01-15", "time": "", "location": "Cozumel",
            "diveSite": "Palancar", "maxDepth": "18.0", "duration": "52",
            "waterTemp": "", "visibility": "25.5", "buddy": "",
            "diveType": "Drift", "notes": "", "id": "1705312800000",
            "photos": []
        }"#;
        let record: DiveRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.time, None);
        assert_eq!(record.max_depth, 18.0);
        assert_eq!(record.duration, 52);
        assert_eq!(record.water_temp, None);
        assert_eq!(record.visibility, Some(25.5));
        assert_eq!(record.buddy, None);
        assert_eq!(record.dive_type, DiveType::Drift);
    }

    #[test]
    fn missing_optional_keys_use_defaults() {
        let raw = r#"{"id":"1","date":"2024-01-15","location":"A","diveSite":"B",
                      "maxDepth":12,"duration":30,"photos":null}"#;
        let record: DiveRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.dive_type, DiveType::Recreational);
        assert!(record.photos.is_empty());
    }

    #[test]
    fn values_that_overflow_on_conversion_are_rejected() {
        let huge = "1e308".to_string();
        let cases = [
            ("maxDepth", DiveInput { max_depth: huge.clone(), ..input() }),
            ("waterTemp", DiveInput { water_temp: huge.clone(), ..input() }),
            ("visibility", DiveInput { visibility: huge.clone(), ..input() }),
        ];
        for (field, form) in cases {
            match form.canonicalize(&imperial()) {
                Err(LogbookError::InvalidInput { field: f, .. }) => assert_eq!(f, field),
                other => panic!("{field}: expected invalid input, got {other:?}"),
            }
        }
    }

    #[test]
    fn depth_beyond_the_deepest_ocean_is_rejected() {
        let mut form = input();
        form.max_depth = "20000".to_string();
        assert!(matches!(
            form.canonicalize(&Settings::default()),
            Err(LogbookError::InvalidInput { field: "maxDepth", .. })
        ));

        form.max_depth = MAX_DISTANCE_METERS.to_string();
        assert!(form.canonicalize(&Settings::default()).is_ok());
    }

    #[test]
    fn stored_negative_depth_is_rejected() {
        let raw = r#"{"id":"1","date":"2024-01-15","location":"A","diveSite":"B",
                      "maxDepth":-5,"duration":30}"#;
        assert!(serde_json::from_str::<DiveRecord>(raw).is_err());

        let raw = r#"{"id":"1","date":"2024-01-15","location":"A","diveSite":"B",
                      "maxDepth":5,"duration":30,"visibility":"-2"}"#;
        assert!(serde_json::from_str::<DiveRecord>(raw).is_err());

        let raw = r#"{"id":"1","date":"2024-01-15","location":"A","diveSite":"B",
                      "maxDepth":5,"duration":30,"waterTemp":-1.5}"#;
        let record: DiveRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.water_temp, Some(-1.5));
    }

    #[test]
    fn stored_nan_is_rejected() {
        let raw = r#"{"id":"1","date":"2024-01-15","location":"A","diveSite":"B",
                      "maxDepth":"NaN","duration":30}"#;
        assert!(serde_json::from_str::<DiveRecord>(raw).is_err());
    }
}
