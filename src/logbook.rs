use chrono::NaiveDate;
use log::{debug, info};

use crate::{
    monthly_histogram, search, sort, summary, DistanceUnit, DiveInput, DiveRecord, DiveStore,
    DiveSummary, KeyValueStore, MonthBucket, Result, Settings, SettingsStore, SortKey, TempUnit,
};

/// Outcome of submitting a dive form.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Created(DiveRecord),
    Updated(DiveRecord),
    /// The editing id no longer exists; nothing was changed
    Unchanged,
}

/// Application state: the loaded dives and display settings.
///
/// Opened once, mutated only through its methods, and persisted after each
/// mutation.
pub struct Logbook<S: KeyValueStore> {
    dives: DiveStore<S>,
    settings: SettingsStore<S>,
}

impl<S: KeyValueStore + Clone> Logbook<S> {
    /// Loads dives and settings from `backend`.
    pub fn open(backend: S) -> Self {
        let settings = SettingsStore::open(backend.clone());
        let dives = DiveStore::open(backend);
        debug!("Logbook opened with {} dives", dives.len());
        Self { dives, settings }
    }
}

impl<S: KeyValueStore> Logbook<S> {
    pub fn settings(&self) -> Settings {
        self.settings.get()
    }

    pub fn dives(&self) -> &[DiveRecord] {
        self.dives.dives()
    }

    pub fn dive(&self, id: &str) -> Option<&DiveRecord> {
        self.dives.get(id)
    }

    /// Validates raw form values and creates a dive, or updates `editing`
    /// when given.
    pub fn submit(&mut self, input: &DiveInput, editing: Option<&str>) -> Result<Submission> {
        let draft = input.canonicalize(&self.settings.get())?;
        match editing {
            Some(id) => Ok(match self.dives.update(id, draft)? {
                Some(record) => Submission::Updated(record),
                None => Submission::Unchanged,
            }),
            None => Ok(Submission::Created(self.dives.add(draft)?)),
        }
    }

    /// The edit form for `id`, pre-filled in the current display units.
    pub fn edit_form(&self, id: &str) -> Option<DiveInput> {
        self.dives
            .get(id)
            .map(|record| DiveInput::from_record(record, &self.settings.get()))
    }

    pub fn remove(&mut self, id: &str) -> Result<bool> {
        self.dives.remove(id)
    }

    pub fn replace_all(&mut self, dives: Vec<DiveRecord>) -> Result<()> {
        self.dives.replace_all(dives)
    }

    /// Changes whichever display units are given.
    pub fn set_units(
        &mut self,
        temp: Option<TempUnit>,
        distance: Option<DistanceUnit>,
    ) -> Result<Settings> {
        let current = self.settings.get();
        let next = Settings {
            temp_unit: temp.unwrap_or(current.temp_unit),
            distance_unit: distance.unwrap_or(current.distance_unit),
        };
        if next != current {
            self.settings.update(next)?;
        } else {
            info!("Display units unchanged");
        }
        Ok(next)
    }

    pub fn summary(&self) -> DiveSummary {
        summary(self.dives.dives())
    }

    pub fn histogram(&self, today: NaiveDate) -> Vec<MonthBucket> {
        monthly_histogram(self.dives.dives(), today)
    }

    /// Dives matching `term` (all when `None`), in `key` order.
    pub fn query(&self, term: Option<&str>, key: SortKey) -> Vec<&DiveRecord> {
        sort(search(self.dives.dives(), term.unwrap_or("")), key)
    }
}
