use chrono::Utc;
use log::{debug, info, warn};

use crate::{DiveDraft, DiveRecord, KeyValueStore, Result, DIVES_KEY};

/// Ordered, fully loaded collection of dives.
///
/// Every mutation rewrites the whole collection under [`DIVES_KEY`]. The new
/// collection is persisted before it replaces the in-memory one, so a failed
/// write leaves the store exactly as it was.
pub struct DiveStore<S: KeyValueStore> {
    backend: S,
    dives: Vec<DiveRecord>,
}

impl<S: KeyValueStore> DiveStore<S> {
    /// Creates the store and loads the persisted collection.
    pub fn open(backend: S) -> Self {
        let dives = Self::load(&backend);
        info!("Loaded {} dives", dives.len());
        Self { backend, dives }
    }

    /// Reads the persisted collection.
    ///
    /// Absent data yields an empty collection. Malformed data also yields an
    /// empty collection, after the raw text has been copied aside under a
    /// `dives.corrupt-<millis>` key.
    pub fn load(backend: &S) -> Vec<DiveRecord> {
        let raw = match backend.get(DIVES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No stored dives found");
                return Vec::new();
            }
            Err(e) => {
                warn!("Failed to read stored dives: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<DiveRecord>>(&raw) {
            Ok(dives) => dives,
            Err(e) => {
                warn!("Stored dives are malformed, starting empty: {}", e);
                Vec::new()
            }
        }
    }

    /// Copies unreadable stored data aside before the first overwrite.
    fn preserve_corrupt(&mut self) -> Result<()> {
        if !self.dives.is_empty() {
            return Ok(());
        }
        if let Some(raw) = self.backend.get(DIVES_KEY)? {
            if serde_json::from_str::<Vec<DiveRecord>>(&raw).is_err() {
                let key = format!("{}.corrupt-{}", DIVES_KEY, Utc::now().timestamp_millis());
                warn!("Preserving unreadable dive data under '{}'", key);
                self.backend.set(&key, &raw)?;
            }
        }
        Ok(())
    }

    fn commit(&mut self, next: Vec<DiveRecord>) -> Result<()> {
        self.preserve_corrupt()?;
        let json = serde_json::to_string(&next)?;
        self.backend.set(DIVES_KEY, &json)?;
        self.dives = next;
        Ok(())
    }

    /// Generates a creation-time id that no current record uses.
    fn next_id(&self) -> String {
        let mut stamp = Utc::now().timestamp_millis();
        loop {
            let id = stamp.to_string();
            if self.get(&id).is_none() {
                return id;
            }
            stamp += 1;
        }
    }

    pub fn dives(&self) -> &[DiveRecord] {
        &self.dives
    }

    pub fn get(&self, id: &str) -> Option<&DiveRecord> {
        self.dives.iter().find(|d| d.id == id)
    }

    pub fn len(&self) -> usize {
        self.dives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dives.is_empty()
    }

    /// Appends a new record with a fresh id and persists.
    pub fn add(&mut self, draft: DiveDraft) -> Result<DiveRecord> {
        let record = DiveRecord::from_draft(self.next_id(), draft);
        let mut next = self.dives.clone();
        next.push(record.clone());
        self.commit(next)?;
        info!("Added dive {} at {}", record.id, record.dive_site);
        Ok(record)
    }

    /// Overwrites the record `id` with `draft`, appending any new photos.
    ///
    /// Returns `Ok(None)` without touching storage when `id` is unknown.
    pub fn update(&mut self, id: &str, draft: DiveDraft) -> Result<Option<DiveRecord>> {
        let Some(index) = self.dives.iter().position(|d| d.id == id) else {
            debug!("Update ignored, no dive with id {}", id);
            return Ok(None);
        };

        let mut next = self.dives.clone();
        next[index].apply(draft);
        let updated = next[index].clone();
        self.commit(next)?;
        info!("Updated dive {}", id);
        Ok(Some(updated))
    }

    /// Deletes the record `id`. Returns `Ok(false)` when there was none.
    pub fn remove(&mut self, id: &str) -> Result<bool> {
        if self.get(id).is_none() {
            debug!("Remove ignored, no dive with id {}", id);
            return Ok(false);
        }

        let next = self
            .dives
            .iter()
            .filter(|d| d.id != id)
            .cloned()
            .collect();
        self.commit(next)?;
        info!("Removed dive {}", id);
        Ok(true)
    }

    /// Replaces the entire collection and persists it.
    pub fn replace_all(&mut self, dives: Vec<DiveRecord>) -> Result<()> {
        let count = dives.len();
        self.commit(dives)?;
        info!("Replaced dive collection ({} dives)", count);
        Ok(())
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }
}
