//! In-memory record store
//!
//! Owned by whoever drives the dashboard; nothing here is global. New entries
//! go to the front so iteration order is most recent first.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::entry::{AthleteEntry, EntryId, NewEntry};
use crate::error::EntryError;
use crate::grading::StepPrecision;

#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    entries: Vec<AthleteEntry>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and prepend a submission. On error the store is unchanged.
    pub fn add(
        &mut self,
        submission: &NewEntry,
        precision: StepPrecision,
    ) -> Result<&AthleteEntry, EntryError> {
        self.add_at(submission, precision, Utc::now())
    }

    pub fn add_at(
        &mut self,
        submission: &NewEntry,
        precision: StepPrecision,
        created_at: DateTime<Utc>,
    ) -> Result<&AthleteEntry, EntryError> {
        let entry = submission.validate(precision, created_at)?;
        info!("Added entry {} ({})", entry.id(), entry.first_name());
        self.entries.insert(0, entry);
        Ok(&self.entries[0])
    }

    /// Remove by id; `None` when the id is unknown.
    pub fn remove(&mut self, id: EntryId) -> Option<AthleteEntry> {
        let index = self.entries.iter().position(|e| e.id() == id)?;
        let removed = self.entries.remove(index);
        info!("Removed entry {}", id);
        Some(removed)
    }

    /// Entries matching `query`, in store order. A blank query matches all.
    pub fn filter(&self, query: &str) -> Vec<&AthleteEntry> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.entries.iter().collect();
        }
        let visible: Vec<&AthleteEntry> =
            self.entries.iter().filter(|e| e.matches(&needle)).collect();
        debug!("Filter '{}' kept {}/{} entries", needle, visible.len(), self.entries.len());
        visible
    }

    pub fn get(&self, id: EntryId) -> Option<&AthleteEntry> {
        self.entries.iter().find(|e| e.id() == id)
    }

    pub fn entries(&self) -> &[AthleteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
