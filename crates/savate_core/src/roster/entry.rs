// Athlete submissions and stored entries
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::EntryError;
use crate::grading::{Sex, Step, StepPrecision};

/// Display format of the entry timestamp.
pub const ENTRY_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Opaque entry identifier, assigned once and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(Uuid);

impl EntryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for EntryId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// Result as submitted by the coach, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEntry {
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub age: i32,
    pub sex: String,
    pub step: f64,
}

impl NewEntry {
    pub fn new(first_name: &str, last_name: &str, age: i32, sex: &str, step: f64) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            age,
            sex: sex.to_string(),
            step,
        }
    }

    /// Check the submission and build the stored entry.
    ///
    /// Age and step outside the table are kept as entered; grading clamps them.
    pub fn validate(
        &self,
        precision: StepPrecision,
        created_at: DateTime<Utc>,
    ) -> Result<AthleteEntry, EntryError> {
        let first_name = self.first_name.trim();
        if first_name.is_empty() {
            return Err(EntryError::MissingFirstName);
        }
        let sex: Sex = self.sex.parse()?;
        if !self.step.is_finite() {
            return Err(EntryError::InvalidStep(self.step.to_string()));
        }

        let last_name = self.last_name.trim();
        Ok(AthleteEntry {
            id: EntryId::new(),
            first_name: first_name.to_string(),
            last_name: (!last_name.is_empty()).then(|| last_name.to_string()),
            age: self.age,
            sex,
            step: Step::from_value(self.step, precision),
            created_at,
        })
    }
}

/// Immutable stored result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthleteEntry {
    id: EntryId,
    first_name: String,
    last_name: Option<String>,
    age: i32,
    sex: Sex,
    step: Step,
    created_at: DateTime<Utc>,
}

impl AthleteEntry {
    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    pub fn age(&self) -> i32 {
        self.age
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn entry_date(&self) -> String {
        self.created_at.format(ENTRY_DATE_FORMAT).to_string()
    }

    /// Case-insensitive substring match over first name, last name, age,
    /// sex code and step.
    pub fn matches(&self, needle_lower: &str) -> bool {
        self.first_name.to_lowercase().contains(needle_lower)
            || self.last_name.as_deref().unwrap_or("").to_lowercase().contains(needle_lower)
            || self.age.to_string().contains(needle_lower)
            || self.sex.code().to_lowercase().contains(needle_lower)
            || self.step.to_string().contains(needle_lower)
    }
}
