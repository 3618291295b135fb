// Dashboard head figures over the whole store
use serde::{Deserialize, Serialize};

use super::entry::AthleteEntry;
use crate::grading::Sex;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterSummary {
    pub participants: usize,
    pub male: usize,
    pub female: usize,
    pub mean_step: Option<f64>,
}

impl RosterSummary {
    pub fn compute(entries: &[AthleteEntry]) -> Self {
        let male = entries.iter().filter(|e| e.sex() == Sex::Male).count();
        let mean_step = if entries.is_empty() {
            None
        } else {
            let total: f64 = entries.iter().map(|e| e.step().value()).sum();
            Some(total / entries.len() as f64)
        };
        Self { participants: entries.len(), male, female: entries.len() - male, mean_step }
    }

    /// "-" for an empty store, one decimal otherwise.
    pub fn mean_step_display(&self) -> String {
        match self.mean_step {
            Some(mean) => format!("{:.1}", mean),
            None => "-".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::StepPrecision;
    use crate::roster::{NewEntry, RecordStore};

    #[test]
    fn test_empty_store() {
        let summary = RosterSummary::compute(&[]);
        assert_eq!(summary.participants, 0);
        assert_eq!(summary.mean_step, None);
        assert_eq!(summary.mean_step_display(), "-");
    }

    #[test]
    fn test_counts_and_mean() {
        let mut store = RecordStore::new();
        for (name, sex, step) in [("A", "M", 9.0), ("B", "F", 10.0), ("C", "M", 12.5)] {
            store.add(&NewEntry::new(name, "", 22, sex, step), StepPrecision::Half).unwrap();
        }
        let summary = RosterSummary::compute(store.entries());
        assert_eq!(summary.participants, 3);
        assert_eq!(summary.male, 2);
        assert_eq!(summary.female, 1);
        assert_eq!(summary.mean_step_display(), "10.5");
    }
}
