//! Display granularity of the grade.
//!
//! The table always stores the 9-level club vocabulary. A deployment chooses
//! how many buckets coaches see; each scale is a plain lookup array indexed by
//! raw rank, so adding a scale is a data change.

use serde::{Deserialize, Serialize};

use super::grade::RawGrade;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GradeScale {
    /// Insufficient … Excellent
    #[default]
    Five,
    /// Five plus a separate Elite bucket
    Six,
    /// Raw club vocabulary
    Nine,
}

/// A bucket on a display scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Level {
    pub rank: u8,
    pub of: u8,
    /// Catalogue message id of the label
    pub label_key: &'static str,
}

const UNDETERMINED_KEY: &str = "level-undetermined";

const FIVE: [(u8, &str); 9] = [
    (0, "level-insufficient"),
    (1, "level-average"),
    (1, "level-average"),
    (1, "level-average"),
    (2, "level-good"),
    (3, "level-very-good"),
    (4, "level-excellent"),
    (4, "level-excellent"),
    (4, "level-excellent"),
];

const SIX: [(u8, &str); 9] = [
    (0, "level-insufficient"),
    (1, "level-average"),
    (1, "level-average"),
    (1, "level-average"),
    (2, "level-good"),
    (3, "level-very-good"),
    (4, "level-excellent"),
    (5, "level-elite"),
    (5, "level-elite"),
];

const NINE: [(u8, &str); 9] = [
    (0, "level-raw-faible"),
    (1, "level-raw-moyen-minus"),
    (2, "level-raw-moyen"),
    (3, "level-raw-moyen-plus"),
    (4, "level-raw-bon"),
    (5, "level-raw-tres-bon"),
    (6, "level-raw-excellent"),
    (7, "level-raw-elite"),
    (8, "level-raw-elite-plus"),
];

impl GradeScale {
    fn buckets(&self) -> &'static [(u8, &'static str); 9] {
        match self {
            GradeScale::Five => &FIVE,
            GradeScale::Six => &SIX,
            GradeScale::Nine => &NINE,
        }
    }

    pub fn levels(&self) -> u8 {
        match self {
            GradeScale::Five => 5,
            GradeScale::Six => 6,
            GradeScale::Nine => 9,
        }
    }

    /// Bucket of a raw grade; `None` for the sentinel.
    pub fn level(&self, raw: RawGrade) -> Option<Level> {
        let rank = raw.rank()?;
        let (bucket, label_key) = self.buckets()[rank as usize];
        Some(Level { rank: bucket, of: self.levels(), label_key })
    }

    /// Label key of a raw grade, including the sentinel.
    pub fn label_key(&self, raw: RawGrade) -> &'static str {
        self.level(raw).map(|level| level.label_key).unwrap_or(UNDETERMINED_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::grade::normalize;

    #[test]
    fn test_bucket_counts() {
        for scale in [GradeScale::Five, GradeScale::Six, GradeScale::Nine] {
            let mut ranks: Vec<u8> =
                RawGrade::ORDERED.iter().filter_map(|raw| scale.level(*raw)).map(|l| l.rank).collect();
            ranks.dedup();
            assert_eq!(ranks.len() as u8, scale.levels(), "{:?}", scale);
        }
    }

    #[test]
    fn test_scales_are_monotonic() {
        for scale in [GradeScale::Five, GradeScale::Six, GradeScale::Nine] {
            let ranks: Vec<u8> =
                RawGrade::ORDERED.iter().filter_map(|raw| scale.level(*raw)).map(|l| l.rank).collect();
            assert!(ranks.windows(2).all(|w| w[0] <= w[1]), "{:?}", scale);
        }
    }

    #[test]
    fn test_five_matches_canonical_grade() {
        for raw in RawGrade::ORDERED {
            assert_eq!(GradeScale::Five.level(raw).map(|l| l.rank), normalize(raw).rank());
        }
    }

    #[test]
    fn test_sentinel_has_no_level() {
        assert_eq!(GradeScale::Six.level(RawGrade::Undetermined), None);
        assert_eq!(GradeScale::Nine.label_key(RawGrade::Undetermined), "level-undetermined");
        assert_eq!(GradeScale::Six.label_key(RawGrade::Elite), "level-elite");
    }
}
