// 5-year age bands used as the second axis of the grade table
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_AGE: i32 = 15;
pub const MAX_AGE: i32 = 60;
const BAND_WIDTH: i32 = 5;
const LAST_BAND_START: u8 = 55;

/// One of the nine contiguous bands "15-19" … "55-60".
///
/// The last band is one year wider so that age 60 stays inside the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct AgeBand {
    start: u8,
}

impl AgeBand {
    pub const COUNT: usize = 9;

    pub const ALL: [AgeBand; Self::COUNT] = [
        AgeBand { start: 15 },
        AgeBand { start: 20 },
        AgeBand { start: 25 },
        AgeBand { start: 30 },
        AgeBand { start: 35 },
        AgeBand { start: 40 },
        AgeBand { start: 45 },
        AgeBand { start: 50 },
        AgeBand { start: 55 },
    ];

    pub fn start(&self) -> u8 {
        self.start
    }

    /// Inclusive upper age of the band.
    pub fn end(&self) -> u8 {
        if self.start == LAST_BAND_START {
            MAX_AGE as u8
        } else {
            self.start + (BAND_WIDTH as u8 - 1)
        }
    }

    /// Position in [`AgeBand::ALL`].
    pub fn index(&self) -> usize {
        ((self.start as i32 - MIN_AGE) / BAND_WIDTH) as usize
    }

    pub fn contains(&self, age: i32) -> bool {
        (self.start as i32..=self.end() as i32).contains(&age)
    }

    pub fn label(&self) -> String {
        format!("{}-{}", self.start, self.end())
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|band| band.label() == label.trim())
    }
}

impl fmt::Display for AgeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end())
    }
}

impl From<AgeBand> for String {
    fn from(band: AgeBand) -> Self {
        band.label()
    }
}

impl TryFrom<String> for AgeBand {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        AgeBand::from_label(&value).ok_or_else(|| format!("unknown age band: {}", value))
    }
}

/// Clamp a raw age into the graded range [15, 60].
pub fn clamp_age(age: i32) -> i32 {
    age.clamp(MIN_AGE, MAX_AGE)
}

/// Resolve the grading band of a raw age. Total: out-of-range ages land in the
/// nearest boundary band.
pub fn resolve_band(age: i32) -> AgeBand {
    let age = clamp_age(age);
    let start = MIN_AGE + ((age - MIN_AGE) / BAND_WIDTH) * BAND_WIDTH;
    AgeBand { start: (start as u8).min(LAST_BAND_START) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(resolve_band(15).label(), "15-19");
        assert_eq!(resolve_band(19).label(), "15-19");
        assert_eq!(resolve_band(20).label(), "20-24");
        assert_eq!(resolve_band(22).label(), "20-24");
        assert_eq!(resolve_band(54).label(), "50-54");
        assert_eq!(resolve_band(55).label(), "55-60");
        assert_eq!(resolve_band(60).label(), "55-60");
    }

    #[test]
    fn test_out_of_range_clamps_to_edge_bands() {
        assert_eq!(resolve_band(5).label(), "15-19");
        assert_eq!(resolve_band(-3).label(), "15-19");
        assert_eq!(resolve_band(200).label(), "55-60");
    }

    #[test]
    fn test_labels_round_trip_through_serde() {
        let band = resolve_band(33);
        let json = serde_json::to_string(&band).unwrap();
        assert_eq!(json, "\"30-34\"");
        let back: AgeBand = serde_json::from_str(&json).unwrap();
        assert_eq!(back, band);
        assert!(serde_json::from_str::<AgeBand>("\"60-64\"").is_err());
    }

    #[test]
    fn test_bands_are_contiguous() {
        for pair in AgeBand::ALL.windows(2) {
            assert_eq!(pair[0].end() + 1, pair[1].start());
        }
        assert_eq!(AgeBand::ALL[0].start() as i32, MIN_AGE);
        assert_eq!(AgeBand::ALL[AgeBand::COUNT - 1].end() as i32, MAX_AGE);
        for (i, band) in AgeBand::ALL.iter().enumerate() {
            assert_eq!(band.index(), i);
        }
    }

    proptest! {
        #[test]
        fn prop_every_graded_age_has_exactly_one_band(age in MIN_AGE..=MAX_AGE) {
            let band = resolve_band(age);
            prop_assert!(band.contains(age));
            let owners = AgeBand::ALL.iter().filter(|b| b.contains(age)).count();
            prop_assert_eq!(owners, 1);
        }

        #[test]
        fn prop_band_is_monotonic(a in MIN_AGE..=MAX_AGE, b in MIN_AGE..=MAX_AGE) {
            if a <= b {
                prop_assert!(resolve_band(a) <= resolve_band(b));
            }
        }

        #[test]
        fn prop_out_of_range_uses_nearest_edge(age in -1000i32..1000) {
            let band = resolve_band(age);
            if age < MIN_AGE {
                prop_assert_eq!(band, AgeBand::ALL[0]);
            } else if age > MAX_AGE {
                prop_assert_eq!(band, AgeBand::ALL[AgeBand::COUNT - 1]);
            } else {
                prop_assert!(band.contains(age));
            }
        }
    }
}
