// Raw club vocabulary and the canonical 5-level scale
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fine-grained label stored in the grade table, weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RawGrade {
    #[serde(rename = "Faible")]
    Faible,
    #[serde(rename = "Moyen-")]
    MoyenMinus,
    #[serde(rename = "Moyen")]
    Moyen,
    #[serde(rename = "Moyen+")]
    MoyenPlus,
    #[serde(rename = "Bon")]
    Bon,
    #[serde(rename = "Tres bon", alias = "Très bon", alias = "TresBon")]
    TresBon,
    #[serde(rename = "Excellent")]
    Excellent,
    #[serde(rename = "Elite", alias = "Élite")]
    Elite,
    #[serde(rename = "Elite+", alias = "Élite+")]
    ElitePlus,
    /// Cell missing from the deployed table
    #[serde(rename = "-")]
    Undetermined,
}

impl RawGrade {
    /// Defined grades in table order.
    pub const ORDERED: [RawGrade; 9] = [
        RawGrade::Faible,
        RawGrade::MoyenMinus,
        RawGrade::Moyen,
        RawGrade::MoyenPlus,
        RawGrade::Bon,
        RawGrade::TresBon,
        RawGrade::Excellent,
        RawGrade::Elite,
        RawGrade::ElitePlus,
    ];

    /// Position in table order; `None` for the sentinel.
    pub fn rank(&self) -> Option<u8> {
        match self {
            RawGrade::Faible => Some(0),
            RawGrade::MoyenMinus => Some(1),
            RawGrade::Moyen => Some(2),
            RawGrade::MoyenPlus => Some(3),
            RawGrade::Bon => Some(4),
            RawGrade::TresBon => Some(5),
            RawGrade::Excellent => Some(6),
            RawGrade::Elite => Some(7),
            RawGrade::ElitePlus => Some(8),
            RawGrade::Undetermined => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RawGrade::Faible => "Faible",
            RawGrade::MoyenMinus => "Moyen-",
            RawGrade::Moyen => "Moyen",
            RawGrade::MoyenPlus => "Moyen+",
            RawGrade::Bon => "Bon",
            RawGrade::TresBon => "Tres bon",
            RawGrade::Excellent => "Excellent",
            RawGrade::Elite => "Elite",
            RawGrade::ElitePlus => "Elite+",
            RawGrade::Undetermined => "-",
        }
    }

    pub fn is_determined(&self) -> bool {
        !matches!(self, RawGrade::Undetermined)
    }
}

impl fmt::Display for RawGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Canonical grade shown to coaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grade {
    Insufficient,
    Average,
    Good,
    VeryGood,
    Excellent,
    Undetermined,
}

impl Grade {
    pub const ORDERED: [Grade; 5] =
        [Grade::Insufficient, Grade::Average, Grade::Good, Grade::VeryGood, Grade::Excellent];

    pub fn rank(&self) -> Option<u8> {
        match self {
            Grade::Insufficient => Some(0),
            Grade::Average => Some(1),
            Grade::Good => Some(2),
            Grade::VeryGood => Some(3),
            Grade::Excellent => Some(4),
            Grade::Undetermined => None,
        }
    }

    /// Stable key used to build catalogue message ids.
    pub fn key(&self) -> &'static str {
        match self {
            Grade::Insufficient => "insufficient",
            Grade::Average => "average",
            Grade::Good => "good",
            Grade::VeryGood => "very-good",
            Grade::Excellent => "excellent",
            Grade::Undetermined => "undetermined",
        }
    }

    /// Badge background colour.
    pub fn colour(&self) -> &'static str {
        match self {
            Grade::Insufficient => "#fee2e2",
            Grade::Average => "#ffedd5",
            Grade::Good => "#dcfce7",
            Grade::VeryGood => "#bbf7d0",
            Grade::Excellent => "#cffafe",
            Grade::Undetermined => "#e5e7eb",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Collapse a raw grade onto the canonical scale.
///
/// Moyen-/Moyen/Moyen+ share one bucket, Excellent/Elite/Elite+ another.
pub fn normalize(raw: RawGrade) -> Grade {
    match raw {
        RawGrade::Faible => Grade::Insufficient,
        RawGrade::MoyenMinus | RawGrade::Moyen | RawGrade::MoyenPlus => Grade::Average,
        RawGrade::Bon => Grade::Good,
        RawGrade::TresBon => Grade::VeryGood,
        RawGrade::Excellent | RawGrade::Elite | RawGrade::ElitePlus => Grade::Excellent,
        RawGrade::Undetermined => Grade::Undetermined,
    }
}
