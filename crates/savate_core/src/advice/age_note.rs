// Age-specific coaching note
//
// Four coarse groups on the raw age. These are independent of the 5-year
// grading bands and must not be derived from them.
use serde::{Deserialize, Serialize};

use super::localization::AdviceCatalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeGroup {
    /// 19 and under
    Youth,
    /// 20-34
    Prime,
    /// 35-44
    Veteran,
    /// 45 and over
    Master,
}

impl AgeGroup {
    pub fn of(age: i32) -> Self {
        match age {
            i32::MIN..=19 => AgeGroup::Youth,
            20..=34 => AgeGroup::Prime,
            35..=44 => AgeGroup::Veteran,
            _ => AgeGroup::Master,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            AgeGroup::Youth => "youth",
            AgeGroup::Prime => "prime",
            AgeGroup::Veteran => "veteran",
            AgeGroup::Master => "master",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeNote {
    pub title: String,
    pub note: String,
}

pub fn age_specific_note(catalog: &AdviceCatalog, age: i32) -> AgeNote {
    let group = AgeGroup::of(age);
    AgeNote {
        title: catalog.text(&format!("age-{}-title", group.key())),
        note: catalog.text(&format!("age-{}-note", group.key())),
    }
}
