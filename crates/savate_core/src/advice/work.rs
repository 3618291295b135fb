//! Suggested training work.
//!
//! A small fixed catalogue of training blocks. Each grade maps to a fixed
//! concatenation of catalogue groups:
//!
//! | Grade        | Blocks                                                   |
//! |--------------|----------------------------------------------------------|
//! | Insufficient | foundation, 30/30, recovery                              |
//! | Average      | foundation, 30/30 + 15/15, recovery                      |
//! | Good         | foundation, every interval block, recovery               |
//! | VeryGood     | specific intervals, short lactic, recovery               |
//! | Excellent    | specific intervals, quality over volume, recovery        |
//! | Undetermined | nothing                                                  |

use serde::{Deserialize, Serialize};

use super::localization::AdviceCatalog;
use crate::grading::Grade;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkBlock {
    Endurance,
    Technique,
    Interval3030,
    Interval1515,
    AssaultInterval,
    Footwork,
    Surges,
    Recovery,
    ShortLactic,
    QualityOverVolume,
}

impl WorkBlock {
    pub fn code(&self) -> &'static str {
        match self {
            WorkBlock::Endurance => "endurance",
            WorkBlock::Technique => "technique",
            WorkBlock::Interval3030 => "interval-30-30",
            WorkBlock::Interval1515 => "interval-15-15",
            WorkBlock::AssaultInterval => "assault-interval",
            WorkBlock::Footwork => "footwork",
            WorkBlock::Surges => "surges",
            WorkBlock::Recovery => "recovery",
            WorkBlock::ShortLactic => "short-lactic",
            WorkBlock::QualityOverVolume => "quality-over-volume",
        }
    }
}

const FOUNDATION: [WorkBlock; 2] = [WorkBlock::Endurance, WorkBlock::Technique];

const INTERMITTENT: [WorkBlock; 5] = [
    WorkBlock::Interval3030,
    WorkBlock::Interval1515,
    WorkBlock::AssaultInterval,
    WorkBlock::Footwork,
    WorkBlock::Surges,
];

const RECOVERY: [WorkBlock; 1] = [WorkBlock::Recovery];

/// Ordered training blocks for a grade.
pub fn work_plan(grade: Grade) -> Vec<WorkBlock> {
    let parts: &[&[WorkBlock]] = match grade {
        Grade::Insufficient => &[&FOUNDATION, &INTERMITTENT[..1], &RECOVERY],
        Grade::Average => &[&FOUNDATION, &INTERMITTENT[..2], &RECOVERY],
        Grade::Good => &[&FOUNDATION, &INTERMITTENT, &RECOVERY],
        Grade::VeryGood => &[&INTERMITTENT[2..], &[WorkBlock::ShortLactic], &RECOVERY],
        Grade::Excellent => &[&INTERMITTENT[2..], &[WorkBlock::QualityOverVolume], &RECOVERY],
        Grade::Undetermined => &[],
    };
    parts.concat()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    pub code: String,
    pub label: String,
    pub detail: String,
}

/// Worded training blocks for a grade; empty only for `Undetermined`.
pub fn suggested_work(catalog: &AdviceCatalog, grade: Grade) -> Vec<WorkItem> {
    work_plan(grade)
        .into_iter()
        .map(|block| WorkItem {
            code: block.code().to_string(),
            label: catalog.text(&format!("work-{}-label", block.code())),
            detail: catalog.text(&format!("work-{}-detail", block.code())),
        })
        .collect()
}
