// Assault interpretation: what the grade means for light-contact sparring
use serde::{Deserialize, Serialize};

use super::localization::AdviceCatalog;
use crate::grading::Grade;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TacticalInterpretation {
    pub summary: String,
    pub caution: String,
    pub training_priority: String,
}

/// Canned triplet for a grade. `Undetermined` gets the "no data" wording.
pub fn tactical_interpretation(catalog: &AdviceCatalog, grade: Grade) -> TacticalInterpretation {
    let key = grade.key();
    TacticalInterpretation {
        summary: catalog.text(&format!("interp-{}-summary", key)),
        caution: catalog.text(&format!("interp-{}-caution", key)),
        training_priority: catalog.text(&format!("interp-{}-priority", key)),
    }
}
