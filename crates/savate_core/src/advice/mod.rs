// Coaching advice derived from a grade and an age
//
// Every function here is a pure mapping over catalogue wording.

pub mod age_note;
pub mod interpretation;
pub mod localization;
pub mod work;

pub use age_note::{age_specific_note, AgeGroup, AgeNote};
pub use interpretation::{tactical_interpretation, TacticalInterpretation};
pub use localization::{AdviceCatalog, DEFAULT_LOCALE, SUPPORTED_LOCALES};
pub use work::{suggested_work, work_plan, WorkBlock, WorkItem};
