// Athlete results entered during a session

pub mod entry;
pub mod store;
pub mod summary;

pub use entry::{AthleteEntry, EntryId, NewEntry, ENTRY_DATE_FORMAT};
pub use store::RecordStore;
pub use summary::RosterSummary;
