pub mod enums;
pub mod journal_entry;
pub mod medication;
pub mod scan;

pub use journal_entry::JournalEntry;
pub use medication::MedicationSuggestion;
pub use scan::StoredScan;
