pub mod destination;
pub mod path;
pub mod preferences;
pub mod search_history;

pub use destination::DestinationService;
pub use path::PathService;
pub use preferences::PreferencesService;
pub use search_history::SearchHistoryService;
