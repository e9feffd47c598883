pub mod load;

pub use load::{load_sessions, summarize_load, DateWindow, LoadSummary, TrainingSession};
