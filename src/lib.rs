//! Podium - ranked submission leaderboard
//!
//! Core modules:
//! - `store`: State container (submit, dismiss, load, broadcast)
//! - `ranking`: Deterministic leaderboard order
//! - `celebration`: Score bands and celebration payloads
//! - `persistence`: Single-slot save/load with a versioned envelope
//! - `leaderboard`: Display rows for list views
//! - `validation`: Store and form input checks
//! - `config`: Store settings

pub mod celebration;
pub mod clock;
pub mod config;
pub mod error;
pub mod leaderboard;
pub mod persistence;
pub mod ranking;
pub mod store;
pub mod submission;
pub mod validation;

pub use celebration::{Category, CelebrationEvent, classify};
pub use config::StoreConfig;
pub use error::{ConfigError, PersistenceError, SubmissionError, ValidationError};
pub use persistence::{FileStorage, KeyValueRepository, MemoryStorage, SubmissionRepository};
pub use ranking::rank;
pub use store::{StoreState, SubmissionStore};
pub use submission::{AudioRef, Submission, SubmissionId, SubmissionInput};

/// Domain limits and defaults
pub mod consts {
    /// Score range (inclusive)
    pub const SCORE_MIN: f64 = 0.0;
    pub const SCORE_MAX: f64 = 100.0;

    /// Completion time range in seconds (inclusive)
    pub const TIME_MIN: f64 = 1.0;
    pub const TIME_MAX: f64 = 3600.0;

    /// Name length accepted by the form rules (characters, after trimming)
    pub const NAME_MIN_CHARS: usize = 2;
    pub const NAME_MAX_CHARS: usize = 50;

    /// Key of the persisted slot
    pub const STORAGE_KEY: &str = "submissions";

    /// Celebration display window
    pub const CELEBRATION_DURATION_MS: u64 = 5_000;
}
