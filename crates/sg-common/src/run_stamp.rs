//! Run identity for one batch pass.
//!
//! Captured once at run start and passed explicitly into every stage, so all
//! tables published by one run carry the same logical point in time even
//! though each table goes out at a different wall-clock instant.

use chrono::{DateTime, Utc};
use ulid::Ulid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunStamp {
    /// Time-ordered 26-char run identifier.
    pub run_id: String,
    /// The single timestamp applied to every record of this run.
    pub timestamp: DateTime<Utc>,
}

impl RunStamp {
    pub fn capture() -> Self {
        Self {
            run_id: Ulid::new().to_string(),
            timestamp: Utc::now(),
        }
    }

    /// Fixed stamp for tests and replays.
    pub fn at(timestamp: DateTime<Utc>) -> Self {
        Self {
            run_id: Ulid::new().to_string(),
            timestamp,
        }
    }
}
