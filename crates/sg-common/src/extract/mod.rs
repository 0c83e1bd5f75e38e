//! Source extractors: one pure normalization per upstream table.
//!
//! Every extractor takes already-fetched raw rows and projects them into one
//! canonical table from [`crate::schema`]. Fetching stays in the pipeline so
//! these stay deterministic and trivially testable. A record whose embedded
//! JSON fails to parse is skipped with a warning; it never aborts the run.

pub mod course_competency;
pub mod course_completion;
pub mod course_rating;
pub mod declared;
pub mod expected;
pub mod frac;
pub mod live_course;
