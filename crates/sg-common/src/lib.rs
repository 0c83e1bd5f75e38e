pub mod classify;
pub mod config;
pub mod enrich;
pub mod extract;
pub mod gap;
pub mod level;
pub mod logging;
pub mod pipeline;
pub mod publish;
pub mod run_stamp;
pub mod schema;
pub mod sources;

pub use classify::{classify_completion, CompletionStatus};
pub use run_stamp::RunStamp;
