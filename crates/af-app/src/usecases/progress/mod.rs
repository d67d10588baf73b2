//! Progress summaries for list and dashboard views.

mod summary;

pub use summary::{ApplicationProgress, ProgressSummary};
