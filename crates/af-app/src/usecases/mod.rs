//! Use cases.

pub mod progress;
pub mod wizard;
