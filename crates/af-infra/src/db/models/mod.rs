//! Row models.

mod application_row;

pub use application_row::{ApplicationRow, NewApplicationRow};
