//! Row to domain mapping.

mod application_mapper;

pub use application_mapper::ApplicationMapper;
