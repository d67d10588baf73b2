//! Repository implementations.

mod application_repo;

#[cfg(test)]
mod application_repo_test;

pub use application_repo::DieselApplicationRepository;
