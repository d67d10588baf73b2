//! # af-infra
//!
//! Infrastructure adapters for AdmitFlow: the Diesel/SQLite implementation
//! of the application record store port, plus the connection pool with
//! embedded migrations.

pub mod db;

pub use db::executor::{DbExecutor, DieselSqliteExecutor};
pub use db::pool::{init_db_pool, DbPool};
pub use db::repositories::DieselApplicationRepository;
