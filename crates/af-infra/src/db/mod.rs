//! Database layer: schema, pool, executor, row models, mappers and
//! repositories.

pub mod executor;
pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;
pub mod schema;
