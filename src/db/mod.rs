//! Database access layer
//!
//! One module per table. Query functions take `impl PgExecutor<'_>` so they
//! run against the pool or inside a transaction interchangeably.

pub mod boards;
pub mod cards;
pub mod columns;
pub mod comments;
pub mod history;
pub mod stats;
pub mod tags;
pub mod users;
