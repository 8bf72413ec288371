//! Repository functions for the indexer's persisted state.
//!
//! Each function takes a `sqlx::PgExecutor` rather than a `&PgPool` so the
//! Projection Writer can run every write for one message inside a single
//! transaction (spec §4.4's atomic unit of durability) while still letting
//! read-only lookups (e.g. the Supervisor loading a cursor at startup) run
//! directly against the pool.

pub mod agent_comms;
pub mod agent_events;
pub mod agents;
pub mod cursor;
pub mod rentals;
pub mod substrate;
