//! Persistence gateway for the Sentinel disease-surveillance API.
//!
//! `PostgreSQL` holds the four surveillance tables. Hospital records and
//! aggregated summaries are written by external jobs; pharmacies and social
//! posts are written through the API. This crate provides one store per
//! table plus an in-memory backend with the same semantics, unified behind
//! [`Gateway`].
//!
//! # Architecture
//!
//! ```text
//! Route handler / poller
//!     |
//!     +-- Gateway::Postgres --> PostgresPool
//!     |       |-- HospitalStore   (list, get)
//!     |       |-- PharmaStore     (CRUD)
//!     |       |-- SocialStore     (CRUD)
//!     |       +-- SummaryStore    (latest, trend, list, alerts, poll window)
//!     |
//!     +-- Gateway::Memory ----> MemoryStore (tests, database-less runs)
//! ```
//!
//! # Modules
//!
//! - [`postgres`] -- `PostgreSQL` pool and its settings
//! - [`hospital_store`], [`pharma_store`], [`social_store`],
//!   [`summary_store`] -- per-table queries
//! - [`memory`] -- in-memory backend
//! - [`gateway`] -- backend dispatch
//! - [`error`] -- Shared error types

pub mod error;
pub mod gateway;
pub mod hospital_store;
pub mod memory;
pub mod pharma_store;
pub mod postgres;
pub mod social_store;
pub mod summary_store;

// Re-export primary types for convenience.
pub use error::DbError;
pub use gateway::Gateway;
pub use hospital_store::HospitalStore;
pub use memory::MemoryStore;
pub use pharma_store::PharmaStore;
pub use postgres::{PoolSettings, PostgresPool};
pub use social_store::SocialStore;
pub use summary_store::SummaryStore;
