//! Shared type definitions for the Sentinel disease-surveillance API.
//!
//! This crate is the single source of truth for the entities, write
//! payloads, and query shapes used across the workspace. Entity and payload
//! types flow to `TypeScript` via `ts-rs` for the browser dashboard.
//!
//! # Modules
//!
//! - [`entities`] -- Persisted rows (hospital records, pharmacies, social
//!   posts, aggregated summaries)
//! - [`payloads`] -- Create/patch bodies and their validation schema
//! - [`query`] -- Pagination and filter normalization
//! - [`events`] -- Realtime channel messages

pub mod entities;
pub mod events;
pub mod payloads;
pub mod query;

// Re-export all public types at crate root for convenience.
pub use entities::{AggregatedSummary, HospitalRecord, Pharma, SocialPost};
pub use events::RealtimeEvent;
pub use payloads::{NewPharma, NewSocialPost, PharmaPatch, SocialPostPatch};
pub use query::{HospitalFilter, PageRequest};
