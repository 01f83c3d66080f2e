//! # vigil-core
//!
//! Core types, capability traits, and error types for Vigil.
//!
//! This crate provides the foundational types shared across all Vigil crates:
//! - Entity structs for messages, assessments, and audit records
//! - The per-target pipeline [`Stage`](enums::Stage) enum and its transition table
//! - Alert markers and pipeline outcomes
//! - The compact duration parser used for retention windows
//! - Async traits for the external capabilities (message source, content
//!   fetcher, assessor) so clients can be swapped for fakes in tests
//! - Cross-cutting error types
//! - `Retry-After` handling shared by the HTTP adapters

pub mod capabilities;
pub mod duration;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod rate_limit;
