//! Reasoning-API client and the two operations built on it.
//!
//! This crate provides:
//! - [`ReasonerClient`] — authenticated HTTP client for the chat endpoint
//! - [`classify`] — pitch → ordered sector tags
//! - [`evaluate`] — pitch + investor → match verdict

pub mod classify;
pub mod client;
pub mod evaluate;

pub use classify::classify;
pub use client::ReasonerClient;
pub use evaluate::evaluate;
