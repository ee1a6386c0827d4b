//! # pqqobuz - Qobuz catalog search adapter
//!
//! This crate provides the catalog side of PartyQueue:
//! - A small HTTP client for Qobuz track search (timeouts, retries)
//! - Lenient deserialization of upstream payloads
//! - Normalization into queue-ready tracks (fallback title/artist,
//!   cover resolution, synthesized ids)
//! - A REST endpoint (`GET /search`) ready to be nested in a server
//!
//! The adapter is read-only and stateless: it never authenticates a
//! user session and never caches results.

pub mod api_rest;
mod client;
mod config_ext;
mod error;
pub mod models;
pub mod openapi;

pub use client::{ClientBuilder, QobuzClient, SearchPage, DEFAULT_BASE_URL};
pub use config_ext::QobuzConfigExt;
pub use error::{QobuzError, Result};
pub use models::NormalizedTrack;
