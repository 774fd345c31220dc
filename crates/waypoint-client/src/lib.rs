//! HTTP client for the Halo Waypoint mobile stats API
//!
//! This crate provides the outbound half of the Branch stats pipeline:
//! - Endpoint descriptors for the per-player and global stats endpoints
//! - A thin reqwest-based client that performs exactly one attempt per call
//! - The response envelope and payload models the caching layer inspects
//!
//! Caching and stale-fallback policy live in the `waypoint-cache` crate,
//! which wraps [`HttpClient`] the same way it would any other transport.

pub mod endpoint;
pub mod error;
pub mod http;
pub mod response;
pub mod title;

pub use endpoint::{Endpoint, VariantClass};
pub use error::{Error, Result};
pub use http::{HttpClient, RawResponse};
pub use response::{
    Challenge, Envelope, GameHistory, Metadata, Playlist, ServiceRecord, STATUS_OKAY,
    STATUS_PLAYER_FOUND,
};
pub use title::Title;
