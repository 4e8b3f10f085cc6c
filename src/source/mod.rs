//! Content source access
//!
//! This module wraps the remote board API:
//! - Building the HTTP client with the configured timeout and user agent
//! - Fetching board listings, catalogs, threads and raw media bytes
//! - Mapping wire payloads onto the crate's data model
//!
//! Every network operation returns [`Fetched`], so callers decide explicitly
//! what a failure means for them.

mod client;
mod fetcher;
mod wire;

pub use client::{ContentClient, Endpoints};
pub use fetcher::{build_http_client, fetch_bytes, fetch_json, Fetched};
pub use wire::{BoardList, CatalogPage, CatalogThread, ThreadPayload, WireBoard, WirePost};
