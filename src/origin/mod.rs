//! Origin Module
//!
//! HTTP client used on cache misses.

mod client;

pub use client::OriginClient;
