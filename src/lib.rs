//! Caching Proxy - A local HTTP caching proxy
//!
//! Forwards requests to a single origin and answers repeated requests for the
//! same path and query from memory.

pub mod cache;
pub mod config;
pub mod error;
pub mod origin;
pub mod proxy;

pub use config::{Cli, Command, Config};
pub use error::{ProxyError, Result};
pub use proxy::{create_router, AppState};
