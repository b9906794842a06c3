//! Proxy Handler
//!
//! Serves every inbound request from the cache or, on a miss, from the origin.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    body::Bytes,
    extract::{OriginalUri, State},
    http::{header::CONTENT_TYPE, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use crate::cache::CacheStore;
use crate::config::Config;
use crate::error::Result;
use crate::origin::OriginClient;

/// Response header carrying the cache outcome.
pub const X_CACHE: &str = "x-cache";

/// Application state shared across all handlers.
///
/// The cache is the only mutable state; the origin client is shared
/// read-only.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe cache store
    pub cache: Arc<RwLock<CacheStore>>,
    /// Client for the configured origin
    pub origin: OriginClient,
}

impl AppState {
    /// Creates a new AppState with the given cache store and origin client.
    pub fn new(cache: CacheStore, origin: OriginClient) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
            origin,
        }
    }

    /// Creates a new AppState with an empty cache from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let origin = OriginClient::new(config.origin.clone(), config.origin_timeout)?;
        Ok(Self::new(CacheStore::new(), origin))
    }

    /// Empties the cache, returning how many entries were removed.
    pub async fn clear_cache(&self) -> usize {
        self.cache.write().await.clear()
    }
}

/// Whether a response came from the cache or the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
}

impl CacheStatus {
    /// Value sent in the `X-Cache` header.
    pub fn as_str(self) -> &'static str {
        match self {
            CacheStatus::Hit => "HIT",
            CacheStatus::Miss => "MISS",
        }
    }
}

/// A successful proxy response: an origin body and where it came from.
#[derive(Debug, Clone)]
pub struct Relay {
    pub status: CacheStatus,
    pub body: Bytes,
}

impl IntoResponse for Relay {
    fn into_response(self) -> Response {
        (
            StatusCode::OK,
            [
                (CONTENT_TYPE.as_str(), "application/json"),
                (X_CACHE, self.status.as_str()),
            ],
            self.body,
        )
            .into_response()
    }
}

/// Extracts the cache key: the request target's path and query, untouched.
pub fn cache_key(uri: &Uri) -> &str {
    uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/")
}

/// Fallback handler for every method and path.
///
/// The inbound method, headers and body are ignored; the origin always
/// receives a plain GET for the same target.
pub async fn proxy_handler(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
) -> Response {
    let key = cache_key(&uri);
    resolve(&state, key).await.into_response()
}

/// Answers `key` from the cache, falling back to the origin.
///
/// The cache lock is only held for the lookup and for the store; never
/// while the origin is being fetched. A failed fetch leaves the cache
/// untouched.
pub async fn resolve(state: &AppState, key: &str) -> Result<Relay> {
    let cached = state.cache.write().await.get(key);
    if let Some(body) = cached {
        debug!(key, "cache hit");
        return Ok(Relay {
            status: CacheStatus::Hit,
            body,
        });
    }

    debug!(key, "cache miss");
    let body = state.origin.fetch(key).await.map_err(|e| {
        warn!(key, error = %e, "origin fetch failed");
        e
    })?;

    state.cache.write().await.put(key, body.clone());
    Ok(Relay {
        status: CacheStatus::Miss,
        body,
    })
}
