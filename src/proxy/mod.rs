//! Proxy Module
//!
//! Request handling and routing for the caching proxy.
//!
//! Every request, whatever its method or path, is answered from the cache
//! when its path-and-query has been seen before, and from the origin
//! otherwise. Responses carry `X-Cache: HIT` or `X-Cache: MISS`.

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
