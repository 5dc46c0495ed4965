//! API Module
//!
//! HTTP handlers, routing and response memoization for the cache service.
//!
//! # Endpoints
//! - `PUT /set` - Store a key-value pair
//! - `GET /get/:key` - Retrieve a value by key
//! - `DELETE /del/:key` - Delete a key
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint
//!
//! The [`response_cache`] middleware is exported for host applications that
//! want to memoize entire GET responses of their own routes.

pub mod handlers;
pub mod response_cache;
pub mod routes;

pub use handlers::*;
pub use response_cache::response_cache;
pub use routes::create_router;
