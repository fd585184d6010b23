//! HTTP transport for the WSDOT traveler information API.
//!
//! Every request is a GET authenticated with an `AccessCode` query
//! parameter. A response is accepted only when it is a 200 carrying a
//! non-empty `application/json` body; anything else is a [`TransportError`].

mod client;
mod error;
mod pool;

pub use client::{DEFAULT_BASE_URL, WsdotClient, WsdotConfig};
pub use error::TransportError;
pub use pool::{SharedPoolGuard, close_shared_pool, shared_pool};
