//! Data-access layer for the OFAC search backend.
//!
//! [`RemoteDataClient`] wraps the five read-only routes the web UI uses:
//! search, an SDN's alternate names and addresses, and the value lists for
//! SDN types and programs. Each call is a single GET whose JSON body is
//! decoded into the matching type from `models`.

pub mod client;
pub mod endpoint;
pub mod errors;
pub mod query;
pub mod transport;

pub use client::RemoteDataClient;
pub use configs::{ClientConfig, StatusPolicy};
pub use endpoint::{Endpoint, ValueKey};
pub use errors::ClientError;
pub use query::SearchQuery;
pub use transport::{HttpTransport, RawResponse, Transport};
