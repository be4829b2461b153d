//! Shared plumbing for the OFAC client workspace: logging setup and
//! client-side metrics.

pub mod observability;
pub mod utils;
