//! Response selection for validated requests.
//!
//! This module decides what a request gets back: a locally served file, a
//! redirect to the peer server holding it, or a 404. The peer registry is
//! loaded once at startup and read-only afterwards.

pub mod registry;
pub mod router;

pub use registry::{PeerAddr, PeerRegistry};
pub use router::Router;
