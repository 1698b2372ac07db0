//! Papertrade Infrastructure - adapters for the access layer's ports
//!
//! Implements the application crate's `HttpTransport` port with reqwest and
//! its `TokenPersistence` port with a config-dir file cache. Serialization
//! helpers keep the on-disk format deterministic.

pub mod persistence;
pub mod serialization;
pub mod transport;

pub use persistence::{FileTokenCache, MemoryTokenCache};
pub use transport::ReqwestTransport;
