//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external
//! systems. Each port is a trait implemented by an adapter in the
//! infrastructure layer.

mod token_persistence;
mod transport;

pub use token_persistence::{PersistenceError, TokenPersistence};
pub use transport::{HttpTransport, TransportError};
