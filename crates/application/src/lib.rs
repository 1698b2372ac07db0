//! Papertrade Application - the authenticated API access layer
//!
//! This crate implements the session core that every data-fetching hook in
//! the dashboard goes through: bearer stamping, authorization-failure
//! detection, single-flight token refresh, and the derived session view.
//! Network and storage concerns stay behind the ports defined here and are
//! implemented in the infrastructure crate.

pub mod authorizer;
pub mod client;
pub mod coordinator;
pub mod endpoints;
pub mod ports;
pub mod session;
pub mod token_store;

pub use authorizer::RequestAuthorizer;
pub use client::{ApiClient, ClientConfig};
pub use coordinator::{AuthEvent, CoordinatorState, RefreshCoordinator};
pub use session::SessionContext;
pub use token_store::{TokenStore, TokenStoreError};
