//! Authentication types for the Papertrade client.
//!
//! This module provides:
//! - The access/refresh token pair and its wire representation
//! - Login and registration DTOs matching the backend contract
//! - The derived session view consumed by the UI layer

mod credentials;
mod session;
mod tokens;

pub use credentials::{Credentials, LoginResponse, RegisterReceipt, Registration};
pub use session::{Session, UserProfile};
pub use tokens::{TokenPair, TokenResponse};
