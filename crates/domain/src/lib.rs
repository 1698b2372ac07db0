//! Papertrade Domain - Core types for the trading dashboard client
//!
//! This crate defines the domain model for the Papertrade API client.
//! All types here are pure Rust with no I/O dependencies.

pub mod auth;
pub mod error;
pub mod market;
pub mod request;
pub mod response;

pub use auth::{
    Credentials, LoginResponse, RegisterReceipt, Registration, Session, TokenPair, TokenResponse,
    UserProfile,
};
pub use error::{ApiError, ApiResult};
pub use market::{
    Leaderboard, LeaderboardEntry, MarketContext, PortfolioSummary, Position, PositionsList,
    Prediction, StockInfo, StockList, TradeHistory, TradeRecord,
};
pub use request::{HttpMethod, RequestDescriptor, RetryState};
pub use response::ApiResponse;
