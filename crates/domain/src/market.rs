//! Read models for the dashboard's data-fetching hooks.
//!
//! Shapes mirror the backend's portfolio, trading, and community schemas.
//! These are consumed by presentation code; the core only moves them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Portfolio overview with key metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// Total account value (cash + positions).
    pub total_value: f64,
    /// Uninvested cash balance.
    pub cash_balance: f64,
    /// Value currently held in positions.
    pub invested_value: f64,
    /// Total profit and loss.
    pub total_pnl: f64,
    /// Total profit and loss, in percent.
    pub total_pnl_percentage: f64,
    /// Profit and loss for the current day.
    pub day_pnl: f64,
    /// Day profit and loss, in percent.
    pub day_pnl_percentage: f64,
    /// Number of open positions.
    pub positions_count: u32,
    /// Number of trades ever executed.
    pub total_trades: u32,
    /// Fraction of winning trades, in percent.
    pub win_rate: f64,
    /// When these metrics were computed.
    pub updated_at: DateTime<Utc>,
}

/// A single open position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Position identifier.
    pub id: String,
    /// Stock symbol, e.g. `AAPL`.
    pub symbol: String,
    /// Shares held.
    pub quantity: u32,
    /// Average entry price.
    pub average_price: f64,
    /// Total acquisition cost.
    pub total_cost: f64,
    /// Latest market price.
    pub current_price: f64,
    /// Latest market value.
    pub current_value: f64,
    /// Unrealized profit and loss.
    pub pnl: f64,
    /// Unrealized profit and loss, in percent.
    pub pnl_percentage: f64,
    /// Last valuation timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Positions list with aggregate valuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionsList {
    /// Open positions.
    pub positions: Vec<Position>,
    /// Combined market value.
    pub total_value: f64,
    /// Combined unrealized profit and loss.
    pub total_pnl: f64,
    /// Combined unrealized profit and loss, in percent.
    pub total_pnl_percentage: f64,
}

/// A single executed trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    /// Trade identifier.
    pub id: String,
    /// Stock symbol.
    pub symbol: String,
    /// `BUY` or `SELL`.
    pub trade_type: String,
    /// Shares traded.
    pub quantity: u32,
    /// Execution price.
    pub price: f64,
    /// Total trade value.
    pub total_value: f64,
    /// Execution status.
    pub status: String,
    /// When the trade was recorded.
    pub created_at: DateTime<Utc>,
}

/// Paginated trade history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeHistory {
    /// Trades for the requested page.
    pub trades: Vec<TradeRecord>,
    /// Total number of trades across all pages.
    pub total_count: u32,
    /// Requested page number.
    pub page: u32,
    /// Requested page size.
    pub page_size: u32,
}

/// A single leaderboard row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Rank within the period.
    pub rank: u32,
    /// User identifier.
    pub user_id: String,
    /// Display username.
    pub username: String,
    /// Optional avatar image URL.
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// Return for the period, in percent.
    pub return_percentage: f64,
    /// Trades executed in the period.
    pub total_trades: u32,
    /// Fraction of winning trades, in percent.
    pub win_rate: f64,
    /// Whether this row is the requesting user.
    #[serde(default)]
    pub is_current_user: bool,
}

/// Trader rankings for a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    /// Ranked entries, best first.
    pub entries: Vec<LeaderboardEntry>,
    /// Period the ranking covers: `weekly`, `monthly`, or `all_time`.
    pub period: String,
    /// Number of traders ranked.
    pub total_participants: u32,
    /// Requesting user's rank, when authenticated and ranked.
    #[serde(default)]
    pub current_user_rank: Option<u32>,
    /// When the ranking was computed.
    pub updated_at: String,
}

/// Model prediction for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Stock symbol.
    pub symbol: String,
    /// Predicted movement: `UP` or `DOWN`.
    pub direction: String,
    /// Probability of upward movement, 0 to 1.
    pub up_probability: f64,
    /// Probability of downward movement, 0 to 1.
    pub down_probability: f64,
    /// Expected return.
    pub predicted_return: f64,
    /// Expected return, in percent.
    pub predicted_return_percentage: f64,
    /// Model confidence, 0 to 1.
    pub confidence: f64,
    /// `STRONG`, `MODERATE`, or `WEAK`.
    pub signal_strength: String,
    /// Horizon the prediction covers, e.g. `15min`.
    pub prediction_horizon: String,
    /// Version of the model that produced this prediction.
    pub model_version: String,
    /// When the prediction was generated.
    pub generated_at: DateTime<Utc>,
}

/// Generated market context for a symbol (the "why" panel).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketContext {
    /// Stock symbol.
    pub symbol: String,
    /// `BULLISH`, `BEARISH`, or `NEUTRAL`.
    pub sentiment: String,
    /// Confidence in the sentiment, 0 to 1.
    pub confidence: f64,
    /// One-sentence summary of the sentiment.
    pub summary: String,
    /// Top factors driving the sentiment.
    pub key_factors: Vec<String>,
    /// `BUY`, `HOLD`, `SELL`, or `AVOID`, when available.
    #[serde(default)]
    pub recommendation: Option<String>,
    /// When the context was computed.
    pub updated_at: DateTime<Utc>,
}

/// One tradeable stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockInfo {
    /// Stock symbol.
    pub symbol: String,
    /// Company name.
    pub name: String,
    /// Sector, when known.
    #[serde(default)]
    pub sector: Option<String>,
    /// Industry, when known.
    #[serde(default)]
    pub industry: Option<String>,
    /// Whether the symbol can currently be traded.
    pub is_tradeable: bool,
}

/// Stocks the prediction model supports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockList {
    /// Available stocks.
    pub stocks: Vec<StockInfo>,
    /// Number of available stocks.
    pub total: u32,
}
