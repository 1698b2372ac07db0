//! Typed fetchers for the dashboard read models.

use serde::de::DeserializeOwned;

use papertrade_domain::{
    ApiError, ApiResult, Leaderboard, MarketContext, PortfolioSummary, PositionsList, Prediction,
    RequestDescriptor, StockList, TradeHistory,
};

use crate::client::ApiClient;

const PORTFOLIO_SUMMARY_PATH: &str = "/api/portfolio/summary";
const POSITIONS_PATH: &str = "/api/trade/positions";
const TRADE_HISTORY_PATH: &str = "/api/trade/history";
const LEADERBOARD_PATH: &str = "/api/community/leaderboard";
const STOCKS_PATH: &str = "/api/stocks";
const PREDICTIONS_PATH: &str = "/api/predictions";
const MARKET_CONTEXT_PATH: &str = "/api/market-context";

impl ApiClient {
    /// Fetches the portfolio summary for the current user.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::ApiClient::execute`] failures; a well-formed
    /// response that does not match the schema maps to
    /// [`ApiError::Transport`].
    pub async fn portfolio_summary(&self) -> ApiResult<PortfolioSummary> {
        self.fetch(RequestDescriptor::get(PORTFOLIO_SUMMARY_PATH))
            .await
    }

    /// Fetches the open positions for the current user.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::ApiClient::execute`] failures.
    pub async fn positions(&self) -> ApiResult<PositionsList> {
        self.fetch(RequestDescriptor::get(POSITIONS_PATH)).await
    }

    /// Fetches a page of trade history.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::ApiClient::execute`] failures.
    pub async fn trade_history(&self, page: u32, page_size: u32) -> ApiResult<TradeHistory> {
        self.fetch(
            RequestDescriptor::get(TRADE_HISTORY_PATH)
                .with_query("page", page.to_string())
                .with_query("page_size", page_size.to_string()),
        )
        .await
    }

    /// Fetches the community leaderboard.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::ApiClient::execute`] failures.
    pub async fn leaderboard(&self, period: &str, limit: u32) -> ApiResult<Leaderboard> {
        self.fetch(
            RequestDescriptor::get(LEADERBOARD_PATH)
                .with_query("period", period)
                .with_query("limit", limit.to_string()),
        )
        .await
    }

    /// Fetches the stocks the prediction model supports.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::ApiClient::execute`] failures.
    pub async fn stocks(&self) -> ApiResult<StockList> {
        self.fetch(RequestDescriptor::get(STOCKS_PATH)).await
    }

    /// Fetches the model prediction for a symbol.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::ApiClient::execute`] failures.
    pub async fn prediction(&self, symbol: &str) -> ApiResult<Prediction> {
        self.fetch(RequestDescriptor::get(format!("{PREDICTIONS_PATH}/{symbol}")))
            .await
    }

    /// Fetches the generated market context for a symbol.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::ApiClient::execute`] failures.
    pub async fn market_context(&self, symbol: &str) -> ApiResult<MarketContext> {
        self.fetch(RequestDescriptor::get(format!(
            "{MARKET_CONTEXT_PATH}/{symbol}"
        )))
        .await
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestDescriptor) -> ApiResult<T> {
        let response = self.execute(request).await?;
        response
            .json()
            .map_err(|e| ApiError::Transport(format!("malformed response body: {e}")))
    }
}
