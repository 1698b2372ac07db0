//! Papertrade dashboard client binary.
//!
//! Logs into the trading backend (or restores a cached session), then
//! prints the portfolio summary and the community leaderboard.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use papertrade_application::{ApiClient, ClientConfig};
use papertrade_domain::Credentials;
use papertrade_infrastructure::{FileTokenCache, ReqwestTransport};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_url =
        std::env::var("PAPERTRADE_API_URL").unwrap_or_else(|_| "http://127.0.0.1:8000".to_string());

    tracing::info!(%base_url, "starting papertrade v{}", env!("CARGO_PKG_VERSION"));

    let transport = Arc::new(ReqwestTransport::new(&base_url)?);
    let cache = Arc::new(FileTokenCache::in_user_config()?);
    let client = ApiClient::new(transport, cache, ClientConfig::default());

    let email = std::env::var("PAPERTRADE_EMAIL").ok();
    let password = std::env::var("PAPERTRADE_PASSWORD").ok();

    let session = match (email, password) {
        (Some(email), Some(password)) => {
            client.login(&Credentials::new(email, password)).await?
        }
        _ => client.initialize().await?,
    };

    let Some(user) = session.user else {
        println!("Not logged in. Set PAPERTRADE_EMAIL and PAPERTRADE_PASSWORD to sign in.");
        return Ok(());
    };
    println!("Signed in as {} ({})", user.username, user.email);
    println!("Paper balance: ${:.2}", user.paper_balance);

    let summary = client.portfolio_summary().await?;
    println!(
        "Portfolio: ${:.2} total, {} positions, P&L {:+.2}%",
        summary.total_value, summary.positions_count, summary.total_pnl_percentage
    );

    let leaderboard = client.leaderboard("weekly", 10).await?;
    println!("Weekly leaderboard:");
    for entry in &leaderboard.entries {
        println!(
            "  #{:<3} {:<20} {:+.2}%",
            entry.rank, entry.username, entry.return_percentage
        );
    }

    Ok(())
}
