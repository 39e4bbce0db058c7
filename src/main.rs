//! hotelier server
//!
//! Starts the REST API over the two state containers:
//! - Identity store: demo principal directory + persisted session
//! - Hotel ledger: rooms, bookings, contact messages (Sled snapshots)
//!
//! Usage:
//!   cargo run --bin seed_data    # (re)populate the demo inventory
//!   cargo run --bin hotelier     # start the server
//!   # Then drive it with hotelier-cli or curl (see README)

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use hotelier::config::Config;
use hotelier::hotel::HotelLedger;
use hotelier::identity::IdentityStore;
use hotelier::rest::{create_router, AppState};
use hotelier::storage::Storage;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env();
    let addr: SocketAddr = config.addr.parse()?;

    info!("🏨 hotelier starting");
    info!(data_dir = %config.data_dir, "📦 storage: Sled JSON snapshots (write-through)");

    // Shared snapshot store; both containers write through it
    let storage = Storage::open(&config.data_dir)?;
    let identity = Arc::new(IdentityStore::open(storage.clone())?);
    let hotel = Arc::new(HotelLedger::open(storage)?);

    let state = Arc::new(AppState {
        identity,
        hotel,
        jwt_secret: config.jwt_secret,
    });
    let app = create_router(state);

    info!(%addr, "🌐 REST (Axum) listening");
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
