//! Shelfwatch - Dark Kitchen Shelf State Viewer
//! Mission: at-a-glance situational awareness for the kitchen operator
//! Read-only: this process never sends anything upstream.

use anyhow::Result;
use clap::Parser;
use dotenv::dotenv;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shelfwatch::{
    config::Config,
    models::ConnectionStatus,
    session::Session,
    view::{freshness_percent, temperature_color, ShelfViewState, ViewEvent},
};

#[derive(Debug, Parser)]
#[command(name = "shelfwatch", about = "Live dark-kitchen shelf state viewer")]
struct Args {
    /// Base address of the upstream process, e.g. ws://127.0.0.1:8080.
    /// Falls back to WS_BACKEND_URL, then to the local default.
    #[arg(long)]
    ws_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    load_env();
    init_tracing();

    let args = Args::parse();
    let mut config = Config::from_env();
    if let Some(url) = args.ws_url {
        config.ws_base_url = url;
    }

    let endpoint = config.shelf_state_endpoint();
    info!("🍳 Shelfwatch starting");
    info!("📡 Shelf-state stream: {endpoint}");

    let mut session = Session::create(endpoint);
    let view = session.view();

    // Reactive render loop: one textual summary per state change.
    let render_view = view.clone();
    let mut updates = view.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = updates.recv().await {
            match event {
                ViewEvent::StateChanged => render_shelves(&render_view.current()),
                ViewEvent::StatusChanged(status) => {
                    info!("Status: {}", status.status_line());
                }
            }
        }
    });

    tokio::select! {
        status = session.run() => {
            report_terminal_status(status, view.malformed_snapshots());
        }
        _ = tokio::signal::ctrl_c() => {
            info!("received ctrl-c, shutting down");
        }
    }

    session.teardown();
    Ok(())
}

fn report_terminal_status(status: ConnectionStatus, malformed: u64) {
    info!(
        status = %status,
        malformed_snapshots = malformed,
        "shelf-state channel terminated; restart to reconnect"
    );
}

/// One line per order, mirroring the operator display: index, temperature
/// label with its color token, id, name, freshness percent.
fn render_shelves(state: &ShelfViewState) {
    info!(
        "🍲 Shelves updated | wasted (decay): {} | wasted (no space): {}",
        state.wasted_orders_decay, state.wasted_orders_no_space
    );
    for (shelf, orders) in &state.shelves {
        info!("  [{shelf}] {} order(s)", orders.len());
        for (idx, order) in orders.iter().enumerate() {
            info!(
                "    {idx} [{}/{}] {} {} - {}%",
                order.temp,
                temperature_color(&order.temp),
                order.id,
                order.name,
                freshness_percent(order)
            );
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shelfwatch=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn load_env() {
    // Standard dotenv search (cwd + parents), then the crate directory
    // for runs with --manifest-path from elsewhere.
    let _ = dotenv();

    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let candidate = manifest_dir.join(".env");
    if candidate.exists() {
        let _ = dotenv::from_path(&candidate);
    }
}
