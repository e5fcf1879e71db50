// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod bands;
mod handlers;
mod live;
mod session;

#[cfg(test)]
mod tests;

use axum::{
    Router,
    routing::{get, patch, post},
};
use clap::Parser;
use gigbook_persistence::Persistence;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use crate::bands::PersistenceBandDirectory;
use crate::handlers::{
    handle_add_song, handle_create_setlist, handle_get_history, handle_get_setlist,
    handle_list_setlists, handle_move_song, handle_remove_set, handle_remove_song,
    handle_rename_set, handle_update_entry, handle_update_setlist,
};
use crate::live::{CollaborationHub, handle_live};

/// Gigbook Server - HTTP and live collaboration server for band setlists
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Address to bind the server to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// The persistence layer is wrapped in a Mutex to allow safe concurrent
/// access. Handlers never hold it across a band lookup, because the band
/// directory takes the same lock.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for setlists, bands and songs.
    persistence: Arc<Mutex<Persistence>>,
    /// Band membership lookups.
    bands: PersistenceBandDirectory,
    /// Live collaboration rooms.
    hub: Arc<CollaborationHub>,
}

impl AppState {
    /// Creates the shared state over an initialized persistence layer.
    fn new(persistence: Persistence) -> Self {
        let persistence: Arc<Mutex<Persistence>> = Arc::new(Mutex::new(persistence));
        Self {
            bands: PersistenceBandDirectory::new(Arc::clone(&persistence)),
            persistence,
            hub: Arc::new(CollaborationHub::new()),
        }
    }
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/setlists",
            post(handle_create_setlist).get(handle_list_setlists),
        )
        .route(
            "/setlists/{id}",
            get(handle_get_setlist).patch(handle_update_setlist),
        )
        .route("/setlists/{id}/songs", post(handle_add_song))
        .route("/setlists/{id}/songs/move", post(handle_move_song))
        .route(
            "/setlists/{id}/sets/{set}",
            patch(handle_rename_set).delete(handle_remove_set),
        )
        .route(
            "/setlists/{id}/sets/{set}/songs/{song}",
            patch(handle_update_entry).delete(handle_remove_song),
        )
        .route("/setlists/{id}/history", get(handle_get_history))
        .route("/setlists/{id}/live", get(handle_live))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Gigbook Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };
    persistence.verify_foreign_key_enforcement()?;

    let app: Router = build_router(AppState::new(persistence));

    // Bind to address
    let addr: std::net::SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
