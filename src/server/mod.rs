//! Browser connector endpoint.
//!
//! The capture extension probes a local listener before falling back to its
//! own storage. These routes answer its handshake and turn saved items into
//! BibTeX records appended to the bibliography file.
//!
//! | Method | Path | Response |
//! |--------|------|----------|
//! | `GET`  | `/connector/ping` | `200`, HTML availability page |
//! | `POST` | `/connector/ping` | `200`, `{"prefs":{"automaticSnapshots":true}}` |
//! | `POST` | `/connector/getSelectedCollection` | `200`, placeholder collection |
//! | `POST` | `/connector/saveSnapshot` | `201`, nothing stored |
//! | `POST` | `/connector/saveItems` | `201`, request body echoed |
//!
//! Every handled response carries the protocol version headers. Other
//! paths and methods get the router's default `404`/`405`.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{bibtex::writer::BibliographyWriter, config::ServerConfig, pipeline::Pipeline};

mod error;
mod handlers;

pub use error::ConnectorError;

/// Application version reported to the connector.
pub const CONNECTOR_VERSION: &str = "5.0.25";
/// Connector API revision this endpoint speaks.
pub const CONNECTOR_API_VERSION: u32 = 2;

pub const VERSION_HEADER: &str = "x-zotero-version";
pub const API_VERSION_HEADER: &str = "x-zotero-connector-api-version";

/// State shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Pipeline,
    pub writer: BibliographyWriter,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/connector/ping", get(handlers::ping_page).post(handlers::ping_prefs))
        .route("/connector/getSelectedCollection", post(handlers::selected_collection))
        .route("/connector/saveSnapshot", post(handlers::save_snapshot))
        .route("/connector/saveItems", post(handlers::save_items))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Bind the configured address and serve until the process is terminated.
pub async fn serve(config: &ServerConfig, pipeline: Pipeline) -> anyhow::Result<()> {
    let state = AppState {
        pipeline,
        writer: BibliographyWriter::new(&config.output),
    };

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(
        addr = %listener.local_addr()?,
        output = %state.writer.path().display(),
        "connector server listening"
    );
    axum::serve(listener, router(state)).await?;
    Ok(())
}
