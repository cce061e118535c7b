use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderName, HeaderValue, StatusCode},
    response::{Html, IntoResponse},
};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info, warn};

use super::{
    API_VERSION_HEADER, AppState, CONNECTOR_API_VERSION, CONNECTOR_VERSION, ConnectorError,
    VERSION_HEADER,
};
use crate::translator::SaveItems;

const AVAILABLE_PAGE: &str = "<!DOCTYPE html>
<html>
    <head>
        <title>Connector Server is Available</title>
    </head>
    <body>
        Connector Server is Available
    </body>
</html>
";

fn protocol_headers() -> [(HeaderName, HeaderValue); 2] {
    [
        (
            HeaderName::from_static(VERSION_HEADER),
            HeaderValue::from_static(CONNECTOR_VERSION),
        ),
        (
            HeaderName::from_static(API_VERSION_HEADER),
            HeaderValue::from(CONNECTOR_API_VERSION),
        ),
    ]
}

pub(super) async fn ping_page() -> impl IntoResponse {
    debug!("ping (GET)");
    (StatusCode::OK, protocol_headers(), Html(AVAILABLE_PAGE))
}

pub(super) async fn ping_prefs() -> impl IntoResponse {
    debug!("ping (POST)");
    (
        StatusCode::OK,
        protocol_headers(),
        Json(json!({"prefs": {"automaticSnapshots": true}})),
    )
}

/// The collection the connector will report as the save target. There is no
/// real library behind it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SelectedCollection {
    #[serde(rename = "libraryID")]
    library_id: u32,
    library_name: &'static str,
    library_editable: bool,
    editable: bool,
    id: Option<u32>,
    name: &'static str,
}

pub(super) async fn selected_collection() -> impl IntoResponse {
    (
        StatusCode::OK,
        protocol_headers(),
        Json(SelectedCollection {
            library_id: 1,
            library_name: "",
            library_editable: true,
            editable: true,
            id: None,
            name: "",
        }),
    )
}

pub(super) async fn save_snapshot() -> impl IntoResponse {
    warn!("snapshot saving is not implemented");
    (StatusCode::CREATED, protocol_headers())
}

/// Convert and append the posted items, then echo the request body back.
pub(super) async fn save_items(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<impl IntoResponse, ConnectorError> {
    let request: SaveItems = serde_json::from_slice(&body)?;
    info!(items = request.items.len(), "saving items from connector");

    let records = state.pipeline.convert(request.items);
    let writer = state.writer.clone();
    tokio::task::spawn_blocking(move || writer.append(&records))
        .await
        .map_err(|e| ConnectorError::Write(e.into()))?
        .map_err(ConnectorError::Write)?;

    Ok((StatusCode::CREATED, protocol_headers(), body))
}
