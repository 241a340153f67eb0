use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{Item, Manifest, Stream},
    services::{filter_by_type, streams_for, CacheSlot},
};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub item_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StreamQuery {
    pub id: Option<String>,
}

/// Catalog entry as shown in the client's browse view
#[derive(Debug, Serialize)]
pub struct MetaPreview {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<Item> for MetaPreview {
    fn from(item: Item) -> Self {
        Self {
            item_type: item.item_type,
            id: item.id,
            name: item.name,
            poster: item.poster,
            description: item.description,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub metas: Vec<MetaPreview>,
}

#[derive(Debug, Serialize)]
pub struct StreamsResponse {
    pub streams: Vec<Stream>,
}

// Handlers

/// Health check endpoint. Reports cache state without triggering a load.
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    match state.loader.cache().state().await {
        CacheSlot::Empty => Json(json!({ "status": "healthy", "loaded": false, "items": 0 })),
        CacheSlot::Populated(collection) => Json(json!({
            "status": "healthy",
            "loaded": true,
            "items": collection.len(),
            "loaded_at": collection.loaded_at,
        })),
    }
}

/// Static addon descriptor
pub async fn manifest() -> Json<Manifest> {
    Json(Manifest::addon())
}

/// Search and filter the catalog
pub async fn catalog(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<CatalogQuery>,
) -> AppResult<Json<CatalogResponse>> {
    state.loader.load().await?;

    let item_type = params.item_type.as_deref().filter(|t| !t.is_empty());
    let items = state.catalog.search(params.search.as_deref()).await?;
    let items = filter_by_type(items, item_type);

    tracing::info!(
        request_id = %request_id,
        search = params.search.as_deref().unwrap_or_default(),
        item_type = item_type.unwrap_or_default(),
        results = items.len(),
        "Catalog query completed"
    );

    Ok(Json(CatalogResponse {
        metas: items.into_iter().map(MetaPreview::from).collect(),
    }))
}

/// Playable streams for one item
pub async fn stream(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<StreamQuery>,
) -> AppResult<Json<StreamsResponse>> {
    state.loader.load().await?;

    let id = params
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::InvalidInput("Missing id parameter".to_string()))?;

    let item = state
        .catalog
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Item not found".to_string()))?;

    let streams = streams_for(&item);
    tracing::info!(
        request_id = %request_id,
        id = %id,
        streams = streams.len(),
        "Streams resolved"
    );

    Ok(Json(StreamsResponse { streams }))
}
