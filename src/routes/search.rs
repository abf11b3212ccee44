use axum::{
    Json,
    extract::{Query, State},
};

use crate::{
    app::api::AppContext,
    error::AppError,
    models::{
        requests::{IdQuery, SearchQuery, required},
        responses::{AlbumInfoResponse, ErrorResponse, SearchResponse},
    },
};

#[utoipa::path(
    get,
    path = "/search",
    tag = "Albums",
    params(SearchQuery),
    responses(
        (status = 200, description = "Albums matching the query", body = SearchResponse),
        (status = 400, description = "Missing query or quantity", body = ErrorResponse),
        (status = 500, description = "Search backend failed", body = ErrorResponse)
    )
)]
pub async fn search(
    State(context): State<AppContext>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, AppError> {
    let query = required(params.query, "query")?;
    let quantity = required(params.quantity, "quantity")?;
    let quantity = quantity
        .parse::<u32>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| AppError::Validation("quantity must be a positive integer".to_string()))?;

    let result = context.state.backend.search(&query, quantity).await?;

    tracing::info!(query = %query, quantity, albums = result.albums.len(), "Search completed");
    Ok(Json(SearchResponse { result }))
}

#[utoipa::path(
    get,
    path = "/get-info",
    tag = "Albums",
    params(IdQuery),
    responses(
        (status = 200, description = "Album metadata", body = AlbumInfoResponse),
        (status = 400, description = "Missing album id", body = ErrorResponse),
        (status = 500, description = "Search backend failed", body = ErrorResponse)
    )
)]
pub async fn get_info(
    State(context): State<AppContext>,
    Query(params): Query<IdQuery>,
) -> Result<Json<AlbumInfoResponse>, AppError> {
    let album_id = required(params.id, "id")?;
    let result = context.state.backend.album_info(&album_id).await?;

    Ok(Json(AlbumInfoResponse { result }))
}
