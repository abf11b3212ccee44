use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};

use crate::{
    app::api::AppContext,
    error::AppError,
    models::{
        requests::{IdQuery, required},
        responses::ErrorResponse,
    },
};

#[utoipa::path(
    get,
    path = "/poster",
    tag = "Poster",
    params(IdQuery),
    responses(
        (status = 200, description = "Rendered poster bytes (PNG or JPEG)", content_type = "image/png"),
        (status = 400, description = "Missing session id", body = ErrorResponse),
        (status = 404, description = "Session not found or expired", body = ErrorResponse),
        (status = 500, description = "Asset fetch or rendering failed", body = ErrorResponse)
    )
)]
pub async fn get_poster(
    State(context): State<AppContext>,
    Query(params): Query<IdQuery>,
) -> Result<Response, AppError> {
    let session_id = required(params.id, "Session ID")?;
    let poster = context.state.posters.assemble(&session_id).await?;

    Ok(([(header::CONTENT_TYPE, poster.content_type)], poster.bytes).into_response())
}
