use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{
    app::api::AppContext,
    error::AppError,
    models::{
        requests::{CreateSessionRequest, IdQuery, UpdateSessionRequest, required},
        responses::{CreateSessionResponse, ErrorResponse},
        session::PosterSession,
    },
};

#[utoipa::path(
    post,
    path = "/session",
    tag = "Session",
    request_body = CreateSessionRequest,
    responses(
        (status = 200, description = "Session created", body = CreateSessionResponse),
        (status = 400, description = "Missing albumId", body = ErrorResponse),
        (status = 500, description = "Album lookup failed", body = ErrorResponse)
    )
)]
pub async fn create_session(
    State(context): State<AppContext>,
    payload: Result<Json<CreateSessionRequest>, JsonRejection>,
) -> Result<Json<CreateSessionResponse>, AppError> {
    let Json(req) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    let album_id = required(req.album_id, "albumId")?;

    let session = context.state.sessions.start_session(&album_id).await?;

    Ok(Json(CreateSessionResponse {
        session_id: session.id.clone(),
        session,
    }))
}

#[utoipa::path(
    get,
    path = "/session",
    tag = "Session",
    params(IdQuery),
    responses(
        (status = 200, description = "Session found", body = PosterSession),
        (status = 400, description = "Missing session id", body = ErrorResponse),
        (status = 404, description = "Session not found or expired", body = ErrorResponse)
    )
)]
pub async fn get_session(
    State(context): State<AppContext>,
    Query(params): Query<IdQuery>,
) -> Result<Json<PosterSession>, AppError> {
    let session_id = required(params.id, "Session ID")?;
    let session = context.state.sessions.get_session(&session_id).await?;

    Ok(Json(session))
}

#[utoipa::path(
    put,
    path = "/session",
    tag = "Session",
    request_body = UpdateSessionRequest,
    responses(
        (status = 200, description = "Merged session", body = PosterSession),
        (status = 400, description = "Missing sessionId or malformed updates", body = ErrorResponse),
        (status = 404, description = "Session not found or expired", body = ErrorResponse)
    )
)]
pub async fn update_session(
    State(context): State<AppContext>,
    payload: Result<Json<UpdateSessionRequest>, JsonRejection>,
) -> Result<Json<PosterSession>, AppError> {
    let Json(req) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    let session_id = required(req.session_id, "sessionId")?;

    let session = context
        .state
        .sessions
        .update_session(&session_id, req.updates)
        .await?;

    Ok(Json(session))
}

#[utoipa::path(
    delete,
    path = "/session",
    tag = "Session",
    params(IdQuery),
    responses(
        (status = 204, description = "Session removed (or was already gone)"),
        (status = 400, description = "Missing session id", body = ErrorResponse)
    )
)]
pub async fn delete_session(
    State(context): State<AppContext>,
    Query(params): Query<IdQuery>,
) -> Result<StatusCode, AppError> {
    let session_id = required(params.id, "Session ID")?;
    context.state.sessions.delete_session(&session_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
