use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::get,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    app::state::AppState,
    config::Config,
    middleware::rate_limiter::rate_limit_middleware,
    routes::{
        health::health_check,
        poster::get_poster,
        search::{get_info, search},
        session::{create_session, delete_session, get_session, update_session},
    },
    utils::rate_limiter::RateLimiter,
};

#[derive(Clone)]
pub struct AppContext {
    pub state: AppState,
    pub config: Config,
    pub rate_limiter: RateLimiter,
}

#[derive(OpenApi)]
#[openapi(
    info(title = "PosterOven API", version = "1.0.0"),
    paths(
        crate::routes::health::health_check,
        crate::routes::search::search,
        crate::routes::search::get_info,
        crate::routes::session::create_session,
        crate::routes::session::get_session,
        crate::routes::session::update_session,
        crate::routes::session::delete_session,
        crate::routes::poster::get_poster,
    ),
    components(schemas(
        crate::models::responses::ErrorResponse,
        crate::models::responses::SearchResponse,
        crate::models::responses::AlbumInfoResponse,
        crate::models::responses::CreateSessionResponse,
        crate::models::responses::HealthResponse,
        crate::models::requests::CreateSessionRequest,
        crate::models::requests::UpdateSessionRequest,
        crate::models::session::PosterSession,
    ))
)]
struct ApiDoc;

pub fn create_api_router(context: AppContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(
            context
                .config
                .server
                .cors_origins
                .iter()
                .filter_map(|origin| match origin.parse::<HeaderValue>() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                        None
                    }
                })
                .collect::<Vec<_>>(),
        )
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::CACHE_CONTROL])
        .allow_credentials(true);

    let router = Router::new()
        .route("/search", get(search))
        .route("/get-info", get(get_info))
        .route(
            "/session",
            get(get_session)
                .post(create_session)
                .put(update_session)
                .delete(delete_session),
        )
        .route("/poster", get(get_poster))
        .route("/health", get(health_check))
        .merge(SwaggerUi::new("/swagger-ui").url("/docs/openapi.json", ApiDoc::openapi()));

    let router = if context.config.server.rate_limit_per_second > 0 {
        router.layer(axum::middleware::from_fn_with_state(
            context.rate_limiter.clone(),
            rate_limit_middleware,
        ))
    } else {
        router
    };

    router
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(context)
}
