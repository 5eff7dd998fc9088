use std::time::Duration;

use axum::{
    error_handling::HandleErrorLayer, http::StatusCode, routing::get, BoxError, Extension, Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    app_module::AppState, assistant::assistant_controller::assistant_router,
    forum::forum_controller::forum_router, health::health_controller,
};

pub fn application_router() -> Router {
    Router::new()
        .route("/v1/health", get(health_controller::health))
        .nest("/v1/assistant", assistant_router())
        .nest("/v1/forum", forum_router())
}

/// The full application with state, tracing, CORS and a request deadline.
pub fn build_app(state: AppState, request_timeout: Duration) -> Router {
    Router::new().merge(application_router()).layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(|error: BoxError| async move {
                if error.is::<tower::timeout::error::Elapsed>() {
                    Ok(StatusCode::REQUEST_TIMEOUT)
                } else {
                    Err((
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Unhandled internal error: {}", error),
                    ))
                }
            }))
            .timeout(request_timeout)
            .layer(TraceLayer::new_for_http())
            .layer(Extension(state))
            .layer(
                CorsLayer::new()
                    .allow_origin(tower_http::cors::Any)
                    .allow_methods(tower_http::cors::Any)
                    .allow_headers(tower_http::cors::Any),
            )
            .into_inner(),
    )
}
