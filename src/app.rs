use axum::{
    Router,
    body::Body,
    http::Request,
    routing::{delete, get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::info_span;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    app_state::AppState,
    health::health_check,
    openapi::ApiDoc,
    posts::handlers::{delete_post, get_post, list_admin_posts, list_posts, save_post, sitemap},
};

/// Full HTTP surface: public blog API, admin API, sitemap, health and docs.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/posts", get(list_posts))
        .route("/api/posts/{slug}", get(get_post))
        .route("/api/admin/posts", post(save_post).get(list_admin_posts))
        .route("/api/admin/posts/{id}", delete(delete_post))
        .route("/sitemap.xml", get(sitemap))
        .route("/healthz", get(health_check))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    let request_id = request
                        .headers()
                        .get("x-request-id")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("-");
                    info_span!(
                        "http",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %request_id,
                    )
                }))
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .with_state(state)
}
