use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::{
    app_state::AppState,
    auth::{
        AdminUser,
        dtos::{ErrorResponse, error_response},
    },
    content::audit_images,
    entities::Post,
    posts::{
        dtos::{PostListQuery, PostListResponse, SavePostRequest},
        view::PostView,
    },
    seo::generate_sitemap,
};

/// Create a post, or update it when the payload carries an `id`.
#[utoipa::path(
    post,
    path = "/api/admin/posts",
    tag = "admin",
    request_body = SavePostRequest,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Post saved", body = Post),
        (status = 400, description = "Invalid payload or unknown post", body = ErrorResponse),
        (status = 401, description = "Missing token or not an admin", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
#[instrument(skip_all, fields(user_id = %admin.0.user_id))]
pub async fn save_post(
    admin: AdminUser,
    State(state): State<AppState>,
    payload: Result<Json<SavePostRequest>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            return error_response(StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };

    let id = payload.id;
    let draft = match payload.into_draft() {
        Ok(draft) => draft,
        Err(error) => return error_response(StatusCode::BAD_REQUEST, error),
    };

    for (src, report) in audit_images(&draft.content) {
        warn!(slug = %draft.slug, src = %src, suggestions = ?report.suggestions, "image alt text needs work");
    }

    let result = match id {
        Some(id) => state.post_repo.update(id, draft).await,
        None => state.post_repo.insert(draft).await.map(Some),
    };

    match result {
        Ok(Some(post)) => {
            info!(post_id = %post.id, slug = %post.slug, updated = id.is_some(), "post saved");
            (StatusCode::OK, Json(post)).into_response()
        }
        Ok(None) => error_response(StatusCode::BAD_REQUEST, "Post not found"),
        Err(e) => {
            error!(error = %e, "failed to save post");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to save post")
        }
    }
}

/// Every post, drafts included.
#[utoipa::path(
    get,
    path = "/api/admin/posts",
    tag = "admin",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "All posts", body = PostListResponse),
        (status = 401, description = "Missing token or not an admin", body = ErrorResponse)
    )
)]
pub async fn list_admin_posts(_admin: AdminUser, State(state): State<AppState>) -> Response {
    match state.post_repo.list(false, None).await {
        Ok(posts) => Json(PostListResponse { posts }).into_response(),
        Err(e) => {
            error!(error = %e, "failed to list posts");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to list posts")
        }
    }
}

#[utoipa::path(
    delete,
    path = "/api/admin/posts/{id}",
    tag = "admin",
    security(("bearer" = [])),
    params(("id" = Uuid, Path, description = "Post id")),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 401, description = "Missing token or not an admin", body = ErrorResponse),
        (status = 404, description = "No such post", body = ErrorResponse)
    )
)]
#[instrument(skip_all, fields(user_id = %admin.0.user_id, post_id = %id))]
pub async fn delete_post(
    admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Response {
    match state.post_repo.delete(id).await {
        Ok(true) => {
            info!("post deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Ok(false) => error_response(StatusCode::NOT_FOUND, "Post not found"),
        Err(e) => {
            error!(error = %e, "failed to delete post");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to delete post")
        }
    }
}

/// Published posts, newest first.
#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "posts",
    params(PostListQuery),
    responses((status = 200, description = "Published posts", body = PostListResponse))
)]
pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<PostListQuery>,
) -> Response {
    let tag = query.tag.map(|t| t.trim().to_lowercase()).filter(|t| !t.is_empty());
    match state.post_repo.list(true, tag).await {
        Ok(posts) => Json(PostListResponse { posts }).into_response(),
        Err(e) => {
            error!(error = %e, "failed to list posts");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to list posts")
        }
    }
}

/// A published post with its SEO metadata.
#[utoipa::path(
    get,
    path = "/api/posts/{slug}",
    tag = "posts",
    params(("slug" = String, Path, description = "Post slug")),
    responses(
        (status = 200, description = "Post found", body = PostView),
        (status = 404, description = "No published post with this slug", body = ErrorResponse)
    )
)]
pub async fn get_post(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    match state.post_repo.find_by_slug(&slug, true).await {
        Ok(Some(post)) => Json(PostView::render(post, &state.config)).into_response(),
        Ok(None) => error_response(StatusCode::NOT_FOUND, "Post not found"),
        Err(e) => {
            error!(error = %e, slug = %slug, "failed to load post");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load post")
        }
    }
}

#[utoipa::path(
    get,
    path = "/sitemap.xml",
    tag = "posts",
    responses(
        (status = 200, description = "XML sitemap", content_type = "application/xml", body = String),
        (status = 503, description = "Store unavailable")
    )
)]
pub async fn sitemap(State(state): State<AppState>) -> Response {
    match state.post_repo.list(true, None).await {
        Ok(posts) => (
            [(CONTENT_TYPE, "application/xml")],
            generate_sitemap(state.config.site_url(), &posts),
        )
            .into_response(),
        Err(e) => {
            warn!(error = %e, "sitemap unavailable");
            StatusCode::SERVICE_UNAVAILABLE.into_response()
        }
    }
}
