use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

use crate::{
    auth::dtos::ErrorResponse,
    content::ResponsiveImage,
    entities::Post,
    health::{self, HealthResponse},
    posts::{
        dtos::{PostListResponse, SavePostRequest},
        handlers,
        view::PostView,
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        handlers::save_post,
        handlers::list_admin_posts,
        handlers::delete_post,
        handlers::list_posts,
        handlers::get_post,
        handlers::sitemap,
    ),
    components(schemas(
        Post,
        PostView,
        ResponsiveImage,
        SavePostRequest,
        PostListResponse,
        ErrorResponse,
        HealthResponse,
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "posts", description = "Published blog posts"),
        (name = "admin", description = "Post management, admin role required"),
        (name = "health", description = "Liveness"),
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_routes_and_bearer_scheme() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/admin/posts",
            "/api/admin/posts/{id}",
            "/api/posts",
            "/api/posts/{slug}",
            "/sitemap.xml",
            "/healthz",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer"));
    }
}
