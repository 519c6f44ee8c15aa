use axum::Router;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use folio::{app, app_state::AppState, auth::jwt::ROLE_ADMIN, config::Config};

pub const JWT_SECRET: &str = "integration-test-secret";

pub fn test_state(pool: Pool<Postgres>) -> AppState {
    let config = Config::new(
        "postgresql://unused",
        "127.0.0.1:0",
        JWT_SECRET,
        "https://example.com",
        "Example",
    );
    AppState::new(pool, config)
}

pub fn test_app(pool: Pool<Postgres>) -> (Router, AppState) {
    let state = test_state(pool);
    (app::router(state.clone()), state)
}

pub fn admin_bearer(state: &AppState) -> String {
    bearer(state, ROLE_ADMIN)
}

pub fn bearer(state: &AppState, role: &str) -> String {
    let token = state
        .jwt
        .generate_token(Uuid::new_v4(), role)
        .expect("Failed to generate token");
    format!("Bearer {}", token)
}
