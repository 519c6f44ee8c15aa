use crate::{
    auth::jwt::JwtService,
    config::Config,
    repositories::{PostRepository, PostRepositoryTrait},
};
use sqlx::{Pool, Postgres};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub post_repo: Arc<dyn PostRepositoryTrait + Send + Sync>,
    pub db_pool: Pool<Postgres>,
    pub config: Arc<Config>,
    pub jwt: Arc<JwtService>,
}

impl AppState {
    pub fn new(pool: Pool<Postgres>, config: Config) -> Self {
        Self::with_repository(Arc::new(PostRepository::new(pool.clone())), pool, config)
    }

    /// State over an arbitrary post store, used by tests and alternative
    /// backends.
    pub fn with_repository(
        post_repo: Arc<dyn PostRepositoryTrait + Send + Sync>,
        pool: Pool<Postgres>,
        config: Config,
    ) -> Self {
        Self {
            post_repo,
            db_pool: pool,
            jwt: Arc::new(JwtService::new(config.jwt_secret())),
            config: Arc::new(config),
        }
    }
}
