pub mod app;
pub mod app_state;
pub mod auth;
pub mod config;
pub mod content;
pub mod entities;
pub mod health;
pub mod openapi;
pub mod posts;
pub mod repositories;
pub mod sanitizer;
pub mod seo;
