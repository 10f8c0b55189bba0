//! Bookshelf
//!
//! A REST JSON server keeping a list of book records in memory, with
//! validated create/replace, filtered listing, lookup and deletion.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<services::Services>,
}

impl AppState {
    /// State backed by a fresh, empty book collection
    pub fn new() -> Self {
        Self::with_repository(repository::Repository::new())
    }

    pub fn with_repository(repository: repository::Repository) -> Self {
        Self {
            services: Arc::new(services::Services::new(repository)),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
