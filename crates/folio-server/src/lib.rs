#![forbid(unsafe_code)]

use axum::body::Body;
use axum::extract::{DefaultBodyLimit, Path as AxumPath, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use folio_api::{parse_list_projects_params, ApiError, ApiErrorCode};
use folio_model::{CollectionSet, ProjectId};
use folio_query::{select_projects, shuffle_projects, Selection, TagQuery};
use folio_store::{load_project, load_projects};
use serde_json::json;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{error, info, warn};

mod config;
mod handlers;

pub use config::{validate_startup_config, ServerConfig};

pub const CRATE_NAME: &str = "folio-server";

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub collections: Arc<CollectionSet>,
    pub ready: Arc<AtomicBool>,
    pub request_id_seed: Arc<AtomicU64>,
}

impl AppState {
    #[must_use]
    pub fn new(config: ServerConfig, collections: CollectionSet) -> Self {
        Self {
            config: Arc::new(config),
            collections: Arc::new(collections),
            ready: Arc::new(AtomicBool::new(false)),
            request_id_seed: Arc::new(AtomicU64::new(1)),
        }
    }
}

pub(crate) fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

#[must_use]
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(handlers::healthz_handler))
        .route("/readyz", get(handlers::readyz_handler))
        .route("/v1/version", get(handlers::version_handler))
        .route("/v1/projects", get(handlers::list_projects_handler))
        .route("/v1/projects/:id", get(handlers::get_project_handler))
        .route("/v1/collections", get(handlers::list_collections_handler))
        .layer(DefaultBodyLimit::max(16 * 1024))
        .with_state(state)
}
