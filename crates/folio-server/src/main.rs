#![forbid(unsafe_code)]

use folio_server::{build_router, validate_startup_config, AppState, ServerConfig};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::Ordering;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default)
}

fn env_duration_ms(name: &str, default_ms: u64) -> Duration {
    Duration::from_millis(env_u64(name, default_ms))
}

fn env_duration_secs(name: &str, default_secs: u64) -> Duration {
    Duration::from_secs(env_u64(name, default_secs))
}

fn env_path(name: &str, default: &str) -> PathBuf {
    env::var(name).map_or_else(|_| PathBuf::from(default), PathBuf::from)
}

fn env_opt_path(name: &str) -> Option<PathBuf> {
    env::var(name).ok().filter(|v| !v.is_empty()).map(PathBuf::from)
}

fn config_from_env() -> ServerConfig {
    ServerConfig {
        projects_dir: env_path("FOLIO_PROJECTS_DIR", "data/projects"),
        collections_file: env_opt_path("FOLIO_COLLECTIONS_FILE"),
        request_timeout: env_duration_ms("FOLIO_REQUEST_TIMEOUT_MS", 5_000),
        response_max_bytes: env_usize("FOLIO_RESPONSE_MAX_BYTES", 512 * 1024),
        listing_ttl: env_duration_secs("FOLIO_LISTING_TTL_SECS", 60),
        discovery_ttl: env_duration_secs("FOLIO_DISCOVERY_TTL_SECS", 300),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config_from_env();
    if let Err(err) = validate_startup_config(&config) {
        error!(error = %err, "invalid startup configuration");
        return ExitCode::from(2);
    }

    let collections = match folio_store::load_collections(config.collections_file.as_deref()) {
        Ok(set) => set,
        Err(err) => {
            error!(error = %err, "failed to load collection config");
            return ExitCode::from(2);
        }
    };

    let bind_addr = env::var("FOLIO_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    let listener = match TcpListener::bind(&bind_addr).await {
        Ok(l) => l,
        Err(err) => {
            error!(addr = %bind_addr, error = %err, "failed to bind listener");
            return ExitCode::from(4);
        }
    };

    let state = AppState::new(config, collections);
    state.ready.store(true, Ordering::Relaxed);
    let app = build_router(state);

    info!(addr = %bind_addr, "folio-server listening");
    if let Err(err) = axum::serve(listener, app).await {
        error!(error = %err, "server terminated");
        return ExitCode::from(10);
    }
    ExitCode::SUCCESS
}
