use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

pub const CONFIG_SCHEMA_VERSION: &str = "1";

#[derive(Debug, Clone, Serialize)]
pub struct ServerConfig {
    pub projects_dir: PathBuf,
    pub collections_file: Option<PathBuf>,
    pub request_timeout: Duration,
    pub response_max_bytes: usize,
    /// cache-control max-age for listing and single-project responses.
    pub listing_ttl: Duration,
    /// cache-control max-age for the collection registry.
    pub discovery_ttl: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            projects_dir: PathBuf::from("data/projects"),
            collections_file: None,
            request_timeout: Duration::from_secs(5),
            response_max_bytes: 512 * 1024,
            listing_ttl: Duration::from_secs(60),
            discovery_ttl: Duration::from_secs(300),
        }
    }
}

pub fn validate_startup_config(config: &ServerConfig) -> Result<(), String> {
    if config.request_timeout.is_zero() {
        return Err("request timeout must be > 0".to_string());
    }
    if config.response_max_bytes == 0 {
        return Err("response size limit must be > 0".to_string());
    }
    if config.projects_dir.as_os_str().is_empty() {
        return Err("projects directory must not be empty".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startup_config_validation_rejects_zero_limits() {
        let config = ServerConfig {
            request_timeout: Duration::ZERO,
            ..ServerConfig::default()
        };
        let err = validate_startup_config(&config).expect_err("zero timeout");
        assert!(err.contains("timeout"));

        let config = ServerConfig {
            response_max_bytes: 0,
            ..ServerConfig::default()
        };
        let err = validate_startup_config(&config).expect_err("zero size limit");
        assert!(err.contains("size limit"));

        validate_startup_config(&ServerConfig::default()).expect("default config valid");
    }
}
