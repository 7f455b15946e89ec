use std::env;
use std::path::PathBuf;
use anyhow::{Context, Result};
use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

#[derive(Debug, Clone)]
pub struct Config {
    pub data_file: PathBuf,
    pub service_port: u16,
    pub service_host: String,
    /// `None` allows any origin
    pub cors_origin: Option<HeaderValue>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let data_file = env::var("DATA_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data/items.json"));

        let service_port = env::var("SERVICE_PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse::<u16>()
            .context("SERVICE_PORT must be a valid port number (0-65535)")?;

        let service_host = env::var("SERVICE_HOST")
            .unwrap_or_else(|_| "0.0.0.0".to_string());

        let cors_origin = match env::var("CORS_ORIGIN") {
            Ok(origin) if origin != "*" && !origin.is_empty() => Some(
                HeaderValue::from_str(&origin)
                    .context("CORS_ORIGIN must be a valid header value")?,
            ),
            _ => None,
        };

        Ok(Config {
            data_file,
            service_port,
            service_host,
            cors_origin,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.service_host, self.service_port)
    }

    pub fn cors_layer(&self) -> CorsLayer {
        let origin = match &self.cors_origin {
            Some(origin) => AllowOrigin::exact(origin.clone()),
            None => AllowOrigin::from(Any),
        };

        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any)
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Data file: {}", self.data_file.display());
        tracing::info!(
            "  CORS origin: {}",
            self.cors_origin
                .as_ref()
                .and_then(|o| o.to_str().ok())
                .unwrap_or("*")
        );
        tracing::info!("  Service listening on: {}", self.bind_address());
    }
}
