//! # HTTP Server
//!
//! Combines the section and asset routers behind one listener. The engine
//! and registry are injected at construction; handlers never reach into
//! ambient state.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::assets::AssetRegistry;
use crate::content::VersioningEngine;
use crate::observability::Logger;

use super::asset_routes::{asset_routes, AssetState};
use super::config::HttpServerConfig;
use super::section_routes::{section_routes, SectionState};

/// HTTP server for the content API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with injected engine and registry
    pub fn new(
        config: HttpServerConfig,
        engine: Arc<VersioningEngine>,
        registry: Arc<AssetRegistry>,
    ) -> Self {
        let router = Self::build_router(&config, engine, registry);
        Self { config, router }
    }

    /// Build the combined router
    fn build_router(
        config: &HttpServerConfig,
        engine: Arc<VersioningEngine>,
        registry: Arc<AssetRegistry>,
    ) -> Router {
        let section_state = Arc::new(SectionState::new(engine));
        let asset_state = Arc::new(AssetState::new(registry));

        let cors = if config.cors_origins.is_empty() {
            // Permissive for development
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            use tower_http::cors::AllowOrigin;
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .merge(section_routes(section_state))
            .merge(asset_routes(asset_state))
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server (async)
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Invalid socket address: {}", e),
            )
        })?;

        Logger::info(
            "HTTP_SERVER_START",
            &[("addr", self.config.socket_addr().as_str())],
        );

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{InMemoryAssetStore, LocalBackend};
    use crate::content::MemoryStore;
    use tempfile::TempDir;

    fn test_server(config: HttpServerConfig) -> (HttpServer, TempDir) {
        let temp = TempDir::new().unwrap();
        let engine = Arc::new(VersioningEngine::new(Arc::new(MemoryStore::new())));
        let registry = Arc::new(AssetRegistry::new(
            Arc::new(LocalBackend::new(temp.path().to_path_buf())),
            Arc::new(InMemoryAssetStore::new()),
        ));
        (HttpServer::new(config, engine, registry), temp)
    }

    #[test]
    fn test_server_creation() {
        let (server, _temp) = test_server(HttpServerConfig::default());
        assert_eq!(server.socket_addr(), "0.0.0.0:8700");
    }

    #[test]
    fn test_router_builds() {
        let (server, _temp) = test_server(HttpServerConfig::with_port(8080));
        let _router = server.router();
    }
}
