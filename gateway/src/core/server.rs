//! Server Implementation
//!
//! HTTP 服务器启动和路由装配

use axum::{Router, middleware};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::core::{Config, ServerState};
use crate::session::session_middleware;

/// 装配完整的网关应用
///
/// 会话中间件套在所有路由外面；会话只在被写入时才落库，
/// 健康检查和转发请求不会在会话存储里留下条目。
pub fn build_app(state: ServerState) -> Router {
    Router::new()
        .merge(crate::api::health::router())
        .merge(crate::api::session::router())
        .merge(crate::api::cart::router())
        .merge(crate::api::checkout::router())
        .merge(crate::api::menu::router())
        .merge(crate::api::proxy::router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// HTTP Server
pub struct Server {
    config: Config,
    state: ServerState,
}

impl Server {
    /// Create server with existing state
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self { config, state }
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        let app = build_app(self.state.clone());

        // 空闲会话定期回收，存储不会只增不减
        let sessions = self.state.sessions.clone();
        let ttl = self.config.session_ttl;
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(std::time::Duration::from_secs(60));
            loop {
                ticker.tick().await;
                let evicted = sessions.evict_idle(ttl);
                if evicted > 0 {
                    tracing::debug!(evicted, "Evicted idle sessions");
                }
            }
        });

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("🍽️ Gateway listening on {}", addr);
        tracing::info!(
            auth = %self.config.auth_url,
            dishes = %self.config.dishes_url,
            orders = %self.config.orders_url,
            "Backing services configured"
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("Shutting down...");
            })
            .await?;

        Ok(())
    }
}
