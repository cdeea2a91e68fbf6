//! HTTPサーバー

pub mod routes;
pub mod session;
pub mod state;
pub mod tabs;
pub mod views;

use axum::{routing::get, Router};
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::loader::Dataset;
use state::AppState;

pub struct MatchServer {
    state: AppState,
}

impl MatchServer {
    pub fn new(config: Config, dataset: Dataset) -> Self {
        Self { state: AppState::new(config, dataset) }
    }

    /// 全ルートを組み立てる
    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    pub async fn start(self) -> Result<()> {
        let addr: SocketAddr = self
            .address()
            .parse()
            .map_err(|e| AppError::Config(format!("アドレスが不正です: {}", e)))?;

        let router = self.router();

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| AppError::Config(format!("ポートを開けません: {}", e)))?;

        tracing::info!("http://{} で待ち受け開始", addr);

        axum::serve(listener, router).await?;

        Ok(())
    }

    pub fn address(&self) -> String {
        self.state.config().address()
    }
}

pub fn build_router(state: AppState) -> Router {
    let max_upload_size = state.config().max_upload_size;

    Router::new()
        .route("/health", get(health_check))
        .merge(routes::app_routes(max_upload_size))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn health_check() -> &'static str {
    "OK"
}
