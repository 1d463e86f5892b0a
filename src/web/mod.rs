//! Web 服务器模块
//!
//! 对外提供 `POST /fetch`：抓取目标页面，改写可见文本后以 JSON 返回

pub mod config;
pub mod handlers;
pub mod routes;
pub mod types;

pub use config::*;
pub use handlers::*;
pub use routes::*;
pub use types::*;

use std::sync::Arc;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::core::{RelayError, RelayOptions};

/// Web 服务器
pub struct WebServer {
    config: WebConfig,
    relay_options: RelayOptions,
}

impl WebServer {
    /// 创建新的 Web 服务器
    pub fn new(config: WebConfig, relay_options: RelayOptions) -> Self {
        Self {
            config,
            relay_options,
        }
    }

    /// 启动 Web 服务器
    pub async fn start(&self) -> Result<(), RelayError> {
        let app_state = Arc::new(AppState {
            relay_options: self.relay_options.clone(),
        });

        let app = create_router(app_state);

        let listener = tokio::net::TcpListener::bind(self.config.listen_address())
            .await
            .map_err(|e| RelayError::Config(format!("Failed to bind server: {}", e)))?;

        let local_addr = listener
            .local_addr()
            .map_err(|e| RelayError::Internal(format!("Failed to read local address: {}", e)))?;
        tracing::info!("Web 服务器已启动: http://{}", local_addr);

        axum::serve(listener, app)
            .await
            .map_err(|e| RelayError::Internal(format!("Server error: {}", e)))?;

        Ok(())
    }
}

/// 创建路由器
pub fn create_router(app_state: Arc<AppState>) -> Router {
    create_routes()
        .with_state(app_state)
        // 添加CORS支持
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
