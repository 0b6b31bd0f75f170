use anyhow::{anyhow, Result};
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use log::{debug, info};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use uuid::Uuid;

use crate::config::Config;
use crate::envelope::{SkillRequest, SkillResponse};
use crate::skill_processor::{SkillContext, SkillProcessor};

// API state that will be shared across handlers
pub struct ApiState {
    pub ctx: SkillContext,
    pub processor: SkillProcessor,
}

impl ApiState {
    pub fn new(ctx: SkillContext) -> Self {
        Self { ctx, processor: SkillProcessor::new() }
    }
}

async fn health_check() -> &'static str {
    "Meals Menu API is running"
}

// Every request gets an answer; failures are turned into spoken replies by the processor
async fn skill_handler(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<SkillRequest>,
) -> Json<SkillResponse> {
    let request_id = Uuid::new_v4();
    debug!("[{}] Skill request from user {}", request_id, request.user_id);

    let response = state.processor.process(&state.ctx, &request).await;

    debug!("[{}] Responding, end session: {}", request_id, response.should_end_session);
    Json(response)
}

/// Routes for the skill endpoint, without binding anything
pub fn router(state: Arc<ApiState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/skill", post(skill_handler))
        .layer(cors)
        .with_state(state)
}

/// Serve on an already bound listener until the server stops
pub async fn serve(listener: TcpListener, state: Arc<ApiState>) -> Result<()> {
    axum::serve(listener, router(state))
        .await
        .map_err(|e| anyhow!("Failed to start API server: {}", e))
}

pub async fn start_api_server(config: Config, addr: Option<SocketAddr>) -> Result<()> {
    let addr = match addr {
        Some(addr) => addr,
        None => config.server_addr()?,
    };
    let state = Arc::new(ApiState::new(SkillContext::new(config)?));

    info!("API server starting on http://{}", addr);
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| anyhow!("Failed to bind to address {}: {}", addr, e))?;

    info!("API server successfully bound to {}. Waiting for connections...", addr);
    serve(listener, state).await
}
