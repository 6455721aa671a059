// src/api/mod.rs
pub mod handlers;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use parking_lot::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::config::CockpitConfig;
use crate::errors::Result;
use crate::feedback::FeedbackStore;
use crate::notifications::{NotificationManager, TelegramNotifier};
use crate::session::SessionContext;

/// One interactive session exposed over HTTP. The mutex only serialises
/// handlers; it does not make this a multi-user service.
#[derive(Clone)]
pub struct ApiState {
    pub session: Arc<Mutex<SessionContext>>,
    pub feedback: FeedbackStore,
    pub notifications: NotificationManager,
}

impl ApiState {
    pub fn new(
        session: SessionContext,
        feedback: FeedbackStore,
        notifications: NotificationManager,
    ) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            feedback,
            notifications,
        }
    }

    pub fn from_config(config: &CockpitConfig) -> Self {
        Self::new(
            SessionContext::new(config.default_scenario),
            FeedbackStore::new(&config.feedback_file),
            NotificationManager::new(TelegramNotifier::from_config(config)),
        )
    }
}

pub fn router(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/scenarios", get(handlers::scenarios_api))
        .route("/api/roles", get(handlers::roles_api))
        .route("/api/bundle", get(handlers::bundle_api))
        .route("/api/metrics", get(handlers::metrics_api))
        .route("/api/hotspots", get(handlers::hotspots_api))
        .route("/api/reload", post(handlers::reload_api))
        .route("/api/feedback", post(handlers::feedback_api))
        .route("/api/notify", post(handlers::notify_api))
        .layer(cors)
        .with_state(state)
}

pub async fn serve(host: &str, port: u16, state: ApiState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    info!("🚀 Safety cockpit API listening on http://{}:{}", host, port);
    info!("   GET  /health");
    info!("   GET  /api/scenarios | /api/roles");
    info!("   GET  /api/bundle | /api/metrics | /api/hotspots  (?scenario=<slug>)");
    info!("   POST /api/reload | /api/feedback | /api/notify");

    axum::serve(listener, router(state)).await?;
    Ok(())
}
