// src/api/handlers.rs - JSON endpoints over one session's bundles
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use crate::api::ApiState;
use crate::errors::Result;
use crate::feedback::{FeedbackRecord, Rating};
use crate::metrics::{push_banner, top_hotspots, PushBanner, SummaryMetrics, HOTSPOT_LIMIT};
use crate::notifications::MessageTemplate;
use crate::roles::Role;
use crate::scenario::Scenario;
use crate::types::{ScenarioDatasetBundle, Zone};

#[derive(Deserialize, Debug, Default)]
pub struct ScenarioQuery {
    pub scenario: Option<String>,
}

impl ScenarioQuery {
    fn label_or(&self, fallback: &str) -> String {
        self.scenario
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(fallback)
            .to_string()
    }
}

#[derive(Serialize, Debug)]
pub struct ScenarioInfo {
    pub slug: &'static str,
    pub name: &'static str,
}

#[derive(Serialize, Debug)]
pub struct RoleInfo {
    pub key: Role,
    pub name: &'static str,
    pub label: &'static str,
    pub logo: &'static str,
}

#[derive(Serialize, Debug)]
pub struct MetricsResponse {
    pub scenario: Scenario,
    pub label: String,
    pub metrics: SummaryMetrics,
    pub push: PushBanner,
}

#[derive(Deserialize, Debug)]
pub struct FeedbackRequest {
    pub happiness_usage: u8,
    pub usability: u8,
    pub happiness_methods: u8,
    #[serde(default)]
    pub comments: String,
}

#[derive(Deserialize, Debug)]
pub struct NotifyRequest {
    pub template: MessageTemplate,
    #[serde(default)]
    pub sender: Role,
}

pub async fn health_check() -> &'static str {
    "OK, safety cockpit is running"
}

pub async fn scenarios_api() -> Json<Vec<ScenarioInfo>> {
    Json(
        Scenario::SELECTABLE
            .iter()
            .map(|s| ScenarioInfo {
                slug: s.slug(),
                name: s.display_name(),
            })
            .collect(),
    )
}

pub async fn roles_api() -> Json<Vec<RoleInfo>> {
    Json(
        Role::ALL
            .iter()
            .map(|r| RoleInfo {
                key: *r,
                name: r.name(),
                label: r.label(),
                logo: r.logo_path(),
            })
            .collect(),
    )
}

pub async fn bundle_api(
    State(state): State<ApiState>,
    Query(query): Query<ScenarioQuery>,
) -> Json<ScenarioDatasetBundle> {
    let mut session = state.session.lock();
    let label = query.label_or(session.scenario_label());
    let bundle = session.bundle_for(&label);
    Json(bundle.as_ref().clone())
}

pub async fn metrics_api(
    State(state): State<ApiState>,
    Query(query): Query<ScenarioQuery>,
) -> Json<MetricsResponse> {
    let mut session = state.session.lock();
    let label = query.label_or(session.scenario_label());
    let bundle = session.bundle_for(&label);

    Json(MetricsResponse {
        scenario: bundle.scenario,
        label,
        metrics: SummaryMetrics::from_bundle(&bundle),
        push: push_banner(&bundle.reports),
    })
}

pub async fn hotspots_api(
    State(state): State<ApiState>,
    Query(query): Query<ScenarioQuery>,
) -> Json<Vec<Zone>> {
    let mut session = state.session.lock();
    let label = query.label_or(session.scenario_label());
    let bundle = session.bundle_for(&label);
    Json(top_hotspots(&bundle.zones, HOTSPOT_LIMIT))
}

pub async fn reload_api(
    State(state): State<ApiState>,
    Query(query): Query<ScenarioQuery>,
) -> Json<Value> {
    let mut session = state.session.lock();
    let label = query.label_or(session.scenario_label());
    let invalidated = session.invalidate_scenario(&label);
    let bundle = session.bundle_for(&label);

    Json(json!({
        "success": true,
        "scenario": label,
        "invalidated": invalidated,
        "generated_at": bundle.generated_at,
    }))
}

pub async fn feedback_api(
    State(state): State<ApiState>,
    Json(request): Json<FeedbackRequest>,
) -> Result<(StatusCode, Json<Value>)> {
    let record = FeedbackRecord::new(
        Rating::new(request.happiness_usage)?,
        Rating::new(request.usability)?,
        Rating::new(request.happiness_methods)?,
        request.comments,
    );

    let rows = state.session.lock().submit_feedback(&state.feedback, &record)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "rows": rows, "timestamp": record.timestamp })),
    ))
}

pub async fn notify_api(
    State(state): State<ApiState>,
    Json(request): Json<NotifyRequest>,
) -> (StatusCode, Json<Value>) {
    info!("📨 [API] Quick message requested: {:?}", request.template);
    // Not awaited: delivery outcome is only logged.
    let _ = state.notifications.dispatch(request.template, request.sender);

    (
        StatusCode::ACCEPTED,
        Json(json!({
            "success": true,
            "message": request.template.text(),
            "delivery": if state.notifications.is_enabled() { "queued" } else { "disabled" },
        })),
    )
}
