// src/session.rs - Explicit per-session state: login, controls, cache, feedback form
use std::sync::Arc;

use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::cache::SessionCache;
use crate::errors::{CockpitError, Result};
use crate::feedback::{FeedbackRecord, FeedbackStore};
use crate::metrics::SummaryMetrics;
use crate::roles::Role;
use crate::scenario::Scenario;
use crate::types::{ScenarioDatasetBundle, ViewMode};

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct LoginState {
    pub username: String,
    pub role: Role,
    pub logged_in_at: DateTime<Local>,
}

/// Created at session start and reset at logout. Nothing here is shared
/// between sessions.
#[derive(Debug)]
pub struct SessionContext {
    id: Uuid,
    started_at: DateTime<Local>,
    login: Option<LoginState>,
    persona: Role,
    scenario_label: String,
    view_mode: ViewMode,
    cache: SessionCache,
    show_feedback: bool,
}

impl SessionContext {
    pub fn new(default_scenario: Scenario) -> Self {
        let id = Uuid::new_v4();
        info!("🧭 [SESSION] Started session {}", id);

        Self {
            id,
            started_at: Local::now(),
            login: None,
            persona: Role::default(),
            scenario_label: default_scenario.slug().to_string(),
            view_mode: ViewMode::default(),
            cache: SessionCache::new(),
            show_feedback: false,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    /// Any non-empty username/password pair is accepted; there is no account store.
    pub fn login(&mut self, username: &str, password: &str, role: Role) -> Result<()> {
        if username.trim().is_empty() || password.is_empty() {
            warn!("🔐 [SESSION] Login rejected: missing credentials");
            return Err(CockpitError::MissingCredentials);
        }

        self.login = Some(LoginState {
            username: username.trim().to_string(),
            role,
            logged_in_at: Local::now(),
        });
        self.persona = role;
        info!("🔐 [SESSION] {} logged in as {}", username.trim(), role.label());
        Ok(())
    }

    pub fn logout(&mut self) {
        if let Some(login) = self.login.take() {
            info!("🔐 [SESSION] {} logged out", login.username);
        }
        self.persona = Role::default();
        self.view_mode = ViewMode::default();
        self.show_feedback = false;
        self.cache.clear();
    }

    pub fn is_logged_in(&self) -> bool {
        self.login.is_some()
    }

    pub fn login_state(&self) -> Option<&LoginState> {
        self.login.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.login.as_ref().map(|l| l.role)
    }

    /// "Safety Heatmap Cockpit – <role label>", or "Overview" before login.
    pub fn header_title(&self) -> String {
        let label = self.role().map(|r| r.label()).unwrap_or("Overview");
        format!("Safety Heatmap Cockpit – {}", label)
    }

    pub fn persona(&self) -> Role {
        self.persona
    }

    pub fn set_persona(&mut self, persona: Role) {
        self.persona = persona;
    }

    pub fn scenario_label(&self) -> &str {
        &self.scenario_label
    }

    pub fn scenario(&self) -> Scenario {
        Scenario::from_label(&self.scenario_label)
    }

    pub fn select_scenario(&mut self, label: &str) {
        self.scenario_label = label.to_string();
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    pub fn current_bundle(&mut self) -> Arc<ScenarioDatasetBundle> {
        let label = self.scenario_label.clone();
        self.cache.get_or_create(&label)
    }

    pub fn bundle_for(&mut self, label: &str) -> Arc<ScenarioDatasetBundle> {
        self.cache.get_or_create(label)
    }

    pub fn invalidate_scenario(&mut self, label: &str) -> bool {
        self.cache.invalidate(label)
    }

    pub fn current_metrics(&mut self) -> SummaryMetrics {
        SummaryMetrics::from_bundle(&self.current_bundle())
    }

    /// Drops the cached bundle for the selected scenario; the next access regenerates it.
    pub fn reload(&mut self) -> Arc<ScenarioDatasetBundle> {
        let label = self.scenario_label.clone();
        self.cache.invalidate(&label);
        self.cache.get_or_create(&label)
    }

    pub fn cache(&self) -> &SessionCache {
        &self.cache
    }

    pub fn show_feedback(&self) -> bool {
        self.show_feedback
    }

    pub fn open_feedback(&mut self) {
        self.show_feedback = true;
    }

    pub fn close_feedback(&mut self) {
        self.show_feedback = false;
    }

    /// Persists the record and closes the form. On error the form stays open.
    pub fn submit_feedback(&mut self, store: &FeedbackStore, record: &FeedbackRecord) -> Result<usize> {
        let rows = store.append(record)?;
        self.show_feedback = false;
        Ok(rows)
    }
}
