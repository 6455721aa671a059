// src/bin/dashboard/app.rs - Application state for the cockpit dashboard
use std::sync::Arc;
use tokio::time::Instant;
use tracing::{error, info};

use safety_cockpit::config::CockpitConfig;
use safety_cockpit::feedback::FeedbackStore;
use safety_cockpit::metrics::SummaryMetrics;
use safety_cockpit::notifications::{MessageTemplate, NotificationManager, TelegramNotifier};
use safety_cockpit::roles::Role;
use safety_cockpit::scenario::Scenario;
use safety_cockpit::session::SessionContext;
use safety_cockpit::types::{ScenarioDatasetBundle, ViewMode};

use crate::forms::{FeedbackForm, LoginForm};
use crate::types::{Screen, StatusKind, StatusMessage};

pub struct App {
    pub session: SessionContext,
    pub feedback_store: FeedbackStore,
    pub notifications: NotificationManager,
    pub screen: Screen,
    pub login_form: LoginForm,
    pub feedback_form: FeedbackForm,
    pub selected_template: MessageTemplate,
    pub status: Option<StatusMessage>,

    // Rendered snapshot of the selected scenario
    pub bundle: Arc<ScenarioDatasetBundle>,
    pub metrics: SummaryMetrics,
    pub last_update: Instant,
}

impl App {
    pub fn new(config: &CockpitConfig) -> Self {
        let mut session = SessionContext::new(config.default_scenario);
        let bundle = session.current_bundle();
        let metrics = SummaryMetrics::from_bundle(&bundle);

        Self {
            session,
            feedback_store: FeedbackStore::new(&config.feedback_file),
            notifications: NotificationManager::new(TelegramNotifier::from_config(config)),
            screen: Screen::Login,
            login_form: LoginForm::new(),
            feedback_form: FeedbackForm::new(),
            selected_template: MessageTemplate::default(),
            status: None,
            bundle,
            metrics,
            last_update: Instant::now(),
        }
    }

    fn set_status(&mut self, text: impl Into<String>, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    /// Pulls the selected scenario through the session cache. Cached bundles
    /// come back unchanged.
    pub fn refresh(&mut self) {
        let bundle = self.session.current_bundle();
        if !Arc::ptr_eq(&bundle, &self.bundle) {
            self.metrics = SummaryMetrics::from_bundle(&bundle);
            self.bundle = bundle;
            self.last_update = Instant::now();
        }
    }

    pub fn submit_login(&mut self) {
        let username = self.login_form.username.clone();
        let password = self.login_form.password.clone();
        match self.session.login(&username, &password, self.login_form.role) {
            Ok(()) => {
                self.login_form.error = None;
                self.login_form.password.clear();
                self.screen = Screen::Dashboard;
                self.refresh();
                self.set_status(format!("Welcome, {}", username.trim()), StatusKind::Success);
            }
            Err(e) => {
                self.login_form.error = Some(e.to_string());
            }
        }
    }

    pub fn logout(&mut self) {
        self.session.logout();
        self.login_form.reset_after_logout();
        self.feedback_form = FeedbackForm::new();
        self.status = None;
        self.screen = Screen::Login;
    }

    pub fn selected_scenario(&self) -> Scenario {
        self.session.scenario()
    }

    pub fn cycle_scenario(&mut self, forward: bool) {
        let options = Scenario::SELECTABLE;
        let current = options
            .iter()
            .position(|s| *s == self.selected_scenario())
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % options.len()
        } else {
            (current + options.len() - 1) % options.len()
        };
        let scenario = options[next];
        self.session.select_scenario(scenario.slug());
        info!("🎬 Scenario switched to {}", scenario.display_name());
        self.refresh();
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.session.set_view_mode(mode);
    }

    pub fn next_view_mode(&mut self) {
        let mode = self.session.view_mode().next();
        self.session.set_view_mode(mode);
    }

    pub fn cycle_persona(&mut self, forward: bool) {
        let persona = if forward {
            self.session.persona().next()
        } else {
            self.session.persona().previous()
        };
        self.session.set_persona(persona);
    }

    pub fn reload_live_data(&mut self) {
        let bundle = self.session.reload();
        self.metrics = SummaryMetrics::from_bundle(&bundle);
        self.bundle = bundle;
        self.last_update = Instant::now();
        info!("🔄 Reloaded live data for {}", self.selected_scenario().display_name());
        self.set_status("Live data reloaded", StatusKind::Info);
    }

    pub fn next_template(&mut self) {
        self.selected_template = self.selected_template.next();
    }

    /// Fire-and-forget: the UI never waits for delivery.
    pub fn send_selected_template(&mut self) {
        let sender = self.session.role().unwrap_or_default();
        let template = self.selected_template;
        let _ = self.notifications.dispatch(template, sender);

        let suffix = if self.notifications.is_enabled() {
            ""
        } else {
            " (delivery channel not configured)"
        };
        self.set_status(format!("Message sent: {}{}", template.text(), suffix), StatusKind::Success);
    }

    pub fn open_feedback(&mut self) {
        self.feedback_form = FeedbackForm::new();
        self.session.open_feedback();
    }

    pub fn close_feedback(&mut self) {
        self.session.close_feedback();
    }

    pub fn show_feedback(&self) -> bool {
        self.session.show_feedback()
    }

    pub fn submit_feedback(&mut self) {
        let record = self.feedback_form.to_record();
        match self.session.submit_feedback(&self.feedback_store, &record) {
            Ok(rows) => {
                info!("📝 Feedback stored ({} rows total)", rows);
                self.feedback_form.error = None;
                self.set_status("Thank you for your feedback!", StatusKind::Success);
            }
            Err(e) => {
                error!("📝 Failed to store feedback: {}", e);
                self.feedback_form.error = Some(format!("Could not save feedback: {}", e));
                self.set_status("Feedback not saved", StatusKind::Error);
            }
        }
    }

    pub fn role_label(&self) -> &'static str {
        self.session.role().map(|r| r.label()).unwrap_or("Overview")
    }

    pub fn logo_path(&self) -> Option<&'static str> {
        self.session.role().map(|r: Role| r.logo_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use safety_cockpit::feedback::FEEDBACK_COLUMNS;

    fn test_app(dir: &tempfile::TempDir) -> App {
        let config = CockpitConfig {
            feedback_file: dir.path().join("feedback.csv").to_string_lossy().into_owned(),
            telegram_bot_token: None,
            telegram_chat_id: None,
            ..CockpitConfig::default()
        };
        App::new(&config)
    }

    #[test]
    fn test_login_switches_screen_and_sets_header_role() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);

        app.submit_login();
        assert_eq!(app.screen, Screen::Login);
        assert_eq!(
            app.login_form.error.as_deref(),
            Some("Please enter username and password.")
        );

        app.login_form.username = "mira".into();
        app.login_form.password = "pw".into();
        app.login_form.role = Role::CityAdministration;
        app.submit_login();
        assert_eq!(app.screen, Screen::Dashboard);
        assert_eq!(app.role_label(), "City administration");
        assert!(app.login_form.password.is_empty());
    }

    #[test]
    fn test_scenario_cycle_uses_cache() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        let first = Arc::clone(&app.bundle);
        let start = app.selected_scenario();

        for _ in 0..Scenario::SELECTABLE.len() {
            app.cycle_scenario(true);
        }
        assert_eq!(app.selected_scenario(), start);
        assert!(Arc::ptr_eq(&first, &app.bundle));

        app.reload_live_data();
        assert!(!Arc::ptr_eq(&first, &app.bundle));
    }

    #[test]
    fn test_feedback_submit_writes_row_and_closes_form() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        app.open_feedback();
        app.feedback_form.comments = "More contrast please".into();
        app.submit_feedback();

        assert!(!app.show_feedback());
        let contents = std::fs::read_to_string(dir.path().join("feedback.csv")).unwrap();
        assert!(contents.starts_with(&FEEDBACK_COLUMNS.join(",")));
        assert!(contents.contains("More contrast please"));
    }

    #[test]
    fn test_logout_leaves_cache_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        app.login_form.username = "mira".into();
        app.login_form.password = "pw".into();
        app.submit_login();
        assert!(!app.session.cache().is_empty());

        app.logout();
        assert_eq!(app.screen, Screen::Login);
        assert!(app.session.cache().is_empty());

        app.login_form.password = "pw".into();
        app.submit_login();
        assert_eq!(app.screen, Screen::Dashboard);
        assert_eq!(app.session.cache().len(), 1);
        assert_eq!(app.bundle.scenario, app.selected_scenario());
    }

    #[test]
    fn test_failed_feedback_submit_reports_error_status() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the feedback directory should be
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();
        let config = CockpitConfig {
            feedback_file: blocker.join("feedback.csv").to_string_lossy().into_owned(),
            telegram_bot_token: None,
            telegram_chat_id: None,
            ..CockpitConfig::default()
        };
        let mut app = App::new(&config);

        app.open_feedback();
        app.submit_feedback();

        assert!(app.show_feedback());
        assert!(app.feedback_form.error.is_some());
        let status = app.status.as_ref().expect("status set on failure");
        assert_eq!(status.kind, StatusKind::Error);
    }
}
