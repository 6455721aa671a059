// src/config.rs - Environment-driven settings (.env is loaded by the binaries)
use std::env;

use tracing::info;

use crate::scenario::Scenario;

#[derive(Debug, Clone)]
pub struct CockpitConfig {
    pub host: String,
    pub port: u16,
    pub feedback_file: String,
    pub log_dir: String,
    pub default_scenario: Scenario,
    pub telegram_bot_token: Option<String>,
    pub telegram_chat_id: Option<String>,
}

impl Default for CockpitConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3010,
            feedback_file: "feedback.csv".to_string(),
            log_dir: "logs".to_string(),
            default_scenario: Scenario::CommuterPeak,
            telegram_bot_token: None,
            telegram_chat_id: None,
        }
    }
}

impl CockpitConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            host: env::var("COCKPIT_HOST").unwrap_or(defaults.host),
            port: env::var("COCKPIT_PORT")
                .unwrap_or_else(|_| defaults.port.to_string())
                .parse::<u16>()
                .unwrap_or(defaults.port),
            feedback_file: env::var("FEEDBACK_FILE").unwrap_or(defaults.feedback_file),
            log_dir: env::var("LOG_DIR").unwrap_or(defaults.log_dir),
            default_scenario: env::var("DEFAULT_SCENARIO")
                .map(|label| Scenario::from_label(&label))
                .unwrap_or(defaults.default_scenario),
            telegram_bot_token: env::var("TELEGRAM_BOT_TOKEN").ok().filter(|v| !v.is_empty()),
            telegram_chat_id: env::var("TELEGRAM_CHAT_ID").ok().filter(|v| !v.is_empty()),
        }
    }

    pub fn log_summary(&self) {
        info!("⚙️  Configuration:");
        info!("   🌐 Listen address: {}:{}", self.host, self.port);
        info!("   📝 Feedback file: {}", self.feedback_file);
        info!("   📄 Log directory: {}", self.log_dir);
        info!("   🎬 Default scenario: {}", self.default_scenario.slug());
        info!(
            "   📱 Telegram: {}",
            if self.telegram_bot_token.is_some() && self.telegram_chat_id.is_some() {
                "configured"
            } else {
                "not configured"
            }
        );
    }
}
