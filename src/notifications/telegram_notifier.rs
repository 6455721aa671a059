// src/notifications/telegram_notifier.rs
use std::time::Duration;

use chrono::Local;
use reqwest::Client;
use serde_json::json;
use tracing::{error, info, warn};

use crate::config::CockpitConfig;
use crate::errors::{CockpitError, Result};
use crate::notifications::MessageTemplate;
use crate::roles::Role;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

#[derive(Debug, Clone)]
pub struct TelegramNotifier {
    client: Client,
    api_base: String,
    bot_token: Option<String>,
    chat_id: Option<String>,
    enabled: bool,
}

impl TelegramNotifier {
    pub fn new(bot_token: Option<String>, chat_id: Option<String>) -> Self {
        let enabled = bot_token.is_some() && chat_id.is_some();

        if enabled {
            info!("📱 Telegram notifier initialized");
        } else {
            warn!("📱 Telegram notifier disabled - missing TELEGRAM_BOT_TOKEN or TELEGRAM_CHAT_ID");
        }

        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_else(|_| Client::new()),
            api_base: TELEGRAM_API_BASE.to_string(),
            bot_token,
            chat_id,
            enabled,
        }
    }

    pub fn from_config(config: &CockpitConfig) -> Self {
        Self::new(config.telegram_bot_token.clone(), config.telegram_chat_id.clone())
    }

    /// Point the notifier at a different Bot API host (local relay, test server).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn format_template(template: MessageTemplate, sender: Role) -> String {
        format!(
            "📨 *Safety Cockpit*\n\
            \n\
            {}\n\
            \n\
            👤 *From:* `{}`\n\
            📅 *Time:* `{}`",
            template.text(),
            sender.label(),
            Local::now().format("%Y-%m-%d %H:%M:%S")
        )
    }

    /// Disabled notifier: logs and returns Ok without sending.
    pub async fn send_template(&self, template: MessageTemplate, sender: Role) -> Result<()> {
        if !self.enabled {
            warn!("📱 Telegram disabled, not sending '{}'", template.text());
            return Ok(());
        }
        self.send_text(&Self::format_template(template, sender)).await
    }

    pub async fn send_text(&self, text: &str) -> Result<()> {
        let (bot_token, chat_id) = match (&self.bot_token, &self.chat_id) {
            (Some(token), Some(chat)) => (token, chat),
            _ => return Err(CockpitError::NotifierDisabled),
        };

        let url = format!("{}/bot{}/sendMessage", self.api_base, bot_token);
        let payload = json!({
            "chat_id": chat_id,
            "text": text,
            "parse_mode": "Markdown",
            "disable_web_page_preview": true
        });

        let response = self.client.post(&url).json(&payload).send().await?;

        if response.status().is_success() {
            info!("📱 Telegram message sent ({} chars)", text.len());
            Ok(())
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("📱 Failed to send Telegram message: {}", error_text);
            Err(CockpitError::NotificationError(error_text))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_notifier_is_noop() {
        let notifier = TelegramNotifier::new(None, Some("123".to_string()));
        assert!(!notifier.is_enabled());
        assert!(notifier
            .send_template(MessageTemplate::RequestPatrol, Role::PoliceSecurity)
            .await
            .is_ok());
        assert!(matches!(
            notifier.send_text("hello").await,
            Err(CockpitError::NotifierDisabled)
        ));
    }

    #[tokio::test]
    async fn test_unreachable_api_surfaces_error() {
        let notifier = TelegramNotifier::new(Some("token".into()), Some("42".into()))
            .with_api_base("http://127.0.0.1:9/");
        assert!(notifier.is_enabled());
        assert!(matches!(
            notifier.send_text("ping").await,
            Err(CockpitError::ReqwestError(_))
        ));
    }

    #[test]
    fn test_format_contains_template_and_sender() {
        let text = TelegramNotifier::format_template(
            MessageTemplate::StopObstructed,
            Role::TransitPlanning,
        );
        assert!(text.contains(MessageTemplate::StopObstructed.text()));
        assert!(text.contains("Transit planning"));
    }
}
