// src/bin/dashboard/types.rs - Type definitions for the dashboard
use ratatui::style::Color;
use safety_cockpit::types::{Priority, RiskLevel};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Screen {
    Login,
    Dashboard,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

impl StatusKind {
    pub fn color(&self) -> Color {
        match self {
            StatusKind::Info => Color::Cyan,
            StatusKind::Success => Color::Green,
            StatusKind::Error => Color::Red,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

pub trait RiskLevelExt {
    fn color(&self) -> Color;
    fn symbol(&self) -> &str;
}

impl RiskLevelExt for RiskLevel {
    fn color(&self) -> Color {
        let [r, g, b, _] = self.rgba();
        Color::Rgb(r, g, b)
    }

    fn symbol(&self) -> &str {
        match self {
            RiskLevel::Low => "🟢",
            RiskLevel::Medium => "🟡",
            RiskLevel::High => "🟠",
            RiskLevel::Critical => "🔴",
        }
    }
}

pub fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => Color::Red,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::Gray,
    }
}
