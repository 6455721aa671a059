// src/types.rs
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::scenario::Scenario;

// --- Zone risk ---
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 4] = [
        RiskLevel::Low,
        RiskLevel::Medium,
        RiskLevel::High,
        RiskLevel::Critical,
    ];

    /// Ordinal mapping 1..=4. Out-of-range scores are clamped first.
    pub fn from_score(score: u8) -> Self {
        match score.clamp(1, 4) {
            1 => RiskLevel::Low,
            2 => RiskLevel::Medium,
            3 => RiskLevel::High,
            _ => RiskLevel::Critical,
        }
    }

    pub fn score(&self) -> u8 {
        match self {
            RiskLevel::Low => 1,
            RiskLevel::Medium => 2,
            RiskLevel::High => 3,
            RiskLevel::Critical => 4,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }

    /// Upper two levels switch the fleet split to the high-risk weights.
    pub fn is_elevated(&self) -> bool {
        matches!(self, RiskLevel::High | RiskLevel::Critical)
    }

    /// RGBA fill colour used by the heatmap markers.
    pub fn rgba(&self) -> [u8; 4] {
        match self {
            RiskLevel::Low => [46, 204, 113, 160],
            RiskLevel::Medium => [241, 196, 15, 180],
            RiskLevel::High => [230, 126, 34, 200],
            RiskLevel::Critical => [231, 76, 60, 220],
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Zone {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub risk_score: u8,
    pub risk_label: RiskLevel,
    pub incidents_5min: u32,
    pub incidents_30min: u32,
    pub incidents_24h: u32,
    pub blocked_minutes: f64,
}

// --- Map layer ---
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MapPoint {
    pub zone: String,
    pub latitude: f64,
    pub longitude: f64,
    pub risk_score: u8,
    pub risk_label: RiskLevel,
    pub incidents_30min: u32,
    pub color: [u8; 4],
    pub radius_m: f64,
}

impl MapPoint {
    pub const RADIUS_PER_RISK_M: f64 = 9000.0;

    pub fn from_zone(zone: &Zone) -> Self {
        Self {
            zone: zone.name.clone(),
            latitude: zone.latitude,
            longitude: zone.longitude,
            risk_score: zone.risk_score,
            risk_label: zone.risk_label,
            incidents_30min: zone.incidents_30min,
            color: zone.risk_label.rgba(),
            radius_m: zone.risk_score as f64 * Self::RADIUS_PER_RISK_M,
        }
    }
}

// --- Trend ---
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub timestamp: DateTime<Local>,
    pub rides: f64,
    pub reports: f64,
    pub tech_issues: f64,
}

// --- Fleet ---
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum FleetStatus {
    Free,
    Reserved,
    InUse,
    Blocked,
}

impl FleetStatus {
    pub const ALL: [FleetStatus; 4] = [
        FleetStatus::Free,
        FleetStatus::Reserved,
        FleetStatus::InUse,
        FleetStatus::Blocked,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            FleetStatus::Free => "free",
            FleetStatus::Reserved => "reserved",
            FleetStatus::InUse => "in_use",
            FleetStatus::Blocked => "blocked",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FleetStatus::Free => "Freely available",
            FleetStatus::Reserved => "Reserved online",
            FleetStatus::InUse => "In ride",
            FleetStatus::Blocked => "Blocked / offline",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FleetStatusRow {
    pub zone: String,
    pub status_key: FleetStatus,
    pub count: u32,
}

// --- Battery ---
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct BatteryReading {
    pub level: f64,
}

// --- Report feed ---
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ReportEntry {
    /// Clock time, HH:MM.
    pub time: String,
    pub zone: String,
    pub message: String,
    pub priority: Priority,
}

// --- Bundle ---
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScenarioDatasetBundle {
    pub scenario: Scenario,
    pub generated_at: DateTime<Local>,
    pub zones: Vec<Zone>,
    pub trend: Vec<TrendPoint>,
    pub map: Vec<MapPoint>,
    pub fleet: Vec<FleetStatusRow>,
    pub battery: Vec<BatteryReading>,
    pub reports: Vec<ReportEntry>,
}

// --- Presentation ---
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Heatmap,
    Trend,
    Reporting,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Heatmap, ViewMode::Trend, ViewMode::Reporting];

    pub fn title(&self) -> &'static str {
        match self {
            ViewMode::Heatmap => "1 – Real-time heatmap",
            ViewMode::Trend => "2 – Trend / analysis",
            ViewMode::Reporting => "3 – Reporting",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            ViewMode::Heatmap => ViewMode::Trend,
            ViewMode::Trend => ViewMode::Reporting,
            ViewMode::Reporting => ViewMode::Heatmap,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_ordinal_mapping() {
        assert_eq!(RiskLevel::from_score(1), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(2), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(3), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(4), RiskLevel::Critical);
        assert_eq!(RiskLevel::from_score(0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(9), RiskLevel::Critical);

        for level in RiskLevel::ALL {
            assert_eq!(RiskLevel::from_score(level.score()), level);
        }
    }

    #[test]
    fn test_map_point_radius_and_color() {
        let zone = Zone {
            name: "Bern Zentrum".to_string(),
            latitude: 46.9480,
            longitude: 7.4474,
            risk_score: 3,
            risk_label: RiskLevel::High,
            incidents_5min: 1,
            incidents_30min: 4,
            incidents_24h: 20,
            blocked_minutes: 31.5,
        };

        let point = MapPoint::from_zone(&zone);
        assert_eq!(point.radius_m, 27000.0);
        assert_eq!(point.color, [230, 126, 34, 200]);
        assert_eq!(point.incidents_30min, 4);
    }

    #[test]
    fn test_view_mode_cycles() {
        assert_eq!(ViewMode::Heatmap.next(), ViewMode::Trend);
        assert_eq!(ViewMode::Trend.next(), ViewMode::Reporting);
        assert_eq!(ViewMode::Reporting.next(), ViewMode::Heatmap);
    }
}
