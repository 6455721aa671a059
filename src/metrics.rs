// src/metrics.rs - Read-only summaries and view models derived from a bundle
use serde::Serialize;

use crate::types::{
    BatteryReading, FleetStatus, FleetStatusRow, Priority, ReportEntry, RiskLevel,
    ScenarioDatasetBundle, TrendPoint, Zone,
};

pub const HOTSPOT_LIMIT: usize = 6;
pub const LOW_BATTERY_THRESHOLD: f64 = 20.0;
pub const BATTERY_BINS: usize = 20;

const FALLBACK_PUSH_ZONE: &str = "Old town";
const FALLBACK_PUSH_MESSAGE: &str = "Demonstration reported";

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SummaryMetrics {
    pub safety_index: u8,
    pub num_critical: usize,
    pub num_high: usize,
    pub avg_blocked_minutes: u32,
    pub total_scooters: u32,
    pub low_battery_percent: u8,
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// `clamp(100 - mean_risk*18 - mean_blocked/4, 0, 100)`.
pub fn safety_index(mean_risk_score: f64, mean_blocked_minutes: f64) -> f64 {
    let raw = 100.0 - mean_risk_score * 18.0 - mean_blocked_minutes / 4.0;
    if raw.is_nan() {
        return 0.0;
    }
    raw.clamp(0.0, 100.0)
}

pub fn low_battery_percent(battery: &[BatteryReading]) -> u8 {
    if battery.is_empty() {
        return 0;
    }
    let low = battery.iter().filter(|b| b.level < LOW_BATTERY_THRESHOLD).count();
    (low as f64 / battery.len() as f64 * 100.0) as u8
}

impl SummaryMetrics {
    pub fn from_bundle(bundle: &ScenarioDatasetBundle) -> Self {
        let mean_risk = mean(bundle.zones.iter().map(|z| z.risk_score as f64));
        let mean_blocked = mean(bundle.zones.iter().map(|z| z.blocked_minutes));

        Self {
            safety_index: safety_index(mean_risk, mean_blocked) as u8,
            num_critical: count_level(&bundle.zones, RiskLevel::Critical),
            num_high: count_level(&bundle.zones, RiskLevel::High),
            avg_blocked_minutes: mean_blocked as u32,
            total_scooters: bundle.fleet.iter().map(|r| r.count).sum(),
            low_battery_percent: low_battery_percent(&bundle.battery),
        }
    }
}

fn count_level(zones: &[Zone], level: RiskLevel) -> usize {
    zones.iter().filter(|z| z.risk_label == level).count()
}

/// Zones ranked by risk, then 30-minute incidents, then blocked minutes, all descending.
pub fn top_hotspots(zones: &[Zone], limit: usize) -> Vec<Zone> {
    let mut ranked = zones.to_vec();
    ranked.sort_by(|a, b| {
        b.risk_score
            .cmp(&a.risk_score)
            .then(b.incidents_30min.cmp(&a.incidents_30min))
            .then(b.blocked_minutes.total_cmp(&a.blocked_minutes))
    });
    ranked.truncate(limit);
    ranked
}

/// Zone name and score, highest risk first.
pub fn risk_profile(zones: &[Zone]) -> Vec<(String, u8)> {
    let mut profile: Vec<(String, u8)> =
        zones.iter().map(|z| (z.name.clone(), z.risk_score)).collect();
    profile.sort_by(|a, b| b.1.cmp(&a.1));
    profile
}

pub fn map_center(zones: &[Zone]) -> Option<(f64, f64)> {
    if zones.is_empty() {
        return None;
    }
    Some((
        mean(zones.iter().map(|z| z.latitude)),
        mean(zones.iter().map(|z| z.longitude)),
    ))
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FleetPivotRow {
    pub zone: String,
    /// Indexed like `FleetStatus::ALL`.
    pub counts: [u32; 4],
}

impl FleetPivotRow {
    pub fn count(&self, status: FleetStatus) -> u32 {
        FleetStatus::ALL
            .iter()
            .position(|s| *s == status)
            .map(|idx| self.counts[idx])
            .unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }
}

/// Zone x status table; zones keep first-appearance order, missing cells are zero.
pub fn fleet_pivot(rows: &[FleetStatusRow]) -> Vec<FleetPivotRow> {
    let mut pivot: Vec<FleetPivotRow> = Vec::new();

    for row in rows {
        let idx = match pivot.iter().position(|p| p.zone == row.zone) {
            Some(idx) => idx,
            None => {
                pivot.push(FleetPivotRow {
                    zone: row.zone.clone(),
                    counts: [0; 4],
                });
                pivot.len() - 1
            }
        };
        if let Some(status_idx) = FleetStatus::ALL.iter().position(|s| *s == row.status_key) {
            pivot[idx].counts[status_idx] += row.count;
        }
    }

    pivot
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: u32,
}

/// Equal-width bins over [0, 100]; a reading of exactly 100 lands in the last bin.
pub fn battery_histogram(battery: &[BatteryReading], bins: usize) -> Vec<HistogramBin> {
    if bins == 0 {
        return Vec::new();
    }
    let width = 100.0 / bins as f64;
    let mut histogram: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: i as f64 * width,
            upper: (i + 1) as f64 * width,
            count: 0,
        })
        .collect();

    for reading in battery {
        let idx = ((reading.level / width) as usize).min(bins - 1);
        histogram[idx].count += 1;
    }

    histogram
}

/// High first, then medium, then low; ties keep feed order.
pub fn reports_by_priority(reports: &[ReportEntry]) -> Vec<ReportEntry> {
    let mut sorted = reports.to_vec();
    sorted.sort_by_key(|r| r.priority);
    sorted
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PushBanner {
    pub zone: String,
    pub message: String,
}

/// First high-priority report, message stripped of its "Source: " prefix.
pub fn push_banner(reports: &[ReportEntry]) -> PushBanner {
    match reports.iter().find(|r| r.priority == Priority::High) {
        Some(report) => {
            let message = match report.message.split_once(": ") {
                Some((_, rest)) => rest.to_string(),
                None => report.message.clone(),
            };
            PushBanner {
                zone: report.zone.clone(),
                message,
            }
        }
        None => PushBanner {
            zone: FALLBACK_PUSH_ZONE.to_string(),
            message: FALLBACK_PUSH_MESSAGE.to_string(),
        },
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrendSeries {
    pub rides: Vec<(f64, f64)>,
    pub reports: Vec<(f64, f64)>,
    pub tech_issues: Vec<(f64, f64)>,
    pub max_value: f64,
}

/// Chart coordinates with x in minutes relative to the latest point (≤ 0).
pub fn trend_series(trend: &[TrendPoint]) -> TrendSeries {
    let Some(last) = trend.last() else {
        return TrendSeries::default();
    };

    let mut series = TrendSeries::default();
    for point in trend {
        let x = (point.timestamp - last.timestamp).num_seconds() as f64 / 60.0;
        series.rides.push((x, point.rides));
        series.reports.push((x, point.reports));
        series.tech_issues.push((x, point.tech_issues));
        series.max_value = series
            .max_value
            .max(point.rides)
            .max(point.reports)
            .max(point.tech_issues);
    }
    series
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone(name: &str, score: u8, incidents_30min: u32, blocked: f64) -> Zone {
        Zone {
            name: name.to_string(),
            latitude: 47.0,
            longitude: 8.0,
            risk_score: score,
            risk_label: RiskLevel::from_score(score),
            incidents_5min: 0,
            incidents_30min,
            incidents_24h: incidents_30min,
            blocked_minutes: blocked,
        }
    }

    #[test]
    fn test_safety_index_bounds() {
        assert_eq!(safety_index(4.0, 10_000.0), 0.0);
        assert_eq!(safety_index(0.0, 0.0), 100.0);
        assert_eq!(safety_index(1.0, 0.0), 82.0);
        assert_eq!(safety_index(2.0, 20.0), 59.0);
        assert_eq!(safety_index(f64::NAN, 1.0), 0.0);
    }

    #[test]
    fn test_hotspot_ordering() {
        let zones = vec![
            zone("a", 2, 10, 20.0),
            zone("b", 4, 3, 40.0),
            zone("c", 4, 8, 35.0),
            zone("d", 4, 8, 45.0),
        ];
        let names: Vec<_> = top_hotspots(&zones, 3).into_iter().map(|z| z.name).collect();
        assert_eq!(names, vec!["d", "c", "b"]);
    }

    #[test]
    fn test_fleet_pivot_sums_per_status() {
        let rows = vec![
            FleetStatusRow { zone: "a".into(), status_key: FleetStatus::Free, count: 10 },
            FleetStatusRow { zone: "a".into(), status_key: FleetStatus::Blocked, count: 2 },
            FleetStatusRow { zone: "b".into(), status_key: FleetStatus::InUse, count: 7 },
        ];
        let pivot = fleet_pivot(&rows);
        assert_eq!(pivot.len(), 2);
        assert_eq!(pivot[0].counts, [10, 0, 0, 2]);
        assert_eq!(pivot[0].total(), 12);
        assert_eq!(pivot[1].count(FleetStatus::InUse), 7);
        assert_eq!(pivot[1].count(FleetStatus::Free), 0);
    }

    #[test]
    fn test_battery_histogram_edges() {
        let readings: Vec<_> = [0.0, 4.99, 5.0, 99.9, 100.0]
            .iter()
            .map(|l| BatteryReading { level: *l })
            .collect();
        let hist = battery_histogram(&readings, BATTERY_BINS);
        assert_eq!(hist.len(), 20);
        assert_eq!(hist[0].count, 2);
        assert_eq!(hist[1].count, 1);
        assert_eq!(hist[19].count, 2);
        assert_eq!(hist.iter().map(|b| b.count).sum::<u32>(), 5);
        assert_eq!(low_battery_percent(&readings), 60);
    }

    #[test]
    fn test_push_banner_fallback_and_prefix() {
        let mut reports = vec![ReportEntry {
            time: "10:15".into(),
            zone: "Basel Bahnhof".into(),
            message: "Police report: scooter accident in Basel Bahnhof".into(),
            priority: Priority::Medium,
        }];
        assert_eq!(push_banner(&reports).zone, "Old town");

        reports[0].priority = Priority::High;
        let banner = push_banner(&reports);
        assert_eq!(banner.zone, "Basel Bahnhof");
        assert_eq!(banner.message, "scooter accident in Basel Bahnhof");
    }

    #[test]
    fn test_reports_sorted_by_priority_keep_order() {
        let entry = |msg: &str, priority| ReportEntry {
            time: "09:00".into(),
            zone: "x".into(),
            message: msg.into(),
            priority,
        };
        let sorted = reports_by_priority(&[
            entry("1", Priority::Low),
            entry("2", Priority::High),
            entry("3", Priority::Medium),
            entry("4", Priority::High),
        ]);
        let order: Vec<_> = sorted.iter().map(|r| r.message.as_str()).collect();
        assert_eq!(order, vec!["2", "4", "3", "1"]);
    }
}
