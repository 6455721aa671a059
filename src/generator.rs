// src/generator.rs - Synthetic "live" data for one scenario
use std::time::Instant;

use chrono::{DateTime, Duration, Local};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use tracing::debug;

use crate::scenario::{RiskOffset, Scenario, ScenarioProfile};
use crate::types::{
    BatteryReading, FleetStatus, FleetStatusRow, MapPoint, Priority, ReportEntry, RiskLevel,
    ScenarioDatasetBundle, TrendPoint, Zone,
};
use crate::zones::{ZONE_COUNT, ZONE_SITES};

pub const BASE_RISK_BIAS: f64 = 2.0;
pub const RISK_NOISE_STD: f64 = 0.6;
pub const BLOCKED_NOISE_STD: f64 = 6.0;

pub const TREND_POINTS: usize = 24;
pub const TREND_STEP_MINUTES: i64 = 5;
const FLOW_NOISE_STD: f64 = 15.0;
const MIN_RIDES: f64 = 5.0;
const REPORT_NOISE_STD: f64 = 1.5;
const TECH_ISSUE_STD: f64 = 0.5;

const ELEVATED_FLEET_WEIGHTS: [f64; 4] = [0.45, 0.15, 0.30, 0.10];
const NORMAL_FLEET_WEIGHTS: [f64; 4] = [0.60, 0.10, 0.25, 0.05];

pub const BATTERY_SAMPLES: usize = 2000;
const BATTERY_MEAN: f64 = 65.0;
const BATTERY_STD: f64 = 18.0;

pub const REPORT_COUNT: usize = 10;

pub const REPORT_TEMPLATES: [&str; REPORT_COUNT] = [
    "User report: dangerous crossing in {zone}",
    "E-scooter blocking footpath in {zone}",
    "Several scooters knocked over in {zone}",
    "High scooter speeds in {zone}",
    "Police report: scooter accident in {zone}",
    "Transit report: stop obstructed in {zone}",
    "Inspection: scooter parked incorrectly in {zone}",
    "Construction: detour affects scooter route in {zone}",
    "Resident complaint about noise in {zone}",
    "Technical: connectivity problems in {zone}",
];

/// Generate a bundle for `label` from a fresh entropy-seeded source.
/// Unrecognized labels produce baseline data.
pub fn generate_bundle(label: &str) -> ScenarioDatasetBundle {
    generate_scenario_bundle(Scenario::from_label(label))
}

pub fn generate_scenario_bundle(scenario: Scenario) -> ScenarioDatasetBundle {
    let mut rng = StdRng::from_entropy();
    generate_bundle_with(&mut rng, scenario, Local::now())
}

pub fn generate_bundle_with<R: Rng + ?Sized>(
    rng: &mut R,
    scenario: Scenario,
    now: DateTime<Local>,
) -> ScenarioDatasetBundle {
    let started = Instant::now();
    let profile = scenario.profile();

    let zones = generate_zones(rng, &profile);
    let trend = generate_trend(rng, &profile, now);
    let map = zones.iter().map(MapPoint::from_zone).collect();
    let fleet = generate_fleet(rng, &zones);
    let battery = generate_battery(rng);
    let reports = generate_reports(rng, now);

    debug!(
        "🎲 [GENERATOR] {} bundle: {} zones, {} trend points, {} fleet rows, {} battery readings in {:.3}ms",
        scenario.slug(),
        zones.len(),
        trend.len(),
        fleet.len(),
        battery.len(),
        started.elapsed().as_secs_f64() * 1000.0
    );

    ScenarioDatasetBundle {
        scenario,
        generated_at: now,
        zones,
        trend,
        map,
        fleet,
        battery,
        reports,
    }
}

fn gaussian<R: Rng + ?Sized>(rng: &mut R, mean: f64, std_dev: f64) -> f64 {
    let z: f64 = rng.sample(StandardNormal);
    mean + std_dev * z
}

/// Per-zone risk bias: constant baseline plus the scenario offset.
pub fn risk_bias<R: Rng + ?Sized>(rng: &mut R, profile: &ScenarioProfile) -> [f64; ZONE_COUNT] {
    let mut bias = [BASE_RISK_BIAS; ZONE_COUNT];
    match profile.risk_offset {
        RiskOffset::None => {}
        RiskOffset::Fixed(offsets) => {
            for (b, offset) in bias.iter_mut().zip(offsets) {
                *b += offset;
            }
        }
        RiskOffset::Uniform { low, high } => {
            for b in bias.iter_mut() {
                *b += rng.gen_range(low..high);
            }
        }
    }
    bias
}

/// Rounds half to even before clamping to 1..=4.
pub fn sample_risk_score<R: Rng + ?Sized>(rng: &mut R, bias: f64) -> u8 {
    let raw = (bias + gaussian(rng, 0.0, RISK_NOISE_STD)).round_ties_even();
    raw.clamp(1.0, 4.0) as u8
}

fn generate_zones<R: Rng + ?Sized>(rng: &mut R, profile: &ScenarioProfile) -> Vec<Zone> {
    let bias = risk_bias(rng, profile);
    let scores: Vec<u8> = bias.iter().map(|b| sample_risk_score(rng, *b)).collect();

    ZONE_SITES
        .iter()
        .zip(scores)
        .map(|(site, risk_score)| {
            let incidents_5min = rng.gen_range(0..10);
            let incidents_30min = incidents_5min + rng.gen_range(0..20);
            let incidents_24h = incidents_30min + rng.gen_range(0..60);
            let blocked_minutes =
                (risk_score as f64 * 10.0 + gaussian(rng, 0.0, BLOCKED_NOISE_STD)).max(0.0);

            Zone {
                name: site.name.to_string(),
                latitude: site.latitude,
                longitude: site.longitude,
                risk_score,
                risk_label: RiskLevel::from_score(risk_score),
                incidents_5min,
                incidents_30min,
                incidents_24h,
                blocked_minutes,
            }
        })
        .collect()
}

fn linear_ramp(start: f64, end: f64, points: usize) -> Vec<f64> {
    if points < 2 {
        return vec![start; points];
    }
    let step = (end - start) / (points - 1) as f64;
    (0..points).map(|i| start + step * i as f64).collect()
}

fn generate_trend<R: Rng + ?Sized>(
    rng: &mut R,
    profile: &ScenarioProfile,
    now: DateTime<Local>,
) -> Vec<TrendPoint> {
    let (ramp_start, ramp_end) = profile.flow_ramp;
    let base_flow = linear_ramp(ramp_start, ramp_end, TREND_POINTS);

    base_flow
        .into_iter()
        .enumerate()
        .map(|(i, flow)| {
            let steps_back = (TREND_POINTS - 1 - i) as i64;
            let timestamp = now - Duration::minutes(TREND_STEP_MINUTES * steps_back);
            let rides = (flow + gaussian(rng, 0.0, FLOW_NOISE_STD)).max(MIN_RIDES);
            let reports = (rides / 12.0 + gaussian(rng, 0.0, REPORT_NOISE_STD)).max(0.0);
            let tech_issues = gaussian(rng, rides / 60.0, TECH_ISSUE_STD).max(0.0);

            TrendPoint {
                timestamp,
                rides,
                reports,
                tech_issues,
            }
        })
        .collect()
}

fn generate_fleet<R: Rng + ?Sized>(rng: &mut R, zones: &[Zone]) -> Vec<FleetStatusRow> {
    let mut rows = Vec::with_capacity(zones.len() * FleetStatus::ALL.len());

    for zone in zones {
        let total: u32 = rng.gen_range(80..200);
        let weights = if zone.risk_label.is_elevated() {
            ELEVATED_FLEET_WEIGHTS
        } else {
            NORMAL_FLEET_WEIGHTS
        };

        // Rounding drift is accepted; counts are not renormalized to the total.
        for (status, weight) in FleetStatus::ALL.iter().zip(weights) {
            rows.push(FleetStatusRow {
                zone: zone.name.clone(),
                status_key: *status,
                count: (total as f64 * weight).round_ties_even() as u32,
            });
        }
    }

    rows
}

fn generate_battery<R: Rng + ?Sized>(rng: &mut R) -> Vec<BatteryReading> {
    (0..BATTERY_SAMPLES)
        .map(|_| BatteryReading {
            level: gaussian(rng, BATTERY_MEAN, BATTERY_STD).clamp(0.0, 100.0),
        })
        .collect()
}

fn sample_priority<R: Rng + ?Sized>(rng: &mut R) -> Priority {
    let u: f64 = rng.gen();
    if u < 0.4 {
        Priority::High
    } else if u < 0.8 {
        Priority::Medium
    } else {
        Priority::Low
    }
}

fn generate_reports<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Local>) -> Vec<ReportEntry> {
    let zones: Vec<&str> = (0..REPORT_COUNT)
        .map(|_| ZONE_SITES[rng.gen_range(0..ZONE_COUNT)].name)
        .collect();
    let minutes_ago: Vec<i64> = (0..REPORT_COUNT).map(|_| rng.gen_range(1..45)).collect();

    zones
        .into_iter()
        .zip(minutes_ago)
        .zip(REPORT_TEMPLATES)
        .map(|((zone, minutes), template)| ReportEntry {
            time: (now - Duration::minutes(minutes)).format("%H:%M").to_string(),
            zone: zone.to_string(),
            message: template.replace("{zone}", zone),
            priority: sample_priority(rng),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_ramp_endpoints() {
        let ramp = linear_ramp(40.0, 120.0, TREND_POINTS);
        assert_eq!(ramp.len(), 24);
        assert_eq!(ramp[0], 40.0);
        assert!((ramp[23] - 120.0).abs() < 1e-9);
        assert!(ramp.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_trend_window_ends_now_with_five_minute_spacing() {
        let mut rng = StdRng::seed_from_u64(7);
        let now = Local::now();
        let bundle = generate_bundle_with(&mut rng, Scenario::Nightlife, now);

        assert_eq!(bundle.trend.len(), TREND_POINTS);
        assert_eq!(bundle.trend.last().map(|p| p.timestamp), Some(now));
        for pair in bundle.trend.windows(2) {
            assert_eq!(pair[1].timestamp - pair[0].timestamp, Duration::minutes(5));
        }
        assert!(bundle.trend.iter().all(|p| p.rides >= 5.0));
        assert!(bundle.trend.iter().all(|p| p.reports >= 0.0 && p.tech_issues >= 0.0));
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let now = Local::now();
        let a = generate_bundle_with(&mut StdRng::seed_from_u64(42), Scenario::CommuterPeak, now);
        let b = generate_bundle_with(&mut StdRng::seed_from_u64(42), Scenario::CommuterPeak, now);
        assert_eq!(a, b);
    }

    #[test]
    fn test_fleet_uses_elevated_weights_for_high_risk() {
        let mut rng = StdRng::seed_from_u64(3);
        let bundle = generate_bundle_with(&mut rng, Scenario::CommuterPeak, Local::now());

        for zone in &bundle.zones {
            let rows: Vec<_> = bundle.fleet.iter().filter(|r| r.zone == zone.name).collect();
            assert_eq!(rows.len(), 4);
            let free = rows[0].count as f64;
            let blocked = rows[3].count as f64;
            // free/blocked ratio is 4.5 for elevated zones and 12 otherwise
            if zone.risk_label.is_elevated() {
                assert!(blocked > 0.0 && free / blocked < 6.0);
            } else {
                assert!(blocked > 0.0 && free / blocked > 9.0);
            }
        }
    }

    #[test]
    fn test_reports_use_templates_in_order() {
        let mut rng = StdRng::seed_from_u64(11);
        let bundle = generate_bundle_with(&mut rng, Scenario::Baseline, Local::now());

        assert_eq!(bundle.reports.len(), REPORT_COUNT);
        for (entry, template) in bundle.reports.iter().zip(REPORT_TEMPLATES) {
            assert_eq!(entry.message, template.replace("{zone}", &entry.zone));
            assert_eq!(entry.time.len(), 5);
            assert_eq!(&entry.time[2..3], ":");
        }
    }
}
