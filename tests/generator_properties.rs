// tests/generator_properties.rs
//
// Structural properties every generated bundle must satisfy, plus statistical
// checks on the per-scenario bias vectors and the report priority weights.

use chrono::Local;
use rand::rngs::StdRng;
use rand::SeedableRng;

use safety_cockpit::generator::{
    generate_bundle, generate_bundle_with, risk_bias, sample_risk_score, BASE_RISK_BIAS,
    BATTERY_SAMPLES, REPORT_COUNT, TREND_POINTS,
};
use safety_cockpit::metrics::{safety_index, SummaryMetrics};
use safety_cockpit::scenario::Scenario;
use safety_cockpit::types::{FleetStatus, Priority, RiskLevel};
use safety_cockpit::zones::ZONE_COUNT;

const ALL_SCENARIOS: [Scenario; 5] = [
    Scenario::CommuterPeak,
    Scenario::Nightlife,
    Scenario::SchoolCommuteSafety,
    Scenario::ConstructionDetours,
    Scenario::Baseline,
];

#[test]
fn test_bundle_invariants_hold_for_every_scenario() {
    let mut rng = StdRng::seed_from_u64(7);

    for scenario in ALL_SCENARIOS {
        for _ in 0..25 {
            let bundle = generate_bundle_with(&mut rng, scenario, Local::now());
            assert_eq!(bundle.scenario, scenario);
            assert_eq!(bundle.zones.len(), ZONE_COUNT);

            for zone in &bundle.zones {
                assert!(zone.incidents_5min <= zone.incidents_30min, "{:?}", zone);
                assert!(zone.incidents_30min <= zone.incidents_24h, "{:?}", zone);
                assert!((1..=4).contains(&zone.risk_score), "{:?}", zone);
                assert_eq!(zone.risk_label, RiskLevel::from_score(zone.risk_score));
                assert!(zone.blocked_minutes >= 0.0, "{:?}", zone);
            }

            assert_eq!(bundle.trend.len(), TREND_POINTS);
            assert!(bundle.trend.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
            for point in &bundle.trend {
                assert!(point.rides >= 5.0);
                assert!(point.reports >= 0.0);
                assert!(point.tech_issues >= 0.0);
            }

            assert_eq!(bundle.fleet.len(), ZONE_COUNT * FleetStatus::ALL.len());
            assert_eq!(bundle.battery.len(), BATTERY_SAMPLES);
            assert!(bundle.battery.iter().all(|b| (0.0..=100.0).contains(&b.level)));
            assert_eq!(bundle.reports.len(), REPORT_COUNT);
            assert_eq!(bundle.map.len(), ZONE_COUNT);

            let metrics = SummaryMetrics::from_bundle(&bundle);
            assert!(metrics.safety_index <= 100);
            assert!(metrics.low_battery_percent <= 100);
        }
    }
}

#[test]
fn test_fleet_rows_approximate_zone_totals() {
    let mut rng = StdRng::seed_from_u64(11);
    let bundle = generate_bundle_with(&mut rng, Scenario::CommuterPeak, Local::now());

    for zone in &bundle.zones {
        let total: u32 = bundle
            .fleet
            .iter()
            .filter(|r| r.zone == zone.name)
            .map(|r| r.count)
            .sum();
        // Four independently rounded buckets drift by at most two vehicles
        assert!((78..=201).contains(&total), "{} has {}", zone.name, total);
    }
}

#[test]
fn test_unknown_label_generates_baseline() {
    let bundle = generate_bundle("rush hour on mars");
    assert_eq!(bundle.scenario, Scenario::Baseline);
    assert_eq!(bundle.zones.len(), ZONE_COUNT);
}

#[test]
fn test_label_lookup_accepts_display_names() {
    assert_eq!(generate_bundle("Weekend night / nightlife").scenario, Scenario::Nightlife);
    assert_eq!(generate_bundle("NIGHTLIFE").scenario, Scenario::Nightlife);
}

#[test]
fn test_school_commute_risk_mean_tracks_bias() {
    let mut rng = StdRng::seed_from_u64(2024);
    let profile = Scenario::SchoolCommuteSafety.profile();
    let bias = risk_bias(&mut rng, &profile);

    let expected_offsets = [0.4, 0.8, 0.3, 0.2, 0.2, 0.7, 0.4, 0.3, 0.2, 0.5];
    for (b, offset) in bias.iter().zip(expected_offsets) {
        assert!((b - (BASE_RISK_BIAS + offset)).abs() < 1e-12);
    }

    let trials = 5000;
    for (zone_idx, b) in bias.iter().enumerate() {
        let sum: u64 = (0..trials)
            .map(|_| sample_risk_score(&mut rng, *b) as u64)
            .sum();
        let mean = sum as f64 / trials as f64;
        assert!(
            (mean - b).abs() < 0.1,
            "zone {} mean {:.3} does not track bias {:.2}",
            zone_idx,
            mean,
            b
        );
    }
}

#[test]
fn test_construction_bias_is_drawn_per_zone_in_range() {
    let profile = Scenario::ConstructionDetours.profile();
    let (low, high) = (BASE_RISK_BIAS + 0.3, BASE_RISK_BIAS + 1.5);
    let mut offsets = Vec::new();

    for seed in 0..500 {
        let mut rng = StdRng::seed_from_u64(seed);
        let bias = risk_bias(&mut rng, &profile);

        for (zone_idx, b) in bias.iter().enumerate() {
            assert!(
                (low..high).contains(b),
                "seed {} zone {} bias {:.3} outside [{:.1}, {:.1})",
                seed,
                zone_idx,
                b,
                low,
                high
            );
        }
        assert!(
            bias.iter().any(|b| (b - bias[0]).abs() > 1e-9),
            "seed {} drew the same offset for every zone",
            seed
        );
        offsets.extend(bias.iter().map(|b| b - BASE_RISK_BIAS));
    }

    // 5000 draws should spread over the whole interval
    let mean = offsets.iter().sum::<f64>() / offsets.len() as f64;
    assert!((mean - 0.9).abs() < 0.03, "offset mean {:.3}", mean);
    assert!(offsets.iter().any(|o| *o < 0.4));
    assert!(offsets.iter().any(|o| *o > 1.4));
}

#[test]
fn test_report_priorities_follow_weights() {
    let mut rng = StdRng::seed_from_u64(99);
    let now = Local::now();
    let bundles = 2500;

    let (mut high, mut medium, mut low) = (0usize, 0usize, 0usize);
    for _ in 0..bundles {
        let bundle = generate_bundle_with(&mut rng, Scenario::Baseline, now);
        for report in &bundle.reports {
            match report.priority {
                Priority::High => high += 1,
                Priority::Medium => medium += 1,
                Priority::Low => low += 1,
            }
        }
    }

    let total = (high + medium + low) as f64;
    assert_eq!(total as usize, bundles * REPORT_COUNT);
    for (name, count, weight) in [("high", high, 0.4), ("medium", medium, 0.4), ("low", low, 0.2)] {
        let share = count as f64 / total;
        assert!(
            (share - weight).abs() < 0.02,
            "{} share {:.3} does not track weight {:.1}",
            name,
            share,
            weight
        );
    }
}

#[test]
fn test_school_commute_bundles_rank_zone_two_above_zone_one() {
    let mut rng = StdRng::seed_from_u64(99);
    let trials = 500;
    let mut sums = [0u32; ZONE_COUNT];

    for _ in 0..trials {
        let bundle = generate_bundle_with(&mut rng, Scenario::SchoolCommuteSafety, Local::now());
        for (sum, zone) in sums.iter_mut().zip(&bundle.zones) {
            *sum += zone.risk_score as u32;
        }
    }

    let means: Vec<f64> = sums.iter().map(|s| *s as f64 / trials as f64).collect();
    // Offsets 0.4 and 0.8 on top of the shared baseline
    assert!((means[0] - 2.4).abs() < 0.15, "zone 1 mean {:.3}", means[0]);
    assert!((means[1] - 2.8).abs() < 0.15, "zone 2 mean {:.3}", means[1]);
    assert!(means[1] > means[0]);
}

#[test]
fn test_safety_index_bounded_at_extremes() {
    assert_eq!(safety_index(4.0, 10_000.0), 0.0);
    assert_eq!(safety_index(0.0, 0.0), 100.0);
    assert_eq!(safety_index(-50.0, -50.0), 100.0);
    assert_eq!(safety_index(f64::NAN, 0.0), 0.0);
    let mid = safety_index(2.0, 20.0);
    assert!((mid - 59.0).abs() < 1e-9);
}
