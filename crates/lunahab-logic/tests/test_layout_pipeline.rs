//! Integration tests for the full layout pipeline.
//!
//! Exercises: GeneratorConfig → generate → validate → evaluate → optimize
//!
//! All tests are pure logic — no file I/O, no CLI.

use lunahab_logic::models::{
    ConstraintSettings, GeneratorConfig, HabitatType, Layout, LightingProfile, PrivacyLevel,
    ScoreWeights, Zone, ZoneKind,
};
use lunahab_logic::{evaluate, generate, optimize, validate};

// ── Helpers ────────────────────────────────────────────────────────────

fn scenario_config() -> GeneratorConfig {
    GeneratorConfig {
        crew: 4,
        duration_days: 90,
        habitat_type: HabitatType::Inflatable,
        pressurized_volume_m3: 170.0,
        target_isru_ratio: 0.6,
        docking_ports: 2,
        seed: 7,
        ..GeneratorConfig::default()
    }
}

fn scenario_layout() -> Layout {
    generate(&scenario_config(), &ConstraintSettings::default()).unwrap()
}

// ── Generation scenarios ───────────────────────────────────────────────

#[test]
fn generated_volume_closes_on_target() {
    let layout = scenario_layout();
    let total: f64 = layout.zones.iter().map(|z| z.volume_m3).sum();
    assert!((total - 170.0).abs() < 1e-6);
    assert!(validate(&layout, &ConstraintSettings::default()).passed);
}

#[test]
fn whole_supported_envelope_is_feasible() {
    let settings = ConstraintSettings::default();
    for crew in [settings.min_crew, settings.max_crew] {
        for duration in [settings.min_duration_days, settings.max_duration_days] {
            let config = GeneratorConfig {
                crew,
                duration_days: duration,
                ..GeneratorConfig::default()
            };
            let layout = generate(&config, &settings)
                .unwrap_or_else(|e| panic!("crew {crew}, duration {duration}: {e}"));
            let result = validate(&layout, &settings);
            assert!(result.passed, "failed rules: {:?}", result.failed_rules);
        }
    }
}

// ── Validation scenarios ───────────────────────────────────────────────

#[test]
fn dropping_exercise_zone_fails_required_zones() {
    let mut layout = scenario_layout();
    layout.zones.retain(|z| z.name != ZoneKind::Exercise);
    let result = validate(&layout, &ConstraintSettings::default());
    assert!(!result.passed);
    assert!(result.failed_rules.contains(&"required_zones".to_string()));
}

#[test]
fn spanning_tree_lacks_redundant_paths() {
    use ZoneKind::*;
    // Five zones in a star around the storm shelter: connected, within
    // hop budget, every other rule satisfied — but no cycle anywhere.
    let spokes = [Airlock, Work, CrewQuarters, HygieneMedical];
    let mut zones: Vec<Zone> = spokes
        .iter()
        .map(|&kind| Zone {
            name: kind,
            volume_m3: 40.0,
            usable_ratio: 0.85,
            privacy: if kind == CrewQuarters {
                PrivacyLevel::High
            } else {
                PrivacyLevel::Medium
            },
            connections: vec![StormShelter],
            acoustic_isolation: 0.8,
            lighting: LightingProfile::Neutral4000K,
            is_pressurized: true,
            is_egress: kind == Airlock,
            equipment: vec![],
        })
        .collect();
    zones.push(Zone {
        name: StormShelter,
        volume_m3: 40.0,
        usable_ratio: 0.85,
        privacy: PrivacyLevel::High,
        connections: vec![],
        acoustic_isolation: 0.85,
        lighting: LightingProfile::Neutral4000K,
        is_pressurized: true,
        is_egress: true,
        equipment: vec![],
    });

    let template = scenario_layout();
    let mut layout = Layout {
        zones,
        pressurized_volume_m3: 200.0,
        ..template
    };
    layout.metadata.crew = 2;

    let settings = ConstraintSettings {
        required_zones: spokes.iter().copied().chain([StormShelter]).collect(),
        adjacency_pairs: vec![(Airlock, StormShelter)],
        ..ConstraintSettings::default()
    };
    let result = validate(&layout, &settings);
    assert_eq!(result.failed_rules, vec!["redundant_paths".to_string()]);
    assert!(!result.passed);
}

// ── Optimization scenarios ─────────────────────────────────────────────

#[test]
fn optimized_layout_stays_feasible_and_close_to_start() {
    let layout = scenario_layout();
    let settings = ConstraintSettings::default();
    let weights = ScoreWeights::default();
    let (metrics_before, score_before) = evaluate(&layout, &settings, &weights).unwrap();
    assert!(metrics_before.feasibility);

    let result = optimize(&layout, 50, &settings, &weights, Some(5)).unwrap();
    assert!(result.metrics.feasibility);
    assert!(result.score >= score_before * 0.9);
}

#[test]
fn optimization_is_deterministic() {
    let layout = scenario_layout();
    let settings = ConstraintSettings::default();
    let weights = ScoreWeights::default();
    let a = optimize(&layout, 60, &settings, &weights, Some(5)).unwrap();
    let b = optimize(&layout, 60, &settings, &weights, Some(5)).unwrap();
    assert_eq!(a.history, b.history);
    assert_eq!(a.score, b.score);
    assert_eq!(a.layout, b.layout);
}

#[test]
fn best_tracking_is_monotone_and_feasible() {
    let layout = scenario_layout();
    let settings = ConstraintSettings::default();
    let weights = ScoreWeights::default();
    let result = optimize(&layout, 80, &settings, &weights, Some(9)).unwrap();

    assert!(result.score >= result.history[0].score);
    assert!(result.metrics.feasibility);
    // The returned score is the running maximum of accepted scores.
    let max_accepted = result
        .history
        .iter()
        .filter(|e| e.accepted)
        .map(|e| e.score)
        .fold(f64::NEG_INFINITY, f64::max);
    assert!((result.score - max_accepted).abs() < 1e-12);
}

#[test]
fn input_layout_never_mutated() {
    let layout = scenario_layout();
    let snapshot = layout.clone();
    let _ = optimize(
        &layout,
        30,
        &ConstraintSettings::default(),
        &ScoreWeights::default(),
        Some(4),
    )
    .unwrap();
    assert_eq!(layout, snapshot);
}

// ── Interchange round-trip ─────────────────────────────────────────────

#[test]
fn layout_round_trips_through_json() {
    let layout = scenario_layout();
    let json = serde_json::to_string_pretty(&layout).unwrap();
    let back: Layout = serde_json::from_str(&json).unwrap();
    assert_eq!(back, layout);
    // Interchange field names are part of the contract.
    for field in [
        "habitat_name",
        "pressurized_volume_m3",
        "shield_equivalent_g_cm2",
        "isru_ratio",
        "docking_ports",
        "eclss_redundancy_loops",
        "water_recycling_rate",
        "autonomy_days",
        "storage_kwh",
        "dual_door",
        "suit_storage",
        "duration_days",
    ] {
        assert!(json.contains(field), "missing field {field}");
    }
}

#[test]
fn optimization_result_serializes() {
    let layout = scenario_layout();
    let result = optimize(
        &layout,
        10,
        &ConstraintSettings::default(),
        &ScoreWeights::default(),
        Some(2),
    )
    .unwrap();
    let json = serde_json::to_string(&result).unwrap();
    assert!(json.contains("\"history\""));
    assert!(json.contains("\"initial\""));
    let back: lunahab_logic::models::OptimizationResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back, result);
}
