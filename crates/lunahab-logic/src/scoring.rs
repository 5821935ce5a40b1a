//! Metric computation and multi-objective scoring.
//!
//! Produces the `Metrics` bundle and folds it into one weighted scalar.
//! Feasibility comes from the validator; infeasible layouts stay scoreable
//! but take a flat 50% penalty so they never outrank feasible candidates.

use crate::constraints::validate;
use crate::error::LayoutError;
use crate::graph::ZoneGraph;
use crate::models::{ConstraintSettings, Layout, Metrics, PrivacyLevel, ScoreWeights, ZoneKind};

fn privacy_weight(level: PrivacyLevel) -> f64 {
    match level {
        PrivacyLevel::Low => 0.3,
        PrivacyLevel::Medium => 0.6,
        PrivacyLevel::High => 1.0,
    }
}

/// Acoustic isolation target for zones that earn a bonus above it.
fn acoustic_target(kind: ZoneKind) -> Option<f64> {
    match kind {
        ZoneKind::CrewQuarters => Some(0.7),
        ZoneKind::Exercise => Some(0.6),
        ZoneKind::Work => Some(0.5),
        _ => None,
    }
}

/// Fraction of required adjacency pairs with a direct edge.
fn transit_score(layout: &Layout, settings: &ConstraintSettings) -> f64 {
    if settings.adjacency_pairs.is_empty() {
        return 1.0;
    }
    let graph = ZoneGraph::from_zones(&layout.zones);
    let satisfied = settings
        .adjacency_pairs
        .iter()
        .filter(|&&(a, b)| graph.has_edge(a, b))
        .count();
    satisfied as f64 / settings.adjacency_pairs.len() as f64
}

fn privacy_score(layout: &Layout) -> f64 {
    if layout.zones.is_empty() {
        return 0.0;
    }
    let total: f64 = layout
        .zones
        .iter()
        .map(|zone| {
            let weight = privacy_weight(zone.privacy);
            let bonus = acoustic_target(zone.name)
                .map(|target| (zone.acoustic_isolation - target).clamp(0.0, 0.3))
                .unwrap_or(0.0);
            (weight + bonus).clamp(0.0, 1.0)
        })
        .sum();
    total / layout.zones.len() as f64
}

fn sustainability_score(layout: &Layout, settings: &ConstraintSettings) -> f64 {
    let water_factor =
        (layout.systems.water_recycling_rate / settings.min_water_recycling).min(1.2);
    let isru_factor = (layout.isru_ratio / 0.5).min(1.2);
    ((water_factor + isru_factor) / 2.0).min(1.0)
}

/// Battery draw-down per person per day over the autonomy window.
fn energy_per_person_day(layout: &Layout) -> f64 {
    let crew = layout.metadata.crew;
    let autonomy_days = layout.systems.power.autonomy_days;
    if crew == 0 || autonomy_days == 0 {
        return 10.0;
    }
    layout.systems.power.storage_kwh / (crew as f64 * autonomy_days as f64)
}

fn safety_score(layout: &Layout, settings: &ConstraintSettings) -> f64 {
    let loops_factor = (layout.systems.eclss_redundancy_loops as f64
        / settings.min_eclss_loops as f64)
        .min(1.5);
    let egress_count = layout.zones.iter().filter(|z| z.is_egress).count();
    let egress_factor = (egress_count as f64 / 2.0).min(1.0);
    let shelter_factor = if layout.zone(ZoneKind::StormShelter).is_some() {
        1.0
    } else {
        0.0
    };
    ((loops_factor + egress_factor + shelter_factor) / 3.0).min(1.0)
}

/// Compute metrics and the weighted scalar score for a layout.
pub fn evaluate(
    layout: &Layout,
    settings: &ConstraintSettings,
    weights: &ScoreWeights,
) -> Result<(Metrics, f64), LayoutError> {
    let weights = weights.normalized()?;

    let nhv = layout.nhv_m3();
    let nhv_eff = layout.nhv_efficiency();
    let transit = transit_score(layout, settings);
    let privacy = privacy_score(layout);
    let sustain = sustainability_score(layout, settings);
    let energy = energy_per_person_day(layout);
    let safety = safety_score(layout, settings);
    let feasibility = validate(layout, settings).passed;

    let metrics = Metrics {
        nhv_m3: nhv,
        nhv_efficiency: nhv_eff,
        transit_distance_score: transit,
        privacy_score: privacy,
        sustainability_score: sustain,
        energy_use_kwh_per_person_day: energy,
        safety_redundancy_score: safety,
        feasibility,
    };

    let energy_score = (2.0 / energy.max(1e-6)).clamp(0.0, 1.0);
    let mut score = weights.w_volume_eff * (nhv_eff / settings.min_nhv_efficiency).min(1.2)
        + weights.w_privacy * privacy
        + weights.w_transit * transit
        + weights.w_safety * safety
        + weights.w_sustain * sustain
        + weights.w_energy * energy_score;
    if !feasibility {
        score *= 0.5;
    }
    Ok((metrics, score))
}
