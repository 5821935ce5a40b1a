//! Constraint-aware simulated annealing over habitat layouts.
//!
//! Each iteration clones the current layout, applies one neighbor
//! operator, and gates the candidate through the validator before the
//! Metropolis acceptance test. Infeasible candidates are rejected
//! outright; the feasible region is never left. Temperature is a pure
//! function of the iteration index.

use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::constraints::validate;
use crate::error::LayoutError;
use crate::models::{
    ConstraintSettings, Layout, OptimizationLogEntry, OptimizationResult, ScoreWeights, ZoneKind,
};
use crate::scoring::evaluate;

const TEMPERATURE_START: f64 = 1.0;
const TEMPERATURE_END: f64 = 0.05;
const FALLBACK_SEED: u64 = 42;

/// A small, structure-preserving mutation applied to a layout copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeighborOp {
    /// Transfer a volume sliver between two adjustable zones.
    AdjustZoneVolume,
    /// Perturb water recycling, power autonomy and battery storage.
    TuneSystems,
    /// Perturb the ISRU ratio.
    AdjustIsru,
    /// Perturb acoustic isolation of a shared-activity zone.
    AdjustPrivacy,
}

impl NeighborOp {
    pub const ALL: [NeighborOp; 4] = [
        NeighborOp::AdjustZoneVolume,
        NeighborOp::TuneSystems,
        NeighborOp::AdjustIsru,
        NeighborOp::AdjustPrivacy,
    ];

    /// Stable name used as the acceptance log reason.
    pub fn as_str(self) -> &'static str {
        match self {
            NeighborOp::AdjustZoneVolume => "adjust_zone_volume",
            NeighborOp::TuneSystems => "tune_systems",
            NeighborOp::AdjustIsru => "adjust_isru",
            NeighborOp::AdjustPrivacy => "adjust_privacy",
        }
    }

    /// Apply the mutation in place on `layout`.
    pub fn apply(self, layout: &mut Layout, rng: &mut impl Rng) {
        match self {
            NeighborOp::AdjustZoneVolume => adjust_zone_volume(layout, rng),
            NeighborOp::TuneSystems => tune_systems(layout, rng),
            NeighborOp::AdjustIsru => adjust_isru(layout, rng),
            NeighborOp::AdjustPrivacy => adjust_privacy(layout, rng),
        }
    }
}

fn adjust_zone_volume(layout: &mut Layout, rng: &mut impl Rng) {
    // Airlock and storm shelter volumes are fixed by their roles.
    let adjustable: Vec<usize> = layout
        .zones
        .iter()
        .enumerate()
        .filter(|(_, z)| !matches!(z.name, ZoneKind::Airlock | ZoneKind::StormShelter))
        .map(|(i, _)| i)
        .collect();
    if adjustable.len() < 2 {
        return;
    }
    let a = rng.gen_range(0..adjustable.len());
    let mut b = rng.gen_range(0..adjustable.len() - 1);
    if b >= a {
        b += 1;
    }
    let (donor, receiver) = (adjustable[a], adjustable[b]);
    let transfer = layout.zones[donor].volume_m3 * rng.gen_range(0.02..0.06);
    layout.zones[donor].volume_m3 = (layout.zones[donor].volume_m3 - transfer).max(5.0);
    layout.zones[receiver].volume_m3 += transfer;
    layout.pressurized_volume_m3 = layout.total_zone_volume();
}

fn tune_systems(layout: &mut Layout, rng: &mut impl Rng) {
    let systems = &mut layout.systems;
    systems.water_recycling_rate =
        (systems.water_recycling_rate + rng.gen_range(-0.02..0.03)).clamp(0.90, 0.99);
    let autonomy_delta: i64 = rng.gen_range(-1..=2);
    systems.power.autonomy_days =
        (systems.power.autonomy_days as i64 + autonomy_delta).max(14) as u32;
    systems.power.storage_kwh = (systems.power.storage_kwh + rng.gen_range(-10.0..15.0)).max(120.0);
}

fn adjust_isru(layout: &mut Layout, rng: &mut impl Rng) {
    layout.isru_ratio = (layout.isru_ratio + rng.gen_range(-0.05..0.08)).clamp(0.4, 1.0);
}

fn adjust_privacy(layout: &mut Layout, rng: &mut impl Rng) {
    let targets: Vec<usize> = layout
        .zones
        .iter()
        .enumerate()
        .filter(|(_, z)| {
            matches!(
                z.name,
                ZoneKind::Work | ZoneKind::Exercise | ZoneKind::GalleyDining
            )
        })
        .map(|(i, _)| i)
        .collect();
    let Some(&idx) = targets.choose(rng) else {
        return;
    };
    let zone = &mut layout.zones[idx];
    zone.acoustic_isolation = (zone.acoustic_isolation + rng.gen_range(-0.05..0.1)).clamp(0.3, 1.0);
}

/// Run simulated annealing under hard constraints.
///
/// The seed resolves from the argument, then the layout's metadata, then
/// a fixed fallback; identical inputs replay an identical history.
pub fn optimize(
    layout: &Layout,
    iterations: u32,
    settings: &ConstraintSettings,
    weights: &ScoreWeights,
    seed: Option<u64>,
) -> Result<OptimizationResult, LayoutError> {
    let seed = seed.or(layout.metadata.seed).unwrap_or(FALLBACK_SEED);
    debug!("annealing start: {} iterations, seed {}", iterations, seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut current = layout.clone();
    let (initial_metrics, initial_score) = evaluate(&current, settings, weights)?;
    let mut current_score = initial_score;
    let mut best = current.clone();
    let mut best_metrics = initial_metrics;
    let mut best_score = initial_score;

    let mut history = vec![OptimizationLogEntry {
        iteration: 0,
        score: initial_score,
        accepted: true,
        reason: "initial".to_string(),
    }];

    for step in 1..=iterations {
        let mut candidate = current.clone();
        let op = NeighborOp::ALL[rng.gen_range(0..NeighborOp::ALL.len())];
        op.apply(&mut candidate, &mut rng);

        let validation = validate(&candidate, settings);
        if !validation.passed {
            history.push(OptimizationLogEntry {
                iteration: step,
                score: current_score,
                accepted: false,
                reason: format!("constraint_fail:{}", validation.failed_rules.join(",")),
            });
            continue;
        }

        let (candidate_metrics, candidate_score) = evaluate(&candidate, settings, weights)?;
        let temperature = TEMPERATURE_START
            * (TEMPERATURE_END / TEMPERATURE_START).powf(step as f64 / iterations as f64);
        let delta = candidate_score - current_score;
        let accept = delta >= 0.0 || rng.gen::<f64>() < (delta / temperature.max(1e-6)).exp();

        if accept {
            current = candidate;
            current_score = candidate_score;
            history.push(OptimizationLogEntry {
                iteration: step,
                score: current_score,
                accepted: true,
                reason: op.as_str().to_string(),
            });
            if candidate_score > best_score {
                best = current.clone();
                best_metrics = candidate_metrics;
                best_score = candidate_score;
            }
        } else {
            history.push(OptimizationLogEntry {
                iteration: step,
                score: current_score,
                accepted: false,
                reason: "anneal_reject".to_string(),
            });
        }
    }

    debug!(
        "annealing finished: {} iterations, best score {:.3}",
        iterations, best_score
    );

    Ok(OptimizationResult {
        layout: best,
        metrics: best_metrics,
        score: best_score,
        history,
    })
}
