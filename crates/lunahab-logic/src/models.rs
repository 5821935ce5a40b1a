//! Core data model for lunar habitat layouts.
//!
//! Value types exchanged between the generator, validator, scorer and
//! optimizer, plus the settings/weights configuration they consume. All
//! types are plain serde-derived data; transformations always work on
//! clones, never in place on a caller's layout.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

// ── Zone identity ───────────────────────────────────────────────────────

/// The closed set of functional zone kinds inside the habitat.
///
/// Variant order matches the generator's allocation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ZoneKind {
    Airlock,
    Work,
    HygieneMedical,
    GalleyDining,
    CrewQuarters,
    Exercise,
    MaintenanceStorage,
    StormShelter,
    Agriculture,
}

impl ZoneKind {
    /// All zone kinds, in generation order.
    pub const ALL: [ZoneKind; 9] = [
        ZoneKind::Airlock,
        ZoneKind::Work,
        ZoneKind::HygieneMedical,
        ZoneKind::GalleyDining,
        ZoneKind::CrewQuarters,
        ZoneKind::Exercise,
        ZoneKind::MaintenanceStorage,
        ZoneKind::StormShelter,
        ZoneKind::Agriculture,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ZoneKind::Airlock => "Airlock",
            ZoneKind::Work => "Work",
            ZoneKind::HygieneMedical => "HygieneMedical",
            ZoneKind::GalleyDining => "GalleyDining",
            ZoneKind::CrewQuarters => "CrewQuarters",
            ZoneKind::Exercise => "Exercise",
            ZoneKind::MaintenanceStorage => "MaintenanceStorage",
            ZoneKind::StormShelter => "StormShelter",
            ZoneKind::Agriculture => "Agriculture",
        }
    }

    /// Zones whose volume allocation grows with crew size.
    pub fn scales_with_crew(self) -> bool {
        matches!(
            self,
            ZoneKind::CrewQuarters
                | ZoneKind::GalleyDining
                | ZoneKind::HygieneMedical
                | ZoneKind::Exercise
                | ZoneKind::Agriculture
        )
    }
}

impl fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Privacy level of a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrivacyLevel {
    Low,
    Medium,
    High,
}

/// Lighting profile of a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightingProfile {
    Warm3000K,
    Neutral4000K,
    Cool6500K,
    Adaptive,
}

/// Structural class of the habitat shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HabitatType {
    Inflatable,
    Rigid,
    RegolithHybrid,
}

// ── Zones & systems ─────────────────────────────────────────────────────

/// Pressurized or support zone inside the habitat.
///
/// `connections` declares one-directional neighbor names; consumers
/// symmetrize them into an undirected adjacency graph, and declared
/// neighbors need not exist as zones (the graph builder adds stub nodes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub name: ZoneKind,
    pub volume_m3: f64,
    pub usable_ratio: f64,
    pub privacy: PrivacyLevel,
    #[serde(default)]
    pub connections: Vec<ZoneKind>,
    pub acoustic_isolation: f64,
    pub lighting: LightingProfile,
    #[serde(default = "default_true")]
    pub is_pressurized: bool,
    #[serde(default)]
    pub is_egress: bool,
    #[serde(default)]
    pub equipment: Vec<String>,
}

fn default_true() -> bool {
    true
}

/// Power subsystem summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerSystem {
    pub source: String,
    pub autonomy_days: u32,
    pub storage_kwh: f64,
}

/// Thermal control summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermalSystem {
    pub control: String,
    /// Survivable exterior temperature range in °C.
    pub range_c: [f64; 2],
}

/// Communications summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommsSystem {
    pub local: bool,
    pub gateway: String,
}

/// Dust mitigation provisions at the habitat entrance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DustMitigation {
    pub dual_door: bool,
    pub suit_storage: bool,
    #[serde(default)]
    pub electrostatic: bool,
}

/// High-level systems summary for the habitat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Systems {
    pub eclss_redundancy_loops: u32,
    pub water_recycling_rate: f64,
    pub power: PowerSystem,
    pub thermal: ThermalSystem,
    pub comms: CommsSystem,
    pub dust_mitigation: DustMitigation,
}

// ── Layout aggregate ────────────────────────────────────────────────────

/// Mission metadata carried on every layout.
///
/// `crew` and `duration_days` are required; anything else round-trips
/// through `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutMetadata {
    pub crew: u32,
    pub duration_days: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Complete layout description — the aggregate the whole pipeline trades in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub habitat_name: String,
    pub habitat_type: HabitatType,
    pub pressurized_volume_m3: f64,
    pub zones: Vec<Zone>,
    pub systems: Systems,
    pub shield_equivalent_g_cm2: f64,
    pub isru_ratio: f64,
    pub docking_ports: u32,
    pub metadata: LayoutMetadata,
}

impl Layout {
    /// First zone of the given kind, if present.
    pub fn zone(&self, kind: ZoneKind) -> Option<&Zone> {
        self.zones.iter().find(|z| z.name == kind)
    }

    pub fn zone_mut(&mut self, kind: ZoneKind) -> Option<&mut Zone> {
        self.zones.iter_mut().find(|z| z.name == kind)
    }

    /// Net habitable volume: Σ volume × usable ratio over pressurized zones.
    pub fn nhv_m3(&self) -> f64 {
        self.zones
            .iter()
            .filter(|z| z.is_pressurized)
            .map(|z| z.volume_m3 * z.usable_ratio)
            .sum()
    }

    /// NHV as a fraction of the total pressurized volume.
    pub fn nhv_efficiency(&self) -> f64 {
        if self.pressurized_volume_m3 > 0.0 {
            self.nhv_m3() / self.pressurized_volume_m3
        } else {
            0.0
        }
    }

    /// Sum of all zone volumes (the closure target for generation).
    pub fn total_zone_volume(&self) -> f64 {
        self.zones.iter().map(|z| z.volume_m3).sum()
    }
}

// ── Metrics & results ───────────────────────────────────────────────────

/// Calculated performance metrics for a layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub nhv_m3: f64,
    pub nhv_efficiency: f64,
    pub transit_distance_score: f64,
    pub privacy_score: f64,
    pub sustainability_score: f64,
    pub energy_use_kwh_per_person_day: f64,
    pub safety_redundancy_score: f64,
    pub feasibility: bool,
}

/// Result set from running the constraint checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub passed: bool,
    pub messages: Vec<String>,
    #[serde(default)]
    pub failed_rules: Vec<String>,
}

/// A single step summary from the optimizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationLogEntry {
    pub iteration: u32,
    pub score: f64,
    pub accepted: bool,
    pub reason: String,
}

/// Optimizer output bundle: best layout, its metrics and score, full history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub layout: Layout,
    pub metrics: Metrics,
    pub score: f64,
    pub history: Vec<OptimizationLogEntry>,
}

// ── Configuration ───────────────────────────────────────────────────────

/// Thresholds used for validation. Pure configuration, no behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstraintSettings {
    pub min_crew: u32,
    pub max_crew: u32,
    pub min_duration_days: u32,
    pub max_duration_days: u32,
    pub min_nhv_per_person: f64,
    pub min_nhv_efficiency: f64,
    pub min_shield_g_cm2: f64,
    pub min_eclss_loops: u32,
    pub min_water_recycling: f64,
    pub min_power_autonomy_days: u32,
    pub min_privacy_quarters: f64,
    pub required_zones: Vec<ZoneKind>,
    pub adjacency_pairs: Vec<(ZoneKind, ZoneKind)>,
    pub max_storm_shelter_hops: u32,
}

impl Default for ConstraintSettings {
    fn default() -> Self {
        Self {
            min_crew: 2,
            max_crew: 4,
            min_duration_days: 30,
            max_duration_days: 180,
            min_nhv_per_person: 25.0,
            min_nhv_efficiency: 0.70,
            min_shield_g_cm2: 5.0,
            min_eclss_loops: 2,
            min_water_recycling: 0.90,
            min_power_autonomy_days: 14,
            min_privacy_quarters: 0.7,
            required_zones: vec![
                ZoneKind::Airlock,
                ZoneKind::Work,
                ZoneKind::HygieneMedical,
                ZoneKind::GalleyDining,
                ZoneKind::CrewQuarters,
                ZoneKind::Exercise,
                ZoneKind::MaintenanceStorage,
                ZoneKind::StormShelter,
            ],
            adjacency_pairs: vec![
                (ZoneKind::Airlock, ZoneKind::Work),
                (ZoneKind::CrewQuarters, ZoneKind::HygieneMedical),
                (ZoneKind::CrewQuarters, ZoneKind::GalleyDining),
            ],
            max_storm_shelter_hops: 3,
        }
    }
}

/// Weights for the multi-objective score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub w_volume_eff: f64,
    pub w_privacy: f64,
    pub w_transit: f64,
    pub w_safety: f64,
    pub w_sustain: f64,
    pub w_energy: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            w_volume_eff: 0.20,
            w_privacy: 0.15,
            w_transit: 0.15,
            w_safety: 0.20,
            w_sustain: 0.15,
            w_energy: 0.15,
        }
    }
}

impl ScoreWeights {
    /// Rescale so the six weights sum to 1.0.
    ///
    /// Fails when the weights sum to zero or less — such a weight set
    /// cannot rank anything.
    pub fn normalized(&self) -> Result<ScoreWeights, LayoutError> {
        let total = self.w_volume_eff
            + self.w_privacy
            + self.w_transit
            + self.w_safety
            + self.w_sustain
            + self.w_energy;
        if total <= 0.0 {
            return Err(LayoutError::InvalidWeights { total });
        }
        Ok(ScoreWeights {
            w_volume_eff: self.w_volume_eff / total,
            w_privacy: self.w_privacy / total,
            w_transit: self.w_transit / total,
            w_safety: self.w_safety / total,
            w_sustain: self.w_sustain / total,
            w_energy: self.w_energy / total,
        })
    }
}

/// Generator input parameters, as exchanged with collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub crew: u32,
    pub duration_days: u32,
    pub habitat_type: HabitatType,
    pub pressurized_volume_m3: f64,
    pub target_isru_ratio: f64,
    pub docking_ports: u32,
    pub seed: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub habitat_name: Option<String>,
    /// Optional weights bundled into seed config files for convenience.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weights: Option<ScoreWeights>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            crew: 4,
            duration_days: 90,
            habitat_type: HabitatType::Inflatable,
            pressurized_volume_m3: 160.0,
            target_isru_ratio: 0.6,
            docking_ports: 2,
            seed: 42,
            habitat_name: None,
            weights: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_kind_strings_round_trip() {
        for kind in ZoneKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
            let back: ZoneKind = serde_json::from_str(&json).unwrap();
            assert_eq!(back, kind);
        }
    }

    #[test]
    fn default_weights_normalize_to_unit_sum() {
        let weights = ScoreWeights::default().normalized().unwrap();
        let total = weights.w_volume_eff
            + weights.w_privacy
            + weights.w_transit
            + weights.w_safety
            + weights.w_sustain
            + weights.w_energy;
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn zero_weights_rejected() {
        let weights = ScoreWeights {
            w_volume_eff: 0.0,
            w_privacy: 0.0,
            w_transit: 0.0,
            w_safety: 0.0,
            w_sustain: 0.0,
            w_energy: 0.0,
        };
        assert!(matches!(
            weights.normalized(),
            Err(LayoutError::InvalidWeights { .. })
        ));
    }

    #[test]
    fn metadata_preserves_extra_keys() {
        let json = r#"{"crew":2,"duration_days":60,"seed":1,"site":"Shackleton"}"#;
        let meta: LayoutMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(meta.crew, 2);
        assert_eq!(meta.seed, Some(1));
        assert_eq!(meta.extra["site"], "Shackleton");
        let back = serde_json::to_string(&meta).unwrap();
        assert!(back.contains("Shackleton"));
    }

    #[test]
    fn zone_defaults_on_deserialize() {
        let json = r#"{
            "name": "Work",
            "volume_m3": 30.0,
            "usable_ratio": 0.85,
            "privacy": "Medium",
            "acoustic_isolation": 0.55,
            "lighting": "Neutral4000K"
        }"#;
        let zone: Zone = serde_json::from_str(json).unwrap();
        assert!(zone.is_pressurized);
        assert!(!zone.is_egress);
        assert!(zone.connections.is_empty());
        assert!(zone.equipment.is_empty());
    }

    #[test]
    fn settings_deserialize_partial() {
        let settings: ConstraintSettings = serde_json::from_str(r#"{"max_crew":6}"#).unwrap();
        assert_eq!(settings.max_crew, 6);
        assert_eq!(settings.min_crew, 2);
        assert_eq!(settings.required_zones.len(), 8);
    }
}
