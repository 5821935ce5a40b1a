//! Zone generation catalog — per-kind defaults for the generator.
//!
//! The catalog is immutable configuration passed into the generator by
//! reference, so tests can swap in alternate tables without touching
//! module state.

use crate::models::{LightingProfile, PrivacyLevel, ZoneKind};

/// Generation defaults for one zone kind.
#[derive(Debug, Clone)]
pub struct ZoneEntry {
    pub kind: ZoneKind,
    /// Share of pressurized volume before crew scaling and jitter.
    pub volume_fraction: f64,
    pub usable_ratio: f64,
    pub privacy: PrivacyLevel,
    pub acoustic_isolation: f64,
    pub lighting: LightingProfile,
    pub egress: bool,
    /// Declared one-directional neighbors (symmetrized by the graph builder).
    pub connections: Vec<ZoneKind>,
    pub equipment: Vec<&'static str>,
}

/// The full per-kind table, in generation order.
#[derive(Debug, Clone)]
pub struct ZoneCatalog {
    entries: Vec<ZoneEntry>,
}

impl ZoneCatalog {
    pub fn entries(&self) -> &[ZoneEntry] {
        &self.entries
    }

    pub fn total_fraction(&self) -> f64 {
        self.entries.iter().map(|e| e.volume_fraction).sum()
    }
}

impl Default for ZoneCatalog {
    fn default() -> Self {
        use LightingProfile::{Adaptive, Neutral4000K};
        use PrivacyLevel::{High, Low, Medium};
        use ZoneKind::*;

        let entries = vec![
            ZoneEntry {
                kind: Airlock,
                volume_fraction: 0.07,
                usable_ratio: 0.6,
                privacy: Low,
                acoustic_isolation: 0.4,
                lighting: Neutral4000K,
                egress: true,
                connections: vec![MaintenanceStorage, Work],
                equipment: vec!["dual-door", "suit-lock", "dust-scrubber"],
            },
            ZoneEntry {
                kind: Work,
                volume_fraction: 0.18,
                usable_ratio: 0.85,
                privacy: Medium,
                acoustic_isolation: 0.55,
                lighting: Neutral4000K,
                egress: false,
                connections: vec![Airlock, GalleyDining, Exercise, MaintenanceStorage],
                equipment: vec!["lab-bench", "fab-station"],
            },
            ZoneEntry {
                kind: HygieneMedical,
                volume_fraction: 0.09,
                usable_ratio: 0.8,
                privacy: High,
                acoustic_isolation: 0.75,
                lighting: Neutral4000K,
                egress: false,
                connections: vec![CrewQuarters, StormShelter],
                equipment: vec!["med-kit", "hygiene-module"],
            },
            ZoneEntry {
                kind: GalleyDining,
                volume_fraction: 0.11,
                usable_ratio: 0.85,
                privacy: Medium,
                acoustic_isolation: 0.6,
                lighting: Adaptive,
                egress: false,
                connections: vec![Work, CrewQuarters, Agriculture],
                equipment: vec!["galley", "table"],
            },
            ZoneEntry {
                kind: CrewQuarters,
                volume_fraction: 0.20,
                usable_ratio: 0.9,
                privacy: High,
                acoustic_isolation: 0.8,
                lighting: Adaptive,
                egress: false,
                connections: vec![GalleyDining, HygieneMedical, Exercise],
                equipment: vec!["pods", "privacy-panels"],
            },
            ZoneEntry {
                kind: Exercise,
                volume_fraction: 0.1,
                usable_ratio: 0.8,
                privacy: Medium,
                acoustic_isolation: 0.65,
                lighting: Neutral4000K,
                egress: false,
                connections: vec![CrewQuarters, Work],
                equipment: vec!["treadmill", "flywheel"],
            },
            ZoneEntry {
                kind: MaintenanceStorage,
                volume_fraction: 0.1,
                usable_ratio: 0.75,
                privacy: Low,
                acoustic_isolation: 0.5,
                lighting: Neutral4000K,
                egress: false,
                connections: vec![Airlock, Work, StormShelter, Agriculture],
                equipment: vec!["tool-racks", "spares"],
            },
            ZoneEntry {
                kind: StormShelter,
                volume_fraction: 0.07,
                usable_ratio: 0.7,
                privacy: High,
                acoustic_isolation: 0.85,
                lighting: Neutral4000K,
                egress: true,
                connections: vec![HygieneMedical, MaintenanceStorage],
                equipment: vec!["shielded-bunks", "backup-comms"],
            },
            ZoneEntry {
                kind: Agriculture,
                volume_fraction: 0.08,
                usable_ratio: 0.85,
                privacy: Medium,
                acoustic_isolation: 0.6,
                lighting: Neutral4000K,
                egress: false,
                connections: vec![GalleyDining, MaintenanceStorage],
                equipment: vec!["hydroponics", "algae"],
            },
        ];
        Self { entries }
    }
}
