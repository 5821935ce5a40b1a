//! Initial feasible layout generator.
//!
//! Allocates zone volumes from the catalog's proportion table, scales
//! crew-sensitive zones, applies a seeded jitter, renormalizes to the
//! target pressurized volume, then validates. A single corrective pass
//! may expand habitation zones to chase an NHV shortfall; if the layout
//! is still infeasible after that, generation fails outright.

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::catalog::ZoneCatalog;
use crate::constraints::validate;
use crate::error::LayoutError;
use crate::models::{
    CommsSystem, ConstraintSettings, DustMitigation, GeneratorConfig, Layout, LayoutMetadata,
    PowerSystem, Systems, ThermalSystem, Zone, ZoneKind,
};

const MIN_ZONE_VOLUME_M3: f64 = 5.0;

/// Zones expanded by the NHV self-heal pass.
fn nhv_boost_zone(kind: ZoneKind) -> bool {
    matches!(
        kind,
        ZoneKind::CrewQuarters
            | ZoneKind::GalleyDining
            | ZoneKind::HygieneMedical
            | ZoneKind::StormShelter
    )
}

/// Generate a feasible baseline layout from configuration parameters.
///
/// Seeds a private RNG from `config.seed`, so identical configs yield
/// identical layouts.
pub fn generate(
    config: &GeneratorConfig,
    settings: &ConstraintSettings,
) -> Result<Layout, LayoutError> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    generate_with(config, settings, &ZoneCatalog::default(), &mut rng)
}

/// Generate with an explicit catalog and random source.
pub fn generate_with(
    config: &GeneratorConfig,
    settings: &ConstraintSettings,
    catalog: &ZoneCatalog,
    rng: &mut impl Rng,
) -> Result<Layout, LayoutError> {
    let crew = config.crew;
    if crew < settings.min_crew || crew > settings.max_crew {
        return Err(LayoutError::CrewOutOfRange {
            crew,
            min: settings.min_crew,
            max: settings.max_crew,
        });
    }

    let pressurized = config.pressurized_volume_m3;
    let total_fraction = catalog.total_fraction();
    let crew_scale = (crew as f64 / 4.0).max(1.0);

    let mut zones: Vec<Zone> = catalog
        .entries()
        .iter()
        .map(|entry| {
            let mut volume = pressurized * entry.volume_fraction / total_fraction;
            if entry.kind.scales_with_crew() {
                volume *= crew_scale;
            }
            Zone {
                name: entry.kind,
                volume_m3: volume,
                usable_ratio: entry.usable_ratio,
                privacy: entry.privacy,
                connections: entry.connections.clone(),
                acoustic_isolation: entry.acoustic_isolation,
                lighting: entry.lighting,
                is_pressurized: true,
                is_egress: entry.egress,
                equipment: entry.equipment.iter().map(|e| e.to_string()).collect(),
            }
        })
        .collect();

    // Jitter volumes slightly, then rescale so the sum stays on target.
    for zone in &mut zones {
        let jitter = rng.gen_range(-0.05..0.05);
        zone.volume_m3 = (zone.volume_m3 * (1.0 + jitter)).max(MIN_ZONE_VOLUME_M3);
    }
    let total: f64 = zones.iter().map(|z| z.volume_m3).sum();
    let scaling = if total > 0.0 { pressurized / total } else { 1.0 };
    for zone in &mut zones {
        zone.volume_m3 *= scaling;
    }

    let systems = Systems {
        eclss_redundancy_loops: 2,
        water_recycling_rate: 0.92,
        power: PowerSystem {
            source: "Solar+Battery".to_string(),
            autonomy_days: settings.min_power_autonomy_days.max(14),
            storage_kwh: 160.0,
        },
        thermal: ThermalSystem {
            control: "heat-pump".to_string(),
            range_c: [-173.0, 127.0],
        },
        comms: CommsSystem {
            local: true,
            gateway: "HALO-link".to_string(),
        },
        dust_mitigation: DustMitigation {
            dual_door: true,
            suit_storage: true,
            electrostatic: true,
        },
    };

    let mut layout = Layout {
        habitat_name: config
            .habitat_name
            .clone()
            .unwrap_or_else(|| "Helios-Init".to_string()),
        habitat_type: config.habitat_type,
        pressurized_volume_m3: pressurized,
        zones,
        systems,
        shield_equivalent_g_cm2: (5.0 + 0.2 * crew as f64).max(5.5),
        isru_ratio: config.target_isru_ratio.clamp(0.5, 1.0),
        docking_ports: config.docking_ports,
        metadata: LayoutMetadata {
            crew,
            duration_days: config.duration_days,
            seed: Some(config.seed),
            extra: Default::default(),
        },
    };

    let mut result = validate(&layout, settings);
    if !result.passed {
        let nhv_shortfall = result
            .failed_rules
            .iter()
            .any(|r| r == "nhv_per_crew" || r == "nhv_efficiency");
        if nhv_shortfall {
            // One corrective pass: expand habitation zones toward the
            // required NHV, then re-validate once.
            let needed_nhv = crew as f64 * settings.min_nhv_per_person;
            let current_nhv: f64 = layout
                .zones
                .iter()
                .map(|z| z.volume_m3 * z.usable_ratio)
                .sum();
            let boost_ratio = if current_nhv > 0.0 {
                (needed_nhv / current_nhv).sqrt()
            } else {
                1.1
            };
            debug!(
                "NHV shortfall: {:.1} of {:.1} m³, boosting habitation zones by {:.3}",
                current_nhv, needed_nhv, boost_ratio
            );
            for zone in &mut layout.zones {
                if nhv_boost_zone(zone.name) {
                    zone.volume_m3 *= boost_ratio;
                }
            }
            layout.pressurized_volume_m3 = layout.total_zone_volume();
            result = validate(&layout, settings);
        }
    }

    if !result.passed {
        return Err(LayoutError::InfeasibleGeneration {
            failed_rules: result.failed_rules,
        });
    }

    Ok(layout)
}
