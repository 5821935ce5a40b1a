//! Hard-constraint validator for habitat layouts.
//!
//! Pure function over a layout: every rule appends one human-readable
//! message; failures also record a stable rule id. Violations are data,
//! never errors — callers (generator self-heal, optimizer gate) decide
//! what to do with them.

use crate::graph::ZoneGraph;
use crate::models::{ConstraintSettings, Layout, PrivacyLevel, ValidationResult, ZoneKind};

struct RuleLog {
    messages: Vec<String>,
    failed: Vec<String>,
}

impl RuleLog {
    fn new() -> Self {
        Self {
            messages: Vec::new(),
            failed: Vec::new(),
        }
    }

    fn pass(&mut self, message: String) {
        self.messages.push(message);
    }

    fn fail(&mut self, rule: impl Into<String>, message: String) {
        self.failed.push(rule.into());
        self.messages.push(message);
    }

    fn has_failed(&self, rule: &str) -> bool {
        self.failed.iter().any(|r| r == rule)
    }
}

/// Validate a layout against the mission hard constraints.
pub fn validate(layout: &Layout, settings: &ConstraintSettings) -> ValidationResult {
    let mut log = RuleLog::new();

    let crew = layout.metadata.crew;
    let duration = layout.metadata.duration_days;
    let graph = ZoneGraph::from_zones(&layout.zones);
    let nhv = layout.nhv_m3();
    let nhv_eff = layout.nhv_efficiency();

    // Crew & duration range
    if crew < settings.min_crew || crew > settings.max_crew {
        log.fail(
            "crew_range",
            format!(
                "Crew size {} outside supported range {}-{}.",
                crew, settings.min_crew, settings.max_crew
            ),
        );
    } else {
        log.pass(format!("Crew size {} within supported range.", crew));
    }

    if duration < settings.min_duration_days || duration > settings.max_duration_days {
        log.fail(
            "duration_range",
            format!(
                "Duration {} days outside supported range {}-{}.",
                duration, settings.min_duration_days, settings.max_duration_days
            ),
        );
    } else {
        log.pass(format!(
            "Mission duration {} days within supported range.",
            duration
        ));
    }

    // Required zones present
    let missing: Vec<&str> = settings
        .required_zones
        .iter()
        .filter(|&&kind| layout.zone(kind).is_none())
        .map(|kind| kind.as_str())
        .collect();
    if !missing.is_empty() {
        log.fail(
            "required_zones",
            format!("Missing mandatory zones: {}.", missing.join(", ")),
        );
    } else {
        log.pass("All mandatory zones present.".to_string());
    }

    // NHV per crew
    let required_nhv = crew as f64 * settings.min_nhv_per_person;
    if nhv < required_nhv {
        log.fail(
            "nhv_per_crew",
            format!(
                "NHV {:.1} m³ below required {:.1} m³ (add {:.1} m³ usable).",
                nhv,
                required_nhv,
                required_nhv - nhv
            ),
        );
    } else {
        log.pass(format!("NHV {:.1} m³ meets per-crew requirement.", nhv));
    }

    if nhv_eff < settings.min_nhv_efficiency {
        log.fail(
            "nhv_efficiency",
            format!(
                "NHV efficiency {:.2} < {:.2}; consider more usable volume.",
                nhv_eff, settings.min_nhv_efficiency
            ),
        );
    } else {
        log.pass(format!("NHV efficiency {:.2} meets minimum.", nhv_eff));
    }

    // Shielding
    if layout.shield_equivalent_g_cm2 < settings.min_shield_g_cm2 {
        log.fail(
            "radiation_shield",
            format!(
                "Shielding {:.1} g/cm² < {:.1} g/cm².",
                layout.shield_equivalent_g_cm2, settings.min_shield_g_cm2
            ),
        );
    } else {
        log.pass("Radiation shielding meets requirement.".to_string());
    }

    // Systems checks
    let systems = &layout.systems;
    if systems.eclss_redundancy_loops < settings.min_eclss_loops {
        log.fail(
            "eclss_redundancy",
            "ECLSS redundancy below requirement; need >= 2 full loops.".to_string(),
        );
    } else {
        log.pass("ECLSS redundancy satisfied.".to_string());
    }

    if systems.water_recycling_rate < settings.min_water_recycling {
        log.fail(
            "water_recycling",
            format!(
                "Water recycling {:.2} < {:.2}.",
                systems.water_recycling_rate, settings.min_water_recycling
            ),
        );
    } else {
        log.pass("Water recycling meets specification.".to_string());
    }

    if systems.power.autonomy_days < settings.min_power_autonomy_days {
        log.fail(
            "power_autonomy",
            format!(
                "Power autonomy {} days < {} days target.",
                systems.power.autonomy_days, settings.min_power_autonomy_days
            ),
        );
    } else {
        log.pass("Power autonomy meets lunar night requirement.".to_string());
    }

    if !(systems.dust_mitigation.dual_door && systems.dust_mitigation.suit_storage) {
        log.fail(
            "dust_mitigation",
            "Dust mitigation must include dual-door vestibule and suit storage.".to_string(),
        );
    } else {
        log.pass("Dust mitigation features verified.".to_string());
    }

    // Connectivity and redundant paths
    if graph.is_empty() {
        log.fail(
            "connectivity",
            "No connectivity graph defined across zones.".to_string(),
        );
    } else {
        // Reach count is compared against the declared zone names, so a
        // stub node (declared neighbor with no zone) fails the rule.
        let zone_name_count = layout
            .zones
            .iter()
            .map(|z| z.name)
            .collect::<std::collections::HashSet<ZoneKind>>()
            .len();
        if graph.reach_count() != zone_name_count {
            log.fail(
                "connectivity",
                "Zone adjacency graph is disconnected.".to_string(),
            );
        } else {
            log.pass("Zone adjacency graph is connected.".to_string());
        }

        if !graph.has_cycle() && !log.has_failed("connectivity") {
            log.fail(
                "redundant_paths",
                "Adjacency graph lacks alternate routes; add redundant connections.".to_string(),
            );
        } else if !log.has_failed("connectivity") {
            log.pass("Redundant paths present in adjacency graph.".to_string());
        }
    }

    // Adjacency pairs
    for &(a, b) in &settings.adjacency_pairs {
        if graph.has_edge(a, b) {
            continue;
        }
        log.fail(
            format!("adjacency_{}_{}", a.as_str(), b.as_str()),
            format!("Critical adjacency missing between {} and {}.", a, b),
        );
    }

    // Egress paths
    let egress_count = layout.zones.iter().filter(|z| z.is_egress).count();
    if egress_count < 2 {
        log.fail(
            "egress_paths",
            "At least two egress-capable zones required (e.g., airlock and shelter exit)."
                .to_string(),
        );
    } else {
        log.pass("Multiple egress-capable zones confirmed.".to_string());
    }

    // Storm shelter reachability
    let shelter = layout.zone(ZoneKind::StormShelter);
    if shelter.is_some() && !graph.is_empty() {
        let mut all_reachable = true;
        for zone in &layout.zones {
            let dist = graph.hop_distance(zone.name, ZoneKind::StormShelter);
            let too_far = match dist {
                Some(d) => d > settings.max_storm_shelter_hops,
                None => true,
            };
            if too_far {
                log.fail(
                    "storm_shelter_access",
                    format!(
                        "Storm shelter too far from {} (distance {}).",
                        zone.name,
                        dist.map(|d| d as i64).unwrap_or(-1)
                    ),
                );
                all_reachable = false;
                break;
            }
        }
        if all_reachable {
            log.pass("Storm shelter reachable within required hops.".to_string());
        }
    } else {
        log.fail(
            "storm_shelter_access",
            "Storm shelter zone missing or disconnected.".to_string(),
        );
    }

    // Crew quarters privacy
    match layout.zone(ZoneKind::CrewQuarters) {
        None => {
            // already captured by required zones, keep the message
            log.pass("Crew quarters zone not defined.".to_string());
        }
        Some(quarters) => {
            if quarters.privacy != PrivacyLevel::High
                || quarters.acoustic_isolation < settings.min_privacy_quarters
            {
                log.fail(
                    "crew_privacy",
                    "Crew quarters must have High privacy and acoustic isolation >= 0.7."
                        .to_string(),
                );
            } else {
                log.pass("Crew quarters privacy targets satisfied.".to_string());
            }
        }
    }

    if let Some(shelter) = shelter {
        if shelter.usable_ratio * shelter.volume_m3 <= 0.0 {
            log.pass("Storm shelter volume not contributing to NHV (ok if non-habitable).".to_string());
        }
    }

    ValidationResult {
        passed: log.failed.is_empty(),
        messages: log.messages,
        failed_rules: log.failed,
    }
}
