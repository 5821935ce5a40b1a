//! Human-readable export rendering: markdown summary and metrics CSV.

use lunahab_logic::models::{Layout, Metrics};

/// Render a markdown summary of a layout, its metrics and the validation
/// checklist.
pub fn export_markdown(layout: &Layout, metrics: &Metrics, validation_msgs: &[String]) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push(format!("# {} Summary", layout.habitat_name));
    lines.push(String::new());
    lines.push(format!("- Crew: {}", layout.metadata.crew));
    lines.push(format!("- Duration: {} days", layout.metadata.duration_days));
    lines.push(format!("- Habitat Type: {:?}", layout.habitat_type));
    lines.push(format!("- ISRU Ratio: {:.2}", layout.isru_ratio));
    lines.push(format!(
        "- Power Autonomy: {} days",
        layout.systems.power.autonomy_days
    ));
    lines.push(String::new());
    lines.push("## Zones".to_string());
    lines.push("| Zone | Volume (m³) | Usable | Privacy | Connections | Equipment |".to_string());
    lines.push("| --- | --- | --- | --- | --- | --- |".to_string());
    for zone in &layout.zones {
        let connections: Vec<&str> = zone.connections.iter().map(|k| k.as_str()).collect();
        lines.push(format!(
            "| {} | {:.1} | {:.2} | {:?} | {} | {} |",
            zone.name,
            zone.volume_m3,
            zone.usable_ratio,
            zone.privacy,
            connections.join(", "),
            zone.equipment.join(", ")
        ));
    }
    lines.push(String::new());
    lines.push("## Systems".to_string());
    lines.push(format!(
        "- ECLSS loops: {}\n- Water recycling: {:.2}\n- Power autonomy days: {}\n- Shielding: {:.1} g/cm²\n",
        layout.systems.eclss_redundancy_loops,
        layout.systems.water_recycling_rate,
        layout.systems.power.autonomy_days,
        layout.shield_equivalent_g_cm2
    ));
    lines.push("## Metrics".to_string());
    lines.push(format!(
        "- NHV: {:.1} m³\n- NHV Efficiency: {:.2}\n- Privacy Score: {:.2}\n- Transit Score: {:.2}\n- Sustainability Score: {:.2}\n- Energy Use (kWh/person-day): {:.2}\n- Safety Score: {:.2}\n",
        metrics.nhv_m3,
        metrics.nhv_efficiency,
        metrics.privacy_score,
        metrics.transit_distance_score,
        metrics.sustainability_score,
        metrics.energy_use_kwh_per_person_day,
        metrics.safety_redundancy_score
    ));
    lines.push("## Validation".to_string());
    for msg in validation_msgs {
        let lower = msg.to_lowercase();
        let prefix = if lower.starts_with("crew") || lower.contains("meets") {
            "✅"
        } else {
            "⚠️"
        };
        lines.push(format!("- {prefix} {msg}"));
    }
    lines.join("\n")
}

/// Render metrics as a two-column CSV.
pub fn metrics_csv(metrics: &Metrics) -> String {
    let mut out = String::from("Metric,Value\r\n");
    let rows: [(&str, String); 8] = [
        ("nhv_m3", metrics.nhv_m3.to_string()),
        ("nhv_efficiency", metrics.nhv_efficiency.to_string()),
        (
            "transit_distance_score",
            metrics.transit_distance_score.to_string(),
        ),
        ("privacy_score", metrics.privacy_score.to_string()),
        (
            "sustainability_score",
            metrics.sustainability_score.to_string(),
        ),
        (
            "energy_use_kwh_per_person_day",
            metrics.energy_use_kwh_per_person_day.to_string(),
        ),
        (
            "safety_redundancy_score",
            metrics.safety_redundancy_score.to_string(),
        ),
        ("feasibility", metrics.feasibility.to_string()),
    ];
    for (name, value) in rows {
        out.push_str(name);
        out.push(',');
        out.push_str(&value);
        out.push_str("\r\n");
    }
    out
}
