use std::fmt::Write;

use crate::core::history::{History, ShotRecord};

const SEPARATOR_WIDTH: usize = 50;

pub fn format_shot_summary(shot: &ShotRecord) -> String {
    let mut line = format!(
        "Landed at ({:.2}, {:.2}, {:.2}) m | range {:.2} m | flight {:.2} s | apex {:.2} m",
        shot.landing.x_m,
        shot.landing.y_m,
        shot.landing.z_m,
        shot.range_m(),
        shot.flight_time_s,
        shot.apex_height_m
    );
    if let Some(miss) = shot.miss_distance_m() {
        let side = if miss >= 0.0 { "long" } else { "short" };
        let _ = write!(line, " | {:.2} m {side} of target", miss.abs());
    }
    line
}

/// Console listing of every recorded shot, oldest first.
pub fn format_history_text(history: &History) -> String {
    if history.is_empty() {
        return "No shots recorded.\n".to_string();
    }

    let mut out = String::from("Shot history:\n");
    for shot in history {
        let p = &shot.params;
        let _ = writeln!(
            out,
            "Shot {} ({}):",
            shot.shot_number,
            shot.recorded_at.format("%Y-%m-%d %H:%M:%S")
        );
        let _ = writeln!(out, "  Speed: {} m/s", p.speed_mps);
        let _ = writeln!(out, "  Angle: {} deg", p.angle_deg);
        if let Some(azimuth) = p.azimuth_deg {
            let _ = writeln!(out, "  Azimuth: {azimuth} deg");
        }
        let _ = writeln!(out, "  Model: {}", shot.model.label());
        if let Some(drag) = &p.drag {
            let _ = writeln!(out, "  Drag coefficient: {}", drag.drag_coefficient);
            let _ = writeln!(out, "  Projectile mass: {} kg", drag.mass_kg);
            let _ = writeln!(out, "  Projectile caliber: {} mm", drag.caliber_mm);
        }
        if let Some(target) = p.target_distance_km {
            let _ = writeln!(out, "  Target distance: {target} km");
        }
        let _ = writeln!(
            out,
            "  Landing coordinates: ({:.2}, {:.2}, {:.2})",
            shot.landing.x_m, shot.landing.y_m, shot.landing.z_m
        );
        let _ = writeln!(out, "  Range: {:.2} m", shot.range_m());
        let _ = writeln!(out, "  Flight time: {:.2} s", shot.flight_time_s);
        let _ = writeln!(out, "  Apex height: {:.2} m", shot.apex_height_m);
        if let Some(miss) = shot.miss_distance_m() {
            let _ = writeln!(out, "  Miss distance: {miss:+.2} m");
        }
        let _ = writeln!(out, "{}", "-".repeat(SEPARATOR_WIDTH));
    }
    out
}

pub fn history_to_json(history: &History) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(history)
}

pub fn history_to_csv(history: &History) -> String {
    let mut out = String::from(concat!(
        "shot,recorded_at,model,speed_mps,angle_deg,azimuth_deg,",
        "drag_coefficient,mass_kg,caliber_mm,target_km,",
        "landing_x_m,landing_y_m,landing_z_m,range_m,flight_time_s,apex_m,miss_m\n",
    ));
    for shot in history {
        let p = &shot.params;
        let drag = p.drag.as_ref();
        let miss = shot
            .miss_distance_m()
            .map(|m| format!("{m:.3}"))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "{},{},{},{},{},{},{},{},{},{},{:.3},{:.3},{:.3},{:.3},{:.3},{:.3},{}",
            shot.shot_number,
            shot.recorded_at.to_rfc3339(),
            shot.model.label(),
            p.speed_mps,
            p.angle_deg,
            optional(p.azimuth_deg),
            optional(drag.map(|d| d.drag_coefficient)),
            optional(drag.map(|d| d.mass_kg)),
            optional(drag.map(|d| d.caliber_mm)),
            optional(p.target_distance_km),
            shot.landing.x_m,
            shot.landing.y_m,
            shot.landing.z_m,
            shot.range_m(),
            shot.flight_time_s,
            shot.apex_height_m,
            miss,
        );
    }
    out
}

fn optional(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ballistics::{DragProfile, LaunchParameters};
    use crate::core::integrator::compute;

    fn sample_history() -> History {
        let mut history = History::new();
        let plain = LaunchParameters::new(100.0, 45.0);
        let dragged = LaunchParameters::new(300.0, 30.0)
            .with_drag(DragProfile::new(0.3, 43.0, 152.0))
            .with_target_km(5.0);
        for params in [plain, dragged] {
            let trajectory = compute(&params, 0.01).expect("trajectory");
            history.record(ShotRecord::new(params, &trajectory));
        }
        history
    }

    #[test]
    fn empty_history_says_so() {
        assert_eq!(format_history_text(&History::new()), "No shots recorded.\n");
    }

    #[test]
    fn text_report_lists_every_shot() {
        let text = format_history_text(&sample_history());
        assert!(text.contains("Shot 1"));
        assert!(text.contains("Shot 2"));
        assert!(text.contains("Drag coefficient: 0.3"));
        assert!(text.contains("Target distance: 5 km"));
        assert_eq!(text.matches("Flight time:").count(), 2);
    }

    #[test]
    fn reports_use_recorded_shot_numbers() {
        let mut history = sample_history();
        history.clear();
        let params = LaunchParameters::new(70.0, 35.0);
        let trajectory = compute(&params, 0.01).expect("trajectory");
        history.record(ShotRecord::new(params, &trajectory));

        assert!(format_history_text(&history).contains("Shot 3 ("));
        let csv = history_to_csv(&history);
        assert!(csv.lines().nth(1).is_some_and(|row| row.starts_with("3,")));
    }

    #[test]
    fn csv_has_a_row_per_shot() {
        let csv = history_to_csv(&sample_history());
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        let header_cols = lines[0].split(',').count();
        for row in &lines[1..] {
            assert_eq!(row.split(',').count(), header_cols);
        }
        assert!(lines[1].contains(",ideal,"));
        assert!(lines[2].contains(",drag,"));
    }

    #[test]
    fn json_round_trips_through_serde_value() {
        let json = history_to_json(&sample_history()).expect("json");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        let shots = value["shots"].as_array().expect("shots array");
        assert_eq!(shots.len(), 2);
        assert_eq!(shots[1]["params"]["drag"]["mass_kg"], 43.0);
        assert_eq!(shots[0]["model"], "ideal");
        assert_eq!(shots[1]["model"], "drag");
        assert_eq!(shots[1]["shot_number"], 2);
    }

    #[test]
    fn summary_reports_miss_side() {
        let params = LaunchParameters::new(100.0, 45.0).with_target_km(2.0);
        let trajectory = compute(&params, 0.01).expect("trajectory");
        let summary = format_shot_summary(&ShotRecord::new(params, &trajectory));
        assert!(summary.contains("short of target"), "{summary}");
    }
}
