//! Placement output formatting and serialization
//!
//! Turns a layout outcome into renderer-facing labels and reports:
//! human-readable distance and accuracy strings, category styling, and
//! text or JSON summaries of a whole pass.

use serde::Serialize;

use crate::algorithms::layout::{LayoutMode, LayoutOutcome};
use crate::core::{Target, KILOMETER_LABEL_THRESHOLD_M, STANDARD_GPS_ACCURACY_M};

/// Ground distance as "Xm" below a kilometer, "X.Xkm" from there on
pub fn format_ground_distance(distance_m: f64) -> String {
    if distance_m < KILOMETER_LABEL_THRESHOLD_M {
        format!("{:.0}m", distance_m)
    } else {
        format!("{:.1}km", distance_m / 1000.0)
    }
}

/// Accuracy badge for a target's effective position
///
/// Uncorrected targets show the accuracy reported with the record when
/// there is one, else the consumer GPS default.
pub fn accuracy_label(target: &Target) -> String {
    match &target.corrected {
        Some(corrected) if corrected.correction_applied => {
            format!("RTK ±{:.2}m", corrected.accuracy_m)
        }
        corrected => {
            let accuracy = target
                .reported_accuracy_m
                .or(corrected.as_ref().map(|c| c.accuracy_m))
                .unwrap_or(STANDARD_GPS_ACCURACY_M);
            format!("GPS ±{:.0}m", accuracy)
        }
    }
}

/// Renderer styling for an agent category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryStyle {
    pub color_hex: &'static str,
    pub glyph: &'static str,
}

impl CategoryStyle {
    pub fn for_category(category: &str) -> Self {
        match category {
            "video-assistant" => Self { color_hex: "#4f46e5", glyph: "cube" },
            "video-tutor" => Self { color_hex: "#7c3aed", glyph: "sphere" },
            "video-guide" => Self { color_hex: "#ec4899", glyph: "cone" },
            _ => Self { color_hex: "#6b7280", glyph: "box" },
        }
    }
}

/// One line of a placement report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacementEntry {
    pub target_id: String,
    pub label: String,
    pub position: [f64; 3],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<String>,
    pub accuracy: String,
    pub within_range: Option<bool>,
    pub style: CategoryStyle,
}

/// Renderer-facing summary of one layout pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacementReport {
    pub mode: LayoutMode,
    pub entries: Vec<PlacementEntry>,
    pub warnings: Vec<String>,
}

impl PlacementReport {
    /// Join an outcome with the targets it was computed from
    pub fn build(outcome: &LayoutOutcome, targets: &[Target]) -> Self {
        let entries = outcome
            .placements
            .iter()
            .filter_map(|placement| {
                let target = targets.iter().find(|t| t.id == placement.target_id)?;
                Some(PlacementEntry {
                    target_id: placement.target_id.clone(),
                    label: target.label.clone(),
                    position: [placement.offset.x, placement.offset.y, placement.offset.z],
                    distance: placement.ground_distance_m.map(format_ground_distance),
                    accuracy: accuracy_label(target),
                    within_range: placement.within_range,
                    style: CategoryStyle::for_category(&target.category),
                })
            })
            .collect();

        Self {
            mode: outcome.mode,
            entries,
            warnings: outcome.warnings.iter().map(|w| w.to_string()).collect(),
        }
    }
}

/// Human-readable report formatter
#[derive(Debug, Clone, Default)]
pub struct TextFormatter {
    /// One line per target instead of a block
    pub compact: bool,
}

impl TextFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compact() -> Self {
        Self { compact: true }
    }

    pub fn format_text(&self, report: &PlacementReport) -> String {
        let mut output = String::new();

        let mode = match report.mode {
            LayoutMode::Live => "live",
            LayoutMode::Demo => "demo",
        };
        output.push_str(&format!("Layout ({}): {} placed, {} skipped\n", mode, report.entries.len(), report.warnings.len()));

        for entry in &report.entries {
            let [x, y, z] = entry.position;
            let distance = entry.distance.as_deref().unwrap_or("n/a");

            if self.compact {
                output.push_str(&format!(
                    "{} | ({:.2}, {:.2}, {:.2}) | {} | {}\n",
                    entry.label, x, y, z, distance, entry.accuracy
                ));
            } else {
                output.push_str(&format!("{} [{}]\n", entry.label, entry.target_id));
                output.push_str(&format!("  Scene:    x {:.2}, y {:.2}, z {:.2}\n", x, y, z));
                output.push_str(&format!("  Distance: {}\n", distance));
                output.push_str(&format!("  Accuracy: {}\n", entry.accuracy));
                if let Some(in_range) = entry.within_range {
                    output.push_str(&format!("  In range: {}\n", if in_range { "yes" } else { "no" }));
                }
            }
        }

        if !report.warnings.is_empty() {
            output.push_str("Warnings:\n");
            for warning in &report.warnings {
                output.push_str(&format!("  - {}\n", warning));
            }
        }

        output
    }
}

/// JSON formatter for structured output
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    /// Pretty print JSON
    pub pretty: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    pub fn format_json(&self, report: &PlacementReport) -> Result<String, serde_json::Error> {
        if self.pretty {
            serde_json::to_string_pretty(report)
        } else {
            serde_json::to_string(report)
        }
    }
}
