//! Formatting utilities for sizes, durations, plans and asset decisions.

use owo_colors::OwoColorize;
use std::time::Duration;

use twinpack_resolver::{AssetDecision, Classification, CssExport, Fallback, OutputPlan};

use crate::ui::colors_enabled;

/// Format file size in human-readable format.
///
/// # Examples
///
/// ```
/// use twinpack_cli::ui::format_size;
///
/// assert_eq!(format_size(0), "0 B");
/// assert_eq!(format_size(500), "500 B");
/// assert_eq!(format_size(1024), "1.00 KB");
/// assert_eq!(format_size(1_048_576), "1.00 MB");
/// ```
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    if unit_idx == 0 {
        format!("{} {}", size as u64, UNITS[unit_idx])
    } else {
        format!("{:.2} {}", size, UNITS[unit_idx])
    }
}

/// Format duration in human-readable format.
///
/// ```
/// use std::time::Duration;
/// use twinpack_cli::ui::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{}ms", total_ms)
    } else {
        format!("{:.2}s", duration.as_secs_f64())
    }
}

fn label(text: &str) -> String {
    if colors_enabled() {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}

fn dim(text: &str) -> String {
    if colors_enabled() {
        text.dimmed().to_string()
    } else {
        text.to_string()
    }
}

/// Lines of the plan summary
pub(crate) fn plan_lines(plan: &OutputPlan) -> Vec<String> {
    let mut lines = vec![
        format!("{} {}", label("Backend:"), plan.backend),
        format!("{} {}", label("Output:"), plan.output_dir.display()),
        format!("{} {}", label("Mode:"), plan.mode),
    ];

    for entry in &plan.entries {
        lines.push(format!(
            "  ▸ {} {} {}",
            entry.name,
            entry.filename,
            dim(&format!("(public path {})", entry.public_path))
        ));
    }

    lines.push(format!("  ▸ css {}", plan.stylesheet));
    lines.push(format!("  ▸ css async {}", plan.async_stylesheet));
    lines.push(format!("  ▸ svg {}", plan.svg));
    lines.push(format!("  ▸ asset {}", plan.asset));
    lines
}

/// Print the output plan to stderr.
pub fn print_plan_summary(plan: &OutputPlan) {
    for line in plan_lines(plan) {
        eprintln!("{}", line);
    }
}

/// Lines describing one asset decision
pub(crate) fn decision_lines(
    decision: &AssetDecision,
    preview: Option<&str>,
    exports: &[CssExport],
) -> Vec<String> {
    let mut lines = vec![format!(
        "{} {} {}",
        label("Asset:"),
        decision.specifier,
        dim(&format!("({})", format_size(decision.size)))
    )];

    match &decision.classification {
        Classification::Matched(hit) => {
            lines.push(format!("{} {}", label("Rule:"), hit.rule));
            lines.push(format!("{} {}", label("Class:"), hit.class));
        }
        Classification::Unmatched(Fallback::Module) => {
            lines.push(format!("{} none (module pipeline)", label("Rule:")));
        }
        Classification::Unmatched(Fallback::EmitFile { .. }) => {
            lines.push(format!("{} none (generic asset)", label("Rule:")));
            lines.push(format!("{} emit-file", label("Class:")));
        }
    }

    if let Some(directive) = &decision.directive {
        lines.push(format!("{} {}", label("Type:"), directive.module_type()));
    }
    if let Some(kind) = decision.css_module {
        lines.push(format!("{} {:?}", label("CSS:"), kind));
    }
    if let Some(filename) = &decision.filename {
        lines.push(format!("{} {}", label("Emits:"), filename));
    }
    if let Some(preview) = preview {
        lines.push(format!("{} {}", label("Preview:"), preview));
    }
    if !exports.is_empty() {
        lines.push(label("Exports:"));
        for export in exports {
            lines.push(format!(
                "  ▸ {} {}",
                export.local,
                dim(&format!("→ {}", export.names.join(", ")))
            ));
        }
    }
    lines
}

/// Print an asset decision to stdout.
pub fn print_decision(decision: &AssetDecision, preview: Option<&str>, exports: &[CssExport]) {
    for line in decision_lines(decision, preview, exports) {
        println!("{}", line);
    }
}
