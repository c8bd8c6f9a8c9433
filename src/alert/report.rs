//! Finding Report Formatter
//!
//! Pure rendering of a resolved alert into the markdown document posted to
//! the collector. Section order and conditional omission are wire-compatible
//! with downstream consumers; do not reorder.

use serde::Serialize;

use crate::alert::types::ResolvedAlert;

/// Finding document posted to the collector's findings endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub target: String,
    pub title: String,
    pub markdown: String,
}

/// Render one resolved alert. Blank source fields omit their section.
pub fn render(alert: &ResolvedAlert) -> Finding {
    let title = format!("{} at {}", alert.name, alert.uri);

    let mut md = String::new();
    md.push_str(&format!("# {}\n\n", title));
    md.push_str(&format!(
        "**Summary**\n{}\nRisk: {}\nConfidence: {}\n",
        alert.description,
        alert.risk.label(),
        alert.confidence.label()
    ));
    if !is_blank(&alert.other_info) {
        md.push_str(&alert.other_info);
        md.push('\n');
    }
    md.push_str(&format!(
        "\n**Discovery Method**\nDiscovered by scan plugin (Plugin ID: {})\n",
        alert.plugin_id
    ));
    if !is_blank(&alert.evidence) {
        md.push_str(&format!("Evidence: `{}`\n", alert.evidence));
    }
    let method = if is_blank(&alert.method) {
        "GET"
    } else {
        alert.method.as_str()
    };
    md.push_str(&format!(
        "\n**Reproduction Steps**\nAccess the following URL: `{} {}`\n",
        method, alert.uri
    ));
    if !is_blank(&alert.param) {
        md.push_str(&format!("Parameter: `{}`\n", alert.param));
    }
    if !is_blank(&alert.post_data) {
        md.push_str(&format!("Data: `{}`\n", alert.post_data));
    }
    if !is_blank(&alert.input_vector) {
        md.push_str(&format!("Input vector: `{}`\n", alert.input_vector));
    }
    if !is_blank(&alert.attack) {
        md.push_str(&format!("Attack: `{}`\n", alert.attack));
    }
    if !is_blank(&alert.solution) {
        md.push_str(&format!("\n**Solution**\n{}\n", alert.solution));
    }
    if alert.cwe_id > 0 || alert.wasc_id > 0 || !is_blank(&alert.reference) {
        md.push_str("\n**References**\n");
        if alert.cwe_id > 0 {
            md.push_str(&format!("- CWE-{}\n", alert.cwe_id));
        }
        if alert.wasc_id > 0 {
            md.push_str(&format!("- WASC-{}\n", alert.wasc_id));
        }
        if !is_blank(&alert.reference) {
            md.push_str("- ");
            md.push_str(&alert.reference.replace('\n', "\n- "));
        }
    }

    Finding {
        target: alert.uri.clone(),
        title,
        markdown: md,
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

// ============================================================================
// TESTS
// ============================================================================
