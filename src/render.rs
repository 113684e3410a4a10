//! Text rendering of the panel for terminal binding layers.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::panel::PanelState;

/// Render the four observables as a block of text.
///
/// Rows are aligned on the widest property name.
pub fn render_panel(state: &PanelState) -> String {
    let status = if state.busy { "  [loading]" } else { "" };
    let mut lines = vec![format!("provider: {}{status}", state.provider)];

    if state.has_error() {
        lines.push(format!("error: {}", state.error_message));
    }

    if state.rows.is_empty() {
        lines.push("  (no properties)".to_owned());
    } else {
        let width = state.rows.iter().map(|r| r.name.chars().count()).max().unwrap_or(0);
        lines.extend(state.rows.iter().map(|row| format!("  {:<width$}  {}", row.name, row.value)));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
