//! Summary and table report generators for shell output.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::{DiffNode, Relation};
use crate::model::Value;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Widest path column before truncation.
const MAX_PATH_WIDTH: usize = 60;
/// Widest value column before truncation.
const MAX_VALUE_WIDTH: usize = 30;

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "magenta" => format!("\x1b[35m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

const fn relation_color(relation: Relation) -> &'static str {
    match relation {
        Relation::Add => "green",
        Relation::Delete => "red",
        Relation::Replace => "yellow",
        Relation::Mismatch => "magenta",
        Relation::Equal => "dim",
    }
}

/// Summary reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate(
        &self,
        result: Option<&DiffNode>,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();

        lines.push(self.color(
            config.title.as_deref().unwrap_or("JSON Diff Summary"),
            "bold",
        ));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));

        if let (Some(old), Some(new)) = (&config.metadata.old_path, &config.metadata.new_path) {
            lines.push(format!("{}  {} → {}", self.color("Files:", "cyan"), old, new));
        }

        let Some(summary) = config.summary_for(result) else {
            lines.push(format!("  {}", self.color("No differences reported", "dim")));
            return Ok(lines.join("\n"));
        };

        lines.push(format!(
            "{}  {} nodes, depth {}",
            self.color("Size:", "cyan"),
            summary.total_nodes,
            summary.max_depth
        ));
        lines.push(String::new());
        lines.push(self.color("Changes:", "bold"));

        for (relation, label) in [
            (Relation::Add, "added"),
            (Relation::Delete, "deleted"),
            (Relation::Replace, "replaced"),
            (Relation::Mismatch, "type mismatches"),
        ] {
            let count = summary.count(relation);
            if count > 0 {
                lines.push(format!(
                    "  {} {}",
                    self.color(&format!("{}{count}", relation.marker()), relation_color(relation)),
                    label
                ));
            }
        }

        if summary.has_changes() {
            lines.push(format!(
                "  {} changed {}",
                summary.leaf_changes,
                if summary.leaf_changes == 1 {
                    "leaf"
                } else {
                    "leaves"
                }
            ));
        } else {
            lines.push(format!("  {}", self.color("No differences", "dim")));
        }

        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}

/// Table reporter for terminal output with aligned columns
pub struct TableReporter {
    /// Use colored output
    colored: bool,
}

impl TableReporter {
    /// Create a new table reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }
}

impl Default for TableReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for TableReporter {
    fn generate(
        &self,
        result: Option<&DiffNode>,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let changes = result.map(DiffNode::leaf_changes).unwrap_or_default();

        let path_width = changes
            .iter()
            .map(|node| display_path(&node.path).width())
            .max()
            .unwrap_or(0)
            .clamp("PATH".len(), MAX_PATH_WIDTH);

        let mut lines = Vec::new();
        lines.push(format!(
            "{}  {}  {}  {}",
            self.color(&pad("STATUS", 10), "bold"),
            self.color(&pad("PATH", path_width), "bold"),
            self.color(&pad("OLD", MAX_VALUE_WIDTH), "bold"),
            self.color("NEW", "bold")
        ));
        lines.push("─".repeat(10 + path_width + MAX_VALUE_WIDTH * 2 + 6));

        let limit = config.max_items.unwrap_or(usize::MAX);
        for node in changes.iter().take(limit) {
            let status = format!("{} {}", node.relation.marker(), node.relation);
            lines.push(format!(
                "{}  {}  {}  {}",
                self.color(&pad(&status, 10), relation_color(node.relation)),
                pad(&truncate(display_path(&node.path), path_width), path_width),
                pad(&value_cell(node.old.as_ref()), MAX_VALUE_WIDTH),
                value_cell(node.new.as_ref())
            ));
        }
        if changes.len() > limit {
            lines.push(self.color(
                &format!("... and {} more changes", changes.len() - limit),
                "dim",
            ));
        }

        lines.push(String::new());
        lines.push(format!(
            "Total: {} changed {}",
            changes.len(),
            if changes.len() == 1 { "leaf" } else { "leaves" }
        ));

        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Table
    }
}

/// The root path is empty; show it as `$`.
fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "$"
    } else {
        path
    }
}

fn value_cell(value: Option<&Value>) -> String {
    value.map_or_else(
        || "-".to_string(),
        |v| truncate(&v.to_string(), MAX_VALUE_WIDTH),
    )
}

/// Right-pad to a display width.
fn pad(s: &str, width: usize) -> String {
    let current = s.width();
    if current >= width {
        s.to_string()
    } else {
        format!("{s}{}", " ".repeat(width - current))
    }
}

/// Truncate to at most `max_width` display columns, marking the cut with `...`.
fn truncate(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let budget = max_width.saturating_sub(3);
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    if max_width > 3 {
        out.push_str("...");
    }
    out
}
