//! Debug tracing infrastructure for development diagnostics
//!
//! Provides structured logging with scoped filtering for debugging selection
//! and state transition issues.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=selection=debug,message=debug` - scoped filtering
//! - `RUST_LOG=token_selection::update=trace` - module-level filtering
//!
//! # Log Files
//!
//! When a log directory is given, logs are also written to
//! `<dir>/token-select.log` with daily rotation. File logging uses debug level
//! by default for more verbose troubleshooting.

use std::path::Path;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::editable::TextSelection;

/// Initialize tracing subscriber with console and optional file logging
///
/// Console output respects RUST_LOG and goes to stderr so it never mixes with
/// command output.
pub fn init(log_dir: Option<&Path>) {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Console layer - respects RUST_LOG
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match log_dir.map(|dir| std::fs::create_dir_all(dir).map(|_| dir)) {
        Some(Ok(dir)) => {
            let file_appender = tracing_appender::rolling::daily(dir, "token-select.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Some(Err(e)) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
        None => None,
    };

    if let Err(e) = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
    {
        eprintln!("Warning: tracing already initialized: {}", e);
    }
}

/// Lightweight snapshot of the selection set for diffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSnapshot {
    pub selection_count: usize,
    pub selections: Vec<SelectionInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionInfo {
    pub anchor: usize,
    pub head: usize,
    pub ranges: usize,
    pub selection_empty: bool,
}

impl SelectionSnapshot {
    pub fn from_selections(selections: &[TextSelection]) -> Self {
        Self {
            selection_count: selections.len(),
            selections: selections
                .iter()
                .map(|s| SelectionInfo {
                    anchor: s.anchor(),
                    head: s.head(),
                    ranges: s.ranges.len(),
                    selection_empty: s.is_empty(),
                })
                .collect(),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &SelectionSnapshot) -> Option<String> {
        if self.selection_count != other.selection_count {
            return Some(format!(
                "selection count: {} → {}",
                self.selection_count, other.selection_count
            ));
        }

        let mut changes = Vec::new();
        for (i, (before, after)) in self.selections.iter().zip(&other.selections).enumerate() {
            if before.anchor != after.anchor || before.head != after.head {
                changes.push(format!(
                    "#{}: {}..{} → {}..{}",
                    i, before.anchor, before.head, after.anchor, after.head
                ));
            }
            if before.ranges != after.ranges {
                changes.push(format!("#{}: ranges {} → {}", i, before.ranges, after.ranges));
            }
            if before.selection_empty != after.selection_empty {
                let status = if after.selection_empty {
                    "cleared"
                } else {
                    "active"
                };
                changes.push(format!("#{}: selection {}", i, status));
            }
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_diff() {
        let before = SelectionSnapshot::from_selections(&[TextSelection::caret(2)]);
        let after = SelectionSnapshot::from_selections(&[TextSelection::from_anchor_head(2, 5)]);
        assert_eq!(
            before.diff(&after),
            Some("#0: 2..2 → 2..5; #0: selection active".to_string())
        );
        assert_eq!(before.diff(&before), None);
    }

    #[test]
    fn test_snapshot_count_change() {
        let one = SelectionSnapshot::from_selections(&[TextSelection::caret(0)]);
        let two =
            SelectionSnapshot::from_selections(&[TextSelection::caret(0), TextSelection::caret(4)]);
        assert_eq!(one.diff(&two), Some("selection count: 1 → 2".to_string()));
    }
}
