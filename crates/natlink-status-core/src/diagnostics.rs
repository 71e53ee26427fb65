//! Per-instance warning collection.

use tracing::warn;

/// Ordered list of human-readable warnings, deduplicated by message text.
///
/// A message is logged through `tracing` the first time it is recorded and
/// silently ignored afterwards.
#[derive(Debug, Clone, Default)]
pub struct Warnings {
    messages: Vec<String>,
}

impl Warnings {
    pub const fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    /// Record a warning. Returns `false` if the same text was already present.
    pub fn push(&mut self, message: impl Into<String>) -> bool {
        let message = message.into();
        if self.messages.contains(&message) {
            return false;
        }
        warn!("{message}");
        self.messages.push(message);
        true
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub const fn len(&self) -> usize {
        self.messages.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Printable block with all warnings, empty when there are none.
    pub fn text(&self) -> String {
        if self.messages.is_empty() {
            return String::new();
        }
        format!(
            "natlink-status reported the following warnings:\n\n{}",
            self.messages.join("\n\n")
        )
    }
}
