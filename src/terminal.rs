//! Terminal dimension queries.
//!
//! Width is read from the controlling terminal when there is one. Anything
//! that cannot report a size (pipes, CI logs, a detached process) gets a
//! fixed fallback so callers always have a usable column count.

use terminal_size::{terminal_size, Width};

/// Width assumed when the terminal cannot report its dimensions.
pub const DEFAULT_COLUMNS: usize = 80;

/// Source of the current terminal width.
pub trait TerminalMetrics {
    /// Number of character columns available. Always positive.
    fn columns(&self) -> usize;
}

/// Reads the live terminal, falling back to `fallback` when unavailable.
#[derive(Debug, Clone, Copy)]
pub struct LiveTerminal {
    fallback: usize,
}

impl LiveTerminal {
    pub fn new() -> Self {
        Self::with_fallback(DEFAULT_COLUMNS)
    }

    /// A zero fallback is replaced by [`DEFAULT_COLUMNS`].
    pub fn with_fallback(fallback: usize) -> Self {
        let fallback = if fallback == 0 {
            DEFAULT_COLUMNS
        } else {
            fallback
        };
        Self { fallback }
    }
}

impl Default for LiveTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalMetrics for LiveTerminal {
    fn columns(&self) -> usize {
        match terminal_size() {
            Some((Width(w), _)) if w > 0 => w as usize,
            _ => {
                tracing::debug!(fallback = self.fallback, "terminal size unavailable");
                self.fallback
            }
        }
    }
}

/// A fixed width, for tests and for rendering to non-terminal sinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedWidth(pub usize);

impl TerminalMetrics for FixedWidth {
    fn columns(&self) -> usize {
        self.0.max(1)
    }
}

/// Current terminal width with the default fallback.
pub fn columns() -> usize {
    LiveTerminal::new().columns()
}
