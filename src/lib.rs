pub mod color;
pub mod config;
pub mod error;
pub mod format;
pub mod model;
pub mod output;
pub mod signal;
pub mod terminal;
pub mod throbber;

pub use color::{ColorAnnotator, ColorMode};
pub use error::{IssuefmtError, Result};
pub use format::RenderContext;
pub use model::{Issue, Label, QueryParams, User};
pub use terminal::{LiveTerminal, TerminalMetrics};
pub use throbber::Throbber;
