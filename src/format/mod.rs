//! Rendering of issue data as terminal text.
//!
//! - [`wrap`] - Width-aware truncation and indentation
//! - [`issues`] - Aligned issue-list lines, labels and state colors
//! - [`header`] - Descriptive header for an issue query
//! - [`detail`] - Single-issue detail view
//!
//! Everything here is pure: renderers take their inputs and a
//! [`RenderContext`] and return strings.

pub mod detail;
pub mod header;
pub mod issues;
pub mod wrap;

use crate::color::ColorAnnotator;

pub use detail::format_issue;
pub use header::format_issues_header;
pub use issues::{format_issues, format_labels, format_state};
pub use wrap::{indent, truncate, ELLIPSIS};

/// What a renderer needs to know about the output it is producing for.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub colors: ColorAnnotator,
    /// Terminal width in columns.
    pub columns: usize,
    /// Login of the authenticated user, for "you" substitution and the
    /// assigned-to-you marker. Empty when unknown.
    pub current_user: &'a str,
}

impl<'a> RenderContext<'a> {
    pub fn new(colors: ColorAnnotator, columns: usize, current_user: &'a str) -> Self {
        Self {
            colors,
            columns,
            current_user,
        }
    }
}
