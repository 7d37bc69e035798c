//! Single-issue detail view.

use super::issues::format_labels;
use super::wrap::indent;
use super::RenderContext;
use crate::model::Issue;

/// Indentation of the body under the heading.
const BODY_INDENT: usize = 4;

/// Render one issue: heading, author line, assignee and labels, then the
/// body (when there is one) after a blank line.
pub fn format_issue(issue: &Issue, ctx: &RenderContext<'_>) -> String {
    let colors = &ctx.colors;
    let heading = indent(&format!("#{}: {}", issue.number, issue.title), 0, ctx.columns);

    let mut lines = vec![
        colors.bright(&heading),
        format!(
            "@{} opened this issue {}.",
            issue.user.login,
            issue.created_at_display()
        ),
    ];

    let mut meta = String::new();
    if let Some(assignee) = &issue.assignee {
        meta.push_str(&format!("@{} is assigned. ", assignee.login));
    }
    if let Some(labels) = format_labels(&issue.labels, colors) {
        meta.push_str(&labels);
    }
    lines.push(meta.trim_end().to_string());

    let body = issue.body();
    if !body.is_empty() {
        lines.push(String::new());
        lines.push(indent(body, BODY_INDENT, ctx.columns));
    }

    lines.join("\n")
}
