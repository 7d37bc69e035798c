//! Issue-list rendering.
//!
//! Each issue becomes one line: right-aligned repository and number columns,
//! the title cut to whatever width is left, then labels and an
//! assigned-to-you marker. Only the title is ever shortened.

use super::wrap::truncate;
use super::RenderContext;
use crate::color::{Color, ColorAnnotator};
use crate::model::{Issue, IssueState, Label};

/// Spacing and punctuation around the title that is not otherwise measured.
const LINE_OVERHEAD: usize = 8;
/// Room for the marker glyph and its separating space.
const MARKER_WIDTH: usize = 2;
const ASSIGNED_MARKER: &str = "@";

/// Render `issues` as one line each, in input order.
///
/// With `include_repo`, a repository column is derived from each issue's URL
/// when the issue does not carry one. The input is not modified.
pub fn format_issues(issues: &[Issue], include_repo: bool, ctx: &RenderContext<'_>) -> Vec<String> {
    let repos: Vec<&str> = issues
        .iter()
        .map(|issue| {
            let repo = if include_repo {
                issue.repo_name()
            } else {
                issue.repo.as_deref()
            };
            repo.unwrap_or("")
        })
        .collect();

    let nmax = issues
        .iter()
        .map(|issue| issue.number.to_string().len())
        .max()
        .unwrap_or(0);
    let rmax = repos
        .iter()
        .map(|repo| repo.chars().count())
        .max()
        .unwrap_or(0);

    issues
        .iter()
        .zip(repos)
        .map(|(issue, repo)| format_issue_line(issue, repo, nmax, rmax, ctx))
        .collect()
}

fn format_issue_line(
    issue: &Issue,
    repo: &str,
    nmax: usize,
    rmax: usize,
    ctx: &RenderContext<'_>,
) -> String {
    let colors = &ctx.colors;
    let labels = format_labels(&issue.labels, colors);
    let label_width = colors
        .no_color(|plain| format_labels(&issue.labels, plain))
        .map(|text| text.chars().count())
        .unwrap_or(0);
    let assigned = issue.is_assigned_to(ctx.current_user);

    let mut reserved = LINE_OVERHEAD + nmax + rmax + label_width;
    if assigned {
        reserved += MARKER_WIDTH;
    }

    let number = colors.bright(&format!("{:>width$}", issue.number, width = nmax));
    let prefix = format!("{:>width$} {}:", repo, number, width = rmax);
    let title = truncate(&issue.title, reserved, ctx.columns);
    let marker = assigned.then(|| colors.bright(&colors.fg(Color::Yellow, ASSIGNED_MARKER)));

    [Some(prefix), Some(title), labels, marker]
        .into_iter()
        .flatten()
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render labels on their own colors, or bracketed when color is off.
/// `None` when there are no labels.
pub fn format_labels(labels: &[Label], colors: &ColorAnnotator) -> Option<String> {
    if labels.is_empty() {
        return None;
    }
    let rendered: Vec<String> = labels
        .iter()
        .map(|label| {
            let text = if colors.is_enabled() {
                format!(" {} ", label.name)
            } else {
                format!("[{}]", label.name)
            };
            colors.bg(&label.color, &text)
        })
        .collect();
    Some(rendered.join(" "))
}

/// Color `text` by issue state: red for closed, green otherwise.
pub fn format_state(state: IssueState, text: &str, colors: &ColorAnnotator) -> String {
    let color = match state {
        IssueState::Closed => Color::Red,
        IssueState::Open => Color::Green,
    };
    colors.fg(color, text)
}
