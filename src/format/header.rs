//! Header line describing an issue query.

use super::issues::format_state;
use crate::color::ColorAnnotator;
use crate::model::{AssigneeFilter, IssueFilter, QueryParams};

/// Build the header for a listing, e.g.
/// `# widgets open issues, assigned to you, labeled bug, ui`.
///
/// Clauses are appended in a fixed order: base, assignee and mention (or
/// the predefined filter in the global view), labels, sort. The whole line
/// takes the color of the queried state.
pub fn format_issues_header(
    params: &QueryParams,
    current_user: &str,
    colors: &ColorAnnotator,
) -> String {
    let state = params.state.unwrap_or_default();
    let mut header = format!(
        "# {} {} issues",
        params.repo.as_deref().unwrap_or("Global,"),
        state
    );

    if params.repo.is_some() {
        if let Some(assignee) = &params.assignee {
            match assignee {
                AssigneeFilter::Any => header.push_str(", assigned"),
                AssigneeFilter::Unassigned => header.push_str(", unassigned"),
                AssigneeFilter::Login(login) => {
                    header.push_str(", assigned to ");
                    header.push_str(self_or(login, current_user));
                }
            }
        }
        if let Some(mentioned) = &params.mentioned {
            header.push_str(", mentioning ");
            header.push_str(self_or(mentioned, current_user));
        }
    } else {
        header.push_str(match params.filter.unwrap_or_default() {
            IssueFilter::Created => " you created",
            IssueFilter::Mentioned => " that mention you",
            IssueFilter::Subscribed => " you're subscribed to",
            IssueFilter::Assigned => " assigned to you",
        });
    }

    if let Some(labels) = &params.labels {
        header.push_str(", labeled ");
        header.push_str(&labels.replace(',', ", "));
    }

    if let Some(sort) = &params.sort {
        header.push_str(&format!(", by {} {}", sort, params.direction.as_str()));
    }

    format_state(state, &header, colors)
}

/// `"you"` when `login` is the current user.
fn self_or<'a>(login: &'a str, current_user: &str) -> &'a str {
    if !current_user.is_empty() && login == current_user {
        "you"
    } else {
        login
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{IssueState, SortDirection};

    fn header(params: &QueryParams) -> String {
        format_issues_header(params, "alice", &ColorAnnotator::disabled())
    }

    fn in_repo(repo: &str) -> QueryParams {
        QueryParams {
            repo: Some(repo.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_global_default_header() {
        assert_eq!(
            header(&QueryParams::default()),
            "# Global, open issues assigned to you"
        );
    }

    #[test]
    fn test_global_predefined_filters() {
        let cases = [
            (IssueFilter::Created, "# Global, open issues you created"),
            (IssueFilter::Mentioned, "# Global, open issues that mention you"),
            (IssueFilter::Subscribed, "# Global, open issues you're subscribed to"),
            (IssueFilter::Assigned, "# Global, open issues assigned to you"),
        ];
        for (filter, expected) in cases {
            let params = QueryParams {
                filter: Some(filter),
                ..Default::default()
            };
            assert_eq!(header(&params), expected);
        }
    }

    #[test]
    fn test_repo_header_without_clauses() {
        assert_eq!(header(&in_repo("x")), "# x open issues");
    }

    #[test]
    fn test_assignee_self_substitution() {
        let params = QueryParams {
            assignee: Some(AssigneeFilter::Login("alice".into())),
            ..in_repo("x")
        };
        let out = header(&params);
        assert!(out.contains(", assigned to you"));
        assert!(!out.contains(", assigned to alice"));
    }

    #[test]
    fn test_assignee_other_user() {
        let params = QueryParams {
            assignee: Some(AssigneeFilter::Login("bob".into())),
            ..in_repo("x")
        };
        assert_eq!(header(&params), "# x open issues, assigned to bob");
    }

    #[test]
    fn test_assignee_wildcard_and_none() {
        let any = QueryParams {
            assignee: Some(AssigneeFilter::Any),
            ..in_repo("x")
        };
        let none = QueryParams {
            assignee: Some(AssigneeFilter::Unassigned),
            ..in_repo("x")
        };
        assert_eq!(header(&any), "# x open issues, assigned");
        assert_eq!(header(&none), "# x open issues, unassigned");
    }

    #[test]
    fn test_mention_clause_follows_assignee() {
        let params = QueryParams {
            assignee: Some(AssigneeFilter::Any),
            mentioned: Some("alice".into()),
            ..in_repo("x")
        };
        assert_eq!(header(&params), "# x open issues, assigned, mentioning you");
    }

    #[test]
    fn test_global_ignores_assignee_and_mention() {
        let params = QueryParams {
            assignee: Some(AssigneeFilter::Any),
            mentioned: Some("bob".into()),
            ..Default::default()
        };
        assert_eq!(header(&params), "# Global, open issues assigned to you");
    }

    #[test]
    fn test_full_clause_order() {
        let params = QueryParams {
            state: Some(IssueState::Closed),
            assignee: Some(AssigneeFilter::Login("bob".into())),
            mentioned: Some("carol".into()),
            labels: Some("bug,ui".into()),
            sort: Some("updated".into()),
            direction: SortDirection::Ascending,
            ..in_repo("widgets")
        };
        assert_eq!(
            header(&params),
            "# widgets closed issues, assigned to bob, mentioning carol, labeled bug, ui, by updated ascending"
        );
    }

    #[test]
    fn test_sort_defaults_to_descending() {
        let params = QueryParams {
            sort: Some("created".into()),
            ..Default::default()
        };
        assert_eq!(
            header(&params),
            "# Global, open issues assigned to you, by created descending"
        );
    }

    #[test]
    fn test_header_colored_by_state() {
        let colors = ColorAnnotator::enabled();
        let open = format_issues_header(&QueryParams::default(), "alice", &colors);
        let closed = format_issues_header(
            &QueryParams {
                state: Some(IssueState::Closed),
                ..Default::default()
            },
            "alice",
            &colors,
        );
        assert!(open.starts_with("\x1b[32m# Global, open"));
        assert!(closed.starts_with("\x1b[31m# Global, closed"));
    }
}
