//! Issue-tracker records consumed by the renderers.
//!
//! Field names follow the GitHub REST API so fetched JSON deserializes
//! directly.

use crate::color::parse_hex_color;
use crate::error::{IssuefmtError, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Read;
use std::str::FromStr;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub login: String,
}

impl User {
    pub fn new(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    /// Six hex digits, no leading `#`.
    pub color: String,
}

impl Label {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }

    /// Check the color is six hex digits.
    pub fn validate(&self) -> Result<()> {
        parse_hex_color(&self.color)
            .map(|_| ())
            .ok_or_else(|| IssuefmtError::InvalidColor(self.color.clone()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    #[default]
    Open,
    Closed,
}

impl IssueState {
    pub fn as_str(self) -> &'static str {
        match self {
            IssueState::Open => "open",
            IssueState::Closed => "closed",
        }
    }
}

impl fmt::Display for IssueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssueState {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "open" => Ok(IssueState::Open),
            "closed" => Ok(IssueState::Closed),
            other => Err(format!("unknown issue state '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub assignee: Option<User>,
    pub user: User,
    pub created_at: DateTime<Utc>,
    /// API URL, e.g. `https://api.github.com/repos/owner/name/issues/7`.
    #[serde(default)]
    pub url: String,
    /// Repository name for cross-repository listings.
    #[serde(default)]
    pub repo: Option<String>,
    #[serde(default)]
    pub state: IssueState,
}

fn repo_url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"/repos/[^/]+/([^/]+)").expect("valid repo URL pattern"))
}

impl Issue {
    /// Body text, empty when absent.
    pub fn body(&self) -> &str {
        self.body.as_deref().unwrap_or("")
    }

    /// Repository name: the stored field, else the path segment after
    /// `/repos/<owner>/` in the URL.
    pub fn repo_name(&self) -> Option<&str> {
        if let Some(repo) = self.repo.as_deref() {
            return Some(repo);
        }
        repo_url_pattern()
            .captures(&self.url)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    pub fn is_assigned_to(&self, login: &str) -> bool {
        self.assignee
            .as_ref()
            .is_some_and(|user| !login.is_empty() && user.login == login)
    }

    /// Creation time the way the API prints it, e.g. `2024-03-01T09:30:00Z`.
    pub fn created_at_display(&self) -> String {
        self.created_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

/// Fill in `repo` from each issue's URL where it is missing.
pub fn annotate_repos(issues: &mut [Issue]) {
    for issue in issues.iter_mut() {
        if issue.repo.is_none() {
            issue.repo = issue.repo_name().map(str::to_string);
        }
    }
}

/// Read a JSON array of issues, as returned by the issues API.
pub fn read_issues<R: Read>(reader: R) -> Result<Vec<Issue>> {
    let issues: Vec<Issue> = serde_json::from_reader(reader)?;
    tracing::debug!(count = issues.len(), "parsed issues");
    Ok(issues)
}

/// Assignee restriction for a repository listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssigneeFilter {
    /// `*`: assigned to anyone.
    Any,
    /// `none`: nobody assigned.
    Unassigned,
    Login(String),
}

impl FromStr for AssigneeFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "*" => AssigneeFilter::Any,
            "none" => AssigneeFilter::Unassigned,
            login => AssigneeFilter::Login(login.to_string()),
        })
    }
}

/// Predefined listing for the global (cross-repository) view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IssueFilter {
    Created,
    Mentioned,
    Subscribed,
    #[default]
    Assigned,
}

impl FromStr for IssueFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "created" => Ok(IssueFilter::Created),
            "mentioned" => Ok(IssueFilter::Mentioned),
            "subscribed" => Ok(IssueFilter::Subscribed),
            "assigned" => Ok(IssueFilter::Assigned),
            other => Err(format!("unknown filter '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Ascending => "ascending",
            SortDirection::Descending => "descending",
        }
    }
}

/// Parameters of an issue query, as the header describes them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    /// Target repository; `None` is the global view.
    pub repo: Option<String>,
    pub state: Option<IssueState>,
    pub assignee: Option<AssigneeFilter>,
    pub mentioned: Option<String>,
    pub filter: Option<IssueFilter>,
    /// Comma-joined label names.
    pub labels: Option<String>,
    pub sort: Option<String>,
    pub direction: SortDirection,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::TimeZone;

    pub fn issue(number: u64, title: &str) -> Issue {
        Issue {
            number,
            title: title.to_string(),
            body: None,
            labels: Vec::new(),
            assignee: None,
            user: User::new("octocat"),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
            url: String::new(),
            repo: None,
            state: IssueState::Open,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::issue;
    use super::*;

    #[test]
    fn test_deserialize_api_issue() {
        let json = r#"{
            "number": 42,
            "title": "Crash on start",
            "body": null,
            "labels": [{"name": "bug", "color": "fc2929", "id": 1}],
            "assignee": {"login": "alice"},
            "user": {"login": "bob"},
            "created_at": "2024-03-01T09:30:00Z",
            "url": "https://api.github.com/repos/acme/widgets/issues/42",
            "state": "closed"
        }"#;
        let issue: Issue = serde_json::from_str(json).unwrap();
        assert_eq!(issue.number, 42);
        assert_eq!(issue.body(), "");
        assert_eq!(issue.labels, vec![Label::new("bug", "fc2929")]);
        assert_eq!(issue.state, IssueState::Closed);
        assert_eq!(issue.created_at_display(), "2024-03-01T09:30:00Z");
        assert_eq!(issue.repo_name(), Some("widgets"));
    }

    #[test]
    fn test_read_issues_array() {
        let json = r#"[
            {"number": 1, "title": "a", "user": {"login": "x"}, "created_at": "2024-01-01T00:00:00Z"},
            {"number": 2, "title": "b", "user": {"login": "y"}, "created_at": "2024-01-02T00:00:00Z"}
        ]"#;
        let issues = read_issues(json.as_bytes()).unwrap();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[1].title, "b");
        assert_eq!(issues[0].state, IssueState::Open);
        assert!(issues[0].labels.is_empty());
    }

    #[test]
    fn test_read_issues_rejects_malformed_json() {
        let err = read_issues("[{\"number\": 1}]".as_bytes()).unwrap_err();
        assert!(matches!(err, IssuefmtError::Json(_)));
    }

    #[test]
    fn test_repo_name_prefers_stored_field() {
        let mut i = issue(1, "t");
        i.url = "https://api.github.com/repos/acme/widgets/issues/1".into();
        i.repo = Some("gadgets".into());
        assert_eq!(i.repo_name(), Some("gadgets"));
    }

    #[test]
    fn test_repo_name_absent_without_url() {
        assert_eq!(issue(1, "t").repo_name(), None);
    }

    #[test]
    fn test_annotate_repos_fills_missing_only() {
        let mut a = issue(1, "a");
        a.url = "https://api.github.com/repos/acme/widgets/issues/1".into();
        let mut b = issue(2, "b");
        b.repo = Some("kept".into());
        let mut issues = vec![a, b];
        annotate_repos(&mut issues);
        assert_eq!(issues[0].repo.as_deref(), Some("widgets"));
        assert_eq!(issues[1].repo.as_deref(), Some("kept"));
    }

    #[test]
    fn test_is_assigned_to() {
        let mut i = issue(1, "t");
        assert!(!i.is_assigned_to("alice"));
        i.assignee = Some(User::new("alice"));
        assert!(i.is_assigned_to("alice"));
        assert!(!i.is_assigned_to("bob"));
        assert!(!i.is_assigned_to(""));
    }

    #[test]
    fn test_assignee_filter_parsing() {
        assert_eq!("*".parse::<AssigneeFilter>(), Ok(AssigneeFilter::Any));
        assert_eq!("none".parse::<AssigneeFilter>(), Ok(AssigneeFilter::Unassigned));
        assert_eq!(
            "alice".parse::<AssigneeFilter>(),
            Ok(AssigneeFilter::Login("alice".to_string()))
        );
    }

    #[test]
    fn test_label_validate() {
        assert!(Label::new("bug", "fc2929").validate().is_ok());
        assert!(matches!(
            Label::new("bug", "#fc2929").validate(),
            Err(IssuefmtError::InvalidColor(c)) if c == "#fc2929"
        ));
    }
}
