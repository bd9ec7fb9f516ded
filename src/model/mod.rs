//! Core data types for `tracking`.
//!
//! - `Issue` - The tracked work item, as stored
//! - `IssueForm` - The browser-posted shape of an issue, every field optional
//! - `matches_search` / `filter_issues` - The list page's free-text filter

use serde::{Deserialize, Serialize};

/// Form field carrying the anti-forgery token.
pub const TOKEN_FIELD: &str = "__RequestVerificationToken";

/// A tracked issue.
///
/// `id` is assigned by the store on insert; `0` means "not yet persisted".
/// The five text fields are unconstrained free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub id: i64,
    pub title: String,
    pub description: String,
    /// e.g. "Open", "In Progress", "Closed". Not an enumeration.
    pub status: String,
    /// Assigned user or team.
    pub assignment: String,
    /// e.g. "High", "Medium", "Low". Not an enumeration.
    pub priority: String,
}

impl Issue {
    /// Build an unsaved issue (identity left for the store to assign).
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        status: impl Into<String>,
        assignment: impl Into<String>,
        priority: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            title: title.into(),
            description: description.into(),
            status: status.into(),
            assignment: assignment.into(),
            priority: priority.into(),
        }
    }

    /// Has the store assigned an identity to this issue?
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.id > 0
    }

    /// The five searchable text fields, in display order.
    #[must_use]
    pub fn text_fields(&self) -> [&str; 5] {
        [
            &self.title,
            &self.description,
            &self.status,
            &self.assignment,
            &self.priority,
        ]
    }

    /// Case-insensitive substring match against any text field.
    ///
    /// `needle_lower` must already be lowercased.
    #[must_use]
    pub fn matches_lowercase(&self, needle_lower: &str) -> bool {
        self.text_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(needle_lower))
    }
}

/// Does `issue` match the free-text `query` (case-insensitive)?
#[must_use]
pub fn matches_search(issue: &Issue, query: &str) -> bool {
    issue.matches_lowercase(&query.to_lowercase())
}

/// Apply the list page filter.
///
/// `None` or an empty query keeps every issue. Order is preserved.
#[must_use]
pub fn filter_issues(issues: Vec<Issue>, query: Option<&str>) -> Vec<Issue> {
    match query {
        Some(q) if !q.is_empty() => {
            let needle = q.to_lowercase();
            issues
                .into_iter()
                .filter(|issue| issue.matches_lowercase(&needle))
                .collect()
        }
        _ => issues,
    }
}

/// An issue as posted from the create/edit forms.
///
/// Values are kept exactly as submitted so an invalid form can be shown again
/// unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IssueForm {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub assignment: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default, rename = "__RequestVerificationToken")]
    pub token: Option<String>,
}

impl IssueForm {
    /// Pre-fill a form from a stored issue.
    #[must_use]
    pub fn from_issue(issue: &Issue) -> Self {
        Self {
            id: Some(issue.id.to_string()),
            title: Some(issue.title.clone()),
            description: Some(issue.description.clone()),
            status: Some(issue.status.clone()),
            assignment: Some(issue.assignment.clone()),
            priority: Some(issue.priority.clone()),
            token: None,
        }
    }

    /// The posted `Id`, if present and numeric.
    #[must_use]
    pub fn parsed_id(&self) -> Option<i64> {
        self.id.as_deref().and_then(|raw| raw.trim().parse().ok())
    }

    /// Convert into an `Issue`; missing text fields become empty strings.
    ///
    /// A missing or unparsable `Id` becomes `0` (unsaved).
    #[must_use]
    pub fn to_issue(&self) -> Issue {
        Issue {
            id: self.parsed_id().unwrap_or(0),
            title: self.title.clone().unwrap_or_default(),
            description: self.description.clone().unwrap_or_default(),
            status: self.status.clone().unwrap_or_default(),
            assignment: self.assignment.clone().unwrap_or_default(),
            priority: self.priority.clone().unwrap_or_default(),
        }
    }
}
