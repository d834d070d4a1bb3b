//! JIRA API response types.
//!
//! These model the `/rest/api/latest` and `/rest/greenhopper/latest`
//! payloads. Missing fields fall back to their defaults and unknown fields
//! are ignored, except on [`IssueFields`] where they are kept in
//! [`IssueFields::extra`].

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Prefix JIRA gives to user-defined issue fields.
pub const CUSTOM_FIELD_PREFIX: &str = "customfield";

fn default_true() -> bool {
    true
}

/// An issue field definition.
///
/// Returned by `GET /rest/api/latest/field/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Field {
    /// The field ID (e.g., "summary" or "customfield_10010").
    pub id: String,
    /// The field's display name.
    pub name: String,
    /// Whether this is a custom field.
    pub custom: bool,
    pub orderable: bool,
    pub navigable: bool,
    pub searchable: bool,
    /// Names usable in JQL clauses.
    pub clause_names: Vec<String>,
    /// The value schema.
    pub schema: Option<FieldSchema>,
}

/// Type information for a field's values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldSchema {
    #[serde(rename = "type")]
    pub kind: String,
    pub items: Option<String>,
    pub system: Option<String>,
    pub custom: Option<String>,
    pub custom_id: Option<u64>,
}

/// A JIRA user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct User {
    /// The login name.
    #[serde(rename = "name")]
    pub username: String,
    pub key: Option<String>,
    /// The account ID (JIRA Cloud only).
    pub account_id: Option<String>,
    /// The user's display name.
    pub display_name: String,
    pub email_address: Option<String>,
    /// Whether the user is active.
    #[serde(default = "default_true")]
    pub active: bool,
    pub time_zone: Option<String>,
    #[serde(rename = "self")]
    pub self_url: Option<String>,
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name)
    }
}

/// A JIRA project.
///
/// Returned by `GET /rest/api/latest/project/{projectKey}/` and, without
/// versions, by the project list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    /// The project key (e.g., "PROJ").
    pub key: String,
    pub name: String,
    pub description: Option<String>,
    pub lead: Option<User>,
    /// Versions, only present on the single project resource.
    pub versions: Vec<ProjectVersion>,
    #[serde(rename = "self")]
    pub self_url: Option<String>,
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.name)
    }
}

/// A project version, also used for issue fix versions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectVersion {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub archived: bool,
    pub released: bool,
    pub release_date: Option<String>,
    pub project_id: Option<u64>,
    #[serde(rename = "self")]
    pub self_url: Option<String>,
}

/// A JIRA issue.
///
/// Returned by `GET /rest/api/latest/issue/{issueKey}/` or as part of search results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Issue {
    pub id: String,
    /// The issue key (e.g., "PROJ-123").
    pub key: String,
    #[serde(rename = "self")]
    pub self_url: Option<String>,
    pub fields: IssueFields,
}

impl Issue {
    /// Get the issue summary.
    pub fn summary(&self) -> &str {
        &self.fields.summary
    }

    /// Get the status name, if present.
    pub fn status(&self) -> Option<&str> {
        self.fields.status.as_ref().map(|s| s.name.as_str())
    }

    /// Get the issue type name, if present.
    pub fn issue_type(&self) -> Option<&str> {
        self.fields.issuetype.as_ref().map(|t| t.name.as_str())
    }

    /// Get the assignee display name, or "Unassigned" if not set.
    pub fn assignee_name(&self) -> &str {
        self.fields
            .assignee
            .as_ref()
            .map(|u| u.display_name.as_str())
            .unwrap_or("Unassigned")
    }

    /// Get the project key, if available.
    pub fn project_key(&self) -> Option<&str> {
        self.fields.project.as_ref().map(|p| p.key.as_str())
    }

    /// All `customfield*` fields with their raw values.
    pub fn custom_fields(&self) -> BTreeMap<String, Value> {
        self.fields.custom_fields()
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.fields.summary)
    }
}

/// Issue fields.
///
/// Well-known fields are typed; everything else, custom fields included,
/// lands in `extra` keyed by field ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IssueFields {
    pub summary: String,
    /// Plain text on the v2/latest API; kept raw in case an instance returns rich text.
    pub description: Option<Value>,
    pub status: Option<Status>,
    pub issuetype: Option<IssueType>,
    pub priority: Option<Priority>,
    pub assignee: Option<User>,
    pub reporter: Option<User>,
    pub project: Option<Project>,
    #[serde(rename = "fixVersions")]
    pub fix_versions: Vec<ProjectVersion>,
    pub labels: Vec<String>,
    pub created: Option<String>,
    pub updated: Option<String>,
    pub duedate: Option<String>,
    /// The parent issue of a sub-task.
    pub parent: Option<Box<Issue>>,
    pub subtasks: Vec<Issue>,
    /// The first page of worklogs embedded in the issue.
    pub worklog: Option<WorklogSearchResult>,
    /// Every field not modelled above.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl IssueFields {
    /// Description as plain text, or empty if unset or not a string.
    pub fn description_text(&self) -> &str {
        self.description
            .as_ref()
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// All `customfield*` fields with their raw values, nulls included.
    pub fn custom_fields(&self) -> BTreeMap<String, Value> {
        self.extra
            .iter()
            .filter(|(name, _)| name.starts_with(CUSTOM_FIELD_PREFIX))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }

    /// Look up any untyped field by ID.
    pub fn get(&self, field_id: &str) -> Option<&Value> {
        self.extra.get(field_id)
    }
}

/// Issue status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Status {
    pub id: String,
    /// The status name (e.g., "Open", "In Progress", "Done").
    pub name: String,
    pub status_category: Option<StatusCategory>,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Status category (groups statuses into to-do, in-progress, done).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatusCategory {
    pub id: u32,
    pub key: String,
    pub name: String,
    pub color_name: Option<String>,
}

/// Issue type (Bug, Story, Task, Epic, etc.).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IssueType {
    pub id: String,
    pub name: String,
    /// Whether this is a sub-task type.
    pub subtask: bool,
    pub description: Option<String>,
    pub icon_url: Option<String>,
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Issue priority.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Priority {
    pub id: String,
    pub name: String,
    pub icon_url: Option<String>,
}

/// Search result from a JQL query.
///
/// Returned by `GET /rest/api/latest/search/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IssueSearchResult {
    pub start_at: u32,
    pub max_results: u32,
    /// Total number of matching issues, which may exceed `issues.len()`.
    pub total: u32,
    pub issues: Vec<Issue>,
}

impl IssueSearchResult {
    /// Whether the server had more matches than it returned.
    pub fn is_truncated(&self) -> bool {
        self.start_at + (self.issues.len() as u32) < self.total
    }
}

/// Worklog page for an issue.
///
/// Returned by `GET /rest/api/latest/issue/{issueKey}/worklog/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorklogSearchResult {
    pub start_at: u32,
    pub max_results: u32,
    pub total: u32,
    pub worklogs: Vec<WorklogEntry>,
}

impl WorklogSearchResult {
    /// Sum of `time_spent_seconds` over the returned entries.
    pub fn total_seconds(&self) -> u64 {
        self.worklogs.iter().map(|w| w.time_spent_seconds).sum()
    }
}

/// A single worklog entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorklogEntry {
    pub id: String,
    pub author: Option<User>,
    pub update_author: Option<User>,
    pub comment: Option<String>,
    pub created: Option<String>,
    pub updated: Option<String>,
    pub started: Option<String>,
    /// Human-readable duration (e.g., "3h 20m").
    pub time_spent: String,
    pub time_spent_seconds: u64,
    pub issue_id: Option<String>,
}

/// A saved issue filter.
///
/// Returned by `GET /rest/api/latest/filter/favourite`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IssueFilter {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub owner: Option<User>,
    /// The filter's JQL.
    pub jql: String,
    pub view_url: Option<String>,
    pub search_url: Option<String>,
    pub favourite: bool,
    #[serde(rename = "self")]
    pub self_url: Option<String>,
}

/// An agile board (rapid view).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AgileBoard {
    pub id: u64,
    pub name: String,
    pub can_edit: bool,
    pub sprint_support_enabled: bool,
}

impl fmt::Display for AgileBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Board list wrapper.
///
/// Returned by `GET /rest/greenhopper/latest/rapidviews/list/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AgileBoardView {
    pub views: Vec<AgileBoard>,
}

/// Sprint lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SprintState {
    Future,
    Active,
    Closed,
    #[default]
    #[serde(other)]
    Unknown,
}

/// A sprint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Sprint {
    pub id: u64,
    pub name: String,
    pub state: SprintState,
    pub goal: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub complete_date: Option<String>,
}

impl Sprint {
    /// Whether the sprint is currently running.
    pub fn is_active(&self) -> bool {
        self.state == SprintState::Active
    }
}

impl fmt::Display for Sprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Wrapper shared by the sprint query, backlog and sprint report resources.
///
/// The list resources fill `sprints`, the sprint report fills `sprint`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SprintResult {
    pub sprints: Vec<Sprint>,
    pub sprint: Option<Sprint>,
    pub rapid_view_id: Option<u64>,
}
