//! JIRA API client implementation.
//!
//! Every public method is a single GET against one [`Resource`]: the
//! parameters are placed into a [`RequestBuilder`], the request is sent with
//! Basic Auth and the JSON body is deserialized into the method's return type.
//! There is no retry, caching, or pagination beyond the search cap.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::auth::Auth;
use super::error::{ApiError, Result};
use super::jql;
use super::request::{JiraRequest, RequestBuilder};
use super::resource::Resource;
use super::types::{
    AgileBoard, AgileBoardView, Field, Issue, IssueFilter, IssueSearchResult, Project,
    ProjectVersion, Sprint, SprintResult, User, WorklogSearchResult,
};
use crate::config::{Profile, Settings};

/// Maximum number of issues requested by a search.
pub const MAX_SEARCH_RESULTS: u32 = 700;

/// The JIRA API client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct JiraClient {
    /// The HTTP client.
    client: Client,
    /// The base URL for the JIRA instance, without trailing slash.
    base_url: String,
    /// Credentials, absent when the caller configured the HTTP client.
    auth: Option<Auth>,
}

impl JiraClient {
    /// Create a client authenticating with a username and password.
    ///
    /// Uses default [`Settings`] for the HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: &str, username: &str, password: &str) -> Result<Self> {
        Self::with_auth(base_url, Auth::new(username, password), &Settings::default())
    }

    /// Create a client around a caller-configured HTTP client.
    ///
    /// No credentials are added; the client is expected to carry its own
    /// authentication (e.g. default headers) and timeouts.
    pub fn with_http_client(base_url: &str, client: Client) -> Self {
        Self {
            client,
            base_url: normalize_base_url(base_url),
            auth: None,
        }
    }

    /// Create a client from explicit credentials and settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_auth(base_url: &str, auth: Auth, settings: &Settings) -> Result<Self> {
        Ok(Self {
            client: build_http_client(settings)?,
            base_url: normalize_base_url(base_url),
            auth: Some(auth),
        })
    }

    /// Create a client for a configured profile.
    ///
    /// The password is read from the OS keyring under the profile name.
    ///
    /// # Errors
    ///
    /// Returns an error if the password cannot be retrieved or the HTTP
    /// client cannot be built.
    #[instrument(skip(profile, settings), fields(profile_name = %profile.name))]
    pub fn from_profile(profile: &Profile, settings: &Settings) -> Result<Self> {
        info!("Creating JIRA client for profile");
        let auth = Auth::from_keyring(&profile.name, &profile.username)?;
        Self::with_auth(&profile.url, auth, settings)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a request for `resource` against this client's base URL.
    ///
    /// Exposed so callers can inspect the exact URL a method will hit.
    pub fn prepare(&self, builder: RequestBuilder) -> Result<JiraRequest> {
        builder.build(&self.base_url)
    }

    /// Get the authenticated user.
    #[instrument(skip(self))]
    pub async fn get_current_user(&self) -> Result<User> {
        self.fetch(Resource::Myself.request()).await
    }

    /// Search for issues using JQL.
    ///
    /// Returns at most [`MAX_SEARCH_RESULTS`] issues; further matches are dropped.
    #[instrument(skip(self), fields(jql = %jql))]
    pub async fn search_issues(&self, jql: &str) -> Result<Vec<Issue>> {
        let result: IssueSearchResult = self
            .fetch(
                Resource::IssueSearch
                    .request()
                    .query("jql", jql)
                    .query("maxResults", MAX_SEARCH_RESULTS.to_string()),
            )
            .await?;

        if result.is_truncated() {
            warn!(
                returned = result.issues.len(),
                total = result.total,
                "Search result truncated"
            );
        }
        debug!("Found {} issues (total: {})", result.issues.len(), result.total);
        Ok(result.issues)
    }

    /// Get all issue fields.
    #[instrument(skip(self))]
    pub async fn get_fields(&self) -> Result<Vec<Field>> {
        self.fetch(Resource::Fields.request()).await
    }

    /// Get all projects visible to the user.
    #[instrument(skip(self))]
    pub async fn get_projects(&self) -> Result<Vec<Project>> {
        self.fetch(Resource::Projects.request()).await
    }

    /// Get a project by key, versions included.
    #[instrument(skip(self))]
    pub async fn get_project(&self, project_key: &str) -> Result<Project> {
        self.fetch(Resource::Project.request().segment("projectKey", project_key))
            .await
    }

    /// Get the versions of a project.
    #[instrument(skip(self))]
    pub async fn get_project_versions(&self, project_key: &str) -> Result<Vec<ProjectVersion>> {
        self.fetch(
            Resource::ProjectVersions
                .request()
                .segment("projectKey", project_key),
        )
        .await
    }

    /// Get a user by username.
    #[instrument(skip(self))]
    pub async fn get_user(&self, username: &str) -> Result<User> {
        self.fetch(Resource::User.request().query("username", username))
            .await
    }

    /// Get the users assignable to issues in a project.
    #[instrument(skip(self))]
    pub async fn get_assignable_users(&self, project_key: &str) -> Result<Vec<User>> {
        self.fetch(
            Resource::AssignableUser
                .request()
                .query("project", project_key),
        )
        .await
    }

    /// Get all agile boards.
    #[instrument(skip(self))]
    pub async fn get_agile_boards(&self) -> Result<Vec<AgileBoard>> {
        let view: AgileBoardView = self.fetch(Resource::AgileBoards.request()).await?;
        Ok(view.views)
    }

    /// Get the sprints of an agile board.
    #[instrument(skip(self))]
    pub async fn get_sprints_from_agile_board(&self, board_id: u64) -> Result<Vec<Sprint>> {
        let result: SprintResult = self
            .fetch(
                Resource::Sprints
                    .request()
                    .segment("boardID", board_id.to_string()),
            )
            .await?;
        Ok(result.sprints)
    }

    /// Get the sprints shown on an agile board's backlog.
    #[instrument(skip(self))]
    pub async fn get_backlog_sprints_from_agile_board(&self, board_id: u64) -> Result<Vec<Sprint>> {
        let result: SprintResult = self
            .fetch(
                Resource::BacklogSprints
                    .request()
                    .query("rapidViewId", board_id.to_string()),
            )
            .await?;
        Ok(result.sprints)
    }

    /// Get one sprint of an agile board from its sprint report.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the report carries no sprint.
    #[instrument(skip(self))]
    pub async fn get_sprint(&self, board_id: u64, sprint_id: u64) -> Result<Sprint> {
        let result: SprintResult = self
            .fetch(
                Resource::Sprint
                    .request()
                    .query("rapidViewId", board_id.to_string())
                    .query("sprintId", sprint_id.to_string()),
            )
            .await?;
        result.sprint.ok_or_else(|| {
            ApiError::NotFound(format!("sprint {} on board {}", sprint_id, board_id))
        })
    }

    /// Get the issues in a sprint.
    pub async fn get_issues_from_sprint(&self, sprint_id: u64) -> Result<Vec<Issue>> {
        self.search_issues(&jql::sprint(sprint_id)).await
    }

    /// Get a single issue by key.
    #[instrument(skip(self), fields(issue_key = %key))]
    pub async fn get_issue(&self, key: &str) -> Result<Issue> {
        let issue: Issue = self
            .fetch(Resource::Issue.request().segment("issueKey", key))
            .await
            .map_err(|e| match e {
                ApiError::NotFound(msg) => {
                    ApiError::NotFound(format!("Issue '{}' not found: {}", key, msg))
                }
                e => e,
            })?;

        debug!("Fetched issue: {}", issue.key);
        Ok(issue)
    }

    /// Get the sub-tasks of an issue.
    pub async fn get_subtasks_from_issue(&self, issue_key: &str) -> Result<Vec<Issue>> {
        self.search_issues(&jql::subtasks_of(issue_key)).await
    }

    /// Get the issues of a project with the given fix version.
    pub async fn get_issues_from_project_version(
        &self,
        project_key: &str,
        version_name: &str,
    ) -> Result<Vec<Issue>> {
        self.search_issues(&jql::project_version(project_key, version_name))
            .await
    }

    /// Get the custom fields of an issue, keyed by field ID.
    ///
    /// Every field whose ID starts with `customfield` is returned with its
    /// raw JSON value, including fields that are unset (`null`).
    #[instrument(skip(self), fields(issue_key = %key))]
    pub async fn get_issue_custom_fields(&self, key: &str) -> Result<BTreeMap<String, Value>> {
        let issue = self.get_issue(key).await?;
        let fields = issue.custom_fields();
        debug!("Found {} custom fields", fields.len());
        Ok(fields)
    }

    /// Get the user's favourite filters.
    #[instrument(skip(self))]
    pub async fn get_favorite_filters(&self) -> Result<Vec<IssueFilter>> {
        self.fetch(Resource::FavoriteFilters.request()).await
    }

    /// Get the issues linked to an epic.
    pub async fn get_issues_with_epic_link(&self, epic_key: &str) -> Result<Vec<Issue>> {
        self.search_issues(&jql::epic_link(epic_key)).await
    }

    /// Get all epics of a project.
    pub async fn get_epic_issues_from_project(&self, project: &str) -> Result<Vec<Issue>> {
        self.search_issues(&jql::project_epics(project)).await
    }

    /// Get the epic of a project with the given epic name, if any.
    pub async fn get_epic_issue_from_project(
        &self,
        project: &str,
        epic_name: &str,
    ) -> Result<Option<Issue>> {
        let issues = self
            .search_issues(&jql::project_epic(project, epic_name))
            .await?;
        Ok(issues.into_iter().next())
    }

    /// Get the worklog of an issue.
    #[instrument(skip(self))]
    pub async fn get_worklogs(&self, issue_key: &str) -> Result<WorklogSearchResult> {
        self.fetch(Resource::Worklog.request().segment("issueKey", issue_key))
            .await
    }

    /// Resolve and execute a request.
    async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let request = self.prepare(builder)?;
        self.execute(&request).await
    }

    /// Send a GET and decode the body as JSON.
    ///
    /// The body is parsed as JSON whatever `Content-Type` the server declares.
    #[instrument(skip(self, request), fields(resource = %request.resource(), url = %request.url()))]
    async fn execute<T: DeserializeOwned>(&self, request: &JiraRequest) -> Result<T> {
        debug!("Sending request");

        let mut builder = self
            .client
            .request(request.method(), request.url().clone())
            .header(header::ACCEPT, request.accept());
        if let Some(auth) = &self.auth {
            builder = builder.header(header::AUTHORIZATION, auth.header_value());
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            debug!("Error response body: {}", String::from_utf8_lossy(&body));
            return Err(error_from_response(status, request.url().as_str(), &body));
        }

        serde_json::from_slice(&body)
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }
}

/// Build the HTTP client with the configured timeout and user agent.
fn build_http_client(settings: &Settings) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(settings.request_timeout_secs))
        .user_agent(settings.user_agent())
        .build()
        .map_err(ApiError::Network)
}

/// Create an error from a non-success response, preferring JIRA's own messages.
fn error_from_response(status: StatusCode, url: &str, body: &[u8]) -> ApiError {
    if let Ok(json) = serde_json::from_slice::<Value>(body) {
        if let Some(messages) = json.get("errorMessages").and_then(Value::as_array) {
            let joined = messages
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            if !joined.is_empty() {
                return ApiError::from_status(status, &joined);
            }
        }
        if let Some(errors) = json.get("errors").and_then(Value::as_object) {
            let error_strings: Vec<String> = errors
                .iter()
                .map(|(k, v)| match v.as_str() {
                    Some(s) => format!("{}: {}", k, s),
                    None => format!("{}: {}", k, v),
                })
                .collect();
            if !error_strings.is_empty() {
                return ApiError::from_status(status, &error_strings.join(", "));
            }
        }
    }

    ApiError::from_status(status, url)
}

/// Normalize the base URL by removing trailing slashes.
///
/// Warns when the URL is not HTTPS, except for localhost.
pub fn normalize_base_url(url: &str) -> String {
    let url = url.trim().trim_end_matches('/');

    if !url.starts_with("https://") && !url.contains("localhost") && !url.contains("127.0.0.1") {
        warn!("URL does not use HTTPS: {}. This is insecure for production use.", url);
    }

    url.to_string()
}
