//! The fixed table of JIRA resources this client knows how to fetch.
//!
//! Each [`Resource`] maps to a URL template relative to the instance base URL.
//! Templates may contain `{name}` placeholders that are filled in by the
//! [`RequestBuilder`](super::request::RequestBuilder).

use std::fmt;
use std::str::FromStr;

use super::error::ApiError;
use super::request::RequestBuilder;

/// Prefix of the stable REST API.
pub const API_SERVICE_URI: &str = "/rest/api/latest";

/// Prefix of the Agile (Greenhopper) API.
pub const AGILE_SERVICE_URI: &str = "/rest/greenhopper/latest";

macro_rules! api_path {
    ($path:literal) => {
        concat!("/rest/api/latest", $path)
    };
}

macro_rules! agile_path {
    ($path:literal) => {
        concat!("/rest/greenhopper/latest", $path)
    };
}

/// A logical JIRA resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    /// All issue fields, system and custom.
    Fields,
    /// All visible projects.
    Projects,
    /// A single project by key.
    Project,
    /// Versions of a project.
    ProjectVersions,
    /// Users assignable to issues in a project.
    AssignableUser,
    /// A single issue by key.
    Issue,
    /// JQL issue search.
    IssueSearch,
    /// Worklog entries of an issue.
    Worklog,
    /// A single user by username.
    User,
    /// The authenticated user.
    Myself,
    /// The caller's favourite filters.
    FavoriteFilters,
    /// Agile boards (rapid views).
    AgileBoards,
    /// Sprints of an agile board.
    Sprints,
    /// Sprints shown on a board's backlog.
    BacklogSprints,
    /// Sprint report for one sprint of a board.
    Sprint,
    /// Sprint query root.
    SprintIssues,
}

impl Resource {
    /// Every known resource.
    pub const ALL: [Resource; 16] = [
        Resource::Fields,
        Resource::Projects,
        Resource::Project,
        Resource::ProjectVersions,
        Resource::AssignableUser,
        Resource::Issue,
        Resource::IssueSearch,
        Resource::Worklog,
        Resource::User,
        Resource::Myself,
        Resource::FavoriteFilters,
        Resource::AgileBoards,
        Resource::Sprints,
        Resource::BacklogSprints,
        Resource::Sprint,
        Resource::SprintIssues,
    ];

    /// The URL template for this resource, relative to the base URL.
    pub const fn template(self) -> &'static str {
        match self {
            Resource::Fields => api_path!("/field/"),
            Resource::Projects => api_path!("/project/"),
            Resource::Project => api_path!("/project/{projectKey}/"),
            Resource::ProjectVersions => api_path!("/project/{projectKey}/versions/"),
            Resource::AssignableUser => api_path!("/user/assignable/search/"),
            Resource::Issue => api_path!("/issue/{issueKey}/"),
            Resource::IssueSearch => api_path!("/search/"),
            Resource::Worklog => api_path!("/issue/{issueKey}/worklog/"),
            Resource::User => api_path!("/user/"),
            Resource::Myself => api_path!("/myself"),
            Resource::FavoriteFilters => api_path!("/filter/favourite"),
            Resource::AgileBoards => agile_path!("/rapidviews/list/"),
            Resource::Sprints => agile_path!("/sprintquery/{boardID}/"),
            Resource::BacklogSprints => agile_path!("/xboard/plan/backlog/data.json"),
            Resource::Sprint => agile_path!("/rapid/charts/sprintreport/"),
            Resource::SprintIssues => agile_path!("/sprintquery/"),
        }
    }

    /// The identifier used in logs and accepted by [`Resource::from_str`].
    pub const fn name(self) -> &'static str {
        match self {
            Resource::Fields => "fields",
            Resource::Projects => "projects",
            Resource::Project => "project",
            Resource::ProjectVersions => "project_versions",
            Resource::AssignableUser => "assignable_user",
            Resource::Issue => "issue",
            Resource::IssueSearch => "issue_search",
            Resource::Worklog => "worklog",
            Resource::User => "user",
            Resource::Myself => "myself",
            Resource::FavoriteFilters => "favorite_filters",
            Resource::AgileBoards => "agile_boards",
            Resource::Sprints => "sprints",
            Resource::BacklogSprints => "backlog_sprints",
            Resource::Sprint => "sprint",
            Resource::SprintIssues => "sprint_issues",
        }
    }

    /// Whether the resource belongs to the Agile API.
    pub fn is_agile(self) -> bool {
        self.template().starts_with(AGILE_SERVICE_URI)
    }

    /// Names of the `{placeholder}` tokens in the template, in order.
    pub fn placeholders(self) -> Vec<&'static str> {
        let mut names = Vec::new();
        let mut rest = self.template();
        while let Some(start) = rest.find('{') {
            let after = &rest[start + 1..];
            match after.find('}') {
                Some(end) => {
                    names.push(&after[..end]);
                    rest = &after[end + 1..];
                }
                None => break,
            }
        }
        names
    }

    /// Start building a request for this resource.
    pub fn request(self) -> RequestBuilder {
        RequestBuilder::new(self)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Resource {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resource::ALL
            .iter()
            .copied()
            .find(|resource| resource.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ApiError::UnsupportedResource(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_templates() {
        assert_eq!(Resource::Fields.template(), "/rest/api/latest/field/");
        assert_eq!(Resource::Projects.template(), "/rest/api/latest/project/");
        assert_eq!(
            Resource::Project.template(),
            "/rest/api/latest/project/{projectKey}/"
        );
        assert_eq!(
            Resource::ProjectVersions.template(),
            "/rest/api/latest/project/{projectKey}/versions/"
        );
        assert_eq!(
            Resource::AssignableUser.template(),
            "/rest/api/latest/user/assignable/search/"
        );
        assert_eq!(Resource::Issue.template(), "/rest/api/latest/issue/{issueKey}/");
        assert_eq!(Resource::IssueSearch.template(), "/rest/api/latest/search/");
        assert_eq!(
            Resource::Worklog.template(),
            "/rest/api/latest/issue/{issueKey}/worklog/"
        );
        assert_eq!(Resource::User.template(), "/rest/api/latest/user/");
        assert_eq!(
            Resource::FavoriteFilters.template(),
            "/rest/api/latest/filter/favourite"
        );
    }

    #[test]
    fn test_agile_templates() {
        assert_eq!(
            Resource::AgileBoards.template(),
            "/rest/greenhopper/latest/rapidviews/list/"
        );
        assert_eq!(
            Resource::Sprints.template(),
            "/rest/greenhopper/latest/sprintquery/{boardID}/"
        );
        assert_eq!(
            Resource::BacklogSprints.template(),
            "/rest/greenhopper/latest/xboard/plan/backlog/data.json"
        );
        assert_eq!(
            Resource::Sprint.template(),
            "/rest/greenhopper/latest/rapid/charts/sprintreport/"
        );
        assert_eq!(
            Resource::SprintIssues.template(),
            "/rest/greenhopper/latest/sprintquery/"
        );
    }

    #[test]
    fn test_every_template_has_a_service_prefix() {
        for resource in Resource::ALL {
            let template = resource.template();
            assert!(
                template.starts_with(API_SERVICE_URI) || template.starts_with(AGILE_SERVICE_URI),
                "{} has no known prefix",
                resource
            );
        }
    }

    #[test]
    fn test_is_agile() {
        assert!(Resource::Sprints.is_agile());
        assert!(Resource::AgileBoards.is_agile());
        assert!(!Resource::Issue.is_agile());
        assert!(!Resource::FavoriteFilters.is_agile());
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(Resource::Project.placeholders(), vec!["projectKey"]);
        assert_eq!(Resource::Worklog.placeholders(), vec!["issueKey"]);
        assert_eq!(Resource::Sprints.placeholders(), vec!["boardID"]);
        assert!(Resource::IssueSearch.placeholders().is_empty());
    }

    #[test]
    fn test_from_str_round_trips_every_name() {
        for resource in Resource::ALL {
            assert_eq!(resource.name().parse::<Resource>().unwrap(), resource);
        }
    }

    #[test]
    fn test_from_str_is_case_insensitive() {
        assert_eq!("Issue_Search".parse::<Resource>().unwrap(), Resource::IssueSearch);
    }

    #[test]
    fn test_unknown_resource_rejected() {
        let err = "attachments".parse::<Resource>().unwrap_err();
        match err {
            ApiError::UnsupportedResource(name) => assert_eq!(name, "attachments"),
            other => panic!("Expected UnsupportedResource, got {:?}", other),
        }
    }

    #[test]
    fn test_all_names_unique() {
        let mut names: Vec<_> = Resource::ALL.iter().map(|r| r.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Resource::ALL.len());
    }
}
