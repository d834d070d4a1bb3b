//! Request construction from resource templates.

use reqwest::{Method, Url};
use tracing::debug;

use super::error::{ApiError, Result};
use super::resource::Resource;

/// Media type requested from and assumed for every response.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Collects path segments and query parameters for one resource.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    resource: Resource,
    segments: Vec<(String, String)>,
    query: Vec<(String, String)>,
}

impl RequestBuilder {
    /// Create an empty builder for a resource.
    pub fn new(resource: Resource) -> Self {
        Self {
            resource,
            segments: Vec::new(),
            query: Vec::new(),
        }
    }

    /// Substitute `value` for the `{name}` placeholder in the path.
    pub fn segment(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.segments.push((name.into(), value.into()));
        self
    }

    /// Append a query parameter.
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Resolve the template against `base_url`.
    ///
    /// `base_url` must not end with a slash; see
    /// [`normalize_base_url`](crate::api::normalize_base_url).
    ///
    /// # Errors
    ///
    /// Returns `MissingPathSegment` if a placeholder has no value, or
    /// `InvalidUrl` if the resulting URL cannot be parsed.
    pub fn build(self, base_url: &str) -> Result<JiraRequest> {
        let mut path = self.resource.template().to_string();

        for (name, value) in &self.segments {
            let token = format!("{{{}}}", name);
            if path.contains(&token) {
                path = path.replace(&token, &urlencoding::encode(value));
            } else {
                debug!(resource = %self.resource, segment = %name, "Ignoring unused path segment");
            }
        }

        if let Some(segment) = self
            .resource
            .placeholders()
            .into_iter()
            .find(|name| path.contains(&format!("{{{}}}", name)))
        {
            return Err(ApiError::MissingPathSegment {
                resource: self.resource.name(),
                segment: segment.to_string(),
            });
        }

        let raw = format!("{}{}", base_url, path);
        let mut url = Url::parse(&raw).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", raw, e)))?;

        if !self.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in &self.query {
                pairs.append_pair(name, value);
            }
        }

        Ok(JiraRequest {
            resource: self.resource,
            url,
        })
    }
}

/// A fully resolved GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JiraRequest {
    resource: Resource,
    url: Url,
}

impl JiraRequest {
    /// The resource this request targets.
    pub fn resource(&self) -> Resource {
        self.resource
    }

    /// The absolute request URL, query string included.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Always `GET`; this client is read-only.
    pub fn method(&self) -> Method {
        Method::GET
    }

    /// The expected response media type.
    pub fn accept(&self) -> &'static str {
        JSON_CONTENT_TYPE
    }

    /// Look up a query parameter by name.
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://jira.example.com";

    #[test]
    fn test_build_without_parameters() {
        let request = Resource::Fields.request().build(BASE).unwrap();
        assert_eq!(request.url().as_str(), "https://jira.example.com/rest/api/latest/field/");
        assert_eq!(request.url().query(), None);
        assert_eq!(request.method(), Method::GET);
        assert_eq!(request.accept(), "application/json");
        assert_eq!(request.resource(), Resource::Fields);
    }

    #[test]
    fn test_build_substitutes_issue_key() {
        let request = Resource::Issue
            .request()
            .segment("issueKey", "ABC-1")
            .build(BASE)
            .unwrap();
        assert_eq!(
            request.url().as_str(),
            "https://jira.example.com/rest/api/latest/issue/ABC-1/"
        );
    }

    #[test]
    fn test_build_substitutes_project_versions() {
        let request = Resource::ProjectVersions
            .request()
            .segment("projectKey", "PROJ")
            .build(BASE)
            .unwrap();
        assert_eq!(request.url().path(), "/rest/api/latest/project/PROJ/versions/");
    }

    #[test]
    fn test_build_substitutes_board_id() {
        let request = Resource::Sprints
            .request()
            .segment("boardID", "42")
            .build(BASE)
            .unwrap();
        assert_eq!(request.url().path(), "/rest/greenhopper/latest/sprintquery/42/");
    }

    #[test]
    fn test_segment_values_are_percent_encoded() {
        let request = Resource::Project
            .request()
            .segment("projectKey", "A B/C")
            .build(BASE)
            .unwrap();
        assert_eq!(request.url().path(), "/rest/api/latest/project/A%20B%2FC/");
    }

    #[test]
    fn test_query_parameters_appended_in_order() {
        let request = Resource::Sprint
            .request()
            .query("rapidViewId", "7")
            .query("sprintId", "99")
            .build(BASE)
            .unwrap();
        assert_eq!(
            request.url().as_str(),
            "https://jira.example.com/rest/greenhopper/latest/rapid/charts/sprintreport/?rapidViewId=7&sprintId=99"
        );
    }

    #[test]
    fn test_query_values_are_form_encoded() {
        let request = Resource::IssueSearch
            .request()
            .query("jql", "parent=\"ABC-1\"")
            .build(BASE)
            .unwrap();
        assert_eq!(request.url().query(), Some("jql=parent%3D%22ABC-1%22"));
        assert_eq!(request.query_param("jql").as_deref(), Some("parent=\"ABC-1\""));
    }

    #[test]
    fn test_base_url_with_context_path() {
        let request = Resource::User
            .request()
            .query("username", "alice")
            .build("https://example.com/jira")
            .unwrap();
        assert_eq!(
            request.url().as_str(),
            "https://example.com/jira/rest/api/latest/user/?username=alice"
        );
    }

    #[test]
    fn test_missing_segment_rejected() {
        let err = Resource::Worklog.request().build(BASE).unwrap_err();
        match err {
            ApiError::MissingPathSegment { resource, segment } => {
                assert_eq!(resource, "worklog");
                assert_eq!(segment, "issueKey");
            }
            other => panic!("Expected MissingPathSegment, got {:?}", other),
        }
    }

    #[test]
    fn test_unused_segment_ignored() {
        let request = Resource::Fields
            .request()
            .segment("issueKey", "ABC-1")
            .build(BASE)
            .unwrap();
        assert_eq!(request.url().path(), "/rest/api/latest/field/");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let err = Resource::Fields.request().build("not a url").unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }

    #[test]
    fn test_every_resource_resolves_with_its_placeholders() {
        for resource in Resource::ALL {
            let mut expected = resource.template().to_string();
            let mut builder = resource.request();
            for name in resource.placeholders() {
                expected = expected.replace(&format!("{{{}}}", name), "X");
                builder = builder.segment(name, "X");
            }
            let request = builder.build(BASE).unwrap();
            assert_eq!(request.url().path(), expected);
        }
    }
}
