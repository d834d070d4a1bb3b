//! JIRA API client and types.
//!
//! This module provides the interface for reading from the JIRA REST and
//! Agile (Greenhopper) APIs.

pub mod auth;
mod client;
pub mod error;
pub mod jql;
mod request;
mod resource;
pub mod types;

pub use auth::Auth;
pub use client::{normalize_base_url, JiraClient, MAX_SEARCH_RESULTS};
pub use error::{ApiError, Result};
pub use request::{JiraRequest, RequestBuilder, JSON_CONTENT_TYPE};
pub use resource::{Resource, AGILE_SERVICE_URI, API_SERVICE_URI};
pub use types::*;
