//! Badge services for classic GitHub project boards.
//!
//! Both services share one pipeline head: list the organization's projects,
//! pick the one with the requested number, and color the badge from its
//! state. [`ProjectCardsAggregator`] then walks columns and cards.

mod project;
mod project_cards;

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use url::Url;

use crate::error::{BadgeError, Result};
use crate::fetch::{fetch_list, JsonFetcher};
use crate::shape::Shape;
use crate::types::Project;

pub use project::ProjectLookup;
pub use project_cards::ProjectCardsAggregator;

static PROJECT_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("project id pattern is valid"));

/// Label every project badge carries until a real value is known.
pub const DEFAULT_LABEL: &str = "project";
pub const DEFAULT_COLOR: &str = "informational";

/// Parse the `project_id` route parameter.
pub fn parse_project_id(raw: &str) -> Result<u64> {
    if !PROJECT_ID_PATTERN.is_match(raw) {
        return Err(BadgeError::InvalidProjectId(raw.to_string()));
    }
    raw.parse()
        .map_err(|_| BadgeError::InvalidProjectId(raw.to_string()))
}

/// Build an API path from raw segments, percent-encoding each one.
pub fn api_path(segments: &[&str]) -> String {
    let mut url = Url::parse("https://api.invalid").expect("placeholder base is a valid URL");
    if let Ok(mut path) = url.path_segments_mut() {
        path.clear().extend(segments);
    }
    url.path().to_string()
}

/// Badge color for a project state.
pub fn state_color(state: &str) -> &'static str {
    match state {
        "open" => "red",
        "closed" => "green",
        _ => "blue",
    }
}

pub fn project_link(org: &str, project: &Project) -> String {
    format!("https://github.com/orgs/{org}/projects/{}/", project.number)
}

pub(crate) async fn fetch_projects(fetcher: &dyn JsonFetcher, org: &str) -> Result<Vec<Project>> {
    fetch_list(
        fetcher,
        &api_path(&["orgs", org, "projects"]),
        Shape::ProjectList,
        "org not found",
    )
    .await
}

/// First project with the requested number, or `NoMatchingProject`.
pub(crate) fn select_project(projects: Vec<Project>, org: &str, number: u64) -> Result<Project> {
    projects
        .into_iter()
        .find(|p| p.number == number)
        .ok_or_else(|| BadgeError::NoMatchingProject {
            org: org.to_string(),
            number,
        })
}

#[derive(Serialize, Debug, Clone)]
pub struct DefaultBadge {
    pub label: &'static str,
    pub color: &'static str,
}

#[derive(Serialize, Debug, Clone)]
pub struct Preview {
    pub label: &'static str,
    pub message: &'static str,
    pub color: &'static str,
}

#[derive(Serialize, Debug, Clone)]
pub struct Example {
    pub title: &'static str,
    pub org: &'static str,
    pub project_id: &'static str,
    pub preview: Preview,
}

/// Static description of a badge service, for listings and docs.
#[derive(Serialize, Debug, Clone)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub category: &'static str,
    pub route: &'static str,
    pub default_badge: DefaultBadge,
    pub examples: Vec<Example>,
}

pub fn all_services() -> Vec<ServiceInfo> {
    vec![ProjectLookup::info(), ProjectCardsAggregator::info()]
}
