use tracing::info;

use super::{
    fetch_projects, project_link, select_project, state_color, DefaultBadge, Example, Preview,
    ServiceInfo, DEFAULT_COLOR, DEFAULT_LABEL,
};
use crate::error::Result;
use crate::fetch::JsonFetcher;
use crate::types::{BadgeDescriptor, Project};

/// Shows whether a classic project is open or closed.
pub struct ProjectLookup<'a> {
    fetcher: &'a dyn JsonFetcher,
}

impl<'a> ProjectLookup<'a> {
    pub fn new(fetcher: &'a dyn JsonFetcher) -> Self {
        Self { fetcher }
    }

    pub fn info() -> ServiceInfo {
        ServiceInfo {
            name: "GitHub project",
            category: "issue-tracking",
            route: "github/projects/:org/:project_id([0-9]+)",
            default_badge: DefaultBadge {
                label: DEFAULT_LABEL,
                color: DEFAULT_COLOR,
            },
            examples: vec![Example {
                title: "GitHub project",
                org: "github",
                project_id: "1",
                preview: Preview {
                    label: DEFAULT_LABEL,
                    message: "open",
                    color: "red",
                },
            }],
        }
    }

    pub fn render(org: &str, project: &Project) -> BadgeDescriptor {
        BadgeDescriptor {
            label: project.name.clone(),
            message: project.state.clone(),
            color: state_color(&project.state).to_string(),
            link: vec![project_link(org, project)],
        }
    }

    pub async fn fetch(&self, org: &str) -> Result<Vec<Project>> {
        fetch_projects(self.fetcher, org).await
    }

    #[tracing::instrument(name = "project", skip(self))]
    pub async fn handle(&self, org: &str, project_number: u64) -> Result<BadgeDescriptor> {
        let projects = self.fetch(org).await?;
        let project = select_project(projects, org, project_number)?;

        let badge = Self::render(org, &project);
        info!(state = %badge.message, color = %badge.color, "rendered project badge");
        Ok(badge)
    }
}
