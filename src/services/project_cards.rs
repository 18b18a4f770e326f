use futures::future::try_join_all;
use tracing::{debug, info};

use super::{
    api_path, fetch_projects, project_link, select_project, state_color, DefaultBadge, Example,
    Preview, ServiceInfo, DEFAULT_COLOR, DEFAULT_LABEL,
};
use crate::error::{BadgeError, Result};
use crate::fetch::{fetch_list, JsonFetcher};
use crate::shape::Shape;
use crate::types::{BadgeDescriptor, Card, Column, CountedColumn, Project};

/// Lists every column of a classic project with its card count.
pub struct ProjectCardsAggregator<'a> {
    fetcher: &'a dyn JsonFetcher,
}

impl<'a> ProjectCardsAggregator<'a> {
    pub fn new(fetcher: &'a dyn JsonFetcher) -> Self {
        Self { fetcher }
    }

    pub fn info() -> ServiceInfo {
        ServiceInfo {
            name: "GitHub project cards",
            category: "issue-tracking",
            route: "github/projects/:org/:project_id([0-9]+)/cards",
            default_badge: DefaultBadge {
                label: DEFAULT_LABEL,
                color: DEFAULT_COLOR,
            },
            examples: vec![Example {
                title: "GitHub project cards",
                org: "github",
                project_id: "1",
                preview: Preview {
                    label: DEFAULT_LABEL,
                    message: "Todo: 4, In progress: 0, Done: 0",
                    color: "red",
                },
            }],
        }
    }

    pub fn render(org: &str, project: &Project, columns: &[CountedColumn]) -> BadgeDescriptor {
        let message = columns
            .iter()
            .map(|column| format!("{}: {}", column.name, column.count))
            .collect::<Vec<_>>()
            .join(", ");

        BadgeDescriptor {
            label: project.name.clone(),
            message,
            color: state_color(&project.state).to_string(),
            link: vec![project_link(org, project)],
        }
    }

    pub async fn fetch_project(&self, org: &str) -> Result<Vec<Project>> {
        fetch_projects(self.fetcher, org).await
    }

    pub async fn fetch_columns(&self, project_id: u64) -> Result<Vec<Column>> {
        let project_id = project_id.to_string();
        fetch_list(
            self.fetcher,
            &api_path(&["projects", project_id.as_str(), "columns"]),
            Shape::ColumnList,
            "project not found",
        )
        .await
    }

    pub async fn fetch_cards(&self, column_id: u64) -> Result<Vec<Card>> {
        let column_id = column_id.to_string();
        fetch_list(
            self.fetcher,
            &api_path(&["projects", "columns", column_id.as_str(), "cards"]),
            Shape::CardList,
            "column not found",
        )
        .await
    }

    /// Count the cards of every column concurrently.
    ///
    /// Results keep the column order; the first failure fails the whole
    /// count and drops the fetches still in flight.
    pub async fn count_cards(&self, columns: Vec<Column>) -> Result<Vec<CountedColumn>> {
        try_join_all(columns.into_iter().map(|column| async move {
            let cards = self.fetch_cards(column.id).await?;
            debug!(column = %column.name, count = cards.len(), "counted cards");
            Ok::<_, BadgeError>(column.with_count(cards.len()))
        }))
        .await
    }

    #[tracing::instrument(name = "project_cards", skip(self))]
    pub async fn handle(&self, org: &str, project_number: u64) -> Result<BadgeDescriptor> {
        let projects = self.fetch_project(org).await?;
        let project = select_project(projects, org, project_number)?;

        let columns = self.fetch_columns(project.id).await?;
        let counted = self.count_cards(columns).await?;

        let badge = Self::render(org, &project, &counted);
        info!(columns = counted.len(), "rendered project cards badge");
        Ok(badge)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;
    use crate::fetch::fake::FakeFetcher;

    fn cards(n: usize) -> Value {
        Value::Array((0..n).map(|i| json!({"id": 5000 + i, "note": null})).collect())
    }

    fn github_fetcher() -> FakeFetcher {
        FakeFetcher::new()
            .with_json(
                "/orgs/github/projects",
                json!([{"id": 1000, "number": 1, "name": "My Project", "state": "open"}]),
            )
            .with_json(
                "/projects/1000/columns",
                json!([{"id": 1, "name": "Todo"}, {"id": 2, "name": "Done"}]),
            )
            .with_json("/projects/columns/1/cards", cards(4))
            .with_json("/projects/columns/2/cards", cards(0))
    }

    #[tokio::test]
    async fn test_counts_cards_per_column() {
        let fetcher = github_fetcher();
        let badge = ProjectCardsAggregator::new(&fetcher)
            .handle("github", 1)
            .await
            .unwrap();

        assert_eq!(
            badge,
            BadgeDescriptor {
                label: "My Project".to_string(),
                message: "Todo: 4, Done: 0".to_string(),
                color: "red".to_string(),
                link: vec!["https://github.com/orgs/github/projects/1/".to_string()],
            }
        );
    }

    #[tokio::test]
    async fn test_column_order_ignores_completion_order() {
        let fetcher = FakeFetcher::new()
            .with_json(
                "/orgs/acme/projects",
                json!([{"id": 7, "number": 2, "name": "Board", "state": "closed"}]),
            )
            .with_json(
                "/projects/7/columns",
                json!([
                    {"id": 10, "name": "Backlog"},
                    {"id": 11, "name": "In progress"},
                    {"id": 12, "name": "Done"}
                ]),
            )
            .with_json("/projects/columns/10/cards", cards(3))
            .with_yields("/projects/columns/10/cards", 8)
            .with_json("/projects/columns/11/cards", cards(1))
            .with_yields("/projects/columns/11/cards", 3)
            .with_json("/projects/columns/12/cards", cards(12));

        let badge = ProjectCardsAggregator::new(&fetcher)
            .handle("acme", 2)
            .await
            .unwrap();

        assert_eq!(badge.message, "Backlog: 3, In progress: 1, Done: 12");
        assert_eq!(badge.color, "green");
    }

    #[tokio::test]
    async fn test_fetch_sequence() {
        let fetcher = github_fetcher()
            .with_yields("/projects/columns/1/cards", 2)
            .with_yields("/projects/columns/2/cards", 2);

        ProjectCardsAggregator::new(&fetcher)
            .handle("github", 1)
            .await
            .unwrap();

        assert_eq!(
            fetcher.calls(),
            vec![
                "/orgs/github/projects",
                "/projects/1000/columns",
                "/projects/columns/1/cards",
                "/projects/columns/2/cards",
            ]
        );
    }

    #[tokio::test]
    async fn test_card_fetches_overlap() {
        let fetcher = github_fetcher()
            .with_yields("/projects/columns/1/cards", 4)
            .with_yields("/projects/columns/2/cards", 4);

        let badge = ProjectCardsAggregator::new(&fetcher)
            .handle("github", 1)
            .await
            .unwrap();

        assert_eq!(badge.message, "Todo: 4, Done: 0");
        assert_eq!(fetcher.peak_in_flight(), 2);
    }

    #[tokio::test]
    async fn test_empty_board_renders_empty_message() {
        let fetcher = github_fetcher().with_json("/projects/1000/columns", json!([]));
        let badge = ProjectCardsAggregator::new(&fetcher)
            .handle("github", 1)
            .await
            .unwrap();
        assert_eq!(badge.message, "");
        assert_eq!(badge.label, "My Project");
    }

    #[tokio::test]
    async fn test_missing_columns_report_project_not_found() {
        let fetcher = github_fetcher().with_status("/projects/1000/columns", 404);
        let err = ProjectCardsAggregator::new(&fetcher)
            .handle("github", 1)
            .await
            .unwrap_err();
        assert!(matches!(&err, BadgeError::NotFound { hint } if hint == "project not found"));
    }

    #[tokio::test]
    async fn test_one_failed_column_fails_the_badge() {
        let fetcher = github_fetcher().with_status("/projects/columns/2/cards", 422);
        let err = ProjectCardsAggregator::new(&fetcher)
            .handle("github", 1)
            .await
            .unwrap_err();
        assert_eq!(err.badge_message(), "column not found");
    }

    #[tokio::test]
    async fn test_upstream_error_on_cards_is_not_masked() {
        let fetcher = github_fetcher().with_status("/projects/columns/1/cards", 502);
        let err = ProjectCardsAggregator::new(&fetcher)
            .handle("github", 1)
            .await
            .unwrap_err();
        assert!(matches!(err, BadgeError::Api { status: 502, .. }));
    }

    #[tokio::test]
    async fn test_malformed_card_list() {
        let fetcher =
            github_fetcher().with_json("/projects/columns/1/cards", json!([{"note": "x"}]));
        let err = ProjectCardsAggregator::new(&fetcher)
            .handle("github", 1)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            BadgeError::InvalidResponse {
                shape: "card list",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_no_matching_project_stops_before_columns() {
        let fetcher = github_fetcher();
        let err = ProjectCardsAggregator::new(&fetcher)
            .handle("github", 9)
            .await
            .unwrap_err();

        assert!(matches!(err, BadgeError::NoMatchingProject { number: 9, .. }));
        assert_eq!(fetcher.calls(), vec!["/orgs/github/projects"]);
    }

    #[test]
    fn test_render_joins_in_given_order() {
        let project = Project {
            id: 1,
            number: 5,
            name: "Ops".to_string(),
            state: "open".to_string(),
        };
        let columns = vec![
            Column { id: 2, name: "B".to_string() }.with_count(0),
            Column { id: 1, name: "A".to_string() }.with_count(7),
        ];
        let badge = ProjectCardsAggregator::render("acme", &project, &columns);
        assert_eq!(badge.message, "B: 0, A: 7");
        assert_eq!(badge.link, vec!["https://github.com/orgs/acme/projects/5/"]);
    }
}
