use crate::cli::BadgeArgs;
use crate::error::{BadgeError, Result};
use crate::fetch::JsonFetcher;
use crate::output;
use crate::services::{parse_project_id, ProjectCardsAggregator, ProjectLookup};
use crate::types::BadgeDescriptor;

pub async fn project(fetcher: &dyn JsonFetcher, args: &BadgeArgs) -> Result<()> {
    let number = parse_project_id(&args.project_id)?;
    let badge = ProjectLookup::new(fetcher).handle(&args.org, number).await?;
    output::print_badge(&badge);
    Ok(())
}

pub async fn cards(fetcher: &dyn JsonFetcher, args: &BadgeArgs) -> Result<()> {
    let number = parse_project_id(&args.project_id)?;
    let badge = ProjectCardsAggregator::new(fetcher)
        .handle(&args.org, number)
        .await?;
    output::print_badge(&badge);
    Ok(())
}

/// Print the badge a renderer would show for a failed request.
pub fn print_error_badge(label: &str, err: &BadgeError) {
    output::print_badge(&BadgeDescriptor::from_error(label, err));
}
