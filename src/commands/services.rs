use tabled::Tabled;

use crate::output;
use crate::services::{all_services, ServiceInfo};

#[derive(Tabled)]
struct ServiceRow {
    #[tabled(rename = "Service")]
    name: String,
    #[tabled(rename = "Route")]
    route: String,
    #[tabled(rename = "Default")]
    default_badge: String,
    #[tabled(rename = "Example")]
    example: String,
}

impl From<&ServiceInfo> for ServiceRow {
    fn from(info: &ServiceInfo) -> Self {
        let example = info
            .examples
            .first()
            .map(|e| {
                format!(
                    "{}/{} -> {}: {}",
                    e.org,
                    e.project_id,
                    e.preview.label,
                    output::badge_colored(e.preview.message, e.preview.color)
                )
            })
            .unwrap_or_else(|| "-".to_string());

        Self {
            name: info.name.to_string(),
            route: info.route.to_string(),
            default_badge: format!("{} ({})", info.default_badge.label, info.default_badge.color),
            example,
        }
    }
}

pub fn list() {
    output::print_table(&all_services(), |s| ServiceRow::from(s));
}
