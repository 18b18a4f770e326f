use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BadgeError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not found: {hint}")]
    NotFound { hint: String },

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid {shape} response: {reason}")]
    InvalidResponse { shape: &'static str, reason: String },

    #[error("{path} spans more than {max_pages} pages")]
    TooManyPages { path: String, max_pages: u32 },

    #[error("No project numbered {number} in organization {org}")]
    NoMatchingProject { org: String, number: u64 },

    #[error("Invalid project id {0:?}: expected digits only")]
    InvalidProjectId(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to write config file at {path}: {source}")]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error(
        "No GitHub token given. Set GITHUB_TOKEN or add token to the gh-project-badge config.toml"
    )]
    MissingToken,
}

impl BadgeError {
    /// Short text shown in the message slot of an error badge.
    pub fn badge_message(&self) -> String {
        match self {
            Self::NotFound { hint } => hint.clone(),
            Self::NoMatchingProject { .. } => "project not found".to_string(),
            Self::InvalidResponse { .. } => "invalid response data".to_string(),
            Self::TooManyPages { .. } => "too many items to count".to_string(),
            Self::Api { status: 429, .. } => "rate limited by upstream service".to_string(),
            Self::Api { status: 403, message } if message.contains("rate limit") => {
                "rate limited by upstream service".to_string()
            }
            Self::InvalidProjectId(_) | Self::InvalidUrl(_) => "invalid".to_string(),
            Self::Http(_) | Self::Io(_) | Self::Api { .. } => "inaccessible".to_string(),
            Self::ConfigRead { .. }
            | Self::ConfigParse { .. }
            | Self::ConfigWrite { .. }
            | Self::ConfigSerialize(_)
            | Self::NoConfigDir
            | Self::MissingToken => "misconfigured".to_string(),
        }
    }

    /// Whether the failure came from upstream reachability rather than from
    /// the request or the data.
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Io(_) | Self::Api { .. })
    }
}

pub type Result<T> = std::result::Result<T, BadgeError>;
