use thiserror::Error;
use tikstats_core::KpiError;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("profile not found: {url}")]
    ProfileNotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid username \"{username}\": {reason}")]
    InvalidUsername { username: String, reason: String },

    #[error("invalid profile base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("expected page marker not found: {marker}")]
    MarkerNotFound { marker: &'static str },

    #[error("unparseable count token \"{token}\"")]
    InvalidCount { token: String },

    #[error("total video views overflow a 64-bit count")]
    ViewCountOverflow,

    #[error(transparent)]
    Kpi(#[from] KpiError),
}
