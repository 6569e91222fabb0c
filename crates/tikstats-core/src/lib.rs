pub mod app_config;
pub mod config;
pub mod kpi;
pub mod profile;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use kpi::{KpiError, KpiSet};
pub use profile::{ProfileSnapshot, ProfileStats, VideoViews};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
