pub mod app_config;
pub mod audiences;
pub mod config;
pub mod research;
pub mod seed;

pub use app_config::{AppConfig, Environment};
pub use audiences::{Audience, AudienceFields, ProfileStyle, OWNER_PLACEHOLDER};
pub use config::{load_app_config, load_app_config_from_env};
pub use research::{
    ChartData, ChartDataItem, ComparisonChartDataItem, DiscoveredAudience, ResearchResult, Source,
};
pub use seed::{load_seed_file, SeedFile};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("audience name must be non-empty")]
    EmptyName,
    #[error("at least one of demographics, interests or behaviors must be provided")]
    NoDescriptiveFields,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read seed file {path}: {source}")]
    SeedFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse seed file: {0}")]
    SeedFileParse(#[from] serde_yaml::Error),

    #[error("seed validation failed: {0}")]
    Validation(String),
}
