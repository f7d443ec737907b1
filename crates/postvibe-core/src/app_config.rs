use std::path::PathBuf;
use std::time::Duration;

use crate::FusionConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub posts_path: PathBuf,
    pub fusion_config_path: Option<PathBuf>,
    pub max_concurrent_posts: usize,
    pub scorer_timeout_ms: u64,
    pub fusion: FusionConfig,
}

impl AppConfig {
    #[must_use]
    pub fn scorer_timeout(&self) -> Duration {
        Duration::from_millis(self.scorer_timeout_ms)
    }
}
