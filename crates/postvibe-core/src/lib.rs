//! Shared domain vocabulary for postvibe.
//!
//! Holds the modality enum, post input records, the fusion configuration
//! surface, and environment-driven application config.

pub mod app_config;
pub mod config;
pub mod error;
pub mod fusion_config;
pub mod modality;
pub mod posts;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use fusion_config::{load_fusion_config, FusionConfig, ModalityWeights, Thresholds};
pub use modality::Modality;
pub use posts::{load_posts, AudioFeatures, ImageFeatures, Post, VideoFeatures};
