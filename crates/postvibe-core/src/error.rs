use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("unknown modality: {0}")]
    UnknownModality(String),

    #[error("failed to read fusion config {path}: {source}")]
    FusionFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse fusion config: {0}")]
    FusionFileParse(#[source] serde_yaml::Error),

    #[error("failed to read posts file {path}: {source}")]
    PostsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse posts file: {0}")]
    PostsFileParse(#[source] serde_json::Error),

    #[error("validation error: {0}")]
    Validation(String),
}
