use postvibe_core::Modality;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure classification carried on modality and post results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The scorer could not produce a usable score. Recoverable: the
    /// modality is treated as absent.
    ExtractionFailed,
    /// The scorer reported a confidence outside `[0, 1]`. Aborts fusion for
    /// the post.
    InvalidConfidence,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::ExtractionFailed => write!(f, "extraction_failed"),
            ErrorKind::InvalidConfidence => write!(f, "invalid_confidence"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SentimentError {
    #[error("{modality} scorer returned invalid confidence {confidence}; expected a value in [0, 1]")]
    InvalidConfidence { modality: Modality, confidence: f64 },
}

impl SentimentError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            SentimentError::InvalidConfidence { .. } => ErrorKind::InvalidConfidence,
        }
    }
}
