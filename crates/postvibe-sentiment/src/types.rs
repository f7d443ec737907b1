use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use postvibe_core::{Modality, Thresholds};
use serde::{Deserialize, Serialize};

use crate::error::ErrorKind;

/// Native output range of a scorer, rescaled linearly onto `[-1.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NativeRange {
    pub min: f64,
    pub max: f64,
}

impl NativeRange {
    /// Scorers that already speak the canonical domain.
    pub const UNIT: NativeRange = NativeRange {
        min: -1.0,
        max: 1.0,
    };

    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// A range is usable when both bounds are finite and `max > min`.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.max > self.min
    }
}

/// What a modality scorer hands back before normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractorOutput {
    pub native_score: f64,
    pub native_range: NativeRange,
    pub confidence: f64,
    pub present: bool,
    pub error: Option<ErrorKind>,
}

impl ExtractorOutput {
    /// A usable score on the given native scale.
    #[must_use]
    pub fn scored(native_score: f64, native_range: NativeRange, confidence: f64) -> Self {
        Self {
            native_score,
            native_range,
            confidence,
            present: true,
            error: None,
        }
    }

    /// The post carries no content for this modality.
    #[must_use]
    pub fn absent() -> Self {
        Self {
            native_score: 0.0,
            native_range: NativeRange::UNIT,
            confidence: 0.0,
            present: false,
            error: None,
        }
    }

    /// The content exists but the extractor could not analyze it.
    #[must_use]
    pub fn failed() -> Self {
        Self {
            error: Some(ErrorKind::ExtractionFailed),
            ..Self::absent()
        }
    }
}

/// A modality score on the canonical `[-1.0, 1.0]` scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModalityResult {
    pub modality: Modality,
    pub raw_score: f64,
    pub confidence: f64,
    pub present: bool,
    pub error: Option<ErrorKind>,
}

impl ModalityResult {
    #[must_use]
    pub fn new(modality: Modality, raw_score: f64, confidence: f64) -> Self {
        Self {
            modality,
            raw_score,
            confidence,
            present: true,
            error: None,
        }
    }

    #[must_use]
    pub fn absent(modality: Modality) -> Self {
        Self {
            modality,
            raw_score: 0.0,
            confidence: 0.0,
            present: false,
            error: None,
        }
    }

    #[must_use]
    pub fn failed(modality: Modality, confidence: f64) -> Self {
        Self {
            modality,
            raw_score: 0.0,
            confidence,
            present: false,
            error: Some(ErrorKind::ExtractionFailed),
        }
    }

    /// Whether fusion may draw on this result at all.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.present && self.error.is_none() && self.raw_score.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Apply the inclusive threshold rule.
    ///
    /// Assumes `thresholds.negative < thresholds.positive`, which
    /// [`postvibe_core::FusionConfig::validate`] guarantees.
    #[must_use]
    pub fn classify(score: f64, thresholds: &Thresholds) -> Self {
        if score >= thresholds.positive {
            SentimentLabel::Positive
        } else if score <= thresholds.negative {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SentimentLabel::Positive => write!(f, "positive"),
            SentimentLabel::Negative => write!(f, "negative"),
            SentimentLabel::Neutral => write!(f, "neutral"),
        }
    }
}

/// Post-level verdict produced by [`crate::fuse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusedResult {
    pub post_id: String,
    /// Post timestamp, carried through for the trend series.
    pub timestamp: Option<DateTime<Utc>>,
    /// Always within `[-1.0, 1.0]`.
    pub combined_score: f64,
    pub label: SentimentLabel,
    /// Every modality result fusion saw, usable or not, keyed in canonical order.
    pub per_modality: BTreeMap<Modality, ModalityResult>,
    /// Sum of effective weights (`weight * confidence`) that fed the score.
    pub contributing_weight_total: f64,
}

impl FusedResult {
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: Option<DateTime<Utc>>) -> Self {
        self.timestamp = timestamp;
        self
    }
}
