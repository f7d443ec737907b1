//! Rescales scorer output from its native range onto `[-1.0, 1.0]`.

use postvibe_core::{FusionConfig, Modality};

use crate::error::SentimentError;
use crate::types::{ExtractorOutput, ModalityResult};

/// Normalize one scorer's output into a [`ModalityResult`].
///
/// The score is mapped linearly from `native_range` onto `[-1.0, 1.0]` and
/// then clamped, so extractors may overshoot their declared range. A
/// non-finite score or unusable range degrades the modality to
/// [`crate::error::ErrorKind::ExtractionFailed`]; fusion proceeds without it.
///
/// Confidence below `config.confidence_floor` is passed through unchanged.
///
/// # Errors
///
/// Returns [`SentimentError::InvalidConfidence`] when the confidence is not a
/// finite value in `[0, 1]`. This is checked before anything else, including
/// for absent results, since it points at a broken scorer.
pub fn normalize(
    output: &ExtractorOutput,
    modality: Modality,
    config: &FusionConfig,
) -> Result<ModalityResult, SentimentError> {
    let confidence = output.confidence;
    if !confidence.is_finite() || !(0.0..=1.0).contains(&confidence) {
        return Err(SentimentError::InvalidConfidence {
            modality,
            confidence,
        });
    }

    if let Some(kind) = output.error {
        tracing::debug!(%modality, error = %kind, "scorer reported failure");
        return Ok(ModalityResult {
            modality,
            raw_score: 0.0,
            confidence,
            present: false,
            error: Some(kind),
        });
    }

    if !output.present {
        return Ok(ModalityResult::absent(modality));
    }

    if !output.native_score.is_finite() || !output.native_range.is_valid() {
        tracing::debug!(
            %modality,
            score = output.native_score,
            min = output.native_range.min,
            max = output.native_range.max,
            "unusable native score; marking modality as failed"
        );
        return Ok(ModalityResult::failed(modality, confidence));
    }

    if confidence < config.confidence_floor {
        tracing::debug!(
            %modality,
            confidence,
            floor = config.confidence_floor,
            "confidence below floor"
        );
    }

    Ok(ModalityResult {
        modality,
        raw_score: rescale(output.native_score, output.native_range.min, output.native_range.max),
        confidence,
        present: true,
        error: None,
    })
}

fn rescale(value: f64, min: f64, max: f64) -> f64 {
    let unit = 2.0 * (value - min) / (max - min) - 1.0;
    unit.clamp(-1.0, 1.0)
}
