//! Weighted fusion of modality scores into one post-level verdict.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use postvibe_core::FusionConfig;

use crate::error::SentimentError;
use crate::types::{FusedResult, ModalityResult, SentimentLabel};

/// Fuse a post's modality results into a single [`FusedResult`].
///
/// Each usable result contributes `weight[modality] * confidence` as its
/// effective weight, and the combined score is the effective-weight average
/// of the raw scores. When nothing usable remains, or every effective weight
/// is zero, the result is a neutral `0.0` with zero contributing weight.
///
/// Results are summed in canonical order, so any permutation of `results`
/// yields a bit-identical score. If a modality appears more than once, the
/// canonically last entry wins.
///
/// `config` is expected to have passed [`FusionConfig::validate`].
///
/// # Errors
///
/// Returns [`SentimentError::InvalidConfidence`] if any result carries a
/// confidence outside `[0, 1]`. The whole post fails; nothing is dropped
/// silently.
pub fn fuse(
    post_id: &str,
    results: &[ModalityResult],
    config: &FusionConfig,
) -> Result<FusedResult, SentimentError> {
    debug_assert!(config.validate().is_ok(), "fusion config must be validated");

    for r in results {
        if !r.confidence.is_finite() || !(0.0..=1.0).contains(&r.confidence) {
            return Err(SentimentError::InvalidConfidence {
                modality: r.modality,
                confidence: r.confidence,
            });
        }
    }

    let mut ordered: Vec<&ModalityResult> = results.iter().collect();
    ordered.sort_by(|a, b| canonical_cmp(a, b));

    let mut per_modality = BTreeMap::new();
    for r in ordered {
        if per_modality.insert(r.modality, r.clone()).is_some() {
            tracing::warn!(
                post_id,
                modality = %r.modality,
                "duplicate modality result; keeping the last in canonical order"
            );
        }
    }

    let mut weighted_sum = 0.0_f64;
    let mut weight_total = 0.0_f64;
    for r in per_modality.values().filter(|r| r.is_usable()) {
        let effective = config.weights.get(r.modality) * r.confidence;
        weighted_sum += effective * r.raw_score.clamp(-1.0, 1.0);
        weight_total += effective;
    }

    let (combined_score, contributing_weight_total) =
        if weight_total.is_finite() && weight_total > 0.0 {
            ((weighted_sum / weight_total).clamp(-1.0, 1.0), weight_total)
        } else {
            (0.0, 0.0)
        };

    let label = SentimentLabel::classify(combined_score, &config.thresholds);

    tracing::debug!(
        post_id,
        combined_score,
        %label,
        contributing_weight_total,
        "fused post"
    );

    Ok(FusedResult {
        post_id: post_id.to_string(),
        timestamp: None,
        combined_score,
        label,
        per_modality,
        contributing_weight_total,
    })
}

fn canonical_cmp(a: &ModalityResult, b: &ModalityResult) -> Ordering {
    a.modality
        .cmp(&b.modality)
        .then_with(|| a.present.cmp(&b.present))
        .then_with(|| a.error.cmp(&b.error))
        .then_with(|| a.raw_score.total_cmp(&b.raw_score))
        .then_with(|| a.confidence.total_cmp(&b.confidence))
}

#[cfg(test)]
#[path = "fusion_test.rs"]
mod tests;
