//! Batch statistics over post-level verdicts.
//!
//! [`summarize`] is a pure function of its input sequence: the same slice
//! always yields the same [`BatchSummary`], down to the bit.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use postvibe_core::Modality;
use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, SentimentError};
use crate::types::{FusedResult, SentimentLabel};

/// A post whose fusion was aborted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedPost {
    pub post_id: String,
    pub error: ErrorKind,
    pub message: String,
}

impl FailedPost {
    #[must_use]
    pub fn new(post_id: impl Into<String>, error: &SentimentError) -> Self {
        Self {
            post_id: post_id.into(),
            error: error.kind(),
            message: error.to_string(),
        }
    }
}

/// Per-post outcome fed to the aggregator. Failures are counted separately
/// and never skew the sentiment distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PostOutcome {
    Fused(FusedResult),
    Failed(FailedPost),
}

impl PostOutcome {
    #[must_use]
    pub fn post_id(&self) -> &str {
        match self {
            PostOutcome::Fused(r) => &r.post_id,
            PostOutcome::Failed(f) => &f.post_id,
        }
    }

    #[must_use]
    pub fn fused(&self) -> Option<&FusedResult> {
        match self {
            PostOutcome::Fused(r) => Some(r),
            PostOutcome::Failed(_) => None,
        }
    }
}

impl From<FusedResult> for PostOutcome {
    fn from(result: FusedResult) -> Self {
        PostOutcome::Fused(result)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub post_id: String,
    pub timestamp: Option<DateTime<Utc>>,
    pub score: f64,
}

/// Mean normalized score of one modality across the posts where it was usable.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ModalityStat {
    pub count: usize,
    /// `0.0` when `count` is zero.
    pub mean_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Successfully fused posts. Failed posts are excluded.
    pub total_count: usize,
    pub positive_count: usize,
    pub negative_count: usize,
    pub neutral_count: usize,
    pub failed_count: usize,
    /// Share of `total_count`, rounded half away from zero to one decimal.
    pub positive_pct: f64,
    pub negative_pct: f64,
    pub neutral_pct: f64,
    /// Arithmetic mean of `combined_score`; `0.0` for an empty batch.
    pub mean_score: f64,
    /// Sample standard deviation of `combined_score`; `0.0` below two posts.
    pub score_std_dev: f64,
    /// Highest-scoring post; the earliest wins ties.
    pub most_positive: Option<String>,
    /// Lowest-scoring post; the earliest wins ties.
    pub most_negative: Option<String>,
    pub modality_means: BTreeMap<Modality, ModalityStat>,
    pub failed_post_ids: Vec<String>,
    /// Post scores in input order. The aggregator never reorders.
    pub trend: Vec<TrendPoint>,
}

/// Roll a sequence of post outcomes up into a [`BatchSummary`].
///
/// An empty input (or one containing only failures) is a valid batch: every
/// count, percentage, and mean is `0`.
#[must_use]
pub fn summarize(outcomes: &[PostOutcome]) -> BatchSummary {
    let mut positive_count = 0;
    let mut negative_count = 0;
    let mut neutral_count = 0;
    let mut failed_post_ids = Vec::new();
    let mut trend = Vec::with_capacity(outcomes.len());
    let mut scores = Vec::with_capacity(outcomes.len());
    let mut most_positive: Option<(&str, f64)> = None;
    let mut most_negative: Option<(&str, f64)> = None;
    let mut modality_sums: BTreeMap<Modality, (usize, f64)> =
        Modality::ALL.iter().map(|m| (*m, (0, 0.0))).collect();

    for outcome in outcomes {
        let result = match outcome {
            PostOutcome::Fused(result) => result,
            PostOutcome::Failed(failed) => {
                failed_post_ids.push(failed.post_id.clone());
                continue;
            }
        };

        match result.label {
            SentimentLabel::Positive => positive_count += 1,
            SentimentLabel::Negative => negative_count += 1,
            SentimentLabel::Neutral => neutral_count += 1,
        }

        let score = result.combined_score;
        scores.push(score);
        trend.push(TrendPoint {
            post_id: result.post_id.clone(),
            timestamp: result.timestamp,
            score,
        });

        if most_positive.is_none_or(|(_, best)| score > best) {
            most_positive = Some((&result.post_id, score));
        }
        if most_negative.is_none_or(|(_, worst)| score < worst) {
            most_negative = Some((&result.post_id, score));
        }

        for r in result.per_modality.values().filter(|r| r.is_usable()) {
            let entry = modality_sums.entry(r.modality).or_insert((0, 0.0));
            entry.0 += 1;
            entry.1 += r.raw_score;
        }
    }

    let total_count = scores.len();
    let failed_count = failed_post_ids.len();

    if failed_count > 0 {
        tracing::warn!(
            failed_count,
            total_count,
            "some posts failed fusion and are excluded from the distribution"
        );
    }

    BatchSummary {
        total_count,
        positive_count,
        negative_count,
        neutral_count,
        failed_count,
        positive_pct: percentage(positive_count, total_count),
        negative_pct: percentage(negative_count, total_count),
        neutral_pct: percentage(neutral_count, total_count),
        mean_score: mean(&scores),
        score_std_dev: sample_std_dev(&scores),
        most_positive: most_positive.map(|(id, _)| id.to_string()),
        most_negative: most_negative.map(|(id, _)| id.to_string()),
        modality_means: modality_sums
            .into_iter()
            .map(|(m, (count, sum))| {
                let mean_score = if count == 0 {
                    0.0
                } else {
                    #[allow(clippy::cast_precision_loss)]
                    let denom = count as f64;
                    sum / denom
                };
                (m, ModalityStat { count, mean_score })
            })
            .collect(),
        failed_post_ids,
        trend,
    }
}

/// `count / total * 100`, rounded half away from zero to one decimal place.
#[allow(clippy::cast_precision_loss)]
fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let pct = count as f64 / total as f64 * 100.0;
    (pct * 10.0).round() / 10.0
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[allow(clippy::cast_precision_loss)]
fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance =
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

impl BatchSummary {
    /// Plain-language observations about the batch, in a fixed order.
    #[must_use]
    pub fn insights(&self) -> Vec<String> {
        let mut insights = Vec::new();

        if self.total_count == 0 {
            insights.push("No posts could be scored.".to_string());
        } else {
            let tone = if self.mean_score > 0.2 {
                "Very positive overall sentiment; perception is strong."
            } else if self.mean_score > 0.0 {
                "Slightly positive sentiment; room for improvement."
            } else if self.mean_score > -0.2 {
                "Slightly negative sentiment; attention needed."
            } else {
                "Strongly negative sentiment; immediate action required."
            };
            insights.push(tone.to_string());

            if self.positive_pct > 60.0 {
                insights.push(format!(
                    "{:.1}% positive posts; excellent engagement.",
                    self.positive_pct
                ));
            }
            if self.negative_pct > 30.0 {
                insights.push(format!(
                    "{:.1}% negative posts; investigate root causes.",
                    self.negative_pct
                ));
            }
        }

        let modalities: Vec<&str> = self
            .modality_means
            .iter()
            .filter(|(_, stat)| stat.count > 0)
            .map(|(m, _)| m.as_str())
            .collect();
        if modalities.is_empty() {
            insights.push(format!("Analyzed {} posts.", self.total_count));
        } else {
            insights.push(format!(
                "Analyzed {} posts across {} content.",
                self.total_count,
                modalities.join(", ")
            ));
        }

        if self.failed_count > 0 {
            insights.push(format!(
                "{} posts failed analysis and are excluded from the percentages.",
                self.failed_count
            ));
        }

        insights
    }
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod tests;
