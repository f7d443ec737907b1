//! Sentiment pipeline orchestration.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use futures::stream::{self, StreamExt};
use postvibe_core::{AppConfig, ConfigError, FusionConfig, Modality, Post};
use serde::{Deserialize, Serialize};

use crate::aggregate::{summarize, BatchSummary, FailedPost, PostOutcome};
use crate::fusion::fuse;
use crate::normalize::normalize;
use crate::scorer::Scorer;
use crate::types::ExtractorOutput;

/// Knobs for a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub fusion: FusionConfig,
    /// Scorers run against every post.
    pub scorers: Vec<Scorer>,
    pub max_concurrent_posts: usize,
    /// Upper bound on a single scorer invocation. A scorer that overruns is
    /// treated as a failed extraction for that post.
    pub scorer_timeout: Duration,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            fusion: FusionConfig::default(),
            scorers: Scorer::all(),
            max_concurrent_posts: 8,
            scorer_timeout: Duration::from_secs(5),
        }
    }
}

impl PipelineOptions {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            fusion: config.fusion,
            scorers: Scorer::all(),
            max_concurrent_posts: config.max_concurrent_posts,
            scorer_timeout: config.scorer_timeout(),
        }
    }
}

/// Per-post outcomes (in input order) plus their summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub results: Vec<PostOutcome>,
    pub summary: BatchSummary,
}

/// Run one scorer on the blocking pool, bounded by `timeout`.
///
/// Panics and timeouts degrade to [`ExtractorOutput::failed`]. A timed-out
/// scorer is detached, not cancelled.
async fn run_scorer(scorer: Scorer, post: Arc<Post>, timeout: Duration) -> (Modality, ExtractorOutput) {
    let modality = scorer.modality();
    let post_id = post.id.clone();
    let task = tokio::task::spawn_blocking(move || scorer.score(&post));

    let output = match tokio::time::timeout(timeout, task).await {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => {
            tracing::warn!(post_id, %modality, error = %e, "scorer task failed");
            ExtractorOutput::failed()
        }
        Err(_) => {
            tracing::warn!(
                post_id,
                %modality,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                "scorer timed out"
            );
            ExtractorOutput::failed()
        }
    };

    (modality, output)
}

/// Score, normalize, and fuse a single post.
///
/// Scorers run concurrently. Failed modalities degrade gracefully; an
/// invalid confidence fails the whole post with a [`FailedPost`].
///
/// `options.fusion` is expected to be validated; [`analyze_batch`] does so.
pub async fn analyze_post(post: &Post, options: &PipelineOptions) -> PostOutcome {
    let shared = Arc::new(post.clone());
    let outputs = join_all(
        options
            .scorers
            .iter()
            .map(|s| run_scorer(s.clone(), Arc::clone(&shared), options.scorer_timeout)),
    )
    .await;

    let mut results = Vec::with_capacity(outputs.len());
    for (modality, output) in &outputs {
        match normalize(output, *modality, &options.fusion) {
            Ok(result) => results.push(result),
            Err(e) => {
                tracing::warn!(post_id = %post.id, error = %e, "post failed normalization");
                return PostOutcome::Failed(FailedPost::new(&post.id, &e));
            }
        }
    }

    match fuse(&post.id, &results, &options.fusion) {
        Ok(fused) => PostOutcome::Fused(fused.with_timestamp(post.timestamp)),
        Err(e) => {
            tracing::warn!(post_id = %post.id, error = %e, "post failed fusion");
            PostOutcome::Failed(FailedPost::new(&post.id, &e))
        }
    }
}

/// Analyze a batch of posts and summarize the outcomes.
///
/// Posts are processed concurrently, at most `max_concurrent_posts` at a
/// time, but `results` and the trend series keep input order. A failing post
/// never affects the others.
///
/// # Errors
///
/// Returns [`ConfigError::Validation`] if `options.fusion` is invalid.
pub async fn analyze_batch(
    posts: &[Post],
    options: &PipelineOptions,
) -> Result<BatchReport, ConfigError> {
    options.fusion.validate()?;

    let max_concurrent = options.max_concurrent_posts.max(1);
    let results: Vec<PostOutcome> = stream::iter(posts)
        .map(|post| analyze_post(post, options))
        .buffered(max_concurrent)
        .collect()
        .await;

    let summary = summarize(&results);
    tracing::info!(
        total = summary.total_count,
        positive = summary.positive_count,
        negative = summary.negative_count,
        neutral = summary.neutral_count,
        failed = summary.failed_count,
        mean_score = summary.mean_score,
        "batch analyzed"
    );

    Ok(BatchReport { results, summary })
}
