//! `postvibe analyze`: score a posts file and report on the batch.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, Utc};
use postvibe_core::{load_fusion_config, load_posts, AppConfig, Post};
use postvibe_sentiment::keywords::{top_hashtags, top_keywords};
use postvibe_sentiment::{analyze_batch, BatchReport, BatchSummary, PipelineOptions, PostOutcome};
use serde::Serialize;

#[derive(Debug)]
pub(crate) struct AnalyzeArgs {
    pub posts: Option<PathBuf>,
    pub fusion_config: Option<PathBuf>,
    pub json: bool,
    pub top: usize,
}

#[derive(Debug, Serialize)]
pub(crate) struct TermCount {
    pub term: String,
    pub count: usize,
}

/// Everything `--json` prints.
#[derive(Debug, Serialize)]
pub(crate) struct JsonReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub results: &'a [PostOutcome],
    pub summary: &'a BatchSummary,
    pub insights: Vec<String>,
    pub top_keywords: Vec<TermCount>,
    pub top_hashtags: Vec<TermCount>,
}

pub(crate) async fn run_analyze(config: &AppConfig, args: AnalyzeArgs) -> anyhow::Result<()> {
    let posts_path = args.posts.unwrap_or_else(|| config.posts_path.clone());
    let posts = load_posts(&posts_path)
        .with_context(|| format!("failed to load posts from {}", posts_path.display()))?;

    let mut options = PipelineOptions::from_app_config(config);
    if let Some(path) = args.fusion_config {
        options.fusion = load_fusion_config(&path)?;
        tracing::info!(path = %path.display(), "using fusion config from command line");
    }

    tracing::info!(
        posts = posts.len(),
        path = %posts_path.display(),
        max_concurrent = options.max_concurrent_posts,
        "analyzing posts"
    );
    let report = analyze_batch(&posts, &options).await?;

    let keywords = term_counts(top_keywords(post_texts(&posts), args.top));
    let hashtags = term_counts(top_hashtags(post_texts(&posts), args.top));

    if args.json {
        let doc = JsonReport {
            generated_at: Utc::now(),
            results: &report.results,
            summary: &report.summary,
            insights: report.summary.insights(),
            top_keywords: keywords,
            top_hashtags: hashtags,
        };
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        print!("{}", render_text(&report, &keywords, &hashtags));
    }

    Ok(())
}

fn post_texts(posts: &[Post]) -> impl Iterator<Item = &str> {
    posts.iter().map(|p| p.text.as_str())
}

fn term_counts(ranked: Vec<(String, usize)>) -> Vec<TermCount> {
    ranked
        .into_iter()
        .map(|(term, count)| TermCount { term, count })
        .collect()
}

/// Human-readable report: one line per post, then the batch summary.
pub(crate) fn render_text(
    report: &BatchReport,
    keywords: &[TermCount],
    hashtags: &[TermCount],
) -> String {
    let mut out = String::new();

    for outcome in &report.results {
        match outcome {
            PostOutcome::Fused(r) => {
                let _ = writeln!(
                    out,
                    "{:<10} {:>7.3}  {}",
                    r.label.to_string(),
                    r.combined_score,
                    r.post_id
                );
            }
            PostOutcome::Failed(f) => {
                let _ = writeln!(out, "{:<10} {:>7}  {} ({})", "failed", "-", f.post_id, f.error);
            }
        }
    }

    let s = &report.summary;
    let _ = writeln!(out);
    let _ = writeln!(out, "posts scored:  {}", s.total_count);
    let _ = writeln!(out, "posts failed:  {}", s.failed_count);
    let _ = writeln!(
        out,
        "positive:      {} ({:.1}%)",
        s.positive_count, s.positive_pct
    );
    let _ = writeln!(
        out,
        "negative:      {} ({:.1}%)",
        s.negative_count, s.negative_pct
    );
    let _ = writeln!(
        out,
        "neutral:       {} ({:.1}%)",
        s.neutral_count, s.neutral_pct
    );
    let _ = writeln!(
        out,
        "mean score:    {:.3} (std dev {:.3})",
        s.mean_score, s.score_std_dev
    );
    if let (Some(best), Some(worst)) = (&s.most_positive, &s.most_negative) {
        let _ = writeln!(out, "most positive: {best}");
        let _ = writeln!(out, "most negative: {worst}");
    }

    let _ = writeln!(out);
    for (modality, stat) in &s.modality_means {
        if stat.count > 0 {
            let _ = writeln!(
                out,
                "{:<8} mean {:>7.3} over {} posts",
                modality.as_str(),
                stat.mean_score,
                stat.count
            );
        }
    }

    if !keywords.is_empty() {
        let _ = writeln!(out, "keywords: {}", join_terms(keywords, ""));
    }
    if !hashtags.is_empty() {
        let _ = writeln!(out, "hashtags: {}", join_terms(hashtags, "#"));
    }

    let _ = writeln!(out);
    for insight in s.insights() {
        let _ = writeln!(out, "- {insight}");
    }

    out
}

fn join_terms(terms: &[TermCount], prefix: &str) -> String {
    terms
        .iter()
        .map(|t| format!("{prefix}{} ({})", t.term, t.count))
        .collect::<Vec<_>>()
        .join(", ")
}
