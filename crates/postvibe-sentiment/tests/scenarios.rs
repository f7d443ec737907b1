//! End-to-end checks of normalization, fusion, and batch aggregation.

use std::collections::BTreeMap;

use postvibe_core::{AudioFeatures, FusionConfig, ImageFeatures, Modality, Post, VideoFeatures};
use postvibe_sentiment::{
    analyze_batch, fuse, normalize, summarize, ErrorKind, ExtractorOutput, FailedPost,
    ModalityResult, NativeRange, PipelineOptions, PostOutcome, Scorer, SentimentError,
    SentimentLabel,
};

fn approx(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() < eps
}

#[test]
fn single_text_modality_keeps_its_score() {
    let config = FusionConfig::default();
    let text = normalize(
        &ExtractorOutput::scored(0.767, NativeRange::UNIT, 1.0),
        Modality::Text,
        &config,
    )
    .unwrap();

    let fused = fuse("a", &[text], &config).unwrap();
    assert!(approx(fused.combined_score, 0.767, 1e-9));
    assert_eq!(fused.label, SentimentLabel::Positive);
}

#[test]
fn low_confidence_image_is_outweighed_by_text() {
    let config = FusionConfig::default();
    let results = [
        ModalityResult::new(Modality::Text, -0.6, 1.0),
        ModalityResult::new(Modality::Image, 0.4, 0.5),
    ];

    let fused = fuse("b", &results, &config).unwrap();
    assert!(approx(fused.contributing_weight_total, 0.575, 1e-12));
    assert!(approx(fused.combined_score, -0.469, 1e-3));
    assert_eq!(fused.label, SentimentLabel::Negative);
}

#[test]
fn batch_percentages_round_to_one_decimal() {
    let config = FusionConfig::default();
    let outcomes: Vec<PostOutcome> = [0.7, 0.3, -0.5]
        .iter()
        .enumerate()
        .map(|(i, score)| {
            let r = ModalityResult::new(Modality::Text, *score, 1.0);
            PostOutcome::Fused(fuse(&i.to_string(), &[r], &config).unwrap())
        })
        .collect();

    let summary = summarize(&outcomes);
    assert_eq!(summary.positive_pct, 66.7);
    assert_eq!(summary.negative_pct, 33.3);
    assert_eq!(summary.neutral_pct, 0.0);
}

#[test]
fn empty_batch_is_defined() {
    let summary = summarize(&[]);
    assert_eq!(summary.total_count, 0);
    assert_eq!(summary.positive_pct, 0.0);
    assert_eq!(summary.negative_pct, 0.0);
    assert_eq!(summary.neutral_pct, 0.0);
    assert_eq!(summary.mean_score, 0.0);
    assert!(!summary.mean_score.is_nan());
}

#[test]
fn invalid_confidence_is_isolated_to_its_post() {
    let config = FusionConfig::default();
    let good = fuse("ok", &[ModalityResult::new(Modality::Text, 0.5, 1.0)], &config).unwrap();
    let err = fuse(
        "bad",
        &[
            ModalityResult::new(Modality::Text, 0.5, 1.0),
            ModalityResult::new(Modality::Audio, 0.1, 1.4),
        ],
        &config,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        SentimentError::InvalidConfidence { modality: Modality::Audio, .. }
    ));

    let summary = summarize(&[
        PostOutcome::Fused(good),
        PostOutcome::Failed(FailedPost::new("bad", &err)),
    ]);
    assert_eq!(summary.total_count, 1);
    assert_eq!(summary.positive_pct, 100.0);
    assert_eq!(summary.failed_count, 1);
    assert_eq!(summary.failed_post_ids, vec!["bad"]);
}

#[test]
fn summarize_twice_is_identical() {
    let config = FusionConfig::default();
    let outcomes: Vec<PostOutcome> = [0.91, -0.04, 0.05, -0.33, 0.0]
        .iter()
        .enumerate()
        .map(|(i, s)| {
            PostOutcome::Fused(
                fuse(
                    &i.to_string(),
                    &[
                        ModalityResult::new(Modality::Text, *s, 0.8),
                        ModalityResult::new(Modality::Emoji, -s / 2.0, 0.3),
                    ],
                    &config,
                )
                .unwrap(),
            )
        })
        .collect();
    assert_eq!(summarize(&outcomes), summarize(&outcomes));
}

fn rich_post(id: &str) -> Post {
    Post {
        id: id.to_string(),
        text: "Best purchase ever! 🔥💯 Highly recommend! #best".to_string(),
        timestamp: None,
        image: Some(ImageFeatures {
            brightness: 190.0,
            warm_pct: 55.0,
            cool_pct: 20.0,
            face_count: 1,
            failed: false,
        }),
        audio: Some(AudioFeatures {
            transcript: Some("I love it".to_string()),
            volume_ratio: 0.25,
            zero_crossing_rate: 0.12,
            failed: false,
        }),
        video: Some(VideoFeatures {
            frames: vec![ImageFeatures {
                brightness: 160.0,
                warm_pct: 40.0,
                cool_pct: 30.0,
                face_count: 0,
                failed: false,
            }],
            average_motion: 22.0,
            failed: false,
        }),
    }
}

#[tokio::test]
async fn every_modality_contributes_for_a_rich_post() {
    let report = analyze_batch(&[rich_post("rich")], &PipelineOptions::default())
        .await
        .unwrap();
    let fused = report.results[0].fused().expect("rich post should fuse");
    assert_eq!(fused.label, SentimentLabel::Positive);
    assert!(fused.per_modality.values().all(ModalityResult::is_usable));
    assert!((-1.0..=1.0).contains(&fused.combined_score));
    assert_eq!(report.summary.modality_means[&Modality::Video].count, 1);
}

#[tokio::test]
async fn broken_scorer_fails_posts_without_stopping_the_batch() {
    let options = PipelineOptions {
        scorers: vec![
            Scorer::Text,
            Scorer::Precomputed {
                modality: Modality::Emoji,
                output: ExtractorOutput::scored(0.5, NativeRange::UNIT, 1.4),
            },
        ],
        ..PipelineOptions::default()
    };
    let posts = [Post::text_only("1", "great"), Post::text_only("2", "awful")];
    let report = analyze_batch(&posts, &options).await.unwrap();

    assert_eq!(report.summary.failed_count, 2);
    assert_eq!(report.summary.total_count, 0);
    for outcome in &report.results {
        match outcome {
            PostOutcome::Failed(f) => assert_eq!(f.error, ErrorKind::InvalidConfidence),
            PostOutcome::Fused(r) => panic!("expected failure, got {r:?}"),
        }
    }
}

#[tokio::test]
async fn failing_post_is_isolated_within_a_real_batch() {
    let options = PipelineOptions {
        scorers: vec![
            Scorer::Text,
            Scorer::External {
                modality: Modality::Audio,
                outputs: BTreeMap::from([(
                    "2".to_string(),
                    ExtractorOutput::scored(0.1, NativeRange::UNIT, -0.2),
                )]),
            },
        ],
        ..PipelineOptions::default()
    };
    let posts = [
        Post::text_only("1", "amazing"),
        Post::text_only("2", "amazing"),
        Post::text_only("3", "awful"),
    ];
    let report = analyze_batch(&posts, &options).await.unwrap();

    let ids: Vec<&str> = report.results.iter().map(PostOutcome::post_id).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
    assert_eq!(report.summary.total_count, 2);
    assert_eq!(report.summary.failed_count, 1);
    assert_eq!(report.summary.failed_post_ids, vec!["2"]);
    assert_eq!(report.summary.positive_count, 1);
    assert_eq!(report.summary.negative_count, 1);
    let trend: Vec<&str> = report.summary.trend.iter().map(|p| p.post_id.as_str()).collect();
    assert_eq!(trend, vec!["1", "3"]);
}

#[tokio::test]
async fn report_round_trips_through_json() {
    let posts = [rich_post("a"), Post::text_only("b", "meh")];
    let report = analyze_batch(&posts, &PipelineOptions::default())
        .await
        .unwrap();
    let json = serde_json::to_string(&report).unwrap();
    let back: postvibe_sentiment::BatchReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back.summary.total_count, 2);
    assert_eq!(back.results.len(), 2);
    assert_eq!(back.results[1].post_id(), "b");
}

#[tokio::test]
async fn bundled_sample_posts_analyze_cleanly() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data/posts.json");
    let posts = postvibe_core::load_posts(&path).unwrap();
    let report = analyze_batch(&posts, &PipelineOptions::default())
        .await
        .unwrap();

    assert_eq!(report.summary.total_count, 5);
    assert_eq!(report.summary.failed_count, 0);
    assert!(report.summary.most_positive.is_some());
    assert_eq!(report.results[1].fused().unwrap().label, SentimentLabel::Negative);
    assert_eq!(report.summary.modality_means[&Modality::Audio].count, 1);
}
