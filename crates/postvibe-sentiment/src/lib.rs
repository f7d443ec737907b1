//! Multi-modal sentiment engine for postvibe.
//!
//! Scores each post's text, emoji, image, audio, and video content
//! independently, rescales every score into `[-1.0, 1.0]`, fuses them into a
//! single weighted verdict per post, and rolls post verdicts up into batch
//! statistics. Every step after scoring is a pure function of its inputs.

pub mod aggregate;
pub mod error;
pub mod fusion;
pub mod keywords;
pub mod normalize;
pub mod pipeline;
pub mod scorer;
pub mod types;

pub use aggregate::{summarize, BatchSummary, FailedPost, ModalityStat, PostOutcome, TrendPoint};
pub use error::{ErrorKind, SentimentError};
pub use fusion::fuse;
pub use normalize::normalize;
pub use pipeline::{analyze_batch, analyze_post, BatchReport, PipelineOptions};
pub use scorer::{lexicon_score, Scorer};
pub use types::{ExtractorOutput, FusedResult, ModalityResult, NativeRange, SentimentLabel};
