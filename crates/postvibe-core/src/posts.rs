//! Post input records and the feature descriptors produced by upstream
//! content extractors.

use std::collections::HashSet;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One social-media post as handed to the sentiment pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub image: Option<ImageFeatures>,
    #[serde(default)]
    pub audio: Option<AudioFeatures>,
    #[serde(default)]
    pub video: Option<VideoFeatures>,
}

impl Post {
    /// A text-only post with no timestamp.
    #[must_use]
    pub fn text_only(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            timestamp: None,
            image: None,
            audio: None,
            video: None,
        }
    }
}

/// Color and brightness summary of an attached image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageFeatures {
    /// Mean HSV value channel, `0..=255`.
    pub brightness: f64,
    /// Share of pixels in warm hues, `0..=100`.
    pub warm_pct: f64,
    /// Share of pixels in cool hues, `0..=100`.
    pub cool_pct: f64,
    #[serde(default)]
    pub face_count: u32,
    /// Set when the extractor could not decode the image.
    #[serde(default)]
    pub failed: bool,
}

/// Transcript and signal features of an attached audio clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioFeatures {
    /// Speech-to-text output, if recognition succeeded.
    #[serde(default)]
    pub transcript: Option<String>,
    /// RMS volume relative to full scale, `0..=1`.
    pub volume_ratio: f64,
    pub zero_crossing_rate: f64,
    #[serde(default)]
    pub failed: bool,
}

/// Sampled key frames and motion summary of an attached video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoFeatures {
    #[serde(default)]
    pub frames: Vec<ImageFeatures>,
    /// Mean absolute frame difference between sampled frames.
    #[serde(default)]
    pub average_motion: f64,
    #[serde(default)]
    pub failed: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PostsFile {
    Bare(Vec<Post>),
    Wrapped { posts: Vec<Post> },
}

/// Load and validate posts from a JSON file.
///
/// Accepts either a bare array of posts or an object with a `posts` array.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or contains
/// empty or duplicate post ids.
pub fn load_posts(path: &Path) -> Result<Vec<Post>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::PostsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let posts = parse_posts(&content)?;
    tracing::debug!(path = %path.display(), count = posts.len(), "loaded posts");
    Ok(posts)
}

fn parse_posts(content: &str) -> Result<Vec<Post>, ConfigError> {
    let file: PostsFile = serde_json::from_str(content).map_err(ConfigError::PostsFileParse)?;
    let posts = match file {
        PostsFile::Bare(posts) | PostsFile::Wrapped { posts } => posts,
    };
    validate_posts(&posts)?;
    Ok(posts)
}

fn validate_posts(posts: &[Post]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for post in posts {
        if post.id.trim().is_empty() {
            return Err(ConfigError::Validation(
                "post id must be non-empty".to_string(),
            ));
        }
        if !seen.insert(post.id.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate post id: '{}'",
                post.id
            )));
        }
    }
    Ok(())
}
