//! Modality scorers.
//!
//! Each variant of [`Scorer`] maps one content channel of a [`Post`] to an
//! [`ExtractorOutput`] on its own native scale. Scorers never see each
//! other's output and hold no shared state, so the pipeline may run them in
//! parallel.

mod emoji;
mod media;
mod text;

pub use emoji::{emoji_counts, EmojiCounts};
pub use text::lexicon_score;

use std::collections::BTreeMap;

use postvibe_core::{Modality, Post};

use crate::types::ExtractorOutput;

#[derive(Debug, Clone, PartialEq)]
pub enum Scorer {
    /// Lexicon scoring of the cleaned post text.
    Text,
    /// Emoji and text-emoticon polarity.
    Emoji,
    /// Brightness and color-temperature mood of the attached image.
    Image,
    /// Transcript lexicon score, falling back to tone features.
    Audio,
    /// Key-frame mood adjusted by motion energy.
    Video,
    /// Replays an output produced by an external extractor.
    Precomputed {
        modality: Modality,
        output: ExtractorOutput,
    },
    /// Per-post outputs from an external extractor, keyed by post id. Posts
    /// without an entry are absent for this modality.
    External {
        modality: Modality,
        outputs: BTreeMap<String, ExtractorOutput>,
    },
}

impl Scorer {
    /// The five built-in scorers in canonical modality order.
    #[must_use]
    pub fn all() -> Vec<Scorer> {
        Modality::ALL.iter().map(|m| Scorer::for_modality(*m)).collect()
    }

    #[must_use]
    pub fn for_modality(modality: Modality) -> Scorer {
        match modality {
            Modality::Text => Scorer::Text,
            Modality::Emoji => Scorer::Emoji,
            Modality::Image => Scorer::Image,
            Modality::Audio => Scorer::Audio,
            Modality::Video => Scorer::Video,
        }
    }

    #[must_use]
    pub fn modality(&self) -> Modality {
        match self {
            Scorer::Text => Modality::Text,
            Scorer::Emoji => Modality::Emoji,
            Scorer::Image => Modality::Image,
            Scorer::Audio => Modality::Audio,
            Scorer::Video => Modality::Video,
            Scorer::Precomputed { modality, .. } | Scorer::External { modality, .. } => *modality,
        }
    }

    #[must_use]
    pub fn score(&self, post: &Post) -> ExtractorOutput {
        match self {
            Scorer::Text => text::score_text(&post.text),
            Scorer::Emoji => emoji::score_emoji(&post.text),
            Scorer::Image => post
                .image
                .as_ref()
                .map_or_else(ExtractorOutput::absent, media::score_image),
            Scorer::Audio => post
                .audio
                .as_ref()
                .map_or_else(ExtractorOutput::absent, media::score_audio),
            Scorer::Video => post
                .video
                .as_ref()
                .map_or_else(ExtractorOutput::absent, media::score_video),
            Scorer::Precomputed { output, .. } => output.clone(),
            Scorer::External { outputs, .. } => outputs
                .get(&post.id)
                .cloned()
                .unwrap_or_else(ExtractorOutput::absent),
        }
    }
}
