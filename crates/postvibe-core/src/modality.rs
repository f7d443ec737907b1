use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One content channel of a post, analyzed independently of the others.
///
/// The derived `Ord` is the canonical order used for every per-modality
/// map and for summation inside fusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Text,
    Emoji,
    Image,
    Audio,
    Video,
}

impl Modality {
    /// All modalities in canonical order.
    pub const ALL: [Modality; 5] = [
        Modality::Text,
        Modality::Emoji,
        Modality::Image,
        Modality::Audio,
        Modality::Video,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Modality::Text => "text",
            Modality::Emoji => "emoji",
            Modality::Image => "image",
            Modality::Audio => "audio",
            Modality::Video => "video",
        }
    }
}

impl std::fmt::Display for Modality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Modality {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(Modality::Text),
            "emoji" => Ok(Modality::Emoji),
            "image" => Ok(Modality::Image),
            "audio" => Ok(Modality::Audio),
            "video" => Ok(Modality::Video),
            _ => Err(ConfigError::UnknownModality(s.to_string())),
        }
    }
}
