//! Fusion configuration: per-modality weights, label thresholds, and the
//! confidence floor.
//!
//! A [`FusionConfig`] is an immutable value handed to fusion and aggregation
//! calls. It can be built in code, loaded from YAML, or assembled from env
//! overrides by [`crate::config`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, Modality};

/// Configured weight per modality. Weights need not sum to 1; fusion divides
/// by the actual effective-weight total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModalityWeights {
    pub text: f64,
    pub emoji: f64,
    pub image: f64,
    pub audio: f64,
    pub video: f64,
}

impl Default for ModalityWeights {
    fn default() -> Self {
        Self {
            text: 0.5,
            emoji: 0.15,
            image: 0.15,
            audio: 0.1,
            video: 0.1,
        }
    }
}

impl ModalityWeights {
    #[must_use]
    pub fn get(&self, modality: Modality) -> f64 {
        match modality {
            Modality::Text => self.text,
            Modality::Emoji => self.emoji,
            Modality::Image => self.image,
            Modality::Audio => self.audio,
            Modality::Video => self.video,
        }
    }

    /// Returns a copy with one modality's weight replaced.
    #[must_use]
    pub fn with(mut self, modality: Modality, weight: f64) -> Self {
        let slot = match modality {
            Modality::Text => &mut self.text,
            Modality::Emoji => &mut self.emoji,
            Modality::Image => &mut self.image,
            Modality::Audio => &mut self.audio,
            Modality::Video => &mut self.video,
        };
        *slot = weight;
        self
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        Modality::ALL.iter().map(|m| self.get(*m)).sum()
    }
}

/// Label thresholds. Boundaries are inclusive on both sides: a score equal
/// to `positive` is positive, a score equal to `negative` is negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Thresholds {
    pub positive: f64,
    pub negative: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            positive: 0.05,
            negative: -0.05,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FusionConfig {
    pub weights: ModalityWeights,
    pub thresholds: Thresholds,
    /// Results below this confidence are still fused; the floor only marks
    /// them as low-confidence in logs.
    pub confidence_floor: f64,
}

impl FusionConfig {
    /// Check every invariant of the configuration surface.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] describing the first violated rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for modality in Modality::ALL {
            let w = self.weights.get(modality);
            if !w.is_finite() || w < 0.0 {
                return Err(ConfigError::Validation(format!(
                    "weight for {modality} must be a non-negative number, got {w}"
                )));
            }
        }

        let total = self.weights.total();
        if !total.is_finite() || total <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "modality weights must sum to a positive finite number, got {total}"
            )));
        }

        let Thresholds { positive, negative } = self.thresholds;
        for (name, value) in [("positive", positive), ("negative", negative)] {
            if !value.is_finite() || !(-1.0..=1.0).contains(&value) {
                return Err(ConfigError::Validation(format!(
                    "{name} threshold must lie in [-1, 1], got {value}"
                )));
            }
        }
        if negative >= positive {
            return Err(ConfigError::Validation(format!(
                "negative threshold ({negative}) must be below positive threshold ({positive})"
            )));
        }

        let floor = self.confidence_floor;
        if !floor.is_finite() || !(0.0..=1.0).contains(&floor) {
            return Err(ConfigError::Validation(format!(
                "confidence floor must lie in [0, 1], got {floor}"
            )));
        }

        Ok(())
    }
}

/// Load and validate a fusion configuration from a YAML file.
///
/// Missing fields fall back to their defaults, so a file containing only
/// `weights: { text: 0.7 }` is valid.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_fusion_config(path: &Path) -> Result<FusionConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FusionFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let config = parse_fusion_config(&content)?;
    config.validate()?;

    Ok(config)
}

fn parse_fusion_config(content: &str) -> Result<FusionConfig, ConfigError> {
    // An empty document deserializes to unit; treat it as "all defaults".
    if content.trim().is_empty() {
        return Ok(FusionConfig::default());
    }
    serde_yaml::from_str(content).map_err(ConfigError::FusionFileParse)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        FusionConfig::default().validate().unwrap();
    }

    #[test]
    fn weights_whose_sum_overflows_are_rejected() {
        let config = FusionConfig {
            weights: ModalityWeights::default()
                .with(Modality::Text, 1e308)
                .with(Modality::Emoji, 1e308),
            ..FusionConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn default_weights_favor_text() {
        let w = ModalityWeights::default();
        assert_eq!(w.get(Modality::Text), 0.5);
        assert_eq!(w.get(Modality::Emoji), 0.15);
        assert_eq!(w.get(Modality::Image), 0.15);
        assert_eq!(w.get(Modality::Audio), 0.1);
        assert_eq!(w.get(Modality::Video), 0.1);
    }

    #[test]
    fn with_replaces_a_single_weight() {
        let w = ModalityWeights::default().with(Modality::Audio, 0.9);
        assert_eq!(w.audio, 0.9);
        assert_eq!(w.text, 0.5);
    }

    #[test]
    fn negative_weight_is_rejected() {
        let cfg = FusionConfig {
            weights: ModalityWeights::default().with(Modality::Image, -0.1),
            ..FusionConfig::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref m) if m.contains("image")));
    }

    #[test]
    fn nan_weight_is_rejected() {
        let cfg = FusionConfig {
            weights: ModalityWeights::default().with(Modality::Text, f64::NAN),
            ..FusionConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn all_zero_weights_are_rejected() {
        let cfg = FusionConfig {
            weights: ModalityWeights {
                text: 0.0,
                emoji: 0.0,
                image: 0.0,
                audio: 0.0,
                video: 0.0,
            },
            ..FusionConfig::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref m) if m.contains("positive number")));
    }

    #[test]
    fn inverted_thresholds_are_rejected() {
        let cfg = FusionConfig {
            thresholds: Thresholds {
                positive: -0.1,
                negative: 0.1,
            },
            ..FusionConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn equal_thresholds_are_rejected() {
        let cfg = FusionConfig {
            thresholds: Thresholds {
                positive: 0.0,
                negative: 0.0,
            },
            ..FusionConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn threshold_outside_unit_range_is_rejected() {
        let cfg = FusionConfig {
            thresholds: Thresholds {
                positive: 1.5,
                negative: -0.05,
            },
            ..FusionConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn confidence_floor_above_one_is_rejected() {
        let cfg = FusionConfig {
            confidence_floor: 1.2,
            ..FusionConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let cfg = parse_fusion_config("weights:\n  text: 0.7\nthresholds:\n  positive: 0.2\n")
            .unwrap();
        assert_eq!(cfg.weights.text, 0.7);
        assert_eq!(cfg.weights.emoji, 0.15);
        assert_eq!(cfg.thresholds.positive, 0.2);
        assert_eq!(cfg.thresholds.negative, -0.05);
        assert_eq!(cfg.confidence_floor, 0.0);
    }

    #[test]
    fn empty_yaml_is_default() {
        assert_eq!(parse_fusion_config("  \n").unwrap(), FusionConfig::default());
    }

    #[test]
    fn unknown_yaml_field_is_rejected() {
        let err = parse_fusion_config("weights:\n  smell: 0.3\n").unwrap_err();
        assert!(matches!(err, ConfigError::FusionFileParse(_)));
    }

    #[test]
    fn load_fusion_config_reports_missing_file() {
        let err = load_fusion_config(Path::new("/nonexistent/postvibe/fusion.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::FusionFileIo { .. }));
    }

    #[test]
    fn load_fusion_config_validates_file_contents() {
        let path = std::env::temp_dir().join(format!(
            "postvibe-fusion-invalid-{}.yaml",
            std::process::id()
        ));
        std::fs::write(&path, "thresholds:\n  positive: -0.5\n  negative: 0.5\n").unwrap();
        let result = load_fusion_config(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }
}
