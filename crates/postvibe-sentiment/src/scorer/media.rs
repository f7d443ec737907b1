//! Image, audio, and video scorers.
//!
//! The heavy lifting (color clustering, face detection, speech recognition,
//! frame sampling) happens upstream; these functions only turn the extracted
//! features into a score on a declared native range.

use postvibe_core::{AudioFeatures, ImageFeatures, VideoFeatures};

use super::text::lexicon_score;
use crate::keywords::clean_text;
use crate::types::{ExtractorOutput, NativeRange};

/// Image mood is expressed on the brightness scale.
const IMAGE_RANGE: NativeRange = NativeRange::new(0.0, 255.0);

/// Brightness shift per percentage point of warm-over-cool balance, so a
/// fully warm image moves the mood by half the scale.
const COLOR_SHIFT_PER_PCT: f64 = 1.275;
const FACE_CONFIDENCE_BONUS: f64 = 0.1;

const TRANSCRIPT_CONFIDENCE: f64 = 0.8;
const TONE_CONFIDENCE: f64 = 0.4;

const HIGH_MOTION: f64 = 20.0;
const LOW_MOTION: f64 = 8.0;

fn image_mood(features: &ImageFeatures) -> f64 {
    features.brightness + (features.warm_pct - features.cool_pct) * COLOR_SHIFT_PER_PCT
}

fn image_confidence(features: &ImageFeatures) -> f64 {
    let coverage = ((features.warm_pct + features.cool_pct) / 100.0).clamp(0.0, 1.0);
    let faces = f64::from(features.face_count) * FACE_CONFIDENCE_BONUS;
    (coverage + faces).min(1.0)
}

pub(super) fn score_image(features: &ImageFeatures) -> ExtractorOutput {
    if features.failed {
        return ExtractorOutput::failed();
    }
    ExtractorOutput::scored(image_mood(features), IMAGE_RANGE, image_confidence(features))
}

/// Tone estimate from signal energy, on `[-1, 1]`.
fn tone_score(features: &AudioFeatures) -> f64 {
    let zcr = features.zero_crossing_rate;
    let volume = features.volume_ratio;
    if zcr > 0.1 && volume > 0.2 {
        // excited / energetic
        0.5
    } else if zcr < 0.05 && volume < 0.1 {
        // calm / subdued
        0.0
    } else if volume > 0.3 {
        // assertive / angry
        -0.5
    } else {
        0.0
    }
}

pub(super) fn score_audio(features: &AudioFeatures) -> ExtractorOutput {
    if features.failed {
        return ExtractorOutput::failed();
    }

    if let Some(transcript) = features.transcript.as_deref() {
        let cleaned = clean_text(transcript);
        if !cleaned.is_empty() {
            return ExtractorOutput::scored(
                lexicon_score(&cleaned),
                NativeRange::UNIT,
                TRANSCRIPT_CONFIDENCE,
            );
        }
    }

    if !features.volume_ratio.is_finite() || !features.zero_crossing_rate.is_finite() {
        return ExtractorOutput::failed();
    }
    ExtractorOutput::scored(tone_score(features), NativeRange::UNIT, TONE_CONFIDENCE)
}

#[allow(clippy::cast_precision_loss)]
pub(super) fn score_video(features: &VideoFeatures) -> ExtractorOutput {
    if features.failed {
        return ExtractorOutput::failed();
    }
    if features.frames.is_empty() {
        return ExtractorOutput::absent();
    }

    let n = features.frames.len() as f64;
    let mut mood_sum = 0.0;
    let mut confidence_sum = 0.0;
    for frame in &features.frames {
        if frame.failed {
            return ExtractorOutput::failed();
        }
        let span = IMAGE_RANGE.max - IMAGE_RANGE.min;
        let unit = (2.0 * (image_mood(frame) - IMAGE_RANGE.min) / span - 1.0).clamp(-1.0, 1.0);
        mood_sum += unit;
        confidence_sum += image_confidence(frame);
    }

    let energy = if features.average_motion > HIGH_MOTION {
        1.2
    } else if features.average_motion < LOW_MOTION {
        0.8
    } else {
        1.0
    };

    ExtractorOutput::scored(
        mood_sum / n * energy,
        NativeRange::UNIT,
        (confidence_sum / n).clamp(0.0, 1.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn image(brightness: f64, warm_pct: f64, cool_pct: f64) -> ImageFeatures {
        ImageFeatures {
            brightness,
            warm_pct,
            cool_pct,
            face_count: 0,
            failed: false,
        }
    }

    fn audio(transcript: Option<&str>, volume_ratio: f64, zero_crossing_rate: f64) -> AudioFeatures {
        AudioFeatures {
            transcript: transcript.map(str::to_string),
            volume_ratio,
            zero_crossing_rate,
            failed: false,
        }
    }

    #[test]
    fn bright_warm_image_scores_high_on_native_range() {
        let out = score_image(&image(180.0, 60.0, 10.0));
        assert!(out.present);
        assert_eq!(out.native_range, IMAGE_RANGE);
        assert!(out.native_score > 127.5);
        assert!((out.confidence - 0.7).abs() < 1e-12);
    }

    #[test]
    fn dark_cool_image_scores_low() {
        let out = score_image(&image(50.0, 5.0, 70.0));
        assert!(out.native_score < 127.5);
    }

    #[test]
    fn faces_raise_image_confidence_up_to_one() {
        let mut features = image(120.0, 30.0, 30.0);
        features.face_count = 2;
        assert!((score_image(&features).confidence - 0.8).abs() < 1e-12);
        features.face_count = 9;
        assert_eq!(score_image(&features).confidence, 1.0);
    }

    #[test]
    fn failed_image_reports_extraction_failure() {
        let mut features = image(120.0, 30.0, 30.0);
        features.failed = true;
        assert_eq!(score_image(&features).error, Some(ErrorKind::ExtractionFailed));
    }

    #[test]
    fn transcript_takes_precedence_over_tone() {
        let out = score_audio(&audio(Some("this is terrible"), 0.25, 0.2));
        assert!(out.native_score < 0.0);
        assert_eq!(out.confidence, TRANSCRIPT_CONFIDENCE);
    }

    #[test]
    fn blank_transcript_falls_back_to_tone() {
        let out = score_audio(&audio(Some("   "), 0.25, 0.2));
        assert_eq!(out.native_score, 0.5);
        assert_eq!(out.confidence, TONE_CONFIDENCE);
    }

    #[test]
    fn tone_bands() {
        assert_eq!(tone_score(&audio(None, 0.25, 0.2)), 0.5);
        assert_eq!(tone_score(&audio(None, 0.05, 0.01)), 0.0);
        assert_eq!(tone_score(&audio(None, 0.4, 0.05)), -0.5);
        assert_eq!(tone_score(&audio(None, 0.15, 0.07)), 0.0);
    }

    #[test]
    fn non_finite_audio_features_fail() {
        let out = score_audio(&audio(None, f64::NAN, 0.1));
        assert_eq!(out.error, Some(ErrorKind::ExtractionFailed));
    }

    #[test]
    fn video_without_frames_is_absent() {
        let out = score_video(&VideoFeatures {
            frames: vec![],
            average_motion: 30.0,
            failed: false,
        });
        assert!(!out.present);
        assert!(out.error.is_none());
    }

    #[test]
    fn video_motion_scales_frame_mood() {
        let frames = vec![image(255.0, 0.0, 0.0), image(127.5, 50.0, 50.0)];
        let calm = score_video(&VideoFeatures {
            frames: frames.clone(),
            average_motion: 2.0,
            failed: false,
        });
        let busy = score_video(&VideoFeatures {
            frames,
            average_motion: 25.0,
            failed: false,
        });
        // frame moods: 1.0 and 0.0, mean 0.5
        assert!((calm.native_score - 0.4).abs() < 1e-12);
        assert!((busy.native_score - 0.6).abs() < 1e-12);
        assert!((busy.confidence - 0.5).abs() < 1e-12);
    }

    #[test]
    fn failed_frame_fails_video() {
        let mut frame = image(100.0, 10.0, 10.0);
        frame.failed = true;
        let out = score_video(&VideoFeatures {
            frames: vec![frame],
            average_motion: 10.0,
            failed: false,
        });
        assert_eq!(out.error, Some(ErrorKind::ExtractionFailed));
    }
}
