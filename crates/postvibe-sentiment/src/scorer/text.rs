//! Lexicon scorer for social-media post text.

use crate::keywords::clean_text;
use crate::types::{ExtractorOutput, NativeRange};

/// Social-media word weights.
///
/// Keys are lowercase single words. Values in `(0.0, 1.0]` are positive,
/// in `[-1.0, 0.0)` are negative. The final score is clamped to `[-1.0, 1.0]`.
pub(crate) const LEXICON: &[(&str, f64)] = &[
    // Positive signals
    ("amazing", 0.5),
    ("awesome", 0.5),
    ("best", 0.5),
    ("excellent", 0.5),
    ("fantastic", 0.5),
    ("love", 0.5),
    ("loved", 0.5),
    ("perfect", 0.5),
    ("great", 0.4),
    ("happy", 0.4),
    ("recommend", 0.4),
    ("recommended", 0.4),
    ("beautiful", 0.4),
    ("fun", 0.3),
    ("good", 0.3),
    ("nice", 0.3),
    ("quality", 0.3),
    ("thanks", 0.3),
    ("like", 0.2),
    ("okay", 0.1),
    // Negative signals
    ("terrible", -0.6),
    ("worst", -0.6),
    ("awful", -0.6),
    ("hate", -0.6),
    ("scam", -0.6),
    ("broken", -0.5),
    ("broke", -0.5),
    ("disappointed", -0.5),
    ("disappointing", -0.5),
    ("useless", -0.5),
    ("bad", -0.4),
    ("fail", -0.4),
    ("failed", -0.4),
    ("refund", -0.4),
    ("angry", -0.4),
    ("sad", -0.4),
    ("poor", -0.4),
    ("problem", -0.3),
    ("slow", -0.3),
    ("meh", -0.2),
];

/// Words that flip the polarity of the next lexicon hit.
const NEGATORS: &[&str] = &[
    "not", "no", "never", "dont", "don't", "isnt", "isn't", "wasnt", "wasn't", "cant", "can't",
    "wont", "won't", "didnt", "didn't",
];

fn lexicon_weight(word: &str) -> Option<f64> {
    LEXICON
        .iter()
        .find(|(lex_word, _)| *lex_word == word)
        .map(|&(_, weight)| weight)
}

/// Score a text string using the social-media lexicon.
///
/// Splits text into lowercase words, sums matching weights, and clamps
/// the result to `[-1.0, 1.0]`. A negator directly before a lexicon word
/// flips that word's sign. Returns `0.0` for empty or unknown text.
#[must_use]
pub fn lexicon_score(text: &str) -> f64 {
    let mut score = 0.0_f64;
    let mut negate_next = false;
    for word in text.split_whitespace() {
        let w = word
            .trim_matches(|c: char| !c.is_alphabetic() && c != '\'')
            .to_lowercase();
        if NEGATORS.contains(&w.as_str()) {
            negate_next = true;
            continue;
        }
        if let Some(weight) = lexicon_weight(&w) {
            score += if negate_next { -weight } else { weight };
        }
        negate_next = false;
    }
    score.clamp(-1.0, 1.0)
}

pub(super) fn score_text(text: &str) -> ExtractorOutput {
    let cleaned = clean_text(text);
    if cleaned.is_empty() {
        return ExtractorOutput::absent();
    }
    ExtractorOutput::scored(lexicon_score(&cleaned), NativeRange::UNIT, 1.0)
}
