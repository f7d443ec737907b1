//! Text cleanup plus hashtag, mention, and keyword extraction.
//!
//! These feed the word-frequency views of a report; they play no part in
//! fusion.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:https?://|www\.)\S+").expect("valid url regex"));
static MENTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@(\w+)").expect("valid mention regex"));
static HASHTAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#(\w+)").expect("valid hashtag regex"));
static NON_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("valid non-word regex"));
static SPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid space regex"));

const STOP_WORDS: &[&str] = &[
    "about", "after", "again", "all", "also", "and", "any", "are", "because", "been", "before",
    "being", "but", "can", "could", "did", "does", "doing", "for", "from", "had", "has", "have",
    "her", "here", "him", "his", "how", "its", "just", "more", "most", "nor", "not", "now", "off",
    "once", "only", "other", "our", "out", "over", "own", "same", "she", "should", "some", "such",
    "than", "that", "the", "their", "them", "then", "there", "these", "they", "this", "those",
    "through", "too", "under", "until", "very", "was", "were", "what", "when", "where", "which",
    "while", "who", "why", "will", "with", "would", "you", "your",
];

/// Strip URLs, `@mentions`, the `#` sigil, and punctuation; collapse
/// whitespace and lowercase.
#[must_use]
pub fn clean_text(text: &str) -> String {
    let text = URL_RE.replace_all(text, "");
    let text = MENTION_RE.replace_all(&text, "");
    let text = text.replace('#', "");
    let text = NON_WORD_RE.replace_all(&text, "");
    let text = SPACE_RE.replace_all(&text, " ");
    text.trim().to_lowercase()
}

/// Hashtag words without the `#`, in order of appearance.
#[must_use]
pub fn extract_hashtags(text: &str) -> Vec<String> {
    HASHTAG_RE
        .captures_iter(text)
        .map(|c| c[1].to_string())
        .collect()
}

/// Mentioned handles without the `@`, in order of appearance.
#[must_use]
pub fn extract_mentions(text: &str) -> Vec<String> {
    MENTION_RE
        .captures_iter(text)
        .map(|c| c[1].to_string())
        .collect()
}

/// Most frequent meaningful words across `texts`.
///
/// Words are taken from [`clean_text`], must be longer than two characters,
/// and must not be stop words. Sorted by descending count, then alphabetically.
#[must_use]
pub fn top_keywords<'a, I>(texts: I, n: usize) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<String, usize> = HashMap::new();
    for text in texts {
        for word in clean_text(text).split_whitespace() {
            if word.chars().count() > 2 && !STOP_WORDS.contains(&word) {
                *counts.entry(word.to_string()).or_default() += 1;
            }
        }
    }
    rank(counts, n)
}

/// Most frequent hashtags across `texts`, lowercased, ranked like
/// [`top_keywords`].
#[must_use]
pub fn top_hashtags<'a, I>(texts: I, n: usize) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<String, usize> = HashMap::new();
    for text in texts {
        for tag in extract_hashtags(text) {
            *counts.entry(tag.to_lowercase()).or_default() += 1;
        }
    }
    rank(counts, n)
}

fn rank(counts: HashMap<String, usize>, n: usize) -> Vec<(String, usize)> {
    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(n);
    ranked
}
