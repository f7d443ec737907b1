//! Emoji and text-emoticon polarity scorer.

use crate::types::{ExtractorOutput, NativeRange};

const POSITIVE_EMOJI: &[char] = &[
    '😀', '😃', '😄', '😁', '😆', '😅', '🤣', '😂', '🙂', '🙃', '😉', '😊', '😇', '🥰', '😍', '🤩',
    '😘', '😗', '😚', '😙', '🥲', '😋', '😛', '😜', '🤪', '😝', '👍', '👏', '🎉', '🎊', '❤', '💕',
    '💖', '💗', '💓', '💝', '💘', '🌟', '⭐', '✨', '🔥', '💪', '🤗', '🥳', '😎', '🤟', '🙌', '👌',
    '💯',
];

const NEGATIVE_EMOJI: &[char] = &[
    '😞', '😔', '😟', '😕', '🙁', '☹', '😣', '😖', '😫', '😩', '🥺', '😢', '😭', '😤', '😠', '😡',
    '🤬', '😈', '👿', '💀', '☠', '💔', '😰', '😥', '😓', '🤮', '🤢', '😱', '😨', '👎', '😒', '😑',
    '😬', '🤥', '😪', '🥱', '😵', '🤕', '🤒', '💩',
];

const POSITIVE_EMOTICONS: &[&str] = &[
    ":)", ":-)", ":D", ":-D", ";)", ";-)", ":P", ":-P", "XD", "<3", ":*", "^^", "=)", "=D", "B)",
];

const NEGATIVE_EMOTICONS: &[&str] = &[
    ":(", ":-(", ":'(", "D:", ">:(", ":/", ":-/", ":|", ":-|", ">.<", "T_T",
];

const NEUTRAL_EMOTICONS: &[&str] = &[":-O", ":O", "O_o", "o_O", "._."];

/// Counts of polar and neutral symbols found in a post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmojiCounts {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl EmojiCounts {
    #[must_use]
    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }
}

/// Pictographic code points. Variation selectors and joiners are not
/// counted on their own.
fn is_emoji(c: char) -> bool {
    matches!(
        u32::from(c),
        0x1F000..=0x1FAFF | 0x2600..=0x27BF | 0x2B50 | 0x2B55
    )
}

/// Count emoji and whitespace-delimited text emoticons.
///
/// Emoticons are matched as whole tokens so URLs like `http://` do not read
/// as `:/`.
#[must_use]
pub fn emoji_counts(text: &str) -> EmojiCounts {
    let mut counts = EmojiCounts::default();

    for c in text.chars() {
        if POSITIVE_EMOJI.contains(&c) {
            counts.positive += 1;
        } else if NEGATIVE_EMOJI.contains(&c) {
            counts.negative += 1;
        } else if is_emoji(c) {
            counts.neutral += 1;
        }
    }

    for token in text.split_whitespace() {
        if POSITIVE_EMOTICONS.contains(&token) {
            counts.positive += 1;
        } else if NEGATIVE_EMOTICONS.contains(&token) {
            counts.negative += 1;
        } else if NEUTRAL_EMOTICONS.contains(&token) {
            counts.neutral += 1;
        }
    }

    counts
}

#[allow(clippy::cast_precision_loss)]
pub(super) fn score_emoji(text: &str) -> ExtractorOutput {
    let counts = emoji_counts(text);
    let total = counts.total();
    if total == 0 {
        return ExtractorOutput::absent();
    }

    let total = total as f64;
    let pos = counts.positive as f64;
    let neg = counts.negative as f64;
    ExtractorOutput::scored((pos - neg) / total, NativeRange::UNIT, (pos + neg) / total)
}
