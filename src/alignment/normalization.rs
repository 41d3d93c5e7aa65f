use std::sync::OnceLock;

use regex::Regex;

/// Punctuation and prolongation marks dropped from Japanese text before
/// character matching. Whitespace (including U+3000) is dropped separately.
const JAPANESE_NOISE: &[char] = &[
    '。', '、', '.', ',', '．', '，', '!', '?', '！', '？', '「', '」', '（', '）', '(', ')',
    '・', '～', '〜', '…', 'ー',
];

fn english_strip_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // ASCII word characters only; everything else except whitespace and
    // apostrophes is removed.
    PATTERN.get_or_init(|| Regex::new(r"[^A-Za-z0-9_\s']").expect("static regex is valid"))
}

/// Lowercase, strip punctuation (keeping apostrophes) and split on whitespace.
pub fn english_words(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    english_strip_pattern()
        .replace_all(&lowered, "")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Flat character stream with whitespace, punctuation, brackets and
/// prolongation marks removed.
pub fn japanese_chars(text: &str) -> Vec<char> {
    text.chars()
        .filter(|c| !c.is_whitespace() && !JAPANESE_NOISE.contains(c))
        .collect()
}
