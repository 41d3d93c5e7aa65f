use crate::alignment::normalization::japanese_chars;
use crate::types::MatchResult;

/// Character-level comparison for Japanese.
///
/// A single forward scan: each target character is searched for in the
/// spoken text starting at the cursor left by the previous match. Matched
/// target characters therefore form a subsequence of the spoken text in the
/// same relative order, so shared particles in a different order do not
/// inflate the score.
pub fn compare_ja(target: &str, spoken: &str) -> MatchResult {
    let target_chars = japanese_chars(target);
    let spoken_chars = japanese_chars(spoken);

    let mut cursor = 0usize;
    let mut matched = Vec::new();

    for (ti, tc) in target_chars.iter().enumerate() {
        if let Some(offset) = spoken_chars[cursor..].iter().position(|sc| sc == tc) {
            matched.push(ti);
            cursor += offset + 1;
        }
    }

    MatchResult::from_matches(matched, target_chars.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_text_scores_full() {
        let result = compare_ja("おはよう", "おはよう");
        assert_eq!(result.pct, 100);
        assert_eq!(result.matched_indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn punctuation_is_ignored() {
        let result = compare_ja("こんにちは。", "こんにちは");
        assert_eq!(result.pct, 100);
        assert_eq!(result.matched_indices, vec![0, 1, 2, 3, 4]);

        let result = compare_ja("はい、そうです！", "はい そうです");
        assert_eq!(result.pct, 100);
    }

    #[test]
    fn reordered_text_scores_lower() {
        let in_order = compare_ja("おはよう", "おはよう");
        let reordered = compare_ja("おはよう", "ようおは");
        // お matches at 2, は at 3, then よ and う have nothing left.
        assert_eq!(reordered.pct, 50);
        assert_eq!(reordered.matched_indices, vec![0, 1]);
        assert!(reordered.pct < in_order.pct);
    }

    #[test]
    fn unmatched_target_char_leaves_cursor_in_place() {
        // か is missing; ら and ん still match after the cursor.
        let result = compare_ja("からんころ", "らんころ");
        assert_eq!(result.pct, 80);
        assert_eq!(result.matched_indices, vec![1, 2, 3, 4]);
    }

    #[test]
    fn spoken_chars_are_not_reused() {
        let result = compare_ja("ああ", "あ");
        assert_eq!(result.pct, 50);
        assert_eq!(result.matched_indices, vec![0]);
    }

    #[test]
    fn extra_spoken_text_is_skipped() {
        let result = compare_ja("ありがとう", "えーとありがとうございます");
        assert_eq!(result.pct, 100);
    }

    #[test]
    fn empty_inputs_score_zero() {
        assert_eq!(compare_ja("", "").pct, 0);
        assert_eq!(compare_ja("すし", "").pct, 0);
        assert!(compare_ja("", "すし").matched_indices.is_empty());
    }

    #[test]
    fn matched_indices_are_strictly_increasing() {
        let result = compare_ja("わたしはがくせいです", "わたしがくせいでした");
        assert!(result
            .matched_indices
            .windows(2)
            .all(|pair| pair[0] < pair[1]));
    }
}
