use crate::alignment::levenshtein::levenshtein_chars;
use crate::alignment::normalization::english_words;
use crate::config::ScoringConfig;
use crate::types::MatchResult;

/// Word-level comparison with the default thresholds.
pub fn compare_en(target: &str, spoken: &str) -> MatchResult {
    compare_en_with_config(target, spoken, &ScoringConfig::default())
}

/// Greedy word alignment of `spoken` against `target`.
///
/// Target words are visited in order. Each one takes the first unused spoken
/// word (left to right) that equals it, or, for words longer than
/// `fuzzy_min_word_len`, lies within the allowed edit distance. A spoken word
/// is consumed by at most one target word.
pub fn compare_en_with_config(target: &str, spoken: &str, config: &ScoringConfig) -> MatchResult {
    let target_words = english_words(target);
    let spoken_words: Vec<Vec<char>> = english_words(spoken)
        .iter()
        .map(|w| w.chars().collect())
        .collect();
    let mut used = vec![false; spoken_words.len()];
    let mut matched = Vec::new();

    for (ti, target_word) in target_words.iter().enumerate() {
        let target_chars: Vec<char> = target_word.chars().collect();
        let max_distance = config.max_edit_distance(target_chars.len());

        let hit = spoken_words.iter().enumerate().position(|(si, spoken_chars)| {
            if used[si] {
                return false;
            }
            if *spoken_chars == target_chars {
                return true;
            }
            let Some(max_distance) = max_distance else {
                return false;
            };
            let distance = levenshtein_chars(spoken_chars, &target_chars);
            if distance <= max_distance {
                tracing::debug!(
                    target_word = %target_word,
                    spoken_word = %spoken_chars.iter().collect::<String>(),
                    distance,
                    "accepted fuzzy word match"
                );
                return true;
            }
            false
        });

        if let Some(si) = hit {
            used[si] = true;
            matched.push(ti);
        }
    }

    MatchResult::from_matches(matched, target_words.len())
}
