use crate::types::MatchResult;

/// Strategy that scores a spoken transcript against a target sentence.
pub trait Comparator: Send + Sync {
    fn compare(&self, target: &str, spoken: &str) -> MatchResult;
}

impl<F> Comparator for F
where
    F: Fn(&str, &str) -> MatchResult + Send + Sync,
{
    fn compare(&self, target: &str, spoken: &str) -> MatchResult {
        self(target, spoken)
    }
}
