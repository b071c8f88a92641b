use std::collections::BTreeSet;

/// Count the positions where `word` and `password` carry the same character.
///
/// Only the first `password.len()` positions are compared; a shorter word is
/// treated as padded with a character that never matches.
pub fn likeness(word: &str, password: &str) -> usize {
    let mut word = word.chars();
    password
        .chars()
        .filter(|p| word.next().is_some_and(|w| w == *p))
        .count()
}

/// Likeness above this is "high similarity".
pub fn low_similarity_cap(password: &str) -> usize {
    password.chars().count() / 2
}

/// Lowercase and dedupe `words`, keeping those of `min..=max` characters.
pub fn trim<I, S>(min: usize, max: usize, words: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    words
        .into_iter()
        .map(|w| w.as_ref().trim().to_lowercase())
        .filter(|w| (min..=max).contains(&w.chars().count()))
        .collect()
}
