use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use super::error::{ConfigError, GenerationError, HackResult};
use super::similarity::{likeness, low_similarity_cap, trim};
use super::COL_WIDTH;

/// Words that must score above the low cap for a password to be playable.
pub const MIN_SIMILAR_WORDS: usize = 15;
/// Never more zero-likeness duds than this are needed.
pub const ZERO_BUCKET_CAP: usize = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordLengthRange {
    min: usize,
    max: usize,
}

impl WordLengthRange {
    pub fn new(min: usize, max: usize) -> Result<Self, ConfigError> {
        if min == 0 || max == 0 {
            return Err(ConfigError::RangeNotPositive);
        }
        if min >= max {
            return Err(ConfigError::RangeInverted { min, max });
        }
        if max > COL_WIDTH {
            return Err(ConfigError::RangeTooWide {
                max,
                width: COL_WIDTH,
            });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn contains(&self, word: &str) -> bool {
        (self.min..=self.max).contains(&word.chars().count())
    }

    pub fn check_password(&self, password: &str) -> Result<(), ConfigError> {
        if self.contains(password) {
            Ok(())
        } else {
            Err(ConfigError::PasswordOutOfRange {
                password: password.to_string(),
                min: self.min,
                max: self.max,
            })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dud {
    pub word: String,
    pub likeness: usize,
}

/// Duds sorted by how close they are to the password.
#[derive(Debug, Clone)]
pub struct Buckets {
    pub password: String,
    pub zero: Vec<Dud>,
    pub low: Vec<Dud>,
    pub high: Vec<Dud>,
}

/// Lowercased, deduplicated words of a difficulty's length range.
#[derive(Debug, Clone)]
pub struct WordPool {
    range: WordLengthRange,
    words: Vec<String>,
}

impl WordPool {
    pub fn new<I, S>(range: WordLengthRange, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = trim(range.min, range.max, words).into_iter().collect();
        Self { range, words }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words other than `password` that score above its low cap.
    pub fn similar_count(&self, password: &str) -> usize {
        let cap = low_similarity_cap(password);
        self.words
            .iter()
            .filter(|w| w.as_str() != password && likeness(w, password) > cap)
            .count()
    }

    pub fn is_viable_password(&self, password: &str) -> bool {
        self.similar_count(password) >= MIN_SIMILAR_WORDS
    }

    /// A random word of the pool that passes the similarity density check.
    pub fn pick_password(&self, rng: &mut impl Rng) -> Result<String, GenerationError> {
        let mut order: Vec<&String> = self.words.iter().collect();
        order.shuffle(rng);
        order
            .into_iter()
            .find(|w| self.is_viable_password(w))
            .cloned()
            .ok_or(GenerationError::NoPassword)
    }

    /// Up to `count` distinct viable passwords. Slow on big pools: every
    /// candidate is scored against the whole pool.
    pub fn find_passwords(&self, count: usize, rng: &mut impl Rng) -> HackResult<Vec<String>> {
        if count == 0 || self.words.len() <= count {
            return Err(ConfigError::PasswordCount {
                count,
                pool: self.words.len(),
            }
            .into());
        }
        let mut order: Vec<&String> = self.words.iter().collect();
        order.shuffle(rng);
        let mut found = Vec::with_capacity(count);
        for word in order {
            if self.is_viable_password(word) {
                debug!("password candidate {word}");
                found.push(word.clone());
                if found.len() == count {
                    return Ok(found);
                }
            }
        }
        Err(GenerationError::PasswordShortfall {
            found: found.len(),
            wanted: count,
        }
        .into())
    }

    /// Split the pool into zero/low/high likeness buckets against `password`.
    /// The pool is used up; the password never lands in a bucket.
    pub fn partition(self, password: &str, rng: &mut impl Rng) -> HackResult<Buckets> {
        let password = password.to_lowercase();
        self.range.check_password(&password)?;

        let cap = low_similarity_cap(&password);
        let mut words = self.words;
        words.shuffle(rng);

        let mut zero = Vec::new();
        let mut low = Vec::new();
        let mut high = Vec::new();
        for word in words.into_iter().filter(|w| *w != password) {
            let score = likeness(&word, &password);
            let dud = Dud {
                word,
                likeness: score,
            };
            match score {
                0 => zero.push(dud),
                s if s <= cap => low.push(dud),
                _ => high.push(dud),
            }
        }

        if high.len() < MIN_SIMILAR_WORDS {
            return Err(GenerationError::InsufficientSimilarity {
                password,
                found: high.len(),
                needed: MIN_SIMILAR_WORDS,
            }
            .into());
        }

        zero.truncate(ZERO_BUCKET_CAP);
        low.shuffle(rng);
        high.shuffle(rng);
        debug!(
            "buckets for {password}: zero={} low={} high={}",
            zero.len(),
            low.len(),
            high.len()
        );
        Ok(Buckets {
            password,
            zero,
            low,
            high,
        })
    }
}
