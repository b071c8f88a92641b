use thiserror::Error;

/// Bad inputs handed to the engine at construction time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("minimum word length ({min}) must be below maximum ({max})")]
    RangeInverted { min: usize, max: usize },
    #[error("word length bounds must be positive")]
    RangeNotPositive,
    #[error("maximum word length ({max}) is wider than a grid row ({width})")]
    RangeTooWide { max: usize, width: usize },
    #[error("password {password:?} is not within {min}..={max} letters")]
    PasswordOutOfRange {
        password: String,
        min: usize,
        max: usize,
    },
    #[error("tries must be between {min} and {max} (got {tries})")]
    TriesOutOfRange { tries: usize, min: usize, max: usize },
    #[error("cannot search for {count} passwords in a pool of {pool}")]
    PasswordCount { count: usize, pool: usize },
}

/// The word list could not produce a playable puzzle. Retry with another
/// password or a bigger list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("password {password:?} has only {found} similar words (need {needed})")]
    InsufficientSimilarity {
        password: String,
        found: usize,
        needed: usize,
    },
    #[error("ran out of {bucket} duds (wanted {wanted}, had {available})")]
    BucketExhausted {
        bucket: &'static str,
        wanted: usize,
        available: usize,
    },
    #[error("{entries} entries do not fit in a grid of {rows} rows")]
    PoolTooLarge { entries: usize, rows: usize },
    #[error("entry {text:?} does not fit in a {width} char row")]
    EntryTooWide { text: String, width: usize },
    #[error("no word in the pool qualifies as a password")]
    NoPassword,
    #[error("found {found} of {wanted} passwords")]
    PasswordShortfall { found: usize, wanted: usize },
}

/// Caller misuse of a live game.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    #[error("cannot guess, game is already won")]
    AlreadyWon,
    #[error("cannot guess, game is already lost")]
    AlreadyLost,
    #[error("cell ({column}, {row}, {position}) is outside the grid")]
    OutOfBounds {
        column: usize,
        row: usize,
        position: usize,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedbackError {
    #[error("feedback {text:?} is {len} chars, limit is {limit}")]
    TooLong {
        text: String,
        len: usize,
        limit: usize,
    },
    #[error("feedback {0:?} is empty or starts with '>' or a space")]
    Malformed(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HackError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("usage error: {0}")]
    Usage(#[from] UsageError),
    #[error("feedback error: {0}")]
    Feedback(#[from] FeedbackError),
}

pub type HackResult<T> = Result<T, HackError>;
