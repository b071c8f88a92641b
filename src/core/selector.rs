use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

use super::entry::{Entry, EntryId, EntryKind};
use super::error::{ConfigError, GenerationError, HackResult};
use super::pool::{Buckets, Dud};
use super::FILLER;

pub const MIN_TRIES: usize = 3;
/// Highest budget whose worst case (1 password, 2t duds, t+2 secrets) still
/// leaves room in the 32 grid rows.
pub const MAX_TRIES: usize = 9;
/// Same bound without secrets: 1 password and 2t duds.
pub const MAX_TRIES_NO_SECRETS: usize = 15;

pub const MIN_SECRETS: usize = 2;
const SECRET_MAX_INNER: usize = 8;

const OPENERS: &[char] = &['(', '[', '<', '{'];
const CLOSERS: &[char] = &[')', ']', '>', '}'];

pub fn max_tries(secrets: bool) -> usize {
    if secrets {
        MAX_TRIES
    } else {
        MAX_TRIES_NO_SECRETS
    }
}

pub fn check_tries(tries: usize, secrets: bool) -> Result<(), ConfigError> {
    let max = max_tries(secrets);
    if (MIN_TRIES..=max).contains(&tries) {
        Ok(())
    } else {
        Err(ConfigError::TriesOutOfRange {
            tries,
            min: MIN_TRIES,
            max,
        })
    }
}

/// Draw the password, duds and secrets that will go on the grid.
///
/// The result is indexed by id: the password sits at 0, duds follow, then
/// secrets.
pub fn select_entries(
    buckets: Buckets,
    tries: usize,
    secrets: bool,
    rng: &mut impl Rng,
) -> HackResult<Vec<Entry>> {
    check_tries(tries, secrets)?;
    let Buckets {
        password,
        zero,
        low,
        high,
    } = buckets;

    let dud_count = rng.gen_range(tries + 1..=tries * 2);
    let third = dud_count.div_ceil(3);
    let zero_take = third.min(zero.len());
    let low_take = third.min(low.len());
    let high_take = dud_count - zero_take - low_take;
    if high.len() < high_take {
        return Err(GenerationError::BucketExhausted {
            bucket: "high",
            wanted: high_take,
            available: high.len(),
        }
        .into());
    }
    debug!("duds: {dud_count} ({zero_take} zero, {low_take} low, {high_take} high)");

    let mut entries = Vec::with_capacity(1 + dud_count + tries + 2);
    entries.push(Entry {
        id: EntryId::PASSWORD,
        text: password,
        kind: EntryKind::Password,
    });
    let duds = zero
        .into_iter()
        .take(zero_take)
        .chain(low.into_iter().take(low_take))
        .chain(high.into_iter().take(high_take));
    for Dud { word, likeness } in duds {
        entries.push(Entry {
            id: EntryId(entries.len()),
            text: word,
            kind: EntryKind::Dud { likeness },
        });
    }

    if secrets {
        let secret_count = rng.gen_range(MIN_SECRETS..=tries + 2);
        let mut seen = HashSet::with_capacity(secret_count);
        while seen.len() < secret_count {
            let token = secret_token(rng);
            if seen.insert(token.clone()) {
                entries.push(Entry {
                    id: EntryId(entries.len()),
                    text: token,
                    kind: EntryKind::Secret,
                });
            }
        }
        debug!("secrets: {secret_count}");
    }
    Ok(entries)
}

/// A bracketed run of 1..=8 distinct filler symbols, e.g. `<%$;>`.
pub fn secret_token(rng: &mut impl Rng) -> String {
    let mut symbols = FILLER.to_vec();
    symbols.shuffle(rng);
    let inner = rng.gen_range(1..=SECRET_MAX_INNER);
    let kind = rng.gen_range(0..OPENERS.len());
    let mut token = String::with_capacity(inner + 2);
    token.push(OPENERS[kind]);
    token.extend(&symbols[..inner]);
    token.push(CLOSERS[kind]);
    token
}
