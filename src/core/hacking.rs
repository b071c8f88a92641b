use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

use super::columns::{FeedbackLog, HexColumns};
use super::entry::{CellRef, EntryId, EntryKind};
use super::error::{HackResult, UsageError};
use super::grid::{Grid, Resolved, Span, Unpopulated};
use super::pool::{WordLengthRange, WordPool};
use super::selector::{check_tries, select_entries};
use super::{COLS, ROWS};

pub const LOCKED_MESSAGE: &str = "USER LOCKED";

/// Everything a game needs besides the word list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSetup {
    pub range: WordLengthRange,
    pub tries: usize,
    pub secrets: bool,
    /// Use exactly this password.
    pub password: Option<String>,
    /// Otherwise draw from these; an empty pool searches the word list.
    pub pass_pool: Vec<String>,
}

impl GameSetup {
    pub fn new(range: WordLengthRange, tries: usize, secrets: bool) -> Self {
        Self {
            range,
            tries,
            secrets,
            password: None,
            pass_pool: Vec::new(),
        }
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn with_pass_pool(mut self, pool: Vec<String>) -> Self {
        self.pass_pool = pool;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Lost,
    InProgress,
    Won,
}

impl GameState {
    pub fn code(self) -> i8 {
        match self {
            GameState::Lost => -1,
            GameState::InProgress => 0,
            GameState::Won => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Filler, a spent secret, or a cell off the selectable range.
    NoEffect,
    WordRejected {
        likeness: usize,
        attempts_left: usize,
    },
    DudRemoved,
    TriesReset,
    Success,
    LockedOut,
}

impl SelectOutcome {
    /// Single-letter code: e, d, s, p or l.
    pub fn code(&self) -> char {
        match self {
            SelectOutcome::NoEffect => 'e',
            SelectOutcome::WordRejected { .. } => 'd',
            SelectOutcome::DudRemoved | SelectOutcome::TriesReset => 's',
            SelectOutcome::Success => 'p',
            SelectOutcome::LockedOut => 'l',
        }
    }
}

/// What a cell means right now.
enum Target {
    Error(char),
    Password(String),
    Dud(String, usize),
    Secret(EntryId, String),
}

impl Target {
    fn text(&self) -> String {
        match self {
            Target::Error(ch) => ch.to_string(),
            Target::Password(word) | Target::Dud(word, _) | Target::Secret(_, word) => {
                word.clone()
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct HackingGame {
    max_tries: usize,
    attempts: usize,
    state: GameState,
    grid: Grid,
    hex: HexColumns,
    log: FeedbackLog,
    used_secrets: HashSet<EntryId>,
    rng: StdRng,
}

impl HackingGame {
    /// Pick the password, sort the word list around it, draw duds and
    /// secrets, and lay out the grid.
    pub fn new<I, S>(words: I, setup: &GameSetup, mut rng: StdRng) -> HackResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        check_tries(setup.tries, setup.secrets)?;
        let pool = WordPool::new(setup.range, words);
        let password = match (&setup.password, setup.pass_pool.choose(&mut rng)) {
            (Some(fixed), _) => fixed.to_lowercase(),
            (None, Some(drawn)) => drawn.to_lowercase(),
            (None, None) => pool.pick_password(&mut rng)?,
        };
        setup.range.check_password(&password)?;
        debug!("password chosen from {} words", pool.len());

        let buckets = pool.partition(&password, &mut rng)?;
        let entries = select_entries(buckets, setup.tries, setup.secrets, &mut rng)?;
        let grid = Unpopulated::new(entries).populate(&mut rng)?;
        let hex = HexColumns::new(&mut rng);
        info!(
            "new game: {}..={} letters, {} tries, {} duds, secrets {}",
            setup.range.min(),
            setup.range.max(),
            setup.tries,
            grid.dud_count(),
            if setup.secrets { "on" } else { "off" }
        );

        Ok(Self {
            max_tries: setup.tries,
            attempts: setup.tries,
            state: GameState::InProgress,
            grid,
            hex,
            log: FeedbackLog::new(),
            used_secrets: HashSet::new(),
            rng,
        })
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_solved(&self) -> bool {
        self.state == GameState::Won
    }

    pub fn is_locked_out(&self) -> bool {
        self.state == GameState::Lost
    }

    pub fn attempts(&self) -> usize {
        self.attempts
    }

    pub fn max_tries(&self) -> usize {
        self.max_tries
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn hex(&self) -> &HexColumns {
        &self.hex
    }

    pub fn feedback(&self) -> &FeedbackLog {
        &self.log
    }

    pub fn column_rows(&self, column: usize) -> Vec<String> {
        self.grid.column_text(column)
    }

    /// Address, active row and feedback columns joined for one screen row.
    pub fn full_row(&self, row: usize) -> Result<String, UsageError> {
        let feedback = self.log.line(row).ok_or(UsageError::OutOfBounds {
            column: 0,
            row,
            position: 0,
        })?;
        let mut parts = Vec::with_capacity(COLS * 2 + 1);
        for column in 0..COLS {
            let active = self
                .grid
                .row(column, row)
                .map(|r| r.text())
                .unwrap_or_default();
            parts.push(self.hex.label(column, row).to_string());
            parts.push(active);
        }
        parts.push(feedback.to_string());
        Ok(parts.join(" "))
    }

    /// The span to highlight under the cursor, if the cell belongs to a live
    /// selectable entry.
    pub fn target_span(&self, at: CellRef) -> Option<Span> {
        match self.target(at).ok()? {
            Target::Error(_) => None,
            _ => self.grid.row(at.column, at.row)?.span(),
        }
    }

    pub fn hover(&mut self, at: CellRef) -> HackResult<()> {
        self.guard()?;
        let text = self.target(at)?.text();
        self.log.hover(&text)?;
        Ok(())
    }

    pub fn select(&mut self, at: CellRef) -> HackResult<SelectOutcome> {
        self.guard()?;
        let outcome = match self.target(at)? {
            Target::Error(ch) => {
                self.log.push(&[&ch.to_string(), "error"])?;
                SelectOutcome::NoEffect
            }
            Target::Password(word) => {
                self.log.push(&[&word, "Entry Allowed"])?;
                self.state = GameState::Won;
                info!("password found");
                SelectOutcome::Success
            }
            Target::Dud(word, likeness) => self.reject(&word, likeness)?,
            Target::Secret(id, token) => self.use_secret(id, &token)?,
        };
        debug!("select {at:?} -> {outcome:?}");
        Ok(outcome)
    }

    fn reject(&mut self, word: &str, likeness: usize) -> HackResult<SelectOutcome> {
        let attempts_left = self.attempts.saturating_sub(1);
        if attempts_left == 0 {
            self.log.push(&[word, LOCKED_MESSAGE])?;
            self.attempts = 0;
            self.state = GameState::Lost;
            info!("locked out");
            return Ok(SelectOutcome::LockedOut);
        }
        let likeness_line = format!("Likeness = {likeness}");
        self.log.push(&[word, "Entry Denied.", &likeness_line])?;
        self.attempts = attempts_left;
        Ok(SelectOutcome::WordRejected {
            likeness,
            attempts_left,
        })
    }

    fn use_secret(&mut self, id: EntryId, token: &str) -> HackResult<SelectOutcome> {
        let reset = self.rng.gen_bool(0.5);
        let message = if reset { "Tries Reset" } else { "Dud Removed" };
        self.log.push(&[token, message])?;
        self.used_secrets.insert(id);
        if reset {
            self.attempts = self.max_tries;
            info!("secret {id}: tries reset to {}", self.max_tries);
            Ok(SelectOutcome::TriesReset)
        } else {
            if let Some(dud) = self.grid.remove_random_dud() {
                info!("secret {id}: removed dud {}", dud.id);
            }
            Ok(SelectOutcome::DudRemoved)
        }
    }

    fn target(&self, at: CellRef) -> Result<Target, UsageError> {
        let (entry, span) = match self.grid.resolve(at)? {
            Resolved::Filler(ch) => return Ok(Target::Error(ch)),
            Resolved::Word { entry, span } => (entry, span),
        };
        Ok(match entry.kind {
            EntryKind::Password => Target::Password(entry.text.clone()),
            EntryKind::Dud { likeness } => Target::Dud(entry.text.clone(), likeness),
            EntryKind::Secret
                if span.is_front(at.position)
                    && !self.used_secrets.contains(&entry.id)
                    && self.grid.dud_count() > 0 =>
            {
                Target::Secret(entry.id, entry.text.clone())
            }
            EntryKind::Secret => {
                let ch = entry
                    .text
                    .chars()
                    .nth(at.position - span.start)
                    .unwrap_or_default();
                Target::Error(ch)
            }
        })
    }

    fn guard(&self) -> Result<(), UsageError> {
        match self.state {
            GameState::Won => Err(UsageError::AlreadyWon),
            GameState::Lost => Err(UsageError::AlreadyLost),
            GameState::InProgress => Ok(()),
        }
    }
}

/// Every cell of the active columns, row-major, left column first.
pub fn all_cells() -> impl Iterator<Item = CellRef> {
    (0..COLS).flat_map(|column| {
        (0..ROWS).flat_map(move |row| {
            (0..super::COL_WIDTH).map(move |position| CellRef::new(column, row, position))
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::columns::FEEDBACK_WIDTH;
    use crate::core::error::{ConfigError, HackError};
    use crate::core::test_words;
    use crate::core::COL_WIDTH;
    use rand::SeedableRng;

    fn setup(secrets: bool) -> GameSetup {
        GameSetup::new(WordLengthRange::new(3, 5).unwrap(), 4, secrets).with_password("run")
    }

    fn game(seed: u64, secrets: bool) -> HackingGame {
        HackingGame::new(
            test_words::words(),
            &setup(secrets),
            StdRng::seed_from_u64(seed),
        )
        .unwrap()
    }

    fn front_of(game: &HackingGame, pred: impl Fn(EntryKind) -> bool) -> Vec<CellRef> {
        game.grid()
            .fronts()
            .filter(|(_, e)| pred(e.kind))
            .map(|(at, _)| at)
            .collect()
    }

    fn password_cell(game: &HackingGame) -> CellRef {
        front_of(game, |k| k == EntryKind::Password)[0]
    }

    fn dud_cells(game: &HackingGame) -> Vec<CellRef> {
        front_of(game, |k| matches!(k, EntryKind::Dud { .. }))
    }

    fn secret_cells(game: &HackingGame) -> Vec<CellRef> {
        front_of(game, |k| k == EntryKind::Secret)
    }

    fn last_pushed(game: &HackingGame, back: usize) -> String {
        game.feedback()
            .line(ROWS - 1 - back)
            .unwrap()
            .trim_end()
            .to_string()
    }

    #[test]
    fn new_game_starts_in_progress_with_full_tries() {
        let game = game(1, true);
        assert_eq!(game.state(), GameState::InProgress);
        assert_eq!(game.state().code(), 0);
        assert_eq!(game.attempts(), 4);
        assert_eq!(game.max_tries(), 4);
        for column in 0..COLS {
            let rows = game.column_rows(column);
            assert_eq!(rows.len(), ROWS);
            assert!(rows.iter().all(|r| r.chars().count() == COL_WIDTH));
        }
    }

    #[test]
    fn invalid_setups_are_config_errors() {
        let words = test_words::words();
        let range = WordLengthRange::new(3, 5).unwrap();
        let rng = || StdRng::seed_from_u64(0);

        let few_tries = GameSetup::new(range, 2, true).with_password("run");
        assert!(matches!(
            HackingGame::new(&words, &few_tries, rng()),
            Err(HackError::Config(ConfigError::TriesOutOfRange { tries: 2, .. }))
        ));

        let long_password = GameSetup::new(range, 4, true).with_password("accept");
        assert!(matches!(
            HackingGame::new(&words, &long_password, rng()),
            Err(HackError::Config(ConfigError::PasswordOutOfRange { .. }))
        ));
    }

    #[test]
    fn ten_tries_allowed_only_without_secrets() {
        let range = WordLengthRange::new(3, 5).unwrap();
        let plain = GameSetup::new(range, 10, false).with_password("run");
        let game =
            HackingGame::new(test_words::words(), &plain, StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(game.max_tries(), 10);
        assert_eq!(game.attempts(), 10);
        assert!(dud_cells(&game).len() >= 11);

        let with_secrets = GameSetup::new(range, 10, true).with_password("run");
        assert!(matches!(
            HackingGame::new(test_words::words(), &with_secrets, StdRng::seed_from_u64(1)),
            Err(HackError::Config(ConfigError::TriesOutOfRange { max: 9, .. }))
        ));
    }

    #[test]
    fn password_comes_from_pass_pool_or_word_list() {
        let range = WordLengthRange::new(3, 5).unwrap();
        let pooled = GameSetup::new(range, 4, false).with_pass_pool(vec!["RUN".to_string()]);
        let game =
            HackingGame::new(test_words::words(), &pooled, StdRng::seed_from_u64(3)).unwrap();
        let password = &game.grid().entries()[0];
        assert_eq!(password.text, "run");

        let searched = GameSetup::new(range, 4, false);
        let game =
            HackingGame::new(test_words::words(), &searched, StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(game.grid().entries()[0].kind, EntryKind::Password);
    }

    #[test]
    fn duds_count_down_to_lockout() {
        let mut game = game(4, false);
        let duds = dud_cells(&game);
        assert!(duds.len() >= 5);
        for (i, at) in duds.iter().take(3).enumerate() {
            let outcome = game.select(*at).unwrap();
            let left = 3 - i;
            assert!(matches!(
                outcome,
                SelectOutcome::WordRejected { attempts_left, .. } if attempts_left == left
            ));
            assert_eq!(game.attempts(), left);
            assert_eq!(game.state(), GameState::InProgress);
            assert_eq!(last_pushed(&game, 2), ">Entry Denied.");
        }
        let outcome = game.select(duds[3]).unwrap();
        assert_eq!(outcome, SelectOutcome::LockedOut);
        assert_eq!(outcome.code(), 'l');
        assert_eq!(game.attempts(), 0);
        assert_eq!(game.state(), GameState::Lost);
        assert_eq!(game.state().code(), -1);
        assert!(game.is_locked_out());
        assert!(!game.is_solved());
        assert_eq!(last_pushed(&game, 1), format!(">{LOCKED_MESSAGE}"));
        assert_eq!(
            game.select(password_cell(&game)),
            Err(HackError::Usage(UsageError::AlreadyLost))
        );
        assert_eq!(
            game.hover(password_cell(&game)),
            Err(HackError::Usage(UsageError::AlreadyLost))
        );
    }

    #[test]
    fn rejected_dud_reports_likeness() {
        let mut game = game(5, false);
        let at = dud_cells(&game)[0];
        let entry = game
            .grid()
            .fronts()
            .find(|(cell, _)| *cell == at)
            .map(|(_, e)| e.clone())
            .unwrap();
        let EntryKind::Dud { likeness } = entry.kind else {
            panic!("not a dud");
        };
        assert_eq!(likeness, crate::core::similarity::likeness(&entry.text, "run"));
        game.select(at).unwrap();
        assert_eq!(last_pushed(&game, 3), format!(">{}", entry.text));
        assert_eq!(last_pushed(&game, 2), ">Entry Denied.");
        assert_eq!(last_pushed(&game, 1), format!(">Likeness = {likeness}"));
        assert_eq!(game.feedback().hover_line(), ">             ");
    }

    #[test]
    fn password_wins_and_ends_the_game() {
        for attempts_spent in 0..3 {
            let mut game = game(6, false);
            for at in dud_cells(&game).into_iter().take(attempts_spent) {
                game.select(at).unwrap();
            }
            let outcome = game.select(password_cell(&game)).unwrap();
            assert_eq!(outcome, SelectOutcome::Success);
            assert_eq!(game.state(), GameState::Won);
            assert_eq!(game.state().code(), 1);
            assert!(game.is_solved());
            assert!(!game.is_locked_out());
            assert_eq!(last_pushed(&game, 2), ">run");
            assert_eq!(last_pushed(&game, 1), ">Entry Allowed");
            assert_eq!(
                game.select(password_cell(&game)),
                Err(HackError::Usage(UsageError::AlreadyWon))
            );
            assert_eq!(
                game.hover(CellRef::new(0, 0, 0)),
                Err(HackError::Usage(UsageError::AlreadyWon))
            );
        }
    }

    #[test]
    fn any_cell_of_a_word_selects_it() {
        let mut game = game(7, false);
        let front = password_cell(&game);
        let last = CellRef::new(front.column, front.row, front.position + 2);
        assert_eq!(game.select(last).unwrap(), SelectOutcome::Success);
    }

    #[test]
    fn cells_outside_the_word_are_errors() {
        let mut game = game(8, false);
        let front = dud_cells(&game)[0];
        let span = game.grid().row(front.column, front.row).unwrap().span().unwrap();
        let outside = if span.start > 0 {
            CellRef::new(front.column, front.row, span.start - 1)
        } else {
            CellRef::new(front.column, front.row, span.end + 1)
        };
        let ch = game.grid().row(outside.column, outside.row).unwrap().cells()[outside.position].ch;
        assert_eq!(game.select(outside).unwrap(), SelectOutcome::NoEffect);
        assert_eq!(game.attempts(), 4);
        assert_eq!(last_pushed(&game, 2), format!(">{ch}"));
        assert_eq!(last_pushed(&game, 1), ">error");
    }

    #[test]
    fn hover_writes_word_or_character() {
        let mut game = game(9, false);
        game.hover(password_cell(&game)).unwrap();
        assert_eq!(game.feedback().hover_line(), ">run          ");

        let filler = all_cells()
            .find(|at| game.grid().resolve(*at).is_ok_and(|r| matches!(r, Resolved::Filler(_))))
            .unwrap();
        let Ok(Resolved::Filler(ch)) = game.grid().resolve(filler) else {
            unreachable!()
        };
        game.hover(filler).unwrap();
        assert_eq!(game.feedback().hover_line().trim_end(), format!(">{ch}"));
        assert_eq!(game.attempts(), 4);
        assert_eq!(game.state(), GameState::InProgress);
    }

    #[test]
    fn out_of_bounds_is_a_usage_error() {
        let mut game = game(10, false);
        for at in [CellRef::new(2, 0, 0), CellRef::new(0, ROWS, 0), CellRef::new(0, 0, COL_WIDTH)] {
            assert!(matches!(
                game.select(at),
                Err(HackError::Usage(UsageError::OutOfBounds { .. }))
            ));
            assert!(game.hover(at).is_err());
        }
    }

    #[test]
    fn secret_front_triggers_once() {
        let mut game = game(11, true);
        game.select(dud_cells(&game)[0]).unwrap();
        assert_eq!(game.attempts(), 3);
        let duds_before = game.grid().dud_count();

        let at = secret_cells(&game)[0];
        let outcome = game.select(at).unwrap();
        match outcome {
            SelectOutcome::TriesReset => {
                assert_eq!(game.attempts(), 4);
                assert_eq!(game.grid().dud_count(), duds_before);
                assert_eq!(last_pushed(&game, 1), ">Tries Reset");
            }
            SelectOutcome::DudRemoved => {
                assert_eq!(game.attempts(), 3);
                assert_eq!(game.grid().dud_count(), duds_before - 1);
                assert_eq!(last_pushed(&game, 1), ">Dud Removed");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(outcome.code(), 's');

        let attempts = game.attempts();
        let duds = game.grid().dud_count();
        assert_eq!(game.select(at).unwrap(), SelectOutcome::NoEffect);
        assert_eq!(last_pushed(&game, 1), ">error");
        assert_eq!(game.attempts(), attempts);
        assert_eq!(game.grid().dud_count(), duds);
        assert_eq!(game.state(), GameState::InProgress);
    }

    #[test]
    fn tries_reset_restores_full_budget() {
        let mut resets = 0;
        for seed in 0..20 {
            let mut game = game(seed, true);
            for at in secret_cells(&game) {
                if game.attempts() <= 1 || game.grid().dud_count() == 0 {
                    break;
                }
                game.select(dud_cells(&game)[0]).unwrap();
                assert!(game.attempts() < game.max_tries());
                let duds = game.grid().dud_count();
                if game.select(at).unwrap() == SelectOutcome::TriesReset {
                    resets += 1;
                    assert_eq!(game.attempts(), game.max_tries());
                    assert_eq!(game.grid().dud_count(), duds);
                    assert_eq!(last_pushed(&game, 1), ">Tries Reset");
                }
            }
        }
        assert!(resets > 0);
    }

    #[test]
    fn secret_inner_cells_are_errors() {
        let mut game = game(12, true);
        let at = secret_cells(&game)[0];
        let inner = CellRef::new(at.column, at.row, at.position + 1);
        assert_eq!(game.select(inner).unwrap(), SelectOutcome::NoEffect);
        // the front is still unused
        assert_ne!(game.select(at).unwrap(), SelectOutcome::NoEffect);
    }

    #[test]
    fn secrets_do_nothing_once_duds_are_gone() {
        let mut game = game(13, true);
        while game.grid.remove_random_dud().is_some() {}
        let attempts = game.attempts();
        for at in secret_cells(&game) {
            assert_eq!(game.select(at).unwrap(), SelectOutcome::NoEffect);
        }
        assert_eq!(game.attempts(), attempts);
        assert!(game.used_secrets.is_empty());
    }

    #[test]
    fn removed_duds_turn_into_filler() {
        let mut game = game(14, true);
        let dud_count = game.grid().dud_count();
        let mut removals = 0;
        for at in secret_cells(&game) {
            if game.select(at).unwrap() == SelectOutcome::DudRemoved {
                removals += 1;
            }
        }
        assert_eq!(game.grid().dud_count(), dud_count - removals);
        assert_eq!(dud_cells(&game).len(), dud_count - removals);
    }

    #[test]
    fn target_span_follows_selectable_entries() {
        let game = game(15, true);
        let front = password_cell(&game);
        let span = game.target_span(front).unwrap();
        assert_eq!(span.start, front.position);
        let secret = secret_cells(&game)[0];
        assert!(game.target_span(secret).is_some());
        let inner = CellRef::new(secret.column, secret.row, secret.position + 1);
        assert!(game.target_span(inner).is_none());
    }

    #[test]
    fn full_row_joins_all_columns() {
        let game = game(16, true);
        let row = game.full_row(0).unwrap();
        assert_eq!(row.chars().count(), (6 + 1 + COL_WIDTH + 1) * COLS + FEEDBACK_WIDTH);
        assert!(row.starts_with(game.hex().label(0, 0)));
        assert!(row.ends_with(game.feedback().line(0).unwrap()));
        assert!(game.full_row(ROWS).is_err());
    }

    #[test]
    fn feedback_keeps_its_shape_through_a_game() {
        let mut game = game(17, true);
        for at in all_cells().step_by(7) {
            if game.state() != GameState::InProgress {
                break;
            }
            game.hover(at).unwrap();
            game.select(at).unwrap();
            assert_eq!(game.feedback().lines().count(), ROWS);
            assert!(game
                .feedback()
                .lines()
                .all(|l| l.chars().count() == FEEDBACK_WIDTH));
            assert_eq!(game.feedback().hover_line(), ">             ");
        }
    }
}
