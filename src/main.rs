use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use termlink::config::{self, Difficulty, Settings};
use termlink::core::{HackError, HackingGame, WordPool};
use termlink::hacking::{run_hacking, HackOutcome};
use termlink::ui::{init_terminal, restore_terminal};
use termlink::words::{load_words, DEFAULT_WORDS};

/// Generation retries when the password was not fixed by the caller.
const MAX_DEALS: usize = 5;

#[derive(Parser, Debug)]
#[command(name = "termlink", version, about = "RobCo terminal hacking")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    play: PlayArgs,

    /// Log filter level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Write logs here. Without it the game screen runs with logging off.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play one round (the default)
    Play(PlayArgs),
    /// Search every difficulty for passwords and write a settings file
    GenSettings(GenArgs),
}

#[derive(Args, Debug, Clone, Default)]
#[group(required = false, multiple = false)]
struct DifficultyFlags {
    #[arg(long)]
    easy: bool,
    #[arg(long)]
    advance: bool,
    #[arg(long)]
    expert: bool,
    #[arg(long)]
    master: bool,
}

impl DifficultyFlags {
    fn difficulty(&self) -> Difficulty {
        match (self.advance, self.expert, self.master) {
            (true, _, _) => Difficulty::Advance,
            (_, true, _) => Difficulty::Expert,
            (_, _, true) => Difficulty::Master,
            _ => Difficulty::Easy,
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
struct PlayArgs {
    #[command(flatten)]
    difficulty: DifficultyFlags,

    /// Attempts before lockout (up to 9 with secrets, 15 without)
    #[arg(long, value_parser = clap::value_parser!(u8).range(3..=15))]
    tries: Option<u8>,

    /// Leave bracket secrets out of the grid
    #[arg(long)]
    no_secrets: bool,

    /// Word list, one word per line
    #[arg(long, default_value = DEFAULT_WORDS)]
    words: PathBuf,

    /// Settings file (defaults to the user config dir)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Seed for a reproducible grid
    #[arg(long)]
    seed: Option<u64>,

    /// Use this password instead of drawing one
    #[arg(long)]
    password: Option<String>,
}

#[derive(Args, Debug, Clone)]
struct GenArgs {
    /// Word list, one word per line
    #[arg(long, default_value = DEFAULT_WORDS)]
    words: PathBuf,

    /// Where to write the settings (defaults to the user config dir)
    #[arg(long)]
    out: Option<PathBuf>,

    /// Passwords per difficulty (defaults to the settings' pass_pool_size)
    #[arg(long)]
    count: Option<usize>,

    /// Replace an existing settings file
    #[arg(long)]
    force: bool,

    #[arg(long)]
    seed: Option<u64>,
}

// ── Logging ───────────────────────────────────────────────────────────────────

fn init_logging(level: &str, log_file: Option<&Path>, tui: bool) -> Result<()> {
    let mut builder = env_logger::Builder::from_default_env();
    let level = level.parse().unwrap_or(log::LevelFilter::Info);
    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            builder
                .filter_level(level)
                .target(env_logger::Target::Pipe(Box::new(file)));
        }
        // stderr would tear through the alternate screen
        None if tui => {
            builder.filter_level(log::LevelFilter::Off);
        }
        None => {
            builder.filter_level(level);
        }
    }
    builder.init();
    Ok(())
}

fn rng_for(seed: Option<u64>) -> StdRng {
    seed.map(StdRng::seed_from_u64)
        .unwrap_or_else(StdRng::from_entropy)
}

// ── play ──────────────────────────────────────────────────────────────────────

fn deal(words: &[String], settings: &Settings, args: &PlayArgs) -> Result<HackingGame> {
    let difficulty = args.difficulty.difficulty();
    let setup = settings.game_setup(difficulty, args.password.as_deref())?;
    let mut rng = rng_for(args.seed);
    let mut deals = 0;
    loop {
        deals += 1;
        match HackingGame::new(words, &setup, StdRng::from_rng(&mut rng)?) {
            Ok(game) => return Ok(game),
            Err(HackError::Generation(err)) if setup.password.is_none() && deals < MAX_DEALS => {
                warn!("deal {deals} failed, dealing again: {err}");
            }
            Err(err) => {
                return Err(err).with_context(|| format!("setting up {}", difficulty.name()))
            }
        }
    }
}

fn apply_overrides(settings: &mut Settings, args: &PlayArgs) {
    if let Some(tries) = args.tries {
        settings.tries = usize::from(tries);
    }
    if args.no_secrets {
        settings.secrets = false;
    }
}

fn play(args: &PlayArgs) -> Result<()> {
    let path = args.settings.clone().unwrap_or_else(config::settings_path);
    let mut settings = config::load_settings(&path);
    apply_overrides(&mut settings, args);
    config::install_settings(settings.clone());

    let words = load_words(&args.words)?;
    let game = deal(&words, &settings, args)?;
    let label = format!(
        "{} / {} TRIES",
        args.difficulty.difficulty().name().to_uppercase(),
        game.max_tries()
    );

    let mut terminal = init_terminal()?;
    let result = run_hacking(&mut terminal, game, &label);
    restore_terminal(&mut terminal)?;

    match result? {
        HackOutcome::Granted => println!("ACCESS GRANTED"),
        HackOutcome::Locked => println!("TERMINAL LOCKED"),
        HackOutcome::Cancelled => {}
    }
    Ok(())
}

// ── gen-settings ──────────────────────────────────────────────────────────────

fn gen_settings(args: &GenArgs) -> Result<()> {
    let path = args.out.clone().unwrap_or_else(config::settings_path);
    if path.exists() && !args.force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    let mut settings = config::load_settings(&path);
    let count = args.count.unwrap_or(settings.pass_pool_size);
    let words = load_words(&args.words)?;
    let mut rng = rng_for(args.seed);

    for difficulty in Difficulty::ALL {
        let range = settings.preset(difficulty).range()?;
        let pool = WordPool::new(range, &words);
        info!(
            "{}: searching {} words for {count} passwords",
            difficulty.name(),
            pool.len()
        );
        let passwords = pool
            .find_passwords(count, &mut rng)
            .with_context(|| format!("searching {} passwords", difficulty.name()))?;
        println!("{:<8} {} passwords", difficulty.name(), passwords.len());
        settings.preset_mut(difficulty).pass_pool = passwords;
    }

    config::save_settings(&path, &settings, args.force)?;
    println!("wrote {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match &cli.command {
        Some(Command::GenSettings(args)) => {
            init_logging(&cli.log_level, cli.log_file.as_deref(), false)?;
            gen_settings(args)
        }
        Some(Command::Play(args)) => {
            init_logging(&cli.log_level, cli.log_file.as_deref(), true)?;
            play(args)
        }
        None => {
            init_logging(&cli.log_level, cli.log_file.as_deref(), true)?;
            play(&cli.play)
        }
    }
}
