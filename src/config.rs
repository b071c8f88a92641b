use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{OnceLock, RwLock};

use crate::core::{ConfigError, GameSetup, WordLengthRange};

// ── Paths ─────────────────────────────────────────────────────────────────────

pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("termlink")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

// ── JSON helpers ──────────────────────────────────────────────────────────────

pub fn load_json<T: for<'de> Deserialize<'de> + Default>(path: &Path) -> T {
    std::fs::read_to_string(path)
        .ok()
        .and_then(|s| serde_json::from_str(&s).ok())
        .unwrap_or_default()
}

pub fn save_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}

// ── Difficulty ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Advance,
    Expert,
    Master,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Advance,
        Difficulty::Expert,
        Difficulty::Master,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Advance => "Advance",
            Difficulty::Expert => "Expert",
            Difficulty::Master => "Master",
        }
    }
}

/// Word length bounds for one difficulty, plus its pre-searched passwords.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DifficultyPreset {
    pub min: usize,
    pub max: usize,
    #[serde(default)]
    pub pass_pool: Vec<String>,
}

impl DifficultyPreset {
    fn new(min: usize, max: usize) -> Self {
        Self {
            min,
            max,
            pass_pool: Vec::new(),
        }
    }

    pub fn range(&self) -> Result<WordLengthRange, ConfigError> {
        WordLengthRange::new(self.min, self.max)
    }
}

// ── Settings ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    #[serde(default = "default_easy")]
    pub easy: DifficultyPreset,
    #[serde(default = "default_advance")]
    pub advance: DifficultyPreset,
    #[serde(default = "default_expert")]
    pub expert: DifficultyPreset,
    #[serde(default = "default_master")]
    pub master: DifficultyPreset,
    #[serde(default = "default_tries")]
    pub tries: usize,
    #[serde(default = "default_secrets")]
    pub secrets: bool,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_pass_pool_size")]
    pub pass_pool_size: usize,
}

fn default_easy() -> DifficultyPreset {
    DifficultyPreset::new(3, 5)
}

fn default_advance() -> DifficultyPreset {
    DifficultyPreset::new(6, 8)
}

fn default_expert() -> DifficultyPreset {
    DifficultyPreset::new(9, 10)
}

fn default_master() -> DifficultyPreset {
    DifficultyPreset::new(11, 12)
}

const fn default_tries() -> usize {
    4
}

const fn default_secrets() -> bool {
    true
}

fn default_theme() -> String {
    "Green (Default)".to_string()
}

const fn default_pass_pool_size() -> usize {
    200
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            easy: default_easy(),
            advance: default_advance(),
            expert: default_expert(),
            master: default_master(),
            tries: default_tries(),
            secrets: default_secrets(),
            theme: default_theme(),
            pass_pool_size: default_pass_pool_size(),
        }
    }
}

impl Settings {
    pub fn preset(&self, difficulty: Difficulty) -> &DifficultyPreset {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Advance => &self.advance,
            Difficulty::Expert => &self.expert,
            Difficulty::Master => &self.master,
        }
    }

    pub fn preset_mut(&mut self, difficulty: Difficulty) -> &mut DifficultyPreset {
        match difficulty {
            Difficulty::Easy => &mut self.easy,
            Difficulty::Advance => &mut self.advance,
            Difficulty::Expert => &mut self.expert,
            Difficulty::Master => &mut self.master,
        }
    }

    /// Game parameters for `difficulty`; the stored pass pool is used unless
    /// the caller fixes the password.
    pub fn game_setup(
        &self,
        difficulty: Difficulty,
        password: Option<&str>,
    ) -> Result<GameSetup, ConfigError> {
        let preset = self.preset(difficulty);
        let setup = GameSetup::new(preset.range()?, self.tries, self.secrets)
            .with_pass_pool(preset.pass_pool.clone());
        Ok(match password {
            Some(p) => setup.with_password(p),
            None => setup,
        })
    }
}

pub fn load_settings(path: &Path) -> Settings {
    load_json(path)
}

/// Write `settings` to `path`. An existing file is only replaced when
/// `force` is set.
pub fn save_settings(path: &Path, settings: &Settings, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    save_json(path, settings)
}

// ── Global mutable state ──────────────────────────────────────────────────────

static APP_SETTINGS: OnceLock<RwLock<Settings>> = OnceLock::new();

fn settings_lock() -> &'static RwLock<Settings> {
    APP_SETTINGS.get_or_init(|| RwLock::new(Settings::default()))
}

pub fn get_settings() -> Settings {
    settings_lock()
        .read()
        .map(|g| g.clone())
        .unwrap_or_default()
}

pub fn install_settings(settings: Settings) {
    if let Ok(mut guard) = settings_lock().write() {
        *guard = settings;
    }
}

// ── Themes ────────────────────────────────────────────────────────────────────

use ratatui::style::Color;

pub const THEMES: &[(&str, Color)] = &[
    ("Green (Default)", Color::Green),
    ("White", Color::White),
    ("Amber", Color::Yellow),
    ("Blue", Color::Blue),
    ("Red", Color::Red),
    ("Purple", Color::Magenta),
    ("Light Blue", Color::Cyan),
];

pub fn theme_color(name: &str) -> Color {
    THEMES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, c)| *c)
        .unwrap_or(Color::Green)
}

pub fn current_theme_color() -> Color {
    theme_color(&get_settings().theme)
}
