/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.
/// A broken file is never fatal: the problem is returned as a warning and
/// the defaults are used instead.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::LevelFilter;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::games::keyhole::MAX_CARDS;
use crate::games::pattern_match::Icon;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub general: GeneralConfig,
    pub timing: TimingConfig,
    pub levels: LevelTuning,
    pub gamepad: GamepadConfig,
    pub images_dir: PathBuf,
    /// `None` disables logging.
    pub log_file: Option<PathBuf>,
}

#[derive(Clone, Debug)]
pub struct GeneralConfig {
    pub nickname: String,
    pub full_name: String,
    pub pet_name: String,
    pub log_level: LevelFilter,
}

#[derive(Clone, Debug)]
pub struct TimingConfig {
    pub tick_rate_ms: u64,
    /// While a direction is held, the pointer steps once every N ticks.
    pub pointer_repeat_ticks: u32,
}

/// Per-level knobs. Everything not listed here is a fixed rule of its level.
#[derive(Clone, Debug)]
pub struct LevelTuning {
    pub ghost_dodges: u32,
    pub heart_count: usize,
    pub heart_countdown_secs: u32,
    pub slider_step: u8,
    pub scratch_threshold: u8,
    /// Accepted answers, already trimmed and lowercased.
    pub passwords: Vec<String>,
    pub pattern: Vec<Icon>,
    pub rain_items: usize,
    pub rain_miss_limit: u32,
    pub keyhole_cards: usize,
}

#[derive(Clone, Debug)]
pub struct GamepadConfig {
    pub confirm: Vec<String>,
    pub cancel: Vec<String>,
    pub restart: Vec<String>,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    general: TomlGeneral,
    #[serde(default)]
    timing: TomlTiming,
    #[serde(default)]
    levels: TomlLevels,
    #[serde(default)]
    gamepad: TomlGamepad,
}

#[derive(Deserialize, Debug)]
struct TomlGeneral {
    #[serde(default = "default_nickname")]
    nickname: String,
    #[serde(default = "default_full_name")]
    full_name: String,
    #[serde(default = "default_pet_name")]
    pet_name: String,
    #[serde(default = "default_images_dir")]
    images_dir: String,
    #[serde(default = "default_log_file")]
    log_file: String,
    #[serde(default = "default_log_level")]
    log_level: String,
}

#[derive(Deserialize, Debug)]
struct TomlTiming {
    #[serde(default = "default_tick_rate")]
    tick_rate_ms: u64,
    #[serde(default = "default_pointer_repeat")]
    pointer_repeat_ticks: u32,
}

#[derive(Deserialize, Debug)]
struct TomlLevels {
    #[serde(default = "default_ghost_dodges")]
    ghost_dodges: u32,
    #[serde(default = "default_heart_count")]
    heart_count: usize,
    #[serde(default = "default_heart_countdown")]
    heart_countdown_secs: u32,
    #[serde(default = "default_slider_step")]
    slider_step: u8,
    #[serde(default = "default_scratch_threshold")]
    scratch_threshold: u8,
    #[serde(default = "default_passwords")]
    passwords: Vec<String>,
    #[serde(default = "default_pattern")]
    pattern: Vec<String>,
    #[serde(default = "default_rain_items")]
    rain_items: usize,
    #[serde(default = "default_rain_miss_limit")]
    rain_miss_limit: u32,
    #[serde(default = "default_keyhole_cards")]
    keyhole_cards: usize,
}

#[derive(Deserialize, Debug)]
struct TomlGamepad {
    #[serde(default = "default_confirm")]
    confirm: Vec<String>,
    #[serde(default = "default_cancel")]
    cancel: Vec<String>,
    #[serde(default = "default_restart")]
    restart: Vec<String>,
}

// ── Defaults ──

fn default_nickname() -> String { "Riya".into() }
fn default_full_name() -> String { "Riya Salian".into() }
fn default_pet_name() -> String { "bubu".into() }
fn default_images_dir() -> String { "images".into() }
fn default_log_file() -> String { "valentine-quest.log".into() }
fn default_log_level() -> String { "info".into() }

fn default_tick_rate() -> u64 { 33 }
fn default_pointer_repeat() -> u32 { 2 }  // ~15 cells/s while held

fn default_ghost_dodges() -> u32 { 5 }
fn default_heart_count() -> usize { 13 }
fn default_heart_countdown() -> u32 { 10 }
fn default_slider_step() -> u8 { 5 }
fn default_scratch_threshold() -> u8 { 70 }
fn default_passwords() -> Vec<String> { vec!["I will protect".into()] }
fn default_pattern() -> Vec<String> { vec!["heart".into(), "rose".into(), "ring".into()] }
fn default_rain_items() -> usize { 50 }
fn default_rain_miss_limit() -> u32 { 5 }
fn default_keyhole_cards() -> usize { 14 }

fn default_confirm() -> Vec<String> { vec!["A".into(), "Start".into()] }
fn default_cancel() -> Vec<String> { vec!["Select".into()] }
fn default_restart() -> Vec<String> { vec!["Y".into()] }

impl Default for TomlGeneral {
    fn default() -> Self {
        TomlGeneral {
            nickname: default_nickname(),
            full_name: default_full_name(),
            pet_name: default_pet_name(),
            images_dir: default_images_dir(),
            log_file: default_log_file(),
            log_level: default_log_level(),
        }
    }
}

impl Default for TomlTiming {
    fn default() -> Self {
        TomlTiming {
            tick_rate_ms: default_tick_rate(),
            pointer_repeat_ticks: default_pointer_repeat(),
        }
    }
}

impl Default for TomlLevels {
    fn default() -> Self {
        TomlLevels {
            ghost_dodges: default_ghost_dodges(),
            heart_count: default_heart_count(),
            heart_countdown_secs: default_heart_countdown(),
            slider_step: default_slider_step(),
            scratch_threshold: default_scratch_threshold(),
            passwords: default_passwords(),
            pattern: default_pattern(),
            rain_items: default_rain_items(),
            rain_miss_limit: default_rain_miss_limit(),
            keyhole_cards: default_keyhole_cards(),
        }
    }
}

impl Default for TomlGamepad {
    fn default() -> Self {
        TomlGamepad {
            confirm: default_confirm(),
            cancel: default_cancel(),
            restart: default_restart(),
        }
    }
}

impl Default for LevelTuning {
    fn default() -> Self {
        // The built-in defaults always validate.
        build_tuning(TomlLevels::default()).unwrap_or_else(|_| LevelTuning {
            ghost_dodges: 5,
            heart_count: 13,
            heart_countdown_secs: 10,
            slider_step: 5,
            scratch_threshold: 70,
            passwords: vec!["i will protect".into()],
            pattern: vec![Icon::Heart, Icon::Rose, Icon::Ring],
            rain_items: 50,
            rain_miss_limit: 5,
            keyhole_cards: 14,
        })
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        let general = TomlGeneral::default();
        GameConfig {
            general: GeneralConfig {
                nickname: general.nickname,
                full_name: general.full_name,
                pet_name: general.pet_name,
                log_level: LevelFilter::Info,
            },
            timing: TimingConfig {
                tick_rate_ms: default_tick_rate(),
                pointer_repeat_ticks: default_pointer_repeat(),
            },
            levels: LevelTuning::default(),
            gamepad: GamepadConfig {
                confirm: default_confirm(),
                cancel: default_cancel(),
                restart: default_restart(),
            },
            images_dir: PathBuf::from(general.images_dir),
            log_file: Some(PathBuf::from(general.log_file)),
        }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory,
    /// (3) XDG data home, (4) system data dir.
    /// Returns the config plus any warnings encountered on the way.
    pub fn load() -> (Self, Vec<ConfigError>) {
        let search_dirs = candidate_dirs();
        let mut warnings = Vec::new();

        let parsed = match find_config(&search_dirs) {
            Some(path) => std::fs::read_to_string(&path)
                .map_err(|source| ConfigError::Read { path: path.clone(), source })
                .and_then(|text| Self::from_toml_str(&text)),
            None => Ok(Self::default()),
        };

        let mut config = parsed.unwrap_or_else(|e| {
            warnings.push(e);
            Self::default()
        });

        config.images_dir = resolve_dir(&config.images_dir, &search_dirs);
        (config, warnings)
    }

    /// Parse and validate a config document. Missing keys take defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let toml_cfg: TomlConfig = toml::from_str(text)?;

        if toml_cfg.timing.tick_rate_ms == 0 {
            return Err(invalid("timing.tick_rate_ms", "must be at least 1"));
        }
        let log_level = LevelFilter::from_str(&toml_cfg.general.log_level)
            .map_err(|_| invalid("general.log_level", &format!("unknown level {:?}", toml_cfg.general.log_level)))?;

        let log_file = if toml_cfg.general.log_file.trim().is_empty() {
            None
        } else {
            Some(PathBuf::from(&toml_cfg.general.log_file))
        };

        Ok(GameConfig {
            general: GeneralConfig {
                nickname: toml_cfg.general.nickname,
                full_name: toml_cfg.general.full_name,
                pet_name: toml_cfg.general.pet_name,
                log_level,
            },
            timing: TimingConfig {
                tick_rate_ms: toml_cfg.timing.tick_rate_ms,
                pointer_repeat_ticks: toml_cfg.timing.pointer_repeat_ticks.max(1),
            },
            levels: build_tuning(toml_cfg.levels)?,
            gamepad: GamepadConfig {
                confirm: toml_cfg.gamepad.confirm,
                cancel: toml_cfg.gamepad.cancel,
                restart: toml_cfg.gamepad.restart,
            },
            images_dir: PathBuf::from(toml_cfg.general.images_dir),
            log_file,
        })
    }
}

fn invalid(key: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid { key, reason: reason.to_string() }
}

fn build_tuning(levels: TomlLevels) -> Result<LevelTuning, ConfigError> {
    if levels.ghost_dodges == 0 {
        return Err(invalid("levels.ghost_dodges", "must be at least 1"));
    }
    if levels.heart_count == 0 {
        return Err(invalid("levels.heart_count", "must be at least 1"));
    }
    if levels.heart_countdown_secs == 0 {
        return Err(invalid("levels.heart_countdown_secs", "must be at least 1"));
    }
    if levels.slider_step == 0 || levels.slider_step > 100 {
        return Err(invalid("levels.slider_step", "must be in 1..=100"));
    }
    if levels.scratch_threshold == 0 || levels.scratch_threshold > 100 {
        return Err(invalid("levels.scratch_threshold", "must be in 1..=100"));
    }
    if levels.rain_items < 2 {
        return Err(invalid("levels.rain_items", "must be at least 2"));
    }
    if levels.keyhole_cards < 2 || levels.keyhole_cards > MAX_CARDS {
        return Err(invalid("levels.keyhole_cards", &format!("must be in 2..={MAX_CARDS}")));
    }

    let passwords: Vec<String> = levels.passwords.iter()
        .map(|p| p.trim().to_lowercase())
        .filter(|p| !p.is_empty())
        .collect();
    if passwords.is_empty() {
        return Err(invalid("levels.passwords", "needs at least one non-empty answer"));
    }

    let mut pattern = Vec::with_capacity(levels.pattern.len());
    for id in &levels.pattern {
        let icon = Icon::from_id(id)
            .ok_or_else(|| invalid("levels.pattern", &format!("unknown icon {:?}", id)))?;
        if pattern.contains(&icon) {
            return Err(invalid("levels.pattern", &format!("icon {:?} appears twice", id)));
        }
        pattern.push(icon);
    }
    if pattern.is_empty() {
        return Err(invalid("levels.pattern", "needs at least one icon"));
    }

    Ok(LevelTuning {
        ghost_dodges: levels.ghost_dodges,
        heart_count: levels.heart_count,
        heart_countdown_secs: levels.heart_countdown_secs,
        slider_step: levels.slider_step,
        scratch_threshold: levels.scratch_threshold,
        passwords,
        pattern,
        rain_items: levels.rain_items,
        rain_miss_limit: levels.rain_miss_limit.max(1),
        keyhole_cards: levels.keyhole_cards,
    })
}

/// Relative directories are looked up in the candidate dirs; the first
/// one that exists wins, otherwise the path stays relative to CWD.
fn resolve_dir(dir: &Path, search_dirs: &[PathBuf]) -> PathBuf {
    if dir.is_absolute() {
        return dir.to_path_buf();
    }
    search_dirs.iter()
        .map(|d| d.join(dir))
        .find(|p| p.is_dir())
        .unwrap_or_else(|| dir.to_path_buf())
}

/// Candidate directories to search: exe dir + CWD + data paths (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    // 1. Directory of the running executable
    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    // 2. Current working directory
    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    // 3. XDG data home
    if let Ok(home) = std::env::var("HOME") {
        let xdg = PathBuf::from(&home).join(".local/share/valentine-quest");
        if xdg.is_dir() && !dirs.iter().any(|d| d == &xdg) {
            dirs.push(xdg);
        }
    }

    // 4. System data directory
    let sys = PathBuf::from("/usr/share/valentine-quest");
    if sys.is_dir() && !dirs.iter().any(|d| d == &sys) {
        dirs.push(sys);
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

fn find_config(search_dirs: &[PathBuf]) -> Option<PathBuf> {
    search_dirs.iter()
        .map(|d| d.join("config.toml"))
        .find(|p| p.exists())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_takes_defaults() {
        let cfg = GameConfig::from_toml_str("").unwrap();
        assert_eq!(cfg.timing.tick_rate_ms, 33);
        assert_eq!(cfg.levels.heart_count, 13);
        assert_eq!(cfg.levels.scratch_threshold, 70);
        assert_eq!(cfg.levels.passwords, vec!["i will protect".to_string()]);
        assert_eq!(cfg.levels.pattern, vec![Icon::Heart, Icon::Rose, Icon::Ring]);
        assert_eq!(cfg.general.log_level, LevelFilter::Info);
        assert_eq!(cfg.log_file, Some(PathBuf::from("valentine-quest.log")));
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = GameConfig::from_toml_str(
            "[levels]\nheart_count = 3\n\n[general]\nnickname = \"Sam\"\nlog_file = \"\"\n",
        ).unwrap();
        assert_eq!(cfg.levels.heart_count, 3);
        assert_eq!(cfg.levels.heart_countdown_secs, 10);
        assert_eq!(cfg.general.nickname, "Sam");
        assert_eq!(cfg.general.full_name, "Riya Salian");
        assert!(cfg.log_file.is_none());
    }

    #[test]
    fn passwords_are_normalised_on_load() {
        let cfg = GameConfig::from_toml_str("[levels]\npasswords = [\"  Open SESAME \", \"   \"]\n").unwrap();
        assert_eq!(cfg.levels.passwords, vec!["open sesame".to_string()]);
    }

    #[test]
    fn unknown_pattern_icon_is_rejected() {
        let err = GameConfig::from_toml_str("[levels]\npattern = [\"heart\", \"unicorn\"]\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "levels.pattern", .. }));
    }

    #[test]
    fn duplicate_pattern_icon_is_rejected() {
        let err = GameConfig::from_toml_str("[levels]\npattern = [\"heart\", \"heart\"]\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "levels.pattern", .. }));
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        let err = GameConfig::from_toml_str("[levels]\nscratch_threshold = 101\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "levels.scratch_threshold", .. }));
    }

    #[test]
    fn keyhole_cards_beyond_the_field_are_rejected() {
        let err = GameConfig::from_toml_str("[levels]\nkeyhole_cards = 17\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "levels.keyhole_cards", .. }));
        let cfg = GameConfig::from_toml_str("[levels]\nkeyhole_cards = 16\n").unwrap();
        assert_eq!(cfg.levels.keyhole_cards, MAX_CARDS);
    }

    #[test]
    fn bad_log_level_is_rejected() {
        let err = GameConfig::from_toml_str("[general]\nlog_level = \"loud\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "general.log_level", .. }));
    }

    #[test]
    fn syntax_error_is_a_parse_error() {
        let err = GameConfig::from_toml_str("[levels\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn default_tuning_matches_documented_defaults() {
        let tuning = LevelTuning::default();
        assert_eq!(tuning.ghost_dodges, 5);
        assert_eq!(tuning.rain_items, 50);
        assert_eq!(tuning.keyhole_cards, 14);
    }
}
