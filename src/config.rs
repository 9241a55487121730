/// Tuning constants and environment-driven runtime settings.
use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ── World constants ───────────────────────────────────────────────────────────

pub const SCREEN_WIDTH: i32 = 600;
pub const SCREEN_HEIGHT: i32 = 800;
pub const FPS: u32 = 60;

pub const PADDLE_WIDTH: i32 = 80;
pub const PADDLE_HEIGHT: i32 = 20;
/// Gap between the paddle's top edge and the bottom of the screen.
pub const PADDLE_BOTTOM_OFFSET: i32 = 50;
pub const PADDLE_SPEED: i32 = 7;

pub const LASER_WIDTH: i32 = 4;
pub const LASER_HEIGHT: i32 = 20;
pub const LASER_SPEED: i32 = 10;

pub const TARGET_RADIUS: i32 = 20;
pub const TARGET_SPEED: i32 = 3;

pub const SPAWN_INTERVAL_MS: u64 = 1000;
pub const SHOOT_DELAY_MS: u64 = 300;

pub const MAX_HIGH_SCORES: usize = 10;

/// Laser styles are cosmetic ids 1..=5.
pub const LASER_STYLES: std::ops::RangeInclusive<u8> = 1..=5;

/// Every number that shapes a game.  `Default` is the classic 600×800 layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub screen_width: i32,
    pub screen_height: i32,
    pub paddle_width: i32,
    pub paddle_height: i32,
    pub paddle_bottom_offset: i32,
    pub paddle_speed: i32,
    pub laser_width: i32,
    pub laser_height: i32,
    pub laser_speed: i32,
    pub target_radius: i32,
    pub target_speed: i32,
    pub spawn_interval_ms: u64,
    pub shoot_delay_ms: u64,
    pub max_high_scores: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_bottom_offset: PADDLE_BOTTOM_OFFSET,
            paddle_speed: PADDLE_SPEED,
            laser_width: LASER_WIDTH,
            laser_height: LASER_HEIGHT,
            laser_speed: LASER_SPEED,
            target_radius: TARGET_RADIUS,
            target_speed: TARGET_SPEED,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            shoot_delay_ms: SHOOT_DELAY_MS,
            max_high_scores: MAX_HIGH_SCORES,
        }
    }
}

impl GameConfig {
    /// Rightmost legal x for the paddle's left edge.
    pub fn paddle_max_x(&self) -> i32 {
        (self.screen_width - self.paddle_width).max(0)
    }

    /// Paddle x centred horizontally.
    pub fn paddle_start_x(&self) -> i32 {
        self.screen_width / 2 - self.paddle_width / 2
    }

    pub fn paddle_y(&self) -> i32 {
        self.screen_height - self.paddle_bottom_offset
    }
}

// ── Runtime settings ──────────────────────────────────────────────────────────

pub const ENV_SCORES_PATH: &str = "LASER_DEFENDER_SCORES";
pub const ENV_LOG_DIR: &str = "LASER_DEFENDER_LOG_DIR";
pub const ENV_PLAYER: &str = "LASER_DEFENDER_PLAYER";
pub const ENV_MUSIC: &str = "LASER_DEFENDER_MUSIC";

const APP_DIR: &str = "laser_defender";
const SCORES_FILE: &str = "high_scores.json";
const DEFAULT_PLAYER: &str = "Player";

#[derive(Clone, Debug)]
pub struct Settings {
    pub scores_path: PathBuf,
    pub log_dir: PathBuf,
    pub player_name: String,
    pub music_enabled: bool,
}

impl Settings {
    pub fn from_env() -> Self {
        let scores_path = read_env_path(ENV_SCORES_PATH).unwrap_or_else(default_scores_path);
        let log_dir = read_env_path(ENV_LOG_DIR).unwrap_or_else(|| {
            scores_path
                .parent()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."))
        });
        let player_name = read_env_string(ENV_PLAYER)
            .or_else(|| read_env_string("USER"))
            .unwrap_or_else(|| DEFAULT_PLAYER.to_string());

        Settings {
            scores_path,
            log_dir,
            player_name,
            music_enabled: read_env_bool(ENV_MUSIC, true),
        }
    }
}

fn default_scores_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(SCORES_FILE)
}

fn read_env_string(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn read_env_path(name: &str) -> Option<PathBuf> {
    read_env_string(name).map(PathBuf::from)
}

fn read_env_bool(name: &str, default: bool) -> bool {
    match read_env_string(name) {
        None => default,
        Some(value) => parse_bool(&value).unwrap_or_else(|| {
            tracing::warn!("{name}={value:?} is not a boolean, using {default}");
            default
        }),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
