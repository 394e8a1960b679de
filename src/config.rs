//! Game tuning constants.
//!
//! Everything is fixed at compile time.  The logic only ever reads these
//! through a `GameConfig`, so tests can build variants without touching the
//! constants themselves.

use std::time::Duration;

// ── Screen & timing ──────────────────────────────────────────────────────────

pub const SCREEN_WIDTH: i32 = 800;
pub const SCREEN_HEIGHT: i32 = 600;
pub const FPS: u64 = 60;

/// Milliseconds between timed enemy spawns.
pub const ENEMY_SPAWN_INTERVAL_MS: u64 = 2000;

// ── Entities ─────────────────────────────────────────────────────────────────

pub const PLAYER_WIDTH: i32 = 50;
pub const PLAYER_HEIGHT: i32 = 40;
pub const PLAYER_SPEED: i32 = 8;
/// Gap between the player's bottom edge and the bottom of the screen.
pub const PLAYER_BOTTOM_MARGIN: i32 = 10;
pub const SHOOT_DELAY_MS: u64 = 250;

pub const BULLET_WIDTH: i32 = 5;
pub const BULLET_HEIGHT: i32 = 15;
pub const BULLET_SPEED: i32 = 10;

pub const ENEMY_WIDTH: i32 = 40;
pub const ENEMY_HEIGHT: i32 = 40;
pub const ENEMY_MAX_SPEED: i32 = 3;
/// Enemies (re)appear with their top edge somewhere in this band above the screen.
pub const ENEMY_SPAWN_Y_MIN: i32 = -100;
pub const ENEMY_SPAWN_Y_MAX: i32 = -40;

pub const INITIAL_ENEMY_COUNT: usize = 8;
pub const SCORE_PER_KILL: u32 = 10;

// ── Bundled config ───────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GameConfig {
    pub screen_width: i32,
    pub screen_height: i32,
    pub fps: u64,
    pub enemy_spawn_interval_ms: u64,
    pub player_width: i32,
    pub player_height: i32,
    pub player_speed: i32,
    pub player_bottom_margin: i32,
    pub shoot_delay_ms: u64,
    pub bullet_width: i32,
    pub bullet_height: i32,
    pub bullet_speed: i32,
    pub enemy_width: i32,
    pub enemy_height: i32,
    pub enemy_max_speed: i32,
    pub enemy_spawn_y_min: i32,
    pub enemy_spawn_y_max: i32,
    pub initial_enemy_count: usize,
    pub score_per_kill: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            fps: FPS,
            enemy_spawn_interval_ms: ENEMY_SPAWN_INTERVAL_MS,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_speed: PLAYER_SPEED,
            player_bottom_margin: PLAYER_BOTTOM_MARGIN,
            shoot_delay_ms: SHOOT_DELAY_MS,
            bullet_width: BULLET_WIDTH,
            bullet_height: BULLET_HEIGHT,
            bullet_speed: BULLET_SPEED,
            enemy_width: ENEMY_WIDTH,
            enemy_height: ENEMY_HEIGHT,
            enemy_max_speed: ENEMY_MAX_SPEED,
            enemy_spawn_y_min: ENEMY_SPAWN_Y_MIN,
            enemy_spawn_y_max: ENEMY_SPAWN_Y_MAX,
            initial_enemy_count: INITIAL_ENEMY_COUNT,
            score_per_kill: SCORE_PER_KILL,
        }
    }
}

impl GameConfig {
    /// Target wall-clock duration of one tick.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.fps.clamp(1, u32::MAX as u64) as u32
    }
}
