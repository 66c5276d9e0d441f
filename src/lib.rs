//! Triangle Arena - an open-plane arena shooter
//!
//! Core modules:
//! - `sim`: Simulation (movement, bot AI, combat, progression, spawning)
//! - `hud`: Progression and minimap feeds for the DOM overlay
//! - `leaderboard`: Periodically refreshed rival scores
//! - `platform`: Browser/native platform abstraction
//! - `settings`: Host-supplied configuration

pub mod hud;
pub mod leaderboard;
pub mod platform;
pub mod settings;
pub mod sim;

pub use leaderboard::Leaderboard;
pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 20.0;
    pub const PLAYER_START_SPEED: f32 = 200.0;
    pub const PLAYER_NAME: &str = "Player";
    /// Seconds between player shots
    pub const PLAYER_FIRE_COOLDOWN: f32 = 0.1;
    /// Player projectile speed is this plus `PLAYER_SHOT_SPEED_PER_LEVEL * level`
    pub const PLAYER_SHOT_BASE_SPEED: f32 = 500.0;
    pub const PLAYER_SHOT_SPEED_PER_LEVEL: f32 = 20.0;
    /// Health regenerated per second
    pub const PLAYER_REGEN_RATE: f32 = 5.0;
    /// Pointer aim stays active this long after the last pointer move (ms)
    pub const POINTER_AIM_WINDOW_MS: f64 = 500.0;

    /// Health bounds shared by every combatant
    pub const MAX_HEALTH: f32 = 100.0;
    /// Damage dealt by a single projectile hit
    pub const PROJECTILE_DAMAGE: f32 = 25.0;

    /// Projectile defaults
    pub const PROJECTILE_RADIUS: f32 = 5.0;
    pub const PROJECTILE_LIFETIME: f32 = 2.0;
    /// Bot shots and homing projectiles travel at this speed
    pub const PROJECTILE_SPEED: f32 = 500.0;
    /// Projectiles spawn this far beyond the shooter's radius
    pub const MUZZLE_GAP: f32 = 5.0;

    /// Bot defaults
    pub const BOT_RADIUS: f32 = 15.0;
    /// Seconds between target re-evaluations
    pub const BOT_RETARGET_INTERVAL: f32 = 2.0;
    /// Bots stop closing in once this near their target
    pub const BOT_STANDOFF_DISTANCE: f32 = 100.0;
    /// Bots only fire at targets closer than this
    pub const BOT_FIRE_RANGE: f32 = 300.0;
    /// Per-frame chance that a wandering bot picks a new heading
    pub const BOT_WANDER_TURN_CHANCE: f64 = 0.01;

    /// Progression
    pub const XP_PER_LEVEL: u32 = 100;
    pub const LEVEL_UP_SPEED_BONUS: f32 = 20.0;
    pub const LEVEL_UP_COOLDOWN_CUT: f32 = 0.01;
    pub const MIN_FIRE_COOLDOWN: f32 = 0.05;
    /// Every Nth level grants a homing buff
    pub const HOMING_BUFF_LEVEL_STEP: u32 = 5;
    pub const HOMING_BUFF_DURATION_MS: f64 = 60_000.0;

    /// Rewards and penalties
    pub const KILL_XP: u32 = 10;
    pub const KILL_SCORE: u64 = 100;
    pub const DEATH_XP_PENALTY: u32 = 50;
    pub const RESPAWN_INVINCIBILITY: f32 = 3.0;

    /// Spawning
    pub const SPAWN_RING_MARGIN: f32 = 100.0;
    /// Seconds of scaled time between spawns
    pub const SPAWN_INTERVAL: f32 = 1.0;
    /// Spawn rate grows by 1 for every this many units traveled
    pub const SPAWN_DISTANCE_SCALE: f32 = 10_000.0;

    /// Death bursts
    pub const PLAYER_DEATH_PARTICLES: usize = 20;
    pub const BOT_DEATH_PARTICLES: usize = 10;

    /// Undrained events kept for the host; older ones are dropped first
    pub const MAX_PENDING_EVENTS: usize = 256;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Angle of a direction vector, in radians
#[inline]
pub fn heading_of(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}
