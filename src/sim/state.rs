//! Arena state and core simulation types
//!
//! Everything a tick reads or mutates lives in [`ArenaState`]. Entities never
//! own each other: targets and projectile owners are ids that are resolved
//! against the live collections at each use.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::spawner;
use crate::consts::*;
use crate::settings::Settings;

/// Color tag carried by bodies, projectiles and particles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Tint {
    /// The player's green
    Player,
    /// A fully saturated hue in degrees (bots)
    Hue(f32),
}

impl Tint {
    /// CSS color string for the canvas renderer
    pub fn css(&self) -> String {
        match self {
            Tint::Player => "#00ff00".to_string(),
            Tint::Hue(h) => format!("hsl({}, 100%, 50%)", h),
        }
    }
}

/// Shared kinematic + combat record for the player and bots
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Always within [0, MAX_HEALTH]
    pub health: f32,
    pub tint: Tint,
}

impl Body {
    pub fn new(pos: Vec2, radius: f32, tint: Tint) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
            health: MAX_HEALTH,
            tint,
        }
    }

    /// Advance position by velocity
    #[inline]
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    /// Subtract health, floored at zero. Returns true if the body is now dead.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        self.health = (self.health - amount).clamp(0.0, MAX_HEALTH);
        self.is_dead()
    }

    /// Add health, capped at the maximum
    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount).clamp(0.0, MAX_HEALTH);
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }
}

/// Stable identifier of a bot for the lifetime of a simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BotId(pub u32);

/// Who fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shooter {
    Player,
    Bot(BotId),
}

/// What a bot is chasing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetRef {
    Player,
    Bot(BotId),
}

/// The human-controlled combatant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    /// Facing angle (radians)
    pub angle: f32,
    /// Movement speed (units/sec), grows with level
    pub speed: f32,
    /// Seconds until the next shot is allowed
    pub shoot_cooldown: f32,
    pub xp: u32,
    /// Starts at 1
    pub level: u32,
    pub kill_streak: u32,
    pub score: u64,
    /// Accumulated path length since the last death
    pub distance_traveled: f32,
    pub invincible: bool,
    /// Seconds of invincibility remaining
    pub invincible_time: f32,
    pub homing_buff: bool,
    /// Wall-clock deadline (ms) for the homing buff
    pub homing_until_ms: f64,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            body: Body::new(Vec2::ZERO, PLAYER_RADIUS, Tint::Player),
            angle: 0.0,
            speed: PLAYER_START_SPEED,
            shoot_cooldown: 0.0,
            xp: 0,
            level: 1,
            kill_streak: 0,
            score: 0,
            distance_traveled: 0.0,
            invincible: false,
            invincible_time: 0.0,
            homing_buff: false,
            homing_until_ms: 0.0,
        }
    }
}

/// Bot difficulty class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BotTier {
    Expert,
    Skilled,
    Medium,
    Noob,
    Afk,
}

impl BotTier {
    /// All tiers in spawn-weight order
    pub const ALL: [BotTier; 5] = [
        BotTier::Expert,
        BotTier::Skilled,
        BotTier::Medium,
        BotTier::Noob,
        BotTier::Afk,
    ];

    /// Movement speed (units/sec)
    pub fn speed(&self) -> f32 {
        match self {
            BotTier::Expert => 150.0,
            BotTier::Skilled => 120.0,
            BotTier::Medium => 100.0,
            BotTier::Noob => 80.0,
            BotTier::Afk => 50.0,
        }
    }

    /// Seconds between shots
    pub fn cooldown_max(&self) -> f32 {
        match self {
            BotTier::Expert => 0.2,
            BotTier::Skilled => 0.3,
            BotTier::Medium => 0.5,
            BotTier::Noob => 1.0,
            BotTier::Afk => 2.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BotTier::Expert => "expert",
            BotTier::Skilled => "skilled",
            BotTier::Medium => "medium",
            BotTier::Noob => "noob",
            BotTier::Afk => "afk",
        }
    }
}

/// An AI-controlled combatant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bot {
    pub id: BotId,
    pub body: Body,
    pub tier: BotTier,
    pub name: String,
    /// Facing angle (radians)
    pub angle: f32,
    pub shoot_cooldown: f32,
    /// None while wandering
    pub target: Option<TargetRef>,
    /// Seconds since the last target evaluation
    pub retarget_timer: f32,
}

impl Bot {
    pub fn new(id: BotId, pos: Vec2, tier: BotTier, name: String, hue: f32) -> Self {
        Self {
            id,
            body: Body::new(pos, BOT_RADIUS, Tint::Hue(hue)),
            tier,
            name,
            angle: 0.0,
            shoot_cooldown: 0.0,
            target: None,
            retarget_timer: 0.0,
        }
    }
}

/// A shot in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Seconds until removal
    pub lifetime: f32,
    pub homing: bool,
    /// Used only to rule out self-hits
    pub owner: Shooter,
    pub tint: Tint,
}

impl Projectile {
    /// Fire from `pos` along `angle`
    pub fn new(pos: Vec2, angle: f32, speed: f32, homing: bool, owner: Shooter, tint: Tint) -> Self {
        Self {
            pos,
            vel: crate::polar_to_cartesian(speed, angle),
            radius: PROJECTILE_RADIUS,
            lifetime: PROJECTILE_LIFETIME,
            homing,
            owner,
            tint,
        }
    }

    /// Move and age the projectile
    pub fn update(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        self.lifetime -= dt;
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        self.lifetime <= 0.0
    }
}

/// A cosmetic particle (not gameplay-affecting)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub tint: Tint,
    pub life: f32,
    pub max_life: f32,
}

impl Particle {
    pub fn update(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        self.life -= dt;
    }

    /// Fade factor for rendering
    pub fn alpha(&self) -> f32 {
        if self.max_life > 0.0 {
            (self.life / self.max_life).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Notable things that happened during a tick, drained by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameEvent {
    LevelUp { level: u32 },
    HomingBuff { until_ms: f64 },
    BotSpawned { id: BotId, tier: BotTier },
    BotKilled { id: BotId, name: String },
    PlayerDied,
}

impl GameEvent {
    /// Banner text for events the HUD announces
    pub fn notification(&self) -> Option<&'static str> {
        match self {
            GameEvent::LevelUp { .. } => Some("Level Up! Speed +20, Fire Rate Increased!"),
            GameEvent::HomingBuff { .. } => Some("Special Buff: Homing Projectiles for 1 minute!"),
            _ => None,
        }
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct ArenaState {
    /// Shared random source (tiers, names, wander headings, particles)
    pub rng: Pcg32,
    pub settings: Settings,
    pub player: Player,
    /// Live bots in spawn order
    pub bots: Vec<Bot>,
    pub projectiles: Vec<Projectile>,
    /// Visual particles
    pub particles: Vec<Particle>,
    /// Scaled seconds accumulated toward the next spawn
    pub spawn_timer: f32,
    /// Simulation frame counter
    pub frame: u64,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl ArenaState {
    /// Create a new arena with the player at the origin and the initial bots
    pub fn new(seed: u64, settings: Settings) -> Self {
        let initial_bots = settings.initial_bots;
        let mut state = Self {
            rng: Pcg32::seed_from_u64(seed),
            settings,
            player: Player::default(),
            bots: Vec::new(),
            projectiles: Vec::new(),
            particles: Vec::new(),
            spawn_timer: 0.0,
            frame: 0,
            events: Vec::new(),
            next_id: 1,
        };

        for _ in 0..initial_bots {
            spawner::spawn_bot(&mut state);
        }

        state
    }

    /// Allocate a new bot ID
    pub fn next_bot_id(&mut self) -> BotId {
        let id = BotId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Look up a live bot
    pub fn bot(&self, id: BotId) -> Option<&Bot> {
        self.bots.iter().find(|b| b.id == id)
    }

    /// Position of a target, if it still exists
    pub fn target_pos(&self, target: TargetRef) -> Option<Vec2> {
        match target {
            TargetRef::Player => Some(self.player.body.pos),
            TargetRef::Bot(id) => self.bot(id).map(|b| b.body.pos),
        }
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
