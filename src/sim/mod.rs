//! Arena simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform dependencies:
//! - Wall-clock time arrives through the tick input only
//! - Seeded RNG only
//! - Stable iteration order (spawn order for bots, fire order for projectiles)

pub mod bot;
pub mod collision;
pub mod player;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{circles_overlap, projectile_hits};
pub use player::{DirectionKeys, PlayerControls};
pub use snapshot::ArenaSnapshot;
pub use state::{
    ArenaState, Body, Bot, BotId, BotTier, GameEvent, Particle, Player, Projectile, Shooter,
    TargetRef, Tint,
};
pub use tick::{TickInput, retarget_homing, resolve_collisions, tick};
