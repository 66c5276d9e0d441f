//! Bot spawning
//!
//! Tier weights shift toward harder bots as the player levels, and spawns come
//! faster the farther the player has traveled since their last death.

use rand::Rng;

use super::bot::random_name;
use super::state::{ArenaState, Bot, BotId, BotTier, GameEvent};
use crate::consts::*;
use crate::polar_to_cartesian;

/// Level-1 weights in `BotTier::ALL` order
pub const BASE_TIER_WEIGHTS: [u32; 5] = [1, 2, 3, 3, 1];

/// Tier weights for a given player level
pub fn tier_weights(level: u32) -> [u32; 5] {
    let mut weights = BASE_TIER_WEIGHTS;
    if level > 1 {
        weights[0] += level - 1;
        weights[1] += level / 2;
    }
    weights
}

/// Map a roll in `[0, total_weight)` onto a tier
pub fn tier_for_roll(weights: &[u32; 5], roll: f32) -> BotTier {
    let mut remaining = roll;
    for (tier, &weight) in BotTier::ALL.iter().zip(weights.iter()) {
        remaining -= weight as f32;
        if remaining <= 0.0 {
            return *tier;
        }
    }
    // Only reachable through float rounding at the top of the range
    BotTier::ALL[BotTier::ALL.len() - 1]
}

/// Weighted random tier for the player's level
pub fn pick_tier<R: Rng + ?Sized>(level: u32, rng: &mut R) -> BotTier {
    let weights = tier_weights(level);
    let total: u32 = weights.iter().sum();
    let roll = rng.random::<f32>() * total as f32;
    tier_for_roll(&weights, roll)
}

/// Distance from the player at which new bots appear (just off-screen)
pub fn spawn_ring_radius(viewport_width: f32, viewport_height: f32) -> f32 {
    viewport_width.max(viewport_height) / 2.0 + SPAWN_RING_MARGIN
}

/// Spawn-rate multiplier from distance traveled
pub fn spawn_rate(distance_traveled: f32) -> f32 {
    1.0 + distance_traveled / SPAWN_DISTANCE_SCALE
}

/// Spawn one bot on the ring around the player
pub fn spawn_bot(state: &mut ArenaState) -> BotId {
    let tier = pick_tier(state.player.level, &mut state.rng);
    let angle = state.rng.random_range(0.0..std::f32::consts::TAU);
    let radius = spawn_ring_radius(state.settings.viewport_width, state.settings.viewport_height);
    let pos = state.player.body.pos + polar_to_cartesian(radius, angle);
    let hue = state.rng.random_range(0.0..360.0);
    let name = random_name(&mut state.rng);

    let id = state.next_bot_id();
    log::debug!("Spawning {} bot {:?} '{}' at ({:.0}, {:.0})", tier.as_str(), id, name, pos.x, pos.y);
    state.bots.push(Bot::new(id, pos, tier, name, hue));
    state.events.push(GameEvent::BotSpawned { id, tier });
    id
}

/// Advance the spawn accumulator and spawn when it passes the interval
pub fn update_spawner(state: &mut ArenaState, dt: f32) -> Option<BotId> {
    state.spawn_timer += dt * spawn_rate(state.player.distance_traveled);
    if state.spawn_timer > SPAWN_INTERVAL {
        state.spawn_timer = 0.0;
        Some(spawn_bot(state))
    } else {
        None
    }
}
