//! Per-frame simulation step
//!
//! Core game loop that advances the arena by one animation frame. The order is
//! fixed: player, bots, projectile motion, homing, pruning, particles,
//! collisions, spawning. Hosts read the state (or a snapshot) afterwards.

use glam::Vec2;
use rand::Rng;

use super::bot::update_bot;
use super::collision::projectile_hits;
use super::player::{DirectionKeys, PlayerControls};
use super::spawner::update_spawner;
use super::state::{ArenaState, Bot, GameEvent, Particle, Projectile, Shooter, Tint};
use crate::consts::*;
use crate::polar_to_cartesian;

/// Input state for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held direction keys
    pub keys: DirectionKeys,
    /// Pointer position in world coordinates
    pub pointer: Vec2,
    /// Wall-clock time of the last pointer move (ms)
    pub pointer_moved_at_ms: f64,
    /// Fire button (mouse or space) held
    pub fire_held: bool,
    /// Current wall-clock time (ms)
    pub now_ms: f64,
}

/// Advance the arena by one frame of `dt` seconds
pub fn tick(state: &mut ArenaState, input: &TickInput, dt: f32) {
    let dt = if dt.is_finite() {
        dt.clamp(0.0, state.settings.max_frame_dt)
    } else {
        0.0
    };
    state.frame += 1;

    // Player
    let controls = PlayerControls {
        keys: input.keys,
        pointer: input.pointer,
        pointer_moved_at_ms: input.pointer_moved_at_ms,
        fire_held: input.fire_held,
        now_ms: input.now_ms,
    };
    if let Some(shot) = state.player.update(&controls, dt) {
        state.projectiles.push(shot);
    }

    // Bots, in order, each seeing the others' already-updated positions
    let player_pos = state.player.body.pos;
    for i in 0..state.bots.len() {
        if let Some(shot) = update_bot(&mut state.bots, i, player_pos, &mut state.rng, dt) {
            state.projectiles.push(shot);
        }
    }

    for projectile in state.projectiles.iter_mut() {
        projectile.update(dt);
    }
    retarget_homing(&mut state.projectiles, &state.bots);
    state.projectiles.retain(|p| !p.is_expired());

    for particle in state.particles.iter_mut() {
        particle.update(dt);
    }
    state.particles.retain(|p| p.life > 0.0);

    resolve_collisions(state, input.now_ms);

    update_spawner(state, dt);

    if state.events.len() > MAX_PENDING_EVENTS {
        let excess = state.events.len() - MAX_PENDING_EVENTS;
        state.events.drain(..excess);
        log::debug!("Dropped {} undrained events", excess);
    }
}

/// Steer every homing projectile straight at the nearest bot.
///
/// The player is never a homing target. With no bots, projectiles keep flying.
pub fn retarget_homing(projectiles: &mut [Projectile], bots: &[Bot]) {
    for projectile in projectiles.iter_mut().filter(|p| p.homing) {
        let nearest = bots.iter().min_by(|a, b| {
            let dist_a = a.body.pos.distance_squared(projectile.pos);
            let dist_b = b.body.pos.distance_squared(projectile.pos);
            dist_a
                .partial_cmp(&dist_b)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        if let Some(bot) = nearest {
            let to_bot = bot.body.pos - projectile.pos;
            let dist = to_bot.length();
            if dist > 0.0 {
                projectile.vel = to_bot / dist * PROJECTILE_SPEED;
            }
        }
    }
}

/// Who a projectile struck
enum Hit {
    Bot(usize),
    Player,
}

/// Apply projectile hits, deaths, rewards and respawns.
///
/// Each projectile hits at most one target (bots in order, then the player).
/// Killed bots stay in the list until the pass ends but can no longer be hit.
pub fn resolve_collisions(state: &mut ArenaState, now_ms: f64) {
    let mut dead_bots: Vec<usize> = Vec::new();

    for pi in 0..state.projectiles.len() {
        let projectile = &state.projectiles[pi];

        let mut hit = None;
        for (bi, bot) in state.bots.iter().enumerate() {
            if dead_bots.contains(&bi) || projectile.owner == Shooter::Bot(bot.id) {
                continue;
            }
            if projectile_hits(projectile, &bot.body) {
                hit = Some(Hit::Bot(bi));
                break;
            }
        }
        if hit.is_none()
            && projectile.owner != Shooter::Player
            && !state.player.invincible
            && projectile_hits(projectile, &state.player.body)
        {
            hit = Some(Hit::Player);
        }

        let Some(hit) = hit else {
            continue;
        };
        state.projectiles[pi].lifetime = 0.0;

        match hit {
            Hit::Bot(bi) => {
                let bot = &mut state.bots[bi];
                if !bot.body.take_damage(PROJECTILE_DAMAGE) {
                    continue;
                }

                spawn_burst(
                    &mut state.particles,
                    &mut state.rng,
                    bot.body.pos,
                    bot.body.tint,
                    BOT_DEATH_PARTICLES,
                    50.0,
                    100.0,
                    1.0,
                );
                log::debug!("Bot {:?} '{}' destroyed", bot.id, bot.name);
                state.events.push(GameEvent::BotKilled {
                    id: bot.id,
                    name: bot.name.clone(),
                });

                let player = &mut state.player;
                player.gain_xp(KILL_XP, now_ms, &mut state.events);
                player.kill_streak += 1;
                player.score += KILL_SCORE;
                dead_bots.push(bi);
            }
            Hit::Player => {
                if !state.player.body.take_damage(PROJECTILE_DAMAGE) {
                    continue;
                }

                spawn_burst(
                    &mut state.particles,
                    &mut state.rng,
                    state.player.body.pos,
                    state.player.body.tint,
                    PLAYER_DEATH_PARTICLES,
                    100.0,
                    200.0,
                    2.0,
                );
                log::info!(
                    "Player killed at level {} (streak {})",
                    state.player.level,
                    state.player.kill_streak
                );
                state.player.respawn();
                state.events.push(GameEvent::PlayerDied);
            }
        }
    }

    // Remove from the back so earlier indices stay valid
    dead_bots.sort_unstable_by(|a, b| b.cmp(a));
    for idx in dead_bots {
        state.bots.remove(idx);
    }
}

/// Emit a radial burst of particles with random directions and speeds
#[allow(clippy::too_many_arguments)]
fn spawn_burst<R: Rng + ?Sized>(
    particles: &mut Vec<Particle>,
    rng: &mut R,
    pos: Vec2,
    tint: Tint,
    count: usize,
    min_speed: f32,
    speed_spread: f32,
    life: f32,
) {
    for _ in 0..count {
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let speed = min_speed + rng.random::<f32>() * speed_spread;
        particles.push(Particle {
            pos,
            vel: polar_to_cartesian(speed, angle),
            tint,
            life,
            max_life: life,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::state::{BotId, BotTier, TargetRef};

    fn empty_arena() -> ArenaState {
        ArenaState::new(
            12345,
            Settings {
                initial_bots: 0,
                ..Default::default()
            },
        )
    }

    fn add_bot(state: &mut ArenaState, pos: Vec2) -> BotId {
        let id = state.next_bot_id();
        state
            .bots
            .push(Bot::new(id, pos, BotTier::Medium, "Euclid".to_string(), 90.0));
        id
    }

    fn shot_at(pos: Vec2, owner: Shooter) -> Projectile {
        Projectile::new(pos, 0.0, PROJECTILE_SPEED, false, owner, Tint::Player)
    }

    #[test]
    fn test_projectile_ignores_owner() {
        let mut state = empty_arena();
        let id = add_bot(&mut state, Vec2::new(500.0, 0.0));
        state.projectiles.push(shot_at(Vec2::new(500.0, 0.0), Shooter::Bot(id)));
        state.projectiles.push(shot_at(Vec2::ZERO, Shooter::Player));

        resolve_collisions(&mut state, 0.0);
        assert_eq!(state.bots[0].body.health, MAX_HEALTH);
        assert_eq!(state.player.body.health, MAX_HEALTH);
        assert!(state.projectiles.iter().all(|p| p.lifetime > 0.0));
    }

    #[test]
    fn test_invincible_player_takes_no_damage() {
        let mut state = empty_arena();
        let id = add_bot(&mut state, Vec2::new(500.0, 0.0));
        state.player.invincible = true;
        state.player.invincible_time = 1.0;
        state.projectiles.push(shot_at(Vec2::ZERO, Shooter::Bot(id)));

        resolve_collisions(&mut state, 0.0);
        assert_eq!(state.player.body.health, MAX_HEALTH);
        assert!(state.projectiles[0].lifetime > 0.0);
    }

    #[test]
    fn test_one_hit_per_projectile() {
        let mut state = empty_arena();
        add_bot(&mut state, Vec2::new(300.0, 0.0));
        add_bot(&mut state, Vec2::new(302.0, 0.0));
        state.projectiles.push(shot_at(Vec2::new(301.0, 0.0), Shooter::Player));

        resolve_collisions(&mut state, 0.0);
        assert_eq!(state.bots[0].body.health, MAX_HEALTH - PROJECTILE_DAMAGE);
        assert_eq!(state.bots[1].body.health, MAX_HEALTH);
        assert_eq!(state.projectiles[0].lifetime, 0.0);
    }

    #[test]
    fn test_bot_kill_rewards_player_and_removes_bot() {
        let mut state = empty_arena();
        let doomed = add_bot(&mut state, Vec2::new(300.0, 0.0));
        let survivor = add_bot(&mut state, Vec2::new(-300.0, 0.0));
        state.bots[0].body.health = PROJECTILE_DAMAGE;
        state.projectiles.push(shot_at(Vec2::new(300.0, 0.0), Shooter::Player));

        resolve_collisions(&mut state, 0.0);
        assert_eq!(state.bots.len(), 1);
        assert_eq!(state.bots[0].id, survivor);
        assert_eq!(state.player.xp, KILL_XP);
        assert_eq!(state.player.score, KILL_SCORE);
        assert_eq!(state.player.kill_streak, 1);
        assert_eq!(state.particles.len(), BOT_DEATH_PARTICLES);
        assert!(state.particles.iter().all(|p| p.tint == Tint::Hue(90.0)));
        assert!(state.events.iter().any(|e| matches!(e, GameEvent::BotKilled { id, .. } if *id == doomed)));
    }

    #[test]
    fn test_dead_bot_is_skipped_for_later_projectiles() {
        let mut state = empty_arena();
        add_bot(&mut state, Vec2::new(300.0, 0.0));
        let behind = add_bot(&mut state, Vec2::new(310.0, 0.0));
        state.bots[0].body.health = PROJECTILE_DAMAGE;
        state.projectiles.push(shot_at(Vec2::new(300.0, 0.0), Shooter::Player));
        state.projectiles.push(shot_at(Vec2::new(305.0, 0.0), Shooter::Player));

        resolve_collisions(&mut state, 0.0);
        // Second shot passes the corpse and hits the bot behind it
        assert_eq!(state.bots.len(), 1);
        assert_eq!(state.bots[0].id, behind);
        assert_eq!(state.bots[0].body.health, MAX_HEALTH - PROJECTILE_DAMAGE);
        assert_eq!(state.player.kill_streak, 1);
    }

    #[test]
    fn test_removal_keeps_remaining_order() {
        let mut state = empty_arena();
        let ids: Vec<_> = (0..4)
            .map(|i| add_bot(&mut state, Vec2::new(200.0 * i as f32 + 200.0, 0.0)))
            .collect();
        for bi in [0, 2] {
            state.bots[bi].body.health = 1.0;
            let pos = state.bots[bi].body.pos;
            state.projectiles.push(shot_at(pos, Shooter::Player));
        }

        resolve_collisions(&mut state, 0.0);
        let left: Vec<_> = state.bots.iter().map(|b| b.id).collect();
        assert_eq!(left, vec![ids[1], ids[3]]);
    }

    #[test]
    fn test_player_death_resets_in_place() {
        let mut state = empty_arena();
        let id = add_bot(&mut state, Vec2::new(900.0, 0.0));
        state.player.body.pos = Vec2::new(50.0, 50.0);
        state.player.body.health = PROJECTILE_DAMAGE;
        state.player.xp = 80;
        state.player.kill_streak = 3;
        state.player.distance_traveled = 1234.0;
        state.projectiles.push(shot_at(Vec2::new(50.0, 50.0), Shooter::Bot(id)));
        state.projectiles.push(shot_at(Vec2::ZERO, Shooter::Bot(id)));

        resolve_collisions(&mut state, 0.0);
        assert_eq!(state.player.body.health, MAX_HEALTH);
        assert_eq!(state.player.body.pos, Vec2::ZERO);
        assert_eq!(state.player.xp, 30);
        assert_eq!(state.player.kill_streak, 0);
        assert_eq!(state.player.distance_traveled, 0.0);
        assert!(state.player.invincible);
        assert_eq!(state.player.invincible_time, RESPAWN_INVINCIBILITY);
        assert_eq!(state.particles.len(), PLAYER_DEATH_PARTICLES);
        assert!(state.particles.iter().all(|p| p.pos == Vec2::new(50.0, 50.0)));
        // The shot waiting at the origin meets an invincible player
        assert!(state.projectiles[1].lifetime > 0.0);
        assert_eq!(state.events, vec![GameEvent::PlayerDied]);
    }

    #[test]
    fn test_death_penalty_floors_xp() {
        let mut state = empty_arena();
        let id = add_bot(&mut state, Vec2::new(900.0, 0.0));
        state.player.body.health = 1.0;
        state.player.xp = 20;
        state.projectiles.push(shot_at(Vec2::ZERO, Shooter::Bot(id)));
        resolve_collisions(&mut state, 0.0);
        assert_eq!(state.player.xp, 0);
    }

    #[test]
    fn test_homing_steers_to_nearest_bot() {
        let bots = vec![
            Bot::new(BotId(1), Vec2::new(0.0, 100.0), BotTier::Afk, "Nova".into(), 0.0),
            Bot::new(BotId(2), Vec2::new(0.0, -400.0), BotTier::Afk, "Zap".into(), 0.0),
        ];
        let mut projectiles = vec![
            Projectile::new(Vec2::ZERO, 0.0, 700.0, true, Shooter::Player, Tint::Player),
            Projectile::new(Vec2::ZERO, 0.0, 700.0, false, Shooter::Player, Tint::Player),
        ];

        retarget_homing(&mut projectiles, &bots);
        assert!((projectiles[0].vel - Vec2::new(0.0, PROJECTILE_SPEED)).length() < 1e-3);
        assert_eq!(projectiles[1].vel, Vec2::new(700.0, 0.0));
    }

    #[test]
    fn test_homing_without_bots_keeps_velocity() {
        let mut projectiles = vec![Projectile::new(
            Vec2::ZERO,
            0.0,
            640.0,
            true,
            Shooter::Player,
            Tint::Player,
        )];
        retarget_homing(&mut projectiles, &[]);
        assert_eq!(projectiles[0].vel, Vec2::new(640.0, 0.0));
    }

    #[test]
    fn test_tick_fires_and_moves_projectile() {
        let mut state = empty_arena();
        let input = TickInput {
            fire_held: true,
            now_ms: 1_000_000.0,
            ..Default::default()
        };
        tick(&mut state, &input, 0.01);
        assert_eq!(state.projectiles.len(), 1);
        // Spawned at the nose, then integrated this same frame
        let expected = PLAYER_RADIUS + MUZZLE_GAP + 520.0 * 0.01;
        assert!((state.projectiles[0].pos.x - expected).abs() < 1e-3);
    }

    #[test]
    fn test_tick_expires_old_projectiles() {
        let mut state = empty_arena();
        let mut shot = shot_at(Vec2::new(5000.0, 0.0), Shooter::Player);
        shot.lifetime = 0.05;
        state.projectiles.push(shot);
        tick(&mut state, &TickInput::default(), 0.06);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_tick_clamps_frame_delta() {
        let mut state = empty_arena();
        let input = TickInput {
            keys: DirectionKeys {
                d: true,
                ..Default::default()
            },
            now_ms: 1_000_000.0,
            ..Default::default()
        };
        tick(&mut state, &input, 5.0);
        let max_step = PLAYER_START_SPEED * state.settings.max_frame_dt;
        assert!((state.player.body.pos.x - max_step).abs() < 1e-3);

        tick(&mut state, &input, f32::NAN);
        assert!((state.player.body.pos.x - max_step).abs() < 1e-3);
    }

    #[test]
    fn test_tick_spawns_over_time() {
        let mut state = empty_arena();
        for _ in 0..70 {
            tick(&mut state, &TickInput::default(), 1.0 / 60.0);
        }
        assert_eq!(state.bots.len(), 1);
    }

    #[test]
    fn test_bots_hunt_player_after_retarget() {
        let mut state = empty_arena();
        add_bot(&mut state, Vec2::new(250.0, 0.0));
        let input = TickInput {
            now_ms: 1_000_000.0,
            ..Default::default()
        };
        for _ in 0..25 {
            tick(&mut state, &input, 0.1);
        }
        // Wandering for the first two seconds cannot bring it within stand-off range
        let bot = &state.bots[0];
        assert_eq!(bot.target, Some(TargetRef::Player));
        assert!(bot.body.vel.dot(state.player.body.pos - bot.body.pos) > 0.0);
        assert!((bot.body.vel.length() - BotTier::Medium.speed()).abs() < 1e-3);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = ArenaState::new(99999, Settings::default());
        let mut state2 = ArenaState::new(99999, Settings::default());

        let inputs = [
            TickInput {
                pointer: Vec2::new(100.0, 40.0),
                pointer_moved_at_ms: 0.0,
                fire_held: true,
                ..Default::default()
            },
            TickInput {
                keys: DirectionKeys {
                    w: true,
                    ..Default::default()
                },
                now_ms: 1000.0,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..200 {
            for input in &inputs {
                tick(&mut state1, input, 1.0 / 60.0);
                tick(&mut state2, input, 1.0 / 60.0);
            }
        }

        assert_eq!(state1.frame, state2.frame);
        assert_eq!(state1.bots.len(), state2.bots.len());
        assert_eq!(state1.projectiles.len(), state2.projectiles.len());
        for (a, b) in state1.bots.iter().zip(state2.bots.iter()) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.body.pos, b.body.pos);
        }
        assert_eq!(state1.player.body.pos, state2.player.body.pos);
        assert_eq!(state1.player.score, state2.player.score);
    }

    #[test]
    fn test_undrained_events_are_capped() {
        let mut state = empty_arena();
        for _ in 0..MAX_PENDING_EVENTS + 40 {
            state.events.push(GameEvent::PlayerDied);
        }
        state.events.push(GameEvent::LevelUp { level: 7 });

        tick(&mut state, &TickInput::default(), 0.0);
        assert_eq!(state.events.len(), MAX_PENDING_EVENTS);
        // Newest events survive
        assert_eq!(state.events.last(), Some(&GameEvent::LevelUp { level: 7 }));
    }
}
