//! Bot AI
//!
//! A bot is either seeking (has a live target) or wandering. Every couple of
//! seconds it re-picks the nearest candidate among the player and the other
//! bots. Seeking bots close to stand-off range and fire when in range;
//! wandering bots drift and occasionally turn.

use glam::Vec2;
use rand::Rng;

use super::state::{Bot, Projectile, Shooter, TargetRef};
use crate::consts::*;
use crate::polar_to_cartesian;

/// Display names handed out to bots
pub const BOT_NAMES: [&str; 50] = [
    "Pythagoras", "Euclid", "TriangleMaster", "AcuteAngle", "ObtuseOne", "RightTriangle",
    "Isosceles", "Scalene", "Vertex", "Apex", "Admiral Ackbar", "Darth Triangle", "LaserLord",
    "SpaceTriangle", "Galactic", "Nebula", "Photon", "Quantum", "Vortex", "Warp",
    "xX_Triangle_Xx", "TriangleSlayer", "LaserBeam", "PewPew", "Boom", "Zap", "Blaster",
    "Gunner", "Sniper", "Elite", "Trigon", "Hypotenuse", "Angle", "Geometry", "MathLord",
    "SharpEdge", "ThreeSides", "Polygon", "ShapeShifter", "VoidTriangle", "StarWars", "SciFi",
    "Beam", "Pulse", "Energy", "Force", "Power", "Strike", "Blast", "Nova",
];

/// Pick a name uniformly from the roster
pub fn random_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    BOT_NAMES[rng.random_range(0..BOT_NAMES.len())].to_string()
}

/// Nearest of the player and every bot other than `bots[index]`.
///
/// The player is considered first and wins ties.
pub fn find_target(bots: &[Bot], index: usize, player_pos: Vec2) -> Option<TargetRef> {
    let origin = bots.get(index)?.body.pos;

    let mut best = TargetRef::Player;
    let mut best_dist = origin.distance(player_pos);
    for (i, other) in bots.iter().enumerate() {
        if i == index {
            continue;
        }
        let dist = origin.distance(other.body.pos);
        if dist < best_dist {
            best_dist = dist;
            best = TargetRef::Bot(other.id);
        }
    }
    Some(best)
}

/// Current position of a target, None if it no longer exists
fn resolve_target(bots: &[Bot], player_pos: Vec2, target: TargetRef) -> Option<Vec2> {
    match target {
        TargetRef::Player => Some(player_pos),
        TargetRef::Bot(id) => bots.iter().find(|b| b.id == id).map(|b| b.body.pos),
    }
}

/// Run one frame of AI for `bots[index]`. Returns the projectile fired, if any.
pub fn update_bot<R: Rng + ?Sized>(
    bots: &mut [Bot],
    index: usize,
    player_pos: Vec2,
    rng: &mut R,
    dt: f32,
) -> Option<Projectile> {
    bots[index].retarget_timer += dt;
    if bots[index].retarget_timer > BOT_RETARGET_INTERVAL {
        bots[index].retarget_timer = 0.0;
        bots[index].target = find_target(bots, index, player_pos);
    }

    let target_pos = bots[index]
        .target
        .and_then(|target| resolve_target(bots, player_pos, target));

    let bot = &mut bots[index];
    let mut shot = None;
    match target_pos {
        Some(target_pos) => {
            let to_target = target_pos - bot.body.pos;
            let distance = to_target.length();
            if to_target != Vec2::ZERO {
                bot.angle = crate::heading_of(to_target);
            }

            bot.body.vel = if distance > BOT_STANDOFF_DISTANCE {
                to_target / distance * bot.tier.speed()
            } else {
                Vec2::ZERO
            };

            bot.shoot_cooldown -= dt;
            if bot.shoot_cooldown <= 0.0 && distance < BOT_FIRE_RANGE {
                shot = Some(shoot(bot));
                bot.shoot_cooldown = bot.tier.cooldown_max();
            }
        }
        None => {
            // Target was removed since the last evaluation
            bot.target = None;
            if rng.random_bool(BOT_WANDER_TURN_CHANCE) {
                bot.angle = rng.random_range(0.0..std::f32::consts::TAU);
                bot.body.vel = polar_to_cartesian(bot.tier.speed() * 0.5, bot.angle);
            }
        }
    }

    bot.body.integrate(dt);
    shot
}

/// Straight, non-homing shot from the bot's nose
fn shoot(bot: &Bot) -> Projectile {
    let nose = bot.body.pos + polar_to_cartesian(bot.body.radius + MUZZLE_GAP, bot.angle);
    Projectile::new(
        nose,
        bot.angle,
        PROJECTILE_SPEED,
        false,
        Shooter::Bot(bot.id),
        bot.body.tint,
    )
}
