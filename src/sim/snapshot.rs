//! Read-only views of the arena for renderers and UI
//!
//! Captured after a tick completes; nothing here feeds back into simulation.

use serde::Serialize;

use super::state::{ArenaState, BotTier};
use crate::consts::PLAYER_NAME;
use crate::heading_of;

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub name: &'static str,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub angle: f32,
    pub health: f32,
    pub xp: u32,
    pub level: u32,
    pub kill_streak: u32,
    pub score: u64,
    pub invincible: bool,
    pub homing: bool,
    pub color: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BotView {
    pub id: u32,
    pub name: String,
    pub tier: BotTier,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub angle: f32,
    pub health: f32,
    pub color: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectileView {
    pub x: f32,
    pub y: f32,
    /// Direction of travel, for drawing the streak
    pub angle: f32,
    pub homing: bool,
    pub color: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParticleView {
    pub x: f32,
    pub y: f32,
    pub life: f32,
    pub max_life: f32,
    /// Render opacity, fading to 0 as the particle dies
    pub alpha: f32,
    pub color: String,
}

/// Everything the renderer, minimap and HUD need for one frame
#[derive(Debug, Clone, Serialize)]
pub struct ArenaSnapshot {
    pub frame: u64,
    pub player: PlayerView,
    pub bots: Vec<BotView>,
    pub projectiles: Vec<ProjectileView>,
    pub particles: Vec<ParticleView>,
}

impl ArenaSnapshot {
    pub fn capture(state: &ArenaState, now_ms: f64) -> Self {
        let p = &state.player;
        let player = PlayerView {
            name: PLAYER_NAME,
            x: p.body.pos.x,
            y: p.body.pos.y,
            radius: p.body.radius,
            angle: p.angle,
            health: p.body.health,
            xp: p.xp,
            level: p.level,
            kill_streak: p.kill_streak,
            score: p.score,
            invincible: p.invincible,
            homing: p.homing_active(now_ms),
            color: p.body.tint.css(),
        };

        let bots = state
            .bots
            .iter()
            .map(|b| BotView {
                id: b.id.0,
                name: b.name.clone(),
                tier: b.tier,
                x: b.body.pos.x,
                y: b.body.pos.y,
                radius: b.body.radius,
                angle: b.angle,
                health: b.body.health,
                color: b.body.tint.css(),
            })
            .collect();

        let projectiles = state
            .projectiles
            .iter()
            .map(|p| ProjectileView {
                x: p.pos.x,
                y: p.pos.y,
                angle: heading_of(p.vel),
                homing: p.homing,
                color: p.tint.css(),
            })
            .collect();

        let particles = state
            .particles
            .iter()
            .map(|p| ParticleView {
                x: p.pos.x,
                y: p.pos.y,
                life: p.life,
                max_life: p.max_life,
                alpha: p.alpha(),
                color: p.tint.css(),
            })
            .collect();

        Self {
            frame: state.frame,
            player,
            bots,
            projectiles,
            particles,
        }
    }

    /// Serialize for the JavaScript side
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    #[test]
    fn test_capture_mirrors_state() {
        let mut state = ArenaState::new(3, Settings::default());
        state.player.homing_buff = true;
        state.player.homing_until_ms = 5_000.0;

        let snapshot = ArenaSnapshot::capture(&state, 1_000.0);
        assert_eq!(snapshot.bots.len(), state.bots.len());
        assert_eq!(snapshot.player.name, "Player");
        assert!(snapshot.player.homing);
        assert_eq!(snapshot.player.color, "#00ff00");
        for (view, bot) in snapshot.bots.iter().zip(state.bots.iter()) {
            assert_eq!(view.id, bot.id.0);
            assert_eq!(view.x, bot.body.pos.x);
        }

        let expired = ArenaSnapshot::capture(&state, 5_000.0);
        assert!(!expired.player.homing);
    }

    #[test]
    fn test_snapshot_json_shape() {
        let state = ArenaState::new(3, Settings::default());
        let json = ArenaSnapshot::capture(&state, 0.0).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["player"]["level"], 1);
        assert_eq!(value["bots"].as_array().map(|b| b.len()), Some(10));
        assert!(value["projectiles"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_particle_view_carries_fade() {
        let mut state = ArenaState::new(
            3,
            Settings {
                initial_bots: 0,
                ..Default::default()
            },
        );
        state.particles.push(crate::sim::Particle {
            pos: glam::Vec2::new(4.0, -2.0),
            vel: glam::Vec2::ZERO,
            tint: crate::sim::Tint::Hue(30.0),
            life: 0.5,
            max_life: 2.0,
        });

        let snapshot = ArenaSnapshot::capture(&state, 0.0);
        let view = &snapshot.particles[0];
        assert_eq!(view.alpha, 0.25);
        assert_eq!(view.color, "hsl(30, 100%, 50%)");
    }
}
