//! Player control, aiming, shooting and progression

use glam::Vec2;

use super::state::{GameEvent, Player, Projectile, Shooter};
use crate::consts::*;
use crate::polar_to_cartesian;

/// Held direction keys. Arrow keys alias WASD.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionKeys {
    pub w: bool,
    pub a: bool,
    pub s: bool,
    pub d: bool,
    pub arrow_up: bool,
    pub arrow_left: bool,
    pub arrow_down: bool,
    pub arrow_right: bool,
}

impl DirectionKeys {
    pub fn up(&self) -> bool {
        self.w || self.arrow_up
    }

    pub fn down(&self) -> bool {
        self.s || self.arrow_down
    }

    pub fn left(&self) -> bool {
        self.a || self.arrow_left
    }

    pub fn right(&self) -> bool {
        self.d || self.arrow_right
    }

    /// Movement direction, unit length or zero.
    ///
    /// Opposite keys do not cancel: down wins over up, right over left.
    pub fn movement(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.up() {
            dir.y = -1.0;
        }
        if self.down() {
            dir.y = 1.0;
        }
        if self.left() {
            dir.x = -1.0;
        }
        if self.right() {
            dir.x = 1.0;
        }
        dir.normalize_or_zero()
    }

    /// Aim direction from keys. Opposite keys cancel out.
    pub fn aim(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.up() {
            dir.y -= 1.0;
        }
        if self.down() {
            dir.y += 1.0;
        }
        if self.left() {
            dir.x -= 1.0;
        }
        if self.right() {
            dir.x += 1.0;
        }
        dir
    }
}

/// Everything the player reads from the host for one frame
#[derive(Debug, Clone, Copy)]
pub struct PlayerControls {
    pub keys: DirectionKeys,
    /// Pointer position in world coordinates
    pub pointer: Vec2,
    /// Wall-clock time of the last pointer move (ms)
    pub pointer_moved_at_ms: f64,
    pub fire_held: bool,
    /// Current wall-clock time (ms)
    pub now_ms: f64,
}

impl Player {
    /// Run one frame of player control. Returns the projectile fired, if any.
    pub fn update(&mut self, controls: &PlayerControls, dt: f32) -> Option<Projectile> {
        self.body.vel = controls.keys.movement() * self.speed;

        let pointer_recent = controls.now_ms - controls.pointer_moved_at_ms < POINTER_AIM_WINDOW_MS;
        if pointer_recent {
            let to_pointer = controls.pointer - self.body.pos;
            if to_pointer != Vec2::ZERO {
                self.angle = crate::heading_of(to_pointer);
            }
        } else {
            let aim = controls.keys.aim();
            if aim != Vec2::ZERO {
                self.angle = crate::heading_of(aim);
            }
        }

        self.shoot_cooldown -= dt;
        let shot = if self.shoot_cooldown <= 0.0 && controls.fire_held {
            self.shoot_cooldown = PLAYER_FIRE_COOLDOWN;
            Some(self.shoot(controls.now_ms))
        } else {
            None
        };

        self.body.integrate(dt);
        self.distance_traveled += (self.body.vel * dt).length();
        self.body.heal(PLAYER_REGEN_RATE * dt);

        if self.invincible {
            self.invincible_time -= dt;
            if self.invincible_time <= 0.0 {
                self.invincible = false;
            }
        }

        shot
    }

    /// Build a projectile leaving the player's nose
    pub fn shoot(&self, now_ms: f64) -> Projectile {
        let nose = self.body.pos + polar_to_cartesian(self.body.radius + MUZZLE_GAP, self.angle);
        let speed = PLAYER_SHOT_BASE_SPEED + self.level as f32 * PLAYER_SHOT_SPEED_PER_LEVEL;
        Projectile::new(
            nose,
            self.angle,
            speed,
            self.homing_active(now_ms),
            Shooter::Player,
            self.body.tint,
        )
    }

    /// Homing buff is live until its wall-clock deadline
    pub fn homing_active(&self, now_ms: f64) -> bool {
        self.homing_buff && now_ms < self.homing_until_ms
    }

    /// XP required to reach the next level
    pub fn xp_needed(&self) -> u32 {
        self.level * XP_PER_LEVEL
    }

    /// Add XP, levelling up at most once per call
    pub fn gain_xp(&mut self, amount: u32, now_ms: f64, events: &mut Vec<GameEvent>) {
        self.xp += amount;
        if self.xp >= self.xp_needed() {
            self.level_up(now_ms, events);
        }
    }

    fn level_up(&mut self, now_ms: f64, events: &mut Vec<GameEvent>) {
        self.level += 1;
        self.xp = self.xp.saturating_sub((self.level - 1) * XP_PER_LEVEL);
        self.speed += LEVEL_UP_SPEED_BONUS;
        self.shoot_cooldown = (self.shoot_cooldown - LEVEL_UP_COOLDOWN_CUT).max(MIN_FIRE_COOLDOWN);
        log::info!("Level up: now level {} (speed {})", self.level, self.speed);
        events.push(GameEvent::LevelUp { level: self.level });

        if self.level % HOMING_BUFF_LEVEL_STEP == 0 {
            self.homing_buff = true;
            self.homing_until_ms = now_ms + HOMING_BUFF_DURATION_MS;
            log::info!("Homing buff active until {} ms", self.homing_until_ms);
            events.push(GameEvent::HomingBuff {
                until_ms: self.homing_until_ms,
            });
        }
    }

    /// Reset in place after being killed
    pub fn respawn(&mut self) {
        self.body.health = MAX_HEALTH;
        self.body.pos = Vec2::ZERO;
        self.xp = self.xp.saturating_sub(DEATH_XP_PENALTY);
        self.kill_streak = 0;
        self.distance_traveled = 0.0;
        self.invincible = true;
        self.invincible_time = RESPAWN_INVINCIBILITY;
    }
}
