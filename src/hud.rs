//! HUD and minimap feeds
//!
//! Plain numbers for the DOM overlay. Drawing stays on the page.

use glam::Vec2;
use serde::Serialize;

use crate::sim::{ArenaState, Player};

/// Progression panel values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressionHud {
    pub level: u32,
    pub xp: u32,
    pub xp_needed: u32,
    /// XP bar fill, 0-100
    pub xp_percent: f32,
    pub kill_streak: u32,
    pub score: u64,
}

impl ProgressionHud {
    pub fn from_player(player: &Player) -> Self {
        let xp_needed = player.xp_needed();
        let xp_percent = (player.xp as f32 / xp_needed as f32 * 100.0).min(100.0);
        Self {
            level: player.level,
            xp: player.xp,
            xp_needed,
            xp_percent,
            kill_streak: player.kill_streak,
            score: player.score,
        }
    }
}

/// Minimap dots for every bot near enough to show, in minimap pixels.
///
/// The player sits at the center of a `size` × `size` map; bots are placed by
/// their offset from the player times `scale`.
pub fn minimap_blips(state: &ArenaState, size: f32, scale: f32) -> Vec<Vec2> {
    let center = Vec2::splat(size / 2.0);
    let origin = state.player.body.pos;

    state
        .bots
        .iter()
        .filter_map(|bot| {
            let offset = (bot.body.pos - origin) * scale;
            (offset.x.abs() < center.x && offset.y.abs() < center.y).then_some(center + offset)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::{Bot, BotTier};

    #[test]
    fn test_progression_fill() {
        let mut player = Player::default();
        player.xp = 50;
        let hud = ProgressionHud::from_player(&player);
        assert_eq!(hud.xp_needed, 100);
        assert_eq!(hud.xp_percent, 50.0);

        // Oversized XP from a single large award still caps the bar
        player.xp = 350;
        assert_eq!(ProgressionHud::from_player(&player).xp_percent, 100.0);
    }

    #[test]
    fn test_minimap_blips_clip_to_window() {
        let mut state = ArenaState::new(
            9,
            Settings {
                initial_bots: 0,
                ..Default::default()
            },
        );
        state.player.body.pos = Vec2::new(100.0, 100.0);
        for (i, pos) in [Vec2::new(300.0, 100.0), Vec2::new(100.0, 2000.0)].into_iter().enumerate() {
            let id = state.next_bot_id();
            state
                .bots
                .push(Bot::new(id, pos, BotTier::Noob, format!("bot{i}"), 0.0));
        }

        let blips = minimap_blips(&state, 150.0, 0.05);
        assert_eq!(blips, vec![Vec2::new(85.0, 75.0)]);
    }
}
