//! Leaderboard feed
//!
//! The overlay shows the player against four named rivals. Rival scores hover
//! around the player's own (XP × 10) and are re-rolled on a fixed interval.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Rivals listed alongside the player
pub const RIVAL_NAMES: [&str; 4] = ["Pythagoras", "Euclid", "TriangleMaster", "AcuteAngle"];

/// Maximum deviation of a rival score from the player's
pub const RIVAL_SPREAD: f64 = 1000.0;

/// A single leaderboard row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u64,
}

/// Periodically refreshed standings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leaderboard {
    /// Sorted descending by score
    pub entries: Vec<LeaderboardEntry>,
    /// Seconds between refreshes
    pub interval: f32,
    timer: f32,
}

impl Leaderboard {
    /// Create an empty leaderboard
    pub fn new(interval: f32) -> Self {
        Self {
            entries: Vec::new(),
            interval,
            timer: 0.0,
        }
    }

    /// Advance the refresh timer. Returns true if the entries were rebuilt.
    pub fn update<R: Rng + ?Sized>(&mut self, dt: f32, player_xp: u32, rng: &mut R) -> bool {
        self.timer += dt;
        if self.timer < self.interval {
            return false;
        }
        self.timer = 0.0;
        self.rebuild(player_xp, rng);
        true
    }

    /// Re-roll rival scores around the player's
    pub fn rebuild<R: Rng + ?Sized>(&mut self, player_xp: u32, rng: &mut R) {
        let base = player_xp as i64 * 10;

        self.entries.clear();
        self.entries.push(LeaderboardEntry {
            name: crate::consts::PLAYER_NAME.to_string(),
            score: base as u64,
        });
        for name in RIVAL_NAMES {
            let offset = (rng.random::<f64>() * 2.0 * RIVAL_SPREAD - RIVAL_SPREAD).floor() as i64;
            self.entries.push(LeaderboardEntry {
                name: name.to_string(),
                score: (base + offset).max(0) as u64,
            });
        }

        // Stable sort keeps the player ahead of rivals on ties
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
    }

    /// Rank of the player (1-indexed), if the board has been built
    pub fn player_rank(&self) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.name == crate::consts::PLAYER_NAME)
            .map(|i| i + 1)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
