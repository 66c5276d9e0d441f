//! Browser bindings
//!
//! The page owns the canvas, the DOM overlay and the event listeners. It
//! forwards input here, calls [`Arena::frame`] from `requestAnimationFrame`,
//! and reads back JSON views to draw.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use super::{now_ms, random_seed};
use crate::hud::{ProgressionHud, minimap_blips};
use crate::leaderboard::{Leaderboard, LeaderboardEntry};
use crate::settings::Settings;
use crate::sim::{ArenaSnapshot, ArenaState, TickInput, tick};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        log::warn!("Keeping existing logger: {}", e);
    }
}

fn to_js<E: std::fmt::Display>(e: E) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Overlay data: HUD panel, leaderboard rows and minimap dots
#[derive(Serialize)]
struct Overlay<'a> {
    progression: ProgressionHud,
    leaderboard: &'a [LeaderboardEntry],
    minimap: Vec<(f32, f32)>,
}

/// One running arena, driven by the page
#[wasm_bindgen]
pub struct Arena {
    state: ArenaState,
    input: TickInput,
    leaderboard: Leaderboard,
    /// Randomness for UI-only feeds, kept apart from the simulation stream
    ui_rng: Pcg32,
    /// Last pointer position in canvas pixels
    pointer_screen: Option<Vec2>,
    last_timestamp: Option<f64>,
}

#[wasm_bindgen]
impl Arena {
    /// Create an arena from an optional JSON settings document
    #[wasm_bindgen(constructor)]
    pub fn new(settings_json: Option<String>) -> Result<Arena, JsValue> {
        let settings = match settings_json {
            Some(json) => Settings::from_json(&json).map_err(to_js)?,
            None => Settings::default(),
        };
        let seed = settings.seed.unwrap_or_else(random_seed);
        log::info!("Arena initialized with seed: {}", seed);

        let leaderboard = Leaderboard::new(settings.leaderboard_interval);
        Ok(Self {
            state: ArenaState::new(seed, settings),
            input: TickInput::default(),
            leaderboard,
            ui_rng: Pcg32::seed_from_u64(seed.wrapping_add(1)),
            pointer_screen: None,
            last_timestamp: None,
        })
    }

    /// Canvas was resized
    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.settings.set_viewport(width, height);
    }

    /// Forward a `KeyboardEvent.key` press or release
    pub fn set_key(&mut self, key: &str, down: bool) {
        let keys = &mut self.input.keys;
        match key {
            "ArrowUp" => keys.arrow_up = down,
            "ArrowDown" => keys.arrow_down = down,
            "ArrowLeft" => keys.arrow_left = down,
            "ArrowRight" => keys.arrow_right = down,
            " " => self.input.fire_held = down,
            other => match other.to_lowercase().as_str() {
                "w" => keys.w = down,
                "a" => keys.a = down,
                "s" => keys.s = down,
                "d" => keys.d = down,
                _ => {}
            },
        }
    }

    /// Pointer moved to canvas pixel (x, y)
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.pointer_screen = Some(Vec2::new(x, y));
        self.input.pointer_moved_at_ms = now_ms();
    }

    /// Mouse button held or released
    pub fn set_fire(&mut self, held: bool) {
        self.input.fire_held = held;
    }

    /// Run one simulation frame for a `requestAnimationFrame` timestamp.
    ///
    /// Call `drain_events_json` each frame; undrained events past
    /// `MAX_PENDING_EVENTS` are dropped oldest first.
    pub fn frame(&mut self, timestamp: f64) {
        let dt = match self.last_timestamp {
            Some(last) => ((timestamp - last) / 1000.0).max(0.0) as f32,
            None => 0.0,
        };
        self.last_timestamp = Some(timestamp);

        // The camera keeps the player at the canvas center
        if let Some(screen) = self.pointer_screen {
            let half = Vec2::new(
                self.state.settings.viewport_width,
                self.state.settings.viewport_height,
            ) / 2.0;
            self.input.pointer = self.state.player.body.pos + (screen - half);
        }
        self.input.now_ms = now_ms();

        tick(&mut self.state, &self.input, dt);
        self.leaderboard
            .update(dt, self.state.player.xp, &mut self.ui_rng);
    }

    /// Entities for the canvas renderer
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        ArenaSnapshot::capture(&self.state, now_ms())
            .to_json()
            .map_err(to_js)
    }

    /// HUD, leaderboard and minimap data for the DOM overlay
    pub fn overlay_json(&self) -> Result<String, JsValue> {
        let settings = &self.state.settings;
        let overlay = Overlay {
            progression: ProgressionHud::from_player(&self.state.player),
            leaderboard: &self.leaderboard.entries,
            minimap: minimap_blips(&self.state, settings.minimap_size, settings.minimap_scale)
                .into_iter()
                .map(|b| (b.x, b.y))
                .collect(),
        };
        serde_json::to_string(&overlay).map_err(to_js)
    }

    /// Events since the last call, with banner text where the HUD shows one
    pub fn drain_events_json(&mut self) -> Result<String, JsValue> {
        #[derive(Serialize)]
        struct Announced {
            #[serde(flatten)]
            event: crate::sim::GameEvent,
            notification: Option<&'static str>,
        }

        let events: Vec<_> = self
            .state
            .drain_events()
            .into_iter()
            .map(|event| Announced {
                notification: event.notification(),
                event,
            })
            .collect();
        serde_json::to_string(&events).map_err(to_js)
    }
}
