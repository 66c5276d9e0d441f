//! Triangle Arena entry point
//!
//! The browser build is driven from the page through `platform::web::Arena`.
//! Natively this runs a scripted headless session and logs how it went.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec2;
    use triangle_arena::platform::random_seed;
    use triangle_arena::sim::{ArenaState, GameEvent, TickInput, tick};
    use triangle_arena::{Leaderboard, Settings};

    /// Simulated frame rate and session length
    const FRAME_DT: f32 = 1.0 / 60.0;
    const SESSION_SECS: f32 = 120.0;

    env_logger::init();
    log::info!("Triangle Arena (native, headless) starting...");

    let settings = Settings::load();
    let seed = settings.seed.unwrap_or_else(random_seed);
    let mut leaderboard = Leaderboard::new(settings.leaderboard_interval);
    let mut state = ArenaState::new(seed, settings);
    log::info!("Arena initialized with seed: {}", seed);

    let mut input = TickInput {
        fire_held: true,
        ..Default::default()
    };
    let mut leaderboard_rng = rand_pcg::Pcg32::new(seed, 0xa02b_dbf7_bb3c_0a7);
    let mut kills = 0u32;
    let mut deaths = 0u32;

    let frames = (SESSION_SECS / FRAME_DT) as u32;
    for frame in 0..frames {
        let now_ms = frame as f64 * FRAME_DT as f64 * 1000.0;

        // Strafe in a square, switching direction every two seconds
        let phase = (frame / 120) % 4;
        input.keys.w = phase == 0;
        input.keys.d = phase == 1;
        input.keys.s = phase == 2;
        input.keys.a = phase == 3;

        // Aim with the pointer at the nearest bot
        let player_pos = state.player.body.pos;
        if let Some(bot) = state.bots.iter().min_by(|a, b| {
            a.body
                .pos
                .distance_squared(player_pos)
                .partial_cmp(&b.body.pos.distance_squared(player_pos))
                .unwrap_or(std::cmp::Ordering::Equal)
        }) {
            input.pointer = bot.body.pos;
            input.pointer_moved_at_ms = now_ms;
        } else {
            input.pointer = player_pos + Vec2::X;
        }
        input.now_ms = now_ms;

        tick(&mut state, &input, FRAME_DT);
        if leaderboard.update(FRAME_DT, state.player.xp, &mut leaderboard_rng) {
            log::debug!("Leaderboard rank: {:?}", leaderboard.player_rank());
        }

        for event in state.drain_events() {
            match event {
                GameEvent::BotKilled { .. } => kills += 1,
                GameEvent::PlayerDied => deaths += 1,
                other => {
                    if let Some(text) = other.notification() {
                        log::info!("{}", text);
                    }
                }
            }
        }
    }

    log::info!(
        "Session over after {} frames: score {}, level {}, {} kills, {} deaths, {} bots alive",
        state.frame,
        state.player.score,
        state.player.level,
        kills,
        deaths,
        state.bots.len()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}
