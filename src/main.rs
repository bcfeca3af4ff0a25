//! Monster Toss entry point
//!
//! Native builds run a headless scripted session: flick the ball at the
//! monster a few times (and off-screen once in a while) and log every event
//! the arena emits. The browser build starts from `platform::web` instead.
//!
//! Usage: `monster-toss [config.json] [seed]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use glam::Vec2;
    use monster_toss::sim::{ArenaState, ContactBody};
    use monster_toss::{Arena, ArenaConfig, ArenaError};

    const FRAME_DT: f32 = 1.0 / 60.0;
    const SESSION_FRAMES: u32 = 60 * 20;
    /// Frames between throw attempts
    const THROW_EVERY: u32 = 45;
    /// Launch speed the scripted thrower aims for (px/s)
    const THROW_SPEED: f32 = 900.0;

    pub fn run() -> Result<(), ArenaError> {
        let mut args = std::env::args().skip(1);
        let mut config = match args.next() {
            Some(path) => ArenaConfig::load(path)?,
            None => ArenaConfig::default(),
        };
        if let Some(seed) = args.next() {
            config.seed = seed
                .parse()
                .map_err(|_| ArenaError::invalid("seed", format!("`{seed}` is not a u64")))?;
        }

        let mut arena = Arena::new(config)?;
        let mut throws = 0u32;

        for frame in 0..SESSION_FRAMES {
            if frame % THROW_EVERY == 0 && throw(&mut arena, throws) {
                throws += 1;
            }

            arena.on_frame(FRAME_DT);

            // Stand-in for the engine's narrow phase
            if let Some((a, b)) = detect_overlap(arena.state()) {
                arena.on_physical_contact(a, b);
            }

            for event in arena.drain_events() {
                log::info!("{}", serde_json::to_string(&event)?);
            }
        }

        log::info!(
            "Session over: score {} from {} throws",
            arena.state().score,
            throws
        );
        Ok(())
    }

    /// Flick a resting ball; every fourth throw goes off the right edge
    fn throw(arena: &mut Arena, count: u32) -> bool {
        let state = arena.state();
        let Some(ball) = state.ball() else {
            return false;
        };
        if ball.vel != Vec2::ZERO {
            return false;
        }

        let from = ball.pos;
        let target = if count % 4 == 3 {
            from + Vec2::new(state.config.arena_width, 0.0)
        } else {
            match state.monster() {
                Some(monster) => monster.pos,
                None => return false,
            }
        };
        let drag = (target - from).normalize_or_zero() * THROW_SPEED / state.config.impulse_scale;

        arena.on_touch_begin(from);
        arena.on_touch_end(from + drag);
        true
    }

    /// Box overlap between ball and monster
    fn detect_overlap(state: &ArenaState) -> Option<(ContactBody, ContactBody)> {
        let ball = state.ball()?;
        let monster = state.monster()?;
        let gap = (ball.pos - monster.pos).abs();
        let reach = ball.half_extents + monster.half_extents;
        (gap.x < reach.x && gap.y < reach.y)
            .then(|| (ContactBody::of(ball), ContactBody::of(monster)))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Monster Toss (native) starting...");

    if let Err(e) = native::run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_start, this is just to satisfy the compiler
}
