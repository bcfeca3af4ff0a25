//! Arena state and output events
//!
//! Everything the tick loop mutates lives in [`ArenaState`]: the ball, the
//! spawn scheduler, the score, the clock and the RNG. It is created at arena
//! start and only reset through [`ArenaState::new_game`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::category::{Category, CollisionMatrix};
use super::contact::describe_collision_graph;
use super::entity::{Entity, EntityId, EntityIds, create_ball};
use super::gesture::{GestureTracker, TouchEvent};
use super::spawn::{Rgb, SpawnScheduler};
use crate::config::ArenaConfig;
use crate::error::Result;

/// Cosmetic effect for the rendering layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    /// Monster hit burst
    Hit { pos: Vec2, color: Rgb },
    /// Sparkle where a fresh ball appears
    Spark { pos: Vec2 },
}

/// Output for external collaborators (renderer, HUD)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ArenaEvent {
    EntityCreated {
        id: EntityId,
        category: Category,
        pos: Vec2,
        half_extents: Vec2,
    },
    EntityDestroyed {
        id: EntityId,
        category: Category,
        pos: Vec2,
    },
    ScoreChanged {
        score: u64,
    },
    Effect(Effect),
}

impl ArenaEvent {
    pub fn created(entity: &Entity) -> Self {
        ArenaEvent::EntityCreated {
            id: entity.id,
            category: entity.category(),
            pos: entity.pos,
            half_extents: entity.half_extents,
        }
    }

    pub fn destroyed(entity: &Entity) -> Self {
        ArenaEvent::EntityDestroyed {
            id: entity.id,
            category: entity.category(),
            pos: entity.pos,
        }
    }
}

/// Complete arena state
#[derive(Debug, Clone)]
pub struct ArenaState {
    pub config: ArenaConfig,
    pub matrix: CollisionMatrix,
    pub(crate) rng: Pcg32,
    pub(crate) ids: EntityIds,
    /// Simulation time in seconds
    pub clock: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Monsters hit this game
    pub score: u64,
    ball: Option<Entity>,
    pub gesture: GestureTracker,
    pub spawner: SpawnScheduler,
    events: Vec<ArenaEvent>,
}

impl ArenaState {
    /// Create an arena with the default collision matrix
    pub fn new(config: ArenaConfig) -> Result<Self> {
        Self::with_matrix(config, CollisionMatrix::default())
    }

    /// Validate config, place the ball and spawn the first monster
    pub fn with_matrix(config: ArenaConfig, matrix: CollisionMatrix) -> Result<Self> {
        config.validate()?;
        let spawner = SpawnScheduler::from_config(&config)?;

        let mut state = Self {
            rng: Pcg32::seed_from_u64(config.seed),
            config,
            matrix,
            ids: EntityIds::default(),
            clock: 0.0,
            time_ticks: 0,
            score: 0,
            ball: None,
            gesture: GestureTracker::default(),
            spawner,
            events: Vec::new(),
        };
        state.start();
        Ok(state)
    }

    fn start(&mut self) {
        self.create_ball();
        self.spawn_monster();
        log::debug!(
            "Collision graph at start:\n{}",
            describe_collision_graph(&self.entities())
        );
    }

    /// Start over: score 0, fresh ball and monster, clock back to 0
    ///
    /// Entity ids keep counting so no id is reused.
    pub fn new_game(&mut self) {
        log::info!("New game (previous score {})", self.score);
        if let Some(mut ball) = self.ball.take() {
            ball.destroy();
            self.emit(ArenaEvent::destroyed(&ball));
        }
        if let Some(event) = self.spawner.monster().map(|m| ArenaEvent::destroyed(&m.entity)) {
            self.emit(event);
        }
        self.spawner.clear();
        self.gesture.reset();
        self.rng = Pcg32::seed_from_u64(self.config.seed);
        self.clock = 0.0;
        self.time_ticks = 0;
        self.score = 0;
        self.emit(ArenaEvent::ScoreChanged { score: 0 });
        self.start();
    }

    pub fn ball(&self) -> Option<&Entity> {
        self.ball.as_ref()
    }

    pub(crate) fn ball_mut(&mut self) -> Option<&mut Entity> {
        self.ball.as_mut()
    }

    pub fn monster(&self) -> Option<&Entity> {
        self.spawner.monster().map(|m| &m.entity)
    }

    /// Live entities, ball first
    pub fn entities(&self) -> Vec<&Entity> {
        self.ball().into_iter().chain(self.monster()).collect()
    }

    /// Place a resting ball at the launch point
    fn create_ball(&mut self) {
        let ball = create_ball(
            self.ids.next_id(),
            self.config.launch_pos,
            self.config.ball_half_extents,
            &self.matrix,
        );
        self.emit(ArenaEvent::created(&ball));
        self.emit(ArenaEvent::Effect(Effect::Spark { pos: ball.pos }));
        self.ball = Some(ball);
    }

    /// Replace the ball with a fresh one at the launch point
    pub fn reset_ball(&mut self) {
        if let Some(mut old) = self.ball.take() {
            log::debug!("Resetting ball {:?} at ({:.0}, {:.0})", old.id, old.pos.x, old.pos.y);
            old.destroy();
            self.emit(ArenaEvent::destroyed(&old));
        }
        self.gesture.reset();
        self.create_ball();
    }

    /// Spawn a monster if none is alive
    pub fn spawn_monster(&mut self) -> Option<EntityId> {
        let (id, event) = self
            .spawner
            .spawn(&mut self.ids, &self.matrix, &mut self.rng)
            .map(|m| (m.entity.id, ArenaEvent::created(&m.entity)))?;
        self.emit(event);
        Some(id)
    }

    /// Fire the respawn timer if due
    pub(crate) fn poll_respawn(&mut self) -> Option<EntityId> {
        let id = self
            .spawner
            .poll(self.clock, &mut self.ids, &self.matrix, &mut self.rng)?;
        if let Some(event) = self.spawner.monster().map(|m| ArenaEvent::created(&m.entity)) {
            self.emit(event);
        }
        Some(id)
    }

    /// Apply one buffered touch event
    pub fn apply_touch(&mut self, touch: TouchEvent) {
        match touch {
            TouchEvent::Begin(point) => {
                self.gesture.begin(point, self.clock);
                log::debug!("Collision graph:\n{}", describe_collision_graph(&self.entities()));
            }
            TouchEvent::Move(point) => {
                if let Some(ball) = self.ball_mut() {
                    ball.move_to(point);
                }
            }
            TouchEvent::End(point) => {
                let gesture = self.gesture.end(point, self.clock);
                let impulse = gesture.impulse(self.config.impulse_scale);
                log::debug!("Gesture {:?} -> impulse {:?}", gesture, impulse);
                if let Some(ball) = self.ball_mut() {
                    ball.apply_impulse(impulse);
                }
            }
            TouchEvent::Cancel(point) => {
                log::debug!("Touch cancelled at {:?}", point);
                self.gesture.cancel();
            }
        }
    }

    pub fn emit(&mut self, event: ArenaEvent) {
        self.events.push(event);
    }

    /// Events produced since the last drain
    pub fn events(&self) -> &[ArenaEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<ArenaEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::spawn::SpawnPhase;

    #[test]
    fn test_new_arena_has_ball_and_monster() {
        let state = ArenaState::new(ArenaConfig::default()).unwrap();
        assert_eq!(state.score, 0);
        assert_eq!(state.spawner.phase(), SpawnPhase::Active);

        let ball = state.ball().unwrap();
        assert_eq!(ball.pos, state.config.launch_pos);
        assert_eq!(ball.vel, Vec2::ZERO);
        assert_ne!(Some(ball.id), state.monster().map(|m| m.id));

        let created = state
            .events()
            .iter()
            .filter(|e| matches!(e, ArenaEvent::EntityCreated { .. }))
            .count();
        assert_eq!(created, 2);
    }

    #[test]
    fn test_invalid_config_refuses_to_start() {
        let config = ArenaConfig {
            catalog: Vec::new(),
            ..Default::default()
        };
        assert!(ArenaState::new(config).is_err());
    }

    #[test]
    fn test_reset_ball_new_id_and_cleared_gesture() {
        let mut state = ArenaState::new(ArenaConfig::default()).unwrap();
        let old = state.ball().unwrap().id;
        state.apply_touch(TouchEvent::Begin(Vec2::new(3.0, 3.0)));
        state.apply_touch(TouchEvent::End(Vec2::new(5.0, 5.0)));
        state.drain_events();

        state.reset_ball();
        let ball = state.ball().unwrap();
        assert_ne!(ball.id, old);
        assert_eq!(ball.pos, state.config.launch_pos);
        assert_eq!(ball.vel, Vec2::ZERO);
        assert_eq!(state.gesture.last_start, Vec2::ZERO);
        assert_eq!(state.gesture.last_end, Vec2::ZERO);

        let events = state.drain_events();
        assert!(matches!(events[0], ArenaEvent::EntityDestroyed { id, .. } if id == old));
        assert!(matches!(events[1], ArenaEvent::EntityCreated { category: Category::Ball, .. }));
        assert!(matches!(events[2], ArenaEvent::Effect(Effect::Spark { .. })));
    }

    #[test]
    fn test_touch_drag_moves_ball_then_flick() {
        let mut state = ArenaState::new(ArenaConfig::default()).unwrap();
        state.apply_touch(TouchEvent::Begin(Vec2::new(0.0, 100.0)));
        state.apply_touch(TouchEvent::Move(Vec2::new(20.0, 140.0)));
        assert_eq!(state.ball().unwrap().pos, Vec2::new(20.0, 140.0));

        state.apply_touch(TouchEvent::End(Vec2::new(21.0, 142.0)));
        assert_eq!(state.ball().unwrap().vel, Vec2::new(1050.0, 2100.0));
    }

    #[test]
    fn test_cancel_produces_no_impulse() {
        let mut state = ArenaState::new(ArenaConfig::default()).unwrap();
        state.apply_touch(TouchEvent::Begin(Vec2::ZERO));
        state.apply_touch(TouchEvent::Cancel(Vec2::new(30.0, 30.0)));
        state.apply_touch(TouchEvent::End(Vec2::new(30.0, 30.0)));
        assert_eq!(state.ball().unwrap().vel, Vec2::ZERO);
    }

    #[test]
    fn test_new_game_resets_score_and_keeps_ids_unique() {
        let mut state = ArenaState::new(ArenaConfig::default()).unwrap();
        let old_ball = state.ball().unwrap().id;
        let old_monster = state.monster().unwrap().id;
        state.score = 5;
        state.clock = 12.0;

        state.new_game();
        assert_eq!(state.score, 0);
        assert_eq!(state.clock, 0.0);
        assert_eq!(state.spawner.phase(), SpawnPhase::Active);
        let ball = state.ball().unwrap().id;
        let monster = state.monster().unwrap().id;
        assert!(ball != old_ball && ball != old_monster);
        assert!(monster != old_ball && monster != old_monster);
    }

    #[test]
    fn test_new_game_reports_old_and_new_entities() {
        let mut state = ArenaState::new(ArenaConfig::default()).unwrap();
        let old_ball = state.ball().unwrap().id;
        let old_monster = state.monster().unwrap().id;
        state.drain_events();

        state.new_game();
        let events = state.drain_events();
        let destroyed: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                ArenaEvent::EntityDestroyed { id, .. } => Some(*id),
                _ => None,
            })
            .collect();
        assert_eq!(destroyed, vec![old_ball, old_monster]);

        let created = events
            .iter()
            .filter(|e| matches!(e, ArenaEvent::EntityCreated { .. }))
            .count();
        assert_eq!(created, 2);
        assert!(events.contains(&ArenaEvent::ScoreChanged { score: 0 }));
    }

    #[test]
    fn test_same_seed_same_first_monster() {
        let config = ArenaConfig {
            seed: 1234,
            ..Default::default()
        };
        let a = ArenaState::new(config.clone()).unwrap();
        let b = ArenaState::new(config).unwrap();
        assert_eq!(a.monster().unwrap().pos, b.monster().unwrap().pos);
    }
}
