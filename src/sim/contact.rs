//! Contact classification and resolution
//!
//! The core never tests geometry. An external detector reports that two
//! bodies overlap; this module decides what that overlap means for the game.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::category::{Category, CategoryMask};
use super::entity::{Entity, EntityId};
use super::state::{ArenaEvent, ArenaState, Effect};

/// One side of a contact report, as the detector saw it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactBody {
    pub id: EntityId,
    pub category: CategoryMask,
}

impl ContactBody {
    pub fn new(id: EntityId, category: impl Into<CategoryMask>) -> Self {
        Self {
            id,
            category: category.into(),
        }
    }

    pub fn of(entity: &Entity) -> Self {
        Self::new(entity.id, entity.category())
    }

    #[inline]
    fn is(&self, category: Category) -> bool {
        self.category.category() == Some(category)
    }
}

/// Raw overlap between two bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactEvent {
    pub a: ContactBody,
    pub b: ContactBody,
}

impl ContactEvent {
    pub fn new(a: ContactBody, b: ContactBody) -> Self {
        Self { a, b }
    }

    pub fn between(a: &Entity, b: &Entity) -> Self {
        Self::new(ContactBody::of(a), ContactBody::of(b))
    }
}

/// What a contact did to the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactOutcome {
    /// Stale party (old ball or destroyed monster) or no ball; nothing changed
    Ignored,
    /// Ball touched something that is not a monster; ball reset only
    BallReset { old_ball: EntityId },
    /// Monster destroyed, ball reset, score bumped, respawn armed
    Hit {
        monster: EntityId,
        old_ball: EntityId,
        score: u64,
    },
}

/// Reacts to contact reports on behalf of the tick loop
pub trait ContactHandler {
    fn on_contact(&mut self, state: &mut ArenaState, event: &ContactEvent) -> ContactOutcome;
}

/// Stock handler: ball x monster is a hit; any ball contact resets the ball
#[derive(Debug, Clone, Copy, Default)]
pub struct ContactResolver;

impl ContactHandler for ContactResolver {
    fn on_contact(&mut self, state: &mut ArenaState, event: &ContactEvent) -> ContactOutcome {
        let Some(ball) = state.ball() else {
            log::debug!("Contact {:?} with no ball in play", event);
            return ContactOutcome::Ignored;
        };
        let ball_id = ball.id;
        let ball_contacts = ball.contact_mask;

        let (ball_side, candidate) = match (event.a.is(Category::Ball), event.b.is(Category::Ball)) {
            (true, false) => (event.a, event.b),
            (false, true) => (event.b, event.a),
            (true, true) if event.b.id == ball_id => (event.b, event.a),
            (true, true) => (event.a, event.b),
            (false, false) => {
                log::debug!("Contact {:?} has no ball party", event);
                return ContactOutcome::Ignored;
            }
        };

        if ball_side.id != ball_id {
            log::debug!(
                "Stale contact for ball {:?} (live ball is {:?})",
                ball_side.id,
                ball_id
            );
            return ContactOutcome::Ignored;
        }

        let is_monster = candidate.is(Category::Monster);
        if is_monster && state.spawner.monster_id() != Some(candidate.id) {
            log::debug!("Contact with stale monster {:?}", candidate.id);
            return ContactOutcome::Ignored;
        }

        if !(is_monster && ball_contacts.contains(Category::Monster)) {
            state.reset_ball();
            return ContactOutcome::BallReset { old_ball: ball_id };
        }

        let Some(monster) = state.spawner.hit(candidate.id) else {
            state.reset_ball();
            return ContactOutcome::BallReset { old_ball: ball_id };
        };
        let color = state.spawner.variant_of(&monster).hit_color;
        let pos = monster.entity.pos;
        state.emit(ArenaEvent::destroyed(&monster.entity));
        state.emit(ArenaEvent::Effect(Effect::Hit { pos, color }));

        state.reset_ball();

        state.score += 1;
        let score = state.score;
        state.emit(ArenaEvent::ScoreChanged { score });

        state.spawner.schedule_respawn(state.clock);
        log::info!(
            "Hit {} {:?} at ({:.0}, {:.0}), score {}",
            state.spawner.variant_of(&monster).name,
            monster.entity.id,
            pos.x,
            pos.y,
            score
        );

        ContactOutcome::Hit {
            monster: monster.entity.id,
            old_ball: ball_id,
            score,
        }
    }
}

/// How one body relates to another
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionLink {
    pub from: EntityId,
    pub from_category: Category,
    pub to: EntityId,
    pub to_category: Category,
    /// `from` physically blocks against `to`
    pub collides: bool,
    /// `from` is notified when touching `to`
    pub notifies: bool,
}

/// Pairwise collision/contact relationships of a set of bodies
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionGraph {
    /// Bodies whose collision mask has every bit set
    pub collides_with_everything: Vec<EntityId>,
    pub links: Vec<CollisionLink>,
}

impl CollisionGraph {
    pub fn link(&self, from: EntityId, to: EntityId) -> Option<&CollisionLink> {
        self.links.iter().find(|l| l.from == from && l.to == to)
    }
}

impl fmt::Display for CollisionGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for id in &self.collides_with_everything {
            writeln!(f, "#{} collides with everything", id.0)?;
        }
        for link in &self.links {
            // Already covered by the "everything" line
            let blanket = self.collides_with_everything.contains(&link.from);
            if link.collides && !blanket {
                writeln!(
                    f,
                    "{:?}#{} collides with {:?}#{}",
                    link.from_category, link.from.0, link.to_category, link.to.0
                )?;
            }
            if link.notifies {
                writeln!(
                    f,
                    "{:?}#{} notifies when contacting {:?}#{}",
                    link.from_category, link.from.0, link.to_category, link.to.0
                )?;
            }
        }
        Ok(())
    }
}

/// Offline analysis of which bodies collide with and notify on which
///
/// Only active bodies are considered. Self-pairs are skipped, as are pairs
/// whose first body is not dynamic.
pub fn describe_collision_graph(entities: &[&Entity]) -> CollisionGraph {
    let active: Vec<&Entity> = entities.iter().copied().filter(|e| e.active).collect();
    let mut graph = CollisionGraph::default();

    for from in &active {
        if from.collision_mask == CategoryMask::ALL {
            graph.collides_with_everything.push(from.id);
        }
        if !from.dynamic {
            continue;
        }
        for to in &active {
            if from.id == to.id {
                continue;
            }
            let to_bits = to.category().mask();
            graph.links.push(CollisionLink {
                from: from.id,
                from_category: from.category(),
                to: to.id,
                to_category: to.category(),
                collides: from.collision_mask.intersects(to_bits),
                notifies: from.contact_mask.intersects(to_bits),
            });
        }
    }

    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ArenaConfig;
    use crate::sim::category::CollisionMatrix;
    use crate::sim::spawn::SpawnPhase;
    use glam::Vec2;

    fn arena() -> ArenaState {
        ArenaState::new(ArenaConfig::default()).unwrap()
    }

    fn ball_vs_monster(state: &ArenaState) -> ContactEvent {
        ContactEvent::between(state.ball().unwrap(), state.monster().unwrap())
    }

    #[test]
    fn test_hit_on_monster() {
        let mut state = arena();
        let old_ball = state.ball().unwrap().id;
        let monster = state.monster().unwrap().id;
        state.drain_events();

        let event = ball_vs_monster(&state);
        let outcome = ContactResolver.on_contact(&mut state, &event);

        assert_eq!(
            outcome,
            ContactOutcome::Hit {
                monster,
                old_ball,
                score: 1
            }
        );
        assert_eq!(state.score, 1);
        assert_eq!(state.spawner.phase(), SpawnPhase::PendingRespawn);
        let ball = state.ball().unwrap();
        assert_ne!(ball.id, old_ball);
        assert_eq!(ball.pos, state.config.launch_pos);
    }

    #[test]
    fn test_hit_side_effect_order() {
        let mut state = arena();
        let monster = state.monster().unwrap().id;
        state.drain_events();

        let event = ball_vs_monster(&state);
        ContactResolver.on_contact(&mut state, &event);
        let events = state.drain_events();

        assert!(matches!(events[0], ArenaEvent::EntityDestroyed { id, category: Category::Monster, .. } if id == monster));
        assert!(matches!(events[1], ArenaEvent::Effect(Effect::Hit { .. })));
        assert!(matches!(events[2], ArenaEvent::EntityDestroyed { category: Category::Ball, .. }));
        assert!(matches!(events[3], ArenaEvent::EntityCreated { category: Category::Ball, .. }));
        assert!(matches!(events[4], ArenaEvent::Effect(Effect::Spark { .. })));
        assert_eq!(events[5], ArenaEvent::ScoreChanged { score: 1 });
        assert_eq!(events.len(), 6);
    }

    #[test]
    fn test_hit_color_matches_variant() {
        let mut state = arena();
        let expected = {
            let m = state.spawner.monster().unwrap();
            state.spawner.variant_of(m).hit_color
        };
        let event = ball_vs_monster(&state);
        ContactResolver.on_contact(&mut state, &event);
        assert!(state.events().iter().any(|e| matches!(
            e,
            ArenaEvent::Effect(Effect::Hit { color, .. }) if *color == expected
        )));
    }

    #[test]
    fn test_party_order_does_not_matter() {
        let mut state = arena();
        let event = ContactEvent::between(state.monster().unwrap(), state.ball().unwrap());
        let outcome = ContactResolver.on_contact(&mut state, &event);
        assert!(matches!(outcome, ContactOutcome::Hit { score: 1, .. }));
    }

    #[test]
    fn test_contact_with_unknown_category_resets_ball_only() {
        let mut state = arena();
        let old_ball = state.ball().unwrap().id;
        let monster = state.monster().unwrap().id;

        let wall = ContactBody::new(EntityId(500), CategoryMask(1 << 4));
        let event = ContactEvent::new(ContactBody::of(state.ball().unwrap()), wall);
        let outcome = ContactResolver.on_contact(&mut state, &event);

        assert_eq!(outcome, ContactOutcome::BallReset { old_ball });
        assert_eq!(state.score, 0);
        assert_eq!(state.spawner.phase(), SpawnPhase::Active);
        assert_eq!(state.monster().unwrap().id, monster);
        assert_ne!(state.ball().unwrap().id, old_ball);
    }

    #[test]
    fn test_stale_ball_is_ignored() {
        let mut state = arena();
        let stale = ball_vs_monster(&state);
        state.reset_ball();
        let live_ball = state.ball().unwrap().id;

        let outcome = ContactResolver.on_contact(&mut state, &stale);
        assert_eq!(outcome, ContactOutcome::Ignored);
        assert_eq!(state.score, 0);
        assert_eq!(state.ball().unwrap().id, live_ball);
    }

    #[test]
    fn test_second_contact_with_dead_monster_does_not_score() {
        let mut state = arena();
        let monster = ContactBody::of(state.monster().unwrap());

        let first = ball_vs_monster(&state);
        ContactResolver.on_contact(&mut state, &first);

        let ball = state.ball().unwrap().id;
        let again = ContactEvent::new(ContactBody::of(state.ball().unwrap()), monster);
        let outcome = ContactResolver.on_contact(&mut state, &again);
        assert_eq!(outcome, ContactOutcome::Ignored);
        assert_eq!(state.ball().unwrap().id, ball);
        assert_eq!(state.score, 1);
        assert_eq!(state.spawner.phase(), SpawnPhase::PendingRespawn);
    }

    #[test]
    fn test_no_ball_party_is_ignored() {
        let mut state = arena();
        let m = ContactBody::of(state.monster().unwrap());
        let outcome = ContactResolver.on_contact(&mut state, &ContactEvent::new(m, m));
        assert_eq!(outcome, ContactOutcome::Ignored);
    }

    #[test]
    fn test_collision_graph_default_masks() {
        let matrix = CollisionMatrix::default();
        let ball = Entity::new(EntityId(1), Category::Ball, &matrix, Vec2::ZERO, Vec2::ONE);
        let monster = Entity::new(EntityId(2), Category::Monster, &matrix, Vec2::ONE, Vec2::ONE);

        let graph = describe_collision_graph(&[&ball, &monster]);
        assert_eq!(graph.links.len(), 2);
        assert!(graph.collides_with_everything.is_empty());

        let link = graph.link(EntityId(1), EntityId(2)).unwrap();
        assert!(link.collides && link.notifies);
        let link = graph.link(EntityId(2), EntityId(1)).unwrap();
        assert!(link.collides && link.notifies);

        let text = graph.to_string();
        assert!(text.contains("Ball#1 collides with Monster#2"));
        assert!(text.contains("Monster#2 notifies when contacting Ball#1"));
    }

    #[test]
    fn test_collision_graph_skips_static_inactive_and_self() {
        let matrix = CollisionMatrix::default();
        let mut ball = Entity::new(EntityId(1), Category::Ball, &matrix, Vec2::ZERO, Vec2::ONE);
        let mut monster = Entity::new(EntityId(2), Category::Monster, &matrix, Vec2::ONE, Vec2::ONE);
        monster.dynamic = false;

        let graph = describe_collision_graph(&[&ball, &monster]);
        assert_eq!(graph.links.len(), 1);
        assert!(graph.link(EntityId(2), EntityId(1)).is_none());

        ball.collision_mask = CategoryMask::ALL;
        let text = describe_collision_graph(&[&ball, &monster]).to_string();
        assert!(text.contains("#1 collides with everything"));
        assert!(!text.contains("Ball#1 collides with"));
        assert!(text.contains("Ball#1 notifies when contacting Monster#2"));

        monster.destroy();
        let graph = describe_collision_graph(&[&ball, &monster]);
        assert!(graph.links.is_empty());
        assert_eq!(graph.collides_with_everything, vec![EntityId(1)]);
    }
}
