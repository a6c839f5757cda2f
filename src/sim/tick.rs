//! Per-frame simulation tick
//!
//! Core game loop: move entities, resolve hits, then apply life and level rules.

use super::collision::overlaps;
use super::phase::GamePhase;
use super::state::{GameEvent, GameState};

/// Advance the game state by `dt` seconds. Does nothing outside `Playing`.
pub fn tick(state: &mut GameState, dt: f32) -> Vec<GameEvent> {
    if !state.phase.is(GamePhase::Playing) {
        return Vec::new();
    }

    state.player.advance(dt);
    state.swarm.advance(dt);

    let mut events = resolve_hits(state);

    if state.swarm.check_bottom_breach(state.player.pos.y) {
        events.push(lose_life(state));
    } else if state.swarm.is_empty() {
        state.next_level();
        log::debug!("Swarm cleared, now on level {}", state.level);
        events.push(GameEvent::LevelCleared { level: state.level });
    }

    events
}

/// Test every active projectile against the swarm. A projectile stops at its
/// first hit; both it and the invader are removed and the score is credited.
pub fn resolve_hits(state: &mut GameState) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let swarm = &mut state.swarm;
    let score = &mut state.score;

    state.player.projectiles.retain_mut(|shot| {
        if !shot.active {
            return false;
        }
        let bounds = shot.bounds();

        // Newest invaders first, so removal never shifts an unvisited index
        for i in (0..swarm.invaders.len()).rev() {
            if !overlaps(&bounds, &swarm.invaders[i].bounds()) {
                continue;
            }
            if let Some(invader) = swarm.remove_at(i) {
                let points = invader.kind.score_value();
                *score += points;
                events.push(GameEvent::InvaderDestroyed {
                    kind: invader.kind,
                    points,
                });
            }
            shot.deactivate();
            return false;
        }
        true
    });

    events
}

/// Swarm reached the player line: spend a life, then either end the run or
/// soft-reset the current level.
fn lose_life(state: &mut GameState) -> GameEvent {
    state.lives = state.lives.saturating_sub(1);

    if state.lives == 0 {
        if let Err(e) = state.phase.transition(GamePhase::GameOver) {
            log::warn!("Ignoring rejected game over transition: {e}");
        }
        state.settle_high_score();
        log::debug!("Game over at level {} with {} points", state.level, state.score);
        return GameEvent::GameOver { score: state.score };
    }

    state.soft_reset();
    log::debug!("Life lost, {} remaining", state.lives);
    GameEvent::LifeLost {
        lives_left: state.lives,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Invader, InvaderType, Playfield, Projectile, ProjectileKind};
    use crate::tuning::Tuning;
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    fn playing() -> GameState {
        let mut state = GameState::new(Playfield::default(), Tuning::default());
        state.phase.transition(GamePhase::Playing).unwrap();
        state
    }

    fn lone_cheese(state: &mut GameState) {
        state.swarm.invaders = vec![Invader::new(
            Vec2::new(100.0, 100.0),
            Vec2::new(40.0, 40.0),
            InvaderType::Cheese,
        )];
    }

    fn shot_at(x: f32, y: f32) -> Projectile {
        Projectile::new(
            Vec2::new(x, y),
            Vec2::new(5.0, 10.0),
            7.0,
            ProjectileKind::Primary,
        )
    }

    /// Push every invader's bottom edge onto the player line
    fn breach(state: &mut GameState) {
        let line = state.player.pos.y;
        for inv in &mut state.swarm.invaders {
            inv.pos.y = line;
        }
    }

    #[test]
    fn test_hit_scores_and_removes_both() {
        let mut state = playing();
        lone_cheese(&mut state);
        state.player.projectiles.push(shot_at(100.0, 100.0));

        let events = resolve_hits(&mut state);

        assert_eq!(state.score, 20);
        assert!(state.swarm.is_empty());
        assert!(state.player.projectiles.is_empty());
        assert_eq!(
            events,
            vec![GameEvent::InvaderDestroyed {
                kind: InvaderType::Cheese,
                points: 20
            }]
        );
    }

    #[test]
    fn test_projectile_stops_at_first_hit() {
        let mut state = playing();
        // Two overlapping invaders under one shot
        state.swarm.invaders = vec![
            Invader::new(Vec2::new(100.0, 100.0), Vec2::splat(40.0), InvaderType::Regular),
            Invader::new(Vec2::new(110.0, 100.0), Vec2::splat(40.0), InvaderType::Double),
        ];
        state.player.projectiles.push(shot_at(120.0, 110.0));

        resolve_hits(&mut state);

        assert_eq!(state.swarm.len(), 1);
        // Last invader is tested first
        assert_eq!(state.score, 30);
        assert_eq!(state.swarm.invaders[0].kind, InvaderType::Regular);
    }

    #[test]
    fn test_misses_and_inactive_shots() {
        let mut state = playing();
        lone_cheese(&mut state);
        let mut spent = shot_at(100.0, 100.0);
        spent.deactivate();
        state.player.projectiles.push(spent);
        state.player.projectiles.push(shot_at(400.0, 300.0));

        resolve_hits(&mut state);

        assert_eq!(state.score, 0);
        assert_eq!(state.swarm.len(), 1);
        assert_eq!(state.player.projectiles.len(), 1);
    }

    #[test]
    fn test_last_life_ends_game() {
        let mut state = playing();
        state.lives = 1;
        state.score = 70;
        breach(&mut state);
        let swarm_before: Vec<_> = state.swarm.invaders.iter().map(|i| i.pos).collect();
        let player_x = state.player.pos.x;

        let events = tick(&mut state, 0.0);

        assert_eq!(state.phase.phase(), GamePhase::GameOver);
        assert_eq!(state.lives, 0);
        assert_eq!(events, vec![GameEvent::GameOver { score: 70 }]);
        let swarm_after: Vec<_> = state.swarm.invaders.iter().map(|i| i.pos).collect();
        assert_eq!(swarm_before, swarm_after);
        assert_eq!(state.player.pos.x, player_x);
        assert_eq!(state.high_score, 70);
    }

    #[test]
    fn test_breach_with_lives_left_soft_resets() {
        let mut state = playing();
        state.lives = 2;
        state.score = 40;
        state.player.pos.x = 12.0;
        state.player.shoot(0.0);
        state.player.projectiles[0].pos.x = 790.0;
        breach(&mut state);

        let events = tick(&mut state, 0.0);

        assert_eq!(state.lives, 1);
        assert_eq!(state.phase.phase(), GamePhase::Playing);
        assert_eq!(state.level, 1);
        assert_eq!(state.score, 40);
        assert_eq!(state.swarm.len(), 40);
        assert_eq!(state.swarm.invaders[0].pos.y, 50.0);
        assert_eq!(state.player.pos.x, 400.0 - state.player.size.x / 2.0);
        assert!(state.player.projectiles.is_empty());
        assert_eq!(events, vec![GameEvent::LifeLost { lives_left: 1 }]);
    }

    #[test]
    fn test_cleared_swarm_advances_level() {
        let mut state = playing();
        state.score = 90;
        state.lives = 2;
        state.swarm.invaders.clear();

        let events = tick(&mut state, DT);

        assert_eq!(state.level, 2);
        assert_eq!(state.swarm.len(), 40);
        assert_eq!(state.swarm.speed, 35.0);
        assert_eq!(state.score, 90);
        assert_eq!(state.lives, 2);
        assert_eq!(events, vec![GameEvent::LevelCleared { level: 2 }]);
    }

    #[test]
    fn test_killing_last_invader_advances_level_same_tick() {
        let mut state = playing();
        lone_cheese(&mut state);
        // Shot sits just below the invader; one frame of travel puts it inside
        state.player.projectiles.push(shot_at(110.0, 142.0));

        let events = tick(&mut state, DT);

        assert_eq!(state.score, 20);
        assert_eq!(state.level, 2);
        assert_eq!(events.len(), 2);
        assert!(matches!(events[1], GameEvent::LevelCleared { level: 2 }));
    }

    #[test]
    fn test_tick_ignored_unless_playing() {
        let mut state = GameState::new(Playfield::default(), Tuning::default());
        state.player.moving_left = true;
        let x = state.player.pos.x;
        assert!(tick(&mut state, DT).is_empty());
        assert_eq!(state.player.pos.x, x);

        state.phase.transition(GamePhase::Playing).unwrap();
        state.phase.toggle_pause();
        tick(&mut state, DT);
        assert_eq!(state.player.pos.x, x);
        let first = state.swarm.invaders[0].pos;
        tick(&mut state, DT);
        assert_eq!(state.swarm.invaders[0].pos, first);
    }

    #[test]
    fn test_determinism() {
        let mut a = playing();
        let mut b = playing();
        for step in 0..600u32 {
            for state in [&mut a, &mut b] {
                state.player.moving_right = step % 90 < 45;
                state.player.moving_left = step % 90 >= 45;
                state.player.shoot(step as f64 * 1000.0 / 60.0);
                tick(state, DT);
            }
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.level, b.level);
        assert_eq!(a.swarm.len(), b.swarm.len());
        assert_eq!(a.player.pos, b.player.pos);
    }
}
