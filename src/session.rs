//! Game session: the orchestrator around the simulation
//!
//! Owns the `GameState` plus an injected high score store, and exposes the
//! intent entry points the platform layer pushes into (movement, shoot,
//! start/restart, pause). Nothing in here touches the DOM or any global.

use crate::highscore::HighScoreStore;
use crate::platform::KeyAction;
use crate::sim::{GameEvent, GamePhase, GameState, Playfield, tick};
use crate::tuning::Tuning;

pub struct Session<S: HighScoreStore> {
    state: GameState,
    store: S,
}

impl<S: HighScoreStore> Session<S> {
    /// Create a session at the menu, loading the persisted high score
    pub fn new(store: S, field: Playfield, tuning: Tuning) -> Self {
        let mut state = GameState::new(field, tuning);
        state.high_score = store.load();
        log::info!("Session ready (high score {})", state.high_score);
        Self { state, store }
    }

    /// Read-only view for the render layer
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase.phase()
    }

    /// Begin a fresh run from the menu
    pub fn start(&mut self) {
        if !self.state.phase.is(GamePhase::Menu) {
            log::warn!("Start ignored in {} state", self.phase());
            return;
        }
        self.begin_run();
    }

    /// Begin a fresh run after game over
    pub fn restart(&mut self) {
        if !self.state.phase.is(GamePhase::GameOver) {
            log::warn!("Restart ignored in {} state", self.phase());
            return;
        }
        self.persist_high_score();
        self.begin_run();
    }

    /// Abandon the current run and return to the menu
    pub fn reset(&mut self) {
        self.persist_high_score();
        self.state.reset_run();
        self.state.phase.reset();
        log::info!("Session reset to menu");
    }

    fn begin_run(&mut self) {
        self.state.reset_run();
        match self.state.phase.transition(GamePhase::Playing) {
            Ok(()) => log::info!("Run started"),
            Err(e) => log::warn!("Run not started: {e}"),
        }
    }

    /// Playing <-> Paused; ignored elsewhere
    pub fn toggle_pause(&mut self) {
        self.state.phase.toggle_pause();
        log::debug!("Pause toggled, now {}", self.phase());
    }

    pub fn set_moving_left(&mut self, moving: bool) {
        self.state.player.moving_left = moving;
    }

    pub fn set_moving_right(&mut self, moving: bool) {
        self.state.player.moving_right = moving;
    }

    /// Fire if playing and off cooldown. Returns whether a shot was fired.
    pub fn shoot(&mut self, now_ms: f64) -> bool {
        self.state.phase.is(GamePhase::Playing) && self.state.player.shoot(now_ms)
    }

    /// Key pressed
    pub fn key_down(&mut self, action: KeyAction, now_ms: f64) {
        match action {
            KeyAction::MoveLeft => self.set_moving_left(true),
            KeyAction::MoveRight => self.set_moving_right(true),
            KeyAction::Shoot => {
                self.shoot(now_ms);
            }
            KeyAction::Pause => self.toggle_pause(),
            KeyAction::Confirm => match self.phase() {
                GamePhase::Menu => self.start(),
                GamePhase::GameOver => self.restart(),
                _ => {}
            },
        }
    }

    /// Key released
    pub fn key_up(&mut self, action: KeyAction) {
        match action {
            KeyAction::MoveLeft => self.set_moving_left(false),
            KeyAction::MoveRight => self.set_moving_right(false),
            _ => {}
        }
    }

    /// Advance one frame of `dt` seconds
    pub fn tick(&mut self, dt: f32) -> Vec<GameEvent> {
        let events = tick(&mut self.state, dt.max(0.0));

        for event in &events {
            match event {
                GameEvent::LevelCleared { level } => log::info!("Level {} reached", level),
                GameEvent::GameOver { score } => {
                    log::info!("Game over: {} points, level {}", score, self.state.level);
                    if self.state.new_high_score {
                        self.store.save(self.state.high_score);
                    }
                }
                _ => {}
            }
        }

        events
    }

    /// Apply new playfield dimensions
    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.resize(Playfield::new(width, height));
    }

    fn persist_high_score(&mut self) {
        if self.state.settle_high_score() {
            self.store.save(self.state.high_score);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscore::MemoryStore;

    const DT: f32 = 1.0 / 60.0;

    fn session() -> Session<MemoryStore> {
        Session::new(MemoryStore::with_score(50), Playfield::default(), Tuning::default())
    }

    fn force_game_over(s: &mut Session<MemoryStore>) {
        let state = s.state_mut();
        state.lives = 1;
        let line = state.player.pos.y;
        for inv in &mut state.swarm.invaders {
            inv.pos.y = line;
        }
        s.tick(DT);
    }

    #[test]
    fn test_loads_high_score() {
        assert_eq!(session().state().high_score, 50);
    }

    #[test]
    fn test_start_and_pause_flow() {
        let mut s = session();
        assert_eq!(s.phase(), GamePhase::Menu);
        s.toggle_pause();
        assert_eq!(s.phase(), GamePhase::Menu);

        s.key_down(KeyAction::Confirm, 0.0);
        assert_eq!(s.phase(), GamePhase::Playing);
        s.key_down(KeyAction::Pause, 0.0);
        assert_eq!(s.phase(), GamePhase::Paused);
        s.key_down(KeyAction::Confirm, 0.0);
        assert_eq!(s.phase(), GamePhase::Paused);
        s.key_down(KeyAction::Pause, 0.0);
        assert_eq!(s.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_shoot_only_while_playing() {
        let mut s = session();
        assert!(!s.shoot(0.0));
        s.start();
        assert!(s.shoot(0.0));
        assert!(!s.shoot(100.0));
        s.toggle_pause();
        assert!(!s.shoot(1000.0));
        assert_eq!(s.state().player.projectiles.len(), 1);
    }

    #[test]
    fn test_movement_keys() {
        let mut s = session();
        s.start();
        let x = s.state().player.pos.x;
        s.key_down(KeyAction::MoveLeft, 0.0);
        s.tick(DT);
        assert!(s.state().player.pos.x < x);
        s.key_up(KeyAction::MoveLeft);
        let x = s.state().player.pos.x;
        s.tick(DT);
        assert_eq!(s.state().player.pos.x, x);
    }

    #[test]
    fn test_game_over_persists_new_high_score() {
        let mut s = session();
        s.start();
        s.state_mut().score = 120;
        force_game_over(&mut s);
        assert_eq!(s.phase(), GamePhase::GameOver);
        assert_eq!(s.store().load(), 120);
        assert_eq!(s.store().saves, 1);

        // Restart does not save again
        s.key_down(KeyAction::Confirm, 0.0);
        assert_eq!(s.phase(), GamePhase::Playing);
        assert_eq!(s.store().saves, 1);
        assert_eq!(s.state().score, 0);
        assert_eq!(s.state().lives, 3);
        assert_eq!(s.state().high_score, 120);
    }

    #[test]
    fn test_game_over_below_high_score_not_saved() {
        let mut s = session();
        s.start();
        s.state_mut().score = 20;
        force_game_over(&mut s);
        assert_eq!(s.phase(), GamePhase::GameOver);
        assert_eq!(s.store().saves, 0);
        assert!(!s.state().new_high_score);
    }

    #[test]
    fn test_start_and_restart_guards() {
        let mut s = session();
        s.restart();
        assert_eq!(s.phase(), GamePhase::Menu);
        s.start();
        s.state_mut().score = 10;
        s.start();
        assert_eq!(s.phase(), GamePhase::Playing);
        assert_eq!(s.state().score, 10);
    }

    #[test]
    fn test_reset_returns_to_menu_and_saves() {
        let mut s = session();
        s.start();
        s.state_mut().score = 90;
        s.reset();
        assert_eq!(s.phase(), GamePhase::Menu);
        assert_eq!(s.store().load(), 90);
        assert_eq!(s.state().score, 0);
    }

    #[test]
    fn test_negative_dt_is_ignored() {
        let mut s = session();
        s.start();
        s.set_moving_right(true);
        let x = s.state().player.pos.x;
        s.tick(-1.0);
        assert_eq!(s.state().player.pos.x, x);
    }

    #[test]
    fn test_resize() {
        let mut s = session();
        s.resize(400.0, 300.0);
        assert_eq!(s.state().field, Playfield::new(400.0, 300.0));
    }
}
