//! Phase transitions, scoring and lives
//!
//! Control actions in a phase that forbids them are no-ops and report `false`.

use super::state::{GameEvent, GamePhase, GameState};

/// Audible cue for something that happened in a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Brick,
    Wall,
    Paddle,
    LoseLife,
    GameOver,
    Win,
}

/// Begin a fresh round. Allowed from Idle, GameOver and GameClear.
pub fn start(state: &mut GameState) -> bool {
    if !state.phase.can_start() {
        log::debug!("start ignored in {:?}", state.phase);
        return false;
    }
    state.reset_round();
    state.phase = GamePhase::Running;
    log::info!("Round started (seed {})", state.seed);
    true
}

/// Toggle between Running and Paused; ignored in any other phase
pub fn toggle_pause(state: &mut GameState) -> bool {
    state.phase = match state.phase {
        GamePhase::Running => GamePhase::Paused,
        GamePhase::Paused => GamePhase::Running,
        other => {
            log::debug!("toggle_pause ignored in {:?}", other);
            return false;
        }
    };
    log::info!("{:?}", state.phase);
    true
}

/// Apply one collision event to score, lives and phase.
/// Returns the cues the event produced, in play order.
pub fn apply_event(state: &mut GameState, event: GameEvent) -> Vec<Cue> {
    if state.phase != GamePhase::Running {
        return Vec::new();
    }

    match event {
        GameEvent::BrickBroken { col, row, kind } => {
            state.score += kind.score();
            log::debug!("Brick ({col}, {row}) {kind:?} broken, score {}", state.score);
            vec![Cue::Brick]
        }
        GameEvent::WallBounced => vec![Cue::Wall],
        GameEvent::PaddleBounced => vec![Cue::Paddle],
        GameEvent::LifeLost => {
            state.lives = state.lives.saturating_sub(1);
            log::debug!("Life lost, {} remaining", state.lives);
            if state.lives == 0 {
                state.phase = GamePhase::GameOver;
                log::info!("Game over, final score {}", state.score);
                vec![Cue::LoseLife, Cue::GameOver]
            } else {
                state.reset_ball_and_paddle();
                vec![Cue::LoseLife]
            }
        }
        GameEvent::AllBricksCleared => {
            state.phase = GamePhase::GameClear;
            log::info!("All bricks cleared, final score {}", state.score);
            vec![Cue::Win]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::grid::BrickKind;

    fn running(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        assert!(start(&mut state));
        state
    }

    #[test]
    fn test_start_only_from_startable_phases() {
        let mut state = GameState::new(1);
        assert!(start(&mut state));
        assert_eq!(state.phase, GamePhase::Running);
        assert!(!start(&mut state));

        state.phase = GamePhase::Paused;
        assert!(!start(&mut state));
        assert_eq!(state.phase, GamePhase::Paused);

        for phase in [GamePhase::GameOver, GamePhase::GameClear] {
            state.phase = phase;
            state.score = 90;
            state.lives = 0;
            assert!(start(&mut state));
            assert_eq!(state.phase, GamePhase::Running);
            assert_eq!(state.score, 0);
            assert_eq!(state.lives, 3);
            assert_eq!(state.grid.count_alive(), 40);
        }
    }

    #[test]
    fn test_toggle_pause() {
        let mut state = GameState::new(1);
        assert!(!toggle_pause(&mut state));
        assert_eq!(state.phase, GamePhase::Idle);

        start(&mut state);
        assert!(toggle_pause(&mut state));
        assert_eq!(state.phase, GamePhase::Paused);
        assert!(toggle_pause(&mut state));
        assert_eq!(state.phase, GamePhase::Running);

        state.phase = GamePhase::GameOver;
        assert!(!toggle_pause(&mut state));
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_brick_scores() {
        let mut state = running(1);
        let cues = apply_event(
            &mut state,
            GameEvent::BrickBroken {
                col: 0,
                row: 0,
                kind: BrickKind::Special,
            },
        );
        assert_eq!(cues, vec![Cue::Brick]);
        assert_eq!(state.score, 20);
        apply_event(
            &mut state,
            GameEvent::BrickBroken {
                col: 0,
                row: 4,
                kind: BrickKind::Normal,
            },
        );
        assert_eq!(state.score, 30);
    }

    #[test]
    fn test_life_lost_resets_ball() {
        let mut state = running(1);
        state.bodies.ball.pos.y = 590.0;
        state.bodies.paddle.x = 0.0;
        let cues = apply_event(&mut state, GameEvent::LifeLost);
        assert_eq!(cues, vec![Cue::LoseLife]);
        assert_eq!(state.lives, 2);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.ball().pos.y, 550.0);
        assert_eq!(state.paddle().x, 340.0);
    }

    #[test]
    fn test_last_life_ends_game() {
        let mut state = running(1);
        state.lives = 1;
        let cues = apply_event(&mut state, GameEvent::LifeLost);
        assert_eq!(cues, vec![Cue::LoseLife, Cue::GameOver]);
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_clear_wins() {
        let mut state = running(1);
        let cues = apply_event(&mut state, GameEvent::AllBricksCleared);
        assert_eq!(cues, vec![Cue::Win]);
        assert_eq!(state.phase, GamePhase::GameClear);
    }

    #[test]
    fn test_events_ignored_outside_running() {
        let mut state = GameState::new(1);
        let cues = apply_event(&mut state, GameEvent::LifeLost);
        assert!(cues.is_empty());
        assert_eq!(state.lives, 3);
        assert_eq!(state.phase, GamePhase::Idle);
    }
}
