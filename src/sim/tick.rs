//! One simulation step
//!
//! Order within a tick is fixed: paddle input, collision resolution (look-ahead),
//! state machine, then the ball's move is committed.

use super::collision;
use super::machine::{self, Cue};
use super::state::{GameEvent, GamePhase, GameState, PaddleDirection};

/// Input intent for a single tick, sampled at tick start
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Held-key direction
    pub direction: PaddleDirection,
    /// Last pointer x in field coordinates; overrides `direction` when present
    pub pointer_x: Option<f32>,
}

/// What happened during a tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Whether physics ran at all
    pub advanced: bool,
    pub events: Vec<GameEvent>,
    pub cues: Vec<Cue>,
}

/// Advance the game by one tick. Does nothing unless the phase is Running.
pub fn tick(state: &mut GameState, input: &TickInput) -> TickReport {
    if state.phase != GamePhase::Running {
        return TickReport::default();
    }

    state.time_ticks += 1;
    let (w, h) = (state.field_width, state.field_height);

    match input.pointer_x {
        Some(x) => state.bodies.set_paddle_from_pointer(x, w),
        None => state.bodies.apply_paddle_input(input.direction, w),
    }

    let events = collision::resolve(&mut state.bodies, &mut state.grid, w, h);

    let mut cues = Vec::new();
    for &event in &events {
        cues.extend(machine::apply_event(state, event));
    }

    // A finished game freezes the ball where it is
    if state.phase == GamePhase::Running {
        state.bodies.advance();
    }

    TickReport {
        advanced: true,
        events,
        cues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clamp_paddle_x;
    use crate::sim::grid::{Brick, BrickGrid, BrickKind};
    use crate::sim::machine::{start, toggle_pause};
    use glam::Vec2;
    use proptest::prelude::*;

    fn running(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        start(&mut state);
        state
    }

    #[test]
    fn test_idle_does_not_advance() {
        let mut state = GameState::new(5);
        let before = state.bodies;
        let report = tick(&mut state, &TickInput::default());
        assert!(!report.advanced);
        assert_eq!(state.bodies, before);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_free_flight_moves_ball() {
        let mut state = running(5);
        let start_pos = state.ball().pos;
        let vel = state.ball().vel;
        let report = tick(&mut state, &TickInput::default());
        assert!(report.advanced);
        assert!(report.events.is_empty());
        assert_eq!(state.ball().pos, start_pos + vel);
    }

    #[test]
    fn test_special_brick_scenario() {
        let mut state = running(5);
        let target = state.grid.get(4, 0).unwrap().center();
        state.bodies.ball.pos = target;
        state.bodies.ball.vel = Vec2::new(4.0, -4.0);

        let report = tick(&mut state, &TickInput::default());
        assert_eq!(
            report.events,
            vec![GameEvent::BrickBroken {
                col: 4,
                row: 0,
                kind: BrickKind::Special
            }]
        );
        assert_eq!(report.cues, vec![Cue::Brick]);
        assert_eq!(state.score, 20);
        assert_eq!(state.grid.count_alive(), 39);
        // Bounce and the post-bounce move happen in the same tick
        assert_eq!(state.ball().pos, target + Vec2::new(4.0, 4.0));
    }

    #[test]
    fn test_last_life_scenario() {
        let mut state = running(5);
        state.lives = 1;
        state.bodies.paddle.x = 0.0;
        state.bodies.ball.pos = Vec2::new(600.0, 586.0);
        state.bodies.ball.vel = Vec2::new(4.0, 4.0);

        let report = tick(&mut state, &TickInput::default());
        assert_eq!(report.events, vec![GameEvent::LifeLost]);
        assert_eq!(report.cues, vec![Cue::LoseLife, Cue::GameOver]);
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);

        let frozen = state.ball().pos;
        assert_eq!(frozen, Vec2::new(600.0, 586.0));
        for _ in 0..10 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.ball().pos, frozen);
    }

    #[test]
    fn test_life_lost_with_lives_remaining_serves_again() {
        let mut state = running(5);
        state.bodies.paddle.x = 0.0;
        state.bodies.ball.pos = Vec2::new(600.0, 586.0);
        state.bodies.ball.vel = Vec2::new(4.0, 4.0);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.lives, 2);
        assert_eq!(state.phase, GamePhase::Running);
        // Reset to the serve position, then this tick's move
        let vel = state.ball().vel;
        assert_eq!(vel.y, -4.0);
        assert_eq!(state.ball().pos, Vec2::new(400.0, 550.0) + vel);
    }

    #[test]
    fn test_clear_scenario() {
        let mut state = running(5);
        let brick = Brick::new(3, 3);
        let target = brick.center();
        state.grid = BrickGrid::from_bricks(vec![brick]);
        state.bodies.ball.pos = target;
        state.bodies.ball.vel = Vec2::new(-4.0, -4.0);

        let report = tick(&mut state, &TickInput::default());
        assert_eq!(report.cues, vec![Cue::Brick, Cue::Win]);
        assert_eq!(state.phase, GamePhase::GameClear);
        assert_eq!(state.score, 10);
        assert_eq!(state.ball().pos, target);
    }

    #[test]
    fn test_pause_freezes_and_resumes() {
        let mut state = running(5);
        tick(&mut state, &TickInput::default());
        toggle_pause(&mut state);
        let frozen = state.bodies;
        for _ in 0..25 {
            let report = tick(&mut state, &TickInput::default());
            assert!(!report.advanced);
        }
        assert_eq!(state.bodies, frozen);

        toggle_pause(&mut state);
        assert_eq!(state.bodies, frozen);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.ball().pos, frozen.ball.pos + frozen.ball.vel);
    }

    #[test]
    fn test_pointer_overrides_direction() {
        let mut state = running(5);
        let input = TickInput {
            direction: PaddleDirection::Left,
            pointer_x: Some(700.0),
        };
        tick(&mut state, &input);
        assert_eq!(state.paddle().x, 640.0);
    }

    #[test]
    fn test_start_twice_matches_start_once() {
        let mut once = GameState::new(77);
        start(&mut once);
        let mut twice = GameState::new(77);
        start(&mut twice);
        start(&mut twice);
        assert_eq!(once.bodies, twice.bodies);
        assert_eq!(once.score, twice.score);
        assert_eq!(once.lives, twice.lives);
        assert_eq!(once.phase, twice.phase);
        assert_eq!(once.grid.count_alive(), twice.grid.count_alive());
    }

    #[test]
    fn test_determinism() {
        let mut a = running(99999);
        let mut b = running(99999);
        let inputs = [
            TickInput {
                direction: PaddleDirection::Right,
                pointer_x: None,
            },
            TickInput {
                direction: PaddleDirection::None,
                pointer_x: Some(120.0),
            },
            TickInput::default(),
        ];
        for input in inputs.iter().cycle().take(600) {
            tick(&mut a, input);
            tick(&mut b, input);
        }
        assert_eq!(a.bodies, b.bodies);
        assert_eq!(a.score, b.score);
        assert_eq!(a.lives, b.lives);
        assert_eq!(a.phase, b.phase);
    }

    fn direction() -> impl Strategy<Value = PaddleDirection> {
        prop_oneof![
            Just(PaddleDirection::Left),
            Just(PaddleDirection::Right),
            Just(PaddleDirection::None),
        ]
    }

    fn tick_input() -> impl Strategy<Value = TickInput> {
        (direction(), proptest::option::of(-200.0f32..1000.0)).prop_map(
            |(direction, pointer_x)| TickInput {
                direction,
                pointer_x,
            },
        )
    }

    proptest! {
        #[test]
        fn prop_paddle_stays_in_field(
            seed in any::<u64>(),
            inputs in proptest::collection::vec(tick_input(), 1..400),
        ) {
            let mut state = running(seed);
            for input in &inputs {
                tick(&mut state, input);
                let x = state.paddle().x;
                prop_assert!((0.0..=state.field_width - state.paddle().width).contains(&x));
                // Clamping an already clamped position changes nothing
                prop_assert_eq!(clamp_paddle_x(x, state.field_width), x);
            }
        }

        #[test]
        fn prop_score_matches_destroyed_bricks(
            seed in any::<u64>(),
            inputs in proptest::collection::vec(tick_input(), 1..2000),
        ) {
            let mut state = running(seed);
            let mut destroyed: Vec<(usize, usize)> = Vec::new();
            for input in &inputs {
                let report = tick(&mut state, input);
                for event in report.events {
                    if let GameEvent::BrickBroken { col, row, .. } = event {
                        prop_assert!(!destroyed.contains(&(col, row)));
                        destroyed.push((col, row));
                    }
                }
                // Destroyed bricks never come back
                for &(col, row) in &destroyed {
                    prop_assert!(!state.grid.get(col, row).unwrap().is_alive());
                }
            }
            let expected: u32 = state
                .grid
                .iter()
                .filter(|b| !b.is_alive())
                .map(|b| b.kind.score())
                .sum();
            prop_assert_eq!(state.score, expected);
            prop_assert_eq!(state.grid.count_alive() + destroyed.len(), 40);
        }

        #[test]
        fn prop_speed_never_changes(
            seed in any::<u64>(),
            inputs in proptest::collection::vec(tick_input(), 1..1000),
        ) {
            let mut state = running(seed);
            for input in &inputs {
                tick(&mut state, input);
                prop_assert_eq!(state.ball().vel.x.abs(), 4.0);
                prop_assert_eq!(state.ball().vel.y.abs(), 4.0);
            }
        }
    }
}
