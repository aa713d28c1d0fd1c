//! Per-frame game loop
//!
//! `Game` owns the [`GameState`] and its three collaborators. The host calls
//! [`Game::frame`] once per animation frame and keeps scheduling frames only
//! while it returns `true`. Control actions (`start`, `toggle_pause`) come
//! from buttons and keys outside the loop.

use crate::audio::TonePlayer;
use crate::input::InputSource;
use crate::renderer::{FrameSnapshot, Renderer};
use crate::settings::Settings;
use crate::sim::{self, GamePhase, GameState, TickReport};

pub struct Game<I, R, T> {
    state: GameState,
    input: I,
    renderer: R,
    tones: T,
    /// Suspend the tone player while paused
    mute_on_pause: bool,
}

impl<I: InputSource, R: Renderer, T: TonePlayer> Game<I, R, T> {
    pub fn new(state: GameState, input: I, renderer: R, tones: T) -> Self {
        Self {
            state,
            input,
            renderer,
            tones,
            mute_on_pause: true,
        }
    }

    pub fn with_settings(mut self, settings: &Settings) -> Self {
        self.mute_on_pause = settings.mute_on_pause;
        self
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn tones(&self) -> &T {
        &self.tones
    }

    /// Whether the host should keep requesting frames
    #[inline]
    pub fn is_running(&self) -> bool {
        self.state.phase == GamePhase::Running
    }

    /// Start a fresh round (also the restart action after game over or clear).
    /// Returns `false` when the current phase forbids it.
    pub fn start(&mut self) -> bool {
        if !sim::start(&mut self.state) {
            return false;
        }
        self.input.reset();
        // Browsers keep a new audio context suspended until a user gesture
        self.tones.resume();
        self.draw();
        true
    }

    /// Pause or resume. The paused frame is drawn immediately since no further
    /// frames are scheduled while paused.
    pub fn toggle_pause(&mut self) -> bool {
        if !sim::toggle_pause(&mut self.state) {
            return false;
        }
        if self.mute_on_pause {
            match self.state.phase {
                GamePhase::Paused => self.tones.suspend(),
                _ => self.tones.resume(),
            }
        }
        self.draw();
        true
    }

    /// Run one frame: tick the simulation if running, play its cues and draw.
    /// Returns whether another frame should be scheduled.
    pub fn frame(&mut self) -> bool {
        let report = self.step();
        for &cue in &report.cues {
            self.tones.play(cue);
        }
        self.draw();
        self.is_running()
    }

    fn step(&mut self) -> TickReport {
        if !self.is_running() {
            return TickReport::default();
        }
        let input = self.input.sample();
        sim::tick(&mut self.state, &input)
    }

    fn draw(&mut self) {
        self.renderer.draw_frame(&FrameSnapshot::of(&self.state));
    }
}
