//! Input sampling
//!
//! Platform event handlers only record the latest state here (held keys, last
//! pointer move). The game loop polls it once at the start of each tick.
//! A pointer move is used by one tick and then forgotten, so held keys keep
//! working while the pointer is still.

use crate::sim::TickInput;
pub use crate::sim::PaddleDirection;

/// Source of paddle-move intent, polled once per tick
pub trait InputSource {
    /// Direction from held keys
    fn paddle_direction(&self) -> PaddleDirection;

    /// Pointer x (field coordinates) of a move since the last call, if any
    fn take_pointer_x(&mut self) -> Option<f32>;

    /// Forget held keys and pointer position (called when a round starts)
    fn reset(&mut self) {}

    fn sample(&mut self) -> TickInput {
        TickInput {
            direction: self.paddle_direction(),
            pointer_x: self.take_pointer_x(),
        }
    }
}

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Pause,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "right" | "arrowright" | "d" => Some(Key::Right),
            "left" | "arrowleft" | "a" => Some(Key::Left),
            "p" => Some(Key::Pause),
            _ => None,
        }
    }
}

/// Held state of the direction keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyboardState {
    pub left: bool,
    pub right: bool,
}

impl KeyboardState {
    pub fn press(&mut self, key: Key) {
        match key {
            Key::Left => self.left = true,
            Key::Right => self.right = true,
            Key::Pause => {}
        }
    }

    pub fn release(&mut self, key: Key) {
        match key {
            Key::Left => self.left = false,
            Key::Right => self.right = false,
            Key::Pause => {}
        }
    }

    /// Right wins when both are held
    pub fn direction(&self) -> PaddleDirection {
        if self.right {
            PaddleDirection::Right
        } else if self.left {
            PaddleDirection::Left
        } else {
            PaddleDirection::None
        }
    }
}

/// Pointer move not yet consumed by a tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    pub x: Option<f32>,
}

impl PointerState {
    /// Record a pointer move. Positions outside the field are ignored.
    pub fn moved(&mut self, relative_x: f32, field_width: f32) {
        if relative_x > 0.0 && relative_x < field_width {
            self.x = Some(relative_x);
        }
    }

    /// Consume the pending move
    pub fn take(&mut self) -> Option<f32> {
        self.x.take()
    }
}

/// Keyboard plus pointer, as wired up by the browser front end
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HeldInput {
    pub keys: KeyboardState,
    pub pointer: PointerState,
}

impl InputSource for HeldInput {
    fn paddle_direction(&self) -> PaddleDirection {
        self.keys.direction()
    }

    fn take_pointer_x(&mut self) -> Option<f32> {
        self.pointer.take()
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}
