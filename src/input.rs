//! Pending-input buffer
//!
//! Platform code pushes key and pointer events as they arrive. At the start of each tick
//! the game drains the buffer into one `TickInput`: held directions persist across ticks,
//! one-shot commands fire once, the pointer contributes its latest position.

use crate::consts::CANVAS_WIDTH;
use crate::sim::tick::TickInput;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Pause,
    Action,
    Restart,
    Quit,
}

impl Key {
    /// Map a DOM-style key code (`"ArrowLeft"`, `"KeyA"`, ...) to a game key
    pub fn from_code(code: &str) -> Option<Key> {
        match code {
            "ArrowLeft" | "KeyA" => Some(Key::Left),
            "ArrowRight" | "KeyD" => Some(Key::Right),
            "KeyP" | "Escape" => Some(Key::Pause),
            "Space" => Some(Key::Action),
            "KeyR" => Some(Key::Restart),
            "KeyQ" => Some(Key::Quit),
            _ => None,
        }
    }
}

/// Raw input events
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// Pointer moved; x in game-space pixels
    PointerMove { x: f32 },
    /// Click or touch start
    PointerDown,
}

/// Scale a pointer x from a view of `view_width` pixels into game space
pub fn pointer_to_game(view_x: f32, view_width: f32) -> f32 {
    if view_width <= 0.0 {
        return view_x;
    }
    view_x * CANVAS_WIDTH / view_width
}

/// Input captured between ticks
#[derive(Debug, Clone, Default)]
pub struct InputBuffer {
    left_held: bool,
    right_held: bool,
    pointer_x: Option<f32>,
    pause: bool,
    action: bool,
    restart: bool,
    quit: bool,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(key) => self.key_down(key),
            InputEvent::KeyUp(Key::Left) => self.left_held = false,
            InputEvent::KeyUp(Key::Right) => self.right_held = false,
            InputEvent::KeyUp(_) => {}
            InputEvent::PointerMove { x } => self.pointer_x = Some(x),
            InputEvent::PointerDown => self.action = true,
        }
    }

    fn key_down(&mut self, key: Key) {
        match key {
            Key::Left => self.left_held = true,
            Key::Right => self.right_held = true,
            Key::Pause => self.pause = true,
            Key::Action => self.action = true,
            Key::Restart => self.restart = true,
            Key::Quit => self.quit = true,
        }
    }

    /// Drain one-shot commands and the pointer into this tick's input
    pub fn take_tick_input(&mut self) -> TickInput {
        TickInput {
            left: self.left_held,
            right: self.right_held,
            pause: std::mem::take(&mut self.pause),
            action: std::mem::take(&mut self.action),
            restart: std::mem::take(&mut self.restart),
            quit: std::mem::take(&mut self.quit),
            pointer_x: self.pointer_x.take(),
        }
    }

    /// Forget everything, including held keys
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
