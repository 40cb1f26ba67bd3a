//! Keyboard state and edge-triggered input events
//!
//! Held keys are plain state. Presses of action keys become events in a
//! queue that the controller drains once per slice, so an action fires
//! exactly once per press no matter how long the key stays down.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::sim::{Facing, HeldKeys, TickInput};

/// Logical keys, independent of any windowing backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Jump,
    Shoot,
    Restart,
    Pause,
}

impl Key {
    const COUNT: usize = 6;

    fn index(self) -> usize {
        self as usize
    }

    /// Event produced when this key goes down, if any
    fn event(self) -> Option<InputEvent> {
        match self {
            Key::Left | Key::Right => None,
            Key::Jump => Some(InputEvent::Jump),
            Key::Shoot => Some(InputEvent::Shoot),
            Key::Restart => Some(InputEvent::Restart),
            Key::Pause => Some(InputEvent::Pause),
        }
    }
}

/// One-shot requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    Jump,
    Shoot,
    Restart,
    Pause,
}

/// Everything one slice consumes from the input queue
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SliceInput {
    pub tick: TickInput,
    pub restart: bool,
    pub pause: bool,
}

/// Session-level requests honoured outside of gameplay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlInput {
    pub restart: bool,
    pub pause: bool,
}

#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HeldKeys,
    last_direction: Facing,
    down: [bool; Key::COUNT],
    events: VecDeque<InputEvent>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key went down. Auto-repeat presses of a key already down are ignored.
    pub fn press(&mut self, key: Key) {
        let was_down = std::mem::replace(&mut self.down[key.index()], true);

        match key {
            Key::Left => {
                self.held.left = true;
                self.last_direction = Facing::Backward;
            }
            Key::Right => {
                self.held.right = true;
                self.last_direction = Facing::Forward;
            }
            Key::Jump => self.held.jump = true,
            _ => {}
        }

        if !was_down {
            if let Some(event) = key.event() {
                self.events.push_back(event);
            }
        }
    }

    pub fn release(&mut self, key: Key) {
        self.down[key.index()] = false;
        match key {
            Key::Left => self.held.left = false,
            Key::Right => self.held.right = false,
            Key::Jump => self.held.jump = false,
            _ => {}
        }
    }

    /// Drop held keys and pending events (pause, restart)
    pub fn clear_all(&mut self) {
        self.held = HeldKeys::default();
        self.down = [false; Key::COUNT];
        self.events.clear();
    }

    pub fn held(&self) -> HeldKeys {
        self.held
    }

    pub fn last_direction(&self) -> Facing {
        self.last_direction
    }

    pub fn pending(&self) -> usize {
        self.events.len()
    }

    /// Consume every queued event for one slice
    pub fn drain_slice(&mut self) -> SliceInput {
        let mut slice = SliceInput {
            tick: TickInput {
                held: self.held,
                last_direction: self.last_direction,
                ..Default::default()
            },
            ..Default::default()
        };
        for event in self.events.drain(..) {
            match event {
                InputEvent::Jump => slice.tick.jump = true,
                InputEvent::Shoot => slice.tick.shoot = true,
                InputEvent::Restart => slice.restart = true,
                InputEvent::Pause => slice.pause = true,
            }
        }
        slice
    }

    /// Consume queued events while gameplay is frozen. Gameplay events are
    /// discarded; only restart and pause survive.
    pub fn drain_control(&mut self) -> ControlInput {
        let mut control = ControlInput::default();
        for event in self.events.drain(..) {
            match event {
                InputEvent::Restart => control.restart = true,
                InputEvent::Pause => control.pause = true,
                InputEvent::Jump | InputEvent::Shoot => {}
            }
        }
        control
    }
}
