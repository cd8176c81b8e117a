//! Logical key queries
//!
//! The simulation never sees raw keyboard events. A host translates whatever
//! it captures into an [`InputAdapter`], and the tick asks it which logical
//! keys are held.

use serde::{Deserialize, Serialize};

/// Logical movement keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value to a logical key
    pub fn from_dom_key(name: &str) -> Option<Self> {
        match name {
            "ArrowUp" => Some(Key::Up),
            "ArrowDown" => Some(Key::Down),
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            _ => None,
        }
    }

    #[inline]
    fn index(self) -> usize {
        match self {
            Key::Up => 0,
            Key::Down => 1,
            Key::Left => 2,
            Key::Right => 3,
        }
    }
}

/// "Is key K currently held". Must be cheap and infallible; queried every frame.
pub trait InputAdapter {
    fn is_pressed(&self, key: Key) -> bool;
}

/// Input source that was never initialized: nothing is ever pressed
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInput;

impl InputAdapter for NoInput {
    fn is_pressed(&self, _key: Key) -> bool {
        false
    }
}

/// A missing adapter behaves like [`NoInput`]
impl<T: InputAdapter> InputAdapter for Option<T> {
    fn is_pressed(&self, key: Key) -> bool {
        self.as_ref().is_some_and(|adapter| adapter.is_pressed(key))
    }
}

impl<T: InputAdapter + ?Sized> InputAdapter for &T {
    fn is_pressed(&self, key: Key) -> bool {
        (**self).is_pressed(key)
    }
}

/// Held-key set fed by key down/up events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeySet {
    held: [bool; 4],
}

impl KeySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set with the given keys held
    pub fn with(keys: &[Key]) -> Self {
        let mut set = Self::new();
        for &key in keys {
            set.press(key);
        }
        set
    }

    pub fn press(&mut self, key: Key) {
        self.held[key.index()] = true;
    }

    pub fn release(&mut self, key: Key) {
        self.held[key.index()] = false;
    }

    /// Forget everything (e.g. on focus loss, when key-up events go missing)
    pub fn clear(&mut self) {
        self.held = [false; 4];
    }
}

impl InputAdapter for KeySet {
    fn is_pressed(&self, key: Key) -> bool {
        self.held[key.index()]
    }
}
