//! Abstract input state sampled once per tick.
//!
//! The core never talks to a keyboard.  Front ends translate whatever
//! device they poll into an [`InputState`]: `held` for keys currently down
//! and `pressed` for keys that went down during this frame.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Jump,
    Fire,
    Restart,
    Quit,
}

impl Key {
    fn bit(self) -> u8 {
        1 << self as u8
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    held: u8,
    pressed: u8,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held & key.bit() != 0
    }

    pub fn was_pressed(&self, key: Key) -> bool {
        self.pressed & key.bit() != 0
    }

    pub fn set_held(&mut self, key: Key, down: bool) {
        if down {
            self.held |= key.bit();
        } else {
            self.held &= !key.bit();
        }
    }

    /// Marks an edge press.  A pressed key also counts as held this frame.
    pub fn press(&mut self, key: Key) {
        self.pressed |= key.bit();
        self.held |= key.bit();
    }

    /// Builder form of [`set_held`](Self::set_held), handy in tests.
    pub fn with_held(mut self, key: Key) -> Self {
        self.set_held(key, true);
        self
    }

    pub fn with_pressed(mut self, key: Key) -> Self {
        self.press(key);
        self
    }

    pub fn quit_requested(&self) -> bool {
        self.is_held(Key::Quit) || self.was_pressed(Key::Quit)
    }
}
