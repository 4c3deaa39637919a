//! Input events

use std::collections::BTreeMap;

/// Discrete input the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Flap,
    Quit,
}

/// Physical keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    Escape,
    Other,
}

/// Turns raw key transitions into one event per press.
///
/// Held-key auto-repeat never produces a second flap; the key must be
/// released first.
#[derive(Debug, Default)]
pub struct EdgeTrigger {
    space_down: bool,
}

impl EdgeTrigger {
    pub fn key_down(&mut self, key: Key) -> Option<InputEvent> {
        match key {
            Key::Space if !self.space_down => {
                self.space_down = true;
                Some(InputEvent::Flap)
            }
            Key::Escape => Some(InputEvent::Quit),
            _ => None,
        }
    }

    pub fn key_up(&mut self, key: Key) {
        if key == Key::Space {
            self.space_down = false;
        }
    }

    /// Window close button
    pub fn close_requested(&mut self) -> InputEvent {
        InputEvent::Quit
    }
}

/// Source of input events, polled once per frame
pub trait InputSource {
    fn poll(&mut self, frame: u64) -> Vec<InputEvent>;
}

/// Raw window-system input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawInput {
    KeyDown(Key),
    KeyUp(Key),
    /// Window close button
    Close,
}

/// Raw input replayed from a frame-indexed script, debounced through an
/// [`EdgeTrigger`] like a live keyboard
#[derive(Debug, Default)]
pub struct ScriptedInput {
    script: BTreeMap<u64, Vec<RawInput>>,
    keys: EdgeTrigger,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw input for the given frame
    pub fn at(mut self, frame: u64, input: RawInput) -> Self {
        self.script.entry(frame).or_default().push(input);
        self
    }

    /// Press and release `key` within one frame
    pub fn tap(self, frame: u64, key: Key) -> Self {
        self.at(frame, RawInput::KeyDown(key))
            .at(frame, RawInput::KeyUp(key))
    }

    /// Tap space on every frame in `frames`
    pub fn flaps(mut self, frames: impl IntoIterator<Item = u64>) -> Self {
        for frame in frames {
            self = self.tap(frame, Key::Space);
        }
        self
    }

    pub fn quit_at(self, frame: u64) -> Self {
        self.at(frame, RawInput::KeyDown(Key::Escape))
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, frame: u64) -> Vec<InputEvent> {
        let raw = self.script.remove(&frame).unwrap_or_default();
        raw.into_iter()
            .filter_map(|input| match input {
                RawInput::KeyDown(key) => self.keys.key_down(key),
                RawInput::KeyUp(key) => {
                    self.keys.key_up(key);
                    None
                }
                RawInput::Close => Some(self.keys.close_requested()),
            })
            .collect()
    }
}
