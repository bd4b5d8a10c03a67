/// Contracts with the collaborators the simulation does not own: rendering,
/// audio and input. The core only ever talks to these traits and tables.

use crate::entities::Sprite;

// ── Rendering ────────────────────────────────────────────────────────────────

pub trait Renderer {
    fn render_sprite(
        &mut self,
        sprite: Sprite,
        x: f32,
        y: f32,
        angle: f32,
        scale: f32,
        rgba: [u8; 4],
    );

    fn render_text(&mut self, text: &str, x: f32, y: f32, rgba: [u8; 4]);
}

// ── Audio ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundId {
    PlayerFire,
    AlienFire,
    AlienSpawn,
    /// One of five explosion variants.
    Explode(u8),
    /// One of five impact variants.
    Impact(u8),
    Powerup,
}

/// Mixer channel hint; a dedicated channel keeps a sound from overlapping
/// itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    Any,
    Player,
    Alien,
    Impact,
}

pub trait AudioSink {
    fn play_sound(&mut self, sound: SoundId, channel: Channel);
}

/// Discards every sound; used headless and as the default.
#[derive(Debug, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play_sound(&mut self, sound: SoundId, channel: Channel) {
        tracing::trace!(?sound, ?channel, "sound dropped");
    }
}

// ── Input ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Fire,
    Confirm,
}

impl Key {
    pub const COUNT: usize = 6;

    fn index(self) -> usize {
        self as usize
    }
}

/// Held-key table plus a frame-scoped "some key went down" signal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyState {
    held: [bool; Key::COUNT],
    pub any_pressed: bool,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: Key) -> Self {
        self.set(key, true);
        self
    }

    pub fn set(&mut self, key: Key, down: bool) {
        self.held[key.index()] = down;
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.held[key.index()]
    }

    pub fn confirm(&self) -> bool {
        self.any_pressed && (self.is_down(Key::Fire) || self.is_down(Key::Confirm))
    }
}
