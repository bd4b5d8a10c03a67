/// Entity data model: one record shape shared by every kind.
///
/// Behaviour is attached through `Kind` (see `behavior.rs`); the lifecycle
/// flags here never encode kind identity.

use crate::vec2f::Vec2f;

// ── Sprites & hitboxes ───────────────────────────────────────────────────────

/// A region of the sprite atlas plus the glyph the terminal front-end draws
/// for it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub glyph: char,
}

impl Sprite {
    pub const fn new(x: i32, y: i32, w: i32, h: i32, glyph: char) -> Self {
        Self { x, y, w, h, glyph }
    }
}

/// Axis-aligned rectangle used for collision tests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn centre(&self) -> Vec2f {
        Vec2f::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn is_degenerate(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }

    /// Inclusive-bounds overlap. Zero-size rectangles never overlap anything.
    pub fn overlaps(&self, other: &Rect) -> bool {
        if self.is_degenerate() || other.is_degenerate() {
            return false;
        }
        self.x <= other.x + other.w
            && self.x + self.w >= other.x
            && self.y <= other.y + other.h
            && self.y + self.h >= other.y
    }
}

// ── Kind & allegiance ────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Allegiance {
    Neutral,
    Player,
    Enemy,
}

impl Allegiance {
    /// True only for Player-vs-Enemy pairs.
    pub fn opposes(self, other: Allegiance) -> bool {
        matches!(
            (self, other),
            (Allegiance::Player, Allegiance::Enemy) | (Allegiance::Enemy, Allegiance::Player)
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleStyle {
    /// Burst particle; leaves a decay particle behind when it dies.
    Explosion,
    /// Afterglow left by a dying particle.
    Decay,
    /// Engine exhaust; shimmers white every third frame.
    Thruster,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickupKind {
    Shield,
    Points(u32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Player,
    Projectile,
    ImpactFlash,
    Asteroid,
    AsteroidFragment,
    Ufo,
    Particle(ParticleStyle),
    Pickup(PickupKind),
    FloatingText,
}

// ── Lifecycle flags ──────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Flags {
    pub alive: bool,
    pub on_cooldown: bool,
    pub out_of_bounds: bool,
    pub invulnerable: bool,
}

// ── Curve AI ─────────────────────────────────────────────────────────────────

/// Quadratic Bézier path followed by curve-driven movers (UFOs).
#[derive(Clone, Debug, PartialEq)]
pub struct CurveAi {
    pub start: Vec2f,
    pub mid: Vec2f,
    pub end: Vec2f,
    /// Interpolation parameter, kept in `[0, 1]`.
    pub t: f32,
    /// When set, `t` runs towards 0.
    pub move_left: bool,
}

// ── Entity ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Entity {
    pub kind: Kind,
    pub allegiance: Allegiance,
    pub x: f32,
    pub y: f32,
    /// Direction; per-frame displacement is `(dx, dy) * speed`.
    pub dx: f32,
    pub dy: f32,
    pub speed: f32,
    /// Render rotation in degrees.
    pub angle: f32,
    pub sprite: Sprite,
    pub spritescale: f32,
    pub rgba: [u8; 4],
    /// Frames remaining before a repeatable action is allowed again.
    pub cooldown: u32,
    /// Kind-specific counter: attack clock, invulnerability countdown, age.
    pub frame: u32,
    pub health: i32,
    pub flags: Flags,
    pub ai: Option<CurveAi>,
    pub text: Option<String>,
}

impl Entity {
    /// Blank entity of the given kind: everything zeroed, opaque white tint,
    /// scale 1, not yet alive. Factories customise from here.
    pub fn new(kind: Kind, sprite: Sprite) -> Self {
        Self {
            kind,
            allegiance: Allegiance::Neutral,
            x: 0.0,
            y: 0.0,
            dx: 0.0,
            dy: 0.0,
            speed: 0.0,
            angle: 0.0,
            sprite,
            spritescale: 1.0,
            rgba: [255; 4],
            cooldown: 0,
            frame: 0,
            health: 0,
            flags: Flags::default(),
            ai: None,
            text: None,
        }
    }

    pub fn position(&self) -> Vec2f {
        Vec2f::new(self.x, self.y)
    }

    pub fn width(&self) -> f32 {
        self.sprite.w as f32 * self.spritescale
    }

    pub fn height(&self) -> f32 {
        self.sprite.h as f32 * self.spritescale
    }

    pub fn hitbox(&self) -> Rect {
        Rect::new(self.x, self.y, self.width(), self.height())
    }

    /// Advance one frame along `(dx, dy)` at `speed`.
    pub fn advance(&mut self) {
        self.x += self.dx * self.speed;
        self.y += self.dy * self.speed;
    }

    pub fn is_alive(&self) -> bool {
        self.flags.alive
    }

    pub fn kill(&mut self) {
        self.flags.alive = false;
    }

    /// Despawn without death effects.
    pub fn kill_out_of_bounds(&mut self) {
        self.flags.alive = false;
        self.flags.out_of_bounds = true;
    }

    pub fn is_player(&self) -> bool {
        self.allegiance == Allegiance::Player
    }

    pub fn is_enemy(&self) -> bool {
        self.allegiance == Allegiance::Enemy
    }

    pub fn is_projectile(&self) -> bool {
        self.kind == Kind::Projectile
    }

    /// The player's ship itself, as opposed to its shots.
    pub fn is_player_ship(&self) -> bool {
        self.kind == Kind::Player
    }

    pub fn is_floating_text(&self) -> bool {
        self.kind == Kind::FloatingText
    }

    pub fn is_pickup(&self) -> bool {
        matches!(self.kind, Kind::Pickup(_))
    }
}
