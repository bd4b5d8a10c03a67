/// 2D vector and curve math. Pure functions, no state.

use std::ops::{Add, Sub};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2f {
    pub x: f32,
    pub y: f32,
}

impl Vec2f {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Component-wise comparison within `eps`.
    pub fn approx_eq(self, other: Vec2f, eps: f32) -> bool {
        (self.x - other.x).abs() <= eps && (self.y - other.y).abs() <= eps
    }
}

impl Add for Vec2f {
    type Output = Vec2f;

    fn add(self, rhs: Vec2f) -> Vec2f {
        Vec2f::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2f {
    type Output = Vec2f;

    fn sub(self, rhs: Vec2f) -> Vec2f {
        Vec2f::new(self.x - rhs.x, self.y - rhs.y)
    }
}

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

pub fn lerp_vec2f(a: Vec2f, b: Vec2f, t: f32) -> Vec2f {
    Vec2f::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t))
}

/// Quadratic Bézier point by lerping the lerps (de Casteljau).
pub fn bezier(start: Vec2f, mid: Vec2f, end: Vec2f, t: f32) -> Vec2f {
    lerp_vec2f(lerp_vec2f(start, mid, t), lerp_vec2f(mid, end, t), t)
}

/// Quadratic Bézier point from the closed form
/// `(1-t)²·P0 + 2(1-t)t·P1 + t²·P2`.
pub fn bezier_closed_form(start: Vec2f, mid: Vec2f, end: Vec2f, t: f32) -> Vec2f {
    let u = 1.0 - t;
    let a = u * u;
    let b = 2.0 * u * t;
    let c = t * t;
    Vec2f::new(
        a * start.x + b * mid.x + c * end.x,
        a * start.y + b * mid.y + c * end.y,
    )
}
