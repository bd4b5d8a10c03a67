/// Kind factories and the behaviour hooks each kind binds.

pub mod asteroid;
pub mod blip;
pub mod particle;
pub mod pickup;
pub mod player;
pub mod projectile;
pub mod ufo;
