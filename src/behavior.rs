/// Behaviour table: the four optional hooks each entity kind binds.
///
/// A missing `update`/`render`/`on_death` hook does nothing. A missing
/// `take_damage` hook means the target dies outright (see
/// `Simulation::damage`).

use crate::compute::Simulation;
use crate::entities::{Entity, Kind, ParticleStyle, PickupKind};
use crate::interface::Renderer;
use crate::kinds::{asteroid, blip, particle, pickup, player, projectile, ufo};
use crate::registry::EntityId;

pub type UpdateFn = fn(&mut Simulation, EntityId);
pub type RenderFn = fn(&Entity, &mut dyn Renderer);
pub type DamageFn = fn(&mut Simulation, EntityId);
pub type DeathFn = fn(&mut Simulation, EntityId);

#[derive(Clone, Copy)]
pub struct Behavior {
    pub update: Option<UpdateFn>,
    pub render: Option<RenderFn>,
    pub take_damage: Option<DamageFn>,
    pub on_death: Option<DeathFn>,
}

impl Kind {
    pub fn behavior(self) -> &'static Behavior {
        match self {
            Kind::Player => &player::BEHAVIOR,
            Kind::Projectile => &projectile::BEHAVIOR,
            Kind::ImpactFlash => &projectile::FLASH_BEHAVIOR,
            Kind::Asteroid => &asteroid::BEHAVIOR,
            Kind::AsteroidFragment => &asteroid::FRAGMENT_BEHAVIOR,
            Kind::Ufo => &ufo::BEHAVIOR,
            Kind::Particle(ParticleStyle::Explosion) => &particle::BEHAVIOR,
            Kind::Particle(ParticleStyle::Decay) => &particle::DECAY_BEHAVIOR,
            Kind::Particle(ParticleStyle::Thruster) => &particle::THRUSTER_BEHAVIOR,
            Kind::Pickup(PickupKind::Shield) => &pickup::SHIELD_BEHAVIOR,
            Kind::Pickup(PickupKind::Points(_)) => &pickup::POINTS_BEHAVIOR,
            Kind::FloatingText => &blip::BEHAVIOR,
        }
    }
}

/// Default render hook: the entity's sprite, scaled, rotated and tinted.
pub fn render_sprite(entity: &Entity, renderer: &mut dyn Renderer) {
    renderer.render_sprite(
        entity.sprite,
        entity.x,
        entity.y,
        entity.angle,
        entity.spritescale,
        entity.rgba,
    );
}
