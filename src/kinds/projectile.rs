/// Lasers, and the flash they leave on impact.

use rand::Rng;

use crate::behavior::{render_sprite, Behavior};
use crate::compute::{Simulation, ARENA_HEIGHT, ARENA_WIDTH};
use crate::entities::{Allegiance, Entity, Kind, Sprite};
use crate::interface::{Channel, SoundId};
use crate::registry::EntityId;
use crate::sprites;

pub const PROJECTILE_SPEED: f32 = 16.0;

const FLASH_FADE_FRAME: u32 = 5;
const FLASH_LIFETIME: u32 = 10;
const FLASH_ALPHA_STEP: u8 = 25;

pub static BEHAVIOR: Behavior = Behavior {
    update: Some(update),
    render: Some(render_sprite),
    take_damage: None,
    on_death: Some(on_death),
};

pub static FLASH_BEHAVIOR: Behavior = Behavior {
    update: Some(update_flash),
    render: Some(render_sprite),
    take_damage: None,
    on_death: None,
};

/// A shot leaving the horizontal centre of `from`. Direction is left to the
/// caller.
pub fn create_projectile(from: &Entity, sprite: Sprite, allegiance: Allegiance) -> Entity {
    let mut shot = Entity::new(Kind::Projectile, sprite);
    shot.flags.alive = true;
    shot.allegiance = allegiance;
    shot.speed = PROJECTILE_SPEED;
    shot.x = from.x + from.width() / 2.0;
    shot.y = from.y;
    shot
}

fn update(sim: &mut Simulation, id: EntityId) {
    let Some(shot) = sim.registry.get_mut(id) else {
        return;
    };
    if shot.x <= 0.0 || shot.x >= ARENA_WIDTH || shot.y <= 0.0 || shot.y >= ARENA_HEIGHT {
        shot.kill_out_of_bounds();
    }
    let hitbox = shot.hitbox();
    let allegiance = shot.allegiance;

    let targets: Vec<EntityId> = sim
        .registry
        .iter()
        .filter(|(other_id, other)| {
            *other_id != id
                && other.is_alive()
                && !other.is_projectile()
                && allegiance.opposes(other.allegiance)
                && hitbox.overlaps(&other.hitbox())
        })
        .map(|(other_id, _)| other_id)
        .collect();

    if !targets.is_empty() {
        if let Some(shot) = sim.registry.get_mut(id) {
            shot.kill();
        }
        for target in targets {
            sim.damage(target);
        }
    }

    if let Some(shot) = sim.registry.get_mut(id) {
        shot.advance();
    }
}

fn on_death(sim: &mut Simulation, id: EntityId) {
    let Some(shot) = sim.registry.get(id) else {
        return;
    };
    if shot.flags.out_of_bounds {
        return;
    }

    let mut flash = Entity::new(Kind::ImpactFlash, sprites::IMPACT_FLASH);
    flash.flags.alive = true;
    flash.x = shot.x;
    flash.y = shot.y;
    flash.angle = 0.45;
    flash.spritescale = shot.spritescale * 0.6;
    sim.spawn(flash);

    let variant = sim.rng.gen_range(0..5);
    sim.play_sound(SoundId::Impact(variant), Channel::Impact);
}

fn update_flash(sim: &mut Simulation, id: EntityId) {
    let Some(flash) = sim.registry.get_mut(id) else {
        return;
    };
    flash.frame += 1;
    flash.rgba[3] = flash.rgba[3].saturating_sub(FLASH_ALPHA_STEP);
    if flash.frame >= FLASH_FADE_FRAME {
        flash.sprite = sprites::IMPACT_FLASH_FADE;
    }
    if flash.frame >= FLASH_LIFETIME {
        flash.kill();
    }
}
