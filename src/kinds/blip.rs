/// Floating text ("blips"): short-lived flickering messages.
///
/// A blip's lifetime lives in `cooldown`, so the shared cooldown pass counts
/// it down; `speed` is the flicker step applied to alpha each frame.

use rand::Rng;

use crate::behavior::Behavior;
use crate::compute::Simulation;
use crate::entities::{Entity, Kind};
use crate::interface::Renderer;
use crate::registry::EntityId;
use crate::sprites;

pub static BEHAVIOR: Behavior = Behavior {
    update: Some(update),
    render: Some(render),
    take_damage: None,
    on_death: None,
};

#[derive(Clone, Debug, PartialEq)]
pub struct Blip {
    pub x: f32,
    pub y: f32,
    pub text: String,
    /// Frames until the blip disappears.
    pub life: u32,
    /// Alpha step per frame; 0 holds steady.
    pub flicker: u8,
    pub rgba: [u8; 4],
}

pub fn create_blip(blip: Blip) -> Entity {
    let mut entity = Entity::new(Kind::FloatingText, sprites::NONE);
    entity.flags.alive = true;
    entity.x = blip.x;
    entity.y = blip.y;
    entity.rgba = blip.rgba;
    entity.cooldown = blip.life;
    entity.speed = blip.flicker as f32;
    entity.text = Some(blip.text);
    entity
}

pub fn spawn_blip(sim: &mut Simulation, blip: Blip) -> EntityId {
    sim.spawn(create_blip(blip))
}

fn update(sim: &mut Simulation, id: EntityId) {
    let brighten = sim.rng.gen_bool(0.5);
    let Some(blip) = sim.registry.get_mut(id) else {
        return;
    };
    if blip.cooldown == 0 {
        blip.kill();
        return;
    }
    let step = blip.speed as u8;
    blip.rgba[3] = if brighten {
        blip.rgba[3].saturating_add(step)
    } else {
        blip.rgba[3].saturating_sub(step)
    };
}

fn render(blip: &Entity, renderer: &mut dyn Renderer) {
    if let Some(text) = blip.text.as_deref() {
        renderer.render_text(text, blip.x, blip.y, blip.rgba);
    }
}
