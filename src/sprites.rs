/// Sprite-atlas regions used by the kind factories.

use crate::entities::Sprite;

pub const PLAYER_SHIP: Sprite = Sprite::new(211, 941, 99, 75, '▲');

pub const LASER_PLAYER: Sprite = Sprite::new(845, 0, 13, 57, '|');
pub const LASER_ENEMY: Sprite = Sprite::new(843, 903, 13, 37, '!');
pub const IMPACT_FLASH: Sprite = Sprite::new(193, 240, 48, 46, '*');
pub const IMPACT_FLASH_FADE: Sprite = Sprite::new(443, 182, 48, 46, '+');

pub const ASTEROIDS: [Sprite; 4] = [
    Sprite::new(224, 664, 101, 84, 'O'),
    Sprite::new(0, 520, 120, 98, '@'),
    Sprite::new(518, 810, 89, 82, 'O'),
    Sprite::new(327, 452, 98, 96, '@'),
];

pub const FRAGMENTS: [Sprite; 2] = [
    Sprite::new(651, 447, 43, 43, 'o'),
    Sprite::new(237, 452, 45, 40, 'o'),
];

pub const DEBRIS: [Sprite; 4] = [
    Sprite::new(346, 814, 18, 18, ','),
    Sprite::new(399, 814, 16, 15, ','),
    Sprite::new(406, 234, 28, 28, ';'),
    Sprite::new(778, 587, 29, 26, ';'),
];

pub const UFOS: [Sprite; 4] = [
    Sprite::new(444, 91, 91, 91, 'Ѳ'),
    Sprite::new(434, 234, 91, 91, 'Ѳ'),
    Sprite::new(444, 0, 91, 91, 'Ѳ'),
    Sprite::new(505, 898, 91, 91, 'Ѳ'),
];

pub const STAR_THRUSTER: Sprite = Sprite::new(628, 681, 25, 24, '·');
pub const STAR_BURST: Sprite = Sprite::new(576, 300, 24, 24, '.');

pub const PICKUP_SHIELD: Sprite = Sprite::new(776, 928, 34, 33, '+');
pub const PICKUP_POINTS: [Sprite; 3] = [
    Sprite::new(778, 495, 32, 32, '$'),
    Sprite::new(777, 411, 32, 32, '$'),
    Sprite::new(777, 353, 32, 32, '$'),
];

/// Text entities have no sprite region and so no hitbox.
pub const NONE: Sprite = Sprite::new(0, 0, 0, 0, ' ');
