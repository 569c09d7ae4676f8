//! Atlas rectangles for scenery, traffic, the player and the background bands

use crate::rasterizer::Rect;

pub const PALM_TREE: Rect = Rect::new(5.0, 5.0, 215.0, 540.0);
pub const BILLBOARD08: Rect = Rect::new(230.0, 5.0, 385.0, 265.0);
pub const TREE1: Rect = Rect::new(625.0, 5.0, 360.0, 360.0);
pub const DEAD_TREE1: Rect = Rect::new(5.0, 555.0, 135.0, 332.0);
pub const BILLBOARD09: Rect = Rect::new(150.0, 555.0, 328.0, 282.0);
pub const BOULDER3: Rect = Rect::new(230.0, 280.0, 320.0, 220.0);
pub const COLUMN: Rect = Rect::new(995.0, 5.0, 200.0, 315.0);
pub const BILLBOARD01: Rect = Rect::new(625.0, 375.0, 300.0, 170.0);
pub const BILLBOARD06: Rect = Rect::new(488.0, 555.0, 298.0, 190.0);
pub const BILLBOARD05: Rect = Rect::new(5.0, 897.0, 298.0, 190.0);
pub const BILLBOARD07: Rect = Rect::new(313.0, 897.0, 298.0, 190.0);
pub const BOULDER2: Rect = Rect::new(621.0, 897.0, 298.0, 140.0);
pub const TREE2: Rect = Rect::new(1205.0, 5.0, 282.0, 295.0);
pub const BILLBOARD04: Rect = Rect::new(1205.0, 310.0, 268.0, 170.0);
pub const DEAD_TREE2: Rect = Rect::new(1205.0, 490.0, 150.0, 260.0);
pub const BOULDER1: Rect = Rect::new(1205.0, 760.0, 168.0, 248.0);
pub const BUSH1: Rect = Rect::new(5.0, 1097.0, 240.0, 155.0);
pub const CACTUS: Rect = Rect::new(929.0, 897.0, 235.0, 118.0);
pub const BUSH2: Rect = Rect::new(255.0, 1097.0, 232.0, 152.0);
pub const BILLBOARD03: Rect = Rect::new(5.0, 1262.0, 230.0, 220.0);
pub const BILLBOARD02: Rect = Rect::new(245.0, 1262.0, 215.0, 220.0);
pub const STUMP: Rect = Rect::new(995.0, 330.0, 195.0, 140.0);

pub const SEMI: Rect = Rect::new(1365.0, 490.0, 122.0, 144.0);
pub const TRUCK: Rect = Rect::new(1365.0, 644.0, 100.0, 78.0);
pub const CAR03: Rect = Rect::new(1383.0, 760.0, 88.0, 55.0);
pub const CAR02: Rect = Rect::new(1383.0, 825.0, 80.0, 59.0);
pub const CAR04: Rect = Rect::new(1383.0, 894.0, 80.0, 57.0);
pub const CAR01: Rect = Rect::new(1205.0, 1018.0, 80.0, 56.0);

pub const PLAYER_UPHILL_LEFT: Rect = Rect::new(1383.0, 961.0, 80.0, 45.0);
pub const PLAYER_UPHILL_STRAIGHT: Rect = Rect::new(1295.0, 1018.0, 80.0, 45.0);
pub const PLAYER_UPHILL_RIGHT: Rect = Rect::new(1385.0, 1018.0, 80.0, 45.0);
pub const PLAYER_LEFT: Rect = Rect::new(995.0, 480.0, 80.0, 41.0);
pub const PLAYER_STRAIGHT: Rect = Rect::new(1085.0, 480.0, 80.0, 41.0);
pub const PLAYER_RIGHT: Rect = Rect::new(995.0, 531.0, 80.0, 41.0);

pub const BACKGROUND_HILLS: Rect = Rect::new(5.0, 5.0, 1280.0, 480.0);
pub const BACKGROUND_SKY: Rect = Rect::new(5.0, 495.0, 1280.0, 480.0);
pub const BACKGROUND_TREES: Rect = Rect::new(5.0, 985.0, 1280.0, 480.0);

/// World-width of one atlas pixel: the player car is 0.3 road half-widths wide
pub const SPRITE_SCALE: f32 = 0.3 * (1.0 / PLAYER_STRAIGHT.w);

/// Traffic vehicles, indexed by car type
pub const CARS: [Rect; 6] = [CAR01, CAR02, CAR03, CAR04, SEMI, TRUCK];

/// Index into `CARS` of the slow heavy vehicle
pub const SEMI_TYPE: usize = 4;

pub const PLANTS: [Rect; 12] = [
    TREE1, TREE2, DEAD_TREE1, DEAD_TREE2, PALM_TREE, BUSH1,
    BUSH2, CACTUS, STUMP, BOULDER1, BOULDER2, BOULDER3,
];

pub const BILLBOARDS: [Rect; 9] = [
    BILLBOARD01, BILLBOARD02, BILLBOARD03, BILLBOARD04, BILLBOARD05,
    BILLBOARD06, BILLBOARD07, BILLBOARD08, BILLBOARD09,
];

/// World-space width of a sprite, in road half-widths
pub fn world_width(sprite: &Rect) -> f32 {
    sprite.w * SPRITE_SCALE
}
