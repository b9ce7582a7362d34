//! Boundary reflection and hole capture
//!
//! The field is an axis-aligned box, so each wall only ever flips one
//! velocity component. Capture compares the rounded plot position against
//! the hole's 2x2 block.

use glam::{IVec2, Vec2};

use super::state::{Field, Hole};
use crate::consts::IN_HOLE_SPEED;

/// Which walls were hit during a step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallHit {
    /// Left or right wall
    pub x: bool,
    /// Top or bottom wall
    pub y: bool,
}

impl WallHit {
    pub fn any(&self) -> bool {
        self.x || self.y
    }
}

/// Clamp a position to the field interior, reversing velocity on each axis
/// that reached a wall.
///
/// Touching an edge counts as a hit. The ball is clamped to the edge it
/// crossed and only that axis's component is negated.
pub fn reflect_off_walls(field: &Field, pos: &mut Vec2, vel: &mut Vec2) -> WallHit {
    let mut hit = WallHit::default();

    if pos.x <= field.min_x() {
        pos.x = field.min_x();
        vel.x = -vel.x;
        hit.x = true;
    } else if pos.x >= field.max_x() {
        pos.x = field.max_x();
        vel.x = -vel.x;
        hit.x = true;
    }

    if pos.y <= field.min_y() {
        pos.y = field.min_y();
        vel.y = -vel.y;
        hit.y = true;
    } else if pos.y >= field.max_y() {
        pos.y = field.max_y();
        vel.y = -vel.y;
        hit.y = true;
    }

    hit
}

/// Round a plot position half up, the way the ball is drawn
#[inline]
pub fn round_to_plot(pos: Vec2) -> IVec2 {
    IVec2::new((pos.x + 0.5).floor() as i32, (pos.y + 0.5).floor() as i32)
}

/// Check whether a ball drawn at `plot` and moving at `speed` drops in.
/// A fast ball skips over the cup even when it is drawn on top of it.
#[inline]
pub fn in_hole(plot: IVec2, speed: f32, hole: &Hole) -> bool {
    speed < IN_HOLE_SPEED && hole.covers(plot)
}
