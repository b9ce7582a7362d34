//! Round state and core simulation types
//!
//! A single `Round` owns everything that changes while a round is played.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Rectangular playing field, in plot units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl Default for Field {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl Field {
    /// The field drawn below the title and menu area
    pub const STANDARD: Field = Field {
        left: FIELD_LEFT,
        top: FIELD_TOP,
        width: FIELD_WIDTH,
        height: FIELD_HEIGHT,
    };

    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Rightmost border column
    #[inline]
    pub fn right(&self) -> i32 {
        self.left + self.width - 1
    }

    /// Bottom border row
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.top + self.height
    }

    /// Inner edges the ball bounces off
    #[inline]
    pub fn min_x(&self) -> f32 {
        (self.left + 1) as f32
    }

    #[inline]
    pub fn max_x(&self) -> f32 {
        (self.right() - 1) as f32
    }

    #[inline]
    pub fn min_y(&self) -> f32 {
        (self.top + 1) as f32
    }

    #[inline]
    pub fn max_y(&self) -> f32 {
        (self.bottom() - 2) as f32
    }

    /// Minimum ball/hole separation used by the layout generator
    #[inline]
    pub fn min_separation(&self) -> i32 {
        self.height / 2
    }

    /// Whether a point lies inside the area the ball may occupy
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= self.min_x() && pos.x <= self.max_x() && pos.y >= self.min_y() && pos.y <= self.max_y()
    }
}

/// The ball. Persists across strokes until the hole is won or redrawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Position in plot units
    pub pos: Vec2,
    pub vel: Vec2,
    pub speed: f32,
}

impl Ball {
    /// A ball resting at a plot position
    pub fn at_rest(plot: IVec2) -> Self {
        Self {
            pos: plot.as_vec2(),
            vel: Vec2::ZERO,
            speed: 0.0,
        }
    }

    /// Rendered position (rounded half up)
    pub fn plot_pos(&self) -> IVec2 {
        super::collision::round_to_plot(self.pos)
    }

    /// Whether the ball has stopped
    pub fn is_at_rest(&self) -> bool {
        self.speed < AT_REST_SPEED
    }

    /// Stop the ball, snapping it to its rendered position
    pub fn settle(&mut self) {
        self.pos = self.plot_pos().as_vec2();
        self.vel = Vec2::ZERO;
        self.speed = 0.0;
    }
}

/// The hole, addressed in character cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hole {
    pub cell: IVec2,
}

impl Hole {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            cell: IVec2::new(x, y),
        }
    }

    /// Top-left plot unit of the 2x2 block the hole covers
    pub fn plot_origin(&self) -> IVec2 {
        self.cell * PLOT_PER_CELL
    }

    /// Whether a plot position falls inside the hole's block
    pub fn covers(&self, plot: IVec2) -> bool {
        let origin = self.plot_origin();
        plot.x >= origin.x
            && plot.x < origin.x + PLOT_PER_CELL
            && plot.y >= origin.y
            && plot.y < origin.y + PLOT_PER_CELL
    }
}

/// Ball and hole placement for one hole
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    /// Ball start, in plot units
    pub ball: IVec2,
    pub hole: Hole,
}

/// Scoring state for a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatus {
    /// Set once the round is over (won or abandoned)
    pub restart: bool,
    /// Current hole, starting at 1
    pub hole_number: u8,
    /// Strokes taken this round, penalties included
    pub hole_stroke_count: u8,
}

impl Default for GameStatus {
    fn default() -> Self {
        Self {
            restart: false,
            hole_number: 1,
            hole_stroke_count: 0,
        }
    }
}

/// Everything a round mutates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Round {
    pub field: Field,
    pub ball: Ball,
    pub hole: Hole,
    pub status: GameStatus,
    /// Holes to sink before the round is won
    pub hole_count: u8,
}

impl Round {
    /// Start a round on the standard field with the given first layout
    pub fn new(layout: Layout) -> Self {
        Self {
            field: Field::STANDARD,
            ball: Ball::at_rest(layout.ball),
            hole: layout.hole,
            status: GameStatus::default(),
            hole_count: NUM_HOLES,
        }
    }

    /// Override the number of holes (single-hole events, tests)
    pub fn with_hole_count(mut self, holes: u8) -> Self {
        self.hole_count = holes.max(1);
        self
    }

    /// Place ball and hole for a new hole
    pub fn apply_layout(&mut self, layout: Layout) {
        self.ball = Ball::at_rest(layout.ball);
        self.hole = layout.hole;
    }

    /// True once every hole has been sunk
    pub fn all_holes_done(&self) -> bool {
        self.status.hole_number > self.hole_count
    }

    /// Holes sunk so far
    pub fn holes_completed(&self) -> u8 {
        self.status.hole_number.saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_field_interior() {
        let field = Field::STANDARD;
        assert_eq!(field.right(), 63);
        assert_eq!(field.bottom(), 47);
        assert_eq!(field.min_x(), 1.0);
        assert_eq!(field.max_x(), 62.0);
        assert_eq!(field.min_y(), 13.0);
        assert_eq!(field.max_y(), 45.0);
        assert_eq!(field.min_separation(), 17);
    }

    #[test]
    fn test_hole_covers_two_by_two_block() {
        let hole = Hole::new(10, 8);
        assert!(hole.covers(IVec2::new(20, 16)));
        assert!(hole.covers(IVec2::new(21, 17)));
        assert!(!hole.covers(IVec2::new(22, 16)));
        assert!(!hole.covers(IVec2::new(20, 18)));
        assert!(!hole.covers(IVec2::new(19, 17)));
    }

    #[test]
    fn test_settle_snaps_to_rendered_position() {
        let mut ball = Ball {
            pos: Vec2::new(10.5, 20.49),
            vel: Vec2::new(0.05, 0.0),
            speed: 0.05,
        };
        ball.settle();
        assert_eq!(ball.pos, Vec2::new(11.0, 20.0));
        assert_eq!(ball.vel, Vec2::ZERO);
        assert!(ball.is_at_rest());
    }

    #[test]
    fn test_new_round_status() {
        let round = Round::new(Layout {
            ball: IVec2::new(30, 40),
            hole: Hole::new(5, 8),
        });
        assert_eq!(round.status, GameStatus::default());
        assert_eq!(round.status.hole_number, 1);
        assert_eq!(round.hole_count, NUM_HOLES);
        assert_eq!(round.holes_completed(), 0);
        assert!(!round.all_holes_done());
    }
}
