//! Lee Carvallo's Putting Challenge - a block-graphics putting game
//!
//! Core modules:
//! - `sim`: Swing physics, hole capture and field layout
//! - `flow`: Per-stroke and per-round game flow
//! - `io`: Display, input and printer collaborators (terminal + headless)
//! - `settings`: Presentation preferences loaded from JSON

pub mod flow;
pub mod io;
pub mod settings;
pub mod sim;

pub use settings::{AnimationSpeed, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Character screen dimensions (cells)
    pub const CHAR_WIDTH: u16 = 32;
    pub const CHAR_HEIGHT: u16 = 24;

    /// Menu text area, above the playing field
    pub const CHAR_MENU_TOP: u16 = 2;
    pub const CHAR_MENU_LEFT: u16 = 1;

    /// Heights of the text areas (lines)
    pub const TITLE_LINE_HEIGHT: i32 = 2;
    pub const STATUS_LINE_HEIGHT: i32 = 4;

    /// Plot units per character cell, along each axis
    pub const PLOT_PER_CELL: i32 = 2;
    pub const SCREEN_PLOT_WIDTH: i32 = CHAR_WIDTH as i32 * PLOT_PER_CELL;
    pub const SCREEN_PLOT_HEIGHT: i32 = CHAR_HEIGHT as i32 * PLOT_PER_CELL;

    /// Field border (plot units)
    pub const FIELD_LEFT: i32 = 0;
    pub const FIELD_TOP: i32 = PLOT_PER_CELL * (TITLE_LINE_HEIGHT + STATUS_LINE_HEIGHT);
    pub const FIELD_WIDTH: i32 = SCREEN_PLOT_WIDTH;
    pub const FIELD_BOTTOM: i32 = SCREEN_PLOT_HEIGHT - 1;
    pub const FIELD_HEIGHT: i32 = FIELD_BOTTOM - FIELD_TOP;

    /// Row holding the HOLE / SCORE counters
    pub const STATUS_ROW: u16 = (FIELD_BOTTOM / PLOT_PER_CELL) as u16;

    /// Ball physics (fixed per build)
    pub const BALL_DAMPING: f32 = 0.97;
    pub const AT_REST_SPEED: f32 = 0.1;
    /// Faster than this and the ball skips over the cup
    pub const IN_HOLE_SPEED: f32 = 2.0;

    /// Analog clock hour to degrees (30 degrees per hour)
    pub const CLOCK_TO_DEGREES: f32 = 30.0;
    /// Makes 12 o'clock point up the screen
    pub const NORTH_ANGLE_OFFSET: f32 = -90.0;

    /// Swing speeds for force keys 1..=8; key 9 is the power drive
    pub const FORCE_TABLE_MULTIPLIER: f32 = 0.125;
    pub const FORCE_TABLE: [u16; 8] = [2, 4, 6, 8, 16, 80, 200, 400];
    pub const POWER_DRIVE_KEY: char = '9';

    /// Holes per round
    #[cfg(feature = "vcfwest")]
    pub const NUM_HOLES: u8 = 1;
    #[cfg(not(feature = "vcfwest"))]
    pub const NUM_HOLES: u8 = 5;

    /// Column where the power-drive ball leaves the screen
    pub const PARKING_LOT_X: i32 = (SCREEN_PLOT_WIDTH - 1) / 2;

    /// Printer paper width (characters)
    pub const PRINTER_COLUMNS: usize = 32;
}

/// Convert an analog clock hour (0.0 - 12.0) to a heading in radians
#[inline]
pub fn clock_to_radians(direction: f32) -> f32 {
    (consts::CLOCK_TO_DEGREES * direction + consts::NORTH_ANGLE_OFFSET).to_radians()
}

/// Velocity for a swing of `speed` toward clock hour `direction`
#[inline]
pub fn clock_to_velocity(direction: f32, speed: f32) -> Vec2 {
    let angle = clock_to_radians(direction);
    Vec2::new(speed * angle.cos(), speed * angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_directions() {
        // 12 o'clock is up (negative y on screen), 3 is right, 6 is down
        let up = clock_to_velocity(12.0, 1.0);
        assert!(up.x.abs() < 1e-5);
        assert!((up.y + 1.0).abs() < 1e-5);

        let right = clock_to_velocity(3.0, 1.0);
        assert!((right.x - 1.0).abs() < 1e-5);
        assert!(right.y.abs() < 1e-5);

        let down = clock_to_velocity(6.0, 2.0);
        assert!(down.x.abs() < 1e-5);
        assert!((down.y - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_field_constants() {
        use consts::*;
        assert_eq!(FIELD_TOP, 12);
        assert_eq!(FIELD_BOTTOM, 47);
        assert_eq!(FIELD_HEIGHT, 35);
        assert_eq!(STATUS_ROW, 23);
        assert_eq!(PARKING_LOT_X, 31);
    }
}
