//! Swing physics and field layout
//!
//! All ball motion lives here. This module never touches the screen or
//! keyboard:
//! - Fixed damping and thresholds from `consts`
//! - Per-step events instead of drawing
//! - Layout randomness behind the `LayoutSource` seam

pub mod collision;
pub mod layout;
pub mod state;
pub mod swing;

pub use collision::{WallHit, in_hole, reflect_off_walls, round_to_plot};
pub use layout::{FixedLayouts, LayoutGenerator, LayoutSource, well_separated};
pub use state::{Ball, Field, GameStatus, Hole, Layout, Round};
pub use swing::{ParkingLotRun, SwingReport, SwingStep, simulate, steps_to_rest};
