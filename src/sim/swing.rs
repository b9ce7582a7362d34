//! Discrete-time swing simulation
//!
//! One call to [`simulate`] plays a stroke out to the end: the ball moves,
//! bounces off the field edges and slows down until it rests or drops into
//! the hole. Every step is reported to a callback so the caller can animate
//! it.

use glam::IVec2;

use super::collision::{WallHit, in_hole, reflect_off_walls};
use super::state::{Ball, Field, Hole};
use crate::clock_to_velocity;
use crate::consts::*;

/// One animation step of a swing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwingStep {
    /// Where the ball was drawn before this step
    pub from: IVec2,
    /// Where the ball is drawn now
    pub to: IVec2,
    pub hole: Hole,
    /// Speed the ball had while making this step
    pub speed: f32,
    pub bounced: WallHit,
}

/// How a swing ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwingReport {
    pub captured: bool,
    pub steps: u32,
}

/// Set the ball moving toward clock hour `direction`
pub fn launch(ball: &mut Ball, direction: f32, speed: f32) {
    ball.vel = clock_to_velocity(direction, speed);
    ball.speed = speed;
}

/// Advance the ball by its velocity and bounce it off the walls
pub fn step(field: &Field, ball: &mut Ball) -> WallHit {
    ball.pos += ball.vel;
    reflect_off_walls(field, &mut ball.pos, &mut ball.vel)
}

/// Apply one step of rolling friction
#[inline]
pub fn damp(ball: &mut Ball) {
    ball.speed *= BALL_DAMPING;
    ball.vel *= BALL_DAMPING;
}

/// Number of steps a ball launched at `speed` rolls before it stops
pub fn steps_to_rest(mut speed: f32) -> u32 {
    let mut steps = 0;
    while speed >= AT_REST_SPEED {
        speed *= BALL_DAMPING;
        steps += 1;
    }
    steps
}

/// Play a swing out to the end.
///
/// The capture check only runs while the ball is slower than
/// [`IN_HOLE_SPEED`], and it runs before that step's damping. A ball that
/// stops without dropping in is left at its rendered position for the next
/// stroke.
pub fn simulate<F>(
    field: &Field,
    ball: &mut Ball,
    hole: &Hole,
    direction: f32,
    speed: f32,
    mut on_step: F,
) -> SwingReport
where
    F: FnMut(&SwingStep),
{
    launch(ball, direction, speed);

    let mut prev = ball.plot_pos();
    let mut steps = 0;

    while ball.speed >= AT_REST_SPEED {
        let bounced = step(field, ball);
        steps += 1;

        let plot = ball.plot_pos();
        on_step(&SwingStep {
            from: prev,
            to: plot,
            hole: *hole,
            speed: ball.speed,
            bounced,
        });

        if in_hole(plot, ball.speed, hole) {
            ball.settle();
            return SwingReport {
                captured: true,
                steps,
            };
        }

        damp(ball);
        prev = plot;
    }

    ball.settle();
    SwingReport {
        captured: false,
        steps,
    }
}

/// Path of a power-drive ball rolling off into the parking lot.
///
/// Purely cosmetic: the ball starts at the left edge of the screen, drifts
/// right with a decaying step and never touches walls or the hole. The last
/// position yielded is the first one at or past [`PARKING_LOT_X`].
#[derive(Debug, Clone)]
pub struct ParkingLotRun {
    row: i32,
    x: f32,
    dx: f32,
    done: bool,
}

impl ParkingLotRun {
    pub fn new(row: i32) -> Self {
        Self {
            row,
            x: 0.0,
            dx: 1.0,
            done: false,
        }
    }
}

impl Iterator for ParkingLotRun {
    type Item = IVec2;

    fn next(&mut self) -> Option<IVec2> {
        if self.done {
            return None;
        }

        // Truncated, unlike the swing
        let x = self.x as i32;
        self.x += self.dx;
        self.dx *= BALL_DAMPING;

        if x >= PARKING_LOT_X {
            self.done = true;
        }
        Some(IVec2::new(x, self.row))
    }
}
