//! Random ball and hole placement
//!
//! Each layout reseeds its own RNG. Positions are redrawn until the ball is
//! not close to the hole on both axes at once.

use std::time::{SystemTime, UNIX_EPOCH};

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{Field, Hole, Layout};

/// Anything that can lay out a hole (random in play, fixed in tests)
pub trait LayoutSource {
    fn generate(&mut self, field: &Field) -> Layout;
}

#[derive(Debug, Clone, Copy)]
enum SeedSource {
    Clock,
    Fixed(u64),
}

/// Randomized layout generator
#[derive(Debug, Clone)]
pub struct LayoutGenerator {
    seed: SeedSource,
    draws: u64,
}

impl Default for LayoutGenerator {
    fn default() -> Self {
        Self::from_clock()
    }
}

impl LayoutGenerator {
    /// Seed every layout from the wall clock
    pub fn from_clock() -> Self {
        Self {
            seed: SeedSource::Clock,
            draws: 0,
        }
    }

    /// Reproducible layouts derived from a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: SeedSource::Fixed(seed),
            draws: 0,
        }
    }

    fn next_seed(&mut self) -> u64 {
        let base = match self.seed {
            SeedSource::Clock => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or_default(),
            SeedSource::Fixed(seed) => seed,
        };
        self.draws += 1;
        base.wrapping_add(self.draws.wrapping_mul(2654435761))
    }

    /// Draw a new layout for `field`
    pub fn generate(&mut self, field: &Field) -> Layout {
        let mut rng = Pcg32::seed_from_u64(self.next_seed());
        let min_distance = field.min_separation();
        let mut rejected = 0u32;

        loop {
            let layout = draw(&mut rng, field);
            if well_separated(&layout, min_distance) {
                if rejected > 0 {
                    log::trace!("Layout accepted after {} redraws", rejected);
                }
                return layout;
            }
            rejected += 1;
        }
    }
}

impl LayoutSource for LayoutGenerator {
    fn generate(&mut self, field: &Field) -> Layout {
        LayoutGenerator::generate(self, field)
    }
}

/// One unchecked draw. Holes favour the upper part of the field.
fn draw(rng: &mut Pcg32, field: &Field) -> Layout {
    let hole_cols = ((field.width - 4) / 2).max(1);
    let hole_rows = (field.min_separation() - 2).max(1);

    let hole = Hole::new(
        field.left / 2 + 1 + rng.random_range(0..hole_cols),
        field.top / 2 + 1 + rng.random_range(0..hole_rows),
    );
    let ball = IVec2::new(
        field.left + 1 + rng.random_range(0..(field.width - 2).max(1)),
        field.top + 1 + rng.random_range(0..(field.height - 2).max(1)),
    );

    Layout { ball, hole }
}

/// Rejects only layouts that are close on both axes at the same time
pub fn well_separated(layout: &Layout, min_distance: i32) -> bool {
    let hole_plot = layout.hole.cell * 2;
    let dx = (hole_plot.x - layout.ball.x).abs();
    let dy = (hole_plot.y - layout.ball.y).abs();
    !(dx <= min_distance && dy <= min_distance)
}

/// Replays a fixed list of layouts, repeating the last one when exhausted
#[derive(Debug, Clone)]
pub struct FixedLayouts {
    layouts: Vec<Layout>,
    next: usize,
}

impl FixedLayouts {
    pub fn new(layouts: Vec<Layout>) -> Self {
        Self { layouts, next: 0 }
    }

    /// How many layouts have been handed out
    pub fn served(&self) -> usize {
        self.next
    }
}

impl LayoutSource for FixedLayouts {
    fn generate(&mut self, field: &Field) -> Layout {
        let index = self.next.min(self.layouts.len().saturating_sub(1));
        self.next += 1;
        match self.layouts.get(index) {
            Some(layout) => *layout,
            None => LayoutGenerator::seeded(self.next as u64).generate(field),
        }
    }
}
