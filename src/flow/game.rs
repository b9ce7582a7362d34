//! A full round, from the welcome screen until it is won or abandoned

use serde::{Deserialize, Serialize};

use super::hole::{StrokeOutcome, draw_border_and_title, draw_playfield, play_stroke};
use crate::consts::NUM_HOLES;
use crate::io::prompt::{self, Club};
use crate::io::{Console, Display, InputSource};
use crate::sim::{Field, LayoutSource, Round};

/// How a round went
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub club: Club,
    pub holes_completed: u8,
    /// Strokes taken, penalties included
    pub strokes: u8,
    pub won: bool,
}

/// Play a round of [`NUM_HOLES`] holes
pub fn run_round<D, I, L>(console: &mut Console<D, I>, layouts: &mut L) -> RoundSummary
where
    D: Display,
    I: InputSource,
    L: LayoutSource + ?Sized,
{
    run_round_with_holes(console, layouts, NUM_HOLES)
}

/// Play a round with a custom hole count
pub fn run_round_with_holes<D, I, L>(console: &mut Console<D, I>, layouts: &mut L, holes: u8) -> RoundSummary
where
    D: Display,
    I: InputSource,
    L: LayoutSource + ?Sized,
{
    let field = Field::STANDARD;

    console.display.clear();
    draw_border_and_title(&mut console.display, &field);
    prompt::welcome(console);

    let mut round = Round::new(layouts.generate(&field)).with_hole_count(holes);
    log::info!(
        "Round started: {} holes, ball at {}, hole at {}",
        round.hole_count,
        round.ball.plot_pos(),
        round.hole.cell
    );
    draw_playfield(&mut console.display, &round);

    // Cosmetic, the swing never looks at it
    let club = prompt::choose_club(console);
    log::debug!("Club: {}", club.as_str());

    let mut won = false;
    while !round.status.restart {
        if let StrokeOutcome::Captured { won: true } = play_stroke(&mut round, console, layouts) {
            won = true;
        }
    }

    let summary = RoundSummary {
        club,
        holes_completed: round.holes_completed(),
        strokes: round.status.hole_stroke_count,
        won,
    };
    match serde_json::to_string(&summary) {
        Ok(json) => log::info!("Round over: {}", json),
        Err(e) => log::warn!("Could not serialize round summary: {}", e),
    }
    summary
}
