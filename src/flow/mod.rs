//! Game flow
//!
//! `hole` plays one stroke at a time against a `Round`; `game` wraps a whole
//! round from the welcome screen to the win (or a declined retry).

pub mod game;
pub mod hole;

pub use game::{RoundSummary, run_round, run_round_with_holes};
pub use hole::{
    StrokeOutcome, TITLE, draw_border_and_title, draw_playfield, play_stroke, reset_playfield, setup_playfield,
    show_status,
};
