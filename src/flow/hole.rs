//! One stroke of play
//!
//! `play_stroke` is the only entry point: it shows the counters, asks for
//! direction and force, then either plays the swing out or runs the power
//! drive. Everything it changes lives in the `Round` it is handed.

use glam::IVec2;

use crate::consts::*;
use crate::io::prompt::{self, ForceSelection};
use crate::io::{Console, Display, InputSource, print_certificate};
use crate::sim::{Ball, Field, GameStatus, Hole, LayoutSource, ParkingLotRun, Round, SwingStep, simulate};

pub const TITLE: &str = "lee carvallo's putting challenge";

/// Status row columns
const HOLE_COL: u16 = ((SCREEN_PLOT_WIDTH - 1) / 2 - 16) as u16;
const SCORE_COL: u16 = ((SCREEN_PLOT_WIDTH - 1) / 2 - 8) as u16;

const POWER_DRIVE_INTRO: &str = "you have entered";
/// Flash frames, indexed by frame parity
const POWER_DRIVE_FLASH: [&str; 2] = ["power drive", "POWER DRIVE"];
const POWER_DRIVE_ROW: u16 = ((FIELD_BOTTOM + FIELD_TOP) / 4) as u16;
const POWER_DRIVE_COL: u16 =
    CHAR_WIDTH / 2 - ((POWER_DRIVE_INTRO.len() + POWER_DRIVE_FLASH[1].len() + 1) / 2) as u16;
const POWER_DRIVE_FLASHES: u32 = 40;
const POWER_DRIVE_FLASH_MS: u64 = 5;

const CELEBRATE_ROW: u16 = 20;
const CELEBRATE_COL: u16 = 2;
const CELEBRATE_FLASHES: u32 = 20;
const CELEBRATE_FLASH_MS: u64 = 16;

/// What a call to [`play_stroke`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeOutcome {
    /// Ball dropped; `won` once the last hole is sunk
    Captured { won: bool },
    /// Ball came to rest on the green
    NotCaptured,
    /// Ball went to the parking lot; `retry` if the player carried on
    PowerDrive { retry: bool },
    /// The round had already ended, nothing was played
    RoundOver,
}

/// Field outline plus the title lines above the menu
pub fn draw_border_and_title<D: Display + ?Sized>(display: &mut D, field: &Field) {
    display.draw_border(field);
    display.print_at(0, 0, TITLE);
    display.print_at(1, 0, &"*".repeat(CHAR_WIDTH as usize));
}

fn status_field(label: &str, value: u8) -> String {
    format!("{label}:{value:>2}")
}

fn show_score<D: Display + ?Sized>(display: &mut D, score: u8) {
    display.print_at(STATUS_ROW, SCORE_COL, &status_field("SCORE", score));
}

/// HOLE and SCORE counters under the field
pub fn show_status<D: Display + ?Sized>(display: &mut D, status: &GameStatus) {
    display.print_at(STATUS_ROW, HOLE_COL, &status_field("HOLE", status.hole_number));
    show_score(display, status.hole_stroke_count);
}

fn draw_hole<D: Display + ?Sized>(display: &mut D, hole: &Hole) {
    display.print_at(hole.cell.y as u16, hole.cell.x as u16, "O");
}

/// Plot the ball and the hole where the round has them
pub fn draw_playfield<D: Display + ?Sized>(display: &mut D, round: &Round) {
    display.plot(round.ball.plot_pos());
    draw_hole(display, &round.hole);
}

/// Lay out a fresh hole and draw it
pub fn setup_playfield<D, L>(round: &mut Round, display: &mut D, layouts: &mut L)
where
    D: Display + ?Sized,
    L: LayoutSource + ?Sized,
{
    let layout = layouts.generate(&round.field);
    round.apply_layout(layout);
    log::info!(
        "Hole {}: ball at {}, hole at {}",
        round.status.hole_number,
        layout.ball,
        layout.hole.cell
    );
    draw_playfield(display, round);
}

/// Erase the ball and the hole
pub fn reset_playfield<D: Display + ?Sized>(round: &Round, display: &mut D) {
    display.unplot(round.ball.plot_pos());
    display.print_at(round.hole.cell.y as u16, round.hole.cell.x as u16, " ");
}

fn clear_field<D: Display + ?Sized>(display: &mut D, field: &Field) {
    display.clear_region(field.left + 1, field.top + 1, field.width - 2, field.height - 2);
}

/// Play one stroke of the current hole
pub fn play_stroke<D, I, L>(round: &mut Round, console: &mut Console<D, I>, layouts: &mut L) -> StrokeOutcome
where
    D: Display,
    I: InputSource,
    L: LayoutSource + ?Sized,
{
    if round.status.restart {
        return StrokeOutcome::RoundOver;
    }

    show_status(&mut console.display, &round.status);
    round.status.hole_stroke_count = round.status.hole_stroke_count.saturating_add(1);

    let direction = prompt::enter_direction(console);
    let force = prompt::choose_force(console);
    log::debug!(
        "Stroke {} on hole {}: direction {} force {:?}",
        round.status.hole_stroke_count,
        round.status.hole_number,
        direction,
        force
    );

    match force {
        ForceSelection::PowerDrive => power_drive(round, console, layouts),
        ForceSelection::Speed(speed) => swing(round, console, layouts, direction, speed),
    }
}

fn render_step<D: Display + ?Sized>(display: &mut D, step: &SwingStep) {
    display.unplot(step.from);
    draw_hole(display, &step.hole);
    display.plot(step.to);
    display.end_frame();
}

fn swing<D, I, L>(
    round: &mut Round,
    console: &mut Console<D, I>,
    layouts: &mut L,
    direction: f32,
    speed: f32,
) -> StrokeOutcome
where
    D: Display,
    I: InputSource,
    L: LayoutSource + ?Sized,
{
    let display = &mut console.display;
    let report = simulate(&round.field, &mut round.ball, &round.hole, direction, speed, |step| {
        render_step(display, step)
    });
    show_score(&mut console.display, round.status.hole_stroke_count);

    if !report.captured {
        log::debug!("Ball stopped at {} after {} steps", round.ball.plot_pos(), report.steps);
        return StrokeOutcome::NotCaptured;
    }

    log::info!(
        "Hole {} sunk in {} strokes so far",
        round.status.hole_number,
        round.status.hole_stroke_count
    );
    celebrate_hole(&mut console.display, round);
    round.status.hole_number += 1;

    if round.all_holes_done() {
        celebrate_win(console);
        round.status.restart = true;
        log::info!("Round won with {} strokes", round.status.hole_stroke_count);
        return StrokeOutcome::Captured { won: true };
    }

    reset_playfield(round, &mut console.display);
    setup_playfield(round, &mut console.display, layouts);
    StrokeOutcome::Captured { won: false }
}

fn celebrate_hole<D: Display + ?Sized>(display: &mut D, round: &Round) {
    display.print_at(CELEBRATE_ROW, CELEBRATE_COL, "ball is in: hole");

    for _ in 0..CELEBRATE_FLASHES {
        display.plot(round.ball.plot_pos());
        display.pause(CELEBRATE_FLASH_MS);
        draw_hole(display, &round.hole);
        display.pause(CELEBRATE_FLASH_MS);
    }

    clear_field(display, &round.field);
}

fn celebrate_win<D: Display, I: InputSource>(console: &mut Console<D, I>) {
    const WON: [&str; 2] = ["YOU HAVE WON lee carvallo's", "putting challenge"];

    if console.has_printer() {
        let row = prompt::show_menu(
            &mut console.display,
            &[WON[0], WON[1], "enter name to print certificate"],
        );
        let name = prompt::enter_name(console, row);

        if !name.is_empty() {
            if let Some(printer) = console.printer.as_mut() {
                console.display.set_fast_mode(true);
                if let Err(e) = print_certificate(printer.as_mut(), &name) {
                    log::warn!("Certificate printing failed: {}", e);
                }
                console.display.set_fast_mode(false);
            }
        }
    } else {
        prompt::show_menu(
            &mut console.display,
            &[WON[0], WON[1], "> press any key to play again <"],
        );
        prompt::wait_keypress(&mut console.input);
    }

    prompt::clear_menu_area(&mut console.display);
}

/// Flash the banner, scroll the screen away and roll the ball off to the
/// parking lot. Returns where the ball ended up.
fn run_power_drive_sequence<D: Display + ?Sized>(display: &mut D, row: i32) -> IVec2 {
    display.print_at(POWER_DRIVE_ROW, POWER_DRIVE_COL, POWER_DRIVE_INTRO);

    let flash_col = POWER_DRIVE_COL + POWER_DRIVE_INTRO.len() as u16 + 1;
    for i in (1..=POWER_DRIVE_FLASHES).rev() {
        display.print_at(POWER_DRIVE_ROW, flash_col, POWER_DRIVE_FLASH[(i % 2) as usize]);
        display.pause(POWER_DRIVE_FLASH_MS);
    }

    for _ in 0..CHAR_WIDTH {
        display.scroll_down();
    }

    let mut last: Option<IVec2> = None;
    for pos in ParkingLotRun::new(row) {
        if let Some(prev) = last {
            display.unplot(prev);
        }
        display.plot(pos);
        display.end_frame();
        last = Some(pos);
    }
    last.unwrap_or(IVec2::new(0, row))
}

fn power_drive<D, I, L>(round: &mut Round, console: &mut Console<D, I>, layouts: &mut L) -> StrokeOutcome
where
    D: Display,
    I: InputSource,
    L: LayoutSource + ?Sized,
{
    let parked = run_power_drive_sequence(&mut console.display, round.ball.plot_pos().y);
    round.ball = Ball::at_rest(parked);
    // Penalty stroke
    round.status.hole_stroke_count = round.status.hole_stroke_count.saturating_add(1);

    let retry = prompt::play_again(console);
    log::info!(
        "Power drive on hole {}, retry: {}",
        round.status.hole_number,
        retry
    );

    if retry {
        reset_playfield(round, &mut console.display);
        draw_border_and_title(&mut console.display, &round.field);
        setup_playfield(round, &mut console.display, layouts);
        show_score(&mut console.display, round.status.hole_stroke_count);
    } else {
        round.status.restart = true;
    }

    StrokeOutcome::PowerDrive { retry }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{DisplayOp, HeadlessDisplay, RecordingPrinter, ScriptedInput};
    use crate::sim::{FixedLayouts, Layout};

    fn layout() -> Layout {
        Layout {
            ball: IVec2::new(20, 19),
            hole: Hole::new(10, 8),
        }
    }

    fn start(holes: u8, input: ScriptedInput) -> (Round, Console<HeadlessDisplay, ScriptedInput>, FixedLayouts) {
        let round = Round::new(layout()).with_hole_count(holes);
        let console = Console::new(HeadlessDisplay::new(), input);
        (round, console, FixedLayouts::new(vec![layout()]))
    }

    #[test]
    fn test_banner_positions() {
        assert_eq!(POWER_DRIVE_ROW, 14);
        assert_eq!(POWER_DRIVE_COL, 2);
        assert_eq!(HOLE_COL, 15);
        assert_eq!(SCORE_COL, 23);
        assert_eq!(status_field("SCORE", 7), "SCORE: 7");
        assert_eq!(status_field("HOLE", 12), "HOLE:12");
    }

    #[test]
    fn test_missed_stroke_counts_once() {
        let (mut round, mut console, mut layouts) = start(5, ScriptedInput::new().stroke("6", '1'));

        let outcome = play_stroke(&mut round, &mut console, &mut layouts);

        assert_eq!(outcome, StrokeOutcome::NotCaptured);
        assert_eq!(round.status.hole_stroke_count, 1);
        assert_eq!(round.status.hole_number, 1);
        assert!(round.ball.plot_pos().y > 19);
        assert!(round.ball.is_at_rest());
        assert_eq!(layouts.served(), 0);
    }

    #[test]
    fn test_status_shown_before_increment() {
        let (mut round, mut console, mut layouts) = start(5, ScriptedInput::new().stroke("6", '1'));
        play_stroke(&mut round, &mut console, &mut layouts);

        let ops = console.display.ops();
        assert_eq!(
            ops[0],
            DisplayOp::Print {
                row: STATUS_ROW,
                col: HOLE_COL,
                text: "HOLE: 1".to_string()
            }
        );
        assert_eq!(
            ops[1],
            DisplayOp::Print {
                row: STATUS_ROW,
                col: SCORE_COL,
                text: "SCORE: 0".to_string()
            }
        );
        // Redisplayed after the swing
        let score: String = console
            .display
            .text_at(STATUS_ROW)
            .chars()
            .skip(SCORE_COL as usize)
            .collect();
        assert_eq!(score.trim(), "SCORE: 1");
    }

    #[test]
    fn test_swing_frames_are_unplot_hole_plot() {
        let (mut round, mut console, mut layouts) = start(5, ScriptedInput::new().stroke("6", '2'));
        play_stroke(&mut round, &mut console, &mut layouts);

        let ops = console.display.ops();
        let first = ops
            .iter()
            .position(|op| matches!(op, DisplayOp::Unplot(_)))
            .unwrap();
        assert_eq!(ops[first], DisplayOp::Unplot(IVec2::new(20, 19)));
        assert_eq!(
            ops[first + 1],
            DisplayOp::Print {
                row: 8,
                col: 10,
                text: "O".to_string()
            }
        );
        assert!(matches!(ops[first + 2], DisplayOp::Plot(_)));
        assert_eq!(ops[first + 3], DisplayOp::EndFrame);
    }

    #[test]
    fn test_capture_lays_out_next_hole() {
        let (mut round, mut console, mut layouts) = start(5, ScriptedInput::new().stroke("12", '1'));

        let outcome = play_stroke(&mut round, &mut console, &mut layouts);

        assert_eq!(outcome, StrokeOutcome::Captured { won: false });
        assert_eq!(round.status.hole_number, 2);
        assert_eq!(round.status.hole_stroke_count, 1);
        assert!(!round.status.restart);
        assert_eq!(layouts.served(), 1);
        assert_eq!(round.ball.plot_pos(), layout().ball);
        assert!(console.display.printed("ball is in: hole"));
        assert_eq!(
            console.display.total_pause(),
            CELEBRATE_FLASHES as u64 * 2 * CELEBRATE_FLASH_MS
        );
    }

    #[test]
    fn test_power_drive_retry_keeps_hole() {
        let input = ScriptedInput::new().stroke("3", '9').key('y');
        let (mut round, mut console, mut layouts) = start(5, input);

        let outcome = play_stroke(&mut round, &mut console, &mut layouts);

        assert_eq!(outcome, StrokeOutcome::PowerDrive { retry: true });
        assert_eq!(round.status.hole_stroke_count, 2);
        assert_eq!(round.status.hole_number, 1);
        assert!(!round.status.restart);
        assert_eq!(layouts.served(), 1);
        assert_eq!(round.ball.plot_pos(), layout().ball);
        // Title redrawn after the scroll
        assert_eq!(console.display.text_at(0).trim_end(), TITLE);
    }

    #[test]
    fn test_power_drive_sequence() {
        let input = ScriptedInput::new().stroke("3", '9').key('n');
        let (mut round, mut console, mut layouts) = start(5, input);

        let outcome = play_stroke(&mut round, &mut console, &mut layouts);
        assert_eq!(outcome, StrokeOutcome::PowerDrive { retry: false });
        assert!(round.status.restart);

        let ops = console.display.ops();
        let flashes: Vec<&str> = ops
            .iter()
            .filter_map(|op| match op {
                DisplayOp::Print { row, col, text } if *row == POWER_DRIVE_ROW && *col == 19 => {
                    Some(text.as_str())
                }
                _ => None,
            })
            .collect();
        assert_eq!(flashes.len(), POWER_DRIVE_FLASHES as usize);
        assert_eq!(flashes[0], "power drive");
        assert_eq!(flashes[1], "POWER DRIVE");

        let scrolls = ops.iter().filter(|op| **op == DisplayOp::ScrollDown).count();
        assert_eq!(scrolls, CHAR_WIDTH as usize);

        // Ball parks on its own row at the lot
        assert_eq!(round.ball.plot_pos().y, 19);
        assert!(round.ball.plot_pos().x >= PARKING_LOT_X);
    }

    #[test]
    fn test_win_without_printer() {
        let input = ScriptedInput::new().stroke("12", '1').key('x');
        let (mut round, mut console, mut layouts) = start(1, input);

        let outcome = play_stroke(&mut round, &mut console, &mut layouts);

        assert_eq!(outcome, StrokeOutcome::Captured { won: true });
        assert!(round.status.restart);
        assert_eq!(round.holes_completed(), 1);
        assert!(console.display.printed("> press any key to play again <"));
        assert!(console.input.is_empty());
    }

    #[test]
    fn test_win_prints_certificate_in_fast_mode() {
        let input = ScriptedInput::new().stroke("12", '1').line("  marge ");
        let (mut round, console, mut layouts) = start(1, input);
        let printer = RecordingPrinter::new();
        let lines = printer.lines();
        let mut console = console.with_printer(printer);

        play_stroke(&mut round, &mut console, &mut layouts);

        let lines = lines.borrow();
        assert_eq!(lines[0].trim(), "this certifies that");
        // Name printed as typed, centred with its terminator counted
        assert_eq!(lines[1], format!("{}  marge ", " ".repeat(11)));

        let ops = console.display.ops();
        let on = ops.iter().position(|op| *op == DisplayOp::FastMode(true)).unwrap();
        let off = ops.iter().position(|op| *op == DisplayOp::FastMode(false)).unwrap();
        assert!(on < off);
    }

    #[test]
    fn test_empty_name_prints_nothing() {
        let input = ScriptedInput::new().stroke("12", '1').line("");
        let (mut round, console, mut layouts) = start(1, input);
        let printer = RecordingPrinter::new();
        let lines = printer.lines();
        let mut console = console.with_printer(printer);

        play_stroke(&mut round, &mut console, &mut layouts);

        assert!(lines.borrow().is_empty());
        assert!(!console.display.ops().contains(&DisplayOp::FastMode(true)));
    }

    #[test]
    fn test_finished_round_is_left_alone() {
        let (mut round, mut console, mut layouts) = start(1, ScriptedInput::new());
        round.status.restart = true;
        let before = round.status;

        assert_eq!(play_stroke(&mut round, &mut console, &mut layouts), StrokeOutcome::RoundOver);
        assert_eq!(round.status, before);
        assert!(console.display.ops().is_empty());
    }
}
