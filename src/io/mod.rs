//! Screen, keyboard and printer collaborators
//!
//! The game core only talks to these traits. Implementations:
//! - `terminal`: crossterm-backed block graphics and keyboard
//! - `headless`: recording display and scripted input for tests/demos
//! - `printer`: certificate printing to any `Write` sink

pub mod headless;
pub mod printer;
pub mod prompt;
pub mod screen;
pub mod terminal;

pub use headless::{DisplayOp, HeadlessDisplay, RecordingPrinter, Scripted, ScriptedInput};
pub use printer::{LinePrinter, certificate_lines, print_certificate};
pub use prompt::{Club, ForceSelection};
pub use screen::ScreenBuffer;
pub use terminal::{TerminalDisplay, TerminalInput};

use glam::IVec2;

use crate::sim::Field;

/// Character/plot screen.
///
/// Text is addressed in (row, column) character cells. Plotting is addressed
/// in plot units, two per cell along each axis.
pub trait Display {
    /// Blank the whole screen
    fn clear(&mut self);

    /// Write text starting at a character cell
    fn print_at(&mut self, row: u16, col: u16, text: &str);

    /// Set a single plot unit
    fn plot(&mut self, pos: IVec2);

    /// Clear a single plot unit
    fn unplot(&mut self, pos: IVec2);

    /// Blank a rectangle given in plot units, text included
    fn clear_region(&mut self, x: i32, y: i32, width: i32, height: i32);

    /// Outline the field
    fn draw_border(&mut self, field: &Field) {
        let right = field.right();
        let bottom = field.top + field.height - 1;
        for x in field.left..=right {
            self.plot(IVec2::new(x, field.top));
            self.plot(IVec2::new(x, bottom));
        }
        for y in field.top..=bottom {
            self.plot(IVec2::new(field.left, y));
            self.plot(IVec2::new(right, y));
        }
    }

    /// Scroll every text line down by one
    fn scroll_down(&mut self);

    /// Fast mode suspends screen output (used while printing)
    fn set_fast_mode(&mut self, fast: bool);

    /// Hold the current picture for a moment
    fn pause(&mut self, millis: u64);

    /// Called once per animation step
    fn end_frame(&mut self) {}
}

/// Keyboard
pub trait InputSource {
    /// Key currently pressed, or `None` while idle
    fn poll_key(&mut self) -> Option<char>;

    /// Blocking line read, at most `max_len` characters, no line terminator
    fn read_line(&mut self, max_len: usize) -> String;
}

/// Printer that centres each line on the paper
pub trait Printer {
    fn print_center(&mut self, text: &str, newline: bool) -> std::io::Result<()>;
}

/// The collaborators a round is played through
pub struct Console<D, I> {
    pub display: D,
    pub input: I,
    pub printer: Option<Box<dyn Printer>>,
}

impl<D: Display, I: InputSource> Console<D, I> {
    pub fn new(display: D, input: I) -> Self {
        Self {
            display,
            input,
            printer: None,
        }
    }

    /// Attach a certificate printer
    pub fn with_printer(mut self, printer: impl Printer + 'static) -> Self {
        self.printer = Some(Box::new(printer));
        self
    }

    pub fn has_printer(&self) -> bool {
        self.printer.is_some()
    }
}
