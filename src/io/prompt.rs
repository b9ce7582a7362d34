//! Menus and input validation
//!
//! Every prompt shows its menu above the field, keeps polling until it gets
//! a key from its own set, then clears the menu area again. The flow
//! controllers therefore only ever see valid selections.

use serde::{Deserialize, Serialize};

use super::{Console, Display, InputSource};
use crate::consts::*;

/// Longest direction entry accepted
pub const DIRECTION_MAX_LEN: usize = 9;
/// Longest certificate name accepted
pub const NAME_MAX_LEN: usize = 29;

/// Pause after confirming "no", in milliseconds
const DECLINE_PAUSE_MS: u64 = 1000;

/// Club choice. Flavour only, it never changes the swing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Club {
    Putter,
    ThreeWood,
}

impl Club {
    pub fn as_str(&self) -> &'static str {
        match self {
            Club::Putter => "putter",
            Club::ThreeWood => "3-wood",
        }
    }

    pub fn from_key(key: char) -> Option<Self> {
        match key {
            '1' => Some(Club::Putter),
            '2' => Some(Club::ThreeWood),
            _ => None,
        }
    }
}

/// Result of the force prompt
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ForceSelection {
    /// Normal swing at this initial speed
    Speed(f32),
    /// Key 9: off to the parking lot
    PowerDrive,
}

impl ForceSelection {
    /// Map a force key ('1'..='9') to a selection
    pub fn from_key(key: char) -> Option<Self> {
        if key == POWER_DRIVE_KEY {
            return Some(ForceSelection::PowerDrive);
        }
        let index = key.to_digit(10)?.checked_sub(1)? as usize;
        FORCE_TABLE
            .get(index)
            .map(|&entry| ForceSelection::Speed(FORCE_TABLE_MULTIPLIER * entry as f32))
    }
}

/// Lenient clock parse: the longest numeric prefix (exponent included), or
/// 0 if there is none
pub fn parse_clock(text: &str) -> f32 {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let mut seen_digit = false;
    let mut seen_dot = false;

    while let Some(&b) = bytes.get(end) {
        match b {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }

    if !seen_digit {
        return 0.0;
    }

    // An exponent only counts with at least one digit after it
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let digits = bytes[exp..].iter().take_while(|b| b.is_ascii_digit()).count();
        if digits > 0 {
            end = exp + digits;
        }
    }

    text[..end].parse().unwrap_or(0.0)
}

/// Print menu lines under the title, returning the row after the last one
pub fn show_menu<D: Display + ?Sized>(display: &mut D, lines: &[&str]) -> u16 {
    let mut row = CHAR_MENU_TOP;
    for line in lines {
        display.print_at(row, CHAR_MENU_LEFT, line);
        row += 1;
    }
    row
}

/// Blank the menu area above the field
pub fn clear_menu_area<D: Display + ?Sized>(display: &mut D) {
    display.clear_region(
        0,
        PLOT_PER_CELL * CHAR_MENU_TOP as i32,
        SCREEN_PLOT_WIDTH - 1,
        PLOT_PER_CELL * STATUS_LINE_HEIGHT,
    );
}

/// Block until a key from `accept` is pressed
pub fn wait_for<I, T, F>(input: &mut I, mut accept: F) -> T
where
    I: InputSource + ?Sized,
    F: FnMut(char) -> Option<T>,
{
    loop {
        if let Some(value) = input.poll_key().and_then(&mut accept) {
            return value;
        }
    }
}

/// Block until any key is pressed
pub fn wait_keypress<I: InputSource + ?Sized>(input: &mut I) {
    wait_for(input, Some);
}

/// Welcome text, then wait for a key
pub fn welcome<D: Display, I: InputSource>(console: &mut Console<D, I>) {
    show_menu(
        &mut console.display,
        &[
            "welcome to lee carvallo's",
            "putting challenge. i am",
            "carvallo.",
            "> press any key to start <",
        ],
    );
    wait_keypress(&mut console.input);
    clear_menu_area(&mut console.display);
}

pub fn choose_club<D: Display, I: InputSource>(console: &mut Console<D, I>) -> Club {
    show_menu(
        &mut console.display,
        &["now, choose a club.", "", "1) putter", "2) 3-wood"],
    );
    let club = wait_for(&mut console.input, Club::from_key);
    clear_menu_area(&mut console.display);
    club
}

/// Ask for a clock direction. Anything unparseable counts as 0.
pub fn enter_direction<D: Display, I: InputSource>(console: &mut Console<D, I>) -> f32 {
    let row = show_menu(
        &mut console.display,
        &[
            "enter direction",
            "(0.0 - 12.0, like the face",
            " of a clock)",
        ],
    );
    console.display.print_at(row, CHAR_MENU_LEFT, "> ");
    let line = console.input.read_line(DIRECTION_MAX_LEN);
    clear_menu_area(&mut console.display);
    parse_clock(&line)
}

pub fn choose_force<D: Display, I: InputSource>(console: &mut Console<D, I>) -> ForceSelection {
    show_menu(
        &mut console.display,
        &[
            "enter the force of your swing",
            "  1) feather touch",
            "2-8) midranges",
            "  9) POWER DRIVE",
        ],
    );
    let force = wait_for(&mut console.input, ForceSelection::from_key);
    clear_menu_area(&mut console.display);
    force
}

/// Offer another go after a power drive. Returns true for yes.
pub fn play_again<D: Display, I: InputSource>(console: &mut Console<D, I>) -> bool {
    show_menu(
        &mut console.display,
        &[
            "ball is in: parking lot.",
            "would you like to try again?",
            "(y/n)",
        ],
    );
    let again = wait_for(&mut console.input, |key| match key {
        'y' => Some(true),
        'n' => Some(false),
        _ => None,
    });

    if !again {
        console
            .display
            .print_at(CHAR_MENU_TOP + 4, CHAR_MENU_LEFT, "you have selected: NO");
        console.display.pause(DECLINE_PAUSE_MS);
    }

    clear_menu_area(&mut console.display);
    again
}

/// Read a name at the prompt under the current menu, exactly as typed
pub fn enter_name<D: Display, I: InputSource>(console: &mut Console<D, I>, row: u16) -> String {
    console.display.print_at(row, CHAR_MENU_LEFT, "> ");
    console.input.read_line(NAME_MAX_LEN)
}
