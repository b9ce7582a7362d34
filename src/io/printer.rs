//! Winner's certificate
//!
//! Lines are centred on 32-column paper. The binary sends them to a text
//! file standing in for the printer; tests use `RecordingPrinter`.

use std::io::Write;

use super::Printer;
use crate::consts::PRINTER_COLUMNS;

/// Index of the winner's name in `certificate_lines`
const NAME_LINE: usize = 1;

/// Blank lines fed after the certificate so it clears the tear bar
const TRAILING_FEED_LINES: usize = 6;

/// Left-pad `text` so it sits in the middle of the paper
pub fn center(text: &str) -> String {
    let pad = PRINTER_COLUMNS.saturating_sub(text.chars().count()) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

/// Printer writing to any byte sink
#[derive(Debug)]
pub struct LinePrinter<W: Write> {
    out: W,
}

impl<W: Write> LinePrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Printer for LinePrinter<W> {
    fn print_center(&mut self, text: &str, newline: bool) -> std::io::Result<()> {
        self.out.write_all(center(text).as_bytes())?;
        if newline {
            self.out.write_all(b"\n")?;
        }
        self.out.flush()
    }
}

/// Certificate text for a winner
pub fn certificate_lines(name: &str) -> Vec<String> {
    let mut lines = vec![
        "this certifies that".to_string(),
        name.to_string(),
        "beat lee carvallo's putting".to_string(),
    ];

    #[cfg(feature = "vcfwest")]
    lines.extend(
        ["challenge at the", "\"lovable luggables\" table", "at vcf west 2025"].map(String::from),
    );
    #[cfg(not(feature = "vcfwest"))]
    lines.push("challenge".to_string());

    lines.extend(std::iter::repeat_n(String::new(), TRAILING_FEED_LINES));
    lines
}

/// Print the whole certificate, one centred line at a time
pub fn print_certificate(printer: &mut dyn Printer, name: &str) -> std::io::Result<()> {
    for (i, line) in certificate_lines(name).iter().enumerate() {
        if i == NAME_LINE {
            // The typed name keeps its terminator, which counts toward the centring
            printer.print_center(&format!("{line}\n"), false)?;
        } else {
            printer.print_center(line, true)?;
        }
    }
    log::info!("Printed certificate for {:?}", name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_padding() {
        assert_eq!(center("this certifies that"), format!("{}this certifies that", " ".repeat(6)));
        assert_eq!(center(""), " ".repeat(16));
        assert_eq!(center("ab"), format!("{}ab", " ".repeat(15)));
        // Longer than the paper: no padding
        let long = "x".repeat(40);
        assert_eq!(center(&long), long);
    }

    #[test]
    fn test_line_printer_output() {
        let mut printer = LinePrinter::new(Vec::new());
        printer.print_center("ann", false).unwrap();
        printer.print_center("bo", true).unwrap();

        let out = String::from_utf8(printer.into_inner()).unwrap();
        assert_eq!(out, format!("{}ann{}bo\n", " ".repeat(14), " ".repeat(15)));
    }

    #[test]
    fn test_certificate_text() {
        let mut printer = LinePrinter::new(Vec::new());
        print_certificate(&mut printer, "marge").unwrap();

        let out = String::from_utf8(printer.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0].trim(), "this certifies that");
        assert_eq!(lines[1], format!("{}marge", " ".repeat(13)));
        assert_eq!(lines[2].trim(), "beat lee carvallo's putting");
        assert!(lines[3].trim().starts_with("challenge"));
        assert_eq!(lines.len(), certificate_lines("marge").len());
        assert!(lines.iter().rev().take(TRAILING_FEED_LINES).all(|l| l.trim().is_empty()));
    }

    #[test]
    fn test_name_centred_with_terminator() {
        let mut printer = LinePrinter::new(Vec::new());
        print_certificate(&mut printer, "bo").unwrap();

        let out = String::from_utf8(printer.into_inner()).unwrap();
        let name = out.lines().nth(NAME_LINE).unwrap();
        assert_eq!(name, format!("{}bo", " ".repeat(14)));
    }

    #[test]
    fn test_blank_name_still_printed() {
        let mut printer = LinePrinter::new(Vec::new());
        print_certificate(&mut printer, "   ").unwrap();

        let out = String::from_utf8(printer.into_inner()).unwrap();
        assert_eq!(out.lines().nth(NAME_LINE).unwrap(), " ".repeat(14 + 3));
        assert_eq!(out.lines().count(), certificate_lines("   ").len());
    }
}
