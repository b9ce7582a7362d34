//! Lee Carvallo's Putting Challenge - terminal entry point

use lee_carvallo::Settings;
use lee_carvallo::flow::run_round;
use lee_carvallo::io::terminal;
use lee_carvallo::io::{Console, TerminalDisplay, TerminalInput};
use lee_carvallo::sim::LayoutGenerator;

#[cfg(feature = "printout")]
fn attach_printer(
    console: Console<TerminalDisplay, TerminalInput>,
    settings: &Settings,
) -> std::io::Result<Console<TerminalDisplay, TerminalInput>> {
    use lee_carvallo::io::LinePrinter;

    let paper = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&settings.printer_path)?;
    log::info!("Certificates go to {}", settings.printer_path.display());
    Ok(console.with_printer(LinePrinter::new(paper)))
}

#[cfg(not(feature = "printout"))]
fn attach_printer(
    console: Console<TerminalDisplay, TerminalInput>,
    _settings: &Settings,
) -> std::io::Result<Console<TerminalDisplay, TerminalInput>> {
    Ok(console)
}

fn main() -> std::io::Result<()> {
    env_logger::init();
    log::info!("Lee Carvallo's Putting Challenge starting...");

    let settings = Settings::load();
    log::info!(
        "Animation: {}, frame delay {} ms",
        settings.animation.as_str(),
        settings.frame_delay_ms
    );

    let mut layouts = match settings.layout_seed {
        Some(seed) => {
            log::info!("Layouts seeded with {}", seed);
            LayoutGenerator::seeded(seed)
        }
        None => LayoutGenerator::from_clock(),
    };

    let console = Console::new(TerminalDisplay::new(settings.clone()), TerminalInput::new());
    let mut console = attach_printer(console, &settings)?;

    terminal::enter()?;
    let mut rounds = 0u32;
    loop {
        let summary = run_round(&mut console, &mut layouts);
        rounds += 1;
        log::debug!("Round {} finished, won: {}", rounds, summary.won);
    }
}
