use std::io::Write;

use anyhow::Context;
use termcolor::{ColorChoice, StandardStream, WriteColor};

use crate::args::OutputFormat;
use crate::presenter::Outcome;
use crate::view::SharedScreen;

/// Print the whole board in the requested format; controls are greyed out under the overlay
pub fn print_board(
    screen: &SharedScreen,
    format: &OutputFormat,
    overlay: bool,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&screen.borrow().cards())
                .context("Failed to serialize points")?;
            println!("{}", json);
        }
        OutputFormat::Pretty | OutputFormat::Plain => {
            let mut stdout = stream(format);
            screen
                .borrow_mut()
                .draw(&mut stdout, overlay)
                .context("Failed to draw board")?;
        }
    }
    Ok(())
}

pub fn print_trip_info(screen: &SharedScreen, format: &OutputFormat) -> anyhow::Result<()> {
    let screen = screen.borrow();

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&screen.trip_info)
                .context("Failed to serialize trip info")?;
            println!("{}", json);
        }
        OutputFormat::Pretty | OutputFormat::Plain => {
            let Some(info) = &screen.trip_info else {
                println!("No points yet");
                return Ok(());
            };

            let mut stdout = stream(format);
            let mut bold = termcolor::ColorSpec::new();
            bold.set_bold(true);

            stdout.set_color(&bold)?;
            writeln!(stdout, "{}", info.title)?;
            stdout.reset()?;
            writeln!(stdout, "{}", info.dates)?;
            writeln!(stdout, "Total: €{}", info.cost)?;
        }
    }
    Ok(())
}

/// One line of feedback for an interaction, `None` when there is nothing to say
pub fn describe(outcome: &Outcome) -> Option<String> {
    match outcome {
        Outcome::Ignored | Outcome::Applied => None,
        Outcome::Blocked => Some("Busy, try again in a moment".to_string()),
        Outcome::Unchanged => Some("Nothing changed".to_string()),
        Outcome::Saved(point) => Some(format!("Point saved ({})", point.id)),
        Outcome::Created(point) => Some(format!("Point added ({})", point.id)),
        Outcome::Deleted(id) => Some(format!("Point deleted ({})", id)),
        Outcome::Rejected(e) => Some(format!("Form rejected: {}", e)),
        Outcome::Failed(e) => Some(format!("Request failed: {}", e)),
    }
}

fn stream(format: &OutputFormat) -> StandardStream {
    let choice = match format {
        OutputFormat::Pretty => ColorChoice::Auto,
        _ => ColorChoice::Never,
    };
    StandardStream::stdout(choice)
}
