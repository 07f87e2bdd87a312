use std::io::Write;

use anyhow::Context;
use chrono::{DateTime, Utc};
use tokio::io::{AsyncBufReadExt, BufReader};
use tripboard_core::{EventType, FilterType, FormAction, OfferId, PointId, SortType};

use super::board::open_board;
use crate::app::UiEvent;
use crate::app_config::AppConfig;
use crate::args::OutputFormat;
use crate::output::{describe, print_board};
use crate::utils::date_input::DateInput;

const HELP: &str = "\
Commands:
  new                  open the creation form
  edit <id>            open the edit form of a point
  fav <id>             toggle favorite
  type <name>          select event type
  dest <name>          select destination by name
  from <date>          set start (empty clears)
  to <date>            set end (empty clears)
  price <digits>       set base price
  offer <id> [off]     select or unselect an offer
  save                 submit the open form
  delete | cancel      delete the edited point, or cancel creation
  close | esc          close the open form
  filter <name>        everything, future, present, past
  sort <name>          day, time, price
  show                 redraw the board
  help                 this text
  quit                 leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Event(UiEvent),
    Show,
    Help,
    Quit,
    Empty,
}

/// Turn one input line into a board interaction
pub fn parse_line(line: &str, now: DateTime<Utc>) -> Result<ShellCommand, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let event = match word.to_lowercase().as_str() {
        "" => return Ok(ShellCommand::Empty),
        "help" | "?" => return Ok(ShellCommand::Help),
        "show" | "ls" => return Ok(ShellCommand::Show),
        "quit" | "exit" | "q" => return Ok(ShellCommand::Quit),
        "new" => UiEvent::NewEvent,
        "edit" => UiEvent::EditClick(point_id(rest)?),
        "fav" | "favorite" => UiEvent::FavoriteClick(point_id(rest)?),
        "type" => UiEvent::Input(FormAction::SelectType(
            rest.parse::<EventType>().map_err(|e| e.to_string())?,
        )),
        "dest" | "destination" => UiEvent::Input(FormAction::SelectDestination(rest.to_string())),
        "from" => UiEvent::Input(FormAction::SetDateFrom(optional_date(rest, now)?)),
        "to" => UiEvent::Input(FormAction::SetDateTo(optional_date(rest, now)?)),
        "price" => UiEvent::Input(FormAction::InputPrice(rest.to_string())),
        "offer" => {
            let (id, checked) = match rest.rsplit_once(char::is_whitespace) {
                Some((id, "off")) => (id.trim(), false),
                Some((id, "on")) => (id.trim(), true),
                _ => (rest, true),
            };
            if id.is_empty() {
                return Err("offer needs an id".to_string());
            }
            UiEvent::Input(FormAction::ToggleOffer {
                id: OfferId::new(id),
                checked,
            })
        }
        "save" => UiEvent::Submit,
        "delete" | "cancel" => UiEvent::Delete,
        "close" => UiEvent::Close,
        "esc" | "escape" => UiEvent::Escape,
        "filter" => UiEvent::FilterChange(rest.parse::<FilterType>()?),
        "sort" => UiEvent::SortChange(rest.parse::<SortType>()?),
        other => return Err(format!("unknown command '{}', try 'help'", other)),
    };

    Ok(ShellCommand::Event(event))
}

fn point_id(rest: &str) -> Result<PointId, String> {
    if rest.is_empty() {
        Err("missing point id".to_string())
    } else {
        Ok(PointId::new(rest))
    }
}

fn optional_date(rest: &str, now: DateTime<Utc>) -> Result<Option<DateTime<Utc>>, String> {
    if rest.is_empty() {
        return Ok(None);
    }
    rest.parse::<DateInput>()
        .map(|input| Some(input.resolve(now)))
        .map_err(|e| e.to_string())
}

pub async fn shell_cmd(config: &AppConfig) -> anyhow::Result<()> {
    let (mut app, screen) = open_board(config).await?;
    let format = OutputFormat::Pretty;

    print_board(&screen, &format, app.blocker().is_overlay_visible())?;
    println!("Type 'help' for commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush().context("Failed to flush prompt")?;

        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            break;
        };

        match parse_line(&line, Utc::now()) {
            Ok(ShellCommand::Event(event)) => {
                let outcome = app.dispatch(event).await;
                if let Some(feedback) = describe(&outcome) {
                    println!("{}", feedback);
                }
                print_board(&screen, &format, app.blocker().is_overlay_visible())?;
            }
            Ok(ShellCommand::Show) => {
                print_board(&screen, &format, app.blocker().is_overlay_visible())?
            }
            Ok(ShellCommand::Help) => println!("{}", HELP),
            Ok(ShellCommand::Quit) => break,
            Ok(ShellCommand::Empty) => {}
            Err(e) => println!("{}", e),
        }
    }

    Ok(())
}
