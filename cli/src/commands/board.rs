use anyhow::{bail, Context};
use chrono::Utc;
use tracing::warn;
use tripboard_core::{FilterType, FormAction, OfferId, PointId};

use crate::api::ApiGateway;
use crate::app::{App, UiEvent};
use crate::app_config::AppConfig;
use crate::args::{AddArgs, ListArgs, OutputFormat, PointArgs};
use crate::output::{describe, print_board, print_trip_info};
use crate::model::LoadState;
use crate::presenter::Outcome;
use crate::view::{BoardMessage, SharedScreen};

/// Connect, load the trip and mount the board on a fresh screen
pub async fn open_board(config: &AppConfig) -> anyhow::Result<(App<SharedScreen>, SharedScreen)> {
    let gateway = ApiGateway::new(&config.endpoint, &config.authorization)
        .context("Failed to create API client")?;
    let screen = SharedScreen::new();

    let mut app = App::new(gateway, config.time_limit(), screen.clone());
    app.start().await;

    if app.model().load_state() == LoadState::Failed {
        bail!(
            "{} from {}",
            BoardMessage::Error.text(),
            config.endpoint
        );
    }

    Ok((app, screen))
}

pub async fn list_cmd(config: &AppConfig, args: ListArgs) -> anyhow::Result<()> {
    let (mut app, screen) = open_board(config).await?;

    if let Outcome::Ignored = app.dispatch(UiEvent::FilterChange(args.filter)).await {
        // Disabled tab: no point matches it
        if args.filter != FilterType::Everything {
            println!("{}", args.filter.empty_message());
            return Ok(());
        }
    }
    app.dispatch(UiEvent::SortChange(args.sort)).await;

    print_board(&screen, &args.output, app.blocker().is_overlay_visible())
}

pub async fn info_cmd(config: &AppConfig) -> anyhow::Result<()> {
    let (_app, screen) = open_board(config).await?;
    print_trip_info(&screen, &OutputFormat::Pretty)
}

pub async fn add_cmd(config: &AppConfig, args: AddArgs) -> anyhow::Result<()> {
    let now = Utc::now();
    let date_from = args.from.resolve(now);
    let date_to = args.to.resolve(now);
    if date_to < date_from {
        bail!("--to must not be before --from");
    }

    let (mut app, _screen) = open_board(config).await?;

    let catalog = app.model().catalog();
    if catalog.destinations.find_by_name(&args.destination).is_none() {
        bail!("Unknown destination: {}", args.destination);
    }

    expect_applied(app.dispatch(UiEvent::NewEvent).await)?;

    let mut actions = vec![
        FormAction::SelectType(args.event_type),
        FormAction::SelectDestination(args.destination),
        FormAction::SetDateFrom(Some(date_from)),
        FormAction::SetDateTo(Some(date_to)),
        FormAction::InputPrice(args.price.to_string()),
    ];
    for id in args.offer {
        let id = OfferId::new(id);
        if !catalog
            .offers
            .offers_for(args.event_type)
            .iter()
            .any(|o| o.id == id)
        {
            warn!("Offer {} is not available for {}", id, args.event_type);
        }
        actions.push(FormAction::ToggleOffer { id, checked: true });
    }

    for action in actions {
        app.dispatch(UiEvent::Input(action)).await;
    }

    let created = match app.dispatch(UiEvent::Submit).await {
        Outcome::Created(point) => point,
        other => return Err(into_error(other)),
    };

    if args.favorite {
        let outcome = app.dispatch(UiEvent::FavoriteClick(created.id.clone())).await;
        if outcome.is_failure() {
            return Err(into_error(outcome));
        }
    }

    println!("Point added successfully ({})", created.id);
    Ok(())
}

pub async fn favorite_cmd(config: &AppConfig, args: PointArgs) -> anyhow::Result<()> {
    let (mut app, _screen) = open_board(config).await?;
    let id = PointId::new(args.id);

    match app.dispatch(UiEvent::FavoriteClick(id.clone())).await {
        Outcome::Saved(point) if point.is_favorite => println!("Point {} marked as favorite", id),
        Outcome::Saved(_) => println!("Point {} is no longer a favorite", id),
        Outcome::Ignored => bail!("Point {} not found", id),
        other => return Err(into_error(other)),
    }
    Ok(())
}

pub async fn delete_cmd(config: &AppConfig, args: PointArgs) -> anyhow::Result<()> {
    let (mut app, _screen) = open_board(config).await?;
    let id = PointId::new(args.id);

    if let Outcome::Ignored = app.dispatch(UiEvent::EditClick(id.clone())).await {
        bail!("Point {} not found", id);
    }

    match app.dispatch(UiEvent::Delete).await {
        Outcome::Deleted(id) => println!("Point deleted ({})", id),
        other => return Err(into_error(other)),
    }
    Ok(())
}

fn expect_applied(outcome: Outcome) -> anyhow::Result<()> {
    match outcome {
        Outcome::Applied => Ok(()),
        other => Err(into_error(other)),
    }
}

fn into_error(outcome: Outcome) -> anyhow::Error {
    match outcome {
        Outcome::Failed(e) => anyhow::Error::new(e).context("Request failed"),
        Outcome::Rejected(e) => anyhow::Error::new(e).context("Point rejected"),
        other => anyhow::anyhow!(
            "{}",
            describe(&other).unwrap_or_else(|| "Nothing to do".to_string())
        ),
    }
}
