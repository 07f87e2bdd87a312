use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use tripboard_core::{EventType, FilterType, SortType};

use crate::utils::date_input::DateInput;

#[derive(Parser, Debug)]
#[command(
    name = "tripboard",
    version,
    about,
    long_about = "Terminal board for planning a trip against a remote points API"
)]
pub struct CliArgs {
    #[clap(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub config: ConfigArgs,

    /// Log more (repeat for trace output)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Args, Serialize)]
pub struct ConfigArgs {
    /// Profile name, or path to a profile TOML file
    #[arg(long, short, env = "TRIPBOARD_PROFILE")]
    pub profile_path: Option<String>,

    /// Base URL of the points API
    #[arg(long, env = "TRIPBOARD_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Value sent in the Authorization header
    #[arg(long, env = "TRIPBOARD_AUTHORIZATION", hide_env_values = true)]
    pub authorization: Option<String>,
}

#[derive(Debug, Subcommand, PartialEq)]
pub enum Command {
    /// Prints out current configuration
    Config,
    /// Initializes a new profile
    Init,
    /// Shows the board once
    List(ListArgs),
    /// Shows the route, dates and total cost of the trip
    Info,
    /// Creates a new point
    Add(AddArgs),
    /// Toggles the favorite flag of a point
    Favorite(PointArgs),
    /// Deletes a point
    Delete(PointArgs),
    /// Interactive board driven by line commands
    Shell,
}

#[derive(Debug, Clone, ValueEnum, PartialEq, Serialize, Deserialize, Default)]
pub enum OutputFormat {
    #[default]
    Pretty,
    Plain,
    Json,
}

#[derive(Debug, Args, Serialize, PartialEq)]
pub struct ListArgs {
    /// Temporal filter (everything, future, present, past)
    #[arg(long, short, value_parser = parse_filter, default_value = "everything")]
    pub filter: FilterType,

    /// Sort order (day, time, price)
    #[arg(long, short, value_parser = parse_sort, default_value = "day")]
    pub sort: SortType,

    /// Output format (pretty, plain, or json)
    #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub output: OutputFormat,
}

#[derive(Debug, Args, PartialEq)]
pub struct AddArgs {
    /// Event type, e.g. flight or check-in
    #[arg(long = "type", short = 't', value_parser = parse_event_type, default_value = "flight")]
    pub event_type: EventType,

    /// Destination name
    #[arg(long, short)]
    pub destination: String,

    /// Start, e.g. "now", "+2h" or "18/03/25 10:30"
    #[arg(long, value_parser = parse_date_input, allow_hyphen_values = true)]
    pub from: DateInput,

    /// End, same formats as --from
    #[arg(long, value_parser = parse_date_input, allow_hyphen_values = true)]
    pub to: DateInput,

    /// Base price in whole euros
    #[arg(long, default_value_t = 0)]
    pub price: u32,

    /// Offer ids to select (can be specified multiple times or comma-separated)
    #[arg(long, value_name = "IDS", value_delimiter = ',')]
    pub offer: Vec<String>,

    /// Mark the point as favorite
    #[arg(long)]
    pub favorite: bool,
}

#[derive(Debug, Args, Serialize, PartialEq)]
pub struct PointArgs {
    /// Point ID
    #[arg(value_name = "ID")]
    pub id: String,
}

pub fn parse_filter(s: &str) -> Result<FilterType, String> {
    s.parse()
}

pub fn parse_sort(s: &str) -> Result<SortType, String> {
    let sort: SortType = s.parse()?;
    if sort.is_enabled() {
        Ok(sort)
    } else {
        Err(format!("sorting by {} is not supported", sort))
    }
}

pub fn parse_event_type(s: &str) -> anyhow::Result<EventType> {
    Ok(s.parse()?)
}

pub fn parse_date_input(s: &str) -> anyhow::Result<DateInput> {
    s.parse()
}
