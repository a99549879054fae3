//! Command line entry point.
//!
//! Loads a JSON data file, brings a board up, applies the requested filter
//! and sort, and prints the rendered board:
//!
//! ```text
//! tripline --data trip.json --filter future --sort price --set trace_level=debug
//! ```

use clap::Parser;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tripline::app::{KeyEvents, SystemClock};
use tripline::domain::{FilterKind, SortKind};
use tripline::store::JsonPointsApi;
use tripline::{launch, Config, Result, TriplineError};

#[derive(Parser, Debug)]
#[command(name = "tripline", version, about = "Print a filtered, sorted trip board")]
struct Cli {
    /// JSON data file; overrides `data_file` from the config.
    #[arg(long)]
    data: Option<PathBuf>,

    /// TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// everything, future, present, or past.
    #[arg(long)]
    filter: Option<FilterKind>,

    /// day, time, or price.
    #[arg(long, value_parser = parse_sort)]
    sort: Option<SortKind>,

    /// Config override, repeatable.
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    overrides: Vec<(String, String)>,
}

fn parse_key_value(raw: &str) -> std::result::Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.trim().to_string(), value.to_string()))
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))
}

fn parse_sort(raw: &str) -> std::result::Result<SortKind, String> {
    let sort: SortKind = raw.parse()?;
    if sort.is_selectable() {
        Ok(sort)
    } else {
        Err(format!("'{sort}' is a display-only column"))
    }
}

fn run(cli: Cli) -> Result<String> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    config.apply_overrides(&cli.overrides.into_iter().collect::<BTreeMap<_, _>>())?;
    tripline::observability::init_tracing(&config);

    let data = cli
        .data
        .or_else(|| config.data_file.clone())
        .ok_or_else(|| TriplineError::Config("no data file: pass --data or set data_file".into()))?;
    let api = Arc::new(JsonPointsApi::open(data)?);

    let board = futures::executor::block_on(launch(
        &config,
        api,
        KeyEvents::new(),
        Arc::new(SystemClock),
    ));
    if let Some(filter) = cli.filter {
        board.change_filter(filter);
    }
    if let Some(sort) = cli.sort {
        board.change_sort(sort);
    }

    let rendered = tripline::ui::render_text(&board.view_model());
    board.teardown();
    Ok(rendered)
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(rendered) => {
            print!("{rendered}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "tripline failed");
            eprintln!("tripline: {e}");
            ExitCode::FAILURE
        }
    }
}
