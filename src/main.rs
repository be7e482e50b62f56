use std::process::ExitCode;

use anyhow::Result;
use chrono::{Datelike, Local};

use lol_esports_calendar::cli::{self, Command};
use lol_esports_calendar::config::{self, Config};
use lol_esports_calendar::{pipeline, standings, week_results};

fn main() -> ExitCode {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let command = match cli::parse_args(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!("{}", cli::usage());
            return ExitCode::FAILURE;
        }
    };

    match run(command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<()> {
    let lines = match command {
        Command::Help => vec![cli::usage()],
        Command::Version => vec![cli::version_line()],
        Command::Today => pipeline::today(&config::load()?, Local::now().date_naive())?,
        Command::Standings { league, split } => {
            standings_lines(&config::load()?, &league, &split)?
        }
        Command::Week {
            league,
            split,
            week,
        } => week_lines(&config::load()?, &league, &split, week)?,
    };
    for line in lines {
        println!("{line}");
    }
    Ok(())
}

fn standings_lines(config: &Config, league: &str, split: &str) -> Result<Vec<String>> {
    let year = Local::now().year();
    let rows = standings::fetch_standings(config, league, split, year)?;
    if rows.is_empty() {
        log::warn!("no standings rows found for {league} {split} {year}");
    }
    Ok(rows.iter().map(|r| r.line()).collect())
}

fn week_lines(config: &Config, league: &str, split: &str, week: u32) -> Result<Vec<String>> {
    let year = Local::now().year();
    let fixtures = week_results::fetch_week_results(config, league, split, week, year)?;
    if fixtures.is_empty() {
        log::warn!("no fixtures found for {league} {split} week {week}");
    }
    Ok(fixtures
        .iter()
        .map(|f| f.line(config.show_results))
        .collect())
}
