use anyhow::{Result, anyhow};

use crate::week_results::parse_week_token;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Today,
    Help,
    Version,
    Standings { league: String, split: String },
    Week { league: String, split: String, week: u32 },
}

/// `args` excludes the program name.
pub fn parse_args<I, S>(args: I) -> Result<Command>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let args = args
        .into_iter()
        .map(|a| a.as_ref().to_string())
        .collect::<Vec<_>>();
    let Some(cmd) = args.first() else {
        return Ok(Command::Today);
    };

    match cmd.as_str() {
        "-h" | "--help" => Ok(Command::Help),
        "-v" | "--version" => Ok(Command::Version),
        "-l" | "--league" => parse_league(&args[1..]),
        other => Err(anyhow!("unknown option {other}")),
    }
}

fn parse_league(rest: &[String]) -> Result<Command> {
    let (league, split) = match rest {
        [league, split, ..] => (league.clone(), split.clone()),
        _ => return Err(anyhow!("--league needs <CODE> <Split>")),
    };
    match rest.get(2) {
        None => Ok(Command::Standings { league, split }),
        Some(token) => {
            let week = parse_week_token(token)
                .ok_or_else(|| anyhow!("expected a week like W3, got {token}"))?;
            Ok(Command::Week { league, split, week })
        }
    }
}

pub fn version_line() -> String {
    format!("Version {VERSION}")
}

pub fn usage() -> String {
    [
        format!("LoL Esports Calendar (version {VERSION})"),
        "Usage:".to_string(),
        "  lol_calendar                          today's matches".to_string(),
        "  lol_calendar -l, --league CODE SPLIT  league standings".to_string(),
        "  lol_calendar -l, --league CODE SPLIT Wn".to_string(),
        "                                        results of week n".to_string(),
        "  lol_calendar -h, --help               this help".to_string(),
        "  lol_calendar -v, --version            version".to_string(),
    ]
    .join("\n")
}
