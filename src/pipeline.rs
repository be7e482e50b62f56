use anyhow::Result;
use chrono::NaiveDate;

use crate::config::Config;
use crate::match_fetch::{EndpointKind, fetch_matches};
use crate::matches::{Match, MatchStatus};

pub const NO_MATCHES: &str = "No matches today.";

#[derive(Debug, Default)]
pub struct StatusGroups<'a> {
    pub finished: Vec<&'a Match>,
    pub running: Vec<&'a Match>,
    pub upcoming: Vec<&'a Match>,
}

impl StatusGroups<'_> {
    pub fn len(&self) -> usize {
        self.finished.len() + self.running.len() + self.upcoming.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Fetches past, live and upcoming matches for `date` and renders them.
pub fn today(config: &Config, date: NaiveDate) -> Result<Vec<String>> {
    let mut all = Vec::new();
    for kind in EndpointKind::ALL {
        all.extend(fetch_matches(config, kind, date, true)?);
    }
    Ok(render(&all, config))
}

pub fn filter_ignored<'a>(matches: &'a [Match], config: &Config) -> Vec<&'a Match> {
    matches
        .iter()
        .filter(|m| !config.is_ignored(&m.league.name))
        .collect()
}

pub fn partition_by_status<'a>(matches: &[&'a Match]) -> StatusGroups<'a> {
    let mut groups = StatusGroups::default();
    for &m in matches {
        match m.status {
            MatchStatus::Finished => groups.finished.push(m),
            MatchStatus::Running => groups.running.push(m),
            MatchStatus::NotStarted => groups.upcoming.push(m),
        }
    }
    groups
}

/// Section headers followed by one line per match; empty sections are left out.
pub fn render(matches: &[Match], config: &Config) -> Vec<String> {
    let kept = filter_ignored(matches, config);
    let groups = partition_by_status(&kept);
    if groups.is_empty() {
        return vec![NO_MATCHES.to_string()];
    }

    let mut lines = Vec::with_capacity(groups.len() + 3);
    for (title, group) in [
        ("Finished", &groups.finished),
        ("Live", &groups.running),
        ("Upcoming", &groups.upcoming),
    ] {
        if group.is_empty() {
            continue;
        }
        lines.push(format!("{title}:"));
        lines.extend(group.iter().map(|m| format_match_line(m, config.show_results)));
    }
    lines
}

pub fn format_match_line(m: &Match, show_results: bool) -> String {
    let team_a = m.team_a().map(|t| t.label()).unwrap_or("TBD");
    let team_b = m.team_b().map(|t| t.label()).unwrap_or("TBD");

    let scores = if show_results && m.has_scores() {
        m.aligned_scores()
    } else {
        None
    };
    let summary = match scores {
        Some((a, b)) => format!("{team_a} {a} - {b} {team_b}"),
        None => format!("{team_a} vs {team_b}"),
    };
    let live = if m.status == MatchStatus::Running {
        " LIVE"
    } else {
        ""
    };

    format!(
        "[{}]{live} {summary} ({} {})",
        m.kickoff_label(),
        m.league.name,
        m.serie.name
    )
}
