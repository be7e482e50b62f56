use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::config::Config;
use crate::http_client::{fetch_text, http_client};
use crate::matches::Match;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointKind {
    Past,
    Running,
    Upcoming,
}

impl EndpointKind {
    pub const ALL: [EndpointKind; 3] = [Self::Past, Self::Running, Self::Upcoming];

    pub fn path(self) -> &'static str {
        match self {
            Self::Past => "matches/past",
            Self::Running => "matches/running",
            Self::Upcoming => "matches/upcoming",
        }
    }

    // Live matches have no fixed begin date to filter on.
    fn filters_by_date(self) -> bool {
        !matches!(self, Self::Running)
    }

    // The API hands these back oldest-first.
    fn reversed_when_sorted(self) -> bool {
        matches!(self, Self::Past | Self::Running)
    }
}

pub fn fetch_matches(
    config: &Config,
    kind: EndpointKind,
    date: NaiveDate,
    sort: bool,
) -> Result<Vec<Match>> {
    let client = http_client()?;
    let url = build_matches_url(config, kind, date);
    log::debug!("GET {}", redact_token(&url));

    let body = fetch_text(client, &url).with_context(|| format!("{} request failed", kind.path()))?;
    let matches = parse_matches_json(&body)?;
    log::debug!("{}: {} matches", kind.path(), matches.len());
    Ok(order_matches(kind, matches, sort))
}

pub fn build_matches_url(config: &Config, kind: EndpointKind, date: NaiveDate) -> String {
    let mut url = format!("{}{}?token={}", config.api_base, kind.path(), config.api_key);
    if kind.filters_by_date() {
        url.push_str("&filter[begin_at]=");
        url.push_str(&date.format("%Y-%m-%d").to_string());
    }
    url
}

pub fn parse_matches_json(raw: &str) -> Result<Vec<Match>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    serde_json::from_str(trimmed).context("invalid matches json")
}

/// Most-recent-first for past and live results when `sort` is set.
pub fn order_matches(kind: EndpointKind, mut matches: Vec<Match>, sort: bool) -> Vec<Match> {
    if sort && kind.reversed_when_sorted() {
        matches.reverse();
    }
    matches
}

fn redact_token(url: &str) -> String {
    let Some(start) = url.find("token=") else {
        return url.to_string();
    };
    let value_start = start + "token=".len();
    let value_end = url[value_start..]
        .find('&')
        .map(|i| value_start + i)
        .unwrap_or(url.len());
    format!("{}***{}", &url[..value_start], &url[value_end..])
}
