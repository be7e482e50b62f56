use anyhow::{Context, Result};

use crate::config::Config;
use crate::http_client::{fetch_text, http_client};

/// `<base>/<LEAGUE>/<YEAR>_Season/<Split>_Season`
pub fn season_page_url(base: &str, league: &str, year: i32, split: &str) -> String {
    format!(
        "{}/{}/{year}_Season/{}_Season",
        base.trim_end_matches('/'),
        league.trim().to_uppercase(),
        title_case(split)
    )
}

pub fn fetch_season_page(config: &Config, league: &str, split: &str, year: i32) -> Result<String> {
    let client = http_client()?;
    let url = season_page_url(&config.wiki_base, league, year, split);
    log::debug!("GET {url}");
    fetch_text(client, &url).with_context(|| format!("season page request failed ({url})"))
}

/// "summer" -> "Summer", "mid-season invitational" -> "Mid-Season_Invitational".
pub fn title_case(raw: &str) -> String {
    raw.split_whitespace()
        .map(|word| {
            word.split('-')
                .map(capitalize)
                .collect::<Vec<_>>()
                .join("-")
        })
        .collect::<Vec<_>>()
        .join("_")
}

fn capitalize(part: &str) -> String {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
