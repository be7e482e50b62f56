use anyhow::Result;

use crate::config::Config;
use crate::extract::{Clean, Field, TableSchema, extract};
use crate::wiki::fetch_season_page;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandingsRow {
    pub rank: String,
    pub team: String,
    pub record: String,
}

impl StandingsRow {
    pub fn line(&self) -> String {
        format!("{}. {} ({})", self.rank.trim_end_matches('.'), self.team, self.record)
    }
}

const STANDINGS_FIELDS: &[Field] = &[
    Field::text("rank", "td:nth-child(1)"),
    Field::text("team", "td:nth-child(2) span.teamname a"),
    Field::text("record", "td:nth-child(3)").cleaned(Clean::StripWhitespace),
];

pub fn standings_schema() -> TableSchema {
    TableSchema {
        table: Some("table.standings"),
        row: "tr.teamhighlight".to_string(),
        row_attr: None,
        fields: STANDINGS_FIELDS,
    }
}

pub fn fetch_standings(
    config: &Config,
    league: &str,
    split: &str,
    year: i32,
) -> Result<Vec<StandingsRow>> {
    let page = fetch_season_page(config, league, split, year)?;
    parse_standings_html(&page)
}

pub fn parse_standings_html(html: &str) -> Result<Vec<StandingsRow>> {
    extract(html, &standings_schema())?
        .iter()
        .map(|rec| -> Result<StandingsRow> {
            Ok(StandingsRow {
                rank: rec.require("rank")?.to_string(),
                team: rec.require("team")?.to_string(),
                record: rec.require("record")?.to_string(),
            })
        })
        .collect()
}
