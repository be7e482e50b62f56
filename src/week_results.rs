use anyhow::Result;

use crate::config::Config;
use crate::extract::{Clean, Field, TableSchema, extract};
use crate::wiki::fetch_season_page;

// Time cells read "Time: 17,00".
const TIME_LABEL_WIDTH: usize = 6;
const UNKNOWN_TIME: &str = "TBD";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekFixture {
    pub date: String,
    pub time: String,
    pub team_a: String,
    pub team_b: String,
    pub score_a: Option<u32>,
    pub score_b: Option<u32>,
}

impl WeekFixture {
    pub fn scores(&self) -> Option<(u32, u32)> {
        Some((self.score_a?, self.score_b?))
    }

    pub fn line(&self, show_results: bool) -> String {
        let summary = match self.scores().filter(|_| show_results) {
            Some((a, b)) => format!("{} {a} - {b} {}", self.team_a, self.team_b),
            None => format!("{} vs {}", self.team_a, self.team_b),
        };
        format!("[{} {}] {summary}", self.date, self.time)
    }
}

const WEEK_FIELDS: &[Field] = &[
    Field::row_attr("date", "data-date"),
    Field::text("time", "td.ml-time")
        .cleaned(Clean::ClockTime {
            skip: TIME_LABEL_WIDTH,
        })
        .optional(),
    Field::text("team_a", "td.ml-team1 span.teamname"),
    Field::text("team_b", "td.ml-team2 span.teamname"),
    Field::text("score_a", "td.ml-score1").optional(),
    Field::text("score_b", "td.ml-score2").optional(),
];

pub fn week_schema(week: u32) -> TableSchema {
    TableSchema {
        table: None,
        row: format!("tr.ml-w{week}"),
        row_attr: Some("data-date"),
        fields: WEEK_FIELDS,
    }
}

/// Parses "W3" / "w12". Anything else is not a week token.
pub fn parse_week_token(token: &str) -> Option<u32> {
    let digits = token.strip_prefix(['W', 'w'])?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

pub fn fetch_week_results(
    config: &Config,
    league: &str,
    split: &str,
    week: u32,
    year: i32,
) -> Result<Vec<WeekFixture>> {
    let page = fetch_season_page(config, league, split, year)?;
    parse_week_html(&page, week)
}

pub fn parse_week_html(html: &str, week: u32) -> Result<Vec<WeekFixture>> {
    extract(html, &week_schema(week))?
        .iter()
        .map(|rec| -> Result<WeekFixture> {
            Ok(WeekFixture {
                date: rec.require("date")?.to_string(),
                time: rec.get("time").unwrap_or(UNKNOWN_TIME).to_string(),
                team_a: rec.require("team_a")?.to_string(),
                team_b: rec.require("team_b")?.to_string(),
                score_a: rec.get("score_a").and_then(|s| s.parse().ok()),
                score_b: rec.get("score_b").and_then(|s| s.parse().ok()),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{WeekFixture, parse_week_html, parse_week_token};

    #[test]
    fn week_tokens() {
        assert_eq!(parse_week_token("W3"), Some(3));
        assert_eq!(parse_week_token("w12"), Some(12));
        assert_eq!(parse_week_token("W"), None);
        assert_eq!(parse_week_token("Week3"), None);
        assert_eq!(parse_week_token("3"), None);
    }

    #[test]
    fn lines_follow_score_availability() {
        let mut fx = WeekFixture {
            date: "2019-01-18".to_string(),
            time: "18:00".to_string(),
            team_a: "G2 Esports".to_string(),
            team_b: "Fnatic".to_string(),
            score_a: Some(1),
            score_b: Some(0),
        };
        assert_eq!(fx.line(true), "[2019-01-18 18:00] G2 Esports 1 - 0 Fnatic");
        assert_eq!(fx.line(false), "[2019-01-18 18:00] G2 Esports vs Fnatic");
        fx.score_b = None;
        assert_eq!(fx.line(true), "[2019-01-18 18:00] G2 Esports vs Fnatic");
    }

    #[test]
    fn short_time_cell_prints_tbd() {
        let html = r#"<table>
            <tr class="ml-w1" data-date="2023-01-21">
                <td class="ml-time">Time: 18,00</td>
                <td class="ml-team1"><span class="teamname">G2 Esports</span></td>
                <td class="ml-team2"><span class="teamname">Fnatic</span></td>
            </tr>
            <tr class="ml-w1" data-date="2023-01-22">
                <td class="ml-time">TBD</td>
                <td class="ml-team1"><span class="teamname">MAD Lions</span></td>
                <td class="ml-team2"><span class="teamname">Team Vitality</span></td>
            </tr>
        </table>"#;
        let fixtures = parse_week_html(html, 1).expect("short time cell still parses");
        assert_eq!(fixtures.len(), 2);
        assert_eq!(fixtures[0].time, "18:00");
        assert_eq!(fixtures[1].line(true), "[2023-01-22 TBD] MAD Lions vs Team Vitality");
    }
}
