use chrono::NaiveDateTime;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Running,
    Finished,
    // Canceled/postponed fixtures land here too.
    #[default]
    #[serde(other)]
    NotStarted,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Team {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub acronym: Option<String>,
}

impl Team {
    /// Acronym when the API has one, full name otherwise.
    pub fn label(&self) -> &str {
        match self.acronym.as_deref() {
            Some(a) if !a.trim().is_empty() => a,
            _ => &self.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Opponent {
    pub opponent: Team,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct MatchResult {
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub team_id: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct League {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Serie {
    #[serde(default, rename = "full_name")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Match {
    #[serde(default)]
    pub opponents: Vec<Opponent>,
    #[serde(default)]
    pub winner: Option<Team>,
    #[serde(default)]
    pub results: Vec<MatchResult>,
    #[serde(default)]
    pub league: League,
    #[serde(default)]
    pub serie: Serie,
    #[serde(default)]
    pub begin_at: Option<String>,
    #[serde(default)]
    pub status: MatchStatus,
}

impl Match {
    pub fn team_a(&self) -> Option<&Team> {
        self.opponents.first().map(|o| &o.opponent)
    }

    pub fn team_b(&self) -> Option<&Team> {
        self.opponents.get(1).map(|o| &o.opponent)
    }

    pub fn winner_acronym(&self) -> Option<&str> {
        self.winner.as_ref().and_then(|w| w.acronym.as_deref())
    }

    /// False when both scores are zero: a 0-0 cannot be told apart from a
    /// match that has not been played.
    pub fn has_scores(&self) -> bool {
        match self.results.as_slice() {
            [a, b] => a.score != 0 || b.score != 0,
            _ => false,
        }
    }

    /// Scores as (team A, team B), or None when the match has no usable pair.
    ///
    /// Joined by team id when every result carries one. Otherwise, when
    /// exactly one opponent is the winner, results are read winner-first
    /// (the winner owns the larger entry). Anything else pairs by position.
    pub fn aligned_scores(&self) -> Option<(u32, u32)> {
        let (a, b) = (self.team_a()?, self.team_b()?);
        let [r0, r1] = self.results.as_slice() else {
            return None;
        };

        if let (Some(a_id), Some(b_id)) = (a.id, b.id) {
            let by_id = |id: u64| [r0, r1].into_iter().find(|r| r.team_id == Some(id));
            if let (Some(ra), Some(rb)) = (by_id(a_id), by_id(b_id)) {
                if a_id != b_id {
                    return Some((ra.score, rb.score));
                }
            }
        }

        if let Some(winner) = self.winner_acronym() {
            let a_won = a.acronym.as_deref() == Some(winner);
            let b_won = b.acronym.as_deref() == Some(winner);
            let high = r0.score.max(r1.score);
            let low = r0.score.min(r1.score);
            match (a_won, b_won) {
                (true, false) => return Some((high, low)),
                (false, true) => return Some((low, high)),
                _ => {}
            }
        }

        Some((r0.score, r1.score))
    }

    /// `YYYY-MM-DD HH:MM:SS` from `begin_at`.
    pub fn kickoff_label(&self) -> String {
        match self.begin_at.as_deref() {
            Some(raw) if !raw.trim().is_empty() => format_kickoff(raw),
            _ => "TBD".to_string(),
        }
    }
}

pub fn format_kickoff(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('Z');
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return dt.format("%Y-%m-%d %H:%M:%S").to_string();
        }
    }
    trimmed.replace('T', " ")
}

#[cfg(test)]
mod tests {
    use super::{Match, MatchResult, MatchStatus, Opponent, Team, format_kickoff};

    fn team(acronym: &str, id: Option<u64>) -> Opponent {
        Opponent {
            opponent: Team {
                id,
                name: format!("{acronym} Esports"),
                acronym: Some(acronym.to_string()),
            },
        }
    }

    fn fixture(
        a: Opponent,
        b: Opponent,
        results: &[(u32, Option<u64>)],
        winner: Option<&str>,
    ) -> Match {
        Match {
            opponents: vec![a, b],
            winner: winner.map(|w| Team {
                id: None,
                name: w.to_string(),
                acronym: Some(w.to_string()),
            }),
            results: results
                .iter()
                .map(|&(score, team_id)| MatchResult { score, team_id })
                .collect(),
            league: Default::default(),
            serie: Default::default(),
            begin_at: None,
            status: MatchStatus::Finished,
        }
    }

    #[test]
    fn zero_zero_has_no_scores() {
        let m = fixture(team("C9", None), team("TL", None), &[(0, None), (0, None)], None);
        assert!(!m.has_scores());
        let m = fixture(team("C9", None), team("TL", None), &[(1, None), (0, None)], None);
        assert!(m.has_scores());
        let m = fixture(team("C9", None), team("TL", None), &[(0, None), (2, None)], None);
        assert!(m.has_scores());
    }

    #[test]
    fn missing_results_have_no_scores() {
        let m = fixture(team("C9", None), team("TL", None), &[], None);
        assert!(!m.has_scores());
        assert_eq!(m.aligned_scores(), None);
    }

    #[test]
    fn winner_on_second_slot_keeps_larger_score() {
        let m = fixture(team("C9", None), team("TL", None), &[(1, None), (2, None)], Some("TL"));
        assert_eq!(m.aligned_scores(), Some((1, 2)));
    }

    #[test]
    fn winner_first_results_are_realigned() {
        let m = fixture(team("C9", None), team("TL", None), &[(2, None), (1, None)], Some("TL"));
        assert_eq!(m.aligned_scores(), Some((1, 2)));
    }

    #[test]
    fn unknown_winner_falls_back_to_position() {
        let m = fixture(team("C9", None), team("TL", None), &[(2, None), (1, None)], Some("G2"));
        assert_eq!(m.aligned_scores(), Some((2, 1)));
        let m = fixture(team("TL", None), team("TL", None), &[(2, None), (1, None)], Some("TL"));
        assert_eq!(m.aligned_scores(), Some((2, 1)));
    }

    #[test]
    fn team_ids_take_precedence() {
        let m = fixture(
            team("C9", Some(10)),
            team("TL", Some(20)),
            &[(3, Some(20)), (1, Some(10))],
            Some("TL"),
        );
        assert_eq!(m.aligned_scores(), Some((1, 3)));
    }

    #[test]
    fn kickoff_formats() {
        assert_eq!(format_kickoff("2023-05-01T18:00:00Z"), "2023-05-01 18:00:00");
        assert_eq!(format_kickoff("2023-05-01T18:00:00"), "2023-05-01 18:00:00");
        assert_eq!(format_kickoff("2023-05-01T18:00:00.000Z"), "2023-05-01 18:00:00");
        assert_eq!(format_kickoff("soon"), "soon");
    }

    #[test]
    fn unknown_status_decodes_as_not_started() {
        let status: MatchStatus = serde_json::from_str(r#""canceled""#).expect("decodes");
        assert_eq!(status, MatchStatus::NotStarted);
        let status: MatchStatus = serde_json::from_str(r#""running""#).expect("decodes");
        assert_eq!(status, MatchStatus::Running);
        let status: MatchStatus = serde_json::from_str(r#""not_started""#).expect("decodes");
        assert_eq!(status, MatchStatus::NotStarted);
    }

    #[test]
    fn missing_status_decodes_as_not_started() {
        let m: Match = serde_json::from_str(r#"{"league":{"name":"LEC"}}"#).expect("decodes");
        assert_eq!(m.status, MatchStatus::NotStarted);
        assert_eq!(m.league.name, "LEC");
    }
}
