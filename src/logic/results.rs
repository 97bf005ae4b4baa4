//! Personal results: a player's completed matches seen from their own team.

use crate::logic::outcome::validate_match_completion;
use crate::models::{League, LeagueError, MatchId, MatchStatus, PlayerId, Side, TeamId};
use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// One completed match from the player's point of view.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PersonalResult {
    pub match_id: MatchId,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub court: u8,
    pub team_id: TeamId,
    pub adversary_company: String,
    pub adversary_player_1: String,
    pub adversary_player_2: String,
    pub score_team_1: Option<String>,
    pub score_team_2: Option<String>,
    pub is_victory: bool,
}

/// Completed matches of any team of the player, newest first.
///
/// With `current_season_only`, only matches played in the same calendar year as `today`.
pub fn personal_results(
    league: &League,
    player_id: PlayerId,
    current_season_only: bool,
    today: NaiveDate,
) -> Result<Vec<PersonalResult>, LeagueError> {
    league.player(player_id)?;
    let teams = league.teams_of_player(player_id);

    let mut results = Vec::new();
    for m in league.matches.iter().filter(|m| m.status == MatchStatus::Completed) {
        if current_season_only && m.date.year() != today.year() {
            continue;
        }
        let Some(side) = [Side::One, Side::Two]
            .into_iter()
            .find(|&s| teams.contains(&m.team(s)))
        else {
            continue;
        };
        let adversary = league.team(m.team(side.opponent()))?;
        let is_victory = match (m.score(Side::One), m.score(Side::Two)) {
            (Some(s1), Some(s2)) => validate_match_completion(s1, s2).is_ok_and(|o| o.winner() == side),
            _ => false,
        };
        results.push(PersonalResult {
            match_id: m.id,
            date: m.date,
            time: m.time,
            court: m.court,
            team_id: m.team(side),
            adversary_company: adversary.company.clone(),
            adversary_player_1: league.player(adversary.player_1)?.full_name(),
            adversary_player_2: league.player(adversary.player_2)?.full_name(),
            score_team_1: m.score_team_1.clone(),
            score_team_2: m.score_team_2.clone(),
            is_victory,
        });
    }
    results.sort_by(|a, b| (b.date, b.time).cmp(&(a.date, a.time)));
    Ok(results)
}
