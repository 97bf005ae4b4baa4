//! Match lifecycle: booking courts, editing, completing with scores, cancelling, listing.

use crate::logic::outcome::{validate_match_completion, MatchOutcome};
use crate::models::{
    EventId, GameMatch, League, LeagueError, MatchId, MatchStatus, PlayerId, PoolId, TeamId,
};
use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

pub const MIN_COURT: u8 = 1;
pub const MAX_COURT: u8 = 10;
pub const DEFAULT_UPCOMING_DAYS: i64 = 30;

/// Fields needed to schedule a match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct NewMatch {
    pub team_1: TeamId,
    pub team_2: TeamId,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub court: u8,
    #[serde(default)]
    pub event_id: Option<EventId>,
}

/// Partial update of a match; `None` leaves the field untouched.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchUpdate {
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub court: Option<u8>,
    pub status: Option<MatchStatus>,
    pub score_team_1: Option<String>,
    pub score_team_2: Option<String>,
}

/// Filters for listing upcoming matches.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchFilter {
    /// Only matches of teams this player belongs to.
    pub player: Option<PlayerId>,
    /// Only matches where one team is from this company.
    pub company: Option<String>,
    /// Only matches where one team is in this pool.
    pub pool: Option<PoolId>,
    pub status: Option<MatchStatus>,
    /// Window length from today, defaults to 30 days. Out-of-range values are clamped.
    pub days: Option<i64>,
}

fn check_court(court: u8) -> Result<(), LeagueError> {
    if !(MIN_COURT..=MAX_COURT).contains(&court) {
        return Err(LeagueError::InvalidCourt(court));
    }
    Ok(())
}

/// True if no other non-cancelled match holds (date, time, court).
pub fn is_court_available(
    league: &League,
    date: NaiveDate,
    time: NaiveTime,
    court: u8,
    exclude: Option<MatchId>,
) -> bool {
    !league
        .matches
        .iter()
        .any(|m| Some(m.id) != exclude && m.occupies(date, time, court))
}

fn check_slot(
    league: &League,
    date: NaiveDate,
    time: NaiveTime,
    court: u8,
    exclude: Option<MatchId>,
    today: NaiveDate,
) -> Result<(), LeagueError> {
    check_court(court)?;
    if date < today {
        return Err(LeagueError::DateInPast(date));
    }
    if !is_court_available(league, date, time, court, exclude) {
        return Err(LeagueError::CourtUnavailable { date, time, court });
    }
    Ok(())
}

/// Schedule a new upcoming match between two different teams on a free court.
pub fn create_match(league: &mut League, new: NewMatch, today: NaiveDate) -> Result<MatchId, LeagueError> {
    if new.team_1 == new.team_2 {
        return Err(LeagueError::SameTeam);
    }
    league.team(new.team_1)?;
    league.team(new.team_2)?;
    if let Some(event_id) = new.event_id {
        league.event(event_id)?;
    }
    check_slot(league, new.date, new.time, new.court, None, today)?;

    let mut game = GameMatch::new(new.team_1, new.team_2, new.date, new.time, new.court);
    game.event_id = new.event_id;
    let id = game.id;
    log::info!("Match {} scheduled on {} at {} (court {})", id, new.date, new.time, new.court);
    league.matches.push(game);
    Ok(id)
}

/// Apply an update to a match. Every rule is checked before anything changes.
///
/// - Date, time and court change only while upcoming, into a free slot not in the past.
/// - Completed and cancelled are final.
/// - Scores come only with the upcoming to completed transition, and then both are required
///   and must describe a finished best-of-three.
///
/// Returns the validated outcome when the match was completed by this update.
pub fn update_match(
    league: &mut League,
    id: MatchId,
    update: MatchUpdate,
    today: NaiveDate,
) -> Result<Option<MatchOutcome>, LeagueError> {
    let current = league.game(id)?.clone();

    let reschedules = update.date.is_some() || update.time.is_some() || update.court.is_some();
    if reschedules {
        if current.status != MatchStatus::Upcoming {
            return Err(LeagueError::MatchNotEditable);
        }
        check_slot(
            league,
            update.date.unwrap_or(current.date),
            update.time.unwrap_or(current.time),
            update.court.unwrap_or(current.court),
            Some(id),
            today,
        )?;
    }

    let new_status = update.status.unwrap_or(current.status);
    if current.status.is_terminal() && new_status != current.status {
        return Err(LeagueError::InvalidStatusTransition);
    }
    let completing = current.status == MatchStatus::Upcoming && new_status == MatchStatus::Completed;
    let has_scores = update.score_team_1.is_some() || update.score_team_2.is_some();
    if has_scores && !completing {
        return Err(LeagueError::ScoresNotAllowed);
    }

    let outcome = if completing {
        let (Some(score_1), Some(score_2)) = (update.score_team_1.as_deref(), update.score_team_2.as_deref()) else {
            return Err(LeagueError::MissingScores);
        };
        Some(validate_match_completion(score_1, score_2)?)
    } else {
        None
    };

    let game = league.game_mut(id)?;
    if let Some(date) = update.date {
        game.date = date;
    }
    if let Some(time) = update.time {
        game.time = time;
    }
    if let Some(court) = update.court {
        game.court = court;
    }
    game.status = new_status;
    if completing {
        game.score_team_1 = update.score_team_1.map(|s| s.trim().to_string());
        game.score_team_2 = update.score_team_2.map(|s| s.trim().to_string());
    }
    if let Some(o) = outcome {
        log::info!("Match {} completed {}-{}", id, o.team_1_sets, o.team_2_sets);
    } else if new_status != current.status {
        log::info!("Match {} is now {:?}", id, new_status);
    }
    Ok(outcome)
}

/// Delete a match that has not been played or cancelled yet.
pub fn delete_match(league: &mut League, id: MatchId) -> Result<(), LeagueError> {
    if league.game(id)?.status != MatchStatus::Upcoming {
        return Err(LeagueError::MatchNotEditable);
    }
    league.matches.retain(|m| m.id != id);
    Ok(())
}

fn either_team(m: &GameMatch, pred: impl Fn(TeamId) -> bool) -> bool {
    pred(m.team_1) || pred(m.team_2)
}

/// Matches dated from today up to `days` ahead that pass the filter, by date, time and court.
pub fn upcoming_matches<'a>(league: &'a League, filter: &MatchFilter, today: NaiveDate) -> Vec<&'a GameMatch> {
    let days = filter.days.unwrap_or(DEFAULT_UPCOMING_DAYS);
    // Windows beyond the calendar range run to its edge.
    let end = Duration::try_days(days)
        .and_then(|d| today.checked_add_signed(d))
        .unwrap_or(if days < 0 { NaiveDate::MIN } else { NaiveDate::MAX });
    let player_teams = filter.player.map(|p| league.teams_of_player(p));

    let mut matches: Vec<&GameMatch> = league
        .matches
        .iter()
        .filter(|m| m.date >= today && m.date <= end)
        .filter(|m| filter.status.map_or(true, |s| m.status == s))
        .filter(|m| {
            player_teams
                .as_ref()
                .map_or(true, |teams| either_team(m, |t| teams.contains(&t)))
        })
        .filter(|m| {
            filter.company.as_deref().map_or(true, |company| {
                either_team(m, |t| league.team(t).is_ok_and(|team| team.company == company))
            })
        })
        .filter(|m| {
            filter.pool.map_or(true, |pool| {
                either_team(m, |t| league.team(t).is_ok_and(|team| team.pool_id == Some(pool)))
            })
        })
        .collect();
    matches.sort_by_key(|m| (m.date, m.time, m.court));
    matches
}
