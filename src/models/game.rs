//! Match (game), Side, MatchStatus and Event.

use crate::models::team::TeamId;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Unique identifier for an event (a play evening grouping matches).
pub type EventId = Uuid;

/// Which side of a match (team 1 or team 2).
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    #[default]
    One,
    Two,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }
}

/// Lifecycle of a match. `Completed` and `Cancelled` are terminal.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    #[default]
    Upcoming,
    Cancelled,
    Completed,
}

impl MatchStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, MatchStatus::Cancelled | MatchStatus::Completed)
    }
}

/// A scheduled match between two teams on one court.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub team_1: TeamId,
    pub team_2: TeamId,
    pub date: NaiveDate,
    pub time: NaiveTime,
    /// Court number, 1 to 10.
    pub court: u8,
    pub status: MatchStatus,
    /// Team 1's view of the sets, e.g. "6-4, 6-3". Only set once completed.
    pub score_team_1: Option<String>,
    /// Team 2's view of the sets, e.g. "4-6, 3-6".
    pub score_team_2: Option<String>,
    pub event_id: Option<EventId>,
}

impl GameMatch {
    pub fn new(team_1: TeamId, team_2: TeamId, date: NaiveDate, time: NaiveTime, court: u8) -> Self {
        Self {
            id: Uuid::new_v4(),
            team_1,
            team_2,
            date,
            time,
            court,
            status: MatchStatus::Upcoming,
            score_team_1: None,
            score_team_2: None,
            event_id: None,
        }
    }

    /// Which side the team plays on, if it plays in this match at all.
    pub fn side_of(&self, team_id: TeamId) -> Option<Side> {
        if self.team_1 == team_id {
            Some(Side::One)
        } else if self.team_2 == team_id {
            Some(Side::Two)
        } else {
            None
        }
    }

    pub fn team(&self, side: Side) -> TeamId {
        match side {
            Side::One => self.team_1,
            Side::Two => self.team_2,
        }
    }

    pub fn score(&self, side: Side) -> Option<&str> {
        match side {
            Side::One => self.score_team_1.as_deref(),
            Side::Two => self.score_team_2.as_deref(),
        }
    }

    pub fn involves(&self, team_id: TeamId) -> bool {
        self.side_of(team_id).is_some()
    }

    /// True if this match holds the (date, time, court) slot. Cancelled matches free their slot.
    pub fn occupies(&self, date: NaiveDate, time: NaiveTime, court: u8) -> bool {
        self.status != MatchStatus::Cancelled && self.date == date && self.time == time && self.court == court
    }
}

/// A play session on a given day; matches may be attached to it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
}

impl Event {
    pub fn new(date: NaiveDate, start_time: NaiveTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            start_time,
        }
    }
}
