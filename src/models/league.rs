//! League: the in-memory store of players, teams, pools, events, matches and accounts.

use crate::logic::score::ScoreError;
use crate::models::game::{Event, EventId, GameMatch, MatchId};
use crate::models::player::{NewPlayer, Player, PlayerId};
use crate::models::team::{Pool, PoolId, Team, TeamId};
use crate::models::user::{LoginAttempt, User, UserId};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Errors that can occur during league operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LeagueError {
    PlayerNotFound(PlayerId),
    TeamNotFound(TeamId),
    PoolNotFound(PoolId),
    EventNotFound(EventId),
    MatchNotFound(MatchId),
    UserNotFound(UserId),
    /// A required text field is blank.
    InvalidName(&'static str),
    /// Another player already holds this license number.
    DuplicateLicense,
    /// A team needs two different players.
    SamePlayer,
    /// A team with the same company and players already exists.
    DuplicateTeam,
    /// Teams with match history cannot change players or be removed.
    TeamHasMatches(TeamId),
    /// Players belonging to a team cannot be removed.
    PlayerInTeam(PlayerId),
    DuplicatePool,
    TeamAlreadyInPool(TeamId),
    DuplicateEmail,
    /// A match needs two different teams.
    SameTeam,
    /// Court number outside 1..=10.
    InvalidCourt(u8),
    DateInPast(NaiveDate),
    /// The (date, time, court) slot is held by another non-cancelled match.
    CourtUnavailable { date: NaiveDate, time: NaiveTime, court: u8 },
    /// Date, time and court can only change while the match is upcoming.
    MatchNotEditable,
    /// Completed and cancelled matches keep their status.
    InvalidStatusTransition,
    /// Scores may only be sent together with the transition to completed.
    ScoresNotAllowed,
    /// Completing a match requires both teams' scores.
    MissingScores,
    /// Reported scores failed validation.
    Score(ScoreError),
    InvalidCredentials { attempts_remaining: u32 },
    AccountLocked { locked_until: DateTime<Utc> },
    AccountInactive,
    /// Current password did not verify.
    WrongPassword,
    /// New password equals the current one.
    PasswordUnchanged,
    /// Action reserved to administrators.
    Forbidden,
}

impl std::fmt::Display for LeagueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeagueError::PlayerNotFound(_) => write!(f, "Player not found"),
            LeagueError::TeamNotFound(_) => write!(f, "Team not found"),
            LeagueError::PoolNotFound(_) => write!(f, "Pool not found"),
            LeagueError::EventNotFound(_) => write!(f, "Event not found"),
            LeagueError::MatchNotFound(_) => write!(f, "Match not found"),
            LeagueError::UserNotFound(_) => write!(f, "User not found"),
            LeagueError::InvalidName(field) => write!(f, "{} must not be empty", field),
            LeagueError::DuplicateLicense => write!(f, "A player with this license number already exists"),
            LeagueError::SamePlayer => write!(f, "The two players must be different"),
            LeagueError::DuplicateTeam => {
                write!(f, "A team with these players and this company already exists")
            }
            LeagueError::TeamHasMatches(_) => write!(f, "The team has already played matches"),
            LeagueError::PlayerInTeam(_) => write!(f, "The player still belongs to a team"),
            LeagueError::DuplicatePool => write!(f, "A pool with this name already exists"),
            LeagueError::TeamAlreadyInPool(_) => write!(f, "The team is already in a pool"),
            LeagueError::DuplicateEmail => write!(f, "Email already in use"),
            LeagueError::SameTeam => write!(f, "The two teams must be different"),
            LeagueError::InvalidCourt(court) => write!(f, "Court {} does not exist (1 to 10)", court),
            LeagueError::DateInPast(date) => write!(f, "Match date {} is in the past", date),
            LeagueError::CourtUnavailable { date, time, court } => {
                write!(f, "Court {} is already booked on {} at {}", court, date, time.format("%H:%M"))
            }
            LeagueError::MatchNotEditable => {
                write!(f, "Date, time and court can only change while the match is upcoming")
            }
            LeagueError::InvalidStatusTransition => {
                write!(f, "Cannot change the status of a completed or cancelled match")
            }
            LeagueError::ScoresNotAllowed => {
                write!(f, "Scores can only be set when the match is completed")
            }
            LeagueError::MissingScores => write!(f, "Both team scores are required to complete a match"),
            LeagueError::Score(e) => write!(f, "{}", e),
            LeagueError::InvalidCredentials { attempts_remaining } => {
                write!(f, "Incorrect email or password ({} attempts remaining)", attempts_remaining)
            }
            LeagueError::AccountLocked { locked_until } => {
                write!(f, "Account temporarily locked until {}", locked_until.to_rfc3339())
            }
            LeagueError::AccountInactive => write!(f, "Account disabled, contact an administrator"),
            LeagueError::WrongPassword => write!(f, "Current password is incorrect"),
            LeagueError::PasswordUnchanged => {
                write!(f, "The new password must differ from the current one")
            }
            LeagueError::Forbidden => write!(f, "Administrator rights required"),
        }
    }
}

impl std::error::Error for LeagueError {}

impl From<ScoreError> for LeagueError {
    fn from(e: ScoreError) -> Self {
        LeagueError::Score(e)
    }
}

/// Changes to a team; `None` keeps the current value.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamUpdate {
    pub company: Option<String>,
    pub player_1: Option<PlayerId>,
    pub player_2: Option<PlayerId>,
    pub pool_id: Option<PoolId>,
}

/// Full league state.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct League {
    pub players: Vec<Player>,
    pub teams: Vec<Team>,
    pub pools: Vec<Pool>,
    pub events: Vec<Event>,
    pub matches: Vec<GameMatch>,
    pub users: Vec<User>,
    /// Failed login counters keyed by lowercased email.
    #[serde(skip)]
    pub login_attempts: HashMap<String, LoginAttempt>,
}

impl League {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn player(&self, id: PlayerId) -> Result<&Player, LeagueError> {
        self.players
            .iter()
            .find(|p| p.id == id)
            .ok_or(LeagueError::PlayerNotFound(id))
    }

    pub fn team(&self, id: TeamId) -> Result<&Team, LeagueError> {
        self.teams
            .iter()
            .find(|t| t.id == id)
            .ok_or(LeagueError::TeamNotFound(id))
    }

    pub fn pool(&self, id: PoolId) -> Result<&Pool, LeagueError> {
        self.pools
            .iter()
            .find(|p| p.id == id)
            .ok_or(LeagueError::PoolNotFound(id))
    }

    pub fn event(&self, id: EventId) -> Result<&Event, LeagueError> {
        self.events
            .iter()
            .find(|e| e.id == id)
            .ok_or(LeagueError::EventNotFound(id))
    }

    pub fn game(&self, id: MatchId) -> Result<&GameMatch, LeagueError> {
        self.matches
            .iter()
            .find(|m| m.id == id)
            .ok_or(LeagueError::MatchNotFound(id))
    }

    pub fn game_mut(&mut self, id: MatchId) -> Result<&mut GameMatch, LeagueError> {
        self.matches
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(LeagueError::MatchNotFound(id))
    }

    pub fn user(&self, id: UserId) -> Result<&User, LeagueError> {
        self.users
            .iter()
            .find(|u| u.id == id)
            .ok_or(LeagueError::UserNotFound(id))
    }

    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.email.eq_ignore_ascii_case(email.trim()))
    }

    /// The player linked to a user account, if any.
    pub fn player_for_user(&self, user_id: UserId) -> Option<&Player> {
        self.players.iter().find(|p| p.user_id == Some(user_id))
    }

    /// Ids of every team the player belongs to.
    pub fn teams_of_player(&self, player_id: PlayerId) -> Vec<TeamId> {
        self.teams
            .iter()
            .filter(|t| t.has_player(player_id))
            .map(|t| t.id)
            .collect()
    }

    /// Distinct company names owning at least one team, sorted.
    pub fn companies(&self) -> Vec<String> {
        let mut companies: Vec<String> = self.teams.iter().map(|t| t.company.clone()).collect();
        companies.sort();
        companies.dedup();
        companies
    }

    fn team_has_matches(&self, team_id: TeamId) -> bool {
        self.matches.iter().any(|m| m.involves(team_id))
    }

    /// Register a player. Names, company and license are required; the license must be unique.
    pub fn add_player(&mut self, fields: NewPlayer) -> Result<PlayerId, LeagueError> {
        self.check_player_fields(&fields, None)?;
        let player = Player::new(fields);
        let id = player.id;
        log::debug!("Player {} registered for {}", player.full_name(), player.company);
        self.players.push(player);
        Ok(id)
    }

    /// Replace a player's details (same validation as registration).
    pub fn update_player(&mut self, id: PlayerId, fields: NewPlayer) -> Result<(), LeagueError> {
        self.player(id)?;
        self.check_player_fields(&fields, Some(id))?;
        let mut updated = Player::new(fields);
        updated.id = id;
        if let Some(p) = self.players.iter_mut().find(|p| p.id == id) {
            *p = updated;
        }
        Ok(())
    }

    /// Remove a player who is not part of any team.
    pub fn remove_player(&mut self, id: PlayerId) -> Result<(), LeagueError> {
        self.player(id)?;
        if self.teams.iter().any(|t| t.has_player(id)) {
            return Err(LeagueError::PlayerInTeam(id));
        }
        self.players.retain(|p| p.id != id);
        Ok(())
    }

    fn check_player_fields(&self, fields: &NewPlayer, exclude: Option<PlayerId>) -> Result<(), LeagueError> {
        if fields.first_name.trim().is_empty() {
            return Err(LeagueError::InvalidName("First name"));
        }
        if fields.last_name.trim().is_empty() {
            return Err(LeagueError::InvalidName("Last name"));
        }
        if fields.company.trim().is_empty() {
            return Err(LeagueError::InvalidName("Company"));
        }
        let license = fields.license_number.trim();
        if license.is_empty() {
            return Err(LeagueError::InvalidName("License number"));
        }
        let duplicate = self
            .players
            .iter()
            .any(|p| Some(p.id) != exclude && p.license_number.eq_ignore_ascii_case(license));
        if duplicate {
            return Err(LeagueError::DuplicateLicense);
        }
        if let Some(user_id) = fields.user_id {
            self.user(user_id)?;
        }
        Ok(())
    }

    /// Create a team. Both players must exist and differ; (company, pair of players) is unique.
    pub fn add_team(
        &mut self,
        company: &str,
        player_1: PlayerId,
        player_2: PlayerId,
        pool_id: Option<PoolId>,
    ) -> Result<TeamId, LeagueError> {
        let company = company.trim();
        self.check_team_fields(company, player_1, player_2, pool_id, None)?;
        let team = Team::new(company, player_1, player_2, pool_id);
        let id = team.id;
        log::info!("Team {} created for {}", id, company);
        self.teams.push(team);
        Ok(id)
    }

    /// Update a team. Players can only change while the team has no matches.
    pub fn update_team(&mut self, id: TeamId, update: TeamUpdate) -> Result<(), LeagueError> {
        let current = self.team(id)?.clone();
        let player_1 = update.player_1.unwrap_or(current.player_1);
        let player_2 = update.player_2.unwrap_or(current.player_2);
        let changing_players = player_1 != current.player_1 || player_2 != current.player_2;
        if changing_players && self.team_has_matches(id) {
            return Err(LeagueError::TeamHasMatches(id));
        }
        let company = update
            .company
            .as_deref()
            .map(str::trim)
            .unwrap_or(&current.company)
            .to_string();
        let pool_id = update.pool_id.or(current.pool_id);
        self.check_team_fields(&company, player_1, player_2, pool_id, Some(id))?;

        if let Some(t) = self.teams.iter_mut().find(|t| t.id == id) {
            t.company = company;
            t.player_1 = player_1;
            t.player_2 = player_2;
            t.pool_id = pool_id;
        }
        Ok(())
    }

    /// Remove a team that never played.
    pub fn remove_team(&mut self, id: TeamId) -> Result<(), LeagueError> {
        self.team(id)?;
        if self.team_has_matches(id) {
            return Err(LeagueError::TeamHasMatches(id));
        }
        self.teams.retain(|t| t.id != id);
        Ok(())
    }

    fn check_team_fields(
        &self,
        company: &str,
        player_1: PlayerId,
        player_2: PlayerId,
        pool_id: Option<PoolId>,
        exclude: Option<TeamId>,
    ) -> Result<(), LeagueError> {
        if company.is_empty() {
            return Err(LeagueError::InvalidName("Company"));
        }
        self.player(player_1)?;
        self.player(player_2)?;
        if player_1 == player_2 {
            return Err(LeagueError::SamePlayer);
        }
        let duplicate = self
            .teams
            .iter()
            .any(|t| Some(t.id) != exclude && t.same_lineup(company, player_1, player_2));
        if duplicate {
            return Err(LeagueError::DuplicateTeam);
        }
        if let Some(pool_id) = pool_id {
            self.pool(pool_id)?;
        }
        Ok(())
    }

    /// Create a pool and move the given teams into it. Teams must not already be in a pool.
    pub fn create_pool(&mut self, name: &str, team_ids: &[TeamId]) -> Result<PoolId, LeagueError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LeagueError::InvalidName("Pool name"));
        }
        if self.pools.iter().any(|p| p.name == name) {
            return Err(LeagueError::DuplicatePool);
        }
        for &team_id in team_ids {
            if self.team(team_id)?.pool_id.is_some() {
                return Err(LeagueError::TeamAlreadyInPool(team_id));
            }
        }
        let pool = Pool::new(name);
        let id = pool.id;
        self.pools.push(pool);
        for t in self.teams.iter_mut().filter(|t| team_ids.contains(&t.id)) {
            t.pool_id = Some(id);
        }
        Ok(id)
    }

    pub fn rename_pool(&mut self, id: PoolId, name: &str) -> Result<(), LeagueError> {
        self.pool(id)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(LeagueError::InvalidName("Pool name"));
        }
        if self.pools.iter().any(|p| p.id != id && p.name == name) {
            return Err(LeagueError::DuplicatePool);
        }
        if let Some(p) = self.pools.iter_mut().find(|p| p.id == id) {
            p.name = name.to_string();
        }
        Ok(())
    }

    /// Delete a pool; its teams are kept, just detached.
    pub fn delete_pool(&mut self, id: PoolId) -> Result<(), LeagueError> {
        self.pool(id)?;
        for t in self.teams.iter_mut().filter(|t| t.pool_id == Some(id)) {
            t.pool_id = None;
        }
        self.pools.retain(|p| p.id != id);
        Ok(())
    }

    pub fn create_event(&mut self, date: NaiveDate, start_time: NaiveTime) -> EventId {
        let event = Event::new(date, start_time);
        let id = event.id;
        self.events.push(event);
        id
    }
}
