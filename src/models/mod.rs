//! Data structures for the padel league: players, teams, pools, matches, accounts.

mod game;
mod league;
mod player;
mod team;
mod user;

pub use game::{Event, EventId, GameMatch, MatchId, MatchStatus, Side};
pub use league::{League, LeagueError, TeamUpdate};
pub use player::{NewPlayer, Player, PlayerId};
pub use team::{Pool, PoolId, Team, TeamId};
pub use user::{LoginAttempt, User, UserId};
