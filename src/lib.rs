//! Padel league web app: library with models and business logic.

pub mod logic;
pub mod models;

pub use logic::{
    company_ranking, compute_company_ranking, create_match, delete_match, parse_score,
    personal_results, update_match, upcoming_matches, validate_match_completion, validate_set,
    CompletedMatch, MatchFilter, MatchOutcome, MatchUpdate, NewMatch, PersonalResult,
    RankingEntry, ScoreError, SetRule, SetScore,
};
pub use models::{
    Event, EventId, GameMatch, League, LeagueError, LoginAttempt, MatchId, MatchStatus, NewPlayer,
    Player, PlayerId, Pool, PoolId, Side, Team, TeamId, TeamUpdate, User, UserId,
};
