//! League business logic: score validation, standings, scheduling, results, accounts.

pub mod auth;
mod outcome;
mod ranking;
mod results;
mod schedule;
pub mod score;

pub use auth::{
    add_user, change_password, create_user, login, purge_login_attempts, require_admin,
    LOCKOUT_MINUTES, MAX_LOGIN_ATTEMPTS,
};
pub use outcome::{validate_match_completion, MatchOutcome};
pub use ranking::{
    company_ranking, compute_company_ranking, rank_companies, ranking_csv, CompletedMatch,
    RankingEntry, POINTS_PER_VICTORY,
};
pub use results::{personal_results, PersonalResult};
pub use schedule::{
    create_match, delete_match, is_court_available, update_match, upcoming_matches, MatchFilter,
    MatchUpdate, NewMatch, DEFAULT_UPCOMING_DAYS, MAX_COURT, MIN_COURT,
};
pub use score::{parse_score, set_tally, validate_set, ScoreError, SetRule, SetScore};
