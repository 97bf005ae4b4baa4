//! Score strings ("6-4, 3-6, 7-5") and tennis set rules.

use serde::{Deserialize, Serialize};

/// Games won by each side in one set, from the reporting team's point of view.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct SetScore {
    pub ours: u32,
    pub theirs: u32,
}

impl SetScore {
    pub fn new(ours: u32, theirs: u32) -> Self {
        Self { ours, theirs }
    }

    /// The same set seen from the other side.
    pub fn swapped(self) -> Self {
        Self {
            ours: self.theirs,
            theirs: self.ours,
        }
    }

    /// True if the reporting side took this set.
    pub fn is_won(self) -> bool {
        self.ours > self.theirs
    }
}

impl std::fmt::Display for SetScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.ours, self.theirs)
    }
}

/// Why a single set is not a legal tennis set.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SetRule {
    /// Sets cannot be drawn.
    Tied,
    /// Nobody reached 6 games.
    Unfinished,
    /// 6-5 and 6-6 do not end a set.
    NoMarginAtSix,
    /// 7 games is only reached from 5-5 or 6-6.
    BadSevenGameSet,
    /// More than 7 games is impossible with a tie-break.
    TooManyGames,
}

impl std::fmt::Display for SetRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SetRule::Tied => write!(f, "a set cannot end in a draw"),
            SetRule::Unfinished => write!(f, "the winner must reach at least 6 games"),
            SetRule::NoMarginAtSix => write!(f, "a 6-game set needs the loser at 4 games or fewer"),
            SetRule::BadSevenGameSet => write!(f, "a 7-game set must finish 7-5 or 7-6"),
            SetRule::TooManyGames => write!(f, "a set cannot go beyond 7 games"),
        }
    }
}

/// Errors raised while validating reported match scores. Set indexes are 1-based.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ScoreError {
    /// The score string is not 2 or 3 comma-separated "A-B" tokens.
    Format { input: String, reason: String },
    /// One set breaks the tennis scoring rules.
    InvalidSet { set: usize, score: SetScore, rule: SetRule },
    /// The two teams report a different number of sets.
    SetCountMismatch { team_1: usize, team_2: usize },
    /// Team 2's set is not team 1's set reversed.
    ScoreMirrorMismatch { set: usize, team_1: SetScore, team_2: SetScore },
    /// The set tally is not a finished best-of-three.
    IncompleteMatch { team_1_sets: u32, team_2_sets: u32 },
}

impl std::fmt::Display for ScoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreError::Format { input, reason } => {
                write!(f, "Invalid score format '{}': {}", input, reason)
            }
            ScoreError::InvalidSet { set, score, rule } => {
                write!(f, "Set {} ({}) is invalid: {}", set, score, rule)
            }
            ScoreError::SetCountMismatch { team_1, team_2 } => write!(
                f,
                "Team 1 reports {} sets but team 2 reports {}",
                team_1, team_2
            ),
            ScoreError::ScoreMirrorMismatch { set, team_1, team_2 } => write!(
                f,
                "Set {} does not match: team 1 reports {}, team 2 reports {}",
                set, team_1, team_2
            ),
            ScoreError::IncompleteMatch { team_1_sets, team_2_sets } => write!(
                f,
                "Sets {}-{} are not a finished best-of-three match",
                team_1_sets, team_2_sets
            ),
        }
    }
}

impl std::error::Error for ScoreError {}

pub const MIN_SETS: usize = 2;
pub const MAX_SETS: usize = 3;

fn format_error(input: &str, reason: impl Into<String>) -> ScoreError {
    ScoreError::Format {
        input: input.to_string(),
        reason: reason.into(),
    }
}

fn parse_games(input: &str, raw: &str) -> Result<u32, ScoreError> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
        return Err(format_error(input, format!("'{}' is not a number of games", raw)));
    }
    raw.parse()
        .map_err(|_| format_error(input, format!("'{}' is out of range", raw)))
}

/// Parse a score string into its sets, in play order.
///
/// Accepts 2 or 3 tokens of the form `A-B` separated by commas, with optional
/// whitespace around the dash and the commas.
pub fn parse_score(input: &str) -> Result<Vec<SetScore>, ScoreError> {
    if input.trim().is_empty() {
        return Err(format_error(input, "score is empty"));
    }
    let tokens: Vec<&str> = input.split(',').collect();
    if !(MIN_SETS..=MAX_SETS).contains(&tokens.len()) {
        return Err(format_error(
            input,
            format!("expected {} or {} sets, found {}", MIN_SETS, MAX_SETS, tokens.len()),
        ));
    }
    tokens
        .into_iter()
        .map(|token| -> Result<SetScore, ScoreError> {
            let (a, b) = token
                .split_once('-')
                .ok_or_else(|| format_error(input, format!("'{}' is not of the form A-B", token.trim())))?;
            Ok(SetScore::new(parse_games(input, a)?, parse_games(input, b)?))
        })
        .collect()
}

/// Check one set against tennis rules: 6-0 to 6-4, 7-5 or 7-6.
///
/// Game counts are unsigned, so negative values cannot reach this point.
pub fn validate_set(score: SetScore) -> Result<(), SetRule> {
    if score.ours == score.theirs {
        return Err(SetRule::Tied);
    }
    let winner = score.ours.max(score.theirs);
    let loser = score.ours.min(score.theirs);
    match winner {
        0..=5 => Err(SetRule::Unfinished),
        6 if loser <= 4 => Ok(()),
        6 => Err(SetRule::NoMarginAtSix),
        7 if loser == 5 || loser == 6 => Ok(()),
        7 => Err(SetRule::BadSevenGameSet),
        _ => Err(SetRule::TooManyGames),
    }
}

/// Count sets won and lost by the reporting side.
pub fn set_tally(sets: &[SetScore]) -> (u32, u32) {
    sets.iter().fold((0, 0), |(won, lost), s| {
        if s.is_won() {
            (won + 1, lost)
        } else {
            (won, lost + 1)
        }
    })
}
