//! Match completion: cross-check both teams' reported scores and derive the result.

use crate::logic::score::{parse_score, set_tally, validate_set, ScoreError};
use crate::models::Side;
use serde::{Deserialize, Serialize};

/// Sets won by each team in a validated best-of-three match.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub team_1_sets: u32,
    pub team_2_sets: u32,
}

impl MatchOutcome {
    pub fn winner(&self) -> Side {
        if self.team_1_sets > self.team_2_sets {
            Side::One
        } else {
            Side::Two
        }
    }

    /// (sets won, sets lost) for one side.
    pub fn sets_for(&self, side: Side) -> (u32, u32) {
        match side {
            Side::One => (self.team_1_sets, self.team_2_sets),
            Side::Two => (self.team_2_sets, self.team_1_sets),
        }
    }
}

/// Validate the scores reported by both teams for a match being completed.
///
/// 1. Both strings parse (2 or 3 sets each).
/// 2. Both report the same number of sets.
/// 3. Every set is legal on both sides, and team 2's set is team 1's set reversed.
/// 4. The tally is 2-0 over two sets, or 2-1 over three sets.
pub fn validate_match_completion(team_1_score: &str, team_2_score: &str) -> Result<MatchOutcome, ScoreError> {
    let team_1 = parse_score(team_1_score)?;
    let team_2 = parse_score(team_2_score)?;
    if team_1.len() != team_2.len() {
        return Err(ScoreError::SetCountMismatch {
            team_1: team_1.len(),
            team_2: team_2.len(),
        });
    }

    for (i, (&s1, &s2)) in team_1.iter().zip(team_2.iter()).enumerate() {
        let set = i + 1;
        validate_set(s1).map_err(|rule| ScoreError::InvalidSet { set, score: s1, rule })?;
        validate_set(s2).map_err(|rule| ScoreError::InvalidSet { set, score: s2, rule })?;
        if s2 != s1.swapped() {
            return Err(ScoreError::ScoreMirrorMismatch {
                set,
                team_1: s1,
                team_2: s2,
            });
        }
    }

    let (team_1_sets, team_2_sets) = set_tally(&team_1);
    let incomplete = ScoreError::IncompleteMatch { team_1_sets, team_2_sets };
    match team_1.len() {
        2 if team_1_sets == 2 || team_2_sets == 2 => {}
        3 if team_1_sets == 2 || team_2_sets == 2 => {}
        _ => return Err(incomplete),
    }
    Ok(MatchOutcome { team_1_sets, team_2_sets })
}

