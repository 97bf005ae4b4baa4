//! Integration tests for score parsing, set rules and match completion.

use padel_league_web::{
    parse_score, validate_match_completion, validate_set, MatchOutcome, ScoreError, SetRule,
    SetScore, Side,
};

#[test]
fn parse_accepts_two_and_three_sets_with_whitespace() {
    assert_eq!(
        parse_score("6-4, 6-3").unwrap(),
        vec![SetScore::new(6, 4), SetScore::new(6, 3)]
    );
    assert_eq!(
        parse_score(" 7 - 6 ,3-6,  7-5 ").unwrap(),
        vec![SetScore::new(7, 6), SetScore::new(3, 6), SetScore::new(7, 5)]
    );
}

#[test]
fn parse_rejects_malformed_input() {
    for input in ["", "   ", "6-4", "6-4, 6-3, 6-2, 6-1", "6-4, six-3", "6-4, 6:3", "6-4, -1-6", "6-4, 6-"] {
        assert!(
            matches!(parse_score(input), Err(ScoreError::Format { .. })),
            "expected format error for {:?}",
            input
        );
    }
}

#[test]
fn every_legal_set_is_accepted() {
    for loser in 0..=4 {
        assert_eq!(validate_set(SetScore::new(6, loser)), Ok(()));
        assert_eq!(validate_set(SetScore::new(loser, 6)), Ok(()));
    }
    for loser in [5, 6] {
        assert_eq!(validate_set(SetScore::new(7, loser)), Ok(()));
        assert_eq!(validate_set(SetScore::new(loser, 7)), Ok(()));
    }
}

#[test]
fn illegal_sets_are_rejected_with_the_broken_rule() {
    assert_eq!(validate_set(SetScore::new(4, 4)), Err(SetRule::Tied));
    assert_eq!(validate_set(SetScore::new(5, 3)), Err(SetRule::Unfinished));
    assert_eq!(validate_set(SetScore::new(6, 5)), Err(SetRule::NoMarginAtSix));
    assert_eq!(validate_set(SetScore::new(7, 4)), Err(SetRule::BadSevenGameSet));
    assert_eq!(validate_set(SetScore::new(8, 6)), Err(SetRule::TooManyGames));
}

#[test]
fn straight_sets_win_is_valid() {
    assert_eq!(
        validate_match_completion("6-4, 6-3", "4-6, 3-6").unwrap(),
        MatchOutcome { team_1_sets: 2, team_2_sets: 0 }
    );
}

#[test]
fn tie_breaks_over_three_sets_are_valid() {
    let outcome = validate_match_completion("7-6, 6-7, 7-5", "6-7, 7-6, 5-7").unwrap();
    assert_eq!(outcome, MatchOutcome { team_1_sets: 2, team_2_sets: 1 });
    assert_eq!(outcome.winner(), Side::One);
}

#[test]
fn six_five_set_is_invalid() {
    assert!(matches!(
        validate_match_completion("6-5, 6-3", "5-6, 3-6"),
        Err(ScoreError::InvalidSet { set: 1, rule: SetRule::NoMarginAtSix, .. })
    ));
}

#[test]
fn winner_above_seven_is_invalid() {
    assert!(matches!(
        validate_match_completion("8-6, 6-3", "6-8, 3-6"),
        Err(ScoreError::InvalidSet { set: 1, rule: SetRule::TooManyGames, .. })
    ));
}

#[test]
fn mirror_mismatch_names_the_set() {
    assert_eq!(
        validate_match_completion("6-4, 6-3", "4-6, 6-3"),
        Err(ScoreError::ScoreMirrorMismatch {
            set: 2,
            team_1: SetScore::new(6, 3),
            team_2: SetScore::new(6, 3),
        })
    );
}

#[test]
fn different_set_counts_are_rejected() {
    assert_eq!(
        validate_match_completion("6-4, 3-6, 6-2", "4-6, 6-3"),
        Err(ScoreError::SetCountMismatch { team_1: 3, team_2: 2 })
    );
}

#[test]
fn format_errors_propagate_from_either_side() {
    assert!(matches!(
        validate_match_completion("6-4", "4-6, 3-6"),
        Err(ScoreError::Format { .. })
    ));
    assert!(matches!(
        validate_match_completion("6-4, 6-3", "4-6; 3-6"),
        Err(ScoreError::Format { .. })
    ));
}

#[test]
fn split_sets_without_decider_are_incomplete() {
    assert_eq!(
        validate_match_completion("6-4, 3-6", "4-6, 6-3"),
        Err(ScoreError::IncompleteMatch { team_1_sets: 1, team_2_sets: 1 })
    );
}

#[test]
fn three_sets_need_a_two_one_tally() {
    assert_eq!(
        validate_match_completion("6-4, 6-3, 3-6", "4-6, 3-6, 6-3"),
        Ok(MatchOutcome { team_1_sets: 2, team_2_sets: 1 })
    );
    assert_eq!(
        validate_match_completion("3-6, 4-6, 6-4", "6-3, 6-4, 4-6"),
        Ok(MatchOutcome { team_1_sets: 1, team_2_sets: 2 })
    );
    assert_eq!(
        validate_match_completion("6-4, 6-3, 6-2", "4-6, 3-6, 2-6"),
        Err(ScoreError::IncompleteMatch { team_1_sets: 3, team_2_sets: 0 })
    );
}

#[test]
fn swapping_sides_complements_the_tally() {
    let pairs = [
        ("6-4, 6-3", "4-6, 3-6"),
        ("3-6, 7-5, 6-7", "6-3, 5-7, 7-6"),
        ("0-6, 6-0, 7-6", "6-0, 0-6, 6-7"),
    ];
    for (a, b) in pairs {
        let forward = validate_match_completion(a, b).unwrap();
        let backward = validate_match_completion(b, a).unwrap();
        assert_eq!(forward.team_1_sets, backward.team_2_sets);
        assert_eq!(forward.team_2_sets, backward.team_1_sets);
        assert_ne!(forward.winner(), backward.winner());
        assert!(matches!(
            (forward.team_1_sets, forward.team_2_sets),
            (2, 0) | (2, 1) | (1, 2) | (0, 2)
        ));
    }
}

#[test]
fn errors_render_a_readable_message() {
    let err = validate_match_completion("6-4, 6-3", "4-6, 6-3").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Set 2 does not match: team 1 reports 6-3, team 2 reports 6-3"
    );
}
