//! Integration tests for players, teams, pools and personal results.

use chrono::{NaiveDate, NaiveTime};
use padel_league_web::{
    personal_results, GameMatch, League, LeagueError, MatchStatus, NewPlayer, PlayerId, Side, TeamUpdate,
};

fn new_player(league: &mut League, name: &str, company: &str) -> PlayerId {
    league
        .add_player(NewPlayer {
            first_name: name.to_string(),
            last_name: "Martin".to_string(),
            company: company.to_string(),
            license_number: format!("LIC-{name}"),
            ..NewPlayer::default()
        })
        .unwrap()
}

#[test]
fn player_requires_names_and_unique_license() {
    let mut league = League::new();
    new_player(&mut league, "Ana", "Acme");
    let blank = NewPlayer {
        first_name: "  ".to_string(),
        last_name: "Martin".to_string(),
        company: "Acme".to_string(),
        license_number: "X1".to_string(),
        ..NewPlayer::default()
    };
    assert_eq!(league.add_player(blank), Err(LeagueError::InvalidName("First name")));
    let duplicate = NewPlayer {
        first_name: "Bob".to_string(),
        last_name: "Martin".to_string(),
        company: "Acme".to_string(),
        license_number: "lic-ana".to_string(),
        ..NewPlayer::default()
    };
    assert_eq!(league.add_player(duplicate), Err(LeagueError::DuplicateLicense));
}

#[test]
fn team_needs_two_distinct_existing_players() {
    let mut league = League::new();
    let ana = new_player(&mut league, "Ana", "Acme");
    assert_eq!(league.add_team("Acme", ana, ana, None), Err(LeagueError::SamePlayer));
    let ghost = uuid::Uuid::new_v4();
    assert_eq!(league.add_team("Acme", ana, ghost, None), Err(LeagueError::PlayerNotFound(ghost)));
}

#[test]
fn team_is_unique_per_company_and_unordered_pair() {
    let mut league = League::new();
    let ana = new_player(&mut league, "Ana", "Acme");
    let bob = new_player(&mut league, "Bob", "Acme");
    league.add_team("Acme", ana, bob, None).unwrap();
    assert_eq!(league.add_team("Acme", bob, ana, None), Err(LeagueError::DuplicateTeam));
    // Same pair for another company is a different team.
    league.add_team("Acme Labs", bob, ana, None).unwrap();
}

#[test]
fn teams_with_matches_keep_their_players() {
    let mut league = League::new();
    let ids: Vec<PlayerId> = ["Ana", "Bob", "Cleo", "Dan", "Eve"]
        .iter()
        .map(|n| new_player(&mut league, n, "Acme"))
        .collect();
    let t1 = league.add_team("Acme", ids[0], ids[1], None).unwrap();
    let t2 = league.add_team("Zenith", ids[2], ids[3], None).unwrap();
    let date = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
    league
        .matches
        .push(GameMatch::new(t1, t2, date, NaiveTime::from_hms_opt(18, 0, 0).unwrap(), 1));

    let swap = TeamUpdate {
        player_2: Some(ids[4]),
        ..TeamUpdate::default()
    };
    assert_eq!(league.update_team(t1, swap), Err(LeagueError::TeamHasMatches(t1)));
    let rename = TeamUpdate {
        company: Some("Acme Corp".to_string()),
        ..TeamUpdate::default()
    };
    league.update_team(t1, rename).unwrap();
    assert_eq!(league.team(t1).unwrap().company, "Acme Corp");
    assert_eq!(league.remove_team(t1), Err(LeagueError::TeamHasMatches(t1)));
    assert_eq!(league.remove_player(ids[0]), Err(LeagueError::PlayerInTeam(ids[0])));
    league.remove_player(ids[4]).unwrap();
}

#[test]
fn pools_own_teams_until_deleted() {
    let mut league = League::new();
    let ids: Vec<PlayerId> = ["Ana", "Bob"].iter().map(|n| new_player(&mut league, n, "Acme")).collect();
    let team = league.add_team("Acme", ids[0], ids[1], None).unwrap();

    let pool = league.create_pool("Pool A", &[team]).unwrap();
    assert_eq!(league.team(team).unwrap().pool_id, Some(pool));
    assert_eq!(league.create_pool("Pool A", &[]), Err(LeagueError::DuplicatePool));
    assert_eq!(league.create_pool("Pool B", &[team]), Err(LeagueError::TeamAlreadyInPool(team)));

    league.rename_pool(pool, "Pool Alpha").unwrap();
    assert_eq!(league.pool(pool).unwrap().name, "Pool Alpha");
    league.delete_pool(pool).unwrap();
    assert_eq!(league.team(team).unwrap().pool_id, None);
}

#[test]
fn personal_results_are_newest_first_with_victory_flag() {
    let mut league = League::new();
    let ids: Vec<PlayerId> = ["Ana", "Bob", "Cleo", "Dan"]
        .iter()
        .map(|n| new_player(&mut league, n, "Acme"))
        .collect();
    let mine = league.add_team("Acme", ids[0], ids[1], None).unwrap();
    let theirs = league.add_team("Zenith", ids[2], ids[3], None).unwrap();
    let time = NaiveTime::from_hms_opt(18, 0, 0).unwrap();

    let mut won = GameMatch::new(mine, theirs, NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(), time, 1);
    won.status = MatchStatus::Completed;
    won.score_team_1 = Some("6-2, 6-2".to_string());
    won.score_team_2 = Some("2-6, 2-6".to_string());
    let mut lost = GameMatch::new(theirs, mine, NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(), time, 1);
    lost.status = MatchStatus::Completed;
    lost.score_team_1 = Some("6-2, 3-6, 6-4".to_string());
    lost.score_team_2 = Some("2-6, 6-3, 4-6".to_string());
    let mut last_year = GameMatch::new(mine, theirs, NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(), time, 1);
    last_year.status = MatchStatus::Completed;
    last_year.score_team_1 = Some("6-0, 6-0".to_string());
    last_year.score_team_2 = Some("0-6, 0-6".to_string());
    let upcoming = GameMatch::new(mine, theirs, NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(), time, 1);
    league.matches.extend([won, lost, last_year, upcoming]);
    assert_eq!(league.matches[1].score(Side::Two), Some("2-6, 6-3, 4-6"));
    assert_eq!(league.matches[3].score(Side::One), None);

    let today = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
    let all = personal_results(&league, ids[1], false, today).unwrap();
    assert_eq!(all.len(), 3);
    assert!(!all[0].is_victory);
    assert!(all[1].is_victory);
    assert_eq!(all[0].adversary_company, "Zenith");
    assert_eq!(all[0].adversary_player_1, "Cleo Martin");
    assert_eq!(all[0].team_id, mine);

    let season = personal_results(&league, ids[1], true, today).unwrap();
    assert_eq!(season.len(), 2);
}
