//! Integration tests for accounts, password hashing and login lockout.

use chrono::{DateTime, Duration, TimeZone, Utc};
use padel_league_web::logic::auth::{
    add_user, begin_login, change_password, create_user, finish_login, generate_temporary_password,
    hash_password, login, purge_login_attempts, require_admin, verify_login_password,
    verify_password, LOCKOUT_MINUTES, MAX_LOGIN_ATTEMPTS, TEMPORARY_PASSWORD_LENGTH,
};
use padel_league_web::{League, LeagueError};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 4, 12, 0, 0).unwrap()
}

fn league_with_user(password: &str) -> League {
    let mut league = League::new();
    add_user(&mut league, "ana@acme.test", password, false, now()).unwrap();
    league
}

#[test]
fn hashes_verify_and_are_salted() {
    let a = hash_password("s3cret!");
    let b = hash_password("s3cret!");
    assert_ne!(a, b);
    assert!(a.starts_with("pbkdf2_sha256$"));
    assert!(verify_password("s3cret!", &a));
    assert!(!verify_password("wrong", &a));
    assert!(!verify_password("s3cret!", "plaintext"));
}

#[test]
fn temporary_password_mixes_character_classes() {
    let p = generate_temporary_password();
    assert_eq!(p.len(), TEMPORARY_PASSWORD_LENGTH);
    assert!(p.chars().any(|c| c.is_ascii_uppercase()));
    assert!(p.chars().any(|c| c.is_ascii_lowercase()));
    assert!(p.chars().any(|c| c.is_ascii_digit()));
    assert!(p.chars().any(|c| "!@#$%^&*".contains(c)));
}

#[test]
fn created_user_logs_in_with_temporary_password() {
    let mut league = League::new();
    let (id, temporary) = create_user(&mut league, "bob@acme.test", false, now()).unwrap();
    assert!(league.user(id).unwrap().must_change_password);
    assert_eq!(login(&mut league, "BOB@acme.test", &temporary, now()), Ok(id));
    assert_eq!(
        create_user(&mut league, "Bob@Acme.test", true, now()).unwrap_err(),
        LeagueError::DuplicateEmail
    );
}

#[test]
fn failures_count_down_then_lock() {
    let mut league = league_with_user("right");
    for i in 1..MAX_LOGIN_ATTEMPTS {
        assert_eq!(
            login(&mut league, "ana@acme.test", "wrong", now()),
            Err(LeagueError::InvalidCredentials {
                attempts_remaining: MAX_LOGIN_ATTEMPTS - i
            })
        );
    }
    let locked_until = now() + Duration::minutes(LOCKOUT_MINUTES);
    assert_eq!(
        login(&mut league, "ana@acme.test", "wrong", now()),
        Err(LeagueError::AccountLocked { locked_until })
    );
    // Even the right password is refused while locked.
    assert_eq!(
        login(&mut league, "ana@acme.test", "right", now() + Duration::minutes(5)),
        Err(LeagueError::AccountLocked { locked_until })
    );
    // After the lock expires the counter starts over.
    let later = locked_until + Duration::seconds(1);
    assert!(login(&mut league, "ana@acme.test", "right", later).is_ok());
    assert!(league.login_attempts.is_empty());
}

#[test]
fn unknown_email_is_counted_like_a_bad_password() {
    let mut league = league_with_user("right");
    assert_eq!(
        login(&mut league, "nobody@acme.test", "x", now()),
        Err(LeagueError::InvalidCredentials {
            attempts_remaining: MAX_LOGIN_ATTEMPTS - 1
        })
    );
}

#[test]
fn success_resets_the_counter() {
    let mut league = league_with_user("right");
    login(&mut league, "ana@acme.test", "wrong", now()).unwrap_err();
    login(&mut league, "ana@acme.test", "right", now()).unwrap();
    assert_eq!(
        login(&mut league, "ana@acme.test", "wrong", now()),
        Err(LeagueError::InvalidCredentials {
            attempts_remaining: MAX_LOGIN_ATTEMPTS - 1
        })
    );
}

#[test]
fn inactive_accounts_cannot_log_in() {
    let mut league = league_with_user("right");
    league.users[0].is_active = false;
    assert_eq!(
        login(&mut league, "ana@acme.test", "right", now()),
        Err(LeagueError::AccountInactive)
    );
}

#[test]
fn purge_drops_stale_counters() {
    let mut league = league_with_user("right");
    login(&mut league, "ana@acme.test", "wrong", now()).unwrap_err();
    assert_eq!(purge_login_attempts(&mut league, now() + Duration::minutes(1)), 0);
    assert_eq!(purge_login_attempts(&mut league, now() + Duration::hours(2)), 1);
}

#[test]
fn change_password_checks_current_and_novelty() {
    let mut league = league_with_user("old-pass");
    let id = league.users[0].id;
    assert_eq!(change_password(&mut league, id, "bad", "new-pass"), Err(LeagueError::WrongPassword));
    assert_eq!(
        change_password(&mut league, id, "old-pass", "old-pass"),
        Err(LeagueError::PasswordUnchanged)
    );
    change_password(&mut league, id, "old-pass", "new-pass").unwrap();
    assert!(!league.users[0].must_change_password);
    assert!(login(&mut league, "ana@acme.test", "new-pass", now()).is_ok());
}

#[test]
fn only_admins_pass_the_admin_check() {
    let mut league = league_with_user("pw");
    let player = league.users[0].id;
    let admin = add_user(&mut league, "boss@acme.test", "pw", true, now()).unwrap();
    assert_eq!(require_admin(&league, player).unwrap_err(), LeagueError::Forbidden);
    assert_eq!(require_admin(&league, admin).unwrap().id, admin);
}

#[test]
fn login_steps_can_verify_outside_the_league() {
    let mut league = league_with_user("right");
    let stored = begin_login(&mut league, "ana@acme.test", now()).unwrap();
    assert!(stored.as_deref().is_some_and(|h| h.starts_with("pbkdf2_sha256$")));
    let verified = verify_login_password("right", stored.as_deref());
    assert!(verified);
    let id = finish_login(&mut league, "ana@acme.test", verified, now()).unwrap();
    assert_eq!(id, league.users[0].id);
}

#[test]
fn unknown_email_still_runs_a_full_check() {
    let mut league = league_with_user("right");
    let stored = begin_login(&mut league, "ghost@acme.test", now()).unwrap();
    assert_eq!(stored, None);
    assert!(!verify_login_password("right", None));
    assert_eq!(
        finish_login(&mut league, "ghost@acme.test", false, now()),
        Err(LeagueError::InvalidCredentials {
            attempts_remaining: MAX_LOGIN_ATTEMPTS - 1
        })
    );
}

#[test]
fn lock_taken_between_steps_is_honoured() {
    let mut league = league_with_user("right");
    let stored = begin_login(&mut league, "ana@acme.test", now()).unwrap();
    for _ in 0..MAX_LOGIN_ATTEMPTS {
        login(&mut league, "ana@acme.test", "wrong", now()).unwrap_err();
    }
    let verified = verify_login_password("right", stored.as_deref());
    assert!(matches!(
        finish_login(&mut league, "ana@acme.test", verified, now()),
        Err(LeagueError::AccountLocked { .. })
    ));
}
