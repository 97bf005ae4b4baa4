//! Accounts: password hashing, login with lockout after repeated failures, password changes.

use crate::models::{League, LeagueError, LoginAttempt, User, UserId};
use base64::{engine::general_purpose, Engine as _};
use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::distributions::Alphanumeric;
use rand::seq::SliceRandom;
use rand::Rng;
use sha2::Sha256;

/// Failed logins allowed before the account is locked.
pub const MAX_LOGIN_ATTEMPTS: u32 = 5;
pub const LOCKOUT_MINUTES: i64 = 30;
pub const PBKDF2_ITERATIONS: u32 = 100_000;
pub const TEMPORARY_PASSWORD_LENGTH: usize = 12;

const HASH_PREFIX: &str = "pbkdf2_sha256";
const SALT_LENGTH: usize = 16;
const SYMBOLS: &[u8] = b"!@#$%^&*";
const DUMMY_SALT: &str = "unknown-account";

fn derive(password: &str, salt: &str, iterations: u32) -> String {
    let mut output = [0u8; 32];
    pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), salt.as_bytes(), iterations, &mut output);
    general_purpose::STANDARD.encode(output)
}

/// Hash a password as `pbkdf2_sha256$<iterations>$<salt>$<base64 hash>` with a random salt.
pub fn hash_password(password: &str) -> String {
    let salt: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SALT_LENGTH)
        .map(char::from)
        .collect();
    let hash = derive(password, &salt, PBKDF2_ITERATIONS);
    format!("{}${}${}${}", HASH_PREFIX, PBKDF2_ITERATIONS, salt, hash)
}

/// Check a password against a stored hash. Malformed hashes never verify.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let parts: Vec<&str> = stored.split('$').collect();
    if parts.len() != 4 || parts[0] != HASH_PREFIX {
        return false;
    }
    let iterations: u32 = match parts[1].parse() {
        Ok(i) => i,
        Err(_) => return false,
    };
    let computed = derive(password, parts[2], iterations);
    constant_time_eq(computed.as_bytes(), parts[3].as_bytes())
}

/// A random password with at least one upper, lower, digit and symbol character.
pub fn generate_temporary_password() -> String {
    let charset: Vec<u8> = (b'a'..=b'z')
        .chain(b'A'..=b'Z')
        .chain(b'0'..=b'9')
        .chain(SYMBOLS.iter().copied())
        .collect();
    let mut rng = rand::thread_rng();
    loop {
        let password: String = (0..TEMPORARY_PASSWORD_LENGTH)
            .filter_map(|_| charset.choose(&mut rng).map(|&c| char::from(c)))
            .collect();
        let complete = password.chars().any(|c| c.is_ascii_uppercase())
            && password.chars().any(|c| c.is_ascii_lowercase())
            && password.chars().any(|c| c.is_ascii_digit())
            && password.bytes().any(|c| SYMBOLS.contains(&c));
        if complete {
            return password;
        }
    }
}

fn attempt_key(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

/// Add an account with a known password (used to bootstrap the first administrator).
pub fn add_user(
    league: &mut League,
    email: &str,
    password: &str,
    is_admin: bool,
    now: DateTime<Utc>,
) -> Result<UserId, LeagueError> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(LeagueError::InvalidName("Email"));
    }
    if league.user_by_email(email).is_some() {
        return Err(LeagueError::DuplicateEmail);
    }
    let user = User::new(email, hash_password(password), is_admin, now);
    let id = user.id;
    log::info!("User {} created (admin: {})", email, is_admin);
    league.users.push(user);
    Ok(id)
}

/// Create an account with a generated temporary password, returned once to the caller.
/// The user must change it after logging in.
pub fn create_user(
    league: &mut League,
    email: &str,
    is_admin: bool,
    now: DateTime<Utc>,
) -> Result<(UserId, String), LeagueError> {
    let temporary = generate_temporary_password();
    let id = add_user(league, email, &temporary, is_admin, now)?;
    Ok((id, temporary))
}

/// Check credentials, counting failures per email.
///
/// After `MAX_LOGIN_ATTEMPTS` failures the email is locked for `LOCKOUT_MINUTES`;
/// while locked, the password is not even checked. A lock that has expired is
/// cleared on the next attempt. Success resets the counter.
///
/// Shorthand for `begin_login`, `verify_login_password` and `finish_login` in one go.
/// Callers holding a lock on the league should run the three steps themselves and
/// verify the password without the lock.
pub fn login(
    league: &mut League,
    email: &str,
    password: &str,
    now: DateTime<Utc>,
) -> Result<UserId, LeagueError> {
    let stored = begin_login(league, email, now)?;
    let verified = verify_login_password(password, stored.as_deref());
    finish_login(league, email, verified, now)
}

fn check_lock(league: &mut League, key: &str, now: DateTime<Utc>) -> Result<(), LeagueError> {
    if let Some(attempt) = league.login_attempts.get_mut(key) {
        if let Some(locked_until) = attempt.locked_until {
            if locked_until > now {
                return Err(LeagueError::AccountLocked { locked_until });
            }
            *attempt = LoginAttempt::default();
        }
    }
    Ok(())
}

/// First login step: refuse locked emails and return the stored hash, if the email is known.
pub fn begin_login(
    league: &mut League,
    email: &str,
    now: DateTime<Utc>,
) -> Result<Option<String>, LeagueError> {
    check_lock(league, &attempt_key(email), now)?;
    Ok(league.user_by_email(email).map(|u| u.password_hash.clone()))
}

/// Second login step, independent of the league. Unknown emails still pay for a full
/// key derivation so response time does not reveal which accounts exist.
pub fn verify_login_password(password: &str, stored: Option<&str>) -> bool {
    match stored {
        Some(hash) => verify_password(password, hash),
        None => {
            derive(password, DUMMY_SALT, PBKDF2_ITERATIONS);
            false
        }
    }
}

/// Last login step: record the outcome of `verify_login_password`.
pub fn finish_login(
    league: &mut League,
    email: &str,
    verified: bool,
    now: DateTime<Utc>,
) -> Result<UserId, LeagueError> {
    let key = attempt_key(email);
    check_lock(league, &key, now)?;
    let user = league
        .user_by_email(email)
        .filter(|_| verified)
        .map(|u| (u.id, u.is_active));
    let Some((user_id, is_active)) = user else {
        return Err(record_failed_attempt(league, key, now));
    };
    if !is_active {
        return Err(LeagueError::AccountInactive);
    }
    league.login_attempts.remove(&key);
    Ok(user_id)
}

fn record_failed_attempt(league: &mut League, key: String, now: DateTime<Utc>) -> LeagueError {
    let attempt = league.login_attempts.entry(key).or_default();
    attempt.attempts_count += 1;
    attempt.last_attempt = Some(now);
    if attempt.attempts_count >= MAX_LOGIN_ATTEMPTS {
        let locked_until = now + Duration::minutes(LOCKOUT_MINUTES);
        attempt.locked_until = Some(locked_until);
        log::warn!("Too many failed logins, locked until {}", locked_until);
        return LeagueError::AccountLocked { locked_until };
    }
    LeagueError::InvalidCredentials {
        attempts_remaining: MAX_LOGIN_ATTEMPTS - attempt.attempts_count,
    }
}

/// Drop counters whose lock has expired or that never locked and are older than the lockout window.
pub fn purge_login_attempts(league: &mut League, now: DateTime<Utc>) -> usize {
    let window = Duration::minutes(LOCKOUT_MINUTES);
    let before = league.login_attempts.len();
    league.login_attempts.retain(|_, a| match a.locked_until {
        Some(_) => a.is_locked(now),
        None => a.last_attempt.is_some_and(|t| now - t < window),
    });
    before - league.login_attempts.len()
}

/// Replace the user's password after checking the current one.
pub fn change_password(
    league: &mut League,
    user_id: UserId,
    current: &str,
    new: &str,
) -> Result<(), LeagueError> {
    let user = league.user(user_id)?;
    if !verify_password(current, &user.password_hash) {
        return Err(LeagueError::WrongPassword);
    }
    if verify_password(new, &user.password_hash) {
        return Err(LeagueError::PasswordUnchanged);
    }
    let hash = hash_password(new);
    if let Some(u) = league.users.iter_mut().find(|u| u.id == user_id) {
        u.password_hash = hash;
        u.must_change_password = false;
    }
    Ok(())
}

/// The user, if they are an active administrator.
pub fn require_admin(league: &League, user_id: UserId) -> Result<&User, LeagueError> {
    let user = league.user(user_id)?;
    if !user.is_admin || !user.is_active {
        return Err(LeagueError::Forbidden);
    }
    Ok(user)
}
