//! Single binary web server: league API via REST, cookie sessions for login.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, SESSION_SECRET (64+ bytes), ADMIN_EMAIL, ADMIN_PASSWORD.

use actix_session::{storage::CookieSessionStore, Session, SessionMiddleware};
use actix_web::{
    cookie::Key,
    delete, get,
    http::StatusCode,
    patch, post, put,
    web::{Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::{NaiveDate, NaiveTime, Utc};
use padel_league_web::logic::{self, auth};
use padel_league_web::{
    GameMatch, League, LeagueError, MatchFilter, MatchStatus, MatchUpdate, NewMatch, NewPlayer,
    PlayerId, PoolId, TeamId, TeamUpdate, UserId,
};
use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use std::time::Duration;
use uuid::Uuid;

/// In-memory league shared by all workers.
type AppState = Data<RwLock<League>>;

const SESSION_USER_KEY: &str = "user_id";

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct LoginBody {
    email: String,
    password: String,
}

#[derive(Deserialize)]
struct ChangePasswordBody {
    current_password: String,
    new_password: String,
}

#[derive(Deserialize)]
struct CreateUserBody {
    email: String,
    #[serde(default)]
    is_admin: bool,
}

#[derive(Deserialize)]
struct CreateTeamBody {
    company: String,
    player_1: PlayerId,
    player_2: PlayerId,
    #[serde(default)]
    pool_id: Option<PoolId>,
}

#[derive(Deserialize)]
struct CreatePoolBody {
    name: String,
    #[serde(default)]
    team_ids: Vec<TeamId>,
}

#[derive(Deserialize)]
struct RenamePoolBody {
    name: String,
}

#[derive(Deserialize)]
struct CreateEventBody {
    date: NaiveDate,
    start_time: NaiveTime,
}

#[derive(Deserialize)]
struct ValidateScoreBody {
    score_team_1: String,
    score_team_2: String,
}

#[derive(Deserialize)]
struct MatchesQuery {
    /// Players only see their own matches unless this is set.
    #[serde(default)]
    show_all: bool,
    company: Option<String>,
    pool_id: Option<PoolId>,
    status: Option<MatchStatus>,
    days: Option<i64>,
}

#[derive(Deserialize)]
struct PersonalResultsQuery {
    /// "current" restricts to this calendar year.
    season: Option<String>,
}

/// Path segment: resource id (e.g. /api/teams/{id})
#[derive(Deserialize)]
struct IdPath {
    id: Uuid,
}

#[derive(Serialize)]
struct PlayerInfo {
    id: PlayerId,
    first_name: String,
    last_name: String,
}

#[derive(Serialize)]
struct TeamInfo {
    id: TeamId,
    company: String,
    player_1: PlayerInfo,
    player_2: PlayerInfo,
}

/// A match with both teams and their players expanded.
#[derive(Serialize)]
struct MatchDetail {
    #[serde(flatten)]
    game: GameMatch,
    team_1_info: TeamInfo,
    team_2_info: TeamInfo,
}

fn player_info(league: &League, id: PlayerId) -> Result<PlayerInfo, LeagueError> {
    let p = league.player(id)?;
    Ok(PlayerInfo {
        id: p.id,
        first_name: p.first_name.clone(),
        last_name: p.last_name.clone(),
    })
}

fn team_info(league: &League, id: TeamId) -> Result<TeamInfo, LeagueError> {
    let t = league.team(id)?;
    Ok(TeamInfo {
        id: t.id,
        company: t.company.clone(),
        player_1: player_info(league, t.player_1)?,
        player_2: player_info(league, t.player_2)?,
    })
}

fn match_detail(league: &League, game: &GameMatch) -> Result<MatchDetail, LeagueError> {
    Ok(MatchDetail {
        game: game.clone(),
        team_1_info: team_info(league, game.team_1)?,
        team_2_info: team_info(league, game.team_2)?,
    })
}

fn status_for(e: &LeagueError) -> StatusCode {
    use LeagueError::*;
    match e {
        PlayerNotFound(_) | TeamNotFound(_) | PoolNotFound(_) | EventNotFound(_) | MatchNotFound(_)
        | UserNotFound(_) => StatusCode::NOT_FOUND,
        DuplicateLicense | DuplicateTeam | DuplicatePool | DuplicateEmail | TeamHasMatches(_)
        | PlayerInTeam(_) | TeamAlreadyInPool(_) | CourtUnavailable { .. } => StatusCode::CONFLICT,
        AccountLocked { .. } | AccountInactive | Forbidden => StatusCode::FORBIDDEN,
        _ => StatusCode::BAD_REQUEST,
    }
}

fn error_response(e: LeagueError) -> HttpResponse {
    HttpResponse::build(status_for(&e)).json(serde_json::json!({ "error": e.to_string() }))
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(serde_json::json!({ "error": "Not logged in" }))
}

/// The logged-in user, if the session points to an existing active account.
fn session_user(session: &Session, league: &League) -> Result<UserId, HttpResponse> {
    let id = match session.get::<UserId>(SESSION_USER_KEY) {
        Ok(Some(id)) => id,
        _ => return Err(unauthorized()),
    };
    match league.user(id) {
        Ok(u) if u.is_active => Ok(id),
        _ => Err(unauthorized()),
    }
}

/// Like `session_user`, but the account must be an administrator.
fn session_admin(session: &Session, league: &League) -> Result<UserId, HttpResponse> {
    let id = session_user(session, league)?;
    auth::require_admin(league, id).map_err(error_response)?;
    Ok(id)
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "padel-league-web",
    })
}

#[post("/api/auth/login")]
async fn api_login(state: AppState, session: Session, body: Json<LoginBody>) -> HttpResponse {
    let stored = match state.write() {
        Ok(mut g) => auth::begin_login(&mut g, &body.email, Utc::now()),
        Err(_) => return lock_error(),
    };
    let stored = match stored {
        Ok(hash) => hash,
        Err(e) => return error_response(e),
    };
    // Key derivation runs without the league lock.
    let verified = auth::verify_login_password(&body.password, stored.as_deref());
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let user_id = match auth::finish_login(&mut g, &body.email, verified, Utc::now()) {
        Ok(id) => id,
        Err(e) => return error_response(e),
    };
    session.renew();
    if session.insert(SESSION_USER_KEY, user_id).is_err() {
        return HttpResponse::InternalServerError().body("session error");
    }
    match g.user(user_id) {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(e) => error_response(e),
    }
}

#[post("/api/auth/logout")]
async fn api_logout(session: Session) -> HttpResponse {
    session.purge();
    HttpResponse::Ok().json(serde_json::json!({ "message": "Logged out" }))
}

#[get("/api/auth/me")]
async fn api_me(state: AppState, session: Session) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let id = match session_user(&session, &g) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match g.user(id) {
        Ok(user) => HttpResponse::Ok().json(serde_json::json!({
            "user": user,
            "player": g.player_for_user(id),
        })),
        Err(e) => error_response(e),
    }
}

#[post("/api/auth/change-password")]
async fn api_change_password(state: AppState, session: Session, body: Json<ChangePasswordBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let id = match session_user(&session, &g) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match logic::change_password(&mut g, id, &body.current_password, &body.new_password) {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "message": "Password changed" })),
        Err(e) => error_response(e),
    }
}

/// Create an account with a temporary password (administrators only).
#[post("/api/users")]
async fn api_create_user(state: AppState, session: Session, body: Json<CreateUserBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    if let Err(resp) = session_admin(&session, &g) {
        return resp;
    }
    match logic::create_user(&mut g, &body.email, body.is_admin, Utc::now()) {
        Ok((id, temporary_password)) => HttpResponse::Ok().json(serde_json::json!({
            "user": g.user(id).ok(),
            "temporary_password": temporary_password,
        })),
        Err(e) => error_response(e),
    }
}

#[get("/api/players")]
async fn api_list_players(state: AppState, session: Session) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    if let Err(resp) = session_user(&session, &g) {
        return resp;
    }
    HttpResponse::Ok().json(&g.players)
}

#[get("/api/players/{id}")]
async fn api_get_player(state: AppState, session: Session, path: Path<IdPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    if let Err(resp) = session_user(&session, &g) {
        return resp;
    }
    match g.player(path.id) {
        Ok(p) => HttpResponse::Ok().json(p),
        Err(e) => error_response(e),
    }
}

#[post("/api/players")]
async fn api_add_player(state: AppState, session: Session, body: Json<NewPlayer>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    if let Err(resp) = session_admin(&session, &g) {
        return resp;
    }
    match g.add_player(body.into_inner()) {
        Ok(id) => HttpResponse::Ok().json(g.player(id).ok()),
        Err(e) => error_response(e),
    }
}

#[put("/api/players/{id}")]
async fn api_update_player(state: AppState, session: Session, path: Path<IdPath>, body: Json<NewPlayer>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    if let Err(resp) = session_admin(&session, &g) {
        return resp;
    }
    match g.update_player(path.id, body.into_inner()) {
        Ok(()) => HttpResponse::Ok().json(g.player(path.id).ok()),
        Err(e) => error_response(e),
    }
}

#[delete("/api/players/{id}")]
async fn api_remove_player(state: AppState, session: Session, path: Path<IdPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    if let Err(resp) = session_admin(&session, &g) {
        return resp;
    }
    match g.remove_player(path.id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(e),
    }
}

#[get("/api/teams")]
async fn api_list_teams(state: AppState, session: Session) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    if let Err(resp) = session_user(&session, &g) {
        return resp;
    }
    HttpResponse::Ok().json(&g.teams)
}

#[get("/api/teams/{id}")]
async fn api_get_team(state: AppState, session: Session, path: Path<IdPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    if let Err(resp) = session_user(&session, &g) {
        return resp;
    }
    match team_info(&g, path.id) {
        Ok(t) => HttpResponse::Ok().json(t),
        Err(e) => error_response(e),
    }
}

#[post("/api/teams")]
async fn api_add_team(state: AppState, session: Session, body: Json<CreateTeamBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    if let Err(resp) = session_admin(&session, &g) {
        return resp;
    }
    match g.add_team(&body.company, body.player_1, body.player_2, body.pool_id) {
        Ok(id) => HttpResponse::Ok().json(g.team(id).ok()),
        Err(e) => error_response(e),
    }
}

#[put("/api/teams/{id}")]
async fn api_update_team(state: AppState, session: Session, path: Path<IdPath>, body: Json<TeamUpdate>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    if let Err(resp) = session_admin(&session, &g) {
        return resp;
    }
    match g.update_team(path.id, body.into_inner()) {
        Ok(()) => HttpResponse::Ok().json(g.team(path.id).ok()),
        Err(e) => error_response(e),
    }
}

#[delete("/api/teams/{id}")]
async fn api_remove_team(state: AppState, session: Session, path: Path<IdPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    if let Err(resp) = session_admin(&session, &g) {
        return resp;
    }
    match g.remove_team(path.id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(e),
    }
}

#[get("/api/pools")]
async fn api_list_pools(state: AppState, session: Session) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    if let Err(resp) = session_user(&session, &g) {
        return resp;
    }
    HttpResponse::Ok().json(&g.pools)
}

#[post("/api/pools")]
async fn api_create_pool(state: AppState, session: Session, body: Json<CreatePoolBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    if let Err(resp) = session_admin(&session, &g) {
        return resp;
    }
    match g.create_pool(&body.name, &body.team_ids) {
        Ok(id) => HttpResponse::Ok().json(g.pool(id).ok()),
        Err(e) => error_response(e),
    }
}

#[put("/api/pools/{id}")]
async fn api_rename_pool(state: AppState, session: Session, path: Path<IdPath>, body: Json<RenamePoolBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    if let Err(resp) = session_admin(&session, &g) {
        return resp;
    }
    match g.rename_pool(path.id, &body.name) {
        Ok(()) => HttpResponse::Ok().json(g.pool(path.id).ok()),
        Err(e) => error_response(e),
    }
}

#[delete("/api/pools/{id}")]
async fn api_delete_pool(state: AppState, session: Session, path: Path<IdPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    if let Err(resp) = session_admin(&session, &g) {
        return resp;
    }
    match g.delete_pool(path.id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(e),
    }
}

#[get("/api/events")]
async fn api_list_events(state: AppState, session: Session) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    if let Err(resp) = session_user(&session, &g) {
        return resp;
    }
    HttpResponse::Ok().json(&g.events)
}

#[post("/api/events")]
async fn api_create_event(state: AppState, session: Session, body: Json<CreateEventBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    if let Err(resp) = session_admin(&session, &g) {
        return resp;
    }
    let id = g.create_event(body.date, body.start_time);
    match g.event(id) {
        Ok(event) => HttpResponse::Ok().json(event),
        Err(e) => error_response(e),
    }
}

/// Upcoming matches (next 30 days by default). Players see their own unless `show_all`.
#[get("/api/matches")]
async fn api_list_matches(state: AppState, session: Session, query: Query<MatchesQuery>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let user_id = match session_user(&session, &g) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let is_admin = g.user(user_id).is_ok_and(|u| u.is_admin);
    let player = if is_admin || query.show_all {
        None
    } else {
        g.player_for_user(user_id).map(|p| p.id)
    };
    let filter = MatchFilter {
        player,
        company: query.company.clone(),
        pool: query.pool_id,
        status: query.status,
        days: query.days,
    };
    let details: Result<Vec<MatchDetail>, LeagueError> = logic::upcoming_matches(&g, &filter, today())
        .into_iter()
        .map(|m| match_detail(&g, m))
        .collect();
    match details {
        Ok(d) => HttpResponse::Ok().json(d),
        Err(e) => error_response(e),
    }
}

#[post("/api/matches")]
async fn api_create_match(state: AppState, session: Session, body: Json<NewMatch>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    if let Err(resp) = session_admin(&session, &g) {
        return resp;
    }
    let result = logic::create_match(&mut g, body.into_inner(), today())
        .and_then(|id| g.game(id).and_then(|m| match_detail(&g, m)));
    match result {
        Ok(detail) => HttpResponse::Ok().json(detail),
        Err(e) => error_response(e),
    }
}

/// Reschedule, cancel or complete (with both scores) a match.
#[patch("/api/matches/{id}")]
async fn api_update_match(state: AppState, session: Session, path: Path<IdPath>, body: Json<MatchUpdate>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    if let Err(resp) = session_admin(&session, &g) {
        return resp;
    }
    let result = logic::update_match(&mut g, path.id, body.into_inner(), today())
        .and_then(|_| g.game(path.id).and_then(|m| match_detail(&g, m)));
    match result {
        Ok(detail) => HttpResponse::Ok().json(detail),
        Err(e) => error_response(e),
    }
}

#[delete("/api/matches/{id}")]
async fn api_delete_match(state: AppState, session: Session, path: Path<IdPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    if let Err(resp) = session_admin(&session, &g) {
        return resp;
    }
    match logic::delete_match(&mut g, path.id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(e),
    }
}

/// Check a pair of scores without touching any match.
#[post("/api/matches/validate-score")]
async fn api_validate_score(body: Json<ValidateScoreBody>) -> HttpResponse {
    match logic::validate_match_completion(&body.score_team_1, &body.score_team_2) {
        Ok(outcome) => HttpResponse::Ok().json(outcome),
        Err(e) => error_response(e.into()),
    }
}

#[get("/api/results/personal")]
async fn api_personal_results(state: AppState, session: Session, query: Query<PersonalResultsQuery>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let user_id = match session_user(&session, &g) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let Some(player) = g.player_for_user(user_id) else {
        return HttpResponse::Ok().json(Vec::<logic::PersonalResult>::new());
    };
    let current_season = query.season.as_deref() == Some("current");
    match logic::personal_results(&g, player.id, current_season, today()) {
        Ok(results) => HttpResponse::Ok().json(results),
        Err(e) => error_response(e),
    }
}

#[get("/api/results/ranking")]
async fn api_ranking(state: AppState, session: Session) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    if let Err(resp) = session_user(&session, &g) {
        return resp;
    }
    HttpResponse::Ok().json(logic::company_ranking(&g))
}

#[get("/api/results/ranking.csv")]
async fn api_ranking_csv(state: AppState, session: Session) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    if let Err(resp) = session_user(&session, &g) {
        return resp;
    }
    match logic::ranking_csv(&logic::company_ranking(&g)) {
        Ok(bytes) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header(("Content-Disposition", "attachment; filename=\"ranking.csv\""))
            .body(bytes),
        Err(e) => {
            log::error!("Ranking CSV export failed: {}", e);
            HttpResponse::InternalServerError().body("csv error")
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_admin_email() -> String {
    "admin@padel.local".to_string()
}

/// Signing key for session cookies; random (sessions lost on restart) if SESSION_SECRET is unset or short.
fn session_key() -> Key {
    match std::env::var("SESSION_SECRET") {
        Ok(secret) => match Key::try_from(secret.as_bytes()) {
            Ok(key) => key,
            Err(_) => {
                log::warn!("SESSION_SECRET must be at least 64 bytes, using a random key");
                Key::generate()
            }
        },
        Err(_) => {
            log::warn!("SESSION_SECRET not set, using a random key");
            Key::generate()
        }
    }
}

fn bootstrap_admin(league: &mut League) {
    let email = std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| default_admin_email());
    let password = match std::env::var("ADMIN_PASSWORD") {
        Ok(p) => p,
        Err(_) => {
            let p = auth::generate_temporary_password();
            log::warn!("ADMIN_PASSWORD not set, generated password for {}: {}", email, p);
            p
        }
    };
    if let Err(e) = logic::add_user(league, &email, &password, true, Utc::now()) {
        log::error!("Could not create administrator {}: {}", email, e);
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let mut league = League::new();
    bootstrap_admin(&mut league);
    let state = Data::new(RwLock::new(league));
    let key = session_key();

    // Background task: every 30 minutes, drop expired login counters
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let removed = logic::purge_login_attempts(&mut g, Utc::now());
            if removed > 0 {
                log::info!("Cleaned up {} expired login counter(s)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), key.clone())
                    .cookie_secure(false)
                    .build(),
            )
            .service(api_health)
            .service(api_login)
            .service(api_logout)
            .service(api_me)
            .service(api_change_password)
            .service(api_create_user)
            .service(api_list_players)
            .service(api_get_player)
            .service(api_add_player)
            .service(api_update_player)
            .service(api_remove_player)
            .service(api_list_teams)
            .service(api_get_team)
            .service(api_add_team)
            .service(api_update_team)
            .service(api_remove_team)
            .service(api_list_pools)
            .service(api_create_pool)
            .service(api_rename_pool)
            .service(api_delete_pool)
            .service(api_list_events)
            .service(api_create_event)
            .service(api_validate_score)
            .service(api_list_matches)
            .service(api_create_match)
            .service(api_update_match)
            .service(api_delete_match)
            .service(api_personal_results)
            .service(api_ranking_csv)
            .service(api_ranking)
    })
    .bind(bind)?
    .run()
    .await
}
