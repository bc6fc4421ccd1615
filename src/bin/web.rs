//! Single binary web server: JSON API for running a doubles practice rotation.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//! Engine defaults can be tuned with ROTATION_TRIALS and ROTATION_HISTORY_WINDOW.

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use court_rotation_web::{
    confirm_round, discard_pending, export_roster_csv, export_rounds_csv, import_roster_csv,
    propose_round, rollback_last_round, swap_in_pending, EngineConfig, PlayerId, PlayerStats,
    Practice, PracticeId, RotationError,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Per-practice entry: practice data + last activity time (for auto-cleanup).
struct PracticeEntry {
    practice: Practice,
    last_activity: Instant,
}

/// In-memory state: practices by id. Entries are removed after 12h inactivity.
type AppState = Data<RwLock<HashMap<PracticeId, PracticeEntry>>>;

const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreatePracticeBody {
    #[serde(default = "default_courts")]
    courts: i64,
    #[serde(default)]
    config: Option<EngineConfig>,
}

fn default_courts() -> i64 {
    2
}

#[derive(Deserialize)]
struct AddMemberBody {
    name: String,
}

#[derive(Deserialize)]
struct MemberActiveBody {
    active: bool,
}

#[derive(Deserialize)]
struct CourtsBody {
    courts: i64,
}

#[derive(Deserialize)]
struct SwapBody {
    a: PlayerId,
    b: PlayerId,
}

#[derive(Deserialize)]
struct PracticePath {
    id: PracticeId,
}

#[derive(Deserialize)]
struct PracticeMemberPath {
    id: PracticeId,
    member_id: PlayerId,
}

#[derive(Serialize)]
struct MemberStatsRow<'a> {
    name: &'a str,
    active: bool,
    #[serde(flatten)]
    stats: PlayerStats,
}

fn bad_request(e: RotationError) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

fn csv_response(body: String) -> HttpResponse {
    HttpResponse::Ok().content_type("text/csv; charset=utf-8").body(body)
}

/// Look up a practice, refresh its activity time and run `f` on it.
/// Unknown id -> 404, workflow error -> 400.
fn with_practice<F>(state: &AppState, id: PracticeId, f: F) -> HttpResponse
where
    F: FnOnce(&mut Practice) -> Result<HttpResponse, RotationError>,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No practice" })),
    };
    entry.last_activity = Instant::now();
    f(&mut entry.practice).unwrap_or_else(bad_request)
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "court-rotation-web",
    })
}

/// Create a practice (returns it with id; client stores id for subsequent requests).
#[post("/api/practices")]
async fn api_create_practice(
    state: AppState,
    defaults: Data<EngineConfig>,
    body: Option<Json<CreatePracticeBody>>,
) -> HttpResponse {
    let body = body.map(Json::into_inner);
    let courts = body.as_ref().map_or_else(default_courts, |b| b.courts);
    let config = body
        .and_then(|b| b.config)
        .unwrap_or_else(|| defaults.get_ref().clone());
    let mut practice = Practice::with_config(0, config);
    if let Err(e) = practice.set_courts(courts) {
        return bad_request(e);
    }
    let id = practice.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    log::info!("Created practice {} with {} court(s)", id, practice.courts);
    let response = HttpResponse::Ok().json(&practice);
    g.insert(
        id,
        PracticeEntry {
            practice,
            last_activity: Instant::now(),
        },
    );
    response
}

#[get("/api/practices/{id}")]
async fn api_get_practice(state: AppState, path: Path<PracticePath>) -> HttpResponse {
    with_practice(&state, path.id, |p| Ok(HttpResponse::Ok().json(&*p)))
}

#[post("/api/practices/{id}/members")]
async fn api_add_member(state: AppState, path: Path<PracticePath>, body: Json<AddMemberBody>) -> HttpResponse {
    with_practice(&state, path.id, |p| {
        p.add_member(&body.name)?;
        Ok(HttpResponse::Ok().json(&*p))
    })
}

/// Include or exclude a member from upcoming rounds.
#[put("/api/practices/{id}/members/{member_id}/active")]
async fn api_set_member_active(
    state: AppState,
    path: Path<PracticeMemberPath>,
    body: Json<MemberActiveBody>,
) -> HttpResponse {
    with_practice(&state, path.id, |p| {
        p.set_member_active(path.member_id, body.active)?;
        Ok(HttpResponse::Ok().json(&*p))
    })
}

#[delete("/api/practices/{id}/members/{member_id}")]
async fn api_remove_member(state: AppState, path: Path<PracticeMemberPath>) -> HttpResponse {
    with_practice(&state, path.id, |p| {
        p.remove_member(path.member_id)?;
        Ok(HttpResponse::Ok().json(&*p))
    })
}

/// Import members from a CSV body with a `name` column and optional `active` column.
#[post("/api/practices/{id}/members/import")]
async fn api_import_members(state: AppState, path: Path<PracticePath>, body: String) -> HttpResponse {
    with_practice(&state, path.id, |p| {
        import_roster_csv(p, &body)?;
        Ok(HttpResponse::Ok().json(&*p))
    })
}

#[get("/api/practices/{id}/members.csv")]
async fn api_export_members(state: AppState, path: Path<PracticePath>) -> HttpResponse {
    with_practice(&state, path.id, |p| Ok(csv_response(export_roster_csv(&p.members)?)))
}

#[put("/api/practices/{id}/courts")]
async fn api_set_courts(state: AppState, path: Path<PracticePath>, body: Json<CourtsBody>) -> HttpResponse {
    with_practice(&state, path.id, |p| {
        p.set_courts(body.courts)?;
        Ok(HttpResponse::Ok().json(&*p))
    })
}

/// Propose the next round (replaces any pending proposal).
#[post("/api/practices/{id}/rounds/propose")]
async fn api_propose_round(state: AppState, path: Path<PracticePath>) -> HttpResponse {
    with_practice(&state, path.id, |p| {
        propose_round(p, &mut rand::thread_rng())?;
        Ok(HttpResponse::Ok().json(&*p))
    })
}

/// Swap two players in the pending round.
#[put("/api/practices/{id}/rounds/pending/swap")]
async fn api_swap_pending(state: AppState, path: Path<PracticePath>, body: Json<SwapBody>) -> HttpResponse {
    with_practice(&state, path.id, |p| {
        swap_in_pending(p, body.a, body.b)?;
        Ok(HttpResponse::Ok().json(&*p))
    })
}

#[delete("/api/practices/{id}/rounds/pending")]
async fn api_discard_pending(state: AppState, path: Path<PracticePath>) -> HttpResponse {
    with_practice(&state, path.id, |p| {
        discard_pending(p)?;
        Ok(HttpResponse::Ok().json(&*p))
    })
}

#[post("/api/practices/{id}/rounds/confirm")]
async fn api_confirm_round(state: AppState, path: Path<PracticePath>) -> HttpResponse {
    with_practice(&state, path.id, |p| {
        confirm_round(p)?;
        Ok(HttpResponse::Ok().json(&*p))
    })
}

/// Undo the most recent confirmed round.
#[post("/api/practices/{id}/rounds/rollback")]
async fn api_rollback_round(state: AppState, path: Path<PracticePath>) -> HttpResponse {
    with_practice(&state, path.id, |p| {
        rollback_last_round(p)?;
        Ok(HttpResponse::Ok().json(&*p))
    })
}

#[get("/api/practices/{id}/rounds.csv")]
async fn api_export_rounds(state: AppState, path: Path<PracticePath>) -> HttpResponse {
    with_practice(&state, path.id, |p| Ok(csv_response(export_rounds_csv(&p.rounds)?)))
}

/// Per-member play/rest counters in roster order.
#[get("/api/practices/{id}/stats")]
async fn api_stats(state: AppState, path: Path<PracticePath>) -> HttpResponse {
    with_practice(&state, path.id, |p| {
        let mut stats = p.stats();
        let rows: Vec<MemberStatsRow> = p
            .members
            .iter()
            .map(|m| MemberStatsRow {
                name: &m.name,
                active: m.active,
                stats: stats.remove(&m.id).unwrap_or_else(|| PlayerStats::new(m.id)),
            })
            .collect();
        Ok(HttpResponse::Ok().json(rows))
    })
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let engine_defaults = EngineConfig::from_env();
    log::info!(
        "Starting server at http://{}:{} ({} trials, history window {})",
        host,
        port,
        engine_defaults.trials,
        engine_defaults.history_window
    );

    let state = Data::new(RwLock::new(HashMap::<PracticeId, PracticeEntry>::new()));
    let defaults = Data::new(engine_defaults);

    // Every 30 minutes, drop practices inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive practice(s)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(defaults.clone())
            .service(api_health)
            .service(api_create_practice)
            .service(api_get_practice)
            .service(api_add_member)
            .service(api_set_member_active)
            .service(api_remove_member)
            .service(api_import_members)
            .service(api_export_members)
            .service(api_set_courts)
            .service(api_propose_round)
            .service(api_swap_pending)
            .service(api_discard_pending)
            .service(api_confirm_round)
            .service(api_rollback_round)
            .service(api_export_rounds)
            .service(api_stats)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
