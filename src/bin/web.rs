//! Single binary host for the quiz: JSON API over one game session, plus the operator UI
//! from STATIC_DIR when present.
//! Run with: cargo run --bin web
//! Listens on 127.0.0.1:8080 by default (the quiz runs on a single device).
//! Override with env: HOST, PORT, QUIZ_DATA_DIR, QUESTIONS_CSV, BONUS_CSV, STATIC_DIR.

use actix_files::Files;
use actix_web::{
    get, post,
    web::{self, Data, Json},
    App, HttpResponse, HttpServer, Responder,
};
use quiz_night::{load_questions, Engine, EngineError, ErrorKind, FileStore, Session, Team, TeamId};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, RwLock};
use std::time::Duration;
use tokio::task::JoinHandle;

/// The one game this process hosts.
type AppState = Data<RwLock<Engine<FileStore>>>;

/// Background countdown task; aborted on stop/reset, respawned on start.
type TimerTask = Data<Mutex<Option<JoinHandle<()>>>>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Serialize)]
struct SessionView<'a> {
    #[serde(flatten)]
    session: &'a Session,
    question_number: u32,
    all_pairs_completed: bool,
}

#[derive(Serialize)]
struct ResultsView {
    standings: Vec<Team>,
    advancing_team_ids: Vec<TeamId>,
    all_pairs_completed: bool,
}

#[derive(Serialize)]
struct StandingsView<'a> {
    standings: Vec<Team>,
    winner: Option<&'a Team>,
}

#[derive(Deserialize)]
struct TeamsBody {
    names: Vec<String>,
}

#[derive(Deserialize)]
struct SelectTeamsBody {
    team_ids: Vec<TeamId>,
}

#[derive(Deserialize)]
struct RevealBody {
    index: usize,
}

#[derive(Deserialize)]
struct AssignAnswerBody {
    index: usize,
    team_id: TeamId,
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

/// Validation errors are shown inline; a failed round advancement asks the UI for a blocking alert.
fn error_response(e: &EngineError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e.kind() {
        ErrorKind::Validation => HttpResponse::BadRequest().json(body),
        ErrorKind::InvalidState => HttpResponse::Conflict().json(body),
        ErrorKind::AdvancementIntegrity => {
            log::error!("Round advancement refused: {}", e);
            HttpResponse::Conflict().json(serde_json::json!({ "error": e.to_string(), "alert": true }))
        }
    }
}

fn session_response(engine: &Engine<FileStore>) -> HttpResponse {
    let session = engine.session();
    HttpResponse::Ok().json(SessionView {
        session,
        question_number: session.question_number(),
        all_pairs_completed: engine.all_pairs_completed_for_round(),
    })
}

/// Run a command against the engine and answer with the updated session (or the error).
fn command<F>(state: &AppState, f: F) -> HttpResponse
where
    F: FnOnce(&mut Engine<FileStore>) -> Result<(), EngineError>,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match f(&mut g) {
        Ok(()) => session_response(&g),
        Err(e) => error_response(&e),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "quiz-night",
    })
}

#[get("/api/session")]
async fn api_get_session(state: AppState) -> HttpResponse {
    match state.read() {
        Ok(g) => session_response(&g),
        Err(_) => lock_error(),
    }
}

/// Register teams (8 to 10 non-empty names).
#[post("/api/teams")]
async fn api_initialize_teams(state: AppState, body: Json<TeamsBody>) -> HttpResponse {
    command(&state, |e| e.initialize_teams(&body.names))
}

/// Forget the saved game and return to an empty setup.
#[post("/api/reset")]
async fn api_reset(state: AppState, timer: TimerTask) -> HttpResponse {
    stop_ticker(&timer);
    command(&state, |e| {
        e.discard_saved_game();
        Ok(())
    })
}

/// A failed start leaves the clock (and its ticker) as it was.
#[post("/api/game/start")]
async fn api_start_game(state: AppState, timer: TimerTask) -> HttpResponse {
    let resp = command(&state, |e| e.start_game());
    if resp.status().is_success() {
        stop_ticker(&timer);
    }
    resp
}

/// Teams that may still be picked this round.
#[get("/api/pairing/candidates")]
async fn api_pair_candidates(state: AppState) -> HttpResponse {
    match state.read() {
        Ok(g) => HttpResponse::Ok().json(g.available_pair_candidates()),
        Err(_) => lock_error(),
    }
}

/// Pick the next two teams; draws their first question.
#[post("/api/pairing")]
async fn api_select_teams(state: AppState, body: Json<SelectTeamsBody>) -> HttpResponse {
    command(&state, |e| e.select_teams(&body.team_ids))
}

#[post("/api/question/reveal")]
async fn api_reveal_answer(state: AppState, body: Json<RevealBody>) -> HttpResponse {
    command(&state, |e| e.reveal_answer(body.index).map(|_| ()))
}

/// Give an answer to a team. Each answer scores for one team at most; giving it to another
/// team moves the points.
#[post("/api/score")]
async fn api_assign_answer(state: AppState, body: Json<AssignAnswerBody>) -> HttpResponse {
    command(&state, |e| e.assign_answer(body.index, body.team_id).map(|_| ()))
}

#[post("/api/question/next")]
async fn api_next_question(state: AppState) -> HttpResponse {
    command(&state, |e| e.advance_question())
}

#[post("/api/match/complete")]
async fn api_complete_match(state: AppState) -> HttpResponse {
    command(&state, |e| e.complete_match())
}

/// Show a bonus question; no change when the bonus pool is used up.
#[post("/api/bonus")]
async fn api_bonus_question(state: AppState) -> HttpResponse {
    command(&state, |e| {
        e.draw_bonus_question();
        Ok(())
    })
}

/// Rank teams and mark who advances.
#[post("/api/results")]
async fn api_round_results(state: AppState) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.compute_round_results() {
        Ok(standings) => HttpResponse::Ok().json(ResultsView {
            standings,
            advancing_team_ids: g.session().advancing.clone(),
            all_pairs_completed: g.all_pairs_completed_for_round(),
        }),
        Err(e) => error_response(&e),
    }
}

/// A refused advancement leaves the session, running clock included, untouched.
#[post("/api/round/advance")]
async fn api_advance_round(state: AppState, timer: TimerTask) -> HttpResponse {
    let resp = command(&state, |e| e.advance_round());
    if resp.status().is_success() {
        stop_ticker(&timer);
    }
    resp
}

/// Current standings, or the final ones once the game is over.
#[get("/api/standings")]
async fn api_standings(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let session = g.session();
    let standings = if session.final_standings.is_empty() {
        session.standings()
    } else {
        session.final_standings.clone()
    };
    HttpResponse::Ok().json(StandingsView {
        standings,
        winner: session.winner(),
    })
}

#[post("/api/timer/start")]
async fn api_timer_start(state: AppState, timer: TimerTask) -> HttpResponse {
    let running = match state.write() {
        Ok(mut g) => {
            g.start_timer();
            g.session().timer.running
        }
        Err(_) => return lock_error(),
    };
    if running {
        let mut task = match timer.lock() {
            Ok(guard) => guard,
            Err(_) => return lock_error(),
        };
        if let Some(old) = task.take() {
            old.abort();
        }
        *task = Some(spawn_ticker(state.clone()));
    }
    command(&state, |_| Ok(()))
}

#[post("/api/timer/stop")]
async fn api_timer_stop(state: AppState, timer: TimerTask) -> HttpResponse {
    stop_ticker(&timer);
    command(&state, |e| {
        e.stop_timer();
        Ok(())
    })
}

#[post("/api/timer/reset")]
async fn api_timer_reset(state: AppState, timer: TimerTask) -> HttpResponse {
    stop_ticker(&timer);
    command(&state, |e| {
        e.reset_timer();
        Ok(())
    })
}

/// Tick the countdown once per second until it stops by itself or the task is aborted.
fn spawn_ticker(state: AppState) -> JoinHandle<()> {
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(1));
        // The first tick completes immediately.
        interval.tick().await;
        loop {
            interval.tick().await;
            let mut g = match state.write() {
                Ok(guard) => guard,
                Err(_) => break,
            };
            if !g.tick_timer() {
                log::info!("Timer stopped at {}s", g.session().timer.seconds);
                break;
            }
        }
    })
}

fn stop_ticker(timer: &TimerTask) {
    if let Ok(mut task) = timer.lock() {
        if let Some(handle) = task.take() {
            handle.abort();
        }
    }
}

fn api_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(api_health)
        .service(api_get_session)
        .service(api_initialize_teams)
        .service(api_reset)
        .service(api_start_game)
        .service(api_pair_candidates)
        .service(api_select_teams)
        .service(api_reveal_answer)
        .service(api_assign_answer)
        .service(api_next_question)
        .service(api_complete_match)
        .service(api_bonus_question)
        .service(api_round_results)
        .service(api_advance_round)
        .service(api_standings)
        .service(api_timer_start)
        .service(api_timer_stop)
        .service(api_timer_reset);
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn io_error(e: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let data_dir = env_or("QUIZ_DATA_DIR", "data/state");
    let questions_csv = env_or("QUESTIONS_CSV", "data/questions.csv");
    let bonus_csv = env_or("BONUS_CSV", "data/bonus.csv");
    let static_dir = env_or("STATIC_DIR", "static");

    let main_pool = load_questions(&questions_csv).map_err(io_error)?;
    let bonus_pool = load_questions(&bonus_csv).map_err(io_error)?;
    log::info!(
        "Loaded {} questions and {} bonus questions",
        main_pool.len(),
        bonus_pool.len()
    );
    let store = FileStore::open(&data_dir).map_err(io_error)?;
    let engine = Engine::resume(store, main_pool, bonus_pool);

    let state = Data::new(RwLock::new(engine));
    let timer: TimerTask = Data::new(Mutex::new(None));
    let serve_static = std::path::Path::new(&static_dir).is_dir();

    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        let static_dir = static_dir.clone();
        App::new()
            .app_data(state.clone())
            .app_data(timer.clone())
            .configure(api_routes)
            .configure(move |cfg: &mut web::ServiceConfig| {
                if serve_static {
                    cfg.service(Files::new("/", static_dir).index_file("index.html"));
                }
            })
    })
    .bind(bind)?
    .run()
    .await
}
