//! JSON web host for the bracket engine.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT (see `ServerConfig`).

use actix_web::{
    get, post, put,
    web::{Bytes, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use bracket_engine::config::ServerConfig;
use bracket_engine::records::{changed_matches, tournament_record, MatchRecord, TournamentRecord};
use bracket_engine::roster::parse_roster;
use bracket_engine::store::{MemoryStore, StoreError, Transition};
use bracket_engine::{
    apply_result, compute_progress, finalize, generate, is_ready_to_finalize, playable_matches,
    summarize_history, validate_participant_count, MatchId, MatchPosition, Participant,
    ParticipantId, Tournament, TournamentError, TournamentId, TournamentProgress,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

type AppState = Data<MemoryStore>;
type AppConfig = Data<ServerConfig>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    participants: Vec<Participant>,
}

#[derive(Deserialize)]
struct ScoreBody {
    scores: [u32; 2],
    /// Version the client last saw; omitted to skip the staleness check.
    #[serde(default)]
    version: Option<u64>,
}

#[derive(Deserialize)]
struct FinalizeBody {
    winner_id: ParticipantId,
    #[serde(default)]
    version: Option<u64>,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and match id
#[derive(Deserialize)]
struct TournamentMatchPath {
    id: TournamentId,
    match_id: MatchId,
}

#[derive(Serialize)]
struct TournamentResponse<'a> {
    tournament: &'a Tournament,
    version: u64,
}

#[derive(Serialize)]
struct ScoreResponse<'a> {
    tournament: &'a Tournament,
    version: u64,
    /// Match rows the persistence layer must write.
    changed: Vec<MatchRecord>,
    ready_to_finalize: bool,
}

#[derive(Serialize)]
struct FinalizeResponse<'a> {
    tournament: &'a Tournament,
    version: u64,
    record: TournamentRecord,
}

#[derive(Serialize)]
struct ProgressResponse {
    progress: TournamentProgress,
    ready_to_finalize: bool,
    playable: Vec<MatchPosition>,
}

fn error_response(e: &StoreError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        StoreError::NotFound(_) | StoreError::Tournament(TournamentError::MatchNotFound(_)) => {
            HttpResponse::NotFound().json(body)
        }
        StoreError::VersionConflict { .. } => HttpResponse::Conflict().json(body),
        StoreError::LockPoisoned => HttpResponse::InternalServerError().json(body),
        StoreError::Tournament(_) => HttpResponse::BadRequest().json(body),
    }
}

/// Validate the roster size, generate the bracket and store it.
fn create_from_roster(
    state: &MemoryStore,
    config: &ServerConfig,
    participants: &[Participant],
) -> HttpResponse {
    let generated = validate_participant_count(
        participants.len(),
        config.min_participants,
        config.max_participants,
    )
    .and_then(|()| generate(participants));
    let tournament = match generated {
        Ok(t) => t,
        Err(e) => return error_response(&StoreError::Tournament(e)),
    };
    match state.insert(tournament) {
        Ok(stored) => {
            log::info!(
                "Created tournament {} with {} participants",
                stored.tournament.id,
                participants.len()
            );
            HttpResponse::Ok().json(TournamentResponse {
                tournament: &stored.tournament,
                version: stored.version,
            })
        }
        Err(e) => error_response(&e),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "bracket-engine",
    })
}

/// Create a tournament from a JSON participant list.
#[post("/api/tournaments")]
async fn api_create_tournament(
    state: AppState,
    config: AppConfig,
    body: Json<CreateTournamentBody>,
) -> HttpResponse {
    create_from_roster(&state, &config, &body.participants)
}

/// Create a tournament from a CSV roster (`id,name,avatar`).
#[post("/api/tournaments/import")]
async fn api_import_tournament(state: AppState, config: AppConfig, body: Bytes) -> HttpResponse {
    match parse_roster(&body[..]) {
        Ok(participants) => create_from_roster(&state, &config, &participants),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// All tournaments, newest first.
#[get("/api/tournaments")]
async fn api_list_tournaments(state: AppState) -> HttpResponse {
    match state.list() {
        Ok(all) => HttpResponse::Ok().json(all),
        Err(e) => error_response(&e),
    }
}

/// History dashboard numbers across all stored tournaments.
#[get("/api/tournaments/stats")]
async fn api_history_stats(state: AppState) -> HttpResponse {
    match state.list() {
        Ok(all) => HttpResponse::Ok().json(summarize_history(&all)),
        Err(e) => error_response(&e),
    }
}

#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    match state.get(path.id) {
        Ok(stored) => HttpResponse::Ok().json(TournamentResponse {
            tournament: &stored.tournament,
            version: stored.version,
        }),
        Err(e) => error_response(&e),
    }
}

#[get("/api/tournaments/{id}/progress")]
async fn api_get_progress(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    match state.get(path.id) {
        Ok(stored) => HttpResponse::Ok().json(ProgressResponse {
            progress: compute_progress(&stored.tournament),
            ready_to_finalize: is_ready_to_finalize(&stored.tournament),
            playable: playable_matches(&stored.tournament),
        }),
        Err(e) => error_response(&e),
    }
}

/// Submit a match score; the winner moves into the next round.
#[put("/api/tournaments/{id}/matches/{match_id}/score")]
async fn api_submit_score(
    state: AppState,
    path: Path<TournamentMatchPath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    let result = state.update(path.id, body.version, |t| {
        apply_result(t, path.match_id, body.scores)
    });
    match result {
        Ok(Transition {
            previous,
            current,
            version,
        }) => HttpResponse::Ok().json(ScoreResponse {
            changed: changed_matches(&previous, &current),
            ready_to_finalize: is_ready_to_finalize(&current),
            tournament: &current,
            version,
        }),
        Err(e) => error_response(&e),
    }
}

/// Declare the winner and complete the tournament.
#[post("/api/tournaments/{id}/finalize")]
async fn api_finalize(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<FinalizeBody>,
) -> HttpResponse {
    match state.update(path.id, body.version, |t| finalize(t, body.winner_id)) {
        Ok(transition) => HttpResponse::Ok().json(FinalizeResponse {
            record: tournament_record(&transition.current),
            tournament: &transition.current,
            version: transition.version,
        }),
        Err(e) => error_response(&e),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(MemoryStore::new());
    let config = Data::new(config);

    // Background task: periodically remove tournaments nobody has touched for a while
    let state_cleanup = state.clone();
    let timeout = config.inactivity_timeout;
    let every = config.cleanup_interval.max(Duration::from_secs(1));
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(every);
        loop {
            interval.tick().await;
            if let Err(e) = state_cleanup.evict_inactive(timeout) {
                log::warn!("Cleanup skipped: {}", e);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(config.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_import_tournament)
            .service(api_list_tournaments)
            .service(api_history_stats)
            .service(api_get_tournament)
            .service(api_get_progress)
            .service(api_submit_score)
            .service(api_finalize)
    })
    .bind(bind)?
    .run()
    .await
}
