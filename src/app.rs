use axum::{
    Json, Router,
    extract::{Multipart, Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use handlebars::Handlebars;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::net::TcpListener;

use crate::card::{CardForm, VocabularyCard, WordFilter};
use crate::config::ServerConfig;
use crate::downloader::SheetFormat;
use crate::error::{ExportError, SessionError};
use crate::print;
use crate::session::{Session, SessionEvent, SessionView};

pub struct AppState {
    session: Mutex<Session>,
    templates: Handlebars<'static>,
}

impl AppState {
    pub fn new(session: Session) -> Result<Self, ExportError> {
        Ok(AppState {
            session: Mutex::new(session),
            templates: print::templates()?,
        })
    }

    /// Locks the session; a poisoned lock still holds a consistent session
    /// because every operation validates before it mutates.
    fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[derive(Deserialize)]
struct FilterRequest {
    filter: WordFilter,
}

#[derive(Deserialize)]
struct ConfirmRequest {
    confirmed: bool,
}

#[derive(Deserialize)]
struct ExportQuery {
    format: Option<String>,
}

#[derive(Serialize)]
struct EventView {
    kind: &'static str,
    message: String,
}

impl From<&SessionEvent> for EventView {
    fn from(event: &SessionEvent) -> Self {
        let kind = match event {
            SessionEvent::ConfirmationNeeded(_) => "confirm",
            SessionEvent::Notify(notice) if notice.is_error() => "error",
            SessionEvent::Notify(_) => "notice",
        };
        EventView {
            kind,
            message: event.message(),
        }
    }
}

#[derive(Serialize)]
struct ApiResponse {
    status: String,
    message: Option<String>,
    events: Vec<EventView>,
    session: SessionView,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(serve_index))
        .route("/print", get(serve_print))
        .route("/api/session", get(get_session))
        .route("/api/filter", post(set_filter))
        .route("/api/next", post(next_card))
        .route("/api/previous", post(previous_card))
        .route("/api/reveal", post(reveal_card))
        .route("/api/cards", post(add_card))
        .route("/api/delete", post(request_delete))
        .route("/api/confirm", post(confirm))
        .route("/api/export", get(export_cards))
        .route("/api/import", post(import_cards))
        .with_state(state)
}

pub async fn run(config: &ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let app_state = Arc::new(AppState::new(Session::default())?);
    let app = router(app_state);

    let listener = TcpListener::bind(config.bind).await?;
    info!("Listening on http://{}", config.bind);
    axum::serve(listener, app).await?;

    Ok(())
}

fn status_for(err: &SessionError) -> StatusCode {
    match err {
        SessionError::ConfirmationPending | SessionError::NoPendingConfirmation => {
            StatusCode::CONFLICT
        }
        SessionError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_REQUEST,
    }
}

/// Wraps an operation result together with drained events and a fresh view
fn reply(session: &mut Session, result: Result<(), SessionError>) -> Response {
    let (code, status, message) = match result {
        Ok(()) => (StatusCode::OK, "ok", None),
        Err(e) => {
            warn!("Request failed: {}", e);
            (status_for(&e), "error", Some(e.to_string()))
        }
    };
    let events = session.take_events().iter().map(EventView::from).collect();

    let body = ApiResponse {
        status: status.to_string(),
        message,
        events,
        session: session.view(),
    };
    (code, Json(body)).into_response()
}

async fn serve_index() -> Html<&'static str> {
    Html(include_str!("static/index.html"))
}

async fn serve_print(State(state): State<Arc<AppState>>) -> Response {
    let session = state.session();
    let cards = print::print_cards(session.filtered().iter().map(|entry| entry.card));

    match print::render_html(&state.templates, &session.filter().to_string(), &cards) {
        Ok(html) => Html(html).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

async fn get_session(State(state): State<Arc<AppState>>) -> Json<SessionView> {
    Json(state.session().view())
}

async fn set_filter(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<FilterRequest>,
) -> Response {
    let mut session = state.session();
    let result = session.set_filter(payload.filter);
    reply(&mut session, result)
}

async fn next_card(State(state): State<Arc<AppState>>) -> Response {
    let mut session = state.session();
    let result = session.next();
    reply(&mut session, result)
}

async fn previous_card(State(state): State<Arc<AppState>>) -> Response {
    let mut session = state.session();
    let result = session.previous();
    reply(&mut session, result)
}

async fn reveal_card(State(state): State<Arc<AppState>>) -> Response {
    let mut session = state.session();
    let result = session.reveal();
    reply(&mut session, result)
}

async fn add_card(State(state): State<Arc<AppState>>, Json(form): Json<CardForm>) -> Response {
    let mut session = state.session();
    let result = session.add_card(VocabularyCard::from(form));
    reply(&mut session, result)
}

async fn request_delete(State(state): State<Arc<AppState>>) -> Response {
    let mut session = state.session();
    let result = session.request_delete().map(|_| ());
    reply(&mut session, result)
}

async fn confirm(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ConfirmRequest>,
) -> Response {
    let mut session = state.session();
    let result = session.respond(payload.confirmed).map(|_| ());
    reply(&mut session, result)
}

async fn export_cards(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ExportQuery>,
) -> Response {
    let format = match SheetFormat::from_extension(query.format.as_deref().unwrap_or("xlsx")) {
        Ok(format) => format,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };

    let session = state.session();
    match session.export(format, Utc::now().date_naive()) {
        Ok(file) => {
            let headers = [
                (header::CONTENT_TYPE, file.format.content_type().to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", file.filename),
                ),
            ];
            (headers, file.bytes).into_response()
        }
        Err(e) => {
            warn!("Export failed: {}", e);
            (status_for(&e), e.to_string()).into_response()
        }
    }
}

async fn import_cards(State(state): State<Arc<AppState>>, mut multipart: Multipart) -> Response {
    let mut upload: Option<(String, Vec<u8>)> = None;

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                if field.name() != Some("file") {
                    continue;
                }
                let filename = field.file_name().unwrap_or_default().to_string();
                match field.bytes().await {
                    Ok(bytes) => upload = Some((filename, bytes.to_vec())),
                    Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
                }
            }
            Ok(None) => break,
            Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
        }
    }

    let Some((filename, bytes)) = upload else {
        return (StatusCode::BAD_REQUEST, "No file data received").into_response();
    };
    info!("Received {} ({} bytes) for import", filename, bytes.len());

    let mut session = state.session();
    let result = session.import_named(&filename, &bytes).map(|_| ());
    reply(&mut session, result)
}
