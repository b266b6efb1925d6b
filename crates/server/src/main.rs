// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    error_handling::HandleErrorLayer,
    extract::{DefaultBodyLimit, Multipart, Path, Query, State as AxumState},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use shatranj_api::handlers::{
    confirm_certificate, create_tournament, delete_tournament, get_all_tournaments,
    get_next_tournament, get_open_tournaments, get_registration, get_registrations,
    get_tournament, login, logout, set_next_tournament, submit_registration, update_tournament,
    validate_submission, verify_certificate,
};
use shatranj_api::{
    AllTournamentsResponse, ApiError, AuthenticationService, ConfirmCertificateResponse,
    CreateTournamentResponse, DeleteTournamentResponse, GetRegistrationResponse,
    GetTournamentResponse, ListRegistrationsResponse, LoginRequest, LoginResponse,
    LogoutResponse, NextTournamentResponse, OpenTournamentsResponse, SetNextTournamentResponse,
    SubmitRegistrationResponse, TournamentRequest, UpdateTournamentResponse,
    VerifyCertificateResponse,
};
use shatranj_domain::{ReceiptUpload, RegistrationSubmission, normalize_digits};
use shatranj_persistence::Persistence;
use tokio::sync::Mutex;
use tower::{BoxError, ServiceBuilder, buffer::BufferLayer, limit::RateLimitLayer};
use tracing::{error, info, warn};

mod session;
mod upload;

use session::AdminSession;

/// Most registration submissions allowed per rate window, process wide.
const SUBMISSION_RATE_LIMIT: u64 = 10;

/// Length of the submission rate window.
const SUBMISSION_RATE_WINDOW: Duration = Duration::from_secs(60);

/// Requests buffered ahead of the submission rate limiter.
const RATE_LIMIT_BUFFER: usize = 64;

/// Request body ceiling for submissions. Receipts max out at 10 MiB and
/// the multipart framing needs headroom on top.
const RECEIPT_BODY_LIMIT: usize = 12 * 1024 * 1024;

/// Shatranj Server - HTTP server for the Shatranj tournament service
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses the
    /// `DATABASE_URL` environment variable, then in-memory storage.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Directory where receipt uploads are stored
    #[arg(short, long, default_value = "uploads")]
    uploads_dir: String,
}

/// Application state shared across handlers.
///
/// The registration store and the authentication service each sit
/// behind a Mutex; handlers hold a lock only for the call itself.
#[derive(Clone)]
struct AppState {
    /// The registration store.
    persistence: Arc<Mutex<Persistence>>,
    /// Administrator credential and session checks.
    auth: Arc<Mutex<AuthenticationService>>,
    /// Root directory for receipt uploads.
    uploads_dir: Arc<PathBuf>,
}

/// API request for creating a tournament or replacing one wholesale.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct TournamentApiRequest {
    /// Display name of the tournament.
    name: String,
    /// Scheduled date as an RFC 3339 instant.
    date: String,
    /// Free-form display time, e.g. "9:00 AM".
    time: String,
    /// Whether the tournament accepts registrations.
    is_open: bool,
    /// Street address of the venue.
    venue_address: String,
    /// Extra directions for finding the venue.
    venue_info: Option<String>,
    /// Display text for the entry fee.
    registration_fee: String,
}

/// API request for administrator login.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct LoginApiRequest {
    /// Administrator account name.
    username: String,
    /// Administrator password.
    password: String,
}

/// API request for designating the featured upcoming tournament.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct SetNextTournamentApiRequest {
    /// The tournament to feature.
    tournament_id: i64,
}

/// Query parameters for listing all tournaments.
#[derive(Debug, Deserialize)]
struct AllTournamentsQuery {
    /// Optional RFC 3339 lower bound on the tournament date.
    from: Option<String>,
}

/// Query parameters for listing registrations.
#[derive(Debug, Deserialize)]
struct RegistrationsQuery {
    /// Optional tournament filter.
    tournament_id: Option<i64>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
    /// One entry per violated form rule, for validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<String>>,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
    /// Validation rule messages, when applicable.
    errors: Option<Vec<String>>,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
            errors: self.errors,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::AuthenticationFailed { .. } => Self {
                status: StatusCode::UNAUTHORIZED,
                message: err.to_string(),
                errors: None,
            },
            ApiError::ValidationFailed { errors } => Self {
                status: StatusCode::BAD_REQUEST,
                message: String::from("Validation failed"),
                errors: Some(errors),
            },
            ApiError::InvalidInput { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
                errors: None,
            },
            ApiError::ResourceNotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
                errors: None,
            },
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: err.to_string(),
                    errors: None,
                }
            }
        }
    }
}

fn bad_multipart(err: axum::extract::multipart::MultipartError) -> HttpError {
    HttpError {
        status: StatusCode::BAD_REQUEST,
        message: format!("Malformed multipart body: {err}"),
        errors: None,
    }
}

/// Converts a wire tournament payload into the API layer request.
fn to_tournament_request(req: TournamentApiRequest) -> TournamentRequest {
    TournamentRequest {
        name: req.name,
        date: req.date,
        time: req.time,
        is_open: req.is_open,
        venue_address: req.venue_address,
        venue_info: req.venue_info,
        registration_fee: req.registration_fee,
    }
}

/// Handler for POST /login endpoint.
async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<LoginApiRequest>,
) -> Result<Json<LoginResponse>, HttpError> {
    info!(username = %req.username, "Handling login request");

    let request: LoginRequest = LoginRequest {
        username: req.username,
        password: req.password,
    };

    let mut auth = app_state.auth.lock().await;
    let response: LoginResponse = login(&mut auth, &request)?;
    drop(auth);

    Ok(Json(response))
}

/// Handler for POST /logout endpoint.
async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
    session: AdminSession,
) -> Json<LogoutResponse> {
    info!("Handling logout request");

    let mut auth = app_state.auth.lock().await;
    let response: LogoutResponse = logout(&mut auth, &session.0);
    drop(auth);

    Json(response)
}

/// Handler for GET `/tournaments/open` endpoint.
///
/// Lists tournaments currently accepting registrations.
async fn handle_get_open_tournaments(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<OpenTournamentsResponse>, HttpError> {
    info!("Handling open tournaments request");

    let mut persistence = app_state.persistence.lock().await;
    let response: OpenTournamentsResponse = get_open_tournaments(&mut persistence)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/tournaments/next` endpoint.
///
/// Returns the featured upcoming tournament, or null when none is set.
async fn handle_get_next_tournament(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<NextTournamentResponse>, HttpError> {
    info!("Handling next tournament request");

    let mut persistence = app_state.persistence.lock().await;
    let response: NextTournamentResponse = get_next_tournament(&mut persistence)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/tournaments/{tournament_id}` endpoint.
async fn handle_get_tournament(
    AxumState(app_state): AxumState<AppState>,
    Path(tournament_id): Path<i64>,
) -> Result<Json<GetTournamentResponse>, HttpError> {
    info!(tournament_id = tournament_id, "Handling get tournament request");

    let mut persistence = app_state.persistence.lock().await;
    let response: GetTournamentResponse = get_tournament(&mut persistence, tournament_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET /tournaments endpoint.
///
/// Lists every tournament for the administrator.
async fn handle_get_all_tournaments(
    AxumState(app_state): AxumState<AppState>,
    _session: AdminSession,
    Query(query): Query<AllTournamentsQuery>,
) -> Result<Json<AllTournamentsResponse>, HttpError> {
    info!(from = ?query.from, "Handling all tournaments request");

    let mut persistence = app_state.persistence.lock().await;
    let response: AllTournamentsResponse =
        get_all_tournaments(&mut persistence, query.from.as_deref())?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST /tournaments endpoint.
async fn handle_create_tournament(
    AxumState(app_state): AxumState<AppState>,
    _session: AdminSession,
    Json(req): Json<TournamentApiRequest>,
) -> Result<Json<CreateTournamentResponse>, HttpError> {
    info!(name = %req.name, "Handling create tournament request");

    let request: TournamentRequest = to_tournament_request(req);

    let mut persistence = app_state.persistence.lock().await;
    let response: CreateTournamentResponse = create_tournament(&mut persistence, &request)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for PUT `/tournaments/{tournament_id}` endpoint.
async fn handle_update_tournament(
    AxumState(app_state): AxumState<AppState>,
    _session: AdminSession,
    Path(tournament_id): Path<i64>,
    Json(req): Json<TournamentApiRequest>,
) -> Result<Json<UpdateTournamentResponse>, HttpError> {
    info!(
        tournament_id = tournament_id,
        "Handling update tournament request"
    );

    let request: TournamentRequest = to_tournament_request(req);

    let mut persistence = app_state.persistence.lock().await;
    let response: UpdateTournamentResponse =
        update_tournament(&mut persistence, tournament_id, &request)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for DELETE `/tournaments/{tournament_id}` endpoint.
///
/// Removes the tournament together with its registrations.
async fn handle_delete_tournament(
    AxumState(app_state): AxumState<AppState>,
    _session: AdminSession,
    Path(tournament_id): Path<i64>,
) -> Result<Json<DeleteTournamentResponse>, HttpError> {
    info!(
        tournament_id = tournament_id,
        "Handling delete tournament request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: DeleteTournamentResponse = delete_tournament(&mut persistence, tournament_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for PUT `/tournaments/next` endpoint.
async fn handle_set_next_tournament(
    AxumState(app_state): AxumState<AppState>,
    _session: AdminSession,
    Json(req): Json<SetNextTournamentApiRequest>,
) -> Result<Json<SetNextTournamentResponse>, HttpError> {
    info!(
        tournament_id = req.tournament_id,
        "Handling set next tournament request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: SetNextTournamentResponse =
        set_next_tournament(&mut persistence, req.tournament_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST /registrations endpoint.
///
/// Consumes a multipart form: the text fields of the registration plus
/// the receipt file. The receipt is written to disk only after the
/// submission passes validation, and removed again if the store rejects
/// the write.
async fn handle_submit_registration(
    AxumState(app_state): AxumState<AppState>,
    mut multipart: Multipart,
) -> Result<Json<SubmitRegistrationResponse>, HttpError> {
    info!("Handling registration submission");

    let mut submission: RegistrationSubmission = RegistrationSubmission::default();
    let mut receipt_file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let Some(name) = field.name().map(ToString::to_string) else {
            continue;
        };
        match name.as_str() {
            "tournament_id" => {
                let value: String = field.text().await.map_err(bad_multipart)?;
                submission.tournament_id = normalize_digits(value.trim()).parse::<i64>().ok();
            }
            "name" => submission.name = field.text().await.map_err(bad_multipart)?,
            "phone" => submission.phone = field.text().await.map_err(bad_multipart)?,
            "email" => submission.email = field.text().await.map_err(bad_multipart)?,
            "year_of_birth" => {
                submission.year_of_birth = field.text().await.map_err(bad_multipart)?;
            }
            "description" => {
                submission.description = Some(field.text().await.map_err(bad_multipart)?);
            }
            "agreed_tos" => {
                let value: String = field.text().await.map_err(bad_multipart)?;
                submission.agreed_tos = matches!(value.trim(), "true" | "on" | "1");
            }
            "receipt" => {
                let mime_type: String = field
                    .content_type()
                    .map(ToString::to_string)
                    .unwrap_or_default();
                let bytes = field.bytes().await.map_err(bad_multipart)?;
                submission.receipt = Some(ReceiptUpload {
                    mime_type: mime_type.clone(),
                    size_bytes: u64::try_from(bytes.len()).unwrap_or(u64::MAX),
                });
                receipt_file = Some((mime_type, bytes.to_vec()));
            }
            _ => {}
        }
    }

    // Validate before touching the filesystem so a rejected form leaves
    // nothing behind.
    let mut persistence = app_state.persistence.lock().await;
    validate_submission(&mut persistence, &submission)?;
    drop(persistence);

    let Some((mime_type, bytes)) = receipt_file else {
        return Err(HttpError {
            status: StatusCode::BAD_REQUEST,
            message: String::from("Validation failed"),
            errors: Some(vec![String::from("A payment receipt file is required.")]),
        });
    };

    let receipt_path: String = upload::store_receipt(&app_state.uploads_dir, &mime_type, &bytes)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to store receipt upload");
            HttpError {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: String::from("Failed to store the receipt file"),
                errors: None,
            }
        })?;

    let mut persistence = app_state.persistence.lock().await;
    let result: Result<SubmitRegistrationResponse, ApiError> =
        submit_registration(&mut persistence, &submission, receipt_path.clone());
    drop(persistence);

    match result {
        Ok(response) => Ok(Json(response)),
        Err(err) => {
            upload::discard_receipt(&app_state.uploads_dir, &receipt_path).await;
            Err(HttpError::from(err))
        }
    }
}

/// Handler for GET `/certificates/{certificate_id}` endpoint.
///
/// Public lookup; the response carries no contact details.
async fn handle_verify_certificate(
    AxumState(app_state): AxumState<AppState>,
    Path(certificate_id): Path<String>,
) -> Result<Json<VerifyCertificateResponse>, HttpError> {
    info!("Handling certificate verification request");

    let mut persistence = app_state.persistence.lock().await;
    let response: VerifyCertificateResponse =
        verify_certificate(&mut persistence, &certificate_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET /registrations endpoint.
async fn handle_list_registrations(
    AxumState(app_state): AxumState<AppState>,
    _session: AdminSession,
    Query(query): Query<RegistrationsQuery>,
) -> Result<Json<ListRegistrationsResponse>, HttpError> {
    info!(
        tournament_id = ?query.tournament_id,
        "Handling list registrations request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: ListRegistrationsResponse =
        get_registrations(&mut persistence, query.tournament_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/registrations/{registration_id}` endpoint.
async fn handle_get_registration(
    AxumState(app_state): AxumState<AppState>,
    _session: AdminSession,
    Path(registration_id): Path<i64>,
) -> Result<Json<GetRegistrationResponse>, HttpError> {
    info!(
        registration_id = registration_id,
        "Handling get registration request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: GetRegistrationResponse = get_registration(&mut persistence, registration_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/registrations/{registration_id}/confirm` endpoint.
async fn handle_confirm_certificate(
    AxumState(app_state): AxumState<AppState>,
    _session: AdminSession,
    Path(registration_id): Path<i64>,
) -> Result<Json<ConfirmCertificateResponse>, HttpError> {
    info!(
        registration_id = registration_id,
        "Handling confirm certificate request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: ConfirmCertificateResponse =
        confirm_certificate(&mut persistence, registration_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/registrations/{registration_id}/receipt` endpoint.
///
/// Streams the stored receipt file back to the administrator.
async fn handle_download_receipt(
    AxumState(app_state): AxumState<AppState>,
    _session: AdminSession,
    Path(registration_id): Path<i64>,
) -> Result<Response, HttpError> {
    info!(
        registration_id = registration_id,
        "Handling receipt download request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let registration = get_registration(&mut persistence, registration_id)?.registration;
    drop(persistence);

    let bytes: Vec<u8> = upload::read_receipt(&app_state.uploads_dir, &registration.receipt_path)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to read receipt file");
            if e.kind() == ErrorKind::NotFound {
                HttpError {
                    status: StatusCode::NOT_FOUND,
                    message: String::from("Receipt file not found"),
                    errors: None,
                }
            } else {
                HttpError {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: String::from("Failed to read the receipt file"),
                    errors: None,
                }
            }
        })?;

    let content_type: &str = upload::content_type_for(&registration.receipt_path);
    Ok(([(header::CONTENT_TYPE, content_type)], bytes).into_response())
}

/// Fallback for submissions refused by the rate limiter.
async fn handle_rate_limited(err: BoxError) -> (StatusCode, String) {
    (
        StatusCode::TOO_MANY_REQUESTS,
        format!("Too many registration attempts, try again shortly: {err}"),
    )
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    // Submission posts share one process-wide rate limit.
    let submit_route = post(handle_submit_registration)
        .layer::<_, std::convert::Infallible>(DefaultBodyLimit::max(RECEIPT_BODY_LIMIT))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_rate_limited))
                .layer(BufferLayer::new(RATE_LIMIT_BUFFER))
                .layer(RateLimitLayer::new(
                    SUBMISSION_RATE_LIMIT,
                    SUBMISSION_RATE_WINDOW,
                )),
        );

    Router::new()
        .route("/login", post(handle_login))
        .route("/logout", post(handle_logout))
        .route("/tournaments", post(handle_create_tournament))
        .route("/tournaments", get(handle_get_all_tournaments))
        .route("/tournaments/open", get(handle_get_open_tournaments))
        .route("/tournaments/next", get(handle_get_next_tournament))
        .route("/tournaments/next", put(handle_set_next_tournament))
        .route("/tournaments/{tournament_id}", get(handle_get_tournament))
        .route("/tournaments/{tournament_id}", put(handle_update_tournament))
        .route(
            "/tournaments/{tournament_id}",
            delete(handle_delete_tournament),
        )
        .route("/registrations", submit_route)
        .route("/registrations", get(handle_list_registrations))
        .route(
            "/registrations/{registration_id}",
            get(handle_get_registration),
        )
        .route(
            "/registrations/{registration_id}/confirm",
            post(handle_confirm_certificate),
        )
        .route(
            "/registrations/{registration_id}/receipt",
            get(handle_download_receipt),
        )
        .route(
            "/certificates/{certificate_id}",
            get(handle_verify_certificate),
        )
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Shatranj server");

    // Initialize the store (CLI flag wins over the environment)
    let database_path: Option<String> = args
        .database
        .clone()
        .or_else(|| std::env::var("DATABASE_URL").ok());
    let persistence: Persistence = if let Some(db_path) = &database_path {
        info!("Using file-based database at: {}", db_path);
        Persistence::from_database_path(Some(db_path))
    } else {
        info!("Using in-memory storage");
        Persistence::new_in_memory()
    };

    // The administrator account comes from the environment
    let admin_username: String =
        std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| String::from("admin"));
    let admin_password: String = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
        warn!("ADMIN_PASSWORD is not set; using the default password");
        String::from("admin")
    });
    let auth: AuthenticationService = AuthenticationService::new(&admin_username, &admin_password)?;

    // Receipt uploads directory
    tokio::fs::create_dir_all(&args.uploads_dir).await?;
    info!("Storing receipt uploads in {}", args.uploads_dir);

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        auth: Arc::new(Mutex::new(auth)),
        uploads_dir: Arc::new(PathBuf::from(&args.uploads_dir)),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    const TEST_BOUNDARY: &str = "shatranj-test-boundary";

    const FAKE_JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46];

    /// Helper to create test app state with in-memory storage.
    fn create_test_app_state() -> AppState {
        let auth: AuthenticationService = AuthenticationService::new("admin", "test-password")
            .expect("Failed to build authentication service");
        let uploads_dir: PathBuf =
            std::env::temp_dir().join(format!("shatranj-server-test-{}", rand::random::<u64>()));
        AppState {
            persistence: Arc::new(Mutex::new(Persistence::new_in_memory())),
            auth: Arc::new(Mutex::new(auth)),
            uploads_dir: Arc::new(uploads_dir),
        }
    }

    fn test_app() -> Router {
        build_router(create_test_app_state())
    }

    async fn response_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn send_get(app: &Router, uri: &str, token: Option<&str>) -> Response {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        app.clone()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn send_delete(app: &Router, uri: &str, token: &str) -> Response {
        app.clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(uri)
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn send_json(
        app: &Router,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: &Value,
    ) -> Response {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        app.clone()
            .oneshot(builder.body(Body::from(body.to_string())).unwrap())
            .await
            .unwrap()
    }

    async fn login_token(app: &Router) -> String {
        let response = send_json(
            app,
            "POST",
            "/login",
            None,
            &json!({"username": "admin", "password": "test-password"}),
        )
        .await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        let body: Value = response_json(response).await;
        body["token"].as_str().unwrap().to_string()
    }

    fn tournament_json(name: &str, date: &str, is_open: bool) -> Value {
        json!({
            "name": name,
            "date": date,
            "time": "9:00 AM",
            "is_open": is_open,
            "venue_address": "12 Ferdowsi Ave, Tehran",
            "venue_info": "Hall B",
            "registration_fee": "500,000 Toman",
        })
    }

    async fn create_tournament_via(app: &Router, token: &str, is_open: bool) -> i64 {
        let response = send_json(
            app,
            "POST",
            "/tournaments",
            Some(token),
            &tournament_json("Spring Open", "2026-04-10T09:00:00Z", is_open),
        )
        .await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        let body: Value = response_json(response).await;
        body["tournament"]["tournament_id"].as_i64().unwrap()
    }

    fn text_part(name: &str, value: &str) -> String {
        format!(
            "--{TEST_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        )
    }

    fn submission_form(tournament_id: i64, with_receipt: bool) -> Vec<u8> {
        let mut body: Vec<u8> = Vec::new();
        body.extend_from_slice(text_part("tournament_id", &tournament_id.to_string()).as_bytes());
        body.extend_from_slice(text_part("name", "Sara Hosseini").as_bytes());
        body.extend_from_slice(text_part("phone", "09123456789").as_bytes());
        body.extend_from_slice(text_part("email", "sara@example.com").as_bytes());
        body.extend_from_slice(text_part("year_of_birth", "1990").as_bytes());
        body.extend_from_slice(text_part("description", "Lichess: sara_h").as_bytes());
        body.extend_from_slice(text_part("agreed_tos", "true").as_bytes());
        if with_receipt {
            body.extend_from_slice(
                format!(
                    "--{TEST_BOUNDARY}\r\nContent-Disposition: form-data; name=\"receipt\"; filename=\"receipt.jpg\"\r\nContent-Type: image/jpeg\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(FAKE_JPEG);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{TEST_BOUNDARY}--\r\n").as_bytes());
        body
    }

    async fn send_submission(app: &Router, body: Vec<u8>) -> Response {
        app.clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/registrations")
                    .header(
                        "content-type",
                        format!("multipart/form-data; boundary={TEST_BOUNDARY}"),
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_open_tournaments_starts_empty() {
        let app: Router = test_app();

        let response = send_get(&app, "/tournaments/open", None).await;

        assert_eq!(response.status(), HttpStatusCode::OK);
        let body: Value = response_json(response).await;
        assert_eq!(body["tournaments"], json!([]));
    }

    #[tokio::test]
    async fn test_next_tournament_reads_null_until_designated() {
        let app: Router = test_app();

        let response = send_get(&app, "/tournaments/next", None).await;

        assert_eq!(response.status(), HttpStatusCode::OK);
        let body: Value = response_json(response).await;
        assert!(body["tournament"].is_null());
    }

    #[tokio::test]
    async fn test_admin_routes_require_session() {
        let app: Router = test_app();
        let body: Value = tournament_json("Spring Open", "2026-04-10T09:00:00Z", true);

        let missing = send_json(&app, "POST", "/tournaments", None, &body).await;
        assert_eq!(missing.status(), HttpStatusCode::UNAUTHORIZED);

        let bogus = send_json(&app, "POST", "/tournaments", Some("session_0_0"), &body).await;
        assert_eq!(bogus.status(), HttpStatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_login_rejects_wrong_password() {
        let app: Router = test_app();

        let response = send_json(
            &app,
            "POST",
            "/login",
            None,
            &json!({"username": "admin", "password": "guess"}),
        )
        .await;

        assert_eq!(response.status(), HttpStatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_logout_invalidates_session() {
        let app: Router = test_app();
        let token: String = login_token(&app).await;

        let logout_response = send_json(&app, "POST", "/logout", Some(&token), &json!({})).await;
        assert_eq!(logout_response.status(), HttpStatusCode::OK);

        let listing = send_get(&app, "/registrations", Some(&token)).await;
        assert_eq!(listing.status(), HttpStatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_tournament_admin_lifecycle() {
        let app: Router = test_app();
        let token: String = login_token(&app).await;

        let tournament_id: i64 = create_tournament_via(&app, &token, true).await;

        // Public detail view
        let detail = send_get(&app, &format!("/tournaments/{tournament_id}"), None).await;
        assert_eq!(detail.status(), HttpStatusCode::OK);

        // Full-record update closes registration
        let update = send_json(
            &app,
            "PUT",
            &format!("/tournaments/{tournament_id}"),
            Some(&token),
            &tournament_json("Spring Open (moved)", "2026-05-02T09:00:00Z", false),
        )
        .await;
        assert_eq!(update.status(), HttpStatusCode::OK);
        let updated: Value = response_json(update).await;
        assert_eq!(updated["tournament"]["name"], "Spring Open (moved)");

        // Closed tournaments drop out of the open listing
        let open = response_json(send_get(&app, "/tournaments/open", None).await).await;
        assert_eq!(open["tournaments"], json!([]));

        // The admin listing still shows the record
        let all = response_json(send_get(&app, "/tournaments", Some(&token)).await).await;
        assert_eq!(all["tournaments"].as_array().unwrap().len(), 1);

        // Designate and read back the featured tournament
        let set_next = send_json(
            &app,
            "PUT",
            "/tournaments/next",
            Some(&token),
            &json!({"tournament_id": tournament_id}),
        )
        .await;
        assert_eq!(set_next.status(), HttpStatusCode::OK);
        let next = response_json(send_get(&app, "/tournaments/next", None).await).await;
        assert_eq!(next["tournament"]["tournament_id"], json!(tournament_id));

        // Delete and confirm everything is gone
        let del = send_delete(&app, &format!("/tournaments/{tournament_id}"), &token).await;
        assert_eq!(del.status(), HttpStatusCode::OK);

        let gone = send_get(&app, &format!("/tournaments/{tournament_id}"), None).await;
        assert_eq!(gone.status(), HttpStatusCode::NOT_FOUND);

        let next_after = response_json(send_get(&app, "/tournaments/next", None).await).await;
        assert!(next_after["tournament"].is_null());
    }

    #[tokio::test]
    async fn test_registration_flow_end_to_end() {
        let app: Router = test_app();
        let token: String = login_token(&app).await;
        let tournament_id: i64 = create_tournament_via(&app, &token, true).await;

        // Submit a registration
        let submit = send_submission(&app, submission_form(tournament_id, true)).await;
        assert_eq!(submit.status(), HttpStatusCode::OK);
        let submitted: Value = response_json(submit).await;
        let certificate_id: String = submitted["certificate_id"].as_str().unwrap().to_string();
        let registration_id: i64 = submitted["registration_id"].as_i64().unwrap();

        // Public certificate lookup
        let verify = send_get(&app, &format!("/certificates/{certificate_id}"), None).await;
        assert_eq!(verify.status(), HttpStatusCode::OK);
        let verified: Value = response_json(verify).await;
        assert_eq!(verified["name"], "Sara Hosseini");
        assert_eq!(verified["tournament_name"], "Spring Open");
        assert_eq!(verified["certificate_confirmed"], json!(false));

        // The admin listing shows the unredacted record
        let listing = response_json(send_get(&app, "/registrations", Some(&token)).await).await;
        assert_eq!(listing["registrations"].as_array().unwrap().len(), 1);
        assert_eq!(listing["registrations"][0]["email"], "sara@example.com");

        // Receipt download needs a session
        let anon_receipt = send_get(
            &app,
            &format!("/registrations/{registration_id}/receipt"),
            None,
        )
        .await;
        assert_eq!(anon_receipt.status(), HttpStatusCode::UNAUTHORIZED);

        // Receipt download round-trips the uploaded bytes
        let receipt = send_get(
            &app,
            &format!("/registrations/{registration_id}/receipt"),
            Some(&token),
        )
        .await;
        assert_eq!(receipt.status(), HttpStatusCode::OK);
        assert_eq!(receipt.headers()["content-type"], "image/jpeg");
        let bytes = axum::body::to_bytes(receipt.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(bytes.as_ref(), FAKE_JPEG);

        // Confirm, then the public view reflects it
        let confirm = send_json(
            &app,
            "POST",
            &format!("/registrations/{registration_id}/confirm"),
            Some(&token),
            &json!({}),
        )
        .await;
        assert_eq!(confirm.status(), HttpStatusCode::OK);
        let verified_again = response_json(
            send_get(&app, &format!("/certificates/{certificate_id}"), None).await,
        )
        .await;
        assert_eq!(verified_again["certificate_confirmed"], json!(true));
    }

    #[tokio::test]
    async fn test_submission_missing_fields_returns_every_violation() {
        let app: Router = test_app();
        let token: String = login_token(&app).await;
        let tournament_id: i64 = create_tournament_via(&app, &token, true).await;

        // Only the tournament selection is present
        let mut body: Vec<u8> = Vec::new();
        body.extend_from_slice(text_part("tournament_id", &tournament_id.to_string()).as_bytes());
        body.extend_from_slice(format!("--{TEST_BOUNDARY}--\r\n").as_bytes());

        let response = send_submission(&app, body).await;

        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
        let payload: Value = response_json(response).await;
        assert_eq!(payload["error"], json!(true));
        assert_eq!(payload["errors"].as_array().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_submission_to_closed_tournament_rejected() {
        let app: Router = test_app();
        let token: String = login_token(&app).await;
        let tournament_id: i64 = create_tournament_via(&app, &token, false).await;

        let response = send_submission(&app, submission_form(tournament_id, true)).await;

        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
        let payload: Value = response_json(response).await;
        assert_eq!(
            payload["errors"],
            json!(["Registration for this tournament is closed."])
        );
    }

    #[tokio::test]
    async fn test_verify_unknown_certificate_not_found() {
        let app: Router = test_app();

        let response = send_get(&app, "/certificates/00000AAAAA", None).await;

        assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_verify_malformed_certificate_rejected_before_lookup() {
        let app: Router = test_app();

        let response = send_get(&app, "/certificates/123", None).await;

        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
        let payload: Value = response_json(response).await;
        assert!(
            payload["message"]
                .as_str()
                .unwrap()
                .contains("exactly 10 characters")
        );
    }

    #[tokio::test]
    async fn test_delete_tournament_removes_its_registrations() {
        let app: Router = test_app();
        let token: String = login_token(&app).await;
        let tournament_id: i64 = create_tournament_via(&app, &token, true).await;

        let submit = send_submission(&app, submission_form(tournament_id, true)).await;
        let submitted: Value = response_json(submit).await;
        let certificate_id: String = submitted["certificate_id"].as_str().unwrap().to_string();

        let del = send_delete(&app, &format!("/tournaments/{tournament_id}"), &token).await;
        assert_eq!(del.status(), HttpStatusCode::OK);

        let listing = response_json(send_get(&app, "/registrations", Some(&token)).await).await;
        assert_eq!(listing["registrations"], json!([]));

        let verify = send_get(&app, &format!("/certificates/{certificate_id}"), None).await;
        assert_eq!(verify.status(), HttpStatusCode::NOT_FOUND);
    }
}
