use std::sync::Arc;

use axum::{
    Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    TurfbookError,
    email::{self, Notifier},
    models::{Position, Sport, SportStatus},
    registration::{Booking, MatchRegistration, TurfRegistration},
    venues::{CatalogSource, NearbyQuery, RankedVenue},
};

const NO_TURFS_MESSAGE: &str = "No nearby turfs found.";

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogSource>,
    pub notifier: Arc<dyn Notifier>,
}

/// Error body returned to the site as `{"error": "..."}`
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<TurfbookError> for ApiError {
    fn from(err: TurfbookError) -> Self {
        let status = match &err {
            TurfbookError::Validation { .. } => StatusCode::BAD_REQUEST,
            TurfbookError::Catalog { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status != StatusCode::BAD_REQUEST {
            tracing::error!(error = %err, "request failed");
        }
        Self {
            status,
            message: err.user_message(),
        }
    }
}

impl ApiError {
    /// Body limit rejections keep their 413, every other malformed request is a 400
    fn rejected(status: StatusCode, message: String) -> Self {
        let status = if status == StatusCode::PAYLOAD_TOO_LARGE {
            status
        } else {
            StatusCode::BAD_REQUEST
        };
        tracing::debug!(%status, %message, "request rejected");
        Self { status, message }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::rejected(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::rejected(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

#[derive(Serialize)]
struct ApiSport {
    name: &'static str,
    status: SportStatus,
}

#[derive(Debug, Deserialize)]
pub struct NearbyParams {
    pub sport: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NearbyTurf {
    #[serde(flatten)]
    pub venue: RankedVenue,
    pub distance_label: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NearbyResponse {
    pub turfs: Vec<NearbyTurf>,
    pub message: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/sports", get(get_sports))
        .route("/turfs/nearby", get(get_nearby_turfs))
        .route("/send-registration-email", post(send_registration_email))
        .route("/booking", post(send_booking))
        .route("/register-turf", post(register_turf))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "version": crate::VERSION }))
}

async fn get_sports() -> Json<Vec<ApiSport>> {
    Json(
        Sport::ALL
            .into_iter()
            .map(|sport| ApiSport {
                name: sport.name(),
                status: sport.status(),
            })
            .collect(),
    )
}

async fn get_nearby_turfs(
    State(state): State<AppState>,
    params: Result<Query<NearbyParams>, QueryRejection>,
) -> Result<Json<NearbyResponse>, ApiError> {
    let Query(params) = params?;
    let sport = params
        .sport
        .as_deref()
        .map(str::trim)
        .filter(|sport| !sport.is_empty())
        .ok_or_else(|| TurfbookError::validation("Please select sport first"))?;

    let (Some(lat), Some(lon)) = (params.lat, params.lon) else {
        return Err(TurfbookError::validation("Location is required to find nearby turfs").into());
    };
    let position = Position::try_new(lat, lon)?;

    let catalog_text = state.catalog.load_text().await?;
    let turfs: Vec<NearbyTurf> = NearbyQuery::new(sport, position)
        .rank(&catalog_text)
        .into_iter()
        .map(|venue| NearbyTurf {
            distance_label: venue.distance_label(),
            venue,
        })
        .collect();

    let message = turfs.is_empty().then(|| NO_TURFS_MESSAGE.to_string());
    Ok(Json(NearbyResponse { turfs, message }))
}

async fn send_registration_email(
    State(state): State<AppState>,
    payload: Result<Json<MatchRegistration>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Json(payload) = payload?;
    let registration = payload.validate()?;
    tracing::info!(
        sport = %registration.sport,
        register_type = registration.register_type.name(),
        "Relaying match registration"
    );
    state
        .notifier
        .notify(email::registration_notification(&registration, Utc::now()))
        .await?;
    Ok(Json(json!({ "success": true })))
}

async fn send_booking(
    State(state): State<AppState>,
    payload: Result<Json<Booking>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Json(payload) = payload?;
    let booking = payload.validate()?;
    tracing::info!(category = booking.entry.category(), "Relaying booking");
    state
        .notifier
        .notify(email::booking_notification(&booking))
        .await?;
    Ok(Json(json!({ "success": true })))
}

async fn register_turf(
    State(state): State<AppState>,
    payload: Result<Json<TurfRegistration>, JsonRejection>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let Json(payload) = payload?;
    let turf = payload.validate()?;
    tracing::info!(turf = %turf.name, "Relaying turf registration");
    state.notifier.notify(email::turf_notification(&turf)).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "message": "Turf registered successfully!" })),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::email::Notification;
    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, header};
    use std::path::PathBuf;
    use std::sync::Mutex;
    use tower::ServiceExt;

    const CATALOG: &str = "name,games,latitude,longitude\n\
        Far Ground,Football,26.8850,80.9400\n\
        Central Turf,Cricket;Football,26.8467,80.9462\n\
        East Turf,Swimming,26.85,80.95\n";

    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<Notification>>,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn notify(&self, notification: Notification) -> crate::Result<()> {
            self.sent.lock().unwrap().push(notification);
            Ok(())
        }
    }

    struct FailingNotifier;

    #[async_trait]
    impl Notifier for FailingNotifier {
        async fn notify(&self, _notification: Notification) -> crate::Result<()> {
            Err(TurfbookError::notification("relay unavailable"))
        }
    }

    fn catalog_file(test: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "turfbook-api-{}-{}.csv",
            test,
            std::process::id()
        ));
        std::fs::write(&path, CATALOG).unwrap();
        path
    }

    fn app(catalog: CatalogSource, notifier: Arc<dyn Notifier>) -> Router {
        router(AppState {
            catalog: Arc::new(catalog),
            notifier,
        })
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        serde_json::from_slice(&bytes).expect("json body")
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).expect("request")
    }

    #[tokio::test]
    async fn nearby_returns_ranked_turfs() {
        let path = catalog_file("ranked");
        let app = app(
            CatalogSource::File(path.clone()),
            Arc::new(RecordingNotifier::default()),
        );

        let response = app
            .oneshot(get("/turfs/nearby?sport=football&lat=26.84&lon=80.94"))
            .await
            .expect("response");
        std::fs::remove_file(&path).unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let turfs = json["turfs"].as_array().expect("turfs array");
        assert_eq!(turfs.len(), 2);
        assert_eq!(turfs[0]["name"], "Central Turf");
        assert_eq!(turfs[1]["name"], "Far Ground");
        assert!(turfs[0]["distance_label"].as_str().unwrap().ends_with(" km"));
        assert!(json["message"].is_null());
    }

    #[tokio::test]
    async fn nearby_reports_no_turfs() {
        let path = catalog_file("empty");
        let app = app(
            CatalogSource::File(path.clone()),
            Arc::new(RecordingNotifier::default()),
        );

        let response = app
            .oneshot(get("/turfs/nearby?sport=chess&lat=26.84&lon=80.94"))
            .await
            .expect("response");
        std::fs::remove_file(&path).unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["turfs"].as_array().unwrap().len(), 0);
        assert_eq!(json["message"], NO_TURFS_MESSAGE);
    }

    #[tokio::test]
    async fn nearby_requires_sport() {
        let app = app(
            CatalogSource::File(PathBuf::from("unused.csv")),
            Arc::new(RecordingNotifier::default()),
        );

        let response = app
            .oneshot(get("/turfs/nearby?sport=%20&lat=26.84&lon=80.94"))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "Please select sport first");
    }

    #[tokio::test]
    async fn nearby_requires_position() {
        let app = app(
            CatalogSource::File(PathBuf::from("unused.csv")),
            Arc::new(RecordingNotifier::default()),
        );

        let response = app
            .oneshot(get("/turfs/nearby?sport=cricket&lat=26.84"))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn nearby_missing_catalog_is_bad_gateway() {
        let app = app(
            CatalogSource::File(PathBuf::from("/definitely/not/here/turfs.csv")),
            Arc::new(RecordingNotifier::default()),
        );

        let response = app
            .oneshot(get("/turfs/nearby?sport=cricket&lat=26.84&lon=80.94"))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn sports_lists_vocabulary() {
        let app = app(
            CatalogSource::File(PathBuf::from("unused.csv")),
            Arc::new(RecordingNotifier::default()),
        );

        let response = app.oneshot(get("/sports")).await.expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let sports = json.as_array().unwrap();
        assert_eq!(sports.len(), 12);
        assert_eq!(sports[0]["name"], "Cricket");
        assert_eq!(sports[0]["status"], "Active");
        assert_eq!(sports[7]["name"], "Chess");
        assert_eq!(sports[7]["status"], "Upcoming");
    }

    #[tokio::test]
    async fn registration_is_relayed_once() {
        let notifier = Arc::new(RecordingNotifier::default());
        let app = app(
            CatalogSource::File(PathBuf::from("unused.csv")),
            notifier.clone(),
        );

        let response = app
            .oneshot(post_json(
                "/send-registration-email",
                json!({
                    "register_type": "Individual",
                    "full_name": "Aman Verma",
                    "email": "aman@example.com",
                    "whatsapp_number": "9876543210",
                    "sport": "Cricket",
                    "player_type": "Batsman",
                    "turf_name": "Central Turf"
                }),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["success"], true);

        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].body.contains("Player Type: Batsman"));
    }

    #[tokio::test]
    async fn invalid_booking_is_not_relayed() {
        let notifier = Arc::new(RecordingNotifier::default());
        let app = app(
            CatalogSource::File(PathBuf::from("unused.csv")),
            notifier.clone(),
        );

        let response = app
            .oneshot(post_json(
                "/booking",
                json!({
                    "category": "team",
                    "userEmail": "captain@example.com",
                    "team_name": "Royal Strikers",
                    "captain_name": "Ravi",
                    "players": ["A", "B", "", ""],
                    "whatsapp_number": "9000000000"
                }),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["error"],
            "Exactly 11 players required (including Captain)"
        );
        assert!(notifier.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn site_team_booking_is_relayed() {
        let notifier = Arc::new(RecordingNotifier::default());
        let app = app(
            CatalogSource::File(PathBuf::from("unused.csv")),
            notifier.clone(),
        );

        // Shape posted by the site: the captain leads the players list
        let response = app
            .oneshot(post_json(
                "/booking",
                json!({
                    "category": "team",
                    "userEmail": "captain@example.com",
                    "team_name": "Thunder Blasters",
                    "captain_name": "Ravi",
                    "players": ["Ravi", "A", "B", "C", "D", "E", "F", "G", "H", "I", "J"],
                    "whatsapp_number": "9000000000"
                }),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["success"], true);

        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].body.contains("  1. Ravi\n  2. A\n"));
        assert!(sent[0].body.contains("  11. J\n"));
        assert!(!sent[0].body.contains("  12."));
    }

    #[tokio::test]
    async fn booking_missing_field_is_json_error() {
        let notifier = Arc::new(RecordingNotifier::default());
        let app = app(
            CatalogSource::File(PathBuf::from("unused.csv")),
            notifier.clone(),
        );

        let response = app
            .oneshot(post_json(
                "/booking",
                json!({ "category": "individual", "userEmail": "a@b.c" }),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert!(json["error"].as_str().unwrap().contains("full_name"));
        assert!(notifier.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let app = app(
            CatalogSource::File(PathBuf::from("unused.csv")),
            Arc::new(RecordingNotifier::default()),
        );

        let request = Request::builder()
            .method("POST")
            .uri("/register-turf")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"name\": "))
            .expect("request");
        let response = app.oneshot(request).await.expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn nearby_non_numeric_latitude_is_bad_request() {
        let app = app(
            CatalogSource::File(PathBuf::from("unused.csv")),
            Arc::new(RecordingNotifier::default()),
        );

        let response = app
            .oneshot(get("/turfs/nearby?sport=cricket&lat=abc&lon=80.94"))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        assert!(body_json(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn relay_failure_is_email_failed() {
        let app = app(
            CatalogSource::File(PathBuf::from("unused.csv")),
            Arc::new(FailingNotifier),
        );

        let response = app
            .oneshot(post_json(
                "/register-turf",
                json!({
                    "name": "Gomti Nagar Arena",
                    "mobile": "9123456780",
                    "district": "Lucknow",
                    "state": "Uttar Pradesh"
                }),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"], "Email failed");
    }

    #[tokio::test]
    async fn turf_registration_is_created() {
        let notifier = Arc::new(RecordingNotifier::default());
        let app = app(
            CatalogSource::File(PathBuf::from("unused.csv")),
            notifier.clone(),
        );

        let response = app
            .oneshot(post_json(
                "/register-turf",
                json!({
                    "name": "Gomti Nagar Arena",
                    "mobile": "9123456780",
                    "district": "Lucknow",
                    "state": "Uttar Pradesh"
                }),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(notifier.sent.lock().unwrap().len(), 1);
    }
}
