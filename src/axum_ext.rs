//! Axum integration: application state, extractors, handlers and router.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use reflective_display::axum_ext::{router, AppState};
//!
//! let app = router(Arc::new(AppState::default()));
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:5000").await?;
//! axum::serve(listener, app).await?;
//! ```
//!
//! # Endpoints
//!
//! | Endpoint | Method | Purpose |
//! |----------|--------|---------|
//! | `/` | GET | HTML index page |
//! | `/api/display-specs` | GET | Supported display catalog |
//! | `/api/disable-light` | GET | Switch off all light sources |
//! | `/api/reflective-config/{ambientLux}` | GET | Contrast mode and refresh strategy |
//! | `/api/light-state` | GET | Current light-emission settings |
//! | `/api/toggle-front-light` | POST | Flip the front light |
//! | `/api/refresh-profile/{profile}` | GET | Timings for speed/balanced/quality |
//! | `/api/paper-texture` | GET | Paper texture for `fiberDensity`/`inkBleed` |

use std::sync::Arc;

use axum::extract::{FromRequestParts, Path, Query, State};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use http::request::Parts;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::catalog::{list_displays, DisplayDescriptor};
use crate::error::Error;
use crate::page::render_index_page;
use crate::profile::{PaperTexture, RefreshProfile, RefreshProfileTimings};
use crate::reflective::{AmbientLux, LightEmissionState, ReflectiveConfig, ReflectiveDisplayEngine};

/// State shared by every request.
///
/// Holds the single display engine. Writers (disable, toggle) take the lock
/// exclusively, so a reader never sees a half-updated light state.
#[derive(Debug)]
pub struct AppState {
    /// The device's light-emission settings
    pub engine: RwLock<ReflectiveDisplayEngine>,
    /// Heading of the index page
    pub title: String,
}

impl AppState {
    /// Create state around an engine.
    pub fn new(engine: ReflectiveDisplayEngine, title: impl Into<String>) -> Self {
        Self {
            engine: RwLock::new(engine),
            title: title.into(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ReflectiveDisplayEngine::new(), "Reflective E-Reader Display")
    }
}

/// Light-state envelope: `{"status": "success", "config": {...}}`.
#[derive(Debug, Clone, Serialize)]
pub struct LightStateResponse {
    /// Always "success"
    pub status: &'static str,
    /// Light-emission settings after the operation
    pub config: LightEmissionState,
}

impl LightStateResponse {
    /// Wrap a light state in a success envelope.
    pub fn success(config: LightEmissionState) -> Self {
        Self {
            status: "success",
            config,
        }
    }
}

/// Error body: `{"status": "error", "message": "..."}`.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Always "error"
    pub status: &'static str,
    /// Human-readable reason
    pub message: String,
}

impl ErrorResponse {
    fn new(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            message: message.into(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = if self.is_client_error() {
            tracing::warn!("Rejected request: {}", self);
            StatusCode::BAD_REQUEST
        } else {
            tracing::error!("Request failed: {}", self);
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

/// Extract the ambient light level from the single path parameter.
///
/// Negative, fractional or non-numeric values are rejected with
/// `400 Bad Request`.
impl<S> FromRequestParts<S> for AmbientLux
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| Error::invalid_input(e.body_text()))?;
        raw.parse()
    }
}

/// Extract a refresh profile name from the single path parameter.
impl<S> FromRequestParts<S> for RefreshProfile
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| Error::invalid_input(e.body_text()))?;
        raw.parse()
    }
}

/// Query string of `/api/paper-texture`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperTextureQuery {
    /// Fiber density, 0-100
    pub fiber_density: Option<String>,
    /// Ink bleed, 0-100
    pub ink_bleed: Option<String>,
}

impl PaperTextureQuery {
    fn to_texture(&self) -> Result<PaperTexture, Error> {
        let fiber_density = parse_paper_value("fiberDensity", self.fiber_density.as_deref())?;
        let ink_bleed = parse_paper_value("inkBleed", self.ink_bleed.as_deref())?;
        PaperTexture::new(fiber_density, ink_bleed)
    }
}

fn parse_paper_value(name: &str, raw: Option<&str>) -> Result<u8, Error> {
    let raw = raw.ok_or_else(|| Error::invalid_input(format!("missing query parameter {}", name)))?;
    let invalid = || {
        Error::invalid_input(format!(
            "{} must be an integer between 0 and 100, got '{}'",
            name, raw
        ))
    };
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    raw.parse().map_err(|_| invalid())
}

/// Extract a paper texture from the `fiberDensity` and `inkBleed` query
/// parameters.
///
/// Malformed query strings (duplicate keys, bad encoding) are rejected with
/// the same JSON error body as out-of-range values.
impl<S> FromRequestParts<S> for PaperTexture
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<PaperTextureQuery>::from_request_parts(parts, state)
            .await
            .map_err(|e| Error::invalid_input(e.body_text()))?;
        query.to_texture()
    }
}

/// GET / - HTML index page
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let light = state.engine.read().await.state();
    Html(render_index_page(&state.title, list_displays(), &light))
}

/// GET /api/display-specs - Supported display catalog
pub async fn display_specs() -> Json<&'static [DisplayDescriptor]> {
    tracing::debug!("Serving display catalog");
    Json(list_displays())
}

/// GET /api/disable-light - Switch off every light source
pub async fn disable_light(State(state): State<Arc<AppState>>) -> Json<LightStateResponse> {
    let config = state.engine.write().await.disable_light_emission();
    Json(LightStateResponse::success(config))
}

/// GET /api/reflective-config/{ambientLux} - Contrast mode for an ambient light level
pub async fn get_reflective_config(
    State(state): State<Arc<AppState>>,
    lux: AmbientLux,
) -> Json<ReflectiveConfig> {
    Json(state.engine.read().await.configure_reflective_settings(lux))
}

/// GET /api/light-state - Current light-emission settings
pub async fn light_state(State(state): State<Arc<AppState>>) -> Json<LightStateResponse> {
    Json(LightStateResponse::success(state.engine.read().await.state()))
}

/// POST /api/toggle-front-light - Flip the front light
pub async fn toggle_front_light(State(state): State<Arc<AppState>>) -> Json<LightStateResponse> {
    let config = state.engine.write().await.toggle_front_light();
    Json(LightStateResponse::success(config))
}

/// GET /api/refresh-profile/{profile} - Timings for a refresh profile
pub async fn refresh_profile(profile: RefreshProfile) -> Json<RefreshProfileTimings> {
    Json(profile.timings())
}

/// GET /api/paper-texture?fiberDensity=..&inkBleed=.. - Paper texture description
pub async fn paper_texture(texture: PaperTexture) -> Json<PaperTexture> {
    Json(texture)
}

/// Fallback for unmapped routes.
pub async fn not_found() -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new("Not found")))
}

/// Build the router with every endpoint bound to `state`.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/display-specs", get(display_specs))
        .route("/api/disable-light", get(disable_light))
        .route("/api/reflective-config/{ambient_lux}", get(get_reflective_config))
        .route("/api/light-state", get(light_state))
        .route("/api/toggle-front-light", post(toggle_front_light))
        .route("/api/refresh-profile/{profile}", get(refresh_profile))
        .route("/api/paper-texture", get(paper_texture))
        .fallback(not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflective::{AutoBrightness, ColorTemperature, FrontLight};
    use axum::body::Body;
    use http::{Method, Request};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn send(app: Router, method: Method, uri: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let (status, body) = send(app, Method::GET, uri).await;
        (status, serde_json::from_str(&body).unwrap())
    }

    fn lit_state() -> Arc<AppState> {
        let engine = ReflectiveDisplayEngine::with_state(LightEmissionState {
            screen_backlight: 65,
            front_light: FrontLight::Enabled,
            auto_brightness: AutoBrightness::On,
            color_temperature: ColorTemperature::Cool,
        })
        .unwrap();
        Arc::new(AppState::new(engine, "Test Reader"))
    }

    #[tokio::test]
    async fn test_display_specs() {
        let app = router(Arc::new(AppState::default()));
        let (status, body) = get_json(app, "/api/display-specs").await;

        assert_eq!(status, StatusCode::OK);
        let displays = body.as_array().unwrap();
        assert_eq!(displays.len(), 2);
        assert_eq!(displays[0]["type"], "E-Ink Carta 1200");
        assert_eq!(displays[0]["grayLevels"], 16);
        assert_eq!(displays[1]["type"], "E-Ink Kaleido Plus");
        assert_eq!(displays[1]["colors"], 4096);
        assert!(displays[1].get("grayLevels").is_none());
    }

    #[tokio::test]
    async fn test_disable_light() {
        let state = lit_state();
        let (status, body) = get_json(router(state.clone()), "/api/disable-light").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "status": "success",
                "config": {
                    "screenBacklight": "0%",
                    "frontLight": "DISABLED",
                    "autoBrightness": "OFF",
                    "colorTemperature": "NEUTRAL"
                }
            })
        );
        assert_eq!(state.engine.read().await.state(), LightEmissionState::ALL_OFF);
    }

    #[tokio::test]
    async fn test_reflective_config_scenario() {
        let app = router(Arc::new(AppState::default()));
        let (status, body) = send(app, Method::GET, "/api/reflective-config/50").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            r#"{"contrastMode":"MAXIMUM","refreshStrategy":{"pageTurn":"FULL","scrolling":"PARTIAL","idle":"NONE"},"ambientLux":50}"#
        );
    }

    #[tokio::test]
    async fn test_reflective_config_boundaries() {
        let state = Arc::new(AppState::default());
        for (lux, mode) in [
            (0, "MAXIMUM"),
            (100, "MAXIMUM"),
            (101, "STANDARD"),
            (1000, "STANDARD"),
            (1001, "SUBDUED"),
        ] {
            let uri = format!("/api/reflective-config/{}", lux);
            let (status, body) = get_json(router(state.clone()), &uri).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["contrastMode"], mode, "lux={}", lux);
            assert_eq!(body["ambientLux"], lux);
        }
    }

    #[tokio::test]
    async fn test_reflective_config_rejects_invalid_lux() {
        let state = Arc::new(AppState::default());
        for bad in [
            "-5", "abc", "12.5", "99999999999", "%2042", "%2042%20", "+42", "%0A42",
        ] {
            let uri = format!("/api/reflective-config/{}", bad);
            let (status, body) = get_json(router(state.clone()), &uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "lux={}", bad);
            assert_eq!(body["status"], "error");
            assert!(body["message"].as_str().unwrap().contains("ambient lux"));
        }
    }

    #[tokio::test]
    async fn test_reflective_config_ignores_light_state() {
        let (_, lit) = get_json(router(lit_state()), "/api/reflective-config/700").await;
        let (_, dark) =
            get_json(router(Arc::new(AppState::default())), "/api/reflective-config/700").await;
        assert_eq!(lit, dark);
    }

    #[tokio::test]
    async fn test_toggle_and_light_state() {
        let state = Arc::new(AppState::default());

        let (status, body) = send(
            router(state.clone()),
            Method::POST,
            "/api/toggle-front-light",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["config"]["frontLight"], "ENABLED");

        let (_, body) = get_json(router(state.clone()), "/api/light-state").await;
        assert_eq!(body["status"], "success");
        assert_eq!(body["config"]["frontLight"], "ENABLED");

        let (_, body) = get_json(router(state.clone()), "/api/disable-light").await;
        assert_eq!(body["config"]["frontLight"], "DISABLED");
    }

    #[tokio::test]
    async fn test_toggle_requires_post() {
        let app = router(Arc::new(AppState::default()));
        let (status, _) = send(app, Method::GET, "/api/toggle-front-light").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_concurrent_disable_converges() {
        let state = lit_state();
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let app = router(state.clone());
                tokio::spawn(async move { get_json(app, "/api/disable-light").await })
            })
            .collect();

        for handle in handles {
            let (status, body) = handle.await.unwrap();
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["config"]["screenBacklight"], "0%");
        }
        assert_eq!(state.engine.read().await.state(), LightEmissionState::ALL_OFF);
    }

    #[tokio::test]
    async fn test_refresh_profile() {
        let state = Arc::new(AppState::default());

        let (status, body) = get_json(router(state.clone()), "/api/refresh-profile/speed").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"profile": "SPEED", "refreshRate": 30, "fullRefreshTime": 8, "partialRefreshTime": 2})
        );

        let (status, _) = get_json(router(state), "/api/refresh-profile/turbo").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_paper_texture() {
        let state = Arc::new(AppState::default());

        let (status, body) = get_json(
            router(state.clone()),
            "/api/paper-texture?fiberDensity=70&inkBleed=5",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["fiberLevel"], "HIGH");
        assert_eq!(body["inkBleedLevel"], "MINIMAL");

        let (status, body) =
            get_json(router(state.clone()), "/api/paper-texture?fiberDensity=70").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("inkBleed"));

        let (status, _) = get_json(
            router(state),
            "/api/paper-texture?fiberDensity=150&inkBleed=5",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_paper_texture_rejects_malformed_query() {
        let state = Arc::new(AppState::default());

        let (status, body) = get_json(
            router(state.clone()),
            "/api/paper-texture?fiberDensity=1&fiberDensity=2&inkBleed=3",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "error");
        assert!(body["message"].as_str().unwrap().contains("duplicate field"));

        for query in ["fiberDensity=%2040&inkBleed=5", "fiberDensity=%2B40&inkBleed=5"] {
            let uri = format!("/api/paper-texture?{}", query);
            let (status, body) = get_json(router(state.clone()), &uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "query={}", query);
            assert!(body["message"].as_str().unwrap().contains("fiberDensity"));
        }
    }

    #[tokio::test]
    async fn test_index_page() {
        let (status, body) = send(router(lit_state()), Method::GET, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<h1>Test Reader</h1>"));
        assert!(body.contains("Screen backlight: 65%"));
        assert!(body.contains("E-Ink Kaleido Plus"));
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let app = router(Arc::new(AppState::default()));
        let (status, body) = get_json(app, "/api/does-not-exist").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"status": "error", "message": "Not found"}));
    }

    #[test]
    fn test_error_status_codes() {
        let response = Error::invalid_input("bad lux").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = Error::Config("unreadable config".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
