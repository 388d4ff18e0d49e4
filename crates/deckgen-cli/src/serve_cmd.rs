use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::{Arc, LazyLock};

use anyhow::{Context, Result};
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};
use uuid::Uuid;

use deckgen_core::content::{ContentService, ContentSource, GeneratedContent, attach_images};
use deckgen_core::image::ImageProvider;
use deckgen_core::outline::{ContentDepth, SlideSpec};
use deckgen_core::render::{self, PPTX_MIME, RenderedDeck, Rgb, Theme};
use deckgen_db::models::{MetricsSummary, Presentation};
use deckgen_db::queries::metrics;
use deckgen_db::queries::presentations::{self, DEFAULT_LIST_LIMIT, NewPresentation};

pub const DEFAULT_SLIDES: i64 = 6;
pub const MAX_SLIDES: i64 = 20;
pub const DEFAULT_STYLE: &str = "Blue-Professional";
pub const DEFAULT_BACKGROUND: &str = "#FFFFFF";
const FALLBACK_FILENAME: &str = "ai_presentation";

/// Named background swatches offered to clients.
pub const BACKGROUND_COLORS: [(&str, &str); 10] = [
    ("Pure White", "#FFFFFF"),
    ("Soft Gray", "#F8FAFC"),
    ("Warm White", "#FEF7EE"),
    ("Ice Blue", "#F0F9FF"),
    ("Mint Cream", "#F0FDF4"),
    ("Lavender", "#FDF4FF"),
    ("Peach", "#FFF7ED"),
    ("Dark Mode", "#1E293B"),
    ("Professional Blue", "#F0F7FF"),
    ("Executive Gray", "#F8FAFC"),
];

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.into(),
        }
    }

    pub fn internal(err: anyhow::Error) -> Self {
        error!(error = %format!("{err:#}"), "request failed");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("{err:#}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub content: ContentService,
    /// `None` when images are disabled in configuration.
    pub images: Option<Arc<dyn ImageProvider>>,
}

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub topic: String,
    pub slides: Option<i64>,
    pub style: Option<String>,
    pub background_color: Option<String>,
    #[serde(default)]
    pub include_images: bool,
    pub content_depth: Option<String>,
    pub notes: Option<String>,
}

/// A request with defaults applied and every field checked.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidRequest {
    pub topic: String,
    pub slides: usize,
    pub style: String,
    pub background_color: String,
    pub background: Rgb,
    pub include_images: bool,
    pub content_depth: ContentDepth,
    pub notes: Option<String>,
}

impl GenerateRequest {
    pub fn validate(self) -> Result<ValidRequest, AppError> {
        let topic = self.topic.trim().to_string();
        if topic.is_empty() {
            return Err(AppError::bad_request("topic must not be empty"));
        }

        let slides = self.slides.unwrap_or(DEFAULT_SLIDES).clamp(1, MAX_SLIDES) as usize;

        let background_color = self
            .background_color
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_BACKGROUND.to_string());
        let background =
            Rgb::from_hex(&background_color).map_err(|e| AppError::bad_request(e.to_string()))?;

        let content_depth = match self.content_depth.as_deref().map(str::trim) {
            None | Some("") => ContentDepth::default(),
            Some(raw) => raw
                .parse()
                .map_err(|e: deckgen_db::models::ContentDepthParseError| {
                    AppError::bad_request(e.to_string())
                })?,
        };

        let style = self
            .style
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_STYLE.to_string());

        Ok(ValidRequest {
            topic,
            slides,
            style,
            background_color,
            background,
            include_images: self.include_images,
            content_depth,
            notes: self.notes.filter(|n| !n.trim().is_empty()),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct OutlineResponse {
    pub topic: String,
    pub style: String,
    pub background_color: String,
    pub content_depth: ContentDepth,
    pub slides: Vec<SlideSpec>,
    pub presentation_id: Uuid,
    pub ai_generated: bool,
    pub exact_slide_count: bool,
    pub content_source: ContentSource,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub presentations: Vec<Presentation>,
    pub total_downloads: i64,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

static UNSAFE_FILENAME_RE: LazyLock<Regex> = LazyLock::new(unsafe_filename_re);

#[allow(clippy::expect_used)]
fn unsafe_filename_re() -> Regex {
    Regex::new(r"[^A-Za-z0-9_-]+").expect("filename pattern is valid")
}

/// Download filename for `topic`.
pub fn download_filename(topic: &str) -> String {
    let stem = UNSAFE_FILENAME_RE.replace_all(topic, "_");
    if stem.is_empty() {
        format!("{FALLBACK_FILENAME}.pptx")
    } else {
        format!("{stem}.pptx")
    }
}

async fn generate_content(state: &AppState, req: &ValidRequest) -> GeneratedContent {
    state
        .content
        .generate(&req.topic, req.slides, req.content_depth, req.notes.as_deref())
        .await
}

async fn save_history(
    pool: &PgPool,
    req: &ValidRequest,
    produced: usize,
) -> Result<Presentation, AppError> {
    let slides = i32::try_from(produced).unwrap_or(i32::MAX);
    presentations::upsert_presentation(
        pool,
        &NewPresentation {
            topic: &req.topic,
            slides,
            style: &req.style,
            background_color: &req.background_color,
            include_images: req.include_images,
            content_depth: req.content_depth,
        },
    )
    .await
    .map_err(AppError::internal)
}

/// Render off the async runtime, falling back to the one-slide deck.
async fn render_with_recovery(
    slides: Vec<SlideSpec>,
    theme: Theme,
    depth: ContentDepth,
) -> Result<Vec<u8>> {
    tokio::task::spawn_blocking(move || -> Result<Vec<u8>> {
        let deck: RenderedDeck = match render::render_deck(&slides, &theme, depth) {
            Ok(deck) => deck,
            Err(e) => {
                warn!(error = %e, "render failed, using minimal presentation");
                render::render_minimal().context("minimal presentation also failed")?
            }
        };
        Ok(deck.bytes()?)
    })
    .await
    .context("render task panicked")?
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/health", get(health))
        .route("/api/background-colors", get(background_colors))
        .route("/api/content-depths", get(content_depths))
        .route("/api/outline", post(outline))
        .route("/api/generate-ppt", post(generate_ppt))
        .route("/api/history", get(history).delete(clear_history))
        .route("/api/history/{id}", delete(delete_history_item))
        .route("/api/metrics", get(get_metrics))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub async fn run_serve(state: AppState, bind: &str, port: u16) -> Result<()> {
    let app = build_router(state);
    let addr: SocketAddr = format!("{bind}:{port}")
        .parse()
        .with_context(|| format!("invalid bind address {bind}:{port}"))?;
    info!("deckgen serve listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("deckgen serve shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn index(State(state): State<AppState>) -> Json<serde_json::Value> {
    let provider = state.content.provider();
    let bullets: BTreeMap<String, usize> = ContentDepth::ALL
        .iter()
        .map(|d| (d.to_string(), d.target_bullet_count()))
        .collect();
    Json(json!({
        "message": "deckgen presentation service is running",
        "version": env!("CARGO_PKG_VERSION"),
        "provider": provider.name(),
        "model": provider.model(),
        "images": state.images.as_ref().map(|i| i.name().to_string()),
        "bullets_per_slide": bullets,
    }))
}

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let provider = state.content.provider();
    let (ok, status) = match provider.health().await {
        Ok(reply) => (true, reply),
        Err(e) => {
            warn!(provider = provider.name(), error = %e, "health probe failed");
            (false, e.to_string())
        }
    };
    Json(json!({
        "ok": ok,
        "provider": provider.name(),
        "model": provider.model(),
        "status": status,
    }))
}

async fn background_colors() -> Json<BTreeMap<&'static str, &'static str>> {
    Json(BACKGROUND_COLORS.into_iter().collect())
}

async fn content_depths() -> Json<BTreeMap<String, String>> {
    Json(
        ContentDepth::ALL
            .iter()
            .map(|d| (d.to_string(), d.description()))
            .collect(),
    )
}

async fn outline(
    State(state): State<AppState>,
    Json(body): Json<GenerateRequest>,
) -> Result<Json<OutlineResponse>, AppError> {
    let req = body.validate()?;
    let generated = generate_content(&state, &req).await;
    let saved = save_history(&state.pool, &req, generated.slides.len()).await?;

    info!(
        topic = %req.topic,
        slides = generated.slides.len(),
        source = %generated.source,
        "outline generated"
    );

    Ok(Json(OutlineResponse {
        exact_slide_count: generated.slides.len() == req.slides,
        ai_generated: generated.source.is_ai_generated(),
        content_source: generated.source,
        slides: generated.slides,
        presentation_id: saved.id,
        topic: req.topic,
        style: req.style,
        background_color: req.background_color,
        content_depth: req.content_depth,
    }))
}

async fn generate_ppt(
    State(state): State<AppState>,
    Json(body): Json<GenerateRequest>,
) -> Result<Response, AppError> {
    let req = body.validate()?;
    let GeneratedContent { mut slides, source } = generate_content(&state, &req).await;
    let saved = save_history(&state.pool, &req, slides.len()).await?;

    if req.include_images {
        match &state.images {
            Some(images) => {
                let attached = attach_images(&mut slides, images.as_ref()).await;
                info!(attached, "slide images attached");
            }
            None => warn!("images requested but disabled in configuration"),
        }
    }

    let theme = Theme::for_style(&req.style, req.background);
    let slide_count = slides.len();
    let bytes = render_with_recovery(slides, theme, req.content_depth)
        .await
        .map_err(AppError::internal)?;

    presentations::record_download(&state.pool, saved.id)
        .await
        .map_err(AppError::internal)?;

    let filename = download_filename(&req.topic);
    info!(%filename, slides = slide_count, %source, "presentation delivered");

    Ok((
        [
            (header::CONTENT_TYPE, PPTX_MIME.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}

async fn history(State(state): State<AppState>) -> Result<Json<HistoryResponse>, AppError> {
    let presentations = presentations::list_presentations(&state.pool, DEFAULT_LIST_LIMIT)
        .await
        .map_err(AppError::internal)?;
    let total_downloads = metrics::get_total_downloads(&state.pool)
        .await
        .map_err(AppError::internal)?;
    Ok(Json(HistoryResponse {
        presentations,
        total_downloads,
    }))
}

async fn delete_history_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = presentations::delete_presentation(&state.pool, id)
        .await
        .map_err(AppError::internal)?;
    if !deleted {
        return Err(AppError::not_found(format!("presentation {id} not found")));
    }
    Ok(Json(json!({ "message": "presentation deleted", "id": id })))
}

async fn clear_history(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let removed = presentations::clear_presentations(&state.pool)
        .await
        .map_err(AppError::internal)?;
    Ok(Json(json!({ "message": "history cleared", "removed": removed })))
}

async fn get_metrics(State(state): State<AppState>) -> Result<Json<MetricsSummary>, AppError> {
    let summary = metrics::get_metrics_summary(&state.pool)
        .await
        .map_err(AppError::internal)?;
    Ok(Json(summary))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
