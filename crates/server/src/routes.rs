//! Route handlers and router assembly.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, Request, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use precis_core::{
    ArticleTextResponse, Document, ExtractConfig, ExtractRequest, GeminiClient, INSUFFICIENT_TEXT_MESSAGE,
    PrecisError, RESTRICTED_PAGE_MESSAGE, SummaryType, extract_article_text, handle_request, has_enough_text,
    is_restricted_url,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use url::Url;
use uuid::Uuid;

use crate::config::ServerConfig;
use crate::error::AppError;

const API_KEY_HEADER: &str = "x-api-key";

/// Shared, read-only handler state.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

struct Inner {
    extract: ExtractConfig,
    client: GeminiClient,
    api_key: Option<String>,
}

impl AppState {
    /// `api_key` is the fallback used when a request carries no `x-api-key` header.
    pub fn new(extract: ExtractConfig, client: GeminiClient, api_key: Option<String>) -> Self {
        Self { inner: Arc::new(Inner { extract, client, api_key }) }
    }
}

/// Page payload shared by both endpoints.
#[derive(Debug, Deserialize)]
pub struct PagePayload {
    pub html: String,
    pub url: Option<String>,
    pub content_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExtractBody {
    #[serde(flatten)]
    pub request: ExtractRequest,
    #[serde(flatten)]
    pub page: PagePayload,
}

#[derive(Debug, Deserialize)]
pub struct SummarizeBody {
    #[serde(flatten)]
    pub page: PagePayload,
    #[serde(default)]
    pub summary_type: SummaryType,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummarizeResponse {
    pub summary: String,
    pub text_length: usize,
}

#[derive(Clone, Copy, Default)]
struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string()).ok().map(RequestId::new)
    }
}

pub fn router(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/extract", post(extract))
        .route("/summarize", post(summarize))
        .with_state(state)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::with_status_code(StatusCode::GATEWAY_TIMEOUT, config.request_timeout))
        .layer(CorsLayer::permissive())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

fn validate_page_url(page: &PagePayload) -> Result<(), AppError> {
    let Some(url) = page.url.as_deref() else {
        return Ok(());
    };

    if is_restricted_url(url) {
        return Err(AppError::BadRequest(RESTRICTED_PAGE_MESSAGE.to_string()));
    }

    Url::parse(url).map_err(|e| AppError::BadRequest(format!("Invalid URL: {}", e)))?;
    Ok(())
}

fn build_document(page: PagePayload) -> Result<Document, AppError> {
    let mut doc = Document::parse(&page.html)?;
    if let Some(url) = page.url {
        doc = doc.with_url(url);
    }
    if let Some(content_type) = page.content_type {
        doc = doc.with_content_type(content_type);
    }
    Ok(doc)
}

/// Parse and extract off the async runtime.
async fn extract_text(page: PagePayload, config: ExtractConfig) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || {
        let doc = build_document(page)?;
        Ok::<_, AppError>(extract_article_text(&doc, &config))
    })
    .await
    .map_err(|e| AppError::Internal(format!("extraction task failed: {}", e)))?
}

async fn extract(
    State(state): State<AppState>, Json(body): Json<ExtractBody>,
) -> Result<Json<ArticleTextResponse>, AppError> {
    validate_page_url(&body.page)?;

    let request = body.request;
    let config = state.inner.extract.clone();
    let response = tokio::task::spawn_blocking(move || {
        let doc = build_document(body.page)?;
        Ok::<_, AppError>(handle_request(&doc, &request, &config))
    })
    .await
    .map_err(|e| AppError::Internal(format!("extraction task failed: {}", e)))??;

    response
        .map(Json)
        .ok_or_else(|| AppError::BadRequest("unsupported message type".to_string()))
}

async fn summarize(
    State(state): State<AppState>, headers: HeaderMap, Json(body): Json<SummarizeBody>,
) -> Result<Json<SummarizeResponse>, AppError> {
    let api_key = headers
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_string)
        .or_else(|| state.inner.api_key.clone())
        .ok_or(PrecisError::MissingApiKey)?;

    validate_page_url(&body.page)?;

    let text = extract_text(body.page, state.inner.extract.clone()).await?;
    if !has_enough_text(&text) {
        return Err(AppError::Unprocessable(INSUFFICIENT_TEXT_MESSAGE.to_string()));
    }

    tracing::info!(summary_type = %body.summary_type, chars = text.chars().count(), "summarizing page");

    let summary = state.inner.client.summarize(&text, &body.summary_type, &api_key).await?;

    Ok(Json(SummarizeResponse { summary, text_length: text.chars().count() }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::header::CONTENT_TYPE;
    use precis_core::{NO_CONTENT_SENTINEL, SummaryConfig};
    use std::time::Duration;
    use tower::ServiceExt;

    fn app(api_key: Option<&str>) -> Router {
        let summary = SummaryConfig { endpoint: "http://127.0.0.1:1".to_string(), ..Default::default() };
        let state = AppState::new(
            ExtractConfig::default(),
            GeminiClient::new(summary).unwrap(),
            api_key.map(str::to_string),
        );
        let config = ServerConfig { addr: "127.0.0.1:0".parse().unwrap(), request_timeout: Duration::from_secs(5) };
        router(state, &config)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn article_html() -> String {
        let paragraph = "The harbour master publishes tide tables for every week of the year. ".repeat(4);
        format!("<html><body><nav>Menu</nav><article><p>{}</p></article></body></html>", paragraph)
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(None)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
        assert_eq!(read_json(response).await, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn test_extract() {
        let body = json!({ "type": "GET_ARTICLE_TEXT", "html": article_html(), "url": "https://harbour.example/tides" });
        let response = app(None).oneshot(post_json("/extract", body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let value = read_json(response).await;
        let text = value["text"].as_str().unwrap();
        assert!(text.starts_with("The harbour master publishes tide tables"));
        assert!(!text.contains("Menu"));
    }

    #[tokio::test]
    async fn test_extract_empty_page_returns_sentinel() {
        let body = json!({ "type": "GET_ARTICLE_TEXT", "html": "<html><body></body></html>" });
        let response = app(None).oneshot(post_json("/extract", body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await, json!({ "text": NO_CONTENT_SENTINEL }));
    }

    #[tokio::test]
    async fn test_extract_unknown_type() {
        let body = json!({ "type": "PING", "html": article_html() });
        let response = app(None).oneshot(post_json("/extract", body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_json(response).await["error"], "unsupported message type");
    }

    #[tokio::test]
    async fn test_extract_restricted_url() {
        let body = json!({ "type": "GET_ARTICLE_TEXT", "html": article_html(), "url": "chrome://newtab" });
        let response = app(None).oneshot(post_json("/extract", body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_json(response).await["error"], RESTRICTED_PAGE_MESSAGE);
    }

    #[tokio::test]
    async fn test_summarize_without_key() {
        let body = json!({ "html": article_html(), "summary_type": "brief" });
        let response = app(None).oneshot(post_json("/summarize", body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let error = read_json(response).await["error"].as_str().unwrap().to_string();
        assert!(error.contains("API key not found"));
    }

    #[tokio::test]
    async fn test_summarize_short_text() {
        let body = json!({ "html": "<p>Too short</p>", "summary_type": "bullets" });
        let request = Request::post("/summarize")
            .header(CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, "AIzaHeaderKey")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app(None).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(read_json(response).await["error"], INSUFFICIENT_TEXT_MESSAGE);
    }

    #[tokio::test]
    async fn test_summarize_upstream_unreachable() {
        let body = json!({ "html": article_html(), "url": "https://harbour.example/tides" });
        let response = app(Some("AIzaStateKey")).oneshot(post_json("/summarize", body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
