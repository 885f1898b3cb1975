use crate::{
    config::Config,
    dashboard::Dashboard,
    error::AppError,
    site::{Site, SiteStore},
    site_text,
    storage::BackendLocal,
};
use anyhow::Context;
use axum::{
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::{signal, sync::RwLock};

struct SharedState {
    dashboard: RwLock<Dashboard>,
    store: SiteStore<BackendLocal>,
}

type AppState = State<Arc<SharedState>>;

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            log::error!("failed to install Ctrl+C handler: {err}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => log::error!("failed to install signal handler: {err}"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    log::warn!("shutting down");
}

pub fn router(dashboard: Dashboard, store: SiteStore<BackendLocal>, max_body_bytes: usize) -> Router {
    let shared_state = Arc::new(SharedState {
        dashboard: RwLock::new(dashboard),
        store,
    });

    Router::new()
        .route("/api/sites", get(list).post(create).delete(delete))
        .route("/api/sites/search", post(search))
        .route("/api/sites/parse", post(parse))
        .route("/api/sites/serialize", post(serialize))
        .route("/api/tags/toggle", post(toggle_tag))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(
                    tower_http::trace::DefaultMakeSpan::new().level(tracing::Level::INFO),
                )
                .on_response(
                    tower_http::trace::DefaultOnResponse::new().level(tracing::Level::INFO),
                ),
        )
        .with_state(shared_state)
}

async fn start_app(config: Config) -> anyhow::Result<()> {
    let store = config.site_store()?;
    let dashboard = Dashboard::new(store.load()?);
    log::info!("serving {} sites", dashboard.sites().len());

    let app = router(dashboard, store, config.max_body_bytes);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("couldnt bind {}", config.listen_addr))?;
    log::info!("listening on {}", config.listen_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

pub fn start_daemon(config: Config) -> anyhow::Result<()> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(start_app(config))
}

#[derive(Debug)]
struct HttpError(AppError);

impl IntoResponse for HttpError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.0 {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Parse(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Other(_) => {
                log::error!("{self:?}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (
            status,
            Json(json!({"success": false, "error": self.0.to_string()})),
        )
            .into_response()
    }
}

impl<E> From<E> for HttpError
where
    E: Into<AppError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

fn success(data: impl serde::Serialize) -> Json<Value> {
    Json(json!({"success": true, "data": data}))
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct TextRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct ToggleTagRequest {
    pub tag: String,
    #[serde(default)]
    pub query: String,
}

async fn list(State(state): AppState) -> Json<Value> {
    let dashboard = state.dashboard.read().await;
    success(dashboard.sites())
}

async fn search(State(state): AppState, Json(payload): Json<SearchRequest>) -> Json<Value> {
    let dashboard = state.dashboard.read().await;
    success(dashboard.search(&payload.query))
}

async fn parse(Json(payload): Json<TextRequest>) -> Result<Json<Value>, HttpError> {
    let site = site_text::parse(&payload.text)?;
    Ok(success(site))
}

async fn serialize(Json(site): Json<Site>) -> Json<Value> {
    success(site_text::serialize(&site))
}

async fn create(
    State(state): AppState,
    Json(payload): Json<TextRequest>,
) -> Result<Json<Value>, HttpError> {
    let mut dashboard = state.dashboard.write().await;
    let previous = dashboard.sites().to_vec();

    let (site, overwritten) = dashboard.save_text(&payload.text)?;
    let site = site.clone();
    if let Err(err) = state.store.save(dashboard.sites()) {
        dashboard.replace_sites(previous);
        return Err(err.into());
    }

    log::info!(
        "site {} {}",
        site.url,
        if overwritten { "updated" } else { "created" }
    );

    Ok(Json(
        json!({"success": true, "data": site, "overwritten": overwritten}),
    ))
}

async fn delete(
    State(state): AppState,
    Json(payload): Json<DeleteRequest>,
) -> Result<Json<Value>, HttpError> {
    let mut dashboard = state.dashboard.write().await;
    let previous = dashboard.sites().to_vec();

    let removed = dashboard.remove(&payload.url).ok_or(AppError::NotFound)?;
    if let Err(err) = state.store.save(dashboard.sites()) {
        dashboard.replace_sites(previous);
        return Err(err.into());
    }

    log::info!("site {} removed", removed.url);
    Ok(success(removed))
}

async fn toggle_tag(
    State(state): AppState,
    Json(payload): Json<ToggleTagRequest>,
) -> Json<Value> {
    let mut dashboard = state.dashboard.write().await;
    success(dashboard.click_tag(&payload.tag, &payload.query))
}
