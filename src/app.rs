use axum::{
    http::{HeaderValue, StatusCode},
    middleware,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::config::{AppConfig, StoreBackend};
use crate::database::{
    ContactStore, DatabaseError, DatabaseManager, MemoryContactStore, MemoryUserDirectory,
    PgContactStore, PgUserDirectory, UserDirectory,
};
use crate::handlers;
use crate::middleware::jwt_auth_middleware;

/// Shared handler state: the stores plus the configuration they run under
#[derive(Clone)]
pub struct AppState {
    pub contacts: Arc<dyn ContactStore>,
    pub users: Arc<dyn UserDirectory>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(
        contacts: Arc<dyn ContactStore>,
        users: Arc<dyn UserDirectory>,
        config: AppConfig,
    ) -> Self {
        Self {
            contacts,
            users,
            config: Arc::new(config),
        }
    }

    /// In-process stores, users seeded from configuration
    pub fn in_memory(config: AppConfig) -> Self {
        let users = MemoryUserDirectory::new(&config.seed.users);
        Self::new(Arc::new(MemoryContactStore::new()), Arc::new(users), config)
    }

    /// Build the stores selected by `config.database.backend`
    pub async fn from_config(config: AppConfig) -> Result<Self, DatabaseError> {
        match config.database.backend {
            StoreBackend::Memory => {
                tracing::info!("Using in-memory contact store");
                Ok(Self::in_memory(config))
            }
            StoreBackend::Postgres => {
                let pool = DatabaseManager::connect(&config.database).await?;
                DatabaseManager::migrate(&pool).await?;

                let users = PgUserDirectory::new(pool.clone());
                users.seed(&config.seed.users).await?;

                let contacts = PgContactStore::new(pool, config.database.enable_query_logging);
                tracing::info!("Using Postgres contact store");
                Ok(Self::new(Arc::new(contacts), Arc::new(users), config))
            }
        }
    }
}

pub fn app(state: AppState) -> Router {
    let static_dir = ServeDir::new(&state.config.server.static_dir);

    Router::new()
        .route("/health", get(health))
        // Public auth routes
        .merge(auth_public_routes())
        // Protected API
        .merge(contact_routes(state.clone()))
        // Single-page client and its assets
        .fallback_service(static_dir)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&state.config)),
        )
        .with_state(state)
}

fn auth_public_routes() -> Router<AppState> {
    use handlers::public::auth;

    Router::new().route("/api/login", post(auth::login_post))
}

fn contact_routes(state: AppState) -> Router<AppState> {
    use handlers::protected::contacts;

    Router::new()
        .route(
            "/api/contacts",
            get(contacts::collection_get).post(contacts::collection_post),
        )
        .route(
            "/api/contacts/:id",
            get(contacts::record_get)
                .put(contacts::record_put)
                .delete(contacts::record_delete),
        )
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let security = &config.security;
    if !security.enable_cors {
        return CorsLayer::new();
    }
    if security.cors_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::permissive().allow_origin(AllowOrigin::list(origins))
}

async fn health(axum::extract::State(state): axum::extract::State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.contacts.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "timestamp": now,
                "error": "database unavailable",
                "database_error": e.to_string()
            })),
        ),
    }
}
