use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Extension, Query, State},
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post, MethodRouter},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::config::{self, SecurityConfig};
use crate::database::Store;
use crate::handlers::{protected, public};
use crate::middleware::{jwt_auth_middleware, AuthUser};
use crate::resources::{self, Resource};

/// Shared by every handler; the store is the only state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }
}

pub fn app(state: AppState) -> Router {
    let config = config::config();

    Router::new()
        // Public
        .route("/health", get(public::health_get))
        .route("/api/login", post(public::login_post))
        // Protected
        .merge(protected_routes())
        // Built client for everything else
        .fallback_service(client_service(&config.server.client_build_dir))
        // Global middleware
        .layer(cors_layer(&config.security))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn protected_routes() -> Router<AppState> {
    let mut router = Router::new().route("/api/accounts", get(protected::accounts_get));

    for resource in resources::ALL {
        let path = format!("/api/secure/{}", resource.collection);
        router = router.route(&path, resource_routes(resource));
    }

    router.route_layer(middleware::from_fn(jwt_auth_middleware))
}

fn resource_routes(resource: &'static Resource) -> MethodRouter<AppState> {
    get(
        move |State(state): State<AppState>,
              Extension(user): Extension<AuthUser>,
              Query(query): Query<HashMap<String, String>>| {
            protected::resource::list(resource, state, user, query)
        },
    )
    .post(
        move |State(state): State<AppState>, Extension(user): Extension<AuthUser>, body: Bytes| {
            protected::resource::create(resource, state, user, body)
        },
    )
    .put(
        move |State(state): State<AppState>, Extension(user): Extension<AuthUser>, body: Bytes| {
            protected::resource::update(resource, state, user, body)
        },
    )
    .delete(
        move |State(state): State<AppState>, Extension(user): Extension<AuthUser>, body: Bytes| {
            protected::resource::delete(resource, state, user, body)
        },
    )
}

/// Static files, with `index.html` for client-side routes
fn client_service(build_dir: &str) -> ServeDir<ServeFile> {
    let index = Path::new(build_dir).join("index.html");
    ServeDir::new(build_dir).fallback(ServeFile::new(index))
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if !security.enable_cors {
        return CorsLayer::new();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}
