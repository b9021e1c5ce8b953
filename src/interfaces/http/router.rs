//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{delete, get, post, put, MethodRouter},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{JobService, UserService};
use crate::config::JobsConfig;
use crate::domain::RepositoryProvider;
use crate::interfaces::http::common::ErrorBody;
use crate::interfaces::http::middleware::{auth_middleware, AuthState};
use crate::interfaces::http::modules::{health, jobs, metrics, request_id, users};

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token from /api/users/signup or /api/users/login"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        users::signup,
        users::login,
        users::me,
        jobs::list_jobs,
        jobs::get_job,
        jobs::create_job,
        jobs::update_job,
        jobs::delete_job,
    ),
    components(
        schemas(
            ErrorBody,
            health::HealthResponse,
            health::ComponentHealth,
            users::SignupRequest,
            users::LoginRequest,
            users::AuthResponse,
            users::UserProfileDto,
            jobs::CompanyDto,
            jobs::CreateJobRequest,
            jobs::UpdateJobRequest,
            jobs::JobDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service and store health"),
        (name = "Users", description = "Signup, login (JWT) and the authenticated profile"),
        (name = "Jobs", description = "Job posting CRUD"),
    ),
    info(
        title = "Job Board API",
        version = "1.0.0",
        description = "User authentication and job postings backed by MongoDB"
    )
)]
pub struct ApiDoc;

/// Everything the router needs from the composition root
#[derive(Clone)]
pub struct ApiServices {
    pub repos: Arc<dyn RepositoryProvider>,
    pub user_service: Arc<UserService>,
    pub job_service: Arc<JobService>,
    /// Storage driver name reported by `/health`
    pub storage: &'static str,
}

/// Create the API router with all routes
pub fn create_api_router(
    services: ApiServices,
    jobs_config: &JobsConfig,
    prometheus_handle: Option<PrometheusHandle>,
) -> Router {
    let auth_state = AuthState {
        user_service: services.user_service.clone(),
    };

    // ── Users ──────────────────────────────────────────────────
    let user_state = users::UserHandlerState {
        user_service: services.user_service.clone(),
    };

    let user_routes = Router::new()
        .route("/signup", post(users::signup))
        .route("/login", post(users::login))
        .route(
            "/me",
            get(users::me).route_layer(middleware::from_fn_with_state(
                auth_state.clone(),
                auth_middleware,
            )),
        )
        .with_state(user_state);

    // ── Jobs ───────────────────────────────────────────────────
    // Reads stay public; mutations are guarded only in the auth variant.
    let job_state = jobs::JobHandlerState {
        job_service: services.job_service.clone(),
    };

    let guard = |route: MethodRouter<jobs::JobHandlerState>| {
        if jobs_config.require_auth {
            route.route_layer(middleware::from_fn_with_state(
                auth_state.clone(),
                auth_middleware,
            ))
        } else {
            route
        }
    };

    let job_routes = Router::new()
        .route("/", get(jobs::list_jobs).merge(guard(post(jobs::create_job))))
        .route(
            "/{id}",
            get(jobs::get_job)
                .merge(guard(put(jobs::update_job)))
                .merge(guard(delete(jobs::delete_job))),
        )
        .with_state(job_state);

    // ── Health / metrics / docs ────────────────────────────────
    let health_state = health::HealthState {
        repos: services.repos.clone(),
        storage: services.storage,
        started_at: Arc::new(Instant::now()),
    };
    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health_state);

    let mut router = Router::new()
        .nest("/api/users", user_routes)
        .nest("/api/jobs", job_routes)
        .merge(health_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()));

    if let Some(handle) = prometheus_handle {
        router = router.merge(
            Router::new()
                .route("/metrics", get(metrics::prometheus_metrics))
                .with_state(metrics::MetricsState { handle }),
        );
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .route_layer(middleware::from_fn(metrics::http_metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id::request_id_middleware))
        .layer(cors)
}
