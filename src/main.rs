mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::{Config, StorageBackend};
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::auth::routes as auth_routes;
use crate::features::auth::{
    AccountRepository, AuthService, JwtValidator, PgAccountRepository, TokenService,
};
use crate::features::categories::{
    routes as categories_routes, CategoryRepository, CategoryService, PgCategoryRepository,
};
use crate::features::citizens::{
    routes as citizens_routes, CitizenRepository, CitizenService, PgCitizenRepository,
};
use crate::features::complaints::{
    routes as complaints_routes, AssignmentRepository, ComplaintRepository, ComplaintService,
    PgAssignmentRepository, PgComplaintRepository,
};
use crate::features::dashboard::{self, DashboardService, PgDashboardRepository};
use crate::features::departments::{
    routes as departments_routes, DepartmentRepository, DepartmentService, PgDepartmentRepository,
};
use crate::features::files::{self, FileRepository, FileService, PgFileRepository};
use crate::features::grievances::{
    routes as grievances_routes, GrievanceService, PgGrievanceRepository,
};
use crate::features::notifications::{
    routes as notifications_routes, NotificationRepository, NotificationService,
    PgNotificationRepository,
};
use crate::features::officers::{
    routes as officers_routes, OfficerRepository, OfficerService, PgOfficerRepository,
};
use crate::features::statuses::{routes as statuses_routes, PgStatusRepository, StatusService};
use axum::extract::DefaultBodyLimit;
use axum::{middleware::from_fn, Router};
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    let available_cpus = std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1);
    tracing::info!(
        "System info: available_cpus={}, tokio_worker_threads={}, pid={}",
        available_cpus,
        worker_threads,
        std::process::id()
    );

    tracing::info!("Configuration loaded successfully");

    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    tracing::info!("Running database migrations...");
    database::run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    // Repositories
    let accounts: Arc<dyn AccountRepository> = Arc::new(PgAccountRepository::new(pool.clone()));
    let departments: Arc<dyn DepartmentRepository> =
        Arc::new(PgDepartmentRepository::new(pool.clone()));
    let categories: Arc<dyn CategoryRepository> =
        Arc::new(PgCategoryRepository::new(pool.clone()));
    let citizens: Arc<dyn CitizenRepository> = Arc::new(PgCitizenRepository::new(pool.clone()));
    let officers: Arc<dyn OfficerRepository> = Arc::new(PgOfficerRepository::new(pool.clone()));
    let notification_store: Arc<dyn NotificationRepository> =
        Arc::new(PgNotificationRepository::new(pool.clone()));
    let complaints: Arc<dyn ComplaintRepository> =
        Arc::new(PgComplaintRepository::new(pool.clone()));
    let assignments: Arc<dyn AssignmentRepository> =
        Arc::new(PgAssignmentRepository::new(pool.clone()));
    let stored_files: Arc<dyn FileRepository> = Arc::new(PgFileRepository::new(pool.clone()));

    // Auth
    let jwt_validator = Arc::new(JwtValidator::new(&config.auth, Arc::clone(&accounts)));
    let token_service = Arc::new(TokenService::new(&config.auth));
    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&accounts),
        Arc::clone(&citizens),
        Arc::clone(&officers),
        Arc::clone(&departments),
        token_service,
    ));
    tracing::info!("Auth configuration initialized");

    if let Some((email, password)) = config.bootstrap.admin_credentials() {
        if auth_service.bootstrap_admin(email, password).await? {
            tracing::info!("Bootstrap admin created");
        }
    } else {
        tracing::info!("ADMIN_EMAIL/ADMIN_PASSWORD not set, skipping admin bootstrap");
    }

    // Domain services
    let notification_service = Arc::new(NotificationService::new(
        Arc::clone(&notification_store),
        Arc::clone(&citizens),
        Arc::clone(&officers),
    ));
    let department_service = Arc::new(DepartmentService::new(Arc::clone(&departments)));
    let category_service = Arc::new(CategoryService::new(
        Arc::clone(&categories),
        Arc::clone(&departments),
    ));
    let citizen_service = Arc::new(CitizenService::new(Arc::clone(&citizens)));
    let officer_service = Arc::new(OfficerService::new(
        Arc::clone(&officers),
        Arc::clone(&departments),
        Arc::clone(&notification_service),
    ));
    let status_service = Arc::new(StatusService::new(Arc::new(PgStatusRepository::new(
        pool.clone(),
    ))));
    let complaint_service = Arc::new(ComplaintService::new(
        Arc::clone(&complaints),
        Arc::clone(&assignments),
        Arc::clone(&categories),
        Arc::clone(&citizens),
        Arc::clone(&officers),
        Arc::clone(&stored_files),
        Arc::clone(&notification_service),
    ));
    let grievance_service = Arc::new(GrievanceService::new(
        Arc::new(PgGrievanceRepository::new(pool.clone())),
        Arc::clone(&complaints),
        Arc::clone(&assignments),
        Arc::clone(&citizens),
        Arc::clone(&officers),
        Arc::clone(&notification_service),
    ));
    let dashboard_service = Arc::new(DashboardService::new(
        Arc::new(PgDashboardRepository::new(pool.clone())),
        Arc::clone(&citizens),
        Arc::clone(&officers),
        Arc::clone(&notification_store),
    ));
    tracing::info!("Domain services initialized");

    // File storage
    let storage = crate::modules::storage::connect(&config.storage).await?;
    let file_service = Arc::new(FileService::new(Arc::clone(&stored_files), storage));
    tracing::info!("File storage initialized ({:?})", config.storage.backend);

    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn(middleware::basic_auth_middleware(Arc::new(
                credentials,
            ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    // Protected routes (require JWT authentication)
    let protected_routes = Router::new()
        .merge(auth_routes::protected_routes(Arc::clone(&auth_service)))
        .merge(citizens_routes::routes(Arc::clone(&citizen_service)))
        .merge(citizens_routes::admin_routes(citizen_service))
        .merge(officers_routes::routes(Arc::clone(&officer_service)))
        .merge(officers_routes::admin_routes(officer_service))
        .merge(departments_routes::admin_routes(Arc::clone(
            &department_service,
        )))
        .merge(categories_routes::admin_routes(Arc::clone(&category_service)))
        .merge(complaints_routes::routes(Arc::clone(&complaint_service)))
        .merge(complaints_routes::officer_routes(Arc::clone(
            &complaint_service,
        )))
        .merge(complaints_routes::admin_routes(complaint_service))
        .merge(grievances_routes::routes(Arc::clone(&grievance_service)))
        .merge(grievances_routes::officer_routes(Arc::clone(
            &grievance_service,
        )))
        .merge(grievances_routes::admin_routes(grievance_service))
        .merge(notifications_routes::routes(notification_service))
        .merge(files::routes(file_service))
        .merge(dashboard::routes(dashboard_service))
        .route_layer(axum::middleware::from_fn_with_state(
            jwt_validator,
            middleware::auth_middleware,
        ));

    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    // Public routes (no auth required)
    let mut public_routes = Router::new()
        .merge(auth_routes::public_routes(auth_service))
        .merge(departments_routes::routes(department_service))
        .merge(categories_routes::routes(category_service))
        .merge(statuses_routes::routes(status_service));

    if config.storage.backend == StorageBackend::Local {
        public_routes =
            public_routes.nest_service("/uploads", ServeDir::new(&config.storage.local_dir));
    }

    let app = Router::new()
        .merge(swagger)
        .merge(protected_routes)
        .merge(public_routes)
        .merge(health_route)
        .layer(DefaultBodyLimit::max(config.app.max_request_body_size))
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nodelay(true)?;

    socket.set_recv_buffer_size(256 * 1024)?;
    socket.set_send_buffer_size(256 * 1024)?;

    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}
