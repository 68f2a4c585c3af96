use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::http::{header, HeaderName, HeaderValue, Method};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing::info;

use edu_api::{build_router, AppState};
use edu_core::services::{
    AuthService, FoundationService, ResolutionMode, StudentService, TenantContextResolver,
    TenantService,
};
use edu_infrastructure::database::connection::statement_timeout;
use edu_infrastructure::{
    create_pool, run_directory_migrations, BaselineSchema, NamespaceExecutor,
    PgFoundationRepository, PgStudentRepository, PgTenantDirectory, PgTenantLifecycle,
    PgTenantUserRepository,
};
use edu_security::JwtService;
use edu_shared::config::AppConfig;
use edu_shared::constants::ADMIN_KEY_HEADER;
use edu_shared::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Load configuration, then telemetry (log settings come from config)
    let config = AppConfig::load().context("Failed to load configuration")?;
    telemetry::init_telemetry(&config.log)?;

    info!(env = %config.app.env, "EDU Server starting...");

    // Baseline schema artifact for new tenants
    let baseline = match &config.tenancy.baseline_dir {
        Some(dir) => BaselineSchema::from_dir(dir)
            .with_context(|| format!("Failed to load baseline schema from {}", dir))?,
        None => BaselineSchema::embedded(),
    };
    info!(
        version = baseline.version(),
        files = baseline.files().len(),
        "Baseline schema artifact loaded"
    );

    // Connect to Database
    info!(max_connections = config.database.max_connections, "Connecting to database...");
    let pool = create_pool(&config.database)
        .await
        .context("Failed to connect to database")?;
    run_directory_migrations(&pool)
        .await
        .context("Failed to run directory migrations")?;
    info!("Database connection established.");

    // Wire repositories and services
    let jwt = JwtService::new(&config.jwt.secret, config.jwt.access_token_expiry);
    let executor = Arc::new(NamespaceExecutor::new(
        pool.clone(),
        statement_timeout(&config.database),
    ));
    let directory = Arc::new(PgTenantDirectory::new(pool.clone()));
    let foundations = Arc::new(PgFoundationRepository::new(pool.clone()));
    let lifecycle = Arc::new(PgTenantLifecycle::new(pool.clone(), Arc::new(baseline)));
    let mode = ResolutionMode::from_config(config.tenancy.verify_tenant_exists);
    info!(mode = ?mode, "Tenant resolution mode");

    let state = AppState {
        db: pool,
        resolver: Arc::new(TenantContextResolver::new(jwt.clone(), directory.clone(), mode)),
        auth_service: Arc::new(AuthService::new(
            Arc::new(PgTenantUserRepository::new(executor.clone())),
            directory.clone(),
            jwt,
        )),
        tenant_service: Arc::new(TenantService::new(directory, lifecycle.clone())),
        foundation_service: Arc::new(FoundationService::new(foundations, lifecycle)),
        student_service: Arc::new(StudentService::new(Arc::new(PgStudentRepository::new(executor)))),
        tenant_header: Arc::from(config.tenancy.header_name.as_str()),
        admin_api_key: Arc::from(config.admin.api_key.as_str()),
    };

    // Build router
    let app = build_router(state)
        .layer(cors_layer(&config)?)
        .layer(TimeoutLayer::new(Duration::from_secs(config.app.request_timeout_seconds)))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(false)),
        )
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("EDU Server stopped");
    Ok(())
}

fn cors_layer(config: &AppConfig) -> anyhow::Result<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_bytes(config.tenancy.header_name.as_bytes())?,
            HeaderName::from_bytes(ADMIN_KEY_HEADER.as_bytes())?,
        ]);

    Ok(match &config.app.cors_origin {
        Some(origin) => layer.allow_origin(origin.parse::<HeaderValue>()?),
        None => layer,
    })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
