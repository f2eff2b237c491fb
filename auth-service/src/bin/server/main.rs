use std::sync::Arc;

use auth::Authenticator;
use auth_service::config::Config;
use auth_service::domain::user::ports::UserRepository;
use auth_service::domain::user::service::AuthService;
use auth_service::inbound::grpc::AuthGrpcService;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::repositories::InMemoryUserRepository;
use auth_service::outbound::repositories::PostgresUserRepository;
use auth_service::proto::auth_service_server::AuthServiceServer;
use sqlx::postgres::PgPoolOptions;
use tonic::transport::Server;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "auth-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        grpc_port = config.server.grpc_port,
        jwt_algorithm = %config.jwt.algorithm,
        persistent = config.database.url.is_some(),
        "Configuration loaded"
    );

    let authenticator = Arc::new(config.authenticator()?);
    tracing::info!(
        token_ttl_seconds = authenticator.token_ttl().num_seconds(),
        "Credentials configured"
    );

    match config.database.url.as_deref() {
        Some(url) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            let repository = Arc::new(PostgresUserRepository::new(pg_pool));
            serve(&config, repository, authenticator).await
        }
        None => {
            tracing::warn!("database.url not set, users are kept in memory only");
            let repository = Arc::new(InMemoryUserRepository::new());
            serve(&config, repository, authenticator).await
        }
    }
}

async fn serve<UR: UserRepository>(
    config: &Config,
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
) -> Result<(), anyhow::Error> {
    let auth_service = Arc::new(AuthService::new(repository, authenticator));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(Arc::clone(&auth_service));
    let http_server =
        tokio::spawn(async move { axum::serve(http_listener, http_application).await });

    let grpc_address = format!("0.0.0.0:{}", config.server.grpc_port).parse()?;
    let grpc_service = AuthGrpcService::new(Arc::clone(&auth_service));
    tracing::info!(
        address = %grpc_address,
        port = config.server.grpc_port,
        protocol = "grpc",
        "gRpc server listening"
    );

    let grpc_server = tokio::spawn(async move {
        Server::builder()
            .add_service(AuthServiceServer::new(grpc_service))
            .serve(grpc_address)
            .await
    });

    match tokio::try_join!(http_server, grpc_server) {
        Ok((http_result, grpc_result)) => {
            http_result?;
            grpc_result?;
            tracing::info!("Servers exited successfully");
        }
        Err(e) => tracing::error!(error = %e, "Server task failed"),
    };

    Ok(())
}
