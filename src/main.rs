use std::{future::IntoFuture, process, sync::Arc};

use tidepost::{
    application::{
        auth::{AuthService, TokenService},
        error::AppError,
        posts::PostService,
        repos::{HealthRepo, PostsRepo, UsersRepo},
    },
    cache::{CacheConfig, PostListCache},
    config,
    infra::{
        db::PostgresRepositories,
        error::InfraError,
        http::{self, AppState},
        telemetry,
    },
};
use tokio::sync::Notify;
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
        config::Command::Migrate(_) => run_migrate(settings).await,
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let secret = settings
        .auth
        .jwt_secret
        .as_ref()
        .ok_or_else(|| InfraError::configuration("auth.jwt_secret is not configured"))?;

    let repositories = init_repositories(&settings).await?;
    let state = build_app_state(repositories, &settings, secret.expose());

    serve_http(&settings, state).await
}

async fn run_migrate(settings: config::Settings) -> Result<(), AppError> {
    init_repositories(&settings).await?;
    info!(target = "tidepost::migrate", "schema is up to date");
    Ok(())
}

/// Connects and brings the schema up to date; every entry point goes through here.
async fn init_repositories(
    settings: &config::Settings,
) -> Result<Arc<PostgresRepositories>, AppError> {
    let database_url = settings
        .database
        .url
        .as_ref()
        .ok_or_else(|| InfraError::configuration("database url is not configured"))?;

    let pool =
        PostgresRepositories::connect(database_url, settings.database.max_connections.get())
            .await
            .map_err(InfraError::from)?;

    PostgresRepositories::run_migrations(&pool)
        .await
        .map_err(InfraError::from)?;

    Ok(Arc::new(PostgresRepositories::new(pool)))
}

fn build_app_state(
    repositories: Arc<PostgresRepositories>,
    settings: &config::Settings,
    secret: &[u8],
) -> AppState {
    let users_repo: Arc<dyn UsersRepo> = repositories.clone();
    let posts_repo: Arc<dyn PostsRepo> = repositories.clone();
    let health_repo: Arc<dyn HealthRepo> = repositories;

    let tokens = Arc::new(TokenService::new(secret, settings.auth.token_ttl));
    let cache = Arc::new(PostListCache::new(&CacheConfig::from(&settings.cache)));

    let auth = AuthService::new(users_repo, tokens.clone())
        .with_min_password_chars(settings.auth.min_password_chars);
    let posts = PostService::new(posts_repo, tokens, cache)
        .with_max_text_bytes(settings.posts.max_text_bytes.get());

    AppState {
        auth: Arc::new(auth),
        posts: Arc::new(posts),
        health: health_repo,
    }
}

async fn serve_http(settings: &config::Settings, state: AppState) -> Result<(), AppError> {
    let router = http::build_router(state, settings.server.max_body_bytes.get());

    let listener = tokio::net::TcpListener::bind(settings.server.addr)
        .await
        .map_err(InfraError::from)?;
    info!(
        target = "tidepost::http",
        addr = %settings.server.addr,
        "listening"
    );

    let drain = Arc::new(Notify::new());
    let drain_signal = drain.clone();
    let server = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move { drain_signal.notified().await })
        .into_future();
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => {
            return result.map_err(|err| AppError::unexpected(format!("server error: {err}")));
        }
        () = shutdown_signal() => {}
    }

    info!(
        target = "tidepost::http",
        timeout_secs = settings.server.graceful_shutdown.as_secs(),
        "shutdown requested, draining connections"
    );
    drain.notify_one();

    match tokio::time::timeout(settings.server.graceful_shutdown, server).await {
        Ok(result) => {
            result.map_err(|err| AppError::unexpected(format!("server error: {err}")))
        }
        Err(_) => {
            warn!(
                target = "tidepost::http",
                "graceful shutdown timed out, dropping remaining connections"
            );
            Ok(())
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
