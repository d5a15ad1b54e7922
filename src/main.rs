use axum::http::HeaderValue;
use mimalloc::MiMalloc;
use std::net::SocketAddr;
use sylva_backend::config::Config;
use sylva_backend::db::SylvaStorage;
use sylva_backend::service::bootstrap::{self, OwnerAccount};
use sylva_backend::service::passwords::PasswordPolicy;
use sylva_backend::service::tokens::TokenSigner;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::from_env()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.database_url,
        allowed_origin = %cfg.allowed_origin.as_deref().unwrap_or("<none>"),
        loglevel = %cfg.loglevel,
        owner = %cfg.owner_username,
        token_ttl_secs = cfg.token_ttl_secs
    );

    let allowed_origin = cfg
        .allowed_origin
        .as_deref()
        .map(HeaderValue::from_str)
        .transpose()?;

    let storage = SylvaStorage::connect_lazy(&cfg.database_url)?;

    // Finish initialization before accepting connections; a failure here is
    // logged and requests fail individually until the database recovers.
    let owner = OwnerAccount {
        username: cfg.owner_username.clone(),
        password: cfg.owner_password.clone(),
    };
    match bootstrap::initialize(&storage, &owner, PasswordPolicy::new(cfg.password_time_cost)).await
    {
        Ok(()) => info!("Database initialized"),
        Err(e) => error!(error = %e, "Database initialization failed"),
    }

    let tokens = TokenSigner::new(cfg.jwt_secret.as_bytes(), cfg.token_ttl_secs);
    let state = sylva_backend::SylvaState::new(storage, tokens);
    let app = sylva_backend::sylva_router(state, allowed_origin);

    let addr = SocketAddr::new(cfg.bind_host, cfg.port);
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
