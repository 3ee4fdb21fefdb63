//! Warden Server: admin login and token lifecycle service.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use warden_api::{AppState, build_app};
use warden_auth::captcha::{CacheCaptchaService, CaptchaService};
use warden_auth::credential::{CredentialValidator, LoginRules};
use warden_auth::events::{EventDispatcher, TracingListener};
use warden_auth::jwt::TokenCodec;
use warden_auth::password::PasswordHasher;
use warden_auth::revocation::RevocationStore;
use warden_auth::session::SessionManager;
use warden_cache::CacheManager;
use warden_core::config::AppConfig;
use warden_core::error::AppError;
use warden_core::traits::AdminDirectory;
use warden_database::{AdminRepository, DatabasePool, MemoryAdminDirectory};

#[tokio::main]
async fn main() {
    let env = std::env::var("WARDEN_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config, &env).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig, env: &str) -> Result<(), AppError> {
    tracing::info!("Starting Warden v{} (env: {})", env!("CARGO_PKG_VERSION"), env);

    if config.passport.refresh_outlived_by_access() {
        tracing::warn!(
            access_expires_in = config.passport.access_expires_in,
            refresh_expires_in = config.passport.refresh_expires_in,
            "Refresh tokens expire before access tokens; check passport lifetimes"
        );
    }

    // ── Step 1: Cache ────────────────────────────────────────────
    tracing::info!("Initializing cache (provider: {})...", config.cache.provider);
    let cache = Arc::new(CacheManager::new(&config.cache).await?);
    let revocation_cache = Arc::new(CacheManager::new_unbounded(&config.cache).await?);

    // ── Step 2: Admin directory ──────────────────────────────────
    let (directory, db_pool) = build_directory(&config).await?;

    // ── Step 3: Passport ─────────────────────────────────────────
    let passport = &config.passport;
    let captcha: Arc<dyn CaptchaService> =
        Arc::new(CacheCaptchaService::from_config(cache.clone(), passport));
    let credentials = CredentialValidator::new(
        LoginRules::new(passport.captcha_length),
        captcha.clone(),
        directory,
        PasswordHasher::from_config(passport)?,
    );
    let session_manager = SessionManager::new(
        passport,
        credentials,
        Arc::new(TokenCodec::new(passport)?),
        RevocationStore::new(revocation_cache),
        EventDispatcher::new().with_listener(Arc::new(TracingListener)),
    );

    // ── Step 4: HTTP server ──────────────────────────────────────
    let addr = config.server.bind_address();
    let state = AppState {
        config: Arc::new(config),
        cache,
        session_manager: Arc::new(session_manager),
        captcha,
    };
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Warden server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    if let Some(pool) = db_pool {
        pool.close().await;
    }

    tracing::info!("Warden server stopped");
    Ok(())
}

/// Selects the admin directory backend.
async fn build_directory(
    config: &AppConfig,
) -> Result<(Arc<dyn AdminDirectory>, Option<DatabasePool>), AppError> {
    match config.directory.provider.as_str() {
        "postgres" => {
            tracing::info!("Connecting to database...");
            let pool = DatabasePool::connect(&config.database).await?;
            let repository = AdminRepository::new(pool.pool().clone());
            Ok((Arc::new(repository), Some(pool)))
        }
        "memory" => {
            let directory = MemoryAdminDirectory::from_seeds(&config.directory.admins);
            if directory.is_empty() {
                tracing::warn!("In-memory admin directory has no accounts; every login will fail");
            } else {
                tracing::info!(admins = directory.len(), "In-memory admin directory loaded");
            }
            Ok((Arc::new(directory), None))
        }
        other => Err(AppError::configuration(format!(
            "Unknown directory provider '{other}'. Supported: memory, postgres"
        ))),
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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
}
