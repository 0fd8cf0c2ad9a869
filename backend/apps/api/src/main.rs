//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use std::net::SocketAddr;
use std::sync::Arc;

use api::{AppConfig, AppParts, build_app};
use auth::PgUserRepository;
use axum::ServiceExt;
use axum::extract::Request;
use blog::PgPostRepository;
use platform::mail::{HttpMailer, LogMailer};
use platform::view::Views;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,blog=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let views = Arc::new(Views::from_glob(&config.templates_glob())?);

    let users = PgUserRepository::new(pool.clone());
    let posts = PgPostRepository::new(pool);

    // Mail delivery falls back to the log when no API is configured
    let app = match config.mail.clone() {
        Some(mail) => {
            tracing::info!(api_url = %mail.api_url, "Mail delivery through HTTP API");
            build_app(AppParts {
                users,
                posts,
                mailer: HttpMailer::new(mail),
                auth: config.auth.clone(),
                blog: config.blog,
                views,
                static_dir: config.static_dir.clone(),
            })
        }
        None => {
            tracing::warn!("MAIL_API_URL not set; verification mails are only logged");
            build_app(AppParts {
                users,
                posts,
                mailer: LogMailer,
                auth: config.auth.clone(),
                blog: config.blog,
                views,
                static_dir: config.static_dir.clone(),
            })
        }
    };

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;

    Ok(())
}
