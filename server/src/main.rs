use crate::cli::{Cli, Command};
use crate::config::ServerConfig;
use crate::error::StackTrace;
use crate::handler::AppModule;
use crate::route::{CustomerRouter, GenreRouter, MovieRouter, RentalRouter, RootRouter};
use application::service::SeedCatalogService;
use axum::Router;
use clap::Parser;
use driver::database::PostgresDatabase;
use error_stack::ResultExt;
use kernel::KernelError;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

mod cli;
mod config;
mod controller;
mod error;
mod handler;
mod response;
mod route;

#[tokio::main]
async fn main() -> Result<(), StackTrace> {
    let appender = tracing_appender::rolling::daily(std::path::Path::new("./logs/"), "debug.log");
    let (non_blocking_appender, _guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_filter(tracing_subscriber::EnvFilter::new(
                    std::env::var("RUST_LOG").unwrap_or_else(|_| {
                        "driver=debug,server=debug,application=debug,tower_http=debug,sqlx=info"
                            .into()
                    }),
                ))
                .with_filter(tracing_subscriber::filter::LevelFilter::DEBUG),
        )
        .with(
            tracing_subscriber::fmt::Layer::default()
                .with_writer(non_blocking_appender)
                .with_ansi(false)
                .with_filter(tracing_subscriber::filter::LevelFilter::DEBUG),
        )
        .init();

    match Cli::parse().command() {
        Command::Serve => serve().await?,
        Command::Seed => seed().await?,
    }

    Ok(())
}

async fn seed() -> error_stack::Result<(), KernelError> {
    let database = PostgresDatabase::new().await?;
    if database.seed_catalog().await? {
        tracing::info!("Seeded starter catalog");
    } else {
        tracing::warn!("Catalog already has genres; nothing seeded");
    }
    Ok(())
}

async fn serve() -> error_stack::Result<(), KernelError> {
    let config = ServerConfig::from_env()?;
    let app = AppModule::new().await?;

    let api = Router::new()
        .route_root()
        .route_rental()
        .route_movie()
        .route_genre()
        .route_customer();

    let router = Router::new()
        .nest(&config.base_path(), api)
        .fallback(route::route_not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new())
        .with_state(app);

    let bind = SocketAddr::from(([0, 0, 0, 0], config.port));
    let tcp = TcpListener::bind(bind)
        .await
        .change_context_lazy(|| KernelError::Internal)
        .attach_printable_lazy(|| format!("Failed to listen on {bind}"))?;
    tracing::info!("Serving {} on {bind}", config.base_path());

    axum::serve(tcp, router.into_make_service())
        .await
        .change_context_lazy(|| KernelError::Internal)?;

    Ok(())
}
