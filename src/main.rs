#![warn(clippy::pedantic, clippy::all, clippy::nursery)]
#![allow(clippy::single_match_else)]

use crate::{
    config::RuntimeConfiguration,
    data::mysql::MySqlStudentStore,
    error::{BindListenerSnafu, ServeSnafu, StudentResult},
    state::AppState,
};
use axum::{ServiceExt, extract::Request};
use snafu::ResultExt;
use sqlx::mysql::MySqlPoolOptions;
use std::{process::ExitCode, sync::Arc};
use tokio::{net::TcpListener, signal};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[macro_use]
extern crate tracing;

mod config;
mod data;
mod error;
mod routes;
mod state;

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    warn!("signal received, starting graceful shutdown");
}

async fn run() -> StudentResult<()> {
    let config = RuntimeConfiguration::new()?;
    let db_config = config.db_config();

    let options = MySqlPoolOptions::new().max_connections(db_config.max_connections());
    let store = MySqlStudentStore::connect_lazy(options, &db_config);
    let state = AppState::new(Arc::new(store));

    // nothing is served until the database answers
    state.check_database().await?;
    info!("MySQL DB Connected");

    let app = routes::router(state.clone());

    let address = config.listen_address();
    let listener = TcpListener::bind(&address)
        .await
        .context(BindListenerSnafu {
            address: address.clone(),
        })?;

    info!(?address, "Listening");
    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context(ServeSnafu)?;

    state.sensible_shutdown().await;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv = dotenvy::dotenv();

    tracing::subscriber::set_global_default(
        FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .finish(),
    )
    .expect("unable to set tracing subscriber");

    info!("`tracing` online");
    if let Err(e) = dotenv {
        warn!(?e, "no .env file loaded, using the process environment only");
    }

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(?e, "{e}");
            ExitCode::FAILURE
        }
    }
}
