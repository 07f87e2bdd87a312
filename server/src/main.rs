#![deny(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use dotenvy::dotenv;
use errors::ApplicationError;
use router::setup_router;
use seed::Seed;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod errors;
mod model;
mod router;
mod seed;
mod state;

#[cfg(test)]
mod test;

#[tokio::main]
async fn main() -> Result<(), ApplicationError> {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run() -> Result<(), ApplicationError> {
    setup_tracing();

    let (host, port, seed) = setup_env()?;

    let store = seed::store(seed, chrono::Utc::now());
    info!(
        "Seeded {:?} store with {} points",
        seed,
        store.points().len()
    );

    let app = setup_router(store);

    let address = format!("{}:{}", host, port);
    info!("Starting server on {}", address);

    let listener = TcpListener::bind(address)
        .await
        .map_err(ApplicationError::from)?;

    info!(
        "Listening on: {}",
        listener.local_addr().map_err(ApplicationError::from)?
    );

    axum::serve(listener, app.into_make_service())
        .await
        .map_err(ApplicationError::CannotServe)?;
    Ok(())
}

fn setup_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "{crate_name}=debug,tower_http=debug",
                    crate_name = env!("CARGO_CRATE_NAME")
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn setup_env() -> Result<(String, String, Seed), ApplicationError> {
    dotenv().ok();

    let host = std::env::var("TRIPBOARD_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("TRIPBOARD_PORT").unwrap_or_else(|_| "3000".to_string());
    let seed = match std::env::var("TRIPBOARD_SEED") {
        Ok(value) => value.parse()?,
        Err(std::env::VarError::NotPresent) => Seed::default(),
        Err(e) => return Err(ApplicationError::EnvError(e, "TRIPBOARD_SEED".to_string())),
    };

    Ok((host, port, seed))
}
