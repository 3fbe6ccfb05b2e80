//! Runs the relay as an HTTP server.
//!
//! Configuration comes from the environment:
//!
//! - `OPENAI_API_KEY` (required): the credential attached to every request.
//! - `OPENAI_BASE_URL`: the provider base URL.
//! - `RELAY_BIND`: the address to listen on.
//! - `RUST_LOG`: the log filter.

#[macro_use]
extern crate tracing;

use std::future;
use std::net::SocketAddr;
use std::{env, io};

use anyhow::Context as _;
use routine_relay::{Relay, RelayConfigBuilder};
use tokio::net::TcpListener;

const DEFAULT_BIND: &str = "127.0.0.1:8787";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let api_key = env::var("OPENAI_API_KEY")
        .context("OPENAI_API_KEY environment variable is not set")?;
    let mut builder = RelayConfigBuilder::with_api_key(api_key);
    if let Ok(base_url) = env::var("OPENAI_BASE_URL") {
        builder = builder.with_base_url(base_url);
    }
    let config = builder.build();
    info!("forwarding to {}", config.completions_url());

    let bind =
        env::var("RELAY_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_owned());
    let addr: SocketAddr = bind.parse().with_context(|| {
        format!("RELAY_BIND `{bind}` is not a socket address")
    })?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("relay listening on {addr}");

    axum::serve(listener, Relay::new(config).into_router())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("relay stopped");
    Ok(())
}

/// Resolves when SIGINT (Ctrl-C) or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = wait_for("Ctrl-C", tokio::signal::ctrl_c());

    #[cfg(unix)]
    let terminate = wait_for("SIGTERM", async {
        use tokio::signal::unix::{SignalKind, signal};
        signal(SignalKind::terminate())?.recv().await;
        Ok(())
    });

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("shutdown signal received");
}

/// Waits for `signal`. Never resolves if its handler can't be installed.
async fn wait_for(name: &str, signal: impl Future<Output = io::Result<()>>) {
    if let Err(err) = signal.await {
        warn!("failed to install {name} handler: {err}");
        future::pending::<()>().await;
    }
}
