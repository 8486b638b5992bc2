use anyhow::Context;

use ledger_api::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    ledger_observability::init();

    let config = ServerConfig::from_env_and_args(std::env::args().skip(1))?;
    let app = ledger_api::app::build_default_app();

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
