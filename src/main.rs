use std::net::SocketAddr;

use anyhow::Context;

use bike_shop::{
    config::AppConfig, db::connection, logging::init_tracing, routes::router,
    services::ServiceContext, state::AppState,
};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        tracing::error!("server failed: {err:?}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cfg = AppConfig::from_env().context("failed to load config")?;
    init_tracing(&cfg.logging);

    let db_cfg = cfg
        .database
        .clone()
        .context("database config is required (set APP_DATABASE__URL)")?;
    let db = connection::connect(&db_cfg).await?;

    let addr: SocketAddr = format!("{}:{}", cfg.general.host, cfg.general.port)
        .parse()
        .context("invalid host/port")?;

    let state = AppState::from_config(cfg, db)?;
    if let Some(auth) = state.config.auth.as_ref() {
        ServiceContext::from_state(&state)
            .auth()
            .seed_admin(auth)
            .await?;
    }

    tokio::fs::create_dir_all(&state.config.storage.upload_dir)
        .await
        .with_context(|| {
            format!(
                "failed to create upload dir {}",
                state.config.storage.upload_dir.display()
            )
        })?;

    let app = router(state);

    tracing::info!("listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
