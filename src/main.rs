use anyhow::Context;
use tower_sessions::cookie::Key;
use tracing::{info, warn};
use tutorial_site::{config::Config, db, logging, AppState, UploadDir};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_logging()?;

    let config = Config::from_env()?;

    let key = match &config.secret_key {
        Some(secret) => Key::try_from(secret.as_slice()).context("SECRET_KEY is not a usable signing key")?,
        None => {
            warn!("SECRET_KEY not set; sessions will not survive a restart");
            Key::generate()
        }
    };

    let db_pool = db::connect(&config.database_url)
        .await
        .with_context(|| format!("opening database {}", config.database_url))?;
    info!(url = %config.database_url, "database ready");

    let uploads = UploadDir::create(&config.upload_dir)
        .await
        .with_context(|| format!("creating upload dir {}", config.upload_dir.display()))?;

    let app = tutorial_site::router(AppState { db_pool, uploads }, key);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
