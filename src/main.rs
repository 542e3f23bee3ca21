mod app;
mod config;
mod error;
mod records;
mod state;

use crate::config::AppConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "healthdata=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = AppConfig::from_env()?;
    tracing::info!(
        backend = ?config.store_backend,
        demo_date_shift = config.demo.date_shift,
        seed_demo_data = config.demo.seed,
        "starting"
    );
    let (host, port, seed) = (config.host.clone(), config.port, config.demo.seed);

    let app_state = AppState::init(config).await?;

    if seed {
        if let Err(e) = records::seed::seed_demo_owner(&app_state).await {
            tracing::warn!(error = %e, "demo seeding failed; continuing");
        }
    }

    let app = app::build_app(app_state);
    app::serve(app, &host, port).await
}
