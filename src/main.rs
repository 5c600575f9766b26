use mealdb_browser::{app, browser::Browser, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout carries the rendered screen.
    let env_filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| "mealdb_browser=warn".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let state = AppState::init()?;
    tracing::info!(
        base_url = %state.config.api.base_url,
        fan_out = ?state.config.fan_out,
        "starting"
    );

    app::run(Browser::new(state)).await
}
