//! KCSE Dash - KCSE Results Analysis Dashboard
//!
//! Loads the school's KCSE results workbook and serves interactive grade,
//! subject and gender charts to the browser.

mod charts;
mod config;
mod data;
mod stats;
mod web;

#[cfg(test)]
mod test_support;

use anyhow::Context;
use config::DashboardConfig;
use data::ResultsLoader;
use web::AppState;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = DashboardConfig::from_current_dir()?;

    // Missing workbook is fatal: nothing to show without it
    let results = ResultsLoader::load(&config.data_dir)?;
    tracing::info!(
        file = data::schema::RESULTS_FILE_NAME,
        rows = results.height(),
        "results loaded"
    );

    let state = AppState::new(results).context("failed to build dashboard figures")?;
    let app = web::app(state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;

    let url = config.url();
    tracing::info!(%url, "dashboard listening");

    axum::serve(listener, app).await.context("server failed")?;
    Ok(())
}
