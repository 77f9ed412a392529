//! Router assembly and handlers.
//!
//! `/` serves the dashboard page. The subject dropdown calls back into
//! `/api/subjects/{subject}`, which rebuilds that one figure from the shared
//! table on every selection.

use axum::extract::{Path, State};
use axum::http::header::CONTENT_TYPE;
use axum::response::{Html, IntoResponse, Json};
use axum::routing::get;
use axum::Router;
use serde::Serialize;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use super::error::ApiError;
use super::page;
use super::state::{AppState, Overview};
use crate::charts::{ChartKind, ChartPlotter, Figure, StaticChartRenderer};
use crate::data::schema::{lookup_subject, SEX_COLUMN, SUBJECTS};
use crate::stats::{GroupComparison, StatsCalculator};

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/overview", get(overview))
        .route("/api/subjects", get(list_subjects))
        .route("/api/subjects/{subject}", get(subject_view))
        .route("/api/summary", get(summary))
        .route("/charts/{file}", get(chart_svg))
        .route("/healthz", get(healthz))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Serialize)]
pub struct SubjectView {
    pub subject: &'static str,
    pub figure: Figure,
    pub comparison: GroupComparison,
}

#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    pub rows: usize,
}

/// `GET /`: the dashboard page.
async fn index(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    Ok(Html(page::render(&state.overview)?))
}

/// `GET /api/overview`: the static figures and the Points comparison.
async fn overview(State(state): State<AppState>) -> Json<Overview> {
    Json(Overview::clone(&state.overview))
}

/// `GET /api/subjects`: dropdown options in display order.
async fn list_subjects() -> Json<Vec<&'static str>> {
    Json(SUBJECTS.to_vec())
}

/// `GET /api/subjects/{subject}`: regenerate the subject chart.
async fn subject_view(
    State(state): State<AppState>,
    Path(subject): Path<String>,
) -> Result<Json<SubjectView>, ApiError> {
    let subject = lookup_subject(&subject).ok_or(ApiError::UnknownSubject(subject))?;
    let figure = ChartPlotter::subject_performance(&state.results, subject)?;
    tracing::debug!(subject, title = figure.title(), "subject chart rebuilt");
    let comparison = StatsCalculator::compare_by_group(&state.results, subject, SEX_COLUMN)?;

    Ok(Json(SubjectView {
        subject,
        figure,
        comparison,
    }))
}

/// `GET /api/summary`: gender comparison for every subject and Points.
async fn summary(State(state): State<AppState>) -> Result<Json<Vec<GroupComparison>>, ApiError> {
    Ok(Json(StatsCalculator::compare_all(&state.results)?))
}

/// `GET /charts/{slug}.svg`: static SVG export.
async fn chart_svg(
    State(state): State<AppState>,
    Path(file): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let kind = file
        .strip_suffix(".svg")
        .and_then(ChartKind::from_slug)
        .ok_or_else(|| ApiError::UnknownChart(file.clone()))?;

    let svg = StaticChartRenderer::render_svg(&state.results, kind)?;
    Ok(([(CONTENT_TYPE, "image/svg+xml")], svg))
}

/// `GET /healthz`: liveness with the loaded row count.
async fn healthz(State(state): State<AppState>) -> Json<Health> {
    Json(Health {
        status: "ok",
        rows: state.row_count(),
    })
}

#[cfg(test)]
#[path = "routes_test.rs"]
mod tests;
