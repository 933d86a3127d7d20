//! JSON HTTP boundary for the whereabouts calendar.
//!
//! Exposes an axum [`Router`] over a shared [`GroupCalendar`]. The calendar
//! itself is single-threaded state, so the router serialises access through
//! one [`tokio::sync::Mutex`] — exactly one command or query runs at a time.
//! HTML rendering is a front-end concern; this layer speaks JSON only.

pub mod error;

pub use error::ApiError;

use std::{collections::HashMap, path::PathBuf, sync::Arc};

use axum::{
  Json, Router,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
  routing::{get, post},
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;
use whereabouts_core::{
  calendar::{DisplayTable, GroupCalendar},
  command::Response as CommandResponse,
  person::Person,
  store::ItineraryStore,
};

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `WHEREABOUTS_*` environment overrides.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:       String,
  #[serde(default = "default_port")]
  pub port:       u16,
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 8080 }

fn default_store_path() -> PathBuf { PathBuf::from("whereabouts.db") }

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
pub struct AppState<S: ItineraryStore> {
  pub calendar: Arc<Mutex<GroupCalendar<S>>>,
}

impl<S: ItineraryStore> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self { calendar: Arc::clone(&self.calendar) }
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build the API router for a shared calendar.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: ItineraryStore + Send + 'static,
{
  Router::new()
    .route("/commands", post(dispatch_command::<S>))
    .route("/calendar", get(display_table::<S>))
    .route("/people", get(people::<S>))
    .route("/together/{date}", get(together::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Handlers ────────────────────────────────────────────────────────────────

/// `POST /commands` — body: the flat string-keyed envelope. The HTTP status
/// mirrors the dispatch response code.
async fn dispatch_command<S>(
  State(state): State<AppState<S>>,
  Json(raw): Json<HashMap<String, String>>,
) -> impl IntoResponse
where
  S: ItineraryStore + Send + 'static,
{
  let response: CommandResponse = state.calendar.lock().await.dispatch(&raw);
  let status = StatusCode::from_u16(response.code)
    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
  (status, Json(response))
}

/// `GET /calendar` — the display table for the configured range; empty when
/// no range has been set.
async fn display_table<S>(
  State(state): State<AppState<S>>,
) -> Json<DisplayTable>
where
  S: ItineraryStore + Send + 'static,
{
  Json(state.calendar.lock().await.display_table().clone())
}

/// `GET /people` — everyone in the calendar, name-sorted.
async fn people<S>(State(state): State<AppState<S>>) -> Json<Vec<Person>>
where
  S: ItineraryStore + Send + 'static,
{
  Json(state.calendar.lock().await.people().to_vec())
}

/// `GET /together/{date}` — whether everyone ends `date` in the same place.
async fn together<S>(
  State(state): State<AppState<S>>,
  Path(date): Path<NaiveDate>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: ItineraryStore + Send + 'static,
{
  let together = state.calendar.lock().await.is_everyone_together(date)?;
  Ok(Json(json!({ "date": date, "together": together })))
}

// ─── Integration tests ───────────────────────────────────────────────────────
