//! Study Aids · Assessment Backend
//!
//! - Axum HTTP + WebSocket API for chapter quizzes, final exams and grading
//! - Deterministic local engine (seeded shuffles over the lesson catalog)
//! - Optional upstream study-aids API, with local fallback
//!
//! Important env variables:
//!   PORT                   : u16 (default 3000)
//!   STUDY_AIDS_API_URL     : enables the upstream client if present
//!   STUDY_AIDS_API_TOKEN   : bearer token for the upstream (optional)
//!   STUDY_AIDS_CONFIG_PATH : path to TOML config (engine settings, lessons, curated bank)
//!   LOG_LEVEL              : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT             : "pretty" (default) or "json"

mod telemetry;
mod util;
mod domain;
mod catalog;
mod config;
mod seeds;
mod engine;
mod state;
mod protocol;
mod logic;
mod remote;
mod routes;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Config, catalog, curated bank, upstream client.
  let state = Arc::new(AppState::new());

  // Prefer the upstream catalog when reachable; the local one stays otherwise.
  if state.remote.is_some() {
    if let Err(e) = state.refresh_catalog().await {
      warn!(target: "study_aids", error = %e, "Starting with local catalog");
    }
  }

  let app = build_router(state.clone());

  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "study_aids", %addr, "HTTP server listening");
  axum::serve(listener, app).await?;
  Ok(())
}
