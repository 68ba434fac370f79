// src/health.rs

//! Liveness responder. Exists so the hosting platform considers the
//! process healthy; it reads no application state and keeps answering
//! through fetch or notify failures in the watch loop.

use anyhow::{Context, Result};
use axum::{http::StatusCode, routing::get, Router};
use tokio::net::TcpListener;

pub fn router() -> Router {
    Router::new()
        .route("/", get(|| async { "RainBot is running!" }))
        .route("/health", get(|| async { "OK" }))
        .fallback(|| async { (StatusCode::NOT_FOUND, "not found") })
}

/// Binding is done separately from serving so a taken port fails startup
/// instead of dying inside a spawned task.
pub async fn bind(port: u16) -> Result<TcpListener> {
    TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("bind health port {port}"))
}

pub async fn serve(listener: TcpListener) -> Result<()> {
    axum::serve(listener, router())
        .await
        .context("health server")
}
