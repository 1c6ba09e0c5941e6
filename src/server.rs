// Archivo: server.rs
// Propósito: API HTTP del backend. Dos rutas: un banner de estado en `/` y
// la prueba de conectividad con la base de datos en `/api/test`.

use crate::config::AppConfig;
use crate::errors::Result;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use bonsai_persistence::ConnectivityProbe;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::net::TcpListener;

pub const BANNER: &str = "API de Bons-AI Agent funcionando 🚀";

/// Estado compartido por los handlers.
#[derive(Clone)]
pub struct AppState {
    probe: Arc<ConnectivityProbe>,
}

impl AppState {
    pub fn new(probe: ConnectivityProbe) -> Self {
        AppState { probe: Arc::new(probe) }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new().route("/", get(banner))
                 .route("/api/test", get(db_test))
                 .with_state(state)
}

pub async fn banner() -> &'static str {
    BANNER
}

/// `GET /api/test`: 200 `{success: true, date}` si la base responde, 500
/// `{success: false, error}` en cualquier otro caso. La conexion es
/// bloqueante, por eso corre fuera del reactor.
pub async fn db_test(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let probe = state.probe.clone();
    let outcome = tokio::task::spawn_blocking(move || probe.run()).await;
    match outcome {
        Ok(Ok(report)) => (StatusCode::OK, Json(json!({ "success": true, "date": report.date }))),
        Ok(Err(e)) => {
            tracing::error!(error = %e, "conexion a la base de datos fallida");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "success": false, "error": e.to_string() })))
        }
        Err(join) => {
            tracing::error!(error = %join, "la sonda no termino");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "success": false, "error": join.to_string() })))
        }
    }
}

/// Liga el puerto configurado y atiende peticiones hasta que falle el
/// listener.
pub async fn serve(config: &AppConfig, state: AppState) -> Result<()> {
    let listener = TcpListener::bind(config.socket_addr()).await?;
    serve_on(listener, state).await
}

/// Igual que `serve` sobre un listener ya ligado (puerto 0 en tests).
pub async fn serve_on(listener: TcpListener, state: AppState) -> Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!(addr = %addr, "servidor HTTP escuchando en http://{}", addr);
    axum::serve(listener, router(state)).await?;
    Ok(())
}
