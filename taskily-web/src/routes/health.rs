/// Estado del servicio
///
/// Endpoint público para chequeos de disponibilidad: reporta la versión y si
/// la base de datos responde.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use taskily_shared::db::pool::health_check;

use crate::app::AppState;

/// Respuesta del chequeo de salud
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "ok" o "degraded"
    pub status: &'static str,

    /// Versión del crate
    pub version: &'static str,

    /// Estado de la conexión a la base
    pub database: &'static str,
}

/// GET `/health`
pub async fn health_check_handler(
    State(state): State<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    match health_check(&state.db).await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                version: taskily_shared::VERSION,
                database: "connected",
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check de base de datos falló");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "degraded",
                    version: taskily_shared::VERSION,
                    database: "unreachable",
                }),
            )
        }
    }
}
