/// Error handling for the web server
///
/// A diferencia de una API JSON, acá los errores terminan en redirecciones:
/// el navegador nunca ve un status de error para las fallas de negocio.
///
/// - `NoAutenticado` → 303 a `/iniciar_sesion`
/// - `NoAutorizado` (recurso de otro usuario) → 303 a `/` sin revelar que el
///   recurso existe
/// - `NoEncontrado` → 303 a `/`
/// - `Persistencia` → se registra con tracing y 303 a `/`
///
/// Los errores de validación de formularios no pasan por acá: el handler
/// vuelve a renderizar el formulario con los mensajes y status 200.

use axum::response::{IntoResponse, Redirect, Response};

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

/// Unified application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// No hay sesión válida
    #[error("sesión no autenticada")]
    NoAutenticado,

    /// El recurso pertenece a otro usuario
    #[error("el recurso pertenece a otro usuario")]
    NoAutorizado,

    /// El recurso no existe
    #[error("recurso inexistente")]
    NoEncontrado,

    /// Falla de la capa de persistencia
    #[error("error de persistencia: {0}")]
    Persistencia(#[from] sqlx::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NoAutenticado => Redirect::to("/iniciar_sesion").into_response(),
            AppError::NoAutorizado | AppError::NoEncontrado => {
                Redirect::to("/").into_response()
            }
            AppError::Persistencia(e) => {
                tracing::warn!(error = %e, "fallo de persistencia en un handler");
                Redirect::to("/").into_response()
            }
        }
    }
}
