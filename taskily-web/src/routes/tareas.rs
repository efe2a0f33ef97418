/// Handlers de tareas
///
/// Las tareas siempre se manipulan a través de su proyecto: el alta entra por
/// la ruta del proyecto y las operaciones por id verifican al dueño del
/// proyecto padre antes de tocar la fila.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Extension, Form, Json,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use taskily_shared::models::{
    proyecto::Proyecto,
    tarea::{CreateTarea, Tarea},
};

use crate::{
    app::{AppState, UsuarioActual},
    error::{AppError, AppResult},
    forms::campo_obligatorio,
    views::{mapear_tareas, ProyectoVista, TareasTemplate},
};

/// Cuerpo del formulario de alta de tarea
#[derive(Debug, Deserialize)]
pub struct TareaForm {
    #[serde(default)]
    pub definicion: String,
}

/// Resuelve una tarea por id junto con su proyecto, verificando al dueño
async fn tarea_propia(
    state: &AppState,
    id: Uuid,
    usuario_id: Uuid,
) -> Result<(Tarea, Proyecto), AppError> {
    let tarea = Tarea::find_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NoEncontrado)?;

    let proyecto = Proyecto::find_by_id(&state.db, tarea.proyecto_id)
        .await?
        .ok_or(AppError::NoEncontrado)?;

    if !proyecto.es_de(usuario_id) {
        return Err(AppError::NoAutorizado);
    }

    Ok((tarea, proyecto))
}

/// POST `/proyecto/:url` — alta de tarea dentro de un proyecto
///
/// Con la definición vacía se vuelve a mostrar el detalle del proyecto con el
/// mensaje de validación (status 200) y no se escribe nada.
pub async fn agregar_tarea(
    State(state): State<AppState>,
    Extension(UsuarioActual(usuario)): Extension<UsuarioActual>,
    Path(url): Path<String>,
    Form(form): Form<TareaForm>,
) -> AppResult<Response> {
    let proyecto = Proyecto::find_by_url(&state.db, &url)
        .await?
        .ok_or(AppError::NoEncontrado)?;

    if !proyecto.es_de(usuario.id) {
        return Err(AppError::NoAutorizado);
    }

    let mut mensajes = Vec::new();
    let definicion = campo_obligatorio(
        &form.definicion,
        "La tarea no puede estar vacía.",
        &mut mensajes,
    );

    if !mensajes.is_empty() {
        let tareas = Tarea::list_by_proyecto(&state.db, proyecto.id).await?;
        return Ok(TareasTemplate {
            proyecto: ProyectoVista::desde(&proyecto),
            tareas: mapear_tareas(&tareas),
            mensajes,
        }
        .into_response());
    }

    Tarea::create(
        &state.db,
        CreateTarea {
            definicion,
            proyecto_id: proyecto.id,
        },
    )
    .await?;

    Ok(Redirect::to(&format!("/proyecto/{}", proyecto.url)).into_response())
}

/// PATCH `/tarea/:id` — alterna el estado pendiente/completa
///
/// Responde el estado resultante en JSON para el script del detalle.
pub async fn actualizar_estado_tarea(
    State(state): State<AppState>,
    Extension(UsuarioActual(usuario)): Extension<UsuarioActual>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    let (tarea, _proyecto) = tarea_propia(&state, id, usuario.id).await?;

    let actualizada = Tarea::cambiar_estado(&state.db, tarea.id, !tarea.estado)
        .await?
        .ok_or(AppError::NoEncontrado)?;

    Ok(Json(json!({
        "id": actualizada.id,
        "estado": actualizada.estado,
    }))
    .into_response())
}

/// DELETE `/tarea/:id` — baja de tarea
pub async fn eliminar_tarea(
    State(state): State<AppState>,
    Extension(UsuarioActual(usuario)): Extension<UsuarioActual>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    let (tarea, _proyecto) = tarea_propia(&state, id, usuario.id).await?;

    if Tarea::delete(&state.db, tarea.id).await? {
        Ok((StatusCode::OK, "Tarea eliminada correctamente").into_response())
    } else {
        Ok(StatusCode::NOT_FOUND.into_response())
    }
}
