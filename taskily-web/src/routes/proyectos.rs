/// Handlers de proyectos
///
/// Todos siguen la misma secuencia: usuario autenticado → validación del
/// cuerpo → resolución de la entidad con chequeo de dueño → una única
/// operación de persistencia → render o redirección.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Extension, Form,
};
use serde::Deserialize;
use uuid::Uuid;

use taskily_shared::models::{
    proyecto::{CreateProyecto, Proyecto},
    tarea::Tarea,
};

use crate::{
    app::{AppState, UsuarioActual},
    error::{AppError, AppResult},
    forms::{campo_obligatorio, sanear, Mensaje},
    views::{
        mapear_proyectos, mapear_tareas, CrearProyectoTemplate, HomeProyectoTemplate,
        ProyectoVista, ResultadosTemplate, TareasTemplate, VerProyectoTemplate,
    },
};

/// Cuerpo de los formularios de alta y edición de proyecto
#[derive(Debug, Deserialize)]
pub struct ProyectoForm {
    #[serde(default)]
    pub nombre: String,

    #[serde(default)]
    pub descripcion: String,
}

/// Cuerpo del formulario de búsqueda
#[derive(Debug, Deserialize)]
pub struct BusquedaForm {
    #[serde(default)]
    pub search: String,
}

/// Resuelve un proyecto por slug y verifica que pertenezca al usuario
///
/// Un proyecto ajeno o inexistente termina en redirección a `/` sin revelar
/// si el recurso existe.
async fn proyecto_propio_por_url(
    state: &AppState,
    url: &str,
    usuario_id: Uuid,
) -> Result<Proyecto, AppError> {
    let proyecto = Proyecto::find_by_url(&state.db, url)
        .await?
        .ok_or(AppError::NoEncontrado)?;

    if !proyecto.es_de(usuario_id) {
        return Err(AppError::NoAutorizado);
    }

    Ok(proyecto)
}

/// Igual que [`proyecto_propio_por_url`] pero resolviendo por id
async fn proyecto_propio_por_id(
    state: &AppState,
    id: Uuid,
    usuario_id: Uuid,
) -> Result<Proyecto, AppError> {
    let proyecto = Proyecto::find_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NoEncontrado)?;

    if !proyecto.es_de(usuario_id) {
        return Err(AppError::NoAutorizado);
    }

    Ok(proyecto)
}

/// GET `/` — proyectos del usuario con su antigüedad legible
pub async fn home(
    State(state): State<AppState>,
    Extension(UsuarioActual(usuario)): Extension<UsuarioActual>,
) -> AppResult<Response> {
    match Proyecto::list_by_usuario(&state.db, usuario.id).await {
        Ok(proyectos) => Ok(HomeProyectoTemplate {
            proyectos: mapear_proyectos(&proyectos),
            mensajes: vec![],
        }
        .into_response()),
        Err(e) => {
            tracing::warn!(error = %e, "no se pudieron listar los proyectos");
            Ok(HomeProyectoTemplate {
                proyectos: vec![],
                mensajes: vec![Mensaje::advertencia(
                    "Error al obtener los proyectos. Favor reintentar.",
                )],
            }
            .into_response())
        }
    }
}

/// GET `/nuevo_proyecto` — formulario de alta
pub async fn formulario_nuevo_proyecto() -> CrearProyectoTemplate {
    CrearProyectoTemplate { mensajes: vec![] }
}

/// POST `/nuevo_proyecto` — alta de proyecto
///
/// Con campos faltantes se vuelve a mostrar el formulario con un mensaje por
/// campo (status 200) y no se escribe nada. Una falla de persistencia se
/// reporta como advertencia en el mismo formulario.
pub async fn nuevo_proyecto(
    State(state): State<AppState>,
    Extension(UsuarioActual(usuario)): Extension<UsuarioActual>,
    Form(form): Form<ProyectoForm>,
) -> AppResult<Response> {
    let mut mensajes = Vec::new();

    let nombre = campo_obligatorio(
        &form.nombre,
        "El nombre del proyecto no puede ser vacío.",
        &mut mensajes,
    );
    let descripcion = campo_obligatorio(
        &form.descripcion,
        "Debes ingresar una breve descripción del proyecto.",
        &mut mensajes,
    );

    if !mensajes.is_empty() {
        return Ok(CrearProyectoTemplate { mensajes }.into_response());
    }

    match Proyecto::create(
        &state.db,
        CreateProyecto {
            nombre,
            descripcion,
            usuario_id: usuario.id,
        },
    )
    .await
    {
        Ok(_) => Ok(Redirect::to("/").into_response()),
        Err(e) => {
            tracing::warn!(error = %e, "no se pudo crear el proyecto");
            Ok(CrearProyectoTemplate {
                mensajes: vec![Mensaje::advertencia(
                    "Ha ocurrido un error interno en el servidor. Comunicate con el personal de Taskily.",
                )],
            }
            .into_response())
        }
    }
}

/// GET `/actualizar_proyecto/:url` — formulario de edición por slug
pub async fn obtener_proyecto_por_url(
    State(state): State<AppState>,
    Extension(UsuarioActual(usuario)): Extension<UsuarioActual>,
    Path(url): Path<String>,
) -> AppResult<Response> {
    let proyecto = proyecto_propio_por_url(&state, &url, usuario.id).await?;

    Ok(VerProyectoTemplate {
        proyecto: ProyectoVista::desde(&proyecto),
        mensajes: vec![],
    }
    .into_response())
}

/// POST `/actualizar_proyecto/:id` — edición de proyecto
///
/// Con campos faltantes se vuelve a mostrar la vista de edición pre-cargada
/// con los valores guardados, para no perder el contexto de la edición.
pub async fn actualizar_proyecto(
    State(state): State<AppState>,
    Extension(UsuarioActual(usuario)): Extension<UsuarioActual>,
    Path(id): Path<Uuid>,
    Form(form): Form<ProyectoForm>,
) -> AppResult<Response> {
    let mut mensajes = Vec::new();

    let nombre = campo_obligatorio(
        &form.nombre,
        "¡El nombre del proyecto no puede ser vacío!",
        &mut mensajes,
    );
    let descripcion = campo_obligatorio(
        &form.descripcion,
        "¡La descripción del proyecto no puede ser vacía!",
        &mut mensajes,
    );

    let proyecto = proyecto_propio_por_id(&state, id, usuario.id).await?;

    if !mensajes.is_empty() {
        return Ok(VerProyectoTemplate {
            proyecto: ProyectoVista::desde(&proyecto),
            mensajes,
        }
        .into_response());
    }

    Proyecto::update(&state.db, proyecto.id, &nombre, &descripcion).await?;

    Ok(Redirect::to("/").into_response())
}

/// DELETE `/proyecto/:url` — baja de proyecto por slug
///
/// Las tareas del proyecto quedan en la base; ninguna lectura llega a ellas
/// sin el proyecto. Un borrado sin efecto responde 404.
pub async fn eliminar_proyecto(
    State(state): State<AppState>,
    Extension(UsuarioActual(usuario)): Extension<UsuarioActual>,
    Path(url): Path<String>,
) -> AppResult<Response> {
    proyecto_propio_por_url(&state, &url, usuario.id).await?;

    match Proyecto::delete_by_url(&state.db, &url).await {
        Ok(true) => Ok((StatusCode::OK, "Proyecto eliminado correctamente").into_response()),
        Ok(false) => Ok(StatusCode::NOT_FOUND.into_response()),
        Err(e) => {
            tracing::warn!(error = %e, url = %url, "no se pudo eliminar el proyecto");
            Ok(StatusCode::NOT_FOUND.into_response())
        }
    }
}

/// GET `/proyecto/:url` — detalle del proyecto con sus tareas
pub async fn mostrar_proyecto(
    State(state): State<AppState>,
    Extension(UsuarioActual(usuario)): Extension<UsuarioActual>,
    Path(url): Path<String>,
) -> AppResult<Response> {
    let proyecto = proyecto_propio_por_url(&state, &url, usuario.id).await?;
    let tareas = Tarea::list_by_proyecto(&state.db, proyecto.id).await?;

    Ok(TareasTemplate {
        proyecto: ProyectoVista::desde(&proyecto),
        tareas: mapear_tareas(&tareas),
        mensajes: vec![],
    }
    .into_response())
}

/// POST `/buscar_proyectos` — búsqueda por nombre, sin distinguir mayúsculas
///
/// La búsqueda es global y no se limita a los proyectos del usuario.
pub async fn buscar_proyecto(
    State(state): State<AppState>,
    Extension(UsuarioActual(_usuario)): Extension<UsuarioActual>,
    Form(form): Form<BusquedaForm>,
) -> AppResult<Response> {
    let termino = sanear(&form.search);
    let proyectos = Proyecto::buscar_por_nombre(&state.db, &termino).await?;

    Ok(ResultadosTemplate {
        proyectos: mapear_proyectos(&proyectos),
        search: termino,
    }
    .into_response())
}
