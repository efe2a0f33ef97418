/// Plantillas Askama y adaptación de modelos a vistas
///
/// Las plantillas nunca reciben filas de sqlx: cada modelo se aplana en un
/// struct de vista con los campos ya formateados (ids como texto, fecha de
/// creación como tiempo relativo).

use askama::Template;
use taskily_shared::models::{proyecto::Proyecto, tarea::Tarea};
use taskily_shared::texto;

use crate::forms::Mensaje;

/// Proyecto aplanado para las plantillas
#[derive(Debug, Clone)]
pub struct ProyectoVista {
    pub id: String,
    pub nombre: String,
    pub descripcion: String,
    pub url: String,
    /// Antigüedad legible, calculada al renderizar ("hace 3 días")
    pub hace: String,
}

impl ProyectoVista {
    pub fn desde(proyecto: &Proyecto) -> Self {
        Self {
            id: proyecto.id.to_string(),
            nombre: proyecto.nombre.clone(),
            descripcion: proyecto.descripcion.clone(),
            url: proyecto.url.clone(),
            hace: texto::hace(proyecto.creado_en),
        }
    }
}

/// Tarea aplanada para las plantillas
#[derive(Debug, Clone)]
pub struct TareaVista {
    pub id: String,
    pub definicion: String,
    pub estado: bool,
    pub hace: String,
}

impl TareaVista {
    pub fn desde(tarea: &Tarea) -> Self {
        Self {
            id: tarea.id.to_string(),
            definicion: tarea.definicion.clone(),
            estado: tarea.estado,
            hace: texto::hace(tarea.creado_en),
        }
    }
}

/// Aplana una lista de proyectos
pub fn mapear_proyectos(proyectos: &[Proyecto]) -> Vec<ProyectoVista> {
    proyectos.iter().map(ProyectoVista::desde).collect()
}

/// Aplana una lista de tareas
pub fn mapear_tareas(tareas: &[Tarea]) -> Vec<TareaVista> {
    tareas.iter().map(TareaVista::desde).collect()
}

/// Home: proyectos del usuario autenticado
#[derive(Template)]
#[template(path = "home_proyecto.html")]
pub struct HomeProyectoTemplate {
    pub proyectos: Vec<ProyectoVista>,
    pub mensajes: Vec<Mensaje>,
}

/// Formulario de creación de proyecto
#[derive(Template)]
#[template(path = "crear_proyecto.html")]
pub struct CrearProyectoTemplate {
    pub mensajes: Vec<Mensaje>,
}

/// Vista de edición de un proyecto, pre-cargada con sus valores
#[derive(Template)]
#[template(path = "ver_proyecto.html")]
pub struct VerProyectoTemplate {
    pub proyecto: ProyectoVista,
    pub mensajes: Vec<Mensaje>,
}

/// Detalle de un proyecto con sus tareas
#[derive(Template)]
#[template(path = "tareas.html")]
pub struct TareasTemplate {
    pub proyecto: ProyectoVista,
    pub tareas: Vec<TareaVista>,
    pub mensajes: Vec<Mensaje>,
}

/// Resultados de búsqueda de proyectos
#[derive(Template)]
#[template(path = "resultados.html")]
pub struct ResultadosTemplate {
    pub proyectos: Vec<ProyectoVista>,
    pub search: String,
}

/// Formulario de registro
#[derive(Template)]
#[template(path = "crear_cuenta.html")]
pub struct CrearCuentaTemplate {
    pub mensajes: Vec<Mensaje>,
}

/// Formulario de inicio de sesión
#[derive(Template)]
#[template(path = "iniciar_sesion.html")]
pub struct IniciarSesionTemplate {
    pub mensajes: Vec<Mensaje>,
}

/// Formulario para pedir el restablecimiento de password
#[derive(Template)]
#[template(path = "restablecer_password.html")]
pub struct RestablecerPasswordTemplate {
    pub mensajes: Vec<Mensaje>,
}

/// Formulario para elegir el password nuevo
#[derive(Template)]
#[template(path = "resetear_password.html")]
pub struct ResetearPasswordTemplate {
    pub token: String,
    pub mensajes: Vec<Mensaje>,
}
