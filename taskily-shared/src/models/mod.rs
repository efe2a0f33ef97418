/// Modelos de base de datos de Taskily
///
/// Cada modelo expone sus operaciones CRUD sobre un `PgPool`; los handlers
/// nunca arman SQL por su cuenta.
///
/// # Models
///
/// - `usuario`: cuentas, credenciales y token de restablecimiento
/// - `proyecto`: proyectos con dueño y slug único
/// - `tarea`: tareas de un proyecto con estado de completitud
/// - `sesion`: sesiones activas respaldadas por cookie

pub mod proyecto;
pub mod sesion;
pub mod tarea;
pub mod usuario;
