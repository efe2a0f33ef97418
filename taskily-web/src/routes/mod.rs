/// Route handlers, un módulo por recurso
///
/// - `proyectos`: CRUD y búsqueda de proyectos
/// - `tareas`: alta, estado y baja de tareas
/// - `usuarios`: registro de cuentas
/// - `auth`: sesión y restablecimiento de password
/// - `health`: estado del servicio

pub mod auth;
pub mod health;
pub mod proyectos;
pub mod tareas;
pub mod usuarios;
