/// Application state, router and session middleware
///
/// # Router
///
/// ```text
/// /
/// ├── GET  /                          # proyectos del usuario (protegida)
/// ├── GET/POST /nuevo_proyecto        # alta de proyecto (protegida)
/// ├── GET/POST /actualizar_proyecto/: # edición por slug / por id (protegida)
/// ├── GET/POST/DELETE /proyecto/:url  # detalle, alta de tarea, baja (protegida)
/// ├── POST /buscar_proyectos          # búsqueda por nombre (protegida)
/// ├── PATCH/DELETE /tarea/:id         # estado y baja de tarea (protegida)
/// ├── GET/POST /registrate            # registro (pública)
/// ├── GET/POST /iniciar_sesion        # login (pública)
/// ├── GET  /cerrar_sesion             # logout (pública)
/// ├── GET/POST /restablecer_password  # pedido de restablecimiento (pública)
/// ├── GET/POST /resetear_password/:t  # restablecimiento con token (pública)
/// └── GET  /health                    # estado del servicio (pública)
/// ```
///
/// Las rutas protegidas pasan por `sesion_auth_layer`: sin una sesión
/// vigente el pedido se redirige a `/iniciar_sesion` y ningún handler corre.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
    routing::{get, patch, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_cookies::{CookieManagerLayer, Cookies};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use uuid::Uuid;

use taskily_shared::models::{sesion::Sesion, usuario::Usuario};

use crate::{config::Config, error::AppError, mail::Correo, routes};

/// Nombre de la cookie de sesión
pub const COOKIE_SESION: &str = "taskily_sesion";

/// Shared application state
///
/// Cloned per request via Axum's `State` extractor; `Arc` keeps it cheap.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,

    /// Outgoing mail client
    pub correo: Correo,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config, correo: Correo) -> Self {
        Self {
            db,
            config: Arc::new(config),
            correo,
        }
    }
}

/// Usuario autenticado del pedido en curso
///
/// Lo inserta `sesion_auth_layer` en las extensiones del request; los
/// handlers lo extraen con `Extension<UsuarioActual>` sin volver a tocar la
/// base.
#[derive(Debug, Clone)]
pub struct UsuarioActual(pub Usuario);

/// Builds the complete Axum router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    // Rutas públicas: registro, sesión y restablecimiento de password
    let publicas = Router::new()
        .route(
            "/registrate",
            get(routes::usuarios::formulario_crear_cuenta).post(routes::usuarios::crear_cuenta),
        )
        .route(
            "/iniciar_sesion",
            get(routes::auth::formulario_iniciar_sesion).post(routes::auth::iniciar_sesion),
        )
        .route("/cerrar_sesion", get(routes::auth::cerrar_sesion))
        .route(
            "/restablecer_password",
            get(routes::auth::formulario_restablecer_password).post(routes::auth::enviar_token),
        )
        .route(
            "/resetear_password/:token",
            get(routes::auth::validar_token).post(routes::auth::actualizar_password),
        )
        .route("/health", get(routes::health::health_check_handler));

    // Rutas protegidas por la sesión
    let protegidas = Router::new()
        .route("/", get(routes::proyectos::home))
        .route(
            "/nuevo_proyecto",
            get(routes::proyectos::formulario_nuevo_proyecto).post(routes::proyectos::nuevo_proyecto),
        )
        // GET resuelve por slug, POST por id; la forma de la ruta es la misma
        .route(
            "/actualizar_proyecto/:url",
            get(routes::proyectos::obtener_proyecto_por_url).post(routes::proyectos::actualizar_proyecto),
        )
        .route(
            "/proyecto/:url",
            get(routes::proyectos::mostrar_proyecto)
                .post(routes::tareas::agregar_tarea)
                .delete(routes::proyectos::eliminar_proyecto),
        )
        .route("/buscar_proyectos", post(routes::proyectos::buscar_proyecto))
        .route(
            "/tarea/:id",
            patch(routes::tareas::actualizar_estado_tarea).delete(routes::tareas::eliminar_tarea),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            sesion_auth_layer,
        ));

    Router::new()
        .merge(publicas)
        .merge(protegidas)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CookieManagerLayer::new())
        .with_state(state)
}

/// Middleware de autenticación por sesión
///
/// Resuelve la cookie de sesión contra la tabla `sesiones`, carga el usuario
/// y lo deja en las extensiones del request. Cualquier falla corta el pedido
/// con una redirección a `/iniciar_sesion`.
async fn sesion_auth_layer(
    State(state): State<AppState>,
    cookies: Cookies,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let sesion_id = cookies
        .get(COOKIE_SESION)
        .and_then(|c| Uuid::parse_str(c.value()).ok())
        .ok_or(AppError::NoAutenticado)?;

    let sesion = Sesion::find_activa(&state.db, sesion_id)
        .await?
        .ok_or(AppError::NoAutenticado)?;

    let usuario = Usuario::find_by_id(&state.db, sesion.usuario_id)
        .await?
        .ok_or(AppError::NoAutenticado)?;

    if !usuario.activo {
        return Err(AppError::NoAutenticado);
    }

    req.extensions_mut().insert(UsuarioActual(usuario));

    Ok(next.run(req).await)
}
