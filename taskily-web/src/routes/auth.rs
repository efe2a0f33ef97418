/// Sesión y restablecimiento de password
///
/// El login crea una fila en `sesiones` y deja su id en una cookie HttpOnly;
/// el restablecimiento guarda un token en la fila del usuario y lo envía por
/// email. Ningún mensaje de error distingue entre email inexistente y
/// password incorrecto.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tower_cookies::{
    cookie::{Cookie, SameSite},
    Cookies,
};
use uuid::Uuid;

use taskily_shared::auth::password::{hash_password, verify_password};
use taskily_shared::auth::token::{expiracion_token, generar_token};
use taskily_shared::models::{sesion::Sesion, usuario::Usuario};

use crate::{
    app::{AppState, COOKIE_SESION},
    error::AppResult,
    forms::Mensaje,
    views::{IniciarSesionTemplate, ResetearPasswordTemplate, RestablecerPasswordTemplate},
};

/// Cuerpo del formulario de login
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub password: String,
}

/// Cuerpo del pedido de restablecimiento
#[derive(Debug, Deserialize)]
pub struct EmailForm {
    #[serde(default)]
    pub email: String,
}

/// Cuerpo del formulario de password nuevo
#[derive(Debug, Deserialize)]
pub struct PasswordForm {
    #[serde(default)]
    pub password: String,
}

/// GET `/iniciar_sesion` — formulario de login
pub async fn formulario_iniciar_sesion() -> IniciarSesionTemplate {
    IniciarSesionTemplate { mensajes: vec![] }
}

/// POST `/iniciar_sesion` — login
///
/// Cualquier falla de credenciales vuelve al formulario con el mismo mensaje
/// genérico (status 200).
pub async fn iniciar_sesion(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    let email = form.email.trim();
    let password = form.password.trim();

    let credenciales_invalidas = || {
        IniciarSesionTemplate {
            mensajes: vec![Mensaje::error("Email o password incorrecto.")],
        }
        .into_response()
    };

    let usuario = match Usuario::find_by_email(&state.db, email).await? {
        Some(usuario) if usuario.activo => usuario,
        _ => return Ok(credenciales_invalidas()),
    };

    match verify_password(password, &usuario.password) {
        Ok(true) => {}
        Ok(false) => return Ok(credenciales_invalidas()),
        Err(e) => {
            tracing::warn!(error = %e, "hash de password ilegible");
            return Ok(credenciales_invalidas());
        }
    }

    let sesion = Sesion::create(&state.db, usuario.id).await?;

    let mut cookie = Cookie::new(COOKIE_SESION, sesion.id.to_string());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookies.add(cookie);

    tracing::info!(usuario_id = %usuario.id, "sesión iniciada");
    Ok(Redirect::to("/").into_response())
}

/// GET `/cerrar_sesion` — logout
///
/// Borra la fila de sesión si la cookie apunta a una, y la cookie en
/// cualquier caso.
pub async fn cerrar_sesion(State(state): State<AppState>, cookies: Cookies) -> AppResult<Response> {
    if let Some(sesion_id) = cookies
        .get(COOKIE_SESION)
        .and_then(|c| Uuid::parse_str(c.value()).ok())
    {
        Sesion::delete(&state.db, sesion_id).await?;
    }

    let mut cookie = Cookie::new(COOKIE_SESION, "");
    cookie.set_path("/");
    cookies.remove(cookie);

    Ok(Redirect::to("/iniciar_sesion").into_response())
}

/// GET `/restablecer_password` — formulario para pedir el restablecimiento
pub async fn formulario_restablecer_password() -> RestablecerPasswordTemplate {
    RestablecerPasswordTemplate { mensajes: vec![] }
}

/// POST `/restablecer_password` — genera el token y envía el email
pub async fn enviar_token(
    State(state): State<AppState>,
    Form(form): Form<EmailForm>,
) -> AppResult<Response> {
    let email = form.email.trim();

    let usuario = match Usuario::find_by_email(&state.db, email).await? {
        Some(usuario) => usuario,
        None => {
            return Ok(RestablecerPasswordTemplate {
                mensajes: vec![Mensaje::error("No existe una cuenta con ese email.")],
            }
            .into_response());
        }
    };

    let token = generar_token();
    Usuario::guardar_token(&state.db, usuario.id, &token, expiracion_token()).await?;

    if let Err(e) = state
        .correo
        .enviar_reinicio(&usuario.email, &usuario.nombre, &token)
        .await
    {
        tracing::warn!(error = %e, "no se pudo enviar el email de restablecimiento");
        return Ok(RestablecerPasswordTemplate {
            mensajes: vec![Mensaje::advertencia(
                "No pudimos enviar el email. Favor reintentar en unos minutos.",
            )],
        }
        .into_response());
    }

    Ok(RestablecerPasswordTemplate {
        mensajes: vec![Mensaje::exito(
            "Te enviamos un email con las instrucciones para restablecer tu password.",
        )],
    }
    .into_response())
}

/// GET `/resetear_password/:token` — valida el token y muestra el formulario
///
/// Un token desconocido o vencido redirige al pedido de restablecimiento.
pub async fn validar_token(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> AppResult<Response> {
    match Usuario::find_by_token(&state.db, &token).await? {
        Some(_) => Ok(ResetearPasswordTemplate {
            token,
            mensajes: vec![],
        }
        .into_response()),
        None => Ok(Redirect::to("/restablecer_password").into_response()),
    }
}

/// POST `/resetear_password/:token` — guarda el password nuevo
pub async fn actualizar_password(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Form(form): Form<PasswordForm>,
) -> AppResult<Response> {
    let usuario = match Usuario::find_by_token(&state.db, &token).await? {
        Some(usuario) => usuario,
        None => return Ok(Redirect::to("/restablecer_password").into_response()),
    };

    let password = form.password.trim();
    if password.len() < 6 {
        return Ok(ResetearPasswordTemplate {
            token,
            mensajes: vec![Mensaje::error(
                "El password debe tener al menos 6 caracteres.",
            )],
        }
        .into_response());
    }

    let hash = match hash_password(password) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::warn!(error = %e, "no se pudo hashear el password");
            return Ok(ResetearPasswordTemplate {
                token,
                mensajes: vec![Mensaje::advertencia(
                    "Ha ocurrido un error interno en el servidor. Comunicate con el personal de Taskily.",
                )],
            }
            .into_response());
        }
    };

    Usuario::actualizar_password(&state.db, usuario.id, &hash).await?;

    tracing::info!(usuario_id = %usuario.id, "password restablecido");
    Ok(Redirect::to("/iniciar_sesion").into_response())
}
