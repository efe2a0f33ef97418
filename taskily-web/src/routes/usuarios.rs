/// Registro de cuentas
///
/// La única operación sobre usuarios expuesta sin sesión además del login:
/// crear la cuenta. El password se guarda como hash Argon2id y nunca viaja
/// de vuelta al navegador.

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use validator::Validate;

use taskily_shared::auth::password::hash_password;
use taskily_shared::models::usuario::{CreateUsuario, Usuario};

use crate::{
    app::AppState,
    error::AppResult,
    forms::{campo_obligatorio, Mensaje},
    views::CrearCuentaTemplate,
};

/// Cuerpo del formulario de registro
#[derive(Debug, Deserialize, Validate)]
pub struct RegistroForm {
    #[serde(default)]
    pub fullname: String,

    #[serde(default)]
    #[validate(email(message = "Ingresa un email válido."))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 6, message = "El password debe tener al menos 6 caracteres."))]
    pub password: String,

    #[serde(default)]
    pub confirmar: String,
}

/// GET `/registrate` — formulario de registro
pub async fn formulario_crear_cuenta() -> CrearCuentaTemplate {
    CrearCuentaTemplate { mensajes: vec![] }
}

/// POST `/registrate` — alta de cuenta
///
/// Toda violación de validación vuelve a mostrar el formulario con los
/// mensajes acumulados (status 200). Un email ya registrado se reporta como
/// un mensaje más, sin filtrar el motivo exacto al log del navegador.
pub async fn crear_cuenta(
    State(state): State<AppState>,
    Form(form): Form<RegistroForm>,
) -> AppResult<Response> {
    let mut mensajes = Vec::new();

    let nombre = campo_obligatorio(
        &form.fullname,
        "El nombre no puede ser vacío.",
        &mut mensajes,
    );

    if let Err(errores) = form.validate() {
        for errores_campo in errores.field_errors().values() {
            for error in errores_campo.iter() {
                if let Some(mensaje) = &error.message {
                    mensajes.push(Mensaje::error(mensaje.to_string()));
                }
            }
        }
    }

    if form.password != form.confirmar {
        mensajes.push(Mensaje::error("Los passwords no coinciden."));
    }

    if !mensajes.is_empty() {
        return Ok(CrearCuentaTemplate { mensajes }.into_response());
    }

    let hash = match hash_password(&form.password) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::warn!(error = %e, "no se pudo hashear el password");
            return Ok(CrearCuentaTemplate {
                mensajes: vec![Mensaje::advertencia(
                    "Ha ocurrido un error interno en el servidor. Comunicate con el personal de Taskily.",
                )],
            }
            .into_response());
        }
    };

    // El email no se escapa: caracteres como ' o / son válidos en una
    // dirección y el login compara contra el valor guardado. Solo se recorta;
    // el INSERT lo pasa a minúsculas.
    let email = form.email.trim().to_string();

    match Usuario::create(
        &state.db,
        CreateUsuario {
            email,
            nombre,
            password: hash,
        },
    )
    .await
    {
        Ok(usuario) => {
            tracing::info!(usuario_id = %usuario.id, "cuenta creada");
            Ok(Redirect::to("/iniciar_sesion").into_response())
        }
        Err(e) => {
            let duplicado = e
                .as_database_error()
                .map(|d| d.is_unique_violation())
                .unwrap_or(false);

            if duplicado {
                Ok(CrearCuentaTemplate {
                    mensajes: vec![Mensaje::error("Ya existe una cuenta con ese email.")],
                }
                .into_response())
            } else {
                tracing::warn!(error = %e, "no se pudo crear la cuenta");
                Ok(CrearCuentaTemplate {
                    mensajes: vec![Mensaje::advertencia(
                        "Ha ocurrido un error interno en el servidor. Comunicate con el personal de Taskily.",
                    )],
                }
                .into_response())
            }
        }
    }
}
