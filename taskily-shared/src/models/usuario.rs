/// Modelo de usuario
///
/// Una cuenta se crea al registrarse y nunca se elimina desde los flujos de
/// la aplicación. El password se guarda como hash Argon2id; `token` y
/// `expiracion` solo tienen valor mientras hay un restablecimiento de
/// password pendiente.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE usuarios (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     email TEXT NOT NULL UNIQUE,
///     nombre TEXT NOT NULL,
///     password TEXT NOT NULL,
///     token TEXT,
///     expiracion TIMESTAMPTZ,
///     activo BOOLEAN NOT NULL DEFAULT TRUE,
///     creado_en TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     actualizado_en TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Cuenta de usuario
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Usuario {
    /// Identificador único (UUID v4)
    pub id: Uuid,

    /// Email único, almacenado en minúsculas
    pub email: String,

    /// Nombre para mostrar
    pub nombre: String,

    /// Hash Argon2id del password (nunca el password en claro)
    #[serde(skip_serializing)]
    pub password: String,

    /// Token de restablecimiento pendiente, si lo hay
    pub token: Option<String>,

    /// Expiración del token de restablecimiento
    pub expiracion: Option<DateTime<Utc>>,

    /// Si la cuenta está habilitada
    pub activo: bool,

    /// Fecha de alta de la cuenta
    pub creado_en: DateTime<Utc>,

    /// Última modificación de la cuenta
    pub actualizado_en: DateTime<Utc>,
}

/// Datos para crear un usuario nuevo
#[derive(Debug, Clone)]
pub struct CreateUsuario {
    /// Email (se almacena en minúsculas)
    pub email: String,

    /// Nombre para mostrar
    pub nombre: String,

    /// Hash Argon2id del password
    pub password: String,
}

impl Usuario {
    /// Inserta un usuario nuevo
    ///
    /// # Errors
    ///
    /// Falla con violación de unicidad si el email ya existe.
    pub async fn create(pool: &PgPool, data: CreateUsuario) -> Result<Self, sqlx::Error> {
        let usuario = sqlx::query_as::<_, Usuario>(
            r#"
            INSERT INTO usuarios (email, nombre, password)
            VALUES (LOWER($1), $2, $3)
            RETURNING id, email, nombre, password, token, expiracion, activo,
                      creado_en, actualizado_en
            "#,
        )
        .bind(data.email)
        .bind(data.nombre)
        .bind(data.password)
        .fetch_one(pool)
        .await?;

        Ok(usuario)
    }

    /// Busca un usuario por id
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let usuario = sqlx::query_as::<_, Usuario>(
            r#"
            SELECT id, email, nombre, password, token, expiracion, activo,
                   creado_en, actualizado_en
            FROM usuarios
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(usuario)
    }

    /// Busca un usuario por email (insensible a mayúsculas)
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let usuario = sqlx::query_as::<_, Usuario>(
            r#"
            SELECT id, email, nombre, password, token, expiracion, activo,
                   creado_en, actualizado_en
            FROM usuarios
            WHERE email = LOWER($1)
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(usuario)
    }

    /// Busca un usuario por token de restablecimiento vigente
    ///
    /// Un token vencido se trata como inexistente.
    pub async fn find_by_token(pool: &PgPool, token: &str) -> Result<Option<Self>, sqlx::Error> {
        let usuario = sqlx::query_as::<_, Usuario>(
            r#"
            SELECT id, email, nombre, password, token, expiracion, activo,
                   creado_en, actualizado_en
            FROM usuarios
            WHERE token = $1 AND expiracion > NOW()
            "#,
        )
        .bind(token)
        .fetch_optional(pool)
        .await?;

        Ok(usuario)
    }

    /// Guarda el token de restablecimiento y su expiración
    pub async fn guardar_token(
        pool: &PgPool,
        id: Uuid,
        token: &str,
        expiracion: DateTime<Utc>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE usuarios
            SET token = $2, expiracion = $3, actualizado_en = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(token)
        .bind(expiracion)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Cambia el password y descarta el token de restablecimiento
    pub async fn actualizar_password(
        pool: &PgPool,
        id: Uuid,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE usuarios
            SET password = $2, token = NULL, expiracion = NULL, actualizado_en = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(password_hash)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
