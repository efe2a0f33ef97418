/// Modelo de sesión
///
/// La sesión respalda la cookie del navegador: la cookie lleva solo el id
/// (UUID) y el resto vive en esta tabla. Una fila vencida equivale a no
/// tener sesión.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE sesiones (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     usuario_id UUID NOT NULL REFERENCES usuarios(id) ON DELETE CASCADE,
///     expira_en TIMESTAMPTZ NOT NULL,
///     creado_en TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Duración de una sesión nueva
const DURACION_HORAS: i64 = 24;

/// Sesión activa de un usuario
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Sesion {
    /// Identificador de la sesión; es el valor que viaja en la cookie
    pub id: Uuid,

    /// Usuario autenticado
    pub usuario_id: Uuid,

    /// Momento en que la sesión deja de valer
    pub expira_en: DateTime<Utc>,

    /// Fecha de creación
    pub creado_en: DateTime<Utc>,
}

impl Sesion {
    /// Crea una sesión nueva para un usuario
    pub async fn create(pool: &PgPool, usuario_id: Uuid) -> Result<Self, sqlx::Error> {
        let expira_en = Utc::now() + Duration::hours(DURACION_HORAS);

        let sesion = sqlx::query_as::<_, Sesion>(
            r#"
            INSERT INTO sesiones (usuario_id, expira_en)
            VALUES ($1, $2)
            RETURNING id, usuario_id, expira_en, creado_en
            "#,
        )
        .bind(usuario_id)
        .bind(expira_en)
        .fetch_one(pool)
        .await?;

        Ok(sesion)
    }

    /// Busca una sesión vigente por id
    ///
    /// Una sesión vencida se trata como inexistente.
    pub async fn find_activa(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let sesion = sqlx::query_as::<_, Sesion>(
            r#"
            SELECT id, usuario_id, expira_en, creado_en
            FROM sesiones
            WHERE id = $1 AND expira_en > NOW()
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(sesion)
    }

    /// Elimina una sesión (cierre de sesión)
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sesiones WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
