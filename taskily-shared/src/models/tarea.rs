/// Modelo de tarea
///
/// Una tarea pertenece a un proyecto y tiene un estado booleano de
/// completitud que se alterna desde la vista del proyecto. La autorización
/// es transitiva: quien es dueño del proyecto puede operar sus tareas.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tareas (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     definicion TEXT NOT NULL,
///     estado BOOLEAN NOT NULL DEFAULT FALSE,
///     proyecto_id UUID NOT NULL,
///     creado_en TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// `proyecto_id` no tiene restricción de clave foránea: eliminar un proyecto
/// deja sus tareas en la tabla, ilegibles porque toda lectura pasa por el
/// proyecto padre.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Tarea de un proyecto
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tarea {
    /// Identificador único (UUID v4)
    pub id: Uuid,

    /// Texto de la tarea
    pub definicion: String,

    /// `true` si la tarea está completa
    pub estado: bool,

    /// Proyecto al que pertenece
    pub proyecto_id: Uuid,

    /// Fecha de creación
    pub creado_en: DateTime<Utc>,
}

/// Datos para crear una tarea nueva
#[derive(Debug, Clone)]
pub struct CreateTarea {
    /// Texto de la tarea
    pub definicion: String,

    /// Proyecto al que pertenece
    pub proyecto_id: Uuid,
}

impl Tarea {
    /// Inserta una tarea nueva, pendiente por defecto
    pub async fn create(pool: &PgPool, data: CreateTarea) -> Result<Self, sqlx::Error> {
        let tarea = sqlx::query_as::<_, Tarea>(
            r#"
            INSERT INTO tareas (definicion, proyecto_id)
            VALUES ($1, $2)
            RETURNING id, definicion, estado, proyecto_id, creado_en
            "#,
        )
        .bind(data.definicion)
        .bind(data.proyecto_id)
        .fetch_one(pool)
        .await?;

        Ok(tarea)
    }

    /// Busca una tarea por id
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let tarea = sqlx::query_as::<_, Tarea>(
            r#"
            SELECT id, definicion, estado, proyecto_id, creado_en
            FROM tareas
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(tarea)
    }

    /// Lista las tareas de un proyecto, de la más vieja a la más nueva
    pub async fn list_by_proyecto(
        pool: &PgPool,
        proyecto_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let tareas = sqlx::query_as::<_, Tarea>(
            r#"
            SELECT id, definicion, estado, proyecto_id, creado_en
            FROM tareas
            WHERE proyecto_id = $1
            ORDER BY creado_en ASC
            "#,
        )
        .bind(proyecto_id)
        .fetch_all(pool)
        .await?;

        Ok(tareas)
    }

    /// Cambia el estado de completitud de una tarea
    pub async fn cambiar_estado(
        pool: &PgPool,
        id: Uuid,
        estado: bool,
    ) -> Result<Option<Self>, sqlx::Error> {
        let tarea = sqlx::query_as::<_, Tarea>(
            r#"
            UPDATE tareas
            SET estado = $2
            WHERE id = $1
            RETURNING id, definicion, estado, proyecto_id, creado_en
            "#,
        )
        .bind(id)
        .bind(estado)
        .fetch_optional(pool)
        .await?;

        Ok(tarea)
    }

    /// Elimina una tarea por id
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tareas WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tarea_struct() {
        let data = CreateTarea {
            definicion: "Terminar el informe".to_string(),
            proyecto_id: Uuid::new_v4(),
        };

        assert_eq!(data.definicion, "Terminar el informe");
    }
}
