/// Modelo de proyecto
///
/// Un proyecto pertenece a exactamente un usuario y se identifica en las
/// rutas por su slug (`url`), único en todo el sistema. El slug se genera al
/// crear el proyecto a partir del nombre más un sufijo aleatorio.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE proyectos (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     nombre TEXT NOT NULL,
///     descripcion TEXT NOT NULL,
///     url TEXT NOT NULL UNIQUE,
///     usuario_id UUID NOT NULL REFERENCES usuarios(id),
///     creado_en TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::texto;

/// Proyecto de un usuario
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Proyecto {
    /// Identificador único (UUID v4)
    pub id: Uuid,

    /// Nombre del proyecto
    pub nombre: String,

    /// Descripción breve
    pub descripcion: String,

    /// Slug único apto para URL
    pub url: String,

    /// Dueño del proyecto
    pub usuario_id: Uuid,

    /// Fecha de creación
    pub creado_en: DateTime<Utc>,
}

/// Datos para crear un proyecto nuevo
///
/// El slug no se recibe: se genera a partir del nombre.
#[derive(Debug, Clone)]
pub struct CreateProyecto {
    /// Nombre del proyecto
    pub nombre: String,

    /// Descripción breve
    pub descripcion: String,

    /// Dueño del proyecto
    pub usuario_id: Uuid,
}

impl Proyecto {
    /// Inserta un proyecto nuevo con slug generado
    pub async fn create(pool: &PgPool, data: CreateProyecto) -> Result<Self, sqlx::Error> {
        let url = texto::slugificar(&data.nombre);

        let proyecto = sqlx::query_as::<_, Proyecto>(
            r#"
            INSERT INTO proyectos (nombre, descripcion, url, usuario_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, nombre, descripcion, url, usuario_id, creado_en
            "#,
        )
        .bind(data.nombre)
        .bind(data.descripcion)
        .bind(url)
        .bind(data.usuario_id)
        .fetch_one(pool)
        .await?;

        Ok(proyecto)
    }

    /// Busca un proyecto por id
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let proyecto = sqlx::query_as::<_, Proyecto>(
            r#"
            SELECT id, nombre, descripcion, url, usuario_id, creado_en
            FROM proyectos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(proyecto)
    }

    /// Busca un proyecto por su slug
    pub async fn find_by_url(pool: &PgPool, url: &str) -> Result<Option<Self>, sqlx::Error> {
        let proyecto = sqlx::query_as::<_, Proyecto>(
            r#"
            SELECT id, nombre, descripcion, url, usuario_id, creado_en
            FROM proyectos
            WHERE url = $1
            "#,
        )
        .bind(url)
        .fetch_optional(pool)
        .await?;

        Ok(proyecto)
    }

    /// Lista los proyectos de un usuario, del más nuevo al más viejo
    pub async fn list_by_usuario(pool: &PgPool, usuario_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let proyectos = sqlx::query_as::<_, Proyecto>(
            r#"
            SELECT id, nombre, descripcion, url, usuario_id, creado_en
            FROM proyectos
            WHERE usuario_id = $1
            ORDER BY creado_en DESC
            "#,
        )
        .bind(usuario_id)
        .fetch_all(pool)
        .await?;

        Ok(proyectos)
    }

    /// Actualiza nombre y descripción de un proyecto
    ///
    /// El slug no cambia al renombrar: los links existentes siguen vigentes.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        nombre: &str,
        descripcion: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let proyecto = sqlx::query_as::<_, Proyecto>(
            r#"
            UPDATE proyectos
            SET nombre = $2, descripcion = $3
            WHERE id = $1
            RETURNING id, nombre, descripcion, url, usuario_id, creado_en
            "#,
        )
        .bind(id)
        .bind(nombre)
        .bind(descripcion)
        .fetch_optional(pool)
        .await?;

        Ok(proyecto)
    }

    /// Elimina un proyecto por su slug
    ///
    /// Las tareas del proyecto no se eliminan junto con él.
    pub async fn delete_by_url(pool: &PgPool, url: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM proyectos WHERE url = $1")
            .bind(url)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Busca proyectos cuyo nombre contenga el término, sin distinguir
    /// mayúsculas
    ///
    /// La búsqueda es global: no se filtra por dueño. `%` y `_` no se
    /// escapan, por lo que actúan como comodines dentro del término.
    pub async fn buscar_por_nombre(pool: &PgPool, termino: &str) -> Result<Vec<Self>, sqlx::Error> {
        let patron = format!("%{}%", termino);

        let proyectos = sqlx::query_as::<_, Proyecto>(
            r#"
            SELECT id, nombre, descripcion, url, usuario_id, creado_en
            FROM proyectos
            WHERE nombre ILIKE $1
            ORDER BY creado_en DESC
            "#,
        )
        .bind(patron)
        .fetch_all(pool)
        .await?;

        Ok(proyectos)
    }

    /// Indica si el proyecto pertenece al usuario dado
    pub fn es_de(&self, usuario_id: Uuid) -> bool {
        self.usuario_id == usuario_id
    }
}
