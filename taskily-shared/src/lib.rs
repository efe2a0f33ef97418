//! # Taskily Shared Library
//!
//! Capa de datos y utilidades transversales compartidas por el servidor web
//! de Taskily.
//!
//! ## Module Organization
//!
//! - `models`: modelos de base de datos (usuarios, proyectos, tareas, sesiones)
//! - `auth`: hashing de passwords y tokens de restablecimiento
//! - `db`: pool de conexiones y migraciones
//! - `texto`: slugs y fechas relativas para la capa de presentación

pub mod auth;
pub mod db;
pub mod models;
pub mod texto;

/// Current version of the Taskily shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
