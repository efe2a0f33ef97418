//! # Taskily Web Server Library
//!
//! Aplicación web renderizada en el servidor para seguimiento de proyectos y
//! tareas.
//!
//! ## Modules
//!
//! - `app`: estado compartido, router y middleware de sesión
//! - `config`: configuración desde variables de entorno
//! - `error`: taxonomía de errores y su mapeo a redirecciones
//! - `forms`: validación de formularios y mensajes flash
//! - `mail`: envío del email de restablecimiento de password
//! - `routes`: un módulo de handlers por recurso
//! - `views`: structs de plantilla Askama y adaptación modelo → vista

pub mod app;
pub mod config;
pub mod error;
pub mod forms;
pub mod mail;
pub mod routes;
pub mod views;
