/// Validación de formularios y mensajes flash
///
/// Cada endpoint con cuerpo aplica un conjunto fijo de reglas antes de tocar
/// la base: recortar espacios, escapar caracteres con significado en HTML y
/// exigir que el campo no quede vacío. Una violación no produce un status de
/// error: el handler junta los `Mensaje` y vuelve a renderizar el formulario
/// con status 200.

use serde::Serialize;

/// Mensaje flash para las vistas
///
/// `tipo` es la clase de alerta de Bootstrap que usa la plantilla.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Mensaje {
    /// Texto visible para el usuario
    pub texto: String,

    /// Clase de presentación: alert-danger, alert-success o alert-warning
    pub tipo: String,
}

impl Mensaje {
    /// Mensaje de error de validación
    pub fn error(texto: impl Into<String>) -> Self {
        Self {
            texto: texto.into(),
            tipo: "alert-danger".to_string(),
        }
    }

    /// Mensaje de operación exitosa
    pub fn exito(texto: impl Into<String>) -> Self {
        Self {
            texto: texto.into(),
            tipo: "alert-success".to_string(),
        }
    }

    /// Advertencia (por ejemplo, una falla interna recuperable)
    pub fn advertencia(texto: impl Into<String>) -> Self {
        Self {
            texto: texto.into(),
            tipo: "alert-warning".to_string(),
        }
    }
}

/// Recorta espacios y escapa los caracteres con significado en HTML
///
/// El conjunto escapado es `& < > " ' /`, igual que el `escape()` de los
/// sanitizadores de formularios habituales.
///
/// El valor se guarda ya escapado y Askama escapa de nuevo al renderizar,
/// así que un nombre ingresado como `a & b` se muestra como `a &amp; b`.
/// Escapar en un solo lado cambia lo que ven los usuarios existentes: las
/// dos mitades van juntas.
pub fn sanear(valor: &str) -> String {
    let recortado = valor.trim();
    let mut salida = String::with_capacity(recortado.len());

    for c in recortado.chars() {
        match c {
            '&' => salida.push_str("&amp;"),
            '<' => salida.push_str("&lt;"),
            '>' => salida.push_str("&gt;"),
            '"' => salida.push_str("&quot;"),
            '\'' => salida.push_str("&#x27;"),
            '/' => salida.push_str("&#x2F;"),
            otro => salida.push(otro),
        }
    }

    salida
}

/// Sanea un campo obligatorio y acumula un mensaje si quedó vacío
///
/// Devuelve el valor saneado; si tras recortar no queda nada, agrega el
/// mensaje de error indicado a la lista.
pub fn campo_obligatorio(valor: &str, mensaje: &str, mensajes: &mut Vec<Mensaje>) -> String {
    let saneado = sanear(valor);

    if saneado.is_empty() {
        mensajes.push(Mensaje::error(mensaje));
    }

    saneado
}
