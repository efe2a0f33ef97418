/// Utilidades de texto para la capa de presentación
///
/// - `slugificar`: genera la URL única de un proyecto a partir de su nombre
/// - `hace`: formatea una fecha como tiempo relativo en castellano
///   ("hace 3 días"), calculado al momento de renderizar

use chrono::{DateTime, Utc};
use rand::RngCore;

/// Genera un slug apto para URL a partir de un nombre de proyecto
///
/// El nombre se pasa a minúsculas, se transliteran las vocales acentuadas y
/// la eñe, y todo lo que no sea alfanumérico se colapsa en guiones. Se agrega
/// un sufijo aleatorio corto para que el slug sea único aunque dos proyectos
/// compartan nombre.
///
/// # Example
///
/// ```
/// use taskily_shared::texto::slugificar;
///
/// let slug = slugificar("Mi Proyecto Ñoño");
/// assert!(slug.starts_with("mi-proyecto-nono-"));
/// ```
pub fn slugificar(nombre: &str) -> String {
    let mut base = String::with_capacity(nombre.len());
    let mut guion_pendiente = false;

    for c in nombre.chars().flat_map(char::to_lowercase) {
        let c = match c {
            'á' => 'a',
            'é' => 'e',
            'í' => 'i',
            'ó' => 'o',
            'ú' | 'ü' => 'u',
            'ñ' => 'n',
            otro => otro,
        };

        if c.is_ascii_alphanumeric() {
            if guion_pendiente && !base.is_empty() {
                base.push('-');
            }
            guion_pendiente = false;
            base.push(c);
        } else {
            guion_pendiente = true;
        }
    }

    let mut sufijo = [0u8; 3];
    rand::thread_rng().fill_bytes(&mut sufijo);

    if base.is_empty() {
        format!("proyecto-{}", hex::encode(sufijo))
    } else {
        format!("{}-{}", base, hex::encode(sufijo))
    }
}

/// Formatea una fecha como tiempo relativo en castellano
///
/// Los cortes siguen los de moment.js: menos de 45 segundos es "hace unos
/// segundos", hasta 45 minutos se cuenta en minutos, hasta 22 horas en horas,
/// hasta 26 días en días, y de ahí en meses y años.
pub fn hace(fecha: DateTime<Utc>) -> String {
    hace_desde(fecha, Utc::now())
}

fn hace_desde(fecha: DateTime<Utc>, ahora: DateTime<Utc>) -> String {
    let segundos = (ahora - fecha).num_seconds().max(0);
    let minutos = segundos / 60;
    let horas = minutos / 60;
    let dias = horas / 24;
    let meses = dias / 30;
    let anios = dias / 365;

    if segundos < 45 {
        "hace unos segundos".to_string()
    } else if segundos < 90 {
        "hace un minuto".to_string()
    } else if minutos < 45 {
        format!("hace {} minutos", minutos)
    } else if minutos < 90 {
        "hace una hora".to_string()
    } else if horas < 22 {
        format!("hace {} horas", horas)
    } else if horas < 36 {
        "hace un día".to_string()
    } else if dias < 26 {
        format!("hace {} días", dias)
    } else if dias < 46 {
        "hace un mes".to_string()
    } else if dias < 320 {
        format!("hace {} meses", meses.max(2))
    } else if dias < 548 {
        "hace un año".to_string()
    } else {
        format!("hace {} años", anios.max(2))
    }
}
