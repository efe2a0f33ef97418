/// Tokens for the password-reset flow
///
/// El token es una cadena aleatoria opaca que viaja en el link del email de
/// restablecimiento y se guarda en la fila del usuario junto con su
/// expiración. Un token es válido una sola vez y durante una hora.

use chrono::{DateTime, Duration, Utc};
use rand::RngCore;

/// Validity window for a reset token
const VALIDEZ_HORAS: i64 = 1;

/// Generates a random reset token (32 bytes, hex encoded)
pub fn generar_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Returns the expiry timestamp for a token generated now
pub fn expiracion_token() -> DateTime<Utc> {
    Utc::now() + Duration::hours(VALIDEZ_HORAS)
}
