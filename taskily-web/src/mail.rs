/// Envío del email de restablecimiento de password
///
/// El único correo saliente de la aplicación: un link con el token de
/// restablecimiento. El transporte SMTP se arma una sola vez al iniciar y se
/// comparte vía `AppState`.

use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::SmtpConfig;

/// Error type for mail operations
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// Dirección de correo inválida
    #[error("dirección de correo inválida: {0}")]
    Direccion(#[from] lettre::address::AddressError),

    /// No se pudo armar el mensaje
    #[error("no se pudo armar el mensaje: {0}")]
    Mensaje(#[from] lettre::error::Error),

    /// Falla del transporte SMTP
    #[error("falla del transporte SMTP: {0}")]
    Transporte(#[from] lettre::transport::smtp::Error),
}

/// Cliente de correo saliente
#[derive(Clone)]
pub struct Correo {
    transporte: AsyncSmtpTransport<Tokio1Executor>,
    remitente: Mailbox,
    base_url: String,
}

impl Correo {
    /// Construye el cliente a partir de la configuración SMTP
    ///
    /// Con `usuario` vacío el transporte no autentica, útil contra un relay
    /// local de desarrollo.
    pub fn desde_config(config: &SmtpConfig) -> Result<Self, MailError> {
        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
                .port(config.port);

        if !config.usuario.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.usuario.clone(),
                config.password.clone(),
            ));
        }

        Ok(Self {
            transporte: builder.build(),
            remitente: config.remitente.parse()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Envía el email con el link de restablecimiento
    pub async fn enviar_reinicio(
        &self,
        destinatario: &str,
        nombre: &str,
        token: &str,
    ) -> Result<(), MailError> {
        let link = format!("{}/resetear_password/{}", self.base_url, token);

        let cuerpo = format!(
            "<p>Hola {},</p>\
             <p>Pediste restablecer tu password de Taskily. El link vale por una hora:</p>\
             <p><a href=\"{}\">{}</a></p>\
             <p>Si no fuiste vos, ignor&aacute; este correo.</p>",
            nombre, link, link
        );

        let mensaje = Message::builder()
            .from(self.remitente.clone())
            .to(destinatario.parse()?)
            .subject("Restablecer tu password de Taskily")
            .header(ContentType::TEXT_HTML)
            .body(cuerpo)?;

        self.transporte.send(mensaje).await?;

        tracing::info!(destinatario, "email de restablecimiento enviado");
        Ok(())
    }
}
