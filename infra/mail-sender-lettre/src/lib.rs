use std::sync::Arc;

use mail_sender_app::{
    build_application,
    domain::receipt::DeliveryReceipt,
    ports::mail_transport::MailError,
    workflow::send_mail::log_failure,
};

pub mod config;
mod error;
pub mod transport;

pub use config::MailConfig;
pub use transport::LettreMailTransport;

/// Sends one HTML mail using the `MAIL_*` environment as it is right now.
///
/// The environment is read on every call. Failures, including unreadable
/// configuration, are logged and returned; nothing here panics.
pub async fn send_mail(
    recipient: &str,
    subject: &str,
    html_body: &str,
) -> Result<DeliveryReceipt, MailError> {
    let config = MailConfig::from_env().inspect_err(log_failure)?;
    let sender = config.sender();
    let app = build_application(Arc::new(LettreMailTransport::new(config)), sender);
    app.send_mail_use_case
        .send_mail(recipient, subject, html_body)
        .await
}
