use lettre::{
    Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, SinglePart},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
        response::Response,
    },
};
use log::debug;
use mail_sender_app::{
    domain::{mail::OutgoingMail, receipt::DeliveryReceipt},
    ports::mail_transport::{MailError, MailTransport},
};

use crate::{
    config::MailConfig,
    error::{address_error, build_error, smtp_error},
};

/// SMTP delivery through lettre.
///
/// Holds only configuration; a new client is built for every message and
/// dropped once the relay has answered.
pub struct LettreMailTransport {
    config: MailConfig,
}

impl LettreMailTransport {
    pub fn new(config: MailConfig) -> Self {
        Self { config }
    }

    fn build_transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, MailError> {
        let tls_parameters = TlsParameters::new(self.config.host.clone()).map_err(smtp_error)?;
        let tls = if self.config.secure {
            Tls::Wrapper(tls_parameters)
        } else {
            Tls::Opportunistic(tls_parameters)
        };

        debug!(
            "Building SMTP transport for {}:{} (secure: {})",
            self.config.host, self.config.port, self.config.secure
        );

        Ok(
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(self.config.host.as_str())
                .port(self.config.port)
                .tls(tls)
                .credentials(Credentials::new(
                    self.config.username.clone(),
                    self.config.password.clone(),
                ))
                .build(),
        )
    }
}

#[async_trait::async_trait]
impl MailTransport for LettreMailTransport {
    async fn send(&self, mail: &OutgoingMail) -> Result<DeliveryReceipt, MailError> {
        let message = build_message(mail)?;
        let transport = self.build_transport()?;
        let response = transport
            .send(message.clone())
            .await
            .map_err(smtp_error)?;
        Ok(receipt_from_response(&message, &response))
    }
}

pub fn build_message(mail: &OutgoingMail) -> Result<Message, MailError> {
    let from_address: Address = mail
        .from
        .address
        .parse()
        .map_err(|e| address_error(&mail.from.address, e))?;
    let display_name = Some(mail.from.display_name.clone()).filter(|name| !name.is_empty());
    let from = Mailbox::new(display_name, from_address);
    let to: Mailbox = mail.to.parse().map_err(|e| address_error(&mail.to, e))?;

    Message::builder()
        .from(from)
        .to(to)
        .subject(mail.subject.clone())
        .message_id(None)
        .singlepart(SinglePart::html(mail.html_body.clone()))
        .map_err(build_error)
}

fn receipt_from_response(message: &Message, response: &Response) -> DeliveryReceipt {
    let envelope = message.envelope();
    DeliveryReceipt {
        code: u16::from(response.code()),
        lines: response.message().map(String::from).collect(),
        message_id: message
            .headers()
            .get_raw("Message-ID")
            .map(|id| id.to_string()),
        envelope_from: envelope.from().map(|address| address.to_string()),
        accepted: envelope.to().iter().map(|address| address.to_string()).collect(),
    }
}
