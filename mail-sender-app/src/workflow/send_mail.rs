use std::sync::Arc;

use log::{error, info};

use crate::{
    domain::{
        mail::{OutgoingMail, SenderIdentity},
        receipt::DeliveryReceipt,
    },
    ports::mail_transport::{MailError, MailTransport},
};

#[async_trait::async_trait]
pub trait SendMailUseCase {
    async fn send_mail(
        &self,
        recipient: &str,
        subject: &str,
        html_body: &str,
    ) -> Result<DeliveryReceipt, MailError>;
}

pub struct SendMailUseCaseImpl<T: MailTransport> {
    transport: Arc<T>,
    sender: SenderIdentity,
}

impl<T: MailTransport> SendMailUseCaseImpl<T> {
    pub fn new(transport: Arc<T>, sender: SenderIdentity) -> Self {
        Self { transport, sender }
    }
}

#[async_trait::async_trait]
impl<T: MailTransport + Send + Sync + 'static> SendMailUseCase for SendMailUseCaseImpl<T> {
    async fn send_mail(
        &self,
        recipient: &str,
        subject: &str,
        html_body: &str,
    ) -> Result<DeliveryReceipt, MailError> {
        let mail = OutgoingMail::new(self.sender.clone(), recipient, subject, html_body);
        match self.transport.send(&mail).await {
            Ok(receipt) => {
                info!("{}", receipt.response());
                Ok(receipt)
            }
            Err(e) => {
                log_failure(&e);
                Err(e)
            }
        }
    }
}

/// Emits the two failure lines: the short message, then the full detail.
pub fn log_failure(err: &MailError) {
    error!("Mail sending error: {}", err.message);
    error!("Full error: [{}] {}", err.kind, err.detail);
}
