use std::sync::Arc;

use crate::{
    domain::mail::SenderIdentity,
    ports::mail_transport::MailTransport,
    workflow::send_mail::{SendMailUseCase, SendMailUseCaseImpl},
};

pub mod domain;
pub mod ports;
pub mod workflow;

pub struct Application {
    pub send_mail_use_case: Box<dyn SendMailUseCase + Send + Sync + 'static>,
}

pub fn build_application<T: MailTransport + Send + Sync + 'static>(
    mail_transport: Arc<T>,
    sender: SenderIdentity,
) -> Application {
    Application {
        send_mail_use_case: Box::new(SendMailUseCaseImpl::new(mail_transport, sender)),
    }
}
