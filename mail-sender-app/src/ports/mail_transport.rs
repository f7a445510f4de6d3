use std::fmt;

use thiserror::Error;

use crate::domain::{mail::OutgoingMail, receipt::DeliveryReceipt};

#[async_trait::async_trait]
pub trait MailTransport {
    async fn send(&self, mail: &OutgoingMail) -> Result<DeliveryReceipt, MailError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailErrorKind {
    Configuration,
    InvalidAddress,
    Build,
    Connection,
    Tls,
    Timeout,
    Authentication,
    Rejected,
}

impl MailErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MailErrorKind::Configuration => "configuration",
            MailErrorKind::InvalidAddress => "invalid_address",
            MailErrorKind::Build => "build",
            MailErrorKind::Connection => "connection",
            MailErrorKind::Tls => "tls",
            MailErrorKind::Timeout => "timeout",
            MailErrorKind::Authentication => "authentication",
            MailErrorKind::Rejected => "rejected",
        }
    }
}

impl fmt::Display for MailErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Any reason a message did not get accepted by the relay.
///
/// `message` is the short text meant for callers, `detail` keeps the full
/// rendering of whatever error caused it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct MailError {
    pub kind: MailErrorKind,
    pub message: String,
    pub detail: String,
    pub status: Option<u16>,
}

impl MailError {
    pub fn new(kind: MailErrorKind, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind,
            detail: message.clone(),
            message,
            status: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Whether trying again later could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self.kind {
            MailErrorKind::Connection | MailErrorKind::Timeout => true,
            MailErrorKind::Rejected => matches!(self.status, Some(400..=499)),
            _ => false,
        }
    }
}
