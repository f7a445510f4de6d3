use lettre::{address::AddressError, transport::smtp};
use mail_sender_app::ports::mail_transport::{MailError, MailErrorKind};

// Reply codes relays use for rejected credentials.
const AUTH_FAILURE_CODES: [u16; 3] = [530, 534, 535];

pub(crate) fn smtp_error(e: smtp::Error) -> MailError {
    let status = e.status().map(u16::from);
    let kind = if e.is_timeout() {
        MailErrorKind::Timeout
    } else if e.is_tls() {
        MailErrorKind::Tls
    } else if status.is_some_and(|code| AUTH_FAILURE_CODES.contains(&code)) {
        MailErrorKind::Authentication
    } else if e.is_transient() || e.is_permanent() {
        MailErrorKind::Rejected
    } else {
        MailErrorKind::Connection
    };

    let err = MailError::new(kind, e.to_string()).with_detail(format!("{:?}", e));
    match status {
        Some(code) => err.with_status(code),
        None => err,
    }
}

pub(crate) fn address_error(input: &str, e: AddressError) -> MailError {
    MailError::new(
        MailErrorKind::InvalidAddress,
        format!("Invalid address '{}': {}", input, e),
    )
    .with_detail(format!("{:?}", e))
}

pub(crate) fn build_error(e: lettre::error::Error) -> MailError {
    MailError::new(MailErrorKind::Build, format!("Failed to build email: {}", e))
        .with_detail(format!("{:?}", e))
}
