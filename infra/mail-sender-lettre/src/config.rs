use std::fmt;

use mail_sender_app::{
    domain::mail::SenderIdentity,
    ports::mail_transport::{MailError, MailErrorKind},
};

pub const DEFAULT_PORT: u16 = 587;

pub const DEFAULT_SERVICE: &str = "gmail";

pub const DEFAULT_SENDER_NAME: &str = "Studynotion | Aryan";

/// Connection and identity settings for the SMTP relay.
///
/// `secure` selects implicit TLS. When it is off the connection starts in
/// plaintext and upgrades with STARTTLS only if the relay offers it.
#[derive(Clone, PartialEq, Eq)]
pub struct MailConfig {
    pub service: Option<String>,
    pub host: String,
    pub port: u16,
    pub secure: bool,
    pub username: String,
    pub password: String,
    pub sender_name: String,
}

impl MailConfig {
    /// Reads `MAIL_*` variables from the process environment.
    pub fn from_env() -> Result<Self, MailError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, MailError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let service = match lookup("MAIL_SERVICE") {
            Some(service) if service.trim().is_empty() => None,
            Some(service) => Some(service.trim().to_lowercase()),
            None => Some(DEFAULT_SERVICE.to_string()),
        };

        let host = match lookup("MAIL_HOST").filter(|h| !h.trim().is_empty()) {
            Some(host) => host.trim().to_string(),
            None => service
                .as_deref()
                .and_then(well_known_host)
                .unwrap_or_default()
                .to_string(),
        };

        let port = match lookup("MAIL_PORT") {
            Some(port) => port.trim().parse::<u16>().map_err(|e| {
                MailError::new(
                    MailErrorKind::Configuration,
                    format!("Invalid MAIL_PORT '{}': {}", port, e),
                )
            })?,
            None => DEFAULT_PORT,
        };

        let secure = match lookup("MAIL_SECURE") {
            Some(secure) => parse_flag(&secure).ok_or_else(|| {
                MailError::new(
                    MailErrorKind::Configuration,
                    format!("Invalid MAIL_SECURE '{}'", secure),
                )
            })?,
            None => false,
        };

        Ok(Self {
            service,
            host,
            port,
            secure,
            username: lookup("MAIL_USER").unwrap_or_default(),
            password: lookup("MAIL_PASS").unwrap_or_default(),
            sender_name: lookup("MAIL_FROM_NAME")
                .unwrap_or_else(|| DEFAULT_SENDER_NAME.to_string()),
        })
    }

    /// The sender mails go out as: the display name plus the login address.
    pub fn sender(&self) -> SenderIdentity {
        SenderIdentity::new(self.sender_name.clone(), self.username.clone())
    }
}

impl fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailConfig")
            .field("service", &self.service)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("secure", &self.secure)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("sender_name", &self.sender_name)
            .finish()
    }
}

fn well_known_host(service: &str) -> Option<&'static str> {
    match service {
        "gmail" | "googlemail" => Some("smtp.gmail.com"),
        "outlook" | "hotmail" | "outlook365" => Some("smtp-mail.outlook.com"),
        "yahoo" => Some("smtp.mail.yahoo.com"),
        "sendgrid" => Some("smtp.sendgrid.net"),
        "mailgun" => Some("smtp.mailgun.org"),
        _ => None,
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
