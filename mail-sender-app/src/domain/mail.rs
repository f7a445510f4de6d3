use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderIdentity {
    pub display_name: String,
    pub address: String,
}

impl SenderIdentity {
    pub fn new(display_name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            address: address.into(),
        }
    }
}

impl fmt::Display for SenderIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" <{}>", self.display_name, self.address)
    }
}

/// A single HTML message, built fresh for every send.
///
/// Nothing here is validated: the recipient, subject and body are handed to
/// the transport exactly as the caller supplied them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub from: SenderIdentity,
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

impl OutgoingMail {
    pub fn new(from: SenderIdentity, to: &str, subject: &str, html_body: &str) -> Self {
        Self {
            from,
            to: to.to_string(),
            subject: subject.to_string(),
            html_body: html_body.to_string(),
        }
    }
}
