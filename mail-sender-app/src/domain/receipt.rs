/// What the relay handed back when it accepted a message.
///
/// Acceptance only means the relay took responsibility for the message, not
/// that it reached the recipient's mailbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub code: u16,
    pub lines: Vec<String>,
    pub message_id: Option<String>,
    pub envelope_from: Option<String>,
    pub accepted: Vec<String>,
}

impl DeliveryReceipt {
    /// The reply as a single line, e.g. `250 2.0.0 OK queued`.
    pub fn response(&self) -> String {
        if self.lines.is_empty() {
            self.code.to_string()
        } else {
            format!("{} {}", self.code, self.lines.join(" "))
        }
    }
}
