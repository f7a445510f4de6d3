use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use log::{Level, LevelFilter, Log, Metadata, Record};
use mail_sender_app::ports::mail_transport::MailErrorKind;
use mail_sender_lettre::send_mail;
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    net::TcpListener,
};

struct CaptureLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl CaptureLogger {
    fn take_errors(&self) -> Vec<String> {
        std::mem::take(&mut *self.records.lock().unwrap())
            .into_iter()
            .filter(|(level, _)| *level == Level::Error)
            .map(|(_, line)| line)
            .collect()
    }
}

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        self.records
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger {
    records: Mutex::new(Vec::new()),
};

struct Relay {
    port: u16,
    connections: Arc<AtomicUsize>,
    payloads: Arc<Mutex<Vec<String>>>,
}

/// Accepting SMTP relay that serves client sessions one after another.
async fn spawn_relay() -> Relay {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let connections = Arc::new(AtomicUsize::new(0));
    let payloads = Arc::new(Mutex::new(Vec::new()));

    let counted = connections.clone();
    let recorded = payloads.clone();
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            counted.fetch_add(1, Ordering::SeqCst);
            let (reader, mut writer) = stream.into_split();
            let mut reader = BufReader::new(reader);
            if writer.write_all(b"220 relay.test ESMTP\r\n").await.is_err() {
                continue;
            }

            let mut line = String::new();
            loop {
                line.clear();
                if reader.read_line(&mut line).await.unwrap_or(0) == 0 {
                    break;
                }
                let command = line.trim_end().to_uppercase();
                let reply: &[u8] = if command.starts_with("EHLO") || command.starts_with("HELO") {
                    b"250-relay.test\r\n250-AUTH PLAIN LOGIN\r\n250 8BITMIME\r\n"
                } else if command.starts_with("AUTH") {
                    b"235 2.7.0 Accepted\r\n"
                } else if command.starts_with("MAIL") || command.starts_with("RCPT") {
                    b"250 2.1.0 OK\r\n"
                } else if command.starts_with("DATA") {
                    if writer.write_all(b"354 Go ahead\r\n").await.is_err() {
                        break;
                    }
                    let mut payload = String::new();
                    loop {
                        line.clear();
                        if reader.read_line(&mut line).await.unwrap_or(0) == 0 || line == ".\r\n" {
                            break;
                        }
                        payload.push_str(&line);
                    }
                    recorded.lock().unwrap().push(payload);
                    b"250 2.0.0 OK queued\r\n"
                } else if command.starts_with("QUIT") {
                    let _ = writer.write_all(b"221 2.0.0 Bye\r\n").await;
                    break;
                } else {
                    b"250 2.0.0 OK\r\n"
                };
                if writer.write_all(reply).await.is_err() {
                    break;
                }
            }
        }
    });

    Relay {
        port,
        connections,
        payloads,
    }
}

fn set_env(vars: &[(&str, &str)]) {
    for (key, value) in vars {
        // Only one test runs in this binary, so nothing reads the
        // environment concurrently.
        unsafe { std::env::set_var(key, value) };
    }
}

// Single test: both the environment and the logger are process-wide.
#[tokio::test]
async fn send_mail_reads_environment_per_call() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Trace);

    let relay = spawn_relay().await;
    let port = relay.port.to_string();

    unsafe { std::env::remove_var("MAIL_FROM_NAME") };
    set_env(&[
        ("MAIL_SERVICE", ""),
        ("MAIL_HOST", "127.0.0.1"),
        ("MAIL_PORT", port.as_str()),
        ("MAIL_SECURE", "false"),
        ("MAIL_USER", "noreply@example.com"),
        ("MAIL_PASS", "secret"),
    ]);

    let receipt = send_mail("a@b.com", "Verify", "<p>code: 123456</p>")
        .await
        .unwrap();

    assert_eq!(receipt.response(), "250 2.0.0 OK queued");
    assert_eq!(receipt.accepted, vec!["a@b.com"]);
    assert_eq!(relay.connections.load(Ordering::SeqCst), 1);
    {
        let payloads = relay.payloads.lock().unwrap();
        assert_eq!(payloads.len(), 1);
        assert!(payloads[0].contains("Studynotion | Aryan"));
        assert!(payloads[0].contains("noreply@example.com"));
        assert!(payloads[0].contains("To: a@b.com"));
        assert!(payloads[0].contains("Subject: Verify"));
        assert!(payloads[0].contains("<p>code: 123456</p>"));
    }
    assert!(LOGGER.take_errors().is_empty());

    // A port that does not parse is caught before anything is sent.
    set_env(&[("MAIL_PORT", "smtp")]);
    let err = send_mail("a@b.com", "Verify", "<p>code: 123456</p>")
        .await
        .unwrap_err();

    assert_eq!(err.kind, MailErrorKind::Configuration);
    assert!(err.message.contains("MAIL_PORT"));
    let errors = LOGGER.take_errors();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0], format!("Mail sending error: {}", err.message));
    assert!(errors[1].starts_with("Full error: [configuration]"));
    assert_eq!(relay.connections.load(Ordering::SeqCst), 1);

    // Empty credentials still produce a value; the empty sender address
    // is rejected while building the message.
    set_env(&[("MAIL_PORT", port.as_str()), ("MAIL_USER", ""), ("MAIL_PASS", "")]);
    let err = send_mail("a@b.com", "Verify", "<p>code: 123456</p>")
        .await
        .unwrap_err();

    assert_eq!(err.kind, MailErrorKind::InvalidAddress);
    assert_eq!(LOGGER.take_errors().len(), 2);
    assert_eq!(relay.connections.load(Ordering::SeqCst), 1);
    assert_eq!(relay.payloads.lock().unwrap().len(), 1);
}
