use std::process::ExitCode;

use log::info;
use tokio::io::AsyncReadExt;

mod logs;

const USAGE: &str = "Usage: mail-sender <recipient> <subject> <html-body | ->";

async fn read_body(arg: &str) -> std::io::Result<String> {
    if arg != "-" {
        return Ok(arg.to_string());
    }
    let mut body = String::new();
    tokio::io::stdin().read_to_string(&mut body).await?;
    Ok(body)
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    if let Err(e) = logs::init_logger() {
        eprintln!("Failed to initialize logger: {}", e);
        return ExitCode::FAILURE;
    }

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 4 {
        eprintln!("{}", USAGE);
        return ExitCode::from(2);
    }

    let body = match read_body(&args[3]).await {
        Ok(body) => body,
        Err(e) => {
            eprintln!("Failed to read body from stdin: {}", e);
            return ExitCode::from(2);
        }
    };

    match mail_sender_lettre::send_mail(&args[1], &args[2], &body).await {
        Ok(receipt) => {
            if let Some(message_id) = &receipt.message_id {
                info!("Accepted message {}", message_id);
            }
            println!("{}", receipt.response());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{} error: {}", e.kind, e);
            ExitCode::FAILURE
        }
    }
}
