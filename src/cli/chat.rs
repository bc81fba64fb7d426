//! CLI `chat` command — interactive conversation with the health assistant.

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

use healthmate::chat::{ChatSession, HttpChatEndpoint, SubmitOutcome};
use healthmate::config::HealthmateConfig;

const QUIT_COMMAND: &str = "/quit";

/// Read messages from stdin until EOF or `/quit`.
pub async fn chat(config: &HealthmateConfig) -> Result<()> {
    let store = super::open_store(config)?;
    let endpoint = HttpChatEndpoint::from_config(&config.chat)?;
    tracing::info!(endpoint = %endpoint.url(), "chat session started");

    let session = ChatSession::new(config.chat.greeting.clone(), Arc::new(endpoint), store);

    for turn in session.turns() {
        println!("Assistant: {}", turn.content);
    }
    println!("(type {QUIT_COMMAND} to leave)");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("\nYou: ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim() == QUIT_COMMAND {
            break;
        }

        let spinner = thinking_spinner();
        let outcome = session.submit(&line).await;
        spinner.finish_and_clear();

        match outcome {
            SubmitOutcome::Ignored(_) => {}
            SubmitOutcome::Replied { reply, logged } => {
                println!("\nAssistant: {reply}");
                if let Some(log) = logged {
                    println!(
                        "\n[Symptom logged] {} has been added to your health records (severity {}).",
                        log.symptom, log.severity
                    );
                }
            }
            SubmitOutcome::Failed { fallback } => println!("\nAssistant: {fallback}"),
        }
    }

    Ok(())
}

fn thinking_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("  {spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Assistant is thinking...");
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}
