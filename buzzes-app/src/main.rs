use anyhow::Context;
use buzzes_app::{console::HELP, AppState, Console};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = buzzes_store::Config::load().context("Failed to load config")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let state = AppState::in_memory(&config);
    tracing::info!(session_id = %state.session_id, "Starting Buzzes");

    tokio::spawn(buzzes_app::worker::run_event_logger(state.events.subscribe()));

    let mut console = Console::new(state);
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let welcome = console.start().await?;
    stdout.write_all(format!("{}\n{}", welcome.text, HELP).as_bytes()).await?;

    loop {
        stdout.write_all(b"\n> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        match console.handle_line(&line).await {
            Ok(reply) => {
                if reply.quit {
                    break;
                }
                if let Some(pause) = reply.pause {
                    tokio::time::sleep(pause).await;
                }
                stdout.write_all(reply.text.as_bytes()).await?;
            }
            Err(e) => {
                if !e.is_user_error() {
                    tracing::warn!("Command failed: {}", e);
                }
                stdout.write_all(format!("! {}\n", e).as_bytes()).await?;
            }
        }
    }

    tracing::info!("Bye");
    Ok(())
}
