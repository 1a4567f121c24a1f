//! gemchat: terminal chat with a Gemini model.
//!
//! Loads the config, sets up logging, then either answers a single prompt
//! or runs an interactive session until /quit or end of input.

mod chat_app;
mod cli;
mod commands;

use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use gemchat_ai::{GeminiClient, GeminiConfig};
use gemchat_common::GemchatError;
use gemchat_config::LogLevel;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use crate::chat_app::{ChatApp, Outcome};

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse();

    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("gemchat: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: cli::Args) -> Result<ExitCode, GemchatError> {
    let mut config = gemchat_config::load_config(args.config.as_deref())?;
    args.apply_overrides(&mut config)?;

    init_logging(args.log_level.as_deref(), config.logging.level);

    let stream = config.chat.stream;

    let gemini = GeminiConfig::from_config(&config)?;
    tracing::info!(
        model = %gemini.model,
        stream,
        "gemchat v{} starting",
        env!("CARGO_PKG_VERSION")
    );

    let client = GeminiClient::new(gemini).map_err(|e| GemchatError::Ai(e.to_string()))?;
    let mut app = ChatApp::new(Arc::new(client), stream);

    if let Some(ref path) = args.attach {
        app.attach_file(path)
            .map_err(|e| GemchatError::Ai(e.to_string()))?;
    }

    match args.prompt {
        Some(prompt) => {
            let outcome = app.send(&prompt).await;
            let failed = matches!(outcome, Outcome::Error(_));
            render(&outcome);
            Ok(if failed {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
        None => {
            repl(&mut app).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// `--log-level` wins, then `RUST_LOG`, then the config file level.
/// Logs go to stderr so answers on stdout stay clean.
fn init_logging(cli_directive: Option<&str>, level: LogLevel) {
    let (filter, warning) = log_filter(cli_directive, level);
    if let Some(warning) = warning {
        eprintln!("gemchat: {warning}");
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// The filter to install, plus a warning when `--log-level` could not be parsed.
fn log_filter(cli_directive: Option<&str>, level: LogLevel) -> (EnvFilter, Option<String>) {
    let fallback = || {
        EnvFilter::new(format!(
            "gemchat_app={0},gemchat_ai={0},gemchat_config={0}",
            level.as_directive()
        ))
    };

    match cli_directive {
        Some(directive) => match EnvFilter::try_new(directive) {
            Ok(filter) => (filter, None),
            Err(e) => (
                fallback(),
                Some(format!(
                    "ignoring invalid --log-level {directive:?} ({e}), using {}",
                    level.as_directive()
                )),
            ),
        },
        None => (EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback()), None),
    }
}

async fn repl(app: &mut ChatApp) -> Result<(), GemchatError> {
    println!("gemchat: type a message, /help for commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };

        let outcome = app.handle(commands::parse_line(&line)).await;
        if outcome == Outcome::Quit {
            break;
        }
        render(&outcome);
    }

    Ok(())
}

fn render(outcome: &Outcome) {
    match outcome {
        Outcome::Answer(text) => println!("{text}"),
        Outcome::Streamed => println!(),
        Outcome::Error(message) => eprintln!("{message}"),
        Outcome::Info(message) => println!("{message}"),
        Outcome::Quit | Outcome::Nothing => {}
    }
}
