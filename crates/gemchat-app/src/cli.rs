use std::path::PathBuf;

use clap::Parser;
use gemchat_common::ConfigError;
use gemchat_config::GemchatConfig;

/// gemchat: chat with a Gemini model from the terminal.
///
/// With a PROMPT, sends it once and prints the answer. Without one, starts
/// an interactive session; type /help there for commands.
#[derive(Parser, Debug)]
#[command(name = "gemchat", version, about)]
pub struct Args {
    /// Message to send in one-shot mode.
    pub prompt: Option<String>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Model override (e.g. gemini-2.0-flash).
    #[arg(short = 'm', long)]
    pub model: Option<String>,

    /// Print the answer as it streams in.
    #[arg(long)]
    pub stream: bool,

    /// File to attach to the first message.
    #[arg(short = 'a', long)]
    pub attach: Option<PathBuf>,

    /// Log filter override (e.g. debug, gemchat_ai=trace).
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Args {
    /// Apply command-line overrides to the loaded config and validate the result.
    pub fn apply_overrides(&self, config: &mut GemchatConfig) -> Result<(), ConfigError> {
        if let Some(ref model) = self.model {
            config.api.model = model.clone();
        }
        if self.stream {
            config.chat.stream = true;
        }
        gemchat_config::validation::validate(config)
    }
}

pub fn parse() -> Args {
    Args::parse()
}
