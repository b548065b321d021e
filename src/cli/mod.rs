//! Command-line interface parsing and startup checks
//!
//! Everything that can fail fast happens here, before the terminal enters raw
//! mode: argument parsing, config loading, and the bearer-token check.

use std::env;
use std::error::Error;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::api::client::InferenceClient;
use crate::core::config::Config;
use crate::core::constants::TOKEN_ENV_VAR;
use crate::core::logging::ChatLog;
use crate::core::session::SessionController;
use crate::ui::{run_chat, ChatApp};

#[derive(Parser)]
#[command(name = "kisan")]
#[command(about = "A terminal chat assistant for farming questions")]
#[command(
    long_about = "Kisan is a full-screen terminal chat assistant for farming and agricultural \
questions, backed by Zephyr 7B on the Hugging Face Inference API.\n\n\
Environment Variables:\n\
  HF_TOKEN          Your Hugging Face API token (required)\n\n\
Controls:\n\
  Type              Enter your question in the input field\n\
  Enter             Send the question\n\
  Up/Down/Mouse     Scroll through the conversation\n\
  Ctrl+C            Quit the application\n\
  Backspace         Delete characters in the input field"
)]
pub struct Args {
    /// Model to query on the inference endpoint
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Full endpoint URL (overrides the model-derived default)
    #[arg(short, long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Append the conversation to this file
    #[arg(short, long, value_name = "FILE")]
    pub log: Option<String>,

    /// Send every question to the model, skipping the farming keyword filter
    #[arg(long)]
    pub no_filter: bool,
}

pub async fn main() -> Result<(), Box<dyn Error>> {
    // Silent unless RUST_LOG is set, so diagnostics never bleed into the TUI.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = Config::load()?;

    let api_token = env::var(TOKEN_ENV_VAR).map_err(|_| {
        format!(
            "Error: {TOKEN_ENV_VAR} environment variable not set\n\n\
Please set your Hugging Face API token:\n\
export {TOKEN_ENV_VAR}=\"your-token-here\""
        )
    })?;

    let model = args.model.as_deref().unwrap_or_else(|| config.model());
    let endpoint = match args.endpoint {
        Some(endpoint) => endpoint,
        None => config.endpoint_for(model),
    };
    let topic_filter = !args.no_filter && config.topic_filter();

    let client = InferenceClient::new(endpoint, api_token)?;
    let chat_log = ChatLog::new(args.log)?;
    let session = SessionController::new(topic_filter);
    let params = config.generation_parameters();

    let app = ChatApp::new(session, client, params, chat_log);
    run_chat(app).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn no_filter_flag_parses() {
        let args = Args::parse_from(["kisan", "--no-filter", "-m", "some/model"]);
        assert!(args.no_filter);
        assert_eq!(args.model.as_deref(), Some("some/model"));
        assert!(args.endpoint.is_none());
    }
}
