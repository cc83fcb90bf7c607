use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;
use tokio::io::AsyncReadExt;

use crate::config::SuggestConfig;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a JSON menu request, or `-` for stdin
    #[arg(short, long)]
    pub request_file: String,

    /// Only normalize and validate the request, without calling the model
    #[arg(long)]
    pub validate_only: bool,

    /// Model to ask for suggestions
    #[arg(short, long)]
    pub model: Option<String>,

    /// Reject replies whose menus are missing names, ingredients or instructions
    #[arg(long)]
    pub strict_response: bool,

    /// Environment variable holding the OpenRouter API key
    #[arg(long)]
    pub api_key_env: Option<String>,
}

impl Cli {
    pub fn apply_to(&self, config: &mut SuggestConfig) {
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        if let Some(var) = &self.api_key_env {
            config.api_key_env_var = var.clone();
        }
        if self.strict_response {
            config.strict_response = true;
        }
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

/// Reads and parses the raw request JSON from a file or stdin.
pub async fn read_raw_request(source: &str) -> Result<Value> {
    let text = if source == "-" {
        let mut buffer = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buffer)
            .await
            .context("Failed to read request from stdin")?;
        buffer
    } else {
        tokio::fs::read_to_string(source)
            .await
            .with_context(|| format!("Failed to read request file '{}'", source))?
    };

    serde_json::from_str(&text)
        .with_context(|| format!("Request in '{}' is not valid JSON", source))
}
