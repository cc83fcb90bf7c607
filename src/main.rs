use anyhow::{anyhow, Context, Result};
use menu_suggest::api_connection::Provider;
use menu_suggest::cli::{parse_args, read_raw_request};
use menu_suggest::config::SuggestConfig;
use menu_suggest::menu_suggester::MenuSuggester;
use menu_suggest::MenuRequest;
use serde_json::json;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let cli_args = parse_args();
    let mut config = SuggestConfig::from_env().context("Invalid configuration in environment")?;
    cli_args.apply_to(&mut config);

    tracing::info!(source = %cli_args.request_file, "reading menu request");
    let raw_request = read_raw_request(&cli_args.request_file).await?;

    if cli_args.validate_only {
        let (request, report) = MenuRequest::from_value(&raw_request).validate();
        let valid = report.valid;
        let output = json!({ "request": request, "report": report });
        println!("{}", serde_json::to_string_pretty(&output)?);
        if !valid {
            return Err(anyhow!("Menu request failed validation"));
        }
        return Ok(());
    }

    let provider = Provider::openrouter(&config);
    tracing::info!(model = provider.model(), "requesting menu suggestions");
    let suggester = MenuSuggester::new(provider).with_strict_response(config.strict_response);

    match suggester.suggest(&raw_request).await {
        Ok(suggestion) => {
            println!("{}", serde_json::to_string_pretty(&suggestion.response)?);
            Ok(())
        }
        Err(e) => {
            tracing::error!(status = %e.status_code(), "menu suggestion failed");
            Err(anyhow!("Menu suggestion failed: {}", e))
        }
    }
}
