use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use pantry_client::llm::{self, LlmSettings};
use pantry_client::{logging, output, OpenAiCompatGenerator, Requester, RequesterSettings};

/// Ask an LLM for the ingredients of a dish and save them as JSON
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// The name of the dish to analyze
    #[arg(default_value = "hamburger")]
    dish: String,
    /// How many attempts to make before giving up
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(1..))]
    retries: u32,
    /// Directory for the result file and the log
    #[arg(long, default_value = "results")]
    results_dir: PathBuf,
    /// Model to ask
    #[arg(long, default_value = llm::DEFAULT_MODEL)]
    model: String,
    /// LLM API base URL (any OpenAI-compatible endpoint).
    #[arg(long, default_value = llm::DEFAULT_API_BASE)]
    llm_api_base: String,
    /// Throttle to this many requests per minute
    #[arg(long, default_value_t = 25, value_parser = clap::value_parser!(u32).range(1..))]
    requests_per_minute: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    std::fs::create_dir_all(&args.results_dir)
        .with_context(|| format!("Creating {}", args.results_dir.display()))?;
    let _guard = logging::init_logging(&args.results_dir)?;

    let llm_settings = LlmSettings::from_env(&args.llm_api_base, &args.model)?;
    let requester = Requester::new(
        Arc::new(OpenAiCompatGenerator::new(&llm_settings)),
        RequesterSettings {
            retries: args.retries,
            requests_per_minute: args.requests_per_minute,
            ..Default::default()
        },
    );
    tracing::debug!("Using model {} at {}", llm_settings.model, llm_settings.api_base);

    let result = requester.analyze(&args.dish).await;
    println!("{}", serde_json::to_string_pretty(&result)?);

    let out_path = output::save_result(&args.results_dir, &result)?;
    tracing::info!("Saved analysis to {}", out_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_need_no_arguments() {
        let args = Args::try_parse_from(["pantry-extract"]).unwrap();
        assert_eq!(args.dish, "hamburger");
        assert_eq!(args.retries, 3);
        assert_eq!(args.requests_per_minute, 25);
        assert_eq!(args.results_dir, PathBuf::from("results"));
        assert_eq!(args.model, llm::DEFAULT_MODEL);
        assert_eq!(args.llm_api_base, llm::DEFAULT_API_BASE);
    }

    #[test]
    fn test_zero_retries_is_rejected() {
        assert!(Args::try_parse_from(["pantry-extract", "--retries", "0"]).is_err());
        let args = Args::try_parse_from(["pantry-extract", "fried rice", "--retries", "5"]).unwrap();
        assert_eq!(args.dish, "fried rice");
        assert_eq!(args.retries, 5);
    }
}
