mod cli;
mod config;
mod console;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use config::Config;
use distil_loop::RefineLoop;
use distil_model::{OpenAIConfig, OpenAIGenerator};
use distil_source::{ArxivConfig, ArxivSource};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    let mut model_config = OpenAIConfig::new(config.api_key, cli.model.clone())
        .with_temperature(cli.temperature);
    if let Some(base_url) = config.base_url {
        model_config = model_config.with_base_url(base_url);
    }
    let generator = Arc::new(OpenAIGenerator::new(model_config)?);

    let source =
        Arc::new(ArxivSource::new(ArxivConfig::new(cli.max_results, cli.max_chars))?);

    let refine = RefineLoop::new(source, generator);

    match cli.query {
        Some(query) => console::run_query(&refine, &query, cli.json).await,
        None => console::run_console(refine, cli.json).await,
    }
}
