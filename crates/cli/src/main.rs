mod cli;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mp3_to_opus_core::{
    load_config_or_default, validate_config, ConversionRequest, ConversionRequestHandler,
};

use cli::Cli;

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            std::process::exit(code);
        }
    };

    let Some(input) = cli.input.clone() else {
        let _ = Cli::command().print_help();
        std::process::exit(1);
    };

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "error".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(&cli, input).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: &Cli, input: PathBuf) -> Result<()> {
    let config = load_config_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;
    validate_config(&config).context("Configuration validation failed")?;

    let handler = ConversionRequestHandler::ffmpeg(config.transcoder);

    let request = ConversionRequest {
        input_path: input,
        output_path: cli.output.clone(),
        options: cli.overrides(),
    };

    let result = handler.convert(request).await?;

    println!("{}", result.message);
    println!("Input file: {}", result.input.display());
    println!("Output file: {}", result.output.display());
    println!(
        "Settings: {}",
        serde_json::to_string_pretty(&result.options)?
    );

    Ok(())
}
