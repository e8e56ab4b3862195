use clap::Parser;
use dotenvy::dotenv;
use std::io::Write;
use std::path::Path;
use stocksense::api::HttpBackend;
use stocksense::cli::{Cli, Commands, run_catalog, run_dashboard};
use stocksense::config::environment::{apply_overrides, load_app_settings};
use stocksense::errors::Result;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn write_output(output: &str, path: Option<&Path>) -> Result<()> {
    if let Some(path) = path {
        std::fs::write(path, output)?;
        info!("Wrote {}", path.display());
    } else {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(output.as_bytes())?;
        stdout.write_all(b"\n")?;
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible); logs go to stderr so
    //    rendered output on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // 2. Load .env file before clap reads env-backed flags
    dotenv().ok();

    let cli = Cli::parse();

    // 3. Load settings; the command-line URL wins over file and environment
    let settings = apply_overrides(load_app_settings()?, cli.api_base_url.clone());

    let backend = HttpBackend::new(settings.clone())
        .inspect_err(|e| error!("Failed to build HTTP client: {}", e))?;

    match &cli.command {
        Commands::Catalog(args) => {
            let output = run_catalog(backend, &settings, args).await?;
            write_output(&output, args.output.as_deref())
        }
        Commands::Dashboard(args) => {
            let output = run_dashboard(&backend, &settings, args)
                .await
                .inspect_err(|e| error!("Dashboard failed: {}", e))?;
            write_output(&output, args.output.as_deref())
        }
    }
}
