use anyhow::Context;
use brfss_processor::cli::Args;
use brfss_processor::processor::SurveyProcessor;
use clap::Parser;
use std::process;
use tracing::debug;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    setup_logging(&args);
    debug!("Command line arguments: {:?}", args);

    match run(&args) {
        Ok(()) => process::exit(0),
        Err(error) => {
            // Error occurred - print to stderr and exit with error code
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let processor = SurveyProcessor::new(args.input_path.clone(), args.output_path.clone())
        .context("Failed to prepare survey processor")?
        .with_config(args.to_config());

    processor
        .process()
        .with_context(|| format!("Failed to clean {}", args.input_path.display()))?;

    Ok(())
}

/// Set up structured logging based on CLI arguments
fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("brfss_processor={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .init();

    debug!("Logging initialized at level: {}", log_level);
}
