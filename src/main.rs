use call_log_report::utils::{logger, validation::Validate};
use call_log_report::{CliConfig, ReportEngine, ReportPipeline};
use clap::Parser;

fn main() {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.debug);

    tracing::info!("Starting call-log-report");
    if config.debug {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(2);
    }

    let pipeline = match ReportPipeline::new(config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            tracing::error!("Failed to set up pipeline: {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    let engine = ReportEngine::new(pipeline);
    match engine.run() {
        Ok(Some(path)) => {
            println!("Results saved to {}", path.display());
        }
        Ok(None) => {
            println!("No calls matched the specified criteria; no report written.");
        }
        Err(e) => {
            tracing::error!("Analysis failed: {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
