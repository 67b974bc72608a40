use brdoc::utils::{logger, validation::Validate};
use brdoc::{AuditEngine, CliConfig, LocalStorage, RosterPipeline};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting brdoc roster audit");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        tracing::error!("Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let pipeline = RosterPipeline::new(LocalStorage::default(), config);
    let engine = AuditEngine::new(pipeline);

    match engine.run().await {
        Ok(outcome) => {
            let summary = &outcome.summary;
            println!(
                "✅ Audited {} records: {} valid, {} invalid",
                summary.total, summary.valid, summary.invalid
            );
            for path in &outcome.written {
                println!("📁 Report saved to: {}", path);
            }
        }
        Err(e) => {
            tracing::error!(
                "Audit failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = e.severity().exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
