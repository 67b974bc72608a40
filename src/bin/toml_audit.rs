use anyhow::Context;
use brdoc::core::ConfigProvider;
use brdoc::utils::{logger, validation::Validate};
use brdoc::{AuditConfig, AuditEngine, LocalStorage, RosterPipeline};
use clap::Parser;

#[derive(Parser)]
#[command(name = "toml-audit")]
#[command(about = "Customer roster audit driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "audit.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the roster path from config
    #[arg(long)]
    input: Option<String>,

    /// Override the record limit from config
    #[arg(long)]
    max_records: Option<usize>,

    /// Show what would be audited without reading the roster
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = AuditConfig::from_file(&args.config)
        .with_context(|| format!("Failed to load config file '{}'", args.config))?;

    let verbose = args.verbose || config.verbose();
    if config.json_logs() {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }
    tracing::info!("Loaded configuration from: {}", args.config);

    if let Some(input) = args.input.clone() {
        tracing::info!("Roster path overridden to: {}", input);
        config.input.path = input;
    }
    if let Some(max) = args.max_records {
        tracing::info!("Record limit overridden to: {}", max);
        config.input.max_records = Some(max);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        tracing::error!("Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("Dry run, nothing will be read or written");
        return Ok(());
    }

    let pipeline = RosterPipeline::new(LocalStorage::default(), config);
    let engine = AuditEngine::new(pipeline);

    match engine.run().await {
        Ok(outcome) => {
            let summary = &outcome.summary;
            println!(
                "✅ Audited {} records: {} valid, {} invalid ({} CPF, {} CNPJ)",
                summary.total, summary.valid, summary.invalid, summary.cpf, summary.cnpj
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

fn display_config_summary(config: &AuditConfig, args: &Args) {
    let rules = config.rules();

    println!("📋 Audit: {}", config.audit.name);
    if let Some(description) = &config.audit.description {
        println!("  {}", description);
    }
    println!("  Roster: {}", config.input_path());
    println!("  Delimiter: {:?}", char::from(config.delimiter()));
    if let Some(max) = config.max_records() {
        println!("  Max Records: {}", max);
    }
    println!("  Output: {}", config.output_path());
    println!("  Formats: {}", config.output_formats().join(", "));
    println!("  Full names required: {}", rules.require_full_name);
    println!("  Document type check: {}", rules.check_document_type);
    println!("  E-mail check: {}", rules.check_email);
    println!("  CEP check: {}", rules.check_zip_code);

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}
