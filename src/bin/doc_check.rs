use brdoc::document::DocumentKind;
use brdoc::utils::logger;
use brdoc::domain::rules;
use brdoc::{cnpj, cpf, extract_digits};
use clap::{Parser, ValueEnum};
use serde::Serialize;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    Auto,
    Cpf,
    Cnpj,
}

#[derive(Parser)]
#[command(name = "doc-check")]
#[command(about = "Validate and format CPF/CNPJ numbers")]
struct Args {
    /// Document numbers, with or without punctuation
    #[arg(required = true)]
    values: Vec<String>,

    /// Document kind; `auto` picks it from the digit count
    #[arg(short, long, value_enum, default_value = "auto")]
    kind: KindArg,

    /// Treat values as bases and append their check digits
    #[arg(long)]
    complete: bool,

    /// Print one JSON object per value
    #[arg(long)]
    json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Serialize)]
struct CheckResult {
    input: String,
    kind: Option<DocumentKind>,
    valid: bool,
    formatted: String,
    message: Option<String>,
}

fn check(value: &str, kind: KindArg) -> CheckResult {
    let expected = match kind {
        KindArg::Auto => None,
        KindArg::Cpf => Some(DocumentKind::Cpf),
        KindArg::Cnpj => Some(DocumentKind::Cnpj),
    };
    let kind = expected.or_else(|| DocumentKind::detect(value));
    let outcome = rules::check_document(value, expected);

    CheckResult {
        input: value.to_string(),
        kind,
        valid: outcome.is_ok(),
        formatted: kind.map_or_else(|| value.to_string(), |k| k.format(value)),
        message: outcome.err().map(|e| e.user_friendly_message()),
    }
}

fn complete(value: &str, kind: KindArg) -> Option<String> {
    let digits = extract_digits(value);
    match kind {
        KindArg::Cpf => cpf::complete(&digits),
        KindArg::Cnpj => cnpj::complete(&digits),
        KindArg::Auto => cpf::complete(&digits).or_else(|| cnpj::complete(&digits)),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let mut all_valid = true;
    for value in &args.values {
        let value = if args.complete {
            match complete(value, args.kind) {
                Some(full) => full,
                None => {
                    tracing::warn!("{} is not a 9-digit CPF or 12-digit CNPJ base", value);
                    all_valid = false;
                    continue;
                }
            }
        } else {
            value.clone()
        };

        let result = check(&value, args.kind);
        tracing::debug!(?result, "Checked document");
        all_valid &= result.valid;

        if args.json {
            println!("{}", serde_json::to_string(&result)?);
        } else if result.valid {
            println!("✅ {}", result.formatted);
        } else {
            println!(
                "❌ {} ({})",
                result.formatted,
                result.message.as_deref().unwrap_or("Documento inválido")
            );
        }
    }

    if !all_valid {
        std::process::exit(1);
    }
    Ok(())
}
