pub mod local;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::domain::model::RuleSet;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "brdoc")]
#[command(about = "Audit CPF/CNPJ document numbers in a customer roster")]
pub struct CliConfig {
    #[arg(long, help = "Customer roster CSV file")]
    pub input: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, value_delimiter = ',', default_value = "csv,json")]
    pub formats: Vec<String>,

    #[arg(long, default_value = ",", help = "Roster field delimiter")]
    pub delimiter: char,

    #[arg(long, help = "Stop after this many records")]
    pub max_records: Option<usize>,

    #[arg(long, help = "Accept single-word names")]
    pub allow_short_names: bool,

    #[arg(long, help = "Do not compare declared document type with the number")]
    pub skip_document_type: bool,

    #[arg(long, help = "Do not check e-mail addresses")]
    pub skip_email: bool,

    #[arg(long, help = "Do not check CEP postal codes")]
    pub skip_zip_code: bool,

    #[arg(long, help = "Emit JSON log lines")]
    pub json_logs: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn delimiter(&self) -> u8 {
        // validated before the pipeline is built
        u8::try_from(self.delimiter).unwrap_or(b',')
    }

    fn max_records(&self) -> Option<usize> {
        self.max_records
    }

    fn rules(&self) -> RuleSet {
        RuleSet {
            require_full_name: !self.allow_short_names,
            check_document_type: !self.skip_document_type,
            check_email: !self.skip_email,
            check_zip_code: !self.skip_zip_code,
        }
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.formats
    }

    fn csv_filename(&self) -> &str {
        "audit.csv"
    }

    fn json_filename(&self) -> &str {
        "audit.json"
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input", &self.input)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_output_formats("formats", &self.formats)?;
        validation::validate_delimiter("delimiter", self.delimiter)?;
        if let Some(max) = self.max_records {
            validation::validate_positive_number("max_records", max, 1)?;
        }
        Ok(())
    }
}
