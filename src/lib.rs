pub mod config;
pub mod core;
pub mod document;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{local::LocalStorage, toml_config::AuditConfig};
pub use core::{
    engine::{AuditEngine, AuditOutcome},
    pipeline::RosterPipeline,
};
pub use document::{cnpj, cpf, extract_digits, Document, DocumentError, DocumentKind};
pub use utils::error::{AuditError, Result};
