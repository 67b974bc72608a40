use crate::document::{DocumentKind, PersonType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of a customer roster export.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerRecord {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub person_type: Option<PersonType>,
    #[serde(default)]
    pub document_type: Option<DocumentKind>,
    pub document_number: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    NameTooShort,
    NameNotFull,
    DocumentMissing,
    DocumentLength,
    DocumentInvalid,
    DocumentTypeMismatch,
    EmailInvalid,
    PhoneMissing,
    StateInvalid,
    ZipCodeInvalid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub field: String,
    pub code: IssueCode,
    pub message: String,
}

impl Issue {
    pub fn new(field: &str, code: IssueCode, message: &str) -> Self {
        Self {
            field: field.to_string(),
            code,
            message: message.to_string(),
        }
    }
}

/// Which optional checks run on each record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    pub require_full_name: bool,
    pub check_document_type: bool,
    pub check_email: bool,
    pub check_zip_code: bool,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            require_full_name: true,
            check_document_type: true,
            check_email: true,
            check_zip_code: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: String,
    pub name: String,
    pub document_kind: Option<DocumentKind>,
    /// Canonical form when the kind is known, raw input otherwise.
    pub document_display: String,
    pub valid: bool,
    pub issues: Vec<Issue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditSummary {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    pub cpf: usize,
    pub cnpj: usize,
    pub generated_at: DateTime<Utc>,
}

impl AuditSummary {
    pub fn from_entries(entries: &[AuditEntry]) -> Self {
        let valid = entries.iter().filter(|e| e.valid).count();
        let count_kind = |kind: DocumentKind| {
            entries
                .iter()
                .filter(|e| e.document_kind == Some(kind))
                .count()
        };

        Self {
            total: entries.len(),
            valid,
            invalid: entries.len() - valid,
            cpf: count_kind(DocumentKind::Cpf),
            cnpj: count_kind(DocumentKind::Cnpj),
            generated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuditResult {
    pub entries: Vec<AuditEntry>,
    pub summary: AuditSummary,
    pub csv_output: String,
    pub json_output: String,
}
