//! Field rules applied to customer records, mirroring the registration form.

use crate::document::{cep, Document, DocumentError, DocumentKind};
use crate::domain::model::{AuditEntry, CustomerRecord, Issue, IssueCode, RuleSet};
use crate::utils::error::Result;
use regex::Regex;
use std::sync::LazyLock;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

const MIN_NAME_LEN: usize = 3;

fn document_issue(err: &DocumentError) -> Issue {
    let code = match err {
        DocumentError::Empty => IssueCode::DocumentMissing,
        DocumentError::InvalidLength { .. } => IssueCode::DocumentLength,
        DocumentError::KindMismatch { .. } => IssueCode::DocumentTypeMismatch,
        _ => IssueCode::DocumentInvalid,
    };
    Issue::new("document_number", code, err.field_message())
}

/// Parses `raw` and, when `expected` is set, requires it to be that kind.
pub fn check_document(raw: &str, expected: Option<DocumentKind>) -> Result<Document> {
    let document = Document::parse(raw)?;
    match expected {
        Some(expected) if expected != document.kind() => Err(DocumentError::KindMismatch {
            expected,
            found: document.kind(),
        }
        .into()),
        _ => Ok(document),
    }
}

/// Length counts every character as typed; the full-name check ignores outer spaces.
pub fn check_name(name: &str, rules: &RuleSet, issues: &mut Vec<Issue>) {
    let trimmed = name.trim();
    if name.chars().count() < MIN_NAME_LEN {
        issues.push(Issue::new(
            "name",
            IssueCode::NameTooShort,
            "Nome deve ter pelo menos 3 caracteres",
        ));
    }
    if rules.require_full_name && !trimmed.contains(' ') {
        issues.push(Issue::new(
            "name",
            IssueCode::NameNotFull,
            "Digite nome completo",
        ));
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email.trim())
}

fn check_document_type(
    record: &CustomerRecord,
    detected: DocumentKind,
    issues: &mut Vec<Issue>,
) {
    const MESSAGE: &str = "Tipo de documento não corresponde ao número";

    if record.document_type.is_some_and(|declared| declared != detected) {
        issues.push(Issue::new(
            "document_type",
            IssueCode::DocumentTypeMismatch,
            MESSAGE,
        ));
    }
    if record
        .person_type
        .is_some_and(|person| person.expected_document() != detected)
    {
        issues.push(Issue::new(
            "person_type",
            IssueCode::DocumentTypeMismatch,
            MESSAGE,
        ));
    }
}

/// Every rule violation found on `record`, in field order.
pub fn check_customer(record: &CustomerRecord, rules: &RuleSet) -> Vec<Issue> {
    let mut issues = Vec::new();

    check_name(&record.name, rules, &mut issues);

    if let Err(err) = Document::parse(&record.document_number) {
        issues.push(document_issue(&err));
    }
    if rules.check_document_type {
        if let Some(detected) = DocumentKind::detect(&record.document_number) {
            check_document_type(record, detected, &mut issues);
        }
    }

    if rules.check_email && !is_valid_email(&record.email) {
        issues.push(Issue::new("email", IssueCode::EmailInvalid, "Email inválido"));
    }

    if record.phone.trim().is_empty() {
        issues.push(Issue::new(
            "phone",
            IssueCode::PhoneMissing,
            "Telefone é obrigatório",
        ));
    }

    if let Some(state) = record.state.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        if state.chars().count() != 2 || !state.chars().all(|c| c.is_ascii_alphabetic()) {
            issues.push(Issue::new(
                "state",
                IssueCode::StateInvalid,
                "Estado deve ter 2 letras",
            ));
        }
    }

    if rules.check_zip_code {
        if let Some(zip) = record.zip_code.as_deref().filter(|z| !z.trim().is_empty()) {
            if !cep::is_well_formed(zip) {
                issues.push(Issue::new("zip_code", IssueCode::ZipCodeInvalid, "CEP inválido"));
            }
        }
    }

    issues
}

pub fn audit_record(record: &CustomerRecord, rules: &RuleSet) -> AuditEntry {
    let issues = check_customer(record, rules);
    let document_kind = DocumentKind::detect(&record.document_number);
    let document_display = match document_kind {
        Some(kind) => kind.format(&record.document_number),
        None => record.document_number.clone(),
    };

    AuditEntry {
        id: record.id.clone(),
        name: record.name.trim().to_string(),
        document_kind,
        document_display,
        valid: issues.is_empty(),
        issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::PersonType;
    use crate::utils::error::{AuditError, ErrorSeverity};

    fn record(name: &str, document: &str) -> CustomerRecord {
        CustomerRecord {
            id: "1".to_string(),
            name: name.to_string(),
            document_number: document.to_string(),
            email: "joao.silva@email.com".to_string(),
            phone: "(11) 98765-4321".to_string(),
            state: Some("SP".to_string()),
            zip_code: Some("01234-567".to_string()),
            ..Default::default()
        }
    }

    fn codes(issues: &[Issue]) -> Vec<IssueCode> {
        issues.iter().map(|i| i.code).collect()
    }

    #[test]
    fn test_clean_record_has_no_issues() {
        let mut rec = record("João Silva", "111.444.777-35");
        rec.document_type = Some(DocumentKind::Cpf);
        rec.person_type = Some(PersonType::Fisica);
        assert!(check_customer(&rec, &RuleSet::default()).is_empty());
    }

    #[test]
    fn test_name_rules() {
        let issues = check_customer(&record("Jo", "11144477735"), &RuleSet::default());
        assert_eq!(codes(&issues), vec![IssueCode::NameTooShort, IssueCode::NameNotFull]);

        let relaxed = RuleSet {
            require_full_name: false,
            ..RuleSet::default()
        };
        assert!(check_customer(&record("Joana", "11144477735"), &relaxed).is_empty());
    }

    #[test]
    fn test_padded_short_name_passes_length() {
        let issues = check_customer(&record(" Jo", "11144477735"), &RuleSet::default());
        assert_eq!(codes(&issues), vec![IssueCode::NameNotFull]);
    }

    #[test]
    fn test_check_document() {
        let doc = check_document("111.444.777-35", Some(DocumentKind::Cpf)).unwrap();
        assert_eq!(doc.kind(), DocumentKind::Cpf);
        assert!(check_document("11.222.333/0001-81", None).is_ok());

        let err = check_document("11.222.333/0001-81", Some(DocumentKind::Cpf)).unwrap_err();
        assert!(matches!(
            err,
            AuditError::DocumentError(DocumentError::KindMismatch {
                expected: DocumentKind::Cpf,
                found: DocumentKind::Cnpj
            })
        ));
        assert_eq!(
            err.user_friendly_message(),
            "Tipo de documento não corresponde ao número"
        );
        assert_eq!(err.severity(), ErrorSeverity::Low);

        let err = check_document("123.456.789-00", None).unwrap_err();
        assert_eq!(err.user_friendly_message(), "Documento inválido");
    }

    #[test]
    fn test_document_issues() {
        let rules = RuleSet::default();

        let issues = check_customer(&record("João Silva", ""), &rules);
        assert_eq!(codes(&issues), vec![IssueCode::DocumentMissing]);
        assert_eq!(issues[0].message, "Documento é obrigatório");

        let issues = check_customer(&record("João Silva", "123.456"), &rules);
        assert_eq!(codes(&issues), vec![IssueCode::DocumentLength]);

        let issues = check_customer(&record("João Silva", "123.456.789-00"), &rules);
        assert_eq!(codes(&issues), vec![IssueCode::DocumentInvalid]);
        assert_eq!(issues[0].message, "Documento inválido");
    }

    #[test]
    fn test_document_type_mismatch() {
        let mut rec = record("Imobiliária Central LTDA", "11.222.333/0001-81");
        rec.document_type = Some(DocumentKind::Cpf);
        rec.person_type = Some(PersonType::Fisica);

        let issues = check_customer(&rec, &RuleSet::default());
        assert_eq!(
            codes(&issues),
            vec![IssueCode::DocumentTypeMismatch, IssueCode::DocumentTypeMismatch]
        );
        assert_eq!(issues[0].field, "document_type");
        assert_eq!(issues[1].field, "person_type");

        let relaxed = RuleSet {
            check_document_type: false,
            ..RuleSet::default()
        };
        assert!(check_customer(&rec, &relaxed).is_empty());
    }

    #[test]
    fn test_contact_and_address_rules() {
        let mut rec = record("João Silva", "11144477735");
        rec.email = "joao.silva@".to_string();
        rec.phone = "  ".to_string();
        rec.state = Some("São Paulo".to_string());
        rec.zip_code = Some("0123-45".to_string());

        let issues = check_customer(&rec, &RuleSet::default());
        assert_eq!(
            codes(&issues),
            vec![
                IssueCode::EmailInvalid,
                IssueCode::PhoneMissing,
                IssueCode::StateInvalid,
                IssueCode::ZipCodeInvalid
            ]
        );
    }

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("contato@imobiliariacentral.com"));
        assert!(!is_valid_email("contato@imobiliariacentral"));
        assert!(!is_valid_email("contato imobiliaria@central.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_audit_record_formats_document() {
        let entry = audit_record(&record("João Silva", "11144477735"), &RuleSet::default());
        assert!(entry.valid);
        assert_eq!(entry.document_kind, Some(DocumentKind::Cpf));
        assert_eq!(entry.document_display, "111.444.777-35");

        // invalid but well-sized numbers are still shown in canonical form
        let entry = audit_record(&record("João Silva", "12345678000190"), &RuleSet::default());
        assert!(!entry.valid);
        assert_eq!(entry.document_display, "12.345.678/0001-90");

        let entry = audit_record(&record("João Silva", "12-34"), &RuleSet::default());
        assert_eq!(entry.document_kind, None);
        assert_eq!(entry.document_display, "12-34");
    }
}
