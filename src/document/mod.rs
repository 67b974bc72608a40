//! Brazilian tax identifiers: CPF (natural persons) and CNPJ (legal entities).
//!
//! The free functions in [`cpf`] and [`cnpj`] never fail: validators answer `false` and
//! formatters hand back their input when it cannot be formatted. [`Document`] is the typed
//! entry point for callers that want to keep only identifiers known to be valid.

pub mod cep;
pub mod cnpj;
pub mod cpf;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Keeps only the ASCII decimal digits of `raw`, in order.
pub fn extract_digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Mod-11 check digit shared by CPF and CNPJ: remainders 0 and 1 map to 0.
pub(crate) fn check_digit<I>(digits: &[u8], weights: I) -> u8
where
    I: IntoIterator<Item = u32>,
{
    let sum: u32 = digits
        .iter()
        .zip(weights)
        .map(|(&d, w)| u32::from(d) * w)
        .sum();

    match sum % 11 {
        0 | 1 => 0,
        remainder => (11 - remainder) as u8,
    }
}

/// Cleans `input` into numeric digit values when it has exactly `len` digits.
pub(crate) fn digit_values(input: &str, len: usize) -> Option<Vec<u8>> {
    let digits: Vec<u8> = input
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect();

    (digits.len() == len).then_some(digits)
}

pub(crate) fn all_same(digits: &[u8]) -> bool {
    digits.windows(2).all(|pair| pair[0] == pair[1])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentKind {
    #[serde(rename = "CPF", alias = "cpf")]
    Cpf,
    #[serde(rename = "CNPJ", alias = "cnpj")]
    Cnpj,
}

impl DocumentKind {
    pub const fn digit_len(self) -> usize {
        match self {
            DocumentKind::Cpf => cpf::LEN,
            DocumentKind::Cnpj => cnpj::LEN,
        }
    }

    /// Kind implied by the number of digits in `raw`, if any.
    pub fn detect(raw: &str) -> Option<Self> {
        match extract_digits(raw).len() {
            cpf::LEN => Some(DocumentKind::Cpf),
            cnpj::LEN => Some(DocumentKind::Cnpj),
            _ => None,
        }
    }

    pub fn validate(self, raw: &str) -> bool {
        match self {
            DocumentKind::Cpf => cpf::validate(raw),
            DocumentKind::Cnpj => cnpj::validate(raw),
        }
    }

    pub fn format(self, raw: &str) -> String {
        match self {
            DocumentKind::Cpf => cpf::format(raw),
            DocumentKind::Cnpj => cnpj::format(raw),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DocumentKind::Cpf => "CPF",
            DocumentKind::Cnpj => "CNPJ",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DocumentKind {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CPF" => Ok(DocumentKind::Cpf),
            "CNPJ" => Ok(DocumentKind::Cnpj),
            other => Err(DocumentError::UnknownKind(other.to_string())),
        }
    }
}

/// Legal nature of a registered person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonType {
    #[serde(alias = "Física", alias = "física")]
    Fisica,
    #[serde(alias = "Jurídica", alias = "jurídica")]
    Juridica,
}

impl PersonType {
    pub const fn expected_document(self) -> DocumentKind {
        match self {
            PersonType::Fisica => DocumentKind::Cpf,
            PersonType::Juridica => DocumentKind::Cnpj,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("document number is empty")]
    Empty,

    #[error("document number has {len} digits, expected 11 (CPF) or 14 (CNPJ)")]
    InvalidLength { len: usize },

    #[error("document number repeats a single digit")]
    RepeatedDigits,

    #[error("{kind} check digits do not match")]
    CheckDigitMismatch { kind: DocumentKind },

    #[error("expected a {expected}, found a {found}")]
    KindMismatch {
        expected: DocumentKind,
        found: DocumentKind,
    },

    #[error("unknown document type: {0}")]
    UnknownKind(String),
}

impl DocumentError {
    /// Message shown next to the document field of the registration form.
    pub fn field_message(&self) -> &'static str {
        match self {
            DocumentError::Empty => "Documento é obrigatório",
            DocumentError::InvalidLength { .. } => {
                "Documento deve ter 11 (CPF) ou 14 (CNPJ) números"
            }
            DocumentError::RepeatedDigits | DocumentError::CheckDigitMismatch { .. } => {
                "Documento inválido"
            }
            DocumentError::KindMismatch { .. } => "Tipo de documento não corresponde ao número",
            DocumentError::UnknownKind(_) => "Tipo de documento inválido",
        }
    }
}

/// A CPF or CNPJ whose check digits have been verified.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Document {
    kind: DocumentKind,
    digits: String,
}

impl Document {
    pub fn parse(raw: &str) -> Result<Self, DocumentError> {
        if raw.is_empty() {
            return Err(DocumentError::Empty);
        }

        let digits = extract_digits(raw);
        let kind = DocumentKind::detect(&digits).ok_or(DocumentError::InvalidLength {
            len: digits.len(),
        })?;

        if all_same(digits.as_bytes()) {
            return Err(DocumentError::RepeatedDigits);
        }
        if !kind.validate(&digits) {
            return Err(DocumentError::CheckDigitMismatch { kind });
        }

        Ok(Self { kind, digits })
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// Bare digits, without punctuation.
    pub fn digits(&self) -> &str {
        &self.digits
    }

    pub fn formatted(&self) -> String {
        self.kind.format(&self.digits)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

impl std::str::FromStr for Document {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Document {
    type Error = DocumentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Document> for String {
    fn from(value: Document) -> Self {
        value.formatted()
    }
}
