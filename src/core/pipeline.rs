use crate::core::{AuditResult, ConfigProvider, CustomerRecord, Pipeline, Storage};
use crate::domain::model::{AuditEntry, AuditSummary};
use crate::domain::rules::audit_record;
use crate::utils::error::{AuditError, Result};
use serde::Serialize;
use std::path::Path;

const CSV_HEADER: [&str; 6] = ["id", "name", "document_type", "document", "valid", "issues"];

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: &'a AuditSummary,
    entries: &'a [AuditEntry],
}

/// Reads a customer roster, checks every record and writes the audit report.
pub struct RosterPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> RosterPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn parse_roster(&self, data: &[u8]) -> Result<Vec<CustomerRecord>> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.config.delimiter())
            .trim(csv::Trim::All)
            .from_reader(data);

        let limit = self.config.max_records().unwrap_or(usize::MAX);
        let mut records = Vec::new();
        for row in reader.deserialize::<CustomerRecord>().take(limit) {
            records.push(row?);
        }
        Ok(records)
    }

    fn render_csv(entries: &[AuditEntry]) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(CSV_HEADER)?;

        for entry in entries {
            let kind = entry.document_kind.map(|k| k.as_str()).unwrap_or("");
            let issues = entry
                .issues
                .iter()
                .map(|i| format!("{}: {}", i.field, i.message))
                .collect::<Vec<_>>()
                .join("; ");

            writer.write_record([
                entry.id.as_str(),
                entry.name.as_str(),
                kind,
                entry.document_display.as_str(),
                if entry.valid { "true" } else { "false" },
                issues.as_str(),
            ])?;
        }

        let bytes = writer.into_inner().map_err(|e| AuditError::ProcessingError {
            message: format!("Failed to flush CSV report: {}", e),
        })?;
        String::from_utf8(bytes).map_err(|e| AuditError::ProcessingError {
            message: format!("CSV report is not UTF-8: {}", e),
        })
    }

    fn filename_for(&self, format: &str) -> Option<&str> {
        match format {
            "csv" => Some(self.config.csv_filename()),
            "json" => Some(self.config.json_filename()),
            _ => None,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for RosterPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<CustomerRecord>> {
        tracing::debug!("Reading roster from: {}", self.config.input_path());
        let data = self.storage.read_file(self.config.input_path()).await?;

        let records = self.parse_roster(&data)?;
        if records.is_empty() {
            tracing::warn!("Roster {} has no records", self.config.input_path());
        }
        Ok(records)
    }

    async fn transform(&self, data: Vec<CustomerRecord>) -> Result<AuditResult> {
        let rules = self.config.rules();
        tracing::debug!("Auditing {} records with {:?}", data.len(), rules);

        let entries: Vec<AuditEntry> = data
            .iter()
            .map(|record| {
                let entry = audit_record(record, &rules);
                if !entry.valid {
                    tracing::debug!(
                        id = %entry.id,
                        issues = entry.issues.len(),
                        "Record failed audit"
                    );
                }
                entry
            })
            .collect();

        let summary = AuditSummary::from_entries(&entries);
        let csv_output = Self::render_csv(&entries)?;
        let json_output = serde_json::to_string_pretty(&JsonReport {
            summary: &summary,
            entries: &entries,
        })?;

        Ok(AuditResult {
            entries,
            summary,
            csv_output,
            json_output,
        })
    }

    async fn load(&self, result: AuditResult) -> Result<Vec<String>> {
        let mut written = Vec::new();

        for format in self.config.output_formats() {
            let filename = self.filename_for(format).ok_or_else(|| {
                AuditError::InvalidConfigValueError {
                    field: "output.formats".to_string(),
                    value: format.clone(),
                    reason: "Unsupported format".to_string(),
                }
            })?;
            let body = match format.as_str() {
                "csv" => &result.csv_output,
                _ => &result.json_output,
            };

            let path = Path::new(self.config.output_path())
                .join(filename)
                .to_string_lossy()
                .into_owned();
            tracing::debug!("Writing {} report ({} bytes) to {}", format, body.len(), path);
            self.storage.write_file(&path, body.as_bytes()).await?;
            written.push(path);
        }

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::RuleSet;
    use crate::document::{DocumentKind, PersonType};
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn with_file(path: &str, data: &str) -> Self {
            let mut files = HashMap::new();
            files.insert(path.to_string(), data.as_bytes().to_vec());
            Self {
                files: Arc::new(Mutex::new(files)),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                AuditError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        delimiter: u8,
        max_records: Option<usize>,
        formats: Vec<String>,
    }

    impl MockConfig {
        fn new() -> Self {
            Self {
                delimiter: b',',
                max_records: None,
                formats: vec!["csv".to_string(), "json".to_string()],
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn input_path(&self) -> &str {
            "customers.csv"
        }

        fn delimiter(&self) -> u8 {
            self.delimiter
        }

        fn max_records(&self) -> Option<usize> {
            self.max_records
        }

        fn rules(&self) -> RuleSet {
            RuleSet::default()
        }

        fn output_path(&self) -> &str {
            "out"
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

    const ROSTER: &str = "\
id,name,person_type,document_type,document_number,email,phone,state,zip_code
1,João Silva,fisica,CPF,111.444.777-35,joao.silva@email.com,(11) 98765-4321,SP,01234-567
2,Maria Oliveira,fisica,CPF,123.456.789-00,maria.oliveira@email.com,(11) 91234-5678,SP,01310-100
3,Imobiliária Central LTDA,juridica,CNPJ,11222333000181,contato@imobiliariacentral.com,(11) 3456-7890,SP,01504-001
";

    #[tokio::test]
    async fn test_extract_reads_records() {
        let storage = MockStorage::with_file("customers.csv", ROSTER);
        let pipeline = RosterPipeline::new(storage, MockConfig::new());

        let records = pipeline.extract().await.unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[2].document_type, Some(DocumentKind::Cnpj));
        assert_eq!(records[0].zip_code.as_deref(), Some("01234-567"));
    }

    #[tokio::test]
    async fn test_extract_honors_max_records() {
        let storage = MockStorage::with_file("customers.csv", ROSTER);
        let mut config = MockConfig::new();
        config.max_records = Some(2);
        let pipeline = RosterPipeline::new(storage, config);

        assert_eq!(pipeline.extract().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_extract_with_semicolon_delimiter() {
        let roster = "id;name;document_number;email;phone\n\
                      7;Ana Beatriz Santos;52998224725;ana.santos@email.com;(11) 97654-3210\n";
        let storage = MockStorage::with_file("customers.csv", roster);
        let mut config = MockConfig::new();
        config.delimiter = b';';
        let pipeline = RosterPipeline::new(storage, config);

        let records = pipeline.extract().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].document_number, "52998224725");
        assert_eq!(records[0].state, None);
    }

    #[tokio::test]
    async fn test_extract_trims_padded_cells() {
        let roster = "id, name, person_type, document_type, document_number\n\
                      1,João Silva, fisica , CPF,11144477735\n";
        let storage = MockStorage::with_file("customers.csv", roster);
        let pipeline = RosterPipeline::new(storage, MockConfig::new());

        let records = pipeline.extract().await.unwrap();
        assert_eq!(records[0].person_type, Some(PersonType::Fisica));
        assert_eq!(records[0].document_type, Some(DocumentKind::Cpf));
        assert_eq!(records[0].document_number, "11144477735");
    }

    #[tokio::test]
    async fn test_extract_missing_file() {
        let storage = MockStorage::with_file("other.csv", ROSTER);
        let pipeline = RosterPipeline::new(storage, MockConfig::new());

        let err = pipeline.extract().await.unwrap_err();
        assert!(matches!(err, AuditError::IoError(_)));
    }

    #[tokio::test]
    async fn test_transform_builds_summary_and_reports() {
        let storage = MockStorage::with_file("customers.csv", ROSTER);
        let pipeline = RosterPipeline::new(storage, MockConfig::new());

        let records = pipeline.extract().await.unwrap();
        let result = pipeline.transform(records).await.unwrap();

        assert_eq!(result.summary.total, 3);
        assert_eq!(result.summary.valid, 2);
        assert_eq!(result.summary.invalid, 1);
        assert_eq!(result.summary.cpf, 2);
        assert_eq!(result.summary.cnpj, 1);

        assert!(!result.entries[1].valid);
        assert_eq!(result.entries[1].document_display, "123.456.789-00");

        let mut lines = result.csv_output.lines();
        assert_eq!(
            lines.next(),
            Some("id,name,document_type,document,valid,issues")
        );
        assert_eq!(
            lines.next(),
            Some("1,João Silva,CPF,111.444.777-35,true,")
        );
        assert!(result.csv_output.contains("document_number: Documento inválido"));

        let json: serde_json::Value = serde_json::from_str(&result.json_output).unwrap();
        assert_eq!(json["summary"]["total"], 3);
        assert_eq!(json["entries"][2]["document_display"], "11.222.333/0001-81");
        assert_eq!(json["entries"][2]["document_kind"], "CNPJ");
    }

    #[tokio::test]
    async fn test_load_writes_configured_formats() {
        let storage = MockStorage::with_file("customers.csv", ROSTER);
        let mut config = MockConfig::new();
        config.formats = vec!["json".to_string()];
        let pipeline = RosterPipeline::new(storage.clone(), config);

        let records = pipeline.extract().await.unwrap();
        let result = pipeline.transform(records).await.unwrap();
        let written = pipeline.load(result).await.unwrap();

        let expected = Path::new("out").join("audit.json").to_string_lossy().into_owned();
        assert_eq!(written, vec![expected.clone()]);
        assert!(storage.get_file(&expected).await.is_some());

        let csv_path = Path::new("out").join("audit.csv").to_string_lossy().into_owned();
        assert!(storage.get_file(&csv_path).await.is_none());
    }
}
