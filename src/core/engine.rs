use crate::core::Pipeline;
use crate::domain::model::AuditSummary;
use crate::utils::error::Result;

#[derive(Debug, Clone)]
pub struct AuditOutcome {
    pub summary: AuditSummary,
    pub written: Vec<String>,
}

pub struct AuditEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> AuditEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<AuditOutcome> {
        tracing::info!("Starting roster audit");

        let records = self.pipeline.extract().await?;
        tracing::info!("Extracted {} records", records.len());

        let result = self.pipeline.transform(records).await?;
        let summary = result.summary.clone();
        tracing::info!(
            "Audited {} records: {} valid, {} invalid ({} CPF, {} CNPJ)",
            summary.total,
            summary.valid,
            summary.invalid,
            summary.cpf,
            summary.cnpj
        );

        let written = self.pipeline.load(result).await?;
        for path in &written {
            tracing::info!("Report saved to: {}", path);
        }

        Ok(AuditOutcome { summary, written })
    }
}
