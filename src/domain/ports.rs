use crate::domain::model::{AuditResult, CustomerRecord, RuleSet};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn delimiter(&self) -> u8;
    fn max_records(&self) -> Option<usize>;
    fn rules(&self) -> RuleSet;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn csv_filename(&self) -> &str;
    fn json_filename(&self) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<CustomerRecord>>;
    async fn transform(&self, data: Vec<CustomerRecord>) -> Result<AuditResult>;
    async fn load(&self, result: AuditResult) -> Result<Vec<String>>;
}
