use crate::domain::model::{ReductionResult, Repository};
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
    fn output_file_name(&self) -> &str;
    fn max_items(&self) -> usize;
    fn pretty_output(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Repository>>;
    async fn transform(&self, data: Vec<Repository>) -> Result<ReductionResult>;
    async fn load(&self, result: ReductionResult) -> Result<String>;
}
