use crate::core::{Pipeline, ReductionResult};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting language reduction...");

        let result = self.extract_and_transform().await?;

        // Load
        tracing::debug!("Loading data...");
        let output_path = self.pipeline.load(result).await?;
        self.monitor.log_stats("Load");
        tracing::info!("Output saved to: {}", output_path);

        self.monitor.log_final_stats();
        Ok(output_path)
    }

    /// 只執行 extract 與 transform，不寫出任何檔案
    pub async fn dry_run(&self) -> Result<ReductionResult> {
        tracing::info!("Starting dry run...");
        let result = self.extract_and_transform().await?;
        self.monitor.log_final_stats();
        Ok(result)
    }

    async fn extract_and_transform(&self) -> Result<ReductionResult> {
        // Extract
        tracing::debug!("Extracting data...");
        let repositories = self.pipeline.extract().await?;
        tracing::info!("Extracted {} repositories", repositories.len());
        self.monitor.log_stats("Extract");

        // Transform
        tracing::debug!("Transforming data...");
        let result = self.pipeline.transform(repositories).await?;
        tracing::info!(
            "Transformed {} repositories ({} reduced)",
            result.total(),
            result.reduced_count
        );
        self.monitor.log_stats("Transform");

        Ok(result)
    }
}
