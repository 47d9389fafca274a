use crate::core::reducer::{fold_into_other, kept_count};
use crate::core::{ConfigProvider, LanguageEntry, Pipeline, ReductionResult, Repository, Storage};
use crate::domain::model::parse_repositories;
use crate::utils::error::{EtlError, Result};
use std::path::Path;

/// 讀取倉庫列表、縮減每個倉庫的語言清單，並寫到輸入檔旁的新檔案
pub struct LanguagePipeline<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
}

impl<S: Storage, C: ConfigProvider> LanguagePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn input_file_name(&self) -> Result<String> {
        Path::new(self.config.input_path())
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .ok_or_else(|| EtlError::InvalidConfigValueError {
                field: "in".to_string(),
                value: self.config.input_path().to_string(),
                reason: "Input path does not name a file".to_string(),
            })
    }

    /// 與輸入檔同目錄的輸出路徑
    pub fn output_path(&self) -> String {
        Path::new(self.config.input_path())
            .with_file_name(self.config.output_file_name())
            .display()
            .to_string()
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for LanguagePipeline<S, C> {
    async fn extract(&self) -> Result<Vec<Repository>> {
        let file_name = self.input_file_name()?;
        tracing::debug!("Reading repositories from: {}", self.config.input_path());

        let bytes = self
            .storage
            .read_file(&file_name)
            .await
            .map_err(|e| match e {
                EtlError::IoError(io) if io.kind() == std::io::ErrorKind::NotFound => {
                    EtlError::InputNotFoundError {
                        path: self.config.input_path().to_string(),
                    }
                }
                other => other,
            })?;

        tracing::debug!("Read {} bytes", bytes.len());
        parse_repositories(&bytes)
    }

    async fn transform(&self, data: Vec<Repository>) -> Result<ReductionResult> {
        let max_items = self.config.max_items();
        tracing::debug!("Reducing language lists to at most {} entries", max_items);

        let mut result = ReductionResult {
            repositories: Vec::with_capacity(data.len()),
            ..Default::default()
        };

        for (index, mut repository) in data.into_iter().enumerate() {
            let items = repository.language_items(index)?;
            let original_len = items.len();

            // 未截斷時保持原樣，不複製也不檢查項目
            if original_len <= max_items {
                result.repositories.push(repository);
                continue;
            }

            let kept = LanguageEntry::from_items(
                index,
                &items[..kept_count(original_len, max_items)],
            )?;

            let (languages, other) = fold_into_other(kept)?;
            let label = repository.label().unwrap_or("<unnamed>").to_string();
            tracing::debug!(
                "Repository #{} ({}): {} languages -> {}",
                index,
                label,
                original_len,
                languages.len()
            );
            if other < 0.0 {
                tracing::warn!(
                    "⚠️ Repository #{} ({}): kept languages exceed 100%, Other = {}",
                    index,
                    label,
                    other
                );
                result.negative_other_count += 1;
            }
            repository.set_languages(languages);
            result.reduced_count += 1;
            result.repositories.push(repository);
        }

        Ok(result)
    }

    async fn load(&self, result: ReductionResult) -> Result<String> {
        let output_path = self.output_path();

        let json_data = if self.config.pretty_output() {
            serde_json::to_vec_pretty(&result.repositories)?
        } else {
            serde_json::to_vec(&result.repositories)?
        };

        tracing::debug!("Writing {} bytes to storage", json_data.len());
        self.storage
            .write_file(self.config.output_file_name(), &json_data)
            .await?;

        Ok(output_path)
    }
}
