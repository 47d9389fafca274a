#[cfg(feature = "cli")]
pub mod cli;
pub mod storage;
pub mod toml_config;

use crate::core::reducer::DEFAULT_MAX_ITEMS;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT_FILE_NAME: &str = "repositoriesnew.json";

/// 合併命令列、TOML 與預設值後的最終設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReduceConfig {
    pub input_path: String,
    pub output_file_name: String,
    pub max_items: usize,
    pub pretty: bool,
}

impl ReduceConfig {
    pub fn new(input_path: impl Into<String>) -> Self {
        Self {
            input_path: input_path.into(),
            output_file_name: DEFAULT_OUTPUT_FILE_NAME.to_string(),
            max_items: DEFAULT_MAX_ITEMS,
            pretty: false,
        }
    }

    /// 輸入檔所在目錄，沒有目錄部分時為目前目錄
    pub fn input_dir(&self) -> PathBuf {
        match Path::new(&self.input_path).parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

impl ConfigProvider for ReduceConfig {
    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn output_file_name(&self) -> &str {
        &self.output_file_name
    }

    fn max_items(&self) -> usize {
        self.max_items
    }

    fn pretty_output(&self) -> bool {
        self.pretty
    }
}

impl Validate for ReduceConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("in", &self.input_path)?;
        validation::validate_positive_number("max_items", self.max_items, 1)?;
        validation::validate_file_name("output_file_name", &self.output_file_name)?;
        Ok(())
    }
}
