pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use config::{storage::LocalStorage, ReduceConfig};
pub use core::{
    etl::EtlEngine,
    pipeline::LanguagePipeline,
    reducer::{reduce, reduce_languages, Reduction, DEFAULT_MAX_ITEMS},
};
pub use domain::model::{LanguageEntry, ReductionResult, Repository};
pub use utils::error::{EtlError, Result};
