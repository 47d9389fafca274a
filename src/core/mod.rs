pub mod etl;
pub mod pipeline;
pub mod reducer;

pub use crate::domain::model::{LanguageEntry, ReductionResult, Repository};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
