pub use crate::app::pipelines::language_pipeline::LanguagePipeline;
