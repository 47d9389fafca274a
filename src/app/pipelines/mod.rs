pub mod language_pipeline;
