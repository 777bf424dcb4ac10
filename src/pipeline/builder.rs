// src/pipeline/builder.rs
use super::config::PrintConfig;
use super::orchestrator::PrintPipeline;
use crate::error::PipelineError;
use radar_print_traits::ResourceProvider;
use std::path::Path;
use std::sync::Arc;

/// A builder for creating a `PrintPipeline`.
#[derive(Default)]
pub struct PipelineBuilder {
    config: PrintConfig,
    provider: Option<Arc<dyn ResourceProvider>>,
}

impl PipelineBuilder {
    /// Creates a builder with the default radar page configuration.
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_config(mut self, config: PrintConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the configuration with one read from a JSON file.
    pub fn with_config_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, PipelineError> {
        self.config = PrintConfig::from_file(path)?;
        Ok(self)
    }

    /// Sets where content page resources are fetched from.
    pub fn with_resource_provider(mut self, provider: Arc<dyn ResourceProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Consumes the builder and creates the `PrintPipeline`.
    pub fn build(self) -> Result<PrintPipeline, PipelineError> {
        let provider = self.provider.ok_or_else(|| {
            PipelineError::Config(
                "No resource provider has been configured. Use `with_resource_provider`.".to_string(),
            )
        })?;
        log::debug!("Using resource provider '{}'", provider.name());
        Ok(PrintPipeline::new(self.config, provider))
    }
}
