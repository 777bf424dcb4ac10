//! Print document build orchestration.
//!
//! - [`PipelineBuilder`]: fluent builder for a [`PrintPipeline`]
//! - [`PrintConfig`]: selectors, resources and sizes, loadable from JSON
//! - [`BuildReport`]: per-step outcomes, logged once per build
//!
//! # Example
//!
//! ```ignore
//! use radar_print::{BuildContext, PipelineBuilder};
//!
//! let pipeline = PipelineBuilder::new()
//!     .with_config_file("print.json")?
//!     .with_resource_provider(provider)
//!     .build()?;
//!
//! let output = pipeline.build(document, &context).await;
//! ```

mod builder;
pub mod config;
mod orchestrator;
pub mod report;

pub use builder::PipelineBuilder;
pub use config::{ContentPageConfig, CoverConfig, FieldBinding, IndexConfig, PrintConfig, SnapshotConfig};
pub use orchestrator::{BuildContext, BuildOutput, PrintPipeline};
pub use report::{BuildReport, StepOutcome};
