//! Print document builder for a rendered technology radar.
//!
//! Given the radar page as a [`Document`], the pipeline fills in the cover,
//! places a static snapshot of the radar next to an index of every blip, and
//! populates the supplementary pages from tabular resources.

pub mod error;
pub mod pages;
pub mod pipeline;

pub use error::PipelineError;
pub use pipeline::{
    BuildContext, BuildOutput, BuildReport, PipelineBuilder, PrintConfig, PrintPipeline, StepOutcome,
};
pub use radar_print_dom::{Document, NodeId};
pub use radar_print_idf::{IndexOutline, QuadrantPosition};
pub use radar_print_traits::{ResourceError, ResourceProvider};
