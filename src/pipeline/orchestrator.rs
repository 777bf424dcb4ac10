// src/pipeline/orchestrator.rs
use super::config::PrintConfig;
use super::report::{BuildReport, StepOutcome};
use crate::pages::content::populate_page;
use crate::pages::cover;
use crate::pages::index;
use chrono::NaiveDate;
use futures::future::join_all;
use radar_print_dom::Document;
use radar_print_idf::{IndexOutline, QuadrantPosition};
use radar_print_traits::ResourceProvider;
use std::cell::RefCell;
use std::sync::Arc;
use std::time::Instant;

/// Values a build takes from its surroundings rather than from the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    pub subtitle: Option<String>,
    pub today: NaiveDate,
    /// Address of the radar the document was generated from.
    pub location: String,
}

/// Everything a full build produces.
#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub document: Document,
    pub outline: IndexOutline,
    pub report: BuildReport,
}

/// Turns a rendered radar page into its print document.
///
/// Every entry point degrades instead of failing: each step reports an
/// outcome and leaves the regions it could not build untouched.
pub struct PrintPipeline {
    config: Arc<PrintConfig>,
    provider: Arc<dyn ResourceProvider>,
}

impl PrintPipeline {
    pub fn new(config: PrintConfig, provider: Arc<dyn ResourceProvider>) -> Self {
        Self {
            config: Arc::new(config),
            provider,
        }
    }

    pub fn config(&self) -> &PrintConfig {
        &self.config
    }

    pub fn compose_cover(&self, doc: &mut Document, subtitle: Option<&str>, today: &NaiveDate) -> StepOutcome {
        cover::compose_cover(doc, &self.config.cover, &self.config.product_title, subtitle, today)
    }

    pub fn add_self_link(&self, doc: &mut Document, location: &str) -> StepOutcome {
        cover::add_self_link(doc, &self.config.cover, location)
    }

    /// Builds the snapshot and then the index outline.
    pub fn build_index(&self, doc: &mut Document) -> (IndexOutline, BuildReport) {
        index::build_index(doc, &self.config)
    }

    pub fn label_quadrant_table(&self, doc: &mut Document, position: QuadrantPosition, name: &str) -> StepOutcome {
        index::label_quadrant_table(doc, &self.config.index, position, name)
    }

    /// Populates every configured content page and logs the outcomes.
    ///
    /// All pages are fetched concurrently on the current task; the future
    /// resolves once every page has either been written or given up on.
    /// The document stays with the caller throughout, so dropping the future
    /// early keeps every page written so far.
    pub async fn initialize_content(&self, doc: &mut Document) -> BuildReport {
        let report = self.populate_content(doc).await;
        report.log();
        report
    }

    async fn populate_content(&self, doc: &mut Document) -> BuildReport {
        let shared = RefCell::new(doc);
        let outcomes = join_all(
            self.config
                .content_pages
                .iter()
                .map(|page| populate_page(self.provider.as_ref(), page, &shared)),
        )
        .await;

        let mut report = BuildReport::new();
        for (page, outcome) in self.config.content_pages.iter().zip(outcomes) {
            report.record(page.name.as_str(), outcome);
        }
        report
    }

    /// Runs every step against `document` and logs the combined report once.
    /// Detached nodes are dropped from the returned document.
    pub async fn build(&self, mut document: Document, context: &BuildContext) -> BuildOutput {
        let start = Instant::now();
        log::info!(
            "Building print document from {} ({} content pages, provider '{}')",
            context.location,
            self.config.content_pages.len(),
            self.provider.name()
        );

        let mut report = BuildReport::new();
        report.record(
            "cover",
            self.compose_cover(&mut document, context.subtitle.as_deref(), &context.today),
        );
        report.record("self-link", self.add_self_link(&mut document, &context.location));

        let (outline, index_report) = self.build_index(&mut document);
        report.merge(index_report);
        report.merge(self.populate_content(&mut document).await);
        document.compact();

        report.log();
        log::info!(
            "Print document built in {:.2?}: {} blips indexed{}",
            start.elapsed(),
            outline.entry_count(),
            if report.has_failures() { ", some steps failed" } else { "" }
        );

        BuildOutput {
            document,
            outline,
            report,
        }
    }
}
