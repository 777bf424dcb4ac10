//! Supplementary content pages fed from tabular resources.
//!
//! A page is populated in two steps: [`load_records`] fetches and decodes
//! the resource, [`bind_content`] rewrites the page region from the records.
//! When loading fails the region is never touched, so whatever default
//! content the template ships with stays in place.

use crate::pipeline::config::{ContentPageConfig, FieldBinding};
use crate::pipeline::report::StepOutcome;
use radar_print_dom::{Document, SelectorError};
use radar_print_idf::ContentBlock;
use radar_print_source::{DecodeError, RecordSet};
use radar_print_traits::{ResourceError, ResourceProvider};
use std::cell::RefCell;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error(transparent)]
    Resource(#[from] ResourceError),

    #[error("Failed to decode '{resource}': {source}")]
    Decode {
        resource: String,
        #[source]
        source: DecodeError,
    },
}

/// Fetches `resource` and decodes it into records.
pub async fn load_records(
    provider: &dyn ResourceProvider,
    resource: &str,
) -> Result<RecordSet, ContentError> {
    let bytes = provider.load(resource).await?;
    RecordSet::from_csv(&bytes).map_err(|source| ContentError::Decode {
        resource: resource.to_string(),
        source,
    })
}

/// Maps records to heading/body pairs. Records missing a bound column produce
/// no block and do not advance the numbering.
pub fn records_to_blocks(records: &RecordSet, binding: &FieldBinding) -> Vec<ContentBlock> {
    records
        .iter()
        .filter_map(|record| {
            let title = record.get(&binding.title_field)?;
            let body = record.get(&binding.body_field)?;
            Some((title, body))
        })
        .enumerate()
        .map(|(index, (title, body))| ContentBlock {
            heading: if binding.enumerate {
                format!("{}. {}", index + 1, title)
            } else {
                title.to_string()
            },
            body: body.to_string(),
        })
        .collect()
}

/// Clears the page region and writes one block per record.
pub fn bind_content(doc: &mut Document, page: &ContentPageConfig, records: &RecordSet) -> StepOutcome {
    let write = |doc: &mut Document| -> Result<StepOutcome, SelectorError> {
        let Some(region) = doc.select_first(doc.root(), &page.region_selector)? else {
            return Ok(StepOutcome::skipped(format!(
                "region '{}' not found",
                page.region_selector
            )));
        };

        let blocks = records_to_blocks(records, &page.binding);
        if blocks.len() < records.len() {
            log::debug!(
                "{}: {} of {} records lack '{}' or '{}'",
                page.name,
                records.len() - blocks.len(),
                records.len(),
                page.binding.title_field,
                page.binding.body_field
            );
        }

        doc.clear_children(region);
        for block in &blocks {
            let item = doc.append_element(region, "div");
            doc.set_attr(item, "class", page.block_class.as_str());

            let heading = doc.append_element(item, "h3");
            doc.set_attr(heading, "class", page.title_class.as_str());
            doc.set_text(heading, block.heading.as_str());

            let body = doc.append_element(item, "p");
            doc.set_attr(body, "class", page.body_class.as_str());
            doc.set_text(body, block.body.as_str());
        }
        log::debug!("{}: wrote {} blocks", page.name, blocks.len());
        Ok(StepOutcome::Ok)
    };
    write(doc).unwrap_or_else(|e| StepOutcome::failed(e.to_string()))
}

/// Loads a page's resource and binds it into the shared document.
///
/// The document is only borrowed after the fetch resolves, so several pages
/// can be in flight on the same task. Binding is synchronous: dropping the
/// future leaves the page either fully written or untouched.
pub async fn populate_page(
    provider: &dyn ResourceProvider,
    page: &ContentPageConfig,
    doc: &RefCell<&mut Document>,
) -> StepOutcome {
    match load_records(provider, &page.resource).await {
        Ok(records) => bind_content(&mut doc.borrow_mut(), page, &records),
        Err(e) => StepOutcome::failed(e.to_string()),
    }
}
