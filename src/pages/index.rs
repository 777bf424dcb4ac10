//! Index page: the radar snapshot plus a navigable outline of every blip.
//!
//! The outline is read from the quadrant tables the radar renders next to
//! the plot, reduced to an [`IndexOutline`], and then written into the index
//! region. Missing pieces only drop the smallest enclosing unit: a table
//! without a name drops its quadrant, a ring without entries drops the ring,
//! a blip without a name drops the blip.

use crate::pages::snapshot::normalize_snapshot;
use crate::pipeline::config::{IndexConfig, PrintConfig};
use crate::pipeline::report::{BuildReport, StepOutcome};
use radar_print_dom::{Document, NodeId, SelectorError};
use radar_print_idf::{IndexOutline, OutlineEntry, QuadrantOutline, QuadrantPosition, RingOutline};
use regex::Regex;
use std::sync::LazyLock;

static RANK_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s+").expect("BUG: invalid rank prefix regex literal"));

/// Drops a leading `"<digits>. "` rank from a blip name.
pub fn strip_rank_prefix(name: &str) -> &str {
    match RANK_PREFIX.find(name) {
        Some(prefix) => &name[prefix.end()..],
        None => name,
    }
}

fn quadrant_table(
    doc: &Document,
    config: &IndexConfig,
    position: QuadrantPosition,
) -> Result<Option<NodeId>, SelectorError> {
    doc.select_first(
        doc.root(),
        &format!(".{}.{}", config.quadrant_table_class, position.as_str()),
    )
}

fn extract_ring(
    doc: &Document,
    config: &IndexConfig,
    ring_name: NodeId,
) -> Result<Option<RingOutline>, SelectorError> {
    let Some(list) = doc
        .next_element_sibling(ring_name)
        .filter(|list| doc.has_class(*list, &config.blip_list_class))
    else {
        return Ok(None);
    };
    let items = doc.select(list, &config.blip_item_selector)?;
    if items.is_empty() {
        return Ok(None);
    }

    let mut entries = Vec::with_capacity(items.len());
    for item in items {
        let name = match doc.select_first(item, &config.blip_name_selector)? {
            Some(node) => doc.text_content(node),
            None => String::new(),
        };
        let name = name.trim();
        let Some(id) = doc.attr(item, &config.blip_id_attribute) else {
            continue;
        };
        if name.is_empty() {
            continue;
        }
        entries.push(OutlineEntry {
            text: strip_rank_prefix(name).to_string(),
            href: format!("{}{}", config.anchor_prefix, id),
        });
    }

    Ok(Some(RingOutline {
        name: doc.text_content(ring_name).trim().to_string(),
        entries,
    }))
}

/// Reads the quadrant tables into an outline, in canonical quadrant order.
pub fn extract_outline(doc: &Document, config: &IndexConfig) -> Result<IndexOutline, SelectorError> {
    let name_selector = format!(".{}", config.quadrant_name_class);
    let mut outline = IndexOutline::default();

    for position in QuadrantPosition::ALL {
        let Some(table) = quadrant_table(doc, config, position)? else {
            log::debug!("No quadrant table for '{}'", position);
            continue;
        };
        let name = match doc.select_first(table, &name_selector)? {
            Some(node) => doc.text_content(node).trim().to_string(),
            None => String::new(),
        };
        if name.is_empty() {
            log::debug!("Quadrant table '{}' has no name", position);
            continue;
        }

        let mut rings = Vec::new();
        for ring_name in doc.select(table, &config.ring_name_selector)? {
            if let Some(ring) = extract_ring(doc, config, ring_name)? {
                rings.push(ring);
            }
        }
        outline.quadrants.push(QuadrantOutline { position, name, rings });
    }
    Ok(outline)
}

fn append_with_class(doc: &mut Document, parent: NodeId, tag: &str, class: &str) -> NodeId {
    let node = doc.append_element(parent, tag);
    doc.set_attr(node, "class", class);
    node
}

/// Clears `region` and writes the outline into it.
pub fn render_outline(doc: &mut Document, region: NodeId, outline: &IndexOutline) {
    doc.clear_children(region);
    for quadrant in &outline.quadrants {
        let block = append_with_class(
            doc,
            region,
            "div",
            &format!("pdf-index-quadrant {}", quadrant.position.index_class()),
        );
        let heading = append_with_class(doc, block, "h2", "pdf-index-quadrant__name");
        doc.set_text(heading, quadrant.name.as_str());

        for ring in &quadrant.rings {
            let ring_block = append_with_class(doc, block, "div", "pdf-index-ring");
            let ring_heading = append_with_class(doc, ring_block, "h3", "pdf-index-ring__name");
            doc.set_text(ring_heading, ring.name.as_str());

            let list = append_with_class(doc, ring_block, "ol", "pdf-index-ring__blips");
            for entry in &ring.entries {
                let item = append_with_class(doc, list, "li", "pdf-index-ring__blip");
                let link = doc.append_element(item, "a");
                doc.set_attr(link, "href", entry.href.as_str());
                doc.set_text(link, entry.text.as_str());
            }
        }
    }
}

/// Normalizes the snapshot, then builds and writes the outline.
///
/// Returns the outline that was written, empty when the step did not run.
pub fn build_index(doc: &mut Document, config: &PrintConfig) -> (IndexOutline, BuildReport) {
    let mut report = BuildReport::new();
    report.record("snapshot", normalize_snapshot(doc, &config.snapshot));

    let index = &config.index;
    let run = |doc: &mut Document| -> Result<(IndexOutline, StepOutcome), SelectorError> {
        let Some(region) = doc.select_first(doc.root(), &index.outline_selector)? else {
            return Ok((
                IndexOutline::default(),
                StepOutcome::skipped(format!("outline region '{}' not found", index.outline_selector)),
            ));
        };
        let outline = extract_outline(doc, index)?;
        render_outline(doc, region, &outline);
        log::debug!(
            "Index lists {} blips across {} quadrants",
            outline.entry_count(),
            outline.quadrants.len()
        );
        Ok((outline, StepOutcome::Ok))
    };

    let (outline, outcome) =
        run(doc).unwrap_or_else(|e| (IndexOutline::default(), StepOutcome::failed(e.to_string())));
    report.record("index", outcome);
    (outline, report)
}

/// Writes `name` as the first child of the quadrant table at `position`,
/// replacing a name element that is already there.
pub fn label_quadrant_table(
    doc: &mut Document,
    config: &IndexConfig,
    position: QuadrantPosition,
    name: &str,
) -> StepOutcome {
    let run = |doc: &mut Document| -> Result<StepOutcome, SelectorError> {
        let Some(table) = quadrant_table(doc, config, position)? else {
            return Ok(StepOutcome::skipped(format!("no quadrant table for '{}'", position)));
        };
        let existing = doc
            .element_children(table)
            .next()
            .filter(|first| doc.has_class(*first, &config.quadrant_name_class));
        let label = match existing {
            Some(label) => label,
            None => {
                let label = doc.create_element("div");
                doc.set_attr(label, "class", config.quadrant_name_class.as_str());
                doc.insert_first_child(table, label);
                label
            }
        };
        doc.set_text(label, name);
        Ok(StepOutcome::Ok)
    };
    run(doc).unwrap_or_else(|e| StepOutcome::failed(e.to_string()))
}
