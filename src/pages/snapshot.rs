//! Static snapshot of the radar for the index page.
//!
//! The live radar shows one quadrant at a time: the others are faded out and
//! the selected one is panned into view, and blips fade on hover. The print
//! copy undoes all of that so the whole radar is visible at once. It carries
//! no ids, so lookups by id keep finding the live radar.

use crate::pipeline::config::SnapshotConfig;
use crate::pipeline::report::StepOutcome;
use radar_print_dom::{Document, NodeId, Selector, SelectorError};

/// Width and height of the radar in user units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntrinsicSize {
    pub width: f64,
    pub height: f64,
}

fn parse_length(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    let number = trimmed.strip_suffix("px").unwrap_or(trimmed).trim();
    number.parse::<f64>().ok().filter(|v| v.is_finite() && *v > 0.0)
}

fn parse_view_box(value: &str) -> Option<IntrinsicSize> {
    let parts: Vec<f64> = value
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|p| !p.is_empty())
        .map(|p| p.parse::<f64>().ok())
        .collect::<Option<_>>()?;
    match parts.as_slice() {
        [_, _, width, height] if *width > 0.0 && *height > 0.0 => Some(IntrinsicSize {
            width: *width,
            height: *height,
        }),
        _ => None,
    }
}

/// Resolves the radar's size from its `width`/`height` attributes, then its
/// `viewBox`, then the configured default.
pub fn intrinsic_size(doc: &Document, svg: NodeId, config: &SnapshotConfig) -> IntrinsicSize {
    let width = doc.attr(svg, "width").and_then(parse_length);
    let height = doc.attr(svg, "height").and_then(parse_length);
    if let (Some(width), Some(height)) = (width, height) {
        return IntrinsicSize { width, height };
    }
    doc.attr(svg, "viewBox")
        .and_then(parse_view_box)
        .unwrap_or(IntrinsicSize {
            width: config.default_width,
            height: config.default_height,
        })
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Replaces the snapshot container's content with a normalized copy of the
/// live radar. Absent radar or container is a skip, not an error.
pub fn normalize_snapshot(doc: &mut Document, config: &SnapshotConfig) -> StepOutcome {
    let run = |doc: &mut Document| -> Result<StepOutcome, SelectorError> {
        let Some(source) = doc.select_first(doc.root(), &config.source_selector)? else {
            return Ok(StepOutcome::skipped(format!(
                "radar '{}' not found",
                config.source_selector
            )));
        };
        let Some(container) = doc.select_first(doc.root(), &config.container_selector)? else {
            return Ok(StepOutcome::skipped(format!(
                "snapshot container '{}' not found",
                config.container_selector
            )));
        };
        if doc.is_ancestor_or_self(container, source) {
            return Ok(StepOutcome::failed("snapshot container encloses the radar"));
        }
        let groups = Selector::parse(&config.quadrant_group_selector)?;
        let blips = Selector::parse(&config.blip_selector)?;

        let copy = doc.deep_clone(source);
        doc.remove_attr(copy, "id");
        for node in doc.descendants(copy) {
            doc.remove_attr(node, "id");
        }
        doc.add_class(copy, &config.print_class);

        for group in doc.select_with(copy, &groups) {
            doc.set_style(group, "opacity", "1");
            doc.remove_style(group, "transform");
            doc.remove_attr(group, "transform");
        }
        for blip in doc.select_with(copy, &blips) {
            doc.set_style(blip, "opacity", "1");
        }

        let size = intrinsic_size(doc, copy, config);
        if doc.attr(copy, "viewBox").is_none() {
            doc.set_attr(
                copy,
                "viewBox",
                format!("0 0 {} {}", format_number(size.width), format_number(size.height)),
            );
        }
        doc.remove_attr(copy, "width");
        doc.remove_attr(copy, "height");
        doc.set_attr(copy, "preserveAspectRatio", "xMidYMid meet");
        doc.set_style(copy, "width", "100%");
        doc.set_style(copy, "height", "auto");
        doc.set_style(copy, "max-width", &format!("{}px", format_number(config.max_width)));

        doc.clear_children(container);
        doc.append_child(container, copy);
        log::debug!(
            "Snapshot placed at {}x{} (max width {})",
            size.width,
            size.height,
            config.max_width
        );
        Ok(StepOutcome::Ok)
    };
    run(doc).unwrap_or_else(|e| StepOutcome::failed(e.to_string()))
}
