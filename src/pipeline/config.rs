//! Build configuration.
//!
//! Every selector the builders use to find their input and their output
//! region lives here, with defaults matching the radar page markup. A JSON
//! file can override any subset of fields:
//!
//! ```json
//! { "productTitle": "Tech Radar", "snapshot": { "maxWidth": 640 } }
//! ```

use crate::error::PipelineError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration for a print build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PrintConfig {
    /// Fixed title written on the cover.
    pub product_title: String,
    pub cover: CoverConfig,
    pub snapshot: SnapshotConfig,
    pub index: IndexConfig,
    /// Supplementary pages filled from tabular resources, processed concurrently.
    pub content_pages: Vec<ContentPageConfig>,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            product_title: "Technology Radar".to_string(),
            cover: CoverConfig::default(),
            snapshot: SnapshotConfig::default(),
            index: IndexConfig::default(),
            content_pages: vec![ContentPageConfig::themes(), ContentPageConfig::about()],
        }
    }
}

impl PrintConfig {
    pub fn from_json(json: &str) -> Result<Self, PipelineError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            PipelineError::Config(format!("Failed to read config from '{}': {}", path.display(), e))
        })?;
        Self::from_json(&source)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CoverConfig {
    pub page_selector: String,
    pub title_selector: String,
    pub subtitle_selector: String,
    pub date_selector: String,
    /// Every match receives the date, one per page footer.
    pub footer_date_selector: String,
    pub self_link_selector: String,
}

impl Default for CoverConfig {
    fn default() -> Self {
        Self {
            page_selector: "main #pdf-cover-page".to_string(),
            title_selector: "main #pdf-cover-page .pdf-title".to_string(),
            subtitle_selector: "main #pdf-cover-page .pdf-subtitle".to_string(),
            date_selector: "main #pdf-cover-page .pdf-date".to_string(),
            footer_date_selector: ".pdf-page-footer .footer-date".to_string(),
            self_link_selector: "#generated-radar-link".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SnapshotConfig {
    /// The live, interactive radar.
    pub source_selector: String,
    /// Where the print copy goes.
    pub container_selector: String,
    pub quadrant_group_selector: String,
    pub blip_selector: String,
    /// Class tagging the copy as the print variant.
    pub print_class: String,
    /// Upper bound on the rendered width, in CSS pixels.
    pub max_width: f64,
    pub default_width: f64,
    pub default_height: f64,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            source_selector: "#radar-plot".to_string(),
            container_selector: "#pdf-radar-snapshot".to_string(),
            quadrant_group_selector: ".quadrant-group".to_string(),
            blip_selector: ".blip-link".to_string(),
            print_class: "radar-plot--print".to_string(),
            max_width: 700.0,
            default_width: 800.0,
            default_height: 800.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IndexConfig {
    pub outline_selector: String,
    /// Class shared by all quadrant tables; the position key is the second class.
    pub quadrant_table_class: String,
    pub quadrant_name_class: String,
    pub ring_name_selector: String,
    /// Class the list right after a ring name must carry.
    pub blip_list_class: String,
    pub blip_item_selector: String,
    pub blip_id_attribute: String,
    pub blip_name_selector: String,
    /// Prefix joined with a blip id to address its description.
    pub anchor_prefix: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            outline_selector: "#pdf-index-page .pdf-index-outline".to_string(),
            quadrant_table_class: "quadrant-table".to_string(),
            quadrant_name_class: "quadrant-table__name".to_string(),
            ring_name_selector: ".quadrant-table__ring-name".to_string(),
            blip_list_class: "blip-list".to_string(),
            blip_item_selector: ".blip-list__item".to_string(),
            blip_id_attribute: "data-blip-id".to_string(),
            blip_name_selector: ".blip-list__item-container__name-value".to_string(),
            anchor_prefix: "#blip-description-".to_string(),
        }
    }
}

/// Which record columns feed a content block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldBinding {
    pub title_field: String,
    pub body_field: String,
    /// Prefix headings with their 1-based position (`"1. "`).
    #[serde(default)]
    pub enumerate: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPageConfig {
    /// Step name used in the build report.
    pub name: String,
    /// Resource path handed to the `ResourceProvider`.
    pub resource: String,
    pub region_selector: String,
    pub binding: FieldBinding,
    pub block_class: String,
    pub title_class: String,
    pub body_class: String,
}

impl ContentPageConfig {
    pub fn themes() -> Self {
        Self {
            name: "themes".to_string(),
            resource: "files/themes.csv".to_string(),
            region_selector: "#pdf-themes-page .pdf-themes-content".to_string(),
            binding: FieldBinding {
                title_field: "title".to_string(),
                body_field: "description".to_string(),
                enumerate: true,
            },
            block_class: "pdf-theme-item".to_string(),
            title_class: "pdf-theme-title".to_string(),
            body_class: "pdf-theme-description".to_string(),
        }
    }

    pub fn about() -> Self {
        Self {
            name: "about".to_string(),
            resource: "files/about.csv".to_string(),
            region_selector: "#pdf-about-page .pdf-about-content".to_string(),
            binding: FieldBinding {
                title_field: "section".to_string(),
                body_field: "content".to_string(),
                enumerate: false,
            },
            block_class: "pdf-about-section".to_string(),
            title_class: "pdf-about-section-title".to_string(),
            body_class: "pdf-about-section-content".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_describe_both_content_pages() {
        let config = PrintConfig::default();
        assert_eq!(config.product_title, "Technology Radar");
        let names: Vec<_> = config.content_pages.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["themes", "about"]);
        assert!(config.content_pages[0].binding.enumerate);
        assert!(!config.content_pages[1].binding.enumerate);
    }

    #[test]
    fn test_partial_json_overrides_keep_defaults() {
        let config = PrintConfig::from_json(
            r#"{ "productTitle": "Tech Radar", "snapshot": { "maxWidth": 640 } }"#,
        )
        .unwrap();
        assert_eq!(config.product_title, "Tech Radar");
        assert_eq!(config.snapshot.max_width, 640.0);
        assert_eq!(config.snapshot.source_selector, "#radar-plot");
        assert_eq!(config.index.anchor_prefix, "#blip-description-");
        assert_eq!(config.content_pages.len(), 2);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(matches!(
            PrintConfig::from_json("{ not json"),
            Err(PipelineError::Json(_))
        ));
    }

    #[test]
    fn test_missing_config_file() {
        let result = PrintConfig::from_file("/nonexistent/radar-print.json");
        assert!(matches!(result, Err(PipelineError::Config(_))));
    }
}
