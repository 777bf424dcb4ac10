pub mod fixtures;

use async_trait::async_trait;
use radar_print::{Document, ResourceError, ResourceProvider};
use radar_print_traits::SharedResourceData;
use std::sync::Arc;
use std::time::Duration;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Parses a fixture page.
pub fn parse_page(markup: &str) -> Result<Document, Box<dyn std::error::Error>> {
    Ok(Document::parse(markup)?)
}

/// Trimmed text of every node matching `selector`, in document order.
pub fn texts(doc: &Document, selector: &str) -> Vec<String> {
    doc.select(doc.root(), selector)
        .unwrap_or_default()
        .into_iter()
        .map(|node| doc.text_content(node).trim().to_string())
        .collect()
}

/// Attribute values of every node matching `selector`.
pub fn attrs(doc: &Document, selector: &str, name: &str) -> Vec<String> {
    doc.select(doc.root(), selector)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|node| doc.attr(node, name).map(str::to_string))
        .collect()
}

/// Serialized markup of the first node matching `selector`.
pub fn region_markup(doc: &Document, selector: &str) -> Option<String> {
    let node = doc.select_first(doc.root(), selector).ok()??;
    doc.node_to_markup(node).ok()
}

/// Serves each resource after its own delay.
#[derive(Debug)]
pub struct DelayedProvider {
    pub resources: Vec<(String, Duration, Vec<u8>)>,
}

impl DelayedProvider {
    pub fn new() -> Self {
        Self { resources: Vec::new() }
    }

    pub fn with(mut self, path: &str, delay: Duration, data: &str) -> Self {
        self.resources.push((path.to_string(), delay, data.as_bytes().to_vec()));
        self
    }
}

#[async_trait]
impl ResourceProvider for DelayedProvider {
    async fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError> {
        let Some((_, delay, data)) = self.resources.iter().find(|(p, _, _)| p == path) else {
            return Err(ResourceError::NotFound(path.to_string()));
        };
        tokio::time::sleep(*delay).await;
        Ok(Arc::new(data.clone()))
    }

    fn name(&self) -> &'static str {
        "delayed"
    }
}

/// Answers every request the way a server error would.
#[derive(Debug)]
pub struct FailingProvider;

#[async_trait]
impl ResourceProvider for FailingProvider {
    async fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError> {
        Err(ResourceError::LoadFailed {
            path: path.to_string(),
            message: "HTTP error: 503 Service Unavailable".to_string(),
        })
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}
