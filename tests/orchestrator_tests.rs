mod common;

use chrono::NaiveDate;
use common::fixtures::*;
use common::{DelayedProvider, FailingProvider, TestResult, parse_page, region_markup, texts};
use radar_print::{BuildContext, Document, PipelineBuilder, StepOutcome};
use radar_print_resource::{FilesystemResourceProvider, InMemoryResourceProvider};
use std::sync::Arc;
use std::time::Duration;

fn context() -> BuildContext {
    BuildContext {
        subtitle: Some("Volume 33".to_string()),
        today: NaiveDate::from_ymd_opt(2025, 8, 15).unwrap(),
        location: "https://radar.example.com/".to_string(),
    }
}

#[tokio::test(start_paused = true)]
async fn test_content_waits_for_both_pages() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let provider = DelayedProvider::new()
        .with("files/themes.csv", Duration::from_millis(200), THEMES_CSV)
        .with("files/about.csv", Duration::from_millis(20), ABOUT_CSV);
    let pipeline = PipelineBuilder::new()
        .with_resource_provider(Arc::new(provider))
        .build()?;

    let mut doc = parse_page(&full_radar_page())?;
    let start = tokio::time::Instant::now();
    let report = pipeline.initialize_content(&mut doc).await;
    let elapsed = start.elapsed();

    assert_eq!(texts(&doc, ".pdf-theme-title"), vec!["1. AI assistance", "2. Platform teams"]);
    assert_eq!(texts(&doc, ".pdf-about-section-title").len(), 2);
    assert!(elapsed >= Duration::from_millis(200));
    assert!(elapsed < Duration::from_millis(220), "pages were fetched one after another");

    let steps: Vec<_> = report.steps().iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(steps, vec!["themes", "about"]);
    assert!(!report.has_failures());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_abandoned_content_keeps_the_document() -> TestResult {
    let provider = DelayedProvider::new()
        .with("files/themes.csv", Duration::from_millis(200), THEMES_CSV)
        .with("files/about.csv", Duration::from_millis(20), ABOUT_CSV);
    let pipeline = PipelineBuilder::new()
        .with_resource_provider(Arc::new(provider))
        .build()?;

    let mut doc = parse_page(&full_radar_page())?;
    let themes_before = region_markup(&doc, "#pdf-themes-page");
    let nodes_before = doc.descendants(doc.root()).len();

    let result = tokio::time::timeout(Duration::from_millis(50), pipeline.initialize_content(&mut doc)).await;

    assert!(result.is_err());
    assert!(doc.document_element().is_some());
    assert_eq!(region_markup(&doc, "#pdf-themes-page"), themes_before);
    assert_eq!(texts(&doc, ".pdf-about-section-title"), vec!["Who we are", "How we build it"]);
    assert!(doc.descendants(doc.root()).len() > nodes_before);
    Ok(())
}

#[tokio::test]
async fn test_failed_page_does_not_block_the_other() -> TestResult {
    let provider = DelayedProvider::new().with("files/about.csv", Duration::from_millis(5), ABOUT_CSV);
    let pipeline = PipelineBuilder::new()
        .with_resource_provider(Arc::new(provider))
        .build()?;

    let mut doc = parse_page(&full_radar_page())?;
    let themes_before = region_markup(&doc, "#pdf-themes-page");
    let report = pipeline.initialize_content(&mut doc).await;

    assert!(report.outcome("themes").is_some_and(StepOutcome::is_failed));
    assert_eq!(report.outcome("about"), Some(&StepOutcome::Ok));
    assert_eq!(region_markup(&doc, "#pdf-themes-page"), themes_before);
    assert_eq!(texts(&doc, ".pdf-about-section-title").len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_full_build() -> TestResult {
    let provider = InMemoryResourceProvider::new()
        .with("files/themes.csv", THEMES_CSV)?
        .with("files/about.csv", ABOUT_CSV)?;
    let pipeline = PipelineBuilder::new()
        .with_resource_provider(Arc::new(provider))
        .build()?;

    let output = pipeline.build(parse_page(&full_radar_page())?, &context()).await;

    let steps: Vec<_> = output.report.steps().iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(steps, vec!["cover", "self-link", "snapshot", "index", "themes", "about"]);
    for (step, outcome) in output.report.steps() {
        assert!(outcome.is_ok(), "{} was {}", step, outcome);
    }
    assert_eq!(output.outline.entry_count(), 6);

    let doc = &output.document;
    assert_eq!(texts(doc, ".pdf-subtitle"), vec!["Volume 33"]);
    assert_eq!(texts(doc, ".pdf-index-quadrant__name").len(), 4);
    assert_eq!(doc.select(doc.root(), ".radar-plot--print")?.len(), 1);
    assert_eq!(doc.len(), 1 + doc.descendants(doc.root()).len());

    let markup = doc.to_markup()?;
    assert!(markup.starts_with("<!DOCTYPE html>"));
    let reparsed = Document::parse(&markup)?;
    assert_eq!(texts(&reparsed, ".pdf-date"), vec!["August 2025"]);
    assert_eq!(texts(&reparsed, ".pdf-theme-title").len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_build_degrades_without_resources() -> TestResult {
    let pipeline = PipelineBuilder::new()
        .with_resource_provider(Arc::new(FailingProvider))
        .build()?;

    let output = pipeline.build(parse_page(&full_radar_page())?, &context()).await;

    assert!(output.report.has_failures());
    assert_eq!(output.report.outcome("index"), Some(&StepOutcome::Ok));
    assert_eq!(texts(&output.document, ".default-theme"), vec!["Default themes"]);
    assert_eq!(texts(&output.document, ".default-about"), vec!["Default about"]);
    Ok(())
}

#[tokio::test]
async fn test_build_from_a_resource_directory() -> TestResult {
    let dir = tempfile::tempdir()?;
    std::fs::create_dir(dir.path().join("files"))?;
    std::fs::write(dir.path().join("files/themes.csv"), THEMES_CSV)?;

    let pipeline = PipelineBuilder::new()
        .with_resource_provider(Arc::new(FilesystemResourceProvider::new(dir.path())))
        .build()?;
    let output = pipeline.build(parse_page(&full_radar_page())?, &context()).await;

    assert_eq!(output.report.outcome("themes"), Some(&StepOutcome::Ok));
    assert!(output.report.outcome("about").is_some_and(StepOutcome::is_failed));
    assert_eq!(texts(&output.document, ".pdf-theme-title").len(), 2);
    Ok(())
}
