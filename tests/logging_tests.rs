mod common;

use chrono::NaiveDate;
use common::fixtures::*;
use common::{FailingProvider, TestResult, parse_page};
use log::{Level, LevelFilter, Log, Metadata, Record};
use radar_print::{BuildContext, PipelineBuilder};
use std::sync::{Arc, Mutex};

static RECORDS: Mutex<Vec<(Level, String)>> = Mutex::new(Vec::new());

struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Ok(mut records) = RECORDS.lock() {
            records.push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;

fn take_warnings() -> Vec<String> {
    let mut records = RECORDS.lock().unwrap();
    records
        .drain(..)
        .filter(|(level, _)| *level == Level::Warn)
        .map(|(_, message)| message)
        .collect()
}

// One test per binary: the logger is process-global.
#[tokio::test]
async fn test_failed_pages_are_warned_once() -> TestResult {
    log::set_logger(&LOGGER).map_err(|e| e.to_string())?;
    log::set_max_level(LevelFilter::Trace);

    let pipeline = PipelineBuilder::new()
        .with_resource_provider(Arc::new(FailingProvider))
        .build()?;

    let mut doc = parse_page(&full_radar_page())?;
    take_warnings();
    pipeline.initialize_content(&mut doc).await;
    let warnings = take_warnings();
    assert_eq!(warnings.len(), 2, "{:?}", warnings);
    assert!(warnings[0].starts_with("themes: failed"));
    assert!(warnings[0].ends_with("existing content kept"));
    assert!(warnings[1].starts_with("about: failed"));

    let context = BuildContext {
        subtitle: None,
        today: NaiveDate::from_ymd_opt(2025, 8, 15).unwrap(),
        location: "https://radar.example.com/".to_string(),
    };
    pipeline.build(parse_page(&full_radar_page())?, &context).await;
    let warnings = take_warnings();
    assert_eq!(warnings.iter().filter(|w| w.starts_with("themes: failed")).count(), 1);
    assert_eq!(warnings.iter().filter(|w| w.starts_with("about: failed")).count(), 1);
    Ok(())
}
