//! Cover page: title, subtitle, generation date and the link back to the radar.

use crate::pipeline::config::CoverConfig;
use crate::pipeline::report::StepOutcome;
use chrono::Datelike;
use radar_print_dom::{Document, SelectorError};

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Formats a date as `"August 2025"`.
pub fn month_year<D: Datelike>(date: &D) -> String {
    format!("{} {}", MONTH_NAMES[date.month0() as usize], date.year())
}

fn set_first_text(doc: &mut Document, selector: &str, text: &str) -> Result<bool, SelectorError> {
    match doc.select_first(doc.root(), selector)? {
        Some(field) => {
            doc.set_text(field, text);
            Ok(true)
        }
        None => {
            log::debug!("Cover field '{}' not found", selector);
            Ok(false)
        }
    }
}

/// Fills the cover fields. The date string is computed once and shared by
/// the cover and every footer.
pub fn compose_cover<D: Datelike>(
    doc: &mut Document,
    config: &CoverConfig,
    product_title: &str,
    subtitle: Option<&str>,
    today: &D,
) -> StepOutcome {
    let write = |doc: &mut Document| -> Result<StepOutcome, SelectorError> {
        if doc.select_first(doc.root(), &config.page_selector)?.is_none() {
            return Ok(StepOutcome::skipped(format!(
                "cover page '{}' not found",
                config.page_selector
            )));
        }

        let date = month_year(today);
        set_first_text(doc, &config.title_selector, product_title)?;
        set_first_text(doc, &config.subtitle_selector, subtitle.unwrap_or(""))?;
        set_first_text(doc, &config.date_selector, &date)?;
        for footer in doc.select(doc.root(), &config.footer_date_selector)? {
            doc.set_text(footer, date.as_str());
        }
        Ok(StepOutcome::Ok)
    };
    write(doc).unwrap_or_else(|e| StepOutcome::failed(e.to_string()))
}

/// Points the "generated from" anchor at `location`.
pub fn add_self_link(doc: &mut Document, config: &CoverConfig, location: &str) -> StepOutcome {
    match doc.select_first(doc.root(), &config.self_link_selector) {
        Ok(Some(anchor)) => {
            doc.set_attr(anchor, "href", location);
            StepOutcome::Ok
        }
        Ok(None) => StepOutcome::skipped(format!(
            "self link '{}' not found",
            config.self_link_selector
        )),
        Err(e) => StepOutcome::failed(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_month_year_uses_calendar_order() {
        let january = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let december = NaiveDate::from_ymd_opt(2030, 12, 1).unwrap();
        assert_eq!(month_year(&january), "January 2024");
        assert_eq!(month_year(&december), "December 2030");
    }

    #[test]
    fn test_missing_cover_page_is_skipped() {
        let mut doc = Document::new();
        doc.append_element(doc.root(), "main");
        let today = NaiveDate::from_ymd_opt(2025, 8, 15).unwrap();
        let outcome = compose_cover(&mut doc, &CoverConfig::default(), "Technology Radar", None, &today);
        assert!(outcome.is_skipped());
    }

    #[test]
    fn test_bad_selector_fails_the_step() {
        let mut doc = Document::new();
        let config = CoverConfig {
            self_link_selector: "a[".to_string(),
            ..CoverConfig::default()
        };
        assert!(add_self_link(&mut doc, &config, "https://radar.example").is_failed());
    }
}
