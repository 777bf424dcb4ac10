//! Markup builders for a rendered radar page.

/// A blip as the radar's quadrant tables list it: `(id, display name)`.
pub type Blip<'a> = (&'a str, &'a str);

/// A live radar with one isolated quadrant and faded blips, as the
/// interactive view leaves it.
pub fn radar_svg() -> &'static str {
    r#"<svg xmlns="http://www.w3.org/2000/svg" id="radar-plot" class="radar-plot" width="1056px" height="1000">
    <g class="quadrant-group quadrant-group-first" style="opacity: 0.3; transform: translate(-120px, 40px)" transform="scale(1.2)">
      <a class="blip-link" id="blip-link-1" style="opacity: 0.3"><circle r="4"/></a>
    </g>
    <g class="quadrant-group quadrant-group-second" style="opacity: 1">
      <a class="blip-link" id="blip-link-2"><circle r="4"/></a>
    </g>
  </svg>"#
}

/// A ring name followed by its blip list. `None` renders the name alone.
pub fn ring(name: &str, blips: Option<&[Blip<'_>]>) -> String {
    let list = match blips {
        None => String::new(),
        Some(blips) => {
            let items: String = blips
                .iter()
                .map(|(id, name)| {
                    format!(
                        r#"<li class="blip-list__item" data-blip-id="{id}"><div class="blip-list__item-container"><div class="blip-list__item-container__name"><span class="blip-list__item-container__name-value">{name}</span></div></div></li>"#
                    )
                })
                .collect();
            format!(r#"<ul class="blip-list">{items}</ul>"#)
        }
    };
    format!(r#"<h3 class="quadrant-table__ring-name">{name}</h3>{list}"#)
}

/// A quadrant table. `None` renders the table without a name element.
pub fn quadrant_table(position: &str, name: Option<&str>, rings: &[String]) -> String {
    let heading = name
        .map(|n| format!(r#"<div class="quadrant-table__name">{n}</div>"#))
        .unwrap_or_default();
    format!(
        r#"<div class="quadrant-table {position}">{heading}{}</div>"#,
        rings.concat()
    )
}

/// A complete print page around the given radar and quadrant tables.
pub fn radar_page(svg: &str, tables: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html xmlns="http://www.w3.org/1999/xhtml">
<head><title>Radar</title><meta charset="utf-8"/></head>
<body>
<main>
  <div id="pdf-cover-page">
    <h1 class="pdf-title">Placeholder title</h1>
    <h2 class="pdf-subtitle">Placeholder subtitle</h2>
    <p class="pdf-date">Placeholder date</p>
    <a id="generated-radar-link" href="">Generated radar</a>
    <div class="pdf-page-footer"><span class="footer-date"></span></div>
  </div>
  <div id="pdf-index-page">
    <div id="pdf-radar-snapshot"><p>Snapshot placeholder</p></div>
    <div class="pdf-index-outline"><p>Outline placeholder</p></div>
    <div class="pdf-page-footer"><span class="footer-date"></span></div>
  </div>
  <div id="pdf-themes-page">
    <div class="pdf-themes-content"><p class="default-theme">Default themes</p></div>
    <div class="pdf-page-footer"><span class="footer-date"></span></div>
  </div>
  <div id="pdf-about-page">
    <div class="pdf-about-content"><p class="default-about">Default about</p></div>
  </div>
  {svg}
  <div class="quadrant-tables">{tables}</div>
</main>
</body>
</html>"#
    )
}

/// A page with all four quadrants populated.
pub fn full_radar_page() -> String {
    let tables = [
        quadrant_table(
            "third",
            Some("Platforms"),
            &[ring("Adopt", Some(&[("30", "7. Kubernetes")]))],
        ),
        quadrant_table(
            "first",
            Some("Techniques"),
            &[
                ring("Adopt", Some(&[("1", "1. Pairing"), ("2", "2. Trunk-based development")])),
                ring("Trial", Some(&[("3", "3. Kubernetes")])),
            ],
        ),
        quadrant_table(
            "fourth",
            Some("Languages &amp; Frameworks"),
            &[ring("Assess", Some(&[("40", "12. Rust")]))],
        ),
        quadrant_table(
            "second",
            Some("Tools"),
            &[ring("Hold", Some(&[("20", "5. Spreadsheets")]))],
        ),
    ]
    .concat();
    radar_page(radar_svg(), &tables)
}

pub const THEMES_CSV: &str = "title,description\nAI assistance,Everyone pairs with a model\nPlatform teams,Paved roads everywhere\n";

pub const ABOUT_CSV: &str = "section,content\nWho we are,A group of technologists\nHow we build it,Nominations and discussion\n";
