//! Intermediate forms of the print document.
//!
//! The page builders first derive plain data from their inputs (an
//! [`IndexOutline`] from the rendered radar, [`ContentBlock`]s from decoded
//! records) and only then write markup. Keeping the two steps apart makes
//! the derivation testable on its own and lets the outline be exported.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The four fixed radar quadrants, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuadrantPosition {
    First,
    Second,
    Third,
    Fourth,
}

impl QuadrantPosition {
    /// Canonical iteration order, independent of how the radar was rendered.
    pub const ALL: [QuadrantPosition; 4] = [
        QuadrantPosition::First,
        QuadrantPosition::Second,
        QuadrantPosition::Third,
        QuadrantPosition::Fourth,
    ];

    /// The order key used as a class name by the rendered radar.
    pub fn as_str(self) -> &'static str {
        match self {
            QuadrantPosition::First => "first",
            QuadrantPosition::Second => "second",
            QuadrantPosition::Third => "third",
            QuadrantPosition::Fourth => "fourth",
        }
    }

    /// Style class for the quadrant's heading block in the index.
    pub fn index_class(self) -> &'static str {
        match self {
            QuadrantPosition::First => "pdf-index-quadrant--green",
            QuadrantPosition::Second => "pdf-index-quadrant--blue",
            QuadrantPosition::Third => "pdf-index-quadrant--orange",
            QuadrantPosition::Fourth => "pdf-index-quadrant--violet",
        }
    }

    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == key)
    }
}

impl fmt::Display for QuadrantPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- Index outline ---

/// A navigable entry: display text plus the anchor it links to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    pub text: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RingOutline {
    pub name: String,
    pub entries: Vec<OutlineEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuadrantOutline {
    pub position: QuadrantPosition,
    pub name: String,
    pub rings: Vec<RingOutline>,
}

/// The radar's quadrant → ring → entry structure, reduced to what the index
/// page shows.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IndexOutline {
    pub quadrants: Vec<QuadrantOutline>,
}

impl IndexOutline {
    pub fn is_empty(&self) -> bool {
        self.quadrants.is_empty()
    }

    pub fn entry_count(&self) -> usize {
        self.quadrants
            .iter()
            .flat_map(|q| &q.rings)
            .map(|r| r.entries.len())
            .sum()
    }

    pub fn quadrant(&self, position: QuadrantPosition) -> Option<&QuadrantOutline> {
        self.quadrants.iter().find(|q| q.position == position)
    }
}

// --- Content blocks ---

/// One heading + body pair on a content page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    pub heading: String,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_round_trip_keys() {
        for position in QuadrantPosition::ALL {
            assert_eq!(QuadrantPosition::parse(position.as_str()), Some(position));
        }
        assert_eq!(QuadrantPosition::parse("fifth"), None);
    }

    #[test]
    fn test_index_classes_are_distinct() {
        let mut classes: Vec<_> = QuadrantPosition::ALL.iter().map(|p| p.index_class()).collect();
        classes.dedup();
        assert_eq!(classes.len(), 4);
    }

    #[test]
    fn test_outline_serializes_positions_lowercase() {
        let outline = IndexOutline {
            quadrants: vec![QuadrantOutline {
                position: QuadrantPosition::Third,
                name: "Platforms".to_string(),
                rings: vec![RingOutline {
                    name: "Adopt".to_string(),
                    entries: vec![OutlineEntry {
                        text: "Kubernetes".to_string(),
                        href: "#blip-description-7".to_string(),
                    }],
                }],
            }],
        };
        let json = serde_json::to_value(&outline).unwrap();
        assert_eq!(json["quadrants"][0]["position"], "third");
        assert_eq!(outline.entry_count(), 1);
        assert!(outline.quadrant(QuadrantPosition::First).is_none());
    }
}
