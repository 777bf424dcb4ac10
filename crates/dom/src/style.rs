//! Inline `style` attribute access.

use crate::document::{Document, NodeId};

/// Splits `a: b; c: d` into ordered `(property, value)` pairs. Declarations
/// without a colon are dropped.
pub fn parse_declarations(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter_map(|declaration| {
            let (property, value) = declaration.split_once(':')?;
            let property = property.trim();
            if property.is_empty() {
                return None;
            }
            Some((property.to_ascii_lowercase(), value.trim().to_string()))
        })
        .collect()
}

pub fn format_declarations(declarations: &[(String, String)]) -> String {
    declarations
        .iter()
        .map(|(property, value)| format!("{}: {}", property, value))
        .collect::<Vec<_>>()
        .join("; ")
}

impl Document {
    /// The inline value of `property`, if declared.
    pub fn style(&self, id: NodeId, property: &str) -> Option<String> {
        let style = self.attr(id, "style")?;
        parse_declarations(style)
            .into_iter()
            .rev()
            .find(|(name, _)| name.eq_ignore_ascii_case(property))
            .map(|(_, value)| value)
    }

    /// Sets `property` inline, keeping the position of an existing
    /// declaration.
    pub fn set_style(&mut self, id: NodeId, property: &str, value: &str) {
        let mut declarations = parse_declarations(self.attr(id, "style").unwrap_or(""));
        match declarations
            .iter_mut()
            .find(|(name, _)| name.eq_ignore_ascii_case(property))
        {
            Some(existing) => existing.1 = value.to_string(),
            None => declarations.push((property.to_ascii_lowercase(), value.to_string())),
        }
        self.set_attr(id, "style", format_declarations(&declarations));
    }

    /// Drops `property` from the inline style. An emptied style attribute is
    /// removed entirely.
    pub fn remove_style(&mut self, id: NodeId, property: &str) {
        let Some(style) = self.attr(id, "style") else {
            return;
        };
        let mut declarations = parse_declarations(style);
        declarations.retain(|(name, _)| !name.eq_ignore_ascii_case(property));
        if declarations.is_empty() {
            self.remove_attr(id, "style");
        } else {
            self.set_attr(id, "style", format_declarations(&declarations));
        }
    }
}
