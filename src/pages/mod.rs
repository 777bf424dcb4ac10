//! Page builders. Each one owns a single region of the print document.

pub mod content;
pub mod cover;
pub mod index;
pub mod snapshot;
