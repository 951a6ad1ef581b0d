//! Sticky notes placed in the quarterly grid.

use serde::{Deserialize, Serialize};

/// A free-form sticky note occupying a cell region in a quarter's grid.
///
/// `i`/`j` are the row/column of the top-left cell; `w`/`h` are the spans
/// in cells and are always at least 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuarterlyNote {
    pub i: u32,
    pub j: u32,
    pub w: u32,
    pub h: u32,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl QuarterlyNote {
    pub fn new(i: u32, j: u32, content: impl Into<String>) -> Self {
        Self {
            i,
            j,
            w: 1,
            h: 1,
            content: content.into(),
            color: None,
        }
    }

    pub fn with_span(mut self, w: u32, h: u32) -> Self {
        self.w = w.max(1);
        self.h = h.max(1);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}
