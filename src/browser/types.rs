use serde::{Deserialize, Serialize};

/// Viewport dimensions for a browser context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        // Desktop audit baseline
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

/// Element bounding box in page-pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A hyperlink discovered on a page: target plus visible anchor text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub url: String,
    pub text: String,
}

/// A clickable element candidate for the dynamic-interaction pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clickable {
    /// CSS selector resolving to this element
    pub selector: String,
    /// Visible text, used against the destructive-action denylist
    pub text: String,
}
