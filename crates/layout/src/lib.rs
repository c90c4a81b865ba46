//! Line layout: turns a parsed document into an ordered list of positioned,
//! font-attributed word runs for an external paint surface.

mod engine;
mod fonts;

pub use crate::engine::{LayoutConfig, LayoutError, LayoutRun, layout_document};
pub use crate::fonts::{
    ApproxFontBackend, FontBackend, FontError, FontHandle, FontResolver, FontSpec, FontStyle,
    FontWeight, LineMetrics,
};
