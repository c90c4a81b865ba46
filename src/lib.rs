//! weft renders markup as positioned text: a permissive HTML tree builder
//! feeding a greedy line-layout engine. Networking and painting are external
//! collaborators; this crate goes from a fully buffered markup string to an
//! ordered display list.

pub use html::{Dom, Id, Node, TreeBuilder, parse};
pub use layout::{
    ApproxFontBackend, FontBackend, FontError, FontHandle, FontResolver, FontSpec, FontStyle,
    FontWeight, LayoutConfig, LayoutError, LayoutRun, LineMetrics, layout_document,
};

/// Parse and lay out in one blocking call. Parsing never fails; the only
/// error is the font backend refusing to resolve a spec.
pub fn render(
    markup: &str,
    config: LayoutConfig,
    backend: &dyn FontBackend,
) -> Result<Vec<LayoutRun>, LayoutError> {
    let dom = html::parse(markup);
    layout::layout_document(&dom, config, backend)
}
