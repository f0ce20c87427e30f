// PDF layout: font resolution, word-wrap, pagination and the per-document layouts.
// Rendering is CPU-bound and must run inside tokio::task::spawn_blocking.

pub mod canvas;
pub mod engine;
pub mod font_metrics;
pub mod fonts;
pub mod wrap;

pub use engine::{LayoutEngine, LayoutError, LayoutSettings, LayoutWarning};
pub use fonts::{resolve_fonts, DEFAULT_FAMILIES, DEFAULT_FONT_DIRS};
